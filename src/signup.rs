//! Sign-up form schema
//!
//! The reference form: an email address, a password of 8 to 16 characters,
//! and a confirmation that must repeat the password. The same schema ships as
//! data in `schemas/signup.toml`.

use crate::error::Result;
use crate::rule::Rule;
use crate::schema::{FieldSpec, Schema};

pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";
pub const PASSWORD_CHECK: &str = "passwordCheck";

pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 16;

/// Email shape: something, `@`, something, `.`, something, no whitespace
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Messages shown on the sign-up form
pub mod messages {
    pub const EMAIL_REQUIRED: &str = "이메일을 입력해 주세요!";
    pub const EMAIL_FORMAT: &str = "유효한 이메일 형식이 아닙니다.";
    pub const PASSWORD_REQUIRED: &str = "비밀번호를 입력해 주세요!";
    pub const PASSWORD_TOO_SHORT: &str = "비밀번호는 8자 이상이어야 합니다.";
    pub const PASSWORD_TOO_LONG: &str = "비밀번호는 16자 이하이어야 합니다.";
    pub const PASSWORD_CHECK_REQUIRED: &str = "비밀번호를 다시 입력해 주세요!";
    pub const PASSWORD_MISMATCH: &str = "비밀번호가 일치하지 않습니다.";
}

/// Build the sign-up schema
pub fn signup_schema() -> Result<Schema> {
    Schema::new(vec![
        FieldSpec::new(
            EMAIL,
            vec![
                Rule::required(messages::EMAIL_REQUIRED),
                Rule::pattern(EMAIL_PATTERN, messages::EMAIL_FORMAT)?,
            ],
        ),
        FieldSpec::new(
            PASSWORD,
            vec![
                Rule::required(messages::PASSWORD_REQUIRED),
                Rule::min_length(PASSWORD_MIN_LENGTH, messages::PASSWORD_TOO_SHORT),
                Rule::max_length(PASSWORD_MAX_LENGTH, messages::PASSWORD_TOO_LONG),
            ],
        ),
        FieldSpec::new(
            PASSWORD_CHECK,
            vec![
                Rule::required(messages::PASSWORD_CHECK_REQUIRED),
                Rule::equals_field(PASSWORD, messages::PASSWORD_MISMATCH),
            ],
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Expression;

    #[test]
    fn test_signup_schema_fields() {
        let schema = signup_schema().unwrap();
        let names: Vec<_> = schema.field_names().collect();
        assert_eq!(names, vec![EMAIL, PASSWORD, PASSWORD_CHECK]);
    }

    #[test]
    fn test_email_pattern() {
        let pattern = Expression::new(EMAIL_PATTERN).unwrap();
        assert!(pattern.is_match("a@b.com"));
        assert!(pattern.is_match("first.last@sub.example.co.kr"));
        assert!(!pattern.is_match("not-an-email"));
        assert!(!pattern.is_match("a@b"));
        assert!(!pattern.is_match("a b@c.com"));
        assert!(!pattern.is_match("@b.com"));
    }
}
