use lazy_static::lazy_static;
use regex::Regex;
use validator::{Validate, ValidationError};

lazy_static! {
    /// ユーザー名に使える文字種 (半角英数字と @/./+/-/_)
    static ref USERNAME_REGEX: Regex = Regex::new(r"^[\w.@+-]+$").unwrap();
}

/// アカウント登録フォームのバリデーション。
#[derive(Debug, Validate)]
pub struct CredentialsValidation {
    #[validate(
        length(min = 1, max = 150, message = "ユーザー名は1〜150文字の間で入力してください"),
        custom(
            function = "validate_username_chars",
            message = "ユーザー名には半角英数字、@/./+/-/_ のみ使用できます"
        )
    )]
    pub username: String,

    #[validate(length(min = 8, message = "パスワードは8文字以上で入力してください"))]
    pub password: String,
}

fn validate_username_chars(username: &str) -> Result<(), ValidationError> {
    if USERNAME_REGEX.is_match(username) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_username_chars"))
    }
}

impl CredentialsValidation {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// バリデーションを実行し、エラーメッセージの一覧を返す
    pub fn validate_form(&self) -> Result<(), Vec<String>> {
        collect_messages(self.validate())
    }
}

/// TODO本文のバリデーション。
/// 空白のみの本文は空とみなして拒否します。
#[derive(Debug, Validate)]
pub struct TodoTextValidation {
    #[validate(
        length(max = 500, message = "本文は500文字以内で入力してください"),
        custom(function = "validate_not_blank", message = "本文は必須です")
    )]
    pub text: String,
}

fn validate_not_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        Err(ValidationError::new("blank_text"))
    } else {
        Ok(())
    }
}

impl TodoTextValidation {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }

    pub fn validate_form(&self) -> Result<(), Vec<String>> {
        collect_messages(self.validate())
    }
}

fn collect_messages(
    result: Result<(), validator::ValidationErrors>,
) -> Result<(), Vec<String>> {
    match result {
        Ok(_) => Ok(()),
        Err(errors) => {
            let mut messages = Vec::new();
            for (field, field_errors) in errors.field_errors() {
                for error in field_errors {
                    let msg = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} が不正です", field));
                    messages.push(msg);
                }
            }
            Err(messages)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_credentials() {
        let form = CredentialsValidation::new("player_one", "password123");
        assert!(form.validate_form().is_ok());
    }

    #[test]
    fn test_email_style_username_allowed() {
        let form = CredentialsValidation::new("player@pixel.quest", "password123");
        assert!(form.validate_form().is_ok());
    }

    #[test]
    fn test_empty_username_rejected() {
        let form = CredentialsValidation::new("", "password123");
        assert!(form.validate_form().is_err());
    }

    #[test]
    fn test_username_too_long() {
        let long_username = "a".repeat(151);
        let form = CredentialsValidation::new(&long_username, "password123");
        assert!(form.validate_form().is_err());
    }

    #[test]
    fn test_short_password_rejected() {
        let form = CredentialsValidation::new("player_one", "short");
        assert!(form.validate_form().is_err());
    }

    #[test]
    fn test_todo_text_valid() {
        assert!(TodoTextValidation::new("Buy milk").validate_form().is_ok());
    }

    #[test]
    fn test_todo_text_blank_rejected() {
        assert!(TodoTextValidation::new("").validate_form().is_err());
        assert!(TodoTextValidation::new("   ").validate_form().is_err());
    }

    #[test]
    fn test_todo_text_too_long() {
        let long_text = "x".repeat(501);
        assert!(TodoTextValidation::new(&long_text).validate_form().is_err());
    }
}
