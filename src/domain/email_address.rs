use crate::domain::FieldReason;
use validator::validate_email;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(s: String) -> Result<EmailAddress, FieldReason> {
        if s.trim().is_empty() {
            Err(FieldReason::Empty)
        } else if validate_email(&s) {
            Ok(Self(s))
        } else {
            Err(FieldReason::InvalidEmail)
        }
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
