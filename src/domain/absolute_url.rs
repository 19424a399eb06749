use crate::domain::FieldReason;
use reqwest::Url;

/// A link that parses as an absolute URL, kept exactly as the caller wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsoluteUrl(String);

impl AbsoluteUrl {
    pub fn parse(s: String) -> Result<AbsoluteUrl, FieldReason> {
        if s.trim().is_empty() {
            return Err(FieldReason::Empty);
        }
        match Url::parse(&s) {
            Ok(_) => Ok(Self(s)),
            Err(_) => Err(FieldReason::InvalidUrl),
        }
    }
}

impl AsRef<str> for AbsoluteUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AbsoluteUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
