use crate::domain::{
    AbsoluteUrl, EmailAddress, FieldError, FieldReason, OrganizationName, ValidationError,
};
use serde_json::{Map, Value};

/// A validated request to send one transactional email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliverEmail {
    pub to: EmailAddress,
    pub intent: EmailIntent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailIntent {
    MagicLink { magic_link: AbsoluteUrl },
    Invite(Invite),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invite {
    pub org_name: OrganizationName,
    pub inviter_name: Option<String>,
    pub inviter_email: Option<EmailAddress>,
    pub invite_link: Option<AbsoluteUrl>,
}

impl EmailIntent {
    pub fn kind(&self) -> &'static str {
        match self {
            EmailIntent::MagicLink { .. } => "magic_link",
            EmailIntent::Invite(_) => "invite",
        }
    }
}

impl TryFrom<Value> for DeliverEmail {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let mut record = match value {
            Value::Object(record) => record,
            _ => return Err(ValidationError::NotAnObject),
        };
        let mut errors = Vec::new();

        let kind = match record.remove("kind") {
            None | Some(Value::Null) => {
                errors.push(field_error("kind", FieldReason::Missing));
                None
            }
            Some(Value::String(kind)) => Some(kind),
            Some(_) => {
                errors.push(field_error("kind", FieldReason::NotAString));
                None
            }
        };
        let intent = match kind.as_deref() {
            Some("magic_link") => parse_magic_link(&mut record, &mut errors),
            Some("invite") => parse_invite(&mut record, &mut errors),
            Some(other) => return Err(ValidationError::UnrecognizedKind(other.to_owned())),
            None => None,
        };
        let to = required(&mut record, "to", EmailAddress::parse, &mut errors);

        match (to, intent) {
            (Some(to), Some(intent)) if errors.is_empty() => Ok(DeliverEmail { to, intent }),
            _ => Err(ValidationError::InvalidFields(errors)),
        }
    }
}

fn parse_magic_link(
    record: &mut Map<String, Value>,
    errors: &mut Vec<FieldError>,
) -> Option<EmailIntent> {
    let magic_link = required(record, "magicLink", AbsoluteUrl::parse, errors)?;
    Some(EmailIntent::MagicLink { magic_link })
}

fn parse_invite(
    record: &mut Map<String, Value>,
    errors: &mut Vec<FieldError>,
) -> Option<EmailIntent> {
    let org_name = required(record, "orgName", OrganizationName::parse, errors);
    let inviter_name = optional(record, "inviterName", non_empty, errors);
    let inviter_email = optional(record, "inviterEmail", EmailAddress::parse, errors);
    let invite_link = optional(record, "inviteLink", AbsoluteUrl::parse, errors);
    Some(EmailIntent::Invite(Invite {
        org_name: org_name?,
        inviter_name: inviter_name?,
        inviter_email: inviter_email?,
        invite_link: invite_link?,
    }))
}

fn non_empty(s: String) -> Result<String, FieldReason> {
    if s.trim().is_empty() {
        Err(FieldReason::Empty)
    } else {
        Ok(s)
    }
}

fn field_error(field: &'static str, reason: FieldReason) -> FieldError {
    FieldError { field, reason }
}

fn required<T>(
    record: &mut Map<String, Value>,
    field: &'static str,
    parse: impl FnOnce(String) -> Result<T, FieldReason>,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    match record.remove(field) {
        None | Some(Value::Null) => {
            errors.push(field_error(field, FieldReason::Missing));
            None
        }
        Some(value) => parse_string(value, field, parse, errors),
    }
}

/// Outer `None` means the field failed validation, inner `None` that it was absent.
fn optional<T>(
    record: &mut Map<String, Value>,
    field: &'static str,
    parse: impl FnOnce(String) -> Result<T, FieldReason>,
    errors: &mut Vec<FieldError>,
) -> Option<Option<T>> {
    match record.remove(field) {
        None | Some(Value::Null) => Some(None),
        Some(value) => parse_string(value, field, parse, errors).map(Some),
    }
}

fn parse_string<T>(
    value: Value,
    field: &'static str,
    parse: impl FnOnce(String) -> Result<T, FieldReason>,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    let s = match value {
        Value::String(s) => s,
        _ => {
            errors.push(field_error(field, FieldReason::NotAString));
            return None;
        }
    };
    parse(s)
        .map_err(|reason| errors.push(field_error(field, reason)))
        .ok()
}
