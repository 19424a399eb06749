#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldReason {
    Missing,
    NotAString,
    Empty,
    InvalidEmail,
    InvalidUrl,
    InvalidName,
}

impl std::fmt::Display for FieldReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            FieldReason::Missing => "is missing",
            FieldReason::NotAString => "must be a string",
            FieldReason::Empty => "must not be empty",
            FieldReason::InvalidEmail => "is not a valid email address",
            FieldReason::InvalidUrl => "is not a valid absolute URL",
            FieldReason::InvalidName => "is not a valid name",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: FieldReason,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` {}", self.field, self.reason)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Email request must be a JSON object")]
    NotAnObject,
    #[error("Unrecognized intent kind `{0}`")]
    UnrecognizedKind(String),
    #[error("Invalid email request: {}", join_fields(.0))]
    InvalidFields(Vec<FieldError>),
}

impl ValidationError {
    pub fn fields(&self) -> &[FieldError] {
        match self {
            ValidationError::InvalidFields(fields) => fields,
            ValidationError::NotAnObject | ValidationError::UnrecognizedKind(_) => &[],
        }
    }

    pub fn has_field_error(&self, field: &str, reason: FieldReason) -> bool {
        self.fields()
            .iter()
            .any(|e| e.field == field && e.reason == reason)
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
