use crate::domain::{DeliverEmail, FieldError, ValidationError};
use crate::email_client::{EmailClient, SendEmailError};
use crate::routes::error_chain_fmt;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};

#[derive(thiserror::Error)]
pub enum DeliverError {
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    #[error(transparent)]
    SendError(#[from] SendEmailError),
}

impl std::fmt::Debug for DeliverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(serde::Serialize)]
struct ErrorBody<'a> {
    error: String,
    fields: &'a [FieldError],
}

impl ResponseError for DeliverError {
    fn status_code(&self) -> StatusCode {
        match self {
            DeliverError::ValidationError(_) => StatusCode::BAD_REQUEST,
            DeliverError::SendError(SendEmailError::Delivery(_)) => StatusCode::BAD_GATEWAY,
            DeliverError::SendError(SendEmailError::Render(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let fields: &[FieldError] = match self {
            DeliverError::ValidationError(e) => e.fields(),
            DeliverError::SendError(_) => &[],
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
            fields,
        })
    }
}

#[tracing::instrument(
    name = "Delivering a transactional email",
    skip(body, email_client),
    fields(email_kind = tracing::field::Empty)
)]
pub async fn deliver_email(
    body: web::Json<serde_json::Value>,
    email_client: web::Data<EmailClient>,
) -> Result<HttpResponse, DeliverError> {
    let email: DeliverEmail = body.into_inner().try_into()?;
    tracing::Span::current().record("email_kind", &tracing::field::display(email.intent.kind()));

    let response = email_client.send(email).await?;
    Ok(HttpResponse::Ok().json(response))
}
