use crate::domain::{DeliverEmail, EmailAddress, EmailIntent};
use crate::templates::{ImagesBaseUrl, InviteEmail, MagicLinkEmail, RenderableEmail, RenderedBody};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};

pub const MAGIC_LINK_SUBJECT: &str = "Magic sign-in link for Trigger.dev";

pub fn invite_subject(org_name: &str) -> String {
    format!("You've been invited to join {} on Trigger.dev", org_name)
}

pub struct EmailClient {
    http_client: Client,
    base_url: String,
    sender: String,
    reply_to: EmailAddress,
    authorization_token: Secret<String>,
    images_base_url: ImagesBaseUrl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub body: RenderedBody,
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SendEmailResponse {
    pub id: String,
}

#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    reply_to: &'a str,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(serde::Deserialize)]
struct ProviderError {
    name: Option<String>,
    message: String,
}

#[derive(thiserror::Error, Debug)]
pub enum DeliveryError {
    #[error("Failed to reach the email delivery API")]
    Transport(#[source] reqwest::Error),
    #[error("The email delivery API rejected the email ({status}): {message}")]
    Rejected {
        status: StatusCode,
        name: Option<String>,
        message: String,
    },
    #[error("The email delivery API returned an unexpected response")]
    MalformedResponse(#[source] reqwest::Error),
}

impl DeliveryError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, DeliveryError::Rejected { status, .. } if *status == StatusCode::TOO_MANY_REQUESTS)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SendEmailError {
    /// Only reachable through a broken template.
    #[error("Failed to render the email body")]
    Render(#[from] askama::Error),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: EmailAddress,
        sender_name: Option<String>,
        reply_to: EmailAddress,
        authorization_token: Secret<String>,
        images_base_url: ImagesBaseUrl,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        let sender = match sender_name {
            Some(name) => format!("{} <{}>", name, sender),
            None => sender.to_string(),
        };
        Ok(Self {
            http_client,
            base_url,
            sender,
            reply_to,
            authorization_token,
            images_base_url,
        })
    }

    #[tracing::instrument(
        name = "Sending a transactional email",
        skip(self, email),
        fields(email_kind = %email.intent.kind(), recipient = %email.to)
    )]
    pub async fn send(&self, email: DeliverEmail) -> Result<SendEmailResponse, SendEmailError> {
        let RenderedEmail { subject, body } = self.get_template(&email.intent)?;
        let response = self.send_email(&email.to, &subject, &body).await?;
        Ok(response)
    }

    pub fn get_template(&self, intent: &EmailIntent) -> Result<RenderedEmail, askama::Error> {
        let images = &self.images_base_url;
        match intent {
            EmailIntent::MagicLink { magic_link } => Ok(RenderedEmail {
                subject: MAGIC_LINK_SUBJECT.to_string(),
                body: MagicLinkEmail {
                    images,
                    magic_link: magic_link.as_ref(),
                }
                .render_body()?,
            }),
            EmailIntent::Invite(invite) => Ok(RenderedEmail {
                subject: invite_subject(invite.org_name.as_ref()),
                body: InviteEmail { images, invite }.render_body()?,
            }),
        }
    }

    #[tracing::instrument(
        name = "Calling the email delivery API",
        skip(self, recipient, subject, body)
    )]
    pub async fn send_email(
        &self,
        recipient: &EmailAddress,
        subject: &str,
        body: &RenderedBody,
    ) -> Result<SendEmailResponse, DeliveryError> {
        let url = format!("{}/emails", self.base_url);
        let request_body = SendEmailRequest {
            from: &self.sender,
            to: [recipient.as_ref()],
            reply_to: self.reply_to.as_ref(),
            subject,
            html: &body.html,
            text: &body.text,
        };
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.authorization_token.expose_secret())
            .json(&request_body)
            .send()
            .await
            .map_err(DeliveryError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.map_err(DeliveryError::Transport)?;
            return Err(match serde_json::from_str::<ProviderError>(&raw) {
                Ok(e) => DeliveryError::Rejected {
                    status,
                    name: e.name,
                    message: e.message,
                },
                Err(_) => DeliveryError::Rejected {
                    status,
                    name: None,
                    message: raw,
                },
            });
        }

        response
            .json::<SendEmailResponse>()
            .await
            .map_err(DeliveryError::MalformedResponse)
    }
}
