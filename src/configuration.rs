use crate::domain::{EmailAddress, FieldReason};
use crate::email_client::EmailClient;
use crate::templates::ImagesBaseUrl;
use anyhow::Context;
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender_email: String,
    pub sender_name: Option<String>,
    pub reply_to_email: String,
    pub authorization_token: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
    pub images_base_url: String,
}

impl EmailClientSettings {
    pub fn sender(&self) -> Result<EmailAddress, String> {
        parse_address("sender_email", &self.sender_email)
    }

    pub fn reply_to(&self) -> Result<EmailAddress, String> {
        parse_address("reply_to_email", &self.reply_to_email)
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn client(self) -> Result<EmailClient, anyhow::Error> {
        let sender = self.sender().map_err(anyhow::Error::msg)?;
        let reply_to = self.reply_to().map_err(anyhow::Error::msg)?;
        let timeout = self.timeout();
        EmailClient::new(
            self.base_url,
            sender,
            self.sender_name,
            reply_to,
            self.authorization_token,
            ImagesBaseUrl::new(self.images_base_url),
            timeout,
        )
        .context("Failed to build the email delivery HTTP client")
    }
}

fn parse_address(setting: &str, address: &str) -> Result<EmailAddress, String> {
    EmailAddress::parse(address.to_owned())
        .map_err(|reason: FieldReason| format!("email_client.{} {}: `{}`", setting, reason, address))
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let mut settings = config::Config::default();
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("Failed to determine the current directory: {}", e)))?;
    let configuration_directory = base_path.join("configuration");

    settings.merge(config::File::from(configuration_directory.join("base")).required(true))?;

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    settings.merge(
        config::File::from(configuration_directory.join(environment.as_str())).required(true),
    )?;

    settings.merge(config::Environment::with_prefix("app").separator("__"))?;

    settings.try_into()
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
