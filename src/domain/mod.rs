mod absolute_url;
mod deliver_email;
mod email_address;
mod organization_name;
mod validation_error;

pub use absolute_url::AbsoluteUrl;
pub use deliver_email::{DeliverEmail, EmailIntent, Invite};
pub use email_address::EmailAddress;
pub use organization_name::OrganizationName;
pub use validation_error::{FieldError, FieldReason, ValidationError};
