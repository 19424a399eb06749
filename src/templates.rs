//! Email bodies, compiled from `templates/` at build time.
//!
//! Every email has an HTML part and a plain text fallback. Rendering only reads
//! the fields it is given, so the same input always produces the same bytes.

use crate::domain::Invite;
use askama::Template;

/// Prefix for the static images referenced by the HTML templates.
#[derive(Debug, Clone)]
pub struct ImagesBaseUrl(String);

impl ImagesBaseUrl {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self(base_url.trim_end_matches('/').to_owned())
    }

    /// `path` is expected to start with `/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.0, path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBody {
    pub html: String,
    pub text: String,
}

pub trait RenderableEmail {
    fn render_body(&self) -> Result<RenderedBody, askama::Error>;
}

#[derive(Template)]
#[template(path = "magic_link.html")]
struct MagicLinkHtml<'a> {
    images: &'a ImagesBaseUrl,
    magic_link: &'a str,
}

#[derive(Template)]
#[template(path = "magic_link.txt")]
struct MagicLinkText<'a> {
    magic_link: &'a str,
}

pub struct MagicLinkEmail<'a> {
    pub images: &'a ImagesBaseUrl,
    pub magic_link: &'a str,
}

impl RenderableEmail for MagicLinkEmail<'_> {
    fn render_body(&self) -> Result<RenderedBody, askama::Error> {
        let html = MagicLinkHtml {
            images: self.images,
            magic_link: self.magic_link,
        }
        .render()?;
        let text = MagicLinkText {
            magic_link: self.magic_link,
        }
        .render()?;
        Ok(RenderedBody { html, text })
    }
}

#[derive(Template)]
#[template(path = "invite.html")]
struct InviteHtml<'a> {
    images: &'a ImagesBaseUrl,
    org_name: &'a str,
    inviter: Option<&'a str>,
    invite_link: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "invite.txt")]
struct InviteText<'a> {
    org_name: &'a str,
    inviter: Option<&'a str>,
    invite_link: Option<&'a str>,
}

pub struct InviteEmail<'a> {
    pub images: &'a ImagesBaseUrl,
    pub invite: &'a Invite,
}

impl InviteEmail<'_> {
    /// The inviter's name, falling back to their address.
    fn inviter(&self) -> Option<&str> {
        self.invite
            .inviter_name
            .as_deref()
            .or_else(|| self.invite.inviter_email.as_ref().map(AsRef::as_ref))
    }
}

impl RenderableEmail for InviteEmail<'_> {
    fn render_body(&self) -> Result<RenderedBody, askama::Error> {
        let org_name = self.invite.org_name.as_ref();
        let invite_link = self.invite.invite_link.as_ref().map(AsRef::as_ref);
        let html = InviteHtml {
            images: self.images,
            org_name,
            inviter: self.inviter(),
            invite_link,
        }
        .render()?;
        let text = InviteText {
            org_name,
            inviter: self.inviter(),
            invite_link,
        }
        .render()?;
        Ok(RenderedBody { html, text })
    }
}
