//! Outbound share links for social networks.
//!
//! Each target is a URL template with `{url}`, `{title}`, `{content}` and
//! `{pic}` placeholders. Fields are percent-encoded once, then the first
//! occurrence of every placeholder is substituted. None of the shipped
//! templates repeats a placeholder, so later occurrences are left as-is.

use std::borrow::Cow;

use crate::{error::ClientError, i18n::current::share as t};

/// Element the weixin QR code is drawn into.
pub const WEIXIN_CONTAINER_ID: &str = "weixin-qrcode";
const QR_SIZE: u32 = 132;

/// Supported share destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShareTarget {
    /// Opened in a new tab.
    Weibo,
    /// Opened in a new tab.
    Facebook,
    /// Opened in a new tab.
    Twitter,
    /// Opened in a new tab.
    Linkedin,
    /// Rendered as a QR code in place.
    Weixin,
}

impl ShareTarget {
    /// Every target, in button order.
    pub const ALL: [ShareTarget; 5] = [
        ShareTarget::Weibo,
        ShareTarget::Facebook,
        ShareTarget::Twitter,
        ShareTarget::Linkedin,
        ShareTarget::Weixin,
    ];

    /// URL template with `{url}`, `{title}`, `{content}` and `{pic}`.
    pub fn template(self) -> &'static str {
        match self {
            ShareTarget::Weibo => {
                "http://service.weibo.com/share/share.php?url={url}&title={title}&pic={pic}&searchPic=false"
            },
            ShareTarget::Facebook => "https://www.facebook.com/sharer/sharer.php?u={url}&t={title}&pic={pic}",
            ShareTarget::Twitter => "https://twitter.com/intent/tweet?text={title}&url={url}",
            ShareTarget::Linkedin => {
                "https://www.linkedin.com/shareArticle?title={title}&summary={content}&mini=true&url={url}&ro=true"
            },
            ShareTarget::Weixin => "http://qr.liantu.com/api.php?text={url}",
        }
    }

    /// Button that triggers this target on the post page.
    pub fn selector(self) -> &'static str {
        match self {
            ShareTarget::Weibo => ".share-weibo",
            ShareTarget::Facebook => ".share-facebook",
            ShareTarget::Twitter => ".share-twitter",
            ShareTarget::Linkedin => ".share-linkedin",
            ShareTarget::Weixin => ".weixin-qrcode-dropdown",
        }
    }
}

/// Fallback values taken from the current document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    /// `document.URL`.
    pub url: String,
    /// `document.title`.
    pub title: String,
}

/// Content to share. Missing or empty fields fall back to the page's URL
/// and title, or to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareDescriptor {
    /// Link to share.
    pub url: Option<String>,
    /// Headline.
    pub title: Option<String>,
    /// Summary, used by LinkedIn.
    pub content: Option<String>,
    /// Image URL.
    pub pic: Option<String>,
}

impl ShareDescriptor {
    /// Set the link.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the headline.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the summary.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the image.
    pub fn with_pic(mut self, pic: impl Into<String>) -> Self {
        self.pic = Some(pic.into());
        self
    }

    /// Apply fallbacks and encode every field once.
    pub fn resolve(self, page: &PageContext) -> ShareLinks {
        fn pick(value: Option<String>, fallback: &str) -> String {
            value
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| fallback.to_string())
        }

        ShareLinks {
            url: encode_component(&pick(self.url, &page.url)),
            title: encode_component(&pick(self.title, &page.title)),
            content: encode_component(&pick(self.content, "")),
            pic: encode_component(&pick(self.pic, "")),
        }
    }
}

/// Encoded share fields, ready for substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLinks {
    url: String,
    title: String,
    content: String,
    pic: String,
}

impl ShareLinks {
    /// Share URL for an opened target.
    pub fn link(&self, target: ShareTarget) -> String {
        target
            .template()
            .replacen("{url}", &self.url, 1)
            .replacen("{title}", &self.title, 1)
            .replacen("{content}", &self.content, 1)
            .replacen("{pic}", &self.pic, 1)
    }

    /// QR code request for the weixin target: the decoded page URL.
    pub fn qr_request(&self) -> QrOptions {
        let decoded = decode_component(&self.url);
        let text = if decoded.is_empty() { t::QR_FALLBACK_TEXT.to_string() } else { decoded.into_owned() };
        QrOptions {
            text,
            width: QR_SIZE,
            height: QR_SIZE,
            color_dark: "#000000",
            color_light: "#ffffff",
            correct_level: QrCorrectLevel::H,
        }
    }
}

/// Percent-encode like `encodeURIComponent`: unreserved characters and
/// `!*'()` pass through.
pub fn encode_component(raw: &str) -> String {
    urlencoding::encode(raw)
        .replace("%21", "!")
        .replace("%2A", "*")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
}

/// Inverse of [`encode_component`]; invalid input is returned unchanged.
pub fn decode_component(encoded: &str) -> Cow<'_, str> {
    urlencoding::decode(encoded).unwrap_or(Cow::Borrowed(encoded))
}

/// QR error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrCorrectLevel {
    /// ~7%.
    L,
    /// ~15%.
    M,
    /// ~25%.
    Q,
    /// ~30%.
    H,
}

impl QrCorrectLevel {
    /// Numeric value of `QRCode.CorrectLevel` in qrcode.js.
    pub fn qrcodejs_value(self) -> u8 {
        match self {
            QrCorrectLevel::L => 1,
            QrCorrectLevel::M => 0,
            QrCorrectLevel::Q => 3,
            QrCorrectLevel::H => 2,
        }
    }
}

/// Options handed to the QR renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrOptions {
    /// Encoded payload.
    pub text: String,
    /// Pixels.
    pub width: u32,
    /// Pixels.
    pub height: u32,
    /// Module color.
    pub color_dark: &'static str,
    /// Background color.
    pub color_light: &'static str,
    /// Error correction level.
    pub correct_level: QrCorrectLevel,
}

/// Renders a QR code into the element with the given id.
pub trait QrRenderer {
    /// Replace the container's content with a fresh code.
    fn render(&self, container_id: &str, options: &QrOptions) -> Result<(), ClientError>;
}

/// Opens a URL in a new browser tab.
pub trait ShareOpener {
    /// Open `url`.
    fn open(&self, url: &str) -> Result<(), ClientError>;
}

/// Click handler for the share buttons of one page.
pub struct Sharer<O, Q> {
    links: ShareLinks,
    opener: O,
    qr: Q,
}

impl<O: ShareOpener, Q: QrRenderer> Sharer<O, Q> {
    /// Sharer for pre-resolved links.
    pub fn new(links: ShareLinks, opener: O, qr: Q) -> Self {
        Self {
            links,
            opener,
            qr,
        }
    }

    /// Open the target's link, or draw the QR code for weixin.
    pub fn share(&self, target: ShareTarget) -> Result<(), ClientError> {
        match target {
            ShareTarget::Weixin => self.qr.render(WEIXIN_CONTAINER_ID, &self.links.qr_request()),
            other => {
                let url = self.links.link(other);
                tracing::debug!("sharing to {:?}: {}", other, url);
                self.opener.open(&url)
            },
        }
    }
}
