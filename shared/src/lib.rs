//! Platform independent core of the toutiao page scripts.
//!
//! Everything here is pure logic behind small traits: the browser crate
//! supplies DOM-backed views and a `fetch` transport, while the tests in
//! this crate drive the same code with in-memory fakes.

pub mod api;
pub mod busy;
pub mod comment;
pub mod config;
pub mod error;
pub mod i18n;
pub mod page;
pub mod share;
pub mod toggle;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ApiClient, ApiResult, ApiTransport, Method};
pub use busy::{Busy, BusyGuard};
pub use comment::{CommentForm, CommentOutcome, CommentSubmitter};
pub use config::ClientConfig;
pub use error::ClientError;
pub use page::{Page, PageFeatures};
pub use share::{
    PageContext, QrCorrectLevel, QrOptions, QrRenderer, ShareDescriptor, ShareLinks, ShareOpener,
    ShareTarget, Sharer,
};
pub use toggle::{Notifier, ToggleAction, ToggleControl, ToggleKind, ToggleOutcome, ToggleSpec};
