//! Localized user-facing strings.

/// Simplified Chinese.
pub mod zh_cn;

pub use zh_cn as current;
