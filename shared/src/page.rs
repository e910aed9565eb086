//! Per-page handler sets.

use crate::toggle::ToggleKind;

/// Server-rendered pages that load the script, keyed by `<body data-page>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Article feed.
    Home,
    /// Article detail.
    Post,
    /// Articles under one tag.
    Tag,
    /// Profile.
    User,
}

/// Handlers a page wires up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageFeatures {
    /// Toggle kinds bound on this page.
    pub toggles: &'static [ToggleKind],
    /// Whether the comment form is bound.
    pub comments: bool,
    /// Whether share buttons are bound.
    pub share: bool,
    /// Selector of tab links that redirect through `data-url`.
    pub tab_nav: Option<&'static str>,
}

const CARD_TOGGLES: &[ToggleKind] = &[ToggleKind::Like, ToggleKind::Collect, ToggleKind::Follow];
const FOLLOW_ONLY: &[ToggleKind] = &[ToggleKind::Follow];

impl Page {
    /// Parse `<body data-page>`, ignoring case and surrounding blanks.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker.trim().to_ascii_lowercase().as_str() {
            "home" | "index" => Some(Page::Home),
            "post" => Some(Page::Post),
            "tag" => Some(Page::Tag),
            "user" => Some(Page::User),
            _ => None,
        }
    }

    /// Handlers this page wires up.
    pub fn features(self) -> PageFeatures {
        match self {
            Page::Home => PageFeatures {
                toggles: CARD_TOGGLES,
                comments: false,
                share: false,
                tab_nav: None,
            },
            Page::Post => PageFeatures {
                toggles: CARD_TOGGLES,
                comments: true,
                share: true,
                tab_nav: None,
            },
            Page::Tag => PageFeatures {
                toggles: CARD_TOGGLES,
                comments: false,
                share: false,
                tab_nav: Some("#tag-tab a"),
            },
            Page::User => PageFeatures {
                toggles: FOLLOW_ONLY,
                comments: false,
                share: false,
                tab_nav: Some("#user-tab a"),
            },
        }
    }
}

/// Where a tab link redirects to; `None` for a blank `data-url`.
pub fn redirect_target(data_url: Option<&str>) -> Option<&str> {
    data_url.map(str::trim).filter(|url| !url.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_are_case_insensitive() {
        assert_eq!(Page::from_marker("Post"), Some(Page::Post));
        assert_eq!(Page::from_marker(" index "), Some(Page::Home));
        assert_eq!(Page::from_marker("search"), None);
    }

    #[test]
    fn only_the_post_page_has_comments_and_share() {
        for page in [Page::Home, Page::Tag, Page::User] {
            let features = page.features();
            assert!(!features.comments && !features.share, "{page:?}");
        }
        let post = Page::Post.features();
        assert!(post.comments && post.share);
        assert_eq!(post.toggles, CARD_TOGGLES);
    }

    #[test]
    fn profile_page_only_follows_and_has_tabs() {
        let user = Page::User.features();
        assert_eq!(user.toggles, &[ToggleKind::Follow]);
        assert_eq!(user.tab_nav, Some("#user-tab a"));
        assert_eq!(Page::Tag.features().tab_nav, Some("#tag-tab a"));
    }

    #[test]
    fn blank_redirect_targets_are_dropped() {
        assert_eq!(redirect_target(Some(" /tag/python/?page=2 ")), Some("/tag/python/?page=2"));
        assert_eq!(redirect_target(Some("  ")), None);
        assert_eq!(redirect_target(None), None);
    }
}
