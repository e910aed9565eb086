//! Binary-state controls backed by a REST toggle endpoint.
//!
//! Like, collect and follow buttons share one flow: read the current
//! state from the control's marker class, `POST` to switch on or `DELETE`
//! to switch off, then repaint only if the server reports a state that
//! differs from what the control showed before the click.

use std::rc::Rc;

use crate::{
    api::{ApiClient, ApiResult, ApiTransport, Method, TogglePayload},
    busy::{Busy, BusyGuard},
    error::ClientError,
    i18n::current::toggle as t,
};

/// The three toggle instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleKind {
    /// `.like-button`, `is_liked`.
    Like,
    /// `.collect-button`, `is_collected`.
    Collect,
    /// `.follow-button`, `is_followed`.
    Follow,
}

/// An `(on, off)` pair of icon classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconPair {
    /// Filled icon.
    pub on: &'static str,
    /// Outline icon.
    pub off: &'static str,
}

/// An `(on, off)` pair of button labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelPair {
    /// Text while switched on.
    pub on: &'static str,
    /// Text while switched off.
    pub off: &'static str,
}

/// Everything that differs between the three toggle instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleSpec {
    /// Controls of this kind on a page.
    pub selector: &'static str,
    /// Class present while switched on.
    pub marker_class: &'static str,
    /// Alert text for `r != 0`.
    pub failure_message: &'static str,
    /// `<i>` classes swapped on change.
    pub icons: Option<IconPair>,
    /// Button text replaced on change.
    pub labels: Option<LabelPair>,
    /// Whether the `<span>` shows `n_likes`. Like only.
    pub counter: bool,
}

const LIKE: ToggleSpec = ToggleSpec {
    selector: ".like-button",
    marker_class: "liked",
    failure_message: t::LIKE_FAILED,
    icons: Some(IconPair {
        on: "toutiao-thumbsup",
        off: "toutiao-thumbsoup",
    }),
    labels: None,
    counter: true,
};

const COLLECT: ToggleSpec = ToggleSpec {
    selector: ".collect-button",
    marker_class: "collected",
    failure_message: t::COLLECT_FAILED,
    icons: Some(IconPair {
        on: "toutiao-bookmark",
        off: "toutiao-bookmarko",
    }),
    labels: None,
    counter: false,
};

const FOLLOW: ToggleSpec = ToggleSpec {
    selector: ".follow-button",
    marker_class: "followed",
    failure_message: t::FOLLOW_FAILED,
    icons: None,
    labels: Some(LabelPair {
        on: t::FOLLOWED_LABEL,
        off: t::FOLLOW_LABEL,
    }),
    counter: false,
};

impl ToggleKind {
    /// Static configuration of this kind.
    pub fn spec(self) -> &'static ToggleSpec {
        match self {
            ToggleKind::Like => &LIKE,
            ToggleKind::Collect => &COLLECT,
            ToggleKind::Follow => &FOLLOW,
        }
    }

    fn state_field(self) -> &'static str {
        match self {
            ToggleKind::Like => "is_liked",
            ToggleKind::Collect => "is_collected",
            ToggleKind::Follow => "is_followed",
        }
    }
}

/// View of one toggle button.
pub trait ToggleControl: Busy {
    /// Resource fragment from `data-url`, e.g. `post/3/like`.
    fn resource(&self) -> Option<String>;
    /// Whether the control's class list contains `class`.
    fn has_class(&self, class: &str) -> bool;
    /// Add `class` if absent, remove it otherwise.
    fn toggle_class(&self, class: &str);
    /// Replace the counter text.
    fn set_counter(&self, text: &str);
    /// Add one icon class and remove the other.
    fn swap_icon(&self, add: &str, remove: &str);
    /// Replace the button's text.
    fn set_label(&self, text: &str);
}

/// Blocking user notification (`window.alert` in the browser).
pub trait Notifier {
    /// Show `message` to the user.
    fn alert(&self, message: &str);
}

/// What one activation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Server state differed from the control; the control was repainted.
    Applied {
        /// The state now shown.
        on: bool,
    },
    /// Server agrees with what the control already shows.
    Unchanged,
    /// `r != 0`; the user was alerted.
    Rejected {
        /// The server's result code.
        code: i64,
    },
    /// A request for this control is still in flight.
    Ignored,
}

/// Click handler shared by every control of one [`ToggleKind`].
pub struct ToggleAction<T, N> {
    kind: ToggleKind,
    api: Rc<ApiClient<T>>,
    notifier: Rc<N>,
}

impl<T: ApiTransport, N: Notifier> ToggleAction<T, N> {
    /// Handler for `kind` controls.
    pub fn new(kind: ToggleKind, api: Rc<ApiClient<T>>, notifier: Rc<N>) -> Self {
        Self {
            kind,
            api,
            notifier,
        }
    }

    /// The kind this handler serves.
    pub fn kind(&self) -> ToggleKind {
        self.kind
    }

    /// Run one click: request, then repaint if the server state differs.
    pub async fn activate<C: ToggleControl + ?Sized>(
        &self,
        control: &C,
    ) -> Result<ToggleOutcome, ClientError> {
        let Some(_guard) = BusyGuard::acquire(control) else {
            tracing::debug!("{:?} request already in flight, click ignored", self.kind);
            return Ok(ToggleOutcome::Ignored);
        };

        let spec = self.kind.spec();
        let resource = control.resource().ok_or(ClientError::MissingResource)?;
        let was_on = control.has_class(spec.marker_class);
        let method = if was_on { Method::Delete } else { Method::Post };

        let payload = match self.api.call::<TogglePayload>(method, &resource, &[]).await? {
            ApiResult::Success(payload) => payload,
            ApiResult::Failure {
                code, ..
            } => {
                self.notifier.alert(spec.failure_message);
                return Ok(ToggleOutcome::Rejected {
                    code,
                });
            },
        };

        let now_on = payload
            .state(self.kind)
            .ok_or(ClientError::MissingPayload(self.kind.state_field()))?;
        if now_on == was_on {
            return Ok(ToggleOutcome::Unchanged);
        }

        control.toggle_class(spec.marker_class);
        if spec.counter {
            if let Some(count) = payload.n_likes {
                control.set_counter(&count.to_string());
            }
        }
        if let Some(icons) = spec.icons {
            if now_on {
                control.swap_icon(icons.on, icons.off);
            } else {
                control.swap_icon(icons.off, icons.on);
            }
        }
        if let Some(labels) = spec.labels {
            control.set_label(if now_on { labels.on } else { labels.off });
        }

        tracing::info!("{:?} {} -> {}", self.kind, resource, now_on);
        Ok(ToggleOutcome::Applied {
            on: now_on,
        })
    }
}
