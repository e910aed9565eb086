//! Comment submission for post pages.

use std::rc::Rc;

use crate::{
    api::{ApiClient, ApiResult, ApiTransport, CommentPayload, Method},
    busy::{Busy, BusyGuard},
    error::ClientError,
    i18n::current::comment as t,
    toggle::Notifier,
};

/// View of the comment form and the list new comments are prepended to.
pub trait CommentForm: Busy {
    /// Resource fragment from the form's `data-url`, e.g. `post/3/comment`.
    fn resource(&self) -> Option<String>;
    /// Current text of the input.
    fn content(&self) -> String;
    /// Empty the input.
    fn clear(&self);
    /// Insert the server-rendered comment as the list's first child.
    fn prepend(&self, html: &str) -> Result<(), ClientError>;
}

/// What one submission did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentOutcome {
    /// Accepted; the rendered comment is now the list's first child.
    Posted,
    /// `r != 0`; the user was alerted and the input kept.
    Rejected {
        /// The server's result code.
        code: i64,
    },
    /// A submission is still in flight.
    Ignored,
}

/// Submit handler for the comment form.
pub struct CommentSubmitter<T, N> {
    api: Rc<ApiClient<T>>,
    notifier: Rc<N>,
}

impl<T: ApiTransport, N: Notifier> CommentSubmitter<T, N> {
    /// Submitter posting through `api`.
    pub fn new(api: Rc<ApiClient<T>>, notifier: Rc<N>) -> Self {
        Self {
            api,
            notifier,
        }
    }

    /// Post the form's content. Empty content is sent as-is; the server
    /// decides whether to accept it.
    pub async fn submit<F: CommentForm + ?Sized>(
        &self,
        form: &F,
    ) -> Result<CommentOutcome, ClientError> {
        let Some(_guard) = BusyGuard::acquire(form) else {
            tracing::debug!("comment submission already in flight");
            return Ok(CommentOutcome::Ignored);
        };

        let resource = form.resource().ok_or(ClientError::MissingResource)?;
        let content = form.content();

        match self
            .api
            .call::<CommentPayload>(Method::Post, &resource, &[("content", content.as_str())])
            .await?
        {
            ApiResult::Success(payload) => {
                form.clear();
                form.prepend(&payload.html)?;
                tracing::info!("comment posted to {}", resource);
                Ok(CommentOutcome::Posted)
            },
            ApiResult::Failure {
                code, ..
            } => {
                self.notifier.alert(t::SUBMIT_FAILED);
                Ok(CommentOutcome::Rejected {
                    code,
                })
            },
        }
    }
}
