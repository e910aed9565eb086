//! In-memory stand-ins for the browser seams.

use std::{
    cell::{Cell, RefCell},
    collections::{BTreeSet, VecDeque},
};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::{
    api::{ApiTransport, Method},
    busy::Busy,
    comment::CommentForm,
    error::ClientError,
    share::{QrOptions, QrRenderer, ShareOpener},
    toggle::{Notifier, ToggleControl},
};

pub type RecordedRequest = (Method, String, Option<String>);

/// Replays canned response bodies in order and records every request.
pub struct FakeTransport {
    responses: RefCell<VecDeque<String>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl FakeTransport {
    pub fn new(responses: &[&str]) -> Self {
        Self {
            responses: RefCell::new(responses.iter().map(|body| body.to_string()).collect()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl ApiTransport for FakeTransport {
    async fn send(
        &self,
        method: Method,
        url: &str,
        form_body: Option<String>,
    ) -> Result<String, ClientError> {
        self.requests
            .borrow_mut()
            .push((method, url.to_string(), form_body));
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| ClientError::Transport("connection reset".to_string()))
    }
}

/// Holds the first request open until the test releases it through the
/// paired sender. Further requests fail immediately.
pub struct GatedTransport {
    gate: RefCell<Option<oneshot::Receiver<String>>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl GatedTransport {
    pub fn new() -> (Self, oneshot::Sender<String>) {
        let (tx, rx) = oneshot::channel();
        let transport = Self {
            gate: RefCell::new(Some(rx)),
            requests: RefCell::new(Vec::new()),
        };
        (transport, tx)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl ApiTransport for GatedTransport {
    async fn send(
        &self,
        method: Method,
        url: &str,
        form_body: Option<String>,
    ) -> Result<String, ClientError> {
        self.requests
            .borrow_mut()
            .push((method, url.to_string(), form_body));
        let gate = self.gate.borrow_mut().take();
        let Some(gate) = gate else {
            return Err(ClientError::Transport("gate already used".to_string()));
        };
        gate.await
            .map_err(|_| ClientError::Transport("gate dropped".to_string()))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

/// A button with a class list, an `<i>` icon, a `<span>` counter and a label.
pub struct FakeControl {
    resource: Option<String>,
    classes: RefCell<BTreeSet<String>>,
    icon: RefCell<BTreeSet<String>>,
    counter: RefCell<String>,
    label: RefCell<String>,
    busy: Cell<bool>,
}

impl FakeControl {
    pub fn new(resource: &str, classes: &[&str]) -> Self {
        Self::build(Some(resource.to_string()), classes)
    }

    pub fn without_resource() -> Self {
        Self::build(None, &[])
    }

    fn build(resource: Option<String>, classes: &[&str]) -> Self {
        Self {
            resource,
            classes: RefCell::new(classes.iter().map(|c| c.to_string()).collect()),
            icon: RefCell::new(BTreeSet::new()),
            counter: RefCell::new(String::new()),
            label: RefCell::new(String::new()),
            busy: Cell::new(false),
        }
    }

    pub fn add_icon(&self, class: &str) {
        self.icon.borrow_mut().insert(class.to_string());
    }

    pub fn has_icon(&self, class: &str) -> bool {
        self.icon.borrow().contains(class)
    }

    pub fn counter(&self) -> String {
        self.counter.borrow().clone()
    }

    pub fn label(&self) -> String {
        self.label.borrow().clone()
    }
}

impl Busy for FakeControl {
    fn is_busy(&self) -> bool {
        self.busy.get()
    }

    fn set_busy(&self, busy: bool) {
        self.busy.set(busy);
    }
}

impl ToggleControl for FakeControl {
    fn resource(&self) -> Option<String> {
        self.resource.clone()
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    fn toggle_class(&self, class: &str) {
        let mut classes = self.classes.borrow_mut();
        if !classes.remove(class) {
            classes.insert(class.to_string());
        }
    }

    fn set_counter(&self, text: &str) {
        *self.counter.borrow_mut() = text.to_string();
    }

    fn swap_icon(&self, add: &str, remove: &str) {
        let mut icon = self.icon.borrow_mut();
        icon.insert(add.to_string());
        icon.remove(remove);
    }

    fn set_label(&self, text: &str) {
        *self.label.borrow_mut() = text.to_string();
    }
}

/// A comment form plus the list it prepends into.
pub struct FakeCommentForm {
    resource: Option<String>,
    content: RefCell<String>,
    list: RefCell<Vec<String>>,
    busy: Cell<bool>,
}

impl FakeCommentForm {
    pub fn new(resource: &str, content: &str, existing: &[&str]) -> Self {
        Self {
            resource: Some(resource.to_string()),
            content: RefCell::new(content.to_string()),
            list: RefCell::new(existing.iter().map(|html| html.to_string()).collect()),
            busy: Cell::new(false),
        }
    }

    pub fn list(&self) -> Vec<String> {
        self.list.borrow().clone()
    }
}

impl Busy for FakeCommentForm {
    fn is_busy(&self) -> bool {
        self.busy.get()
    }

    fn set_busy(&self, busy: bool) {
        self.busy.set(busy);
    }
}

impl CommentForm for FakeCommentForm {
    fn resource(&self) -> Option<String> {
        self.resource.clone()
    }

    fn content(&self) -> String {
        self.content.borrow().clone()
    }

    fn clear(&self) {
        self.content.borrow_mut().clear();
    }

    fn prepend(&self, html: &str) -> Result<(), ClientError> {
        self.list.borrow_mut().insert(0, html.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingOpener {
    opened: RefCell<Vec<String>>,
}

impl RecordingOpener {
    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl ShareOpener for RecordingOpener {
    fn open(&self, url: &str) -> Result<(), ClientError> {
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingQr {
    rendered: RefCell<Vec<(String, QrOptions)>>,
}

impl RecordingQr {
    pub fn rendered(&self) -> Vec<(String, QrOptions)> {
        self.rendered.borrow().clone()
    }
}

impl QrRenderer for RecordingQr {
    fn render(&self, container_id: &str, options: &QrOptions) -> Result<(), ClientError> {
        self.rendered
            .borrow_mut()
            .push((container_id.to_string(), options.clone()));
        Ok(())
    }
}
