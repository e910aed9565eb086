//! `web-sys` implementations of the core view seams.

use gloo_timers::callback::Timeout;
use toutiao_shared::{Busy, ClientError, CommentForm, Notifier, ShareOpener, ToggleControl};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlTemplateElement, HtmlTextAreaElement};

const BUSY_ATTR: &str = "aria-busy";
const FADE_IN_MS: u32 = 1000;

pub fn document() -> Result<Document, ClientError> {
    web_sys::window()
        .and_then(|win| win.document())
        .ok_or_else(|| ClientError::Dom("no global `document` exists".to_string()))
}

/// Selector helpers that log and swallow invalid selectors.
pub trait QueryExt {
    fn find(&self, selector: &str) -> Option<Element>;
    fn find_all(&self, selector: &str) -> Vec<Element>;
}

impl QueryExt for Document {
    fn find(&self, selector: &str) -> Option<Element> {
        self.query_selector(selector).ok().flatten()
    }

    fn find_all(&self, selector: &str) -> Vec<Element> {
        let Ok(nodes) = self.query_selector_all(selector) else {
            tracing::warn!("invalid selector `{}`", selector);
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|idx| nodes.get(idx))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

pub fn js_error(value: wasm_bindgen::JsValue) -> ClientError {
    ClientError::Dom(format!("{:?}", value))
}

fn is_marked_busy(element: &Element) -> bool {
    element.get_attribute(BUSY_ATTR).as_deref() == Some("true")
}

fn mark_busy(element: &Element, busy: bool) {
    let result = if busy {
        element.set_attribute(BUSY_ATTR, "true")
    } else {
        element.remove_attribute(BUSY_ATTR)
    };
    if let Err(err) = result {
        tracing::warn!("failed to update busy flag: {:?}", err);
    }
}

/// A like / collect / follow button. The `<span>` child holds the counter,
/// the `<i>` child the icon.
#[derive(Clone)]
pub struct DomToggle {
    element: Element,
}

impl DomToggle {
    pub fn new(element: Element) -> Self {
        Self {
            element,
        }
    }
}

impl Busy for DomToggle {
    fn is_busy(&self) -> bool {
        is_marked_busy(&self.element)
    }

    fn set_busy(&self, busy: bool) {
        mark_busy(&self.element, busy);
    }
}

impl ToggleControl for DomToggle {
    fn resource(&self) -> Option<String> {
        self.element.get_attribute("data-url")
    }

    fn has_class(&self, class: &str) -> bool {
        self.element.class_list().contains(class)
    }

    fn toggle_class(&self, class: &str) {
        let _ = self.element.class_list().toggle(class);
    }

    fn set_counter(&self, text: &str) {
        if let Ok(Some(span)) = self.element.query_selector("span") {
            span.set_text_content(Some(text));
        }
    }

    fn swap_icon(&self, add: &str, remove: &str) {
        if let Ok(Some(icon)) = self.element.query_selector("i") {
            let classes = icon.class_list();
            let _ = classes.add_1(add);
            let _ = classes.remove_1(remove);
        }
    }

    fn set_label(&self, text: &str) {
        self.element.set_text_content(Some(text));
    }
}

/// `#comment-form` with its `#comment-content` field and the `#comments`
/// list.
pub struct DomCommentForm {
    document: Document,
    form: Element,
    input: Option<Element>,
    list: Element,
}

impl DomCommentForm {
    pub fn new(document: Document, form: Element, list: Element) -> Self {
        let input = form.query_selector("#comment-content").ok().flatten();
        if input.is_none() {
            tracing::warn!("comment form has no #comment-content field");
        }
        Self {
            document,
            form,
            input,
            list,
        }
    }
}

impl Busy for DomCommentForm {
    fn is_busy(&self) -> bool {
        is_marked_busy(&self.form)
    }

    fn set_busy(&self, busy: bool) {
        mark_busy(&self.form, busy);
    }
}

impl CommentForm for DomCommentForm {
    fn resource(&self) -> Option<String> {
        self.form.get_attribute("data-url")
    }

    fn content(&self) -> String {
        match &self.input {
            Some(input) => {
                if let Some(area) = input.dyn_ref::<HtmlTextAreaElement>() {
                    area.value()
                } else if let Some(field) = input.dyn_ref::<HtmlInputElement>() {
                    field.value()
                } else {
                    input.text_content().unwrap_or_default()
                }
            },
            None => String::new(),
        }
    }

    fn clear(&self) {
        let Some(input) = &self.input else {
            return;
        };
        if let Some(area) = input.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value("");
        } else if let Some(field) = input.dyn_ref::<HtmlInputElement>() {
            field.set_value("");
        }
    }

    fn prepend(&self, html: &str) -> Result<(), ClientError> {
        let template: HtmlTemplateElement = self
            .document
            .create_element("template")
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| ClientError::Dom("`template` is not a template element".to_string()))?;
        template.set_inner_html(html.trim());

        // Every top-level node goes in, in order, ahead of older comments.
        let fragment = template.content();
        let children = fragment.children();
        let inserted: Vec<Element> = (0..children.length()).filter_map(|idx| children.item(idx)).collect();
        if inserted.is_empty() {
            return Err(ClientError::Dom("comment fragment has no element".to_string()));
        }
        self.list.prepend_with_node_1(&fragment).map_err(js_error)?;

        for element in &inserted {
            if let Some(element) = element.dyn_ref::<HtmlElement>() {
                fade_in(element);
            }
        }
        Ok(())
    }
}

fn fade_in(element: &HtmlElement) {
    let style = element.style();
    let _ = style.set_property("opacity", "0");
    let _ = style.set_property("transition", &format!("opacity {}ms ease", FADE_IN_MS));

    // One frame later so the transition starts from the hidden state.
    Timeout::new(16, move || {
        let _ = style.set_property("opacity", "1");
    })
    .forget();
}

pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn alert(&self, message: &str) {
        if let Some(win) = web_sys::window() {
            let _ = win.alert_with_message(message);
        }
    }
}

pub struct WindowOpener;

impl ShareOpener for WindowOpener {
    fn open(&self, url: &str) -> Result<(), ClientError> {
        let win = web_sys::window().ok_or_else(|| ClientError::Dom("no global `window` exists".to_string()))?;
        win.open_with_url_and_target(url, "_blank").map_err(js_error)?;
        Ok(())
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use wasm_bindgen_test::*;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn comment_view(existing: &str) -> (DomCommentForm, Element) {
        let document = document().expect("document");
        let form = document.create_element("form").expect("form");
        let list = document.create_element("ul").expect("list");
        list.set_inner_html(existing);
        (DomCommentForm::new(document, form, list.clone()), list)
    }

    fn texts(list: &Element) -> Vec<String> {
        let children = list.children();
        (0..children.length())
            .filter_map(|idx| children.item(idx))
            .map(|el| el.text_content().unwrap_or_default())
            .collect()
    }

    #[wasm_bindgen_test]
    fn prepend_inserts_every_top_level_element_in_order() {
        let (view, list) = comment_view("<li>older</li>");

        view.prepend("<li>new</li>\n<li>reply</li>").expect("prepend");

        assert_eq!(texts(&list), vec!["new", "reply", "older"]);
    }

    #[wasm_bindgen_test]
    fn blank_fragment_is_an_error_and_leaves_list_alone() {
        let (view, list) = comment_view("<li>older</li>");

        assert!(view.prepend("  ").is_err());
        assert_eq!(texts(&list), vec!["older"]);
    }
}
