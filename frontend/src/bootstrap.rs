//! Attaches the handlers a page needs to the elements it rendered.

use std::rc::Rc;

use anyhow::{anyhow, Result};
use toutiao_shared::{
    page::redirect_target, share::ShareTarget, ApiClient, ClientConfig, CommentSubmitter, Page,
    PageContext, ShareDescriptor, Sharer, ToggleAction, ToggleKind,
};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, Event};

use crate::{
    api::GlooTransport,
    dom::{self, AlertNotifier, DomCommentForm, DomToggle, QueryExt as _, WindowOpener},
    qr::QrCodeJs,
};

type Api = Rc<ApiClient<GlooTransport>>;

pub fn run() -> Result<()> {
    let document = dom::document()?;
    let marker = document
        .body()
        .and_then(|body| body.get_attribute("data-page"))
        .unwrap_or_default();
    let page = Page::from_marker(&marker).unwrap_or_else(|| {
        tracing::debug!("unknown page marker `{}`, using home", marker);
        Page::Home
    });
    let features = page.features();
    tracing::info!("bootstrapping {:?} page", page);

    let api: Api = Rc::new(ApiClient::new(ClientConfig::default(), GlooTransport));
    let notifier = Rc::new(AlertNotifier);

    // Each feature binds on its own; one failure leaves the rest working.
    for kind in features.toggles {
        if let Err(err) = bind_toggles(&document, *kind, api.clone(), notifier.clone()) {
            tracing::error!("binding {:?} toggles failed: {}", kind, err);
        }
    }
    if features.comments {
        if let Err(err) = bind_comment_form(&document, api.clone(), notifier.clone()) {
            tracing::error!("binding comment form failed: {}", err);
        }
    }
    if features.share {
        if let Err(err) = bind_share_buttons(&document) {
            tracing::error!("binding share buttons failed: {}", err);
        }
    }
    if let Some(selector) = features.tab_nav {
        if let Err(err) = bind_tab_navigation(&document, selector) {
            tracing::error!("binding tab navigation failed: {}", err);
        }
    }
    Ok(())
}

fn on(element: &Element, event: &str, handler: impl FnMut(Event) + 'static) -> Result<()> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    element
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| anyhow!("failed to bind `{}`: {:?}", event, e))?;
    // Handlers live as long as the page.
    closure.forget();
    Ok(())
}

fn bind_toggles(
    document: &Document,
    kind: ToggleKind,
    api: Api,
    notifier: Rc<AlertNotifier>,
) -> Result<()> {
    let spec = kind.spec();
    let action = Rc::new(ToggleAction::new(kind, api, notifier));
    let controls = document.find_all(spec.selector);
    tracing::debug!("{} {:?} control(s)", controls.len(), kind);

    for element in controls {
        let control = DomToggle::new(element.clone());
        let action = action.clone();
        on(&element, "click", move |event: Event| {
            event.prevent_default();
            let control = control.clone();
            let action = action.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = action.activate(&control).await {
                    tracing::error!("{:?} request failed: {}", action.kind(), err);
                }
            });
        })?;
    }
    Ok(())
}

fn bind_comment_form(document: &Document, api: Api, notifier: Rc<AlertNotifier>) -> Result<()> {
    let Some(form) = document.find("#comment-form") else {
        tracing::debug!("no #comment-form on page");
        return Ok(());
    };
    let Some(list) = document.find("#comments") else {
        tracing::warn!("#comment-form present without #comments list, not binding");
        return Ok(());
    };

    let view = Rc::new(DomCommentForm::new(document.clone(), form.clone(), list));
    let submitter = Rc::new(CommentSubmitter::new(api, notifier));
    on(&form, "submit", move |event: Event| {
        event.prevent_default();
        let view = view.clone();
        let submitter = submitter.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = submitter.submit(view.as_ref()).await {
                tracing::error!("comment request failed: {}", err);
            }
        });
    })
}

fn share_descriptor(document: &Document) -> ShareDescriptor {
    let meta = |name: &str| {
        document
            .find(&format!("meta[name=\"{}\"]", name))
            .and_then(|el| el.get_attribute("content"))
    };

    ShareDescriptor {
        url: meta("url"),
        title: document
            .find(".social-share-button")
            .and_then(|el| el.get_attribute("data-title")),
        content: meta("content"),
        pic: meta("pic"),
    }
}

fn bind_share_buttons(document: &Document) -> Result<()> {
    let page = PageContext {
        url: document.url().unwrap_or_default(),
        title: document.title(),
    };
    let links = share_descriptor(document).resolve(&page);
    let sharer = Rc::new(Sharer::new(links, WindowOpener, QrCodeJs));

    for target in ShareTarget::ALL {
        for element in document.find_all(target.selector()) {
            let sharer = sharer.clone();
            on(&element, "click", move |event: Event| {
                event.prevent_default();
                if let Err(err) = sharer.share(target) {
                    tracing::error!("share to {:?} failed: {}", target, err);
                }
            })?;
        }
    }
    Ok(())
}

fn bind_tab_navigation(document: &Document, selector: &str) -> Result<()> {
    for element in document.find_all(selector) {
        let tab = element.clone();
        on(&element, "click", move |event: Event| {
            event.prevent_default();
            let data_url = tab.get_attribute("data-url");
            let Some(target) = redirect_target(data_url.as_deref()) else {
                tracing::warn!("tab link has no data-url");
                return;
            };
            let replaced = web_sys::window()
                .map(|win| win.location().replace(target))
                .unwrap_or(Ok(()));
            if let Err(err) = replaced {
                tracing::error!("redirect to {} failed: {:?}", target, err);
            }
        })?;
    }
    Ok(())
}
