//! Page script loaded by every server-rendered page.

mod api;
mod bootstrap;
mod dom;
mod logging;
mod qr;

fn main() {
    logging::init();

    if let Err(err) = bootstrap::run() {
        tracing::error!("page bootstrap failed: {:#}", err);
    }
}
