//! Binding to the page's qrcode.js (`window.QRCode`).

use js_sys::{Object, Reflect};
use toutiao_shared::{ClientError, QrOptions, QrRenderer};
use wasm_bindgen::{prelude::*, JsValue};

use crate::dom::{document, js_error};

#[wasm_bindgen]
extern "C" {
    type QRCode;

    #[wasm_bindgen(constructor, catch)]
    fn new(element_id: &str, options: &JsValue) -> Result<QRCode, JsValue>;

    #[wasm_bindgen(method, js_name = makeCode)]
    fn make_code(this: &QRCode, text: &str);
}

pub struct QrCodeJs;

impl QrRenderer for QrCodeJs {
    fn render(&self, container_id: &str, options: &QrOptions) -> Result<(), ClientError> {
        // qrcode.js appends on every construction; start from an empty box.
        if let Some(container) = document()?.get_element_by_id(container_id) {
            container.set_inner_html("");
        } else {
            return Err(ClientError::Dom(format!("#{} is missing", container_id)));
        }

        let js_options = Object::new();
        let set = |key: &str, value: JsValue| {
            Reflect::set(&js_options, &JsValue::from_str(key), &value).map(|_| ())
        };
        set("text", JsValue::from_str(&options.text)).map_err(js_error)?;
        set("width", JsValue::from(options.width)).map_err(js_error)?;
        set("height", JsValue::from(options.height)).map_err(js_error)?;
        set("colorDark", JsValue::from_str(options.color_dark)).map_err(js_error)?;
        set("colorLight", JsValue::from_str(options.color_light)).map_err(js_error)?;
        set("correctLevel", JsValue::from(options.correct_level.qrcodejs_value())).map_err(js_error)?;

        let qrcode = QRCode::new(container_id, &js_options).map_err(js_error)?;
        qrcode.make_code(&options.text);
        tracing::debug!("rendered weixin QR code for {}", options.text);
        Ok(())
    }
}
