use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use toutiao_shared::{ApiTransport, ClientError, Method};

/// `fetch`-backed transport. Cookies ride along (same-origin default), which
/// is what the API's session authentication expects.
pub struct GlooTransport;

#[async_trait(?Send)]
impl ApiTransport for GlooTransport {
    async fn send(
        &self,
        method: Method,
        url: &str,
        form_body: Option<String>,
    ) -> Result<String, ClientError> {
        let builder: RequestBuilder = match method {
            Method::Post => Request::post(url),
            Method::Delete => Request::delete(url),
        };
        let builder = builder
            .header("Accept", "application/json")
            .header("X-Requested-With", "XMLHttpRequest");

        let request = match form_body {
            Some(body) => builder
                .header("Content-Type", "application/x-www-form-urlencoded; charset=UTF-8")
                .body(body),
            None => builder.build(),
        }
        .map_err(|e| ClientError::Transport(format!("{:?}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("{:?}", e)))?;

        if !response.ok() {
            return Err(ClientError::Http(response.status()));
        }

        response
            .text()
            .await
            .map_err(|e| ClientError::Transport(format!("{:?}", e)))
    }
}
