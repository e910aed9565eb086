//! Wire format of the JSON API and the transport seam.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{config::ClientConfig, error::ClientError, toggle::ToggleKind};

/// HTTP verbs used by the toggle and comment endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Switch a relation on, or create a comment.
    Post,
    /// Switch a relation off.
    Delete,
}

impl Method {
    /// Upper-case verb for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// Raw request sender. Bodies are `application/x-www-form-urlencoded`.
///
/// `?Send` because the browser implementation holds `JsValue`s across
/// awaits.
#[async_trait(?Send)]
pub trait ApiTransport {
    /// Send one request and return the response body.
    async fn send(
        &self,
        method: Method,
        url: &str,
        form_body: Option<String>,
    ) -> Result<String, ClientError>;
}

/// Outcome of one call, after the `{r, data, errmsg}` envelope is opened.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<T> {
    /// `r` was falsy and `data` decoded.
    Success(T),
    /// `r` was truthy.
    Failure {
        /// The server's result code, `1` when `r` is not a number.
        code: i64,
        /// The server's `errmsg`, if any.
        message: Option<String>,
    },
}

/// Server side failure codes, used for log output only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// 1000
    Unknown,
    /// 1001
    AccessForbidden,
    /// 1002
    Unimplemented,
    /// 1003
    NotFound,
    /// 1004
    IllegalState,
    /// 1005
    NotSupported,
    /// 1006
    PostNotFound,
    /// Anything else, including the generic `1` of HTTP-level errors.
    Other(i64),
}

impl From<i64> for ApiErrorCode {
    fn from(code: i64) -> Self {
        match code {
            1000 => ApiErrorCode::Unknown,
            1001 => ApiErrorCode::AccessForbidden,
            1002 => ApiErrorCode::Unimplemented,
            1003 => ApiErrorCode::NotFound,
            1004 => ApiErrorCode::IllegalState,
            1005 => ApiErrorCode::NotSupported,
            1006 => ApiErrorCode::PostNotFound,
            other => ApiErrorCode::Other(other),
        }
    }
}

/// `data` of a like / collect / follow response.
///
/// Post endpoints report `is_liked` and `is_collected` together; the follow
/// endpoint reports `is_followed`. Each toggle reads only its own field.
/// Other counters the server sends are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TogglePayload {
    /// Viewer likes the post.
    #[serde(default)]
    pub is_liked: Option<bool>,
    /// Viewer collected the post.
    #[serde(default)]
    pub is_collected: Option<bool>,
    /// Viewer follows the user.
    #[serde(default)]
    pub is_followed: Option<bool>,
    /// Like count shown on the like button.
    #[serde(default)]
    pub n_likes: Option<u64>,
}

impl TogglePayload {
    /// The reported state for `kind`, if the response carries it.
    pub fn state(&self, kind: ToggleKind) -> Option<bool> {
        match kind {
            ToggleKind::Like => self.is_liked,
            ToggleKind::Collect => self.is_collected,
            ToggleKind::Follow => self.is_followed,
        }
    }
}

/// `data` of a comment response: the rendered comment fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPayload {
    /// Server-rendered HTML of the new comment.
    pub html: String,
}

/// Open the envelope. The body is parsed loosely first so a failure
/// response never has to match the success payload shape.
pub fn parse_envelope<T: DeserializeOwned>(body: &str) -> Result<ApiResult<T>, ClientError> {
    let value: Value = serde_json::from_str(body)?;
    let code = result_code(value.get("r"));

    if code != 0 {
        let message = value
            .get("errmsg")
            .and_then(Value::as_str)
            .map(str::to_string);
        return Ok(ApiResult::Failure {
            code,
            message,
        });
    }

    match value.get("data") {
        Some(data) if data.is_object() => Ok(ApiResult::Success(T::deserialize(data)?)),
        _ => Err(ClientError::MissingPayload("data")),
    }
}

/// `0` only for a missing or falsy `r` (`0`, `0.0`, `false`, `null`, `""`).
/// Any other value is a failure; non-integral ones map to `1`.
fn result_code(r: Option<&Value>) -> i64 {
    match r {
        None | Some(Value::Null) | Some(Value::Bool(false)) => 0,
        Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
            (Some(code), _) => code,
            (None, Some(f)) if f == 0.0 => 0,
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => f as i64,
            _ => 1,
        },
        Some(Value::String(s)) if s.is_empty() => 0,
        Some(Value::String(s)) => s.trim().parse::<i64>().ok().filter(|code| *code != 0).unwrap_or(1),
        Some(_) => 1,
    }
}

/// `application/x-www-form-urlencoded` body, spaces as `+`.
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{}={}", form_component(key), form_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn form_component(raw: &str) -> String {
    urlencoding::encode(raw).replace("%20", "+")
}

/// Endpoint-aware wrapper around a transport.
pub struct ApiClient<T> {
    config: ClientConfig,
    transport: T,
}

impl<T: ApiTransport> ApiClient<T> {
    /// Wrap `transport`, resolving resources against `config.api_base`.
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
        }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Call `/api/{resource}` and open the response envelope.
    pub async fn call<P: DeserializeOwned>(
        &self,
        method: Method,
        resource: &str,
        form: &[(&str, &str)],
    ) -> Result<ApiResult<P>, ClientError> {
        let url = self.config.endpoint(resource);
        let body = if form.is_empty() { None } else { Some(encode_form(form)) };

        tracing::debug!("{} {}", method.as_str(), url);
        let raw = self.transport.send(method, &url, body).await?;
        let result = parse_envelope(&raw)?;

        if let ApiResult::Failure {
            code,
            message,
        } = &result
        {
            tracing::warn!(
                "{} {} rejected: r={} ({:?}) {}",
                method.as_str(),
                url,
                code,
                ApiErrorCode::from(*code),
                message.as_deref().unwrap_or("")
            );
        }
        Ok(result)
    }
}
