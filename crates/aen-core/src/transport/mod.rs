use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TransportError;
use crate::params::QueryParams;

mod http_client;
#[cfg(test)]
pub(crate) mod mock;
mod retry;

pub use http_client::ReqwestTransport;
pub use retry::{RetryPolicy, RetryingTransport};

/// Transport used by [`crate::AenClient::new`].
pub type HttpTransport = RetryingTransport<ReqwestTransport>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Controls how a retry decorator may treat a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryClass {
    /// Retried when the method and status match the policy.
    #[default]
    Standard,
    /// begin/commit/rollback; retried only if the policy opts in explicitly.
    TransactionBoundary,
    Never,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Bytes {
        content_type: String,
        data: Vec<u8>,
    },
    Multipart {
        field: String,
        file_name: String,
        content_type: String,
        data: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Path relative to the configured base URL, starting with `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    pub basic_auth: Option<Credentials>,
    pub retry: RetryClass,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
            basic_auth: None,
            retry: RetryClass::Standard,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    #[must_use]
    pub fn query(mut self, params: QueryParams) -> Self {
        self.query.extend(params.into_pairs());
        self
    }

    #[must_use]
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    #[must_use]
    pub fn multipart(
        mut self,
        field: &str,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        self.body = RequestBody::Multipart {
            field: field.to_string(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        };
        self
    }

    #[must_use]
    pub fn basic_auth(mut self, credentials: Credentials) -> Self {
        self.basic_auth = Some(credentials);
        self
    }

    #[must_use]
    pub const fn retry_class(mut self, class: RetryClass) -> Self {
        self.retry = class;
        self
    }

    pub fn query_values(&self, key: &str) -> Vec<&str> {
        self.query
            .iter()
            .filter(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        crate::classify::is_success(self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }

    /// Empty bodies decode to `Value::Null`.
    pub fn json_or_null(&self) -> serde_json::Result<Value> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        self.json()
    }
}

/// Sends requests for one client and owns that client's session token.
///
/// Implementations persist whatever the server sets on login (a cookie in
/// the HTTP implementation) and replay it on every later request.
pub trait Transport {
    fn send(&mut self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;

    fn has_session(&self) -> bool;

    fn clear_session(&mut self) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }

    fn has_session(&self) -> bool {
        (**self).has_session()
    }

    fn clear_session(&mut self) -> Result<(), TransportError> {
        (**self).clear_session()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_collects_query_and_body() {
        let request = HttpRequest::get("/objects")
            .query(QueryParams::new().push_all("object_id", ["a", "b"]))
            .json(serde_json::json!({"x": 1}));
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.query_values("object_id"), vec!["a", "b"]);
        assert!(matches!(request.body, RequestBody::Json(_)));
        assert_eq!(request.retry, RetryClass::Standard);
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let credentials = Credentials {
            username: "alice".to_string(),
            password: "s3cret".to_string(),
        };
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("s3cret"));
    }

    #[test]
    fn response_json_or_null_handles_empty_body() {
        assert_eq!(
            HttpResponse::new(200, "").json_or_null().expect("null"),
            Value::Null
        );
        assert_eq!(
            HttpResponse::new(200, "[1]").json_or_null().expect("array"),
            serde_json::json!([1])
        );
        assert!(HttpResponse::new(200, "not json").json_or_null().is_err());
    }

    #[test]
    fn response_header_lookup_is_case_insensitive() {
        let mut response = HttpResponse::new(200, "");
        response
            .headers
            .push(("Content-Type".to_string(), "text/plain".to_string()));
        assert_eq!(response.header("content-type"), Some("text/plain"));
    }
}
