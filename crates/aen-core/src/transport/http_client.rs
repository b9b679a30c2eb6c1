use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};

use super::{HttpRequest, HttpResponse, Method, RequestBody, Transport};
use crate::config::ClientConfig;
use crate::error::{AenError, Result, TransportError};

/// Blocking HTTP transport backed by reqwest with a private cookie jar.
///
/// The session cookie the server sets on `/user/login` lands in the jar and is
/// replayed automatically; it is never parsed.
pub struct ReqwestTransport {
    base_url: String,
    session_scope: Url,
    timeout: Duration,
    user_agent: String,
    jar: Arc<Jar>,
    http: Client,
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let session_scope = Url::parse(&format!("{}/", config.base_url))
            .map_err(|e| AenError::Config(format!("invalid base_url '{}': {e}", config.base_url)))?;
        let timeout = Duration::from_millis(config.timeout_ms);
        let jar = Arc::new(Jar::default());
        let http = build_client(Arc::clone(&jar), timeout, &config.user_agent)?;

        Ok(Self {
            base_url: config.base_url.clone(),
            session_scope,
            timeout,
            user_agent: config.user_agent.clone(),
            jar,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn prepare(&self, request: &HttpRequest) -> std::result::Result<RequestBuilder, TransportError> {
        let url = request_url(&self.session_scope, &request.path)?;
        let mut builder = self.http.request(to_reqwest_method(request.method), url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(credentials) = &request.basic_auth {
            builder = builder.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Bytes { content_type, data } => builder
                .header(CONTENT_TYPE, content_type.as_str())
                .body(data.clone()),
            RequestBody::Multipart {
                field,
                file_name,
                content_type,
                data,
            } => {
                let part = Part::bytes(data.clone())
                    .file_name(file_name.clone())
                    .mime_str(content_type)
                    .map_err(|e| TransportError::from_reqwest(&e))?;
                builder.multipart(Form::new().part(field.clone(), part))
            }
        };
        Ok(builder)
    }
}

impl Transport for ReqwestTransport {
    fn send(&mut self, request: &HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        let builder = self.prepare(request)?;
        let response = builder
            .send()
            .map_err(|e| TransportError::from_reqwest(&e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .map_err(|e| TransportError::from_reqwest(&e))?
            .to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    fn has_session(&self) -> bool {
        self.jar.cookies(&self.session_scope).is_some()
    }

    fn clear_session(&mut self) -> std::result::Result<(), TransportError> {
        let jar = Arc::new(Jar::default());
        self.http = build_client(Arc::clone(&jar), self.timeout, &self.user_agent)
            .map_err(|e| TransportError::Request(e.to_string()))?;
        self.jar = jar;
        Ok(())
    }
}

/// Resolves an already encoded request path below the base URL. The leading
/// `./` keeps a `:` in the first segment from being read as a scheme.
fn request_url(scope: &Url, path: &str) -> std::result::Result<Url, TransportError> {
    scope
        .join(&format!("./{}", path.trim_start_matches('/')))
        .map_err(|e| TransportError::Request(format!("invalid request path '{path}': {e}")))
}

fn build_client(jar: Arc<Jar>, timeout: Duration, user_agent: &str) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Client::builder()
        .default_headers(headers)
        .user_agent(user_agent)
        .timeout(timeout)
        .cookie_provider(jar)
        .build()
        .map_err(|e| AenError::Transport(TransportError::from_reqwest(&e)))
}

const fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
        Method::Head => reqwest::Method::HEAD,
        Method::Options => reqwest::Method::OPTIONS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::path_of;

    fn scope(base_url: &str) -> Url {
        Url::parse(&format!("{base_url}/")).expect("scope")
    }

    #[test]
    fn request_url_keeps_the_base_path() {
        let url = request_url(&scope("https://aeneis.test/api/v2"), "/user/login").expect("url");
        assert_eq!(url.as_str(), "https://aeneis.test/api/v2/user/login");
    }

    #[test]
    fn request_url_keeps_encoded_segments_intact() {
        let path = path_of(&["object", "a:b", "file", "x/y?.pdf"]).expect("path");
        let url = request_url(&scope("http://localhost:8080"), &path).expect("url");
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/object/a:b/file/x%2Fy%3F.pdf"
        );
        assert_eq!(url.host_str(), Some("localhost"));
    }
}
