//! HTTP transport seam.
//!
//! `FetchTransport` rides the browser fetch API through gloo-net. Everything
//! above it talks to the `HttpTransport` trait, which is what the unit tests
//! swap for a scripted transport.

use async_trait::async_trait;
use gloo_net::http::Request;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Raw body handed to the transport.
#[derive(Debug, Clone)]
pub enum HttpBody {
    Text(String),
    /// Browser-native multipart payload; the platform writes the boundary.
    Multipart(web_sys::FormData),
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<HttpBody>,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: HttpBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Effective value of a header; repeated keys resolve to the last write.
    #[cfg(test)]
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// The transport settled without producing an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    Build(String),
    Network(String),
    Read(String),
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Build(msg) => write!(f, "request build failed: {msg}"),
            TransportError::Network(msg) => write!(f, "network error: {msg}"),
            TransportError::Read(msg) => write!(f, "response read failed: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

#[async_trait(?Send)]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Production transport over `window.fetch`.
pub struct FetchTransport;

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match req.method {
            HttpMethod::Get => Request::get(&req.url),
            HttpMethod::Post => Request::post(&req.url),
            HttpMethod::Delete => Request::delete(&req.url),
        };
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let sent = match req.body {
            None => builder.send().await,
            Some(HttpBody::Text(text)) => builder
                .body(text)
                .map_err(|e| TransportError::Build(e.to_string()))?
                .send()
                .await,
            Some(HttpBody::Multipart(form)) => builder
                .body(form)
                .map_err(|e| TransportError::Build(e.to_string()))?
                .send()
                .await,
        };
        let response = sent.map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Read(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
