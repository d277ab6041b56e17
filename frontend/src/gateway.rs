//! Request envelope shared by every backend call.
//!
//! One dispatch path builds, authorizes and sends each request, then folds
//! the response into `Result<Option<T>>`:
//! - `Ok(None)` is a 204, resolved before any body parsing
//! - a 401 clears the stored credential and fires the expiry hook first,
//!   then surfaces as `Unauthorized`
//! - any other non-success status carries the body text (or the standard
//!   reason phrase when the body is empty)

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::auth::TokenStore;
use crate::config::ApiConfig;
use crate::log::log_error;
use crate::web::{HttpBody, HttpMethod, HttpRequest, HttpTransport};


// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The transport settled without an HTTP response.
    Network(String),
    /// 401. Credential and session are already cleared when this surfaces.
    Unauthorized,
    /// Non-success status with the body text.
    Http { status: u16, message: String },
    /// Success status whose body did not parse as the expected type.
    Decode(String),
    /// The request body could not be serialized.
    Encode(String),
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::Network(msg) => write!(f, "Sin conexión con el servidor: {msg}"),
            GatewayError::Unauthorized => write!(f, "No autorizado (401)"),
            GatewayError::Http { status, message } => write!(f, "{status} – {message}"),
            GatewayError::Decode(msg) => write!(f, "Respuesta inesperada del servidor: {msg}"),
            GatewayError::Encode(msg) => write!(f, "No se pudo preparar la petición: {msg}"),
        }
    }
}

impl std::error::Error for GatewayError {}

/// Standard reason phrase, used when an error response has no body.
fn reason_phrase(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Error",
    }
}

// ============================================================================
// Request bodies
// ============================================================================

/// Payload kinds the envelope knows how to label.
pub enum RequestBody {
    Json(String),
    Form(String),
    /// Content type stays unset so the browser writes the boundary itself.
    Multipart(web_sys::FormData),
}

impl RequestBody {
    pub fn json<T: Serialize>(value: &T) -> Result<Self, GatewayError> {
        serde_json::to_string(value)
            .map(RequestBody::Json)
            .map_err(|e| GatewayError::Encode(e.to_string()))
    }

    fn content_type(&self) -> Option<&'static str> {
        match self {
            RequestBody::Json(_) => Some("application/json"),
            RequestBody::Form(_) => Some("application/x-www-form-urlencoded"),
            RequestBody::Multipart(_) => None,
        }
    }

    fn into_http_body(self) -> HttpBody {
        match self {
            RequestBody::Json(text) | RequestBody::Form(text) => HttpBody::Text(text),
            RequestBody::Multipart(form) => HttpBody::Multipart(form),
        }
    }
}

// ============================================================================
// Gateway
// ============================================================================

type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
pub struct Gateway {
    base_url: String,
    tokens: TokenStore,
    transport: Arc<dyn HttpTransport>,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl Gateway {
    pub fn new(config: &ApiConfig, tokens: TokenStore, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            base_url: config.base_url().to_string(),
            tokens,
            transport,
            on_unauthorized: None,
        }
    }

    /// Global 401 side effect: session expiry, user notification. Runs
    /// after the credential is cleared, before the error is returned.
    pub fn with_unauthorized_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(hook));
        self
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, GatewayError> {
        self.request(HttpMethod::Get, path, None, &[]).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<Option<T>, GatewayError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let body = RequestBody::json(body)?;
        self.request(HttpMethod::Post, path, Some(body), &[]).await
    }

    /// Form-encoded POST; the caller encodes the fields.
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: String,
    ) -> Result<Option<T>, GatewayError> {
        self.request(HttpMethod::Post, path, Some(RequestBody::Form(form)), &[])
            .await
    }

    #[allow(dead_code)]
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: web_sys::FormData,
    ) -> Result<Option<T>, GatewayError> {
        self.request(HttpMethod::Post, path, Some(RequestBody::Multipart(form)), &[])
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, GatewayError> {
        self.request(HttpMethod::Delete, path, None, &[]).await
    }

    /// Single dispatch path; every verb funnels through here.
    ///
    /// The bearer token is read from the store per dispatch, never cached
    /// across awaits, so a token cleared mid-flight stays cleared.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<RequestBody>,
        extra_headers: &[(&str, &str)],
    ) -> Result<Option<T>, GatewayError> {
        let mut req =
            HttpRequest::new(self.url(path), method).with_header("Accept", "application/json");

        if let Some(token) = self.tokens.get() {
            req = req.with_header("Authorization", &format!("Bearer {token}"));
        }
        if let Some(body) = body {
            if let Some(content_type) = body.content_type() {
                req = req.with_header("Content-Type", content_type);
            }
            req = req.with_body(body.into_http_body());
        }
        // Caller headers win over the defaults.
        for (key, value) in extra_headers {
            req = req.with_header(key, value);
        }

        let response = self.transport.send(req).await.map_err(|e| {
            log_error!("[Gateway] Transport failure on {path}: {e}");
            GatewayError::Network(e.to_string())
        })?;

        match response.status {
            401 => {
                log_error!("[Gateway] 401 on {path}, dropping credentials.");
                self.tokens.clear();
                if let Some(hook) = &self.on_unauthorized {
                    hook();
                }
                Err(GatewayError::Unauthorized)
            }
            204 => Ok(None),
            status if !(200..300).contains(&status) => {
                let message = if response.body.trim().is_empty() {
                    reason_phrase(status).to_string()
                } else {
                    response.body
                };
                Err(GatewayError::Http { status, message })
            }
            _ => serde_json::from_str(&response.body)
                .map(Some)
                .map_err(|e| GatewayError::Decode(e.to_string())),
        }
    }
}
