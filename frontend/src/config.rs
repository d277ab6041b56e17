//! Startup configuration.

/// Base URL of the REST backend, fixed at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Compile-time override via `RESERVA_API_URL`, falling back to the
    /// local development server.
    pub fn from_env() -> Self {
        Self::new(option_env!("RESERVA_API_URL").unwrap_or("http://127.0.0.1:8000"))
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        assert_eq!(ApiConfig::new("http://api.test/").base_url(), "http://api.test");
        assert_eq!(ApiConfig::new("http://api.test").base_url(), "http://api.test");
    }
}
