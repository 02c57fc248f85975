/// Client configuration
use crate::error::{ClientError, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Clone)]
pub struct ClientConfig {
    /// Service root, without a trailing slash
    pub base_url: String,
    /// Signed session token sent as the `_blog_session` cookie
    pub session: Option<String>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("session", &self.session.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, session: Option<String>) -> Result<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        Ok(Self {
            base_url,
            session: session.filter(|s| !s.trim().is_empty()),
        })
    }

    /// Read `BLOG_BASE_URL` and `BLOG_SESSION`
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("BLOG_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url, std::env::var("BLOG_SESSION").ok())
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
