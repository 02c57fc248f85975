/// Anti-forgery token embedded in the page shell
use crate::error::{ClientError, Result};
use scraper::{Html, Selector};

pub const CSRF_META_SELECTOR: &str = r#"meta[name="csrf-token"]"#;

#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Extract the `content` of the `csrf-token` meta tag
    pub fn from_page(html: &str) -> Result<Self> {
        let document = Html::parse_document(html);
        let selector =
            Selector::parse(CSRF_META_SELECTOR).map_err(|_| ClientError::MissingCsrfToken)?;

        document
            .select(&selector)
            .filter_map(|meta| meta.value().attr("content"))
            .map(str::trim)
            .find(|content| !content.is_empty())
            .map(Self::new)
            .ok_or(ClientError::MissingCsrfToken)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CsrfToken(<redacted>)")
    }
}
