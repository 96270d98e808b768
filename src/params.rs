//! Page query parameters.

use url::{form_urlencoded, Url};

/// Parameters the search page reads from its URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageParams {
    /// The address typed into the search box.
    pub query: Option<String>,
    /// Id of a venue to page to and select on load.
    pub select: Option<String>,
}

impl PageParams {
    /// Reads the parameters from a full page URL. An unparseable URL has
    /// no parameters.
    pub fn from_url(url: &str) -> Self {
        match Url::parse(url) {
            Ok(url) => Self::from_query(url.query().unwrap_or_default()),
            Err(err) => {
                tracing::debug!(url, error = %err, "unparseable page url");
                Self::default()
            }
        }
    }

    /// Reads the parameters from a raw query string. `+` decodes to a space
    /// and empty values count as absent.
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "query" => params.query = Some(value.to_string()),
                "select" => params.select = Some(value.to_string()),
                _ => {}
            }
        }
        params
    }
}
