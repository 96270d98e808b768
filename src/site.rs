//! HTTP adapter for the site's own endpoints: venue search, search
//! recording and error reporting.

use crate::geo::LatLng;
use crate::report::ErrorReport;
use crate::traits::{ErrorReporter, SearchRecorder, VenueSource};
use crate::venue::{SearchError, VenueRecord};

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub base_url: String,
    /// URL of the page the session runs on, sent with error reports.
    pub page_url: String,
    pub timeout_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            page_url: "http://localhost:8080/search.html".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SiteClient {
    config: SiteConfig,
    client: reqwest::blocking::Client,
}

impl SiteClient {
    pub fn new(config: SiteConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

impl VenueSource for SiteClient {
    fn nearby(&self, point: LatLng) -> Result<Vec<VenueRecord>, SearchError> {
        let text = self
            .client
            .get(self.endpoint("bars.php"))
            .query(&[("lat", point.lat), ("lng", point.lng)])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())?;

        serde_json::from_str(&text).map_err(|err| {
            tracing::error!(error = %err, body = %text, "unparseable venue search response");
            SearchError::from(err)
        })
    }
}

impl SearchRecorder for SiteClient {
    fn record_search(&self, query: &str) {
        let result = self
            .client
            .get(self.endpoint("record-search.php"))
            .query(&[("query", query)])
            .send();
        if let Err(err) = result {
            tracing::debug!(error = %err, "recording search failed");
        }
    }
}

impl ErrorReporter for SiteClient {
    fn report(&self, report: &ErrorReport) {
        // The endpoint only accepts form fields, so the payload travels as JSON text.
        let form = [("url", self.config.page_url.clone()), ("exception", report.to_json())];
        let result = self.client.post(self.endpoint("errors.php")).form(&form).send();
        if let Err(err) = result {
            tracing::debug!(error = %err, "posting error report failed");
        }
    }
}
