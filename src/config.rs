//! Locator configuration: defaults overridable from `LOCATOR_*` variables.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

use crate::geocode::GeocoderConfig;
use crate::map::MapDefaults;
use crate::osrm::OsrmConfig;
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::site::SiteConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("page size must be at least 1")]
    EmptyPage,
    #[error("viewport must be at least 1x1 pixels, got {0}x{1}")]
    EmptyViewport(u32, u32),
    #[error("{0} must not be empty")]
    MissingUrl(&'static str),
}

#[derive(Debug, Clone)]
pub struct LocatorConfig {
    pub site: SiteConfig,
    pub osrm: OsrmConfig,
    pub geocoder: GeocoderConfig,
    pub page_size: usize,
    pub map: MapDefaults,
    pub viewport: (u32, u32),
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            osrm: OsrmConfig::default(),
            geocoder: GeocoderConfig::default(),
            page_size: DEFAULT_PAGE_SIZE,
            map: MapDefaults::default(),
            viewport: (640, 480),
        }
    }
}

impl LocatorConfig {
    /// Defaults with any `LOCATOR_*` environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = var("LOCATOR_SITE_URL") {
            config.site.base_url = url;
        }
        if let Some(url) = var("LOCATOR_PAGE_URL") {
            config.site.page_url = url;
        }
        if let Some(url) = var("LOCATOR_OSRM_URL") {
            config.osrm.base_url = url;
        }
        if let Some(profile) = var("LOCATOR_OSRM_PROFILE") {
            config.osrm.profile = profile;
        }
        if let Some(url) = var("LOCATOR_GEOCODER_URL") {
            config.geocoder.base_url = url;
        }
        config.geocoder.api_key = var("LOCATOR_GEOCODER_KEY");

        let timeout = parsed("LOCATOR_TIMEOUT_SECS", config.site.timeout_secs);
        config.site.timeout_secs = timeout;
        config.osrm.timeout_secs = timeout;
        config.geocoder.timeout_secs = timeout;

        config.page_size = parsed("LOCATOR_PAGE_SIZE", config.page_size);
        config.map.zoom = parsed("LOCATOR_DEFAULT_ZOOM", config.map.zoom);
        config.viewport = (
            parsed("LOCATOR_VIEWPORT_WIDTH", config.viewport.0),
            parsed("LOCATOR_VIEWPORT_HEIGHT", config.viewport.1),
        );

        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::EmptyPage);
        }
        let (width, height) = self.viewport;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyViewport(width, height));
        }
        for (name, url) in [
            ("site url", &self.site.base_url),
            ("osrm url", &self.osrm.base_url),
            ("geocoder url", &self.geocoder.base_url),
        ] {
            if url.trim().is_empty() {
                return Err(ConfigError::MissingUrl(name));
            }
        }
        Ok(())
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parsed<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match var(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|err| {
            tracing::warn!("Invalid {key} value {raw:?}: {err}, using default {default}");
            default
        }),
        None => {
            tracing::info!("{key} not set, using default: {default}");
            default
        }
    }
}
