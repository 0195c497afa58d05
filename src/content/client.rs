//! HTTP client for static content fragments.
//!
//! The presentation content lives as plain text and HTML fragments next to
//! the page; the core fetches them lazily over GET. There is no retry and
//! no authentication.

use super::error::ContentError;

/// Fetches text fragments relative to a base URL.
///
pub struct Client {
    base_url: String,
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL.
    ///
    /// # Panics
    /// Panics if the HTTP client cannot be created. This should never happen
    /// in practice as reqwest::Client::builder().build() only fails on
    /// invalid configuration, which we don't use.
    pub fn new(base_url: &str) -> Self {
        Client {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create HTTP client - this should never happen"),
        }
    }

    /// Fetch a fragment as text. A 404 maps to `ContentError::NotFound`;
    /// every other non-success status is treated the same way since the
    /// caller's only recourse is the fallback string.
    ///
    pub async fn get_text(&self, path: &str) -> Result<String, ContentError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        log::debug!("Fetching content fragment '{}'...", url);

        let response = self.http_client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ContentError::NotFound {
                path: path.to_owned(),
            });
        }
        Ok(response.text().await?)
    }
}
