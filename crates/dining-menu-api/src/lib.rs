
mod query;
pub use query::{MealPeriod, MenuQuery};

use bytes::Bytes;

/// Client for the menu provider's weekly-menu endpoint.
///
/// The response body is treated as opaque JSON and handed back unchanged;
/// the provider's shape is deliberately not modelled here.
#[derive(Debug, Clone)]
pub struct MenuClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MenuFetchError {
    #[error("menu provider returned status {0}")]
    Status(reqwest::StatusCode),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl MenuClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetches the weekly menu for `query`, relaying the provider's body
    /// without parsing it. No retries, no caching.
    pub async fn weekly_menu(&self, query: &MenuQuery) -> Result<Bytes, MenuFetchError> {
        let url = format!("{}/{}", self.base_url, query.path());
        tracing::debug!("fetching menu from {url}");

        let response = self.client.get(&url)
            .send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("menu provider answered {status} for {url}");
            return Err(MenuFetchError::Status(status));
        }

        Ok(response.bytes().await?)
    }
}
