//! Asset query translator
//!
//! Maps a normalized search (term, page, page size, kind) onto the configured
//! provider and folds whatever comes back into the [`SearchResult`] envelope.
//! Holds no state between calls.

mod error;
mod kind;
mod model;
pub mod normalize;
mod provider;

use std::sync::Arc;

use crate::logger;

pub use error::TranslatorError;
pub use kind::{AssetKind, Category, KindProfile};
pub use model::{
    NormalizedAsset, ProviderPage, ProviderRequest, SearchQuery, SearchResult, DEFAULT_PAGE,
    DEFAULT_PAGE_SIZE, DEFAULT_TERM,
};
pub use provider::AssetProvider;

/// Front door for every search endpoint
#[derive(Clone)]
pub struct Translator {
    provider: Arc<dyn AssetProvider>,
}

impl Translator {
    pub fn new(provider: Arc<dyn AssetProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Run one search; failures are folded into the envelope
    pub async fn search(&self, kind: AssetKind, term: &str, page: u32, page_size: u32) -> SearchResult {
        let query = SearchQuery::new(kind, term, page, page_size);
        match self.try_search(&query).await {
            Ok(result) => result,
            Err(e) => {
                logger::log_provider_error(self.provider.name(), &e);
                SearchResult::failure(&e)
            }
        }
    }

    /// Run one search, surfacing the error
    pub async fn try_search(&self, query: &SearchQuery) -> Result<SearchResult, TranslatorError> {
        if !self.provider.is_configured() {
            return Err(TranslatorError::Configuration {
                provider: self.provider.name(),
                env_var: self.provider.credential_env(),
            });
        }

        let request = self.prepare(query);
        logger::log_provider_call(self.provider.name(), &request);

        let profile = self.provider.profile(query.kind);
        let page = self.provider.execute(&request).await?;
        Ok(SearchResult::success(page, profile.note))
    }

    /// Clamp the query and build the provider request without sending it
    pub fn prepare(&self, query: &SearchQuery) -> ProviderRequest {
        let query = query.clone().clamped(self.provider.max_page_size());
        let profile = self.provider.profile(query.kind);
        self.provider.build_request(&query, &profile)
    }
}
