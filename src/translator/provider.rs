//! Provider adapter trait
//!
//! Each upstream marketplace implements this trait so the translator can stay
//! ignorant of endpoints, headers and payload layouts.

use async_trait::async_trait;

use super::error::TranslatorError;
use super::kind::{AssetKind, KindProfile};
use super::model::{ProviderPage, ProviderRequest, SearchQuery};

#[async_trait]
pub trait AssetProvider: Send + Sync {
    /// Lowercase identifier used in logs and errors
    fn name(&self) -> &'static str;

    /// Largest page size the provider accepts
    fn max_page_size(&self) -> u32;

    /// Whether a credential is present
    fn is_configured(&self) -> bool;

    /// Environment variable expected to hold the credential
    fn credential_env(&self) -> &'static str;

    /// How `kind` maps onto this provider's catalogue
    fn profile(&self, kind: AssetKind) -> KindProfile {
        kind.profile()
    }

    /// Build the upstream request. `query` is already clamped.
    fn build_request(&self, query: &SearchQuery, profile: &KindProfile) -> ProviderRequest;

    /// Issue the request and decode the provider's payload
    async fn execute(&self, request: &ProviderRequest) -> Result<ProviderPage, TranslatorError>;
}
