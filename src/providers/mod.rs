//! Provider adapters
//!
//! One adapter per upstream marketplace, selected by `provider.backend`.

mod client;
pub mod freepik;
pub mod iconscout;

use std::sync::Arc;

use crate::config::{Config, ProviderBackend};
use crate::translator::AssetProvider;

pub use freepik::FreepikProvider;
pub use iconscout::IconscoutProvider;

/// Build the configured adapter
pub fn from_config(config: &Config) -> reqwest::Result<Arc<dyn AssetProvider>> {
    let http = client::build_client(&config.http.server_name)?;
    let base_url = config.provider.base_url.as_deref();
    let key = config.provider.api_key.clone();

    let provider: Arc<dyn AssetProvider> = match config.provider.backend {
        ProviderBackend::Freepik => Arc::new(FreepikProvider::new(http, base_url, key)),
        ProviderBackend::Iconscout => Arc::new(IconscoutProvider::new(http, base_url, key)),
    };
    Ok(provider)
}
