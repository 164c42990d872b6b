pub mod api_provider;
pub mod hashed;

pub use api_provider::ApiEmbeddingProvider;
pub use hashed::HashedTfProvider;

use tracing::warn;
use verity_core::config::EmbeddingConfig;
use verity_core::traits::IEmbeddingProvider;

/// Build the configured primary provider. Falls back to the hashed provider
/// when the API provider cannot be constructed.
pub fn create_provider(config: &EmbeddingConfig) -> Box<dyn IEmbeddingProvider> {
    match config.provider.as_str() {
        "api" => match ApiEmbeddingProvider::from_env(config) {
            Ok(p) => Box::new(p),
            Err(e) => {
                warn!(error = %e, "api embedding provider unavailable, using hashed-tf");
                Box::new(HashedTfProvider::new(config.dimensions))
            }
        },
        "hashed" => Box::new(HashedTfProvider::new(config.dimensions)),
        other => {
            warn!(provider = other, "unknown embedding provider, using hashed-tf");
            Box::new(HashedTfProvider::new(config.dimensions))
        }
    }
}
