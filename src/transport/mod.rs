use std::sync::Arc;

use tracing::{error, info, warn};

use crate::service::lemma_service::LemmaService;

pub mod function;
pub mod server;

/// Moves the model load (and any download) from the first request to startup.
/// A failure only means requests go through the lazy path.
pub async fn preload_model(service: Arc<LemmaService>) {
    info!("preloading model {}", service.model_name());
    let model_name = service.model_name().to_string();
    match tokio::task::spawn_blocking(move || service.warm_up()).await {
        Ok(Ok(())) => info!("model {} ready", model_name),
        Ok(Err(e)) => warn!("preload failed, requests will retry: {}", e),
        Err(e) => error!("preload task failed: {}", e),
    }
}
