use std::process::ExitCode;
use std::sync::Arc;

use mimalloc::MiMalloc;
use tracing::{error, info};

use lemma_service::config::config::{DEFAULT_CONFIG_PATH, load_config};
use lemma_service::config::logging::init_logging;
use lemma_service::model::loader::PackageLoader;
use lemma_service::service::lemma_service::LemmaService;
use lemma_service::transport::{preload_model, server};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let logging = init_logging();
    let config = load_config(DEFAULT_CONFIG_PATH);
    logging.set_level(&config.log_level);

    info!("current configuration:");
    info!("  bind address:     {}", config.bind_address);
    info!("  endpoint:         {}", config.endpoint);
    info!("  model:            {}", config.model_name);
    info!("  model directory:  {}", config.model_directory);
    info!("  package source:   {}", config.package_source);
    info!("  preload model:    {}", config.preload_model);

    let service = Arc::new(LemmaService::new(PackageLoader::from_config(&config)));
    if config.preload_model {
        preload_model(Arc::clone(&service)).await;
    }

    match server::serve(&config, service).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
