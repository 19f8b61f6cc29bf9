use std::sync::Arc;

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use mimalloc::MiMalloc;

use lemma_service::config::config::{DEFAULT_CONFIG_PATH, load_config};
use lemma_service::config::logging::init_logging;
use lemma_service::model::loader::PackageLoader;
use lemma_service::service::lemma_service::LemmaService;
use lemma_service::transport::function::{FunctionEvent, dispatch};
use lemma_service::transport::preload_model;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let logging = init_logging();
    let config = load_config(DEFAULT_CONFIG_PATH);
    logging.set_level(&config.log_level);

    // One service per container; the cached model survives warm invocations.
    let service = Arc::new(LemmaService::new(PackageLoader::from_config(&config)));
    if config.preload_model {
        preload_model(Arc::clone(&service)).await;
    }

    run(service_fn(move |event: LambdaEvent<FunctionEvent>| {
        let service = Arc::clone(&service);
        async move { Ok::<_, Error>(dispatch(service, event.payload).await) }
    }))
    .await
}
