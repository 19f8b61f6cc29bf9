use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

pub const DEFAULT_LOG_LEVEL: &str = "info";

// The level comes from config.json, which is read after logging is already
// up, so the filter sits behind a reload handle.
pub struct LogHandle {
    handle: reload::Handle<EnvFilter, Registry>,
}

pub fn init_logging() -> LogHandle {
    let (filter, handle) = reload::Layer::new(EnvFilter::new(DEFAULT_LOG_LEVEL));
    // a second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init();
    LogHandle { handle }
}

impl LogHandle {
    pub fn set_level(&self, level: &str) {
        match EnvFilter::try_new(level) {
            Ok(filter) => {
                if let Err(e) = self.handle.reload(filter) {
                    warn!("could not apply log level {:?}: {}", level, e);
                }
            }
            Err(e) => warn!("invalid log level {:?}: {}", level, e),
        }
    }
}
