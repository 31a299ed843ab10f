use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_FILTER: &str = "menu_optimistic=debug,info";

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// グローバルな subscriber を設定する。既に設定済みなら `false` を返す。
pub fn try_init(default_filter: &str) -> bool {
    let initialized = tracing_subscriber::registry()
        .with(env_filter(default_filter))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init()
        .is_ok();

    if initialized {
        tracing::info!(filter = default_filter, "logging initialized");
    }
    initialized
}
