use crate::config::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LEVEL: &str = "info";

/// 依 [logging] 設定初始化；RUST_LOG 優先。已經初始化過時回傳 false
pub fn init_logger(config: &LoggingConfig) -> bool {
    let level = config.level.as_deref().unwrap_or(DEFAULT_LEVEL);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("whanau_insight={}", level)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    match config.format.as_deref() {
        Some("json") => registry.with(fmt_layer.json()).try_init().is_ok(),
        _ => registry.with(fmt_layer.compact()).try_init().is_ok(),
    }
}

pub fn init_default_logger(verbose: bool) -> bool {
    init_logger(&LoggingConfig {
        level: Some(if verbose { "debug" } else { DEFAULT_LEVEL }.to_string()),
        format: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_a_no_op() {
        let config = LoggingConfig {
            level: Some("debug".to_string()),
            format: Some("json".to_string()),
        };
        // 其他測試可能已經初始化過，所以只檢查第二次一定回傳 false
        let _ = init_logger(&config);
        assert!(!init_default_logger(false));
    }
}
