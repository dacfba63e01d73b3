use slog::{o, Drain, Logger};
use slog_async::Async;
use slog_term::{FullFormat, PlainSyncDecorator, TermDecorator};

/// Configuration for setting up the service logger
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    async_buffer_size: usize,
    use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            async_buffer_size: 1024,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Colour only makes sense on an interactive terminal; JSON tracing
    /// deployments get plain text.
    pub fn for_app(config: &crate::config::AppConfig) -> Self {
        Self {
            use_color: !config.log_json && !config.is_production(),
            ..Self::default()
        }
    }
}

/// Sets up the slog logger used by the service layer
pub fn setup_logger(config: LoggerConfig) -> Logger {
    let decorator = {
        let builder = TermDecorator::new();
        let builder = if config.use_color {
            builder.force_color()
        } else {
            builder.force_plain()
        };
        builder.build()
    };

    let drain = FullFormat::new(decorator).build().fuse();

    let drain = Async::new(drain)
        .chan_size(config.async_buffer_size)
        .build()
        .fuse();

    Logger::root(drain, o!("version" => env!("CARGO_PKG_VERSION")))
}

/// Synchronous logger writing into any `io::Write`; used where the async
/// drain's background thread is unwanted.
pub fn plain_logger<W>(writer: W) -> Logger
where
    W: std::io::Write + Send + 'static,
{
    let decorator = PlainSyncDecorator::new(writer);
    let drain = FullFormat::new(decorator).build().fuse();
    Logger::root(drain, o!("version" => env!("CARGO_PKG_VERSION")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn plain_logger_writes_key_values() {
        let buffer = Buffer::default();
        let logger = plain_logger(buffer.clone());
        slog::info!(logger, "PV module created"; "pv_module_id" => 7);

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("PV module created"));
        assert!(output.contains("pv_module_id: 7"));
    }

    #[test]
    fn production_config_disables_colour() {
        let cfg = crate::config::AppConfig::new(
            "sqlite::memory:".into(),
            "127.0.0.1".into(),
            0,
            "production".into(),
        );
        assert!(!LoggerConfig::for_app(&cfg).use_color);
    }
}
