use crate::config::LoggingConfig;
use std::{
    io::Write,
    path::Path,
    sync::{Arc, Mutex},
};
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};

fn parse_tracing_level(s: &str) -> Option<Level> {
    match s.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        "off" | "none" => None,
        _ => Some(Level::INFO),
    }
}

// -------- rotating writer for the log file --------
#[derive(Clone)]
struct RotWriter(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl<'a> fmt::MakeWriter<'a> for RotWriter {
    type Writer = RotWriterHandle;
    fn make_writer(&'a self) -> Self::Writer {
        RotWriterHandle(self.0.clone())
    }
}

#[derive(Clone)]
struct RotWriterHandle(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl Write for RotWriterHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.lock().unwrap().flush()
    }
}

fn open_rotating_file(path: &Path, max_backups: usize, max_size_mb: u64) -> RotWriter {
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    RotWriter(Arc::new(Mutex::new(FileRotate::new(
        path,
        AppendTimestamp::default(FileLimit::MaxFiles(max_backups)),
        ContentLimit::Bytes((max_size_mb * 1024 * 1024) as usize),
        Compression::None,
        None,
    ))))
}

/// Initialize logging from the config section: a console layer plus an
/// optional size-rotated file layer. Safe to call once per process; later
/// calls are ignored.
pub fn init_logging(config: &LoggingConfig, base_dir: &Path) {
    let console_layer = parse_tracing_level(&config.console_level).map(|level| {
        fmt::layer()
            .with_target(true)
            .with_filter(tracing_subscriber::filter::LevelFilter::from_level(level))
    });

    let file_layer = config.file.as_ref().and_then(|file| {
        let level = parse_tracing_level(if config.file_level.is_empty() {
            "debug"
        } else {
            &config.file_level
        })?;
        let path = base_dir.join(file);
        let writer = open_rotating_file(
            &path,
            config.max_backups.unwrap_or(3),
            config.max_size_mb.unwrap_or(100),
        );
        Some(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer)
                .with_filter(tracing_subscriber::filter::LevelFilter::from_level(level)),
        )
    });

    // Route `log` records from dependencies through tracing as well.
    let _ = tracing_log::LogTracer::init();

    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}
