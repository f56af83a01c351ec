use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};
use std::env;
use std::fs;
use std::io;

const LOG_FILE: &str = "log.txt";

/// Initialize logging: console output plus a per-session `log.txt`.
///
/// `RUST_LOG` overrides the default filter. Setting `WALKBOT_LOG_FILE=0`
/// disables the file layer.
pub fn init_logging() {
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let enable_file = env::var("WALKBOT_LOG_FILE").unwrap_or_else(|_| "1".to_string()) == "1";
    let enable_backtrace = env::var("RUST_BACKTRACE").unwrap_or_else(|_| "0".to_string()) == "1";

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut filter = EnvFilter::new(&log_level);
        if let Ok(directive) = "walkbot=debug".parse() {
            filter = filter.add_directive(directive);
        }
        // egui/winit are chatty at debug
        for noisy in ["eframe=warn", "egui_glow=warn", "winit=warn"] {
            if let Ok(directive) = noisy.parse() {
                filter = filter.add_directive(directive);
            }
        }
        filter
    });

    let log_file = if enable_file { open_session_log() } else { None };

    let console = fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(true);

    let file = log_file.map(|file| {
        fmt::layer()
            .with_writer(std::sync::Mutex::new(file))
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
    });

    // Already initialized (tests, embedding): keep the existing subscriber.
    if tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file)
        .try_init()
        .is_err()
    {
        return;
    }

    std::panic::set_hook(Box::new(move |panic_info| {
        tracing::error!("Panic occurred: {}", panic_info);

        if let Some(location) = panic_info.location() {
            tracing::error!(
                "Panic location: {}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            );
        }

        if enable_backtrace {
            tracing::error!("Backtrace:\n{:?}", std::backtrace::Backtrace::capture());
        }
    }));

    tracing::info!("Logging initialized with level: {}", log_level);
    tracing::info!("File logging enabled: {}", enable_file);
    tracing::info!("Backtrace enabled: {}", enable_backtrace);
}

fn open_session_log() -> Option<fs::File> {
    // Previous session's log is discarded on startup.
    if let Err(e) = fs::remove_file(LOG_FILE) {
        if e.kind() != io::ErrorKind::NotFound {
            eprintln!("Warning: Failed to remove existing {}: {}", LOG_FILE, e);
        }
    }
    match fs::File::create(LOG_FILE) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Warning: File logging disabled, cannot create {}: {}", LOG_FILE, e);
            None
        }
    }
}

/// Log system information for debugging
pub fn log_system_info() {
    tracing::info!("=== System Information ===");
    tracing::info!("OS: {}", std::env::consts::OS);
    tracing::info!("Architecture: {}", std::env::consts::ARCH);
    tracing::info!("Version: {} {}", crate::APP_NAME, crate::VERSION);
    tracing::info!("========================");
}
