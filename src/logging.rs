use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Initialise logging. The default level is `info`; when `debug` is set the
/// level is `debug` and `RUST_LOG` may override it.
///
/// Stdout carries the host protocol, so logs go to stderr unless `file` is
/// given.
pub fn init(debug: bool, file: Option<PathBuf>) {
    // Without debug logging `RUST_LOG` is ignored so a stray variable in the
    // host's environment cannot make the plugin verbose.
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false);

    if let Some(path) = file {
        let dir = path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        let name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "mail_launcher.log".into());
        let appender = tracing_appender::rolling::never(dir, name);
        let _ = builder.with_writer(appender).try_init();
    } else {
        let _ = builder.with_writer(std::io::stderr).try_init();
    }
}
