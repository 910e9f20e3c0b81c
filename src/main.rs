use mail_launcher::common::plugin_dir;
use mail_launcher::launcher::Launcher;
use mail_launcher::plugin::PluginManager;
use mail_launcher::plugins::mail::MailPlugin;
use mail_launcher::rpc::Host;
use mail_launcher::settings::{Settings, SETTINGS_FILE};

fn main() -> anyhow::Result<()> {
    let settings_path = plugin_dir().join(SETTINGS_FILE);
    let loaded = Settings::load(&settings_path);
    let settings = loaded.as_ref().cloned().unwrap_or_default();
    mail_launcher::logging::init(settings.debug_logging, settings.log_file.clone());
    if let Err(e) = &loaded {
        tracing::warn!(
            "ignoring unreadable settings {}: {e:#}",
            settings_path.display()
        );
    }
    tracing::info!("starting mail launcher plugin from {}", plugin_dir().display());

    let mut plugins = PluginManager::new();
    plugins.register(Box::new(MailPlugin::default()));

    let mut host = Host::new(plugins, Launcher::colocated());
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    host.run(stdin.lock(), stdout.lock())?;
    tracing::info!("host closed the session");
    Ok(())
}
