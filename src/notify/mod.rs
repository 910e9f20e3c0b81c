use chrono::{DateTime, Local};
use std::time::Duration;

use crate::plugins::mail::timer::format_timer;

#[cfg(target_os = "windows")]
mod win;

/// How long a tray balloon stays on screen.
pub const BALLOON_TIMEOUT: Duration = Duration::from_secs(5);
/// Delay after which the tray icon backing a balloon is removed.
pub const BALLOON_DISPOSE_AFTER: Duration = Duration::from_secs(6);

/// Access to the platform notification subsystems.
pub trait Notifier: Send + Sync {
    /// Show a toast right away.
    fn show(&self, title: &str, body: &str) -> anyhow::Result<()>;
    /// Register a toast the OS delivers at `due`, even if this process has
    /// exited by then.
    fn schedule(&self, due: DateTime<Local>, title: &str, body: &str) -> anyhow::Result<()>;
    /// Show a tray balloon and remove its icon after [`BALLOON_DISPOSE_AFTER`].
    fn balloon(&self, title: &str, body: &str) -> anyhow::Result<()>;
}

/// Notifier backed by the native toast and tray APIs.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemNotifier;

#[cfg(target_os = "windows")]
impl Notifier for SystemNotifier {
    fn show(&self, title: &str, body: &str) -> anyhow::Result<()> {
        win::show_toast(title, body)
    }

    fn schedule(&self, due: DateTime<Local>, title: &str, body: &str) -> anyhow::Result<()> {
        win::schedule_toast(due, title, body)
    }

    fn balloon(&self, title: &str, body: &str) -> anyhow::Result<()> {
        win::show_balloon(title, body)
    }
}

#[cfg(not(target_os = "windows"))]
impl Notifier for SystemNotifier {
    fn show(&self, title: &str, body: &str) -> anyhow::Result<()> {
        notify_rust::Notification::new()
            .summary(title)
            .body(body)
            .show()?;
        Ok(())
    }

    fn schedule(&self, _due: DateTime<Local>, _title: &str, _body: &str) -> anyhow::Result<()> {
        anyhow::bail!("scheduled toasts need the Windows toast scheduler")
    }

    fn balloon(&self, _title: &str, _body: &str) -> anyhow::Result<()> {
        anyhow::bail!("tray balloons are only available on Windows")
    }
}

/// Confirm the timer with an immediate toast, then hand a toast due at
/// `now + delay` to the OS. Nothing is kept in process for the pending toast.
pub fn schedule_notification(notifier: &dyn Notifier, delay: Duration, title: &str, message: &str) {
    let pretty = format_timer(delay);
    if let Err(e) = notifier.show("Timer scheduled", &format!("Will notify in {pretty}")) {
        tracing::debug!("confirmation toast not shown: {e:#}");
    }

    let due = chrono::Duration::from_std(delay)
        .ok()
        .and_then(|d| Local::now().checked_add_signed(d));
    let Some(due) = due else {
        tracing::error!("timer {pretty} is out of range");
        return;
    };
    tracing::info!("scheduling toast for {} (delay {pretty})", due.to_rfc3339());
    if let Err(e) = notifier.schedule(due, title, message) {
        tracing::error!("schedule notification error: {e:#}");
    }
}

/// Show an immediate notice, falling back to a tray balloon when toasts fail.
pub fn show_notification(notifier: &dyn Notifier, title: &str, message: &str) {
    tracing::info!("attempting to show notification: {title} - {message}");
    match notifier.show(title, message) {
        Ok(()) => return,
        Err(e) => tracing::error!("toast failed: {e:#}"),
    }
    if let Err(e) = notifier.balloon(title, message) {
        tracing::error!("tray balloon fallback failed: {e:#}");
    }
}
