use chrono::Local;
use std::path::Path;

use crate::notify::{schedule_notification, Notifier};
use crate::plugins::mail::{format_timer, parse_timer, Mail, MailConfig, MailKind, MailSender};

/// Send the start mail and, when `timer` is a positive duration, schedule a
/// toast for when it elapses. Failures are logged only.
pub fn start(config_dir: &Path, sender: &MailSender, notifier: &dyn Notifier, timer: Option<&str>) {
    let cfg = MailConfig::load(config_dir);
    let mail = Mail::compose(&cfg, MailKind::Start, None, Local::now());
    tracing::info!(
        "sending start mail: subject='{}', recipients={}",
        mail.subject,
        mail.joined_recipients()
    );
    if let Err(e) = sender.send(&mail) {
        tracing::error!("error sending start mail: {e:#}");
    }

    if let Some(delay) = timer.and_then(parse_timer).filter(|d| !d.is_zero()) {
        let pretty = format_timer(delay);
        tracing::info!("scheduling notification in {pretty}");
        schedule_notification(
            notifier,
            delay,
            "Timer ended",
            &format!("{pretty} has elapsed"),
        );
    }
}

/// Send the stop mail with `token` appended to the body. Failures are logged
/// only.
pub fn stop(config_dir: &Path, sender: &MailSender, token: Option<&str>) {
    let cfg = MailConfig::load(config_dir);
    let mail = Mail::compose(&cfg, MailKind::Stop, token, Local::now());
    tracing::info!(
        "sending stop mail: subject='{}', recipients={}, hours={}",
        mail.subject,
        mail.joined_recipients(),
        token.unwrap_or_default()
    );
    if let Err(e) = sender.send(&mail) {
        tracing::error!("error sending stop mail: {e:#}");
    }
}
