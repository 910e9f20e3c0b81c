use crate::actions::Action;
use crate::notify::{show_notification, Notifier, SystemNotifier};
use crate::plugins::mail::MailSender;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, PartialEq, Eq)]
pub enum ActionKind<'a> {
    ClipboardText(&'a str),
    MailStart { timer: Option<&'a str> },
    MailStop { token: Option<&'a str> },
    Notify { title: &'a str, message: &'a str },
    Unknown(&'a str),
}

pub fn parse_action_kind(action: &Action) -> ActionKind<'_> {
    let s = action.action.as_str();
    if let Some(text) = s.strip_prefix("clipboard:") {
        return ActionKind::ClipboardText(text);
    }
    if s == "mail:start" {
        return ActionKind::MailStart { timer: None };
    }
    if let Some(timer) = s.strip_prefix("mail:start:") {
        return ActionKind::MailStart { timer: Some(timer) };
    }
    if s == "mail:stop" {
        return ActionKind::MailStop { token: None };
    }
    if let Some(token) = s.strip_prefix("mail:stop:") {
        return ActionKind::MailStop { token: Some(token) };
    }
    if let Some(rest) = s.strip_prefix("notify:") {
        let (title, message) = rest.split_once('|').unwrap_or((rest, ""));
        return ActionKind::Notify { title, message };
    }
    ActionKind::Unknown(s)
}

/// Executes the actions returned by the plugins.
pub struct Launcher {
    config_dir: PathBuf,
    sender: MailSender,
    notifier: Arc<dyn Notifier>,
}

impl Launcher {
    pub fn new(config_dir: impl Into<PathBuf>, sender: MailSender, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            config_dir: config_dir.into(),
            sender,
            notifier,
        }
    }

    /// Launcher for the files shipped next to the plugin binary.
    pub fn colocated() -> Self {
        let dir = crate::common::plugin_dir();
        Self::new(dir, MailSender::colocated(dir), Arc::new(SystemNotifier))
    }

    /// Run `action`. Mail and notification actions never fail; their errors
    /// end up in the log.
    pub fn launch_action(&self, action: &Action) -> anyhow::Result<()> {
        use crate::actions::*;
        match parse_action_kind(action) {
            ActionKind::ClipboardText(text) => clipboard::set_text(text),
            ActionKind::MailStart { timer } => {
                mail::start(&self.config_dir, &self.sender, self.notifier.as_ref(), timer);
                Ok(())
            }
            ActionKind::MailStop { token } => {
                mail::stop(&self.config_dir, &self.sender, token);
                Ok(())
            }
            ActionKind::Notify { title, message } => {
                show_notification(self.notifier.as_ref(), title, message);
                Ok(())
            }
            ActionKind::Unknown(s) => anyhow::bail!("unknown action '{s}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(s: &str) -> Action {
        Action {
            action: s.into(),
            ..Default::default()
        }
    }

    #[test]
    fn parse_clipboard_keeps_colons() {
        let a = action("clipboard: a:b ");
        assert_eq!(parse_action_kind(&a), ActionKind::ClipboardText(" a:b "));
    }

    #[test]
    fn parse_mail_actions() {
        assert_eq!(
            parse_action_kind(&action("mail:start")),
            ActionKind::MailStart { timer: None }
        );
        assert_eq!(
            parse_action_kind(&action("mail:start:00:35")),
            ActionKind::MailStart {
                timer: Some("00:35")
            }
        );
        assert_eq!(
            parse_action_kind(&action("mail:stop:8h")),
            ActionKind::MailStop { token: Some("8h") }
        );
    }

    #[test]
    fn parse_notify() {
        assert_eq!(
            parse_action_kind(&action("notify:Hi|there")),
            ActionKind::Notify {
                title: "Hi",
                message: "there"
            }
        );
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            parse_action_kind(&action("mail:restart")),
            ActionKind::Unknown("mail:restart")
        );
    }
}
