use crate::actions::Action;
use crate::plugin::{ContextMenuEntry, Plugin, PluginContext, Theme};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

pub mod config;
pub mod sender;
pub mod timer;

pub use config::{MailConfig, MAIL_CONFIG_FILE};
pub use sender::{Mail, MailKind, MailSender, MAIL_SCRIPT_FILE};
pub use timer::{format_timer, parse_timer};

pub const LIGHT_ICON: &str = "Images/mail.light.png";
pub const DARK_ICON: &str = "Images/mail.dark.png";

/// A query understood by the mail plugin.
#[derive(Debug, Clone, PartialEq)]
pub enum MailCommand {
    /// `mail start [timer]`. `raw_timer` keeps the token so the launched
    /// action can parse it again.
    Start {
        timer: Option<Duration>,
        raw_timer: Option<String>,
    },
    /// `mail stop [token]`
    Stop { token: Option<String> },
    None,
}

/// Split `query` on whitespace and recognise the `mail start|stop` grammar.
pub fn parse_command(query: &str) -> MailCommand {
    let parts: Vec<&str> = query.split_whitespace().collect();
    if parts.len() < 2 || !parts[0].eq_ignore_ascii_case("mail") {
        return MailCommand::None;
    }
    tracing::info!("mail command detected: '{query}'");
    let third = parts.get(2).map(|s| s.to_string());
    match parts[1].to_lowercase().as_str() {
        "start" => {
            let timer = third.as_deref().and_then(|raw| {
                tracing::info!("timer parameter received: '{raw}'");
                parse_timer(raw)
            });
            MailCommand::Start {
                timer,
                raw_timer: third,
            }
        }
        "stop" => MailCommand::Stop { token: third },
        _ => MailCommand::None,
    }
}

pub fn icon_for_theme(theme: Theme) -> &'static str {
    match theme {
        Theme::Light | Theme::HighContrastWhite => LIGHT_ICON,
        _ => DARK_ICON,
    }
}

pub struct MailPlugin {
    icon: Mutex<&'static str>,
    config_dir: PathBuf,
}

impl MailPlugin {
    /// Plugin reading `mailconfig.json` from `config_dir`.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            icon: Mutex::new(DARK_ICON),
            config_dir: config_dir.into(),
        }
    }

    pub fn icon_path(&self) -> &'static str {
        *self.icon.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_theme(&self, theme: Theme) {
        *self.icon.lock().unwrap_or_else(|e| e.into_inner()) = icon_for_theme(theme);
    }

    fn result(&self, query: &str, label: &str, desc: String, action: String) -> Action {
        Action {
            label: label.into(),
            desc,
            action,
            icon: Some(self.icon_path().into()),
            query_text: Some(query.into()),
            ..Default::default()
        }
    }
}

impl Default for MailPlugin {
    fn default() -> Self {
        Self::new(crate::common::plugin_dir())
    }
}

impl Plugin for MailPlugin {
    fn search(&self, query: &str) -> Vec<Action> {
        tracing::info!("query invoked: '{query}'");
        let cfg = MailConfig::load(&self.config_dir);
        match parse_command(query) {
            MailCommand::Start { timer, raw_timer } => {
                let mut desc = "Send start notification via Outlook".to_string();
                if let Some(t) = timer {
                    desc.push_str(&format!(" (timer {})", format_timer(t)));
                }
                let action = match (timer, raw_timer) {
                    (Some(_), Some(raw)) => format!("mail:start:{raw}"),
                    _ => "mail:start".into(),
                };
                tracing::debug!(recipients = cfg.recipients.len(), "start mail result");
                vec![self.result(query, "Send start mail", desc, action)]
            }
            MailCommand::Stop { token } => {
                let action = match token {
                    Some(t) => format!("mail:stop:{t}"),
                    None => "mail:stop".into(),
                };
                tracing::debug!(recipients = cfg.recipients.len(), "stop mail result");
                vec![self.result(
                    query,
                    "Send stop mail",
                    "Send stop notification via Outlook".into(),
                    action,
                )]
            }
            MailCommand::None => {
                let mut action = self.result(
                    query,
                    &format!("Title: {query}"),
                    "SubTitle".into(),
                    format!("clipboard:{query}"),
                );
                action.context = Some(query.into());
                vec![action]
            }
        }
    }

    fn name(&self) -> &str {
        "mail"
    }

    fn context_menu(&self, action: &Action) -> Vec<ContextMenuEntry> {
        let Some(text) = action.context.as_deref() else {
            return Vec::new();
        };
        vec![ContextMenuEntry {
            plugin: self.name().into(),
            label: "Copy to clipboard (Ctrl+C)".into(),
            glyph: "\u{E8C8}".into(),
            font_family: "Segoe Fluent Icons,Segoe MDL2 Assets".into(),
            accelerator: Some("Ctrl+C".into()),
            action: Action {
                label: "Copy to clipboard".into(),
                desc: "Mail".into(),
                action: format!("clipboard:{text}"),
                ..Default::default()
            },
        }]
    }

    fn init(&self, ctx: &PluginContext) {
        self.set_theme(ctx.theme);
    }

    fn on_theme_changed(&self, _old: Theme, new: Theme) {
        tracing::debug!(theme = ?new, "theme changed");
        self.set_theme(new);
    }
}
