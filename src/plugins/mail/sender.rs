use anyhow::Context;
use chrono::{DateTime, Local};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::config::MailConfig;

pub const MAIL_SCRIPT_FILE: &str = "sendmail.ps1";
pub const POWERSHELL: &str = "powershell.exe";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailKind {
    Start,
    Stop,
}

impl MailKind {
    fn marker(self) -> &'static str {
        match self {
            MailKind::Start => "start",
            MailKind::Stop => "stop",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mail {
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
}

impl Mail {
    /// Build the start or stop mail for `now`. `token` is the optional third
    /// query token of `mail stop`; it is appended to the stop body as is.
    pub fn compose(
        cfg: &MailConfig,
        kind: MailKind,
        token: Option<&str>,
        now: DateTime<Local>,
    ) -> Self {
        let subject = format!(
            "{} {} {}",
            cfg.subject_prefix,
            now.format("%d/%m/%Y"),
            kind.marker()
        );
        let body = match (kind, token) {
            (MailKind::Start, _) => cfg.start_body.clone(),
            (MailKind::Stop, Some(t)) if !t.is_empty() => format!("{} - {t}", cfg.stop_body),
            (MailKind::Stop, _) => cfg.stop_body.clone(),
        };
        Self {
            recipients: cfg.recipients.clone(),
            subject,
            body,
        }
    }

    pub fn joined_recipients(&self) -> String {
        self.recipients.join(";")
    }
}

/// Hands mails to the external `sendmail.ps1` script.
#[derive(Debug, Clone)]
pub struct MailSender {
    program: OsString,
    script: PathBuf,
}

impl MailSender {
    pub fn new(program: impl Into<OsString>, script: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            script: script.into(),
        }
    }

    /// PowerShell running the script shipped in `dir`.
    pub fn colocated(dir: &Path) -> Self {
        Self::new(POWERSHELL, dir.join(MAIL_SCRIPT_FILE))
    }

    pub fn script(&self) -> &Path {
        &self.script
    }

    /// Arguments passed to the interpreter. Each value is its own argument so
    /// quotes inside recipients, subject or body cannot split it.
    pub fn args(&self, mail: &Mail) -> Vec<OsString> {
        vec![
            "-NoProfile".into(),
            "-ExecutionPolicy".into(),
            "Bypass".into(),
            "-File".into(),
            self.script.clone().into_os_string(),
            "-To".into(),
            mail.joined_recipients().into(),
            "-Subject".into(),
            mail.subject.clone().into(),
            "-Body".into(),
            mail.body.clone().into(),
        ]
    }

    fn command(&self, mail: &Mail) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args(mail));
        #[cfg(target_os = "windows")]
        {
            use std::os::windows::process::CommandExt;
            cmd.creation_flags(0x08000000); // CREATE_NO_WINDOW
        }
        cmd
    }

    /// Run the script and wait for it to exit. Blocks until the script is done.
    pub fn send(&self, mail: &Mail) -> anyhow::Result<()> {
        if !self.script.exists() {
            anyhow::bail!("{MAIL_SCRIPT_FILE} not found at {}", self.script.display());
        }
        tracing::info!(
            "sending mail to '{}' subject='{}'",
            mail.joined_recipients(),
            mail.subject
        );
        let output = self
            .command(mail)
            .output()
            .with_context(|| format!("spawn {}", self.program.to_string_lossy()))?;
        if output.status.success() {
            tracing::info!("mail sent successfully");
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "mail script exited with {}: {}",
                output.status,
                stderr.trim()
            )
        }
    }
}
