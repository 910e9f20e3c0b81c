use anyhow::Context;
use serde::{Deserialize, Deserializer};
use std::path::Path;

pub const MAIL_CONFIG_FILE: &str = "mailconfig.json";

/// Recipients and message templates for the start/stop mails.
///
/// Keys in `mailconfig.json` are matched case-insensitively, so both
/// `SubjectPrefix` and `subjectprefix` work.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    #[serde(rename = "recipients", deserialize_with = "null_as_empty")]
    pub recipients: Vec<String>,
    #[serde(rename = "subjectprefix")]
    pub subject_prefix: String,
    #[serde(rename = "startbody")]
    pub start_body: String,
    #[serde(rename = "stopbody")]
    pub stop_body: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            recipients: Vec::new(),
            subject_prefix: "Notification".into(),
            start_body: "Start notification".into(),
            stop_body: "Stop notification".into(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl MailConfig {
    /// Load `mailconfig.json` from `dir`, falling back to the defaults when
    /// the file is missing or cannot be parsed.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(MAIL_CONFIG_FILE);
        tracing::info!("loading mail config from {}", path.display());
        if !path.exists() {
            tracing::info!("{MAIL_CONFIG_FILE} not found, using defaults");
            return Self::default();
        }
        match Self::read(&path) {
            Ok(cfg) => {
                tracing::info!(
                    "{MAIL_CONFIG_FILE} loaded, recipients={}",
                    cfg.recipients.len()
                );
                cfg
            }
            Err(e) => {
                tracing::error!("failed to load {MAIL_CONFIG_FILE}, using defaults: {e:#}");
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read mail config {}", path.display()))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        let serde_json::Value::Object(map) = value else {
            anyhow::bail!("mail config must be a JSON object");
        };
        let lowered: serde_json::Map<String, serde_json::Value> = map
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        Ok(serde_json::from_value(serde_json::Value::Object(lowered))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_case_insensitive() {
        let cfg = MailConfig::from_json(
            r#"{"Recipients":["a@x.org","b@x.org"],"SUBJECTPREFIX":"Shift","startBody":"in"}"#,
        )
        .unwrap();
        assert_eq!(cfg.recipients, vec!["a@x.org", "b@x.org"]);
        assert_eq!(cfg.subject_prefix, "Shift");
        assert_eq!(cfg.start_body, "in");
        assert_eq!(cfg.stop_body, "Stop notification");
    }

    #[test]
    fn null_recipients_become_empty() {
        let cfg = MailConfig::from_json(r#"{"Recipients":null}"#).unwrap();
        assert!(cfg.recipients.is_empty());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let cfg = MailConfig::from_json(r#"{"Smtp":"mail.example.org"}"#).unwrap();
        assert_eq!(cfg, MailConfig::default());
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(MailConfig::from_json("[1, 2]").is_err());
        assert!(MailConfig::from_json(r#"{"Recipients":"a@x.org"}"#).is_err());
    }
}
