//! Line-delimited JSON binding between the launcher host and the plugins.
//!
//! Every line on stdin is one request, `{"id": .., "method": .., "params": ..}`.
//! Requests carrying an `id` get exactly one response line, either
//! `{"id": .., "result": ..}` or `{"id": .., "error": ".."}`. Requests
//! without an `id` are notifications and get no answer.

use crate::actions::Action;
use crate::launcher::Launcher;
use crate::plugin::{PluginContext, PluginManager, Theme};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{BufRead, Write};

#[derive(Debug, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub enum Outcome {
    #[serde(rename = "result")]
    Result(Value),
    #[serde(rename = "error")]
    Error(String),
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Response {
    pub id: Value,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Deserialize)]
struct QueryParams {
    #[serde(default)]
    search: Option<String>,
}

#[derive(Deserialize)]
struct ActionParams {
    action: Action,
}

#[derive(Deserialize)]
struct ThemeChangedParams {
    #[serde(default)]
    old: Theme,
    new: Theme,
}

fn params<T: serde::de::DeserializeOwned>(value: Value) -> anyhow::Result<T> {
    let value = if value.is_null() {
        Value::Object(Default::default())
    } else {
        value
    };
    Ok(serde_json::from_value(value)?)
}

pub struct Host {
    plugins: PluginManager,
    launcher: Launcher,
    disposed: bool,
}

impl Host {
    pub fn new(plugins: PluginManager, launcher: Launcher) -> Self {
        Self {
            plugins,
            launcher,
            disposed: false,
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn dispatch(&mut self, method: &str, raw: Value) -> anyhow::Result<Value> {
        match method {
            "init" => {
                let ctx: PluginContext = params(raw)?;
                self.plugins.init(&ctx);
                Ok(Value::Null)
            }
            "query" => {
                let p: QueryParams = params(raw)?;
                let results = self.plugins.search(p.search.as_deref().unwrap_or_default());
                Ok(serde_json::to_value(results)?)
            }
            "context_menu" => {
                let p: ActionParams = params(raw)?;
                Ok(serde_json::to_value(self.plugins.context_menu(&p.action))?)
            }
            "invoke" => {
                let p: ActionParams = params(raw)?;
                let ok = match self.launcher.launch_action(&p.action) {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::error!("action '{}' failed: {e:#}", p.action.action);
                        false
                    }
                };
                Ok(Value::Bool(ok))
            }
            "theme_changed" => {
                let p: ThemeChangedParams = params(raw)?;
                self.plugins.theme_changed(p.old, p.new);
                Ok(Value::Null)
            }
            "dispose" => {
                if !self.disposed {
                    self.plugins.dispose();
                    self.disposed = true;
                }
                Ok(Value::Null)
            }
            other => anyhow::bail!("unknown method '{other}'"),
        }
    }

    pub fn handle(&mut self, req: Request) -> Option<Response> {
        let outcome = match self.dispatch(&req.method, req.params) {
            Ok(v) => Outcome::Result(v),
            Err(e) => {
                tracing::error!("{} failed: {e:#}", req.method);
                Outcome::Error(format!("{e:#}"))
            }
        };
        req.id.map(|id| Response { id, outcome })
    }

    /// Handle one protocol line, returning the serialized response if any.
    pub fn handle_line(&mut self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let response = match serde_json::from_str::<Request>(line) {
            Ok(req) => self.handle(req)?,
            Err(e) => {
                tracing::warn!("malformed request: {e}");
                Response {
                    id: Value::Null,
                    outcome: Outcome::Error(format!("malformed request: {e}")),
                }
            }
        };
        match serde_json::to_string(&response) {
            Ok(s) => Some(s),
            Err(e) => {
                tracing::error!("failed to serialize response: {e}");
                None
            }
        }
    }

    /// Serve requests until `dispose` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line?;
            if let Some(out) = self.handle_line(&line) {
                writeln!(output, "{out}")?;
                output.flush()?;
            }
            if self.disposed {
                break;
            }
        }
        if !self.disposed {
            self.plugins.dispose();
            self.disposed = true;
        }
        Ok(())
    }
}
