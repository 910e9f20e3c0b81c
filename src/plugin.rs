use crate::actions::Action;
use serde::{Deserialize, Serialize};

/// Colour scheme reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
    HighContrastOne,
    HighContrastTwo,
    HighContrastBlack,
    HighContrastWhite,
}

/// Data the host hands to a plugin when it is loaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginContext {
    #[serde(default)]
    pub theme: Theme,
}

/// An entry shown next to a selected result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextMenuEntry {
    pub plugin: String,
    pub label: String,
    pub glyph: String,
    pub font_family: String,
    /// Keyboard shortcut in `Modifier+Key` form, e.g. `Ctrl+C`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accelerator: Option<String>,
    pub action: Action,
}

pub trait Plugin: Send + Sync {
    /// Return actions based on the query string
    fn search(&self, query: &str) -> Vec<Action>;
    /// Name of the plugin
    fn name(&self) -> &str;
    /// Entries for the context menu of `action`, a result this plugin returned.
    fn context_menu(&self, _action: &Action) -> Vec<ContextMenuEntry> {
        Vec::new()
    }
    fn init(&self, _ctx: &PluginContext) {}
    fn on_theme_changed(&self, _old: Theme, _new: Theme) {}
    fn dispose(&self) {}
}

/// A manager that holds plugins
pub struct PluginManager {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginManager {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    pub fn init(&self, ctx: &PluginContext) {
        for p in &self.plugins {
            p.init(ctx);
        }
    }

    pub fn search(&self, query: &str) -> Vec<Action> {
        let mut actions = Vec::new();
        for p in &self.plugins {
            actions.extend(p.search(query));
        }
        actions
    }

    pub fn context_menu(&self, action: &Action) -> Vec<ContextMenuEntry> {
        let mut entries = Vec::new();
        for p in &self.plugins {
            entries.extend(p.context_menu(action));
        }
        entries
    }

    pub fn theme_changed(&self, old: Theme, new: Theme) {
        for p in &self.plugins {
            p.on_theme_changed(old, new);
        }
    }

    pub fn dispose(&self) {
        for p in &self.plugins {
            p.dispose();
        }
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}
