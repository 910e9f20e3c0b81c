use serde::{Deserialize, Serialize};

/// A single result handed to the host.
///
/// `label` and `desc` are the title and subtitle shown by the launcher while
/// `action` encodes what happens when the result is invoked (see
/// [`crate::launcher::parse_action_kind`]).
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Action {
    pub label: String,
    pub desc: String,
    pub action: String,
    /// Icon path relative to the plugin directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Text the host shows in the search box when the result is selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_text: Option<String>,
    /// Opaque data passed back to the plugin when building context menus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

pub mod clipboard;
pub mod mail;
