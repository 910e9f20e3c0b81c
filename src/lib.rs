pub mod actions;
pub mod common;
pub mod launcher;
pub mod logging;
pub mod notify;
pub mod plugin;
pub mod plugins;
pub mod rpc;
pub mod settings;
