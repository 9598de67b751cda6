pub mod calculator;
pub mod config;
pub mod contract;
pub mod dispatch;
pub mod hotkey;
pub mod hotkey_runtime;
pub mod icon_cache;
pub mod interpreters;
pub mod keymap;
pub mod launch;
pub mod logging;
pub mod model;
pub mod recorder;
pub mod registry_apps;
pub mod runtime;
pub mod search;
pub mod search_worker;
pub mod settings;
pub mod shell;
pub mod startup;
pub mod suggestions;
pub mod system_commands;
pub mod text_ops;
pub mod transport;
pub mod usage_store;
pub mod web_search;
