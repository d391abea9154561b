//! mounch: a menu launcher for a hand-written list of shortcuts.
//!
//! Entries come from a TOML file, are shown through rofi or wofi with the most
//! used ones on top, and the chosen one replaces the launcher process.
//!
//! The config lives at `~/.config/mounch/mounch.toml`. Configs written for the
//! YAML `mounch.yaml` map one-to-one: every top-level key becomes a table.
//!
//! ```toml
//! [suspend]
//! description = "Suspend"
//! binary = "systemctl"
//! args = "suspend"
//! icon = "system-suspend-hibernate"
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod history;
pub mod icons;
pub mod launcher;
pub mod menu;
pub mod model;
