use indexmap::IndexMap;
use serde::Deserialize;

/// Config key of a shortcut, also used as the key in the usage cache.
pub type EntryId = String;

/// Shortcuts in the order they appear in the config file.
pub type EntryMapping = IndexMap<EntryId, EntryDefinition>;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EntryDefinition {
    pub description: String,   // Text shown in the menu
    pub binary: String,        // Executable name or path
    #[serde(default)]
    pub args: Option<EntryArgs>,
    #[serde(default = "default_icon")]
    pub icon: String,          // Icon name or path
}

fn default_icon() -> String { "default".to_string() }

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum EntryArgs {
    Single(String),
    List(Vec<String>),
}

impl EntryArgs {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            EntryArgs::Single(arg) => vec![arg.clone()],
            EntryArgs::List(args) => args.clone(),
        }
    }
}

impl EntryDefinition {
    pub fn new(description: &str, binary: &str) -> Self {
        Self {
            description: description.to_string(),
            binary: binary.to_string(),
            args: None,
            icon: default_icon(),
        }
    }
}
