use log::{info, warn};
use crate::config::{load_entries, Paths};
use crate::error::LaunchError;
use crate::executor::LaunchPlan;
use crate::history::History;
use crate::icons::resolve_icon;
use crate::menu::{MenuLine, Picker};
use crate::model::{EntryId, EntryMapping};

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Cancelled,
    Launch(LaunchPlan),
}

pub fn menu_lines(entries: &EntryMapping, paths: &Paths) -> Vec<MenuLine> {
    entries
        .values()
        .map(|entry| MenuLine {
            description: entry.description.clone(),
            icon: entry.icon.clone(),
            icon_path: resolve_icon(&entry.icon, &paths.icon_dir),
        })
        .collect()
}

/// First entry whose description is exactly `choice`.
pub fn find_by_description<'a>(entries: &'a EntryMapping, choice: &str) -> Option<&'a EntryId> {
    entries
        .iter()
        .find(|(_, entry)| entry.description == choice)
        .map(|(id, _)| id)
}

/// Runs one launcher session up to the point of exec.
///
/// The chosen entry is counted and the cache written before its binary is
/// resolved, so a missing binary still shows up in the history.
pub fn run(paths: &Paths, picker: &dyn Picker) -> Result<Outcome, LaunchError> {
    let entries = load_entries(&paths.config_file)?;
    let mut history = History::load(&paths.cache_file, &entries)?;
    let entries = history.reorder(&entries);

    let Some(choice) = picker.pick(&menu_lines(&entries, paths))? else {
        info!("Menu closed without a selection");
        return Ok(Outcome::Cancelled);
    };

    let Some(id) = find_by_description(&entries, &choice) else {
        warn!("No entry matches {:?}", choice);
        return Ok(Outcome::Cancelled);
    };
    info!("Selected {}", id);

    history.record(id);
    history.save(&paths.cache_file)?;

    let plan = LaunchPlan::for_entry(&entries[id])?;
    Ok(Outcome::Launch(plan))
}
