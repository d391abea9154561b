use std::path::{Path, PathBuf};
use crate::config::expand_home;

/// Finds an icon file on disk for `icon`, which may be a path or a bare name.
///
/// Bare names are looked up as `<icon_dir>/<name>.png`. Returns `None` when only
/// the menu's icon theme could know about it.
pub fn resolve_icon(icon: &str, icon_dir: &Path) -> Option<PathBuf> {
    let path = expand_home(icon);
    if path.exists() {
        return Some(path);
    }

    let local = icon_dir.join(format!("{}.png", icon));
    if local.exists() {
        return Some(local);
    }
    None
}
