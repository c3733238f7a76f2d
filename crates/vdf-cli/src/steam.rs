//! Steam install layout: where `shortcuts.vdf` lives and whose it is.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_STEAM_DIR: &str = "C:/Program Files (x86)/Steam";

/// `<steam>/userdata/<user_id>/config/shortcuts.vdf`
pub fn shortcuts_path(steam_dir: &Path, user_id: &str) -> PathBuf {
    steam_dir
        .join("userdata")
        .join(user_id)
        .join("config")
        .join("shortcuts.vdf")
}

/// Use `explicit` if given, otherwise the only user directory under
/// `<steam>/userdata`. Zero or several candidates is an error.
pub fn resolve_user_id(steam_dir: &Path, explicit: Option<String>) -> Result<String> {
    if let Some(id) = explicit {
        return Ok(id);
    }
    let mut ids = find_user_ids(steam_dir)?;
    if ids.len() == 1 {
        let id = ids.remove(0);
        tracing::debug!(user_id = %id, "discovered steam user");
        return Ok(id);
    }
    bail!(
        "Could not automatically get steam user ID (found user IDs: {:?})",
        ids
    );
}

/// Names of the directories in `<steam>/userdata`, sorted.
pub fn find_user_ids(steam_dir: &Path) -> Result<Vec<String>> {
    let userdata = steam_dir.join("userdata");
    let entries = std::fs::read_dir(&userdata)
        .with_context(|| format!("Failed to list {}", userdata.display()))?;

    let mut ids = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", userdata.display()))?;
        if entry.file_type()?.is_dir() {
            ids.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    ids.sort();
    Ok(ids)
}

/// `shortcuts.json` → `shortcuts.json.vdf`
pub fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(extension);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steam_with_users(users: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("userdata")).unwrap();
        for user in users {
            std::fs::create_dir_all(dir.path().join("userdata").join(user)).unwrap();
        }
        dir
    }

    #[test]
    fn explicit_user_wins() {
        let steam = steam_with_users(&["111", "222"]);
        let id = resolve_user_id(steam.path(), Some("333".to_string())).unwrap();
        assert_eq!(id, "333");
    }

    #[test]
    fn single_user_is_discovered() {
        let steam = steam_with_users(&["12345"]);
        assert_eq!(resolve_user_id(steam.path(), None).unwrap(), "12345");
    }

    #[test]
    fn files_are_not_users() {
        let steam = steam_with_users(&["12345"]);
        std::fs::write(steam.path().join("userdata").join("notes.txt"), "x").unwrap();
        assert_eq!(resolve_user_id(steam.path(), None).unwrap(), "12345");
    }

    #[test]
    fn several_users_is_an_error() {
        let steam = steam_with_users(&["222", "111"]);
        let err = resolve_user_id(steam.path(), None).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"Could not automatically get steam user ID (found user IDs: ["111", "222"])"#
        );
    }

    #[test]
    fn no_users_is_an_error() {
        let steam = steam_with_users(&[]);
        let err = resolve_user_id(steam.path(), None).unwrap_err();
        assert!(err.to_string().contains("found user IDs: []"));
    }

    #[test]
    fn missing_userdata_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_user_id(dir.path(), None).unwrap_err();
        assert!(err.to_string().contains("Failed to list"));
    }

    #[test]
    fn shortcuts_path_layout() {
        let path = shortcuts_path(Path::new("/steam"), "42");
        assert_eq!(path, Path::new("/steam/userdata/42/config/shortcuts.vdf"));
    }

    #[test]
    fn append_extension_keeps_existing_one() {
        assert_eq!(
            append_extension(Path::new("dir/shortcuts.json"), "vdf"),
            Path::new("dir/shortcuts.json.vdf")
        );
    }
}
