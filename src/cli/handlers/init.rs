use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::commands::InitArgs;
use crate::io::config_io::{self, CONFIG_FILE, DATA_DIR, ROOST_DIR};
use crate::model::config::HouseholdConfig;

const ROOST_TOML_TEMPLATE: &str = r##"[household]
name = {name}
# Roommate id of the person using this copy
current_user = 1

[storage]
# Replace the task list with the sample chores on every start.
# Set to false to keep your own tasks between runs.
reseed_tasks = true

# --- Roster ---
# Leave commented to use the built-in five-person roster.
# Expenses refer to roommates by name, so names must be unique.
#
# [[roommates]]
# id = 1
# name = "Janvi Chauhan"
# initials = "JC"
# color = "#356496"
"##;

/// Infer a household name from a directory name: replace hyphens with
/// spaces, title-case.
fn infer_name(dir_name: &str) -> String {
    dir_name
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    upper + &chars.collect::<String>()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_roost_toml(name: &str) -> String {
    let quoted = toml::Value::String(name.to_string()).to_string();
    ROOST_TOML_TEMPLATE.replace("{name}", &quoted)
}

pub fn cmd_init(args: InitArgs, dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let root: PathBuf = match dir {
        Some(d) => PathBuf::from(d),
        None => std::env::current_dir()?,
    };
    let roost_dir = root.join(ROOST_DIR);

    if roost_dir.is_dir() {
        return Err(format!("household already exists in {}", roost_dir.display()).into());
    }

    if let Some(parent) = root.parent()
        && let Ok(parent_root) = config_io::discover_household(parent)
    {
        eprintln!(
            "Note: parent household found at {}/",
            parent_root.join(ROOST_DIR).display()
        );
        eprintln!("Creating new household in {}/", roost_dir.display());
    }

    let name = args.name.unwrap_or_else(|| dir_name(&root));
    let text = render_roost_toml(&name);
    // Nothing is created unless the rendered config reads back cleanly
    let config: HouseholdConfig = toml::from_str(&text)?;
    config_io::validate_config(&config)?;

    fs::create_dir_all(roost_dir.join(DATA_DIR))?;
    fs::write(roost_dir.join(CONFIG_FILE), text)?;

    tracing::info!(path = %roost_dir.display(), "household initialized");
    println!("Initialized household: {}", name);
    Ok(())
}

fn dir_name(root: &Path) -> String {
    root.file_name()
        .and_then(|n| n.to_str())
        .map(infer_name)
        .unwrap_or_else(|| "Home".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_infer_name() {
        assert_eq!(infer_name("maple-street"), "Maple Street");
        assert_eq!(infer_name("roost"), "Roost");
    }

    #[test]
    fn template_parses_with_defaults() {
        let text = render_roost_toml("Maple \"Street\"");
        let config: HouseholdConfig = toml::from_str(&text).unwrap();
        assert_eq!(config.household.name, "Maple \"Street\"");
        assert_eq!(config.household.current_user, 1);
        assert!(config.storage.reseed_tasks);
        assert!(config.roommates.is_empty());
    }

    #[test]
    fn template_escapes_backslashes() {
        let text = render_roost_toml("Flat\\Q");
        let config: HouseholdConfig = toml::from_str(&text).unwrap();
        assert_eq!(config.household.name, "Flat\\Q");
    }

    #[test]
    fn odd_names_initialize_and_read_back() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().to_str().unwrap();
        cmd_init(InitArgs { name: Some("Flat\\Q \"2\"".into()) }, Some(dir)).unwrap();
        let config = config_io::read_config(&tmp.path().join(ROOST_DIR)).unwrap();
        assert_eq!(config.household.name, "Flat\\Q \"2\"");
    }

    #[test]
    fn init_creates_layout_and_refuses_twice() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().to_str().unwrap();
        cmd_init(InitArgs { name: Some("Maple".into()) }, Some(dir)).unwrap();
        assert!(tmp.path().join(ROOST_DIR).join(CONFIG_FILE).exists());
        assert!(tmp.path().join(ROOST_DIR).join(DATA_DIR).is_dir());

        let err = cmd_init(InitArgs { name: None }, Some(dir)).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
