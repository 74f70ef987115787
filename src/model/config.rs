use serde::{Deserialize, Serialize};

use super::roommate::{Roommate, Roster};

/// Configuration from roost.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdConfig {
    pub household: HouseholdInfo,
    #[serde(default)]
    pub storage: StorageConfig,
    /// Custom roster. Empty means the built-in roster.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roommates: Vec<RoommateConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdInfo {
    pub name: String,
    /// Roommate id of the local user
    #[serde(default = "default_current_user")]
    pub current_user: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Replace the task list with the sample tasks on every load
    #[serde(default = "default_true")]
    pub reseed_tasks: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig { reseed_tasks: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoommateConfig {
    pub id: u32,
    pub name: String,
    pub initials: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_current_user() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_color() -> String {
    "#667eea".to_string()
}

impl HouseholdConfig {
    /// Configured roster, or the built-in one when none is configured.
    pub fn roster(&self) -> Roster {
        if self.roommates.is_empty() {
            return crate::store::seed::default_roster();
        }
        Roster::new(
            self.roommates
                .iter()
                .map(|r| Roommate::new(r.id, &r.name, &r.initials, &r.color))
                .collect(),
        )
    }
}
