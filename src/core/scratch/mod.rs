mod builder;
mod settings;

pub use builder::{build_scratch_definition, OrgPreferences, ScratchDefinition};
pub use settings::{SettingsTable, ORG_PREFERENCES, SETTINGS_TABLES};
