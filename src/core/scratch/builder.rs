use futures_util::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use super::settings::{SettingsTable, ORG_PREFERENCES, SETTINGS_TABLES};
use crate::core::catalog::{field, MetadataCatalog, QueryRecord};
use crate::core::error::HydrateResult;

const ORGANIZATION_QUERY: &str = "SELECT Name, OrganizationType FROM Organization";
const ORG_PREFERENCE_QUERY: &str = "SELECT Metadata FROM OrgPreferenceSettings";
const DESCRIPTION: &str = "Created by the sfdx-hydrate plugin";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrgPreferences {
    pub enabled: Vec<String>,
    pub disabled: Vec<String>,
}

impl OrgPreferences {
    fn record(&mut self, preference: &str, on: bool) {
        if on {
            self.enabled.push(preference.to_string());
        } else {
            self.disabled.push(preference.to_string());
        }
    }
}

/// Scratch org definition file (`project-scratch-def.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScratchDefinition {
    pub org_name: String,
    pub edition: String,
    pub description: String,
    pub features: Vec<String>,
    pub org_preferences: OrgPreferences,
}

impl Default for ScratchDefinition {
    fn default() -> Self {
        Self {
            org_name: "My Company".to_string(),
            edition: "Enterprise".to_string(),
            description: DESCRIPTION.to_string(),
            features: Vec::new(),
            org_preferences: OrgPreferences::default(),
        }
    }
}

impl ScratchDefinition {
    pub fn to_json(&self) -> HydrateResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn edition_for(organization_type: &str) -> Option<&'static str> {
    match organization_type {
        "Enterprise Edition" => Some("Enterprise"),
        "Developer Edition" => Some("Developer"),
        _ => None,
    }
}

/// Read org identity and settings, all queries in flight at once.
///
/// Query failures never fail the build: identity falls back to defaults and
/// a failed settings query leaves its preferences disabled.
pub async fn build_scratch_definition<C: MetadataCatalog + ?Sized>(
    catalog: &C,
) -> ScratchDefinition {
    let settings = join_all(SETTINGS_TABLES.iter().map(|table| async move {
        (table, catalog.tooling_query(&table.query()).await)
    }));

    let (organization, org_preferences, settings) = tokio::join!(
        catalog.query(ORGANIZATION_QUERY),
        catalog.tooling_query(ORG_PREFERENCE_QUERY),
        settings,
    );

    let mut definition = ScratchDefinition::default();

    match organization {
        Ok(records) => match records.first() {
            Some(org) => apply_organization(&mut definition, org),
            None => warn!("Organization query returned no rows"),
        },
        Err(e) => warn!("Organization query failed: {}", e),
    }

    let preference_metadata = match org_preferences {
        Ok(records) => records.first().and_then(|r| field(r, "Metadata")).cloned(),
        Err(e) => {
            warn!("OrgPreferenceSettings query failed: {}", e);
            None
        }
    };
    apply_org_preferences(&mut definition.org_preferences, preference_metadata.as_ref());

    for (table, result) in settings {
        let metadata = match result {
            Ok(records) => records.first().and_then(|r| field(r, "Metadata")).cloned(),
            Err(e) => {
                warn!("{} query failed: {}", table.object, e);
                None
            }
        };
        apply_settings(&mut definition.org_preferences, table, metadata.as_ref());
    }

    info!(
        "Scratch definition: {} enabled, {} disabled preferences",
        definition.org_preferences.enabled.len(),
        definition.org_preferences.disabled.len()
    );
    definition
}

fn apply_organization(definition: &mut ScratchDefinition, org: &QueryRecord) {
    if let Some(name) = field(org, "Name").and_then(|v| v.as_str()) {
        definition.org_name = name.to_string();
    }
    if let Some(org_type) = field(org, "OrganizationType").and_then(|v| v.as_str()) {
        match edition_for(org_type) {
            Some(edition) => definition.edition = edition.to_string(),
            None => warn!("No scratch edition for '{}', keeping {}", org_type, definition.edition),
        }
    }
}

fn apply_org_preferences(prefs: &mut OrgPreferences, metadata: Option<&serde_json::Value>) {
    let values: Vec<(&str, bool)> = metadata
        .and_then(|m| m.get("preferences"))
        .and_then(|p| p.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let name = item.get("settingName")?.as_str()?;
                    let on = item.get("settingValue").and_then(|v| v.as_bool());
                    Some((name, on.unwrap_or(false)))
                })
                .collect()
        })
        .unwrap_or_default();

    for preference in ORG_PREFERENCES {
        let on = values
            .iter()
            .any(|(name, on)| name == preference && *on);
        prefs.record(preference, on);
    }
}

fn apply_settings(
    prefs: &mut OrgPreferences,
    table: &SettingsTable,
    metadata: Option<&serde_json::Value>,
) {
    for (preference, metadata_field) in table.preferences {
        let on = metadata
            .and_then(|m| m.get(*metadata_field))
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        prefs.record(preference, on);
    }
}
