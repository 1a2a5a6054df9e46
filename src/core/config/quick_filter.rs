use std::collections::HashSet;

use crate::core::error::ConfigError;

/// Predefined type-name sets selectable by name.
const REGISTRY: &[(&str, &[&str])] = &[
    (
        "apex",
        &[
            "ApexClass",
            "ApexComponent",
            "ApexPage",
            "ApexTrigger",
            "AuraDefinitionBundle",
            "LightningComponentBundle",
            "StaticResource",
        ],
    ),
    (
        "objects",
        &[
            "CustomObject",
            "CustomField",
            "ValidationRule",
            "RecordType",
            "ListView",
            "CompactLayout",
            "WebLink",
            "BusinessProcess",
            "FieldSet",
        ],
    ),
    (
        "security",
        &[
            "Profile",
            "PermissionSet",
            "Role",
            "Group",
            "Queue",
            "SharingRules",
            "CustomPermission",
        ],
    ),
    (
        "automation",
        &[
            "Flow",
            "FlowDefinition",
            "WorkflowRule",
            "WorkflowAlert",
            "WorkflowFieldUpdate",
            "AssignmentRules",
            "AutoResponseRules",
            "ApprovalProcess",
        ],
    ),
    (
        "ui",
        &[
            "Layout",
            "FlexiPage",
            "CustomTab",
            "CustomApplication",
            "QuickAction",
            "CustomLabels",
        ],
    ),
    ("reporting", &["Report", "ReportType", "Dashboard"]),
    (
        "values",
        &[
            "StandardValueSet",
            "GlobalValueSet",
            "StandardValueSetTranslation",
            "GlobalValueSetTranslation",
        ],
    ),
    ("email", &["EmailTemplate", "Letterhead"]),
];

/// Names of every predefined filter.
pub fn registry() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|(name, _)| *name)
}

/// Look up a predefined filter, ignoring case.
pub fn named_filter(name: &str) -> Option<&'static [&'static str]> {
    REGISTRY
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name.trim()))
        .map(|(_, types)| *types)
}

/// A quick filter as configured: literal type names, a registry name, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuickFilter {
    pub types: Vec<String>,
    pub named: Option<String>,
}

impl QuickFilter {
    pub fn types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
            named: None,
        }
    }

    pub fn named(name: &str) -> Self {
        Self {
            types: Vec::new(),
            named: Some(name.to_string()),
        }
    }

    /// Resolve into the allow-list used at render time.
    pub fn resolve(&self) -> Result<TypeFilter, ConfigError> {
        let mut allowed: HashSet<String> = self
            .types
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        if let Some(name) = &self.named {
            let types = named_filter(name).ok_or_else(|| ConfigError::UnknownFilter {
                name: name.clone(),
                known: registry().collect::<Vec<_>>().join(", "),
            })?;
            allowed.extend(types.iter().map(|t| t.to_string()));
        }

        Ok(TypeFilter { allowed })
    }
}

/// Allow-list over type names. Empty means everything passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeFilter {
    allowed: HashSet<String>,
}

impl TypeFilter {
    pub fn allow_all() -> Self {
        Self::default()
    }

    pub fn allows(&self, type_name: &str) -> bool {
        self.allowed.is_empty() || self.allowed.contains(type_name)
    }

    pub fn is_unrestricted(&self) -> bool {
        self.allowed.is_empty()
    }
}
