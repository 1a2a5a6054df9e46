use tracing::{debug, warn};

use super::bucket::PackageTypeBucket;
use super::standard_value_sets::{STANDARD_VALUE_SET, STANDARD_VALUE_SETS};
use crate::core::catalog::{FlowVersionMap, MetadataMember};
use crate::core::fetch::{FetchFailure, FetchPhase, FetchedMetadata};

const VALUE_SET_TRANSLATION_MARKER: &str = "ValueSetTranslation";
const FLOW_TYPE: &str = "Flow";

/// Switches that change how members are bucketed.
#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    /// Drop members that come from an installed package.
    pub exclude_managed: bool,
}

/// Output of a merge pass.
#[derive(Debug, Default)]
pub struct MergeOutcome {
    pub bucket: PackageTypeBucket,
    /// Every call that failed during the run, in the order it was seen.
    pub failures: Vec<FetchFailure>,
    /// Records dropped for missing `type` or `fullName`.
    pub skipped: usize,
    /// Installed members dropped by `exclude_managed`.
    pub excluded: usize,
}

/// Fold every fetched stream into one [`PackageTypeBucket`].
pub fn merge(fetched: FetchedMetadata, options: &MergeOptions) -> MergeOutcome {
    let FetchedMetadata {
        foldered,
        unfoldered,
        flow_versions,
        mut failures,
        ..
    } = fetched;

    let mut merger = Merger {
        options,
        flow_versions: &flow_versions,
        outcome: MergeOutcome::default(),
    };

    let streams = [
        (FetchPhase::UnfolderedMembers, unfoldered),
        (FetchPhase::FolderedMembers, foldered),
    ];
    for (phase, slots) in streams {
        for slot in slots {
            let (_, members) = slot.settle(phase, &mut failures);
            for member in members {
                merger.absorb(member);
            }
        }
    }

    let mut outcome = merger.outcome;
    outcome
        .bucket
        .extend(STANDARD_VALUE_SET, STANDARD_VALUE_SETS.iter());
    outcome.failures = failures;

    debug!(
        "Merged {} members across {} types ({} skipped, {} managed excluded)",
        outcome.bucket.member_count(),
        outcome.bucket.len(),
        outcome.skipped,
        outcome.excluded
    );
    outcome
}

struct Merger<'a> {
    options: &'a MergeOptions,
    flow_versions: &'a FlowVersionMap,
    outcome: MergeOutcome,
}

impl Merger<'_> {
    fn absorb(&mut self, member: MetadataMember) {
        let reported_type = member.member_type.as_deref().filter(|t| !t.is_empty());
        let full_name = member.full_name.as_deref().filter(|n| !n.is_empty());
        let (Some(reported_type), Some(full_name)) = (reported_type, full_name) else {
            warn!("Skipping malformed metadata record: {:?}", member);
            self.outcome.skipped += 1;
            return;
        };

        if self.options.exclude_managed && member.is_installed() {
            self.outcome.excluded += 1;
            return;
        }

        let type_name = effective_type(reported_type, member.file_name.as_deref());
        let identifier = match self.flow_versions.get(full_name) {
            Some(version) if type_name == FLOW_TYPE => format!("{}-{}", full_name, version),
            _ => full_name.to_string(),
        };

        self.outcome.bucket.insert(&type_name, &identifier);
    }
}

/// Type a member is bucketed under.
///
/// Value set translations are reported under a generic type; their real type
/// is the file extension, e.g. `standardValueSetTranslations/X-de.standardValueSetTranslation`
/// belongs to `StandardValueSetTranslation`.
pub fn effective_type(reported_type: &str, file_name: Option<&str>) -> String {
    let Some(file_name) = file_name.filter(|f| f.contains(VALUE_SET_TRANSLATION_MARKER)) else {
        return reported_type.to_string();
    };

    match file_name.split('.').nth(1).and_then(capitalize) {
        Some(derived) => derived,
        None => {
            warn!(
                "Cannot derive translation type from '{}', keeping {}",
                file_name, reported_type
            );
            reported_type.to_string()
        }
    }
}

fn capitalize(segment: &str) -> Option<String> {
    let mut chars = segment.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{ListQuery, Listing, ManageableState};
    use crate::core::error::HydrateError;
    use crate::core::fetch::BatchSlot;

    fn ok_slot(query: ListQuery, members: Vec<MetadataMember>) -> BatchSlot {
        BatchSlot {
            query,
            outcome: Ok(Listing::from_records(members)),
        }
    }

    fn members_of(outcome: &MergeOutcome, type_name: &str) -> Vec<String> {
        outcome
            .bucket
            .members(type_name)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    #[test]
    fn duplicate_members_across_calls_collapse() {
        let fetched = FetchedMetadata {
            unfoldered: vec![ok_slot(
                ListQuery::unfoldered("ApexClass"),
                vec![
                    MetadataMember::new("ApexClass", "A"),
                    MetadataMember::new("ApexClass", "B"),
                ],
            )],
            foldered: vec![ok_slot(
                ListQuery::in_folder("ApexClass", "odd"),
                vec![MetadataMember::new("ApexClass", "A")],
            )],
            ..Default::default()
        };
        let outcome = merge(fetched, &MergeOptions::default());
        assert_eq!(members_of(&outcome, "ApexClass"), vec!["A", "B"]);
    }

    #[test]
    fn installed_members_dropped_only_when_excluding() {
        let slot = || {
            ok_slot(
                ListQuery::unfoldered("ApexClass"),
                vec![
                    MetadataMember::new("ApexClass", "ns__Managed")
                        .with_state(ManageableState::Installed),
                    MetadataMember::new("ApexClass", "Local")
                        .with_state(ManageableState::Unmanaged),
                    MetadataMember::new("ApexClass", "ns__Editable")
                        .with_state(ManageableState::InstalledEditable),
                ],
            )
        };

        let kept = merge(
            FetchedMetadata {
                unfoldered: vec![slot()],
                ..Default::default()
            },
            &MergeOptions::default(),
        );
        assert_eq!(members_of(&kept, "ApexClass").len(), 3);

        let excluded = merge(
            FetchedMetadata {
                unfoldered: vec![slot()],
                ..Default::default()
            },
            &MergeOptions {
                exclude_managed: true,
            },
        );
        assert_eq!(
            members_of(&excluded, "ApexClass"),
            vec!["Local", "ns__Editable"]
        );
        assert_eq!(excluded.excluded, 1);
    }

    #[test]
    fn value_set_translations_rebucketed_by_file_extension() {
        let fetched = FetchedMetadata {
            unfoldered: vec![ok_slot(
                ListQuery::unfoldered("StandardValueSetTranslation"),
                vec![
                    MetadataMember::new("Translations", "Colors-fr").with_file_name(
                        "globalValueSetTranslations/Colors-fr.globalValueSetTranslation",
                    ),
                    MetadataMember::new("StandardValueSetTranslation", "LeadSource-de")
                        .with_file_name(
                            "standardValueSetTranslations/LeadSource-de.standardValueSetTranslation",
                        ),
                ],
            )],
            ..Default::default()
        };
        let outcome = merge(fetched, &MergeOptions::default());
        assert_eq!(members_of(&outcome, "GlobalValueSetTranslation"), vec!["Colors-fr"]);
        assert_eq!(
            members_of(&outcome, "StandardValueSetTranslation"),
            vec!["LeadSource-de"]
        );
        assert!(!outcome.bucket.contains_type("Translations"));
    }

    #[test]
    fn effective_type_falls_back_without_extension() {
        assert_eq!(
            effective_type("Translations", Some("noExtensionValueSetTranslation")),
            "Translations"
        );
        assert_eq!(effective_type("ApexClass", Some("classes/A.cls")), "ApexClass");
        assert_eq!(effective_type("ApexClass", None), "ApexClass");
    }

    #[test]
    fn active_flows_carry_version_suffix() {
        let mut flow_versions = FlowVersionMap::new();
        flow_versions.insert("Onboard".into(), 4);
        flow_versions.insert("MyClass".into(), 9);

        let fetched = FetchedMetadata {
            unfoldered: vec![
                ok_slot(
                    ListQuery::unfoldered("Flow"),
                    vec![
                        MetadataMember::new("Flow", "Onboard"),
                        MetadataMember::new("Flow", "Retired"),
                    ],
                ),
                ok_slot(
                    ListQuery::unfoldered("ApexClass"),
                    vec![MetadataMember::new("ApexClass", "MyClass")],
                ),
            ],
            flow_versions,
            ..Default::default()
        };
        let outcome = merge(fetched, &MergeOptions::default());
        assert_eq!(members_of(&outcome, "Flow"), vec!["Onboard-4", "Retired"]);
        assert_eq!(members_of(&outcome, "ApexClass"), vec!["MyClass"]);
    }

    #[test]
    fn malformed_records_are_skipped() {
        let fetched = FetchedMetadata {
            unfoldered: vec![ok_slot(
                ListQuery::unfoldered("ApexClass"),
                vec![
                    MetadataMember {
                        full_name: Some("NoType".into()),
                        ..Default::default()
                    },
                    MetadataMember::new("ApexClass", ""),
                    MetadataMember::new("ApexClass", "Good"),
                ],
            )],
            ..Default::default()
        };
        let outcome = merge(fetched, &MergeOptions::default());
        assert_eq!(outcome.skipped, 2);
        assert_eq!(members_of(&outcome, "ApexClass"), vec!["Good"]);
    }

    #[test]
    fn standard_value_sets_survive_total_failure() {
        let failed = |query: ListQuery| BatchSlot {
            query,
            outcome: Err(HydrateError::Other("down".into())),
        };
        let fetched = FetchedMetadata {
            unfoldered: vec![failed(ListQuery::unfoldered("ApexClass"))],
            foldered: vec![failed(ListQuery::in_folder("Report", "Sales"))],
            failures: vec![FetchFailure {
                phase: FetchPhase::FlowVersions,
                target: "FlowDefinition".into(),
                message: "down".into(),
            }],
            ..Default::default()
        };
        let outcome = merge(fetched, &MergeOptions::default());

        assert_eq!(outcome.bucket.len(), 1);
        assert_eq!(members_of(&outcome, STANDARD_VALUE_SET), STANDARD_VALUE_SETS);
        assert_eq!(outcome.failures.len(), 3);
    }

    #[test]
    fn reported_standard_value_sets_are_not_duplicated() {
        let fetched = FetchedMetadata {
            unfoldered: vec![ok_slot(
                ListQuery::unfoldered(STANDARD_VALUE_SET),
                vec![MetadataMember::new(STANDARD_VALUE_SET, "LeadSource")],
            )],
            ..Default::default()
        };
        let outcome = merge(fetched, &MergeOptions::default());
        assert_eq!(
            members_of(&outcome, STANDARD_VALUE_SET).len(),
            STANDARD_VALUE_SETS.len()
        );
    }
}
