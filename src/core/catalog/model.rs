use std::fmt;

use serde::Deserialize;

/// One metadata category reported by `describeMetadata`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MetadataTypeDescriptor {
    pub xml_name: String,
    #[serde(default)]
    pub in_folder: bool,
}

impl MetadataTypeDescriptor {
    pub fn new(xml_name: impl Into<String>, in_folder: bool) -> Self {
        Self {
            xml_name: xml_name.into(),
            in_folder,
        }
    }
}

/// Where a member came from, as reported by `listMetadata`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ManageableState {
    Beta,
    Deleted,
    Deprecated,
    DeprecatedEditable,
    Installed,
    InstalledEditable,
    Released,
    Unmanaged,
    #[serde(other)]
    Unknown,
}

/// One `FileProperties` record from a listing call.
///
/// Every field is optional on the wire; the merge pass decides what a
/// record missing its `type` or `fullName` means.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataMember {
    pub member_type: Option<String>,
    pub full_name: Option<String>,
    pub manageable_state: Option<ManageableState>,
    pub file_name: Option<String>,
}

impl MetadataMember {
    pub fn new(member_type: &str, full_name: &str) -> Self {
        Self {
            member_type: Some(member_type.to_string()),
            full_name: Some(full_name.to_string()),
            ..Default::default()
        }
    }

    pub fn with_state(mut self, state: ManageableState) -> Self {
        self.manageable_state = Some(state);
        self
    }

    pub fn with_file_name(mut self, file_name: &str) -> Self {
        self.file_name = Some(file_name.to_string());
        self
    }

    pub fn is_installed(&self) -> bool {
        self.manageable_state == Some(ManageableState::Installed)
    }
}

/// A folder container of a foldered type, e.g. `EmailFolder` / `unfiled$public`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderDescriptor {
    pub folder_type: String,
    pub full_name: String,
}

/// Arguments of a single `listMetadata` query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListQuery {
    pub metadata_type: String,
    pub folder: Option<String>,
}

impl ListQuery {
    pub fn unfoldered(metadata_type: impl Into<String>) -> Self {
        Self {
            metadata_type: metadata_type.into(),
            folder: None,
        }
    }

    pub fn in_folder(metadata_type: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            metadata_type: metadata_type.into(),
            folder: Some(folder.into()),
        }
    }
}

impl fmt::Display for ListQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.folder {
            Some(folder) => write!(f, "{} in {}", self.metadata_type, folder),
            None => write!(f, "{}", self.metadata_type),
        }
    }
}

/// Result of a listing call. The remote side returns nothing, a bare
/// record or a collection; callers normalize with [`Listing::into_members`]
/// right at the boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Listing {
    #[default]
    Empty,
    Single(MetadataMember),
    Many(Vec<MetadataMember>),
}

impl Listing {
    pub fn from_records(mut records: Vec<MetadataMember>) -> Self {
        match records.len() {
            0 => Listing::Empty,
            1 => Listing::Single(records.remove(0)),
            _ => Listing::Many(records),
        }
    }

    pub fn into_members(self) -> Vec<MetadataMember> {
        match self {
            Listing::Empty => Vec::new(),
            Listing::Single(member) => vec![member],
            Listing::Many(members) => members,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Listing::Empty => 0,
            Listing::Single(_) => 1,
            Listing::Many(members) => members.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_shapes_normalize_to_lists() {
        assert!(Listing::Empty.into_members().is_empty());

        let single = Listing::Single(MetadataMember::new("ApexClass", "A"));
        assert_eq!(single.into_members().len(), 1);

        let many = Listing::Many(vec![
            MetadataMember::new("ApexClass", "A"),
            MetadataMember::new("ApexClass", "B"),
        ]);
        let names: Vec<_> = many
            .into_members()
            .into_iter()
            .filter_map(|m| m.full_name)
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn from_records_picks_tightest_shape() {
        assert_eq!(Listing::from_records(vec![]), Listing::Empty);
        assert!(matches!(
            Listing::from_records(vec![MetadataMember::new("Flow", "F")]),
            Listing::Single(_)
        ));
        assert_eq!(
            Listing::from_records(vec![
                MetadataMember::new("Flow", "F"),
                MetadataMember::new("Flow", "G")
            ])
            .len(),
            2
        );
    }

    #[test]
    fn unknown_manageable_state_is_tolerated() {
        let state: ManageableState = serde_json::from_str("\"somethingNew\"").unwrap();
        assert_eq!(state, ManageableState::Unknown);
        let state: ManageableState = serde_json::from_str("\"deprecatedEditable\"").unwrap();
        assert_eq!(state, ManageableState::DeprecatedEditable);
    }

    #[test]
    fn list_query_display() {
        assert_eq!(ListQuery::unfoldered("ApexClass").to_string(), "ApexClass");
        assert_eq!(
            ListQuery::in_folder("Report", "Sales").to_string(),
            "Report in Sales"
        );
    }
}
