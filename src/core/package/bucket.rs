use indexmap::{IndexMap, IndexSet};

/// Canonical `type -> members` mapping.
///
/// Types and members keep first-insertion order; re-inserting a member is a
/// no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageTypeBucket {
    types: IndexMap<String, IndexSet<String>>,
}

impl PackageTypeBucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the member was not present yet.
    pub fn insert(&mut self, type_name: &str, member: &str) -> bool {
        self.types
            .entry(type_name.to_string())
            .or_default()
            .insert(member.to_string())
    }

    pub fn extend<I, S>(&mut self, type_name: &str, members: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = self.types.entry(type_name.to_string()).or_default();
        for member in members {
            set.insert(member.as_ref().to_string());
        }
    }

    pub fn members(&self, type_name: &str) -> Option<&IndexSet<String>> {
        self.types.get(type_name)
    }

    pub fn contains_type(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &IndexSet<String>)> {
        self.types.iter()
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn member_count(&self) -> usize {
        self.types.values().map(IndexSet::len).sum()
    }
}
