use quick_xml::se::Serializer;
use serde::Serialize;

use super::bucket::PackageTypeBucket;
use crate::core::catalog::METADATA_NS;
use crate::core::config::TypeFilter;
use crate::core::error::HydrateResult;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const INDENT: usize = 4;

/// Members of one type in the final descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageTypeMembers {
    pub name: String,
    pub members: Vec<String>,
}

/// The package.xml content of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    pub version: String,
    pub types: Vec<PackageTypeMembers>,
}

// ── XML shape ──────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename = "Package")]
struct PackageXml<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    types: Vec<TypesXml<'a>>,
    version: &'a str,
}

#[derive(Serialize)]
struct TypesXml<'a> {
    members: &'a [String],
    name: &'a str,
}

impl PackageDescriptor {
    /// Project a bucket through the filter, keeping bucket order.
    pub fn from_bucket(bucket: &PackageTypeBucket, version: &str, filter: &TypeFilter) -> Self {
        let types = bucket
            .iter()
            .filter(|(name, _)| filter.allows(name))
            .map(|(name, members)| PackageTypeMembers {
                name: name.clone(),
                members: members.iter().cloned().collect(),
            })
            .collect();

        Self {
            version: version.to_string(),
            types,
        }
    }

    pub fn find(&self, type_name: &str) -> Option<&PackageTypeMembers> {
        self.types.iter().find(|t| t.name == type_name)
    }

    /// Render as package.xml. `pretty` only adds indentation.
    pub fn to_xml(&self, pretty: bool) -> HydrateResult<String> {
        let doc = PackageXml {
            xmlns: METADATA_NS,
            types: self
                .types
                .iter()
                .map(|t| TypesXml {
                    members: &t.members,
                    name: &t.name,
                })
                .collect(),
            version: &self.version,
        };

        let mut body = String::new();
        let mut serializer = Serializer::new(&mut body);
        if pretty {
            serializer.indent(' ', INDENT);
        }
        doc.serialize(serializer)?;

        Ok(format!("{}\n{}\n", XML_DECLARATION, body))
    }
}
