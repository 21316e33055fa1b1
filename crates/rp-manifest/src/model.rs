//! Manifest data model.
//!
//! A [`Manifest`] is an ordered mapping from group name to [`FileGroup`].
//! JSON object order is preserved through a custom map visitor; the archive
//! stage writes groups in exactly the order they appear in the document.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::CLEAN_GATE_GROUP;

/// One named set of files sharing a source root and a destination root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileGroup {
    /// Directory root the include entries are resolved against.
    pub src_path: String,

    /// Directory root the entries are written under inside the archive.
    pub dest_path: String,

    /// Ordered include entries: literal filenames, or glob patterns when
    /// `glob` is set.
    pub include: Vec<String>,

    /// Whether include entries are glob patterns.
    #[serde(default)]
    pub glob: bool,

    /// Whether this group gates filtering and testing. Only meaningful on
    /// the clean-gate group.
    #[serde(default = "default_clean")]
    pub clean: bool,
}

fn default_clean() -> bool {
    true
}

/// Ordered mapping from group name to [`FileGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Manifest {
    groups: Vec<(String, FileGroup)>,
}

impl Manifest {
    /// Build a manifest from an ordered list of named groups.
    pub fn from_groups(groups: Vec<(String, FileGroup)>) -> Self {
        Self { groups }
    }

    /// Iterate groups in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileGroup)> {
        self.groups.iter().map(|(name, group)| (name.as_str(), group))
    }

    /// Look up a group by name.
    pub fn get(&self, name: &str) -> Option<&FileGroup> {
        self.groups
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, group)| group)
    }

    /// The group that gates filtering and testing, when present.
    pub fn clean_gate(&self) -> Option<&FileGroup> {
        self.get(CLEAN_GATE_GROUP)
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the manifest defines no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Serialize for Manifest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (name, group) in &self.groups {
            map.serialize_entry(name, group)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Manifest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ManifestVisitor;

        impl<'de> Visitor<'de> for ManifestVisitor {
            type Value = Manifest;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of group name to file group")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut groups: Vec<(String, FileGroup)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));

                while let Some((name, group)) = access.next_entry::<String, FileGroup>()? {
                    if groups.iter().any(|(n, _)| *n == name) {
                        return Err(de::Error::custom(format!("duplicate group '{name}'")));
                    }
                    groups.push((name, group));
                }

                Ok(Manifest { groups })
            }
        }

        deserializer.deserialize_map(ManifestVisitor)
    }
}
