//! Ordered mapping from logical section name to template identifier.

use std::collections::HashSet;

use serde::Deserialize;

/// Built-in sections, in the order they appear in a composed configuration.
const DEFAULT_SECTIONS: &[(&str, &str)] = &[
    ("bgp", "bgp.j2"),
    ("routing_filters", "routing_filters.j2"),
    ("interfaces", "interfaces.j2"),
    ("vlans", "vlans.j2"),
    ("system", "system.j2"),
];

/// One registry entry: a section name and the template that renders it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectionEntry {
    /// Logical section name (e.g. `interfaces`). Unique within a registry.
    pub name: String,

    /// Template identifier, resolved relative to the templates directory.
    pub template: String,
}

impl SectionEntry {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
        }
    }
}

/// Fixed, ordered sequence of section entries.
///
/// The order is the order of sections in the composed configuration. It is
/// set at construction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRegistry {
    entries: Vec<SectionEntry>,
}

impl SectionRegistry {
    /// Build a registry, rejecting duplicate section names.
    pub fn new(entries: Vec<SectionEntry>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(RegistryError::DuplicateSection {
                    name: entry.name.clone(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Build a registry from `(name, template)` pairs.
    pub fn from_pairs<N, T>(pairs: impl IntoIterator<Item = (N, T)>) -> Result<Self, RegistryError>
    where
        N: Into<String>,
        T: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(name, template)| SectionEntry::new(name, template))
                .collect(),
        )
    }

    pub fn entries(&self) -> &[SectionEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SectionEntry> {
        self.entries.iter()
    }

    /// Template identifier for a section name.
    pub fn template_for(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.template.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self {
            entries: DEFAULT_SECTIONS
                .iter()
                .map(|(name, template)| SectionEntry::new(*name, *template))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SectionRegistry {
    type Item = &'a SectionEntry;
    type IntoIter = std::slice::Iter<'a, SectionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("duplicate section name: '{name}'")]
    DuplicateSection { name: String },
}
