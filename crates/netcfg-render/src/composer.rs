//! Compose rendered sections into one configuration.

use crate::document::Document;
use crate::registry::SectionRegistry;
use crate::template_engine::SectionRenderer;

/// What happened to one registry entry during composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionOutcome {
    /// The section rendered non-blank text and is part of the output.
    Included { name: String },
    /// The section rendered nothing but whitespace (or failed) and was omitted.
    Empty { name: String },
}

impl SectionOutcome {
    pub fn name(&self) -> &str {
        match self {
            Self::Included { name } | Self::Empty { name } => name,
        }
    }

    pub fn is_included(&self) -> bool {
        matches!(self, Self::Included { .. })
    }
}

/// Composed configuration text plus the per-section outcomes, in registry order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    pub text: String,
    pub sections: Vec<SectionOutcome>,
}

/// Render every registry entry in order and join the non-blank ones with `\n`.
pub fn compose(
    document: &Document,
    registry: &SectionRegistry,
    renderer: &SectionRenderer,
) -> String {
    compose_detailed(document, registry, renderer).text
}

/// Like [`compose`], also reporting which sections were kept.
///
/// A section is kept when its trimmed output is non-empty, but the untrimmed
/// text is what gets joined. Boundaries between sections are the templates'
/// own business.
pub fn compose_detailed(
    document: &Document,
    registry: &SectionRegistry,
    renderer: &SectionRenderer,
) -> Composition {
    let mut parts = Vec::with_capacity(registry.len());
    let mut sections = Vec::with_capacity(registry.len());

    for entry in registry {
        tracing::debug!(section = %entry.name, template = %entry.template, "Rendering section");
        let rendered = renderer.render(&entry.template, document);
        if rendered.trim().is_empty() {
            sections.push(SectionOutcome::Empty {
                name: entry.name.clone(),
            });
        } else {
            parts.push(rendered);
            sections.push(SectionOutcome::Included {
                name: entry.name.clone(),
            });
        }
    }

    Composition {
        text: parts.join("\n"),
        sections,
    }
}
