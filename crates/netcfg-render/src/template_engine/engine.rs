//! Tera-based section renderer with per-section fault isolation.

use std::collections::BTreeMap;
use std::path::Path;

use tera::{Context, Tera};

use super::loader::{compile, error_chain, read_sources};
use crate::document::Document;

/// Renders one section template at a time against the input document.
///
/// Resolution is an explicit lookup: an identifier either names a loaded
/// template or it does not. Neither a miss nor a render fault ever escapes
/// [`SectionRenderer::render`]; both become an empty section.
#[derive(Debug)]
pub struct SectionRenderer {
    tera: Tera,
    /// Templates present on disk that failed to compile, with the reason.
    broken: BTreeMap<String, String>,
}

impl SectionRenderer {
    /// Load every template under `template_dir`.
    pub fn from_dir(template_dir: &Path) -> Self {
        Self::from_sources(read_sources(template_dir))
    }

    /// Build a renderer from in-memory `(identifier, source)` pairs.
    pub fn from_templates<I, N, C>(templates: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<String>,
    {
        Self::from_sources(
            templates
                .into_iter()
                .map(|(n, c)| (n.into(), c.into()))
                .collect(),
        )
    }

    fn from_sources(sources: Vec<(String, String)>) -> Self {
        let loaded = compile(sources);
        Self {
            tera: loaded.tera,
            broken: loaded.broken,
        }
    }

    /// Whether `template_id` names a template in this renderer's directory.
    pub fn contains(&self, template_id: &str) -> bool {
        self.broken.contains_key(template_id)
            || self.tera.get_template_names().any(|n| n == template_id)
    }

    /// All known template identifiers, sorted.
    pub fn template_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .tera
            .get_template_names()
            .chain(self.broken.keys().map(String::as_str))
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Render a section, reporting why it produced nothing.
    pub fn try_render(
        &self,
        template_id: &str,
        document: &Document,
    ) -> Result<String, SectionError> {
        if let Some(reason) = self.broken.get(template_id) {
            return Err(SectionError::RenderFault {
                template: template_id.to_string(),
                reason: reason.clone(),
            });
        }
        if !self.contains(template_id) {
            return Err(SectionError::Unresolved {
                template: template_id.to_string(),
            });
        }

        let mut context = Context::new();
        for (key, value) in document.as_map() {
            context.insert(key, value);
        }

        self.tera
            .render(template_id, &context)
            .map_err(|e| SectionError::RenderFault {
                template: template_id.to_string(),
                reason: error_chain(&e),
            })
    }

    /// Render a section; any failure is logged and yields empty text.
    pub fn render(&self, template_id: &str, document: &Document) -> String {
        match self.try_render(template_id, document) {
            Ok(text) => text,
            Err(e @ SectionError::Unresolved { .. }) => {
                tracing::warn!(template = %template_id, "{e}");
                String::new()
            }
            Err(e @ SectionError::RenderFault { .. }) => {
                tracing::error!(template = %template_id, "{e}");
                String::new()
            }
        }
    }
}

/// Why a section rendered nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SectionError {
    #[error("template not found: {template}")]
    Unresolved { template: String },

    #[error("error rendering template '{template}': {reason}")]
    RenderFault { template: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn document(yaml: &str) -> Document {
        Document::load_str(yaml, "test").unwrap()
    }

    #[test]
    fn test_render_with_document_keys() {
        let renderer = SectionRenderer::from_templates([(
            "vlans.j2",
            "{% for v in vlans %}vlan {{ v.id }}\n   name {{ v.name }}\n{% endfor %}",
        )]);
        let doc = document("vlans:\n  - {id: 10, name: users}\n  - {id: 20, name: voice}\n");

        let text = renderer.try_render("vlans.j2", &doc).unwrap();
        assert_eq!(text, "vlan 10\n   name users\nvlan 20\n   name voice\n");
    }

    #[test]
    fn test_unresolved_template() {
        let renderer = SectionRenderer::from_templates([("ok.j2", "ok")]);
        let doc = Document::default();

        assert!(!renderer.contains("missing.j2"));
        assert_eq!(
            renderer.try_render("missing.j2", &doc),
            Err(SectionError::Unresolved {
                template: "missing.j2".to_string()
            })
        );
        assert_eq!(renderer.render("missing.j2", &doc), "");
    }

    #[test]
    fn test_render_fault_on_shape_mismatch() {
        // `hostname` is a string; iterating it as a sequence fails at render time.
        let renderer = SectionRenderer::from_templates([(
            "loop.j2",
            "{% for peer in hostname.peers %}{{ peer }}{% endfor %}",
        )]);
        let doc = document("hostname: leaf-01\n");

        let err = renderer.try_render("loop.j2", &doc).unwrap_err();
        assert!(matches!(err, SectionError::RenderFault { .. }));
        assert_eq!(renderer.render("loop.j2", &doc), "");
    }

    #[test]
    fn test_missing_key_tolerated_when_template_guards() {
        let renderer = SectionRenderer::from_templates([(
            "bgp.j2",
            "{% if bgp is defined %}router bgp {{ bgp.asn }}{% endif %}",
        )]);
        assert_eq!(renderer.try_render("bgp.j2", &Document::default()).unwrap(), "");
    }

    #[test]
    fn test_undefined_key_faults_unless_defaulted() {
        let renderer = SectionRenderer::from_templates([
            ("strict.j2", "hostname {{ hostname }}\n"),
            ("lenient.j2", "hostname {{ hostname | default(value=\"\") }}\n"),
        ]);
        let doc = document("domain: lab.example\n");

        assert!(matches!(
            renderer.try_render("strict.j2", &doc),
            Err(SectionError::RenderFault { .. })
        ));
        assert_eq!(renderer.try_render("lenient.j2", &doc).unwrap(), "hostname \n");
    }

    #[test]
    fn test_compile_failure_is_render_fault_not_unresolved() {
        let renderer = SectionRenderer::from_templates([
            ("good.j2", "hostname {{ hostname }}"),
            ("bad.j2", "{% for %}"),
        ]);
        let doc = document("hostname: spine-01\n");

        assert!(renderer.contains("bad.j2"));
        assert!(matches!(
            renderer.try_render("bad.j2", &doc),
            Err(SectionError::RenderFault { .. })
        ));
        assert_eq!(renderer.render("good.j2", &doc), "hostname spine-01");
    }

    #[test]
    fn test_no_html_escaping() {
        let renderer = SectionRenderer::from_templates([("banner.html", "{{ motd }}")]);
        let doc = document("motd: \"<authorized & monitored>\"\n");
        assert_eq!(
            renderer.try_render("banner.html", &doc).unwrap(),
            "<authorized & monitored>"
        );
    }

    #[test]
    fn test_from_dir_with_nested_include() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("partials")).unwrap();
        fs::write(dir.path().join("partials/banner.j2"), "! managed by netcfg").unwrap();
        fs::write(
            dir.path().join("system.j2"),
            "{% include \"partials/banner.j2\" %}\nhostname {{ hostname }}",
        )
        .unwrap();

        let renderer = SectionRenderer::from_dir(dir.path());
        assert_eq!(renderer.template_ids(), vec!["partials/banner.j2", "system.j2"]);
        assert_eq!(
            renderer.render("system.j2", &document("hostname: leaf-02\n")),
            "! managed by netcfg\nhostname leaf-02"
        );
    }

    #[test]
    fn test_from_missing_dir_resolves_nothing() {
        let renderer = SectionRenderer::from_dir(Path::new("/nonexistent/netcfg/templates"));
        assert!(renderer.template_ids().is_empty());
        assert_eq!(renderer.render("bgp.j2", &Document::default()), "");
    }
}
