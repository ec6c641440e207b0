//! End-to-end tests for the load → compose → write → validate pipeline.
//!
//! Builds a realistic templates directory in a temp dir with one template per
//! built-in section and drives the public API the way the CLI does.

use std::fs;
use std::path::Path;

use netcfg_render::{
    compose, compose_detailed, output_path, validate, write, Document, SectionRegistry,
    SectionRenderer,
};
use tempfile::TempDir;

const INPUT: &str = r#"
hostname: leaf-01
bgp:
  asn: 65101
  router_id: 10.255.0.11
  neighbors:
    - ip: 10.0.0.0
      remote_as: 65000
      description: spine-01
    - ip: 10.0.0.2
      remote_as: 65000
      description: spine-02
vlans:
  - id: 10
    name: users
  - id: 20
    name: voice
interfaces:
  - name: Ethernet1
    description: to spine-01
    ip: 10.0.0.1/31
  - name: Ethernet2
    description: to spine-02
    ip: 10.0.0.3/31
"#;

fn write_templates(dir: &Path) {
    fs::write(
        dir.join("bgp.j2"),
        "{% if bgp is defined %}!\nrouter bgp {{ bgp.asn }}\n   router-id {{ bgp.router_id }}\n\
         {% for n in bgp.neighbors %}   neighbor {{ n.ip }} remote-as {{ n.remote_as }}\n\
         {% endfor %}{% endif %}",
    )
    .unwrap();
    fs::write(
        dir.join("interfaces.j2"),
        "{% for i in interfaces %}!\ninterface {{ i.name }}\n   description {{ i.description }}\n\
         {% if i.ip is defined %}   ip address {{ i.ip }}\n{% endif %}{% endfor %}",
    )
    .unwrap();
    fs::write(
        dir.join("vlans.j2"),
        "{% if vlans is defined %}{% for v in vlans %}!\nvlan {{ v.id }}\n   name {{ v.name }}\n\
         {% endfor %}{% endif %}",
    )
    .unwrap();
    fs::write(dir.join("system.j2"), "!\nhostname {{ hostname }}\n").unwrap();
    // routing_filters.j2 intentionally absent
}

fn setup() -> (TempDir, SectionRenderer, Document) {
    let temp = TempDir::new().unwrap();
    let templates = temp.path().join("templates");
    fs::create_dir_all(&templates).unwrap();
    write_templates(&templates);

    let input_path = temp.path().join("input.yaml");
    fs::write(&input_path, INPUT).unwrap();

    let renderer = SectionRenderer::from_dir(&templates);
    let document = Document::load(&input_path).unwrap();
    (temp, renderer, document)
}

#[test]
fn test_default_registry_renders_in_section_order() {
    let (_temp, renderer, document) = setup();
    let composition = compose_detailed(&document, &SectionRegistry::default(), &renderer);

    let bgp = composition.text.find("router bgp 65101").unwrap();
    let iface = composition.text.find("interface Ethernet1").unwrap();
    let vlan = composition.text.find("vlan 10").unwrap();
    let host = composition.text.find("hostname leaf-01").unwrap();
    assert!(bgp < iface && iface < vlan && vlan < host);

    let omitted: Vec<_> = composition
        .sections
        .iter()
        .filter(|s| !s.is_included())
        .map(|s| s.name())
        .collect();
    assert_eq!(omitted, vec!["routing_filters"]);
}

#[test]
fn test_write_then_validate() {
    let (temp, renderer, document) = setup();
    let text = compose(&document, &SectionRegistry::default(), &renderer);

    let out = output_path(
        "leaf-01",
        &temp.path().join("input.yaml"),
        Some(&temp.path().join("out")),
    );
    write(&text, &out).unwrap();

    let on_disk = fs::read_to_string(&out).unwrap();
    assert_eq!(on_disk, text);
    assert!(validate(&on_disk).passed);
}

#[test]
fn test_document_without_optional_keys_still_renders_other_sections() {
    let (_temp, renderer, _) = setup();
    let sparse = Document::load_str("hostname: edge-01\ninterfaces: []\n", "sparse").unwrap();

    let text = compose(&sparse, &SectionRegistry::default(), &renderer);
    assert_eq!(text, "!\nhostname edge-01\n");
}

#[test]
fn test_rendering_twice_is_byte_identical() {
    let (_temp, renderer, document) = setup();
    let registry = SectionRegistry::default();
    assert_eq!(
        compose(&document, &registry, &renderer),
        compose(&document, &registry, &renderer)
    );
}

#[test]
fn test_trailing_whitespace_from_template_is_reported() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("system.j2"), "hostname {{ hostname }} \n").unwrap();
    let renderer = SectionRenderer::from_dir(temp.path());
    let registry = SectionRegistry::from_pairs([("system", "system.j2")]).unwrap();

    let text = compose(
        &Document::load_str("hostname: leaf-09\n", "inline").unwrap(),
        &registry,
        &renderer,
    );
    let result = validate(&text);
    assert!(!result.passed);
    assert_eq!(result.findings.len(), 1);
    assert_eq!(result.findings[0].line, 1);
}

#[test]
fn test_merged_interface_defaults_reach_templates() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("interfaces.j2"),
        "{% for i in interfaces %}interface {{ i.name }}\n   mtu {{ i.mtu }}\n{% endfor %}",
    )
    .unwrap();
    let renderer = SectionRenderer::from_dir(temp.path());
    let registry = SectionRegistry::from_pairs([("interfaces", "interfaces.j2")]).unwrap();
    let document = Document::load_str(
        "edge: &edge\n  mtu: 9214\ninterfaces:\n  - <<: *edge\n    name: Ethernet1\n",
        "merge",
    )
    .unwrap();

    let text = compose(&document, &registry, &renderer);
    assert_eq!(text, "interface Ethernet1\n   mtu 9214\n");
}
