//! Input document loading.
//!
//! The input is a YAML mapping describing a device's intended configuration
//! (BGP peers, VLANs, interfaces, system settings). No schema is enforced here;
//! each section template reads the keys it understands.

use std::path::Path;

use serde_json::{Map, Value};

/// Immutable key mapping loaded once per run and shared by every section template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Map<String, Value>,
}

impl Document {
    /// Load and parse a YAML document from `path`.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let origin = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            let err = if e.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                LoadError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            };
            tracing::error!(path = %origin, error = %err, "Failed to read input document");
            err
        })?;

        let document = Self::load_str(&contents, &origin).inspect_err(|e| {
            tracing::error!(path = %origin, error = %e, "Failed to parse input document");
        })?;
        tracing::info!(path = %origin, keys = document.len(), "Loaded input document");
        Ok(document)
    }

    /// Parse a YAML document held in memory. `origin` names the source in errors.
    pub fn load_str(yaml: &str, origin: &str) -> Result<Self, LoadError> {
        let parse_err = |source: ParseError| LoadError::Parse {
            origin: origin.to_string(),
            source,
        };

        let mut raw: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|e| parse_err(ParseError::Yaml(e)))?;
        // `<<: *defaults` merge keys are folded in before any template sees them.
        raw.apply_merge().map_err(|e| parse_err(ParseError::Yaml(e)))?;

        match yaml_to_json(raw).map_err(parse_err)? {
            Value::Object(root) => Ok(Self { root }),
            // An empty source carries no intent; every section sees missing keys.
            Value::Null => Ok(Self::default()),
            other => Err(parse_err(ParseError::NotAMapping {
                found: kind_name(&other),
            })),
        }
    }

    /// Look up a top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

/// Convert a YAML tree into the JSON model the template engine consumes.
///
/// Scalar mapping keys (integers, booleans) are stringified so that documents
/// keyed by VLAN or AS number still load.
fn yaml_to_json(value: serde_yaml::Value) -> Result<Value, ParseError> {
    Ok(match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => number_to_json(&n),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<_, _>>()?,
        ),
        serde_yaml::Value::Mapping(mapping) => {
            let mut object = Map::with_capacity(mapping.len());
            for (key, val) in mapping {
                object.insert(mapping_key(key)?, yaml_to_json(val)?);
            }
            Value::Object(object)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn number_to_json(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::from(i)
    } else if let Some(u) = n.as_u64() {
        Value::from(u)
    } else {
        n.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            // .nan / .inf have no JSON representation
            .unwrap_or_else(|| Value::String(n.to_string()))
    }
}

fn mapping_key(key: serde_yaml::Value) -> Result<String, ParseError> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => mapping_key(tagged.value),
        other => Err(ParseError::UnsupportedKey {
            key: format!("{other:?}"),
        }),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// Fatal input-loading failure.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("input file not found: {}", path.display())]
    NotFound { path: std::path::PathBuf },

    #[error("failed to read input file '{}': {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse input '{origin}': {source}")]
    Parse { origin: String, source: ParseError },
}

impl LoadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Why a readable source did not yield a structured mapping.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("top-level value must be a mapping, found {found}")]
    NotAMapping { found: &'static str },

    #[error("unsupported mapping key {key}")]
    UnsupportedKey { key: String },
}
