//! Network device configuration rendering: compose independently maintained
//! section templates into one configuration and sweep it for syntax issues.
//!
//! The pipeline is strictly sequential:
//!
//! ```text
//! document::load ──► composer::compose ──► writer::write ──► validator::validate
//!                        │
//!                        └─ template_engine::SectionRenderer (one call per registry entry)
//! ```
//!
//! # Modules
//!
//! - [`document`] — YAML input loading into an immutable [`Document`]
//! - [`registry`] — Ordered section name → template identifier mapping
//! - [`template_engine`] — Tera-backed section rendering with per-section fault isolation
//! - [`composer`] — Ordered concatenation of non-empty rendered sections
//! - [`writer`] — Artifact naming and persistence
//! - [`validator`] — Line-oriented syntax rules and the validation report

pub mod composer;
pub mod document;
pub mod registry;
pub mod template_engine;
pub mod validator;
pub mod writer;

pub use composer::{compose, compose_detailed, Composition, SectionOutcome};
pub use document::{Document, LoadError, ParseError};
pub use registry::{RegistryError, SectionEntry, SectionRegistry};
pub use template_engine::{SectionError, SectionRenderer};
pub use validator::{
    validate, LineRule, TrailingWhitespace, ValidationFinding, ValidationResult, Validator,
};
pub use writer::{output_path, write, WriteError};
