//! Runtime section template rendering.
//!
//! Section templates live as plain files under a templates directory and are
//! compiled with Tera at startup. A template that fails to compile is kept
//! out of the shared set so it cannot block the other sections.

mod engine;
mod loader;

pub use engine::{SectionError, SectionRenderer};
