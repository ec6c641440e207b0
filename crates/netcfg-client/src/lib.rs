//! # netcfg change-management client
//!
//! Reports the outcome of a configuration-change pipeline to a
//! change-management system: look a change record up by number, then update
//! its state with a timestamped work note.
//!
//! The client is independent of rendering. Its failures never affect an
//! already written configuration artifact.

pub mod client;
pub mod config;
pub mod error;
pub mod status;

pub use client::{ChangeClient, ChangeRecord};
pub use config::{ChangeConfig, Integration};
pub use error::{ClientError, ClientResult};
pub use status::{ChangeStatus, PipelineOutcome};
