//! Command handlers for the netcfg CLI
//!
//! Rendering and validation delegate to `netcfg-render`; change-management
//! commands delegate to `netcfg-client`.

pub(crate) mod change;
pub(crate) mod render;
pub(crate) mod sections;
pub(crate) mod validate;

pub(crate) use change::handle_change_command;
pub(crate) use render::handle_render_command;
pub(crate) use sections::handle_sections_command;
pub(crate) use validate::handle_validate_command;
