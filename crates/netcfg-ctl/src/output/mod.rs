//! Styled terminal output for `netcfg`.
//!
//! Status lines for humans. Uses `anstyle` for ANSI style definitions and
//! `anstream` for auto-detecting terminal capabilities, so output degrades to
//! plain text when piped. Diagnostics for machines go through `tracing`.

use std::io::Write;

use anstyle::{AnsiColor, Color, Style};

const fn fg(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

const SUCCESS: Style = fg(AnsiColor::Green);
const ERROR: Style = fg(AnsiColor::Red);
// Omitted sections and skipped integrations.
const WARNING: Style = fg(AnsiColor::Yellow);
const BOLD: Style = Style::new().bold();
const DIM: Style = Style::new().dimmed();

/// Help output in the same palette as the status lines.
pub(crate) fn clap_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .header(SUCCESS.bold())
        .usage(SUCCESS.bold())
        .literal(fg(AnsiColor::Cyan))
        .placeholder(fg(AnsiColor::Cyan))
        .error(ERROR.bold())
        .valid(SUCCESS)
        .invalid(WARNING)
}

/// Print a success message (green checkmark prefix).
pub(crate) fn success(msg: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{SUCCESS}✓{SUCCESS:#} {SUCCESS}{msg}{SUCCESS:#}").ok();
}

/// Print an error message to stderr (red X prefix).
pub(crate) fn error(msg: impl std::fmt::Display) {
    let mut out = anstream::stderr().lock();
    writeln!(out, "{ERROR}✗ {msg}{ERROR:#}").ok();
}

/// Print a warning message (yellow exclamation prefix).
pub(crate) fn warning(msg: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{WARNING}! {msg}{WARNING:#}").ok();
}

/// Print a section header (bold).
pub(crate) fn header(msg: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{BOLD}{msg}{BOLD:#}").ok();
}

/// Print a labeled value ("  Label: value" with the label bolded).
pub(crate) fn label(name: impl std::fmt::Display, value: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "  {BOLD}{name}:{BOLD:#} {value}").ok();
}

/// Print dimmed/muted text (for secondary information).
pub(crate) fn dim(msg: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{DIM}{msg}{DIM:#}").ok();
}

/// Print a per-section status line: green checkmark when included,
/// yellow dash when the section was omitted.
pub(crate) fn section_status(included: bool, msg: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    if included {
        writeln!(out, "  {SUCCESS}✓{SUCCESS:#} {msg}").ok();
    } else {
        writeln!(out, "  {WARNING}-{WARNING:#} {msg}").ok();
    }
}

/// Print a list item with a bullet prefix.
pub(crate) fn item(msg: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "  • {msg}").ok();
}

/// Print plain text to stdout (for output that doesn't need styling).
pub(crate) fn plain(msg: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{msg}").ok();
}
