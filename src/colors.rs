//! Terminal color policy.
//!
//! `NO_COLOR` (https://no-color.org/) wins over everything, then
//! `CLICOLOR_FORCE` (non-zero forces colors), then `CLICOLOR=0`. Without any
//! of those, colors follow whether stdout is a terminal.

use colored::control;

/// Decides whether to color output, given an environment lookup and whether
/// stdout is a TTY.
pub fn colors_enabled<F>(lookup: F, is_tty: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    if lookup("NO_COLOR").is_some() {
        return false;
    }
    if lookup("CLICOLOR_FORCE").is_some_and(|v| v != "0") {
        return true;
    }
    if lookup("CLICOLOR").is_some_and(|v| v == "0") {
        return false;
    }
    is_tty
}

/// Applies the policy to `colored` for the whole process. Call early in main.
pub fn init_colors() {
    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stdout());
    control::set_override(colors_enabled(|key| std::env::var(key).ok(), is_tty));
}
