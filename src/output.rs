// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal and JSON rendering helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::IsTerminal;

/// Colors are used only on a terminal with `NO_COLOR` unset.
pub fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

pub fn print_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{rendered}");
    Ok(())
}

/// Replace highlight markers with terminal styling.
///
/// Without color the markers are left in place so matches stay visible.
pub fn render_highlights(text: &str, open: &str, close: &str, use_color: bool) -> String {
    if !use_color || open.is_empty() || close.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(open) {
        let after_open = &rest[start + open.len()..];
        let Some(end) = after_open.find(close) else {
            break;
        };
        out.push_str(&rest[..start]);
        out.push_str(&colorize_match(&after_open[..end], true));
        rest = &after_open[end + close.len()..];
    }
    out.push_str(rest);
    out
}

pub fn colorize_match(text: &str, use_color: bool) -> String {
    if use_color {
        text.yellow().bold().to_string()
    } else {
        text.to_string()
    }
}

pub fn colorize_title(text: &str, use_color: bool) -> String {
    if use_color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

pub fn colorize_dim(text: &str, use_color: bool) -> String {
    if use_color {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_without_color_keeps_markers() {
        let text = "Classic <mark>Comedy</mark> Gold";
        assert_eq!(render_highlights(text, "<mark>", "</mark>", false), text);
    }

    #[test]
    fn render_with_color_removes_markers() {
        colored::control::set_override(true);
        let rendered = render_highlights("a <mark>b</mark> c <mark>d", "<mark>", "</mark>", true);
        colored::control::unset_override();
        assert!(!rendered.contains("</mark>"));
        assert!(rendered.starts_with("a "));
        assert!(rendered.ends_with(" c <mark>d"));
        assert!(rendered.contains('b'));
    }
}
