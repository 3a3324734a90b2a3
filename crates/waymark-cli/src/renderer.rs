//! Terminal rendering of the markdown produced by the core display types.
//!
//! Rich mode styles inline markdown with termimad and colors headings by
//! level; plain mode prints the text unchanged.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

const RESET: &str = "\x1b[0m";

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to the terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            match heading_color(line) {
                // Headings keep their hashes so plans read the same piped or not
                Some(color) => println!("{color}{line}{RESET}"),
                None => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

/// ANSI color for a heading line: blue for trip and plan titles, cyan for
/// days and sections.
fn heading_color(line: &str) -> Option<&'static str> {
    if line.starts_with("## ") {
        Some("\x1b[36m")
    } else if line.starts_with("# ") {
        Some("\x1b[34m")
    } else {
        None
    }
}
