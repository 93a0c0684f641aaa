//! Terminal rendering of Markdown output.
//!
//! Rich output goes through termimad; `--no-color` prints the Markdown as is.

use std::fmt::Display;

use termimad::{crossterm::style::Color, MadSkin};

/// Renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.code_block.set_bg(Color::AnsiValue(238));
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render Markdown text to the terminal
    pub fn render(&self, markdown: &str) {
        if !self.rich_enabled {
            print!("{markdown}");
            if !markdown.ends_with('\n') {
                println!();
            }
            return;
        }

        let mut in_code_block = false;
        for line in markdown.lines() {
            if line.starts_with("```") {
                in_code_block = !in_code_block;
                continue;
            }
            if in_code_block {
                println!("{}", self.skin.inline(&format!("`{line}`")));
            } else if line.starts_with('#') {
                // Keep the hashes so heading depth stays visible.
                println!("\x1b[34m{line}\x1b[0m");
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
    }

    /// Render any value whose `Display` output is Markdown
    pub fn show(&self, value: &impl Display) {
        self.render(&value.to_string());
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
