use std::io::Write;

use colored::Colorize;

use crate::view::{DetailModel, ListEntry, Presenter, SEARCH_PLACEHOLDER};

const BAR_CELLS: usize = 20;

fn draw_bar(width_percent: f64) -> String {
    let filled = ((width_percent / 100.0) * BAR_CELLS as f64).round() as usize;
    let filled = filled.min(BAR_CELLS);
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_CELLS - filled))
}

fn split_entry(text: &str) -> (&str, &str) {
    text.split_once(' ').unwrap_or((text, ""))
}

// Renders the session as plain lines: the list, the filter results, the
// detail card and the search prompt with its placeholder.
pub struct TerminalPresenter<W: Write> {
    out: W,
    placeholder: String,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            placeholder: SEARCH_PLACEHOLDER.to_string(),
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn prompt(&mut self) {
        let _ = write!(
            self.out,
            "{} [{}]> ",
            "search".bold().white(),
            self.placeholder.dimmed()
        );
        let _ = self.out.flush();
    }

    fn print_entries<'a>(&mut self, entries: impl Iterator<Item = &'a ListEntry>) {
        for entry in entries {
            let (number, name) = split_entry(&entry.text);
            let _ = writeln!(self.out, "  {} {}", number.bold().blue(), name);
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render_list(&mut self, entries: &[ListEntry]) {
        self.print_entries(entries.iter());
        let _ = writeln!(self.out);
    }

    fn update_visibility(&mut self, entries: &[ListEntry]) {
        let shown = entries.iter().filter(|e| e.visible).count();
        let _ = writeln!(
            self.out,
            ":: {:<10}: {} of {}",
            "Showing",
            shown.to_string().bold(),
            entries.len()
        );
        self.print_entries(entries.iter().filter(|e| e.visible));
        let _ = writeln!(self.out);
    }

    fn render_detail(&mut self, detail: &DetailModel) {
        let _ = writeln!(self.out, ":: {} ::", detail.label.bold().green());
        match detail.sprite.as_ref() {
            Some(sprite) => {
                let _ = writeln!(
                    self.out,
                    "   {:<16}{} ({})",
                    "sprite",
                    sprite.url.blue(),
                    sprite.alt
                );
            }
            None => {
                let _ = writeln!(self.out, "   {:<16}{}", "sprite", "none".dimmed());
            }
        }
        for bar in detail.bars.iter() {
            let _ = writeln!(
                self.out,
                "   {:<16}[{}] {:>3}  {}",
                bar.region,
                draw_bar(bar.width_percent).green(),
                bar.label.bold(),
                bar.width().dimmed()
            );
        }
        let _ = writeln!(self.out);
    }

    fn set_error_placeholder(&mut self, message: &str) {
        self.placeholder = message.to_string();
        let _ = writeln!(
            self.out,
            "{} [{}]",
            "search".bold().white(),
            self.placeholder.red()
        );
    }
}
