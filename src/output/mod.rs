pub mod terminal;

use crate::index::EntityIndex;
use crate::view::{capitalize_first, format_number};

pub use terminal::TerminalPresenter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

// one list line per record, in index order
pub fn render_text(index: &EntityIndex) -> Vec<u8> {
    let mut out = String::new();
    for r in index.iter() {
        out.push_str(&format_number(r.id));
        out.push_str(&capitalize_first(&r.name));
        out.push('\n');
    }
    out.into_bytes()
}

pub fn render_json(index: &EntityIndex) -> Vec<u8> {
    serde_json::to_vec_pretty(index.as_slice()).unwrap_or_else(|_| b"[]\n".to_vec())
}

pub fn render(index: &EntityIndex, format: OutputFormat) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(index),
        OutputFormat::Json => render_json(index),
    }
}
