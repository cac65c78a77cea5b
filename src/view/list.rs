use std::sync::Arc;

use crate::fetcher::EntityRecord;
use crate::index::EntityIndex;

// Zero-padded to at least three digits plus a trailing space; wider ids are
// never truncated.
pub fn format_number(id: u32) -> String {
    format!("{:03} ", id)
}

pub fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// recovers the id from an entry's numeric prefix
pub fn entry_id(text: &str) -> Option<u32> {
    let text = text.trim_start();
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse().ok()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListEntry {
    pub text: String,
    pub visible: bool,
}

impl ListEntry {
    fn for_record(record: &EntityRecord) -> Self {
        Self {
            text: format!(
                "{}{}",
                format_number(record.id),
                capitalize_first(&record.name)
            ),
            visible: true,
        }
    }

    pub fn id(&self) -> Option<u32> {
        entry_id(&self.text)
    }

    pub fn matches(&self, needle_lower: &str) -> bool {
        self.text.to_lowercase().contains(needle_lower)
    }
}

#[derive(Clone, Debug)]
pub struct ListView {
    index: Arc<EntityIndex>,
    entries: Vec<ListEntry>,
    filter: String,
}

impl ListView {
    pub fn new(index: Arc<EntityIndex>) -> Self {
        let entries = index.iter().map(ListEntry::for_record).collect();
        Self {
            index,
            entries,
            filter: String::new(),
        }
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn visible(&self) -> impl Iterator<Item = &ListEntry> {
        self.entries.iter().filter(|e| e.visible)
    }

    pub fn filter_value(&self) -> &str {
        &self.filter
    }

    // Shows every entry whose text contains `value`, case-insensitively, and
    // hides the rest. Returns whether any visibility changed.
    pub fn apply_filter(&mut self, value: &str) -> bool {
        self.filter = value.to_string();
        let needle = value.to_lowercase();
        let mut changed = false;
        for entry in self.entries.iter_mut() {
            let visible = entry.matches(&needle);
            if entry.visible != visible {
                entry.visible = visible;
                changed = true;
            }
        }
        changed
    }

    pub fn position_of(&self, id: u32) -> Option<usize> {
        self.entries.iter().position(|e| e.id() == Some(id))
    }

    // the record behind a rendered entry, looked up through its displayed number
    pub fn resolve(&self, position: usize) -> Option<&EntityRecord> {
        let id = self.entries.get(position)?.id()?;
        self.index.get(id)
    }
}
