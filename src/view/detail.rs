use std::sync::Arc;

use crate::fetcher::EntityRecord;
use crate::index::EntityIndex;

use super::list::capitalize_first;

// the stat bars the detail surface has room for, in display order
pub const STAT_REGIONS: [&str; 6] = [
    "hp",
    "attack",
    "defense",
    "special-attack",
    "special-defense",
    "speed",
];

const MAX_BASE_STAT: f64 = 255.0;

pub fn stat_width_percent(base: u8) -> f64 {
    (f64::from(base) / MAX_BASE_STAT) * 100.0
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub url: String,
    pub alt: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatBar {
    pub region: &'static str,
    pub width_percent: f64,
    pub label: String,
}

impl StatBar {
    pub fn width(&self) -> String {
        format!("{}%", self.width_percent)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DetailModel {
    pub id: u32,
    pub label: String,
    pub sprite: Option<Sprite>,
    pub bars: Vec<StatBar>,
}

impl DetailModel {
    pub fn for_record(record: &EntityRecord) -> Self {
        // alt text is the raw name glued to "sprite", e.g. "pikachusprite"
        let sprite = record.sprite_url.as_ref().map(|url| Sprite {
            url: url.clone(),
            alt: format!("{}sprite", record.name),
        });

        let bars = record
            .stats
            .iter()
            .filter_map(|stat| {
                let region = STAT_REGIONS.iter().copied().find(|r| *r == stat.name)?;
                Some(StatBar {
                    region,
                    width_percent: stat_width_percent(stat.base),
                    label: stat.base.to_string(),
                })
            })
            .collect();

        Self {
            id: record.id,
            label: capitalize_first(&record.name),
            sprite,
            bars,
        }
    }

    pub fn bar(&self, region: &str) -> Option<&StatBar> {
        self.bars.iter().find(|b| b.region == region)
    }
}

#[derive(Clone, Debug)]
pub struct DetailView {
    index: Arc<EntityIndex>,
    shown: Option<DetailModel>,
}

impl DetailView {
    pub fn new(index: Arc<EntityIndex>) -> Self {
        Self { index, shown: None }
    }

    // Replaces whatever was shown with the record for `id`. Unknown ids leave
    // the current detail untouched.
    pub fn show(&mut self, id: u32) -> Option<&DetailModel> {
        let record = self.index.get(id)?;
        self.shown = Some(DetailModel::for_record(record));
        self.shown.as_ref()
    }

    pub fn current(&self) -> Option<&DetailModel> {
        self.shown.as_ref()
    }
}
