pub mod detail;
pub mod list;

pub use detail::{DetailModel, DetailView, Sprite, StatBar, STAT_REGIONS};
pub use list::{capitalize_first, entry_id, format_number, ListEntry, ListView};

pub const SEARCH_PLACEHOLDER: &str = "Search";
pub const LOAD_ERROR_PLACEHOLDER: &str = "Error Loading Pokemon";

// The presentation surface. The core pipeline only talks to this, so anything
// from a terminal to a test recorder can sit behind it.
pub trait Presenter {
    // called once, after the index is built
    fn render_list(&mut self, entries: &[ListEntry]);

    // visibility changed after a filter update; entries are never added or removed
    fn update_visibility(&mut self, entries: &[ListEntry]);

    fn render_detail(&mut self, detail: &DetailModel);

    fn set_error_placeholder(&mut self, message: &str);
}
