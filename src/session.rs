use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{debug, warn};

use crate::fetcher::RecordSource;
use crate::index::EntityIndex;
use crate::loader::{self, LoadError};
use crate::view::{DetailModel, DetailView, ListView, Presenter, LOAD_ERROR_PLACEHOLDER};

// Everything a viewing session owns: the index snapshot, the two views built
// over it and the single selection slot.
#[derive(Clone, Debug)]
pub struct Session {
    index: Arc<EntityIndex>,
    list: ListView,
    detail: DetailView,
    selection: Option<u32>,
}

impl Session {
    // Builds the views over `index` and renders the list once.
    pub fn open<P: Presenter>(index: EntityIndex, presenter: &mut P) -> Self {
        let index = Arc::new(index);
        let list = ListView::new(index.clone());
        let detail = DetailView::new(index.clone());
        presenter.render_list(list.entries());
        Self {
            index,
            list,
            detail,
            selection: None,
        }
    }

    // Loads the whole catalog and opens a session over it. On failure only the
    // error placeholder is presented; nothing is listed or detailed.
    pub async fn load<S: RecordSource, P: Presenter>(
        source: &S,
        count: u32,
        pb: &ProgressBar,
        presenter: &mut P,
    ) -> Result<Self, LoadError> {
        match loader::load_index(source, count, pb).await {
            Ok(index) => Ok(Self::open(index, presenter)),
            Err(e) => {
                warn!(error = %e, "catalog load failed");
                presenter.set_error_placeholder(LOAD_ERROR_PLACEHOLDER);
                Err(e)
            }
        }
    }

    pub fn index(&self) -> &EntityIndex {
        &self.index
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    pub fn selection(&self) -> Option<u32> {
        self.selection
    }

    pub fn filter_value(&self) -> &str {
        self.list.filter_value()
    }

    pub fn current_detail(&self) -> Option<&DetailModel> {
        self.detail.current()
    }

    // Presents the current state again: the entries the active filter leaves
    // visible, then the selected detail if there is one.
    pub fn redraw<P: Presenter>(&self, presenter: &mut P) {
        presenter.update_visibility(self.list.entries());
        if let Some(detail) = self.detail.current() {
            presenter.render_detail(detail);
        }
    }

    pub fn filter<P: Presenter>(&mut self, value: &str, presenter: &mut P) {
        let changed = self.list.apply_filter(value);
        debug!(filter = value, changed, "filter applied");
        presenter.update_visibility(self.list.entries());
    }

    // Selects the rendered entry at `position` and shows its record.
    pub fn select_entry<P: Presenter>(&mut self, position: usize, presenter: &mut P) -> Option<u32> {
        let id = self.list.resolve(position)?.id;
        let detail = self.detail.show(id)?;
        presenter.render_detail(detail);
        self.selection = Some(id);
        Some(id)
    }

    pub fn select_id<P: Presenter>(&mut self, id: u32, presenter: &mut P) -> Option<u32> {
        let position = self.list.position_of(id)?;
        self.select_entry(position, presenter)
    }
}
