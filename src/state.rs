use std::path::Path;

use crate::dashboard::DashboardViews;
use crate::data::filter::FilterCriteria;
use crate::data::model::ListingStore;
use crate::settings::{Palettes, Settings};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded listings (None until user loads a file).
    pub store: Option<ListingStore>,

    /// Current side panel selection.
    pub criteria: FilterCriteria,

    /// Chart data for `criteria` (cached).
    pub views: Option<DashboardViews>,

    pub histogram_bins: usize,
    pub palettes: Palettes,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl AppState {
    pub fn new(settings: &Settings, palettes: Palettes) -> Self {
        Self {
            store: None,
            criteria: FilterCriteria::full_range(&ListingStore::default()),
            views: None,
            histogram_bins: settings.histogram_bins,
            palettes,
            status_message: None,
            loading: false,
        }
    }

    /// Ingest a newly loaded store, reset filters and rebuild the charts.
    pub fn set_store(&mut self, store: ListingStore) {
        self.criteria = FilterCriteria::full_range(&store);
        self.store = Some(store);
        self.status_message = None;
        self.loading = false;
        self.refresh();
    }

    /// Load a dataset from disk, reporting failure in the status line.
    pub fn load_path(&mut self, path: &Path) {
        self.loading = true;
        match crate::data::loader::load_file(path) {
            Ok(store) => {
                log::info!(
                    "Loaded {} listings from {} across cities {:?}",
                    store.len(),
                    path.display(),
                    store.cities()
                );
                self.set_store(store);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                self.loading = false;
            }
        }
    }

    /// Recompute the chart data after a filter change.
    pub fn refresh(&mut self) {
        let Some(store) = &self.store else {
            return;
        };
        match DashboardViews::build(store, &self.criteria, self.histogram_bins, &self.palettes) {
            Ok(views) => {
                self.views = Some(views);
                self.status_message = None;
            }
            Err(e) => {
                log::warn!("Filter rejected: {e}");
                self.views = None;
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Put every widget back to its "show everything" position.
    pub fn reset_filters(&mut self) {
        if let Some(store) = &self.store {
            self.criteria = FilterCriteria::full_range(store);
            self.refresh();
        }
    }

    /// Number of listings passing the current filters.
    pub fn visible_count(&self) -> usize {
        self.views.as_ref().map_or(0, |v| v.visible_indices.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::AnimalFilter;
    use crate::data::model::tests::scenario_store;

    fn state() -> AppState {
        let settings = Settings::default();
        let palettes = settings.palettes().unwrap();
        AppState::new(&settings, palettes)
    }

    #[test]
    fn new_store_shows_everything() {
        let mut s = state();
        s.set_store(scenario_store());
        assert_eq!(s.visible_count(), 3);
        assert_eq!(s.criteria.city, None);
        assert_eq!(s.criteria.animals, AnimalFilter::Any);
    }

    #[test]
    fn refresh_follows_criteria_and_reset_restores() {
        let mut s = state();
        s.set_store(scenario_store());
        s.criteria.city = Some("A".to_string());
        s.refresh();
        assert_eq!(s.visible_count(), 2);

        s.reset_filters();
        assert_eq!(s.visible_count(), 3);
    }

    #[test]
    fn invalid_range_reported_in_status() {
        let mut s = state();
        s.set_store(scenario_store());
        s.criteria.rooms.min = 5;
        s.criteria.rooms.max = 1;
        s.refresh();
        assert!(s.views.is_none());
        assert!(s.status_message.as_deref().unwrap_or("").contains("room range"));
    }

    #[test]
    fn failed_load_keeps_previous_store() {
        let mut s = state();
        s.set_store(scenario_store());
        s.load_path(Path::new("/definitely/not/here.csv"));
        assert!(s.status_message.is_some());
        assert!(!s.loading);
        assert_eq!(s.store.as_ref().map(|st| st.len()), Some(3));
    }
}
