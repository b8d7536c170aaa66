//! Unit list state

use crate::api::{ApiError, Unit};
use crate::app::route::Route;

use super::Load;

/// State of the unit list (`/student`)
#[derive(Debug, Clone, Default)]
pub struct UnitListView {
    pub units: Load<Vec<Unit>>,
    /// Highlighted row
    pub selected: usize,
}

impl UnitListView {
    pub const LOADING: &'static str = "Loading chapters...";
    pub const FAILED: &'static str = "Failed to load units";
    pub const EMPTY: &'static str = "No chapters found.";
    pub const HEADING: &'static str = "Available Chapters";

    /// Store the outcome of `GET /units`
    pub fn apply(&mut self, result: Result<Vec<Unit>, ApiError>) {
        self.units = match result {
            Ok(units) => {
                tracing::info!(count = units.len(), "units loaded");
                Load::Ready(units)
            }
            Err(e) => {
                tracing::warn!(status = ?e.status(), error = %e, "failed to load units");
                Load::Failed(Self::FAILED)
            }
        };
        self.selected = 0;
    }

    fn len(&self) -> usize {
        self.units.ready().map_or(0, Vec::len)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.len().saturating_sub(1);
    }

    pub fn selected_unit(&self) -> Option<&Unit> {
        self.units.ready()?.get(self.selected)
    }

    /// Chapter route for the highlighted unit
    pub fn open_selected(&self) -> Option<Route> {
        self.selected_unit().map(|unit| Route::Chapter(unit.unit_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::UnitId;

    fn loaded(n: i64) -> UnitListView {
        let mut view = UnitListView::default();
        view.apply(Ok((1..=n).map(|i| Unit::new(i * 10, format!("Unit {}", i))).collect()));
        view
    }

    #[test]
    fn starts_loading() {
        assert!(UnitListView::default().units.is_loading());
    }

    #[test]
    fn failure_sets_fixed_message() {
        let mut view = UnitListView::default();
        view.apply(Err(ApiError::ApiError { status: 500, message: "boom".into() }));
        assert_eq!(view.units.error(), Some(UnitListView::FAILED));
        assert!(view.open_selected().is_none());
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut view = loaded(3);
        view.select_prev();
        assert_eq!(view.selected, 0);
        view.select_next();
        view.select_next();
        view.select_next();
        assert_eq!(view.selected, 2);
        view.select_first();
        assert_eq!(view.selected, 0);
        view.select_last();
        assert_eq!(view.selected, 2);
    }

    #[test]
    fn open_selected_links_to_chapter() {
        let mut view = loaded(2);
        view.select_next();
        assert_eq!(view.open_selected(), Some(Route::Chapter(UnitId(20))));
    }

    #[test]
    fn empty_list_has_nothing_to_open() {
        let mut view = loaded(0);
        view.select_last();
        assert_eq!(view.selected, 0);
        assert!(view.open_selected().is_none());
    }
}
