use crate::data::aggregate::filtered_indices;
use crate::data::model::CarDataset;
use crate::scene::{ExplorerView, Scene};

// ---------------------------------------------------------------------------
// Selection – the user's current navigation and filter choices
// ---------------------------------------------------------------------------

/// Current scene plus the three optional filters.  Fields are private so all
/// mutation goes through the setters; renderers borrow it read-only and
/// request changes via `SceneEvent`s.
///
/// Every setter is total: any value is accepted, including ones matching
/// zero records.  Handling the empty result is the renderers' job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    scene: Scene,
    manufacturer: Option<String>,
    year: Option<i32>,
    origin: Option<String>,
}

impl Selection {
    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn manufacturer(&self) -> Option<&str> {
        self.manufacturer.as_deref()
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Whether any filter is active.
    pub fn has_filters(&self) -> bool {
        self.manufacturer.is_some() || self.year.is_some() || self.origin.is_some()
    }

    pub fn go_to_scene(&mut self, scene: Scene) {
        self.scene = scene;
    }

    pub fn set_manufacturer(&mut self, manufacturer: Option<String>) {
        self.manufacturer = manufacturer;
    }

    pub fn set_year(&mut self, year: Option<i32>) {
        self.year = year;
    }

    pub fn set_origin(&mut self, origin: Option<String>) {
        self.origin = origin;
    }

    /// Back to scene 1 with all filters cleared.
    pub fn reset(&mut self) {
        *self = Selection::default();
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.  One owner (the app); no
/// renderer holds a copy.
pub struct AppState {
    /// Loaded dataset (None until the startup load succeeds).
    pub dataset: Option<CarDataset>,

    /// Scene index and active filters.
    pub selection: Selection,

    /// Indices of cars passing every active filter (cached per mutation).
    pub visible_indices: Vec<usize>,

    /// Which chart the Explorer scene shows.
    pub explorer_view: ExplorerView,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            selection: Selection::default(),
            visible_indices: Vec::new(),
            explorer_view: ExplorerView::default(),
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, keeping the narrative position but
    /// clearing filters that may not exist in the new data.
    pub fn set_dataset(&mut self, dataset: CarDataset) {
        self.selection.set_manufacturer(None);
        self.selection.set_year(None);
        self.selection.set_origin(None);
        self.visible_indices = (0..dataset.len()).collect();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
    }

    /// Recompute `visible_indices` after a selection change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(&ds.cars, &self.selection);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_returns_to_scene_one_with_no_filters() {
        let mut selection = Selection::default();
        selection.go_to_scene(Scene::Explorer);
        selection.set_manufacturer(Some("toyota".to_string()));
        selection.set_year(Some(1978));
        selection.set_origin(Some("Japan".to_string()));
        assert!(selection.has_filters());

        selection.reset();
        assert_eq!(selection.scene(), Scene::Overview);
        assert_eq!(selection.manufacturer(), None);
        assert_eq!(selection.year(), None);
        assert_eq!(selection.origin(), None);
        assert!(!selection.has_filters());
    }

    #[test]
    fn setters_accept_values_with_no_matching_records() {
        let mut selection = Selection::default();
        selection.set_year(Some(2999));
        selection.set_manufacturer(Some("delorean".to_string()));
        assert_eq!(selection.year(), Some(2999));
        assert_eq!(selection.manufacturer(), Some("delorean"));
    }

    #[test]
    fn set_dataset_clears_filters_and_shows_everything() {
        use crate::data::model::{Car, CarDataset};

        let cars = vec![Car {
            name: "plymouth duster".to_string(),
            mpg: 22.0,
            cylinders: 6,
            displacement: 198.0,
            horsepower: 95.0,
            weight: 2833.0,
            acceleration: 15.5,
            year: 1970,
            origin: "USA".to_string(),
        }];

        let mut state = AppState::default();
        state.selection.set_origin(Some("Japan".to_string()));
        state.set_dataset(CarDataset::from_cars(cars));

        assert_eq!(state.selection.origin(), None);
        assert_eq!(state.visible_indices, vec![0]);
        assert!(!state.loading);
    }
}
