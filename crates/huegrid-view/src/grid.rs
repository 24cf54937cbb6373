use huegrid_core::{ColorCollection, HexColor};
use huegrid_pipeline::ExplorerState;
use serde::Serialize;

use crate::controls::{Controls, ControlsView};
use crate::swatch::SwatchView;

pub const SKELETON_PLACEHOLDERS: usize = 24;
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load colors. Please try again.";
pub const EMPTY_MESSAGE: &str =
    "No colors found for these values. Try adjusting the saturation or lightness.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridBody {
    Skeleton { placeholders: usize },
    Swatches { swatches: Vec<SwatchView> },
    Empty { message: &'static str },
    /// A failure cleared the grid; only the error banner is shown.
    Blank,
}

/// One full frame of the explorer screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridView {
    pub controls: ControlsView,
    pub error: Option<&'static str>,
    pub count_label: Option<String>,
    pub body: GridBody,
}

impl GridView {
    /// Builds the frame for `state`. The controls are locked for exactly as
    /// long as the state is loading.
    pub fn build(
        state: &ExplorerState,
        controls: &mut Controls,
        acknowledged: Option<&HexColor>,
    ) -> Self {
        controls.set_disabled(state.is_loading());

        let (error, count_label, body) = match state {
            // Idle renders like a load that has not answered yet.
            ExplorerState::Idle | ExplorerState::Loading { .. } => (
                None,
                None,
                GridBody::Skeleton {
                    placeholders: SKELETON_PLACEHOLDERS,
                },
            ),
            ExplorerState::Ready { collection, .. } if collection.is_empty() => (
                None,
                None,
                GridBody::Empty {
                    message: EMPTY_MESSAGE,
                },
            ),
            ExplorerState::Ready { collection, .. } => (
                None,
                Some(count_label(collection.len())),
                swatches(collection, acknowledged),
            ),
            ExplorerState::Failed { stale, .. } => (
                Some(LOAD_ERROR_MESSAGE),
                None,
                stale
                    .as_ref()
                    .map_or(GridBody::Blank, |collection| swatches(collection, acknowledged)),
            ),
        };

        Self {
            controls: controls.view(),
            error,
            count_label,
            body,
        }
    }

    pub fn swatches(&self) -> &[SwatchView] {
        match &self.body {
            GridBody::Swatches { swatches } => swatches,
            _ => &[],
        }
    }
}

pub fn count_label(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("Showing {} color{}", count, plural)
}

fn swatches(collection: &ColorCollection, acknowledged: Option<&HexColor>) -> GridBody {
    GridBody::Swatches {
        swatches: collection
            .iter()
            .map(|record| SwatchView::from_record(record, acknowledged))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huegrid_core::{
        AggregationError, ColorRecord, Hsl, Percent, Rgb, SwatchParams,
    };

    fn params() -> SwatchParams {
        SwatchParams::new(Percent::new(100).unwrap(), Percent::new(50).unwrap())
    }

    fn record(name: &str, hue: u16, hex: &str) -> ColorRecord {
        ColorRecord {
            name: name.into(),
            hue,
            rgb: Rgb::new(250, 250, 250),
            hsl: Hsl::new(hue, 100, 50).unwrap(),
            hex: hex.parse().unwrap(),
        }
    }

    fn collection() -> ColorCollection {
        ColorCollection::from_batch(vec![
            record("Red", 0, "#FF0000"),
            record("Lime", 120, "#00FF00"),
        ])
    }

    #[test]
    fn loading_shows_skeletons_and_locks_controls() {
        let mut controls = Controls::new(params());
        let state = ExplorerState::Loading {
            generation: 1,
            params: params(),
            previous: None,
        };
        let view = GridView::build(&state, &mut controls, None);
        assert_eq!(view.body, GridBody::Skeleton { placeholders: 24 });
        assert!(view.controls.disabled);
        assert!(controls.is_disabled());
        assert_eq!(view.count_label, None);
    }

    #[test]
    fn ready_lists_swatches_in_order() {
        let mut controls = Controls::new(params());
        controls.set_disabled(true);
        let state = ExplorerState::Ready {
            generation: 1,
            params: params(),
            collection: collection(),
        };
        let hex: HexColor = "#00ff00".parse().unwrap();
        let view = GridView::build(&state, &mut controls, Some(&hex));

        assert!(!view.controls.disabled);
        assert_eq!(view.count_label.as_deref(), Some("Showing 2 colors"));
        let keys: Vec<&str> = view.swatches().iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, ["Red-0", "Lime-120"]);
        let acked: Vec<bool> = view.swatches().iter().map(|s| s.ack_visible).collect();
        assert_eq!(acked, [false, true]);
    }

    #[test]
    fn empty_collection_shows_hint() {
        let mut controls = Controls::new(params());
        let state = ExplorerState::Ready {
            generation: 1,
            params: params(),
            collection: ColorCollection::default(),
        };
        let view = GridView::build(&state, &mut controls, None);
        assert_eq!(view.body, GridBody::Empty { message: EMPTY_MESSAGE });
        assert_eq!(view.count_label, None);
    }

    #[test]
    fn failure_shows_banner_with_or_without_stale_grid() {
        let mut controls = Controls::new(params());
        let error = AggregationError::PartialBatch {
            failed: 1,
            total: 360,
            status: 500,
        };
        let cleared = ExplorerState::Failed {
            generation: 2,
            params: params(),
            error: error.clone(),
            stale: None,
        };
        let view = GridView::build(&cleared, &mut controls, None);
        assert_eq!(view.error, Some(LOAD_ERROR_MESSAGE));
        assert_eq!(view.body, GridBody::Blank);

        let preserved = ExplorerState::Failed {
            generation: 2,
            params: params(),
            error,
            stale: Some(collection()),
        };
        let view = GridView::build(&preserved, &mut controls, None);
        assert_eq!(view.error, Some(LOAD_ERROR_MESSAGE));
        assert_eq!(view.swatches().len(), 2);
    }

    #[test]
    fn count_label_pluralizes() {
        assert_eq!(count_label(1), "Showing 1 color");
        assert_eq!(count_label(37), "Showing 37 colors");
    }
}
