use foundation::{Extent, GeometryShape};

use crate::view::ViewTarget;

/// Zoom applied when navigating to a point footprint.
pub const POINT_ZOOM: u8 = 5;

/// Zoom level whose resolution parameterizes the bounce apex.
pub const BOUNCE_ZOOM: usize = 4;

const FLY_DURATION_MS: f64 = 5000.0;
const FLY_DELAY_MS: f64 = 1000.0;
const PAN_DURATION_MS: f64 = 1000.0;
const PAN_DELAY_MS: f64 = 1.0;

/// Classification of a selection change.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Selection identical to the current one; nothing happens at all.
    NoChange,
    /// A different event was picked.
    NewEvent,
    /// Same event, different reported date.
    SameEventNewDate,
}

/// How the camera gets to its target.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnimationProfile {
    pub duration_ms: f64,
    pub start_delay_ms: f64,
    pub bounce: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationPlan {
    pub target: ViewTarget,
    pub animation: AnimationProfile,
}

/// Computes the view target and animation profile for a selection change.
///
/// Returns `None` when there is nothing to navigate to: a `NoChange`
/// transition, an unsupported shape, or a polygon without exactly four ring
/// corners. The caller leaves the current view unchanged in that case.
///
/// A full fly (with bounce) only plays for a genuinely new event; scrubbing
/// between dates of the same event pans without the bounce.
pub fn plan(shape: &GeometryShape, kind: Transition) -> Option<NavigationPlan> {
    let animation = match kind {
        Transition::NoChange => return None,
        Transition::NewEvent => AnimationProfile {
            duration_ms: FLY_DURATION_MS,
            start_delay_ms: FLY_DELAY_MS,
            bounce: true,
        },
        Transition::SameEventNewDate => AnimationProfile {
            duration_ms: PAN_DURATION_MS,
            start_delay_ms: PAN_DELAY_MS,
            bounce: false,
        },
    };

    let target = match shape {
        GeometryShape::Point(center) => ViewTarget::CenterZoom {
            center: *center,
            zoom: POINT_ZOOM,
        },
        GeometryShape::Polygon(corners) if corners.len() == 4 => {
            // Reorder the four ring corners into the extent order the
            // fitting routine expects.
            ViewTarget::Extent(Extent::new([
                corners[1][0],
                corners[0][0],
                corners[3][0],
                corners[2][0],
            ]))
        }
        _ => return None,
    };

    Some(NavigationPlan { target, animation })
}

#[cfg(test)]
mod tests {
    use super::{POINT_ZOOM, Transition, plan};
    use crate::view::ViewTarget;
    use foundation::{Extent, GeometryShape};
    use pretty_assertions::assert_eq;

    #[test]
    fn point_targets_center_and_zoom() {
        let shape = GeometryShape::Point([10.0, 20.0]);
        let nav = plan(&shape, Transition::NewEvent).unwrap();
        assert_eq!(
            nav.target,
            ViewTarget::CenterZoom {
                center: [10.0, 20.0],
                zoom: POINT_ZOOM
            }
        );
    }

    #[test]
    fn four_corner_polygon_reorders_into_an_extent() {
        let shape = GeometryShape::Polygon(vec![
            [1.0, 0.0],
            [2.0, 0.0],
            [3.0, 0.0],
            [4.0, 0.0],
        ]);
        let nav = plan(&shape, Transition::NewEvent).unwrap();
        assert_eq!(
            nav.target,
            ViewTarget::Extent(Extent::new([2.0, 1.0, 4.0, 3.0]))
        );
    }

    #[test]
    fn other_corner_counts_yield_no_navigation() {
        let shape = GeometryShape::Polygon(vec![[1.0, 0.0], [2.0, 0.0], [3.0, 0.0]]);
        assert_eq!(plan(&shape, Transition::NewEvent), None);
    }

    #[test]
    fn unsupported_shapes_yield_no_navigation() {
        assert_eq!(plan(&GeometryShape::Unsupported, Transition::NewEvent), None);
    }

    #[test]
    fn new_event_flies_with_bounce() {
        let nav = plan(&GeometryShape::Point([0.0, 0.0]), Transition::NewEvent).unwrap();
        assert_eq!(nav.animation.duration_ms, 5000.0);
        assert_eq!(nav.animation.start_delay_ms, 1000.0);
        assert!(nav.animation.bounce);
    }

    #[test]
    fn date_scrub_pans_without_bounce() {
        let nav = plan(
            &GeometryShape::Point([0.0, 0.0]),
            Transition::SameEventNewDate,
        )
        .unwrap();
        assert_eq!(nav.animation.duration_ms, 1000.0);
        assert_eq!(nav.animation.start_delay_ms, 1.0);
        assert!(!nav.animation.bounce);
    }

    #[test]
    fn no_change_never_plans() {
        assert_eq!(plan(&GeometryShape::Point([0.0, 0.0]), Transition::NoChange), None);
    }
}
