use foundation::{Extent, LonLat, Time};

/// Pan descriptor handed to the view's pre-render hook.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PanAnimation {
    pub duration_ms: f64,
    pub start: Time,
    /// Camera center when the flight fired.
    pub source: LonLat,
}

/// Bounce descriptor. `resolution` is the projection resolution the bounce
/// apex is computed against.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BounceAnimation {
    pub duration_ms: f64,
    pub start: Time,
    pub resolution: f64,
}

/// Where the camera should end up.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewTarget {
    CenterZoom { center: LonLat, zoom: u8 },
    Extent(Extent),
}

/// Camera/view service consumed by the flight scheduler.
///
/// The easing math and tile reprojection behind these calls are the map
/// library's concern; this module only sequences them: pre-render animations
/// first, then the target directive.
pub trait CameraView {
    fn center(&self) -> LonLat;
    fn before_render(&mut self, pan: PanAnimation, bounce: Option<BounceAnimation>);
    fn apply(&mut self, target: &ViewTarget);
}
