/// Geographic position as `[lon, lat]` in degrees.
pub type LonLat = [f64; 2];

/// Map extent in the scalar order the view-fitting routine expects.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Extent(pub [f64; 4]);

impl Extent {
    pub fn new(values: [f64; 4]) -> Self {
        Extent(values)
    }
}

/// Shape of one dated event footprint.
///
/// Feed documents can carry shapes the viewer cannot navigate to; those parse
/// to `Unsupported` so model sync still proceeds without a camera move.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryShape {
    Point(LonLat),
    Polygon(Vec<LonLat>),
    Unsupported,
}

impl GeometryShape {
    pub fn is_supported(&self) -> bool {
        !matches!(self, GeometryShape::Unsupported)
    }
}
