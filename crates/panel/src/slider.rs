/// Single-value slider surface (opacity).
///
/// The real widget lives in the UI toolkit; the binding controller only
/// needs to read and conditionally write its value.
pub trait SliderControl {
    fn value(&self) -> f64;
    fn set_value(&mut self, value: f64);
}

/// Two-handle slider surface (color-range thresholds), carrying integer
/// indices into a discrete scale.
pub trait RangeControl {
    fn value(&self) -> [u32; 2];
    fn set_value(&mut self, value: [u32; 2]);
}

/// Plain in-memory slider, for headless use and tests.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ValueSlider {
    value: f64,
}

impl ValueSlider {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl SliderControl for ValueSlider {
    fn value(&self) -> f64 {
        self.value
    }

    fn set_value(&mut self, value: f64) {
        self.value = value;
    }
}

/// Plain in-memory range slider, for headless use and tests.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RangeSlider {
    value: [u32; 2],
}

impl RangeSlider {
    pub fn new(value: [u32; 2]) -> Self {
        Self { value }
    }
}

impl RangeControl for RangeSlider {
    fn value(&self) -> [u32; 2] {
        self.value
    }

    fn set_value(&mut self, value: [u32; 2]) {
        self.value = value;
    }
}
