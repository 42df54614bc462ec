/// Viewer-clock time in milliseconds.
///
/// This is the timebase for scheduled camera flights. It is monotonic and
/// driven by whoever owns the loop, so tests can advance it explicitly.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct Time(pub f64);

impl Time {
    pub const ZERO: Time = Time(0.0);

    pub fn after_ms(self, ms: f64) -> Time {
        Time(self.0 + ms)
    }
}

#[cfg(test)]
mod tests {
    use super::Time;

    #[test]
    fn after_ms_offsets_and_orders() {
        let t = Time::ZERO.after_ms(1000.0);
        assert_eq!(t, Time(1000.0));
        assert!(Time::ZERO < t);
        assert!(t < t.after_ms(1.0));
    }
}
