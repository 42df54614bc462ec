use foundation::Time;

use crate::view::{BounceAnimation, CameraView, PanAnimation, ViewTarget};

/// A camera move waiting for its start delay to elapse.
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    pub target: ViewTarget,
    pub duration_ms: f64,
    pub start_delay_ms: f64,
    /// Projection resolution for the bounce component; `None` pans only.
    pub bounce_resolution: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
struct PendingFlight {
    due: Time,
    flight: Flight,
}

/// Fire-and-forget camera flight scheduler.
///
/// Holds at most one pending flight: scheduling while another is pending
/// replaces it, so the last request wins. Nothing is queued and nothing is
/// awaited; callers advance the clock from their loop and the flight fires
/// once its delay has elapsed.
#[derive(Debug, Default)]
pub struct FlightScheduler {
    now: Time,
    pending: Option<PendingFlight>,
}

impl FlightScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Time {
        self.now
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedules `flight`, replacing any pending one.
    pub fn schedule(&mut self, flight: Flight) {
        let due = self.now.after_ms(flight.start_delay_ms);
        self.pending = Some(PendingFlight { due, flight });
    }

    /// Advances the viewer clock and fires the pending flight if due.
    ///
    /// Pan/bounce descriptors are stamped here, at fire time, so the pan
    /// source reflects wherever the camera actually is when the flight
    /// starts.
    pub fn advance_to(&mut self, now: Time, view: &mut dyn CameraView) {
        self.now = now;
        let Some(pending) = self.pending.take() else {
            return;
        };
        if now < pending.due {
            self.pending = Some(pending);
            return;
        }

        let PendingFlight { due, flight } = pending;
        let pan = PanAnimation {
            duration_ms: flight.duration_ms,
            start: due,
            source: view.center(),
        };
        let bounce = flight.bounce_resolution.map(|resolution| BounceAnimation {
            duration_ms: flight.duration_ms,
            start: due,
            resolution,
        });
        view.before_render(pan, bounce);
        view.apply(&flight.target);
    }
}

#[cfg(test)]
mod tests {
    use super::{Flight, FlightScheduler};
    use crate::view::{BounceAnimation, CameraView, PanAnimation, ViewTarget};
    use foundation::{LonLat, Time};
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct RecordingView {
        center: LonLat,
        pans: Vec<PanAnimation>,
        bounces: Vec<BounceAnimation>,
        applied: Vec<ViewTarget>,
    }

    impl CameraView for RecordingView {
        fn center(&self) -> LonLat {
            self.center
        }

        fn before_render(&mut self, pan: PanAnimation, bounce: Option<BounceAnimation>) {
            self.pans.push(pan);
            if let Some(b) = bounce {
                self.bounces.push(b);
            }
        }

        fn apply(&mut self, target: &ViewTarget) {
            if let ViewTarget::CenterZoom { center, .. } = target {
                self.center = *center;
            }
            self.applied.push(target.clone());
        }
    }

    fn fly_to(center: LonLat) -> Flight {
        Flight {
            target: ViewTarget::CenterZoom { center, zoom: 5 },
            duration_ms: 5000.0,
            start_delay_ms: 1000.0,
            bounce_resolution: Some(0.03515625),
        }
    }

    #[test]
    fn fires_only_after_the_start_delay() {
        let mut scheduler = FlightScheduler::new();
        let mut view = RecordingView::default();

        scheduler.schedule(fly_to([10.0, 20.0]));
        scheduler.advance_to(Time(999.0), &mut view);
        assert!(view.applied.is_empty());
        assert!(scheduler.has_pending());

        scheduler.advance_to(Time(1000.0), &mut view);
        assert_eq!(view.applied.len(), 1);
        assert_eq!(view.pans.len(), 1);
        assert_eq!(view.bounces.len(), 1);
        assert!(!scheduler.has_pending());
    }

    #[test]
    fn last_request_wins() {
        let mut scheduler = FlightScheduler::new();
        let mut view = RecordingView::default();

        scheduler.schedule(fly_to([10.0, 20.0]));
        scheduler.advance_to(Time(500.0), &mut view);
        scheduler.schedule(fly_to([30.0, 40.0]));

        scheduler.advance_to(Time(5000.0), &mut view);
        assert_eq!(
            view.applied,
            vec![ViewTarget::CenterZoom {
                center: [30.0, 40.0],
                zoom: 5
            }]
        );
    }

    #[test]
    fn pan_only_flight_carries_no_bounce() {
        let mut scheduler = FlightScheduler::new();
        let mut view = RecordingView::default();

        scheduler.schedule(Flight {
            target: ViewTarget::CenterZoom {
                center: [1.0, 2.0],
                zoom: 5,
            },
            duration_ms: 1000.0,
            start_delay_ms: 1.0,
            bounce_resolution: None,
        });
        scheduler.advance_to(Time(2.0), &mut view);

        assert_eq!(view.pans.len(), 1);
        assert!(view.bounces.is_empty());
    }

    #[test]
    fn descriptors_are_stamped_at_fire_time() {
        let mut scheduler = FlightScheduler::new();
        let mut view = RecordingView {
            center: [5.0, 5.0],
            ..RecordingView::default()
        };

        scheduler.advance_to(Time(100.0), &mut view);
        scheduler.schedule(fly_to([10.0, 20.0]));
        scheduler.advance_to(Time(1200.0), &mut view);

        assert_eq!(view.pans[0].start, Time(1100.0));
        assert_eq!(view.pans[0].source, [5.0, 5.0]);
    }
}
