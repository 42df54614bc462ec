use chrono::{DateTime, Utc};
use runtime::{Hub, SubscriptionId};

/// Notification emitted by [`DateModel::select`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateEvent {
    Selected { instant: DateTime<Utc> },
}

/// The viewer's selected date.
///
/// Reselecting the identical instant still emits; date subscribers are
/// expected to be cheap on redundant updates.
#[derive(Debug, Default)]
pub struct DateModel {
    selected: Option<DateTime<Utc>>,
    events: Hub<DateEvent>,
}

impl DateModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<DateTime<Utc>> {
        self.selected
    }

    pub fn select(&mut self, instant: DateTime<Utc>) {
        self.selected = Some(instant);
        self.events.emit(&DateEvent::Selected { instant });
    }

    pub fn on(&mut self, handler: impl FnMut(&DateEvent) + 'static) -> SubscriptionId {
        self.events.on(handler)
    }

    pub fn off(&mut self, id: SubscriptionId) -> bool {
        self.events.off(id)
    }
}
