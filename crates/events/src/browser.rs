use camera::{BOUNCE_ZOOM, Flight, FlightScheduler, Transition, plan};
use layers::LayerPresets;
use scene::SceneModels;

use crate::record::EventRecord;
use crate::resolver::resolve;

/// Per-row view state for the event list.
///
/// `dates` is populated only for events with more than one reported
/// footprint; single-date events get no date sublist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub title: String,
    pub description: String,
    pub expanded: bool,
    pub dates: Vec<String>,
}

/// The event browser: list state plus the selection state machine.
///
/// `select` is the only transition trigger. It classifies the request
/// against the current selection, and on a real change synchronizes the
/// shared models first and schedules the camera flight last, so every model
/// subscriber observes consistent state before the camera moves.
#[derive(Debug)]
pub struct EventBrowser {
    records: Vec<EventRecord>,
    presets: LayerPresets,
    rows: Vec<EventRow>,
    selection: Option<(usize, Option<usize>)>,
}

impl EventBrowser {
    pub fn new(records: Vec<EventRecord>, presets: LayerPresets) -> Self {
        let rows = build_rows(&records);
        Self {
            records,
            presets,
            rows,
            selection: None,
        }
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn rows(&self) -> &[EventRow] {
        &self.rows
    }

    /// Current selection as `(event_index, date_index)`; `None` until the
    /// user picks an event.
    pub fn selection(&self) -> Option<(usize, Option<usize>)> {
        self.selection
    }

    /// Replaces the event list (a feed refresh) and clears the selection.
    pub fn set_records(&mut self, records: Vec<EventRecord>) {
        self.rows = build_rows(&records);
        self.records = records;
        self.selection = None;
    }

    /// Handles a click on an event (optionally on one of its dates).
    ///
    /// Repeating the current selection exactly is a free no-op: no model is
    /// touched and no flight is scheduled. Otherwise the selection advances,
    /// detail rows toggle, the date and layer models sync, and — when the
    /// footprint supports it — a flight is scheduled (fly with bounce for a
    /// new event, plain pan for a date scrub).
    pub fn select(
        &mut self,
        models: &mut SceneModels,
        scheduler: &mut FlightScheduler,
        event_index: usize,
        date_index: Option<usize>,
    ) -> Transition {
        if event_index >= self.records.len() {
            return Transition::NoChange;
        }
        let kind = match self.selection {
            Some((event, date)) if event == event_index && date == date_index => {
                return Transition::NoChange;
            }
            Some((event, _)) if event == event_index => Transition::SameEventNewDate,
            _ => Transition::NewEvent,
        };

        self.selection = Some((event_index, date_index));
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.expanded = i == event_index;
        }

        let record = &self.records[event_index];
        let geometry = if record.has_multiple_dates() {
            record.geometry_at(date_index.unwrap_or(0))
        } else {
            &record.geometries()[0]
        };

        models.date.select(geometry.date);

        let preset = resolve(&self.presets, &record.category);
        models.layers.clear();
        for layer in preset {
            models.layers.add(layer.id.clone(), layer.visible);
        }

        if let Some(nav) = plan(&geometry.shape, kind) {
            let bounce_resolution = if nav.animation.bounce {
                models.map.selected().resolution_at(BOUNCE_ZOOM)
            } else {
                None
            };
            scheduler.schedule(Flight {
                target: nav.target,
                duration_ms: nav.animation.duration_ms,
                start_delay_ms: nav.animation.start_delay_ms,
                bounce_resolution,
            });
        }

        kind
    }
}

fn build_rows(records: &[EventRecord]) -> Vec<EventRow> {
    records
        .iter()
        .map(|record| {
            let dates = if record.has_multiple_dates() {
                record
                    .geometries()
                    .iter()
                    .map(|g| g.date.format("%Y-%m-%d").to_string())
                    .collect()
            } else {
                Vec::new()
            };
            EventRow {
                title: record.title.clone(),
                description: record.description.clone(),
                expanded: false,
                dates,
            }
        })
        .collect()
}
