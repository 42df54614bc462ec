use std::path::PathBuf;

use camera::{BounceAnimation, CameraView, FlightScheduler, PanAnimation, ViewTarget};
use clap::Parser;
use events::{EventBrowser, ingest};
use foundation::{LonLat, Time};
use layers::{LayerPresets, PaletteConfig};
use panel::{OptionsPanel, ValueSlider};
use scene::{DateEvent, LayerEvent, SceneModels};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Headless demonstration of the event browser and layer-options panel.
///
/// Fetches the natural-event feed, wires the shared models, walks through a
/// couple of selections, and drives the flight scheduler against a logging
/// camera.
#[derive(Debug, Parser)]
struct Args {
    /// Event feed endpoint.
    #[arg(long, default_value = "https://eonet.gsfc.nasa.gov/api/v1/events")]
    feed_url: String,

    /// Optional preset-table JSON; falls back to the built-in table.
    #[arg(long)]
    presets: Option<PathBuf>,

    /// How many events to list.
    #[arg(long, default_value_t = 10)]
    limit: usize,
}

/// Camera that logs directives instead of rendering.
#[derive(Debug, Default)]
struct LogCamera {
    center: LonLat,
}

impl CameraView for LogCamera {
    fn center(&self) -> LonLat {
        self.center
    }

    fn before_render(&mut self, pan: PanAnimation, bounce: Option<BounceAnimation>) {
        info!(
            duration_ms = pan.duration_ms,
            bounce = bounce.is_some(),
            "camera animation"
        );
    }

    fn apply(&mut self, target: &ViewTarget) {
        match target {
            ViewTarget::CenterZoom { center, zoom } => {
                self.center = *center;
                info!(lon = center[0], lat = center[1], zoom, "camera centered");
            }
            ViewTarget::Extent(extent) => {
                info!(extent = ?extent.0, "camera fit to extent");
            }
        }
    }
}

fn load_presets(path: Option<&PathBuf>) -> LayerPresets {
    let Some(path) = path else {
        return LayerPresets::builtin();
    };
    match std::fs::read_to_string(path).map_err(|e| e.to_string()) {
        Ok(text) => match LayerPresets::from_json(&text) {
            Ok(presets) => presets,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "bad preset table, using built-in");
                LayerPresets::builtin()
            }
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "unreadable preset table, using built-in");
            LayerPresets::builtin()
        }
    }
}

async fn fetch_feed(url: &str) -> Result<String, reqwest::Error> {
    reqwest::get(url).await?.error_for_status()?.text().await
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let presets = load_presets(args.presets.as_ref());

    // Feed failures are tolerated: the browser renders an empty list.
    let text = match fetch_feed(&args.feed_url).await {
        Ok(text) => text,
        Err(e) => {
            warn!(url = %args.feed_url, error = %e, "feed fetch failed");
            String::from("{}")
        }
    };
    let records = match ingest(&text) {
        Ok((records, report)) => {
            info!(
                accepted = report.accepted,
                dropped = report.dropped,
                "feed ingested"
            );
            records
        }
        Err(e) => {
            warn!(error = %e, "feed parse failed");
            Vec::new()
        }
    };

    let mut models = SceneModels::new();
    models.layers.on(|event| match event {
        LayerEvent::Added { id, visible } => info!(layer = %id, visible, "layer added"),
        LayerEvent::Removed { id } => info!(layer = %id, "layer removed"),
        LayerEvent::Cleared => info!("layers cleared"),
        LayerEvent::Opacity { id, opacity } => info!(layer = %id, opacity, "layer opacity"),
    });
    models.date.on(|DateEvent::Selected { instant }| {
        info!(date = %instant.format("%Y-%m-%d"), "date selected");
    });

    let mut browser = EventBrowser::new(records, presets);
    for row in browser.rows().iter().take(args.limit) {
        info!(title = %row.title, dates = row.dates.len(), "event");
    }
    if browser.rows().is_empty() {
        info!("no events available");
        return;
    }

    let mut scheduler = FlightScheduler::new();
    let mut view = LogCamera::default();

    // Fly to the first event, letting the start delay elapse on our
    // cooperative clock.
    browser.select(&mut models, &mut scheduler, 0, None);
    scheduler.advance_to(Time(1000.0), &mut view);

    // If it has more than one reported date, scrub to the second one.
    if browser.records()[0].has_multiple_dates() {
        browser.select(&mut models, &mut scheduler, 0, Some(1));
        scheduler.advance_to(Time(1002.0), &mut view);
    }

    // Open the options panel for the top active layer and nudge opacity.
    let Some(layer) = models.layers.active().first().map(|l| l.id.clone()) else {
        return;
    };
    let opened = OptionsPanel::open(
        &mut models,
        &PaletteConfig::default(),
        layer,
        Box::new(ValueSlider::new(1.0)),
        None,
    );
    match opened {
        Ok(mut panel) => {
            panel.slide_opacity(&mut models, 0.5);
            info!(label = %panel.opacity_label(), "opacity adjusted");
            panel.close(&mut models);
        }
        Err(e) => warn!(error = %e, "options panel failed to open"),
    }
}
