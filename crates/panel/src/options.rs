use std::cell::{Ref, RefCell};
use std::rc::Rc;

use layers::{LayerId, LayerPaletteSpec, PaletteConfig, PaletteId, Scale, translate};
use runtime::SubscriptionId;
use scene::{LayerEvent, PaletteEvent, SceneModels};

use crate::slider::{RangeControl, SliderControl};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelError {
    UnknownPalette(PaletteId),
    EmptyScale(PaletteId),
}

impl std::fmt::Display for PanelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelError::UnknownPalette(id) => write!(f, "no rendered palette \"{id}\""),
            PanelError::EmptyScale(id) => write!(f, "rendered palette \"{id}\" has an empty scale"),
        }
    }
}

impl std::error::Error for PanelError {}

/// Widget-facing state of an open dialog. Shared with the model
/// subscriptions, which refresh it when a relevant notification arrives.
pub struct PanelWidgets {
    pub opacity_slider: Box<dyn SliderControl>,
    pub opacity_label: String,
    pub range_slider: Option<Box<dyn RangeControl>>,
    pub range_min_label: String,
    pub range_max_label: String,
    /// Set when the bound layer was removed under the panel; the owner must
    /// complete the close in the same turn.
    pub close_requested: bool,
}

impl std::fmt::Debug for PanelWidgets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelWidgets")
            .field("opacity_label", &self.opacity_label)
            .field("range_min_label", &self.range_min_label)
            .field("range_max_label", &self.range_max_label)
            .field("close_requested", &self.close_requested)
            .finish()
    }
}

/// One palette-selector row. `palette == None` restores the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteChoice {
    pub palette: Option<PaletteId>,
    pub name: String,
    pub preview: Scale,
}

/// Range-loop state: the scale captured at open plus its subscription.
#[derive(Debug)]
struct RangeBinding {
    scale: Scale,
    sub: SubscriptionId,
}

/// The threshold slider and palette selector for a custom-palette layer.
pub struct RangeSetup {
    pub spec: LayerPaletteSpec,
    pub slider: Box<dyn RangeControl>,
}

/// Options dialog controller for one layer: opacity and (optionally)
/// palette range/selection.
///
/// Binding discipline: user input flows widget -> model; the model's own
/// notification flows back through the subscriptions and touches the slider
/// only when its value actually differs, which is what breaks the echo
/// loop. The panel never caches model values beyond the scale captured at
/// open.
pub struct OptionsPanel {
    layer: LayerId,
    widgets: Rc<RefCell<PanelWidgets>>,
    layer_sub: SubscriptionId,
    range: Option<RangeBinding>,
    selector: Vec<PaletteChoice>,
    open: bool,
}

impl std::fmt::Debug for OptionsPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionsPanel")
            .field("layer", &self.layer)
            .field("open", &self.open)
            .field("has_range", &self.range.is_some())
            .finish()
    }
}

impl OptionsPanel {
    /// Opens the dialog and registers its model subscriptions.
    ///
    /// `range` is given only for layers with a palette; it drives the
    /// threshold slider and the palette selector. The scale length is fixed
    /// here for the life of the panel.
    pub fn open(
        models: &mut SceneModels,
        config: &PaletteConfig,
        layer: LayerId,
        opacity_slider: Box<dyn SliderControl>,
        range: Option<RangeSetup>,
    ) -> Result<Self, PanelError> {
        let widgets = Rc::new(RefCell::new(PanelWidgets {
            opacity_slider,
            opacity_label: String::new(),
            range_slider: None,
            range_min_label: String::new(),
            range_max_label: String::new(),
            close_requested: false,
        }));

        let handler_widgets = Rc::clone(&widgets);
        let handler_layer = layer.clone();
        let layer_sub = models.layers.on(move |event| match event {
            LayerEvent::Opacity { id, opacity } if *id == handler_layer => {
                refresh_opacity(&mut handler_widgets.borrow_mut(), *opacity);
            }
            LayerEvent::Removed { id } if *id == handler_layer => {
                handler_widgets.borrow_mut().close_requested = true;
            }
            _ => {}
        });

        // Seed the opacity readout from current model state.
        let opacity = models.layers.get(&layer).map(|l| l.opacity).unwrap_or(1.0);
        refresh_opacity(&mut widgets.borrow_mut(), opacity);

        let (range, selector) = match range {
            None => (None, Vec::new()),
            Some(setup) => {
                let rendered = config
                    .rendered(&setup.spec.rendered)
                    .ok_or_else(|| PanelError::UnknownPalette(setup.spec.rendered.clone()))?;
                if rendered.scale.is_empty() {
                    return Err(PanelError::EmptyScale(setup.spec.rendered.clone()));
                }
                let scale = rendered.scale.clone();
                let selector = build_selector(config, &setup.spec, &scale);

                widgets.borrow_mut().range_slider = Some(setup.slider);
                let [min, max] = models.palettes.range(&layer).resolve(scale.len());
                refresh_range(&mut widgets.borrow_mut(), &scale, min, max);

                let handler_widgets = Rc::clone(&widgets);
                let handler_layer = layer.clone();
                let handler_scale = scale.clone();
                let sub = models.palettes.on(move |event| {
                    if let PaletteEvent::Range {
                        layer: id,
                        min,
                        max,
                    } = event
                    {
                        if *id == handler_layer {
                            refresh_range(
                                &mut handler_widgets.borrow_mut(),
                                &handler_scale,
                                *min,
                                *max,
                            );
                        }
                    }
                });
                (Some(RangeBinding { scale, sub }), selector)
            }
        };

        Ok(Self {
            layer,
            widgets,
            layer_sub,
            range,
            selector,
            open: true,
        })
    }

    pub fn layer(&self) -> &LayerId {
        &self.layer
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// True once the bound layer was removed from the layer model; the
    /// owner must call [`close`](Self::close) in the same turn.
    pub fn close_requested(&self) -> bool {
        self.widgets.borrow().close_requested
    }

    pub fn widgets(&self) -> Ref<'_, PanelWidgets> {
        self.widgets.borrow()
    }

    pub fn opacity_label(&self) -> String {
        self.widgets.borrow().opacity_label.clone()
    }

    pub fn range_labels(&self) -> (String, String) {
        let widgets = self.widgets.borrow();
        (
            widgets.range_min_label.clone(),
            widgets.range_max_label.clone(),
        )
    }

    /// Palette selector rows: default first, then recommended, then the
    /// remaining configured order.
    pub fn selector(&self) -> &[PaletteChoice] {
        &self.selector
    }

    /// Continuous opacity drag: quantize to the slider's 0.01 step and
    /// commit straight to the layer model. The model's notification comes
    /// back through the subscription and refreshes the label.
    pub fn slide_opacity(&mut self, models: &mut SceneModels, value: f64) {
        if !self.open {
            return;
        }
        let value = (value * 100.0).round() / 100.0;
        models.layers.set_opacity(&self.layer, value);
    }

    /// Drag-in-progress on the threshold slider: label-only preview, no
    /// model write, so the UI tracks the handles without committing.
    pub fn slide_range(&mut self, min: u32, max: u32) {
        if !self.open {
            return;
        }
        let Some(binding) = &self.range else {
            return;
        };
        refresh_range(&mut self.widgets.borrow_mut(), &binding.scale, min, max);
    }

    /// Drag released: clamp and commit the thresholds to the palette model.
    pub fn set_range(&mut self, models: &mut SceneModels, min: u32, max: u32) {
        if !self.open {
            return;
        }
        let Some(binding) = &self.range else {
            return;
        };
        let last = binding.scale.len().saturating_sub(1) as u32;
        models
            .palettes
            .set_range(&self.layer, min.min(last), max.min(last));
    }

    /// Applies the selector row at `choice`: assign the custom palette, or
    /// restore the default for the `None` row.
    pub fn choose_palette(&mut self, models: &mut SceneModels, choice: usize) {
        if !self.open {
            return;
        }
        let Some(row) = self.selector.get(choice) else {
            return;
        };
        match &row.palette {
            Some(palette) => models.palettes.add(self.layer.clone(), palette.clone()),
            None => models.palettes.remove(&self.layer),
        }
    }

    /// Detaches both binding loops. Idempotent; after this no model
    /// mutation can reach the panel's widgets.
    pub fn close(&mut self, models: &mut SceneModels) {
        if !self.open {
            return;
        }
        self.open = false;
        models.layers.off(self.layer_sub);
        if let Some(binding) = &self.range {
            models.palettes.off(binding.sub);
        }
    }
}

fn refresh_opacity(widgets: &mut PanelWidgets, opacity: f64) {
    widgets.opacity_label = format!("{:.0}%", opacity * 100.0);
    if widgets.opacity_slider.value() != opacity {
        widgets.opacity_slider.set_value(opacity);
    }
}

fn refresh_range(widgets: &mut PanelWidgets, scale: &Scale, min: u32, max: u32) {
    let last = scale.len().saturating_sub(1) as u32;
    let min = min.min(last);
    let max = max.min(last);
    widgets.range_min_label = scale.labels[min as usize].clone();
    widgets.range_max_label = scale.labels[max as usize].clone();
    if let Some(slider) = widgets.range_slider.as_mut() {
        if slider.value() != [min, max] {
            slider.set_value([min, max]);
        }
    }
}

fn build_selector(
    config: &PaletteConfig,
    spec: &LayerPaletteSpec,
    source: &Scale,
) -> Vec<PaletteChoice> {
    let mut rows = vec![PaletteChoice {
        palette: None,
        name: "Default".to_string(),
        preview: source.clone(),
    }];
    let mut listed: Vec<&PaletteId> = Vec::new();
    for id in spec.recommended.iter().chain(config.order()) {
        if listed.contains(&id) {
            continue;
        }
        let Some(custom) = config.custom(id) else {
            continue;
        };
        listed.push(id);
        rows.push(PaletteChoice {
            palette: Some(id.clone()),
            name: custom.name.clone(),
            preview: translate(source, custom),
        });
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::{OptionsPanel, PanelError, RangeSetup};
    use crate::slider::{RangeControl, SliderControl};
    use layers::{
        CustomPalette, LayerId, LayerPaletteSpec, PaletteConfig, PaletteId, RenderedPalette, Scale,
    };
    use pretty_assertions::assert_eq;
    use scene::{PaletteEvent, SceneModels};
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingSlider {
        value: Rc<Cell<f64>>,
        sets: Rc<Cell<usize>>,
    }

    impl SliderControl for CountingSlider {
        fn value(&self) -> f64 {
            self.value.get()
        }

        fn set_value(&mut self, value: f64) {
            self.value.set(value);
            self.sets.set(self.sets.get() + 1);
        }
    }

    struct CountingRange {
        value: Rc<Cell<[u32; 2]>>,
        sets: Rc<Cell<usize>>,
    }

    impl RangeControl for CountingRange {
        fn value(&self) -> [u32; 2] {
            self.value.get()
        }

        fn set_value(&mut self, value: [u32; 2]) {
            self.value.set(value);
            self.sets.set(self.sets.get() + 1);
        }
    }

    fn scale11() -> Scale {
        Scale {
            colors: (0..11).map(|i| format!("#{i:06x}")).collect(),
            labels: (0..11).map(|i| format!("{} K", 250 + i * 5)).collect(),
        }
    }

    fn config() -> PaletteConfig {
        PaletteConfig::new(
            [RenderedPalette {
                id: PaletteId::new("fires_rendered"),
                scale: scale11(),
            }],
            [
                CustomPalette {
                    id: PaletteId::new("blues"),
                    name: "Blues".to_string(),
                    colors: vec!["#000011".to_string(), "#0000ff".to_string()],
                },
                CustomPalette {
                    id: PaletteId::new("reds"),
                    name: "Reds".to_string(),
                    colors: vec!["#110000".to_string(), "#ff0000".to_string()],
                },
            ],
            vec![PaletteId::new("reds"), PaletteId::new("blues")],
        )
    }

    fn spec() -> LayerPaletteSpec {
        LayerPaletteSpec {
            rendered: PaletteId::new("fires_rendered"),
            recommended: vec![PaletteId::new("blues")],
        }
    }

    fn fires() -> LayerId {
        LayerId::new("MODIS_Fires_All")
    }

    struct Fixture {
        models: SceneModels,
        panel: OptionsPanel,
        opacity_value: Rc<Cell<f64>>,
        opacity_sets: Rc<Cell<usize>>,
        range_value: Rc<Cell<[u32; 2]>>,
        range_sets: Rc<Cell<usize>>,
    }

    fn open_panel() -> Fixture {
        let mut models = SceneModels::new();
        models.layers.add(fires(), true);
        models.layers.set_opacity(&fires(), 0.4);

        let opacity_value = Rc::new(Cell::new(0.4));
        let opacity_sets = Rc::new(Cell::new(0));
        let range_value = Rc::new(Cell::new([0u32, 10u32]));
        let range_sets = Rc::new(Cell::new(0));

        let panel = OptionsPanel::open(
            &mut models,
            &config(),
            fires(),
            Box::new(CountingSlider {
                value: Rc::clone(&opacity_value),
                sets: Rc::clone(&opacity_sets),
            }),
            Some(RangeSetup {
                spec: spec(),
                slider: Box::new(CountingRange {
                    value: Rc::clone(&range_value),
                    sets: Rc::clone(&range_sets),
                }),
            }),
        )
        .unwrap();

        Fixture {
            models,
            panel,
            opacity_value,
            opacity_sets,
            range_value,
            range_sets,
        }
    }

    #[test]
    fn opacity_echo_is_suppressed() {
        let mut f = open_panel();
        assert_eq!(f.opacity_sets.get(), 0);

        // Notification carrying the slider's current value: label refresh
        // only, no slider write.
        f.models.layers.set_opacity(&fires(), 0.4);
        assert_eq!(f.opacity_sets.get(), 0);
        assert_eq!(f.panel.opacity_label(), "40%");

        // A differing value writes the slider exactly once.
        f.models.layers.set_opacity(&fires(), 0.7);
        assert_eq!(f.opacity_sets.get(), 1);
        assert_eq!(f.opacity_value.get(), 0.7);
        assert_eq!(f.panel.opacity_label(), "70%");
    }

    #[test]
    fn slide_opacity_round_trips_through_the_model() {
        let mut f = open_panel();
        f.panel.slide_opacity(&mut f.models, 0.256);

        // Quantized to the 0.01 step before the commit.
        assert_eq!(f.models.layers.get(&fires()).unwrap().opacity, 0.26);
        assert_eq!(f.panel.opacity_label(), "26%");
    }

    #[test]
    fn default_range_resolves_to_full_scale_with_labels() {
        let f = open_panel();
        assert_eq!(f.range_value.get(), [0, 10]);
        assert_eq!(f.range_sets.get(), 0);
        assert_eq!(
            f.panel.range_labels(),
            ("250 K".to_string(), "300 K".to_string())
        );
    }

    #[test]
    fn range_echo_is_suppressed_elementwise() {
        let mut f = open_panel();

        f.models.palettes.set_range(&fires(), 0, 10);
        assert_eq!(f.range_sets.get(), 0);

        f.models.palettes.set_range(&fires(), 2, 8);
        assert_eq!(f.range_sets.get(), 1);
        assert_eq!(f.range_value.get(), [2, 8]);
        assert_eq!(
            f.panel.range_labels(),
            ("260 K".to_string(), "290 K".to_string())
        );
    }

    #[test]
    fn slide_range_previews_labels_without_committing() {
        let mut f = open_panel();
        let commits = Rc::new(Cell::new(0));
        let sink = Rc::clone(&commits);
        f.models.palettes.on(move |e| {
            if matches!(e, PaletteEvent::Range { .. }) {
                sink.set(sink.get() + 1);
            }
        });

        f.panel.slide_range(3, 7);
        assert_eq!(
            f.panel.range_labels(),
            ("265 K".to_string(), "285 K".to_string())
        );
        assert_eq!(commits.get(), 0);
        assert_eq!(f.models.palettes.range(&fires()).resolve(11), [0, 10]);
    }

    #[test]
    fn set_range_clamps_into_the_scale() {
        let mut f = open_panel();
        f.panel.set_range(&mut f.models, 3, 99);
        assert_eq!(f.models.palettes.range(&fires()).resolve(11), [3, 10]);
    }

    #[test]
    fn selector_lists_default_then_recommended_then_configured_order() {
        let f = open_panel();
        let names: Vec<&str> = f.panel.selector().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Default", "Blues", "Reds"]);
        assert_eq!(f.panel.selector()[0].palette, None);
        // Previews keep the rendered scale's length.
        assert_eq!(f.panel.selector()[1].preview.len(), 11);
    }

    #[test]
    fn choosing_a_palette_row_updates_the_model() {
        let mut f = open_panel();

        f.panel.choose_palette(&mut f.models, 2);
        assert_eq!(
            f.models.palettes.active(&fires()),
            Some(&PaletteId::new("reds"))
        );

        f.panel.choose_palette(&mut f.models, 0);
        assert_eq!(f.models.palettes.active(&fires()), None);
    }

    #[test]
    fn removal_of_the_bound_layer_requests_close() {
        let mut f = open_panel();
        assert!(!f.panel.close_requested());

        f.models.layers.remove(&fires());
        assert!(f.panel.close_requested());
    }

    #[test]
    fn closing_detaches_both_binding_loops() {
        let mut f = open_panel();
        f.panel.close(&mut f.models);
        assert!(!f.panel.is_open());

        f.models.layers.set_opacity(&fires(), 0.9);
        f.models.palettes.set_range(&fires(), 1, 2);

        assert_eq!(f.opacity_sets.get(), 0);
        assert_eq!(f.range_sets.get(), 0);
        assert_eq!(f.panel.opacity_label(), "40%");
    }

    #[test]
    fn unknown_rendered_palette_fails_to_open() {
        let mut models = SceneModels::new();
        models.layers.add(fires(), true);

        let err = OptionsPanel::open(
            &mut models,
            &config(),
            fires(),
            Box::new(crate::slider::ValueSlider::new(1.0)),
            Some(RangeSetup {
                spec: LayerPaletteSpec {
                    rendered: PaletteId::new("nope"),
                    recommended: Vec::new(),
                },
                slider: Box::new(crate::slider::RangeSlider::new([0, 0])),
            }),
        )
        .unwrap_err();
        assert_eq!(err, PanelError::UnknownPalette(PaletteId::new("nope")));
    }
}
