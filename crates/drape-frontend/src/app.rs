//! Main application

use std::sync::Arc;

use parking_lot::Mutex;

use drape_core::{Pattern, PatternError, ViewMode};

use crate::actions::ActionMode;
use crate::config::AppConfig;
use crate::events::{ViewportEvent, take_arrow_keys};
use crate::overlay::EguiOverlay;
use crate::panels::ViewportPanel;
use crate::state::{PatternViewport, SharedViewportGpu, ViewportContext, ViewportGpu};

/// Startup failures
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("wgpu render state is not available")]
    NoRenderState,
    #[error("Failed to load pattern: {0}")]
    Engine(#[from] PatternError),
}

/// Pattern summary shown in the toolbar
struct PatternInfo {
    view: ViewMode,
    block_names: Vec<String>,
    entities: usize,
    highlighted: usize,
}

/// Main application
pub struct DrapeApp {
    viewport: PatternViewport,
    gpu: SharedViewportGpu,
    panel: ViewportPanel,
}

impl DrapeApp {
    /// Create the app, loading `pattern` (a JSON payload) if given
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        pattern: Option<String>,
    ) -> Result<Self, StartupError> {
        let render_state = cc
            .wgpu_render_state
            .as_ref()
            .ok_or(StartupError::NoRenderState)?;

        let gpu = Arc::new(Mutex::new(ViewportGpu::new(
            render_state.device.clone(),
            render_state.queue.clone(),
            render_state.target_format,
            &config.renderer.viewport,
        )));

        let pattern = match pattern {
            Some(payload) => Pattern::from_json(&payload)?,
            None => Pattern::new(),
        }
        .with_settings(config.display.clone());
        tracing::info!(
            "Pattern loaded: {} blocks, {} entities",
            pattern.blocks().len(),
            pattern.entity_count()
        );

        let mut viewport = ViewportContext::new(&config.renderer, EguiOverlay::new());
        viewport.set_engine(pattern);

        Ok(Self {
            viewport,
            gpu,
            panel: ViewportPanel::new(),
        })
    }

    fn pattern_info(&self) -> Option<PatternInfo> {
        self.viewport.engine().map(|pattern| PatternInfo {
            view: pattern.view().clone(),
            block_names: pattern.block_names(),
            entities: pattern.entity_count(),
            highlighted: pattern.highlighted_entity_count(),
        })
    }

    fn toolbar(&mut self, ctx: &egui::Context) {
        let info = self.pattern_info();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let current = self.viewport.action_mode();
                for mode in ActionMode::ALL {
                    if ui.selectable_label(current == mode, mode.label()).clicked() && mode != current {
                        self.viewport.push_event(ViewportEvent::SetActionMode(mode));
                    }
                }

                let Some(info) = info else {
                    return;
                };

                ui.separator();

                let mut selected = info.view.clone();
                egui::ComboBox::from_label("View")
                    .selected_text(info.view.name())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut selected, ViewMode::Model, "Model");
                        for name in &info.block_names {
                            ui.selectable_value(&mut selected, ViewMode::Block(name.clone()), name);
                        }
                    });
                if selected != info.view {
                    self.viewport.push_event(ViewportEvent::SetView(selected));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!(
                        "{} blocks, {} entities",
                        info.block_names.len(),
                        info.entities
                    ));
                    if info.highlighted > 0 {
                        ui.separator();
                        ui.label(format!("Selected: {}", info.highlighted));
                    }
                });
            });
        });
    }
}

impl eframe::App for DrapeApp {
    fn raw_input_hook(&mut self, _ctx: &egui::Context, raw_input: &mut egui::RawInput) {
        // Arrow keys drive the camera and never reach egui's focus handling
        for event in take_arrow_keys(&mut raw_input.events) {
            self.viewport.push_event(event);
        }
    }

    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.toolbar(ctx);

        let Some(render_state) = frame.wgpu_render_state() else {
            return;
        };

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.panel.ui(ui, &mut self.viewport, &self.gpu, render_state);
            });
    }
}
