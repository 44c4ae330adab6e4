use std::path::PathBuf;

use egui::{Color32, Pos2, Stroke, ViewportBuilder};
use nalgebra::{Point2, Vector2};

use routeforge_core::display::{CursorStyle, ScrollViewport, Viewport};
use routeforge_core::sync::EditOutcome;
use routeforge_core::ui::{show_autoroute_panel, show_display_misc_panel};
use routeforge_core::{BoardSession, SessionConfig, SyncController};

/// The main application struct
pub struct RouteForgeApp {
    session: BoardSession,
    controller: SyncController,
    viewport: ScrollViewport,
    config: SessionConfig,
    config_path: Option<PathBuf>,
    needs_initial_view: bool,
}

impl Drop for RouteForgeApp {
    fn drop(&mut self) {
        let Some(dir) = &self.config_path else {
            return;
        };
        self.config.dim_factor = self.session.display.dim_factor();
        self.config.cursor_style = self.session.display.cursor_style();
        if let Err(e) = self.config.save_to_file(dir) {
            log::warn!("Failed to save session config: {}", e);
        }
    }
}

impl RouteForgeApp {
    pub fn new(config: SessionConfig, config_path: Option<PathBuf>) -> Self {
        let session = BoardSession::from_config(&config);
        let controller = SyncController::new(&session);
        let viewport = ScrollViewport::new(Vector2::new(
            config.window_size[0] as f64,
            config.window_size[1] as f64,
        ));
        Self {
            session,
            controller,
            viewport,
            config,
            config_path,
            needs_initial_view: true,
        }
    }

    fn show_controls(&mut self, ui: &mut egui::Ui) {
        let mut autoroute_edits = Vec::new();
        let mut display_edits = Vec::new();

        egui::CollapsingHeader::new("Autoroute Parameters")
            .default_open(true)
            .show(ui, |ui| {
                autoroute_edits = show_autoroute_panel(ui, self.controller.autoroute_view());
            });
        egui::CollapsingHeader::new("Display")
            .default_open(true)
            .show(ui, |ui| {
                display_edits = show_display_misc_panel(ui, self.controller.display_view());
            });

        for edit in autoroute_edits {
            self.controller
                .apply_autoroute_edit(&mut self.session.autoroute_settings, edit);
        }
        for edit in display_edits {
            let outcome =
                self.controller
                    .apply_display_edit(&mut self.session.display, &mut self.viewport, edit);
            if outcome == EditOutcome::Committed {
                log::info!("Display changed: {:?}", edit);
            }
        }
    }

    fn show_board(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());
        let rect = response.rect;
        self.viewport
            .resize(Vector2::new(rect.width() as f64, rect.height() as f64));

        if self.needs_initial_view {
            let board_center = nalgebra::center(
                &Point2::from(self.config.board_min),
                &Point2::from(self.config.board_max),
            );
            self.viewport
                .set_viewport_center(self.session.display.board_to_screen(board_center));
            self.needs_initial_view = false;
        }

        if response.dragged() {
            let delta = response.drag_delta();
            self.viewport
                .pan(Vector2::new(-delta.x as f64, -delta.y as f64));
        }

        let to_pos = |board_point: Point2<f64>| -> Pos2 {
            let screen = self.session.display.board_to_screen(board_point);
            let window = self.viewport.screen_to_window(screen);
            rect.min + egui::vec2(window.x as f32, window.y as f32)
        };

        painter.rect_filled(rect, 0.0, Color32::from_gray(20));

        let [min_x, min_y] = self.config.board_min;
        let [max_x, max_y] = self.config.board_max;
        let outline = [
            Point2::new(min_x, min_y),
            Point2::new(max_x, min_y),
            Point2::new(max_x, max_y),
            Point2::new(min_x, max_y),
        ];
        let dim = self.session.display.dim_factor();
        let outline_color = Color32::from_rgba_unmultiplied(255, 255, 0, (255.0 * dim) as u8);
        for i in 0..outline.len() {
            painter.line_segment(
                [to_pos(outline[i]), to_pos(outline[(i + 1) % outline.len()])],
                Stroke::new(1.5, outline_color),
            );
        }

        // Board axes from the lower left corner, to make rotation and mirroring visible
        let origin = Point2::new(min_x, min_y);
        let axis_length = (max_x - min_x).min(max_y - min_y) / 4.0;
        painter.line_segment(
            [to_pos(origin), to_pos(origin + Vector2::new(axis_length, 0.0))],
            Stroke::new(2.0, Color32::RED),
        );
        painter.line_segment(
            [to_pos(origin), to_pos(origin + Vector2::new(0.0, axis_length))],
            Stroke::new(2.0, Color32::GREEN),
        );

        if let Some(hover) = response.hover_pos() {
            let crosshair = Stroke::new(1.0, Color32::WHITE);
            let (horizontal, vertical) = match self.session.display.cursor_style() {
                CursorStyle::Small => (
                    [hover - egui::vec2(10.0, 0.0), hover + egui::vec2(10.0, 0.0)],
                    [hover - egui::vec2(0.0, 10.0), hover + egui::vec2(0.0, 10.0)],
                ),
                CursorStyle::Big => (
                    [Pos2::new(rect.left(), hover.y), Pos2::new(rect.right(), hover.y)],
                    [Pos2::new(hover.x, rect.top()), Pos2::new(hover.x, rect.bottom())],
                ),
            };
            painter.line_segment(horizontal, crosshair);
            painter.line_segment(vertical, crosshair);

            let window = hover - rect.min;
            let screen = self
                .viewport
                .window_to_screen(Point2::new(window.x as f64, window.y as f64));
            let board = self.session.display.screen_to_board(screen);
            painter.text(
                rect.left_bottom() + egui::vec2(8.0, -8.0),
                egui::Align2::LEFT_BOTTOM,
                format!("X {:.2}  Y {:.2}", board.x, board.y),
                egui::FontId::monospace(12.0),
                Color32::LIGHT_GRAY,
            );
        }
    }
}

impl eframe::App for RouteForgeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pull the current store state before drawing, edits are pushed after
        self.controller.refresh(&self.session);

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.show_controls(ui));
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.show_board(ui));

        if self.viewport.take_repaint_request() {
            ctx.request_repaint();
        }
    }
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_default_env().init();

    let config_path = match SessionConfig::default_dir() {
        Ok(dir) => Some(dir),
        Err(e) => {
            log::warn!("{}, session config will not be saved", e);
            None
        }
    };
    let config = config_path
        .as_deref()
        .map(|dir| {
            SessionConfig::load_from_file(dir).unwrap_or_else(|e| {
                log::warn!("{}, using default session config", e);
                SessionConfig::default()
            })
        })
        .unwrap_or_default();

    let window_size = config.window_size;
    eframe::run_native(
        "RouteForge - Autoroute & View Settings",
        eframe::NativeOptions {
            viewport: ViewportBuilder::default().with_inner_size(window_size),
            ..Default::default()
        },
        Box::new(move |_cc| Ok(Box::new(RouteForgeApp::new(config, config_path)))),
    )
}
