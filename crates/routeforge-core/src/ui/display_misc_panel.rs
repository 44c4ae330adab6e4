use crate::display::{CursorStyle, MirrorAxis, RotationQuadrant};
use crate::sync::{DisplayEdit, DisplayMiscView, MAX_DIM_CONTROL};

pub fn show_display_misc_panel(ui: &mut egui::Ui, view: &DisplayMiscView) -> Vec<DisplayEdit> {
    let mut edits = Vec::new();

    ui.horizontal(|ui| {
        ui.label("Crosshair cursor");
        let mut cursor_style = view.cursor_style;
        for option in CursorStyle::all() {
            if ui.radio_value(&mut cursor_style, option, option.label()).changed() {
                edits.push(DisplayEdit::Cursor(cursor_style));
            }
        }
    });

    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Rotation");
        let mut rotation = view.rotation;
        for option in RotationQuadrant::all() {
            if ui.radio_value(&mut rotation, option, option.label()).changed() {
                edits.push(DisplayEdit::Rotation(rotation));
            }
        }
    });

    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Board mirroring");
        let mut mirror = view.mirror;
        for option in MirrorAxis::all() {
            if ui.radio_value(&mut mirror, option, option.label()).changed() {
                edits.push(DisplayEdit::Mirror(mirror));
            }
        }
    });

    ui.separator();

    let mut dim_control = view.dim_control;
    let slider = egui::Slider::new(&mut dim_control, 0..=MAX_DIM_CONTROL).text("Layer dimming");
    if ui
        .add(slider)
        .on_hover_text("Dimming of the layers other than the current one")
        .changed()
    {
        edits.push(DisplayEdit::DimControl(dim_control));
    }

    edits
}
