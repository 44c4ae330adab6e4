use crate::autoroute::PreferredDirection;
use crate::sync::{AutorouteEdit, AutorouteParameterView};

/// Draw the autoroute parameter panel from `view` and return the edits the
/// operator made this frame. The view itself is never modified.
pub fn show_autoroute_panel(
    ui: &mut egui::Ui,
    view: &AutorouteParameterView,
) -> Vec<AutorouteEdit> {
    let mut edits = Vec::new();

    egui::Grid::new("autoroute_layers")
        .num_columns(3)
        .striped(true)
        .show(ui, |ui| {
            ui.strong("Layer");
            ui.strong("Active");
            ui.strong("Preferred direction");
            ui.end_row();

            for (layer, row) in view.rows.iter().enumerate() {
                ui.label(row.name.as_str());

                let mut active = row.active;
                if ui.checkbox(&mut active, "").changed() {
                    edits.push(AutorouteEdit::LayerActive { layer, active });
                }

                let mut direction = row.preferred_direction;
                egui::ComboBox::from_id_salt(("preferred_direction", layer))
                    .selected_text(direction.label())
                    .show_ui(ui, |ui| {
                        for option in PreferredDirection::all() {
                            ui.selectable_value(&mut direction, option, option.label());
                        }
                    });
                if direction != row.preferred_direction {
                    edits.push(AutorouteEdit::PreferredDirection { layer, direction });
                }
                ui.end_row();
            }
        });

    ui.separator();

    let mut vias_allowed = view.vias_allowed;
    if ui.checkbox(&mut vias_allowed, "Vias allowed").changed() {
        edits.push(AutorouteEdit::ViasAllowed(vias_allowed));
    }

    ui.separator();
    ui.label("Passes");

    let mut fanout = view.fanout;
    if ui.checkbox(&mut fanout, "Fanout").changed() {
        edits.push(AutorouteEdit::Fanout(fanout));
    }
    let mut autoroute = view.autoroute;
    if ui.checkbox(&mut autoroute, "Autoroute").changed() {
        edits.push(AutorouteEdit::Autoroute(autoroute));
    }
    let mut postroute = view.postroute;
    if ui.checkbox(&mut postroute, "Postroute").changed() {
        edits.push(AutorouteEdit::Postroute(postroute));
    }

    edits
}
