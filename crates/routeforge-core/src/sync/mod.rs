//! Refresh/edit cycle between the session stores and the panels showing them.
//!
//! Refresh pulls every displayed value out of the stores and never writes.
//! An edit pushes one value into one store and never refreshes. Panels only
//! hand out edits, so a refresh can not re-trigger an edit.

use crate::autoroute::{AutorouteSettings, PreferredDirection};
use crate::display::{CursorStyle, DisplayManager, MirrorAxis, RotationQuadrant, Viewport};
use crate::session::BoardSession;

/// Upper bound of the layer dimming control
pub const MAX_DIM_CONTROL: u8 = 100;

/// Dim factor selected by a dimming control position, 0 is not dimmed
pub fn dim_factor_from_control(control: u8) -> f64 {
    assert!(
        control <= MAX_DIM_CONTROL,
        "dim control {} exceeds {}",
        control,
        MAX_DIM_CONTROL
    );
    1.0 - f64::from(control) / f64::from(MAX_DIM_CONTROL)
}

pub fn control_from_dim_factor(dim_factor: f64) -> u8 {
    let control = ((1.0 - dim_factor) * f64::from(MAX_DIM_CONTROL)).round();
    control.clamp(0.0, f64::from(MAX_DIM_CONTROL)) as u8
}

/// One row of the autoroute parameter panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerRow {
    pub name: String,
    pub active: bool,
    pub preferred_direction: PreferredDirection,
}

/// Values shown by the autoroute parameter panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutorouteParameterView {
    pub rows: Vec<LayerRow>,
    pub vias_allowed: bool,
    pub fanout: bool,
    pub autoroute: bool,
    pub postroute: bool,
}

/// Values shown by the miscellaneous display panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayMiscView {
    pub cursor_style: CursorStyle,
    pub rotation: RotationQuadrant,
    pub mirror: MirrorAxis,
    /// Layer dimming control position, 0..=MAX_DIM_CONTROL
    pub dim_control: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutorouteEdit {
    LayerActive { layer: usize, active: bool },
    PreferredDirection { layer: usize, direction: PreferredDirection },
    ViasAllowed(bool),
    Fanout(bool),
    Autoroute(bool),
    Postroute(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayEdit {
    Cursor(CursorStyle),
    Rotation(RotationQuadrant),
    Mirror(MirrorAxis),
    DimControl(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The store already held the value, nothing was written
    Unchanged,
    Committed,
}

impl EditOutcome {
    fn from_changed(changed: bool) -> Self {
        if changed {
            Self::Committed
        } else {
            Self::Unchanged
        }
    }
}

/// Holds the panel-facing copies of the session stores
#[derive(Debug, Clone, Default)]
pub struct SyncController {
    autoroute_view: AutorouteParameterView,
    display_view: DisplayMiscView,
}

impl SyncController {
    pub fn new(session: &BoardSession) -> Self {
        let mut controller = Self::default();
        controller.refresh(session);
        controller
    }

    pub fn autoroute_view(&self) -> &AutorouteParameterView {
        &self.autoroute_view
    }

    pub fn display_view(&self) -> &DisplayMiscView {
        &self.display_view
    }

    /// Re-derive every displayed value from the stores
    pub fn refresh(&mut self, session: &BoardSession) {
        let settings = &session.autoroute_settings;
        assert_eq!(
            settings.layer_count(),
            session.layer_structure.len(),
            "autoroute settings out of step with the layer structure"
        );

        self.autoroute_view = AutorouteParameterView {
            rows: session
                .layer_structure
                .iter()
                .zip(settings.layers())
                .map(|(descriptor, layer)| LayerRow {
                    name: descriptor.name.clone(),
                    active: layer.active,
                    preferred_direction: layer.preferred_direction,
                })
                .collect(),
            vias_allowed: settings.get_vias_allowed(),
            fanout: settings.get_fanout_enabled(),
            autoroute: settings.get_autoroute_enabled(),
            postroute: settings.get_postroute_enabled(),
        };

        let display = &session.display;
        self.display_view = DisplayMiscView {
            cursor_style: display.cursor_style(),
            rotation: display.rotation(),
            mirror: display.mirror(),
            dim_control: control_from_dim_factor(display.dim_factor()),
        };
    }

    /// Commit one autoroute panel edit to the settings store
    pub fn apply_autoroute_edit(
        &self,
        settings: &mut AutorouteSettings,
        edit: AutorouteEdit,
    ) -> EditOutcome {
        let changed = match edit {
            AutorouteEdit::LayerActive { layer, active } => {
                let changed = settings.get_layer_active(layer) != active;
                if changed {
                    settings.set_layer_active(layer, active);
                }
                changed
            }
            AutorouteEdit::PreferredDirection { layer, direction } => {
                let changed = settings.get_preferred_direction(layer) != direction;
                if changed {
                    settings.set_preferred_direction(layer, direction);
                }
                changed
            }
            AutorouteEdit::ViasAllowed(allowed) => {
                let changed = settings.get_vias_allowed() != allowed;
                if changed {
                    settings.set_vias_allowed(allowed);
                }
                changed
            }
            AutorouteEdit::Fanout(enabled) => {
                let changed = settings.get_fanout_enabled() != enabled;
                if changed {
                    settings.set_fanout_enabled(enabled);
                }
                changed
            }
            AutorouteEdit::Autoroute(enabled) => {
                let changed = settings.get_autoroute_enabled() != enabled;
                if changed {
                    settings.set_autoroute_enabled(enabled);
                }
                changed
            }
            AutorouteEdit::Postroute(enabled) => {
                let changed = settings.get_postroute_enabled() != enabled;
                if changed {
                    settings.set_postroute_enabled(enabled);
                }
                changed
            }
        };
        if changed {
            log::debug!("Committed autoroute edit {:?}", edit);
        }
        EditOutcome::from_changed(changed)
    }

    /// Commit one display panel edit to the display manager
    pub fn apply_display_edit(
        &self,
        display: &mut DisplayManager,
        viewport: &mut dyn Viewport,
        edit: DisplayEdit,
    ) -> EditOutcome {
        let changed = match edit {
            DisplayEdit::Rotation(rotation) => display.set_rotation(rotation, viewport),
            DisplayEdit::Mirror(axis) => display.set_mirror(axis, viewport),
            DisplayEdit::Cursor(cursor_style) => {
                let changed = display.set_cursor_style(cursor_style);
                if changed {
                    viewport.request_repaint();
                }
                changed
            }
            // Compared in control positions, the float round trip is not exact
            DisplayEdit::DimControl(control) => {
                let changed = control_from_dim_factor(display.dim_factor()) != control
                    && display.set_dim_factor(dim_factor_from_control(control));
                if changed {
                    viewport.request_repaint();
                }
                changed
            }
        };
        if changed {
            log::debug!("Committed display edit {:?}", edit);
        }
        EditOutcome::from_changed(changed)
    }
}
