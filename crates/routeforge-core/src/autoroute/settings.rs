use serde::{Deserialize, Serialize};

use super::layers::LayerStructure;
use crate::error::StateError;

/// Preferred trace direction of a routing layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PreferredDirection {
    Horizontal,
    Vertical,
}

impl PreferredDirection {
    pub fn all() -> [Self; 2] {
        [Self::Horizontal, Self::Vertical]
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

/// Per-layer routing parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerAutorouteConfig {
    pub layer_index: usize,
    pub active: bool,
    pub preferred_direction: PreferredDirection,
}

/// The three passes of the routing pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoutePass {
    Fanout,
    Autoroute,
    Postroute,
}

/// Pass configuration as read by a routing run at a pass boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassSnapshot {
    pub fanout: bool,
    pub autoroute: bool,
    pub postroute: bool,
    pub start_pass_no: u32,
}

impl PassSnapshot {
    pub fn enabled_passes(&self) -> Vec<RoutePass> {
        [
            (self.fanout, RoutePass::Fanout),
            (self.autoroute, RoutePass::Autoroute),
            (self.postroute, RoutePass::Postroute),
        ]
        .into_iter()
        .filter_map(|(enabled, pass)| enabled.then_some(pass))
        .collect()
    }

    /// A pass sequence starting over from the first pass
    pub fn restart_pending(&self) -> bool {
        self.start_pass_no == 1
    }
}

/// Canonical autorouting configuration of a board session.
///
/// Changing which passes run invalidates a partially completed pass sequence,
/// so every pass flag setter resets the start pass to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AutorouteSettingsFields")]
pub struct AutorouteSettings {
    layers: Vec<LayerAutorouteConfig>,
    vias_allowed: bool,
    fanout_enabled: bool,
    autoroute_enabled: bool,
    postroute_enabled: bool,
    start_pass_no: u32,
}

impl AutorouteSettings {
    /// Seed the settings from the board stackup: signal layers start active,
    /// preferred directions alternate starting horizontal on the top layer.
    pub fn new(layer_structure: &LayerStructure) -> Self {
        let layers = layer_structure
            .iter()
            .enumerate()
            .map(|(layer_index, layer)| LayerAutorouteConfig {
                layer_index,
                active: layer.is_signal,
                preferred_direction: if layer_index % 2 == 0 {
                    PreferredDirection::Horizontal
                } else {
                    PreferredDirection::Vertical
                },
            })
            .collect();

        Self {
            layers,
            vias_allowed: true,
            fanout_enabled: false,
            autoroute_enabled: true,
            postroute_enabled: true,
            start_pass_no: 1,
        }
    }

    pub fn layers(&self) -> &[LayerAutorouteConfig] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn active_layer_count(&self) -> usize {
        self.layers.iter().filter(|layer| layer.active).count()
    }

    fn layer(&self, index: usize) -> &LayerAutorouteConfig {
        assert!(
            index < self.layers.len(),
            "layer index {} out of range for {} routing layers",
            index,
            self.layers.len()
        );
        &self.layers[index]
    }

    fn layer_mut(&mut self, index: usize) -> &mut LayerAutorouteConfig {
        assert!(
            index < self.layers.len(),
            "layer index {} out of range for {} routing layers",
            index,
            self.layers.len()
        );
        &mut self.layers[index]
    }

    pub fn get_layer_active(&self, index: usize) -> bool {
        self.layer(index).active
    }

    pub fn set_layer_active(&mut self, index: usize, active: bool) {
        self.layer_mut(index).active = active;
    }

    pub fn get_preferred_direction(&self, index: usize) -> PreferredDirection {
        self.layer(index).preferred_direction
    }

    pub fn set_preferred_direction(&mut self, index: usize, direction: PreferredDirection) {
        self.layer_mut(index).preferred_direction = direction;
    }

    pub fn get_vias_allowed(&self) -> bool {
        self.vias_allowed
    }

    // Vias do not change pass sequencing, the start pass is left alone.
    pub fn set_vias_allowed(&mut self, allowed: bool) {
        self.vias_allowed = allowed;
    }

    pub fn get_fanout_enabled(&self) -> bool {
        self.fanout_enabled
    }

    pub fn set_fanout_enabled(&mut self, enabled: bool) {
        self.fanout_enabled = enabled;
        self.restart_passes();
    }

    pub fn get_autoroute_enabled(&self) -> bool {
        self.autoroute_enabled
    }

    pub fn set_autoroute_enabled(&mut self, enabled: bool) {
        self.autoroute_enabled = enabled;
        self.restart_passes();
    }

    pub fn get_postroute_enabled(&self) -> bool {
        self.postroute_enabled
    }

    pub fn set_postroute_enabled(&mut self, enabled: bool) {
        self.postroute_enabled = enabled;
        self.restart_passes();
    }

    pub fn get_start_pass_no(&self) -> u32 {
        self.start_pass_no
    }

    /// Set the pass a routing run resumes at. Pass numbers start at 1.
    pub fn set_start_pass_no(&mut self, pass_no: u32) {
        assert!(pass_no >= 1, "start pass number must be at least 1, got {}", pass_no);
        self.start_pass_no = pass_no;
    }

    pub fn pass_snapshot(&self) -> PassSnapshot {
        PassSnapshot {
            fanout: self.fanout_enabled,
            autoroute: self.autoroute_enabled,
            postroute: self.postroute_enabled,
            start_pass_no: self.start_pass_no,
        }
    }

    fn restart_passes(&mut self) {
        if self.start_pass_no != 1 {
            log::debug!(
                "Pass configuration changed, restarting from pass 1 (was {})",
                self.start_pass_no
            );
        }
        self.start_pass_no = 1;
    }
}

/// Unchecked settings as read from persisted state
#[derive(Deserialize)]
struct AutorouteSettingsFields {
    layers: Vec<LayerAutorouteConfig>,
    vias_allowed: bool,
    fanout_enabled: bool,
    autoroute_enabled: bool,
    postroute_enabled: bool,
    start_pass_no: u32,
}

impl TryFrom<AutorouteSettingsFields> for AutorouteSettings {
    type Error = StateError;

    fn try_from(fields: AutorouteSettingsFields) -> Result<Self, Self::Error> {
        if fields.start_pass_no < 1 {
            return Err(StateError::InvalidStartPass(fields.start_pass_no));
        }
        if let Some((position, layer)) = fields
            .layers
            .iter()
            .enumerate()
            .find(|(position, layer)| layer.layer_index != *position)
        {
            return Err(StateError::LayerOutOfOrder {
                position,
                layer_index: layer.layer_index,
            });
        }
        Ok(Self {
            layers: fields.layers,
            vias_allowed: fields.vias_allowed,
            fanout_enabled: fields.fanout_enabled,
            autoroute_enabled: fields.autoroute_enabled,
            postroute_enabled: fields.postroute_enabled,
            start_pass_no: fields.start_pass_no,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autoroute::LayerDescriptor;

    fn four_layer_board() -> LayerStructure {
        LayerStructure::new(vec![
            LayerDescriptor::signal("F.Cu"),
            LayerDescriptor::plane("In1.Cu"),
            LayerDescriptor::signal("In2.Cu"),
            LayerDescriptor::signal("B.Cu"),
        ])
    }

    #[test]
    fn test_defaults_follow_layer_structure() {
        let settings = AutorouteSettings::new(&four_layer_board());
        assert_eq!(settings.layer_count(), 4);
        assert!(settings.get_layer_active(0));
        assert!(!settings.get_layer_active(1));
        assert_eq!(settings.active_layer_count(), 3);
        assert_eq!(settings.get_preferred_direction(0), PreferredDirection::Horizontal);
        assert_eq!(settings.get_preferred_direction(1), PreferredDirection::Vertical);
        assert!(settings.get_vias_allowed());
        assert!(!settings.get_fanout_enabled());
        assert!(settings.get_autoroute_enabled());
        assert!(settings.get_postroute_enabled());
        assert_eq!(settings.get_start_pass_no(), 1);

        for (position, layer) in settings.layers().iter().enumerate() {
            assert_eq!(layer.layer_index, position);
        }
    }

    #[test]
    fn test_layer_active_reflects_last_write() {
        let mut settings = AutorouteSettings::new(&four_layer_board());
        for index in 0..settings.layer_count() {
            settings.set_layer_active(index, true);
            assert!(settings.get_layer_active(index));
            settings.set_layer_active(index, false);
            assert!(!settings.get_layer_active(index));
        }
    }

    #[test]
    fn test_pass_flags_always_reset_start_pass() {
        let mut settings = AutorouteSettings::new(&four_layer_board());
        for value in [true, false] {
            settings.set_start_pass_no(5);
            settings.set_fanout_enabled(value);
            assert_eq!(settings.get_start_pass_no(), 1);

            settings.set_start_pass_no(5);
            settings.set_autoroute_enabled(value);
            assert_eq!(settings.get_start_pass_no(), 1);

            settings.set_start_pass_no(5);
            settings.set_postroute_enabled(value);
            assert_eq!(settings.get_start_pass_no(), 1);
        }
    }

    #[test]
    fn test_fanout_enable_restarts_from_pass_seven() {
        let mut settings = AutorouteSettings::new(&four_layer_board());
        settings.set_start_pass_no(7);
        settings.set_fanout_enabled(true);
        assert!(settings.get_fanout_enabled());
        assert_eq!(settings.get_start_pass_no(), 1);
    }

    #[test]
    fn test_vias_and_layer_edits_keep_start_pass() {
        let mut settings = AutorouteSettings::new(&four_layer_board());
        settings.set_start_pass_no(4);

        settings.set_vias_allowed(false);
        assert_eq!(settings.get_start_pass_no(), 4);
        settings.set_vias_allowed(true);
        assert!(settings.get_vias_allowed());
        assert_eq!(settings.get_start_pass_no(), 4);

        settings.set_layer_active(2, false);
        settings.set_preferred_direction(3, PreferredDirection::Horizontal);
        assert_eq!(settings.get_start_pass_no(), 4);
    }

    #[test]
    fn test_pass_snapshot() {
        let mut settings = AutorouteSettings::new(&four_layer_board());
        settings.set_fanout_enabled(true);
        settings.set_postroute_enabled(false);
        settings.set_start_pass_no(3);

        let snapshot = settings.pass_snapshot();
        assert_eq!(
            snapshot.enabled_passes(),
            vec![RoutePass::Fanout, RoutePass::Autoroute]
        );
        assert_eq!(snapshot.start_pass_no, 3);
        assert!(!snapshot.restart_pending());

        settings.set_autoroute_enabled(false);
        // Snapshot taken earlier is unaffected by later edits
        assert_eq!(snapshot.enabled_passes().len(), 2);
        assert!(settings.pass_snapshot().restart_pending());
        assert_eq!(settings.pass_snapshot().enabled_passes(), vec![RoutePass::Fanout]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_layer_index_out_of_range_panics() {
        let mut settings = AutorouteSettings::new(&four_layer_board());
        settings.set_layer_active(4, true);
    }

    #[test]
    #[should_panic(expected = "at least 1")]
    fn test_start_pass_zero_panics() {
        let mut settings = AutorouteSettings::new(&four_layer_board());
        settings.set_start_pass_no(0);
    }

    #[test]
    fn test_deserialize_rejects_start_pass_zero() {
        let settings = AutorouteSettings::new(&four_layer_board());
        let mut json = serde_json::to_value(&settings).unwrap();
        json["start_pass_no"] = serde_json::json!(0);
        let result = serde_json::from_value::<AutorouteSettings>(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_rejects_layers_out_of_order() {
        let settings = AutorouteSettings::new(&four_layer_board());
        let mut json = serde_json::to_value(&settings).unwrap();
        json["layers"][1]["layer_index"] = serde_json::json!(3);
        let result = serde_json::from_value::<AutorouteSettings>(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_restores_saved_settings() {
        let mut settings = AutorouteSettings::new(&four_layer_board());
        settings.set_start_pass_no(4);
        settings.set_preferred_direction(2, PreferredDirection::Vertical);
        let json = serde_json::to_string(&settings).unwrap();
        let restored: AutorouteSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, settings);
    }
}
