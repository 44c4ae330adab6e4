use nalgebra::{Point2, Vector2};

use crate::autoroute::{AutorouteSettings, LayerStructure};
use crate::config::SessionConfig;
use crate::display::{CoordinateTransform, DisplayManager};

/// Canonical state of one open board: its layer stackup, the routing
/// settings and the view transform. Presentation code reads these through
/// the sync controller and never holds copies of its own.
#[derive(Debug, Clone)]
pub struct BoardSession {
    pub layer_structure: LayerStructure,
    pub autoroute_settings: AutorouteSettings,
    pub display: DisplayManager,
}

impl BoardSession {
    pub fn new(layer_structure: LayerStructure, display: DisplayManager) -> Self {
        let autoroute_settings = AutorouteSettings::new(&layer_structure);
        log::info!(
            "Board session with {} layers ({} signal)",
            layer_structure.len(),
            layer_structure.signal_layer_count()
        );
        Self {
            layer_structure,
            autoroute_settings,
            display,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        let transform = fitted_transform(config).unwrap_or_else(|| {
            let defaults = SessionConfig::default();
            log::warn!(
                "Ignoring configured design box {:?}..{:?} on surface {:?}, using {:?}..{:?}",
                config.board_min,
                config.board_max,
                config.surface_size,
                defaults.board_min,
                defaults.board_max
            );
            fitted_transform(&defaults).unwrap_or_default()
        });
        let mut display = DisplayManager::new(transform);
        if (0.0..=1.0).contains(&config.dim_factor) {
            display.set_dim_factor(config.dim_factor);
        } else {
            log::warn!(
                "Ignoring configured dim factor {}, using {}",
                config.dim_factor,
                display.dim_factor()
            );
        }
        display.set_cursor_style(config.cursor_style);
        Self::new(config.layer_structure.clone(), display)
    }
}

/// Transform fitting the configured design box onto the drawing surface,
/// None if the geometry cannot produce a finite positive scale
fn fitted_transform(config: &SessionConfig) -> Option<CoordinateTransform> {
    let board_min = Point2::from(config.board_min);
    let board_max = Point2::from(config.board_max);
    let surface_size = Vector2::from(config.surface_size);
    let extent = board_max - board_min;
    let finite = board_min.iter().chain(board_max.iter()).all(|value| value.is_finite());
    if !finite || extent.x <= 0.0 || extent.y <= 0.0 {
        return None;
    }
    let scale = (surface_size.x / extent.x).min(surface_size.y / extent.y);
    if !(scale.is_finite() && scale > 0.0) {
        return None;
    }
    Some(CoordinateTransform::fit(board_min, board_max, surface_size))
}

impl Default for BoardSession {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::CursorStyle;

    #[test]
    fn test_settings_match_layer_structure() {
        let session = BoardSession::default();
        assert_eq!(
            session.autoroute_settings.layer_count(),
            session.layer_structure.len()
        );
    }

    #[test]
    fn test_from_config_applies_display_settings() {
        let config = SessionConfig {
            dim_factor: 0.4,
            cursor_style: CursorStyle::Big,
            ..Default::default()
        };
        let session = BoardSession::from_config(&config);
        assert_eq!(session.display.dim_factor(), 0.4);
        assert_eq!(session.display.cursor_style(), CursorStyle::Big);
    }

    #[test]
    fn test_invalid_configured_dim_factor_is_ignored() {
        let config = SessionConfig {
            dim_factor: 3.0,
            ..Default::default()
        };
        let session = BoardSession::from_config(&config);
        assert_eq!(session.display.dim_factor(), 0.7);
    }

    #[test]
    fn test_degenerate_configured_design_box_falls_back() {
        let config = SessionConfig {
            board_max: [0.0, 0.0],
            ..Default::default()
        };
        let session = BoardSession::from_config(&config);
        let expected = BoardSession::default();
        assert_eq!(session.display.transform(), expected.display.transform());
    }

    #[test]
    fn test_zero_configured_surface_falls_back() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"surface_size": [0.0, 1600.0]}"#).unwrap();
        let session = BoardSession::from_config(&config);
        assert!(session.display.transform().scale > 0.0);
        assert_eq!(
            session.display.transform(),
            BoardSession::default().display.transform()
        );
    }

    #[test]
    fn test_configured_design_box_is_fitted() {
        let config = SessionConfig {
            board_min: [10.0, 10.0],
            board_max: [30.0, 20.0],
            surface_size: [400.0, 400.0],
            ..Default::default()
        };
        let session = BoardSession::from_config(&config);
        assert_eq!(session.display.transform().scale, 20.0);
    }
}
