use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::PuzzleResult;
use crate::grid::{DEFAULT_PIECE_COUNT, DEFAULT_VIEWPORT_FRACTION};
use crate::painter_surface::DEFAULT_FLATTEN_TOLERANCE;
use crate::surface::StrokeStyle;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV_VAR: &str = "JIGSAW_CONFIG";

/// Distance on each axis within which a released piece snaps home.
pub const DEFAULT_SNAP_TOLERANCE: f32 = 20.0;

/// Puzzle settings. Missing fields take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    pub piece_count: u32,
    /// Fixed RNG seed; `None` seeds from the clock.
    pub seed: Option<u64>,
    pub snap_tolerance: f32,
    pub viewport_fraction: f32,
    pub outline_width: f32,
    /// RGBA, unmultiplied.
    pub outline_color: [u8; 4],
    pub flatten_tolerance: f64,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            piece_count: DEFAULT_PIECE_COUNT,
            seed: None,
            snap_tolerance: DEFAULT_SNAP_TOLERANCE,
            viewport_fraction: DEFAULT_VIEWPORT_FRACTION,
            outline_width: 2.0,
            outline_color: [0, 0, 0, 255],
            flatten_tolerance: DEFAULT_FLATTEN_TOLERANCE,
        }
    }
}

impl PuzzleConfig {
    pub fn from_json(json: &str) -> PuzzleResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> PuzzleResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Config from the file named by [`CONFIG_ENV_VAR`], or the defaults.
    ///
    /// A file that is set but unreadable is logged and ignored.
    pub fn from_env() -> Self {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)).unwrap_or_else(|err| {
                log::warn!("Ignoring {}: {}", CONFIG_ENV_VAR, err);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn outline_style(&self) -> StrokeStyle {
        let [r, g, b, a] = self.outline_color;
        StrokeStyle {
            width: self.outline_width,
            color: Color32::from_rgba_unmultiplied(r, g, b, a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PuzzleError;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = PuzzleConfig::from_json(r#"{ "piece_count": 100, "seed": 9 }"#).unwrap();
        assert_eq!(config.piece_count, 100);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.snap_tolerance, DEFAULT_SNAP_TOLERANCE);
        assert_eq!(config.viewport_fraction, DEFAULT_VIEWPORT_FRACTION);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = PuzzleConfig::from_json("{ piece_count: ").unwrap_err();
        assert!(matches!(err, PuzzleError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = PuzzleConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, PuzzleError::Io(_)));
    }

    #[test]
    fn test_outline_style() {
        let style = PuzzleConfig::default().outline_style();
        assert_eq!(style, StrokeStyle::default());
    }
}
