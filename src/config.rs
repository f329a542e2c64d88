use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::layout::grid_dims;
use crate::render::parse_hex_color;

/// Largest accepted drawing dimension in pixels.
pub const MAX_DIMENSION: f32 = 16_384.0;

/// Largest accepted drawing area in pixels (64 MiB of RGBA).
pub const MAX_PIXELS: f64 = 4096.0 * 4096.0;

/// Largest accepted routing grid, in cells.
pub const MAX_CELLS: usize = 1 << 22;

/// All tunable parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    // Routing
    pub cell_size: f32,
    pub max_wire_len: usize,
    pub leave: usize,

    // Seed picks allowed per grid cell before a pass gives up on its quota
    pub seed_attempt_factor: usize,

    pub style: Style,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            cell_size: 10.0,
            max_wire_len: 40,
            leave: 10,
            seed_attempt_factor: 4,
            style: Style::default(),
        }
    }
}

impl Params {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.cell_size.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "cell_size",
                value: self.cell_size,
            });
        }
        if self.max_wire_len == 0 {
            return Err(ConfigError::ZeroWireLength);
        }
        self.style.validate()
    }

    /// Validate a drawing area against this configuration.
    pub fn validate_area(&self, width: f32, height: f32) -> Result<(), ConfigError> {
        for (field, value) in [("width", width), ("height", height)] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
            if value > MAX_DIMENSION {
                return Err(ConfigError::TooLarge {
                    field,
                    value: value as f64,
                    limit: MAX_DIMENSION as f64,
                });
            }
        }
        self.validate()?;

        let pixels = width.max(0.0) as f64 * height.max(0.0) as f64;
        if pixels > MAX_PIXELS {
            return Err(ConfigError::TooLarge {
                field: "area",
                value: pixels,
                limit: MAX_PIXELS,
            });
        }

        let (rows, cols) = grid_dims(width, height, self.cell_size);
        let cells = rows.saturating_mul(cols);
        if cells > MAX_CELLS {
            return Err(ConfigError::TooLarge {
                field: "cells",
                value: cells as f64,
                limit: MAX_CELLS as f64,
            });
        }
        Ok(())
    }
}

/// Colors and animation timing for rendered output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub stroke: String,
    pub marker_fill: String,
    pub marker_outline: String,
    pub background: String,
    pub draw_ms: u32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: "#d4af37".into(),
            marker_fill: "#d4af37".into(),
            marker_outline: "#ffffff".into(),
            background: "#1a5d4a".into(),
            draw_ms: 2000,
        }
    }
}

impl Style {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for c in [&self.stroke, &self.marker_fill, &self.marker_outline, &self.background] {
            parse_hex_color(c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = Params::default();
        assert!(params.validate().is_ok());
        assert!(params.validate_area(1280.0, 720.0).is_ok());
    }

    #[test]
    fn zero_wire_length_rejected() {
        let params = Params {
            max_wire_len: 0,
            ..Params::default()
        };
        assert!(matches!(params.validate(), Err(ConfigError::ZeroWireLength)));
    }

    #[test]
    fn non_finite_and_oversized_area_rejected() {
        let params = Params::default();
        assert!(matches!(
            params.validate_area(f32::NAN, 10.0),
            Err(ConfigError::NonFinite { field: "width", .. })
        ));
        assert!(matches!(
            params.validate_area(10.0, 1e9),
            Err(ConfigError::TooLarge { field: "height", .. })
        ));
    }

    #[test]
    fn oversized_pixel_area_rejected() {
        let params = Params::default();
        assert!(params.validate_area(4096.0, 4096.0).is_ok());
        assert!(matches!(
            params.validate_area(16_384.0, 16_384.0),
            Err(ConfigError::TooLarge { field: "area", .. })
        ));
        assert!(matches!(
            params.validate_area(8192.0, 4097.0),
            Err(ConfigError::TooLarge { field: "area", .. })
        ));
    }

    #[test]
    fn tiny_cell_size_rejected() {
        for cell_size in [1e-7, 0.01, 0.5] {
            let params = Params {
                cell_size,
                ..Params::default()
            };
            assert!(
                matches!(
                    params.validate_area(4096.0, 4096.0),
                    Err(ConfigError::TooLarge { field: "cells", .. })
                ),
                "cell_size {cell_size}"
            );
        }
        // 4096 / 2 = 2048 per side is exactly the cap.
        let params = Params {
            cell_size: 2.0,
            ..Params::default()
        };
        assert!(params.validate_area(4096.0, 4096.0).is_ok());
    }

    #[test]
    fn degenerate_area_is_not_an_error() {
        let params = Params {
            cell_size: 0.0,
            ..Params::default()
        };
        assert!(params.validate_area(0.0, -5.0).is_ok());
    }

    #[test]
    fn bad_color_rejected() {
        let mut params = Params::default();
        params.style.stroke = "gold".into();
        assert!(matches!(params.validate(), Err(ConfigError::Color(_))));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let params: Params = serde_json::from_str(r#"{"cell_size": 8.0}"#).unwrap();
        assert_eq!(params.cell_size, 8.0);
        assert_eq!(params.max_wire_len, 40);
        assert_eq!(params.style, Style::default());
    }
}
