//! Render configuration and drawing style.
//!
//! [`RenderConfig`] carries the two scale parameters every render needs
//! (`bond_length`, `font_size`) plus a [`Style`] with stroke classes, colours,
//! connector lengths, the candidate ladder and the gate tolerance. The
//! default style is embedded from `resources/default.style.toml` and parsed
//! once; a custom TOML document may override any subset of it.

use super::error::StyleError;
use serde::Deserialize;
use std::sync::OnceLock;

const DEFAULT_STYLE_TOML: &str = include_str!("../../resources/default.style.toml");

static DEFAULT_STYLE: OnceLock<Style> = OnceLock::new();

/// Parameters for one call to [`render`](super::render::render).
///
/// Use struct-update syntax to change individual fields:
///
/// ```
/// use haworth_forge::RenderConfig;
///
/// let config = RenderConfig {
///     bond_length: 80.0,
///     ..RenderConfig::default()
/// };
/// assert_eq!(config.font_size, 12.0);
/// ```
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Ring bond length in rendering units.
    pub bond_length: f64,
    /// Label font size in rendering units.
    pub font_size: f64,
    pub style: Style,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bond_length: 60.0,
            font_size: 12.0,
            style: default_style().clone(),
        }
    }
}

impl RenderConfig {
    /// Default style at the given scale.
    pub fn with_scale(bond_length: f64, font_size: f64) -> Self {
        Self {
            bond_length,
            font_size,
            ..Self::default()
        }
    }

    pub fn connector_width(&self) -> f64 {
        self.style.strokes.connector_width * self.bond_length
    }

    pub fn label_gap(&self) -> f64 {
        self.style.layout.label_gap * self.font_size
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Style {
    pub strokes: StrokeStyle,
    pub colors: ColorStyle,
    pub layout: LayoutStyle,
    pub gate: GateStyle,
}

/// Stroke widths as fractions of the bond length.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrokeStyle {
    pub connector_width: f64,
    /// Thickness of the front ring edge.
    pub front_edge_width: f64,
    /// Thickness of a wedge edge at its back end.
    pub wedge_narrow_width: f64,
    pub back_edge_width: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            connector_width: 0.025,
            front_edge_width: 0.1,
            wedge_narrow_width: 0.025,
            back_edge_width: 0.03,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorStyle {
    pub stroke: String,
    pub text: String,
    /// Fill of the mask drawn behind the ring oxygen.
    pub background: String,
}

impl Default for ColorStyle {
    fn default() -> Self {
        Self {
            stroke: "#000000".to_string(),
            text: "#000000".to_string(),
            background: "#ffffff".to_string(),
        }
    }
}

/// Connector lengths (fractions of the bond length) and label spacing
/// (fractions of the font size).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutStyle {
    /// Substituent pointing away from the ring.
    pub exterior_length: f64,
    /// Substituent pointing across the ring interior.
    pub interior_length: f64,
    /// One exocyclic chain segment.
    pub chain_length: f64,
    /// Candidate tilts of the chain trunk away from its face, in degrees,
    /// tried in order.
    pub chain_angles_deg: Vec<f64>,
    /// Candidate leans of chain branches from the horizontal towards the
    /// trunk direction, in degrees, tried in order.
    pub branch_angles_deg: Vec<f64>,
    /// Candidate length multipliers, shortest first.
    pub ladder: Vec<f64>,
    /// Space between a connector end and its label box.
    pub label_gap: f64,
    pub oxygen_padding: f64,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self {
            exterior_length: 0.55,
            interior_length: 0.36,
            chain_length: 0.55,
            chain_angles_deg: vec![0.0, 25.0, -25.0, 50.0, -50.0, 75.0, -75.0],
            branch_angles_deg: vec![30.0, 60.0, -30.0],
            ladder: vec![1.0, 1.18, 1.34],
            label_gap: 0.2,
            oxygen_padding: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateStyle {
    /// Penetration tolerated before a connector counts as painting through a label.
    pub epsilon: f64,
}

impl Default for GateStyle {
    fn default() -> Self {
        Self { epsilon: 0.5 }
    }
}

/// Parses a style document, falling back to the embedded default when `None`.
pub fn load_style(custom_toml: Option<&str>) -> Result<Style, StyleError> {
    match custom_toml {
        Some(toml) => {
            let style: Style = toml::from_str(toml)?;
            style.validate()?;
            Ok(style)
        }
        None => Ok(default_style().clone()),
    }
}

/// The embedded default style.
pub fn default_style() -> &'static Style {
    DEFAULT_STYLE.get_or_init(|| {
        toml::from_str(DEFAULT_STYLE_TOML)
            .expect("Failed to parse embedded default style. This is a library bug.")
    })
}

impl Style {
    pub fn validate(&self) -> Result<(), StyleError> {
        let ratios = [
            ("strokes.connector_width", self.strokes.connector_width),
            ("strokes.front_edge_width", self.strokes.front_edge_width),
            ("strokes.wedge_narrow_width", self.strokes.wedge_narrow_width),
            ("strokes.back_edge_width", self.strokes.back_edge_width),
            ("layout.exterior_length", self.layout.exterior_length),
            ("layout.interior_length", self.layout.interior_length),
            ("layout.chain_length", self.layout.chain_length),
        ];
        for (field, value) in ratios {
            positive(field, value)?;
        }
        non_negative("layout.label_gap", self.layout.label_gap)?;
        non_negative("layout.oxygen_padding", self.layout.oxygen_padding)?;
        non_negative("gate.epsilon", self.gate.epsilon)?;

        angles("layout.chain_angles_deg", &self.layout.chain_angles_deg)?;
        angles("layout.branch_angles_deg", &self.layout.branch_angles_deg)?;

        let ladder = &self.layout.ladder;
        if ladder.is_empty() {
            return Err(StyleError::Invalid {
                field: "layout.ladder",
                detail: "needs at least one multiplier".to_string(),
            });
        }
        for value in ladder {
            positive("layout.ladder", *value)?;
        }
        if ladder.windows(2).any(|w| w[1] <= w[0]) {
            return Err(StyleError::Invalid {
                field: "layout.ladder",
                detail: "multipliers must be strictly increasing".to_string(),
            });
        }

        for (field, color) in [
            ("colors.stroke", &self.colors.stroke),
            ("colors.text", &self.colors.text),
            ("colors.background", &self.colors.background),
        ] {
            if color.trim().is_empty() {
                return Err(StyleError::Invalid {
                    field,
                    detail: "empty colour".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), StyleError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(StyleError::Invalid {
            field,
            detail: format!("{} must be a positive number", value),
        })
    }
}

fn angles(field: &'static str, values: &[f64]) -> Result<(), StyleError> {
    if values.is_empty() {
        return Err(StyleError::Invalid {
            field,
            detail: "needs at least one angle".to_string(),
        });
    }
    match values.iter().find(|v| !(-90.0..=90.0).contains(*v)) {
        Some(v) => Err(StyleError::Invalid {
            field,
            detail: format!("{} is outside [-90, 90]", v),
        }),
        None => Ok(()),
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), StyleError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(StyleError::Invalid {
            field,
            detail: format!("{} must be a non-negative number", value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_style_matches_builtin_defaults() {
        assert_eq!(default_style(), &Style::default());
        assert!(default_style().validate().is_ok());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let style = load_style(Some("[gate]\nepsilon = 1.0\n")).unwrap();
        assert_eq!(style.gate.epsilon, 1.0);
        assert_eq!(style.layout, LayoutStyle::default());
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = load_style(Some("[layout]\nbogus = 1\n")).unwrap_err();
        assert!(matches!(err, StyleError::Parse(_)));
    }

    #[test]
    fn rejects_unsorted_ladder() {
        let err = load_style(Some("[layout]\nladder = [1.2, 1.0]\n")).unwrap_err();
        assert!(matches!(
            err,
            StyleError::Invalid {
                field: "layout.ladder",
                ..
            }
        ));
    }

    #[test]
    fn rejects_empty_or_out_of_range_angles() {
        let err = load_style(Some("[layout]\nchain_angles_deg = []\n")).unwrap_err();
        assert!(matches!(
            err,
            StyleError::Invalid {
                field: "layout.chain_angles_deg",
                ..
            }
        ));
        let err = load_style(Some("[layout]\nbranch_angles_deg = [30.0, 120.0]\n")).unwrap_err();
        assert!(matches!(
            err,
            StyleError::Invalid {
                field: "layout.branch_angles_deg",
                ..
            }
        ));
    }

    #[test]
    fn rejects_non_positive_widths() {
        let err = load_style(Some("[strokes]\nconnector_width = 0.0\n")).unwrap_err();
        assert!(matches!(
            err,
            StyleError::Invalid {
                field: "strokes.connector_width",
                ..
            }
        ));
    }

    #[test]
    fn scaled_quantities() {
        let config = RenderConfig::default();
        assert!((config.connector_width() - 1.5).abs() < 1e-9);
        assert!((config.label_gap() - 2.4).abs() < 1e-9);
    }
}
