//! Configuration types for pipeline layout, animation timing and styling.
//!
//! All types implement [`serde::Deserialize`] and fall back to defaults for
//! any field that is not provided, so a partial TOML file is valid.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Node footprint and vertical track geometry.
//! - [`AnimationConfig`] - Per-node and per-edge reveal delays.
//! - [`StyleConfig`] - Pipeline and background colors.
//!
//! # Example
//!
//! ```
//! # use cipherflow::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.animation().node_delay().as_millis(), 1200);
//! assert!(config.style().palette().is_ok());
//! ```

use std::time::Duration;

use serde::Deserialize;

use cipherflow_core::color::Color;

use crate::model::PipelineKind;

/// Top-level configuration root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    animation: AnimationConfig,

    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(layout: LayoutConfig, animation: AnimationConfig, style: StyleConfig) -> Self {
        Self {
            layout,
            animation,
            style,
        }
    }

    /// Replaces the animation timing (builder style).
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn animation(&self) -> &AnimationConfig {
        &self.animation
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Geometry of the single-column pipeline track.
///
/// Node sizes are fixed constants, never derived from label content.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of every step node.
    node_width: f32,
    /// Height of every step node.
    node_height: f32,
    /// Distance between the tops of consecutive nodes.
    vertical_spacing: f32,
    /// Horizontal center of the track.
    center_x: f32,
    /// Top edge of the first node.
    y_base: f32,
    /// Gap between a node's right edge and its data label.
    label_offset: f32,
}

impl LayoutConfig {
    pub fn new(node_width: f32, node_height: f32, vertical_spacing: f32) -> Self {
        Self {
            node_width,
            node_height,
            vertical_spacing,
            ..Self::default()
        }
    }

    pub fn node_width(&self) -> f32 {
        self.node_width
    }

    pub fn node_height(&self) -> f32 {
        self.node_height
    }

    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }

    pub fn center_x(&self) -> f32 {
        self.center_x
    }

    pub fn y_base(&self) -> f32 {
        self.y_base
    }

    pub fn label_offset(&self) -> f32 {
        self.label_offset
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 220.0,
            node_height: 50.0,
            vertical_spacing: 80.0,
            center_x: 150.0,
            y_base: 50.0,
            label_offset: 10.0,
        }
    }
}

/// Reveal timing for one sequencer run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Time a node is observed before moving on (milliseconds).
    node_delay_ms: u64,
    /// Time an edge takes to draw (milliseconds).
    edge_delay_ms: u64,
}

impl AnimationConfig {
    pub fn new(node_delay: Duration, edge_delay: Duration) -> Self {
        Self {
            node_delay_ms: u64::try_from(node_delay.as_millis()).unwrap_or(u64::MAX),
            edge_delay_ms: u64::try_from(edge_delay.as_millis()).unwrap_or(u64::MAX),
        }
    }

    pub fn node_delay(&self) -> Duration {
        Duration::from_millis(self.node_delay_ms)
    }

    pub fn edge_delay(&self) -> Duration {
        Duration::from_millis(self.edge_delay_ms)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            node_delay_ms: 1200,
            edge_delay_ms: 800,
        }
    }
}

/// Visual styling configuration.
///
/// Colors are CSS color strings; unset fields fall back to the built-in
/// palette.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    background_color: Option<String>,

    #[serde(default)]
    classical_color: Option<String>,

    #[serde(default)]
    pqc_color: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_optional(self.background_color.as_deref(), "background")
    }

    /// Resolves every configured color into a [`Palette`].
    ///
    /// # Errors
    ///
    /// Returns an error naming the first color string that fails to parse.
    pub fn palette(&self) -> Result<Palette, String> {
        let defaults = Palette::default();

        Ok(Palette {
            background: self.background_color()?,
            classical: parse_optional(self.classical_color.as_deref(), "classical")?
                .unwrap_or(defaults.classical),
            pqc: parse_optional(self.pqc_color.as_deref(), "pqc")?.unwrap_or(defaults.pqc),
        })
    }
}

fn parse_optional(value: Option<&str>, field: &str) -> Result<Option<Color>, String> {
    value
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid {field} color in config: {err}"))
}

/// Resolved colors for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    background: Option<Color>,
    classical: Color,
    pqc: Color,
}

impl Palette {
    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Accent color of a pipeline.
    pub fn accent(&self, kind: PipelineKind) -> Color {
        match kind {
            PipelineKind::Classical => self.classical,
            PipelineKind::Pqc => self.pqc,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: None,
            classical: Color::new("#e67e22").unwrap_or_default(),
            pqc: Color::new("#27ae60").unwrap_or_default(),
        }
    }
}
