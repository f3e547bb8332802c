//! Configuration types for classgram rendering.
//!
//! All types implement [`serde::Deserialize`] with `#[serde(default)]`, so a
//! partial TOML file only overrides the keys it names.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Selects the [`LayoutEngine`] and its spacing and available area.
//! - [`StyleConfig`] - Background and class box fill colors.
//!
//! # Example
//!
//! ```
//! # use classgram::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().spacing(), 50.0);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use classgram_core::{color::Color, geometry::Size};

use crate::layout::LayoutEngine;

/// Default gap between neighbouring boxes.
pub const DEFAULT_SPACING: f32 = 50.0;
/// Default width of the area the row engine centers boxes in.
pub const DEFAULT_AVAILABLE_WIDTH: f32 = 800.0;
/// Default height of the area the row engine centers boxes in.
pub const DEFAULT_AVAILABLE_HEIGHT: f32 = 600.0;

const DEFAULT_BOX_FILL: &str = "lightblue";

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Layout engine selection and placement parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// The [`LayoutEngine`] used to place class boxes.
    engine: LayoutEngine,

    /// Gap between boxes in a row, and between layers.
    spacing: f32,

    /// Width of the area boxes are centered in.
    available_width: f32,

    /// Height of the area boxes are centered in.
    available_height: f32,
}

impl LayoutConfig {
    /// Creates a layout configuration with the given engine and default spacing
    /// and available area.
    pub fn new(engine: LayoutEngine) -> Self {
        Self {
            engine,
            ..Self::default()
        }
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_available_size(mut self, size: Size) -> Self {
        self.available_width = size.width();
        self.available_height = size.height();
        self
    }

    /// Returns the selected [`LayoutEngine`].
    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Returns the available area as a [`Size`].
    pub fn available_size(&self) -> Size {
        Size::new(self.available_width, self.available_height)
    }

    /// Checks that every numeric value is usable for layout.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending key.
    pub fn validate(&self) -> Result<(), String> {
        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(format!(
                "layout.spacing must be a non-negative number, got {}",
                self.spacing
            ));
        }
        for (key, value) in [
            ("layout.available_width", self.available_width),
            ("layout.available_height", self.available_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{key} must be a non-negative number, got {value}"));
            }
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            engine: LayoutEngine::default(),
            spacing: DEFAULT_SPACING,
            available_width: DEFAULT_AVAILABLE_WIDTH,
            available_height: DEFAULT_AVAILABLE_HEIGHT,
        }
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Colors are kept as strings until they are needed so that one bad value is
/// reported where it is used.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] of the canvas, as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Fill [`Color`] of class boxes, as a color string.
    #[serde(default)]
    box_fill_color: Option<String>,
}

impl StyleConfig {
    pub fn new(background_color: Option<String>, box_fill_color: Option<String>) -> Self {
        Self {
            background_color,
            box_fill_color,
        }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the parsed class box fill [`Color`], `lightblue` when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is not a valid color.
    pub fn box_fill_color(&self) -> Result<Color, String> {
        let value = self.box_fill_color.as_deref().unwrap_or(DEFAULT_BOX_FILL);
        Color::new(value).map_err(|err| format!("Invalid box fill color in config: {err}"))
    }
}
