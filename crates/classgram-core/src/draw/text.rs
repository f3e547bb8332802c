//! Text measurement and rendering.
//!
//! - [`TextDefinition`] - Reusable text style (font, weight, anchor, colors, padding)
//! - [`Text`] - A renderable text element combining content with a [`TextDefinition`]
//!
//! Text is measured with real font metrics from `cosmic-text`. When no usable
//! font is installed the measurement falls back to a fixed per-character
//! advance, so sizes stay deterministic and positive on headless machines.
//!
//! # Quick Start
//!
//! ```
//! # use classgram_core::draw::{Text, TextDefinition};
//! let mut style = TextDefinition::new();
//! style.set_font_size(10);
//! style.set_bold(true);
//!
//! let text = Text::new(&style, "«interface»\nDrawable");
//! let size = text.calculate_size();
//! assert!(size.width() > 0.0);
//! assert!(size.height() > 0.0);
//! ```
//!
//! # Rendering
//!
//! When rendered via the [`Drawable`] trait, [`Text`] produces a `<text>`
//! element with one `<tspan>` per line on the
//! [`Text`](crate::draw::RenderLayer::Text) layer, plus an optional rounded
//! background on the [`Background`](crate::draw::RenderLayer::Background) layer.

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Weight};
use log::{info, warn};
use svg::{self, node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Insets, Point, Size},
};

/// Points to pixels at standard DPI.
const PT_TO_PX: f32 = 1.33;
const LINE_HEIGHT_FACTOR: f32 = 1.15;
/// Average glyph advance, relative to the pixel font size, used when no font
/// can shape the text.
const FALLBACK_ADVANCE: f32 = 0.55;

/// Horizontal alignment of text relative to its box.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// Lines start at the left padding edge.
    Start,
    /// Lines are centered on the box.
    #[default]
    Middle,
}

impl TextAnchor {
    fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
        }
    }
}

/// Visual style of text elements.
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"Arial"` |
/// | Font size | `12` |
/// | Bold | `false` |
/// | Anchor | [`TextAnchor::Middle`] |
/// | Background color | `None` |
/// | Text color | `None` (SVG default, black) |
/// | Padding | Zero on all sides |
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    bold: bool,
    anchor: TextAnchor,
    background_color: Option<Color>,
    color: Option<Color>,
    padding: Insets,
}

impl TextDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in points.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    pub fn set_anchor(&mut self, anchor: TextAnchor) {
        self.anchor = anchor;
    }

    /// Sets the background color. `None` renders no background.
    pub fn set_background_color(&mut self, color: Option<Color>) {
        self.background_color = color;
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// Sets the padding around the text.
    ///
    /// Padding is part of the measured size whether or not a background is
    /// drawn.
    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }

    pub fn background_color(&self) -> Option<&Color> {
        self.background_color.as_ref()
    }

    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    fn font_size_px(&self) -> f32 {
        self.font_size as f32 * PT_TO_PX
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 12,
            bold: false,
            anchor: TextAnchor::default(),
            background_color: None,
            color: None,
            padding: Insets::default(),
        }
    }
}

/// A renderable text element.
///
/// Multi-line content is split on `\n`; every line gets the same height.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
        }
    }

    pub fn content(&self) -> &str {
        self.content
    }

    /// Size of the text including its padding.
    pub fn calculate_size(&self) -> Size {
        self.calculate_size_without_padding()
            .add_padding(self.definition.padding())
    }

    fn calculate_size_without_padding(&self) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(self.content, self.definition)
    }
}

impl<'a> Drawable for Text<'a> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let padding = self.definition.padding();
        let text_size = self.calculate_size();
        let inner_size = self.calculate_size_without_padding();

        let lines: Vec<&str> = self.content.lines().collect();
        let line_height = if lines.is_empty() {
            0.0
        } else {
            inner_size.height() / lines.len() as f32
        };

        // Padding may be asymmetric, so the inner block is not always centered
        // on `position`.
        let bounds = position.to_bounds(text_size);
        let inner_top = bounds.min_y() + padding.top();
        let x = match self.definition.anchor() {
            TextAnchor::Start => bounds.min_x() + padding.left(),
            TextAnchor::Middle => {
                bounds.min_x() + padding.left() + inner_size.width() / 2.0
            }
        };

        let mut rendered_text = svg_element::Text::new("")
            .set("x", x)
            .set("y", inner_top - line_height / 2.0)
            .set("text-anchor", self.definition.anchor().to_svg_value())
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size());

        if self.definition.is_bold() {
            rendered_text = rendered_text.set("font-weight", "bold");
        }

        if let Some(color) = self.definition.color() {
            rendered_text = rendered_text
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        for line in lines {
            let tspan = svg_element::TSpan::new("")
                .set("x", x)
                .set("dy", line_height)
                .add(SvgText::new(line));
            rendered_text = rendered_text.add(tspan);
        }

        if let Some(bg_color) = self.definition.background_color() {
            let bg = svg_element::Rectangle::new()
                .set("x", bounds.min_x())
                .set("y", bounds.min_y())
                .set("width", bounds.width())
                .set("height", bounds.height())
                .set("fill", bg_color.to_string())
                .set("fill-opacity", bg_color.alpha())
                .set("rx", 2.0);

            output.add_to_layer(RenderLayer::Background, Box::new(bg));
        }

        output.add_to_layer(RenderLayer::Text, Box::new(rendered_text));
        output
    }

    fn size(&self) -> Size {
        self.calculate_size()
    }
}

/// Owns the shared `FontSystem` used for text measurement.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Measures `text` in pixels with the font described by `text_def`.
    ///
    /// Lines that the font system cannot shape (no fonts, no glyphs) are
    /// measured with [`FALLBACK_ADVANCE`] per character.
    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let font_size_px = text_def.font_size_px();
        let line_height = font_size_px * LINE_HEIGHT_FACTOR;
        let lines: Vec<&str> = text.lines().collect();
        let total_height = line_height * lines.len().max(1) as f32;

        let fallback_width =
            |line: &str| line.chars().count() as f32 * font_size_px * FALLBACK_ADVANCE;

        let Ok(mut font_system) = self.font_system.lock() else {
            warn!("FontSystem lock poisoned, using fallback text metrics");
            let max_width = lines.iter().map(|l| fallback_width(*l)).fold(0.0, f32::max);
            return Size::new(max_width, total_height);
        };

        let metrics = Metrics::new(font_size_px, line_height);
        let weight = if text_def.is_bold() {
            Weight::BOLD
        } else {
            Weight::NORMAL
        };
        let attrs = Attrs::new()
            .family(Family::Name(text_def.font_family()))
            .weight(weight);

        let mut max_width: f32 = 0.0;
        for &line in &lines {
            let mut buffer = Buffer::new(&mut font_system, metrics);
            let mut buffer = buffer.borrow_with(&mut font_system);
            buffer.set_size(None, None);
            buffer.set_text(line, &attrs, Shaping::Advanced, None);
            buffer.shape_until_scroll(true);

            let measured = buffer
                .layout_runs()
                .filter_map(|run| run.glyphs.last().map(|last| last.x + last.w))
                .fold(0.0, f32::max);

            let width = if measured > 0.0 {
                measured
            } else {
                fallback_width(line)
            };
            max_width = max_width.max(width);
        }

        Size::new(max_width, total_height)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
