//! Placement of class boxes.
//!
//! # Pipeline Position
//!
//! ```text
//! ClassGraph + measured sizes
//!     ↓ layout (this module)
//! Placement (top-left per ClassIndex)
//!     ↓ route, glyph, label, canvas
//! RenderedDiagram
//! ```
//!
//! Engines sit behind the [`ClassEngine`] trait and are selected through
//! [`LayoutEngine`]; [`EngineBuilder`] builds and caches them.

mod engines;

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::Deserialize;

use classgram_core::geometry::{Bounds, Point, Size};

use crate::structure::ClassIndex;

pub use engines::{ClassEngine, EngineBuilder};

/// Available layout engines.
///
/// - `Row` - Single centered row in model order (default)
/// - `Layered` - Layered placement computed by `rust-sugiyama`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutEngine {
    #[default]
    Row,
    Layered,
}

impl FromStr for LayoutEngine {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "row" => Ok(Self::Row),
            "layered" => Ok(Self::Layered),
            _ => Err("Unsupported layout engine"),
        }
    }
}

impl From<LayoutEngine> for &'static str {
    fn from(val: LayoutEngine) -> Self {
        match val {
            LayoutEngine::Row => "row",
            LayoutEngine::Layered => "layered",
        }
    }
}

impl fmt::Display for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Top-left positions of the placed classes, in placement order.
pub type Placement = IndexMap<ClassIndex, Point>;

/// Position and size of one placed class box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxGeometry {
    position: Point,
    size: Size,
}

impl BoxGeometry {
    /// Creates a geometry from its top-left corner and size.
    pub fn new(position: Point, size: Size) -> Self {
        Self { position, size }
    }

    /// Top-left corner.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.position, self.size)
    }
}
