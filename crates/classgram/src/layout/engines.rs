//! Layout engine factory.
//!
//! Engines implement [`ClassEngine`] and are created on demand by
//! [`EngineBuilder`], which keeps one configured instance per
//! [`LayoutEngine`] variant.

mod layered;
mod row;

use std::collections::HashMap;

use log::{debug, trace};

use classgram_core::geometry::Size;

use crate::{
    config::{DEFAULT_AVAILABLE_HEIGHT, DEFAULT_AVAILABLE_WIDTH, DEFAULT_SPACING},
    error::ClassgramError,
    layout::{LayoutEngine, Placement},
    structure::ClassGraph,
};

/// Interface of every class placement engine.
pub trait ClassEngine {
    /// Places the classes of `graph`.
    ///
    /// - `sizes`: measured size per class, indexed by `ClassIndex`. Classes
    ///   with `None` are not placed.
    /// - `available`: the area the engine may center its result in.
    ///
    /// # Errors
    /// Returns `ClassgramError::Layout` when `sizes` does not cover exactly
    /// the classes of `graph`.
    fn place(
        &self,
        graph: &ClassGraph<'_>,
        sizes: &[Option<Size>],
        available: Size,
    ) -> Result<Placement, ClassgramError>;
}

/// Builder for creating and configuring layout engines.
pub struct EngineBuilder {
    // Cache for reusing engines with the same configuration
    engines: HashMap<LayoutEngine, Box<dyn ClassEngine>>,

    spacing: f32,
    available: Size,
}

impl EngineBuilder {
    /// Create a new engine builder with an empty cache and default spacing and
    /// available area.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gap between neighbouring boxes and between layers.
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the area the placement is centered in.
    pub fn with_available_size(mut self, available: Size) -> Self {
        self.available = available;
        self
    }

    pub fn available_size(&self) -> Size {
        self.available
    }

    /// Get an engine of the specified type with configured options.
    pub fn engine(&mut self, engine_type: LayoutEngine) -> &dyn ClassEngine {
        let spacing = self.spacing;
        let engine = self.engines.entry(engine_type).or_insert_with(|| {
            trace!(engine:% = engine_type; "Creating layout engine");
            let engine: Box<dyn ClassEngine> = match engine_type {
                LayoutEngine::Row => {
                    let mut e = row::Engine::new();
                    e.set_spacing(spacing);
                    Box::new(e)
                }
                LayoutEngine::Layered => {
                    let mut e = layered::Engine::new();
                    e.set_spacing(spacing);
                    Box::new(e)
                }
            };
            engine
        });
        // Dereference to avoid returning reference to temporary
        &**engine
    }

    /// Places `graph` with the engine of the given type and the configured
    /// available area.
    ///
    /// # Errors
    /// Propagates the engine's `ClassgramError::Layout`.
    pub fn place(
        &mut self,
        engine_type: LayoutEngine,
        graph: &ClassGraph<'_>,
        sizes: &[Option<Size>],
    ) -> Result<Placement, ClassgramError> {
        let available = self.available;
        let placement = self.engine(engine_type).place(graph, sizes, available)?;
        debug!(engine:% = engine_type, placed = placement.len(); "Classes placed");
        Ok(placement)
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            engines: HashMap::new(),
            spacing: DEFAULT_SPACING,
            available: Size::new(DEFAULT_AVAILABLE_WIDTH, DEFAULT_AVAILABLE_HEIGHT),
        }
    }
}

fn check_sizes(graph: &ClassGraph<'_>, sizes: &[Option<Size>]) -> Result<(), ClassgramError> {
    if sizes.len() != graph.len() {
        return Err(ClassgramError::Layout(format!(
            "expected {} class sizes, got {}",
            graph.len(),
            sizes.len()
        )));
    }
    Ok(())
}
