//! A stateful holder for the diagram currently on display.
//!
//! [`ClassDiagramView`] remembers zoom and relationship visibility across
//! reloads, so a host can re-render after every edit without losing the
//! user's view settings. A failed load clears the current diagram.

use log::{debug, warn};

use classgram_core::{geometry::Size, model::RelationshipKind};

use crate::{
    DiagramBuilder,
    error::ClassgramError,
    rendered::{KindVisibility, RenderedDiagram, ZOOM_STEP},
};

/// Current diagram plus the view preferences applied to every load.
pub struct ClassDiagramView {
    builder: DiagramBuilder,
    current: Option<RenderedDiagram>,
    visibility: KindVisibility,
    zoom: f32,
}

impl ClassDiagramView {
    pub fn new(builder: DiagramBuilder) -> Self {
        Self {
            builder,
            current: None,
            visibility: KindVisibility::default(),
            zoom: 1.0,
        }
    }

    /// Parses and renders `source`, replacing the current diagram.
    ///
    /// # Errors
    ///
    /// Returns the parse or render error; the view is empty afterwards.
    pub fn load(&mut self, source: &str) -> Result<&RenderedDiagram, ClassgramError> {
        let rendered = self
            .builder
            .parse(source)
            .and_then(|diagram| self.builder.render(&diagram));

        match rendered {
            Ok(mut rendered) => {
                rendered.set_visibility(self.visibility.clone());
                rendered.set_zoom(self.zoom);
                debug!(boxes = rendered.boxes().len(); "View updated");
                let current: &RenderedDiagram = self.current.insert(rendered);
                Ok(current)
            }
            Err(err) => {
                warn!(err:% = err; "Load failed, clearing view");
                self.current = None;
                Err(err)
            }
        }
    }

    /// Drops the current diagram. Preferences are kept.
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&RenderedDiagram> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn zoom_in(&mut self) {
        self.zoom *= ZOOM_STEP;
        self.sync_zoom();
    }

    pub fn zoom_out(&mut self) {
        self.zoom /= ZOOM_STEP;
        self.sync_zoom();
    }

    /// Fits the current diagram into `viewport`. Without a diagram this does
    /// nothing.
    pub fn zoom_to_fit(&mut self, viewport: Size) {
        if let Some(current) = self.current.as_mut() {
            current.zoom_to_fit(viewport);
            self.zoom = current.zoom();
        }
    }

    pub fn visibility(&self) -> &KindVisibility {
        &self.visibility
    }

    pub fn set_kind_visible(&mut self, kind: RelationshipKind, visible: bool) {
        self.visibility.set(kind, visible);
        if let Some(current) = self.current.as_mut() {
            current.set_kind_visible(kind, visible);
        }
    }

    pub fn is_kind_visible(&self, kind: RelationshipKind) -> bool {
        self.visibility.is_visible(kind)
    }

    /// SVG of the current view, if a diagram is loaded.
    pub fn to_svg(&self) -> Option<String> {
        self.current.as_ref().map(RenderedDiagram::to_svg)
    }

    fn sync_zoom(&mut self) {
        if let Some(current) = self.current.as_mut() {
            current.set_zoom(self.zoom);
        }
    }
}

impl Default for ClassDiagramView {
    fn default() -> Self {
        Self::new(DiagramBuilder::default())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    const SOURCE: &str = r#"{
        "Diagram": {
            "Classes": [{"ClassName": "A"}, {"ClassName": "B"}],
            "Relationships": [
                {"RelationshipType": "uses", "SourceClass": "A", "TargetClass": "B"}
            ]
        }
    }"#;

    #[test]
    fn test_load_and_clear_on_error() {
        let mut view = ClassDiagramView::default();
        assert!(view.is_empty());

        view.load(SOURCE).unwrap();
        assert!(!view.is_empty());
        assert!(view.to_svg().is_some());

        let err = view.load("{ not json").unwrap_err();
        assert!(err.parse_error().is_some());
        assert!(view.is_empty());
        assert!(view.to_svg().is_none());
    }

    #[test]
    fn test_preferences_survive_reload() {
        let mut view = ClassDiagramView::default();
        view.load(SOURCE).unwrap();

        view.zoom_in();
        view.set_kind_visible(RelationshipKind::Dependency, false);
        assert_eq!(view.current().unwrap().visible_connectors().count(), 0);

        let reloaded = view.load(SOURCE).unwrap();
        assert_approx_eq!(f32, reloaded.zoom(), 1.2);
        assert!(!reloaded.is_kind_visible(RelationshipKind::Dependency));
        assert_eq!(reloaded.visible_connectors().count(), 0);
    }

    #[test]
    fn test_preferences_set_while_empty_apply_on_load() {
        let mut view = ClassDiagramView::default();
        view.zoom_out();
        view.set_kind_visible(RelationshipKind::Dependency, false);
        view.zoom_to_fit(Size::new(10.0, 10.0));

        let loaded = view.load(SOURCE).unwrap();
        assert_approx_eq!(f32, loaded.zoom(), 1.0 / 1.2, epsilon = 1e-6);
        assert!(!loaded.is_kind_visible(RelationshipKind::Dependency));
    }
}
