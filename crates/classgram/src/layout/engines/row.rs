//! Single-row layout engine.
//!
//! Boxes are placed left to right in model order, top-aligned, with the row
//! centered in the available area. The row never wraps; a row wider than the
//! available area starts at `x = 0` and the canvas grows to fit it.

use log::trace;

use classgram_core::geometry::{Point, Size};

use crate::{
    error::ClassgramError,
    layout::{
        Placement,
        engines::{ClassEngine, check_sizes},
    },
    structure::{ClassGraph, ClassIndex},
};

pub struct Engine {
    /// Gap between neighbouring boxes
    spacing: f32,
}

impl Engine {
    pub fn new() -> Self {
        Self { spacing: 50.0 }
    }

    /// Set the gap between neighbouring boxes
    pub fn set_spacing(&mut self, spacing: f32) -> &mut Self {
        self.spacing = spacing;
        self
    }

    /// Places `boxes` in one row, in iteration order.
    pub(super) fn place_row(
        &self,
        boxes: impl IntoIterator<Item = (ClassIndex, Size)>,
        available: Size,
    ) -> Placement {
        let boxes: Vec<_> = boxes.into_iter().collect();
        if boxes.is_empty() {
            return Placement::new();
        }

        let gaps = self.spacing * (boxes.len() - 1) as f32;
        let total_width = boxes.iter().map(|(_, s)| s.width()).sum::<f32>() + gaps;
        let row_height = boxes.iter().map(|(_, s)| s.height()).fold(0.0, f32::max);

        let start_x = ((available.width() - total_width) / 2.0).max(0.0);
        let start_y = ((available.height() - row_height) / 2.0).max(0.0);
        trace!(total_width, row_height, start_x, start_y; "Row metrics");

        let mut placement = Placement::with_capacity(boxes.len());
        let mut x = start_x;
        for (idx, size) in boxes {
            placement.insert(idx, Point::new(x, start_y));
            x += size.width() + self.spacing;
        }
        placement
    }
}

impl ClassEngine for Engine {
    fn place(
        &self,
        graph: &ClassGraph<'_>,
        sizes: &[Option<Size>],
        available: Size,
    ) -> Result<Placement, ClassgramError> {
        check_sizes(graph, sizes)?;
        let sized = graph
            .classes()
            .filter_map(|(idx, _)| sizes[idx.index()].map(|size| (idx, size)));
        Ok(self.place_row(sized, available))
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use classgram_core::model::{Class, Diagram};

    use super::*;

    fn diagram(n: usize) -> Diagram {
        Diagram::new(
            None,
            (0..n).map(|i| Class::new(format!("C{i}"))).collect(),
            vec![],
        )
    }

    #[test]
    fn test_two_boxes_centered() {
        let d = diagram(2);
        let graph = ClassGraph::from_diagram(&d);
        let sizes = [Some(Size::new(100.0, 60.0)), Some(Size::new(120.0, 60.0))];

        let placement = Engine::new()
            .place(&graph, &sizes, Size::new(800.0, 600.0))
            .unwrap();

        // total = 100 + 50 + 120 = 270
        let a = placement[&ClassIndex::new(0)];
        let b = placement[&ClassIndex::new(1)];
        assert_approx_eq!(f32, a.x(), 265.0);
        assert_approx_eq!(f32, a.y(), 270.0);
        assert_approx_eq!(f32, b.x(), 415.0);
        assert_approx_eq!(f32, b.y(), 270.0);
    }

    #[test]
    fn test_row_wider_than_available_starts_at_zero() {
        let d = diagram(3);
        let graph = ClassGraph::from_diagram(&d);
        let sizes = [Some(Size::new(400.0, 700.0)); 3];

        let placement = Engine::new()
            .place(&graph, &sizes, Size::new(800.0, 600.0))
            .unwrap();

        let first = placement[&ClassIndex::new(0)];
        assert_approx_eq!(f32, first.x(), 0.0);
        assert_approx_eq!(f32, first.y(), 0.0);
        assert_approx_eq!(f32, placement[&ClassIndex::new(2)].x(), 900.0);
    }

    #[test]
    fn test_unsized_classes_are_skipped() {
        let d = diagram(3);
        let graph = ClassGraph::from_diagram(&d);
        let sizes = [Some(Size::new(50.0, 50.0)), None, Some(Size::new(50.0, 50.0))];

        let mut engine = Engine::new();
        engine.set_spacing(10.0);
        let placement = engine.place(&graph, &sizes, Size::default()).unwrap();

        assert_eq!(placement.len(), 2);
        assert!(!placement.contains_key(&ClassIndex::new(1)));
        assert_approx_eq!(f32, placement[&ClassIndex::new(2)].x(), 60.0);
    }

    #[test]
    fn test_empty_graph() {
        let d = diagram(0);
        let graph = ClassGraph::from_diagram(&d);
        let placement = Engine::new().place(&graph, &[], Size::new(800.0, 600.0)).unwrap();
        assert!(placement.is_empty());
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        fn sizes_strategy() -> impl Strategy<Value = Vec<Size>> {
            prop::collection::vec(
                (1.0f32..500.0, 1.0f32..300.0).prop_map(|(w, h)| Size::new(w, h)),
                1..12,
            )
        }

        fn check_row_never_overlaps(sizes: &[Size], spacing: f32) -> Result<(), TestCaseError> {
            let d = diagram(sizes.len());
            let graph = ClassGraph::from_diagram(&d);
            let sizes: Vec<_> = sizes.iter().copied().map(Some).collect();

            let mut engine = Engine::new();
            engine.set_spacing(spacing);
            let placement = engine
                .place(&graph, &sizes, Size::new(800.0, 600.0))
                .map_err(|e| TestCaseError::fail(e.to_string()))?;

            prop_assert_eq!(placement.len(), sizes.len());
            let spans: Vec<(f32, f32)> = placement
                .iter()
                .map(|(idx, p)| {
                    let w = sizes[idx.index()].map(|s| s.width()).unwrap_or_default();
                    (p.x(), p.x() + w)
                })
                .collect();
            for pair in spans.windows(2) {
                prop_assert!(pair[0].1 + spacing <= pair[1].0 + 1e-3);
            }
            for (_, p) in &placement {
                prop_assert!(p.x() >= 0.0 && p.y() >= 0.0);
            }
            Ok(())
        }

        proptest! {
            #[test]
            fn row_never_overlaps(sizes in sizes_strategy(), spacing in 0.0f32..100.0) {
                check_row_never_overlaps(&sizes, spacing)?;
            }
        }
    }
}
