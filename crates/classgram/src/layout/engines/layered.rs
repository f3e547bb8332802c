//! Layered layout engine backed by `rust-sugiyama`.
//!
//! The solver only decides which layer each class belongs to and the order of
//! classes inside a layer. Actual positions are rebuilt from the measured box
//! sizes so that no two boxes overlap:
//!
//! - boxes of one layer are separated by the configured spacing,
//! - layers are stacked with the spacing between their tallest boxes,
//! - each connected component gets its own column of layers,
//! - classes without relationships go into a trailing row.
//!
//! Generalization edges point from parent to child, so parents end up in the
//! upper layers. When the solver panics or returns nothing the engine falls
//! back to the row placement.

use std::collections::{BTreeMap, HashMap, HashSet};

use log::{debug, warn};
use rust_sugiyama::configure::Config;

use classgram_core::{
    geometry::{Point, Size},
    model::RelationshipKind,
};

use crate::{
    error::ClassgramError,
    layout::{
        Placement,
        engines::{ClassEngine, check_sizes, row},
    },
    structure::{ClassGraph, ClassIndex},
};

/// Classes of one layer, left to right.
type Layer = Vec<(ClassIndex, Size)>;

/// Dense solver vertices and the edges between them.
#[derive(Debug, Default)]
struct SolverGraph {
    /// Solver vertex id is the position in this list.
    vertices: Vec<(ClassIndex, Size)>,
    edges: Vec<(u32, u32)>,
}

pub struct Engine {
    /// Gap between boxes of a layer, between layers and between components
    spacing: f32,
    fallback: row::Engine,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            spacing: 50.0,
            fallback: row::Engine::new(),
        }
    }

    /// Set the spacing used between boxes, layers and components
    pub fn set_spacing(&mut self, spacing: f32) -> &mut Self {
        self.spacing = spacing;
        self.fallback.set_spacing(spacing);
        self
    }

    /// Solver input: edges between sized classes, self-loops removed.
    ///
    /// Only classes that take part in an edge get a solver vertex. Vertex ids
    /// are dense, so the solver never sees an id without edges.
    fn solver_graph(&self, graph: &ClassGraph<'_>, sizes: &[Option<Size>]) -> SolverGraph {
        let mut solver = SolverGraph::default();
        let mut vertex_ids: HashMap<ClassIndex, u32> = HashMap::new();

        for rel in graph.relationships().filter(|rel| !rel.is_self_loop()) {
            let (Some(source_size), Some(target_size)) =
                (sizes[rel.source().index()], sizes[rel.target().index()])
            else {
                continue;
            };

            let mut vertex = |idx: ClassIndex, size: Size| {
                *vertex_ids.entry(idx).or_insert_with(|| {
                    solver.vertices.push((idx, size));
                    (solver.vertices.len() - 1) as u32
                })
            };
            let source = vertex(rel.source(), source_size);
            let target = vertex(rel.target(), target_size);

            solver.edges.push(match rel.relationship().kind() {
                // Child points at parent in the model; the solver ranks edge
                // sources first.
                RelationshipKind::Inheritance | RelationshipKind::Implementation => {
                    (target, source)
                }
                _ => (source, target),
            });
        }

        solver
    }

    /// Groups the solver output into components of ordered layers.
    ///
    /// Returns `None` when the solver panicked or produced no coordinates.
    fn solve(&self, solver: &SolverGraph) -> Option<Vec<Vec<Layer>>> {
        let avg_node_size = solver
            .vertices
            .iter()
            .map(|(_, s)| (s.width() + s.height()) / 2.0)
            .sum::<f32>()
            / solver.vertices.len().max(1) as f32;

        let solver_edges = solver.edges.clone();
        let layouts = std::panic::catch_unwind(move || {
            let config = Config {
                minimum_length: 1,
                vertex_spacing: (avg_node_size / 50.0).clamp(2.0, 5.0) as f64,
                ..Default::default()
            };
            rust_sugiyama::from_edges(&solver_edges, &config)
        });

        let results = match layouts {
            Ok(results) if !results.is_empty() => results,
            Ok(_) => {
                warn!("Layered solver returned no layout, falling back to row placement");
                return None;
            }
            Err(err) => {
                let message = if let Some(panic_msg) = err.downcast_ref::<String>() {
                    panic_msg.clone()
                } else if let Some(panic_msg) = err.downcast_ref::<&str>() {
                    panic_msg.to_string()
                } else {
                    "unknown error".to_string()
                };
                warn!(message; "Layered solver panicked, falling back to row placement");
                return None;
            }
        };

        let mut components = Vec::with_capacity(results.len());
        for (coords, _, _) in &results {
            // Layer key -> (x, class)
            let mut layers: BTreeMap<i64, Vec<(f64, ClassIndex, Size)>> = BTreeMap::new();
            let mut layer_of: HashMap<u32, i64> = HashMap::new();

            for &(id, (x, y)) in coords {
                let Ok(vertex) = u32::try_from(id) else {
                    debug!(id; "Solver vertex out of range");
                    continue;
                };
                let Some(&(idx, size)) = solver.vertices.get(vertex as usize) else {
                    debug!(id; "Solver vertex does not name a sized class");
                    continue;
                };
                let key = (y as f64).round() as i64;
                layer_of.insert(vertex, key);
                layers.entry(key).or_default().push((x as f64, idx, size));
            }

            if layers.is_empty() {
                continue;
            }

            let mut ordered: Vec<Layer> = layers
                .into_values()
                .map(|mut layer| {
                    layer.sort_by(|a, b| a.0.total_cmp(&b.0));
                    layer.into_iter().map(|(_, idx, size)| (idx, size)).collect()
                })
                .collect();

            // The solver's vertical axis may grow either way; keep edge
            // sources above their targets.
            let (mut down, mut up) = (0usize, 0usize);
            for (source, target) in &solver.edges {
                if let (Some(s), Some(t)) = (layer_of.get(source), layer_of.get(target)) {
                    if s < t {
                        down += 1;
                    } else if s > t {
                        up += 1;
                    }
                }
            }
            if up > down {
                ordered.reverse();
            }

            components.push(ordered);
        }

        if components.is_empty() {
            warn!("Layered solver placed no known class, falling back to row placement");
            return None;
        }
        Some(components)
    }

    fn layer_width(&self, layer: &Layer) -> f32 {
        let gaps = self.spacing * layer.len().saturating_sub(1) as f32;
        layer.iter().map(|(_, s)| s.width()).sum::<f32>() + gaps
    }

    fn layer_height(layer: &Layer) -> f32 {
        layer.iter().map(|(_, s)| s.height()).fold(0.0, f32::max)
    }

    /// Positions components side by side and the isolated row below them,
    /// relative to the origin.
    fn arrange(&self, components: &[Vec<Layer>], isolated: &Layer) -> (Placement, Size) {
        let mut placement = Placement::new();
        let mut component_x = 0.0f32;
        let mut bottom = 0.0f32;

        for layers in components {
            let component_width = layers
                .iter()
                .map(|layer| self.layer_width(layer))
                .fold(0.0, f32::max);

            let mut y = 0.0f32;
            for layer in layers {
                // Center each layer in its component column.
                let mut x = component_x + (component_width - self.layer_width(layer)) / 2.0;
                for (idx, size) in layer {
                    placement.insert(*idx, Point::new(x, y));
                    x += size.width() + self.spacing;
                }
                y += Self::layer_height(layer) + self.spacing;
            }

            bottom = bottom.max(y - self.spacing);
            component_x += component_width + self.spacing;
        }

        let mut width = (component_x - self.spacing).max(0.0);
        let mut height = bottom;

        if !isolated.is_empty() {
            let y = if placement.is_empty() { 0.0 } else { bottom + self.spacing };
            let mut x = 0.0f32;
            for (idx, size) in isolated {
                placement.insert(*idx, Point::new(x, y));
                x += size.width() + self.spacing;
            }
            width = width.max(self.layer_width(isolated));
            height = y + Self::layer_height(isolated);
        }

        (placement, Size::new(width, height))
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

        let solver = self.solver_graph(graph, sizes);
        let sized = move || {
            graph
                .classes()
                .filter_map(move |(idx, _)| sizes[idx.index()].map(|size| (idx, size)))
        };

        if solver.edges.is_empty() {
            debug!("No relationships to layer, using row placement");
            return Ok(self.fallback.place_row(sized(), available));
        }

        debug!(
            nodes = solver.vertices.len(),
            edges = solver.edges.len();
            "Applying layered solver"
        );
        let Some(components) = self.solve(&solver) else {
            return Ok(self.fallback.place_row(sized(), available));
        };

        let layered: HashSet<ClassIndex> = components
            .iter()
            .flatten()
            .flatten()
            .map(|(idx, _)| *idx)
            .collect();
        let isolated: Layer = sized().filter(|(idx, _)| !layered.contains(idx)).collect();

        let (relative, extent) = self.arrange(&components, &isolated);

        let offset = Point::new(
            ((available.width() - extent.width()) / 2.0).max(0.0),
            ((available.height() - extent.height()) / 2.0).max(0.0),
        );
        let placement = relative
            .into_iter()
            .map(|(idx, point)| (idx, point.add_point(offset)))
            .collect();

        Ok(placement)
    }
}

#[cfg(test)]
mod tests {
    use classgram_core::model::{Class, Diagram, Relationship};

    use super::*;

    fn diagram(classes: &[&str], relationships: &[(RelationshipKind, &str, &str)]) -> Diagram {
        Diagram::new(
            None,
            classes.iter().map(|name| Class::new(*name)).collect(),
            relationships
                .iter()
                .map(|(kind, s, t)| Relationship::new(*kind, *s, *t))
                .collect(),
        )
    }

    fn bounds_of(placement: &Placement, sizes: &[Option<Size>]) -> Vec<(f32, f32, f32, f32)> {
        placement
            .iter()
            .map(|(idx, p)| {
                let s = sizes[idx.index()].unwrap_or_default();
                (p.x(), p.y(), p.x() + s.width(), p.y() + s.height())
            })
            .collect()
    }

    #[test]
    fn test_no_edges_matches_row() {
        let d = diagram(&["A", "B"], &[]);
        let graph = ClassGraph::from_diagram(&d);
        let sizes = [Some(Size::new(100.0, 60.0)), Some(Size::new(120.0, 60.0))];
        let available = Size::new(800.0, 600.0);

        let layered = Engine::new().place(&graph, &sizes, available).unwrap();
        let row = row::Engine::new().place(&graph, &sizes, available).unwrap();
        assert_eq!(layered, row);
    }

    #[test]
    fn test_parent_above_children() {
        let d = diagram(
            &["Shape", "Circle", "Square", "Loose"],
            &[
                (RelationshipKind::Inheritance, "Circle", "Shape"),
                (RelationshipKind::Inheritance, "Square", "Shape"),
            ],
        );
        let graph = ClassGraph::from_diagram(&d);
        let sizes = vec![Some(Size::new(80.0, 40.0)); 4];

        let placement = Engine::new()
            .place(&graph, &sizes, Size::new(800.0, 600.0))
            .unwrap();

        assert_eq!(placement.len(), 4);
        let shape = placement[&ClassIndex::new(0)];
        let circle = placement[&ClassIndex::new(1)];
        let square = placement[&ClassIndex::new(2)];
        let loose = placement[&ClassIndex::new(3)];

        assert!(shape.y() + 40.0 <= circle.y());
        assert_eq!(circle.y(), square.y());
        assert!(loose.y() >= circle.y() + 40.0);
    }

    #[test]
    fn test_leading_isolated_class_goes_to_trailing_row() {
        let d = diagram(
            &["Loose", "Shape", "Circle", "Square"],
            &[
                (RelationshipKind::Inheritance, "Circle", "Shape"),
                (RelationshipKind::Inheritance, "Square", "Shape"),
            ],
        );
        let graph = ClassGraph::from_diagram(&d);
        let sizes = vec![Some(Size::new(80.0, 40.0)); 4];

        let placement = Engine::new()
            .place(&graph, &sizes, Size::new(800.0, 600.0))
            .unwrap();

        assert_eq!(placement.len(), 4);
        let loose = placement[&ClassIndex::new(0)];
        let shape = placement[&ClassIndex::new(1)];
        let circle = placement[&ClassIndex::new(2)];

        assert!(shape.y() + 40.0 <= circle.y());
        assert!(loose.y() >= circle.y() + 40.0);
    }

    #[test]
    fn test_solver_vertices_are_dense() {
        let d = diagram(
            &["Loose", "A", "Unsized", "B"],
            &[
                (RelationshipKind::Association, "A", "B"),
                (RelationshipKind::Association, "A", "Unsized"),
                (RelationshipKind::Inheritance, "B", "B"),
            ],
        );
        let graph = ClassGraph::from_diagram(&d);
        let sizes = [
            Some(Size::new(10.0, 10.0)),
            Some(Size::new(20.0, 20.0)),
            None,
            Some(Size::new(30.0, 30.0)),
        ];

        let solver = Engine::new().solver_graph(&graph, &sizes);
        assert_eq!(
            solver.vertices,
            vec![
                (ClassIndex::new(1), Size::new(20.0, 20.0)),
                (ClassIndex::new(3), Size::new(30.0, 30.0)),
            ]
        );
        assert_eq!(solver.edges, vec![(0, 1)]);
    }

    #[test]
    fn test_boxes_never_overlap() {
        let d = diagram(
            &["A", "B", "C", "D", "E"],
            &[
                (RelationshipKind::Association, "A", "B"),
                (RelationshipKind::Composition, "A", "C"),
                (RelationshipKind::Dependency, "B", "D"),
                (RelationshipKind::Aggregation, "C", "D"),
                (RelationshipKind::Association, "E", "E"),
            ],
        );
        let graph = ClassGraph::from_diagram(&d);
        let sizes: Vec<_> = (0..5)
            .map(|i| Some(Size::new(60.0 + 10.0 * i as f32, 40.0 + 5.0 * i as f32)))
            .collect();

        let placement = Engine::new()
            .place(&graph, &sizes, Size::new(400.0, 300.0))
            .unwrap();
        assert_eq!(placement.len(), 5);

        let boxes = bounds_of(&placement, &sizes);
        for (i, a) in boxes.iter().enumerate() {
            for b in &boxes[i + 1..] {
                let separate = a.2 <= b.0 || b.2 <= a.0 || a.3 <= b.1 || b.3 <= a.1;
                assert!(separate, "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn test_unsized_classes_are_not_placed() {
        let d = diagram(
            &["A", "B", "C"],
            &[
                (RelationshipKind::Association, "A", "B"),
                (RelationshipKind::Association, "B", "C"),
            ],
        );
        let graph = ClassGraph::from_diagram(&d);
        let sizes = [Some(Size::new(50.0, 50.0)), None, Some(Size::new(50.0, 50.0))];

        let placement = Engine::new()
            .place(&graph, &sizes, Size::new(800.0, 600.0))
            .unwrap();
        assert!(!placement.contains_key(&ClassIndex::new(1)));
        assert_eq!(placement.len(), 2);
    }
}
