//! The class graph: an arena of classes connected by resolved relationships.
//!
//! Every later stage addresses classes by [`ClassIndex`] instead of by name.
//! Relationships are resolved here once; an endpoint that names no known
//! class drops the relationship.

use indexmap::IndexMap;
use log::{debug, trace, warn};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};

use classgram_core::model::{Class, Diagram, Relationship};

/// Index of a class in a [`ClassGraph`]. Indices follow model order, starting
/// at zero.
pub type ClassIndex = NodeIndex;

/// A relationship whose endpoints both name classes of the graph.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedRelationship<'a> {
    index: usize,
    relationship: &'a Relationship,
    source: ClassIndex,
    target: ClassIndex,
}

impl<'a> ResolvedRelationship<'a> {
    /// Position of the relationship in the diagram's relationship list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn relationship(&self) -> &'a Relationship {
        self.relationship
    }

    pub fn source(&self) -> ClassIndex {
        self.source
    }

    pub fn target(&self) -> ClassIndex {
        self.target
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Directed graph of the classes of one diagram.
///
/// Nodes borrow the model's classes; edge weights are positions in the
/// diagram's relationship list.
#[derive(Debug)]
pub struct ClassGraph<'a> {
    diagram: &'a Diagram,
    graph: DiGraph<&'a Class, usize>,
    name_map: IndexMap<&'a str, ClassIndex>,
}

impl<'a> ClassGraph<'a> {
    /// Builds the graph for `diagram`.
    ///
    /// A class whose name repeats an earlier one keeps its node but is not
    /// reachable by name; relationships bind to the first definition.
    pub fn from_diagram(diagram: &'a Diagram) -> Self {
        let mut graph = DiGraph::with_capacity(
            diagram.classes().len(),
            diagram.relationships().len(),
        );
        let mut name_map = IndexMap::with_capacity(diagram.classes().len());

        for class in diagram.classes() {
            let idx = graph.add_node(class);
            if name_map.contains_key(class.name()) {
                warn!(class = class.name(); "Duplicate class name, relationships bind to the first definition");
                continue;
            }
            name_map.insert(class.name(), idx);
        }

        for (index, relationship) in diagram.relationships().iter().enumerate() {
            let source = name_map.get(relationship.source()).copied();
            let target = name_map.get(relationship.target()).copied();
            match (source, target) {
                (Some(source), Some(target)) => {
                    graph.add_edge(source, target, index);
                }
                _ => {
                    debug!(
                        index = index,
                        kind:? = relationship.kind(),
                        source = relationship.source(),
                        target = relationship.target();
                        "Skipping relationship with unknown endpoint"
                    );
                }
            }
        }

        trace!(nodes = graph.node_count(), edges = graph.edge_count(); "Class graph built");

        Self {
            diagram,
            graph,
            name_map,
        }
    }

    /// Number of classes, duplicates included.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Iterates over all classes in model order.
    pub fn classes(&self) -> impl Iterator<Item = (ClassIndex, &'a Class)> + '_ {
        self.graph
            .node_indices()
            .map(move |idx| (idx, self.graph[idx]))
    }

    /// Looks up a class by name.
    pub fn index_of(&self, name: &str) -> Option<ClassIndex> {
        self.name_map.get(name).copied()
    }

    /// Iterates over resolved relationships in model order.
    pub fn relationships(&self) -> impl Iterator<Item = ResolvedRelationship<'a>> + '_ {
        // Edges are added in model order, so edge indices are ascending.
        self.graph.edge_indices().filter_map(move |edge| self.resolve(edge))
    }

    /// Number of relationships that survived resolution.
    pub fn relationship_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns true when the class takes part in no relationship, self-loops
    /// excluded.
    pub fn is_isolated(&self, idx: ClassIndex) -> bool {
        self.graph
            .neighbors_undirected(idx)
            .all(|neighbor| neighbor == idx)
    }

    fn resolve(&self, edge: EdgeIndex) -> Option<ResolvedRelationship<'a>> {
        let (source, target) = self.graph.edge_endpoints(edge)?;
        let index = *self.graph.edge_weight(edge)?;
        let relationship = self.diagram.relationships().get(index)?;
        Some(ResolvedRelationship {
            index,
            relationship,
            source,
            target,
        })
    }
}

#[cfg(test)]
mod tests {
    use classgram_core::model::RelationshipKind;

    use super::*;

    fn diagram(classes: &[&str], relationships: &[(&str, &str)]) -> Diagram {
        Diagram::new(
            None,
            classes.iter().map(|name| Class::new(*name)).collect(),
            relationships
                .iter()
                .map(|(s, t)| Relationship::new(RelationshipKind::Association, *s, *t))
                .collect(),
        )
    }

    #[test]
    fn test_indices_follow_model_order() {
        let d = diagram(&["A", "B", "C"], &[]);
        let graph = ClassGraph::from_diagram(&d);

        let names: Vec<_> = graph.classes().map(|(idx, c)| (idx.index(), c.name())).collect();
        assert_eq!(names, [(0, "A"), (1, "B"), (2, "C")]);
        assert_eq!(graph.index_of("B"), Some(NodeIndex::new(1)));
        assert_eq!(graph.index_of("Z"), None);
    }

    #[test]
    fn test_unknown_endpoints_are_dropped() {
        let d = diagram(&["A", "B"], &[("A", "Ghost"), ("B", "A"), ("", "A")]);
        let graph = ClassGraph::from_diagram(&d);

        let resolved: Vec<_> = graph.relationships().collect();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].index(), 1);
        assert_eq!(resolved[0].source(), NodeIndex::new(1));
        assert_eq!(resolved[0].target(), NodeIndex::new(0));
    }

    #[test]
    fn test_duplicate_name_binds_to_first() {
        let d = diagram(&["A", "A", "B"], &[("B", "A")]);
        let graph = ClassGraph::from_diagram(&d);

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.index_of("A"), Some(NodeIndex::new(0)));
        let rel = graph.relationships().next().unwrap();
        assert_eq!(rel.target(), NodeIndex::new(0));
    }

    #[test]
    fn test_isolated_and_self_loop() {
        let d = diagram(&["A", "B", "C"], &[("A", "B"), ("C", "C")]);
        let graph = ClassGraph::from_diagram(&d);

        assert!(!graph.is_isolated(NodeIndex::new(0)));
        assert!(graph.is_isolated(NodeIndex::new(2)));
        assert!(graph.relationships().any(|r| r.is_self_loop()));
    }
}
