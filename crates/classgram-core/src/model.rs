//! The immutable class diagram model.
//!
//! A [`Diagram`] owns the classes and relationships that the rendering
//! pipeline consumes. Model values are built once (usually by the JSON loader
//! in `classgram-parser`) and never mutated afterwards.
//!
//! # Overview
//!
//! - [`Class`] - A class box with its attributes and methods
//! - [`Attribute`], [`Method`], [`Parameter`] - Class members
//! - [`Visibility`] - Member access level and its UML symbol
//! - [`Relationship`] - A typed link between two classes, referenced by name
//! - [`RelationshipKind`] - The canonical relationship kinds
//!
//! # Example
//!
//! ```
//! # use classgram_core::model::{Attribute, Class, Diagram, Relationship, RelationshipKind, Visibility};
//! let shape = Class::new("Shape").with_abstract(true);
//! let circle = Class::new("Circle")
//!     .with_attributes(vec![Attribute::new("radius", "f64", Visibility::Private, false)]);
//! let extends = Relationship::new(RelationshipKind::normalize("extends"), "Circle", "Shape");
//!
//! let diagram = Diagram::new(None, vec![shape, circle], vec![extends]);
//! assert_eq!(diagram.classes().len(), 2);
//! assert_eq!(diagram.relationships()[0].kind(), RelationshipKind::Inheritance);
//! ```

use std::{convert::Infallible, fmt, str::FromStr};

use serde::Deserialize;

/// The stereotype assumed when a class does not declare one.
pub const DEFAULT_STEREOTYPE: &str = "class";

/// Member access level.
///
/// The declaration order doubles as the display order of members inside a
/// class box (see [`Class::with_attributes`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Visibility {
    Public,
    Protected,
    ProtectedInternal,
    Internal,
    PrivateProtected,
    Private,
    #[default]
    Unknown,
}

impl Visibility {
    /// Parses a visibility keyword case-insensitively.
    ///
    /// `package` is accepted as an alias of `internal`. Compound keywords may be
    /// written with a space, a hyphen, or nothing between the words. Anything
    /// else maps to [`Visibility::Unknown`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use classgram_core::model::Visibility;
    /// assert_eq!(Visibility::parse("Public"), Visibility::Public);
    /// assert_eq!(Visibility::parse("package"), Visibility::Internal);
    /// assert_eq!(Visibility::parse("protected internal"), Visibility::ProtectedInternal);
    /// assert_eq!(Visibility::parse("friend"), Visibility::Unknown);
    /// ```
    pub fn parse(value: &str) -> Self {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "public" => Self::Public,
            "private" => Self::Private,
            "protected" => Self::Protected,
            "internal" | "package" => Self::Internal,
            "protectedinternal" => Self::ProtectedInternal,
            "privateprotected" => Self::PrivateProtected,
            _ => Self::Unknown,
        }
    }

    /// Returns the UML symbol shown in front of a member.
    ///
    /// Unknown visibility renders as public.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Public | Self::Unknown => "+",
            Self::Private => "-",
            Self::Protected => "#",
            Self::Internal => "~",
            Self::ProtectedInternal => "#~",
            Self::PrivateProtected => "-#",
        }
    }
}

/// A typed data member of a class.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    name: String,
    type_name: String,
    visibility: Visibility,
    is_static: bool,
}

impl Attribute {
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        visibility: Visibility,
        is_static: bool,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            visibility,
            is_static,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }
}

/// A named, typed method parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    type_name: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// A method of a class with its ordered parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    name: String,
    return_type: String,
    visibility: Visibility,
    is_static: bool,
    parameters: Vec<Parameter>,
}

impl Method {
    pub fn new(
        name: impl Into<String>,
        return_type: impl Into<String>,
        visibility: Visibility,
        is_static: bool,
    ) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            visibility,
            is_static,
            parameters: Vec::new(),
        }
    }

    /// Sets the parameters, keeping their order.
    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }
}

/// A class definition.
///
/// The class name is the join key used by relationships. Attributes and
/// methods are kept ordered by [`Visibility`]; members with equal visibility
/// keep their input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    name: String,
    stereotype: String,
    is_abstract: bool,
    attributes: Vec<Attribute>,
    methods: Vec<Method>,
}

impl Class {
    /// Creates a concrete class with the default stereotype and no members.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stereotype: DEFAULT_STEREOTYPE.to_string(),
            is_abstract: false,
            attributes: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Sets the stereotype. Blank values keep the default stereotype.
    pub fn with_stereotype(mut self, stereotype: impl Into<String>) -> Self {
        let stereotype = stereotype.into();
        if !stereotype.trim().is_empty() {
            self.stereotype = stereotype.trim().to_string();
        }
        self
    }

    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    /// Sets the attributes, ordering them by visibility.
    pub fn with_attributes(mut self, mut attributes: Vec<Attribute>) -> Self {
        attributes.sort_by_key(Attribute::visibility);
        self.attributes = attributes;
        self
    }

    /// Sets the methods, ordering them by visibility.
    pub fn with_methods(mut self, mut methods: Vec<Method>) -> Self {
        methods.sort_by_key(Method::visibility);
        self.methods = methods;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stereotype(&self) -> &str {
        &self.stereotype
    }

    /// Returns true when the stereotype is the implicit `class` one.
    pub fn has_default_stereotype(&self) -> bool {
        self.stereotype.eq_ignore_ascii_case(DEFAULT_STEREOTYPE)
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }
}

/// The canonical relationship kinds.
///
/// Every input string maps to exactly one kind through
/// [`RelationshipKind::normalize`]; unrecognized strings become
/// [`RelationshipKind::Association`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "String")]
pub enum RelationshipKind {
    Inheritance,
    Implementation,
    Composition,
    Aggregation,
    Association,
    Dependency,
}

impl RelationshipKind {
    /// All kinds in declaration order.
    pub const ALL: [RelationshipKind; 6] = [
        Self::Inheritance,
        Self::Implementation,
        Self::Composition,
        Self::Aggregation,
        Self::Association,
        Self::Dependency,
    ];

    /// Maps a relationship type string to its canonical kind.
    ///
    /// Matching ignores case and surrounding whitespace.
    ///
    /// Besides `implementation`, the UML spellings `implements`,
    /// `realization` and `realizes` also map to
    /// [`RelationshipKind::Implementation`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use classgram_core::model::RelationshipKind;
    /// assert_eq!(RelationshipKind::normalize("Inherits"), RelationshipKind::Inheritance);
    /// assert_eq!(RelationshipKind::normalize("ComposedOf"), RelationshipKind::Composition);
    /// assert_eq!(RelationshipKind::normalize("has"), RelationshipKind::Aggregation);
    /// assert_eq!(RelationshipKind::normalize("uses"), RelationshipKind::Dependency);
    /// assert_eq!(RelationshipKind::normalize("knows-about"), RelationshipKind::Association);
    /// ```
    pub fn normalize(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "inheritance" | "extends" | "inherits" => Self::Inheritance,
            "implementation" | "implements" | "realization" | "realizes" => Self::Implementation,
            "composition" | "composedof" => Self::Composition,
            "aggregation" | "aggregates" | "has" => Self::Aggregation,
            "dependency" | "depends" | "uses" => Self::Dependency,
            _ => Self::Association,
        }
    }

    /// Returns the lowercase canonical name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Inheritance => "inheritance",
            Self::Implementation => "implementation",
            Self::Composition => "composition",
            Self::Aggregation => "aggregation",
            Self::Association => "association",
            Self::Dependency => "dependency",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RelationshipKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::normalize(s))
    }
}

impl From<String> for RelationshipKind {
    fn from(value: String) -> Self {
        Self::normalize(&value)
    }
}

/// A typed relationship between two classes, referenced by class name.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    kind: RelationshipKind,
    source: String,
    target: String,
    name: Option<String>,
    source_cardinality: Option<String>,
    target_cardinality: Option<String>,
}

impl Relationship {
    pub fn new(kind: RelationshipKind, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            kind,
            source: source.into(),
            target: target.into(),
            name: None,
            source_cardinality: None,
            target_cardinality: None,
        }
    }

    /// Sets the relationship label. Blank labels are dropped.
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = non_blank(name);
        self
    }

    /// Sets the multiplicity labels at both ends. Blank values are dropped.
    pub fn with_cardinalities(mut self, source: Option<String>, target: Option<String>) -> Self {
        self.source_cardinality = non_blank(source);
        self.target_cardinality = non_blank(target);
        self
    }

    pub fn kind(&self) -> RelationshipKind {
        self.kind
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn source_cardinality(&self) -> Option<&str> {
        self.source_cardinality.as_deref()
    }

    pub fn target_cardinality(&self) -> Option<&str> {
        self.target_cardinality.as_deref()
    }
}

/// A complete class diagram.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagram {
    name: Option<String>,
    classes: Vec<Class>,
    relationships: Vec<Relationship>,
}

impl Diagram {
    pub fn new(
        name: Option<String>,
        classes: Vec<Class>,
        relationships: Vec<Relationship>,
    ) -> Self {
        Self {
            name: non_blank(name),
            classes,
            relationships,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_synonym_table() {
        let table = [
            ("inheritance", RelationshipKind::Inheritance),
            ("extends", RelationshipKind::Inheritance),
            ("inherits", RelationshipKind::Inheritance),
            ("implementation", RelationshipKind::Implementation),
            ("implements", RelationshipKind::Implementation),
            ("realization", RelationshipKind::Implementation),
            ("realizes", RelationshipKind::Implementation),
            ("composition", RelationshipKind::Composition),
            ("composedof", RelationshipKind::Composition),
            ("aggregation", RelationshipKind::Aggregation),
            ("aggregates", RelationshipKind::Aggregation),
            ("has", RelationshipKind::Aggregation),
            ("dependency", RelationshipKind::Dependency),
            ("depends", RelationshipKind::Dependency),
            ("uses", RelationshipKind::Dependency),
            ("association", RelationshipKind::Association),
            ("associates", RelationshipKind::Association),
            ("references", RelationshipKind::Association),
        ];

        for (input, expected) in table {
            assert_eq!(RelationshipKind::normalize(input), expected, "{input}");
            assert_eq!(
                RelationshipKind::normalize(&input.to_uppercase()),
                expected,
                "{input} uppercased"
            );
        }
    }

    #[test]
    fn test_normalize_mixed_case_and_whitespace() {
        assert_eq!(
            RelationshipKind::normalize("  ComposedOf "),
            RelationshipKind::Composition
        );
        assert_eq!(RelationshipKind::normalize(""), RelationshipKind::Association);
    }

    #[test]
    fn test_relationship_kind_from_str_and_string() {
        let kind: RelationshipKind = "Uses".parse().unwrap();
        assert_eq!(kind, RelationshipKind::Dependency);
        assert_eq!(
            RelationshipKind::from("Extends".to_string()),
            RelationshipKind::Inheritance
        );
    }

    #[test]
    fn test_relationship_kind_name_roundtrip() {
        for kind in RelationshipKind::ALL {
            assert_eq!(RelationshipKind::normalize(kind.name()), kind);
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    #[test]
    fn test_visibility_symbols() {
        assert_eq!(Visibility::parse("public").symbol(), "+");
        assert_eq!(Visibility::parse("PRIVATE").symbol(), "-");
        assert_eq!(Visibility::parse("protected").symbol(), "#");
        assert_eq!(Visibility::parse("internal").symbol(), "~");
        assert_eq!(Visibility::parse("package").symbol(), "~");
        assert_eq!(Visibility::parse("protected-internal").symbol(), "#~");
        assert_eq!(Visibility::parse("private protected").symbol(), "-#");
        assert_eq!(Visibility::parse("").symbol(), "+");
        assert_eq!(Visibility::parse("sealed").symbol(), "+");
    }

    #[test]
    fn test_class_orders_members_by_visibility() {
        let class = Class::new("Account").with_attributes(vec![
            Attribute::new("balance", "f64", Visibility::Private, false),
            Attribute::new("id", "u64", Visibility::Public, false),
            Attribute::new("owner", "String", Visibility::Private, false),
            Attribute::new("kind", "Kind", Visibility::Protected, true),
        ]);

        let names: Vec<_> = class.attributes().iter().map(Attribute::name).collect();
        assert_eq!(names, ["id", "kind", "balance", "owner"]);
    }

    #[test]
    fn test_class_stereotype_defaults() {
        let class = Class::new("Shape");
        assert_eq!(class.stereotype(), DEFAULT_STEREOTYPE);
        assert!(class.has_default_stereotype());

        let blank = Class::new("Shape").with_stereotype("   ");
        assert!(blank.has_default_stereotype());

        let interface = Class::new("Drawable").with_stereotype("Interface");
        assert_eq!(interface.stereotype(), "Interface");
        assert!(!interface.has_default_stereotype());

        let upper = Class::new("Shape").with_stereotype("Class");
        assert!(upper.has_default_stereotype());
    }

    #[test]
    fn test_relationship_drops_blank_labels() {
        let rel = Relationship::new(RelationshipKind::Association, "A", "B")
            .with_name(Some("  ".to_string()))
            .with_cardinalities(Some("1".to_string()), Some(String::new()));

        assert_eq!(rel.name(), None);
        assert_eq!(rel.source_cardinality(), Some("1"));
        assert_eq!(rel.target_cardinality(), None);
    }

    #[test]
    fn test_method_parameters_keep_order() {
        let method = Method::new("move_to", "void", Visibility::Public, false)
            .with_parameters(vec![Parameter::new("x", "f32"), Parameter::new("y", "f32")]);

        let names: Vec<_> = method.parameters().iter().map(Parameter::name).collect();
        assert_eq!(names, ["x", "y"]);
    }
}
