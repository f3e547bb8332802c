//! Validates the deserialized document and lowers it into the diagram model.

use indexmap::IndexMap;
use log::{debug, trace};

use classgram_core::model::{
    Attribute, Class, Diagram, Method, Parameter, Relationship, RelationshipKind, Visibility,
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    input::{
        AttributeInput, ClassInput, DiagramInput, Document, MethodInput, ParameterInput,
        RelationshipInput,
    },
    locate,
};

const CLASS_NAME_KEY: &str = "ClassName";

/// Lowers a deserialized document into a [`Diagram`].
///
/// Classes with an empty or duplicate name are reported and every problem is
/// returned together. Relationships are kept as written, including ones that
/// reference unknown classes; those are resolved when the diagram is laid out.
pub(crate) fn lower_document(document: Document, source: &str) -> Result<Diagram, ParseError> {
    let Some(input) = document.diagram else {
        return Err(Diagnostic::error("document has no `Diagram` object")
            .with_code(ErrorCode::E103)
            .with_help("wrap the classes and relationships in `{ \"Diagram\": { ... } }`")
            .into());
    };

    let DiagramInput {
        diagram_name,
        classes,
        relationships,
    } = input;

    let mut collector = DiagnosticCollector::new();
    let classes = lower_classes(classes.unwrap_or_default(), source, &mut collector);
    collector.finish()?;

    let relationships: Vec<Relationship> = relationships
        .unwrap_or_default()
        .into_iter()
        .map(lower_relationship)
        .collect();

    debug!(
        classes = classes.len(),
        relationships = relationships.len();
        "Lowered diagram"
    );

    Ok(Diagram::new(diagram_name, classes, relationships))
}

fn lower_classes(
    inputs: Vec<ClassInput>,
    source: &str,
    collector: &mut DiagnosticCollector,
) -> Vec<Class> {
    // name -> index of the class that defined it first
    let mut defined: IndexMap<String, usize> = IndexMap::new();
    // raw `ClassName` literal -> how many times it has been seen so far
    let mut occurrences: IndexMap<String, usize> = IndexMap::new();
    let mut classes = Vec::with_capacity(inputs.len());

    for (index, input) in inputs.into_iter().enumerate() {
        let Some(name) = input.class_name.clone() else {
            collector.emit(missing_name(index));
            continue;
        };

        let occurrence = occurrences.entry(name.clone()).or_default();
        let nth = *occurrence;
        *occurrence += 1;

        if name.trim().is_empty() {
            let mut diag = missing_name(index);
            if let Some(span) = locate::string_values(source, CLASS_NAME_KEY, &name).get(nth) {
                diag = diag.with_label(*span, "empty class name");
            }
            collector.emit(diag);
            continue;
        }

        if let Some(&first) = defined.get(&name) {
            let spans = locate::string_values(source, CLASS_NAME_KEY, &name);
            let mut diag = Diagnostic::error(format!("class `{name}` is defined multiple times"))
                .with_code(ErrorCode::E201)
                .with_help(format!(
                    "class names must be unique; the first definition is class #{first}"
                ));
            if let Some(span) = spans.get(nth) {
                diag = diag.with_label(*span, "duplicate definition");
            }
            if let Some(span) = spans.first() {
                diag = diag.with_secondary_label(*span, "first defined here");
            }
            collector.emit(diag);
            continue;
        }

        defined.insert(name.clone(), index);
        classes.push(lower_class(name, input));
    }

    classes
}

fn missing_name(index: usize) -> Diagnostic {
    Diagnostic::error(format!("class #{index} has no name"))
        .with_code(ErrorCode::E200)
        .with_help("set `ClassName` to a non-empty string")
}

fn lower_class(name: String, input: ClassInput) -> Class {
    let attributes = input
        .attributes
        .unwrap_or_default()
        .into_iter()
        .map(lower_attribute)
        .collect();
    let methods = input
        .methods
        .unwrap_or_default()
        .into_iter()
        .map(lower_method)
        .collect();

    trace!(class = name.as_str(); "Lowered class");

    Class::new(name)
        .with_stereotype(input.class_type.unwrap_or_default())
        .with_abstract(input.is_abstract.unwrap_or(false))
        .with_attributes(attributes)
        .with_methods(methods)
}

fn lower_attribute(input: AttributeInput) -> Attribute {
    Attribute::new(
        input.attribute_name.unwrap_or_default(),
        input.attribute_type.unwrap_or_default(),
        Visibility::parse(input.visibility.as_deref().unwrap_or_default()),
        input.is_static.unwrap_or(false),
    )
}

fn lower_method(input: MethodInput) -> Method {
    let parameters = input
        .parameters
        .unwrap_or_default()
        .into_iter()
        .map(lower_parameter)
        .collect();

    Method::new(
        input.method_name.unwrap_or_default(),
        input.return_type.unwrap_or_default(),
        Visibility::parse(input.visibility.as_deref().unwrap_or_default()),
        input.is_static.unwrap_or(false),
    )
    .with_parameters(parameters)
}

fn lower_parameter(input: ParameterInput) -> Parameter {
    Parameter::new(
        input.parameter_name.unwrap_or_default(),
        input.parameter_type.unwrap_or_default(),
    )
}

fn lower_relationship(input: RelationshipInput) -> Relationship {
    let kind = input
        .relationship_type
        .unwrap_or(RelationshipKind::Association);

    Relationship::new(
        kind,
        input.source_class.unwrap_or_default(),
        input.target_class.unwrap_or_default(),
    )
    .with_name(input.relationship_name)
    .with_cardinalities(input.source_cardinality, input.target_cardinality)
}
