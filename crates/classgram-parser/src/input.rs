//! Serde mirror of the JSON input document.
//!
//! Field names follow the document's PascalCase keys. Every field is optional
//! and `null` is treated like an absent field; unknown keys are ignored.

use serde::Deserialize;

use classgram_core::model::RelationshipKind;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Document {
    #[serde(default)]
    pub diagram: Option<DiagramInput>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct DiagramInput {
    pub diagram_name: Option<String>,
    pub classes: Option<Vec<ClassInput>>,
    pub relationships: Option<Vec<RelationshipInput>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct ClassInput {
    pub class_name: Option<String>,
    pub class_type: Option<String>,
    pub is_abstract: Option<bool>,
    pub attributes: Option<Vec<AttributeInput>>,
    pub methods: Option<Vec<MethodInput>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct AttributeInput {
    pub attribute_name: Option<String>,
    pub attribute_type: Option<String>,
    pub visibility: Option<String>,
    pub is_static: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct MethodInput {
    pub method_name: Option<String>,
    pub return_type: Option<String>,
    pub visibility: Option<String>,
    pub is_static: Option<bool>,
    pub parameters: Option<Vec<ParameterInput>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct ParameterInput {
    pub parameter_name: Option<String>,
    pub parameter_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct RelationshipInput {
    /// Normalized while deserializing; unknown strings become association.
    pub relationship_type: Option<RelationshipKind>,
    pub source_class: Option<String>,
    pub target_class: Option<String>,
    pub source_cardinality: Option<String>,
    pub target_cardinality: Option<String>,
    pub relationship_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relationship(json: &str) -> RelationshipInput {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_relationship_type_is_normalized() {
        let input = relationship(r#"{ "RelationshipType": " Realizes " }"#);
        assert_eq!(input.relationship_type, Some(RelationshipKind::Implementation));

        let input = relationship(r#"{ "RelationshipType": "knows-about" }"#);
        assert_eq!(input.relationship_type, Some(RelationshipKind::Association));
    }

    #[test]
    fn test_relationship_type_absent_or_null() {
        assert_eq!(relationship("{}").relationship_type, None);
        assert_eq!(
            relationship(r#"{ "RelationshipType": null }"#).relationship_type,
            None
        );
    }

    #[test]
    fn test_relationship_type_must_be_a_string() {
        let result = serde_json::from_str::<RelationshipInput>(r#"{ "RelationshipType": 3 }"#);
        assert!(result.is_err());
    }
}
