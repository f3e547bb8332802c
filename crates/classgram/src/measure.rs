//! Formats class compartments and measures the resulting box.

use classgram_core::{
    draw::ClassBox,
    model::{Attribute, Class, Method},
};

/// Builds the measured [`ClassBox`] for `class`.
///
/// ```
/// # use classgram::measure::measure;
/// # use classgram::model::Class;
/// # use classgram::draw::Drawable;
/// let class_box = measure(&Class::new("Shape").with_abstract(true));
/// assert_eq!(class_box.header_lines(), ["«abstract» Shape"]);
/// assert!(class_box.size().height() >= 10.0);
/// ```
pub fn measure(class: &Class) -> ClassBox {
    ClassBox::new(
        header_lines(class),
        class.attributes().iter().map(attribute_line).collect(),
        class.methods().iter().map(method_line).collect(),
    )
}

/// Header text: the stereotype line when it is not the default, then the
/// name.
pub fn header_lines(class: &Class) -> Vec<String> {
    let mut lines = Vec::with_capacity(2);
    if !class.has_default_stereotype() {
        lines.push(format!("«{}»", class.stereotype()));
    }
    if class.is_abstract() {
        lines.push(format!("«abstract» {}", class.name()));
    } else {
        lines.push(class.name().to_string());
    }
    lines
}

/// `"{symbol} {name} : {static }{type}"`
pub fn attribute_line(attribute: &Attribute) -> String {
    format!(
        "{} {} : {}{}",
        attribute.visibility().symbol(),
        attribute.name(),
        static_prefix(attribute.is_static()),
        attribute.type_name()
    )
}

/// `"{symbol} {name}({p}: {T}, ...) : {static }{return}"`
pub fn method_line(method: &Method) -> String {
    let parameters = method
        .parameters()
        .iter()
        .map(|p| format!("{}: {}", p.name(), p.type_name()))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} {}({}) : {}{}",
        method.visibility().symbol(),
        method.name(),
        parameters,
        static_prefix(method.is_static()),
        method.return_type()
    )
}

fn static_prefix(is_static: bool) -> &'static str {
    if is_static { "static " } else { "" }
}

#[cfg(test)]
mod tests {
    use classgram_core::{
        draw::{BOX_PADDING, Drawable},
        model::{Parameter, Visibility},
    };

    use super::*;

    #[test]
    fn test_header_with_stereotype_and_abstract() {
        let class = Class::new("Shape")
            .with_stereotype("interface")
            .with_abstract(true);
        assert_eq!(header_lines(&class), ["«interface»", "«abstract» Shape"]);
    }

    #[test]
    fn test_default_stereotype_is_hidden() {
        let class = Class::new("Point").with_stereotype("Class");
        assert_eq!(header_lines(&class), ["Point"]);
    }

    #[test]
    fn test_attribute_line() {
        let attr = Attribute::new("count", "int", Visibility::Private, true);
        assert_eq!(attribute_line(&attr), "- count : static int");

        let attr = Attribute::new("name", "String", Visibility::ProtectedInternal, false);
        assert_eq!(attribute_line(&attr), "#~ name : String");
    }

    #[test]
    fn test_method_line() {
        let method = Method::new("move", "void", Visibility::Public, false).with_parameters(vec![
            Parameter::new("dx", "f32"),
            Parameter::new("dy", "f32"),
        ]);
        assert_eq!(method_line(&method), "+ move(dx: f32, dy: f32) : void");

        let method = Method::new("create", "Self", Visibility::Internal, true);
        assert_eq!(method_line(&method), "~ create() : static Self");
    }

    #[test]
    fn test_measure_empty_class_has_placeholders() {
        let class_box = measure(&Class::new("Empty"));
        assert_eq!(class_box.attribute_lines(), [" "]);
        assert_eq!(class_box.method_lines(), [" "]);
        assert!(class_box.size().width() >= BOX_PADDING);
    }

    #[test]
    fn test_measure_orders_members_by_visibility() {
        let class = Class::new("Account").with_attributes(vec![
            Attribute::new("secret", "u64", Visibility::Private, false),
            Attribute::new("id", "u64", Visibility::Public, false),
        ]);
        let class_box = measure(&class);
        assert_eq!(class_box.attribute_lines(), ["+ id : u64", "- secret : u64"]);
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        fn visibility_strategy() -> impl Strategy<Value = Visibility> {
            prop_oneof![
                Just(Visibility::Public),
                Just(Visibility::Protected),
                Just(Visibility::ProtectedInternal),
                Just(Visibility::Internal),
                Just(Visibility::PrivateProtected),
                Just(Visibility::Private),
                Just(Visibility::Unknown),
            ]
        }

        fn attribute_strategy() -> impl Strategy<Value = Attribute> {
            ("[a-z]{0,12}", "[A-Za-z<>]{0,10}", visibility_strategy(), any::<bool>())
                .prop_map(|(name, ty, vis, is_static)| Attribute::new(name, ty, vis, is_static))
        }

        fn class_strategy() -> impl Strategy<Value = Class> {
            (
                "[A-Za-z]{0,16}",
                "[a-z]{0,8}",
                any::<bool>(),
                prop::collection::vec(attribute_strategy(), 0..6),
            )
                .prop_map(|(name, stereotype, is_abstract, attributes)| {
                    Class::new(name)
                        .with_stereotype(stereotype)
                        .with_abstract(is_abstract)
                        .with_attributes(attributes)
                })
        }

        fn check_measure_at_least_padding(class: &Class) -> Result<(), TestCaseError> {
            let size = measure(class).size();
            prop_assert!(size.width() >= BOX_PADDING);
            prop_assert!(size.height() >= BOX_PADDING);
            prop_assert!(size.width().is_finite() && size.height().is_finite());
            Ok(())
        }

        proptest! {
            #[test]
            fn measure_at_least_padding(class in class_strategy()) {
                check_measure_at_least_padding(&class)?;
            }
        }
    }
}
