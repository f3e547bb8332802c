//! The three-compartment UML class box.

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition, Text, TextAnchor, TextDefinition},
    geometry::{Insets, Point, Size},
};

/// Total padding added around the compartments, split evenly between
/// opposite sides.
pub const BOX_PADDING: f32 = 10.0;
/// Padding around the header text block.
pub const HEADER_PADDING: f32 = 5.0;
/// Line shown in a compartment that has no members.
pub const PLACEHOLDER_LINE: &str = " ";

fn line_padding() -> Insets {
    Insets::new(2.0, 5.0, 2.0, 5.0)
}

/// A class box made of a bold centered header, an attribute compartment and a
/// method compartment.
///
/// The box is measured once on construction; styling changes made afterwards
/// through [`ClassBox::with_fill_color`] and [`ClassBox::with_stroke`] do not
/// affect its size.
///
/// # Examples
///
/// ```
/// # use classgram_core::draw::{ClassBox, Drawable};
/// let class_box = ClassBox::new(
///     vec!["«interface»".to_string(), "Drawable".to_string()],
///     vec![],
///     vec!["+ draw() : void".to_string()],
/// );
///
/// // An empty compartment still holds one placeholder line.
/// assert_eq!(class_box.attribute_lines(), [" "]);
/// assert!(class_box.size().width() > 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct ClassBox {
    header_lines: Vec<String>,
    attribute_lines: Vec<String>,
    method_lines: Vec<String>,
    header_text: TextDefinition,
    member_text: TextDefinition,
    fill_color: Option<Color>,
    stroke: StrokeDefinition,
    header_height: f32,
    attribute_heights: Vec<f32>,
    method_heights: Vec<f32>,
    size: Size,
}

impl ClassBox {
    /// Builds and measures a class box from already formatted lines.
    pub fn new(
        header_lines: Vec<String>,
        attribute_lines: Vec<String>,
        method_lines: Vec<String>,
    ) -> Self {
        let mut header_text = TextDefinition::new();
        header_text.set_bold(true);
        header_text.set_padding(Insets::uniform(HEADER_PADDING));

        let mut member_text = TextDefinition::new();
        member_text.set_anchor(TextAnchor::Start);
        member_text.set_padding(line_padding());

        let attribute_lines = with_placeholder(attribute_lines);
        let method_lines = with_placeholder(method_lines);

        let header_content = header_lines.join("\n");
        let header_size = Text::new(&header_text, &header_content).calculate_size();

        let measure = |lines: &[String]| -> Vec<Size> {
            lines
                .iter()
                .map(|line| Text::new(&member_text, line).calculate_size())
                .collect()
        };
        let attribute_sizes = measure(&attribute_lines);
        let method_sizes = measure(&method_lines);

        let content_width = attribute_sizes
            .iter()
            .chain(&method_sizes)
            .map(|s| s.width())
            .fold(header_size.width(), f32::max);
        let content_height = header_size.height()
            + attribute_sizes.iter().map(|s| s.height()).sum::<f32>()
            + method_sizes.iter().map(|s| s.height()).sum::<f32>();

        let size = Size::new(content_width, content_height)
            .add_padding(Insets::uniform(BOX_PADDING / 2.0));

        Self {
            header_lines,
            attribute_lines,
            method_lines,
            header_text,
            member_text,
            fill_color: None,
            stroke: StrokeDefinition::default(),
            header_height: header_size.height(),
            attribute_heights: attribute_sizes.iter().map(|s| s.height()).collect(),
            method_heights: method_sizes.iter().map(|s| s.height()).collect(),
            size,
        }
    }

    pub fn with_fill_color(mut self, color: Option<Color>) -> Self {
        self.fill_color = color;
        self
    }

    pub fn with_stroke(mut self, stroke: StrokeDefinition) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn header_lines(&self) -> &[String] {
        &self.header_lines
    }

    pub fn attribute_lines(&self) -> &[String] {
        &self.attribute_lines
    }

    pub fn method_lines(&self) -> &[String] {
        &self.method_lines
    }

    pub fn fill_color(&self) -> Option<&Color> {
        self.fill_color.as_ref()
    }

    /// Height of the header compartment including its padding.
    pub fn header_height(&self) -> f32 {
        self.header_height
    }

    fn render_members(
        &self,
        output: &mut LayeredOutput,
        lines: &[String],
        heights: &[f32],
        left: f32,
        mut top: f32,
    ) -> f32 {
        for (line, height) in lines.iter().zip(heights) {
            let text = Text::new(&self.member_text, line);
            let width = text.size().width();
            output.merge(text.render_to_layers(Point::new(left + width / 2.0, top + height / 2.0)));
            top += height;
        }
        top
    }

    fn separator(&self, left: f32, right: f32, y: f32) -> svg_element::Line {
        let line = svg_element::Line::new()
            .set("x1", left)
            .set("y1", y)
            .set("x2", right)
            .set("y2", y);
        apply_stroke!(line, &self.stroke)
    }
}

impl Drawable for ClassBox {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let bounds = position.to_bounds(self.size);
        let inset = BOX_PADDING / 2.0;

        let mut rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height());
        rect = match &self.fill_color {
            Some(fill) => rect
                .set("fill", fill.to_string())
                .set("fill-opacity", fill.alpha()),
            None => rect.set("fill", "none"),
        };
        output.add_to_layer(RenderLayer::Content, Box::new(apply_stroke!(rect, &self.stroke)));

        let mut top = bounds.min_y() + inset;
        let header_content = self.header_lines.join("\n");
        let header = Text::new(&self.header_text, &header_content);
        output.merge(header.render_to_layers(Point::new(
            bounds.center().x(),
            top + self.header_height / 2.0,
        )));
        top += self.header_height;

        let left = bounds.min_x() + inset;
        output.add_to_layer(
            RenderLayer::Content,
            Box::new(self.separator(bounds.min_x(), bounds.max_x(), top)),
        );
        top = self.render_members(&mut output, &self.attribute_lines, &self.attribute_heights, left, top);

        output.add_to_layer(
            RenderLayer::Content,
            Box::new(self.separator(bounds.min_x(), bounds.max_x(), top)),
        );
        self.render_members(&mut output, &self.method_lines, &self.method_heights, left, top);

        output
    }

    fn size(&self) -> Size {
        self.size
    }
}

fn with_placeholder(lines: Vec<String>) -> Vec<String> {
    if lines.is_empty() {
        vec![PLACEHOLDER_LINE.to_string()]
    } else {
        lines
    }
}
