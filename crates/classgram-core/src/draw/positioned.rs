//! Provides `PositionedDrawable`, a drawable paired with its absolute center.

use crate::{
    draw::{Drawable, LayeredOutput},
    geometry::{Bounds, Point, Size},
};

/// A drawable together with the absolute position of its center.
#[derive(Debug, Clone)]
pub struct PositionedDrawable<D: Drawable> {
    drawable: D,
    position: Point,
}

impl<D: Drawable> PositionedDrawable<D> {
    /// Wraps a drawable at the origin.
    pub fn new(drawable: D) -> Self {
        Self {
            drawable,
            position: Point::default(),
        }
    }

    /// Places the drawable so its center sits on `position`.
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Places the drawable so its top-left corner sits on `top_left`.
    pub fn with_top_left(self, top_left: Point) -> Self {
        let size = self.drawable.size();
        let center = Bounds::new_from_top_left(top_left, size).center();
        self.with_position(center)
    }

    /// Renders the drawable at its stored position.
    pub fn render_to_layers(&self) -> LayeredOutput {
        self.drawable.render_to_layers(self.position)
    }

    pub fn bounds(&self) -> Bounds {
        self.position.to_bounds(self.drawable.size())
    }

    pub fn inner(&self) -> &D {
        &self.drawable
    }

    pub fn position(&self) -> Point {
        self.position
    }
}

impl<D: Drawable> Drawable for PositionedDrawable<D> {
    fn render_to_layers(&self, _position: Point) -> LayeredOutput {
        // The stored position wins over the one passed in.
        self.render_to_layers()
    }

    fn size(&self) -> Size {
        self.drawable.size()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::draw::ClassBox;

    fn sample_box() -> ClassBox {
        ClassBox::new(
            vec!["Shape".to_string()],
            vec!["- id : u64".to_string()],
            vec!["+ area() : f64".to_string()],
        )
    }

    #[test]
    fn test_positioned_drawable_default_position() {
        let positioned = PositionedDrawable::new(sample_box());

        assert_approx_eq!(f32, positioned.position().x(), 0.0);
        assert_approx_eq!(f32, positioned.position().y(), 0.0);
    }

    #[test]
    fn test_positioned_drawable_top_left_placement() {
        let class_box = sample_box();
        let size = class_box.size();

        let positioned = PositionedDrawable::new(class_box).with_top_left(Point::new(40.0, 30.0));
        let bounds = positioned.bounds();

        assert_approx_eq!(f32, bounds.min_x(), 40.0, epsilon = 0.001);
        assert_approx_eq!(f32, bounds.min_y(), 30.0, epsilon = 0.001);
        assert_approx_eq!(f32, bounds.width(), size.width(), epsilon = 0.001);
        assert_approx_eq!(f32, bounds.height(), size.height(), epsilon = 0.001);
    }

    #[test]
    fn test_positioned_drawable_size_delegates() {
        let class_box = sample_box();
        let expected = class_box.size();

        let positioned = PositionedDrawable::new(class_box);
        assert_eq!(positioned.size(), expected);
        assert_eq!(positioned.inner().header_lines(), ["Shape"]);
    }

    #[test]
    fn test_positioned_drawable_trait_ignores_position() {
        let first = PositionedDrawable::new(sample_box()).with_position(Point::new(100.0, 100.0));
        let second = PositionedDrawable::new(sample_box()).with_position(Point::new(100.0, 100.0));

        let via_trait: String = Drawable::render_to_layers(&first, Point::new(999.0, 999.0))
            .render()
            .iter()
            .map(|n| n.to_string())
            .collect();
        let direct: String = second
            .render_to_layers()
            .render()
            .iter()
            .map(|n| n.to_string())
            .collect();

        assert_eq!(via_trait, direct);
    }
}
