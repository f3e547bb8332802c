//! Drawing surface sizing.

use classgram_core::geometry::Size;

use crate::layout::BoxGeometry;

/// Space kept right of and below the outermost boxes.
pub const CANVAS_MARGIN: f32 = 50.0;

/// Returns the smallest canvas that contains every box plus `margin` and is
/// never smaller than `current`.
///
/// ```
/// # use classgram::canvas::canvas_size;
/// # use classgram::layout::BoxGeometry;
/// # use classgram::geometry::{Point, Size};
/// let boxes = [BoxGeometry::new(Point::new(900.0, 10.0), Size::new(100.0, 50.0))];
/// let size = canvas_size(&boxes, Size::new(800.0, 600.0), 50.0);
/// assert_eq!(size, Size::new(1050.0, 600.0));
/// ```
pub fn canvas_size<'a>(
    geometries: impl IntoIterator<Item = &'a BoxGeometry>,
    current: Size,
    margin: f32,
) -> Size {
    geometries.into_iter().fold(current, |size, geometry| {
        let bounds = geometry.bounds();
        size.max(Size::new(bounds.max_x() + margin, bounds.max_y() + margin))
    })
}
