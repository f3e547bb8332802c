//! Connector end points on class box boundaries.
//!
//! A connector runs between the centers of two boxes; each end is clipped to
//! the point where that line leaves its box.

use classgram_core::geometry::Point;

use crate::layout::BoxGeometry;

/// Boundary points of one connector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorEndpoints {
    source: Point,
    target: Point,
}

impl ConnectorEndpoints {
    pub fn new(source: Point, target: Point) -> Self {
        Self { source, target }
    }

    pub fn source(&self) -> Point {
        self.source
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn midpoint(&self) -> Point {
        self.source.midpoint(self.target)
    }
}

/// Returns where the ray from the center of `geometry` toward `other_center`
/// leaves the box.
///
/// Coincident centers exit through the right edge; a zero-size box returns
/// its center.
///
/// ```
/// # use classgram::layout::BoxGeometry;
/// # use classgram::route::boundary_point;
/// # use classgram::geometry::{Point, Size};
/// let geometry = BoxGeometry::new(Point::new(0.0, 0.0), Size::new(100.0, 60.0));
/// let exit = boundary_point(&geometry, Point::new(500.0, 30.0));
/// assert_eq!(exit, Point::new(100.0, 30.0));
/// ```
pub fn boundary_point(geometry: &BoxGeometry, other_center: Point) -> Point {
    let center = geometry.center();
    let hw = geometry.size().width() / 2.0;
    let hh = geometry.size().height() / 2.0;

    if hw == 0.0 && hh == 0.0 {
        return center;
    }

    let dx = other_center.x() - center.x();
    let dy = other_center.y() - center.y();

    if dx == 0.0 && dy == 0.0 {
        return Point::new(center.x() + hw, center.y());
    }

    if dx == 0.0 || dy.abs() * hw > dx.abs() * hh {
        // Top or bottom edge.
        Point::new(
            center.x() + hh * dx / dy.abs(),
            center.y() + hh.copysign(dy),
        )
    } else {
        // Left or right edge.
        Point::new(
            center.x() + hw.copysign(dx),
            center.y() + hw * dy / dx.abs(),
        )
    }
}

/// Clips the center-to-center line of two boxes to both boundaries.
pub fn route(source: &BoxGeometry, target: &BoxGeometry) -> ConnectorEndpoints {
    ConnectorEndpoints::new(
        boundary_point(source, target.center()),
        boundary_point(target, source.center()),
    )
}
