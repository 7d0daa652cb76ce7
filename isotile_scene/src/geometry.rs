// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render geometry for connectors and lasso outlines.
//!
//! Connector geometry lives in path space (see [`projection`](crate::projection)):
//! square, unprojected pixels relative to the path's bounding tile. A renderer
//! skews the whole box into the isometric view.

use isotile_grid::Tile;
use kurbo::{BezPath, Point, Size, Vec2};

use crate::model::{Connector, ConnectorStyle, LabelLine, LineType};
use crate::projection::tile_to_path_space;
use crate::route::ConnectorPath;

/// Stroke dash pattern, in path-space pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DashPattern {
    /// No dashes.
    Solid,
    /// Equal dashes and gaps.
    Dashed {
        /// Dash length.
        dash: f64,
        /// Gap length.
        gap: f64,
    },
    /// Zero-length dashes drawn with round caps.
    Dotted {
        /// Distance between dots.
        gap: f64,
    },
}

impl DashPattern {
    /// Pattern for a style at a given stroke width.
    pub fn for_style(style: ConnectorStyle, stroke_width: f64) -> Self {
        match style {
            ConnectorStyle::Solid => Self::Solid,
            ConnectorStyle::Dashed => Self::Dashed {
                dash: stroke_width * 2.0,
                gap: stroke_width * 2.0,
            },
            ConnectorStyle::Dotted => Self::Dotted {
                gap: stroke_width * 1.8,
            },
        }
    }

    /// SVG `stroke-dasharray` pair, or `None` for a solid stroke.
    pub fn dash_array(self) -> Option<[f64; 2]> {
        match self {
            Self::Solid => None,
            Self::Dashed { dash, gap } => Some([dash, gap]),
            Self::Dotted { gap } => Some([0.0, gap]),
        }
    }
}

/// Arrow head placed on the final segment of a path.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Arrow {
    /// Midpoint of the final segment.
    pub position: Point,
    /// Unit direction of travel along the final segment.
    pub direction: Vec2,
}

impl Arrow {
    /// Direction as a rotation in degrees, clockwise from +x.
    pub fn rotation_degrees(&self) -> f64 {
        self.direction.atan2().to_degrees()
    }
}

/// The ellipse drawn across both lines of a `DOUBLE_WITH_CIRCLE` connector.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PortCircle {
    /// Center, on the middle tile of the path.
    pub center: Point,
    /// Rotation in degrees, following the path at the middle tile.
    pub rotation: f64,
    /// Semi-axis along the path.
    pub radius_x: f64,
    /// Semi-axis across the path.
    pub radius_y: f64,
}

/// Everything needed to draw one connector.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectorGeometry {
    /// Tile at path-space `(0, 0)`: the path's minimum corner.
    pub origin: Tile,
    /// Size of the path-space box.
    pub size: Size,
    /// Stroke width in path-space pixels.
    pub stroke_width: f64,
    /// Tile centers in path order.
    pub points: Vec<Point>,
    /// The two offset lines of a double connector.
    pub offset_lines: Option<[Vec<Point>; 2]>,
    /// Dash pattern.
    pub dash: DashPattern,
    /// Direction marker, when the connector shows one.
    pub arrow: Option<Arrow>,
    /// Port-channel ellipse, for `DOUBLE_WITH_CIRCLE`.
    pub port_circle: Option<PortCircle>,
}

impl ConnectorGeometry {
    /// Lay out a routed connector; `None` if the path is not renderable.
    pub fn build(connector: &Connector, path: &ConnectorPath, tile_size: f64) -> Option<Self> {
        if !path.is_renderable() {
            return None;
        }
        let bounds = path.bounds()?;
        let origin = bounds.min;
        let stroke_width = tile_size / 100.0 * connector.width();
        let points: Vec<Point> = path
            .tiles
            .iter()
            .map(|t| tile_to_path_space(*t, origin, tile_size))
            .collect();

        let line_type = connector.line_type();
        let offset_lines = (line_type.is_double() && points.len() >= 2)
            .then(|| offset_lines(&path.tiles, &points, stroke_width * 3.0));
        let port_circle = (line_type == LineType::DoubleWithCircle && points.len() >= 2)
            .then(|| port_circle(&points, stroke_width));
        let arrow = if connector.show_arrow() {
            final_segment_arrow(&points)
        } else {
            None
        };

        Some(Self {
            origin,
            size: Size::new(
                f64::from(bounds.width()) * tile_size,
                f64::from(bounds.height()) * tile_size,
            ),
            stroke_width,
            points,
            offset_lines,
            dash: DashPattern::for_style(connector.style(), stroke_width),
            arrow,
            port_circle,
        })
    }

    /// Points of one drawn line: the path itself, or an offset line.
    pub fn line(&self, line: LabelLine) -> &[Point] {
        match (&self.offset_lines, line) {
            (None, _) => &self.points,
            (Some([first, _]), LabelLine::First) => first,
            (Some([_, second]), LabelLine::Second) => second,
        }
    }

    /// The center polyline as a path.
    pub fn to_bez_path(&self) -> BezPath {
        polyline(&self.points)
    }
}

/// Polyline through `points`.
pub fn polyline(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        path.move_to(*first);
        for p in iter {
            path.line_to(*p);
        }
    }
    path
}

/// Closed outline through freehand samples, smoothed with quadratic curves.
///
/// Each interior sample is a control point and the curve passes through the
/// midpoints between consecutive samples. Fewer than two samples give an
/// empty path.
///
/// ```
/// use isotile_scene::geometry::smooth_closed_path;
/// use kurbo::Point;
///
/// let outline = smooth_closed_path(&[
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 0.0),
///     Point::new(10.0, 10.0),
/// ]);
/// assert!(outline.to_svg().ends_with('Z'));
/// assert!(smooth_closed_path(&[Point::ORIGIN]).elements().is_empty());
/// ```
pub fn smooth_closed_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let [first, .., last] = points else {
        return path;
    };
    path.move_to(*first);
    for pair in points[1..].windows(2) {
        path.quad_to(pair[0], pair[0].midpoint(pair[1]));
    }
    path.line_to(*last);
    path.close_path();
    path
}

/// Both offset lines of a double connector.
///
/// Interior points are offset along the normal of the averaged incoming and
/// outgoing directions; endpoints use their single segment.
fn offset_lines(tiles: &[Tile], points: &[Point], offset: f64) -> [Vec<Point>; 2] {
    let mut first = Vec::with_capacity(points.len());
    let mut second = Vec::with_capacity(points.len());
    let last = tiles.len() - 1;
    for (i, point) in points.iter().enumerate() {
        let dir = if i == 0 {
            tile_delta(tiles[0], tiles[1])
        } else if i == last {
            tile_delta(tiles[i - 1], tiles[i])
        } else {
            (tile_delta(tiles[i - 1], tiles[i]) + tile_delta(tiles[i], tiles[i + 1])) / 2.0
        };
        let len = dir.hypot();
        let len = if len > 0.0 { len } else { 1.0 };
        let normal = Vec2::new(-dir.y / len, dir.x / len);
        first.push(*point + normal * offset);
        second.push(*point - normal * offset);
    }
    [first, second]
}

fn port_circle(points: &[Point], stroke_width: f64) -> PortCircle {
    let mid = points.len() / 2;
    let rotation = if mid > 0 && mid + 1 < points.len() {
        (points[mid + 1] - points[mid - 1]).atan2().to_degrees()
    } else {
        0.0
    };
    PortCircle {
        center: points[mid],
        rotation,
        radius_x: stroke_width * 5.0,
        radius_y: stroke_width * 4.0,
    }
}

fn final_segment_arrow(points: &[Point]) -> Option<Arrow> {
    let [.., a, b] = points else {
        return None;
    };
    let delta = *b - *a;
    let len = delta.hypot();
    (len > 0.0).then(|| Arrow {
        position: a.midpoint(*b),
        direction: delta / len,
    })
}

fn tile_delta(from: Tile, to: Tile) -> Vec2 {
    Vec2::new(
        f64::from(to.x) - f64::from(from.x),
        f64::from(to.y) - f64::from(from.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Completeness;
    use float_cmp::approx_eq;

    fn path(tiles: &[(i32, i32)]) -> ConnectorPath {
        ConnectorPath {
            tiles: tiles.iter().map(|&t| Tile::from(t)).collect(),
            completeness: Completeness::Complete,
        }
    }

    fn connector() -> Connector {
        Connector::new("c", Vec::new())
    }

    #[test]
    fn points_are_tile_centers_relative_to_bounds() {
        let g = ConnectorGeometry::build(&connector(), &path(&[(2, 3), (3, 3), (4, 3)]), 100.0)
            .unwrap();
        assert_eq!(g.origin, Tile::new(2, 3));
        assert_eq!(
            g.points,
            [
                Point::new(50.0, 50.0),
                Point::new(150.0, 50.0),
                Point::new(250.0, 50.0)
            ]
        );
        assert_eq!(g.size, Size::new(300.0, 100.0));
        assert!(approx_eq!(f64, g.stroke_width, 10.0));
        assert!(g.offset_lines.is_none());
        assert_eq!(g.line(LabelLine::Second), &g.points[..]);
    }

    #[test]
    fn double_lines_offset_by_three_widths() {
        let mut c = connector();
        c.line_type = Some(LineType::Double);
        let g = ConnectorGeometry::build(&c, &path(&[(0, 0), (1, 0), (1, 1)]), 100.0).unwrap();
        let [first, second] = g.offset_lines.clone().unwrap();
        // Start point: segment along +x, normal is +y.
        assert!(approx_eq!(f64, first[0].y - g.points[0].y, 30.0));
        assert!(approx_eq!(f64, second[0].y - g.points[0].y, -30.0));
        // Every offset point is the same distance from its center point.
        for (p, q) in g.points.iter().zip(&first) {
            assert!(approx_eq!(f64, (*q - *p).hypot(), 30.0, epsilon = 1e-9));
        }
        assert!(g.port_circle.is_none());
    }

    #[test]
    fn port_circle_sits_on_the_middle_tile() {
        let mut c = connector();
        c.line_type = Some(LineType::DoubleWithCircle);
        let g = ConnectorGeometry::build(&c, &path(&[(0, 0), (1, 0), (2, 0)]), 100.0).unwrap();
        let circle = g.port_circle.unwrap();
        assert_eq!(circle.center, Point::new(150.0, 50.0));
        assert!(approx_eq!(f64, circle.rotation, 0.0));
        assert!(approx_eq!(f64, circle.radius_x, 50.0));
    }

    #[test]
    fn dash_patterns_scale_with_width() {
        let mut c = connector();
        c.width = Some(20.0);
        c.style = Some(ConnectorStyle::Dotted);
        let g = ConnectorGeometry::build(&c, &path(&[(0, 0), (0, 1)]), 100.0).unwrap();
        let [dash, gap] = g.dash.dash_array().unwrap();
        assert!(approx_eq!(f64, dash, 0.0));
        assert!(approx_eq!(f64, gap, 36.0, epsilon = 1e-9));
        assert_eq!(
            DashPattern::for_style(ConnectorStyle::Dashed, 10.0).dash_array(),
            Some([20.0, 20.0])
        );
        assert_eq!(DashPattern::Solid.dash_array(), None);
    }

    #[test]
    fn arrow_follows_final_segment() {
        let g = ConnectorGeometry::build(&connector(), &path(&[(0, 0), (1, 0), (1, 1)]), 100.0)
            .unwrap();
        let arrow = g.arrow.unwrap();
        assert_eq!(arrow.direction, Vec2::new(0.0, 1.0));
        assert!(approx_eq!(f64, arrow.rotation_degrees(), 90.0));

        let mut hidden = connector();
        hidden.show_arrow = Some(false);
        let g = ConnectorGeometry::build(&hidden, &path(&[(0, 0), (1, 0)]), 100.0).unwrap();
        assert!(g.arrow.is_none());
    }

    #[test]
    fn incomplete_paths_have_no_geometry() {
        let mut p = path(&[(0, 0), (1, 0)]);
        p.completeness = Completeness::Incomplete {
            anchor: "x".into(),
            reason: crate::error::Dangling::MissingAnchor("y".into()),
        };
        assert!(ConnectorGeometry::build(&connector(), &p, 100.0).is_none());
    }

    #[test]
    fn smooth_path_shape() {
        let outline = smooth_closed_path(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]);
        // move, two quads, line, close
        assert_eq!(outline.elements().len(), 5);
        let two = smooth_closed_path(&[Point::new(0.0, 0.0), Point::new(5.0, 5.0)]);
        assert_eq!(two.elements().len(), 3);
    }
}
