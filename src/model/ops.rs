//! Primitive drawing operations handed to painters.
//!
//! The op list is the only boundary between the renderer and whatever turns
//! it into pixels or markup. Coordinates are in rendering units with the
//! y axis pointing down; a [`RenderOp::Text`] is positioned by its anchor
//! point on the vertical centre line of the glyph box.

use serde::Serialize;
use std::ops::{Add, Mul, Sub};

/// Index of an op in the list produced by the renderer.
pub type OpId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Point) -> f64 {
        (self - other).length()
    }

    /// Unit vector in the same direction, or `None` for a zero vector.
    pub fn normalized(self) -> Option<Point> {
        let len = self.length();
        (len > f64::EPSILON).then(|| Point::new(self.x / len, self.y / len))
    }

    /// The vector rotated by `radians`; positive turns from +x towards +y.
    pub fn rotated(self, radians: f64) -> Point {
        let (sin, cos) = radians.sin_cos();
        Point::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// The vector rotated a quarter turn.
    pub fn perp(self) -> Point {
        Point::new(-self.y, self.x)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Horizontal alignment of a text op relative to its `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// Segment of a [`RenderOp::Path`] outline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo {
        to: Point,
    },
    LineTo {
        to: Point,
    },
    /// Circular arc to `to`; `sweep` follows the SVG convention.
    ArcTo {
        radius: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    Close,
}

/// One primitive drawing instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RenderOp {
    /// Connector stroke. `owner` is the text op the connector attaches to.
    Line {
        p1: Point,
        p2: Point,
        width: f64,
        color: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        owner: Option<OpId>,
    },
    Polygon {
        points: Vec<Point>,
        fill: String,
    },
    Path {
        commands: Vec<PathCommand>,
        fill: String,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        anchor: Anchor,
        font_size: f64,
        color: String,
    },
}

impl RenderOp {
    pub fn kind(&self) -> &'static str {
        match self {
            RenderOp::Line { .. } => "line",
            RenderOp::Polygon { .. } => "polygon",
            RenderOp::Path { .. } => "path",
            RenderOp::Text { .. } => "text",
        }
    }

    pub fn is_connector(&self) -> bool {
        matches!(self, RenderOp::Line { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(self, RenderOp::Text { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_serializes_with_tag_and_optional_owner() {
        let op = RenderOp::Line {
            p1: Point::new(0.0, 0.0),
            p2: Point::new(1.0, 0.0),
            width: 1.0,
            color: "#000000".into(),
            owner: None,
        };
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value["op"], "line");
        assert!(value.get("owner").is_none());
    }

    #[test]
    fn point_arithmetic() {
        let a = Point::new(3.0, 4.0);
        let b = Point::new(1.0, 1.0);
        assert_eq!(a + b, Point::new(4.0, 5.0));
        assert_eq!(a - b, Point::new(2.0, 3.0));
        assert_eq!(b * 2.0, Point::new(2.0, 2.0));
        assert_eq!(a.length(), 5.0);
        assert_eq!(a.dot(b), 7.0);
        assert_eq!(Point::new(1.0, 0.0).perp(), Point::new(0.0, 1.0));
        assert!(Point::default().normalized().is_none());
    }

    #[test]
    fn text_serializes_anchor_lowercase() {
        let op = RenderOp::Text {
            x: 1.0,
            y: 2.0,
            text: "OH".into(),
            anchor: Anchor::Start,
            font_size: 12.0,
            color: "#000000".into(),
        };
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value["op"], "text");
        assert_eq!(value["anchor"], "start");
        assert_eq!(op.kind(), "text");
        assert!(op.is_text());
        assert!(!op.is_connector());
    }
}
