//! Planar geometry shared by the renderer and the legality gate.
//!
//! Everything here works in rendering units with y pointing down. Text boxes
//! come from a fixed per-glyph width table, so the renderer and the gate
//! always agree on where a label is.

use super::topology::LabelSide;
use crate::model::ops::{Anchor, PathCommand, Point, RenderOp};

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest rectangle holding every point; `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Rect::new(p.x, p.y, p.x, p.y),
                Some(r) => Rect::new(
                    r.min_x.min(p.x),
                    r.min_y.min(p.y),
                    r.max_x.max(p.x),
                    r.max_y.max(p.y),
                ),
            })
        })
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Finite with a strictly positive area.
    pub fn is_valid(&self) -> bool {
        [self.min_x, self.min_y, self.max_x, self.max_y]
            .iter()
            .all(|v| v.is_finite())
            && self.width() > 0.0
            && self.height() > 0.0
    }

    pub fn overlap_area(&self, other: &Rect) -> f64 {
        let w = self.max_x.min(other.max_x) - self.min_x.max(other.min_x);
        let h = self.max_y.min(other.max_y) - self.min_y.max(other.min_y);
        if w > 0.0 && h > 0.0 { w * h } else { 0.0 }
    }

    /// Distance from `p` to the rectangle; zero inside.
    pub fn distance_to(&self, p: Point) -> f64 {
        let dx = (self.min_x - p.x).max(0.0).max(p.x - self.max_x);
        let dy = (self.min_y - p.y).max(0.0).max(p.y - self.max_y);
        dx.hypot(dy)
    }

    fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }
}

/// Advance width of one glyph.
pub fn glyph_width(ch: char, font_size: f64) -> f64 {
    let factor = if ch.is_ascii_uppercase() {
        0.62
    } else if ch.is_ascii_digit() {
        0.55
    } else {
        0.5
    };
    factor * font_size
}

pub fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().map(|c| glyph_width(c, font_size)).sum()
}

/// Box occupied by a text op anchored at `(x, y)`.
pub fn text_box(x: f64, y: f64, text: &str, anchor: Anchor, font_size: f64) -> Rect {
    let width = text_width(text, font_size);
    let min_x = match anchor {
        Anchor::Start => x,
        Anchor::Middle => x - width / 2.0,
        Anchor::End => x - width,
    };
    let half = font_size / 2.0;
    Rect::new(min_x, y - half, min_x + width, y + half)
}

/// Splits a condensed formula into element groups (`CH2OH` → `C`, `H2`, `O`,
/// `H`). Returns `None` when the label is not written as a formula.
fn formula_groups(label: &str) -> Option<Vec<&str>> {
    if !label.starts_with(|c: char| c.is_ascii_uppercase())
        || !label.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    let mut groups = Vec::new();
    let mut start = 0;
    for (idx, ch) in label.char_indices().skip(1) {
        if ch.is_ascii_uppercase() {
            groups.push(&label[start..idx]);
            start = idx;
        }
    }
    groups.push(&label[start..]);
    Some(groups)
}

/// Label text as written on the given side of its connector. West labels are
/// mirrored group by group so the bonded atom stays next to the connector
/// (`OH` → `HO`, `CH2OH` → `HOH2C`).
pub fn oriented_label(label: &str, side: LabelSide) -> String {
    match (side, formula_groups(label)) {
        (LabelSide::West, Some(groups)) => groups.into_iter().rev().collect(),
        _ => label.to_string(),
    }
}

/// Offset from the start of `text` to the centre of the glyph bonded to the
/// connector: the first glyph on the east side, the leading letter of the
/// last group on the west side.
pub fn attach_offset(text: &str, side: LabelSide, font_size: f64) -> f64 {
    let idx = match side {
        LabelSide::East => 0,
        LabelSide::West => text
            .char_indices()
            .filter(|(_, c)| c.is_ascii_uppercase())
            .map(|(i, _)| i)
            .last()
            .unwrap_or(0),
    };
    let before: f64 = text[..idx].chars().map(|c| glyph_width(c, font_size)).sum();
    let glyph = text[idx..]
        .chars()
        .next()
        .map(|c| glyph_width(c, font_size))
        .unwrap_or(0.0);
    before + glyph / 2.0
}

/// Parameter interval `[t0, t1]` of the segment `p1 → p2` inside `rect`.
pub fn clip_segment(p1: Point, p2: Point, rect: &Rect) -> Option<(f64, f64)> {
    let d = p2 - p1;
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;
    let checks = [
        (-d.x, p1.x - rect.min_x),
        (d.x, rect.max_x - p1.x),
        (-d.y, p1.y - rect.min_y),
        (d.y, rect.max_y - p1.y),
    ];
    for (p, q) in checks {
        if p.abs() < f64::EPSILON {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
    }
    (t0 <= t1).then_some((t0, t1))
}

fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.dot(ab);
    if len2 < f64::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Shortest distance between the segment and the rectangle; zero when they touch.
pub fn segment_rect_distance(p1: Point, p2: Point, rect: &Rect) -> f64 {
    if clip_segment(p1, p2, rect).is_some() {
        return 0.0;
    }
    let ends = rect.distance_to(p1).min(rect.distance_to(p2));
    rect.corners()
        .iter()
        .map(|c| point_segment_distance(*c, p1, p2))
        .fold(ends, f64::min)
}

/// Greatest depth the segment reaches inside `rect`, measured to the nearest
/// edge, or `None` when it stays outside.
pub fn segment_rect_depth(p1: Point, p2: Point, rect: &Rect) -> Option<f64> {
    let (t0, t1) = clip_segment(p1, p2, rect)?;
    let d = p2 - p1;
    // Inside depth is the minimum of four linear functions of t, so its
    // maximum lies at an interval end or where two of them cross.
    let lines = [
        (p1.x - rect.min_x, d.x),
        (rect.max_x - p1.x, -d.x),
        (p1.y - rect.min_y, d.y),
        (rect.max_y - p1.y, -d.y),
    ];
    let depth_at = |t: f64| {
        lines
            .iter()
            .map(|(a, b)| a + b * t)
            .fold(f64::INFINITY, f64::min)
    };

    let mut best = depth_at(t0).max(depth_at(t1));
    for i in 0..lines.len() {
        for j in i + 1..lines.len() {
            let slope = lines[i].1 - lines[j].1;
            if slope.abs() < f64::EPSILON {
                continue;
            }
            let t = (lines[j].0 - lines[i].0) / slope;
            if t > t0 && t < t1 {
                best = best.max(depth_at(t));
            }
        }
    }
    Some(best.max(0.0))
}

/// How far a stroke of the given radius reaches into `rect`. Positive values
/// overlap; negative values are the clearance left.
pub fn capsule_penetration(p1: Point, p2: Point, radius: f64, rect: &Rect) -> f64 {
    match segment_rect_depth(p1, p2, rect) {
        Some(depth) => radius + depth,
        None => radius - segment_rect_distance(p1, p2, rect),
    }
}

/// Region a connector is clipped against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttachTarget {
    Box(Rect),
    Circle { center: Point, radius: f64 },
}

/// How a connector approaches its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttachConstraint {
    /// Unit direction of travel towards the target.
    pub direction: Point,
    /// Space kept between the connector end and the target boundary.
    pub min_clearance: f64,
}

impl AttachTarget {
    /// Distance along `direction` from `start` to the target boundary.
    fn entry_distance(&self, start: Point, direction: Point) -> Option<f64> {
        match self {
            AttachTarget::Box(rect) => {
                let far = start + direction * 1.0e6;
                let (t0, _) = clip_segment(start, far, rect)?;
                Some(t0 * 1.0e6)
            }
            AttachTarget::Circle { center, radius } => {
                let m = start - *center;
                let b = m.dot(direction);
                let c = m.dot(m) - radius * radius;
                if c <= 0.0 {
                    return Some(0.0);
                }
                let disc = b * b - c;
                if b > 0.0 || disc < 0.0 {
                    return None;
                }
                Some(-b - disc.sqrt())
            }
        }
    }

    /// Connector end point for a connector leaving `start`: the boundary
    /// crossing pulled back by the clearance. `None` when the target is not
    /// ahead of `start` or the clearance leaves no visible stroke.
    pub fn clip(&self, start: Point, constraint: &AttachConstraint) -> Option<Point> {
        let entry = self.entry_distance(start, constraint.direction)?;
        let reach = entry - constraint.min_clearance;
        (reach > f64::EPSILON).then(|| start + constraint.direction * reach)
    }
}

/// Bounding box of a drawing op. Connectors are measured as stroked
/// rectangles, so a zero-length connector has no area.
pub fn op_bounds(op: &RenderOp) -> Option<Rect> {
    match op {
        RenderOp::Line { p1, p2, width, .. } => {
            let normal = (*p2 - *p1)
                .normalized()
                .map(|d| d.perp() * (width / 2.0))
                .unwrap_or_default();
            Rect::from_points([*p1 + normal, *p1 - normal, *p2 + normal, *p2 - normal])
        }
        RenderOp::Polygon { points, .. } => Rect::from_points(points.iter().copied()),
        RenderOp::Path { commands, .. } => {
            Rect::from_points(commands.iter().filter_map(|c| match c {
                PathCommand::MoveTo { to }
                | PathCommand::LineTo { to }
                | PathCommand::ArcTo { to, .. } => Some(*to),
                PathCommand::Close => None,
            }))
        }
        RenderOp::Text {
            x,
            y,
            text,
            anchor,
            font_size,
            ..
        } => Some(text_box(*x, *y, text, *anchor, *font_size)),
    }
}

/// Quadrilateral covering a stroke of the given width between two points.
pub fn stroke_polygon(a: Point, b: Point, width: f64) -> Vec<Point> {
    let normal = (b - a)
        .normalized()
        .map(|d| d.perp() * (width / 2.0))
        .unwrap_or_default();
    vec![a + normal, b + normal, b - normal, a - normal]
}

/// Tapered edge from a narrow `back` end to a `front` end finished with a
/// half-disc cap.
pub fn wedge_path(back: Point, front: Point, narrow: f64, wide: f64) -> Vec<PathCommand> {
    let Some(dir) = (front - back).normalized() else {
        return Vec::new();
    };
    let n = dir.perp();
    let r = wide / 2.0;
    vec![
        PathCommand::MoveTo {
            to: back + n * (narrow / 2.0),
        },
        PathCommand::LineTo { to: front + n * r },
        PathCommand::ArcTo {
            radius: r,
            large_arc: false,
            sweep: false,
            to: front - n * r,
        },
        PathCommand::LineTo {
            to: back - n * (narrow / 2.0),
        },
        PathCommand::Close,
    ]
}

/// Regular polygon approximating a circle.
pub fn circle_polygon(center: Point, radius: f64, sides: usize) -> Vec<Point> {
    (0..sides)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / sides as f64;
            center + Point::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}
