//! Frozen ring-slot tables.
//!
//! Each ring type has one [`RingTopology`]: unit template coordinates, the
//! role of every vertex (ring oxygen or the n-th ring carbon counted from
//! the anomeric carbon), the thickness class of every edge, and per-vertex
//! up/down slot geometry. Rendering reads these tables and never infers any
//! of it from coordinates.
//!
//! Templates are in bond-length units with y pointing down. The ring is
//! drawn in the standard orientation: oxygen at the back right, anomeric
//! carbon on the right, the front edge along the bottom.

use crate::model::ops::Point;
use crate::model::types::{Face, RingType};

/// What sits at a template vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexRole {
    Oxygen,
    /// Ring carbon by ordinal; 0 is the anomeric carbon.
    Carbon(u8),
}

/// Thickness class of a ring edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeClass {
    /// The edge nearest the viewer.
    Front,
    /// Edge tapering from the back to the front edge.
    Wedge,
    Back,
}

/// Which connector length a slot uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthClass {
    /// Pointing away from the ring.
    Exterior,
    /// Pointing across the ring interior.
    Interior,
}

/// Side of the connector a label extends to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSide {
    /// Label reads away from the connector to the right.
    East,
    /// Label is mirrored and ends at the connector. Interior labels on the
    /// right of the ring use this side to stay clear of the wedge edges.
    West,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceSlot {
    /// Unit direction from the ring vertex.
    pub direction: Point,
    pub length: LengthClass,
    pub side: LabelSide,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexSlots {
    pub up: FaceSlot,
    pub down: FaceSlot,
}

impl VertexSlots {
    pub fn face(&self, face: Face) -> &FaceSlot {
        match face {
            Face::Up => &self.up,
            Face::Down => &self.down,
        }
    }
}

#[derive(Debug)]
pub struct RingTopology {
    pub ring_type: RingType,
    /// Template vertex coordinates in bond-length units.
    pub vertices: &'static [Point],
    pub roles: &'static [VertexRole],
    /// Edge `i` joins vertex `i` and vertex `i + 1` (wrapping).
    pub edges: &'static [EdgeClass],
    pub front_edge: usize,
    pub slots: &'static [VertexSlots],
}

impl RingTopology {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn oxygen_vertex(&self) -> Option<usize> {
        self.roles.iter().position(|r| *r == VertexRole::Oxygen)
    }

    /// Template vertex holding the ring carbon with the given ordinal.
    pub fn carbon_vertex(&self, ordinal: u8) -> Option<usize> {
        self.roles
            .iter()
            .position(|r| *r == VertexRole::Carbon(ordinal))
    }

    pub fn edge_endpoints(&self, edge: usize) -> (usize, usize) {
        (edge, (edge + 1) % self.vertex_count())
    }

    /// Vertex shared by `edge` and the front edge, if the two are adjacent.
    pub fn shared_front_vertex(&self, edge: usize) -> Option<usize> {
        let (a, b) = self.edge_endpoints(edge);
        let (fa, fb) = self.edge_endpoints(self.front_edge);
        [a, b].into_iter().find(|v| *v == fa || *v == fb)
    }
}

const UP: Point = Point::new(0.0, -1.0);
const DOWN: Point = Point::new(0.0, 1.0);

const fn slots(
    up: (LengthClass, LabelSide),
    down: (LengthClass, LabelSide),
) -> VertexSlots {
    VertexSlots {
        up: FaceSlot {
            direction: UP,
            length: up.0,
            side: up.1,
        },
        down: FaceSlot {
            direction: DOWN,
            length: down.0,
            side: down.1,
        },
    }
}

use LabelSide::{East, West};
use LengthClass::{Exterior, Interior};

/// Six-membered ring: C4 left, C5 back left, O back right, C1 right,
/// C2 front right, C3 front left (aldose numbering).
pub static PYRANOSE: RingTopology = RingTopology {
    ring_type: RingType::Pyranose,
    vertices: &[
        Point::new(-1.0, 0.0),
        Point::new(-0.45, -0.5),
        Point::new(0.45, -0.5),
        Point::new(1.0, 0.0),
        Point::new(0.55, 0.5),
        Point::new(-0.55, 0.5),
    ],
    roles: &[
        VertexRole::Carbon(3),
        VertexRole::Carbon(4),
        VertexRole::Oxygen,
        VertexRole::Carbon(0),
        VertexRole::Carbon(1),
        VertexRole::Carbon(2),
    ],
    edges: &[
        EdgeClass::Back,
        EdgeClass::Back,
        EdgeClass::Back,
        EdgeClass::Wedge,
        EdgeClass::Front,
        EdgeClass::Wedge,
    ],
    front_edge: 4,
    slots: &[
        slots((Exterior, West), (Exterior, West)),
        slots((Exterior, West), (Interior, East)),
        slots((Exterior, East), (Interior, East)),
        slots((Exterior, East), (Exterior, East)),
        slots((Interior, West), (Exterior, East)),
        slots((Interior, East), (Exterior, West)),
    ],
};

/// Five-membered ring: O at the back, C1 right, C2 front right,
/// C3 front left, C4 left (aldose numbering).
pub static FURANOSE: RingTopology = RingTopology {
    ring_type: RingType::Furanose,
    vertices: &[
        Point::new(0.0, -0.55),
        Point::new(0.8, -0.1),
        Point::new(0.5, 0.5),
        Point::new(-0.5, 0.5),
        Point::new(-0.8, -0.1),
    ],
    roles: &[
        VertexRole::Oxygen,
        VertexRole::Carbon(0),
        VertexRole::Carbon(1),
        VertexRole::Carbon(2),
        VertexRole::Carbon(3),
    ],
    edges: &[
        EdgeClass::Back,
        EdgeClass::Wedge,
        EdgeClass::Front,
        EdgeClass::Wedge,
        EdgeClass::Back,
    ],
    front_edge: 2,
    slots: &[
        slots((Exterior, East), (Interior, East)),
        slots((Exterior, East), (Exterior, East)),
        slots((Interior, West), (Exterior, East)),
        slots((Interior, East), (Exterior, West)),
        slots((Exterior, West), (Exterior, West)),
    ],
};

pub fn topology(ring_type: RingType) -> &'static RingTopology {
    match ring_type {
        RingType::Pyranose => &PYRANOSE,
        RingType::Furanose => &FURANOSE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(topo: &RingTopology) {
        let n = topo.vertex_count();
        assert_eq!(topo.roles.len(), n);
        assert_eq!(topo.edges.len(), n);
        assert_eq!(topo.slots.len(), n);
        assert_eq!(n, topo.ring_type.carbon_count() + 1);
        assert_eq!(topo.edges[topo.front_edge], EdgeClass::Front);
        assert_eq!(
            topo.edges.iter().filter(|e| **e == EdgeClass::Front).count(),
            1
        );
        assert!(topo.oxygen_vertex().is_some());
        for ordinal in 0..topo.ring_type.carbon_count() as u8 {
            assert!(topo.carbon_vertex(ordinal).is_some(), "ordinal {ordinal}");
        }
    }

    #[test]
    fn tables_are_consistent() {
        check(&PYRANOSE);
        check(&FURANOSE);
    }

    #[test]
    fn wedges_touch_the_front_edge() {
        for topo in [&PYRANOSE, &FURANOSE] {
            for (i, class) in topo.edges.iter().enumerate() {
                let adjacent = i != topo.front_edge && topo.shared_front_vertex(i).is_some();
                assert_eq!(*class == EdgeClass::Wedge, adjacent, "edge {i}");
            }
        }
    }

    #[test]
    fn oxygen_neighbours_the_anomeric_carbon() {
        for topo in [&PYRANOSE, &FURANOSE] {
            let o = topo.oxygen_vertex().unwrap();
            let c0 = topo.carbon_vertex(0).unwrap();
            assert_eq!((o + 1) % topo.vertex_count(), c0);
        }
    }

    #[test]
    fn front_edge_is_lowest() {
        for topo in [&PYRANOSE, &FURANOSE] {
            let (a, b) = topo.edge_endpoints(topo.front_edge);
            let max_y = topo
                .vertices
                .iter()
                .map(|p| p.y)
                .fold(f64::MIN, f64::max);
            assert_eq!(topo.vertices[a].y, max_y);
            assert_eq!(topo.vertices[b].y, max_y);
        }
    }
}
