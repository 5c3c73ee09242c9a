//! Haworth spec → primitive drawing ops.
//!
//! The renderer works in a fixed order: ring edges by thickness class, the
//! ring-oxygen mask and label, the exocyclic chain trunk (when the chain has
//! two or more carbons), then every label through the candidate layout. Each
//! label is emitted as its text op followed by the connector that attaches
//! to it, so a connector's `owner` always points backwards.
//!
//! A drawn chain is tried at several trunk tilts, branch leans and segment
//! lengths; its labels join the ring labels in one layout search and the
//! first cheapest candidate wins.

use super::config::RenderConfig;
use super::error::GeometryError;
use super::geometry::{
    AttachConstraint, AttachTarget, circle_polygon, op_bounds, oriented_label, stroke_polygon,
    text_box, text_width, wedge_path,
};
use super::layout::{self, LabelRequest, Layout, LayoutParams, Obstacles, Placement};
use super::topology::{EdgeClass, FaceSlot, LabelSide, LengthClass, RingTopology, topology};
use crate::model::ops::{Anchor, OpId, Point, RenderOp};
use crate::model::spec::HaworthSpec;
use crate::model::types::{Face, FischerSide};
use tracing::{debug, trace, warn};

const OXYGEN_LABEL: &str = "O";
const MASK_SIDES: usize = 16;

/// Renders a spec with the given configuration.
pub fn render(spec: &HaworthSpec, config: &RenderConfig) -> Result<Vec<RenderOp>, GeometryError> {
    check_scale("bond_length", config.bond_length)?;
    check_scale("font_size", config.font_size)?;
    config
        .style
        .validate()
        .map_err(|e| GeometryError::InvalidStyle(e.to_string()))?;

    let topo = topology(spec.ring_type());
    let mut canvas = Canvas::new(config);
    let vertices: Vec<Point> = topo
        .vertices
        .iter()
        .map(|v| *v * config.bond_length)
        .collect();

    let oxygen = topo
        .oxygen_vertex()
        .ok_or_else(|| GeometryError::MissingSlot {
            what: "ring oxygen".to_string(),
        })?;
    let oxygen_radius = text_width(OXYGEN_LABEL, config.font_size).max(config.font_size) / 2.0
        + config.style.layout.oxygen_padding * config.font_size;

    draw_ring_edges(&mut canvas, topo, &vertices, oxygen, oxygen_radius)?;
    draw_oxygen(&mut canvas, vertices[oxygen], oxygen_radius);

    let ring_requests = substituent_requests(spec, topo, &vertices, config)?;
    let (plan, layout) = if spec.has_drawn_chain() {
        layout_with_chain(&canvas, spec, topo, &vertices, ring_requests)?
    } else {
        let layout = layout::solve(&ring_requests, &canvas.obstacles, &canvas.layout_params());
        let plan = LabelPlan {
            trunk: Vec::new(),
            requests: ring_requests,
        };
        (plan, layout)
    };

    for (a, b) in &plan.trunk {
        canvas.push_connector(*a, *b, None);
    }
    for (request, placement) in plan.requests.iter().zip(&layout.placements) {
        canvas.push_label(&request.text, placement);
    }
    if layout.cost > 0.0 {
        debug!(cost = layout.cost, "no collision-free label layout found");
    }

    let ops = canvas.ops;
    check_bounds(&ops)?;

    debug!(
        title = spec.title(),
        ring = %spec.ring_type(),
        labels = plan.requests.len(),
        ops = ops.len(),
        "rendered Haworth projection"
    );
    Ok(ops)
}

/// Renders with the default style at the given scale.
pub fn render_with(
    spec: &HaworthSpec,
    bond_length: f64,
    font_size: f64,
) -> Result<Vec<RenderOp>, GeometryError> {
    render(spec, &RenderConfig::with_scale(bond_length, font_size))
}

fn check_scale(name: &'static str, value: f64) -> Result<(), GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidParameter { name, value })
    }
}

/// Rejects any op whose bounding box is non-finite or has no area.
pub fn check_bounds(ops: &[RenderOp]) -> Result<(), GeometryError> {
    for (op_id, op) in ops.iter().enumerate() {
        match op_bounds(op) {
            Some(bounds) if bounds.is_valid() => {}
            _ => {
                return Err(GeometryError::DegenerateBounds {
                    op_id,
                    kind: op.kind(),
                });
            }
        }
    }
    Ok(())
}

/// Op list under construction plus everything labels must avoid.
struct Canvas<'a> {
    config: &'a RenderConfig,
    ops: Vec<RenderOp>,
    obstacles: Obstacles,
}

impl<'a> Canvas<'a> {
    fn new(config: &'a RenderConfig) -> Self {
        Self {
            config,
            ops: Vec::new(),
            obstacles: Obstacles::default(),
        }
    }

    fn layout_params(&self) -> LayoutParams<'a> {
        let config: &'a RenderConfig = self.config;
        LayoutParams {
            font_size: config.font_size,
            gap: config.label_gap(),
            connector_radius: config.connector_width() / 2.0,
            ladder: &config.style.layout.ladder,
        }
    }

    fn push(&mut self, op: RenderOp) -> OpId {
        self.ops.push(op);
        self.ops.len() - 1
    }

    fn push_fill(&mut self, points: Vec<Point>) {
        let fill = self.config.style.colors.stroke.clone();
        self.push(RenderOp::Polygon { points, fill });
    }

    fn push_text(&mut self, x: f64, y: f64, text: &str, anchor: Anchor) -> OpId {
        self.push(RenderOp::Text {
            x,
            y,
            text: text.to_string(),
            anchor,
            font_size: self.config.font_size,
            color: self.config.style.colors.text.clone(),
        })
    }

    fn push_connector(&mut self, p1: Point, p2: Point, owner: Option<OpId>) -> OpId {
        self.push(RenderOp::Line {
            p1,
            p2,
            width: self.config.connector_width(),
            color: self.config.style.colors.stroke.clone(),
            owner,
        })
    }

    /// Text op followed by its connector.
    fn push_label(&mut self, text: &str, placement: &Placement) {
        let id = self.push_text(placement.text_x, placement.text_y, text, placement.anchor);
        match placement.connector {
            Some((p1, p2)) => {
                self.push_connector(p1, p2, Some(id));
            }
            None => warn!(label = text, "label covers its connector origin; connector dropped"),
        }
    }
}

fn draw_ring_edges(
    canvas: &mut Canvas,
    topo: &RingTopology,
    vertices: &[Point],
    oxygen: usize,
    oxygen_radius: f64,
) -> Result<(), GeometryError> {
    let bl = canvas.config.bond_length;
    let strokes = &canvas.config.style.strokes;
    let front_width = strokes.front_edge_width * bl;
    let narrow_width = strokes.wedge_narrow_width * bl;
    let back_width = strokes.back_edge_width * bl;

    for (edge, class) in topo.edges.iter().enumerate() {
        let (a, b) = topo.edge_endpoints(edge);
        let mut pa = vertices[a];
        let mut pb = vertices[b];
        if a == oxygen {
            pa = stop_at_oxygen(pb, pa, oxygen_radius);
        }
        if b == oxygen {
            pb = stop_at_oxygen(pa, pb, oxygen_radius);
        }

        let half_width = match class {
            EdgeClass::Front => {
                canvas.push_fill(stroke_polygon(pa, pb, front_width));
                front_width / 2.0
            }
            EdgeClass::Wedge => {
                let shared = topo.shared_front_vertex(edge).ok_or_else(|| {
                    GeometryError::MissingSlot {
                        what: format!("front vertex for wedge edge {}", edge),
                    }
                })?;
                let (back, front) = if shared == b { (pa, pb) } else { (pb, pa) };
                let fill = canvas.config.style.colors.stroke.clone();
                canvas.push(RenderOp::Path {
                    commands: wedge_path(back, front, narrow_width, front_width),
                    fill,
                });
                front_width / 2.0
            }
            EdgeClass::Back => {
                canvas.push_fill(stroke_polygon(pa, pb, back_width));
                back_width / 2.0
            }
        };
        canvas.obstacles.strokes.push((pa, pb, half_width));
    }
    Ok(())
}

/// End point of a ring edge running from `from` towards the ring oxygen.
fn stop_at_oxygen(from: Point, oxygen: Point, radius: f64) -> Point {
    let Some(direction) = (oxygen - from).normalized() else {
        return oxygen;
    };
    AttachTarget::Circle {
        center: oxygen,
        radius,
    }
    .clip(
        from,
        &AttachConstraint {
            direction,
            min_clearance: 0.0,
        },
    )
    .unwrap_or(oxygen)
}

fn draw_oxygen(canvas: &mut Canvas, center: Point, radius: f64) {
    let fill = canvas.config.style.colors.background.clone();
    canvas.push(RenderOp::Polygon {
        points: circle_polygon(center, radius, MASK_SIDES),
        fill,
    });
    canvas.push_text(center.x, center.y, OXYGEN_LABEL, Anchor::Middle);
    let label_box = text_box(
        center.x,
        center.y,
        OXYGEN_LABEL,
        Anchor::Middle,
        canvas.config.font_size,
    );
    canvas.obstacles.boxes.push(label_box);
}

fn closure_vertex(spec: &HaworthSpec, topo: &RingTopology) -> Result<usize, GeometryError> {
    let ordinal = spec.closure_carbon() - spec.anomeric_carbon();
    topo.carbon_vertex(ordinal)
        .ok_or_else(|| GeometryError::MissingSlot {
            what: format!("closure carbon C{}", spec.closure_carbon()),
        })
}

/// Unit direction of a branch leaving the chain trunk towards its Fischer side.
fn branch_direction(chain: Point, side: FischerSide, angle_deg: f64) -> Point {
    let lateral = match side {
        FischerSide::Right => Point::new(1.0, 0.0),
        FischerSide::Left => Point::new(-1.0, 0.0),
    };
    let angle = angle_deg.to_radians();
    let d = lateral * angle.cos() + chain * angle.sin();
    d.normalized().unwrap_or(lateral)
}

/// Chain trunk segments plus every label to lay out.
struct LabelPlan {
    trunk: Vec<(Point, Point)>,
    requests: Vec<LabelRequest>,
}

/// Chain drawn from `start` with the trunk tilted by `trunk_deg`, branches
/// leaning by `lean_deg` and every segment scaled by `multiplier`.
fn chain_drawing(
    spec: &HaworthSpec,
    slot: &FaceSlot,
    start: Point,
    (trunk_deg, lean_deg, multiplier): (f64, f64, f64),
    config: &RenderConfig,
) -> LabelPlan {
    let direction = slot.direction.rotated(trunk_deg.to_radians());
    let segment = config.style.layout.chain_length * config.bond_length * multiplier;
    let terminal_side = if direction.x.abs() < 1e-9 {
        slot.side
    } else if direction.x > 0.0 {
        LabelSide::East
    } else {
        LabelSide::West
    };

    let chain = spec.exocyclic_chain();
    let mut trunk = Vec::new();
    let mut requests = Vec::new();
    let mut junction = start;
    for (k, carbon) in chain.iter().enumerate() {
        if k + 1 == chain.len() {
            requests.push(LabelRequest {
                origin: junction,
                direction,
                base_length: segment,
                text: oriented_label(&carbon.label, terminal_side),
                side: terminal_side,
            });
            break;
        }

        let next = junction + direction * segment;
        trunk.push((junction, next));
        junction = next;

        if let Some(branch) = &carbon.branch {
            let branch_dir = branch_direction(direction, branch.side, lean_deg);
            let side = if branch_dir.x >= 0.0 {
                LabelSide::East
            } else {
                LabelSide::West
            };
            requests.push(LabelRequest {
                origin: junction,
                direction: branch_dir,
                base_length: segment,
                text: oriented_label(&branch.label, side),
                side,
            });
        }
    }
    LabelPlan { trunk, requests }
}

/// Searches chain candidates in style order and keeps the first cheapest;
/// a collision-free candidate ends the search.
fn layout_with_chain(
    canvas: &Canvas,
    spec: &HaworthSpec,
    topo: &RingTopology,
    vertices: &[Point],
    ring_requests: Vec<LabelRequest>,
) -> Result<(LabelPlan, Layout), GeometryError> {
    let config = canvas.config;
    let style = &config.style.layout;
    let vertex = closure_vertex(spec, topo)?;
    let slot = topo.slots[vertex].face(spec.chain_face());
    let radius = config.connector_width() / 2.0;
    let params = canvas.layout_params();

    let mut best: Option<(LabelPlan, Layout)> = None;
    'search: for &trunk_deg in &style.chain_angles_deg {
        for &lean_deg in &style.branch_angles_deg {
            for &multiplier in &style.ladder {
                let mut chain = chain_drawing(
                    spec,
                    slot,
                    vertices[vertex],
                    (trunk_deg, lean_deg, multiplier),
                    config,
                );
                chain.requests.extend(ring_requests.iter().cloned());

                let mut obstacles = canvas.obstacles.clone();
                obstacles
                    .strokes
                    .extend(chain.trunk.iter().map(|(a, b)| (*a, *b, radius)));
                let layout = layout::solve(&chain.requests, &obstacles, &params);
                trace!(trunk_deg, lean_deg, multiplier, cost = layout.cost, "scored chain candidate");

                let clear = layout.cost == 0.0;
                let better = match &best {
                    Some((_, current)) => layout.cost < current.cost,
                    None => true,
                };
                if better {
                    best = Some((chain, layout));
                }
                if clear {
                    break 'search;
                }
            }
        }
    }
    best.ok_or_else(|| GeometryError::MissingSlot {
        what: "exocyclic chain candidate".to_string(),
    })
}

fn substituent_requests(
    spec: &HaworthSpec,
    topo: &RingTopology,
    vertices: &[Point],
    config: &RenderConfig,
) -> Result<Vec<LabelRequest>, GeometryError> {
    let bl = config.bond_length;
    let layout = &config.style.layout;
    let mut requests = Vec::new();

    for (ordinal, carbon) in (0u8..).zip(spec.ring_carbons()) {
        let vertex = topo
            .carbon_vertex(ordinal)
            .ok_or_else(|| GeometryError::MissingSlot {
                what: format!("ring carbon C{}", carbon),
            })?;
        for face in [Face::Up, Face::Down] {
            if spec.has_drawn_chain()
                && carbon == spec.closure_carbon()
                && face == spec.chain_face()
            {
                continue;
            }
            let Some(label) = spec.label(carbon, face) else {
                continue;
            };
            let slot = topo.slots[vertex].face(face);
            let base_length = match slot.length {
                LengthClass::Exterior => layout.exterior_length,
                LengthClass::Interior => layout.interior_length,
            } * bl;
            requests.push(LabelRequest {
                origin: vertices[vertex],
                direction: slot.direction,
                base_length,
                text: oriented_label(label, slot.side),
                side: slot.side,
            });
        }
    }
    Ok(requests)
}
