//! Scored candidate layout for substituent labels.
//!
//! Every label has a small ladder of connector lengths. Labels that can
//! touch each other on some rung are grouped, and each group is searched
//! over every rung combination for the lowest total cost; branches whose
//! partial cost already reaches the best found are cut. Rung combinations
//! are visited shortest first, so ties go to the shorter connectors and an
//! uncluttered drawing keeps every base length.

use super::geometry::{
    AttachConstraint, AttachTarget, Rect, attach_offset, capsule_penetration, text_box,
    text_width,
};
use super::topology::LabelSide;
use crate::model::ops::{Anchor, Point};
use tracing::trace;

/// Connector penetration counts for more than box overlap: the gate rejects it.
const PENETRATION_WEIGHT: f64 = 10.0;
/// Cost of a candidate whose label swallows its own connector.
const MISSING_CONNECTOR_PENALTY: f64 = 1.0e6;

/// One label to place at the end of a connector.
#[derive(Debug, Clone)]
pub struct LabelRequest {
    /// Where the connector starts.
    pub origin: Point,
    /// Unit direction of the connector.
    pub direction: Point,
    /// Distance from `origin` to the bonded glyph at multiplier 1.0.
    pub base_length: f64,
    /// Text as drawn (already mirrored for west labels).
    pub text: String,
    pub side: LabelSide,
}

/// A label and its connector at one candidate length.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub multiplier: f64,
    pub text_x: f64,
    pub text_y: f64,
    pub anchor: Anchor,
    pub label_box: Rect,
    /// Clipped connector; `None` when the label box covers the origin.
    pub connector: Option<(Point, Point)>,
}

/// Geometry already on the page that labels must avoid.
#[derive(Debug, Clone, Default)]
pub struct Obstacles {
    pub boxes: Vec<Rect>,
    /// Stroked segments as (start, end, half width).
    pub strokes: Vec<(Point, Point, f64)>,
}

/// Shared drawing parameters for placement and scoring.
#[derive(Debug, Clone, Copy)]
pub struct LayoutParams<'a> {
    pub font_size: f64,
    pub gap: f64,
    pub connector_radius: f64,
    pub ladder: &'a [f64],
}

/// Positions a label so the bonded glyph centre sits at `length` along the
/// connector, then clips the connector to the label box.
pub fn place(request: &LabelRequest, multiplier: f64, params: &LayoutParams) -> Placement {
    let fs = params.font_size;
    let attach = request.origin + request.direction * (request.base_length * multiplier);
    let left = attach.x - attach_offset(&request.text, request.side, fs);

    let (anchor, text_x) = if request.text.chars().count() == 1 {
        (Anchor::Middle, attach.x)
    } else {
        match request.side {
            LabelSide::East => (Anchor::Start, left),
            LabelSide::West => (Anchor::End, left + text_width(&request.text, fs)),
        }
    };
    let label_box = text_box(text_x, attach.y, &request.text, anchor, fs);

    let connector = AttachTarget::Box(label_box)
        .clip(
            request.origin,
            &AttachConstraint {
                direction: request.direction,
                min_clearance: params.gap,
            },
        )
        .map(|end| (request.origin, end));

    Placement {
        multiplier,
        text_x,
        text_y: attach.y,
        anchor,
        label_box,
        connector,
    }
}

fn penetration(segment: (Point, Point), radius: f64, rect: &Rect) -> f64 {
    capsule_penetration(segment.0, segment.1, radius, rect).max(0.0)
}

/// Cost of `candidate` against the fixed obstacles alone.
fn unary_cost(candidate: &Placement, obstacles: &Obstacles, params: &LayoutParams) -> f64 {
    let r = params.connector_radius;
    let mut total = 0.0;

    if candidate.connector.is_none() {
        total += MISSING_CONNECTOR_PENALTY;
    }
    for rect in &obstacles.boxes {
        total += candidate.label_box.overlap_area(rect);
        if let Some(seg) = candidate.connector {
            total += PENETRATION_WEIGHT * penetration(seg, r, rect);
        }
    }
    for (a, b, half_width) in &obstacles.strokes {
        total += PENETRATION_WEIGHT * penetration((*a, *b), *half_width, &candidate.label_box);
    }
    total
}

/// Cost of two labels drawn together, counted once.
fn pair_cost(a: &Placement, b: &Placement, params: &LayoutParams) -> f64 {
    let r = params.connector_radius;
    let mut total = a.label_box.overlap_area(&b.label_box);
    if let Some(seg) = a.connector {
        total += PENETRATION_WEIGHT * penetration(seg, r, &b.label_box);
    }
    if let Some(seg) = b.connector {
        total += PENETRATION_WEIGHT * penetration(seg, r, &a.label_box);
    }
    total
}

/// Committed placements and their total cost.
#[derive(Debug, Clone)]
pub struct Layout {
    pub placements: Vec<Placement>,
    pub cost: f64,
}

/// Precomputed costs for one solve.
struct CostTable {
    rungs: usize,
    /// `unary[label][rung]`.
    unary: Vec<Vec<f64>>,
    /// `pairs[i][j]`, row-major `rungs x rungs`, present when the two labels
    /// interact on at least one rung combination.
    pairs: Vec<Vec<Option<Vec<f64>>>>,
}

impl CostTable {
    fn build(
        candidates: &[Vec<Placement>],
        obstacles: &Obstacles,
        params: &LayoutParams,
    ) -> Self {
        let n = candidates.len();
        let rungs = candidates.first().map_or(0, Vec::len);
        let unary = candidates
            .iter()
            .map(|c| c.iter().map(|p| unary_cost(p, obstacles, params)).collect())
            .collect();

        let mut pairs = vec![vec![None; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let table: Vec<f64> = candidates[i]
                    .iter()
                    .flat_map(|a| candidates[j].iter().map(move |b| pair_cost(a, b, params)))
                    .collect();
                if table.iter().any(|cost| *cost > 0.0) {
                    let transposed = (0..rungs * rungs)
                        .map(|k| table[(k % rungs) * rungs + k / rungs])
                        .collect();
                    pairs[i][j] = Some(table);
                    pairs[j][i] = Some(transposed);
                }
            }
        }
        Self {
            rungs,
            unary,
            pairs,
        }
    }

    fn pair(&self, i: usize, rung_i: usize, j: usize, rung_j: usize) -> f64 {
        self.pairs[i][j]
            .as_ref()
            .map_or(0.0, |table| table[rung_i * self.rungs + rung_j])
    }

    /// Labels grouped by interaction, each group in ascending order.
    fn groups(&self) -> Vec<Vec<usize>> {
        let n = self.unary.len();
        let mut seen = vec![false; n];
        let mut groups = Vec::new();
        for start in 0..n {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            let mut group = Vec::new();
            let mut stack = vec![start];
            while let Some(i) = stack.pop() {
                group.push(i);
                for j in 0..n {
                    if !seen[j] && self.pairs[i][j].is_some() {
                        seen[j] = true;
                        stack.push(j);
                    }
                }
            }
            group.sort_unstable();
            groups.push(group);
        }
        groups
    }
}

/// Branch-and-bound search over the rung combinations of one group.
struct GroupSearch<'a> {
    table: &'a CostTable,
    group: &'a [usize],
    current: Vec<usize>,
    best: Vec<usize>,
    best_cost: f64,
}

impl<'a> GroupSearch<'a> {
    fn run(table: &'a CostTable, group: &'a [usize]) -> (Vec<usize>, f64) {
        let mut search = Self {
            table,
            group,
            current: vec![0; group.len()],
            best: vec![0; group.len()],
            best_cost: f64::INFINITY,
        };
        search.descend(0, 0.0);
        (search.best, search.best_cost)
    }

    fn descend(&mut self, depth: usize, cost: f64) {
        if cost >= self.best_cost {
            return;
        }
        if depth == self.group.len() {
            self.best_cost = cost;
            self.best.clone_from(&self.current);
            return;
        }
        let label = self.group[depth];
        for rung in 0..self.table.rungs {
            let mut next = cost + self.table.unary[label][rung];
            for (k, &placed) in self.group[..depth].iter().enumerate() {
                next += self.table.pair(placed, self.current[k], label, rung);
            }
            self.current[depth] = rung;
            self.descend(depth + 1, next);
        }
    }
}

/// Places every request, choosing the rung combination of least total cost.
pub fn solve(requests: &[LabelRequest], obstacles: &Obstacles, params: &LayoutParams) -> Layout {
    let ladder: &[f64] = if params.ladder.is_empty() {
        &[1.0]
    } else {
        params.ladder
    };

    let candidates: Vec<Vec<Placement>> = requests
        .iter()
        .map(|req| ladder.iter().map(|m| place(req, *m, params)).collect())
        .collect();

    let table = CostTable::build(&candidates, obstacles, params);
    let mut chosen = vec![0; requests.len()];
    let mut cost = 0.0;
    for group in table.groups() {
        let (rungs, group_cost) = GroupSearch::run(&table, &group);
        trace!(labels = ?group, rungs = ?rungs, cost = group_cost, "searched label group");
        for (label, rung) in group.iter().zip(rungs) {
            chosen[*label] = rung;
        }
        cost += group_cost;
    }
    trace!(labels = requests.len(), cost, "committed label layout");

    let placements = candidates
        .into_iter()
        .zip(chosen)
        .map(|(mut c, k)| c.swap_remove(k))
        .collect();
    Layout { placements, cost }
}
