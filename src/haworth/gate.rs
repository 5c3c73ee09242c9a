//! Strict legality check over a finished op list.
//!
//! Every connector is treated as a capsule of radius `width / 2`. A
//! connector may touch any label box, but it must not reach more than
//! `epsilon` into the box of a label other than the one it attaches to.
//! All violations are collected in one pass.

use super::error::OverlapError;
use super::geometry::{capsule_penetration, text_box};
use crate::model::ops::{OpId, RenderOp};
use tracing::debug;

/// Penetration tolerated by [`strict_validate`], in rendering units.
pub const DEFAULT_PENETRATION_EPSILON: f64 = 0.5;

/// Checks `ops` with the default tolerance.
pub fn strict_validate(ops: &[RenderOp]) -> Result<(), Vec<OverlapError>> {
    strict_validate_with(ops, DEFAULT_PENETRATION_EPSILON)
}

/// Checks `ops`, reporting every connector that reaches more than `epsilon`
/// into a label box other than its own.
pub fn strict_validate_with(ops: &[RenderOp], epsilon: f64) -> Result<(), Vec<OverlapError>> {
    let labels: Vec<(OpId, _)> = ops
        .iter()
        .enumerate()
        .filter_map(|(id, op)| match op {
            RenderOp::Text {
                x,
                y,
                text,
                anchor,
                font_size,
                ..
            } => Some((id, text_box(*x, *y, text, *anchor, *font_size))),
            _ => None,
        })
        .collect();

    let mut violations = Vec::new();
    for (connector_id, op) in ops.iter().enumerate() {
        let RenderOp::Line {
            p1,
            p2,
            width,
            owner,
            ..
        } = op
        else {
            continue;
        };
        for (label_id, label_box) in &labels {
            if *owner == Some(*label_id) {
                continue;
            }
            let depth = capsule_penetration(*p1, *p2, width / 2.0, label_box);
            if depth > epsilon {
                violations.push(OverlapError {
                    op_id_a: connector_id,
                    op_id_b: *label_id,
                    penetration_distance: depth,
                });
            }
        }
    }

    debug!(
        ops = ops.len(),
        labels = labels.len(),
        violations = violations.len(),
        "legality gate"
    );

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ops::{Anchor, Point};

    fn text(x: f64, y: f64, s: &str) -> RenderOp {
        RenderOp::Text {
            x,
            y,
            text: s.to_string(),
            anchor: Anchor::Middle,
            font_size: 12.0,
            color: "#000000".into(),
        }
    }

    fn line(p1: (f64, f64), p2: (f64, f64), owner: Option<OpId>) -> RenderOp {
        RenderOp::Line {
            p1: Point::new(p1.0, p1.1),
            p2: Point::new(p2.0, p2.1),
            width: 1.0,
            color: "#000000".into(),
            owner,
        }
    }

    #[test]
    fn empty_and_text_only_lists_pass() {
        assert!(strict_validate(&[]).is_ok());
        assert!(strict_validate(&[text(0.0, 0.0, "OH")]).is_ok());
    }

    #[test]
    fn own_label_is_skipped() {
        let ops = vec![text(0.0, 0.0, "OH"), line((0.0, 40.0), (0.0, 0.0), Some(0))];
        assert!(strict_validate(&ops).is_ok());
    }

    #[test]
    fn connector_through_a_foreign_label_is_reported() {
        let ops = vec![text(0.0, 0.0, "OH"), line((0.0, 40.0), (0.0, -40.0), None)];
        let errs = strict_validate(&ops).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].op_id_a, 1);
        assert_eq!(errs[0].op_id_b, 0);
        // Stroke radius plus half the box height, the shallower axis at the centre.
        assert!((errs[0].penetration_distance - 6.5).abs() < 1e-9);
    }

    #[test]
    fn touching_the_boundary_is_legal() {
        // Box of `H` spans y in [-6, 6]; the stroke edge stops exactly at y = 6.
        let ops = vec![text(0.0, 0.0, "H"), line((0.0, 40.0), (0.0, 6.5), None)];
        assert!(strict_validate(&ops).is_ok());
    }

    #[test]
    fn shallow_penetration_within_epsilon_is_legal() {
        let ops = vec![text(0.0, 0.0, "H"), line((0.0, 40.0), (0.0, 6.2), None)];
        assert!(strict_validate(&ops).is_ok());
        assert!(strict_validate_with(&ops, 0.1).is_err());
    }

    #[test]
    fn labels_forced_onto_one_point_name_both_ids() {
        let ops = vec![
            text(0.0, 0.0, "OH"),
            line((0.0, 40.0), (0.0, 0.0), Some(0)),
            text(0.0, 0.0, "H"),
            line((0.0, -40.0), (0.0, 0.0), Some(2)),
        ];
        let errs = strict_validate(&ops).unwrap_err();
        let pairs: Vec<(OpId, OpId)> = errs.iter().map(|e| (e.op_id_a, e.op_id_b)).collect();
        assert_eq!(pairs, vec![(1, 2), (3, 0)]);
        assert!(errs.iter().all(|e| e.penetration_distance > DEFAULT_PENETRATION_EPSILON));
    }

    #[test]
    fn every_violation_is_reported() {
        let ops = vec![
            text(0.0, 0.0, "H"),
            text(30.0, 0.0, "H"),
            line((-20.0, 0.0), (50.0, 0.0), None),
        ];
        let errs = strict_validate(&ops).unwrap_err();
        assert_eq!(errs.len(), 2);
    }
}
