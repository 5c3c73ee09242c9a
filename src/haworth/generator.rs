//! Ring closure and substituent assignment.
//!
//! Maps a decoded sugar code onto the faces of a Haworth ring. Stereocenter
//! letters are Fischer sides: a hydroxyl on the right of the Fischer
//! projection points down in the standard ring orientation, one on the left
//! points up. The reference carbon (and with it the α/β lookup) carries the
//! D/L series, so an L-series sugar comes out mirrored through the ring plane.

use super::error::ChemistryError;
use super::names;
use crate::model::code::{ParsedCode, PositionRole, Terminal};
use crate::model::spec::{Branch, ChainCarbon, HaworthSpec, SubstituentKey};
use crate::model::types::{Anomer, Config, Face, FischerSide, Prefix, RingType};
use std::collections::BTreeMap;
use tracing::debug;

/// Anomeric and closure carbon numbers for one prefix and ring size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosureRule {
    pub anomeric: u8,
    pub closure: u8,
}

/// (prefix, ring type, anomeric carbon, closure offset from the anomeric carbon).
const CLOSURE_RULES: [(Prefix, RingType, u8, u8); 4] = [
    (Prefix::Aldose, RingType::Furanose, 1, 3),
    (Prefix::Aldose, RingType::Pyranose, 1, 4),
    (Prefix::Ketose2, RingType::Furanose, 2, 3),
    (Prefix::Ketose2, RingType::Pyranose, 2, 4),
];

/// Face of the anomeric hydroxyl of an aldose, by anomer and series.
const ANOMERIC_HYDROXYL: [(Anomer, Config, Face); 4] = [
    (Anomer::Alpha, Config::D, Face::Down),
    (Anomer::Beta, Config::D, Face::Up),
    (Anomer::Alpha, Config::L, Face::Up),
    (Anomer::Beta, Config::L, Face::Down),
];

const HYDROXYL: &str = "OH";
const HYDROGEN: &str = "H";

/// Looks up the ring-closure rule for a prefix and ring size.
pub fn closure_rule(prefix: Prefix, ring_type: RingType) -> Result<ClosureRule, ChemistryError> {
    CLOSURE_RULES
        .iter()
        .find(|(p, r, _, _)| *p == prefix && *r == ring_type)
        .map(|(_, _, anomeric, offset)| ClosureRule {
            anomeric: *anomeric,
            closure: anomeric + offset,
        })
        .ok_or_else(|| ChemistryError::UnsupportedCombination {
            prefix: prefix.symbol().to_string(),
            ring_type,
        })
}

/// Resolves every ring position of `parsed` closed as `ring_type` with the given anomer.
pub fn generate(
    parsed: &ParsedCode,
    ring_type: RingType,
    anomeric: Anomer,
) -> Result<HaworthSpec, ChemistryError> {
    let rule = closure_rule(parsed.prefix(), ring_type)?;
    check_eligible(parsed, ring_type, rule)?;

    let mut substituents = BTreeMap::new();

    let (up, down) = anomeric_pair(parsed, anomeric);
    substituents.insert(SubstituentKey::up(rule.anomeric), up);
    substituents.insert(SubstituentKey::down(rule.anomeric), down);

    for carbon in rule.anomeric + 1..rule.closure {
        let (up, down) = interior_pair(parsed, carbon);
        substituents.insert(SubstituentKey::up(carbon), up);
        substituents.insert(SubstituentKey::down(carbon), down);
    }

    let chain = exocyclic_chain(parsed, rule.closure);
    let chain_face = closure_chain_face(parsed, rule.closure);
    let chain_label = chain
        .first()
        .map(|c| c.label.clone())
        .unwrap_or_else(|| HYDROGEN.to_string());
    substituents.insert(SubstituentKey::new(rule.closure, chain_face), chain_label);
    substituents.insert(
        SubstituentKey::new(rule.closure, chain_face.opposite()),
        HYDROGEN.to_string(),
    );

    let title = names::title(parsed.body(), parsed.config(), anomeric, ring_type);

    debug!(
        code = parsed.raw_text(),
        ring = %ring_type,
        anomer = %anomeric,
        closure = rule.closure,
        chain = chain.len(),
        "generated Haworth spec"
    );

    Ok(HaworthSpec::new(
        ring_type,
        anomeric,
        parsed.config(),
        rule.anomeric,
        rule.closure,
        chain_face,
        substituents,
        chain,
        title,
    ))
}

fn check_eligible(
    parsed: &ParsedCode,
    ring_type: RingType,
    rule: ClosureRule,
) -> Result<(), ChemistryError> {
    let code = parsed.raw_text();
    let carbons = parsed.carbon_count();

    if usize::from(rule.closure) > carbons {
        return Err(ChemistryError::not_eligible(
            code,
            ring_type,
            format!(
                "ring closure at C{} needs at least {} carbons, code has {}",
                rule.closure, rule.closure, carbons
            ),
        ));
    }

    if rule.closure == parsed.terminal_carbon() {
        if !parsed.terminal().has_hydroxyl() {
            return Err(ChemistryError::not_eligible(
                code,
                ring_type,
                format!("terminal C{} has no ring-forming hydroxyl", rule.closure),
            ));
        }
        return Ok(());
    }

    if rule.closure == parsed.config_carbon() {
        return Ok(());
    }

    match parsed.role_of(rule.closure) {
        Some(PositionRole::Stereo { .. }) => Ok(()),
        Some(PositionRole::Modified { modification }) => Err(ChemistryError::not_eligible(
            code,
            ring_type,
            format!(
                "C{} is {} and has no ring-forming hydroxyl",
                rule.closure, modification
            ),
        )),
        Some(PositionRole::Footnote { name, .. }) => Err(ChemistryError::not_eligible(
            code,
            ring_type,
            format!(
                "C{} carries '{}' and has no ring-forming hydroxyl",
                rule.closure, name
            ),
        )),
        _ => Err(ChemistryError::not_eligible(
            code,
            ring_type,
            format!("C{} cannot close the ring", rule.closure),
        )),
    }
}

fn anomeric_pair(parsed: &ParsedCode, anomeric: Anomer) -> (String, String) {
    let hydroxyl_face = ANOMERIC_HYDROXYL
        .iter()
        .find(|(a, c, _)| *a == anomeric && *c == parsed.config())
        .map(|(_, _, face)| *face)
        .unwrap_or(Face::Down);

    let (hydroxyl_face, partner) = match parsed.prefix() {
        Prefix::Aldose => (hydroxyl_face, HYDROGEN),
        Prefix::Ketose2 => (hydroxyl_face.opposite(), "CH2OH"),
    };

    match hydroxyl_face {
        Face::Up => (HYDROXYL.to_string(), partner.to_string()),
        Face::Down => (partner.to_string(), HYDROXYL.to_string()),
    }
}

/// The non-hydrogen group on a backbone carbon and its Fischer side.
/// `None` when the carbon carries only hydrogens.
fn backbone_group(parsed: &ParsedCode, carbon: u8) -> Option<(FischerSide, String)> {
    if carbon == parsed.config_carbon() {
        return Some((parsed.config().fischer_side(), HYDROXYL.to_string()));
    }
    match parsed.role_of(carbon)? {
        PositionRole::Stereo { side } => Some((*side, HYDROXYL.to_string())),
        PositionRole::Modified { modification } => modification
            .ring_label()
            .map(|label| (FischerSide::Right, label.to_string())),
        PositionRole::Footnote { name, .. } => {
            Some((FischerSide::Right, footnote_group(name).to_string()))
        }
        PositionRole::Carbonyl | PositionRole::Hydroxymethyl => None,
    }
}

fn interior_pair(parsed: &ParsedCode, carbon: u8) -> (String, String) {
    match backbone_group(parsed, carbon) {
        Some((side, group)) => match side.haworth_face() {
            Face::Up => (group, HYDROGEN.to_string()),
            Face::Down => (HYDROGEN.to_string(), group),
        },
        None => (HYDROGEN.to_string(), HYDROGEN.to_string()),
    }
}

/// Face the chain leaves the closure carbon from: the ring oxygen takes the
/// hydroxyl's place, pushing the rest of the backbone to the other face.
fn closure_chain_face(parsed: &ParsedCode, closure: u8) -> Face {
    let side = if closure == parsed.terminal_carbon() {
        parsed.config().fischer_side()
    } else {
        backbone_group(parsed, closure)
            .map(|(side, _)| side)
            .unwrap_or_else(|| parsed.config().fischer_side())
    };
    side.haworth_face().opposite()
}

fn exocyclic_chain(parsed: &ParsedCode, closure: u8) -> Vec<ChainCarbon> {
    let terminal = parsed.terminal_carbon();
    (closure + 1..=terminal)
        .map(|carbon| {
            if carbon == terminal {
                ChainCarbon {
                    carbon,
                    label: terminal_label(parsed.terminal()),
                    branch: None,
                }
            } else {
                match backbone_group(parsed, carbon) {
                    Some((side, group)) => ChainCarbon {
                        carbon,
                        label: format!("CH{}", group),
                        branch: Some(Branch { side, label: group }),
                    },
                    None => ChainCarbon {
                        carbon,
                        label: "CH2".to_string(),
                        branch: None,
                    },
                }
            }
        })
        .collect()
}

fn terminal_label(terminal: &Terminal) -> String {
    match terminal {
        Terminal::Hydroxymethyl => "CH2OH".to_string(),
        Terminal::Modified { modification } => modification.terminal_label().to_string(),
        Terminal::Footnote { name, .. } => format!("CH2{}", footnote_group(name)),
    }
}

/// Drawn group for a footnote identifier; unknown identifiers are drawn verbatim.
fn footnote_group(name: &str) -> &str {
    match name {
        "sulfate" => "OSO3H",
        "methoxy" | "methyl" => "OCH3",
        "acetyl" => "OAc",
        "chloro" => "Cl",
        "bromo" => "Br",
        "iodo" => "I",
        "thio" => "SH",
        "azido" => "N3",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::haworth::parser::parse;

    fn spec(code: &str, ring: RingType, anomer: Anomer) -> HaworthSpec {
        generate(&parse(code).unwrap(), ring, anomer).unwrap()
    }

    fn label<'a>(spec: &'a HaworthSpec, key: &str) -> &'a str {
        spec.substituents()
            .iter()
            .find(|(k, _)| k.to_string() == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or_else(|| panic!("missing {key}"))
    }

    #[test]
    fn closure_rules_match_prefix_and_ring() {
        let r = closure_rule(Prefix::Aldose, RingType::Pyranose).unwrap();
        assert_eq!((r.anomeric, r.closure), (1, 5));
        let r = closure_rule(Prefix::Aldose, RingType::Furanose).unwrap();
        assert_eq!((r.anomeric, r.closure), (1, 4));
        let r = closure_rule(Prefix::Ketose2, RingType::Pyranose).unwrap();
        assert_eq!((r.anomeric, r.closure), (2, 6));
        let r = closure_rule(Prefix::Ketose2, RingType::Furanose).unwrap();
        assert_eq!((r.anomeric, r.closure), (2, 5));
    }

    #[test]
    fn longest_code_keeps_every_chain_carbon() {
        let code = format!("A{}DM", "R".repeat(252));
        let s = spec(&code, RingType::Pyranose, Anomer::Beta);
        let chain = s.exocyclic_chain();
        assert_eq!(chain.len(), 250);
        assert_eq!(chain[0].carbon, 6);
        assert_eq!(chain.last().unwrap().carbon, 255);
        assert_eq!(chain.last().unwrap().label, "CH2OH");
    }

    #[test]
    fn alpha_d_glucopyranose() {
        let s = spec("ARLRDM", RingType::Pyranose, Anomer::Alpha);
        assert_eq!(label(&s, "C1_down"), "OH");
        assert_eq!(label(&s, "C1_up"), "H");
        assert_eq!(label(&s, "C2_down"), "OH");
        assert_eq!(label(&s, "C3_up"), "OH");
        assert_eq!(label(&s, "C4_down"), "OH");
        assert_eq!(label(&s, "C5_up"), "CH2OH");
        assert_eq!(label(&s, "C5_down"), "H");
        assert_eq!(s.substituents().len(), 10);
        assert_eq!(s.title(), "alpha-D-Glucopyranose");
        assert_eq!(s.exocyclic_chain().len(), 1);
        assert_eq!(s.chain_face(), Face::Up);
    }

    #[test]
    fn beta_swaps_only_the_anomeric_pair() {
        let alpha = spec("ARLRDM", RingType::Pyranose, Anomer::Alpha);
        let beta = spec("ARLRDM", RingType::Pyranose, Anomer::Beta);
        assert_eq!(label(&beta, "C1_up"), "OH");
        assert_eq!(label(&beta, "C1_down"), "H");
        for (key, value) in alpha.substituents() {
            if key.carbon != 1 {
                assert_eq!(beta.substituents().get(key), Some(value));
            }
        }
    }

    #[test]
    fn fructofuranose_anomeric_pair() {
        let beta = spec("MKLRDM", RingType::Furanose, Anomer::Beta);
        assert_eq!(label(&beta, "C2_up"), "CH2OH");
        assert_eq!(label(&beta, "C2_down"), "OH");
        let alpha = spec("MKLRDM", RingType::Furanose, Anomer::Alpha);
        assert_eq!(label(&alpha, "C2_up"), "OH");
        assert_eq!(label(&alpha, "C2_down"), "CH2OH");
        assert_eq!(beta.anomeric_carbon(), 2);
        assert_eq!(beta.closure_carbon(), 5);
        assert_eq!(label(&beta, "C5_up"), "CH2OH");
    }

    #[test]
    fn deoxyribofuranose_has_two_hydrogens_at_c2() {
        let s = spec("AdRDM", RingType::Furanose, Anomer::Beta);
        assert_eq!(label(&s, "C2_up"), "H");
        assert_eq!(label(&s, "C2_down"), "H");
        assert_eq!(label(&s, "C3_down"), "OH");
        assert_eq!(label(&s, "C4_up"), "CH2OH");
    }

    #[test]
    fn three_carbon_code_is_not_eligible() {
        let parsed = parse("ADM").unwrap();
        for ring in [RingType::Pyranose, RingType::Furanose] {
            for anomer in [Anomer::Alpha, Anomer::Beta] {
                assert!(matches!(
                    generate(&parsed, ring, anomer),
                    Err(ChemistryError::NotHaworthEligible { .. })
                ));
            }
        }
    }

    #[test]
    fn tetrose_closes_only_as_furanose() {
        let parsed = parse("ARDM").unwrap();
        assert!(generate(&parsed, RingType::Furanose, Anomer::Alpha).is_ok());
        assert!(generate(&parsed, RingType::Pyranose, Anomer::Alpha).is_err());
    }

    #[test]
    fn generation_is_deterministic() {
        let parsed = parse("ALLRDM").unwrap();
        let a = generate(&parsed, RingType::Pyranose, Anomer::Beta).unwrap();
        let b = generate(&parsed, RingType::Pyranose, Anomer::Beta).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn every_ring_carbon_has_both_faces() {
        let s = spec("MKLRDM", RingType::Pyranose, Anomer::Alpha);
        for carbon in s.ring_carbons() {
            assert!(s.label(carbon, Face::Up).is_some(), "C{carbon} up");
            assert!(s.label(carbon, Face::Down).is_some(), "C{carbon} down");
        }
        assert_eq!(s.substituents().len(), 2 * s.ring_carbon_count());
    }

    #[test]
    fn ketopyranose_ring_ch2_carries_two_hydrogens() {
        let s = spec("MKLRDM", RingType::Pyranose, Anomer::Beta);
        assert_eq!(s.closure_carbon(), 6);
        assert_eq!(label(&s, "C6_up"), "H");
        assert_eq!(label(&s, "C6_down"), "H");
        assert_eq!(label(&s, "C5_down"), "OH");
        assert!(s.exocyclic_chain().is_empty());
    }

    #[test]
    fn glucofuranose_has_a_two_carbon_chain() {
        let s = spec("ARLRDM", RingType::Furanose, Anomer::Beta);
        assert_eq!(s.closure_carbon(), 4);
        let chain = s.exocyclic_chain();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].carbon, 5);
        assert_eq!(chain[0].label, "CHOH");
        assert_eq!(
            chain[0].branch,
            Some(Branch {
                side: FischerSide::Right,
                label: "OH".into()
            })
        );
        assert_eq!(chain[1].label, "CH2OH");
        assert_eq!(chain[1].branch, None);
        assert_eq!(label(&s, "C4_up"), "CHOH");
        assert!(s.has_drawn_chain());
    }

    #[test]
    fn l_series_mirrors_through_the_ring_plane() {
        let d = spec("ARLRDM", RingType::Pyranose, Anomer::Alpha);
        let l = spec("ALRLLM", RingType::Pyranose, Anomer::Alpha);
        for (key, value) in d.substituents() {
            let mirrored = SubstituentKey::new(key.carbon, key.face.opposite());
            assert_eq!(l.substituents().get(&mirrored), Some(value), "{key}");
        }
        assert_eq!(l.chain_face(), Face::Down);
        assert_eq!(l.title(), "alpha-L-Glucopyranose");
    }

    #[test]
    fn modifications_replace_the_hydroxyl() {
        let s = spec("AnLRDM", RingType::Pyranose, Anomer::Beta);
        assert_eq!(label(&s, "C2_down"), "NHAc");
        assert_eq!(label(&s, "C2_up"), "H");

        let s = spec("ARLRDc", RingType::Pyranose, Anomer::Beta);
        assert_eq!(label(&s, "C5_up"), "COOH");

        let s = spec("ALRRLd", RingType::Pyranose, Anomer::Alpha);
        assert_eq!(label(&s, "C5_down"), "CH3");
    }

    #[test]
    fn footnotes_supply_labels() {
        let s = spec("A1LRDM[1=sulfate]", RingType::Pyranose, Anomer::Alpha);
        assert_eq!(label(&s, "C2_down"), "OSO3H");
        let s = spec("ARLRD2[2=OCH3]", RingType::Pyranose, Anomer::Alpha);
        assert_eq!(label(&s, "C5_up"), "CH2OCH3");
    }

    #[test]
    fn closure_without_hydroxyl_is_not_eligible() {
        let parsed = parse("ARRRdRDM").unwrap();
        assert!(matches!(
            generate(&parsed, RingType::Pyranose, Anomer::Alpha),
            Err(ChemistryError::NotHaworthEligible { .. })
        ));

        let parsed = parse("ARRDd").unwrap();
        assert!(generate(&parsed, RingType::Pyranose, Anomer::Alpha).is_err());
        assert!(generate(&parsed, RingType::Furanose, Anomer::Alpha).is_ok());
    }

    #[test]
    fn pentopyranose_closes_on_the_terminal_carbon() {
        let s = spec("ARRDM", RingType::Pyranose, Anomer::Beta);
        assert_eq!(s.closure_carbon(), 5);
        assert_eq!(label(&s, "C5_up"), "H");
        assert_eq!(label(&s, "C5_down"), "H");
        assert_eq!(label(&s, "C4_down"), "OH");
        assert!(s.exocyclic_chain().is_empty());
    }
}
