use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid ring type: '{0}' (expected pyranose or furanose)")]
pub struct ParseRingTypeError(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid anomeric configuration: '{0}' (expected alpha or beta)")]
pub struct ParseAnomerError(String);

/// Carbonyl class declared by the sugar-code prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prefix {
    /// `A`: aldehyde at C1.
    Aldose,
    /// `MK`: hydroxymethyl at C1, ketone at C2.
    Ketose2,
}

impl Prefix {
    /// The literal prefix text in a sugar code.
    pub fn symbol(&self) -> &'static str {
        match self {
            Prefix::Aldose => "A",
            Prefix::Ketose2 => "MK",
        }
    }

    /// Number of carbons the prefix contributes to the body.
    pub fn carbon_span(&self) -> usize {
        self.symbol().len()
    }

    /// Carbon number of the carbonyl carbon, which becomes anomeric on closure.
    pub fn anomeric_carbon(&self) -> u8 {
        match self {
            Prefix::Aldose => 1,
            Prefix::Ketose2 => 2,
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::Aldose => write!(f, "aldose"),
            Prefix::Ketose2 => write!(f, "2-ketose"),
        }
    }
}

/// D/L series, fixed by the reference (penultimate) stereocenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Config {
    D,
    L,
}

impl Config {
    pub fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            'D' => Some(Config::D),
            'L' => Some(Config::L),
            _ => None,
        }
    }

    /// Fischer side of the reference hydroxyl for this series.
    pub fn fischer_side(&self) -> FischerSide {
        match self {
            Config::D => FischerSide::Right,
            Config::L => FischerSide::Left,
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Config::D => write!(f, "D"),
            Config::L => write!(f, "L"),
        }
    }
}

/// Ring closure size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RingType {
    /// Six-membered ring (five carbons and the ring oxygen).
    Pyranose,
    /// Five-membered ring (four carbons and the ring oxygen).
    Furanose,
}

impl RingType {
    /// Number of ring carbons.
    pub fn carbon_count(&self) -> usize {
        match self {
            RingType::Pyranose => 5,
            RingType::Furanose => 4,
        }
    }

    /// Suffix used when naming the closed form, e.g. `pyranose`.
    pub fn suffix(&self) -> &'static str {
        match self {
            RingType::Pyranose => "pyranose",
            RingType::Furanose => "furanose",
        }
    }
}

impl fmt::Display for RingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for RingType {
    type Err = ParseRingTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pyranose" | "pyr" | "p" | "6" => Ok(RingType::Pyranose),
            "furanose" | "fur" | "f" | "5" => Ok(RingType::Furanose),
            _ => Err(ParseRingTypeError(s.to_string())),
        }
    }
}

/// Anomeric configuration fixed on ring closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anomer {
    Alpha,
    Beta,
}

impl Anomer {
    pub fn name(&self) -> &'static str {
        match self {
            Anomer::Alpha => "alpha",
            Anomer::Beta => "beta",
        }
    }
}

impl fmt::Display for Anomer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Anomer {
    type Err = ParseAnomerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "alpha" | "a" | "α" => Ok(Anomer::Alpha),
            "beta" | "b" | "β" => Ok(Anomer::Beta),
            _ => Err(ParseAnomerError(s.to_string())),
        }
    }
}

/// Side of the carbon backbone a hydroxyl sits on in the Fischer projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FischerSide {
    Right,
    Left,
}

impl FischerSide {
    pub fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            'R' => Some(FischerSide::Right),
            'L' => Some(FischerSide::Left),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            FischerSide::Right => 'R',
            FischerSide::Left => 'L',
        }
    }

    /// Haworth face the hydroxyl points to in the standard ring orientation.
    pub fn haworth_face(&self) -> Face {
        match self {
            FischerSide::Right => Face::Down,
            FischerSide::Left => Face::Up,
        }
    }
}

/// Face of the ring plane a substituent points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Up,
    Down,
}

impl Face {
    pub fn opposite(&self) -> Face {
        match self {
            Face::Up => Face::Down,
            Face::Down => Face::Up,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Face::Up => "up",
            Face::Down => "down",
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Built-in lowercase letter codes replacing a hydroxyl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modification {
    /// `d`: hydroxyl replaced by hydrogen.
    Deoxy,
    /// `a`: amino group.
    Amino,
    /// `n`: N-acetylamino group.
    Acetamido,
    /// `p`: phosphate ester.
    Phosphate,
    /// `f`: fluorine.
    Fluoro,
    /// `c`: carbon oxidised to a carboxylic acid.
    Carboxyl,
}

impl Modification {
    pub const ALL: [Modification; 6] = [
        Modification::Deoxy,
        Modification::Amino,
        Modification::Acetamido,
        Modification::Phosphate,
        Modification::Fluoro,
        Modification::Carboxyl,
    ];

    pub fn from_letter(ch: char) -> Option<Self> {
        match ch {
            'd' => Some(Modification::Deoxy),
            'a' => Some(Modification::Amino),
            'n' => Some(Modification::Acetamido),
            'p' => Some(Modification::Phosphate),
            'f' => Some(Modification::Fluoro),
            'c' => Some(Modification::Carboxyl),
            _ => None,
        }
    }

    /// Resolves a footnote identifier naming a built-in modification.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    pub fn letter(&self) -> char {
        match self {
            Modification::Deoxy => 'd',
            Modification::Amino => 'a',
            Modification::Acetamido => 'n',
            Modification::Phosphate => 'p',
            Modification::Fluoro => 'f',
            Modification::Carboxyl => 'c',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Modification::Deoxy => "deoxy",
            Modification::Amino => "amino",
            Modification::Acetamido => "acetamido",
            Modification::Phosphate => "phosphate",
            Modification::Fluoro => "fluoro",
            Modification::Carboxyl => "carboxyl",
        }
    }

    /// Label drawn in place of the hydroxyl on a ring or chain carbon.
    /// `None` means the position carries only hydrogens.
    pub fn ring_label(&self) -> Option<&'static str> {
        match self {
            Modification::Deoxy => None,
            Modification::Amino => Some("NH2"),
            Modification::Acetamido => Some("NHAc"),
            Modification::Phosphate => Some("OPO3H2"),
            Modification::Fluoro => Some("F"),
            Modification::Carboxyl => Some("COOH"),
        }
    }

    /// Label for the terminal carbon when the modification sits there.
    pub fn terminal_label(&self) -> &'static str {
        match self {
            Modification::Deoxy => "CH3",
            Modification::Amino => "CH2NH2",
            Modification::Acetamido => "CH2NHAc",
            Modification::Phosphate => "CH2OPO3H2",
            Modification::Fluoro => "CH2F",
            Modification::Carboxyl => "COOH",
        }
    }
}

impl fmt::Display for Modification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn ring_type_from_str_variants() {
        assert_eq!(RingType::from_str("pyranose").unwrap(), RingType::Pyranose);
        assert_eq!(RingType::from_str("Furanose").unwrap(), RingType::Furanose);
        assert_eq!(RingType::from_str("6").unwrap(), RingType::Pyranose);
        assert_eq!(RingType::from_str("f").unwrap(), RingType::Furanose);
    }

    #[test]
    fn ring_type_from_str_invalid() {
        let err = RingType::from_str("septanose").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid ring type: 'septanose' (expected pyranose or furanose)"
        );
    }

    #[test]
    fn anomer_from_str_variants() {
        assert_eq!(Anomer::from_str("alpha").unwrap(), Anomer::Alpha);
        assert_eq!(Anomer::from_str("B").unwrap(), Anomer::Beta);
        assert_eq!(Anomer::from_str("β").unwrap(), Anomer::Beta);
        assert!(Anomer::from_str("gamma").is_err());
    }

    #[test]
    fn prefix_spans_and_anomeric_carbons() {
        assert_eq!(Prefix::Aldose.carbon_span(), 1);
        assert_eq!(Prefix::Ketose2.carbon_span(), 2);
        assert_eq!(Prefix::Aldose.anomeric_carbon(), 1);
        assert_eq!(Prefix::Ketose2.anomeric_carbon(), 2);
    }

    #[test]
    fn fischer_right_points_down() {
        assert_eq!(FischerSide::Right.haworth_face(), Face::Down);
        assert_eq!(FischerSide::Left.haworth_face(), Face::Up);
        assert_eq!(Config::D.fischer_side(), FischerSide::Right);
        assert_eq!(Config::L.fischer_side(), FischerSide::Left);
    }

    #[test]
    fn modification_letters_and_names_agree() {
        for m in Modification::ALL {
            assert_eq!(Modification::from_letter(m.letter()), Some(m));
            assert_eq!(Modification::from_name(m.name()), Some(m));
        }
        assert_eq!(Modification::from_letter('x'), None);
        assert_eq!(Modification::from_name("sulfate"), None);
    }

    #[test]
    fn deoxy_has_no_ring_label() {
        assert_eq!(Modification::Deoxy.ring_label(), None);
        assert_eq!(Modification::Deoxy.terminal_label(), "CH3");
        assert_eq!(Modification::Carboxyl.terminal_label(), "COOH");
    }
}
