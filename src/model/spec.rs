use super::types::{Anomer, Config, Face, FischerSide, RingType};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Map key naming one face of one ring carbon, e.g. `C2_up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubstituentKey {
    pub carbon: u8,
    pub face: Face,
}

impl SubstituentKey {
    pub fn new(carbon: u8, face: Face) -> Self {
        Self { carbon, face }
    }

    pub fn up(carbon: u8) -> Self {
        Self::new(carbon, Face::Up)
    }

    pub fn down(carbon: u8) -> Self {
        Self::new(carbon, Face::Down)
    }
}

impl fmt::Display for SubstituentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}_{}", self.carbon, self.face)
    }
}

impl Serialize for SubstituentKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Hydroxyl (or replacement) hanging off an interior chain carbon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Branch {
    pub side: FischerSide,
    pub label: String,
}

/// One exocyclic carbon beyond the ring-closure carbon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainCarbon {
    pub carbon: u8,
    /// Condensed label, e.g. `CHOH` for an interior carbon or `CH2OH` at the end.
    pub label: String,
    /// Present on every chain carbon except the last and any deoxy carbon.
    pub branch: Option<Branch>,
}

/// Fully resolved substituent map for one ring form of one sugar.
///
/// Built once by the generator; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HaworthSpec {
    ring_type: RingType,
    anomeric: Anomer,
    config: Config,
    ring_carbon_count: usize,
    anomeric_carbon: u8,
    closure_carbon: u8,
    chain_face: Face,
    substituents: BTreeMap<SubstituentKey, String>,
    exocyclic_chain: Vec<ChainCarbon>,
    title: String,
}

impl HaworthSpec {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        ring_type: RingType,
        anomeric: Anomer,
        config: Config,
        anomeric_carbon: u8,
        closure_carbon: u8,
        chain_face: Face,
        substituents: BTreeMap<SubstituentKey, String>,
        exocyclic_chain: Vec<ChainCarbon>,
        title: String,
    ) -> Self {
        Self {
            ring_type,
            anomeric,
            config,
            ring_carbon_count: ring_type.carbon_count(),
            anomeric_carbon,
            closure_carbon,
            chain_face,
            substituents,
            exocyclic_chain,
            title,
        }
    }

    pub fn ring_type(&self) -> RingType {
        self.ring_type
    }

    pub fn anomeric(&self) -> Anomer {
        self.anomeric
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn ring_carbon_count(&self) -> usize {
        self.ring_carbon_count
    }

    pub fn anomeric_carbon(&self) -> u8 {
        self.anomeric_carbon
    }

    pub fn closure_carbon(&self) -> u8 {
        self.closure_carbon
    }

    /// Face of the closure carbon the exocyclic chain leaves from.
    pub fn chain_face(&self) -> Face {
        self.chain_face
    }

    pub fn substituents(&self) -> &BTreeMap<SubstituentKey, String> {
        &self.substituents
    }

    pub fn exocyclic_chain(&self) -> &[ChainCarbon] {
        &self.exocyclic_chain
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Ring carbons in ring order, anomeric carbon first.
    pub fn ring_carbons(&self) -> impl Iterator<Item = u8> + '_ {
        self.anomeric_carbon..=self.closure_carbon
    }

    /// Label at a carbon face.
    pub fn label(&self, carbon: u8, face: Face) -> Option<&str> {
        self.substituents
            .get(&SubstituentKey::new(carbon, face))
            .map(String::as_str)
    }

    /// Whether the exocyclic chain is long enough to be drawn carbon by carbon.
    pub fn has_drawn_chain(&self) -> bool {
        self.exocyclic_chain.len() >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substituent_key_display() {
        assert_eq!(SubstituentKey::up(1).to_string(), "C1_up");
        assert_eq!(SubstituentKey::down(5).to_string(), "C5_down");
    }

    #[test]
    fn substituent_keys_order_by_carbon_then_face() {
        let mut keys = vec![
            SubstituentKey::down(2),
            SubstituentKey::up(3),
            SubstituentKey::up(2),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                SubstituentKey::up(2),
                SubstituentKey::down(2),
                SubstituentKey::up(3)
            ]
        );
    }

    #[test]
    fn substituent_map_serializes_with_string_keys() {
        let mut map = BTreeMap::new();
        map.insert(SubstituentKey::down(1), "OH".to_string());
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"C1_down":"OH"}"#);
    }
}
