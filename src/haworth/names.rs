//! Common names for well-known sugar codes.
//!
//! Titles are built from an optional modifier, the anomer and series, a name
//! stem and the ring suffix, e.g. `alpha-D-` + `Gluco` + `pyranose` or
//! `2-Deoxy-` + `alpha-D-` + `ribo` + `furanose`. Codes without an entry fall
//! back to the raw code.

use crate::model::types::{Anomer, Config, RingType};
use Config::{D, L};

/// A known sugar: stem plus any modifier written ahead of the anomer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SugarName {
    pub config: Config,
    pub modifier: Option<&'static str>,
    /// Lowercase stem, e.g. `gluco`.
    pub stem: &'static str,
}

const fn plain(config: Config, stem: &'static str) -> SugarName {
    SugarName {
        config,
        modifier: None,
        stem,
    }
}

const fn modified(config: Config, modifier: &'static str, stem: &'static str) -> SugarName {
    SugarName {
        config,
        modifier: Some(modifier),
        stem,
    }
}

/// Body → name. Bodies exclude any footnote block.
const NAMES: &[(&str, SugarName)] = &[
    // Aldotetroses
    ("ARDM", plain(D, "erythro")),
    ("ALDM", plain(D, "threo")),
    // Aldopentoses
    ("ARRDM", plain(D, "ribo")),
    ("ALRDM", plain(D, "arabino")),
    ("ARLDM", plain(D, "xylo")),
    ("ALLDM", plain(D, "lyxo")),
    ("ALLLM", plain(L, "ribo")),
    ("ARLLM", plain(L, "arabino")),
    ("ALRLM", plain(L, "xylo")),
    ("ARRLM", plain(L, "lyxo")),
    // Aldohexoses
    ("ARRRDM", plain(D, "allo")),
    ("ALRRDM", plain(D, "altro")),
    ("ARLRDM", plain(D, "gluco")),
    ("ALLRDM", plain(D, "manno")),
    ("ARRLDM", plain(D, "gulo")),
    ("ALRLDM", plain(D, "ido")),
    ("ARLLDM", plain(D, "galacto")),
    ("ALLLDM", plain(D, "talo")),
    ("ALRLLM", plain(L, "gluco")),
    ("ARRLLM", plain(L, "manno")),
    ("ALRRLM", plain(L, "galacto")),
    ("ARLRLM", plain(L, "ido")),
    // Deoxy, amino and acidic sugars
    ("AdRDM", modified(D, "2-Deoxy", "ribo")),
    ("AdLRDM", modified(D, "2-Deoxy", "gluco")),
    ("ALRRLd", plain(L, "fuco")),
    ("ARRLLd", plain(L, "rhamno")),
    ("ARLLDd", plain(D, "fuco")),
    ("AaLRDM", modified(D, "2-Amino-2-deoxy", "gluco")),
    ("AnLRDM", modified(D, "2-Acetamido-2-deoxy", "gluco")),
    ("AaLLDM", modified(D, "2-Amino-2-deoxy", "galacto")),
    ("AnLLDM", modified(D, "2-Acetamido-2-deoxy", "galacto")),
    ("AfLRDM", modified(D, "2-Deoxy-2-fluoro", "gluco")),
    ("ARLRDc", plain(D, "glucurono")),
    ("ARLLDc", plain(D, "galacturono")),
    ("ALLRDc", plain(D, "mannurono")),
    // Ketoses
    ("MKDM", plain(D, "erythrulo")),
    ("MKRDM", plain(D, "ribulo")),
    ("MKLDM", plain(D, "xylulo")),
    ("MKRRDM", plain(D, "psico")),
    ("MKLRDM", plain(D, "fructo")),
    ("MKRLDM", plain(D, "sorbo")),
    ("MKLLDM", plain(D, "tagato")),
    ("MKRLLM", plain(L, "fructo")),
    ("MKLRLM", plain(L, "sorbo")),
];

/// Returns the name for a code body, if it is a known sugar.
pub fn lookup(body: &str) -> Option<&'static SugarName> {
    NAMES
        .iter()
        .find(|(code, _)| *code == body)
        .map(|(_, name)| name)
}

fn capitalized(stem: &str) -> String {
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Builds the display title for one ring form.
pub fn title(body: &str, config: Config, anomer: Anomer, ring_type: RingType) -> String {
    let suffix = ring_type.suffix();
    match lookup(body) {
        Some(SugarName {
            config,
            modifier: Some(modifier),
            stem,
        }) => format!("{}-{}-{}-{}{}", modifier, anomer, config, stem, suffix),
        Some(SugarName { config, stem, .. }) => {
            format!("{}-{}-{}{}", anomer, config, capitalized(stem), suffix)
        }
        None => format!("{}-{}-{}-{}", anomer, config, body, suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_known_sugars() {
        assert_eq!(
            title("ARLRDM", Config::D, Anomer::Alpha, RingType::Pyranose),
            "alpha-D-Glucopyranose"
        );
        assert_eq!(
            title("MKLRDM", Config::D, Anomer::Beta, RingType::Furanose),
            "beta-D-Fructofuranose"
        );
        assert_eq!(
            title("ALRRLd", Config::L, Anomer::Alpha, RingType::Pyranose),
            "alpha-L-Fucopyranose"
        );
    }

    #[test]
    fn falls_back_to_code_for_unknown_bodies() {
        assert_eq!(
            title("ARRRRDM", Config::D, Anomer::Beta, RingType::Pyranose),
            "beta-D-ARRRRDM-pyranose"
        );
    }

    #[test]
    fn modifiers_precede_anomer_and_series() {
        assert_eq!(
            title("AdRDM", Config::D, Anomer::Alpha, RingType::Furanose),
            "2-Deoxy-alpha-D-ribofuranose"
        );
        assert_eq!(
            title("AnLRDM", Config::D, Anomer::Beta, RingType::Pyranose),
            "2-Acetamido-2-deoxy-beta-D-glucopyranose"
        );
    }

    #[test]
    fn ketose_stems_match_their_carbon_count() {
        let expected = [
            ("erythrulo", 4),
            ("ribulo", 5),
            ("xylulo", 5),
            ("psico", 6),
            ("fructo", 6),
            ("sorbo", 6),
            ("tagato", 6),
        ];
        let mut seen = 0;
        for (body, name) in NAMES.iter().filter(|(body, _)| body.starts_with("MK")) {
            let (_, carbons) = expected
                .iter()
                .find(|(stem, _)| *stem == name.stem)
                .unwrap_or_else(|| panic!("unexpected ketose stem {}", name.stem));
            assert_eq!(body.len(), *carbons, "{body}");
            seen += 1;
        }
        assert_eq!(seen, 9);
        assert_eq!(
            title("MKRDM", Config::D, Anomer::Beta, RingType::Furanose),
            "beta-D-Ribulofuranose"
        );
        assert_eq!(
            title("MKLDM", Config::D, Anomer::Alpha, RingType::Furanose),
            "alpha-D-Xylulofuranose"
        );
    }

    #[test]
    fn name_series_matches_config_letter() {
        for (body, name) in NAMES {
            let letter = body.chars().rev().nth(1).unwrap();
            let expected = match name.config {
                Config::D => 'D',
                Config::L => 'L',
            };
            assert_eq!(letter, expected, "{body}");
        }
    }

    #[test]
    fn name_bodies_are_unique() {
        for (i, (a, _)) in NAMES.iter().enumerate() {
            for (b, _) in &NAMES[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
