use std::io::{self, Write};

use anyhow::Error;

use haworth_forge::{
    ChemistryError, GeometryError, HaworthError, OverlapError, ParseError, ParseErrorKind,
    StyleError,
};

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    let msg = err.to_string();
    for line in wrap(&msg, 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    for cause in err.chain().skip(1) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
    }

    if let Some(hints) = HintCollector::collect(err) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn new() -> Self {
        Self {
            hints: Vec::new(),
            has_typed_hints: false,
        }
    }

    fn collect(err: &Error) -> Option<Vec<String>> {
        let mut collector = Self::new();

        collector.collect_io_hints(err);
        collector.collect_pipeline_hints(err);

        if !collector.has_typed_hints {
            collector.collect_fallback_hints(err);
        }

        if collector.hints.is_empty() {
            None
        } else {
            Some(collector.hints)
        }
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn mark_typed(&mut self) {
        self.has_typed_hints = true;
    }

    fn collect_io_hints(&mut self, err: &Error) {
        use haworth_forge::io::error::Error as IoError;

        if let Some(source) = err.downcast_ref::<std::io::Error>() {
            self.mark_typed();
            self.collect_std_io_hints(source);
            return;
        }

        let Some(io_err) = err.downcast_ref::<IoError>() else {
            return;
        };

        self.mark_typed();

        match io_err {
            IoError::Io { source } => self.collect_std_io_hints(source),

            IoError::Parse { format, line, .. } => {
                self.add(format!("Check line {} of the {}", line, format));
                self.add("Each line is `CODE [RING] [ANOMER]`, e.g. `ARLRDM pyranose beta`");
                self.add("RING is pyranose/furanose (p/f); ANOMER is alpha/beta (a/b)");
            }

            IoError::Json(_) => {
                self.add("Failed to encode the result as JSON");
                self.add("Check that the output target is writable");
            }
        }
    }

    fn collect_std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("A batch or style file path does not exist");
            }
            ErrorKind::PermissionDenied => {
                self.add("Cannot access the batch, style or output file");
                self.add("Check read permission on inputs and write permission on -o");
            }
            ErrorKind::InvalidData => {
                self.add("Batch and style files must be UTF-8 text");
            }
            ErrorKind::BrokenPipe => {
                self.add("The reader on stdout exited early (e.g. `| head`)");
            }
            _ => {
                self.add("Check the file paths and free disk space");
            }
        }
    }

    fn collect_pipeline_hints(&mut self, err: &Error) {
        if let Some(haworth_err) = err.downcast_ref::<HaworthError>() {
            self.mark_typed();
            match haworth_err {
                HaworthError::Parse(e) => self.collect_parse_hints(e),
                HaworthError::Chemistry(e) => self.collect_chemistry_hints(e),
                HaworthError::Geometry(e) => self.collect_geometry_hints(e),
                HaworthError::Style(e) => self.collect_style_hints(e),
                HaworthError::Illegal { violations } => self.collect_overlap_hints(violations),
            }
            return;
        }

        if let Some(e) = err.downcast_ref::<ParseError>() {
            self.mark_typed();
            self.collect_parse_hints(e);
        } else if let Some(e) = err.downcast_ref::<ChemistryError>() {
            self.mark_typed();
            self.collect_chemistry_hints(e);
        } else if let Some(e) = err.downcast_ref::<StyleError>() {
            self.mark_typed();
            self.collect_style_hints(e);
        }
    }

    fn collect_parse_hints(&mut self, err: &ParseError) {
        self.add(format!(
            "The code is rejected at character index {}",
            err.position
        ));

        match &err.reason {
            ParseErrorKind::Empty | ParseErrorKind::Whitespace => {
                self.add("Pass the code without quotes or surrounding spaces");
            }
            ParseErrorKind::UnknownPrefix { .. } => {
                self.add("Codes start with `A` (aldose) or `MK` (ketose)");
            }
            ParseErrorKind::UnknownLetter { .. } | ParseErrorKind::UnexpectedChar { .. } => {
                self.add("Body letters are R/L stereocenters or d, a, n, p, f, c");
                self.add("Use a digit with a footnote for anything else, e.g. `A1LRDM[1=sulfate]`");
            }
            ParseErrorKind::UndefinedFootnote { .. }
            | ParseErrorKind::MalformedFootnote { .. }
            | ParseErrorKind::DuplicateFootnote { .. }
            | ParseErrorKind::UnclosedFootnoteBlock
            | ParseErrorKind::TrailingText => {
                self.add("Footnotes are written `[digit=name,digit=name]` after the body");
                self.add("Every digit in the body needs exactly one entry");
            }
            ParseErrorKind::MissingConfig | ParseErrorKind::InvalidConfig { .. } => {
                self.add("The second-to-last character must be `D` or `L`");
            }
            ParseErrorKind::MissingTerminal | ParseErrorKind::InvalidTerminal { .. } => {
                self.add("The last character must be `M`, a modification letter, or a digit");
            }
            ParseErrorKind::TooManyCarbons { max, .. } => {
                self.add(format!("Bodies may describe at most {} carbons", max));
            }
            ParseErrorKind::LengthMismatch { .. } => {
                self.add("The body length does not match the expected carbon count");
            }
        }
    }

    fn collect_chemistry_hints(&mut self, err: &ChemistryError) {
        match err {
            ChemistryError::NotHaworthEligible { ring_type, .. } => {
                self.add(format!(
                    "The sugar has no free hydroxyl where a {} ring would close",
                    ring_type
                ));
                self.add("Try the other ring size with --ring");
                self.add("Trioses form neither ring; aldotetroses only close as furanoses");
            }
            ChemistryError::UnsupportedCombination { .. } => {
                self.add("Only A and MK prefixes with pyranose or furanose rings are supported");
            }
        }
    }

    fn collect_geometry_hints(&mut self, err: &GeometryError) {
        match err {
            GeometryError::InvalidParameter { .. } => {
                self.add("Bond length and font size must be positive and finite");
            }
            GeometryError::InvalidStyle(_) => {
                self.add("Fix the value named above in the style file");
            }
            GeometryError::DegenerateBounds { .. } | GeometryError::MissingSlot { .. } => {
                self.add("The renderer produced a degenerate primitive");
                self.add("This may indicate a bug; please report the code if reproducible");
            }
        }
    }

    fn collect_style_hints(&mut self, err: &StyleError) {
        match err {
            StyleError::Parse(_) => {
                self.add("The style file has invalid TOML or an unknown key");
                self.add("Valid tables: [strokes], [colors], [layout], [gate]");
            }
            StyleError::Invalid { field, .. } => {
                self.add(format!("Adjust '{}' in the style file", field));
                self.add("Ratios must be positive; the ladder must strictly increase");
            }
        }
    }

    fn collect_overlap_hints(&mut self, violations: &[OverlapError]) {
        self.add(format!(
            "{} connector(s) reach into a foreign label",
            violations.len()
        ));
        self.add("Increase --bond-length or reduce --font-size");
        self.add("Or add longer rungs to [layout] ladder in a style file");
        self.add("Use `hforge render --epsilon <EPS>` to relax the gate for inspection");
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("terminal") || msg.contains("stdin") {
            self.add("Input appears to be from a terminal");
            self.add("Give a CODE argument, use --batch, or pipe requests to stdin");
            return;
        }

        if msg.contains("no requests") {
            self.add("The input has only blank lines or comments");
        }
    }
}

fn error_chain_text(err: &Error) -> String {
    err.chain()
        .map(|cause| cause.to_string().to_lowercase())
        .collect::<Vec<_>>()
        .join("\n")
}
