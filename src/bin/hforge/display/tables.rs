use std::collections::BTreeMap;
use std::io::{self, Write};

use haworth_forge::{Diagram, Face, HaworthSpec};

use crate::util::text::truncate;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

pub fn print_spec_summary(spec: &HaworthSpec) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let chain = if spec.exocyclic_chain().is_empty() {
        "none".to_string()
    } else {
        spec.exocyclic_chain()
            .iter()
            .map(|c| format!("C{} {}", c.carbon, c.label))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let rows = vec![
        ("Title", spec.title().to_string()),
        ("Ring", spec.ring_type().to_string()),
        ("Anomer", spec.anomeric().to_string()),
        ("Series", spec.config().to_string()),
        ("Anomeric Carbon", format!("C{}", spec.anomeric_carbon())),
        ("Closure Carbon", format!("C{}", spec.closure_carbon())),
        ("Chain", chain),
    ];

    print_kv_table(&mut out, "Ring Form", &rows);
    print_substituent_table(&mut out, spec);
}

fn print_substituent_table(out: &mut impl Write, spec: &HaworthSpec) {
    let mut carbons: BTreeMap<u8, (String, String)> = BTreeMap::new();
    for (key, label) in spec.substituents() {
        let entry = carbons.entry(key.carbon).or_default();
        match key.face {
            Face::Up => entry.0 = label.clone(),
            Face::Down => entry.1 = label.clone(),
        }
    }

    let carbon_w = 8usize;
    let sep_overhead = 6;
    let face_w = SAFE_TABLE_WIDTH.saturating_sub(carbon_w + sep_overhead + 2) / 2;

    let _ = writeln!(out, "{}┌─ Substituents ─┐", INDENT);
    let _ = writeln!(
        out,
        "{}┌{c_line}┬{f_line}┬{f_line}┐",
        INDENT,
        c_line = "─".repeat(carbon_w + 2),
        f_line = "─".repeat(face_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<carbon_w$} │ {:<face_w$} │ {:<face_w$} │",
        INDENT, "Carbon", "Up", "Down",
    );
    let _ = writeln!(
        out,
        "{}├{c_line}┼{f_line}┼{f_line}┤",
        INDENT,
        c_line = "─".repeat(carbon_w + 2),
        f_line = "─".repeat(face_w + 2)
    );

    for (carbon, (up, down)) in &carbons {
        let _ = writeln!(
            out,
            "{}│ {:<carbon_w$} │ {:<face_w$} │ {:<face_w$} │",
            INDENT,
            format!("C{}", carbon),
            truncate(up, face_w),
            truncate(down, face_w),
        );
    }

    let _ = writeln!(
        out,
        "{}└{c_line}┴{f_line}┴{f_line}┘",
        INDENT,
        c_line = "─".repeat(carbon_w + 2),
        f_line = "─".repeat(face_w + 2)
    );
}

pub fn print_diagram_summary(diagram: &Diagram) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let mut kinds: BTreeMap<&'static str, usize> = BTreeMap::new();
    for op in &diagram.ops {
        *kinds.entry(op.kind()).or_insert(0) += 1;
    }
    let connectors = diagram.ops.iter().filter(|op| op.is_connector()).count();

    let mut rows = vec![
        ("Title", diagram.spec.title().to_string()),
        ("Total Ops", diagram.ops.len().to_string()),
    ];
    for (kind, count) in &kinds {
        rows.push((*kind, count.to_string()));
    }
    rows.push(("Connectors", connectors.to_string()));

    print_kv_table(&mut out, "Diagram", &rows);
}

/// Outcome of one gated request.
pub struct CheckRow {
    pub line: usize,
    pub request: String,
    pub result: Result<usize, String>,
}

pub fn print_check_results(rows: &[CheckRow]) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let line_w = 5usize;
    let status_w = 6usize;
    let sep_overhead = 8;
    let request_w = SAFE_TABLE_WIDTH.saturating_sub(line_w + status_w + sep_overhead);

    let _ = writeln!(out, "{}┌─ Legality Check ─┐", INDENT);
    let _ = writeln!(
        out,
        "{}┌{l_line}┬{r_line}┬{s_line}┐",
        INDENT,
        l_line = "─".repeat(line_w + 2),
        r_line = "─".repeat(request_w + 2),
        s_line = "─".repeat(status_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:>line_w$} │ {:<request_w$} │ {:<status_w$} │",
        INDENT, "Line", "Request", "Status",
    );
    let _ = writeln!(
        out,
        "{}├{l_line}┼{r_line}┼{s_line}┤",
        INDENT,
        l_line = "─".repeat(line_w + 2),
        r_line = "─".repeat(request_w + 2),
        s_line = "─".repeat(status_w + 2)
    );

    for row in rows {
        let status = if row.result.is_ok() { "ok" } else { "FAIL" };
        let _ = writeln!(
            out,
            "{}│ {:>line_w$} │ {:<request_w$} │ {:<status_w$} │",
            INDENT,
            row.line,
            truncate(&row.request, request_w),
            status,
        );
        if let Err(reason) = &row.result {
            let _ = writeln!(
                out,
                "{}│ {:>line_w$} │ {:<request_w$} │ {:<status_w$} │",
                INDENT,
                "",
                truncate(&format!("  {}", reason), request_w),
                "",
            );
        }
    }

    let _ = writeln!(
        out,
        "{}└{l_line}┴{r_line}┴{s_line}┘",
        INDENT,
        l_line = "─".repeat(line_w + 2),
        r_line = "─".repeat(request_w + 2),
        s_line = "─".repeat(status_w + 2)
    );
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{k_line}┬{v_line}┐",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<key_w$} │ {:>val_w$} │",
        INDENT, "Field", "Value",
    );
    let _ = writeln!(
        out,
        "{}├{k_line}┼{v_line}┤",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w),
        );
    }

    let _ = writeln!(
        out,
        "{}└{k_line}┴{v_line}┘",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
}
