use anyhow::{Context, Result};

use haworth_forge::io::{write_json, write_json_lines};
use haworth_forge::{Diagram, draw};

use crate::cli::RenderArgs;
use crate::config::{build_render_config, describe};
use crate::display::{Context as DisplayContext, Progress, print_diagram_summary};
use crate::io::{collect_jobs, create_output};
use crate::util::text::count;

const TOTAL_STEPS: u8 = 3;

pub fn run_render(args: RenderArgs, ctx: DisplayContext) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading requests");
    let jobs = collect_jobs(&args.input)?;
    let config = build_render_config(&args.style)?;

    let mut read_substeps = vec![count(jobs.len(), "request")];
    read_substeps.extend(describe(&config, args.style.style.is_some()));
    let read_substeps_ref: Vec<&str> = read_substeps.iter().map(|s| s.as_str()).collect();
    progress.complete_step("Reading requests", &read_substeps_ref);

    progress.step("Rendering diagrams");
    let mut diagrams = Vec::with_capacity(jobs.len());
    for (i, job) in jobs.iter().enumerate() {
        progress.tick(&format!("{}/{} {}", i + 1, jobs.len(), job.code));
        let diagram = draw(&job.code, job.ring_type, job.anomer, &config).with_context(|| {
            format!("Failed to render {} (line {})", job.describe(), job.line)
        })?;
        diagrams.push(diagram);
    }

    let op_total: usize = diagrams.iter().map(|d| d.ops.len()).sum();
    let render_substeps = [
        format!("Resolve {}", count(diagrams.len(), "ring form")),
        format!("Lay out {}", count(op_total, "op")),
        "Pass the legality gate".to_string(),
    ];
    let render_substeps_ref: Vec<&str> = render_substeps.iter().map(|s| s.as_str()).collect();
    progress.complete_step("Rendering diagrams", &render_substeps_ref);

    if ctx.interactive {
        if let [diagram] = diagrams.as_slice() {
            print_diagram_summary(diagram);
        }
    }

    progress.step("Writing output");
    write_diagrams(&diagrams, &args)?;

    let target = args
        .output
        .output
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());
    let write_substep = format!("Write JSON → {}", target);
    progress.complete_step("Writing output", &[write_substep.as_str()]);

    progress.finish(&format!("Rendered {}", count(diagrams.len(), "diagram")));

    Ok(())
}

/// One document for a single diagram, JSON lines for a batch.
fn write_diagrams(diagrams: &[Diagram], args: &RenderArgs) -> Result<()> {
    let writer = create_output(args.output.output.as_deref())?;

    match (diagrams, args.ops_only) {
        ([diagram], true) => write_json(writer, &diagram.ops, args.output.pretty),
        ([diagram], false) => write_json(writer, diagram, args.output.pretty),
        (_, true) => write_json_lines(writer, diagrams.iter().map(|d| &d.ops)),
        (_, false) => write_json_lines(writer, diagrams),
    }
    .context("Failed to write diagrams")
}
