use anyhow::{Context, Result};

use haworth_forge::io::{write_json, write_json_lines};
use haworth_forge::{HaworthSpec, generate, parse};

use crate::cli::SpecArgs;
use crate::display::{Context as DisplayContext, Progress, print_spec_summary};
use crate::io::{Job, collect_jobs, create_output};
use crate::util::text::count;

const TOTAL_STEPS: u8 = 2;

pub fn run_spec(args: SpecArgs, ctx: DisplayContext) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Resolving ring forms");
    let jobs = collect_jobs(&args.input)?;
    let specs = jobs
        .iter()
        .map(resolve)
        .collect::<Result<Vec<HaworthSpec>>>()?;

    let substeps = [
        format!("Parse {}", count(jobs.len(), "code")),
        "Apply closure and anomeric rules".to_string(),
    ];
    let substeps_ref: Vec<&str> = substeps.iter().map(|s| s.as_str()).collect();
    progress.complete_step("Resolving ring forms", &substeps_ref);

    if ctx.interactive {
        if let [spec] = specs.as_slice() {
            print_spec_summary(spec);
        }
    }

    progress.step("Writing output");
    let writer = create_output(args.output.output.as_deref())?;
    match specs.as_slice() {
        [spec] => write_json(writer, spec, args.output.pretty),
        _ => write_json_lines(writer, &specs),
    }
    .context("Failed to write specs")?;
    progress.complete_step("Writing output", &[]);

    progress.finish(&format!("Resolved {}", count(specs.len(), "ring form")));

    Ok(())
}

fn resolve(job: &Job) -> Result<HaworthSpec> {
    let parsed = parse(&job.code)
        .with_context(|| format!("Invalid sugar code '{}' (line {})", job.code, job.line))?;
    generate(&parsed, job.ring_type, job.anomer)
        .with_context(|| format!("Cannot resolve {} (line {})", job.describe(), job.line))
}
