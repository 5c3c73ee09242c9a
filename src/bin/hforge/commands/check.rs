use anyhow::{Result, bail};

use haworth_forge::draw;

use crate::cli::CheckArgs;
use crate::config::{build_render_config, describe};
use crate::display::{CheckRow, Context as DisplayContext, Progress, print_check_results};
use crate::io::collect_jobs;
use crate::util::text::count;

const TOTAL_STEPS: u8 = 2;

pub fn run_check(args: CheckArgs, ctx: DisplayContext) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading requests");
    let jobs = collect_jobs(&args.input)?;
    let config = build_render_config(&args.style)?;

    let mut read_substeps = vec![count(jobs.len(), "request")];
    read_substeps.extend(describe(&config, args.style.style.is_some()));
    let read_substeps_ref: Vec<&str> = read_substeps.iter().map(|s| s.as_str()).collect();
    progress.complete_step("Reading requests", &read_substeps_ref);

    progress.step("Checking diagrams");
    let rows: Vec<CheckRow> = jobs
        .iter()
        .enumerate()
        .map(|(i, job)| {
            progress.tick(&format!("{}/{} {}", i + 1, jobs.len(), job.code));
            CheckRow {
                line: job.line,
                request: job.describe(),
                result: draw(&job.code, job.ring_type, job.anomer, &config)
                    .map(|d| d.ops.len())
                    .map_err(|e| e.to_string()),
            }
        })
        .collect();

    let failed = rows.iter().filter(|r| r.result.is_err()).count();
    let passed = rows.len() - failed;
    let substeps = [
        format!("{} passed", count(passed, "request")),
        format!("{} failed", count(failed, "request")),
    ];
    let substeps_ref: Vec<&str> = substeps.iter().map(|s| s.as_str()).collect();
    progress.complete_step("Checking diagrams", &substeps_ref);

    if ctx.interactive {
        print_check_results(&rows);
    }

    if failed > 0 {
        let first = rows
            .iter()
            .find_map(|r| r.result.as_ref().err().map(|e| (r.request.as_str(), e)));
        match first {
            Some((request, reason)) => bail!(
                "{} of {} failed; first: {}: {}",
                failed,
                count(rows.len(), "request"),
                request,
                reason
            ),
            None => bail!("{} of {} failed", failed, count(rows.len(), "request")),
        }
    }

    progress.finish(&format!("All {} passed", count(rows.len(), "request")));

    Ok(())
}
