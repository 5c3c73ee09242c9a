use anyhow::{Context, Result, bail};

use haworth_forge::io::{Request, read_requests};
use haworth_forge::{Anomer, RingType};

use super::{open_input, stdin_is_tty};
use crate::cli::InputOptions;

/// One request with its ring type and anomer resolved.
#[derive(Debug, Clone)]
pub struct Job {
    pub line: usize,
    pub code: String,
    pub ring_type: RingType,
    pub anomer: Anomer,
}

impl Job {
    pub fn describe(&self) -> String {
        format!("{} ({}, {})", self.code, self.ring_type, self.anomer)
    }
}

/// Gathers jobs from the positional code, a batch file, or stdin.
pub fn collect_jobs(input: &InputOptions) -> Result<Vec<Job>> {
    let requests = match (&input.code, &input.batch) {
        (Some(code), _) => vec![Request {
            line: 1,
            code: code.clone(),
            ring_type: None,
            anomer: None,
        }],
        (None, Some(path)) => {
            let reader = open_input(Some(path))?;
            read_requests(reader)
                .with_context(|| format!("Failed to read batch file: {}", path.display()))?
        }
        (None, None) => {
            if stdin_is_tty() {
                bail!(
                    "No sugar code given and stdin is a terminal.\n\nUsage: hforge <COMMAND> <CODE>, --batch <FILE>, or pipe requests via stdin."
                );
            }
            let reader = open_input(None)?;
            read_requests(reader).context("Failed to read requests from stdin")?
        }
    };

    if requests.is_empty() {
        bail!("Input contains no requests");
    }

    let ring_type = RingType::from(input.ring);
    let anomer = Anomer::from(input.anomer);

    Ok(requests
        .into_iter()
        .map(|request| {
            let (ring_type, anomer) = request.resolve(ring_type, anomer);
            Job {
                line: request.line,
                code: request.code,
                ring_type,
                anomer,
            }
        })
        .collect())
}
