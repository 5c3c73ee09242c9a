use std::io::{self, Write};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";
const RULE_WIDTH: usize = 56;

/// Numbered steps on stderr with a spinner for the running one.
///
/// A non-interactive tracker accepts the same calls and prints nothing, so
/// commands never branch on the terminal themselves.
pub struct Progress {
    interactive: bool,
    spinner: Option<ProgressBar>,
    step: u8,
    total_steps: u8,
    started: Instant,
    step_started: Instant,
}

impl Progress {
    pub fn new(interactive: bool, total_steps: u8) -> Self {
        let now = Instant::now();
        Self {
            interactive,
            spinner: None,
            step: 0,
            total_steps,
            started: now,
            step_started: now,
        }
    }

    fn counter(&self) -> String {
        format!("[{}/{}]", self.step, self.total_steps)
    }

    pub fn step(&mut self, description: &str) {
        if !self.interactive {
            return;
        }
        self.clear_spinner();
        self.step += 1;
        self.step_started = Instant::now();

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
            spinner.set_style(style.tick_chars(TICK_CHARS));
        }
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner.set_message(format!("{} {}...", self.counter(), description));
        self.spinner = Some(spinner);
    }

    /// Replaces the spinner message with per-request detail, e.g. `12/80 ARLRDM`.
    pub fn tick(&mut self, detail: &str) {
        if let Some(spinner) = &self.spinner {
            spinner.set_message(format!("{} {}", self.counter(), detail));
        }
    }

    /// Prints a finished step line with its elapsed time and any notes below it.
    pub fn complete_step(&mut self, description: &str, notes: &[&str]) {
        if !self.interactive {
            return;
        }
        self.clear_spinner();

        let mut stderr = io::stderr().lock();
        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m {:<44} {:>5.1}s",
            description,
            self.step_started.elapsed().as_secs_f64()
        );
        for note in notes {
            let _ = writeln!(stderr, "      \x1b[2m·\x1b[0m {}", note);
        }
    }

    pub fn finish(mut self, summary: &str) {
        if !self.interactive {
            return;
        }
        self.clear_spinner();

        let total = format!("Total: {:.2}s", self.started.elapsed().as_secs_f64());
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr);
        let _ = writeln!(stderr, "  \x1b[2m╺{}╸\x1b[0m", "━".repeat(RULE_WIDTH));
        let _ = writeln!(stderr, "  \x1b[32m✓\x1b[0m {:<30} {:>20}", summary, total);
        let _ = writeln!(stderr);
    }

    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_tracker_never_starts_a_spinner() {
        let mut progress = Progress::new(false, 2);
        progress.step("Reading requests");
        progress.tick("1/1 ARLRDM");
        progress.complete_step("Reading requests", &["1 request"]);
        assert!(progress.spinner.is_none());
        assert_eq!(progress.counter(), "[0/2]");
        progress.finish("done");
    }

    #[test]
    fn steps_advance_the_counter() {
        let mut progress = Progress::new(true, 3);
        progress.step("Parsing");
        assert_eq!(progress.counter(), "[1/3]");
        progress.complete_step("Parsing", &[]);
        assert!(progress.spinner.is_none());
        progress.step("Drawing");
        assert_eq!(progress.counter(), "[2/3]");
        progress.finish("done");
    }
}
