//! Output formatting for solver results

use crate::executor::PartResult;
use chrono::TimeDelta;
use std::io::{self, Stderr, Stdout, Write};
use std::time::{Duration, Instant};

/// Prints results as they arrive and tallies them for the summary
///
/// Answers and the summary go to `out`, failures to `err`.
pub struct Reporter<O, E> {
    out: O,
    err: E,
    quiet: bool,
    start_time: Instant,
    current_day: Option<(u16, u8)>,
    solved: usize,
    failed: usize,
    total_parse_time: TimeDelta,
    total_solve_time: TimeDelta,
}

impl Reporter<Stdout, Stderr> {
    /// Reporter writing to stdout and stderr
    pub fn stdio(quiet: bool) -> Self {
        Self::new(io::stdout(), io::stderr(), quiet)
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(out: O, err: E, quiet: bool) -> Self {
        Self {
            out,
            err,
            quiet,
            start_time: Instant::now(),
            current_day: None,
            solved: 0,
            failed: 0,
            total_parse_time: TimeDelta::zero(),
            total_solve_time: TimeDelta::zero(),
        }
    }

    /// Format and print a single result
    pub fn report(&mut self, result: &PartResult) -> io::Result<()> {
        let day = (result.year, result.day);
        let new_day = self.current_day != Some(day);
        if new_day {
            self.current_day = Some(day);
            if let Some(parse) = result.parse_duration {
                self.total_parse_time += parse;
            }
        }

        match &result.answer {
            Ok(_) => self.solved += 1,
            Err(_) => self.failed += 1,
        }
        if let Some(solve) = result.solve_duration {
            self.total_solve_time += solve;
        }

        if self.quiet {
            self.print_quiet(result)
        } else {
            if new_day {
                writeln!(self.out, "{}/{:02} {}", result.year, result.day, result.title)?;
            }
            self.print_full(result)
        }
    }

    /// Print in quiet mode (just the answer)
    fn print_quiet(&mut self, result: &PartResult) -> io::Result<()> {
        match &result.answer {
            Ok(answer) => writeln!(self.out, "{}", answer),
            Err(e) => writeln!(self.err, "Error: {}", e),
        }
    }

    /// Print full output with timing
    fn print_full(&mut self, result: &PartResult) -> io::Result<()> {
        match &result.answer {
            Ok(answer) => {
                let parse_timing = result
                    .parse_duration
                    .map(|d| format!("parse: {}, ", format_duration(d)))
                    .unwrap_or_default();
                let solve_timing = result
                    .solve_duration
                    .map(format_duration)
                    .unwrap_or_default();
                writeln!(
                    self.out,
                    "  Part {}: {} ({}solve: {})",
                    result.part, answer, parse_timing, solve_timing
                )
            }
            Err(e) => writeln!(self.err, "  Part {}: Error - {}", result.part, e),
        }
    }

    /// Print a summary after all results
    /// Shows both total compute time and actual elapsed wall-clock time
    pub fn print_summary(&mut self) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        writeln!(self.out)?;
        writeln!(self.out, "--- Summary ---")?;
        writeln!(
            self.out,
            "Parts: {} solved, {} failed",
            self.solved, self.failed
        )?;
        writeln!(
            self.out,
            "Total parse time: {}",
            format_duration(self.total_parse_time)
        )?;
        writeln!(
            self.out,
            "Total solve time: {}",
            format_duration(self.total_solve_time)
        )?;
        writeln!(
            self.out,
            "Elapsed wall-clock time: {}",
            format_std_duration(self.start_time.elapsed())
        )
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn solved(&self) -> usize {
        self.solved
    }

    #[cfg(test)]
    fn into_writers(self) -> (O, E) {
        (self.out, self.err)
    }
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}
