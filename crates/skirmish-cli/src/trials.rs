//! Trial bookkeeping and the end-of-run summary

use serde::Serialize;
use skirmish_core::{Color, GameResult};
use std::fmt;
use std::time::Duration;

/// Outcome and wall time of one game
#[derive(Debug, Clone, Serialize)]
pub struct TrialRecord {
    pub trial: u32,
    /// `None` when the game was abandoned
    pub result: Option<GameResult>,
    pub seconds: f64,
}

impl TrialRecord {
    pub fn new(trial: u32, result: Option<GameResult>, duration: Duration) -> Self {
        Self {
            trial,
            result,
            seconds: duration.as_secs_f64(),
        }
    }

    fn label(&self) -> &'static str {
        match self.result {
            Some(GameResult::Winner(Color::White)) => "White",
            Some(GameResult::Winner(Color::Black)) => "Black",
            Some(GameResult::Draw) => "Draw",
            None => "Aborted",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Tally {
    pub count: usize,
    pub percent: f64,
}

impl Tally {
    fn of(count: usize, total: usize) -> Self {
        let percent = if total == 0 {
            0.0
        } else {
            100.0 * count as f64 / total as f64
        };
        Self { count, percent }
    }
}

/// Aggregate over every trial of a run
#[derive(Debug, Clone, Serialize)]
pub struct TrialSummary {
    pub trials: usize,
    pub white: Tally,
    pub black: Tally,
    pub draw: Tally,
    pub aborted: Tally,
    pub average_seconds: f64,
    pub details: Vec<TrialRecord>,
}

impl TrialSummary {
    pub fn new(details: Vec<TrialRecord>) -> Self {
        let trials = details.len();
        let count = |want: Option<GameResult>| details.iter().filter(|r| r.result == want).count();

        let average_seconds = if trials == 0 {
            0.0
        } else {
            details.iter().map(|r| r.seconds).sum::<f64>() / trials as f64
        };

        Self {
            trials,
            white: Tally::of(count(Some(GameResult::Winner(Color::White))), trials),
            black: Tally::of(count(Some(GameResult::Winner(Color::Black))), trials),
            draw: Tally::of(count(Some(GameResult::Draw)), trials),
            aborted: Tally::of(count(None), trials),
            average_seconds,
            details,
        }
    }
}

/// Human-readable report
impl fmt::Display for TrialSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "--- Trial results ---")?;
        writeln!(f, "Totals:")?;
        for (label, tally) in [
            ("White:  ", self.white),
            ("Black:  ", self.black),
            ("Draw:   ", self.draw),
        ] {
            writeln!(f, "    {}{}\t({:.2}%)", label, tally.count, tally.percent)?;
        }
        if self.aborted.count > 0 {
            writeln!(f, "    Aborted: {}\t({:.2}%)", self.aborted.count, self.aborted.percent)?;
        }
        writeln!(f)?;
        writeln!(f, "Average game time: {:.2}s", self.average_seconds)?;
        writeln!(f)?;
        writeln!(f, "Detailed results:")?;
        for record in &self.details {
            writeln!(
                f,
                "    Trial #{}: {}\t({:.2}s)",
                record.trial,
                record.label(),
                record.seconds
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(trial: u32, result: Option<GameResult>, millis: u64) -> TrialRecord {
        TrialRecord::new(trial, result, Duration::from_millis(millis))
    }

    fn sample() -> TrialSummary {
        TrialSummary::new(vec![
            record(1, Some(GameResult::Winner(Color::White)), 1000),
            record(2, Some(GameResult::Winner(Color::White)), 2000),
            record(3, Some(GameResult::Draw), 3000),
            record(4, None, 2000),
        ])
    }

    #[test]
    fn test_totals() {
        let summary = sample();
        assert_eq!(summary.trials, 4);
        assert_eq!(summary.white, Tally { count: 2, percent: 50.0 });
        assert_eq!(summary.black, Tally { count: 0, percent: 0.0 });
        assert_eq!(summary.draw.count, 1);
        assert_eq!(summary.aborted.count, 1);
        assert!((summary.average_seconds - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_render() {
        let text = sample().to_string();
        assert!(text.contains("--- Trial results ---"));
        assert!(text.contains("    White:  2\t(50.00%)"));
        assert!(text.contains("    Aborted: 1\t(25.00%)"));
        assert!(text.contains("Average game time: 2.00s"));
        assert!(text.contains("    Trial #3: Draw\t(3.00s)"));
        assert!(text.contains("    Trial #4: Aborted\t(2.00s)"));
    }

    #[test]
    fn test_render_hides_empty_aborted() {
        let summary = TrialSummary::new(vec![record(1, Some(GameResult::Winner(Color::Black)), 500)]);
        assert!(!summary.to_string().contains("Aborted"));
    }

    #[test]
    fn test_json() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["trials"], 4);
        assert_eq!(value["white"]["count"], 2);
        assert_eq!(value["details"][0]["result"]["Winner"], "White");
        assert_eq!(value["details"][2]["result"], "Draw");
        assert!(value["details"][3]["result"].is_null());
    }

    #[test]
    fn test_empty_run() {
        let summary = TrialSummary::new(Vec::new());
        assert_eq!(summary.average_seconds, 0.0);
        assert_eq!(summary.white.percent, 0.0);
    }
}
