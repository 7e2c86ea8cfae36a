//! Scripted pipeline driven by the `peeklog` binary.
//!
//! Exercises every kind of output once so the effect of `--verbosity` and `--style` can be
//! seen at a glance.

use crate::model::ScopeError;
use crate::tracker::ScopeTracker;

const SOURCES: [&str; 5] = ["users.csv", "orders.csv", "items.csv", "regions.csv", "rates.csv"];

/// Run the demo pipeline. Leaves the tracker at the level it started from.
///
/// # Errors
///
/// Returns [`ScopeError`] if the sink fails.
pub fn run(log: &mut ScopeTracker) -> Result<(), ScopeError> {
    log.up("Pipeline")?;

    load(log)?;
    transform(log)?;
    summarize(log)?;

    log.down(Some("pipeline done"))
}

fn load(log: &mut ScopeTracker) -> Result<(), ScopeError> {
    log.up("Load sources")?;
    log.itemize("sources", SOURCES, 50)?;
    for source in SOURCES {
        log.up(&format!("read {source}"))?;
        log.log(&format!("{} bytes", source.len() * 1024))?;
        log.down(None)?;
    }
    log.down(Some(&format!("{} files", SOURCES.len())))
}

fn transform(log: &mut ScopeTracker) -> Result<(), ScopeError> {
    let mut step = log.scope("Transform")?;

    {
        let mut bar = step.progress("rows", 30)?;
        for done in 1..=10 {
            bar.update(f64::from(done) / 10.0)?;
        }
    }

    // Timed, but no opener or closer is drawn.
    step.up_skipped("normalize")?;
    step.log("normalizing currencies")?;
    step.down_skipped()?;

    step.warning("2 rows without region, defaulting to 'unknown'")?;
    step.finish(Some("transformed"))
}

fn summarize(log: &mut ScopeTracker) -> Result<(), ScopeError> {
    // Always show the summary in full, whatever the caller's threshold.
    log.scoped_verbosity(2, |log| {
        log.up("Summary")?;
        log.hline(Some("totals"))?;
        let mut table = log.table("orders", &["region", "orders", "revenue"])?;
        table.add_row(["north", "1204", "18.3k"])?;
        table.add_row(["south", "877", "12.9k"])?;
        table.add_row(["unknown", "2", "0.1k"])?;
        table.close()?;
        drop(table);
        log.down(None)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::CaptureBuffer;
    use crate::tracker::TrackerOptions;

    fn run_at(verbosity: i32) -> (ScopeTracker, CaptureBuffer) {
        let buffer = CaptureBuffer::new();
        let options = TrackerOptions {
            verbosity,
            history: true,
            ..TrackerOptions::default()
        };
        let mut tracker = ScopeTracker::with_options(buffer.sink(), options);
        run(&mut tracker).expect("demo runs");
        (tracker, buffer)
    }

    #[test]
    fn demo_is_balanced() {
        for verbosity in -1..=4 {
            let (tracker, _buffer) = run_at(verbosity);
            assert_eq!(tracker.level(), 0, "verbosity {verbosity}");
            assert_eq!(tracker.verbosity(), verbosity);
        }
    }

    #[test]
    fn low_verbosity_shows_only_the_pipeline_line() {
        let (_tracker, buffer) = run_at(0);

        let lines = buffer.lines();

        assert!(lines[0].starts_with(" Pipeline..."), "{lines:?}");
        assert!(lines.iter().any(|l| l.contains("2 rows without region")));
        assert!(lines.last().unwrap().contains("pipeline done"));
        assert!(!buffer.contents().contains("read users.csv"));
    }

    #[test]
    fn high_verbosity_shows_nested_reads() {
        let (_tracker, buffer) = run_at(3);

        let contents = buffer.contents();

        assert!(contents.contains("read users.csv"));
        assert!(contents.contains("• sources: ["));
        assert!(contents.contains("normalizing currencies"));
        assert!(buffer
            .lines()
            .iter()
            .filter(|line| line.contains("normalize"))
            .all(|line| line.contains("normalizing")));
    }

    #[test]
    fn history_covers_skipped_steps() {
        let (tracker, _buffer) = run_at(0);

        assert_eq!(tracker.history().get("read orders.csv").map(|e| e.calls), Some(1));
        assert!(tracker.history().get("normalize").is_some());
    }
}
