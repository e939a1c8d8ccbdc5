use crate::domain::model::{
    describe_condition, Expectation, Outcome, OutcomeCount, TestReport, Verdict,
};
use crate::domain::ports::LitmusTest;
use crate::utils::error::{LitmusError, Result};
use std::collections::HashMap;
use std::time::Instant;

pub fn classify(observed: bool, lkmm: Expectation, rust: Expectation) -> Verdict {
    match (observed, rust, lkmm) {
        (false, _, _) => Verdict::Never,
        (true, Expectation::Never, _) => Verdict::Violation,
        (true, Expectation::Sometimes, Expectation::Never) => Verdict::Divergent,
        (true, Expectation::Sometimes, Expectation::Sometimes) => Verdict::Sometimes,
    }
}

/// Runs `test` `iterations` times and summarises the final states.
pub fn run_litmus(test: &dyn LitmusTest, iterations: u64) -> Result<TestReport> {
    let condition = test.condition();
    let mut histogram: HashMap<Outcome, u64> = HashMap::new();
    let started = Instant::now();

    for _ in 0..iterations {
        let outcome = test.run_once().map_err(|e| LitmusError::TestFailed {
            test: test.name().to_string(),
            message: e.to_string(),
        })?;
        *histogram.entry(outcome).or_insert(0) += 1;
    }

    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    let mut states: Vec<OutcomeCount> = histogram
        .into_iter()
        .map(|(outcome, count)| OutcomeCount {
            positive: outcome.satisfies(condition),
            outcome,
            count,
        })
        .collect();
    states.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.outcome.cmp(&b.outcome)));

    let positives: u64 = states.iter().filter(|s| s.positive).map(|s| s.count).sum();
    let verdict = classify(positives > 0, test.lkmm(), test.rust());

    match verdict {
        Verdict::Violation => tracing::warn!(
            test = test.name(),
            positives,
            "❌ outcome forbidden by the Rust model was observed"
        ),
        Verdict::Divergent => tracing::warn!(
            test = test.name(),
            positives,
            "⚠️ outcome forbidden by the LKMM was observed"
        ),
        _ => tracing::debug!(
            test = test.name(),
            positives,
            states = states.len(),
            "{} in {:.1}ms",
            verdict,
            elapsed_ms
        ),
    }

    Ok(TestReport {
        name: test.name().to_string(),
        family: test.family(),
        dependency: test.dependency(),
        condition: describe_condition(condition),
        lkmm: test.lkmm(),
        rust: test.rust(),
        iterations,
        positives,
        negatives: iterations - positives,
        histogram: states,
        verdict,
        elapsed_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Condition, Family, Location};
    use std::sync::atomic::{AtomicU64, Ordering};

    const SCRIPTED_EXISTS: Condition = &[(Location::reg(0, "r0"), 0)];

    /// Alternates between a positive and a negative outcome.
    struct Scripted {
        calls: AtomicU64,
        rust: Expectation,
        lkmm: Expectation,
        fail_at: Option<u64>,
    }

    impl Scripted {
        fn new(lkmm: Expectation, rust: Expectation) -> Self {
            Self {
                calls: AtomicU64::new(0),
                rust,
                lkmm,
                fail_at: None,
            }
        }
    }

    impl LitmusTest for Scripted {
        fn name(&self) -> &str {
            "Scripted"
        }

        fn family(&self) -> Family {
            Family::StoreBuffering
        }

        fn description(&self) -> &str {
            "alternating outcomes"
        }

        fn lkmm(&self) -> Expectation {
            self.lkmm
        }

        fn rust(&self) -> Expectation {
            self.rust
        }

        fn condition(&self) -> Condition {
            SCRIPTED_EXISTS
        }

        fn run_once(&self) -> Result<Outcome> {
            let n = self.calls.fetch_add(1, Ordering::Relaxed);
            if Some(n) == self.fail_at {
                return Err(LitmusError::ThreadPanicked { thread: 1 });
            }
            Ok(Outcome::new().with_reg(0, "r0", (n % 2) as i32))
        }
    }

    #[test]
    fn test_classify() {
        use Expectation::*;
        assert_eq!(classify(false, Never, Never), Verdict::Never);
        assert_eq!(classify(false, Never, Sometimes), Verdict::Never);
        assert_eq!(classify(true, Sometimes, Sometimes), Verdict::Sometimes);
        assert_eq!(classify(true, Never, Sometimes), Verdict::Divergent);
        assert_eq!(classify(true, Never, Never), Verdict::Violation);
        assert_eq!(classify(true, Sometimes, Never), Verdict::Violation);
    }

    #[test]
    fn test_histogram_counts_add_up() {
        let test = Scripted::new(Expectation::Sometimes, Expectation::Sometimes);
        let report = run_litmus(&test, 101).unwrap();

        assert_eq!(report.iterations, 101);
        assert_eq!(report.positives, 51);
        assert_eq!(report.negatives, 50);
        assert_eq!(report.histogram.len(), 2);
        assert_eq!(report.histogram.iter().map(|s| s.count).sum::<u64>(), 101);
        assert_eq!(report.histogram[0].count, 51);
        assert!(report.histogram[0].positive);
        assert_eq!(report.verdict, Verdict::Sometimes);
        assert_eq!(report.condition, "exists (0:r0=0)");
    }

    #[test]
    fn test_forbidden_observation_is_violation() {
        let test = Scripted::new(Expectation::Never, Expectation::Never);
        let report = run_litmus(&test, 4).unwrap();
        assert_eq!(report.verdict, Verdict::Violation);
    }

    #[test]
    fn test_body_error_names_the_test() {
        let mut test = Scripted::new(Expectation::Never, Expectation::Never);
        test.fail_at = Some(3);
        let err = run_litmus(&test, 10).unwrap_err();
        match err {
            LitmusError::TestFailed { test, message } => {
                assert_eq!(test, "Scripted");
                assert!(message.contains("P1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_iterations_never_observes() {
        let test = Scripted::new(Expectation::Never, Expectation::Never);
        let report = run_litmus(&test, 0).unwrap();
        assert_eq!(report.verdict, Verdict::Never);
        assert!(report.histogram.is_empty());
    }
}
