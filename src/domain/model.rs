use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A place whose final value is part of a litmus outcome: a register
/// local to one thread (`1:r0`) or a shared variable (`x`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Location {
    Reg { thread: u8, name: &'static str },
    Var(&'static str),
}

impl Location {
    pub const fn reg(thread: u8, name: &'static str) -> Self {
        Location::Reg { thread, name }
    }

    pub const fn var(name: &'static str) -> Self {
        Location::Var(name)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Reg { thread, name } => write!(f, "{}:{}", thread, name),
            Location::Var(name) => f.write_str(name),
        }
    }
}

/// An exists clause: a conjunction of location/value pairs.
pub type Condition = &'static [(Location, i32)];

pub fn describe_condition(condition: Condition) -> String {
    let terms: Vec<String> = condition
        .iter()
        .map(|(location, value)| format!("{}={}", location, value))
        .collect();
    format!("exists ({})", terms.join(" /\\ "))
}

/// Final state of one execution of a litmus test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Outcome {
    values: Vec<(Location, i32)>,
}

impl Outcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reg(mut self, thread: u8, name: &'static str, value: i32) -> Self {
        self.values.push((Location::reg(thread, name), value));
        self
    }

    pub fn with_var(mut self, name: &'static str, value: i32) -> Self {
        self.values.push((Location::var(name), value));
        self
    }

    pub fn get(&self, location: Location) -> Option<i32> {
        self.values
            .iter()
            .find(|(l, _)| *l == location)
            .map(|(_, v)| *v)
    }

    /// A location missing from the outcome never satisfies a term.
    pub fn satisfies(&self, condition: &[(Location, i32)]) -> bool {
        condition
            .iter()
            .all(|(location, value)| self.get(*location) == Some(*value))
    }

}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (location, value) in &self.values {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}={};", location, value)?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The "Result:" line of an LKMM litmus test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Expectation {
    Never,
    Sometimes,
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Never => f.pad("Never"),
            Expectation::Sometimes => f.pad("Sometimes"),
        }
    }
}

/// Shape of a litmus test, used for selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    Coherence,
    MessagePassing,
    StoreBuffering,
    LoadBuffering,
    WriteOrdering,
    Multicopy,
}

impl Family {
    pub const ALL: [Family; 6] = [
        Family::Coherence,
        Family::MessagePassing,
        Family::StoreBuffering,
        Family::LoadBuffering,
        Family::WriteOrdering,
        Family::Multicopy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Coherence => "coherence",
            Family::MessagePassing => "message-passing",
            Family::StoreBuffering => "store-buffering",
            Family::LoadBuffering => "load-buffering",
            Family::WriteOrdering => "write-ordering",
            Family::Multicopy => "multicopy",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFamily(pub String);

impl FromStr for Family {
    type Err = UnknownFamily;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Family::ALL
            .iter()
            .copied()
            .find(|family| family.as_str() == wanted)
            .ok_or(UnknownFamily(s.to_string()))
    }
}

/// Dependency a test relies on for ordering, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dependency {
    Address,
    Control,
    Data,
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dependency::Address => f.write_str("address"),
            Dependency::Control => f.write_str("control"),
            Dependency::Data => f.write_str("data"),
        }
    }
}

/// Classification of an observation against both models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Verdict {
    /// The exists clause was never satisfied.
    Never,
    /// Satisfied, and both models allow it.
    Sometimes,
    /// Satisfied; the Rust model allows it but the LKMM does not.
    Divergent,
    /// Satisfied although the Rust model forbids it.
    Violation,
}

impl Verdict {
    pub fn is_failure(&self, strict_lkmm: bool) -> bool {
        match self {
            Verdict::Violation => true,
            Verdict::Divergent => strict_lkmm,
            Verdict::Never | Verdict::Sometimes => false,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::Never => "Never",
            Verdict::Sometimes => "Sometimes",
            Verdict::Divergent => "Divergent",
            Verdict::Violation => "Violation",
        };
        f.pad(label)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OutcomeCount {
    pub outcome: Outcome,
    pub count: u64,
    pub positive: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TestReport {
    pub name: String,
    pub family: Family,
    pub dependency: Option<Dependency>,
    pub condition: String,
    pub lkmm: Expectation,
    pub rust: Expectation,
    pub iterations: u64,
    pub positives: u64,
    pub negatives: u64,
    pub histogram: Vec<OutcomeCount>,
    pub verdict: Verdict,
    pub elapsed_ms: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VerdictSummary {
    pub never: usize,
    pub sometimes: usize,
    pub divergent: usize,
    pub violation: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub summary: VerdictSummary,
    pub reports: Vec<TestReport>,
    pub artifacts: Vec<String>,
}

impl SuiteReport {
    pub fn new(started_at: DateTime<Utc>, reports: Vec<TestReport>) -> Self {
        let mut summary = VerdictSummary::default();
        for report in &reports {
            match report.verdict {
                Verdict::Never => summary.never += 1,
                Verdict::Sometimes => summary.sometimes += 1,
                Verdict::Divergent => summary.divergent += 1,
                Verdict::Violation => summary.violation += 1,
            }
        }

        Self {
            started_at,
            finished_at: Utc::now(),
            summary,
            reports,
            artifacts: Vec::new(),
        }
    }

    fn names_with(&self, verdict: Verdict) -> Vec<String> {
        self.reports
            .iter()
            .filter(|r| r.verdict == verdict)
            .map(|r| r.name.clone())
            .collect()
    }

    pub fn violations(&self) -> Vec<String> {
        self.names_with(Verdict::Violation)
    }

    pub fn divergences(&self) -> Vec<String> {
        self.names_with(Verdict::Divergent)
    }

    pub fn failures(&self, strict_lkmm: bool) -> Vec<String> {
        self.reports
            .iter()
            .filter(|r| r.verdict.is_failure(strict_lkmm))
            .map(|r| r.name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MP_EXISTS: Condition = &[(Location::reg(1, "r0"), 1), (Location::reg(1, "r1"), 0)];

    #[test]
    fn test_outcome_display_matches_herd_layout() {
        let outcome = Outcome::new().with_reg(1, "r0", 1).with_reg(1, "r1", 0);
        assert_eq!(outcome.to_string(), "1:r0=1; 1:r1=0;");

        let with_var = Outcome::new().with_var("x", 2).with_reg(0, "r0", 2);
        assert_eq!(with_var.to_string(), "x=2; 0:r0=2;");
    }

    #[test]
    fn test_outcome_satisfies_condition() {
        let hit = Outcome::new().with_reg(1, "r0", 1).with_reg(1, "r1", 0);
        let miss = Outcome::new().with_reg(1, "r0", 1).with_reg(1, "r1", 1);
        let partial = Outcome::new().with_reg(1, "r0", 1);

        assert!(hit.satisfies(MP_EXISTS));
        assert!(!miss.satisfies(MP_EXISTS));
        assert!(!partial.satisfies(MP_EXISTS));
    }

    #[test]
    fn test_describe_condition() {
        assert_eq!(describe_condition(MP_EXISTS), "exists (1:r0=1 /\\ 1:r1=0)");
    }

    #[test]
    fn test_family_round_trips_through_name() {
        for family in Family::ALL {
            assert_eq!(family.as_str().parse::<Family>(), Ok(family));
        }
        assert_eq!(" Message-Passing ".parse::<Family>(), Ok(Family::MessagePassing));
        assert!("seqlock".parse::<Family>().is_err());
    }

    #[test]
    fn test_verdict_failure_depends_on_strictness() {
        assert!(Verdict::Violation.is_failure(false));
        assert!(!Verdict::Divergent.is_failure(false));
        assert!(Verdict::Divergent.is_failure(true));
        assert!(!Verdict::Sometimes.is_failure(true));
    }

    fn report(name: &str, verdict: Verdict) -> TestReport {
        TestReport {
            name: name.to_string(),
            family: Family::LoadBuffering,
            dependency: None,
            condition: describe_condition(MP_EXISTS),
            lkmm: Expectation::Never,
            rust: Expectation::Sometimes,
            iterations: 10,
            positives: 0,
            negatives: 10,
            histogram: Vec::new(),
            verdict,
            elapsed_ms: 0.0,
        }
    }

    #[test]
    fn test_suite_failures_follow_strictness() {
        let suite = SuiteReport::new(
            Utc::now(),
            vec![
                report("LB+divergent", Verdict::Divergent),
                report("SB+violation", Verdict::Violation),
                report("MP+sometimes", Verdict::Sometimes),
            ],
        );

        assert_eq!(suite.summary.divergent, 1);
        assert_eq!(suite.summary.violation, 1);
        assert_eq!(suite.summary.sometimes, 1);
        assert_eq!(suite.violations(), vec!["SB+violation"]);
        assert_eq!(suite.divergences(), vec!["LB+divergent"]);
        assert_eq!(suite.failures(false), vec!["SB+violation"]);
        assert_eq!(suite.failures(true), vec!["LB+divergent", "SB+violation"]);
    }

    #[test]
    fn test_outcome_serializes_as_string() {
        let outcome = Outcome::new().with_reg(0, "r0", 0).with_reg(1, "r0", 0);
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, "\"0:r0=0; 1:r0=0;\"");
    }
}
