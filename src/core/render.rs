//! Text output in the layout `litmus7` prints, so logs from both tools
//! can be compared side by side.

use crate::domain::model::{Expectation, SuiteReport, TestReport, Verdict};
use std::fmt::Write;

pub fn render_test(report: &TestReport) -> String {
    let mut out = String::new();
    let kind = match report.rust {
        Expectation::Never => "Required",
        Expectation::Sometimes => "Allowed",
    };

    let _ = writeln!(out, "Test {} {}", report.name, kind);
    let _ = writeln!(out, "Histogram ({} states)", report.histogram.len());
    for state in &report.histogram {
        let marker = if state.positive { '*' } else { ':' };
        let _ = writeln!(out, "{:<8}{}>{}", state.count, marker, state.outcome);
    }

    let ok = if report.verdict == Verdict::Violation {
        "No"
    } else {
        "Ok"
    };
    let _ = writeln!(out, "{}", ok);
    let _ = writeln!(out, "Witnesses");
    let _ = writeln!(
        out,
        "Positive: {}, Negative: {}",
        report.positives, report.negatives
    );
    let _ = writeln!(out, "Condition {}", report.condition);
    let _ = writeln!(
        out,
        "Observation {} {} {} {}",
        report.name,
        observation(report),
        report.positives,
        report.negatives
    );
    if report.lkmm != report.rust {
        let dependency = report
            .dependency
            .map(|d| format!(" ({} dependency)", d))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "LKMM {} Rust {}{}",
            report.lkmm, report.rust, dependency
        );
    }
    let _ = writeln!(
        out,
        "Time {} {:.2}",
        report.name,
        report.elapsed_ms / 1000.0
    );
    out
}

fn observation(report: &TestReport) -> &'static str {
    if report.positives == 0 {
        "Never"
    } else if report.negatives == 0 {
        "Always"
    } else {
        "Sometimes"
    }
}

pub fn render_suite(suite: &SuiteReport) -> String {
    let mut out = String::new();
    for report in &suite.reports {
        out.push_str(&render_test(report));
        out.push('\n');
    }

    let s = &suite.summary;
    let _ = writeln!(
        out,
        "Summary: {} tests, {} never, {} sometimes, {} divergent, {} violation",
        suite.reports.len(),
        s.never,
        s.sometimes,
        s.divergent,
        s.violation
    );
    out
}
