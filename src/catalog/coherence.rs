use super::Litmus;
use crate::core::harness::race2;
use crate::domain::model::{Expectation, Family, Location, Outcome};
use crate::lkmm::{read_once, write_once};
use crate::utils::error::Result;
use std::sync::atomic::AtomicI32;

const CORR_EXISTS: &[(Location, i32)] = &[(Location::reg(1, "r0"), 1), (Location::reg(1, "r1"), 0)];
const CORW_EXISTS: &[(Location, i32)] = &[(Location::var("x"), 2), (Location::reg(0, "r0"), 2)];
const COWR_EXISTS: &[(Location, i32)] = &[(Location::var("x"), 1), (Location::reg(0, "r0"), 2)];
const COWW_EXISTS: &[(Location, i32)] = &[(Location::var("x"), 1)];

pub(super) fn tests() -> Vec<Litmus> {
    vec![
        Litmus {
            name: "CoRR+poonceonce+Once",
            family: Family::Coherence,
            dependency: None,
            description: "Two reads of one variable cannot see its writes out of order",
            lkmm: Expectation::Never,
            rust: Expectation::Never,
            exists: CORR_EXISTS,
            body: corr_poonceonce_once,
        },
        Litmus {
            name: "CoRW+poonceonce+Once",
            family: Family::Coherence,
            dependency: None,
            description: "A write cannot precede in coherence order a write its thread already read",
            lkmm: Expectation::Never,
            rust: Expectation::Never,
            exists: CORW_EXISTS,
            body: corw_poonceonce_once,
        },
        Litmus {
            name: "CoWR+poonceonce+Once",
            family: Family::Coherence,
            dependency: None,
            description: "A read cannot return a value older than its thread's own write",
            lkmm: Expectation::Never,
            rust: Expectation::Never,
            exists: COWR_EXISTS,
            body: cowr_poonceonce_once,
        },
        Litmus {
            name: "CoWW+poonceonce",
            family: Family::Coherence,
            dependency: None,
            description: "Writes from one thread to one variable land in program order",
            lkmm: Expectation::Never,
            rust: Expectation::Never,
            exists: COWW_EXISTS,
            body: coww_poonceonce,
        },
    ]
}

fn corr_poonceonce_once() -> Result<Outcome> {
    let x = AtomicI32::new(0);

    let ((), (r0, r1)) = race2(
        || write_once(&x, 1),
        || {
            let r0 = read_once(&x);
            let r1 = read_once(&x);
            (r0, r1)
        },
    )?;

    Ok(Outcome::new().with_reg(1, "r0", r0).with_reg(1, "r1", r1))
}

fn corw_poonceonce_once() -> Result<Outcome> {
    let x = AtomicI32::new(0);

    let (r0, ()) = race2(
        || {
            let r0 = read_once(&x);
            write_once(&x, 1);
            r0
        },
        || write_once(&x, 2),
    )?;

    Ok(Outcome::new()
        .with_var("x", read_once(&x))
        .with_reg(0, "r0", r0))
}

fn cowr_poonceonce_once() -> Result<Outcome> {
    let x = AtomicI32::new(0);

    let (r0, ()) = race2(
        || {
            write_once(&x, 1);
            read_once(&x)
        },
        || write_once(&x, 2),
    )?;

    Ok(Outcome::new()
        .with_var("x", read_once(&x))
        .with_reg(0, "r0", r0))
}

fn coww_poonceonce() -> Result<Outcome> {
    let x = AtomicI32::new(0);

    // Single thread: the observer is the final-state read after the join.
    let ((), ()) = race2(
        || {
            write_once(&x, 1);
            write_once(&x, 2);
        },
        || (),
    )?;

    Ok(Outcome::new().with_var("x", read_once(&x)))
}
