use super::Litmus;
use crate::core::harness::race2;
use crate::domain::model::{Expectation, Family, Location, Outcome};
use crate::lkmm::{read_once, smp_load_acquire, smp_mb, smp_wmb, write_once};
use crate::utils::error::Result;
use std::sync::atomic::AtomicI32;

const R_EXISTS: &[(Location, i32)] = &[(Location::var("y"), 2), (Location::reg(1, "r0"), 0)];
const S_EXISTS: &[(Location, i32)] = &[(Location::var("x"), 2), (Location::reg(1, "r0"), 1)];
const W2_EXISTS: &[(Location, i32)] = &[(Location::var("x"), 1), (Location::var("y"), 1)];

pub(super) fn tests() -> Vec<Litmus> {
    vec![
        Litmus {
            name: "R+poonceonces",
            family: Family::WriteOrdering,
            dependency: None,
            description: "A write overtaken in coherence order does not order a later read",
            lkmm: Expectation::Sometimes,
            rust: Expectation::Sometimes,
            exists: R_EXISTS,
            body: r_poonceonces,
        },
        Litmus {
            name: "R+fencembonceonces",
            family: Family::WriteOrdering,
            dependency: None,
            description: "smp_mb() on both threads restores the ordering of R",
            lkmm: Expectation::Never,
            rust: Expectation::Never,
            exists: R_EXISTS,
            body: r_fencembonceonces,
        },
        Litmus {
            name: "S+poonceonces",
            family: Family::WriteOrdering,
            dependency: None,
            description: "A read followed by a write does not order against a remote write pair",
            lkmm: Expectation::Sometimes,
            rust: Expectation::Sometimes,
            exists: S_EXISTS,
            body: s_poonceonces,
        },
        Litmus {
            name: "S+fencewmbonceonce+poacquireonce",
            family: Family::WriteOrdering,
            dependency: None,
            description: "smp_wmb() on the writer paired with an acquire load of the flag",
            lkmm: Expectation::Never,
            rust: Expectation::Never,
            exists: S_EXISTS,
            body: s_fencewmbonceonce_poacquireonce,
        },
        Litmus {
            name: "2+2W+poonceonces",
            family: Family::WriteOrdering,
            dependency: None,
            description: "Two write pairs in opposite orders may both lose",
            lkmm: Expectation::Sometimes,
            rust: Expectation::Sometimes,
            exists: W2_EXISTS,
            body: w2_poonceonces,
        },
        Litmus {
            name: "2+2W+fencembonceonces",
            family: Family::WriteOrdering,
            dependency: None,
            description: "smp_mb() between each write pair",
            lkmm: Expectation::Never,
            rust: Expectation::Never,
            exists: W2_EXISTS,
            body: w2_fencembonceonces,
        },
    ]
}

fn r_poonceonces() -> Result<Outcome> {
    let x = AtomicI32::new(0);
    let y = AtomicI32::new(0);

    let ((), r0) = race2(
        || {
            write_once(&x, 1);
            write_once(&y, 1);
        },
        || {
            write_once(&y, 2);
            read_once(&x)
        },
    )?;

    Ok(Outcome::new()
        .with_var("y", read_once(&y))
        .with_reg(1, "r0", r0))
}

fn r_fencembonceonces() -> Result<Outcome> {
    let x = AtomicI32::new(0);
    let y = AtomicI32::new(0);

    let ((), r0) = race2(
        || {
            write_once(&x, 1);
            smp_mb();
            write_once(&y, 1);
        },
        || {
            write_once(&y, 2);
            smp_mb();
            read_once(&x)
        },
    )?;

    Ok(Outcome::new()
        .with_var("y", read_once(&y))
        .with_reg(1, "r0", r0))
}

fn s_poonceonces() -> Result<Outcome> {
    let x = AtomicI32::new(0);
    let y = AtomicI32::new(0);

    let ((), r0) = race2(
        || {
            write_once(&x, 2);
            write_once(&y, 1);
        },
        || {
            let r0 = read_once(&y);
            write_once(&x, 1);
            r0
        },
    )?;

    Ok(Outcome::new()
        .with_var("x", read_once(&x))
        .with_reg(1, "r0", r0))
}

fn s_fencewmbonceonce_poacquireonce() -> Result<Outcome> {
    let x = AtomicI32::new(0);
    let y = AtomicI32::new(0);

    let ((), r0) = race2(
        || {
            write_once(&x, 2);
            smp_wmb();
            write_once(&y, 1);
        },
        || {
            let r0 = smp_load_acquire(&y);
            write_once(&x, 1);
            r0
        },
    )?;

    Ok(Outcome::new()
        .with_var("x", read_once(&x))
        .with_reg(1, "r0", r0))
}

fn w2_poonceonces() -> Result<Outcome> {
    let x = AtomicI32::new(0);
    let y = AtomicI32::new(0);

    let ((), ()) = race2(
        || {
            write_once(&x, 1);
            write_once(&y, 2);
        },
        || {
            write_once(&y, 1);
            write_once(&x, 2);
        },
    )?;

    Ok(Outcome::new()
        .with_var("x", read_once(&x))
        .with_var("y", read_once(&y)))
}

fn w2_fencembonceonces() -> Result<Outcome> {
    let x = AtomicI32::new(0);
    let y = AtomicI32::new(0);

    let ((), ()) = race2(
        || {
            write_once(&x, 1);
            smp_mb();
            write_once(&y, 2);
        },
        || {
            write_once(&y, 1);
            smp_mb();
            write_once(&x, 2);
        },
    )?;

    Ok(Outcome::new()
        .with_var("x", read_once(&x))
        .with_var("y", read_once(&y)))
}
