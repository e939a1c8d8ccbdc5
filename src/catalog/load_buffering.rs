use super::Litmus;
use crate::core::harness::race2;
use crate::domain::model::{Dependency, Expectation, Family, Location, Outcome};
use crate::lkmm::{read_once, smp_load_acquire, smp_mb, smp_store_release, write_once};
use crate::utils::error::Result;
use std::sync::atomic::AtomicI32;

const LB_EXISTS: &[(Location, i32)] = &[(Location::reg(0, "r0"), 1), (Location::reg(1, "r0"), 1)];

pub(super) fn tests() -> Vec<Litmus> {
    vec![
        Litmus {
            name: "LB+poonceonces",
            family: Family::LoadBuffering,
            dependency: None,
            description: "Each thread's write may become visible before its own earlier read",
            lkmm: Expectation::Sometimes,
            rust: Expectation::Sometimes,
            exists: LB_EXISTS,
            body: lb_poonceonces,
        },
        Litmus {
            name: "LB+poacquireonce+pooncerelease",
            family: Family::LoadBuffering,
            dependency: None,
            description: "Acquire load on one side, release store on the other",
            lkmm: Expectation::Never,
            rust: Expectation::Never,
            exists: LB_EXISTS,
            body: lb_poacquireonce_pooncerelease,
        },
        Litmus {
            name: "LB+fencembonceonce+ctrlonceonce",
            family: Family::LoadBuffering,
            dependency: Some(Dependency::Control),
            description: "One side orders its write only through a control dependency",
            lkmm: Expectation::Never,
            rust: Expectation::Sometimes,
            exists: LB_EXISTS,
            body: lb_fencembonceonce_ctrlonceonce,
        },
    ]
}

fn lb_poonceonces() -> Result<Outcome> {
    let x = AtomicI32::new(0);
    let y = AtomicI32::new(0);

    let (r0, r1) = race2(
        || {
            let r0 = read_once(&x);
            write_once(&y, 1);
            r0
        },
        || {
            let r0 = read_once(&y);
            write_once(&x, 1);
            r0
        },
    )?;

    Ok(Outcome::new().with_reg(0, "r0", r0).with_reg(1, "r0", r1))
}

fn lb_poacquireonce_pooncerelease() -> Result<Outcome> {
    let x = AtomicI32::new(0);
    let y = AtomicI32::new(0);

    let (r0, r1) = race2(
        || {
            let r0 = smp_load_acquire(&x);
            write_once(&y, 1);
            r0
        },
        || {
            let r0 = read_once(&y);
            smp_store_release(&x, 1);
            r0
        },
    )?;

    Ok(Outcome::new().with_reg(0, "r0", r0).with_reg(1, "r0", r1))
}

fn lb_fencembonceonce_ctrlonceonce() -> Result<Outcome> {
    let x = AtomicI32::new(0);
    let y = AtomicI32::new(0);

    let (r0, r1) = race2(
        || {
            let r0 = read_once(&x);
            if r0 != 0 {
                write_once(&y, 1);
            }
            r0
        },
        || {
            let r0 = read_once(&y);
            smp_mb();
            write_once(&x, 1);
            r0
        },
    )?;

    Ok(Outcome::new().with_reg(0, "r0", r0).with_reg(1, "r0", r1))
}
