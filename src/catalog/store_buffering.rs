use super::Litmus;
use crate::core::harness::race2;
use crate::domain::model::{Expectation, Family, Location, Outcome};
use crate::lkmm::{read_once, smp_mb, write_once};
use crate::utils::error::Result;
use std::sync::atomic::AtomicI32;

const SB_EXISTS: &[(Location, i32)] = &[(Location::reg(0, "r0"), 0), (Location::reg(1, "r0"), 0)];

const SB_RFI_EXISTS: &[(Location, i32)] = &[(Location::reg(0, "r2"), 0), (Location::reg(1, "r4"), 0)];

pub(super) fn tests() -> Vec<Litmus> {
    vec![
        Litmus {
            name: "SB+poonceonces",
            family: Family::StoreBuffering,
            dependency: None,
            description: "Each thread's read may pass its own earlier write",
            lkmm: Expectation::Sometimes,
            rust: Expectation::Sometimes,
            exists: SB_EXISTS,
            body: sb_poonceonces,
        },
        Litmus {
            name: "SB+fencembonceonces",
            family: Family::StoreBuffering,
            dependency: None,
            description: "smp_mb() between the write and the read on both threads",
            lkmm: Expectation::Never,
            rust: Expectation::Never,
            exists: SB_EXISTS,
            body: sb_fencembonceonces,
        },
        Litmus {
            name: "SB+rfionceonce-poonceonces",
            family: Family::StoreBuffering,
            dependency: None,
            description: "Reading back one's own write does not order the following read",
            lkmm: Expectation::Sometimes,
            rust: Expectation::Sometimes,
            exists: SB_RFI_EXISTS,
            body: sb_rfionceonce_poonceonces,
        },
    ]
}

fn sb_poonceonces() -> Result<Outcome> {
    let x = AtomicI32::new(0);
    let y = AtomicI32::new(0);

    let (r0, r1) = race2(
        || {
            write_once(&x, 1);
            read_once(&y)
        },
        || {
            write_once(&y, 1);
            read_once(&x)
        },
    )?;

    Ok(Outcome::new().with_reg(0, "r0", r0).with_reg(1, "r0", r1))
}

fn sb_fencembonceonces() -> Result<Outcome> {
    let x = AtomicI32::new(0);
    let y = AtomicI32::new(0);

    let (r0, r1) = race2(
        || {
            write_once(&x, 1);
            smp_mb();
            read_once(&y)
        },
        || {
            write_once(&y, 1);
            smp_mb();
            read_once(&x)
        },
    )?;

    Ok(Outcome::new().with_reg(0, "r0", r0).with_reg(1, "r0", r1))
}

fn sb_rfionceonce_poonceonces() -> Result<Outcome> {
    let x = AtomicI32::new(0);
    let y = AtomicI32::new(0);

    let ((r1, r2), (r3, r4)) = race2(
        || {
            write_once(&x, 1);
            let r1 = read_once(&x);
            let r2 = read_once(&y);
            (r1, r2)
        },
        || {
            write_once(&y, 1);
            let r3 = read_once(&y);
            let r4 = read_once(&x);
            (r3, r4)
        },
    )?;

    Ok(Outcome::new()
        .with_reg(0, "r1", r1)
        .with_reg(0, "r2", r2)
        .with_reg(1, "r3", r3)
        .with_reg(1, "r4", r4))
}
