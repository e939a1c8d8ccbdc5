use super::Litmus;
use crate::core::harness::{race3, race4};
use crate::domain::model::{Expectation, Family, Location, Outcome};
use crate::lkmm::{
    read_once, smp_load_acquire, smp_mb, smp_rmb, smp_store_release, write_once,
};
use crate::utils::error::Result;
use std::sync::atomic::AtomicI32;

const WRC_EXISTS: &[(Location, i32)] = &[
    (Location::reg(1, "r0"), 1),
    (Location::reg(2, "r0"), 1),
    (Location::reg(2, "r1"), 0),
];

const ISA2_EXISTS: &[(Location, i32)] = &[
    (Location::reg(1, "r0"), 1),
    (Location::reg(2, "r0"), 1),
    (Location::reg(2, "r1"), 0),
];

const IRIW_EXISTS: &[(Location, i32)] = &[
    (Location::reg(1, "r0"), 1),
    (Location::reg(1, "r1"), 0),
    (Location::reg(3, "r0"), 1),
    (Location::reg(3, "r1"), 0),
];

pub(super) fn tests() -> Vec<Litmus> {
    vec![
        Litmus {
            name: "WRC+poonceonces+Once",
            family: Family::Multicopy,
            dependency: None,
            description: "A write observed by a relay thread need not be visible to a third thread",
            lkmm: Expectation::Sometimes,
            rust: Expectation::Sometimes,
            exists: WRC_EXISTS,
            body: wrc_poonceonces_once,
        },
        Litmus {
            name: "WRC+pooncerelease+fencermbonceonce+Once",
            family: Family::Multicopy,
            dependency: None,
            description: "Release on the relay and smp_rmb() on the observer make the write cumulative",
            lkmm: Expectation::Never,
            rust: Expectation::Never,
            exists: WRC_EXISTS,
            body: wrc_pooncerelease_fencermbonceonce_once,
        },
        Litmus {
            name: "IRIW+poonceonces+OnceOnce",
            family: Family::Multicopy,
            dependency: None,
            description: "Two readers may disagree on the order of two independent writes",
            lkmm: Expectation::Sometimes,
            rust: Expectation::Sometimes,
            exists: IRIW_EXISTS,
            body: iriw_poonceonces_onceonce,
        },
        Litmus {
            name: "IRIW+fencembonceonces+OnceOnce",
            family: Family::Multicopy,
            dependency: None,
            description: "smp_mb() in both readers forces agreement on the write order",
            lkmm: Expectation::Never,
            rust: Expectation::Never,
            exists: IRIW_EXISTS,
            body: iriw_fencembonceonces_onceonce,
        },
        Litmus {
            name: "ISA2+pooncerelease+poacquirerelease+poacquireonce",
            family: Family::Multicopy,
            dependency: None,
            description: "A release-acquire chain through three threads is transitive",
            lkmm: Expectation::Never,
            rust: Expectation::Never,
            exists: ISA2_EXISTS,
            body: isa2_pooncerelease_poacquirerelease_poacquireonce,
        },
    ]
}

fn wrc_poonceonces_once() -> Result<Outcome> {
    let x = AtomicI32::new(0);
    let y = AtomicI32::new(0);

    let ((), r10, (r20, r21)) = race3(
        || write_once(&x, 1),
        || {
            let r0 = read_once(&x);
            write_once(&y, 1);
            r0
        },
        || {
            let r0 = read_once(&y);
            let r1 = read_once(&x);
            (r0, r1)
        },
    )?;

    Ok(Outcome::new()
        .with_reg(1, "r0", r10)
        .with_reg(2, "r0", r20)
        .with_reg(2, "r1", r21))
}

fn wrc_pooncerelease_fencermbonceonce_once() -> Result<Outcome> {
    let x = AtomicI32::new(0);
    let y = AtomicI32::new(0);

    let ((), r10, (r20, r21)) = race3(
        || write_once(&x, 1),
        || {
            let r0 = read_once(&x);
            smp_store_release(&y, 1);
            r0
        },
        || {
            let r0 = read_once(&y);
            smp_rmb();
            let r1 = read_once(&x);
            (r0, r1)
        },
    )?;

    Ok(Outcome::new()
        .with_reg(1, "r0", r10)
        .with_reg(2, "r0", r20)
        .with_reg(2, "r1", r21))
}

fn iriw_poonceonces_onceonce() -> Result<Outcome> {
    let x = AtomicI32::new(0);
    let y = AtomicI32::new(0);

    let ((), (r10, r11), (), (r30, r31)) = race4(
        || write_once(&x, 1),
        || {
            let r0 = read_once(&x);
            let r1 = read_once(&y);
            (r0, r1)
        },
        || write_once(&y, 1),
        || {
            let r0 = read_once(&y);
            let r1 = read_once(&x);
            (r0, r1)
        },
    )?;

    Ok(Outcome::new()
        .with_reg(1, "r0", r10)
        .with_reg(1, "r1", r11)
        .with_reg(3, "r0", r30)
        .with_reg(3, "r1", r31))
}

fn iriw_fencembonceonces_onceonce() -> Result<Outcome> {
    let x = AtomicI32::new(0);
    let y = AtomicI32::new(0);

    let ((), (r10, r11), (), (r30, r31)) = race4(
        || write_once(&x, 1),
        || {
            let r0 = read_once(&x);
            smp_mb();
            let r1 = read_once(&y);
            (r0, r1)
        },
        || write_once(&y, 1),
        || {
            let r0 = read_once(&y);
            smp_mb();
            let r1 = read_once(&x);
            (r0, r1)
        },
    )?;

    Ok(Outcome::new()
        .with_reg(1, "r0", r10)
        .with_reg(1, "r1", r11)
        .with_reg(3, "r0", r30)
        .with_reg(3, "r1", r31))
}

fn isa2_pooncerelease_poacquirerelease_poacquireonce() -> Result<Outcome> {
    let x = AtomicI32::new(0);
    let y = AtomicI32::new(0);
    let z = AtomicI32::new(0);

    let ((), r10, (r20, r21)) = race3(
        || {
            write_once(&x, 1);
            smp_store_release(&y, 1);
        },
        || {
            let r0 = smp_load_acquire(&y);
            smp_store_release(&z, 1);
            r0
        },
        || {
            let r0 = smp_load_acquire(&z);
            let r1 = read_once(&x);
            (r0, r1)
        },
    )?;

    Ok(Outcome::new()
        .with_reg(1, "r0", r10)
        .with_reg(2, "r0", r20)
        .with_reg(2, "r1", r21))
}
