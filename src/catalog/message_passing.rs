use super::Litmus;
use crate::core::harness::race2;
use crate::domain::model::{Dependency, Expectation, Family, Location, Outcome};
use crate::lkmm::{
    rcu_assign_pointer, rcu_dereference, read_once, smp_load_acquire, smp_rmb,
    smp_store_release, smp_wmb, write_once,
};
use crate::utils::error::Result;
use std::sync::atomic::AtomicI32;
use std::sync::{Mutex, PoisonError};

const MP_EXISTS: &[(Location, i32)] = &[(Location::reg(1, "r0"), 1), (Location::reg(1, "r1"), 0)];

pub(super) fn tests() -> Vec<Litmus> {
    vec![
        Litmus {
            name: "MP+poonceonces",
            family: Family::MessagePassing,
            dependency: None,
            description: "Unordered flag and payload: the reader may see the flag without the payload",
            lkmm: Expectation::Sometimes,
            rust: Expectation::Sometimes,
            exists: MP_EXISTS,
            body: mp_poonceonces,
        },
        Litmus {
            name: "MP+pooncerelease+poacquireonce",
            family: Family::MessagePassing,
            dependency: None,
            description: "Release store of the flag paired with an acquire load",
            lkmm: Expectation::Never,
            rust: Expectation::Never,
            exists: MP_EXISTS,
            body: mp_pooncerelease_poacquireonce,
        },
        Litmus {
            name: "MP+fencewmbonceonce+fencermbonceonce",
            family: Family::MessagePassing,
            dependency: None,
            description: "smp_wmb() on the writer paired with smp_rmb() on the reader",
            lkmm: Expectation::Never,
            rust: Expectation::Never,
            exists: MP_EXISTS,
            body: mp_fencewmbonceonce_fencermbonceonce,
        },
        Litmus {
            name: "MP+onceassign+derefonce",
            family: Family::MessagePassing,
            dependency: None,
            description: "RCU publication: rcu_assign_pointer() then rcu_dereference() of the pointee",
            lkmm: Expectation::Never,
            rust: Expectation::Never,
            exists: MP_EXISTS,
            body: mp_onceassign_derefonce,
        },
        Litmus {
            name: "MP+polocks",
            family: Family::MessagePassing,
            dependency: None,
            description: "Flag written and read under the same lock",
            lkmm: Expectation::Never,
            rust: Expectation::Never,
            exists: MP_EXISTS,
            body: mp_polocks,
        },
        Litmus {
            name: "MP+fencewmbonceonce+addr",
            family: Family::MessagePassing,
            dependency: Some(Dependency::Address),
            description: "Reader orders its loads only through an address dependency",
            lkmm: Expectation::Never,
            rust: Expectation::Sometimes,
            exists: MP_EXISTS,
            body: mp_fencewmbonceonce_addr,
        },
    ]
}

fn mp_poonceonces() -> Result<Outcome> {
    let x = AtomicI32::new(0);
    let y = AtomicI32::new(0);

    let ((), (r0, r1)) = race2(
        || {
            write_once(&x, 1);
            write_once(&y, 1);
        },
        || {
            let r0 = read_once(&y);
            let r1 = read_once(&x);
            (r0, r1)
        },
    )?;

    Ok(Outcome::new().with_reg(1, "r0", r0).with_reg(1, "r1", r1))
}

fn mp_pooncerelease_poacquireonce() -> Result<Outcome> {
    let x = AtomicI32::new(0);
    let y = AtomicI32::new(0);

    let ((), (r0, r1)) = race2(
        || {
            write_once(&x, 1);
            smp_store_release(&y, 1);
        },
        || {
            let r0 = smp_load_acquire(&y);
            let r1 = read_once(&x);
            (r0, r1)
        },
    )?;

    Ok(Outcome::new().with_reg(1, "r0", r0).with_reg(1, "r1", r1))
}

fn mp_fencewmbonceonce_fencermbonceonce() -> Result<Outcome> {
    let x = AtomicI32::new(0);
    let y = AtomicI32::new(0);

    let ((), (r0, r1)) = race2(
        || {
            write_once(&x, 1);
            smp_wmb();
            write_once(&y, 1);
        },
        || {
            let r0 = read_once(&y);
            smp_rmb();
            let r1 = read_once(&x);
            (r0, r1)
        },
    )?;

    Ok(Outcome::new().with_reg(1, "r0", r0).with_reg(1, "r1", r1))
}

// Pointers are indices into `slots`: 0 is y (the initial target), 1 is x.
fn mp_onceassign_derefonce() -> Result<Outcome> {
    let slots = [AtomicI32::new(0), AtomicI32::new(0)];
    let p = AtomicI32::new(0);

    let ((), (r0, r1)) = race2(
        || {
            write_once(&slots[1], 1);
            rcu_assign_pointer(&p, 1);
        },
        || {
            let r0 = rcu_dereference(&p);
            let r1 = read_once(&slots[r0 as usize]);
            (r0, r1)
        },
    )?;

    Ok(Outcome::new().with_reg(1, "r0", r0).with_reg(1, "r1", r1))
}

fn mp_polocks() -> Result<Outcome> {
    let x = AtomicI32::new(0);
    let y = AtomicI32::new(0);
    let mo = Mutex::new(());

    let ((), (r0, r1)) = race2(
        || {
            write_once(&x, 1);
            let _guard = mo.lock().unwrap_or_else(PoisonError::into_inner);
            write_once(&y, 1);
        },
        || {
            let r0 = {
                let _guard = mo.lock().unwrap_or_else(PoisonError::into_inner);
                read_once(&y)
            };
            let r1 = read_once(&x);
            (r0, r1)
        },
    )?;

    Ok(Outcome::new().with_reg(1, "r0", r0).with_reg(1, "r1", r1))
}

fn mp_fencewmbonceonce_addr() -> Result<Outcome> {
    let slots = [AtomicI32::new(0), AtomicI32::new(0)];
    let p = AtomicI32::new(0);

    let ((), (r0, r1)) = race2(
        || {
            write_once(&slots[1], 1);
            smp_wmb();
            write_once(&p, 1);
        },
        || {
            let r0 = read_once(&p);
            let r1 = read_once(&slots[r0 as usize]);
            (r0, r1)
        },
    )?;

    Ok(Outcome::new().with_reg(1, "r0", r0).with_reg(1, "r1", r1))
}
