//! Litmus tests from the Linux kernel's `tools/memory-model` corpus,
//! written against `std::sync::atomic` through [`crate::lkmm`].
//!
//! Names follow the kernel's convention: shape, then one access-pair
//! annotation per thread (`once`, `release`, `acquire`, `fencemb`, ...).

mod coherence;
mod load_buffering;
mod message_passing;
mod multicopy;
mod store_buffering;
mod write_ordering;

use crate::domain::model::{Condition, Dependency, Expectation, Family, Outcome};
use crate::domain::ports::LitmusTest;
use crate::utils::error::Result;
use std::sync::Arc;

pub struct Litmus {
    pub name: &'static str,
    pub family: Family,
    pub dependency: Option<Dependency>,
    pub description: &'static str,
    pub lkmm: Expectation,
    pub rust: Expectation,
    pub exists: Condition,
    pub body: fn() -> Result<Outcome>,
}

impl LitmusTest for Litmus {
    fn name(&self) -> &str {
        self.name
    }

    fn family(&self) -> Family {
        self.family
    }

    fn dependency(&self) -> Option<Dependency> {
        self.dependency
    }

    fn description(&self) -> &str {
        self.description
    }

    fn lkmm(&self) -> Expectation {
        self.lkmm
    }

    fn rust(&self) -> Expectation {
        self.rust
    }

    fn condition(&self) -> Condition {
        self.exists
    }

    fn run_once(&self) -> Result<Outcome> {
        (self.body)()
    }
}

impl std::fmt::Debug for Litmus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Litmus")
            .field("name", &self.name)
            .field("family", &self.family)
            .field("lkmm", &self.lkmm)
            .field("rust", &self.rust)
            .finish()
    }
}

/// Every ported test, in catalog order.
pub fn all() -> Vec<Arc<dyn LitmusTest>> {
    coherence::tests()
        .into_iter()
        .chain(message_passing::tests())
        .chain(store_buffering::tests())
        .chain(load_buffering::tests())
        .chain(write_ordering::tests())
        .chain(multicopy::tests())
        .map(|test| Arc::new(test) as Arc<dyn LitmusTest>)
        .collect()
}

pub fn find(name: &str) -> Option<Arc<dyn LitmusTest>> {
    all().into_iter().find(|test| test.name() == name)
}
