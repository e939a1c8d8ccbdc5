//! Runs the threads of one litmus execution so that their bodies overlap.
//!
//! Spawning a thread takes far longer than a litmus body, so without a
//! rendezvous the first thread usually finishes before the last starts
//! and only sequential outcomes are ever seen.

use crate::utils::error::{LitmusError, Result};
use std::hint;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, ScopedJoinHandle};

const SPINS_BEFORE_YIELD: u32 = 1 << 12;

struct StartGate {
    arrived: AtomicUsize,
    parties: usize,
}

impl StartGate {
    fn new(parties: usize) -> Self {
        Self {
            arrived: AtomicUsize::new(0),
            parties,
        }
    }

    fn wait(&self) {
        self.arrived.fetch_add(1, Ordering::AcqRel);
        let mut spins = 0u32;
        while self.arrived.load(Ordering::Acquire) < self.parties {
            if spins < SPINS_BEFORE_YIELD {
                hint::spin_loop();
                spins += 1;
            } else {
                // More litmus threads than free cores.
                thread::yield_now();
            }
        }
    }
}

fn join<T>(handle: ScopedJoinHandle<'_, T>, thread: usize) -> Result<T> {
    handle
        .join()
        .map_err(|_| LitmusError::ThreadPanicked { thread })
}

pub fn race2<F0, F1, R0, R1>(p0: F0, p1: F1) -> Result<(R0, R1)>
where
    F0: FnOnce() -> R0 + Send,
    F1: FnOnce() -> R1 + Send,
    R0: Send,
    R1: Send,
{
    let gate = StartGate::new(2);
    let gate = &gate;
    thread::scope(|s| {
        let h0 = s.spawn(move || {
            gate.wait();
            p0()
        });
        let h1 = s.spawn(move || {
            gate.wait();
            p1()
        });
        let r0 = join(h0, 0);
        let r1 = join(h1, 1);
        Ok((r0?, r1?))
    })
}

pub fn race3<F0, F1, F2, R0, R1, R2>(p0: F0, p1: F1, p2: F2) -> Result<(R0, R1, R2)>
where
    F0: FnOnce() -> R0 + Send,
    F1: FnOnce() -> R1 + Send,
    F2: FnOnce() -> R2 + Send,
    R0: Send,
    R1: Send,
    R2: Send,
{
    let gate = StartGate::new(3);
    let gate = &gate;
    thread::scope(|s| {
        let h0 = s.spawn(move || {
            gate.wait();
            p0()
        });
        let h1 = s.spawn(move || {
            gate.wait();
            p1()
        });
        let h2 = s.spawn(move || {
            gate.wait();
            p2()
        });
        let r0 = join(h0, 0);
        let r1 = join(h1, 1);
        let r2 = join(h2, 2);
        Ok((r0?, r1?, r2?))
    })
}

#[allow(clippy::type_complexity)]
pub fn race4<F0, F1, F2, F3, R0, R1, R2, R3>(
    p0: F0,
    p1: F1,
    p2: F2,
    p3: F3,
) -> Result<(R0, R1, R2, R3)>
where
    F0: FnOnce() -> R0 + Send,
    F1: FnOnce() -> R1 + Send,
    F2: FnOnce() -> R2 + Send,
    F3: FnOnce() -> R3 + Send,
    R0: Send,
    R1: Send,
    R2: Send,
    R3: Send,
{
    let gate = StartGate::new(4);
    let gate = &gate;
    thread::scope(|s| {
        let h0 = s.spawn(move || {
            gate.wait();
            p0()
        });
        let h1 = s.spawn(move || {
            gate.wait();
            p1()
        });
        let h2 = s.spawn(move || {
            gate.wait();
            p2()
        });
        let h3 = s.spawn(move || {
            gate.wait();
            p3()
        });
        let r0 = join(h0, 0);
        let r1 = join(h1, 1);
        let r2 = join(h2, 2);
        let r3 = join(h3, 3);
        Ok((r0?, r1?, r2?, r3?))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicI32;

    #[test]
    fn test_race2_returns_results_in_thread_order() {
        let (a, b) = race2(|| 1, || "two").unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, "two");
    }

    #[test]
    fn test_race_threads_share_borrowed_state() {
        let x = AtomicI32::new(0);
        race4(
            || x.fetch_add(1, Ordering::Relaxed),
            || x.fetch_add(1, Ordering::Relaxed),
            || x.fetch_add(1, Ordering::Relaxed),
            || x.fetch_add(1, Ordering::Relaxed),
        )
        .unwrap();
        assert_eq!(x.load(Ordering::Relaxed), 4);
    }

    #[test]
    fn test_panicking_thread_is_reported() {
        let result = race3(|| 0, || -> i32 { panic!("boom") }, || 2);
        assert!(matches!(result, Err(LitmusError::ThreadPanicked { thread: 1 })));
    }
}
