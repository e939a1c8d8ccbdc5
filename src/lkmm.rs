//! Linux-kernel memory-access primitives expressed with Rust atomics.
//!
//! Marked accesses map onto `core::sync::atomic` orderings. Relaxed is
//! where the two models part ways: the LKMM honours address, data and
//! control dependencies between relaxed accesses, the Rust model honours
//! none of them. Tests that lean on a dependency record both verdicts.

use std::sync::atomic::{fence, AtomicI32, Ordering};

#[inline]
pub fn read_once(x: &AtomicI32) -> i32 {
    x.load(Ordering::Relaxed)
}

#[inline]
pub fn write_once(x: &AtomicI32, value: i32) {
    x.store(value, Ordering::Relaxed)
}

#[inline]
pub fn smp_load_acquire(x: &AtomicI32) -> i32 {
    x.load(Ordering::Acquire)
}

#[inline]
pub fn smp_store_release(x: &AtomicI32, value: i32) {
    x.store(value, Ordering::Release)
}

/// Full barrier.
#[inline]
pub fn smp_mb() {
    fence(Ordering::SeqCst)
}

/// Orders prior loads before later loads. An acquire fence also orders
/// them before later stores.
#[inline]
pub fn smp_rmb() {
    fence(Ordering::Acquire)
}

/// Orders prior stores before later stores. A release fence also orders
/// prior loads.
#[inline]
pub fn smp_wmb() {
    fence(Ordering::Release)
}

/// Rust has no consume ordering, so a dereference is an acquire load.
#[inline]
pub fn rcu_dereference(p: &AtomicI32) -> i32 {
    p.load(Ordering::Acquire)
}

#[inline]
pub fn rcu_assign_pointer(p: &AtomicI32, value: i32) {
    p.store(value, Ordering::Release)
}

/// One row of the primitive mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    pub lkmm: &'static str,
    pub rust: &'static str,
    pub note: &'static str,
}

const MAPPING: &[Mapping] = &[
    Mapping {
        lkmm: "READ_ONCE",
        rust: "load(Relaxed)",
        note: "",
    },
    Mapping {
        lkmm: "WRITE_ONCE",
        rust: "store(Relaxed)",
        note: "",
    },
    Mapping {
        lkmm: "smp_load_acquire",
        rust: "load(Acquire)",
        note: "",
    },
    Mapping {
        lkmm: "smp_store_release",
        rust: "store(Release)",
        note: "",
    },
    Mapping {
        lkmm: "smp_mb",
        rust: "fence(SeqCst)",
        note: "",
    },
    Mapping {
        lkmm: "smp_rmb",
        rust: "fence(Acquire)",
        note: "stronger than required",
    },
    Mapping {
        lkmm: "smp_wmb",
        rust: "fence(Release)",
        note: "stronger than required",
    },
    Mapping {
        lkmm: "rcu_dereference",
        rust: "load(Acquire)",
        note: "no consume ordering",
    },
    Mapping {
        lkmm: "rcu_assign_pointer",
        rust: "store(Release)",
        note: "",
    },
    Mapping {
        lkmm: "spin_lock / spin_unlock",
        rust: "Mutex::lock / guard drop",
        note: "",
    },
    Mapping {
        lkmm: "control dependency",
        rust: "(none)",
        note: "not ordered by the Rust model",
    },
    Mapping {
        lkmm: "address dependency",
        rust: "(none)",
        note: "not ordered by the Rust model",
    },
    Mapping {
        lkmm: "data dependency",
        rust: "(none)",
        note: "not ordered by the Rust model",
    },
];

pub fn mapping() -> &'static [Mapping] {
    MAPPING
}

pub fn lookup(lkmm: &str) -> Option<&'static Mapping> {
    MAPPING.iter().find(|m| m.lkmm == lkmm)
}

pub fn render_mapping() -> String {
    let width = MAPPING.iter().map(|m| m.lkmm.len()).max().unwrap_or(0);
    let mut out = String::new();
    for m in MAPPING {
        out.push_str(&format!("{:width$}  {}", m.lkmm, m.rust, width = width));
        if !m.note.is_empty() {
            out.push_str(&format!("  ({})", m.note));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marked_accesses_read_back() {
        let x = AtomicI32::new(0);
        write_once(&x, 3);
        assert_eq!(read_once(&x), 3);
        smp_store_release(&x, 4);
        assert_eq!(smp_load_acquire(&x), 4);
        rcu_assign_pointer(&x, 5);
        assert_eq!(rcu_dereference(&x), 5);
    }

    #[test]
    fn test_dependencies_have_no_rust_ordering() {
        for kind in ["control dependency", "address dependency", "data dependency"] {
            let row = lookup(kind).unwrap();
            assert_eq!(row.rust, "(none)");
        }
        assert_eq!(lookup("smp_mb").unwrap().rust, "fence(SeqCst)");
        assert!(lookup("smp_read_barrier_depends").is_none());
    }

    #[test]
    fn test_render_mapping_lists_every_row() {
        let rendered = render_mapping();
        assert_eq!(rendered.lines().count(), mapping().len());
        assert!(rendered.contains("rcu_dereference"));
        assert!(rendered.contains("(no consume ordering)"));
    }
}
