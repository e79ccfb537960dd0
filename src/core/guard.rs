//! Non-blocking, thread-scoped reentrancy guard
//!
//! Protects one thread's formatting scratch space from nested logging calls
//! issued while a record is being rendered (for example a value whose text
//! conversion logs on its own). The guard never blocks: a nested attempt
//! simply fails and the nested record is dropped.

use super::error::{FlogError, Result};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// State of a [`ReentrancyGuard`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardState {
    #[default]
    Free,
    Held,
}

impl fmt::Display for GuardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardState::Free => write!(f, "Free"),
            GuardState::Held => write!(f, "Held"),
        }
    }
}

/// Single-thread exclusion flag with fatal-on-misuse semantics
///
/// `ReentrancyGuard` is `!Sync` by construction (it wraps a `Cell`), so it can
/// only ever be touched by the thread that owns it.
///
/// # Example
///
/// ```
/// use rust_flog::core::guard::{GuardState, ReentrancyGuard};
///
/// let guard = ReentrancyGuard::new();
/// assert!(guard.try_acquire());
/// assert!(!guard.try_acquire());
/// guard.release();
/// assert_eq!(guard.state(), GuardState::Free);
/// ```
#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    state: Cell<GuardState>,
}

impl ReentrancyGuard {
    pub const fn new() -> Self {
        Self {
            state: Cell::new(GuardState::Free),
        }
    }

    #[inline]
    pub fn state(&self) -> GuardState {
        self.state.get()
    }

    #[inline]
    pub fn is_held(&self) -> bool {
        self.state.get() == GuardState::Held
    }

    /// `Free` -> `Held`. Returns `false` without touching the state when the
    /// guard is already held.
    #[inline]
    pub fn try_acquire(&self) -> bool {
        match self.state.get() {
            GuardState::Free => {
                self.state.set(GuardState::Held);
                true
            }
            GuardState::Held => false,
        }
    }

    /// `Held` -> `Free`, reporting misuse instead of aborting
    pub fn try_release(&self) -> Result<()> {
        match self.state.get() {
            GuardState::Held => {
                self.state.set(GuardState::Free);
                Ok(())
            }
            GuardState::Free => Err(FlogError::GuardNotHeld),
        }
    }

    /// `Held` -> `Free`. Releasing a free guard is an engine defect and aborts.
    pub fn release(&self) {
        if let Err(e) = self.try_release() {
            fatal(&e.to_string());
        }
    }
}

impl Drop for ReentrancyGuard {
    fn drop(&mut self) {
        if self.is_held() {
            fatal("reentrancy guard destroyed while held; a logging call never completed");
        }
    }
}

/// Scoped acquisition of a shared guard, released on every exit path
/// (including unwinding out of a value's render routine).
pub struct GuardHandle {
    guard: Rc<ReentrancyGuard>,
}

impl GuardHandle {
    /// Returns `None` when the guard is already held by an outer call.
    pub fn try_acquire(guard: &Rc<ReentrancyGuard>) -> Option<Self> {
        if guard.try_acquire() {
            Some(Self {
                guard: Rc::clone(guard),
            })
        } else {
            None
        }
    }
}

impl Drop for GuardHandle {
    fn drop(&mut self) {
        self.guard.release();
    }
}

pub(crate) fn fatal(message: &str) -> ! {
    eprintln!("[FLOG FATAL] {}", message);
    std::process::abort()
}
