//! Per-thread logging state
//!
//! Each thread owns one slot per engine it has logged to. A slot holds the
//! reentrancy guard, the reusable scratch buffer and the thread buffer of
//! committed records. Slots are only ever touched by their own thread, so the
//! logging path needs no cross-thread synchronization.
//!
//! When the thread exits, the thread-local destructor moves every open slot's
//! buffer into its engine's store.

use super::guard::{fatal, GuardHandle, ReentrancyGuard};
use super::logger::EngineShared;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Weak};

struct Slot {
    engine_id: u64,
    engine: Weak<EngineShared>,
    guard: Rc<ReentrancyGuard>,
    scratch: String,
    buffer: String,
    closed: bool,
}

impl Slot {
    fn new(engine: &Arc<EngineShared>) -> Self {
        Self {
            engine_id: engine.id,
            engine: Arc::downgrade(engine),
            guard: Rc::new(ReentrancyGuard::new()),
            scratch: String::new(),
            buffer: String::new(),
            closed: false,
        }
    }

    /// Move the buffer into the engine's store. Runs at most once per slot.
    fn merge(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Some(engine) = self.engine.upgrade() {
            engine.merge(std::mem::take(&mut self.buffer));
        }
    }
}

struct LocalContext {
    slots: RefCell<Vec<Slot>>,
}

impl Drop for LocalContext {
    fn drop(&mut self) {
        for mut slot in self.slots.get_mut().drain(..) {
            if slot.guard.is_held() {
                fatal("thread exited while a logging call was still formatting");
            }
            slot.merge();
        }
    }
}

thread_local! {
    static LOCAL: LocalContext = const {
        LocalContext {
            slots: RefCell::new(Vec::new()),
        }
    };
}

fn slot_for<'a>(slots: &'a mut Vec<Slot>, engine: &Arc<EngineShared>) -> &'a mut Slot {
    let index = match slots.iter().position(|s| s.engine_id == engine.id) {
        Some(index) => index,
        None => {
            // Engines that are gone can no longer receive a merge
            slots.retain(|s| s.engine.strong_count() > 0);
            slots.push(Slot::new(engine));
            slots.len() - 1
        }
    };
    &mut slots[index]
}

pub(crate) enum Acquire {
    Acquired { handle: GuardHandle, scratch: String },
    Reentrant,
    Closed,
}

/// Take the calling thread's guard for `engine` together with its cleared
/// scratch buffer.
pub(crate) fn acquire(engine: &Arc<EngineShared>) -> Acquire {
    LOCAL
        .try_with(|ctx| {
            let mut slots = ctx.slots.borrow_mut();
            let slot = slot_for(&mut slots, engine);
            let Some(handle) = GuardHandle::try_acquire(&slot.guard) else {
                return Acquire::Reentrant;
            };
            if slot.closed {
                return Acquire::Closed;
            }
            let mut scratch = std::mem::take(&mut slot.scratch);
            scratch.clear();
            Acquire::Acquired { handle, scratch }
        })
        // Thread-local storage already torn down
        .unwrap_or(Acquire::Closed)
}

/// Hand the scratch buffer back, appending its text to the thread buffer
/// first when `commit` is set.
pub(crate) fn release(engine_id: u64, scratch: String, commit: bool) {
    let _ = LOCAL.try_with(|ctx| {
        let mut slots = ctx.slots.borrow_mut();
        if let Some(slot) = slots.iter_mut().find(|s| s.engine_id == engine_id) {
            if commit {
                slot.buffer.push_str(&scratch);
            }
            slot.scratch = scratch;
        }
    });
}

/// Append already rendered text to the thread buffer
pub(crate) fn commit_text(engine_id: u64, text: &str) {
    let _ = LOCAL.try_with(|ctx| {
        let mut slots = ctx.slots.borrow_mut();
        if let Some(slot) = slots.iter_mut().find(|s| s.engine_id == engine_id) {
            slot.buffer.push_str(text);
        }
    });
}

/// Merge the calling thread's buffer for `engine` now instead of at thread
/// exit. Returns `false` when the thread never logged to the engine, already
/// merged, or is inside a logging call for it.
pub(crate) fn merge_now(engine: &Arc<EngineShared>) -> bool {
    LOCAL
        .try_with(|ctx| {
            let mut slots = ctx.slots.borrow_mut();
            match slots.iter_mut().find(|s| s.engine_id == engine.id) {
                Some(slot) if !slot.closed && !slot.guard.is_held() => {
                    slot.merge();
                    true
                }
                _ => false,
            }
        })
        .unwrap_or(false)
}

/// Committed text of the calling thread that has not been merged yet
pub(crate) fn pending(engine_id: u64) -> Option<String> {
    LOCAL
        .try_with(|ctx| {
            ctx.slots
                .borrow()
                .iter()
                .find(|s| s.engine_id == engine_id && !s.closed)
                .map(|s| s.buffer.clone())
        })
        .ok()
        .flatten()
}
