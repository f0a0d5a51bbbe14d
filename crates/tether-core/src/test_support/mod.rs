pub(crate) mod entity;

pub(crate) use entity::{TestChild, TestParent};

use std::cell::{Cell, RefCell};

// Test state is thread-local: the cargo test harness runs each test on its
// own thread, so fixtures are isolated without any locking.
thread_local! {
    static OPS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    static NEXT_KEY: Cell<u64> = const { Cell::new(1000) };
}

/// Record one persistence-primitive operation for later assertions.
pub(crate) fn log_op(op: impl Into<String>) {
    OPS.with(|ops| ops.borrow_mut().push(op.into()));
}

/// Drain the operation log.
pub(crate) fn take_ops() -> Vec<String> {
    OPS.with(|ops| ops.borrow_mut().drain(..).collect())
}

/// Count logged operations with the given prefix, without draining.
pub(crate) fn count_ops(prefix: &str) -> usize {
    OPS.with(|ops| {
        ops.borrow()
            .iter()
            .filter(|op| op.starts_with(prefix))
            .count()
    })
}

/// Allocate the next synthetic primary-key value.
pub(crate) fn next_key() -> u64 {
    let key = NEXT_KEY.get();
    NEXT_KEY.set(key + 1);

    key
}
