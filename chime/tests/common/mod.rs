#![allow(dead_code)]

use chime::{Call, Callback, Receiver};
use std::{cell::RefCell, rc::Rc};

// ============================================================================
// Test Contexts
// ============================================================================

#[derive(Debug, PartialEq)]
pub struct Session {
    pub name: &'static str,
}

// ============================================================================
// Shared Logs
// ============================================================================

/// An ordered log of labels, shared by every callback that writes to it.
#[derive(Clone, Default)]
pub struct Trace {
    entries: Rc<RefCell<Vec<String>>>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.entries.borrow_mut().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    pub fn joined(&self) -> String {
        self.entries.borrow().join(";")
    }

    /// A callback that logs `label`.
    pub fn label<K: 'static, A: 'static>(&self, label: &'static str) -> Callback<K, A> {
        let trace = self.clone();
        Callback::new(move |_| trace.push(label))
    }

    /// A callback that logs the name of the session it is bound to, or
    /// `owner` when it is bound to its dispatcher.
    pub fn receiver<K: 'static, A: 'static>(&self) -> Callback<K, A> {
        let trace = self.clone();
        Callback::new(move |call: &Call<'_, K, A>| match call.receiver() {
            Receiver::Bound(ctx) => {
                trace.push(ctx.downcast_ref::<Session>().map_or("?", |s| s.name))
            }
            Receiver::Owner(_) => trace.push("owner"),
        })
    }
}
