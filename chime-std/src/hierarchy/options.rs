//! Construction options for hierarchical dispatchers.

/// Options for [`HierarchicalDispatcher::new`](super::HierarchicalDispatcher::new).
///
/// ```rust
/// use chime_std::hierarchy::ChildOptions;
///
/// assert!(ChildOptions::default().auto_enable);
/// assert!(!ChildOptions::new().auto_enable(false).auto_enable);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildOptions {
    /// Attach to the parent as part of construction. Defaults to `true`.
    pub auto_enable: bool,
}

impl ChildOptions {
    /// Default options: attached on construction.
    pub const fn new() -> Self {
        Self { auto_enable: true }
    }

    /// Set whether the child attaches on construction.
    pub const fn auto_enable(mut self, auto_enable: bool) -> Self {
        self.auto_enable = auto_enable;
        self
    }

    /// Options for a child that starts detached.
    pub const fn detached() -> Self {
        Self::new().auto_enable(false)
    }
}

impl Default for ChildOptions {
    fn default() -> Self {
        Self::new()
    }
}
