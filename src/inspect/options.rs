//! Describer configuration

/// Smallest nesting depth the describer will use
pub const MIN_DEPTH: usize = 2;

/// Default nesting depth
pub const DEFAULT_DEPTH: usize = 2;

/// Default number of elements listed per aggregate
pub const DEFAULT_MAX_ITEMS: usize = 100;

/// Options controlling how much of a value is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectOptions {
    /// How many levels of nested aggregates are expanded below the top
    /// level. Values under `MIN_DEPTH` are raised to it.
    pub depth: usize,
    /// Elements listed per aggregate before the rest are summarised as
    /// `... N more items`
    pub max_items: usize,
}

impl InspectOptions {
    pub fn new() -> Self {
        InspectOptions {
            depth: DEFAULT_DEPTH,
            max_items: DEFAULT_MAX_ITEMS,
        }
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// The depth actually used when rendering
    #[inline]
    pub fn effective_depth(&self) -> usize {
        self.depth.max(MIN_DEPTH)
    }
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self::new()
    }
}
