/// Constants used by pipeline configuration defaults.
pub mod pipeline {
    /// Default seed for seeded-random tie-breaking (matches the published figures).
    pub const DEFAULT_SEED: u64 = 42;
}

/// Constants used by label display helpers.
pub mod labels {
    /// Default character budget for truncated node labels.
    pub const DEFAULT_TRUNCATE_CHARS: usize = 30;
    /// Default segment width for wrapped labels.
    pub const DEFAULT_WRAP_CHARS: usize = 20;
    /// Ellipsis appended to truncated labels.
    pub const ELLIPSIS: char = '…';
}
