//! Span definitions per operation: search, level, fetch.

/// Create the root span for one connection search.
#[macro_export]
macro_rules! search_span {
    ($search_id:expr, $start:expr, $target:expr, $max_depth:expr) => {
        tracing::info_span!(
            "costar.search",
            search_id = %$search_id,
            start = %$start,
            target = %$target,
            max_depth = $max_depth
        )
    };
}

/// Create a span for one BFS level.
#[macro_export]
macro_rules! level_span {
    ($depth:expr, $frontier:expr) => {
        tracing::debug_span!("costar.level", depth = $depth, frontier = $frontier)
    };
}

/// Create a span for one catalog request.
#[macro_export]
macro_rules! fetch_span {
    ($kind:expr, $key:expr) => {
        tracing::debug_span!("costar.fetch", kind = $kind, key = %$key)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SEARCH: &str = "costar.search";
    pub const LEVEL: &str = "costar.level";
    pub const FETCH: &str = "costar.fetch";
}
