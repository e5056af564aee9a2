/// costar version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default maximum number of BFS levels explored per search.
pub const DEFAULT_MAX_DEPTH: usize = 6;

/// Hard ceiling on `max_depth` accepted at the API boundary.
pub const MAX_SEARCH_DEPTH: usize = 12;

/// Maximum number of movies kept per filmography.
pub const DEFAULT_MAX_MOVIES: usize = 50;

/// Maximum number of actors kept per cast list.
pub const DEFAULT_MAX_CAST: usize = 30;

/// Movie titles shorter than this (after trimming) are treated as noise.
pub const MIN_TITLE_CHARS: usize = 2;

/// Progress percentage at which the search phase begins.
pub const SEARCH_PHASE_START_PERCENT: f64 = 20.0;

/// Width of the search phase in percentage points (20..90).
pub const SEARCH_PHASE_SPAN_PERCENT: f64 = 70.0;

/// Percentage reported as name resolution begins.
pub const RESOLVING_PERCENT: f64 = 10.0;

/// Percentage reported by every terminal event.
pub const COMPLETE_PERCENT: f64 = 100.0;

/// Default web catalog base URL.
pub const DEFAULT_BASE_URL: &str = "https://www.imdb.com";

/// Browser-like user agent; the catalog serves reduced markup to unknown agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
