/// Hard cap on records considered by one trend computation.
/// Clustering is O(n²) and is not designed to scale past this.
pub const MAX_TREND_WINDOW: usize = 30;

/// Hard cap on artifacts returned by a history query.
pub const MAX_ARTIFACT_HISTORY: usize = 30;

/// Lowest growth stage.
pub const MIN_GROWTH_STAGE: u8 = 1;

/// Highest growth stage. Counts past the last breakpoint saturate here.
pub const MAX_GROWTH_STAGE: u8 = 5;

/// Number of breakpoints needed to map counts onto stages 1..=5.
pub const GROWTH_BREAKPOINT_COUNT: usize = (MAX_GROWTH_STAGE - MIN_GROWTH_STAGE) as usize;

/// Number of recurring tags / ingredients kept by the frequency trend.
pub const FREQUENCY_TOP_N: usize = 5;

/// Longest configurable trend window age, in days.
pub const MAX_WINDOW_DAYS: u32 = 3_650;

/// Upper bound on concurrent gateway calls during one trend computation.
pub const MAX_EMBED_CONCURRENCY: usize = 64;

/// Upper bound on API retries. Backoff doubles per retry, from 100ms.
pub const MAX_EMBEDDING_RETRIES: u32 = 8;

/// Upper bound on the per-request API timeout.
pub const MAX_EMBEDDING_TIMEOUT_SECS: u64 = 300;
