//! Centralized thresholds for the enumstr generator.
//!
//! Every number that decides the shape of generated code lives here, so the
//! engine, the emitter and the benchmarks read the same values.

// =============================================================================
// Strategy Thresholds
// =============================================================================

/// Largest run count that is still rendered as an ordered range switch.
///
/// One run always uses the single-table strategy. From two up to this many
/// runs, each run gets its own table and a range comparison. Beyond it the
/// generator falls back to a direct value-to-string map, because a long chain
/// of range checks stops paying for itself.
pub const MAX_SWITCH_RUNS: usize = 10;

/// Largest member count decoded with a linear string comparison.
///
/// With more members, decoding builds a hash map from display string to
/// value. `benches/lookup_bench.rs` measures the crossover.
pub const MAX_SWITCH_DECODE_CASES: usize = 32;

// =============================================================================
// Error Message Limits
// =============================================================================

/// Longest input echoed verbatim in a malformed-value error, in characters.
pub const MALFORMED_INPUT_MAX_LEN: usize = 32;

/// Number of leading characters kept when a malformed input is truncated.
///
/// The kept prefix is followed by `...`, so a truncated message never shows
/// more than [`MALFORMED_INPUT_MAX_LEN`] characters of input.
pub const MALFORMED_INPUT_PREFIX_LEN: usize = 29;

// =============================================================================
// Platform
// =============================================================================

/// Pointer width assumed for `int`/`uint`/`uintptr` style kinds when the
/// caller does not configure one.
pub const DEFAULT_POINTER_WIDTH: u32 = 64;
