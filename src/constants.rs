//! Constants for board dimensions and search parameters.
//!
//! The board is a fixed offset hex grid of `R` rows by `C` columns. Cells are
//! addressed by `(row, col)` and stored in bitmaps by linear index
//! `row * C + col`.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of rows.
pub const R: i8 = 11;

/// Number of columns.
pub const C: i8 = 10;

/// Total number of cells (`R * C`). Must fit in the 128-bit cell bitmap.
pub const N: usize = (R as usize) * (C as usize);

const _: () = assert!(N <= 128, "board does not fit in the cell bitmap");

// =============================================================================
// Search Parameters
// =============================================================================

/// Escape distance reported when the cat cannot reach any edge cell.
///
/// No real distance can reach `N`, so it doubles as "trapped".
pub const UNREACHABLE: usize = N;

/// Default number of node expansions per automated-player search.
pub const DEFAULT_MAX_EXPANSIONS: usize = 50_000;

// =============================================================================
// Board Generation
// =============================================================================

/// Number of random wall placements attempted for a generated board.
pub const RANDOM_WALLS: usize = 8;

// =============================================================================
// Board Text Format
// =============================================================================

/// Token for the cat's cell.
pub const TOKEN_CAT: char = 'C';

/// Token for a blocked cell.
pub const TOKEN_BLOCKED: char = '#';

/// Token for an open cell.
pub const TOKEN_OPEN: char = '-';
