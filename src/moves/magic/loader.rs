//! Produces the magic bitboard tables the move generator runs on.
//!
//! Table generation involves a randomized search for valid magic numbers
//! (see [`super::search`]), so the result is cached after the first build.

use once_cell::sync::OnceCell;

use super::precompute::{MagicTableSeed, generate_magic_tables};
use super::structs::MagicTables;

/// Arbitrary fixed seed; only its reproducibility across runs matters.
const MAGIC_SEED: u64 = 0x1F2E_3D4C_5B6A_7988;

static MAGIC_TABLES: OnceCell<MagicTables> = OnceCell::new();

/// Returns the magic bitboard tables used for sliding piece attacks.
///
/// Under the `deterministic_magic` feature the same tables are produced on
/// every run, which keeps perft and search output reproducible across
/// machines. Without it, a fresh random search seeds the tables once per
/// process.
pub fn load_magic_tables() -> MagicTables {
    MAGIC_TABLES
        .get_or_init(|| {
            let seed = if cfg!(feature = "deterministic_magic") {
                MagicTableSeed::Fixed(MAGIC_SEED)
            } else {
                MagicTableSeed::Random
            };
            generate_magic_tables(seed).expect("failed to generate magic bitboard tables")
        })
        .clone()
}
