//! Builds a full set of rook/bishop magic bitboard tables from scratch.

use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::utils::square_index;

use super::attacks::{bishop_attacks_per_square, rook_attacks_per_square};
use super::search::find_magic_number_for_square;
use super::structs::{BishopMagicTables, MagicEntry, MagicTables, RookMagicTables};

/// Selects how the random search for magic numbers is seeded.
pub enum MagicTableSeed {
    /// Seed the RNG deterministically, producing the same tables every run.
    Fixed(u64),
    /// Seed from the OS entropy source; tables differ between runs.
    Random,
}

fn relevant_rook_mask(square: usize) -> u64 {
    let rank = (square / 8) as isize;
    let file = (square % 8) as isize;
    let mut mask = 0u64;

    for r in (rank + 1)..7 {
        mask |= 1u64 << square_index(r as usize, file as usize);
    }
    for r in 1..rank {
        mask |= 1u64 << square_index(r as usize, file as usize);
    }
    for f in (file + 1)..7 {
        mask |= 1u64 << square_index(rank as usize, f as usize);
    }
    for f in 1..file {
        mask |= 1u64 << square_index(rank as usize, f as usize);
    }
    mask
}

fn relevant_bishop_mask(square: usize) -> u64 {
    let rank = (square / 8) as isize;
    let file = (square % 8) as isize;
    let mut mask = 0u64;

    for (dr, df) in [(1isize, 1isize), (1, -1), (-1, 1), (-1, -1)] {
        let mut r = rank + dr;
        let mut f = file + df;
        while (1..=6).contains(&r) && (1..=6).contains(&f) {
            mask |= 1u64 << square_index(r as usize, f as usize);
            r += dr;
            f += df;
        }
    }
    mask
}

/// Enumerates every blocker subset of `mask` via the carry-rippler trick.
fn subsets_of(mask: u64) -> Vec<u64> {
    let mut subsets = Vec::with_capacity(1 << mask.count_ones());
    let mut subset = 0u64;
    loop {
        subsets.push(subset);
        subset = subset.wrapping_sub(mask) & mask;
        if subset == 0 {
            break;
        }
    }
    subsets
}

fn build_entry<R: RngCore>(
    square: usize,
    mask: u64,
    attacks_for: impl Fn(usize, u64) -> u64,
    rng: &mut R,
) -> Result<MagicEntry, String> {
    let blockers = subsets_of(mask);
    let attacks: Vec<u64> = blockers.iter().map(|&b| attacks_for(square, b)).collect();
    let shift = 64 - mask.count_ones();

    let magic = find_magic_number_for_square(&blockers, &attacks, shift, rng)?;

    let mut table = vec![0u64; 1 << mask.count_ones()];
    for (b, a) in blockers.iter().zip(attacks.iter()) {
        let index = (b.wrapping_mul(magic) >> shift) as usize;
        table[index] = *a;
    }

    Ok(MagicEntry {
        magic,
        shift,
        mask,
        table: table.into_boxed_slice(),
    })
}

/// Generates full rook and bishop magic bitboard tables for all 64 squares.
pub fn generate_magic_tables(seed: MagicTableSeed) -> Result<MagicTables, String> {
    match seed {
        MagicTableSeed::Fixed(s) => {
            let mut rng = StdRng::seed_from_u64(s);
            generate_with_rng(&mut rng)
        }
        MagicTableSeed::Random => {
            let mut rng = rand::rng();
            generate_with_rng(&mut rng)
        }
    }
}

fn generate_with_rng<R: RngCore>(rng: &mut R) -> Result<MagicTables, String> {
    let mut rook_entries = Vec::with_capacity(64);
    let mut bishop_entries = Vec::with_capacity(64);

    for square in 0..64 {
        let rook_mask = relevant_rook_mask(square);
        rook_entries.push(build_entry(
            square,
            rook_mask,
            rook_attacks_per_square,
            rng,
        )?);

        let bishop_mask = relevant_bishop_mask(square);
        bishop_entries.push(build_entry(
            square,
            bishop_mask,
            bishop_attacks_per_square,
            rng,
        )?);
    }

    Ok(MagicTables {
        rook: RookMagicTables {
            entries: rook_entries,
        },
        bishop: BishopMagicTables {
            entries: bishop_entries,
        },
    })
}
