// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use xxhash_rust::xxh3::xxh3_64;

const CONSONANTS: &[u8] = b"bcdfghjklmnprstvwz";
const VOWELS: &[u8] = b"aeiou";

/// Hashes a textual seed into the numeric seed for the generator.
///
/// XXH3 is a fixed algorithm, so a seed printed by one build reproduces the
/// same jingle in any other build.
pub fn seed_value(seed: &str) -> u64 {
    xxh3_64(seed.as_bytes())
}

/// Creates a fresh generator for one synthesis call. A seed makes the
/// generator deterministic; without one it is seeded from OS entropy.
pub fn rng_for_seed(seed: Option<&str>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed_value(seed)),
        None => StdRng::from_entropy(),
    }
}

/// Generates a short pronounceable seed such as `dobakule`, so a randomly
/// chosen jingle can be reproduced later.
pub fn random_seed<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..8)
        .map(|i| {
            let letters = if i % 2 == 0 { CONSONANTS } else { VOWELS };
            letters[rng.gen_range(0..letters.len())] as char
        })
        .collect()
}
