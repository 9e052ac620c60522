//! Deterministic seeded randomness.
//!
//! A game's whole random trajectory is a function of its [`Seed`]: text seeds
//! are hashed with 32-bit FNV-1a and the resulting integer drives a Mulberry32
//! generator. Everything here is plain wrapping `u32` arithmetic, so the draw
//! sequence is identical on every platform and in every run.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 16_777_619;
const MULBERRY_INCREMENT: u32 = 0x6d2b_79f5;
const TWO_POW_32: f64 = 4_294_967_296.0;

const SEED_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_SEED_LEN: usize = 8;

/// 32-bit FNV-1a over the UTF-16 code units of `text`.
///
/// Code units rather than bytes keep the hash equal to the one a browser
/// client computes with `charCodeAt`, so seeds can be shared between them.
pub fn fnv1a_32(text: &str) -> u32 {
    text.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Game seed, either free text or a raw 32-bit integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    Number(u32),
    Text(String),
}

impl Seed {
    /// Integer state the generator starts from.
    pub fn to_state(&self) -> u32 {
        match self {
            Seed::Number(n) => *n,
            Seed::Text(text) => fnv1a_32(text),
        }
    }

    /// Fresh shareable seed of the form `seed-xxxxxxxx`.
    ///
    /// This is the only non-deterministic constructor; nothing calls it
    /// implicitly.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        let suffix: String = (0..RANDOM_SEED_LEN)
            .map(|_| char::from(SEED_ALPHABET[rng.random_range(0..SEED_ALPHABET.len())]))
            .collect();
        Seed::Text(format!("seed-{suffix}"))
    }
}

impl From<&str> for Seed {
    fn from(text: &str) -> Self {
        Seed::Text(text.to_owned())
    }
}

impl From<String> for Seed {
    fn from(text: String) -> Self {
        Seed::Text(text)
    }
}

impl From<u32> for Seed {
    fn from(n: u32) -> Self {
        Seed::Number(n)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Number(n) => write!(f, "{n}"),
            Seed::Text(text) => f.write_str(text),
        }
    }
}

/// Mulberry32 stream owned by exactly one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: u32,
    draws: u64,
}

impl SeededRng {
    pub fn new(seed: &Seed) -> Self {
        Self::from_state(seed.to_state())
    }

    pub const fn from_state(state: u32) -> Self {
        Self { state, draws: 0 }
    }

    /// Next raw 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        self.draws += 1;

        let a = self.state;
        let mut t = (a ^ (a >> 15)).wrapping_mul(1 | a);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t));
        t ^ (t >> 14)
    }

    /// Next float in `[0, 1)`.
    pub fn next_float(&mut self) -> f64 {
        f64::from(self.next_u32()) / TWO_POW_32
    }

    /// `items[floor(next_float() * len)]`.
    ///
    /// # Panics
    ///
    /// Panics when `items` is empty. Callers check for legal moves before
    /// drawing, so an empty slice here is a broken invariant.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "SeededRng::choice called with an empty slice");
        let index = (self.next_float() * items.len() as f64).floor() as usize;
        // next_float() < 1.0, so the index is always in range.
        &items[index.min(items.len() - 1)]
    }

    /// Number of draws taken so far.
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

#[cfg(test)]
mod tests {
    use super::{fnv1a_32, Seed, SeededRng};

    #[test]
    fn fnv1a_matches_reference_values() {
        assert_eq!(fnv1a_32(""), 0x811c_9dc5);
        assert_eq!(fnv1a_32("a"), 0xe40c_292c);
        assert_eq!(fnv1a_32("seed-ChillChess"), 0x3e84_d8ad);
        assert_eq!(fnv1a_32("p1"), 0xa04e_d67a);
    }

    #[test]
    fn mulberry32_reference_sequence_for_zero_seed() {
        let mut rng = SeededRng::from_state(0);
        let draws: Vec<f64> = (0..3).map(|_| rng.next_float()).collect();
        assert_eq!(
            draws,
            vec![0.26642920868471265, 0.0003297457005828619, 0.2232720274478197]
        );
    }

    #[test]
    fn text_seed_reference_sequence() {
        let mut rng = SeededRng::new(&Seed::from("seed-ChillChess"));
        assert_eq!(rng.next_float(), 0.4923247715923935);
        assert_eq!(rng.next_float(), 0.09059436852112412);
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn same_seed_gives_identical_streams() {
        let mut a = SeededRng::new(&Seed::from(42u32));
        let mut b = SeededRng::new(&Seed::from(42u32));
        for _ in 0..1000 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn text_and_number_seeds_agree_when_hash_matches() {
        let mut text = SeededRng::new(&Seed::from("p1"));
        let mut number = SeededRng::new(&Seed::from(0xa04e_d67a_u32));
        assert_eq!(text.next_u32(), number.next_u32());
    }

    #[test]
    fn choice_indexes_by_scaled_float() {
        let mut rng = SeededRng::new(&Seed::from("p1"));
        let picks: Vec<char> = (0..4).map(|_| *rng.choice(&['q', 'r', 'b', 'n'])).collect();
        assert_eq!(picks, vec!['q', 'q', 'b', 'r']);
    }

    #[test]
    #[should_panic(expected = "empty slice")]
    fn choice_on_empty_slice_is_a_contract_violation() {
        let mut rng = SeededRng::from_state(7);
        let empty: [u8; 0] = [];
        rng.choice(&empty);
    }

    #[test]
    fn random_seeds_are_shareable_text() {
        let Seed::Text(text) = Seed::random() else {
            panic!("random seeds are text seeds");
        };
        assert!(text.starts_with("seed-"));
        assert_eq!(text.len(), "seed-".len() + 8);
        assert!(text["seed-".len()..]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }
}
