use std::fmt::Write as _;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Seed for deterministic piece generation.
///
/// A 16-byte seed for the piece queue's random number generator. The same
/// seed produces the same piece sequence, which is what makes replays and
/// deterministic tests possible.
#[derive(Debug, Clone, Copy)]
pub struct PieceSeed(pub(crate) [u8; 16]);

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{num:032x}").unwrap();
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u128::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str} ({e})")))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// Random piece source with a one-piece preview.
///
/// Draws each piece type uniformly at random from the 7 kinds and always
/// keeps the upcoming piece visible, so the embedding loop can render a
/// "next" preview.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    rng: Pcg32,
    next: PieceKind,
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceQueue {
    /// Creates a queue seeded from the thread-local generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic draws.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut rng = Pcg32::from_seed(seed.0);
        let next = rng.random();
        Self { rng, next }
    }

    /// Returns the upcoming piece without consuming it.
    #[must_use]
    pub fn peek_next(&self) -> PieceKind {
        self.next
    }

    /// Draws the next piece, replacing the preview with a fresh draw.
    pub fn pop_next(&mut self) -> PieceKind {
        std::mem::replace(&mut self.next, self.rng.random())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let seed = PieceSeed([7; 16]);
        let mut a = PieceQueue::with_seed(seed);
        let mut b = PieceQueue::with_seed(seed);
        for _ in 0..50 {
            assert_eq!(a.pop_next(), b.pop_next());
        }
    }

    #[test]
    fn test_peek_matches_pop() {
        let mut queue = PieceQueue::with_seed(PieceSeed([3; 16]));
        for _ in 0..20 {
            let peeked = queue.peek_next();
            assert_eq!(queue.pop_next(), peeked);
        }
    }

    #[test]
    fn test_draws_cover_all_kinds() {
        let mut queue = PieceQueue::with_seed(PieceSeed([1; 16]));
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..500 {
            seen[queue.pop_next().index() as usize - 1] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    mod piece_seed_serialization {
        use super::*;

        #[test]
        fn test_roundtrip_random_seed() {
            let seed: PieceSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(seed.0, deserialized.0);
        }

        #[test]
        fn test_format_is_32_char_hex_string() {
            let seed: PieceSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let hex_str = serialized.trim_matches('"');
            assert_eq!(hex_str.len(), 32);
            assert!(hex_str.chars().all(|c| c.is_ascii_hexdigit()));
        }

        #[test]
        fn test_known_value_sequential_bytes() {
            // Big-endian: the first byte appears first in the hex string.
            let seed = PieceSeed([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76,
                0x54, 0x32, 0x10,
            ]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");

            let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(deserialized.0, seed.0);
        }

        #[test]
        fn test_error_wrong_length() {
            let result: Result<PieceSeed, _> =
                serde_json::from_str("\"0123456789abcdef0123456789abcde\"");
            assert!(result.unwrap_err().to_string().contains("invalid hex"));

            let result: Result<PieceSeed, _> = serde_json::from_str("\"\"");
            assert!(result.unwrap_err().to_string().contains("invalid hex"));
        }

        #[test]
        fn test_error_invalid_hex_characters() {
            let result: Result<PieceSeed, _> =
                serde_json::from_str("\"ghijklmnopqrstuvwxyzghijklmnopqr\"");
            assert!(result.unwrap_err().to_string().contains("invalid hex"));
        }
    }
}
