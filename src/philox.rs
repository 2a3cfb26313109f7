//! Philox-4x32-10 counter-based generator.
//!
//! State is a 64-bit key (the seed) and a 128-bit counter block
//! `[counter lo, counter hi, stream lo, stream hi]`. Every block yields four
//! 32-bit lanes, consumed as two 64-bit values: the first is returned, the
//! second is buffered for the next call, then the counter advances.
//!
//! The generator implements [`RngCore`] and [`SeedableRng`], so every
//! higher level draw (`gen_range`, `choose`, `shuffle`) is a pure function of
//! `(seed, stream)`.

use rand::{RngCore, SeedableRng};

const MUL_0: u32 = 0xD251_1F53;
const MUL_1: u32 = 0xCD9E_8D57;
const BUMP_0: u32 = 0x9E37_79B9;
const BUMP_1: u32 = 0xBB67_AE85;
const ROUNDS: usize = 10;

#[inline(always)]
fn mulhilo(a: u32, b: u32) -> (u32, u32) {
  let product = a as u64 * b as u64;
  ((product >> 32) as u32, product as u32)
}

#[inline(always)]
fn round(ctr: [u32; 4], key: [u32; 2]) -> [u32; 4] {
  let (hi0, lo0) = mulhilo(MUL_0, ctr[0]);
  let (hi1, lo1) = mulhilo(MUL_1, ctr[2]);
  [hi1 ^ ctr[1] ^ key[0], lo1, hi0 ^ ctr[3] ^ key[1], lo0]
}

/// Ten rounds over one counter block, bumping the key between rounds.
pub fn block(mut ctr: [u32; 4], mut key: [u32; 2]) -> [u32; 4] {
  for i in 0..ROUNDS {
    if i > 0 {
      key = [key[0].wrapping_add(BUMP_0), key[1].wrapping_add(BUMP_1)];
    }
    ctr = round(ctr, key);
  }
  ctr
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Philox {
  key: [u32; 2],
  counter: u64,
  stream: u64,
  buffered: Option<u64>,
}

impl Philox {
  pub fn new(seed: u64) -> Self {
    Self::with_stream(seed, 0)
  }

  /// Independent stream under the same seed. Parallel tasks each take their
  /// own stream index, so no generator is ever shared.
  pub fn with_stream(seed: u64, stream: u64) -> Self {
    Self {
      key: [seed as u32, (seed >> 32) as u32],
      counter: 0,
      stream,
      buffered: None
    }
  }

  pub fn counter(&self) -> u64 { self.counter }

  fn next_block(&mut self) -> (u64, u64) {
    let ctr = [
      self.counter as u32,
      (self.counter >> 32) as u32,
      self.stream as u32,
      (self.stream >> 32) as u32,
    ];
    let out = block(ctr, self.key);
    self.counter = self.counter.wrapping_add(1);
    (
      out[0] as u64 | (out[1] as u64) << 32,
      out[2] as u64 | (out[3] as u64) << 32
    )
  }
}

impl RngCore for Philox {
  fn next_u32(&mut self) -> u32 {
    self.next_u64() as u32
  }

  fn next_u64(&mut self) -> u64 {
    match self.buffered.take() {
      Some(value) => value,
      None => {
        let (first, second) = self.next_block();
        self.buffered = Some(second);
        first
      }
    }
  }

  fn fill_bytes(&mut self, dest: &mut [u8]) {
    dest.chunks_mut(8).for_each(|chunk| {
      let bytes = self.next_u64().to_le_bytes();
      chunk.copy_from_slice(&bytes[..chunk.len()]);
    });
  }

  fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
    self.fill_bytes(dest);
    Ok(())
  }
}

impl SeedableRng for Philox {
  type Seed = [u8; 8];

  fn from_seed(seed: Self::Seed) -> Self {
    Self::new(u64::from_le_bytes(seed))
  }

  /// The seed is the key as-is, without the default PCG expansion.
  fn seed_from_u64(state: u64) -> Self {
    Self::new(state)
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    rand::Rng
  };

  // Random123 known-answer vector for philox4x32-10, zero counter and key.
  #[test] fn known_answer_zero() {
    assert_eq!(
      block([0; 4], [0; 2]),
      [0x6627_e8d5, 0xe169_c58d, 0xbc57_ac4c, 0x9b00_dbd8]
    );
  }

  #[test] fn same_seed_same_sequence() {
    let mut a = Philox::seed_from_u64(0xDEAD_BEEF);
    let mut b = Philox::seed_from_u64(0xDEAD_BEEF);
    for _ in 0..1000 {
      assert_eq!(a.next_u64(), b.next_u64());
    }
  }

  #[test] fn derived_draws_are_reproducible() {
    let mut a = Philox::new(7);
    let mut b = Philox::new(7);
    let draw = |rng: &mut Philox| (
      rng.gen_range(-3.0..=5.0f64),
      rng.gen_range(0..=10usize),
      rng.gen::<bool>()
    );
    for _ in 0..200 {
      assert_eq!(draw(&mut a), draw(&mut b));
    }
  }

  #[test] fn buffers_second_half_of_block() {
    let mut rng = Philox::new(42);
    let first = rng.next_u64();
    assert_eq!(rng.counter(), 1);
    let second = rng.next_u64();
    assert_eq!(rng.counter(), 1);
    rng.next_u64();
    assert_eq!(rng.counter(), 2);

    let out = block([0, 0, 0, 0], [42, 0]);
    assert_eq!(first, out[0] as u64 | (out[1] as u64) << 32);
    assert_eq!(second, out[2] as u64 | (out[3] as u64) << 32);
  }

  #[test] fn seeds_and_streams_diverge() {
    let head = |mut rng: Philox| (0..16).map(|_| rng.next_u64()).collect::<Vec<_>>();
    assert_ne!(head(Philox::new(1)), head(Philox::new(2)));
    assert_ne!(head(Philox::with_stream(1, 0)), head(Philox::with_stream(1, 1)));
    assert_eq!(head(Philox::with_stream(1, 3)), head(Philox::with_stream(1, 3)));
  }

  #[test] fn fill_bytes_matches_u64_stream() {
    let mut a = Philox::new(9);
    let mut b = Philox::new(9);
    let mut bytes = [0u8; 12];
    a.fill_bytes(&mut bytes);
    assert_eq!(&bytes[..8], &b.next_u64().to_le_bytes());
    assert_eq!(&bytes[8..], &b.next_u64().to_le_bytes()[..4]);
  }
}
