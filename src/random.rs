//! The random source every generator draws from.
//!
//! Generators never reach for a global RNG. They take `&mut dyn RandomSource`,
//! so the server can pass `rand::thread_rng()` while tests pass a seeded
//! `StdRng` or a scripted sequence of draws.

use rand::Rng;

pub trait RandomSource {
  /// Uniform integer in `lo..=hi`. Callers guarantee `lo <= hi`.
  fn int_in(&mut self, lo: u32, hi: u32) -> u32;

  /// Uniform float in `[0, 1)`.
  fn unit(&mut self) -> f64;
}

impl<R: Rng> RandomSource for R {
  fn int_in(&mut self, lo: u32, hi: u32) -> u32 {
    self.gen_range(lo..=hi)
  }

  fn unit(&mut self) -> f64 {
    self.gen::<f64>()
  }
}

/// Uniform pick from a non-empty slice.
pub(crate) fn pick<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
  if items.is_empty() {
    return None;
  }
  let last = u32::try_from(items.len() - 1).unwrap_or(u32::MAX);
  items.get(rng.int_in(0, last) as usize)
}

/// True with probability `p`.
pub(crate) fn chance(rng: &mut dyn RandomSource, p: f64) -> bool {
  rng.unit() < p
}
