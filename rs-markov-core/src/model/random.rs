/// Largest value a draw can take.
pub const RAND_MAX: u32 = 0x7fff_ffff;

/// Number of distinct draw values: draws lie in `[0, RAND_RANGE)`.
pub const RAND_RANGE: u64 = RAND_MAX as u64 + 1;

/// Stream of pseudo-random draws consumed by the generator.
///
/// Every draw lies in `[0, RAND_RANGE)`.
pub trait RandomSource {
	fn next_draw(&mut self) -> u32;
}

/// Linear congruential generator seeded per request.
///
/// `seed = seed * 1103515245 + 12345`, the draw is the low 31 bits of the new
/// seed. The same seed always yields the same sequence, which is what makes a
/// seed usable as a page identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lcg {
	seed: u32,
}

impl Lcg {
	pub fn new(seed: u32) -> Self {
		Self { seed }
	}

	/// Current internal state.
	pub fn seed(&self) -> u32 {
		self.seed
	}
}

impl RandomSource for Lcg {
	fn next_draw(&mut self) -> u32 {
		self.seed = self.seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
		(self.seed as u64 % RAND_RANGE) as u32
	}
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
	fn next_draw(&mut self) -> u32 {
		(**self).next_draw()
	}
}
