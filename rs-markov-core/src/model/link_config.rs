use super::random::{RAND_MAX, RAND_RANGE};
use crate::error::{MarkovError, Result};

/// Link parameters of a generated page.
///
/// # Responsibilities
/// - Hold the probability of wrapping a word in an internal or external link
/// - Describe the synthetic link targets (page count, external host names)
///
/// # Invariants
/// - Both probabilities lie in `[0.0, 1.0]`
#[derive(Clone, Debug, PartialEq)]
pub struct LinkConfig {
	/// Probability that a word becomes an internal link.
	intern_link_threshold: f64,

	/// Probability that a word that is not an internal link becomes an external one.
	extern_link_threshold: f64,

	/// Links point to pages `0..links_total`.
	pub links_total: u32,

	/// External hosts are named `{extern_prefix}{index}{extern_suffix}`.
	pub extern_prefix: String,

	pub extern_suffix: String,

	/// External host indices are drawn in `0..extern_servers`.
	pub extern_servers: u32,
}

impl Default for LinkConfig {
	fn default() -> Self {
		Self {
			intern_link_threshold: 0.1,
			extern_link_threshold: 0.0,
			links_total: 100_000,
			extern_prefix: "serv".to_owned(),
			extern_suffix: ".testbed.local".to_owned(),
			extern_servers: 1,
		}
	}
}

impl LinkConfig {
	pub fn intern_link_threshold(&self) -> f64 {
		self.intern_link_threshold
	}

	pub fn extern_link_threshold(&self) -> f64 {
		self.extern_link_threshold
	}

	/// Sets the internal link probability (0.0..=1.0).
	///
	/// # Errors
	/// Returns an error if the value is outside the valid range.
	pub fn set_intern_link_threshold(&mut self, probability: f64) -> Result<()> {
		self.intern_link_threshold = check_probability(probability)?;
		Ok(())
	}

	/// Sets the external link probability (0.0..=1.0).
	///
	/// # Errors
	/// Returns an error if the value is outside the valid range.
	pub fn set_extern_link_threshold(&mut self, probability: f64) -> Result<()> {
		self.extern_link_threshold = check_probability(probability)?;
		Ok(())
	}

	/// Draw bound of the internal link decision.
	pub(crate) fn intern_draw_bound(&self) -> u64 {
		draw_bound(self.intern_link_threshold)
	}

	/// Draw bound of the external link decision.
	pub(crate) fn extern_draw_bound(&self) -> u64 {
		draw_bound(self.extern_link_threshold)
	}
}

fn check_probability(probability: f64) -> Result<f64> {
	if (0.0..=1.0).contains(&probability) {
		Ok(probability)
	} else {
		Err(MarkovError::InvalidProbability(probability))
	}
}

/// A decision holds when `draw < draw_bound(p)`.
///
/// `floor(RAND_MAX * p)` below 1.0; `1.0` accepts every draw.
fn draw_bound(probability: f64) -> u64 {
	if probability >= 1.0 {
		RAND_RANGE
	} else {
		(RAND_MAX as f64 * probability) as u64
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let config = LinkConfig::default();
		assert_eq!(config.intern_link_threshold(), 0.1);
		assert_eq!(config.extern_link_threshold(), 0.0);
		assert_eq!(config.links_total, 100_000);
		assert_eq!(config.extern_prefix, "serv");
		assert_eq!(config.extern_suffix, ".testbed.local");
		assert_eq!(config.extern_servers, 1);
	}

	#[test]
	fn probabilities_are_checked() {
		let mut config = LinkConfig::default();
		assert!(config.set_intern_link_threshold(1.5).is_err());
		assert!(config.set_extern_link_threshold(-0.1).is_err());
		assert!(config.set_intern_link_threshold(f64::NAN).is_err());
		assert_eq!(config, LinkConfig::default());

		config.set_intern_link_threshold(1.0).unwrap();
		config.set_extern_link_threshold(0.0).unwrap();
		assert_eq!(config.intern_link_threshold(), 1.0);
	}

	#[test]
	fn bounds_cover_the_edges() {
		assert_eq!(draw_bound(0.0), 0);
		assert_eq!(draw_bound(1.0), RAND_RANGE);
		assert_eq!(draw_bound(0.5), (RAND_MAX / 2) as u64);
		assert!(draw_bound(0.999_999) <= RAND_MAX as u64);
	}
}
