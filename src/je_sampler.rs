//! Initial-state sampling
//!
//! Every agent draws a private geometric variable at creation. Its level, the
//! round at which the agent stops racing through doors, is derived from it.

use std::collections::BTreeMap;

use rand::Rng;

use crate::je_interface::{Round, Sample};

/// Draw a geometric variable with parameter 1/2 on {1, 2, 3, ...}
///
/// Start at 1 and flip a fair coin, incrementing while it lands heads.
/// `P(sample = k) = 2^-k`.
pub fn geometric_sample<R: Rng + ?Sized>(rng: &mut R) -> Sample {
    let mut sample: Sample = 1;
    while rng.gen::<bool>() {
        sample = sample.saturating_add(1);
    }
    sample
}

/// Level of a sample: 0 for samples <= 1, otherwise ceil(log2(sample))
pub fn level_of(sample: Sample) -> Round {
    if sample <= 1 {
        0
    } else {
        // bit length of (sample - 1) is exactly ceil(log2(sample))
        (Sample::BITS - (sample - 1).leading_zeros()) as Round
    }
}

/// Final round of a population: the level of its largest sample
pub fn max_round_of(samples: &[Sample]) -> Round {
    samples.iter().copied().max().map(level_of).unwrap_or(0)
}

/// Histogram of sampled initial values across a population
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleDistribution {
    counts: BTreeMap<Sample, usize>,
    total: usize,
}

impl SampleDistribution {
    pub fn from_samples(samples: &[Sample]) -> Self {
        let mut counts = BTreeMap::new();
        for &sample in samples {
            *counts.entry(sample).or_insert(0) += 1;
        }
        Self {
            counts,
            total: samples.len(),
        }
    }

    /// Number of agents that drew `value`
    pub fn count_of(&self, value: Sample) -> usize {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    pub fn max_sample(&self) -> Option<Sample> {
        self.counts.keys().next_back().copied()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Observed (value, count) pairs in increasing value order
    pub fn iter(&self) -> impl Iterator<Item = (Sample, usize)> + '_ {
        self.counts.iter().map(|(&value, &count)| (value, count))
    }

    /// Counts for every value in `0..=max_sample`, zeros included
    pub fn dense(&self) -> Vec<usize> {
        match self.max_sample() {
            Some(max) => (0..=max).map(|value| self.count_of(value)).collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_level_examples() {
        assert_eq!(level_of(1), 0);
        assert_eq!(level_of(2), 1);
        assert_eq!(level_of(3), 2);
        assert_eq!(level_of(4), 2);
        assert_eq!(level_of(5), 3);
        assert_eq!(level_of(8), 3);
        assert_eq!(level_of(9), 4);
        assert_eq!(level_of(16), 4);
        assert_eq!(level_of(17), 5);
    }

    #[test]
    fn test_level_is_ceil_log2() {
        for sample in 2..10_000u32 {
            let level = level_of(sample) as u32;
            assert!(1u32 << (level - 1) < sample, "sample {}", sample);
            assert!(sample <= 1u32 << level, "sample {}", sample);
        }
    }

    #[test]
    fn test_max_round_of() {
        assert_eq!(max_round_of(&[1, 1, 1]), 0);
        assert_eq!(max_round_of(&[1, 16]), 4);
        assert_eq!(max_round_of(&[3, 1, 2]), 2);
        assert_eq!(max_round_of(&[]), 0);
    }

    #[test]
    fn test_samples_are_positive() {
        let mut rng = StdRng::from_seed([7u8; 32]);
        for _ in 0..10_000 {
            assert!(geometric_sample(&mut rng) >= 1);
        }
    }

    #[test]
    fn test_geometric_distribution() {
        let mut rng = StdRng::from_seed([42u8; 32]);
        let draws = 200_000;
        let samples: Vec<Sample> = (0..draws).map(|_| geometric_sample(&mut rng)).collect();
        let dist = SampleDistribution::from_samples(&samples);

        for k in 1..=5u32 {
            let expected = 0.5f64.powi(k as i32);
            let observed = dist.count_of(k) as f64 / draws as f64;
            assert!(
                (observed - expected).abs() < 0.01,
                "P({}) = {} expected {}",
                k,
                observed,
                expected
            );
        }
    }

    #[test]
    fn test_sampling_is_reproducible() {
        let mut a = StdRng::from_seed([3u8; 32]);
        let mut b = StdRng::from_seed([3u8; 32]);
        let first: Vec<Sample> = (0..100).map(|_| geometric_sample(&mut a)).collect();
        let second: Vec<Sample> = (0..100).map(|_| geometric_sample(&mut b)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_distribution_histogram() {
        let dist = SampleDistribution::from_samples(&[1, 1, 3, 2, 1, 3]);

        assert_eq!(dist.total(), 6);
        assert_eq!(dist.max_sample(), Some(3));
        assert_eq!(dist.count_of(1), 3);
        assert_eq!(dist.count_of(4), 0);
        assert_eq!(dist.dense(), vec![0, 3, 1, 2]);
        assert_eq!(dist.iter().collect::<Vec<_>>(), vec![(1, 3), (2, 1), (3, 2)]);

        assert!(SampleDistribution::from_samples(&[]).dense().is_empty());
    }
}
