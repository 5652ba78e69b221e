// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Repeat context dependent artifact priors.
//!
//! Assembly and sequencing artifacts accumulate in homopolymers and
//! microsatellites. The prior probability of an artifact therefore grows with
//! the number of repeat copies around a breakpoint. The prior does not change
//! the evidence of a call; it raises the LOD a call has to reach.

use bio::stats::Prob;

use crate::constants::{MAX_REPEAT_PERIOD, PROB_ARTIFACT_BASE, PROB_ARTIFACT_MAX};

/// Number of copies of the shortest unit (up to `MAX_REPEAT_PERIOD` bases) that
/// the given repeat sequence consists of. Sequences without such a unit count
/// as a single copy, empty sequences as none.
pub fn repeat_count(seq: &str) -> usize {
    let seq = seq.as_bytes();
    if seq.is_empty() {
        return 0;
    }
    (1..=MAX_REPEAT_PERIOD.min(seq.len()))
        .find(|period| is_periodic(seq, *period))
        .map_or(1, |period| seq.len() / period)
}

fn is_periodic(seq: &[u8], period: usize) -> bool {
    seq[period..]
        .iter()
        .zip(seq.iter())
        .all(|(a, b)| a.eq_ignore_ascii_case(b))
}

/// Prior probability for an artifact at a locus with the given number of repeat copies.
///
/// With `scale == 0`, the prior is the constant base rate.
pub fn prob_artifact(repeat_count: usize, scale: f64) -> Prob {
    let prob = *PROB_ARTIFACT_BASE * (1.0 + repeat_count as f64).powf(scale);
    Prob(prob.min(*PROB_ARTIFACT_MAX).max(f64::MIN_POSITIVE))
}

/// Shift of the non-reference LOD threshold caused by the repeat context, i.e.
/// the log10 prior odds for an artifact relative to the base rate.
pub fn threshold_shift(repeat_count: usize, scale: f64) -> f64 {
    log10_odds(prob_artifact(repeat_count, scale)) - log10_odds(PROB_ARTIFACT_BASE)
}

fn log10_odds(prob: Prob) -> f64 {
    (*prob / (1.0 - *prob)).log10()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_count() {
        assert_eq!(repeat_count(""), 0);
        assert_eq!(repeat_count("A"), 1);
        assert_eq!(repeat_count("AAAAAAAA"), 8);
        assert_eq!(repeat_count("aaAAa"), 5);
        assert_eq!(repeat_count("ACACACAC"), 4);
        // partial trailing copy
        assert_eq!(repeat_count("CAGCAGCAGCA"), 3);
        assert_eq!(repeat_count("ACGTTGCA"), 1);
    }

    #[test]
    fn test_no_shift_without_scaling() {
        assert_eq!(threshold_shift(12, 0.0), 0.0);
        assert_eq!(threshold_shift(0, 1.0), 0.0);
        assert_eq!(prob_artifact(12, 0.0), PROB_ARTIFACT_BASE);
    }

    #[test]
    fn test_shift_grows_with_repeats() {
        let short = threshold_shift(2, 1.0);
        let long = threshold_shift(10, 1.0);
        assert!(short > 0.0);
        assert!(long > short);
        assert_relative_eq!(long, threshold_shift(10, 2.0) / 2.0, epsilon = 0.01);
    }

    #[test]
    fn test_negative_scale_lowers_threshold() {
        assert!(threshold_shift(10, -1.0) < 0.0);
        assert!(threshold_shift(1000, -1000.0).is_finite());
    }

    #[test]
    fn test_prior_is_capped() {
        assert_eq!(prob_artifact(1000, 10.0), PROB_ARTIFACT_MAX);
    }
}
