// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::f64::consts::LN_10;

use bio::stats::{LogProb, Prob};

use crate::breakpoints::Genotype;
use crate::constants::PROB_SEQUENCING_ERROR;

lazy_static! {
    static ref PROB_ERROR: LogProb = LogProb::from(PROB_SEQUENCING_ERROR);
    static ref PROB_NO_ERROR: LogProb = PROB_ERROR.ln_one_minus_exp();
}

/// Fraction of reads carrying the variant allele.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct AlleleFreq(pub f64);

impl AlleleFreq {
    pub fn absent() -> Self {
        AlleleFreq(0.0)
    }

    pub fn heterozygous() -> Self {
        AlleleFreq(0.5)
    }

    pub fn homozygous() -> Self {
        AlleleFreq(1.0)
    }

    /// Maximum likelihood estimate, `None` without any reads.
    pub fn estimate(alt: u64, depth: u64) -> Option<Self> {
        if depth == 0 {
            None
        } else {
            Some(AlleleFreq((alt.min(depth) as f64) / (depth as f64)))
        }
    }
}

/// Likelihood of observing `alt` variant reads out of `depth` reads at the given allele frequency.
///
/// A read shows the variant if it stems from the variant allele and is read
/// correctly, or if it stems from the reference allele and is misread.
pub fn likelihood(alt: u64, depth: u64, allele_freq: AlleleFreq) -> LogProb {
    let alt = alt.min(depth);
    let prob_variant_allele = LogProb::from(Prob(allele_freq.0));
    let prob_ref_allele = prob_variant_allele.ln_one_minus_exp();

    let prob_alt_read = (prob_variant_allele + *PROB_NO_ERROR).ln_add_exp(prob_ref_allele + *PROB_ERROR);
    let prob_ref_read = (prob_variant_allele + *PROB_ERROR).ln_add_exp(prob_ref_allele + *PROB_NO_ERROR);

    LogProb(alt as f64 * *prob_alt_read + (depth - alt) as f64 * *prob_ref_read)
}

/// Log10 likelihood ratio of two hypotheses.
pub fn lod(alternative: LogProb, null: LogProb) -> f64 {
    (*alternative - *null) / LN_10
}

/// LOD that a sample carries the variant (maximum likelihood allele frequency vs. absent).
/// `None` without coverage.
pub fn non_ref_lod(alt: u64, depth: u64) -> Option<f64> {
    AlleleFreq::estimate(alt, depth).map(|allele_freq| {
        lod(
            likelihood(alt, depth, allele_freq),
            likelihood(alt, depth, AlleleFreq::absent()),
        )
    })
}

/// LOD that a sample is reference (absent vs. heterozygous).
/// Without coverage, both hypotheses are equally likely.
pub fn ref_lod(alt: u64, depth: u64) -> f64 {
    lod(
        likelihood(alt, depth, AlleleFreq::absent()),
        likelihood(alt, depth, AlleleFreq::heterozygous()),
    )
}

/// Most likely diploid genotype. Ties resolve towards the reference.
pub fn genotype(alt: u64, depth: u64) -> Genotype {
    if depth == 0 {
        return Genotype::Missing;
    }
    let candidates = [
        (Genotype::HomRef, AlleleFreq::absent()),
        (Genotype::Het, AlleleFreq::heterozygous()),
        (Genotype::HomAlt, AlleleFreq::homozygous()),
    ];
    let mut best = (Genotype::HomRef, LogProb::ln_zero());
    for (genotype, allele_freq) in candidates.iter() {
        let lh = likelihood(alt, depth, *allele_freq);
        if lh > best.1 {
            best = (*genotype, lh);
        }
    }
    best.0
}
