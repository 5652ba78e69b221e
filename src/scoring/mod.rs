// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Classification of breakpoints by two log-odds tests.
//!
//! The non-reference test asks whether any sample carries the variant
//! (maximum likelihood allele frequency vs. absence). The somatic test asks
//! whether the pooled normal evidence is reference (absence vs. heterozygous).
//! A known population variant lowers the bar of the first test and raises the
//! bar of the second one. Repeat context raises the bar of the first test.

use itertools::Itertools;

use crate::breakpoints::{Breakpoint, Genotype, SampleAllele, SampleKind};
use crate::constants::{
    DEFAULT_LOD, DEFAULT_LOD_DB, DEFAULT_LOD_SOMATIC, DEFAULT_LOD_SOMATIC_DB, DEFAULT_SCALE_ERRORS,
};

pub mod artifacts;
pub mod likelihood;

/// LOD cutoffs and repeat error scaling. Any value is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Builder, CopyGetters)]
#[builder(pattern = "owned")]
#[getset(get_copy = "pub")]
pub struct ScoringParameters {
    /// LOD cutoff for the non-reference test.
    #[builder(default = "DEFAULT_LOD")]
    lod: f64,
    /// LOD cutoff for the non-reference test at known population variants.
    #[builder(default = "DEFAULT_LOD_DB")]
    lod_db: f64,
    /// LOD cutoff for the somatic test.
    #[builder(default = "DEFAULT_LOD_SOMATIC")]
    lod_somatic: f64,
    /// LOD cutoff for the somatic test at known population variants.
    #[builder(default = "DEFAULT_LOD_SOMATIC_DB")]
    lod_somatic_db: f64,
    /// Exponent scaling the artifact prior with repeat copies, 0 disables scaling.
    #[builder(default = "DEFAULT_SCALE_ERRORS")]
    scale_errors: f64,
}

impl Default for ScoringParameters {
    fn default() -> Self {
        ScoringParameters {
            lod: DEFAULT_LOD,
            lod_db: DEFAULT_LOD_DB,
            lod_somatic: DEFAULT_LOD_SOMATIC,
            lod_somatic_db: DEFAULT_LOD_SOMATIC_DB,
            scale_errors: DEFAULT_SCALE_ERRORS,
        }
    }
}

impl ScoringParameters {
    /// Non-reference cutoff before repeat context adjustment.
    pub fn non_ref_cutoff(&self, in_population: bool) -> f64 {
        if in_population {
            self.lod_db
        } else {
            self.lod
        }
    }

    pub fn somatic_cutoff(&self, in_population: bool) -> f64 {
        if in_population {
            self.lod_somatic_db
        } else {
            self.lod_somatic
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Verdict {
    #[strum(serialize = "PASS")]
    Pass,
    #[strum(serialize = "FAIL")]
    Fail,
}

/// Test that made a breakpoint fail. The names are used as VCF filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum FailedTest {
    #[strum(serialize = "LOWLOD")]
    LowLod,
    #[strum(serialize = "LOWSOMATIC")]
    LowSomatic,
}

impl FailedTest {
    pub fn description(&self) -> &'static str {
        match self {
            FailedTest::LowLod => "LOD for a non-reference allele below cutoff in all samples",
            FailedTest::LowSomatic => "LOD for the normal being reference below the somatic cutoff",
        }
    }
}

/// Outcome of one log-odds test.
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct HypothesisTest {
    lod: f64,
    threshold: f64,
    passed: bool,
}

impl HypothesisTest {
    pub fn evaluate(lod: f64, threshold: f64) -> Self {
        HypothesisTest {
            lod,
            threshold,
            passed: lod > threshold,
        }
    }

    /// A test that cannot pass, e.g. because there is no coverage.
    pub fn undecidable(threshold: f64) -> Self {
        HypothesisTest {
            lod: 0.0,
            threshold,
            passed: false,
        }
    }
}

/// Scoring results of one sample.
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct SampleScore {
    kind: SampleKind,
    non_ref: HypothesisTest,
    genotype: Genotype,
}

impl SampleScore {
    fn compute(kind: SampleKind, allele: &SampleAllele, threshold: f64) -> Self {
        let (alt, depth) = (u64::from(allele.alt()), u64::from(allele.depth()));
        let non_ref = match likelihood::non_ref_lod(alt, depth) {
            Some(lod) => HypothesisTest::evaluate(lod, threshold),
            None => HypothesisTest::undecidable(threshold),
        };
        SampleScore {
            kind,
            non_ref,
            genotype: likelihood::genotype(alt, depth),
        }
    }

    pub fn lod(&self) -> f64 {
        self.non_ref.lod()
    }
}

#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct Classification {
    /// Per sample results, in sample order.
    #[getset(get = "pub")]
    sample_scores: Vec<SampleScore>,
    /// Non-reference test of the best sample.
    #[getset(get_copy = "pub")]
    non_ref: HypothesisTest,
    /// Somatic test on the pooled normal samples, `None` without normal samples.
    #[getset(get_copy = "pub")]
    somatic: Option<HypothesisTest>,
    /// Whether the call is a somatic one, i.e. no normal sample carries the variant.
    #[getset(get_copy = "pub")]
    somatic_call: bool,
    #[getset(get_copy = "pub")]
    tumor_allele_freq: Option<f64>,
    #[getset(get_copy = "pub")]
    normal_allele_freq: Option<f64>,
    #[getset(get_copy = "pub")]
    verdict: Verdict,
    #[getset(get = "pub")]
    failed_tests: Vec<FailedTest>,
}

impl Classification {
    pub fn is_pass(&self) -> bool {
        self.verdict == Verdict::Pass
    }

    /// Passing somatic call.
    pub fn is_somatic(&self) -> bool {
        self.is_pass() && self.somatic_call
    }

    /// `PASS`, or the failed tests joined by `;`.
    pub fn filter_label(&self) -> String {
        match self.verdict {
            Verdict::Pass => Verdict::Pass.to_string(),
            Verdict::Fail => self.failed_tests.iter().join(";"),
        }
    }
}

/// Pooled (alt, depth) over the samples of one kind. `None` without any sample of that kind.
fn pooled<'a>(
    alleles: impl Iterator<Item = (SampleKind, &'a SampleAllele)>,
    kind: SampleKind,
) -> Option<(u64, u64)> {
    alleles
        .filter(|(k, _)| *k == kind)
        .map(|(_, allele)| (u64::from(allele.alt()), u64::from(allele.depth())))
        .reduce(|(alt_a, depth_a), (alt_b, depth_b)| (alt_a + alt_b, depth_a + depth_b))
}

/// Classify a breakpoint. Pure and deterministic.
pub fn score(breakpoint: &Breakpoint, params: &ScoringParameters) -> Classification {
    let in_population = breakpoint.in_population();
    let repeats = artifacts::repeat_count(breakpoint.site().repeat_seq());
    let non_ref_threshold = params.non_ref_cutoff(in_population)
        + artifacts::threshold_shift(repeats, params.scale_errors());

    let sample_scores = breakpoint
        .alleles_by_kind()
        .map(|(kind, allele)| SampleScore::compute(kind, allele, non_ref_threshold))
        .collect_vec();

    let non_ref = sample_scores
        .iter()
        .map(|score| score.non_ref)
        .filter(|test| test.lod.is_finite())
        .fold(HypothesisTest::undecidable(non_ref_threshold), |best, test| {
            if (test.passed && !best.passed) || (test.passed == best.passed && test.lod > best.lod) {
                test
            } else {
                best
            }
        });

    let germline_evidence = sample_scores
        .iter()
        .any(|score| score.kind == SampleKind::Normal && score.non_ref.passed);

    let tumor = pooled(breakpoint.alleles_by_kind(), SampleKind::Tumor);
    let normal = pooled(breakpoint.alleles_by_kind(), SampleKind::Normal);

    let somatic = normal.map(|(alt, depth)| {
        // discordant pairs are part of the alt count, unless the upstream caller omitted them
        let support = alt.max(breakpoint.discordant().normal);
        let depth = depth.max(support);
        HypothesisTest::evaluate(
            likelihood::ref_lod(support, depth),
            params.somatic_cutoff(in_population),
        )
    });
    let somatic_call = somatic.is_some() && !germline_evidence;

    let mut failed_tests = Vec::new();
    if !non_ref.passed {
        failed_tests.push(FailedTest::LowLod);
    }
    if let Some(somatic) = somatic {
        if somatic_call && !somatic.passed {
            failed_tests.push(FailedTest::LowSomatic);
        }
    }
    let verdict = if failed_tests.is_empty() {
        Verdict::Pass
    } else {
        Verdict::Fail
    };

    let allele_freq = |pooled: Option<(u64, u64)>| {
        pooled.and_then(|(alt, depth)| likelihood::AlleleFreq::estimate(alt, depth).map(|af| af.0))
    };

    Classification {
        sample_scores,
        non_ref,
        somatic,
        somatic_call,
        tumor_allele_freq: allele_freq(tumor),
        normal_allele_freq: allele_freq(normal),
        verdict,
        failed_tests,
    }
}
