// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use bio::stats::Prob;

/// Number of fixed, non-sample columns in a breakpoint table.
pub const FIXED_COLUMNS: usize = 38;

/// Placeholder for empty fields in breakpoint tables.
pub const EMPTY_FIELD: &str = "x";

/// Evidence label of breakpoints that describe an indel.
pub const INDEL_EVIDENCE: &str = "INDEL";

/// Per-read sequencing error rate assumed by the allele fraction likelihoods.
pub static PROB_SEQUENCING_ERROR: Prob = Prob(1e-4);

/// Prior probability for an artifact outside of repetitive sequence.
pub static PROB_ARTIFACT_BASE: Prob = Prob(1e-4);

/// Upper bound for the repeat scaled artifact prior.
pub static PROB_ARTIFACT_MAX: Prob = Prob(0.5);

/// Longest repeat unit considered when counting repeat copies.
pub const MAX_REPEAT_PERIOD: usize = 6;

// Default LOD cutoffs.
pub const DEFAULT_LOD: f64 = 8.0;
pub const DEFAULT_LOD_DB: f64 = 6.0;
pub const DEFAULT_LOD_SOMATIC: f64 = 6.0;
pub const DEFAULT_LOD_SOMATIC_DB: f64 = 10.0;
pub const DEFAULT_SCALE_ERRORS: f64 = 1.0;

/// Number of breakpoint lines scored together before writing.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;
