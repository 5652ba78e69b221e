// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::str::FromStr;

use anyhow::Result;
use itertools::Itertools;

use crate::constants::EMPTY_FIELD;
use crate::errors::{malformed_record, Error};

/// Number of colon separated values in a serialized sample allele.
pub(crate) const ALLELE_FIELDS: usize = 9;

/// Role of a sample, encoded by the first character of its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SampleKind {
    #[strum(serialize = "tumor")]
    Tumor,
    #[strum(serialize = "normal")]
    Normal,
}

impl SampleKind {
    pub fn of(name: &str) -> Result<Self, Error> {
        match name.chars().next() {
            Some('t') => Ok(SampleKind::Tumor),
            Some('n') => Ok(SampleKind::Normal),
            _ => Err(Error::InvalidSampleName {
                name: name.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Genotype {
    #[strum(serialize = "0/0")]
    HomRef,
    #[strum(serialize = "0/1")]
    Het,
    #[strum(serialize = "1/1")]
    HomAlt,
    #[strum(serialize = "./.")]
    Missing,
}

/// Read evidence of one sample at a breakpoint.
///
/// Serialized as `split:cigar:alt:ref:cov:disc:gt:lod:reads`. Genotype and LOD
/// are results of scoring and are therefore not kept when parsing; they are
/// rendered from the classification on output.
#[derive(Debug, Clone, PartialEq, Default, CopyGetters, Getters)]
pub struct SampleAllele {
    #[getset(get_copy = "pub")]
    split: u32,
    #[getset(get_copy = "pub")]
    cigar: u32,
    /// Reads supporting the variant, discordant pairs included.
    #[getset(get_copy = "pub")]
    alt: u32,
    #[getset(get_copy = "pub")]
    ref_count: u32,
    #[getset(get_copy = "pub")]
    cov: u32,
    /// Discordant read pairs supporting the variant.
    #[getset(get_copy = "pub")]
    disc: u32,
    #[getset(get = "pub")]
    reads: Vec<String>,
}

impl SampleAllele {
    pub fn new(alt: u32, cov: u32, disc: u32) -> Self {
        SampleAllele {
            alt,
            cov,
            disc,
            ref_count: cov.saturating_sub(alt),
            ..Default::default()
        }
    }

    pub fn with_split(mut self, split: u32, cigar: u32) -> Self {
        self.split = split;
        self.cigar = cigar;
        self
    }

    pub fn with_reads(mut self, reads: Vec<String>) -> Self {
        self.reads = reads;
        self
    }

    /// Coverage used for scoring. Never lower than the supporting read count.
    pub fn depth(&self) -> u32 {
        self.cov.max(self.alt)
    }

    /// Parse a serialized allele. `line` is only used for error reporting.
    pub(crate) fn parse(value: &str, line: usize) -> Result<Self, Error> {
        // Read names may contain colons, hence they are kept as the last value.
        let values = value.splitn(ALLELE_FIELDS, ':').collect_vec();
        if values.len() != ALLELE_FIELDS {
            return Err(malformed_record(
                line,
                &format!(
                    "sample allele '{}' has {} values, expected {}",
                    value,
                    values.len(),
                    ALLELE_FIELDS
                ),
            ));
        }
        let count = |i: usize, name: &str| -> Result<u32, Error> {
            values[i].parse().map_err(|_| {
                malformed_record(
                    line,
                    &format!("invalid {} count '{}' in sample allele", name, values[i]),
                )
            })
        };
        // Scoring results of a previous run have to be well-formed even if they are recomputed.
        Genotype::from_str(values[6]).map_err(|_| {
            malformed_record(line, &format!("invalid genotype '{}' in sample allele", values[6]))
        })?;
        values[7].parse::<f64>().map_err(|_| {
            malformed_record(line, &format!("invalid LOD '{}' in sample allele", values[7]))
        })?;

        Ok(SampleAllele {
            split: count(0, "split")?,
            cigar: count(1, "cigar")?,
            alt: count(2, "alt")?,
            ref_count: count(3, "ref")?,
            cov: count(4, "coverage")?,
            disc: count(5, "discordant")?,
            reads: parse_read_names(values[8]),
        })
    }
}

pub(crate) fn parse_read_names(value: &str) -> Vec<String> {
    if value.is_empty() || value == EMPTY_FIELD {
        Vec::new()
    } else {
        value.split(',').map(|name| name.to_owned()).collect()
    }
}
