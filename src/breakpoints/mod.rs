// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Breakpoint candidates as stored in breakpoint tables.
//!
//! A table row is turned into a [`Breakpoint`] in two steps. First,
//! [`ParsedBreakpoint::from_line`] reads the fixed columns and the sample
//! alleles, which are keyed by their position only. Second,
//! [`ParsedBreakpoint::with_sample_names`] attaches the sample names declared
//! in the table [`Header`]. Annotation, aggregation and scoring then each
//! consume a breakpoint and return a new one.

use std::str::FromStr;

use anyhow::Result;
use bio_types::genome::Locus;
use linear_map::LinearMap;

use crate::breakpoints::header::column;
use crate::constants::{EMPTY_FIELD, FIXED_COLUMNS, INDEL_EVIDENCE};
use crate::errors::{malformed_record, Error};
use crate::scoring::{self, Classification, ScoringParameters};

pub mod allele;
pub mod header;

pub use allele::{Genotype, SampleAllele, SampleKind};
pub use header::Header;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Strand {
    #[strum(serialize = "+")]
    Forward,
    #[strum(serialize = "-")]
    Reverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreakpointKind {
    Indel,
    Structural,
}

/// Identity of a breakpoint: one locus for indels, both anchors for SVs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakpointId {
    Indel(Locus),
    Structural(Locus, Locus),
}

/// Discordant read pair support, summed over tumor and normal samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, new)]
pub struct DiscordantCounts {
    pub tumor: u64,
    pub normal: u64,
}

/// Known population variant overlapping a breakpoint.
#[derive(Debug, Clone, PartialEq, Eq, new, Getters)]
#[getset(get = "pub")]
pub struct PopulationMatch {
    id: String,
}

/// The fixed columns of a breakpoint table row.
///
/// Raw values are kept so that columns which are not interpreted here are
/// written back verbatim.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct Site {
    fields: Vec<String>,
    #[getset(get = "pub")]
    chrom1: String,
    #[getset(get_copy = "pub")]
    pos1: u64,
    #[getset(get_copy = "pub")]
    strand1: Strand,
    #[getset(get = "pub")]
    chrom2: String,
    #[getset(get_copy = "pub")]
    pos2: u64,
    #[getset(get_copy = "pub")]
    strand2: Strand,
    #[getset(get_copy = "pub")]
    span: i64,
    #[getset(get_copy = "pub")]
    kind: BreakpointKind,
}

impl Site {
    fn parse(fields: Vec<String>, line: usize) -> Result<Self, Error> {
        fn value<T: FromStr>(fields: &[String], col: usize, line: usize) -> Result<T, Error> {
            fields[col].parse().map_err(|_| {
                malformed_record(
                    line,
                    &format!("invalid value '{}' in column {}", fields[col], col + 1),
                )
            })
        }
        let chrom = |col: usize| -> Result<String, Error> {
            if fields[col].is_empty() {
                Err(malformed_record(
                    line,
                    &format!("empty chromosome in column {}", col + 1),
                ))
            } else {
                Ok(fields[col].clone())
            }
        };

        let kind = if fields[column::EVIDENCE] == INDEL_EVIDENCE {
            BreakpointKind::Indel
        } else {
            BreakpointKind::Structural
        };

        Ok(Site {
            chrom1: chrom(column::CHROM1)?,
            pos1: value(&fields, column::POS1, line)?,
            strand1: value(&fields, column::STRAND1, line)?,
            chrom2: chrom(column::CHROM2)?,
            pos2: value(&fields, column::POS2, line)?,
            strand2: value(&fields, column::STRAND2, line)?,
            span: value(&fields, column::SPAN, line)?,
            kind,
            fields,
        })
    }

    /// Raw value of a fixed column, `None` if empty.
    pub fn field(&self, col: usize) -> Option<&str> {
        match self.fields[col].as_str() {
            "" | EMPTY_FIELD => None,
            value => Some(value),
        }
    }

    pub fn raw_fields(&self) -> &[String] {
        &self.fields
    }

    pub fn is_indel(&self) -> bool {
        self.kind == BreakpointKind::Indel
    }

    pub fn id(&self) -> BreakpointId {
        let locus1 = Locus::new(self.chrom1.clone(), self.pos1);
        match self.kind {
            BreakpointKind::Indel => BreakpointId::Indel(locus1),
            BreakpointKind::Structural => {
                BreakpointId::Structural(locus1, Locus::new(self.chrom2.clone(), self.pos2))
            }
        }
    }

    pub fn ref_allele(&self) -> Option<&str> {
        self.field(column::REF)
    }

    pub fn alt_allele(&self) -> Option<&str> {
        self.field(column::ALT)
    }

    pub fn evidence(&self) -> Option<&str> {
        self.field(column::EVIDENCE)
    }

    pub fn homology(&self) -> Option<&str> {
        self.field(column::HOMOLOGY)
    }

    pub fn insertion(&self) -> Option<&str> {
        self.field(column::INSERTION)
    }

    /// Name of the assembled contig the breakpoint was called from.
    pub fn contig(&self) -> Option<&str> {
        self.field(column::CONTIG)
    }

    pub fn repeat_seq(&self) -> &str {
        self.field(column::REPEAT_SEQ).unwrap_or("")
    }

    /// Supporting read names, empty if reads were not tracked.
    pub fn reads(&self) -> Vec<&str> {
        self.field(column::READS)
            .map(|reads| reads.split(',').collect())
            .unwrap_or_default()
    }
}

/// A table row whose sample alleles are keyed by position only.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct ParsedBreakpoint {
    #[getset(get = "pub")]
    site: Site,
    #[getset(get = "pub")]
    alleles: Vec<SampleAllele>,
    #[getset(get_copy = "pub")]
    line: usize,
}

impl ParsedBreakpoint {
    /// Parse a table row. `line` is the 1-based line number, used for error reporting.
    pub fn from_line(line: &str, line_number: usize) -> Result<Self, Error> {
        let fields: Vec<String> = line
            .trim_end_matches(&['\r', '\n'][..])
            .split('\t')
            .map(|field| field.to_owned())
            .collect();
        if fields.len() < FIXED_COLUMNS {
            return Err(malformed_record(
                line_number,
                &format!(
                    "found {} columns, expected at least {}",
                    fields.len(),
                    FIXED_COLUMNS
                ),
            ));
        }
        let alleles = fields[FIXED_COLUMNS..]
            .iter()
            .map(|value| SampleAllele::parse(value, line_number))
            .collect::<Result<Vec<_>, _>>()?;
        let mut fields = fields;
        fields.truncate(FIXED_COLUMNS);

        Ok(ParsedBreakpoint {
            site: Site::parse(fields, line_number)?,
            alleles,
            line: line_number,
        })
    }

    /// Attach the sample names of the header, in header order.
    pub fn with_sample_names(self, header: &Header) -> Result<Breakpoint, Error> {
        if self.alleles.len() != header.n_samples() {
            return Err(Error::UnresolvedAllele {
                line: self.line,
                found: self.alleles.len(),
                expected: header.n_samples(),
            });
        }
        let alleles = header
            .sample_names()
            .iter()
            .cloned()
            .zip(self.alleles.into_iter())
            .collect();

        Ok(Breakpoint {
            site: self.site,
            alleles,
            discordant: DiscordantCounts::default(),
            population_match: None,
        })
    }
}

/// A breakpoint whose sample alleles are keyed by sample name.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct Breakpoint {
    #[getset(get = "pub")]
    site: Site,
    #[getset(get = "pub")]
    alleles: LinearMap<String, SampleAllele>,
    #[getset(get_copy = "pub")]
    discordant: DiscordantCounts,
    #[getset(get = "pub")]
    population_match: Option<PopulationMatch>,
}

impl Breakpoint {
    /// Parse a table row and attach the sample names of the header.
    pub fn parse(line: &str, line_number: usize, header: &Header) -> Result<Self, Error> {
        ParsedBreakpoint::from_line(line, line_number)?.with_sample_names(header)
    }

    pub fn id(&self) -> BreakpointId {
        self.site.id()
    }

    pub fn is_indel(&self) -> bool {
        self.site.is_indel()
    }

    pub fn in_population(&self) -> bool {
        self.population_match.is_some()
    }

    /// Sample alleles together with the role of each sample.
    ///
    /// Sample names have been validated by the header, hence unknown roles cannot occur.
    pub fn alleles_by_kind(&self) -> impl Iterator<Item = (SampleKind, &SampleAllele)> {
        self.alleles.iter().map(|(name, allele)| {
            let kind = if name.starts_with('n') {
                SampleKind::Normal
            } else {
                SampleKind::Tumor
            };
            (kind, allele)
        })
    }

    pub fn has_normal(&self) -> bool {
        self.alleles_by_kind()
            .any(|(kind, _)| kind == SampleKind::Normal)
    }

    pub fn with_population_match(mut self, population_match: Option<PopulationMatch>) -> Self {
        self.population_match = population_match;
        self
    }

    pub fn with_discordant(mut self, discordant: DiscordantCounts) -> Self {
        self.discordant = discordant;
        self
    }

    /// Classify the breakpoint. This is the only way to obtain a classification.
    pub fn score(self, params: &ScoringParameters) -> ScoredBreakpoint {
        let classification = scoring::score(&self, params);
        ScoredBreakpoint {
            breakpoint: self,
            classification,
        }
    }
}

/// A breakpoint together with its classification.
#[derive(Debug, Clone, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct ScoredBreakpoint {
    breakpoint: Breakpoint,
    classification: Classification,
}

impl ScoredBreakpoint {
    pub fn is_pass(&self) -> bool {
        self.classification.is_pass()
    }

    pub fn into_breakpoint(self) -> Breakpoint {
        self.breakpoint
    }
}
