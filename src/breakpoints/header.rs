// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use itertools::Itertools;

use crate::breakpoints::allele::SampleKind;
use crate::constants::FIXED_COLUMNS;
use crate::errors::Error;

/// Column indices of the fixed part of a breakpoint table.
pub mod column {
    pub const CHROM1: usize = 0;
    pub const POS1: usize = 1;
    pub const STRAND1: usize = 2;
    pub const CHROM2: usize = 3;
    pub const POS2: usize = 4;
    pub const STRAND2: usize = 5;
    pub const REF: usize = 6;
    pub const ALT: usize = 7;
    pub const SPAN: usize = 8;
    pub const MAPQ1: usize = 9;
    pub const MAPQ2: usize = 10;
    pub const HOMOLOGY: usize = 17;
    pub const INSERTION: usize = 18;
    pub const CONTIG: usize = 19;
    pub const CONFIDENCE: usize = 21;
    pub const EVIDENCE: usize = 22;
    pub const SOMATIC_SCORE: usize = 25;
    pub const SOMATIC_LOD: usize = 26;
    pub const TRUE_LOD: usize = 27;
    pub const REPEAT_SEQ: usize = 29;
    pub const DBSNP: usize = 31;
    pub const READS: usize = 32;
    pub const TUMOR_DISC: usize = 34;
    pub const NORMAL_DISC: usize = 35;
    pub const TUMOR_AF: usize = 36;
    pub const NORMAL_AF: usize = 37;
}

/// Names of the fixed columns, as written by the assembly stage.
pub const FIXED_COLUMN_NAMES: [&str; FIXED_COLUMNS] = [
    "chr1",
    "pos1",
    "strand1",
    "chr2",
    "pos2",
    "strand2",
    "ref",
    "alt",
    "span",
    "mapq1",
    "mapq2",
    "nsplit",
    "tsplit",
    "disc_mapq1",
    "disc_mapq2",
    "ncigar",
    "tcigar",
    "homology",
    "insertion",
    "contig",
    "numalign",
    "confidence",
    "evidence",
    "quality",
    "secondary_alignment",
    "somatic_score",
    "somatic_lod",
    "true_lod",
    "pon_samples",
    "repeat_seq",
    "graylist",
    "dbsnp",
    "reads",
    "bx_tags",
    "tdisc",
    "ndisc",
    "tumor_af",
    "normal_af",
];

/// Header line of a breakpoint table.
///
/// Every column after the fixed ones names a sample. Per record, sample alleles
/// appear in the same order, but the record itself does not carry the names.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Header {
    columns: Vec<String>,
    #[getset(get = "pub")]
    sample_names: Vec<String>,
    #[getset(get = "pub")]
    sample_kinds: Vec<SampleKind>,
}

impl Header {
    pub fn parse(line: &str) -> Result<Self, Error> {
        let columns = line
            .trim_end_matches(&['\r', '\n'][..])
            .split('\t')
            .map(|column| column.to_owned())
            .collect_vec();
        if columns.len() <= FIXED_COLUMNS {
            return Err(Error::MalformedHeader {
                found: columns.len(),
                expected: FIXED_COLUMNS + 1,
            });
        }
        let sample_names = columns[FIXED_COLUMNS..].to_vec();
        let sample_kinds = sample_names
            .iter()
            .map(|name| SampleKind::of(name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Header {
            columns,
            sample_names,
            sample_kinds,
        })
    }

    /// Header with the default fixed column names and the given samples.
    pub fn with_samples<S: AsRef<str>>(sample_names: &[S]) -> Result<Self, Error> {
        Header::parse(
            &FIXED_COLUMN_NAMES
                .iter()
                .copied()
                .chain(sample_names.iter().map(|name| name.as_ref()))
                .join("\t"),
        )
    }

    pub fn n_samples(&self) -> usize {
        self.sample_names.len()
    }

    /// Tumor-only mode, i.e. a single sample.
    pub fn is_single_sample(&self) -> bool {
        self.n_samples() == 1
    }

    pub fn to_line(&self) -> String {
        self.columns.join("\t")
    }
}
