// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use itertools::Itertools;
use rust_htslib::bgzf;

use crate::breakpoints::header::column;
use crate::breakpoints::{Header, SampleAllele, ScoredBreakpoint};
use crate::constants::EMPTY_FIELD;
use crate::scoring::SampleScore;
use crate::utils::{format_float, format_optional};

/// Render a scored breakpoint as a breakpoint table row (without newline).
///
/// Columns not touched by scoring are written back verbatim. With
/// `suppress_read_tracking`, supporting read names are replaced by `x`.
pub fn to_line(scored: &ScoredBreakpoint, suppress_read_tracking: bool) -> String {
    let breakpoint = scored.breakpoint();
    let classification = scored.classification();
    let mut fields = breakpoint.site().raw_fields().to_vec();

    let mut set = |col: usize, value: String| fields[col] = value;
    set(column::CONFIDENCE, classification.filter_label());
    set(
        column::SOMATIC_SCORE,
        if classification.is_somatic() { "1" } else { "0" }.to_owned(),
    );
    set(
        column::SOMATIC_LOD,
        format_optional(classification.somatic().map(|test| format_float(test.lod()))),
    );
    set(column::TRUE_LOD, format_float(classification.non_ref().lod()));
    set(
        column::DBSNP,
        format_optional(breakpoint.population_match().as_ref().map(|m| m.id())),
    );
    if suppress_read_tracking {
        set(column::READS, EMPTY_FIELD.to_owned());
    }
    set(column::TUMOR_DISC, breakpoint.discordant().tumor.to_string());
    set(column::NORMAL_DISC, breakpoint.discordant().normal.to_string());
    set(
        column::TUMOR_AF,
        format_optional(classification.tumor_allele_freq().map(format_float)),
    );
    set(
        column::NORMAL_AF,
        format_optional(classification.normal_allele_freq().map(format_float)),
    );

    let samples = breakpoint
        .alleles()
        .values()
        .zip(classification.sample_scores().iter())
        .map(|(allele, score)| allele_to_string(allele, score, suppress_read_tracking));

    fields.into_iter().chain(samples).join("\t")
}

/// Writer of BGZF compressed breakpoint tables.
pub struct TableWriter {
    inner: bgzf::Writer,
    suppress_read_tracking: bool,
}

impl TableWriter {
    pub fn create(path: &Path, header: &Header, suppress_read_tracking: bool) -> Result<Self> {
        let mut inner = bgzf::Writer::from_path(path)
            .with_context(|| format!("error creating breakpoint table {}", path.display()))?;
        writeln!(inner, "{}", header.to_line())?;
        Ok(TableWriter {
            inner,
            suppress_read_tracking,
        })
    }

    pub fn write_batch(&mut self, records: &[ScoredBreakpoint]) -> Result<()> {
        for scored in records {
            writeln!(self.inner, "{}", to_line(scored, self.suppress_read_tracking))?;
        }
        Ok(())
    }
}

fn allele_to_string(allele: &SampleAllele, score: &SampleScore, suppress_read_tracking: bool) -> String {
    let reads = if suppress_read_tracking || allele.reads().is_empty() {
        EMPTY_FIELD.to_owned()
    } else {
        allele.reads().join(",")
    };
    format!(
        "{}:{}:{}:{}:{}:{}:{}:{}:{}",
        allele.split(),
        allele.cigar(),
        allele.alt(),
        allele.ref_count(),
        allele.cov(),
        allele.disc(),
        score.genotype(),
        format_float(score.lod()),
        reads
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::aggregate;
    use crate::breakpoints::tests::{header, row};
    use crate::breakpoints::{Breakpoint, PopulationMatch};
    use crate::scoring::ScoringParameters;

    fn scored(line: &str, header: &Header) -> ScoredBreakpoint {
        aggregate(Breakpoint::parse(line, 2, header).unwrap()).score(&ScoringParameters::default())
    }

    fn fields(line: &str) -> Vec<String> {
        line.split('\t').map(|field| field.to_owned()).collect()
    }

    #[test]
    fn test_scoring_columns() {
        let header = header(&["t1", "n1"]);
        let line = row(
            &[(column::READS, "r1,r2")],
            &["0:0:20:0:20:3:1/1:0:r1,r2", "0:0:0:30:30:0:0/0:0:x"],
        );
        let out = fields(&to_line(&scored(&line, &header), false));
        assert_eq!(out.len(), 40);
        assert_eq!(out[column::CONFIDENCE], "PASS");
        assert_eq!(out[column::SOMATIC_SCORE], "1");
        assert_eq!(out[column::TRUE_LOD], "80.00");
        assert_eq!(out[column::SOMATIC_LOD], "9.03");
        assert_eq!(out[column::DBSNP], "x");
        assert_eq!(out[column::READS], "r1,r2");
        assert_eq!(out[column::TUMOR_DISC], "3");
        assert_eq!(out[column::NORMAL_DISC], "0");
        assert_eq!(out[column::TUMOR_AF], "1.00");
        assert_eq!(out[column::NORMAL_AF], "0.00");
        assert_eq!(out[38], "0:0:20:0:20:3:1/1:80.00:r1,r2");
        assert_eq!(out[39], "0:0:0:30:30:0:0/0:0.00:x");
        // passthrough columns
        assert_eq!(out[column::CHROM1], "chr1");
        assert_eq!(out[column::REF], "A");
    }

    #[test]
    fn test_suppress_read_tracking() {
        let header = header(&["t1"]);
        let line = row(&[(column::READS, "r1,r2")], &["0:0:20:0:20:0:0/0:0:r1,r2"]);
        let scored = scored(&line, &header);
        let tracked = fields(&to_line(&scored, false));
        let suppressed = fields(&to_line(&scored, true));
        assert_eq!(suppressed[column::READS], "x");
        assert!(suppressed[38].ends_with(":x"));
        for (i, (a, b)) in tracked.iter().zip(suppressed.iter()).enumerate() {
            if i != column::READS && i != 38 {
                assert_eq!(a, b);
            }
        }
        assert_eq!(suppressed[column::SOMATIC_LOD], "x");
        assert_eq!(suppressed[column::NORMAL_AF], "x");
    }

    #[test]
    fn test_round_trip() {
        let header = header(&["t1", "n1", "t2"]);
        let lines = [
            row(
                &[(column::REPEAT_SEQ, "CACACACA"), (column::READS, "a:1,b:2")],
                &[
                    "0:1:12:8:20:2:0/0:0:a:1",
                    "0:0:1:29:30:1:0/0:0:x",
                    "0:0:0:0:0:0:0/0:0:x",
                ],
            ),
            row(
                &[(column::EVIDENCE, "ASDIS"), (column::CHROM2, "chr5"), (column::SPAN, "-1")],
                &[
                    "2:0:5:40:45:5:0/0:0:x",
                    "0:0:0:0:0:0:0/0:0:x",
                    "0:0:3:3:6:1:0/0:0:x",
                ],
            ),
        ];
        for line in lines.iter() {
            for suppress in [false, true].iter() {
                let first = scored(line, &header);
                let line = to_line(&first, *suppress);
                let second = scored(&line, &header);
                assert_eq!(second.classification(), first.classification());
                assert_eq!(to_line(&second, *suppress), line);
            }
        }
    }

    #[test]
    fn test_round_trip_with_population_match() {
        let header = header(&["t1", "n1"]);
        let matched = |line: &str| {
            aggregate(Breakpoint::parse(line, 2, &header).unwrap())
                .with_population_match(Some(PopulationMatch::new("rs42".to_owned())))
                .score(&ScoringParameters::default())
        };
        let line = row(&[], &["0:0:20:0:20:0:0/0:0:x", "0:0:0:30:30:0:0/0:0:x"]);
        let first = matched(&line);
        let line = to_line(&first, false);
        assert_eq!(fields(&line)[column::DBSNP], "rs42");

        // annotated again, as with the same database
        let second = matched(&line);
        assert_eq!(second.classification(), first.classification());
        assert_eq!(to_line(&second, false), line);

        // without a database the column is cleared
        let unannotated = scored(&line, &header);
        assert!(!unannotated.breakpoint().in_population());
        assert_eq!(fields(&to_line(&unannotated, false))[column::DBSNP], "x");
    }
}
