// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use progress_logger::ProgressLogger;
use rayon::prelude::*;
use rust_htslib::bgzf;
use strum::IntoEnumIterator;

use crate::aggregation::aggregate;
use crate::annotation::{annotate, PopulationDatabase};
use crate::breakpoints::{Header, ParsedBreakpoint, ScoredBreakpoint};
use crate::constants::DEFAULT_BATCH_SIZE;
use crate::errors::Error;
use crate::output::{table_path, TableWriter, VcfOutput, View};
use crate::scoring::ScoringParameters;
use crate::utils::Contigs;

/// Re-scores a breakpoint table and writes the refreshed table and VCF files.
///
/// Lines are processed in batches. The breakpoints of a batch are scored in
/// parallel and written in input order, before the next batch is read.
#[derive(Builder)]
#[builder(pattern = "owned")]
pub struct Refilter {
    /// Breakpoint table, plain or BGZF compressed.
    input: PathBuf,
    /// Prefix of all output files.
    output_prefix: PathBuf,
    /// Contigs of the alignment header, used for the VCF headers.
    contigs: Contigs,
    #[builder(default, setter(strip_option))]
    database: Option<PopulationDatabase>,
    #[builder(default)]
    params: ScoringParameters,
    /// Keep supporting read names in the table.
    #[builder(default)]
    read_tracking: bool,
    /// Only write VCF records that pass.
    #[builder(default)]
    pass_only: bool,
    #[builder(default = "DEFAULT_BATCH_SIZE")]
    batch_size: usize,
}

/// Summary of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct RefilterStats {
    records: usize,
    passed: usize,
    somatic: usize,
    in_population: usize,
}

impl RefilterStats {
    fn update(&mut self, batch: &[ScoredBreakpoint]) {
        for scored in batch {
            self.records += 1;
            if scored.is_pass() {
                self.passed += 1;
            }
            if scored.classification().is_somatic() {
                self.somatic += 1;
            }
            if scored.breakpoint().in_population() {
                self.in_population += 1;
            }
        }
    }
}

impl Refilter {
    pub fn run(&self) -> Result<RefilterStats> {
        self.check_outputs()?;

        let reader = bgzf::Reader::from_path(&self.input).map_err(|_| Error::InputUnavailable {
            path: self.input.clone(),
        })?;
        let mut lines = BufReader::new(reader)
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line));

        let header = match lines.next() {
            Some((_, line)) => Header::parse(&line.with_context(|| {
                format!("error reading header of {}", self.input.display())
            })?)?,
            None => {
                return Err(Error::MissingHeader {
                    path: self.input.clone(),
                }
                .into())
            }
        };
        if header.is_single_sample() {
            info!("Single sample in breakpoint table, running in tumor-only mode.");
        } else {
            info!("Samples: {}.", header.sample_names().join(", "));
        }

        let table_path = table_path(&self.output_prefix);
        let mut table = TableWriter::create(&table_path, &header, !self.read_tracking)?;
        let mut vcf = VcfOutput::create(
            &self.output_prefix,
            &self.contigs,
            &header,
            self.pass_only,
        )?;

        let mut stats = RefilterStats::default();
        let mut progress_logger = ProgressLogger::builder()
            .with_items_name("breakpoints")
            .with_frequency(Duration::from_secs(20))
            .start();
        loop {
            let batch = lines
                .by_ref()
                .take(self.batch_size.max(1))
                .map(|(line_number, line)| {
                    line.map(|line| (line_number, line)).with_context(|| {
                        format!("error reading line {} of {}", line_number, self.input.display())
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            if batch.is_empty() {
                break;
            }

            let scored = batch
                .par_iter()
                .filter(|(_, line)| !line.trim().is_empty())
                .map(|(line_number, line)| self.process(line, *line_number, &header))
                .collect::<Result<Vec<_>, Error>>()?;

            table.write_batch(&scored)?;
            vcf.write_batch(&scored)?;
            stats.update(&scored);
            progress_logger.update(scored.len() as u64);
            debug!(
                "Wrote batch of {} breakpoints ending at line {}.",
                scored.len(),
                batch.last().map_or(0, |(line_number, _)| *line_number)
            );
        }
        progress_logger.stop();

        info!(
            "Refiltered {} breakpoints: {} PASS, {} somatic, {} known population variants.",
            stats.records, stats.passed, stats.somatic, stats.in_population
        );
        Ok(stats)
    }

    /// Parse, annotate, aggregate and score a single line.
    ///
    /// Fails on contigs unknown to the alignment header, so that a batch is
    /// rejected before any of it is written.
    fn process(
        &self,
        line: &str,
        line_number: usize,
        header: &Header,
    ) -> Result<ScoredBreakpoint, Error> {
        let breakpoint = ParsedBreakpoint::from_line(line, line_number)?.with_sample_names(header)?;
        let site = breakpoint.site();
        for chrom in &[site.chrom1(), site.chrom2()] {
            if !self.contigs.contains(chrom) {
                return Err(Error::UnknownContig {
                    contig: chrom.to_string(),
                });
            }
        }
        let breakpoint = match &self.database {
            Some(database) => annotate(breakpoint, database),
            None => breakpoint,
        };
        Ok(aggregate(breakpoint).score(&self.params))
    }

    fn output_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![table_path(&self.output_prefix)];
        for view in View::iter() {
            // the layout depends on the samples, which are not known yet
            for by_origin in &[false, true] {
                paths.extend(view.paths(&self.output_prefix, *by_origin));
            }
        }
        paths
    }

    fn check_outputs(&self) -> Result<()> {
        let input = canonical(&self.input).ok_or_else(|| Error::InputUnavailable {
            path: self.input.clone(),
        })?;
        for path in self.output_paths() {
            if canonical(&path).map_or(false, |path| path == input) {
                return Err(Error::OutputOverwritesInput { path }.into());
            }
        }
        Ok(())
    }
}

fn canonical(path: &Path) -> Option<PathBuf> {
    fs::canonicalize(path).ok()
}
