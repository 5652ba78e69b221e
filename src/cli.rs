// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::path::PathBuf;

use anyhow::Result;
use structopt::StructOpt;

use crate::annotation::PopulationDatabase;
use crate::refilter::RefilterBuilder;
use crate::scoring::ScoringParametersBuilder;
use crate::utils::Contigs;

#[derive(Debug, StructOpt, Clone)]
#[structopt(
    name = "bps-refilter",
    about = "Re-score a breakpoint table against LOD cutoffs and a population database, \
             and write a refreshed table together with indel and SV VCF files."
)]
#[structopt(setting = structopt::clap::AppSettings::ColoredHelp)]
pub struct BpsRefilter {
    #[structopt(
        short = "i",
        long = "input-bps",
        parse(from_os_str),
        help = "Breakpoint table to re-score (plain or gzip/BGZF compressed)."
    )]
    pub input_bps: PathBuf,
    #[structopt(
        short = "b",
        long = "bam",
        parse(from_os_str),
        help = "BAM/CRAM/SAM file whose header provides the contigs of the VCF output."
    )]
    pub bam: PathBuf,
    #[structopt(
        short = "a",
        long = "analysis-id",
        default_value = "refilter",
        help = "Prefix of all output files."
    )]
    pub analysis_id: String,
    #[structopt(
        short = "v",
        long = "verbose",
        default_value = "1",
        help = "Verbosity: 0 (warnings), 1 (info), 2 (debug), 3 or more (trace)."
    )]
    pub verbose: u8,
    #[structopt(
        long = "lod",
        default_value = "8",
        allow_hyphen_values = true,
        help = "LOD cutoff for a non-reference allele."
    )]
    pub lod: f64,
    #[structopt(
        long = "lod-dbsnp",
        default_value = "6",
        allow_hyphen_values = true,
        help = "LOD cutoff for a non-reference allele at known population variants."
    )]
    pub lod_dbsnp: f64,
    #[structopt(
        long = "lod-somatic",
        default_value = "6",
        allow_hyphen_values = true,
        help = "LOD cutoff for the normal samples being reference in a somatic call."
    )]
    pub lod_somatic: f64,
    #[structopt(
        long = "lod-somatic-dbsnp",
        default_value = "10",
        allow_hyphen_values = true,
        help = "LOD cutoff for the normal samples being reference in a somatic call at known \
                population variants."
    )]
    pub lod_somatic_dbsnp: f64,
    #[structopt(
        long = "scale-errors",
        default_value = "1",
        allow_hyphen_values = true,
        help = "Exponent by which the artifact prior grows with the repeat copies at the \
                breakpoint. 0 disables repeat dependent cutoffs."
    )]
    pub scale_errors: f64,
    #[structopt(
        long = "read-tracking",
        help = "Keep the names of supporting reads in the breakpoint table."
    )]
    pub read_tracking: bool,
    #[structopt(
        long = "pass-only",
        help = "Restrict the unfiltered VCF files to passing records."
    )]
    pub pass_only: bool,
    #[structopt(
        short = "D",
        long = "dbsnp-vcf",
        parse(from_os_str),
        help = "VCF/BCF with known population indels."
    )]
    pub dbsnp_vcf: Option<PathBuf>,
    #[structopt(
        short = "t",
        long = "threads",
        default_value = "1",
        help = "Number of threads used for scoring."
    )]
    pub threads: usize,
}

pub fn run(opt: BpsRefilter) -> Result<()> {
    info!("Input breakpoint table: {}", opt.input_bps.display());
    info!("Alignment header: {}", opt.bam.display());
    info!("Analysis id: {}", opt.analysis_id);
    info!(
        "LOD cutoffs: non-reference {}, non-reference at known variants {}, \
         somatic {}, somatic at known variants {}",
        opt.lod, opt.lod_dbsnp, opt.lod_somatic, opt.lod_somatic_dbsnp
    );
    info!("Repeat error scaling: {}", opt.scale_errors);
    info!(
        "Read tracking: {}, PASS-only VCFs: {}, threads: {}",
        opt.read_tracking, opt.pass_only, opt.threads
    );
    match &opt.dbsnp_vcf {
        Some(path) => info!("Population database: {}", path.display()),
        None => info!("No population database given, skipping annotation."),
    }

    rayon::ThreadPoolBuilder::new()
        .num_threads(opt.threads)
        .build_global()?;

    let params = ScoringParametersBuilder::default()
        .lod(opt.lod)
        .lod_db(opt.lod_dbsnp)
        .lod_somatic(opt.lod_somatic)
        .lod_somatic_db(opt.lod_somatic_dbsnp)
        .scale_errors(opt.scale_errors)
        .build()
        .map_err(anyhow::Error::msg)?;

    let mut refilter = RefilterBuilder::default()
        .input(opt.input_bps.clone())
        .output_prefix(PathBuf::from(&opt.analysis_id))
        .contigs(Contigs::from_bam(&opt.bam)?)
        .params(params)
        .read_tracking(opt.read_tracking)
        .pass_only(opt.pass_only);
    if let Some(path) = &opt.dbsnp_vcf {
        refilter = refilter.database(PopulationDatabase::from_path(path)?);
    }
    refilter.build().map_err(anyhow::Error::msg)?.run()?;

    Ok(())
}
