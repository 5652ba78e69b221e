use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use rust_htslib::bcf::Read as BCFRead;
use rust_htslib::{bcf, bgzf};
use tempfile::TempDir;

use bps_refilter::annotation::PopulationDatabase;
use bps_refilter::breakpoints::header::column;
use bps_refilter::breakpoints::Header;
use bps_refilter::constants::FIXED_COLUMNS;
use bps_refilter::output::{table_path, Origin, VariantType, View};
use bps_refilter::refilter::RefilterStats;
use bps_refilter::utils::Contigs;
use bps_refilter::{RefilterBuilder, ScoringParameters};

const SAM_HEADER: &str = "@HD\tVN:1.6\tSO:coordinate
@SQ\tSN:chr1\tLN:248956422
@SQ\tSN:chr2\tLN:242193529
";

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A breakpoint table row with the given fixed column overrides and sample alleles.
pub(crate) fn row(overrides: &[(usize, &str)], alleles: &[&str]) -> String {
    let mut fields = vec!["x".to_owned(); FIXED_COLUMNS];
    let defaults = [
        (column::CHROM1, "chr1"),
        (column::POS1, "1000"),
        (column::STRAND1, "+"),
        (column::CHROM2, "chr1"),
        (column::POS2, "1000"),
        (column::STRAND2, "-"),
        (column::REF, "A"),
        (column::ALT, "ACAG"),
        (column::SPAN, "3"),
        (column::EVIDENCE, "INDEL"),
    ];
    for (col, value) in defaults.iter().chain(overrides.iter()) {
        fields[*col] = value.to_string();
    }
    fields.extend(alleles.iter().map(|allele| allele.to_string()));
    fields.join("\t")
}

/// Input files of a run, in a temporary directory.
pub(crate) struct Fixture {
    dir: TempDir,
    input: PathBuf,
    bam: PathBuf,
    dbsnp: Option<PathBuf>,
}

impl Fixture {
    pub(crate) fn new(samples: &[&str], rows: &[String]) -> Self {
        init_logging();
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.bps.txt.gz");
        let bam = dir.path().join("header.sam");
        fs::write(&bam, SAM_HEADER).unwrap();

        let mut writer = bgzf::Writer::from_path(&input).unwrap();
        writeln!(writer, "{}", Header::with_samples(samples).unwrap().to_line()).unwrap();
        for row in rows {
            writeln!(writer, "{}", row).unwrap();
        }

        Fixture {
            dir,
            input,
            bam,
            dbsnp: None,
        }
    }

    pub(crate) fn with_dbsnp(mut self, vcf: &str) -> Self {
        let path = self.dir.path().join("dbsnp.vcf");
        fs::write(&path, vcf).unwrap();
        self.dbsnp = Some(path);
        self
    }

    pub(crate) fn input(&self) -> &Path {
        &self.input
    }

    pub(crate) fn prefix(&self, analysis_id: &str) -> PathBuf {
        self.dir.path().join(analysis_id)
    }

    pub(crate) fn run(
        &self,
        analysis_id: &str,
        params: ScoringParameters,
        read_tracking: bool,
        pass_only: bool,
    ) -> RefilterStats {
        self.run_on(&self.input, analysis_id, params, read_tracking, pass_only)
    }

    pub(crate) fn run_on(
        &self,
        input: &Path,
        analysis_id: &str,
        params: ScoringParameters,
        read_tracking: bool,
        pass_only: bool,
    ) -> RefilterStats {
        let mut builder = RefilterBuilder::default()
            .input(input.to_owned())
            .output_prefix(self.prefix(analysis_id))
            .contigs(Contigs::from_bam(&self.bam).unwrap())
            .params(params)
            .read_tracking(read_tracking)
            .pass_only(pass_only)
            .batch_size(2);
        if let Some(dbsnp) = &self.dbsnp {
            builder = builder.database(PopulationDatabase::from_path(dbsnp).unwrap());
        }
        builder.build().unwrap().run().unwrap()
    }

    /// Lines of the refreshed table, split into fields.
    pub(crate) fn table(&self, analysis_id: &str) -> Vec<Vec<String>> {
        BufReader::new(bgzf::Reader::from_path(table_path(&self.prefix(analysis_id))).unwrap())
            .lines()
            .map(|line| line.unwrap().split('\t').map(|f| f.to_owned()).collect())
            .collect()
    }

    /// Records of the indel and SV VCF files of a view.
    ///
    /// `origin` selects the somatic or germline files of tumor/normal runs.
    pub(crate) fn vcf_records(
        &self,
        analysis_id: &str,
        view: View,
        origin: Option<Origin>,
    ) -> (Vec<bcf::Record>, Vec<bcf::Record>) {
        let prefix = self.prefix(analysis_id);
        let read = |variant_type| -> Vec<bcf::Record> {
            bcf::Reader::from_path(&view.path(&prefix, origin, variant_type))
                .unwrap()
                .records()
                .map(|record| record.unwrap())
                .collect()
        };
        (read(VariantType::Indel), read(VariantType::Sv))
    }

    pub(crate) fn vcf_exists(&self, analysis_id: &str, view: View, by_origin: bool) -> bool {
        view.paths(&self.prefix(analysis_id), by_origin)
            .iter()
            .all(|path| path.exists())
    }
}
