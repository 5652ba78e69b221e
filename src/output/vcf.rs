// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! VCF output of scored breakpoints.
//!
//! Indels and structural variants go to separate files. Each kind of file
//! exists in two views: all records, and records that pass. With tumor and
//! normal samples, somatic and germline calls are written to separate files
//! as well.
//! Structural variants are written as pairs of breakend (BND) records that
//! point to each other via `MATEID`.

use std::convert::TryFrom;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use itertools::Itertools;
use rust_htslib::bcf;
use rust_htslib::bcf::record::GenotypeAllele;
use strum::IntoEnumIterator;

use crate::breakpoints::{
    Breakpoint, Genotype, Header, SampleAllele, ScoredBreakpoint, Site, Strand,
};
use crate::errors::Error;
use crate::output::output_path;
use crate::scoring::FailedTest;
use crate::utils::Contigs;

/// Select the records that go into a VCF view, preserving their order.
pub fn select_for_vcf<'a, I>(
    records: I,
    pass_only: bool,
) -> impl Iterator<Item = &'a ScoredBreakpoint>
where
    I: IntoIterator<Item = &'a ScoredBreakpoint>,
{
    records
        .into_iter()
        .filter(move |record| !pass_only || record.is_pass())
}

/// Which records a VCF view holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum View {
    All,
    Pass,
}

/// Somatic or germline origin of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Origin {
    Somatic,
    Germline,
}

impl Origin {
    /// Records without evidence in the normal samples are somatic, whether they pass or not.
    pub fn of(scored: &ScoredBreakpoint) -> Self {
        if scored.classification().somatic_call() {
            Origin::Somatic
        } else {
            Origin::Germline
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum VariantType {
    Indel,
    Sv,
}

impl View {
    /// `<prefix>.[unfiltered.][somatic.|germline.]{indel,sv}.vcf`
    pub fn path(
        self,
        prefix: &Path,
        origin: Option<Origin>,
        variant_type: VariantType,
    ) -> PathBuf {
        let view = match self {
            View::All => "unfiltered.",
            View::Pass => "",
        };
        let origin = origin.map_or_else(String::new, |origin| {
            let origin: &'static str = origin.into();
            format!("{}.", origin)
        });
        let variant_type: &'static str = variant_type.into();
        output_path(prefix, &format!("{}{}{}.vcf", view, origin, variant_type))
    }

    /// All files of this view, with or without separate somatic and germline files.
    pub fn paths(self, prefix: &Path, by_origin: bool) -> Vec<PathBuf> {
        let origins = if by_origin {
            Origin::iter().map(Some).collect_vec()
        } else {
            vec![None]
        };
        VariantType::iter()
            .cartesian_product(origins)
            .map(|(variant_type, origin)| self.path(prefix, origin, variant_type))
            .collect()
    }
}

fn create_writer(path: &Path, header: &bcf::Header) -> Result<bcf::Writer> {
    bcf::Writer::from_path(path, header, true, bcf::Format::Vcf)
        .with_context(|| format!("error creating VCF file {}", path.display()))
}

/// The file, or files, of one variant type in one view.
enum Sink {
    Single(bcf::Writer),
    ByOrigin {
        somatic: bcf::Writer,
        germline: bcf::Writer,
    },
}

impl Sink {
    fn create(
        prefix: &Path,
        view: View,
        variant_type: VariantType,
        by_origin: bool,
        header: &bcf::Header,
    ) -> Result<Self> {
        let create = |origin| create_writer(&view.path(prefix, origin, variant_type), header);
        Ok(if by_origin {
            Sink::ByOrigin {
                somatic: create(Some(Origin::Somatic))?,
                germline: create(Some(Origin::Germline))?,
            }
        } else {
            Sink::Single(create(None)?)
        })
    }

    fn writer(&mut self, scored: &ScoredBreakpoint) -> &mut bcf::Writer {
        match self {
            Sink::Single(writer) => writer,
            Sink::ByOrigin { somatic, germline } => match Origin::of(scored) {
                Origin::Somatic => somatic,
                Origin::Germline => germline,
            },
        }
    }
}

struct ViewWriter {
    pass_only: bool,
    indels: Sink,
    svs: Sink,
}

/// Writers of all VCF views.
pub struct VcfOutput {
    writers: Vec<ViewWriter>,
}

impl VcfOutput {
    /// Create the VCF files of both views.
    ///
    /// With `pass_only`, the unfiltered view holds passing records only.
    /// Somatic and germline calls get separate files unless the table has a
    /// single sample.
    pub fn create(
        prefix: &Path,
        contigs: &Contigs,
        table_header: &Header,
        pass_only: bool,
    ) -> Result<Self> {
        let header = header(contigs, table_header.sample_names());
        let by_origin = !table_header.is_single_sample();
        let writers = View::iter()
            .map(|view| -> Result<ViewWriter> {
                let sink = |variant_type| Sink::create(prefix, view, variant_type, by_origin, &header);
                Ok(ViewWriter {
                    pass_only: pass_only || view == View::Pass,
                    indels: sink(VariantType::Indel)?,
                    svs: sink(VariantType::Sv)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(VcfOutput { writers })
    }

    /// Write a batch of scored breakpoints, in the given order, to every view.
    pub fn write_batch(&mut self, records: &[ScoredBreakpoint]) -> Result<()> {
        for writer in &mut self.writers {
            for scored in select_for_vcf(records, writer.pass_only) {
                if scored.breakpoint().is_indel() {
                    write_indel(writer.indels.writer(scored), scored)?;
                } else {
                    write_breakends(writer.svs.writer(scored), scored)?;
                }
            }
        }
        Ok(())
    }
}

fn header(contigs: &Contigs, sample_names: &[String]) -> bcf::Header {
    let mut header = bcf::Header::new();
    let today = time::OffsetDateTime::now_utc().date();
    header.push_record(
        format!(
            "##fileDate={}{:02}{:02}",
            today.year(),
            today.month() as u8,
            today.day()
        )
        .as_bytes(),
    );
    header.push_record(format!("##source={}", env!("CARGO_PKG_NAME")).as_bytes());

    for (name, len) in contigs.iter() {
        header.push_record(format!("##contig=<ID={},length={}>", name, len).as_bytes());
    }

    header.push_record(
        b"##INFO=<ID=SVTYPE,Number=1,Type=String,Description=\"Type of structural variant\">",
    );
    header.push_record(
        b"##INFO=<ID=MATEID,Number=1,Type=String,Description=\"ID of mate breakend\">",
    );
    header.push_record(
        b"##INFO=<ID=SPAN,Number=1,Type=Integer,\
          Description=\"Distance between the breakpoints, -1 for interchromosomal\">",
    );
    header.push_record(
        b"##INFO=<ID=HOMSEQ,Number=1,Type=String,\
          Description=\"Sequence of microhomology at the breakpoint\">",
    );
    header.push_record(
        b"##INFO=<ID=INSSEQ,Number=1,Type=String,\
          Description=\"Sequence inserted at the breakpoint\">",
    );
    header.push_record(
        b"##INFO=<ID=EVDNC,Number=1,Type=String,\
          Description=\"Type of evidence supporting the breakpoint\">",
    );
    header.push_record(
        b"##INFO=<ID=REPSEQ,Number=1,Type=String,\
          Description=\"Repeat sequence near the breakpoint\">",
    );
    header.push_record(
        b"##INFO=<ID=SOMATIC,Number=0,Type=Flag,Description=\"Variant is a passing somatic call\">",
    );
    header.push_record(
        b"##INFO=<ID=SOMLOD,Number=1,Type=Float,\
          Description=\"Log10 odds that the pooled normal samples are reference\">",
    );
    header.push_record(
        b"##INFO=<ID=MAXLOD,Number=1,Type=Float,\
          Description=\"Maximum log10 odds for a non-reference allele over all samples\">",
    );
    header.push_record(
        b"##INFO=<ID=DBSNP,Number=1,Type=String,\
          Description=\"ID of the matching variant in the population database\">",
    );
    header.push_record(
        b"##INFO=<ID=NDISC,Number=1,Type=Integer,\
          Description=\"Discordant read pairs supporting the variant in the normal samples\">",
    );
    header.push_record(
        b"##INFO=<ID=TDISC,Number=1,Type=Integer,\
          Description=\"Discordant read pairs supporting the variant in the tumor samples\">",
    );

    for test in FailedTest::iter() {
        let id: &'static str = test.into();
        header.push_record(
            format!(
                "##FILTER=<ID={},Description=\"{}\">",
                id,
                test.description()
            )
            .as_bytes(),
        );
    }

    header.push_record(b"##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">");
    header.push_record(
        b"##FORMAT=<ID=AD,Number=1,Type=Integer,Description=\"Reads supporting the variant\">",
    );
    header.push_record(b"##FORMAT=<ID=DP,Number=1,Type=Integer,Description=\"Read depth\">");
    header.push_record(
        b"##FORMAT=<ID=DR,Number=1,Type=Integer,\
          Description=\"Discordant read pairs supporting the variant\">",
    );
    header.push_record(
        b"##FORMAT=<ID=SR,Number=1,Type=Integer,\
          Description=\"Split reads supporting the variant\">",
    );
    header.push_record(
        b"##FORMAT=<ID=LO,Number=1,Type=Float,\
          Description=\"Log10 odds for a non-reference allele\">",
    );

    for sample_name in sample_names {
        header.push_sample(sample_name.as_bytes());
    }

    header
}

fn rid(writer: &bcf::Writer, chrom: &str) -> Result<u32> {
    writer
        .header()
        .name2rid(chrom.as_bytes())
        .map_err(|_| {
            Error::UnknownContig {
                contig: chrom.to_owned(),
            }
            .into()
        })
}

fn write_indel(writer: &mut bcf::Writer, scored: &ScoredBreakpoint) -> Result<()> {
    let site = scored.breakpoint().site();
    let mut record = writer.empty_record();
    record.set_rid(Some(rid(writer, site.chrom1())?));
    record.set_pos(site.pos1() as i64 - 1);
    record.set_id(indel_id(site).as_bytes())?;
    record.set_alleles(&[
        site.ref_allele().unwrap_or("N").as_bytes(),
        site.alt_allele().unwrap_or("<INDEL>").as_bytes(),
    ])?;
    push_annotations(&mut record, scored)?;
    writer.write(&record)?;
    Ok(())
}

fn write_breakends(writer: &mut bcf::Writer, scored: &ScoredBreakpoint) -> Result<()> {
    let site = scored.breakpoint().site();
    let ids = breakend_ids(site);
    let breakends = [
        (site.chrom1(), site.pos1(), site.strand1(), site.chrom2(), site.pos2(), site.strand2()),
        (site.chrom2(), site.pos2(), site.strand2(), site.chrom1(), site.pos1(), site.strand1()),
    ];
    for (i, (chrom, pos, strand, mate_chrom, mate_pos, mate_strand)) in breakends.iter().enumerate() {
        let mut record = writer.empty_record();
        record.set_rid(Some(rid(writer, chrom)?));
        record.set_pos(*pos as i64 - 1);
        record.set_id(ids[i].as_bytes())?;
        let alt = bnd_alt(*strand, *mate_strand, mate_chrom, *mate_pos);
        record.set_alleles(&["N".as_bytes(), alt.as_bytes()])?;
        record.push_info_string(b"SVTYPE", &["BND".as_bytes()])?;
        record.push_info_string(b"MATEID", &[ids[1 - i].as_bytes()])?;
        push_annotations(&mut record, scored)?;
        writer.write(&record)?;
    }
    Ok(())
}

fn indel_id(site: &Site) -> String {
    site.contig()
        .map(|contig| contig.to_owned())
        .unwrap_or_else(|| format!("{}:{}", site.chrom1(), site.pos1()))
}

fn breakend_ids(site: &Site) -> [String; 2] {
    let base = site.contig().map(|contig| contig.to_owned()).unwrap_or_else(|| {
        format!(
            "{}:{}-{}:{}",
            site.chrom1(),
            site.pos1(),
            site.chrom2(),
            site.pos2()
        )
    });
    [format!("{}:1", base), format!("{}:2", base)]
}

/// ALT allele of a breakend in bracket notation.
///
/// A `+` strand keeps the sequence left of the breakpoint, a `-` strand the
/// sequence right of it.
pub(crate) fn bnd_alt(strand: Strand, mate_strand: Strand, mate_chrom: &str, mate_pos: u64) -> String {
    let mate = format!("{}:{}", mate_chrom, mate_pos);
    match (strand, mate_strand) {
        (Strand::Forward, Strand::Reverse) => format!("N[{}[", mate),
        (Strand::Forward, Strand::Forward) => format!("N]{}]", mate),
        (Strand::Reverse, Strand::Forward) => format!("]{}]N", mate),
        (Strand::Reverse, Strand::Reverse) => format!("[{}[N", mate),
    }
}

fn push_annotations(record: &mut bcf::Record, scored: &ScoredBreakpoint) -> Result<()> {
    let breakpoint = scored.breakpoint();
    let classification = scored.classification();
    let site = breakpoint.site();

    record.push_info_integer(b"SPAN", &[site.span() as i32])?;
    let optional_strings = [
        (&b"HOMSEQ"[..], site.homology()),
        (&b"INSSEQ"[..], site.insertion()),
        (&b"EVDNC"[..], site.evidence()),
        (&b"REPSEQ"[..], Some(site.repeat_seq()).filter(|seq| !seq.is_empty())),
        (
            &b"DBSNP"[..],
            breakpoint.population_match().as_ref().map(|m| m.id().as_str()),
        ),
    ];
    for (tag, value) in optional_strings.iter() {
        if let Some(value) = value {
            record.push_info_string(tag, &[value.as_bytes()])?;
        }
    }
    if classification.is_somatic() {
        record.push_info_flag(b"SOMATIC")?;
    }
    if let Some(somatic) = classification.somatic() {
        record.push_info_float(b"SOMLOD", &[somatic.lod() as f32])?;
    }
    record.push_info_float(b"MAXLOD", &[classification.non_ref().lod() as f32])?;
    record.push_info_integer(b"TDISC", &[vcf_integer(breakpoint.discordant().tumor)])?;
    record.push_info_integer(b"NDISC", &[vcf_integer(breakpoint.discordant().normal)])?;

    if classification.is_pass() {
        record.push_filter("PASS".as_bytes())?;
    } else {
        for test in classification.failed_tests() {
            let id: &'static str = (*test).into();
            record.push_filter(id.as_bytes())?;
        }
    }

    push_sample_values(record, breakpoint, scored)
}

fn push_sample_values(
    record: &mut bcf::Record,
    breakpoint: &Breakpoint,
    scored: &ScoredBreakpoint,
) -> Result<()> {
    let scores = scored.classification().sample_scores();
    let genotypes: Vec<_> = scores
        .iter()
        .flat_map(|score| genotype_alleles(score.genotype()).to_vec())
        .collect();
    record.push_genotypes(&genotypes)?;

    let alleles: Vec<&SampleAllele> = breakpoint.alleles().values().collect();
    let counts = |count: fn(&SampleAllele) -> u32| -> Vec<i32> {
        alleles
            .iter()
            .map(|allele| vcf_integer(u64::from(count(*allele))))
            .collect()
    };
    record.push_format_integer(b"AD", &counts(|allele| allele.alt()))?;
    record.push_format_integer(b"DP", &counts(|allele| allele.depth()))?;
    record.push_format_integer(b"DR", &counts(|allele| allele.disc()))?;
    record.push_format_integer(b"SR", &counts(|allele| allele.split()))?;
    let lods: Vec<f32> = scores.iter().map(|score| score.lod() as f32).collect();
    record.push_format_float(b"LO", &lods)?;
    Ok(())
}

/// VCF integers are 32 bit signed, larger counts are capped.
fn vcf_integer(count: u64) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

fn genotype_alleles(genotype: Genotype) -> [GenotypeAllele; 2] {
    match genotype {
        Genotype::HomRef => [GenotypeAllele::Unphased(0), GenotypeAllele::Unphased(0)],
        Genotype::Het => [GenotypeAllele::Unphased(0), GenotypeAllele::Unphased(1)],
        Genotype::HomAlt => [GenotypeAllele::Unphased(1), GenotypeAllele::Unphased(1)],
        Genotype::Missing => [
            GenotypeAllele::UnphasedMissing,
            GenotypeAllele::UnphasedMissing,
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::aggregate;
    use crate::breakpoints::header::column;
    use crate::breakpoints::tests::{header, row};
    use crate::scoring::ScoringParametersBuilder;
    use rust_htslib::bcf::Read;

    fn scored(lines: &[String], lod: f64) -> Vec<ScoredBreakpoint> {
        let header = header(&["t1", "n1"]);
        let params = ScoringParametersBuilder::default().lod(lod).build().unwrap();
        lines
            .iter()
            .map(|line| aggregate(Breakpoint::parse(line, 2, &header).unwrap()).score(&params))
            .collect()
    }

    fn records() -> Vec<String> {
        vec![
            row(
                &[(column::ALT, "AT"), (column::CONTIG, "c_1_1")],
                &["0:0:20:0:20:0:0/0:0:x", "0:0:0:30:30:0:0/0:0:x"],
            ),
            row(
                &[(column::ALT, "AG"), (column::POS1, "2000")],
                &["0:0:1:19:20:0:0/0:0:x", "0:0:0:30:30:0:0/0:0:x"],
            ),
            row(
                &[
                    (column::EVIDENCE, "ASDIS"),
                    (column::CHROM2, "chr2"),
                    (column::POS2, "500"),
                    (column::SPAN, "-1"),
                    (column::CONTIG, "c_1_2"),
                ],
                &["6:0:20:0:20:4:0/0:0:x", "0:0:0:30:30:0:0/0:0:x"],
            ),
        ]
    }

    fn contigs() -> Contigs {
        Contigs::new(vec![("chr1".to_owned(), 100_000), ("chr2".to_owned(), 100_000)])
    }

    #[test]
    fn test_select_for_vcf() {
        let scored = scored(&records(), 8.0);
        let all: Vec<_> = select_for_vcf(&scored, false).collect();
        assert_eq!(all.len(), 3);
        let pass: Vec<_> = select_for_vcf(&scored, true).collect();
        assert_eq!(pass.len(), 2);
        assert!(pass.iter().all(|record| record.is_pass()));
        // subset in original order
        assert_eq!(pass[0], &scored[0]);
        assert_eq!(pass[1], &scored[2]);
    }

    #[test]
    fn test_bnd_alt() {
        assert_eq!(bnd_alt(Strand::Forward, Strand::Reverse, "chr2", 5), "N[chr2:5[");
        assert_eq!(bnd_alt(Strand::Forward, Strand::Forward, "chr2", 5), "N]chr2:5]");
        assert_eq!(bnd_alt(Strand::Reverse, Strand::Forward, "chr2", 5), "]chr2:5]N");
        assert_eq!(bnd_alt(Strand::Reverse, Strand::Reverse, "chr2", 5), "[chr2:5[N");
    }

    fn read(path: &Path) -> Vec<bcf::Record> {
        bcf::Reader::from_path(path)
            .unwrap()
            .records()
            .map(|record| record.unwrap())
            .collect()
    }

    #[test]
    fn test_paths() {
        let prefix = Path::new("out/run");
        assert_eq!(
            View::All.path(prefix, Some(Origin::Somatic), VariantType::Indel),
            PathBuf::from("out/run.unfiltered.somatic.indel.vcf")
        );
        assert_eq!(
            View::Pass.path(prefix, Some(Origin::Germline), VariantType::Sv),
            PathBuf::from("out/run.germline.sv.vcf")
        );
        assert_eq!(
            View::Pass.path(prefix, None, VariantType::Indel),
            PathBuf::from("out/run.indel.vcf")
        );
        assert_eq!(View::All.paths(prefix, false).len(), 2);
        assert_eq!(View::All.paths(prefix, true).len(), 4);
    }

    #[test]
    fn test_write_views() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("test");
        let scored = scored(&records(), 8.0);
        {
            let mut output =
                VcfOutput::create(&prefix, &contigs(), &header(&["t1", "n1"]), false).unwrap();
            output.write_batch(&scored).unwrap();
        }

        let somatic = |view: View, variant_type| {
            read(&view.path(&prefix, Some(Origin::Somatic), variant_type))
        };
        assert_eq!(somatic(View::All, VariantType::Indel).len(), 2);
        assert_eq!(somatic(View::Pass, VariantType::Indel).len(), 1);
        assert_eq!(somatic(View::All, VariantType::Sv).len(), 2);
        assert_eq!(somatic(View::Pass, VariantType::Sv).len(), 2);
        for view in View::iter() {
            for variant_type in VariantType::iter() {
                assert!(read(&view.path(&prefix, Some(Origin::Germline), variant_type)).is_empty());
            }
        }

        let records = somatic(View::All, VariantType::Indel);
        assert_eq!(records[0].pos(), 999);
        assert_eq!(records[0].id(), b"c_1_1".to_vec());
        assert_eq!(records[0].alleles(), vec![&b"A"[..], &b"AT"[..]]);
        assert!(records[0].info(b"SOMATIC").flag().unwrap());
        assert_eq!(records[1].id(), b"chr1:2000".to_vec());
        assert!(!records[1].has_filter("PASS".as_bytes()));
        assert!(records[1].has_filter("LOWLOD".as_bytes()));

        let records = somatic(View::All, VariantType::Sv);
        assert_eq!(records[0].alleles()[1], &b"N[chr2:500["[..]);
        assert_eq!(records[1].alleles()[1], &b"]chr1:1000]N"[..]);
        assert_eq!(
            records[0].info(b"MATEID").string().unwrap().unwrap()[0],
            &b"c_1_2:2"[..]
        );
        assert_eq!(
            records[1].info(b"MATEID").string().unwrap().unwrap()[0],
            &b"c_1_2:1"[..]
        );
        assert_eq!(records[0].info(b"TDISC").integer().unwrap().unwrap()[0], 4);
        assert_eq!(records[0].format(b"SR").integer().unwrap()[0][0], 6);
    }

    #[test]
    fn test_germline_calls_in_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("test");
        let germline = row(
            &[(column::POS1, "3000"), (column::POS2, "3000")],
            &["0:0:20:0:20:0:0/0:0:x", "0:0:15:15:30:0:0/0:0:x"],
        );
        let mut lines = records();
        lines.insert(1, germline);
        let scored = scored(&lines, 8.0);
        assert_eq!(Origin::of(&scored[1]), Origin::Germline);
        {
            let mut output =
                VcfOutput::create(&prefix, &contigs(), &header(&["t1", "n1"]), false).unwrap();
            output.write_batch(&scored).unwrap();
        }

        let germline = read(&View::Pass.path(&prefix, Some(Origin::Germline), VariantType::Indel));
        assert_eq!(germline.len(), 1);
        assert_eq!(germline[0].pos(), 2999);
        assert!(germline[0].has_filter("PASS".as_bytes()));
        assert!(!germline[0].info(b"SOMATIC").flag().unwrap());
        let somatic = read(&View::Pass.path(&prefix, Some(Origin::Somatic), VariantType::Indel));
        assert_eq!(somatic.len(), 1);
        assert_eq!(somatic[0].pos(), 999);
    }

    #[test]
    fn test_single_sample_is_not_split() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("test");
        let header = header(&["t1"]);
        let line = row(&[], &["0:0:20:0:20:0:0/0:0:x"]);
        let scored = vec![aggregate(Breakpoint::parse(&line, 2, &header).unwrap())
            .score(&ScoringParametersBuilder::default().build().unwrap())];
        {
            let mut output = VcfOutput::create(&prefix, &contigs(), &header, false).unwrap();
            output.write_batch(&scored).unwrap();
        }
        for view in View::iter() {
            for path in view.paths(&prefix, true) {
                assert!(!path.exists());
            }
        }
        assert_eq!(read(&View::All.path(&prefix, None, VariantType::Indel)).len(), 1);
        assert_eq!(read(&View::Pass.path(&prefix, None, VariantType::Indel)).len(), 1);
        assert!(read(&View::Pass.path(&prefix, None, VariantType::Sv)).is_empty());
    }

    #[test]
    fn test_pass_only_restricts_unfiltered_view() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("test");
        {
            let mut output =
                VcfOutput::create(&prefix, &contigs(), &header(&["t1", "n1"]), true).unwrap();
            output.write_batch(&scored(&records(), 8.0)).unwrap();
        }
        for view in View::iter() {
            let indels = read(&view.path(&prefix, Some(Origin::Somatic), VariantType::Indel));
            assert_eq!(indels.len(), 1);
            assert!(indels[0].has_filter("PASS".as_bytes()));
            assert_eq!(
                read(&view.path(&prefix, Some(Origin::Somatic), VariantType::Sv)).len(),
                2
            );
        }
    }

    #[test]
    fn test_unknown_contig() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("test");
        let contigs = Contigs::new(vec![("chr1".to_owned(), 100_000)]);
        let mut output =
            VcfOutput::create(&prefix, &contigs, &header(&["t1", "n1"]), false).unwrap();
        let err = output.write_batch(&scored(&records(), 8.0)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::UnknownContig {
                contig: "chr2".to_owned()
            })
        );
    }

    #[test]
    fn test_vcf_integer_is_capped() {
        assert_eq!(vcf_integer(7), 7);
        assert_eq!(vcf_integer(8_000_000_000), i32::MAX);
    }
}
