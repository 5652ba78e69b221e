// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Annotation of breakpoints with known population variants.
//!
//! Only indels are looked up. Two indels are considered the same variant if
//! they start at the same position, are of the same kind and length and, if
//! both sides allow to infer them, insert or delete the same bases.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use rust_htslib::bcf;
use rust_htslib::bcf::Read;

use crate::breakpoints::{Breakpoint, PopulationMatch};
use crate::errors::Error;
use crate::utils::genomics::{normalize_chrom, Indel};

#[derive(Debug, Clone, PartialEq, Eq, new)]
struct KnownIndel {
    id: String,
    indel: Indel,
}

/// Indels of a population VCF/BCF, keyed by contig (without `chr` prefix) and 1-based position.
#[derive(Debug, Default)]
pub struct PopulationDatabase {
    inner: HashMap<(String, u64), Vec<KnownIndel>>,
}

impl PopulationDatabase {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let unavailable = || Error::DatabaseUnavailable {
            path: path.to_owned(),
        };
        let mut reader = bcf::Reader::from_path(path).map_err(|_| unavailable())?;
        let header = reader.header().clone();

        let mut database = PopulationDatabase::default();
        let mut n_records = 0;
        for record in reader.records() {
            let record = record.with_context(unavailable)?;
            let rid = record.rid().ok_or_else(unavailable)?;
            let chrom = normalize_chrom(&String::from_utf8_lossy(
                header.rid2name(rid).with_context(unavailable)?,
            ));
            let pos = record.pos() as u64 + 1;
            let id = match record.id().as_slice() {
                b"." => format!("{}:{}", chrom, pos),
                id => String::from_utf8_lossy(id).into_owned(),
            };

            let alleles = record.alleles();
            if let Some((ref_allele, alt_alleles)) = alleles.split_first() {
                for alt_allele in alt_alleles {
                    if let Some(indel) = Indel::from_alleles(ref_allele, alt_allele) {
                        database.insert(chrom.clone(), pos, KnownIndel::new(id.clone(), indel));
                    }
                }
            }
            n_records += 1;
        }
        info!(
            "Loaded {} indel alleles from {} records of population database {}.",
            database.len(),
            n_records,
            path.display()
        );

        Ok(database)
    }

    fn insert(&mut self, chrom: String, pos: u64, known: KnownIndel) {
        self.inner.entry((chrom, pos)).or_default().push(known);
    }

    /// Number of indexed indel alleles.
    pub fn len(&self) -> usize {
        self.inner.values().map(|known| known.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Known variant matching the given breakpoint. Structural variants never match.
    pub fn query(&self, breakpoint: &Breakpoint) -> Option<PopulationMatch> {
        if !breakpoint.is_indel() {
            return None;
        }
        let site = breakpoint.site();
        let indel = Indel::from_alleles(
            site.ref_allele()?.as_bytes(),
            site.alt_allele()?.as_bytes(),
        )?;
        self.inner
            .get(&(normalize_chrom(site.chrom1()), site.pos1()))?
            .iter()
            .find(|known| known.indel.is_compatible(&indel))
            .map(|known| PopulationMatch::new(known.id.clone()))
    }
}

/// Replace the population match of a breakpoint with the result of a database lookup.
pub fn annotate(breakpoint: Breakpoint, database: &PopulationDatabase) -> Breakpoint {
    let population_match = database.query(&breakpoint);
    breakpoint.with_population_match(population_match)
}
