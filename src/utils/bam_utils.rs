// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::path::Path;
use std::str;

use anyhow::Result;
use rust_htslib::bam;
use rust_htslib::bam::Read;

use crate::errors::Error;

/// Contig names and lengths, in the order of the alignment header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contigs {
    inner: Vec<(String, u64)>,
}

impl Contigs {
    pub fn new(contigs: Vec<(String, u64)>) -> Self {
        Contigs { inner: contigs }
    }

    /// Read the `@SQ` lines of a BAM, CRAM or SAM header.
    pub fn from_bam(path: impl AsRef<Path>) -> Result<Self> {
        let unavailable = || Error::AlignmentHeaderUnavailable {
            path: path.as_ref().to_owned(),
        };
        let reader = bam::Reader::from_path(path.as_ref()).map_err(|_| unavailable())?;
        let header = reader.header();
        let contigs = header
            .target_names()
            .iter()
            .enumerate()
            .map(|(tid, name)| {
                let name = str::from_utf8(name).map_err(|_| unavailable())?;
                let len = header.target_len(tid as u32).ok_or_else(unavailable)?;
                Ok((name.to_owned(), len))
            })
            .collect::<Result<Vec<_>, Error>>()?;
        debug!("Read {} contigs from {}.", contigs.len(), path.as_ref().display());

        Ok(Contigs::new(contigs))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.inner.iter().map(|(name, len)| (name.as_str(), *len))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.iter().any(|(contig, _)| contig == name)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
