// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! genomics.rs
//!
//! Utility functions for genomics-related tasks

/// Strip "chr" prefix, so both "chr1" and "1" normalize to "1".
pub(crate) fn normalize_chrom(chrom: &str) -> String {
    chrom.trim_start_matches("chr").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndelKind {
    Insertion,
    Deletion,
}

/// An indel described by VCF style REF and ALT alleles.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Indel {
    #[getset(get_copy = "pub")]
    kind: IndelKind,
    #[getset(get_copy = "pub")]
    len: usize,
    /// Inserted or deleted bases (uppercase), if the alleles share an anchor.
    #[getset(get = "pub")]
    seq: Option<Vec<u8>>,
}

impl Indel {
    /// `None` if the alleles do not describe an indel, or if ALT is symbolic.
    pub fn from_alleles(ref_allele: &[u8], alt_allele: &[u8]) -> Option<Self> {
        if ref_allele.len() == alt_allele.len()
            || alt_allele.first() == Some(&b'<')
            || ref_allele.is_empty()
            || alt_allele.is_empty()
        {
            return None;
        }
        let (kind, shorter, longer) = if alt_allele.len() > ref_allele.len() {
            (IndelKind::Insertion, ref_allele, alt_allele)
        } else {
            (IndelKind::Deletion, alt_allele, ref_allele)
        };
        let anchored = longer[..shorter.len()].eq_ignore_ascii_case(shorter);
        let seq = if anchored {
            Some(longer[shorter.len()..].to_ascii_uppercase())
        } else {
            None
        };

        Some(Indel {
            kind,
            len: longer.len() - shorter.len(),
            seq,
        })
    }

    /// Same kind and length, and the same bases if both sides know them.
    pub fn is_compatible(&self, other: &Indel) -> bool {
        self.kind == other.kind
            && self.len == other.len
            && match (&self.seq, &other.seq) {
                (Some(a), Some(b)) => a == b,
                _ => true,
            }
    }
}
