// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use crate::breakpoints::{Breakpoint, DiscordantCounts, SampleKind};

/// Sum discordant read pair support over tumor and over normal samples.
///
/// Has to run after sample names have been attached, because the role of a
/// sample is given by its name. Sample alleles stay untouched.
pub fn aggregate(breakpoint: Breakpoint) -> Breakpoint {
    let discordant = breakpoint.alleles_by_kind().fold(
        DiscordantCounts::default(),
        |mut counts, (kind, allele)| {
            match kind {
                SampleKind::Tumor => counts.tumor += u64::from(allele.disc()),
                SampleKind::Normal => counts.normal += u64::from(allele.disc()),
            }
            counts
        },
    );
    breakpoint.with_discordant(discordant)
}
