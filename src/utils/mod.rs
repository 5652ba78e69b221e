// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use crate::constants::EMPTY_FIELD;

pub mod bam_utils;
pub(crate) mod genomics;

pub use bam_utils::Contigs;

/// Render a LOD or allele fraction with fixed precision, so that output is reproducible.
pub(crate) fn format_float(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        // avoid "-0.00"
        "0.00".to_owned()
    } else {
        format!("{:.2}", rounded)
    }
}

/// Render an optional value, `x` if absent.
pub(crate) fn format_optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| EMPTY_FIELD.to_owned(), |value| value.to_string())
}
