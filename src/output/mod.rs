// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub mod table;
pub mod vcf;

pub use table::{to_line, TableWriter};
pub use vcf::{select_for_vcf, Origin, VariantType, VcfOutput, View};

/// Append a suffix to an output prefix, e.g. `out/run` and `bps.txt.gz` give `out/run.bps.txt.gz`.
pub fn output_path(prefix: &Path, suffix: &str) -> PathBuf {
    let mut path = OsString::from(prefix.as_os_str());
    path.push(".");
    path.push(suffix);
    PathBuf::from(path)
}

/// Path of the refreshed breakpoint table.
pub fn table_path(prefix: &Path) -> PathBuf {
    output_path(prefix, "bps.txt.gz")
}
