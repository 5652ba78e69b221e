// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("breakpoint table {path} is empty, expected a header line")]
    MissingHeader { path: PathBuf },
    #[error("invalid breakpoint table header: found {found} columns, expected at least {expected} (fixed columns plus one sample)")]
    MalformedHeader { found: usize, expected: usize },
    #[error("invalid sample column {name} in breakpoint table header, sample names have to start with 't' (tumor) or 'n' (normal)")]
    InvalidSampleName { name: String },
    #[error("malformed breakpoint record in line {line}: {msg}")]
    MalformedRecord { line: usize, msg: String },
    #[error("breakpoint record in line {line} carries {found} sample alleles, but the header declares {expected} samples")]
    UnresolvedAllele {
        line: usize,
        found: usize,
        expected: usize,
    },
    #[error("unable to read breakpoint table {path}")]
    InputUnavailable { path: PathBuf },
    #[error("unable to read population database {path}")]
    DatabaseUnavailable { path: PathBuf },
    #[error("unable to read alignment header from {path}")]
    AlignmentHeaderUnavailable { path: PathBuf },
    #[error("contig {contig} of breakpoint record is not defined in the alignment header")]
    UnknownContig { contig: String },
    #[error("output {path} would overwrite the input breakpoint table, choose a different analysis id")]
    OutputOverwritesInput { path: PathBuf },
}

pub(crate) fn malformed_record(line: usize, msg: &str) -> Error {
    Error::MalformedRecord {
        line,
        msg: msg.to_owned(),
    }
}
