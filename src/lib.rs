// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate log;
#[macro_use]
extern crate approx;
#[macro_use]
extern crate derive_builder;
#[macro_use]
extern crate getset;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate strum_macros;
#[macro_use]
extern crate derive_new;

pub mod aggregation;
pub mod annotation;
pub mod breakpoints;
pub mod cli;
pub mod constants;
pub mod errors;
pub mod output;
pub mod refilter;
pub mod scoring;
pub mod utils;

pub use crate::breakpoints::{Breakpoint, ScoredBreakpoint};
pub use crate::refilter::{Refilter, RefilterBuilder};
pub use crate::scoring::{Classification, ScoringParameters, ScoringParametersBuilder, Verdict};
