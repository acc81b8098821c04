//! Library of functions and structs to help with the load-balancing
//! experiments.
//!
//! Two independent tools are built on top of this crate: `parse-batch` turns
//! the textual output of a batch of balancing runs into a summary file and a
//! comparison chart, and `objsize` computes the block width of a regular
//! domain decomposition.

#![recursion_limit = "1024"]
#![deny(missing_docs)]

extern crate chrono;
extern crate env_logger;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate itertools;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate plotters;
extern crate regex;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate toml;

#[cfg(test)]
extern crate tempfile;

#[allow(missing_docs)]
mod errors;
pub use errors::{Error, ErrorKind, Result, ResultExt};

mod setting;
pub use setting::{ChartSetting, Setting};

mod record;
pub use record::{ExperimentRecord, extract_multiplier, parse_log};

mod series;
pub use series::{Key, Sample, Saving, TimingSeries, format_time};

mod style;
pub use style::{Dash, LineStyle, PALETTE, line_style};

mod chart;
pub use chart::{ChartLine, layout, render};

mod blocksize;
pub use blocksize::block_size;

mod logger;
pub use logger::init_logger;
