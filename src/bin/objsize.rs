//! Prints the maximal size of an object, i.e. the width of a single block in
//! a regular domain decomposition. Used by the experiment scripts to size the
//! input of a run.

extern crate experiments;
extern crate structopt;

use experiments::{block_size, init_logger};
use std::process;
use structopt::StructOpt;
use structopt::clap::AppSettings;

#[derive(StructOpt, Debug)]
#[structopt(name = "objsize")]
#[structopt(about = "Block width of a regular domain decomposition.")]
#[structopt(setting = AppSettings::AllowNegativeNumbers)]
struct Opt {
    /// Number of processes the domain is split among.
    #[structopt(help = "Number of processes")]
    procs: i64,

    /// Edge length of the square domain.
    #[structopt(help = "Size of the domain")]
    domain: i64,
}

fn main() {
    let opt = Opt::from_args();

    let result = init_logger().and_then(|_| block_size(opt.procs, opt.domain));
    match result {
        Ok(size) => println!("{}", size),
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}
