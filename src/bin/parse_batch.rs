//! Parses the output of a batch of balancing experiments and produces a
//! summary of total times (`<log>.txt`) and a comparison chart (`<log>.png`).
//!
//! The log is a sequence of blocks, each terminated by a `--` line:
//! ```ignore
//! cmd: mpirun -np 64 ./dlb_heat -M 1.5
//! MPIProcs: 64
//! Mode: parBal
//! TotalTime: 42.17
//! --
//! ```

extern crate experiments;
#[macro_use]
extern crate log;
extern crate structopt;

use experiments::*;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "parse-batch")]
#[structopt(about = "Summarize and plot the output of balancing experiments.")]
struct Opt {
    /// The experiment output; `.txt` and `.png` files are written next to it.
    #[structopt(help = "Batch log file", parse(from_os_str))]
    log_path: PathBuf,

    /// Overrides the built-in experiment design (cores, modes, labels).
    #[structopt(short = "s", long = "setting", parse(from_os_str))]
    #[structopt(help = "Path to a TOML setting")]
    setting_path: Option<PathBuf>,
}

fn output_paths(log_path: &Path) -> (PathBuf, PathBuf) {
    (log_path.with_extension("txt"), log_path.with_extension("png"))
}

fn run(opt: &Opt) -> Result<()> {
    let setting = match opt.setting_path {
        Some(ref path) => Setting::init(path)?,
        None => Setting::default(),
    };
    let (summary_path, chart_path) = output_paths(&opt.log_path);

    let file = File::open(&opt.log_path)
        .chain_err(|| format!("no input file: {}", opt.log_path.display()))?;
    let records = parse_log(BufReader::new(file))?;
    info!("{} records in {}", records.len(), opt.log_path.display());

    let times = TimingSeries::aggregate(&records, &setting)?;
    times.dump();
    let savings = times.percent_saved(&setting)?;
    let lines = layout(&times, &setting);

    let mut out = BufWriter::new(File::create(&summary_path)?);
    times.write_summary(&mut out)?;
    info!("summary written to {}", summary_path.display());

    println!("Percent");
    for saving in &savings {
        println!("{}", saving);
    }

    render(&lines, &setting.chart, &chart_path)?;
    info!("chart written to {}", chart_path.display());
    Ok(())
}

fn main() {
    let opt = Opt::from_args();

    if let Err(e) = init_logger() {
        eprintln!("error: {}", e);
        process::exit(1);
    }
    debug!("{:?}", opt);

    if let Err(e) = run(&opt) {
        eprintln!("error: {}", e);
        for cause in e.iter().skip(1) {
            eprintln!("caused by: {}", cause);
        }
        process::exit(1);
    }
}
