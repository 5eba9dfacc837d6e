//! Compiles the per-party timing results under a results directory
//! into `compiled_time_test_results.csv` at that directory's root.
//!
//! Configurations with an incomplete set of party files are skipped
//! and listed at the end; re-run after the sweep fills them in.

extern crate env_logger;
#[macro_use]
extern crate structopt;
extern crate timing_evaluation;

use std::path::Path;
use std::process;
use structopt::StructOpt;
use timing_evaluation::compile_report;

#[derive(StructOpt, Debug)]
#[structopt(name = "compile")]
#[structopt(about = "Compile per-party timing results into one report")]
struct Opt {
    /// The results root: one subdirectory per network model, each
    /// holding the per-party `time_test_results_*.csv` files.
    #[structopt(help = "Results directory")]
    results_dir: String,
}

fn main() {
    env_logger::init();
    let opt = Opt::from_args();

    if !Path::new(&opt.results_dir).is_dir() {
        eprintln!("Argument 1 should be a directory");
        process::exit(1);
    }

    let summary = match compile_report(&opt.results_dir) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("error: {}", e);
            for cause in e.iter().skip(1) {
                eprintln!("caused by: {}", cause);
            }
            process::exit(1);
        }
    };

    for config in &summary.processed {
        println!("Processed time results for {}", config);
    }
    if !summary.skipped.is_empty() {
        println!("Skipped {} configuration(s) with incomplete results:", summary.skipped.len());
        for config in &summary.skipped {
            println!("  {}", config);
        }
    }
    println!("Timing data compiled");
}
