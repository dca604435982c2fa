#![allow(dead_code)]

use clap::Parser;
use log::info;
use took::Timer;

use crate::cli::ProgramArguments;
use crate::clustering::Clustering;
use crate::solution::{ComputingTimes, Solution};

mod cli;
mod clustering;
mod error;
mod io;
mod problem;
mod solution;
mod utils;

fn main() {
    env_logger::init();

    let args = ProgramArguments::parse();
    info!("{:?}", &args);

    let solution = run(&args);
    let code = solution.code;

    if let Err(e) = io::output::write_solution(&solution, args.output.as_deref()) {
        eprintln!("{}", e);
        std::process::exit(e.code() as i32);
    }
    std::process::exit(code as i32);
}

/// Load, cluster, assemble the envelope. Every failure becomes an error
/// envelope rather than a crash.
fn run(args: &ProgramArguments) -> Solution {
    let load_timer = Timer::new();
    let instance = match io::load_instance(&args.input) {
        Ok(instance) => instance,
        Err(e) => return Solution::from_error(&e),
    };
    let loading = load_timer.took().as_std().as_millis() as u64;
    info!(
        "instance loaded after {}ms ({} jobs, {} vehicles)",
        loading,
        instance.num_jobs(),
        instance.num_vehicles()
    );

    let solve_timer = Timer::new();
    let clustering = match Clustering::run(
        &instance,
        args.strategy(),
        args.init(),
        args.regret_coeff,
    ) {
        Ok(clustering) => clustering,
        Err(e) => return Solution::from_error(&e),
    };
    let solving = solve_timer.took().as_std().as_millis() as u64;
    info!(
        "clustering finished after {}ms: {}/{} jobs assigned, edge cost {}",
        solving,
        clustering.num_assigned(),
        instance.num_jobs(),
        clustering.edges_cost
    );

    #[cfg(feature = "clustering_assertions")]
    utils::validator::assert_valid_clustering(&instance, &clustering);

    Solution::from_clustering(&instance, &clustering, ComputingTimes { loading, solving })
}
