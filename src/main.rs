use clap::Parser;
use dna_stretch::errors::SimulationError;
use dna_stretch::io::read_config;
use dna_stretch::simulation::Simulation;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML run configuration
    #[arg(short, long, default_value = "config.yml")]
    config: String,

    /// Override the configured seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Override the configured iteration ceiling
    #[arg(short, long)]
    max_steps: Option<u64>,
}

fn run(args: Args) -> Result<(), SimulationError> {
    let config = read_config(&args.config)?;
    let params = config.params;

    let seed = args.seed.or(config.seed);
    let rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let mut simulation = Simulation::new(params, rng)?;
    let max_steps = args.max_steps.or(config.max_steps);
    let mean_extension = match max_steps {
        Some(budget) => simulation.run_bounded(budget)?,
        None => simulation.run(),
    };

    let contour_length = params.segment_length * params.n_segments as f64;
    println!("Metropolis Monte Carlo - DNA Stretching");
    println!("----------------------------------------");
    println!("Force:                {} ", params.force);
    println!("Segments:             {}", params.n_segments);
    println!("Segment length:       {}", params.segment_length);
    println!("Temperature:          {} K", params.temperature);
    println!("Proposal block size:  {}", params.block_size);
    println!("Tolerance:            {:e}", params.tolerance);
    if let Some(s) = seed {
        println!("Seed:                 {s}");
    }
    println!();
    println!("Steps to convergence: {}", simulation.steps());
    println!("Window variance:      {:e}", simulation.window().variance());
    println!(
        "Mean extension:       {:.6} ({:.1}% of contour length)",
        mean_extension,
        100.0 * mean_extension / contour_length
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
