use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use flyer_sim::{simulate, SimulationOptions};

/// Runs a single fixed-wing simulation from a YAML options file.
#[derive(Parser, Debug)]
#[command(name = "flyer_simulate", version, about)]
struct Args {
    /// Simulation options (YAML)
    #[arg(short, long)]
    config: PathBuf,

    /// Write the full output as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override `solver.solver_type` (0 fixed-step, 1 non-stiff, 2 stiff)
    #[arg(short, long)]
    solver: Option<i64>,

    /// Log filter, e.g. `info` or `flyer_sim=debug`
    #[arg(long, default_value = "info")]
    log: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut options = SimulationOptions::from_yaml_file(&args.config)?;
    if let Some(solver) = args.solver {
        options.solver.solver_type = solver;
    }
    info!(config = %args.config.display(), "loaded simulation options");

    let output = match simulate(&options) {
        Ok(output) => output,
        Err(e) => {
            error!("simulation failed: {}", e);
            return Err(e.into());
        }
    };

    match &args.output {
        Some(path) => {
            output.save_json(path)?;
            info!(path = %path.display(), "wrote simulation output");
        }
        None => {
            println!(
                "t_final = {:.3} s, {} accepted / {} rejected steps, {} derivative evaluations",
                output.final_time,
                output.stats.accepted_steps,
                output.stats.rejected_steps,
                output.stats.rhs_evaluations
            );
            println!("final state: {:?}", output.final_state.serialize());
            if let Some(trim) = &output.trim {
                println!(
                    "trim: cost {:.3e}, converged {}, control {:?}",
                    trim.cost,
                    trim.converged,
                    trim.control.to_array()
                );
            }
        }
    }

    for warning in &output.warnings {
        eprintln!("warning: {}", warning);
    }
    Ok(())
}
