use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use gravitree::{
    config::SimulationConfig,
    parallel::BarnesHut,
    record,
    scenario::{self, PLANETS},
    simulation::Simulation,
};
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use serde::Deserialize;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file.
    #[arg(short, long, default_value = "scenarios/belt.yaml")]
    scenario: PathBuf,
    /// Output CSV file.
    #[arg(short, long, default_value = "simulation_log.csv")]
    output: PathBuf,
    /// Overrides the number of steps of the scenario.
    #[arg(long)]
    steps: Option<u64>,
    /// Overrides the seed of the scenario.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioFile {
    #[serde(default)]
    simulation: SimulationConfig,
    steps: u64,
    #[serde(default)]
    seed: u64,
    #[serde(default)]
    asteroids: usize,
    #[serde(default = "default_log_every")]
    log_every: u64,
}

fn default_log_every() -> u64 {
    10
}

fn load_scenario(path: &PathBuf) -> Result<ScenarioFile> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let scenario = serde_yaml::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", path.display()))?;

    Ok(scenario)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let mut file = load_scenario(&args.scenario)?;
    file.steps = args.steps.unwrap_or(file.steps);
    file.seed = args.seed.unwrap_or(file.seed);

    let g = file.simulation.g;
    let mut system = scenario::solar_system(g);
    let mut rng = StdRng::seed_from_u64(file.seed);
    system.extend(scenario::asteroid_belt(&mut rng, file.asteroids, g));
    info!("simulating {} bodies for {} steps", system.len(), file.steps);

    let method = BarnesHut::from_config(&file.simulation);
    let mut simulation = Simulation::new(file.simulation, method)?;

    let output = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    let mut output = BufWriter::new(output);
    record::write_header(&mut output)?;

    for _ in 0..file.steps {
        let report = simulation.step(&mut system.bodies)?;

        if file.log_every > 0 && report.frame % file.log_every == 0 {
            for (index, (name, body)) in system.iter().enumerate() {
                if record::should_log(index, PLANETS.len()) {
                    record::write_row(&mut output, report.time, name, body)?;
                }
            }
        }
    }
    output.flush()?;

    let tracked = simulation.trajectories().iter().count();
    info!(
        "done at t = {:.3} with {tracked} sampled trajectories, records in {}",
        simulation.time(),
        args.output.display()
    );

    Ok(())
}
