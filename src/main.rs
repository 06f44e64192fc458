use doorlab::{solver, EpisodeTelemetry, LabConfig, LabEnv, LabGenerator, LabLayout};
use serde::Serialize;

#[derive(Serialize)]
struct Report<'a> {
    config: &'a LabConfig,
    layout: &'a LabLayout,
    stats: &'a doorlab::GenerationStats,
    solution: Option<solver::Solution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    replay: Option<EpisodeTelemetry>,
}

fn load_startup_config() -> LabConfig {
    let path = std::env::var("DOORLAB_CONFIG")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "doorlab.json".to_string());
    match LabConfig::load_or_default(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{path}: {e}");
            std::process::exit(2);
        }
    }
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn replay_witness(
    config: &LabConfig,
    layout: &LabLayout,
    solution: &solver::Solution,
) -> Result<EpisodeTelemetry, doorlab::LabError> {
    let mut env = LabEnv::new(config.clone())?;
    env.reset_with_layout(layout.clone())?;
    for action in &solution.actions {
        let result = env.step(*action)?;
        if result.terminated || result.truncated {
            break;
        }
    }
    Ok(env.telemetry().clone())
}

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    let mut config = load_startup_config();
    if let Some(seed) = flag_value(&args, "--seed") {
        match seed.parse::<u64>() {
            Ok(seed) => config.seed = Some(seed),
            Err(e) => {
                eprintln!("invalid --seed {seed}: {e}");
                std::process::exit(2);
            }
        }
    }
    let replay_solution = args.iter().any(|a| a == "--replay");

    let mut generator = match LabGenerator::new(config.clone()) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    let layout = match generator.generate() {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let solution = solver::solve(&layout);
    let replay = match (&solution, replay_solution) {
        (Some(solution), true) => match replay_witness(&config, &layout, solution) {
            Ok(telemetry) => Some(telemetry),
            Err(e) => {
                eprintln!("replay failed: {e}");
                std::process::exit(1);
            }
        },
        _ => None,
    };

    let report = Report {
        config: &config,
        layout: &layout,
        stats: generator.last_stats(),
        solution,
        replay,
    };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("failed to serialize report: {e}");
            std::process::exit(1);
        }
    }
}
