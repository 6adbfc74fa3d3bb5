use anyhow::{anyhow, Result};
use clap::{arg, builder::PossibleValuesParser, Command};
use rand::Rng;
use std::path::PathBuf;
use waypoint_algorithms::{dijkstra, HillClimbTrace, WalkPolicy};
use waypoint_graph::Graph;
use waypoint_runtime::*;
use waypoint_utils::{jsonify, JsonLinesWriter, RowSink};

fn cli() -> Command {
    Command::new("waypoint-runtime")
        .about("Finds and compares routes with Dijkstra and hill climbing")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("experiment")
                .about("Runs repeated trials of both algorithms and writes JSON-lines logs")
                .arg(
                    arg!(<GRAPH> "Path to a cityA,cityB,distance edge list, or synthetic:<NUM_NODES>:<DEGREE>[:<SEED>]")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<SETTINGS> "Settings json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--output [OUTPUT_DIR] "Directory for summary and trace logs")
                        .default_value("outdir")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("dijkstra")
                .about("Computes the least-cost route")
                .arg(
                    arg!(<GRAPH> "Path to a cityA,cityB,distance edge list, or synthetic:<NUM_NODES>:<DEGREE>[:<SEED>]")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(arg!(<START> "Start node").value_parser(clap::value_parser!(String)))
                .arg(arg!(<GOAL> "Goal node").value_parser(clap::value_parser!(String)))
                .arg(
                    arg!(--avoid [AVOID] "Node the route must not pass through")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--trace [TRACE_FILE] "If set, per-iteration rows are written to this file")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("hill_climb")
                .about("Improves a random route with shortcut hill climbing")
                .arg(
                    arg!(<GRAPH> "Path to a cityA,cityB,distance edge list, or synthetic:<NUM_NODES>:<DEGREE>[:<SEED>]")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(arg!(<START> "Start node").value_parser(clap::value_parser!(String)))
                .arg(arg!(<GOAL> "Goal node").value_parser(clap::value_parser!(String)))
                .arg(
                    arg!(--avoid [AVOID] "Node the route must not pass through")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--seed [SEED] "Seed for the random walk. Drawn at random if omitted")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--walk [WALK] "Nodes the random walk refuses to revisit")
                        .default_value("path_local")
                        .value_parser(PossibleValuesParser::new(["path_local", "shared"])),
                )
                .arg(
                    arg!(--trace [TRACE_FILE] "If set, per-iteration rows are written to this file")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("experiment", sub_m)) => run_experiment(
            sub_m.get_one::<String>("GRAPH").unwrap().clone(),
            sub_m.get_one::<String>("SETTINGS").unwrap().clone(),
            sub_m.get_one::<PathBuf>("output").unwrap().clone(),
        ),
        Some(("dijkstra", sub_m)) => run_dijkstra(
            sub_m.get_one::<String>("GRAPH").unwrap().clone(),
            sub_m.get_one::<String>("START").unwrap().clone(),
            sub_m.get_one::<String>("GOAL").unwrap().clone(),
            sub_m.get_one::<String>("avoid").cloned(),
            sub_m.get_one::<PathBuf>("trace").cloned(),
        ),
        Some(("hill_climb", sub_m)) => run_hill_climb(
            sub_m.get_one::<String>("GRAPH").unwrap().clone(),
            sub_m.get_one::<String>("START").unwrap().clone(),
            sub_m.get_one::<String>("GOAL").unwrap().clone(),
            sub_m.get_one::<String>("avoid").cloned(),
            sub_m.get_one::<u64>("seed").copied(),
            sub_m.get_one::<String>("walk").unwrap().clone(),
            sub_m.get_one::<PathBuf>("trace").cloned(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn read_graph(source: &str) -> Result<Graph> {
    let graph = load_graph(source)?;
    log::info!(
        "Loaded {} nodes and {} edges from {}",
        graph.num_nodes(),
        graph.num_edges(),
        source
    );
    Ok(graph)
}

pub fn run_experiment(graph: String, settings: String, output_dir: PathBuf) -> Result<()> {
    let graph = read_graph(&graph)?;
    let settings = load_settings(&settings)?;
    let experiment = Experiment::new(&graph, settings)?;

    let mut log = DirectoryLog::create(&output_dir)?;
    let outcome = experiment.run(&mut log);
    log.finish()?;

    if let (Some(best), Some(worst)) = (outcome.best_hill_climbing(), outcome.worst_hill_climbing()) {
        println!(
            "Best Hill Climbing Result: Cost = {}, Iterations = {}, Seed = {}, Path = {}",
            best.result.cost,
            best.result.iterations,
            best.seed,
            graph.format_path(&best.result.path)
        );
        println!(
            "Worst Hill Climbing Result: Cost = {}, Iterations = {}, Seed = {}, Path = {}",
            worst.result.cost,
            worst.result.iterations,
            worst.seed,
            graph.format_path(&worst.result.path)
        );
    }
    if let Some(result) = outcome.dijkstra.first() {
        println!(
            "Dijkstra Result: Cost = {}, Iterations = {}, Path = {}",
            result.cost,
            result.iterations,
            graph.format_path(&result.path)
        );
    }
    println!("Logs written to: {:?}", output_dir);
    Ok(())
}

pub fn run_dijkstra(
    graph: String,
    start: String,
    goal: String,
    avoid: Option<String>,
    trace_file: Option<PathBuf>,
) -> Result<()> {
    let graph = read_graph(&graph)?;
    let query = resolve_query(&graph, &start, &goal, avoid.as_deref())?;

    let result = match trace_file {
        Some(path) => {
            let mut trace = JsonLinesWriter::create(&path)?;
            let result = dijkstra(&graph, &query, Some(&mut trace));
            trace.finish()?;
            println!("trace written to: {:?}", path);
            result
        }
        None => dijkstra(&graph, &query, None),
    };
    println!("{}", jsonify(&RouteReport::from_search(&graph, &result)));
    Ok(())
}

pub fn run_hill_climb(
    graph: String,
    start: String,
    goal: String,
    avoid: Option<String>,
    seed: Option<u64>,
    walk: String,
    trace_file: Option<PathBuf>,
) -> Result<()> {
    let graph = read_graph(&graph)?;
    let mut settings = ExperimentSettings::new(&start, &goal, avoid.as_deref());
    settings.walk = match walk.as_str() {
        "path_local" => WalkPolicy::PathLocal,
        "shared" => WalkPolicy::Shared,
        other => return Err(anyhow!("Unknown walk policy '{}'", other)),
    };
    let query = resolve_query(&graph, &start, &goal, avoid.as_deref())?;
    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen_range(0..MAX_TRIAL_SEED));

    let result = match trace_file {
        Some(path) => {
            let mut trace = JsonLinesWriter::create(&path)?;
            let result = run_hill_climbing_trial(
                &graph,
                &query,
                &settings,
                seed,
                Some(&mut trace as &mut dyn RowSink<HillClimbTrace>),
            );
            trace.finish()?;
            println!("trace written to: {:?}", path);
            result
        }
        None => run_hill_climbing_trial(&graph, &query, &settings, seed, None),
    };
    println!(
        "{}",
        jsonify(&RouteReport::from_optimization(&graph, &result, Some(seed)))
    );
    Ok(())
}
