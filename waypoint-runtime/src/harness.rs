use crate::{
    settings::{resolve_query, ExperimentSettings},
    sinks::ExperimentLog,
};
use anyhow::{anyhow, Result};
use logging_timer::time;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use waypoint_algorithms::{
    dijkstra, hill_climbing, DijkstraTrace, HillClimbTrace, OptimizationResult, SearchResult,
};
use waypoint_graph::{Graph, RouteQuery};
use waypoint_utils::{deserialize_cost, serialize_cost, RowSink};

/// Per-trial seeds are drawn from `0..MAX_TRIAL_SEED`.
pub const MAX_TRIAL_SEED: u64 = 100_000;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Dijkstra,
    HillClimbing,
}

/// One summary row per trial.
///
/// `last_improved`, `evals_total` and `seed` only apply to hill climbing and
/// are `None` for Dijkstra.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrialRecord {
    pub algorithm: Algorithm,
    pub run: usize,
    pub success: bool,
    #[serde(serialize_with = "serialize_cost", deserialize_with = "deserialize_cost")]
    pub final_cost: f64,
    pub iters: usize,
    pub last_improved: Option<usize>,
    pub evals_total: Option<usize>,
    pub runtime_ms: f64,
    pub path_len: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HillClimbingRun {
    pub run: usize,
    pub seed: u64,
    pub result: OptimizationResult,
    pub runtime_ms: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ExperimentOutcome {
    pub dijkstra: Vec<SearchResult>,
    pub hill_climbing: Vec<HillClimbingRun>,
}

impl ExperimentOutcome {
    /// Hill-climbing runs ordered by final cost, failures last. Ties keep run order.
    pub fn ranked_hill_climbing(&self) -> Vec<&HillClimbingRun> {
        let mut runs: Vec<&HillClimbingRun> = self.hill_climbing.iter().collect();
        runs.sort_by(|a, b| a.result.cost.total_cmp(&b.result.cost));
        runs
    }

    pub fn best_hill_climbing(&self) -> Option<&HillClimbingRun> {
        self.ranked_hill_climbing().first().copied()
    }

    pub fn worst_hill_climbing(&self) -> Option<&HillClimbingRun> {
        self.ranked_hill_climbing().last().copied()
    }
}

struct DijkstraRows<'a>(&'a mut dyn ExperimentLog);

impl RowSink<DijkstraTrace> for DijkstraRows<'_> {
    fn push_row(&mut self, row: DijkstraTrace) {
        self.0.dijkstra_row(row);
    }
}

struct HillClimbingRows<'a> {
    log: &'a mut dyn ExperimentLog,
    run: usize,
}

impl RowSink<HillClimbTrace> for HillClimbingRows<'_> {
    fn push_row(&mut self, row: HillClimbTrace) {
        self.log.hill_climbing_row(self.run, row);
    }
}

/// Repeated trials of both algorithms against one (start, goal, avoid) query.
pub struct Experiment<'g> {
    graph: &'g Graph,
    query: RouteQuery,
    settings: ExperimentSettings,
}

impl<'g> Experiment<'g> {
    pub fn new(graph: &'g Graph, settings: ExperimentSettings) -> Result<Self> {
        if settings.num_runs == 0 {
            return Err(anyhow!("num_runs must be at least 1"));
        }
        let query = resolve_query(
            graph,
            &settings.start,
            &settings.goal,
            settings.avoid.as_deref(),
        )?;
        Ok(Self {
            graph,
            query,
            settings,
        })
    }

    pub fn query(&self) -> &RouteQuery {
        &self.query
    }

    pub fn settings(&self) -> &ExperimentSettings {
        &self.settings
    }

    #[time("info")]
    pub fn run(&self, log: &mut dyn ExperimentLog) -> ExperimentOutcome {
        let mut master = match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let outcome = ExperimentOutcome {
            dijkstra: self.run_dijkstra(log),
            hill_climbing: self.run_hill_climbing(&mut master, log),
        };
        log::info!(
            "{} -> {}: {}/{} Dijkstra and {}/{} hill climbing trials succeeded",
            self.settings.start,
            self.settings.goal,
            outcome.dijkstra.iter().filter(|r| r.is_success()).count(),
            outcome.dijkstra.len(),
            outcome
                .hill_climbing
                .iter()
                .filter(|r| r.result.is_success())
                .count(),
            outcome.hill_climbing.len(),
        );
        outcome
    }

    /// Dijkstra is deterministic, so only the first trial is traced.
    #[time]
    fn run_dijkstra(&self, log: &mut dyn ExperimentLog) -> Vec<SearchResult> {
        let mut results = Vec::with_capacity(self.settings.num_runs);
        for run in 0..self.settings.num_runs {
            let t0 = Instant::now();
            let result = if run == 0 {
                dijkstra(self.graph, &self.query, Some(&mut DijkstraRows(&mut *log)))
            } else {
                dijkstra(self.graph, &self.query, None)
            };
            let runtime_ms = t0.elapsed().as_secs_f64() * 1000.0;
            log::debug!(
                "dijkstra run {}: cost {} after {} iterations",
                run,
                result.cost,
                result.iterations
            );
            log.record(TrialRecord {
                algorithm: Algorithm::Dijkstra,
                run,
                success: result.is_success(),
                final_cost: result.cost,
                iters: result.iterations,
                last_improved: None,
                evals_total: None,
                runtime_ms,
                path_len: result.path.len(),
                seed: None,
            });
            results.push(result);
        }
        results
    }

    #[time]
    fn run_hill_climbing(
        &self,
        master: &mut StdRng,
        log: &mut dyn ExperimentLog,
    ) -> Vec<HillClimbingRun> {
        let mut runs = Vec::with_capacity(self.settings.num_runs);
        for run in 0..self.settings.num_runs {
            let seed = master.gen_range(0..MAX_TRIAL_SEED);
            let t0 = Instant::now();
            let result = run_hill_climbing_trial(
                self.graph,
                &self.query,
                &self.settings,
                seed,
                Some(&mut HillClimbingRows {
                    log: &mut *log,
                    run,
                }),
            );
            let runtime_ms = t0.elapsed().as_secs_f64() * 1000.0;
            log::debug!(
                "hill climbing run {} (seed {}): cost {} after {} iterations",
                run,
                seed,
                result.cost,
                result.iterations
            );
            log.record(TrialRecord {
                algorithm: Algorithm::HillClimbing,
                run,
                success: result.is_success(),
                final_cost: result.cost,
                iters: result.iterations,
                last_improved: Some(result.last_improved),
                evals_total: Some(result.evaluations),
                runtime_ms,
                path_len: result.path.len(),
                seed: Some(seed),
            });
            runs.push(HillClimbingRun {
                run,
                seed,
                result,
                runtime_ms,
            });
        }
        runs
    }
}

/// Replays a single hill-climbing trial from its recorded seed.
pub fn run_hill_climbing_trial(
    graph: &Graph,
    query: &RouteQuery,
    settings: &ExperimentSettings,
    seed: u64,
    trace: Option<&mut dyn RowSink<HillClimbTrace>>,
) -> OptimizationResult {
    let mut rng = StdRng::seed_from_u64(seed);
    hill_climbing(graph, query, settings.walk, &mut rng, trace)
}
