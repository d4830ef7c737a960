use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use throwback_game::{
    DifficultyTier, EngineError, Evaluation, GameConfig, GameEngine, GameVariant, MemoryLedger,
    MemoryRecordStore, NextRound, PlaySession, ScoringModel,
};

use super::catalog::catalog;
use super::policy::{GuessPolicy, GuessStep, GuessStrategy};

const SCORE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
    #[serde(with = "duration_vec_serde")]
    pub performance_data: Vec<Duration>,
}

/// A scripted guesser bound to one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestScenario {
    pub key: &'static str,
    pub strategy: GuessStrategy,
    pub variant: GameVariant,
    pub rounds: usize,
}

impl TestScenario {
    #[must_use]
    pub fn name(&self) -> String {
        format!("{} [{}]", self.key, self.variant)
    }
}

/// Totals from one simulated session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSummary {
    pub rounds_played: usize,
    pub final_score: f64,
}

pub struct LogicTester {
    verbose: bool,
}

impl LogicTester {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn run_scenario(
        &self,
        scenario: &TestScenario,
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        let mut results = Vec::new();

        for &seed in seeds {
            if self.verbose {
                println!(
                    "🧪 Testing scenario: {} (strategy: {} seed: {})",
                    scenario.name().bright_white(),
                    scenario.strategy,
                    seed
                );
            }
            results.push(self.run_single_scenario(scenario, seed, iterations));
        }

        results
    }

    fn run_single_scenario(
        &self,
        scenario: &TestScenario,
        seed: u64,
        iterations: usize,
    ) -> ScenarioResult {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut performance_data = Vec::new();

        for i in 0..iterations {
            let start_time = Instant::now();
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));

            match simulate_session(scenario, iteration_seed) {
                Ok(summary) => {
                    successes += 1;
                    let duration = start_time.elapsed();
                    performance_data.push(duration);
                    if self.verbose {
                        println!(
                            "  ✅ Iteration {}/{} passed ({duration:?}) rounds:{} score:{:.1}",
                            i + 1,
                            iterations,
                            summary.rounds_played,
                            summary.final_score
                        );
                    }
                }
                Err(err) => {
                    if self.verbose {
                        println!(
                            "  ❌ Iteration {}/{} failed: {}",
                            i + 1,
                            iterations,
                            err.clone().red()
                        );
                    }
                    failures.push(format!(
                        "Iteration {} (strategy {}, seed {}): {}",
                        i + 1,
                        scenario.strategy,
                        iteration_seed,
                        err
                    ));
                }
            }
        }

        let avg_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(1)
        };

        ScenarioResult {
            scenario_name: scenario.name(),
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration: avg_duration,
            performance_data,
        }
    }
}

/// Play one seeded session on the built-in catalog and check every round.
///
/// # Errors
///
/// Returns a description of the first violated expectation.
pub fn simulate_session(scenario: &TestScenario, seed: u64) -> Result<SessionSummary, String> {
    let variant = scenario.variant;
    let ledger = MemoryLedger::new();
    let engine = GameEngine::new(
        GameConfig::for_variant(variant),
        MemoryRecordStore::with_records(catalog(variant)),
        ledger.clone(),
    );
    let mut session = engine
        .load_session(seed)
        .into_result()
        .map_err(|err| format!("session did not start: {err}"))?;
    let mut policy = scenario.strategy.create_policy(seed);
    let mut summary = SessionSummary::default();

    for round in 0..scenario.rounds {
        let context = |err: EngineError| format!("round {}: {err}", round + 1);
        let tier = DifficultyTier::ALL[round % DifficultyTier::ALL.len()];
        session.set_difficulty(tier).map_err(context)?;
        play_round(&mut session, policy.as_mut()).map_err(context)?;

        let before = ledger.value();
        let evaluation = session.submit().map_err(context)?;
        summary.rounds_played += 1;

        let controller = session.controller();
        let state = controller.state();
        let profile = controller.profile();
        check_round(scenario, &evaluation, profile.points, before, ledger.value())
            .map_err(|err| format!("round {} ({} on {}): {err}", round + 1, tier, state.current.id))?;

        let replay = controller.engine().evaluate(&state.guess, &state.current, profile);
        if replay != evaluation {
            return Err(format!(
                "round {}: re-evaluating the same guess changed the outcome",
                round + 1
            ));
        }
        if (session.score() - ledger.value()).abs() > SCORE_EPSILON {
            return Err(format!(
                "round {}: session score {} drifted from ledger {}",
                round + 1,
                session.score(),
                ledger.value()
            ));
        }

        if session.next_round().map_err(context)? == NextRound::NoMoreRounds {
            break;
        }
    }

    summary.final_score = session.score();
    Ok(summary)
}

fn play_round(
    session: &mut PlaySession<'_, MemoryLedger>,
    policy: &mut dyn GuessPolicy,
) -> Result<(), EngineError> {
    let variant = session.controller().config().variant;
    let steps = policy.plan(session.state(), variant, session.controller().profile());
    log::debug!("{} plans {steps:?}", policy.name());
    for step in steps {
        match step {
            GuessStep::Year(year) => session.set_year(year)?,
            GuessStep::Month(month) => session.set_month(month)?,
            GuessStep::Axis(axis) => session.set_axis(Some(axis))?,
            GuessStep::Origin(code) => session.select_origin(Some(code))?,
            GuessStep::Pick(label) => session.select_option(Some(label))?,
            GuessStep::PickNth(n) => {
                let options = session.options();
                let label = options.get(n % options.len().max(1)).cloned();
                session.select_option(label)?;
            }
        }
    }
    Ok(())
}

fn check_round(
    scenario: &TestScenario,
    evaluation: &Evaluation,
    tier_points: u32,
    ledger_before: f64,
    ledger_after: f64,
) -> Result<(), String> {
    if evaluation.points.is_nan() || evaluation.points < 0.0 {
        return Err(format!("negative award {}", evaluation.points));
    }
    if ledger_after + SCORE_EPSILON < ledger_before {
        return Err(format!(
            "ledger went backwards from {ledger_before} to {ledger_after}"
        ));
    }
    if (ledger_after - ledger_before - evaluation.points).abs() > SCORE_EPSILON {
        return Err(format!(
            "ledger moved by {} for an award of {}",
            ledger_after - ledger_before,
            evaluation.points
        ));
    }
    match scenario.strategy {
        GuessStrategy::Oracle => {
            let points = f64::from(tier_points);
            let expected = match ScoringModel::for_variant(scenario.variant) {
                ScoringModel::MonthWindow => points * 3.0,
                ScoringModel::RegionalYear => points * 2.0,
            };
            if (evaluation.points - expected).abs() > SCORE_EPSILON {
                return Err(format!(
                    "exact guess earned {} instead of {expected}: {}",
                    evaluation.points, evaluation.feedback
                ));
            }
        }
        GuessStrategy::NearMiss => {
            if evaluation.points <= 0.0 {
                return Err(format!(
                    "near miss earned nothing: {}",
                    evaluation.feedback
                ));
            }
        }
        GuessStrategy::Wild => {}
    }
    Ok(())
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}

mod duration_vec_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(durations: &[Duration], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis: Vec<u128> = durations.iter().map(Duration::as_millis).collect();
        millis.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis_vec = Vec::<u128>::deserialize(deserializer)?;
        Ok(millis_vec
            .into_iter()
            .map(|m| Duration::from_millis(u64::try_from(m).unwrap_or(0)))
            .collect())
    }
}
