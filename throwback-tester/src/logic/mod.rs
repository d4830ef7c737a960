pub mod catalog;
pub mod policy;
pub mod reports;
pub mod tester;

use policy::GuessStrategy;
pub use tester::*;

use throwback_game::GameVariant;

/// Rounds played per simulated session.
pub const DEFAULT_ROUNDS: usize = 12;

const SCENARIOS: &[(&str, GuessStrategy, &str)] = &[
    (
        "oracle",
        GuessStrategy::Oracle,
        "Exact guesses; every award must be the tier maximum",
    ),
    (
        "near-miss",
        GuessStrategy::NearMiss,
        "Time slightly off inside tolerance with the right labels; awards must be positive",
    ),
    (
        "wild",
        GuessStrategy::Wild,
        "Random selectors anywhere in range; awards and ledger must stay sane",
    ),
];

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS
        .iter()
        .map(|(key, _, description)| (*key, *description))
        .collect()
}

pub fn get_scenario(key: &str, variant: GameVariant) -> Option<TestScenario> {
    SCENARIOS
        .iter()
        .find(|(name, _, _)| *name == key)
        .map(|(name, strategy, _)| TestScenario {
            key: *name,
            strategy: *strategy,
            variant,
            rounds: DEFAULT_ROUNDS,
        })
}

/// Replace `all` with every registered scenario, keeping the rest in order.
pub fn expand_scenarios(keys: &[String]) -> Vec<String> {
    let mut scenarios: Vec<String> = keys.iter().filter(|k| *k != "all").cloned().collect();
    if keys.iter().any(|k| k == "all") {
        for (key, _, _) in SCENARIOS {
            if !scenarios.iter().any(|existing| existing == *key) {
                scenarios.push((*key).to_string());
            }
        }
    }
    scenarios
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_all_keyword() {
        let expanded = expand_scenarios(&["wild".to_string(), "all".to_string()]);
        assert_eq!(expanded, vec!["wild", "oracle", "near-miss"]);
    }

    #[test]
    fn lookup_binds_variant() {
        let scenario = get_scenario("near-miss", GameVariant::History).unwrap();
        assert_eq!(scenario.strategy, GuessStrategy::NearMiss);
        assert_eq!(scenario.name(), "near-miss [history]");
        assert!(get_scenario("smoke", GameVariant::Memes).is_none());
        assert_eq!(list_scenarios().len(), 3);
    }
}
