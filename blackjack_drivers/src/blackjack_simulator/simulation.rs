use anyhow::Context;
use blackjack_os::{
    simulation::{simulate_games, SimulationResult},
    strategy::ExactStrategy,
    Rule,
};
use blackjack_os_drivers::ConfigBlackjackSimulator;

pub fn run(
    rule: &Rule,
    simulator_config: &ConfigBlackjackSimulator,
) -> anyhow::Result<SimulationResult> {
    let config = simulator_config.get_simulation_config();
    simulate_games(rule, &config, &ExactStrategy::new()).context("simulation failed")
}

pub fn print_report(result: &SimulationResult) {
    println!("Games played: {}", result.games);
    println!("Decks: {}", result.decks);
    println!("Seconds elapsed: {:.3}", result.seconds_elapsed);
    println!("Games per second: {:.1}", result.games_per_second);
    println!("Win rate: {:.6}", result.win_rate);
    println!("House edge: {:.5} percent", result.house_edge * 100.0);
    println!("Player edge: {:.5} percent", result.player_edge * 100.0);

    println!();
    println!("Outcome | Proportion");
    for outcome_proportion in &result.outcomes {
        println!(
            "{:<7} | {:.10}",
            outcome_proportion.outcome.to_string(),
            outcome_proportion.proportion
        );
    }
}
