use super::outcome::{OutcomeTally, Payout};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutcomeProportion {
    pub outcome: Payout,
    pub proportion: f64,
}

/// Summary of a finished simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub games: u64,
    pub decks: u8,
    pub outcomes: Vec<OutcomeProportion>,
    pub seconds_elapsed: f64,
    pub games_per_second: f64,
    /// Share of the bets won, a push counting as half.
    pub win_rate: f64,
    pub house_edge: f64,
    pub player_edge: f64,
}

impl SimulationResult {
    pub fn new(decks: u8, tally: &OutcomeTally, seconds_elapsed: f64) -> SimulationResult {
        let games = tally.games();
        let outcomes = tally
            .iter()
            .map(|(outcome, count)| OutcomeProportion {
                outcome,
                proportion: ratio(count as f64, games),
            })
            .collect();
        let win_rate = ratio((games as f64 + tally.net_units()) / 2.0, games);
        let house_edge = -2.0 * (win_rate - 0.5);
        let games_per_second = if seconds_elapsed > 0.0 {
            games as f64 / seconds_elapsed
        } else {
            0.0
        };

        SimulationResult {
            games,
            decks,
            outcomes,
            seconds_elapsed,
            games_per_second,
            win_rate,
            house_edge,
            player_edge: -house_edge,
        }
    }

    pub fn proportion_of(&self, outcome: Payout) -> f64 {
        self.outcomes
            .iter()
            .find(|outcome_proportion| outcome_proportion.outcome == outcome)
            .map_or(0.0, |outcome_proportion| outcome_proportion.proportion)
    }
}

fn ratio(numerator: f64, games: u64) -> f64 {
    if games == 0 {
        0.0
    } else {
        numerator / games as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn house_edge_is_minus_mean_payout() {
        let mut tally = OutcomeTally::default();
        for _ in 0..3 {
            tally.record(Payout::Lose);
        }
        tally.record(Payout::Blackjack);
        tally.record(Payout::Surrender);
        tally.record(Payout::WinDouble);
        tally.record(Payout::Push);
        tally.record(Payout::Win);

        let result = SimulationResult::new(2, &tally, 0.5);
        let mean_payout = tally.net_units() / tally.games() as f64;
        assert_eq!(result.games, 8);
        assert!((result.house_edge + mean_payout).abs() < EPSILON);
        assert!((result.player_edge - mean_payout).abs() < EPSILON);
        assert!((result.games_per_second - 16.0).abs() < EPSILON);
        assert!((result.proportion_of(Payout::Lose) - 3.0 / 8.0).abs() < EPSILON);
    }

    #[test]
    fn even_results_give_no_edge() {
        let mut tally = OutcomeTally::default();
        tally.record(Payout::Win);
        tally.record(Payout::Lose);
        let result = SimulationResult::new(1, &tally, 0.0);
        assert!((result.win_rate - 0.5).abs() < EPSILON);
        assert!(result.house_edge.abs() < EPSILON);
        assert_eq!(result.games_per_second, 0.0);
    }

    #[test]
    fn proportions_sum_to_one() {
        let mut tally = OutcomeTally::default();
        tally.record(Payout::LoseQuadruple);
        tally.record(Payout::WinTriple);
        tally.record(Payout::Push);
        let result = SimulationResult::new(1, &tally, 1.0);
        let sum: f64 = result.outcomes.iter().map(|o| o.proportion).sum();
        assert!((sum - 1.0).abs() < EPSILON);
        assert_eq!(result.outcomes.len(), 11);
    }
}
