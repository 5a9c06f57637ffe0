pub mod hand;
mod outcome;
mod result;
pub mod shoe;

pub use outcome::{OutcomeTally, Payout};
pub use result::{OutcomeProportion, SimulationResult};

use crate::{
    calculation::stands_without_evaluation, strategy::Strategy, CardCount, Decision, Rule,
    SimulationError,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;
use tracing::{debug, info};

use self::{
    hand::{settle, Hand},
    shoe::Shoe,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    pub games: u64,
    /// 0 for as many threads as the machine runs in parallel.
    pub number_of_threads: usize,
    /// Fixed seed for a reproducible run. Worker `i` is seeded with `seed + i`.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            games: 10000,
            number_of_threads: 1,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.games == 0 {
            return Err(SimulationError::InvalidConfig(
                "number of games must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn get_number_of_threads(&self) -> usize {
        let number_of_threads = if self.number_of_threads == 0 {
            match std::thread::available_parallelism() {
                Ok(n) => n.get(),
                Err(_) => 1,
            }
        } else {
            self.number_of_threads
        };
        number_of_threads.min(self.games as usize).max(1)
    }
}

/// Plays games one after another on its own shoe, asking `strategy` for every
/// player decision.
pub struct Simulator<S: Strategy, R: Rng> {
    rule: Rule,
    shoe: Shoe,
    strategy: S,
    rng: R,
    player_hand: Hand,
    dealer_hand: Hand,
}

impl<S: Strategy, R: Rng> Simulator<S, R> {
    pub fn new(rule: &Rule, strategy: S, rng: R) -> Self {
        Simulator {
            rule: *rule,
            shoe: Shoe::new(rule.number_of_decks, rule.reshuffle_proportion),
            strategy,
            rng,
            player_hand: Hand::new(),
            dealer_hand: Hand::new(),
        }
    }

    pub fn play_games(&mut self, games: u64) -> Result<OutcomeTally, SimulationError> {
        let mut tally = OutcomeTally::default();
        for game_id in 0..games {
            let payout = self.play_game()?;
            debug!(game_id, ?payout, "game finished");
            tally.record(payout);
        }
        Ok(tally)
    }

    /// Plays one game from the deal to the settlement.
    pub fn play_game(&mut self) -> Result<Payout, SimulationError> {
        if self.shoe.reshuffle_if_necessary() {
            debug!("reshuffled the shoe");
        }
        self.player_hand.clear();
        self.dealer_hand.clear();

        let mut decision_shoe = self.deal_initial_cards()?;
        let dealer_up_card = self.dealer_hand.get_cards(0)[0];

        // Case 1: Natural Blackjack.
        let player_natural = self.player_hand.is_natural();
        if self.dealer_hand.is_natural() {
            return Ok(if player_natural {
                Payout::Push
            } else {
                Payout::Lose
            });
        }
        if player_natural {
            return Ok(Payout::Blackjack);
        }

        // Case 2: Split.
        let decision = self.strategy.evaluate(
            &self.rule,
            self.player_hand.get_value(0),
            dealer_up_card,
            &decision_shoe,
        );
        if self.rule.allow_split && self.player_hand.is_pair() {
            let pair_card_value = self.player_hand.get_cards(0)[0];
            if self.strategy.should_split(
                &self.rule,
                pair_card_value,
                dealer_up_card,
                &decision,
                &decision_shoe,
            ) {
                return self.play_split(dealer_up_card, &mut decision_shoe);
            }
        }

        // Case 3: Surrender, or play the hand out.
        let decision = decision.recommendation(&self.rule);
        if decision == Decision::Surrender {
            return Ok(Payout::Surrender);
        }
        self.play_hand(0, decision, dealer_up_card, &mut decision_shoe)?;
        self.finish_game()
    }

    /// Deals two cards each, the player first. Returns the shoe as the player
    /// sees it, which still holds the dealer's hole card.
    fn deal_initial_cards(&mut self) -> Result<CardCount, SimulationError> {
        let card_value = self.deal()?;
        self.player_hand.receive_card(0, card_value);
        let card_value = self.deal()?;
        self.dealer_hand.receive_card(0, card_value);
        let card_value = self.deal()?;
        self.player_hand.receive_card(0, card_value);

        let decision_shoe = self.shoe.get_card_count();
        let card_value = self.deal()?;
        self.dealer_hand.receive_card(0, card_value);
        Ok(decision_shoe)
    }

    fn play_split(
        &mut self,
        dealer_up_card: u8,
        decision_shoe: &mut CardCount,
    ) -> Result<Payout, SimulationError> {
        let split_aces = self.player_hand.get_cards(0)[0] == 1;
        self.player_hand.split_group(0);
        for group_index in 0..2 {
            let card_value = self.deal()?;
            decision_shoe.remove_card(card_value);
            self.player_hand.receive_card(group_index, card_value);
        }

        // Split Aces take one card each.
        if !split_aces {
            let rule = Rule {
                allow_late_surrender: false,
                ..self.rule
            };
            for group_index in 0..2 {
                let decision = self
                    .strategy
                    .evaluate(
                        &rule,
                        self.player_hand.get_value(group_index),
                        dealer_up_card,
                        decision_shoe,
                    )
                    .recommendation(&rule);
                self.play_hand(group_index, decision, dealer_up_card, decision_shoe)?;
            }
        }

        self.finish_game()
    }

    /// Plays one group until it stands, busts or has doubled.
    fn play_hand(
        &mut self,
        group_index: usize,
        first_decision: Decision,
        dealer_up_card: u8,
        decision_shoe: &mut CardCount,
    ) -> Result<(), SimulationError> {
        let mut decision = first_decision;
        loop {
            match decision {
                Decision::Stand => return Ok(()),
                Decision::Hit | Decision::Double => {}
                Decision::Surrender | Decision::Split => panic!("Impossible to reach"),
            }

            let card_value = self.deal()?;
            decision_shoe.remove_card(card_value);
            self.player_hand.receive_card(group_index, card_value);
            if decision == Decision::Double {
                self.player_hand.double_down(group_index);
                return Ok(());
            }

            let value = self.player_hand.get_value(group_index);
            if value.bust() || stands_without_evaluation(value) {
                return Ok(());
            }
            decision = if self.strategy.should_hit(value, dealer_up_card, decision_shoe) {
                Decision::Hit
            } else {
                Decision::Stand
            };
        }
    }

    /// The dealer draws to 17 unless every player group busted, then every
    /// group is settled.
    fn finish_game(&mut self) -> Result<Payout, SimulationError> {
        let number_of_groups = self.player_hand.get_number_of_groups();
        let all_bust = (0..number_of_groups).all(|i| self.player_hand.get_value(i).bust());
        if !all_bust {
            self.dealer_plays()?;
        }

        let dealer_value = self.dealer_hand.get_value(0);
        let half_units: i32 = (0..number_of_groups)
            .map(|i| {
                settle(
                    self.player_hand.get_value(i),
                    self.player_hand.is_doubled(i),
                    dealer_value,
                )
            })
            .sum();
        match Payout::from_half_units(half_units) {
            Some(payout) => Ok(payout),
            None => panic!("Impossible to reach"),
        }
    }

    /// Stands on all 17s.
    fn dealer_plays(&mut self) -> Result<(), SimulationError> {
        while self.dealer_hand.get_value(0).total() < 17 {
            let card_value = self.deal()?;
            self.dealer_hand.receive_card(0, card_value);
        }
        Ok(())
    }

    fn deal(&mut self) -> Result<u8, SimulationError> {
        self.shoe
            .deal_card(&mut self.rng)
            .ok_or(SimulationError::ShoeExhausted)
    }
}

/// Splits `games` over the worker threads; the first workers take the
/// remainder.
fn games_for_worker(games: u64, number_of_threads: usize, worker: usize) -> u64 {
    let number_of_threads = number_of_threads as u64;
    let worker = worker as u64;
    games / number_of_threads + u64::from(worker < games % number_of_threads)
}

fn new_rng(seed: Option<u64>, worker: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(worker as u64)),
        None => StdRng::from_entropy(),
    }
}

/// Runs `config.games` games with `strategy` and summarises their payouts.
/// Every worker thread plays its share on its own shoe.
pub fn simulate_games<S>(
    rule: &Rule,
    config: &SimulationConfig,
    strategy: &S,
) -> Result<SimulationResult, SimulationError>
where
    S: Strategy + Clone + Send,
{
    rule.validate()?;
    config.validate()?;
    let number_of_threads = config.get_number_of_threads();
    info!(
        games = config.games,
        decks = rule.number_of_decks,
        number_of_threads,
        "simulation started"
    );

    let start = Instant::now();
    let tally = std::thread::scope(|scope| {
        let mut threads = Vec::with_capacity(number_of_threads - 1);
        for worker in 1..number_of_threads {
            let games = games_for_worker(config.games, number_of_threads, worker);
            let mut simulator = Simulator::new(rule, strategy.clone(), new_rng(config.seed, worker));
            threads.push(scope.spawn(move || simulator.play_games(games)));
        }

        let games = games_for_worker(config.games, number_of_threads, 0);
        let mut simulator = Simulator::new(rule, strategy.clone(), new_rng(config.seed, 0));
        let mut tally = simulator.play_games(games)?;
        for thread in threads {
            let worker_tally = thread.join().map_err(|_| SimulationError::WorkerPanicked)??;
            tally.merge(&worker_tally);
        }
        Ok::<_, SimulationError>(tally)
    })?;

    let result = SimulationResult::new(rule.number_of_decks, &tally, start.elapsed().as_secs_f64());
    info!(
        games = result.games,
        seconds_elapsed = result.seconds_elapsed,
        house_edge = result.house_edge,
        "simulation finished"
    );
    Ok(result)
}
