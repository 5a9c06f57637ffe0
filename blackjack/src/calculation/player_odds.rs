use super::{evaluate_hit_stand, stands_without_evaluation, DealerDistribution};
use crate::{CardCount, HandValue, CARD_VALUES};
use serde::Serialize;

/// Probabilities of the player's final total when playing on optimally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PlayerDistribution {
    // [0, 9] for [12, 21].
    // 10 for Bust.
    probabilities: [f64; 11],
}

impl PlayerDistribution {
    pub const BUST_INDEX: usize = 10;

    pub fn from_probabilities(probabilities: [f64; 11]) -> PlayerDistribution {
        PlayerDistribution { probabilities }
    }

    /// Probability that the player stands on the given total in [12, 21].
    pub fn p_final(&self, total: u8) -> f64 {
        match total {
            12..=21 => self.probabilities[(total - 12) as usize],
            _ => panic!("Impossible to reach"),
        }
    }

    pub fn p_bust(&self) -> f64 {
        self.probabilities[Self::BUST_INDEX]
    }

    pub fn probabilities(&self) -> &[f64; 11] {
        &self.probabilities
    }

    pub fn sum(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    fn end_with_normal(&mut self, total: u8, p: f64) {
        self.probabilities[(total - 12) as usize] += p;
    }

    fn end_with_bust(&mut self, p: f64) {
        self.probabilities[Self::BUST_INDEX] += p;
    }
}

/// Distribution of the player's final total after hitting `player_hand` once
/// and then playing on optimally against `dealer_odds`.
pub fn player_distribution(
    player_hand: HandValue,
    dealer_odds: &DealerDistribution,
    shoe: &mut CardCount,
) -> PlayerDistribution {
    let mut odds = PlayerDistribution::default();
    accumulate_player_distribution(dealer_odds, player_hand, 1.0, shoe, &mut odds);
    odds
}

pub fn accumulate_player_distribution(
    // Input parameters
    dealer_odds: &DealerDistribution,
    player_hand: HandValue,
    path_probability: f64,

    // Parameters to maintain current state
    shoe: &mut CardCount,

    // Output parameters
    odds: &mut PlayerDistribution,
) {
    let available_draws = shoe.get_total();
    if available_draws == 0 {
        panic!("No card can be drawn for the player");
    }

    for card_value in CARD_VALUES {
        if shoe[card_value] == 0 {
            continue;
        }
        let p = path_probability * shoe[card_value] as f64 / available_draws as f64;
        let next_hand = player_hand.with_card(card_value);
        let mut shoe = shoe.hold_card(card_value);

        match next_hand.total() {
            0..=11 => accumulate_player_distribution(dealer_odds, next_hand, p, &mut shoe, odds),
            total @ 12..=21 => {
                if stands_without_evaluation(next_hand)
                    || !evaluate_hit_stand(next_hand, dealer_odds, &mut shoe).should_hit
                {
                    odds.end_with_normal(total, p);
                } else {
                    accumulate_player_distribution(dealer_odds, next_hand, p, &mut shoe, odds);
                }
            }
            _ => odds.end_with_bust(p),
        }
    }
}

/// Distribution of the final total after exactly one more card.
///
/// The forced card is scored at a fixed value, an Ace as 11, and nothing is
/// demoted afterwards: any total over 21 is a bust.
pub fn doubled_distribution(player_hand: HandValue, shoe: &CardCount) -> PlayerDistribution {
    let mut odds = PlayerDistribution::default();
    for card_value in CARD_VALUES {
        let p = shoe.get_proportion(card_value);
        if p == 0.0 {
            continue;
        }
        let forced_value = if card_value == 1 { 11 } else { card_value };
        let final_total = player_hand.total() + forced_value;
        if final_total > 21 {
            odds.end_with_bust(p);
        } else {
            // Totals up to 12 lose to every dealer total that stands.
            odds.end_with_normal(final_total.max(12), p);
        }
    }
    odds
}
