use super::{
    doubled_distribution, expected_value, player_distribution, win_prob_if_stand,
    win_probability, DealerDistribution,
};
use crate::{CardCount, Decision, HandValue, Rule};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HitStandEvaluation {
    pub should_hit: bool,
    pub win_prob_if_hit: f64,
    pub win_prob_if_stand: f64,
}

/// Everything known about one decision point, doubling and surrendering
/// included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecisionResult {
    pub should_hit: bool,
    pub should_double: bool,
    pub should_surrender: bool,
    pub win_prob_if_hit: f64,
    pub win_prob_if_stand: f64,
    pub win_prob_if_doubled: f64,
}

impl DecisionResult {
    /// Whether hitting beats standing when doubling is off the table.
    pub fn hits_without_doubling(&self) -> bool {
        self.win_prob_if_hit > self.win_prob_if_stand
    }

    /// Win probability of the better of hitting and standing.
    pub fn base_win_probability(&self) -> f64 {
        self.win_prob_if_hit.max(self.win_prob_if_stand)
    }

    pub fn recommendation(&self, rule: &Rule) -> Decision {
        if self.should_surrender && rule.allow_late_surrender {
            return Decision::Surrender;
        }
        if self.should_double {
            if rule.allow_double {
                return Decision::Double;
            }
            return if self.hits_without_doubling() {
                Decision::Hit
            } else {
                Decision::Stand
            };
        }
        if self.should_hit {
            Decision::Hit
        } else {
            Decision::Stand
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SplitEvaluation {
    pub should_split: bool,
    pub win_prob_if_split: f64,
}

/// Hands the player stands on without looking at the dealer.
pub fn stands_without_evaluation(player_hand: HandValue) -> bool {
    player_hand.total() > 18 || (player_hand.total() > 16 && !player_hand.is_soft())
}

/// Compares hitting once more (and playing on optimally) against standing.
pub fn evaluate_hit_stand(
    player_hand: HandValue,
    dealer_odds: &DealerDistribution,
    shoe: &mut CardCount,
) -> HitStandEvaluation {
    let win_prob_if_stand = win_prob_if_stand(player_hand.total(), dealer_odds);
    let hit_odds = player_distribution(player_hand, dealer_odds, shoe);
    let win_prob_if_hit = win_probability(&hit_odds, dealer_odds);

    HitStandEvaluation {
        should_hit: win_prob_if_hit > win_prob_if_stand,
        win_prob_if_hit,
        win_prob_if_stand,
    }
}

/// Full decision for the first action on a hand.
pub fn evaluate_full(
    rule: &Rule,
    player_hand: HandValue,
    dealer_odds: &DealerDistribution,
    shoe: &mut CardCount,
) -> DecisionResult {
    let hit_stand = evaluate_hit_stand(player_hand, dealer_odds, shoe);
    let base_win_prob = if hit_stand.should_hit {
        hit_stand.win_prob_if_hit
    } else {
        hit_stand.win_prob_if_stand
    };
    let base_ev = expected_value(base_win_prob);

    let doubled_odds = doubled_distribution(player_hand, shoe);
    let win_prob_if_doubled = win_probability(&doubled_odds, dealer_odds);
    let should_double = 2.0 * expected_value(win_prob_if_doubled) > base_ev;

    DecisionResult {
        should_hit: hit_stand.should_hit || should_double,
        should_double,
        should_surrender: base_ev < rule.surrender_threshold,
        win_prob_if_hit: hit_stand.win_prob_if_hit,
        win_prob_if_stand: hit_stand.win_prob_if_stand,
        win_prob_if_doubled,
    }
}

/// Compares playing a pair of `pair_card_value` as two hands against the best
/// of hitting and standing on it.
pub fn evaluate_split(
    pair_card_value: u8,
    base: &DecisionResult,
    dealer_odds: &DealerDistribution,
    shoe: &mut CardCount,
) -> SplitEvaluation {
    let split_odds = player_distribution(HandValue::from_card(pair_card_value), dealer_odds, shoe);
    let win_prob_if_split = win_probability(&split_odds, dealer_odds);
    let split_ev = 2.0 * expected_value(win_prob_if_split);

    SplitEvaluation {
        should_split: split_ev > expected_value(base.base_win_probability()),
        win_prob_if_split,
    }
}
