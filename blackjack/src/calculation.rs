//! Exact probabilities by enumerating every sequence of cards left in a shoe.
//!
//! The shoe is borrowed mutably down the recursion and every drawn card is
//! put back before its caller continues, so callers always get their shoe
//! back unchanged.

mod dealer_odds;
mod decision;
mod player_odds;
mod win_odds;

pub use dealer_odds::{
    accumulate_dealer_distribution, dealer_distribution, impossible_dealer_hole_card,
    DealerDistribution,
};
pub use decision::{
    evaluate_full, evaluate_hit_stand, evaluate_split, stands_without_evaluation, DecisionResult,
    HitStandEvaluation, SplitEvaluation,
};
pub use player_odds::{
    accumulate_player_distribution, doubled_distribution, player_distribution,
    PlayerDistribution,
};
pub use win_odds::{expected_value, win_prob_if_stand, win_probability};
