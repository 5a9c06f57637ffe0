use crate::{CardCount, HandValue, CARD_VALUES};
use serde::Serialize;

/// Probabilities of the dealer's final total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DealerDistribution {
    // [0, 4] for [17, 21].
    // 5 for Bust.
    probabilities: [f64; 6],
}

impl DealerDistribution {
    pub const BUST_INDEX: usize = 5;

    pub fn from_probabilities(probabilities: [f64; 6]) -> DealerDistribution {
        DealerDistribution { probabilities }
    }

    /// Probability that the dealer stands on the given total in [17, 21].
    pub fn p_final(&self, total: u8) -> f64 {
        match total {
            17..=21 => self.probabilities[(total - 17) as usize],
            _ => panic!("Impossible to reach"),
        }
    }

    pub fn p_bust(&self) -> f64 {
        self.probabilities[Self::BUST_INDEX]
    }

    pub fn probabilities(&self) -> &[f64; 6] {
        &self.probabilities
    }

    pub fn sum(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    fn end_with_normal(&mut self, total: u8, p: f64) {
        self.probabilities[(total - 17) as usize] += p;
    }

    fn end_with_bust(&mut self, p: f64) {
        self.probabilities[Self::BUST_INDEX] += p;
    }
}

/// The card the dealer cannot be holding face down once the game goes on past
/// the peek for blackjack.
pub fn impossible_dealer_hole_card(dealer_hand: HandValue) -> u8 {
    match dealer_hand.total() {
        10 => 1,
        11 => 10,
        _ => 0,
    }
}

/// Distribution of the dealer's final total, starting from the up card alone.
pub fn dealer_distribution(dealer_up_card: u8, shoe: &mut CardCount) -> DealerDistribution {
    let mut odds = DealerDistribution::default();
    accumulate_dealer_distribution(HandValue::from_card(dealer_up_card), 1.0, shoe, &mut odds);
    odds
}

/// Adds `path_probability` worth of mass into `odds`, spread over the dealer's
/// final totals. A call with `path_probability == 1.0` is the top of an
/// enumeration: there the hole card cannot complete a blackjack.
pub fn accumulate_dealer_distribution(
    // Input parameters
    dealer_hand: HandValue,
    path_probability: f64,

    // Parameters to maintain current state
    shoe: &mut CardCount,

    // Output parameters
    odds: &mut DealerDistribution,
) {
    let accumulate = match (path_probability == 1.0, impossible_dealer_hole_card(dealer_hand)) {
        (true, 1) => accumulate::<1>,
        (true, 10) => accumulate::<10>,
        _ => accumulate::<0>,
    };
    accumulate(dealer_hand, path_probability, shoe, odds);
}

fn accumulate<const IMPOSSIBLE_DEALER_HOLE_CARD: u8>(
    // Input parameters
    dealer_hand: HandValue,
    path_probability: f64,

    // Parameters to maintain current state
    shoe: &mut CardCount,

    // Output parameters
    odds: &mut DealerDistribution,
) {
    let available_draws = if IMPOSSIBLE_DEALER_HOLE_CARD == 0 {
        shoe.get_total()
    } else {
        shoe.get_total() - shoe[IMPOSSIBLE_DEALER_HOLE_CARD]
    };
    if available_draws == 0 {
        panic!("No card can be drawn for the dealer");
    }

    for card_value in CARD_VALUES {
        if card_value == IMPOSSIBLE_DEALER_HOLE_CARD || shoe[card_value] == 0 {
            continue;
        }
        let p = path_probability * shoe[card_value] as f64 / available_draws as f64;
        let next_hand = dealer_hand.with_card(card_value);

        match next_hand.total() {
            0..=16 => {
                let mut shoe = shoe.hold_card(card_value);
                accumulate::<0>(next_hand, p, &mut shoe, odds);
            }
            total @ 17..=21 => odds.end_with_normal(total, p),
            _ => odds.end_with_bust(p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn distributions_sum_to_one() {
        let mut shoe = CardCount::with_number_of_decks(1);
        for up_card in 1..=10 {
            let odds = dealer_distribution(up_card, &mut shoe);
            assert!((odds.sum() - 1.0).abs() < EPSILON, "up card {}", up_card);
        }
        assert_eq!(shoe, CardCount::with_number_of_decks(1));
    }

    #[test]
    fn partial_call_adds_its_path_probability() {
        let mut shoe = CardCount::with_number_of_decks(1);
        let mut odds = DealerDistribution::default();
        accumulate_dealer_distribution(HandValue::new(12, false), 0.25, &mut shoe, &mut odds);
        assert!((odds.sum() - 0.25).abs() < EPSILON);
    }

    #[test]
    fn up_card_six_busts_more_than_up_card_ten() {
        let mut shoe = CardCount::with_number_of_decks(1);
        let six = dealer_distribution(6, &mut shoe);
        let ten = dealer_distribution(10, &mut shoe);
        assert!(six.p_bust() > ten.p_bust() + 0.1);
        assert!((six.sum() - 1.0).abs() < EPSILON);
        assert!((ten.sum() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn up_card_ten_never_draws_an_ace_first() {
        let mut shoe = CardCount::with_number_of_decks(1);
        let peeked = dealer_distribution(10, &mut shoe);

        // Mixture of every non-Ace first draw, weighted by its renormalised
        // count, continued by an ordinary enumeration.
        let up = HandValue::from_card(10);
        let available = (shoe.get_total() - shoe[1]) as f64;
        let mut expected = DealerDistribution::default();
        for card_value in 2..=10 {
            let p = shoe[card_value] as f64 / available;
            let hand = up.with_card(card_value);
            if hand.total() >= 17 {
                expected.end_with_normal(hand.total(), p);
            } else {
                let mut shoe = shoe.hold_card(card_value);
                accumulate_dealer_distribution(hand, p, &mut shoe, &mut expected);
            }
        }

        for i in 0..6 {
            assert!((peeked.probabilities()[i] - expected.probabilities()[i]).abs() < EPSILON);
        }
    }

    #[test]
    fn up_card_ace_never_draws_a_ten_first() {
        let mut shoe = CardCount::new(&[0, 0, 0, 0, 0, 1, 0, 0, 0, 5]);
        // Only a 6 is a legal hole card: soft 17, the dealer stands.
        let odds = dealer_distribution(1, &mut shoe);
        assert!((odds.p_final(17) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn exclusion_applies_to_the_first_draw_only() {
        // Ace up with a 2, a 4 and a ten left. The ten may only come second.
        let mut shoe = CardCount::new(&[0, 1, 0, 1, 0, 0, 0, 0, 0, 1]);
        let odds = dealer_distribution(1, &mut shoe);
        assert!((odds.p_final(17) - 1.0).abs() < EPSILON);
        assert_eq!(shoe, CardCount::new(&[0, 1, 0, 1, 0, 0, 0, 0, 0, 1]));
    }

    #[test]
    fn soft_total_is_corrected_before_busting() {
        // Soft 16 drawing a 10 is hard 16, then a 5 makes 21.
        let mut shoe = CardCount::new(&[0, 0, 0, 0, 1, 0, 0, 0, 0, 1]);
        let mut odds = DealerDistribution::default();
        let soft_16 = HandValue::from_cards(1, 5);
        {
            let mut shoe = shoe.hold_card(10);
            accumulate_dealer_distribution(soft_16.with_card(10), 0.5, &mut shoe, &mut odds);
        }
        assert_eq!(odds.p_bust(), 0.0);
        assert!((odds.p_final(21) - 0.5).abs() < EPSILON);
    }

    #[test]
    #[should_panic]
    fn empty_shoe_should_panic() {
        let mut shoe = CardCount::default();
        dealer_distribution(5, &mut shoe);
    }
}
