use crate::{
    calculation::{
        dealer_distribution, evaluate_full, evaluate_hit_stand, evaluate_split,
        DealerDistribution, DecisionResult,
    },
    CardCount, HandValue, Rule,
};

/// Source of the player's decisions during a simulation. The shoe passed in
/// is what the player can see: every card dealt except the dealer's hole card.
pub trait Strategy {
    /// Full decision for the first action on a hand.
    fn evaluate(
        &mut self,
        rule: &Rule,
        hand: HandValue,
        dealer_up_card: u8,
        shoe: &CardCount,
    ) -> DecisionResult;

    fn should_split(
        &mut self,
        rule: &Rule,
        pair_card_value: u8,
        dealer_up_card: u8,
        base: &DecisionResult,
        shoe: &CardCount,
    ) -> bool;

    /// Hit or stand once a hand has already been hit.
    fn should_hit(&mut self, hand: HandValue, dealer_up_card: u8, shoe: &CardCount) -> bool;
}

/// Plays by exact enumeration of the shoe.
#[derive(Debug, Clone, Default)]
pub struct ExactStrategy {
    last_dealer_odds: Option<(u8, CardCount, DealerDistribution)>,
}

impl ExactStrategy {
    pub fn new() -> Self {
        Default::default()
    }

    /// The dealer distribution for this up card and shoe, reused while neither
    /// changes.
    fn dealer_odds(&mut self, dealer_up_card: u8, shoe: &CardCount) -> DealerDistribution {
        if let Some((up_card, cached_shoe, odds)) = &self.last_dealer_odds {
            if *up_card == dealer_up_card && cached_shoe == shoe {
                return *odds;
            }
        }
        let mut scratch = *shoe;
        let odds = dealer_distribution(dealer_up_card, &mut scratch);
        self.last_dealer_odds = Some((dealer_up_card, *shoe, odds));
        odds
    }
}

impl Strategy for ExactStrategy {
    fn evaluate(
        &mut self,
        rule: &Rule,
        hand: HandValue,
        dealer_up_card: u8,
        shoe: &CardCount,
    ) -> DecisionResult {
        let dealer_odds = self.dealer_odds(dealer_up_card, shoe);
        let mut scratch = *shoe;
        evaluate_full(rule, hand, &dealer_odds, &mut scratch)
    }

    fn should_split(
        &mut self,
        _: &Rule,
        pair_card_value: u8,
        dealer_up_card: u8,
        base: &DecisionResult,
        shoe: &CardCount,
    ) -> bool {
        let dealer_odds = self.dealer_odds(dealer_up_card, shoe);
        let mut scratch = *shoe;
        evaluate_split(pair_card_value, base, &dealer_odds, &mut scratch).should_split
    }

    fn should_hit(&mut self, hand: HandValue, dealer_up_card: u8, shoe: &CardCount) -> bool {
        let dealer_odds = self.dealer_odds(dealer_up_card, shoe);
        let mut scratch = *shoe;
        evaluate_hit_stand(hand, &dealer_odds, &mut scratch).should_hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Decision;

    fn get_typical_rule() -> Rule {
        Rule::default()
    }

    #[test]
    fn exact_strategy_matches_direct_evaluation() {
        let rule = get_typical_rule();
        let mut shoe = CardCount::with_number_of_decks(1);
        let dealer_odds = dealer_distribution(5, &mut shoe);
        let expected = evaluate_full(&rule, HandValue::new(13, false), &dealer_odds, &mut shoe);

        let mut strategy = ExactStrategy::new();
        let result = strategy.evaluate(&rule, HandValue::new(13, false), 5, &shoe);
        assert_eq!(result, expected);
        assert_eq!(result.recommendation(&rule), Decision::Stand);
    }

    #[test]
    fn cached_dealer_odds_follow_the_shoe() {
        let mut strategy = ExactStrategy::new();
        let mut shoe = CardCount::with_number_of_decks(1);
        let first = strategy.dealer_odds(10, &shoe);
        assert_eq!(strategy.dealer_odds(10, &shoe), first);

        shoe.remove_card(10);
        shoe.remove_card(10);
        let depleted = strategy.dealer_odds(10, &shoe);
        assert_ne!(depleted, first);
        assert_eq!(depleted, dealer_distribution(10, &mut shoe));
    }

    #[test]
    fn always_hits_twelve_against_ten() {
        let mut strategy = ExactStrategy::new();
        let shoe = CardCount::with_number_of_decks(1);
        assert!(strategy.should_hit(HandValue::new(12, false), 10, &shoe));
        assert!(!strategy.should_hit(HandValue::new(18, false), 10, &shoe));
    }
}
