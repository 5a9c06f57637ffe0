use crate::{CardCount, CARD_VALUES};
use rand::Rng;

/// Fewest cards a game may start with. Keeps every enumeration of a game
/// supplied with cards.
pub const MIN_CARDS_AT_GAME_START: u16 = 26;

/// Represents a shoe in the real world. Only the number of cards of each value
/// matters, so cards are drawn at random from the counts.
#[derive(Debug, Clone)]
pub struct Shoe {
    number_of_decks: u8,
    reshuffle_threshold: f64,
    card_count: CardCount,
}

impl Shoe {
    /// Creates a full shoe.
    pub fn new(number_of_decks: u8, reshuffle_proportion: f64) -> Shoe {
        Self::with_card_count(
            number_of_decks,
            reshuffle_proportion,
            CardCount::with_number_of_decks(number_of_decks),
        )
    }

    /// Creates a shoe holding `card_count`. A reshuffle still restores full
    /// decks.
    pub fn with_card_count(
        number_of_decks: u8,
        reshuffle_proportion: f64,
        card_count: CardCount,
    ) -> Shoe {
        let full = number_of_decks as f64 * 52.0;
        Shoe {
            number_of_decks,
            reshuffle_threshold: (full * reshuffle_proportion).max(MIN_CARDS_AT_GAME_START as f64),
            card_count,
        }
    }

    /// Returns every dealt card back into the shoe.
    pub fn reshuffle(&mut self) {
        self.card_count = CardCount::with_number_of_decks(self.number_of_decks);
    }

    pub fn needs_reshuffle(&self) -> bool {
        (self.card_count.get_total() as f64) < self.reshuffle_threshold
    }

    /// Reshuffles if too few cards are left to start a game. Returns whether
    /// it did.
    pub fn reshuffle_if_necessary(&mut self) -> bool {
        if self.needs_reshuffle() {
            self.reshuffle();
            true
        } else {
            false
        }
    }

    /// Deals a card if the shoe is not empty. Returns None if empty.
    pub fn deal_card<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<u8> {
        let total = self.card_count.get_total();
        if total == 0 {
            return None;
        }

        // Cards lined up by value in enumeration order.
        let mut position = rng.gen_range(0..total);
        for card_value in CARD_VALUES {
            let count = self.card_count[card_value];
            if position < count {
                self.card_count.remove_card(card_value);
                return Some(card_value);
            }
            position -= count;
        }

        panic!("Impossible to reach");
    }

    pub fn get_card_count(&self) -> CardCount {
        self.card_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn card_count_is_correctly_synced() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut shoe = Shoe::new(2, 0.5);
        let mut dealt = CardCount::default();
        for _ in 0..30 {
            let card_value = shoe.deal_card(&mut rng).unwrap();
            dealt.add_card(card_value);
        }
        let full = CardCount::with_number_of_decks(2);
        for card_value in 1..=10 {
            assert_eq!(shoe.get_card_count()[card_value] + dealt[card_value], full[card_value]);
        }
        assert_eq!(shoe.get_card_count().get_total(), 104 - 30);
    }

    #[test]
    fn empty_shoe_deals_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut shoe = Shoe::new(1, 1.0);
        for _ in 0..52 {
            assert!(shoe.deal_card(&mut rng).is_some());
        }
        assert_eq!(shoe.deal_card(&mut rng), None);
        shoe.reshuffle();
        assert_eq!(shoe.get_card_count(), CardCount::with_number_of_decks(1));
    }

    #[test]
    fn reshuffles_below_threshold() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut shoe = Shoe::new(4, 0.5);
        assert!(!shoe.needs_reshuffle());
        for _ in 0..(208 - 104) {
            shoe.deal_card(&mut rng);
        }
        assert!(!shoe.reshuffle_if_necessary());
        shoe.deal_card(&mut rng);
        assert!(shoe.reshuffle_if_necessary());
        assert_eq!(shoe.get_card_count().get_total(), 208);
    }

    #[test]
    fn small_proportion_still_keeps_a_floor() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut shoe = Shoe::new(1, 0.1);
        for _ in 0..(52 - MIN_CARDS_AT_GAME_START) {
            shoe.deal_card(&mut rng);
        }
        assert!(!shoe.needs_reshuffle());
        shoe.deal_card(&mut rng);
        assert!(shoe.needs_reshuffle());
    }

    #[test]
    fn partly_dealt_shoe_refills_on_reshuffle() {
        let card_count = CardCount::new(&[0, 0, 0, 0, 0, 0, 0, 0, 0, 30]);
        let mut shoe = Shoe::with_card_count(1, 0.1, card_count);
        assert!(!shoe.needs_reshuffle());
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(shoe.deal_card(&mut rng), Some(10));
        for _ in 0..4 {
            shoe.deal_card(&mut rng);
        }
        assert!(shoe.reshuffle_if_necessary());
        assert_eq!(shoe.get_card_count(), CardCount::with_number_of_decks(1));
    }

    #[test]
    fn same_seed_deals_same_cards() {
        let deal = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut shoe = Shoe::new(1, 1.0);
            (0..10).map(|_| shoe.deal_card(&mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(deal(42), deal(42));
    }
}
