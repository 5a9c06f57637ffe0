use std::ops::{Deref, DerefMut, Index};

/// Card values in the order every enumeration visits them: the ten bucket,
/// Ace, then 2 to 9. Ace is 1 and 10 stands for 10, J, Q and K.
pub const CARD_VALUES: [u8; 10] = [10, 1, 2, 3, 4, 5, 6, 7, 8, 9];

/// This provides a container to store the numbers of each card value (from
/// 1 to 10 inclusive) left in a shoe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CardCount {
    counts: [u16; 10],
    total: u16,
}

impl CardCount {
    pub fn new(counts: &[u16; 10]) -> CardCount {
        CardCount {
            counts: *counts,
            total: counts.iter().sum(),
        }
    }

    pub fn with_number_of_decks(number_of_decks: u8) -> CardCount {
        let number_of_decks = number_of_decks as u16;
        let mut counts = [number_of_decks * 4; 10];
        counts[9] = number_of_decks * 16;
        Self::new(&counts)
    }

    /// Add a card of given card value.
    pub fn add_card(&mut self, card_value: u8) {
        self.counts[index_of(card_value)] += 1;
        self.total += 1;
    }

    /// Remove a card of given card value.
    ///
    /// Panics if there is no card of this value left.
    pub fn remove_card(&mut self, card_value: u8) {
        let count = &mut self.counts[index_of(card_value)];
        if *count == 0 {
            panic!("No card of value {} left in the shoe", card_value);
        }
        *count -= 1;
        self.total -= 1;
    }

    /// Removes a card for as long as the returned guard lives. The card is put
    /// back when the guard is dropped, whichever way the holder's scope ends.
    pub fn hold_card(&mut self, card_value: u8) -> CardHold<'_> {
        self.remove_card(card_value);
        CardHold {
            shoe: self,
            card_value,
        }
    }

    pub fn get_total(&self) -> u16 {
        self.total
    }

    /// Probability that a card drawn uniformly from this shoe has the given value.
    pub fn get_proportion(&self, card_value: u8) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self[card_value] as f64 / self.total as f64
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl Index<u8> for CardCount {
    type Output = u16;
    fn index(&self, card_value: u8) -> &Self::Output {
        &self.counts[index_of(card_value)]
    }
}

fn index_of(card_value: u8) -> usize {
    match card_value {
        1..=10 => (card_value - 1) as usize,
        _ => panic!("Invalid card value {}! It must be in [1, 10]", card_value),
    }
}

/// A shoe with one card taken out. See [`CardCount::hold_card`].
#[derive(Debug)]
pub struct CardHold<'a> {
    shoe: &'a mut CardCount,
    card_value: u8,
}

impl Deref for CardHold<'_> {
    type Target = CardCount;
    fn deref(&self) -> &Self::Target {
        self.shoe
    }
}

impl DerefMut for CardHold<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.shoe
    }
}

impl Drop for CardHold<'_> {
    fn drop(&mut self) {
        self.shoe.add_card(self.card_value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_deck_has_52_cards() {
        let shoe = CardCount::with_number_of_decks(1);
        assert_eq!(shoe.get_total(), 52);
        assert_eq!(shoe[10], 16);
        assert_eq!(shoe[1], 4);
        for card_value in 2..=9 {
            assert_eq!(shoe[card_value], 4);
        }
    }

    #[test]
    fn many_decks_do_not_overflow() {
        let shoe = CardCount::with_number_of_decks(100);
        assert_eq!(shoe.get_total(), 5200);
        assert_eq!(shoe[10], 1600);
    }

    #[test]
    fn add_and_remove() {
        let mut shoe = CardCount::new(&[1, 2, 3, 0, 0, 0, 0, 0, 5, 6]);
        assert_eq!(shoe.get_total(), 17);
        shoe.remove_card(3);
        assert_eq!(shoe[3], 2);
        assert_eq!(shoe.get_total(), 16);
        shoe.add_card(4);
        assert_eq!(shoe[4], 1);
        assert_eq!(shoe.get_total(), 17);
    }

    #[test]
    #[should_panic]
    fn removing_missing_card_should_panic() {
        let mut shoe = CardCount::new(&[1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        shoe.remove_card(2);
    }

    #[test]
    #[should_panic]
    fn invalid_card_value_should_panic() {
        let shoe = CardCount::with_number_of_decks(1);
        let _count: u16 = shoe[11];
    }

    #[test]
    fn hold_card_puts_card_back() {
        let mut shoe = CardCount::with_number_of_decks(1);
        let original = shoe;
        {
            let mut held = shoe.hold_card(1);
            assert_eq!(held[1], 3);
            assert_eq!(held.get_total(), 51);
            {
                let held_again = held.hold_card(1);
                assert_eq!(held_again[1], 2);
            }
            assert_eq!(held[1], 3);
        }
        assert_eq!(shoe, original);
    }

    #[test]
    fn hold_card_puts_card_back_on_early_return() {
        fn count_after_holding(shoe: &mut CardCount, card_value: u8) -> Option<u16> {
            let held = shoe.hold_card(card_value);
            if held[card_value] == 0 {
                return None;
            }
            Some(held[card_value])
        }

        let mut shoe = CardCount::new(&[1, 2, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(count_after_holding(&mut shoe, 1), None);
        assert_eq!(count_after_holding(&mut shoe, 2), Some(1));
        assert_eq!(shoe, CardCount::new(&[1, 2, 0, 0, 0, 0, 0, 0, 0, 0]));
    }

    #[test]
    fn proportion_of_tens() {
        let shoe = CardCount::with_number_of_decks(2);
        assert!((shoe.get_proportion(10) - 4.0 / 13.0).abs() < 1e-12);
        assert_eq!(CardCount::default().get_proportion(10), 0.0);
    }
}
