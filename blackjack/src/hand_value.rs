/// Running total of a hand, with a flag telling whether an Ace is currently
/// counted as 11.
///
/// A soft total above 21 never escapes [`HandValue::with_card`]: the Ace is
/// re-counted as 1 first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HandValue {
    total: u8,
    soft: bool,
}

impl HandValue {
    pub fn new(total: u8, soft: bool) -> HandValue {
        if soft && !(11..=21).contains(&total) {
            panic!("A soft hand must total between 11 and 21, got {}", total);
        }
        HandValue { total, soft }
    }

    /// The value of a hand holding one card.
    pub fn from_card(card_value: u8) -> HandValue {
        HandValue::default().with_card(card_value)
    }

    pub fn from_cards(first: u8, second: u8) -> HandValue {
        HandValue::from_card(first).with_card(second)
    }

    /// The value after receiving a card. An Ace counts as 11 when the hand
    /// doesn't already hold a soft Ace and 11 would not bust it.
    pub fn with_card(self, card_value: u8) -> HandValue {
        if !(1..=10).contains(&card_value) {
            panic!("Invalid card value {}! It must be in [1, 10]", card_value);
        }

        let (mut total, mut soft) = (self.total, self.soft);
        if card_value == 1 && !soft && total + 11 <= 21 {
            total += 11;
            soft = true;
        } else {
            total += card_value;
        }

        if total > 21 && soft {
            total -= 10;
            soft = false;
        }

        HandValue { total, soft }
    }

    pub fn total(&self) -> u8 {
        self.total
    }

    pub fn is_soft(&self) -> bool {
        self.soft
    }

    pub fn bust(&self) -> bool {
        self.total > 21
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_ace_counts_as_eleven() {
        let hand = HandValue::from_card(1);
        assert_eq!(hand, HandValue::new(11, true));
    }

    #[test]
    fn second_ace_counts_as_one() {
        let hand = HandValue::from_cards(1, 1);
        assert_eq!(hand.total(), 12);
        assert!(hand.is_soft());
    }

    #[test]
    fn ace_that_would_bust_counts_as_one() {
        let hand = HandValue::new(15, false).with_card(1);
        assert_eq!(hand, HandValue::new(16, false));
    }

    #[test]
    fn soft_overflow_is_corrected_instead_of_busting() {
        let hand = HandValue::new(17, true).with_card(8);
        assert_eq!(hand.total(), 15);
        assert!(!hand.is_soft());
        assert!(!hand.bust());

        let hand = HandValue::new(21, true).with_card(10);
        assert_eq!(hand, HandValue::new(21, false));
    }

    #[test]
    fn hard_overflow_busts() {
        let hand = HandValue::new(15, false).with_card(10);
        assert_eq!(hand.total(), 25);
        assert!(hand.bust());
    }

    #[test]
    fn ten_and_ace_make_soft_21() {
        assert_eq!(HandValue::from_cards(10, 1), HandValue::new(21, true));
        assert_eq!(HandValue::from_cards(1, 10), HandValue::new(21, true));
    }

    #[test]
    #[should_panic]
    fn soft_hand_below_eleven_should_panic() {
        HandValue::new(9, true);
    }
}
