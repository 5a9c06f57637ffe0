use crate::HandValue;

/// Represents all hand cards. May contain more than 1 group of cards because of split.
#[derive(Debug, Clone)]
pub struct Hand {
    groups: Vec<Group>,
}

impl Default for Hand {
    fn default() -> Self {
        Hand::new()
    }
}

impl Hand {
    pub fn new() -> Hand {
        Hand {
            groups: vec![Group::new()],
        }
    }

    /// The given group receives a given card.
    pub fn receive_card(&mut self, group_index: usize, card_value: u8) {
        self.groups[group_index].receive_card(card_value);
    }

    /// Splits the given group. The second card moves to a new group at the end.
    pub fn split_group(&mut self, group_index: usize) {
        let card_value = self.groups[group_index].remove_card();
        let mut new_group = Group::new();
        new_group.receive_card(card_value);
        self.groups.push(new_group);
    }

    /// Doubles down the given group.
    pub fn double_down(&mut self, group_index: usize) {
        self.groups[group_index].doubled = true;
    }

    pub fn get_number_of_groups(&self) -> usize {
        self.groups.len()
    }

    pub fn get_value(&self, group_index: usize) -> HandValue {
        self.groups[group_index].value
    }

    pub fn get_cards(&self, group_index: usize) -> &[u8] {
        &self.groups[group_index].cards
    }

    pub fn is_doubled(&self, group_index: usize) -> bool {
        self.groups[group_index].doubled
    }

    /// Two cards of the same value, not split yet.
    pub fn is_pair(&self) -> bool {
        let cards = self.get_cards(0);
        self.groups.len() == 1 && cards.len() == 2 && cards[0] == cards[1]
    }

    /// Blackjack: 21 with the first two cards of an unsplit hand.
    pub fn is_natural(&self) -> bool {
        self.groups.len() == 1 && self.groups[0].cards.len() == 2 && self.groups[0].value.total() == 21
    }

    /// Clears all the cards in all groups. Remove all the extra groups (i.e., groups
    /// that come from split), leaving only 1 original group, and it is empty.
    pub fn clear(&mut self) {
        self.groups.truncate(1);
        self.groups[0] = Group::new();
    }
}

#[derive(Debug, Clone)]
struct Group {
    cards: Vec<u8>,
    value: HandValue,
    doubled: bool,
}

impl Group {
    fn new() -> Self {
        Self {
            cards: Vec::with_capacity(3),
            value: HandValue::default(),
            doubled: false,
        }
    }

    fn receive_card(&mut self, card_value: u8) {
        self.cards.push(card_value);
        self.value = self.value.with_card(card_value);
    }

    fn remove_card(&mut self) -> u8 {
        let card_value = match self.cards.pop() {
            Some(card_value) => card_value,
            None => panic!("Cannot remove a card from an empty group"),
        };
        // Soft and hard totals can't be undone card by card, so recount.
        self.value = self
            .cards
            .iter()
            .fold(HandValue::default(), |value, card_value| value.with_card(*card_value));
        card_value
    }
}

/// Net result of one hand in half bets, once both sides stopped drawing.
pub fn settle(player: HandValue, doubled: bool, dealer: HandValue) -> i32 {
    let result = if player.bust() {
        -1
    } else if dealer.bust() || player.total() > dealer.total() {
        1
    } else if player.total() < dealer.total() {
        -1
    } else {
        0
    };
    let multiplier = if doubled { 4 } else { 2 };
    result * multiplier
}
