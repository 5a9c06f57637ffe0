pub mod calculation;
mod card_count;
mod error;
mod hand_value;
pub mod simulation;
pub mod strategy;

use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};

pub use card_count::{CardCount, CardHold, CARD_VALUES};
pub use error::SimulationError;
pub use hand_value::HandValue;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub number_of_decks: u8,
    /// A new shoe is used once fewer than this proportion of the full shoe
    /// remains at the start of a game.
    pub reshuffle_proportion: f64,
    pub allow_double: bool,
    pub allow_split: bool,
    pub allow_late_surrender: bool,
    /// Surrender when the expected value of playing on is strictly below this.
    pub surrender_threshold: f64,
}

impl Default for Rule {
    fn default() -> Self {
        Rule {
            number_of_decks: 1,
            reshuffle_proportion: 1.0,
            allow_double: true,
            allow_split: true,
            allow_late_surrender: true,
            surrender_threshold: -0.5,
        }
    }
}

impl Rule {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.number_of_decks == 0 {
            return Err(SimulationError::InvalidRule(
                "number of decks must be at least 1".to_string(),
            ));
        }
        if !(self.reshuffle_proportion > 0.0 && self.reshuffle_proportion <= 1.0) {
            return Err(SimulationError::InvalidRule(format!(
                "reshuffle proportion must be in (0, 1], got {}",
                self.reshuffle_proportion
            )));
        }
        if !(-1.0..=1.0).contains(&self.surrender_threshold) {
            return Err(SimulationError::InvalidRule(format!(
                "surrender threshold must be in [-1, 1], got {}",
                self.surrender_threshold
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize_enum_str, Deserialize_enum_str)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Hit,
    Stand,
    Double,
    Surrender,
    Split,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rule_is_valid() {
        assert!(Rule::default().validate().is_ok());
    }

    #[test]
    fn should_reject_invalid_rules() {
        let mut rule = Rule::default();
        rule.number_of_decks = 0;
        assert!(rule.validate().is_err());

        let mut rule = Rule::default();
        rule.reshuffle_proportion = 0.0;
        assert!(rule.validate().is_err());
        rule.reshuffle_proportion = 1.5;
        assert!(rule.validate().is_err());

        let mut rule = Rule::default();
        rule.surrender_threshold = -2.0;
        assert!(rule.validate().is_err());
    }

    #[test]
    fn decision_round_trips_through_strings() {
        assert_eq!(Decision::Surrender.to_string(), "surrender");
        assert_eq!("double".parse::<Decision>().unwrap(), Decision::Double);
    }
}
