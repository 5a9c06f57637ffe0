use serde_enum_str::Serialize_enum_str;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Net result of one game, in multiples of the initial bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize_enum_str)]
pub enum Payout {
    #[serde(rename = "-4")]
    LoseQuadruple,
    #[serde(rename = "-3")]
    LoseTriple,
    #[serde(rename = "-2")]
    LoseDouble,
    #[serde(rename = "-1")]
    Lose,
    #[serde(rename = "-0.5")]
    Surrender,
    #[serde(rename = "0")]
    Push,
    #[serde(rename = "1")]
    Win,
    #[serde(rename = "1.5")]
    Blackjack,
    #[serde(rename = "2")]
    WinDouble,
    #[serde(rename = "3")]
    WinTriple,
    #[serde(rename = "4")]
    WinQuadruple,
}

impl Payout {
    /// Looks up the payout worth the given number of half bets.
    pub fn from_half_units(half_units: i32) -> Option<Payout> {
        Payout::iter().find(|payout| payout.half_units() == half_units)
    }

    pub fn half_units(&self) -> i32 {
        match self {
            Payout::LoseQuadruple => -8,
            Payout::LoseTriple => -6,
            Payout::LoseDouble => -4,
            Payout::Lose => -2,
            Payout::Surrender => -1,
            Payout::Push => 0,
            Payout::Win => 2,
            Payout::Blackjack => 3,
            Payout::WinDouble => 4,
            Payout::WinTriple => 6,
            Payout::WinQuadruple => 8,
        }
    }

    pub fn units(&self) -> f64 {
        self.half_units() as f64 / 2.0
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// How many games ended with each payout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeTally {
    counts: [u64; 11],
}

impl OutcomeTally {
    pub fn record(&mut self, payout: Payout) {
        self.counts[payout.index()] += 1;
    }

    pub fn merge(&mut self, other: &OutcomeTally) {
        for (count, other_count) in self.counts.iter_mut().zip(other.counts.iter()) {
            *count += other_count;
        }
    }

    pub fn count(&self, payout: Payout) -> u64 {
        self.counts[payout.index()]
    }

    pub fn games(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Sum of every recorded payout, in initial bets.
    pub fn net_units(&self) -> f64 {
        Payout::iter()
            .map(|payout| payout.units() * self.count(payout) as f64)
            .sum()
    }

    /// Every payout with its count, from the worst payout to the best.
    pub fn iter(&self) -> impl Iterator<Item = (Payout, u64)> + '_ {
        Payout::iter().map(|payout| (payout, self.count(payout)))
    }
}
