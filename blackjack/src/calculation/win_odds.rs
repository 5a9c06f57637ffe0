use super::{DealerDistribution, PlayerDistribution};

/// Probability that the player beats the dealer, a push counting as half a win.
pub fn win_probability(player: &PlayerDistribution, dealer: &DealerDistribution) -> f64 {
    let mut p = dealer.p_bust() * (1.0 - player.p_bust());
    for player_total in 17..=21 {
        let p_player = player.p_final(player_total);
        if p_player == 0.0 {
            continue;
        }
        p += 0.5 * p_player * dealer.p_final(player_total);
        for dealer_total in 17..player_total {
            p += p_player * dealer.p_final(dealer_total);
        }
    }
    p
}

/// Win probability of a player who stands on `total` now.
pub fn win_prob_if_stand(total: u8, dealer: &DealerDistribution) -> f64 {
    if total > 21 {
        return 0.0;
    }
    let mut p = dealer.p_bust();
    if total >= 17 {
        p += 0.5 * dealer.p_final(total);
        for dealer_total in 17..total {
            p += dealer.p_final(dealer_total);
        }
    }
    p
}

/// Expected payout per unit bet of a symmetric bet won with probability `p`.
pub fn expected_value(p: f64) -> f64 {
    2.0 * p - 1.0
}
