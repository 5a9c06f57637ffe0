use anyhow::{bail, Context};
use blackjack_os::{
    calculation::{
        dealer_distribution, evaluate_full, evaluate_split, player_distribution,
        DealerDistribution, DecisionResult, PlayerDistribution, SplitEvaluation,
    },
    CardCount, Decision, HandValue, Rule,
};
use blackjack_os_drivers::ReportFormat;
use clap::Args;
use serde::Serialize;

#[derive(Debug, Args)]
pub struct DecideArgs {
    /// The player's current total
    #[arg(short, long)]
    total: u8,

    /// The total counts an Ace as 11
    #[arg(short, long)]
    soft: bool,

    /// The dealer's up card, 1 for an Ace
    #[arg(short, long)]
    dealer: u8,

    /// Cards already dealt besides the dealer's up card, the player's included
    #[arg(long, value_delimiter = ',')]
    dealt: Vec<u8>,

    /// Also evaluate splitting a pair of this card value
    #[arg(short, long)]
    pair: Option<u8>,

    /// Print the joint distribution of the final totals when hitting
    #[arg(long)]
    table: bool,

    /// text or yaml
    #[arg(short, long, default_value_t = String::from("text"))]
    format: String,
}

#[derive(Debug, Clone, Serialize)]
struct DecisionReport {
    decision: Decision,
    evaluation: DecisionResult,
    split: Option<SplitEvaluation>,
    dealer: DealerDistribution,
    player_if_hit: PlayerDistribution,
}

pub fn run(rule: &Rule, args: &DecideArgs) -> anyhow::Result<()> {
    let format: ReportFormat = args
        .format
        .parse()
        .with_context(|| format!("invalid format {:?}", args.format))?;
    let hand = parse_hand(args.total, args.soft)?;
    let mut shoe = build_shoe(rule.number_of_decks, args.dealer, &args.dealt)?;
    if let Some(pair_card_value) = args.pair {
        check_card_value(pair_card_value)?;
    }

    let dealer = dealer_distribution(args.dealer, &mut shoe);
    let evaluation = evaluate_full(rule, hand, &dealer, &mut shoe);
    let mut decision = evaluation.recommendation(rule);
    let split = match args.pair {
        Some(pair_card_value) if rule.allow_split => {
            let split = evaluate_split(pair_card_value, &evaluation, &dealer, &mut shoe);
            if split.should_split {
                decision = Decision::Split;
            }
            Some(split)
        }
        _ => None,
    };
    let player_if_hit = player_distribution(hand, &dealer, &mut shoe);

    let report = DecisionReport {
        decision,
        evaluation,
        split,
        dealer,
        player_if_hit,
    };
    match format {
        ReportFormat::Text => {
            print_report(&report);
            if args.table {
                println!();
                print!("{}", format_joint_table(&report.player_if_hit, &report.dealer));
            }
        }
        ReportFormat::Yaml => print!("{}", serde_yaml::to_string(&report)?),
    }
    Ok(())
}

fn check_card_value(card_value: u8) -> anyhow::Result<()> {
    if !(1..=10).contains(&card_value) {
        bail!("invalid card value {}, it must be in [1, 10]", card_value);
    }
    Ok(())
}

fn parse_hand(total: u8, soft: bool) -> anyhow::Result<HandValue> {
    if soft && !(12..=21).contains(&total) {
        bail!("a soft total must be in [12, 21], got {}", total);
    }
    if !(4..=21).contains(&total) {
        bail!("the player's total must be in [4, 21], got {}", total);
    }
    Ok(HandValue::new(total, soft))
}

/// The shoe as the player sees it: full, minus the up card and every dealt card.
fn build_shoe(number_of_decks: u8, dealer_up_card: u8, dealt: &[u8]) -> anyhow::Result<CardCount> {
    let mut shoe = CardCount::with_number_of_decks(number_of_decks);
    for &card_value in std::iter::once(&dealer_up_card).chain(dealt) {
        check_card_value(card_value)?;
        if shoe[card_value] == 0 {
            bail!("no card of value {} left to deal", card_value);
        }
        shoe.remove_card(card_value);
    }
    Ok(shoe)
}

fn print_report(report: &DecisionReport) {
    println!("Decision: {}", report.decision);
    println!("Win probability if hit: {:.6}", report.evaluation.win_prob_if_hit);
    println!("Win probability if stand: {:.6}", report.evaluation.win_prob_if_stand);
    println!("Win probability if doubled: {:.6}", report.evaluation.win_prob_if_doubled);
    if let Some(split) = &report.split {
        println!("Win probability if split: {:.6}", split.win_prob_if_split);
    }
}

const TABLE_RULE: &str =
    "--------------------------------------------------------------------------------";

/// Joint probabilities of the player's and the dealer's final totals, with the
/// marginals on the last row and column.
fn format_joint_table(player: &PlayerDistribution, dealer: &DealerDistribution) -> String {
    let mut table = String::from(
        "  Player |      17 |      18 |      19 |      20 |      21 |    Bust |   Total |\n",
    );
    table.push_str(TABLE_RULE);
    table.push('\n');

    for (i, p_player) in player.probabilities().iter().enumerate() {
        let label = if i == PlayerDistribution::BUST_INDEX {
            String::from("Bust")
        } else {
            (i + 12).to_string()
        };
        table.push_str(&format!("{:>7}  |", label));
        for p_dealer in dealer.probabilities() {
            table.push_str(&format!(" {:.5} |", p_player * p_dealer));
        }
        table.push_str(&format!(" {:.5} |\n", p_player));
        table.push_str(TABLE_RULE);
        table.push('\n');
    }

    table.push_str("  Total  |");
    for p_dealer in dealer.probabilities() {
        table.push_str(&format!(" {:.5} |", p_dealer));
    }
    table.push_str(&format!(" {:.5} |\n", player.sum() * dealer.sum()));
    table
}
