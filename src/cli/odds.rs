//! Handler for the `odds` calculator.

use crate::cli::{output, OddsArgs};
use crate::domain::{
    arbitrage_profit, arbitrage_stake_split, break_even_price, expected_value, is_arbitrage,
    no_vig_probabilities, AmericanOdds,
};
use crate::error::Result;

/// Execute the odds command.
pub fn execute(args: &OddsArgs) -> Result<()> {
    print_price("Price", args.price);

    if let Some(counter) = args.counter {
        print_price("Counter", counter);
        print_pair(args.price, counter);
    }

    if let Some(fair) = args.fair {
        let min_price = break_even_price(fair)?;
        output::section("Against fair probability");
        output::key_value("Fair", output::percent(fair));
        output::key_value("Break-even price", min_price);
        output::key_value("EV", output::percent(expected_value(args.price, fair)));
    }
    Ok(())
}

fn print_price(title: &str, price: AmericanOdds) {
    output::section(&format!("{title} {price}"));
    output::key_value("Implied", output::percent(price.implied_probability()));
    output::key_value("Decimal", format!("{:.3}", price.decimal()));
    output::key_value("Profit per unit", format!("{:.3}", price.payout_multiple()));
}

fn print_pair(a: AmericanOdds, b: AmericanOdds) {
    let (fair_a, fair_b) = no_vig_probabilities(a, b);
    let overround = a.implied_probability() + b.implied_probability() - 1.0;

    output::section("Pair");
    output::key_value("Hold", output::percent(overround));
    output::key_value(&format!("No-vig {a}"), output::percent(fair_a));
    output::key_value(&format!("No-vig {b}"), output::percent(fair_b));

    if !is_arbitrage(a, b) {
        output::note("No arbitrage.");
        return;
    }

    let (stake_a, stake_b) = arbitrage_stake_split(a, b);
    let (profit_a, profit_b) = arbitrage_profit(a, stake_a, b, stake_b);
    output::ok("Arbitrage");
    output::key_value(&format!("Stake on {a}"), output::percent(stake_a));
    output::key_value(&format!("Stake on {b}"), output::percent(stake_b));
    output::key_value("Locked profit", output::percent(profit_a.min(profit_b)));
}
