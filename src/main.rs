//! Lending Core Simulation.
//!
//! Demonstrates the full protocol lifecycle including staking and rewards,
//! LTV-bounded borrowing, price-driven liquidations, and treasury operations.

use lendfi_core::*;
use rust_decimal_macros::dec;

fn main() {
    println!("Collateralized Lending Core Engine Simulation");
    println!("Single Ledger, Owner-Gated Treasury, Full Lifecycle\n");

    scenario_1_staking_and_rewards();
    scenario_2_borrow_to_the_ceiling();
    scenario_3_liquidation_cascade();
    scenario_4_partial_liquidation();
    scenario_5_treasury_operations();

    println!("\nAll simulations completed successfully.");
}

fn example_policy() -> ProtocolConfig {
    let mut config = ProtocolConfig::default();
    config.risk.ltv = Ratio::new(dec!(0.5)).unwrap();
    config.risk.liquidation_threshold = Ratio::new(dec!(0.5)).unwrap();
    config.validate().expect("example policy is consistent");
    config
}

fn amt(v: rust_decimal::Decimal) -> Amount {
    Amount::new(v).unwrap()
}

/// Stake, accrue over time, withdraw stake plus rewards.
fn scenario_1_staking_and_rewards() {
    println!("Scenario 1: Staking and Rewards\n");

    let config = example_policy();
    let owner = config.owner;
    let mut engine = Engine::new(config);

    let alice = AccountId(10);
    engine.mint(owner, alice, amt(dec!(200))).unwrap();
    println!("  Alice is minted 200 STK");

    engine.stake(alice, amt(dec!(100))).unwrap();
    println!("  Alice stakes 100 STK");

    engine.advance_time(30 * 24 * 3_600_000); // 30 days
    let snap = engine.accrue_rewards(alice).unwrap();
    println!("  After 30 days, accrued rewards: {} STK", snap.reward_accrued);

    engine.withdraw_stake(alice).unwrap();
    println!(
        "  Withdraw pays stake + rewards, balance: {} STK\n",
        engine.stake_token().balance_of(alice)
    );
}

/// Deposit collateral and probe the borrow ceiling.
fn scenario_2_borrow_to_the_ceiling() {
    println!("Scenario 2: Borrowing to the Ceiling\n");

    let config = example_policy();
    let owner = config.owner;
    let mut engine = Engine::new(config);

    let bob = AccountId(20);
    engine.mint(owner, bob, amt(dec!(100))).unwrap();
    engine.deposit_collateral(bob, amt(dec!(40))).unwrap();

    let ceiling = engine.max_borrow(bob).unwrap();
    println!("  Bob deposits 40 STK at price 1, ceiling: {} dUSD", ceiling);

    match engine.borrow(bob, amt(dec!(21))) {
        Err(err) => println!("  Borrow 21 rejected: {}", err),
        Ok(_) => unreachable!("over-ceiling borrow must fail"),
    }

    let snap = engine.borrow(bob, amt(dec!(20))).unwrap();
    println!("  Borrow 20 succeeds, debt: {} dUSD", snap.debt);
    println!("  Health factor: {}", engine.health_factor(bob).unwrap());

    engine.repay(bob, amt(dec!(20))).unwrap();
    println!(
        "  Full repay, fee pool now: {} dUSD\n",
        engine.protocol_stats().protocol_fees
    );
}

/// Price crash liquidates the most leveraged borrowers first.
fn scenario_3_liquidation_cascade() {
    println!("Scenario 3: Liquidation Cascade\n");

    let config = example_policy();
    let owner = config.owner;
    let mut engine = Engine::new(config);

    let conservative = AccountId(30);
    let moderate = AccountId(31);
    let aggressive = AccountId(32);

    for (account, borrow) in [
        (conservative, dec!(5)),
        (moderate, dec!(16)),
        (aggressive, dec!(20)),
    ] {
        engine.mint(owner, account, amt(dec!(50))).unwrap();
        engine.deposit_collateral(account, amt(dec!(40))).unwrap();
        engine.borrow(account, amt(borrow)).unwrap();
    }

    println!("  Three borrowers against 40 STK collateral each at price 1");

    for (price, label) in [(dec!(0.9), "0.9"), (dec!(0.7), "0.7"), (dec!(0.4), "0.4")] {
        engine.set_price(owner, price).unwrap();
        let liqs = engine.scan_liquidations().unwrap();

        if liqs.is_empty() {
            println!("  price {}: no liquidations", label);
        } else {
            for liq in &liqs {
                let name = if liq.account == conservative {
                    "conservative"
                } else if liq.account == moderate {
                    "moderate"
                } else {
                    "aggressive"
                };
                println!(
                    "  price {}: {} liquidated, seized {} STK, cleared {} dUSD",
                    label, name, liq.seized_collateral, liq.cleared_debt
                );
            }
        }
    }

    println!(
        "  Fee pool after the cascade: {} dUSD\n",
        engine.protocol_stats().protocol_fees
    );
}

/// Under-collateralized position: everything is seized, debt survives.
fn scenario_4_partial_liquidation() {
    println!("Scenario 4: Partial Liquidation\n");

    let config = example_policy();
    let owner = config.owner;
    let mut engine = Engine::new(config);

    let carol = AccountId(40);
    engine.mint(owner, carol, amt(dec!(20))).unwrap();

    engine.set_price(owner, dec!(6)).unwrap();
    engine.deposit_collateral(carol, amt(dec!(10))).unwrap();
    engine.borrow(carol, amt(dec!(30))).unwrap();
    println!("  Carol borrows 30 dUSD against 10 STK at price 6");

    engine.set_price(owner, dec!(1)).unwrap();
    println!("  Price crashes to 1, health: {}", engine.health_factor(carol).unwrap());

    let outcome = engine.liquidate(carol).unwrap();
    println!(
        "  Partial liquidation: seized {} STK, cleared {} dUSD, {} dUSD still outstanding\n",
        outcome.seized_collateral, outcome.cleared_debt, outcome.remaining_debt
    );
}

/// Owner-gated mint, price updates, and fee withdrawal.
fn scenario_5_treasury_operations() {
    println!("Scenario 5: Treasury Operations\n");

    let config = example_policy();
    let owner = config.owner;
    let mut engine = Engine::new(config);

    let dave = AccountId(50);
    let intruder = AccountId(666);

    match engine.mint(intruder, intruder, amt(dec!(1_000_000))) {
        Err(err) => println!("  Intruder mint rejected: {}", err),
        Ok(_) => unreachable!("non-owner mint must fail"),
    }

    engine.mint(owner, dave, amt(dec!(100))).unwrap();
    engine.deposit_collateral(dave, amt(dec!(40))).unwrap();
    engine.borrow(dave, amt(dec!(20))).unwrap();
    engine.repay(dave, amt(dec!(20))).unwrap();

    let stats = engine.protocol_stats();
    println!("  Fees accrued from repayments: {} dUSD", stats.protocol_fees);

    engine.withdraw_fees(owner, stats.protocol_fees).unwrap();
    println!(
        "  Owner withdraws fees, balance: {} dUSD",
        engine.debt_token().balance_of(owner)
    );

    engine.set_price(owner, dec!(2450)).unwrap();
    println!("  Price updated to {}", engine.protocol_stats().price);
    println!("  Events generated: {}", engine.events().len());
}
