//! Aggregate statistics and stdout reports over sweep results.

use damm_domain::value_objects::simulation_result::SimulationResult;
use rust_decimal::Decimal;

/// Per-strategy aggregate over a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyAggregate {
    pub strategy_id: String,
    pub runs: usize,
    pub wins: usize,
    pub mean_advantage: Decimal,
}

impl StrategyAggregate {
    #[must_use]
    pub fn win_rate_percent(&self) -> Decimal {
        if self.runs == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(self.wins as u64) / Decimal::from(self.runs as u64) * Decimal::from(100)
    }
}

/// Groups results by strategy, preserving first-seen order.
#[must_use]
pub fn aggregate_by_strategy(results: &[SimulationResult]) -> Vec<StrategyAggregate> {
    let mut aggregates: Vec<StrategyAggregate> = Vec::new();
    let mut sums: Vec<Decimal> = Vec::new();

    for result in results {
        let index = match aggregates
            .iter()
            .position(|a| a.strategy_id == result.strategy_id)
        {
            Some(index) => index,
            None => {
                aggregates.push(StrategyAggregate {
                    strategy_id: result.strategy_id.clone(),
                    runs: 0,
                    wins: 0,
                    mean_advantage: Decimal::ZERO,
                });
                sums.push(Decimal::ZERO);
                aggregates.len() - 1
            }
        };
        aggregates[index].runs += 1;
        if result.advantage_percent > Decimal::ZERO {
            aggregates[index].wins += 1;
        }
        sums[index] += result.advantage_percent;
    }

    for (aggregate, sum) in aggregates.iter_mut().zip(&sums) {
        aggregate.mean_advantage = *sum / Decimal::from(aggregate.runs as u64);
    }
    aggregates
}

/// Mean advantage and win rate over every completed run.
#[must_use]
pub fn overall_aggregate(results: &[SimulationResult]) -> StrategyAggregate {
    let wins = results
        .iter()
        .filter(|r| r.advantage_percent > Decimal::ZERO)
        .count();
    let sum: Decimal = results.iter().map(|r| r.advantage_percent).sum();
    let mean = if results.is_empty() {
        Decimal::ZERO
    } else {
        sum / Decimal::from(results.len() as u64)
    };
    StrategyAggregate {
        strategy_id: "overall".to_string(),
        runs: results.len(),
        wins,
        mean_advantage: mean,
    }
}

/// The `count` best runs by advantage, descending.
#[must_use]
pub fn best_results(results: &[SimulationResult], count: usize) -> Vec<&SimulationResult> {
    let mut sorted: Vec<&SimulationResult> = results.iter().collect();
    sorted.sort_by(|left, right| right.advantage_percent.cmp(&left.advantage_percent));
    sorted.truncate(count);
    sorted
}

/// Prints one row per completed run.
pub fn print_results(results: &[SimulationResult]) {
    println!(
        "{:<12} | {:<12} | {:>10} | {:>10} | {:>12} | {:>12} | {:>10}",
        "Pair", "Strategy", "ΔA %", "ΔB %", "Uniswap $", "Pennysia $", "Adv %"
    );
    println!("{}", "-".repeat(94));
    for result in results {
        println!(
            "{:<12} | {:<12} | {:>10.1} | {:>10.1} | {:>12.0} | {:>12.0} | {:>+10.2}",
            result.pair,
            result.strategy_id,
            result.token_a_price_change_percent,
            result.token_b_price_change_percent,
            result.uniswap_final_value,
            result.pennysia_final_value,
            result.advantage_percent
        );
    }
}

/// Prints per-strategy win rates and the best pair/strategy combinations.
pub fn print_summary(results: &[SimulationResult]) {
    if results.is_empty() {
        println!("No completed runs.");
        return;
    }

    println!("\n📈 Strategy performance");
    println!(
        "{:<12} | {:>6} | {:>10} | {:>12}",
        "Strategy", "Runs", "Win rate", "Avg adv %"
    );
    println!("{}", "-".repeat(48));
    for aggregate in aggregate_by_strategy(results) {
        println!(
            "{:<12} | {:>6} | {:>9.1}% | {:>+12.2}",
            aggregate.strategy_id,
            aggregate.runs,
            aggregate.win_rate_percent(),
            aggregate.mean_advantage
        );
    }

    let overall = overall_aggregate(results);
    println!("{}", "-".repeat(48));
    println!(
        "{:<12} | {:>6} | {:>9.1}% | {:>+12.2}",
        "overall",
        overall.runs,
        overall.win_rate_percent(),
        overall.mean_advantage
    );

    println!("\n🏆 Best results");
    for result in best_results(results, 5) {
        println!(
            "   {:<12} {:<12} {:>+8.2}%",
            result.pair, result.strategy_id, result.advantage_percent
        );
    }
}
