//! Command line interface for the directional AMM backtester.

mod report;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use damm_data::{load_pair, load_price_history};
use damm_simulation::prelude::*;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

#[derive(Parser)]
#[command(name = "damm")]
#[command(about = "Directional AMM positioning strategy backtester", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Pool configuration shared by all subcommands.
#[derive(Args)]
struct PoolArgs {
    /// Initial pool depth in USD
    #[arg(long, default_value_t = 50_000.0)]
    base_liquidity: f64,

    /// Simulated participant stake in USD
    #[arg(long, default_value_t = 50_000.0)]
    user_deposit: f64,

    /// Proportional swap fee in basis points
    #[arg(long, default_value_t = 30)]
    fee_bps: u32,
}

impl PoolArgs {
    fn to_config(&self) -> Result<SimulationConfig> {
        let base = Decimal::from_f64(self.base_liquidity)
            .context("base liquidity is not a valid amount")?;
        let deposit =
            Decimal::from_f64(self.user_deposit).context("user deposit is not a valid amount")?;
        Ok(SimulationConfig::new()
            .with_base_liquidity(base)
            .with_user_deposit(deposit)
            .with_fee_bps(self.fee_bps))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Backtest one pair under a single positioning strategy
    Backtest {
        /// Price-history file for token A (JSON)
        #[arg(long)]
        prices_a: PathBuf,

        /// Price-history file for token B (JSON)
        #[arg(long)]
        prices_b: PathBuf,

        /// Token A long percentage (0-100)
        #[arg(long, default_value_t = 100)]
        long_a: u32,

        /// Token B long percentage (0-100)
        #[arg(long, default_value_t = 0)]
        long_b: u32,

        #[command(flatten)]
        pool: PoolArgs,

        /// Write the result record as JSON to this path
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run every pair from a directory of price files against the
    /// calibration strategies
    Sweep {
        /// Directory containing one JSON price-history file per token
        #[arg(short, long)]
        dir: PathBuf,

        #[command(flatten)]
        pool: PoolArgs,

        /// Write all result records as JSON to this path
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Backtest a synthetic GBM path against a stable quote token
    Synthetic {
        /// Initial price of the simulated token
        #[arg(long, default_value_t = 100.0)]
        initial_price: f64,

        /// Annualized drift
        #[arg(long, default_value_t = 0.0)]
        drift: f64,

        /// Annualized volatility
        #[arg(long, default_value_t = 0.6)]
        volatility: f64,

        /// Number of daily steps
        #[arg(long, default_value_t = 365)]
        steps: usize,

        #[command(flatten)]
        pool: PoolArgs,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Backtest {
            prices_a,
            prices_b,
            long_a,
            long_b,
            pool,
            output,
        } => {
            let (pair, series) = load_pair(prices_a, prices_b)?;
            let strategy = strategy_from_percent(*long_a, *long_b)?;
            let config = pool.to_config()?;

            println!(
                "🚀 Backtesting {} ({}) over {} observations...",
                pair.label(),
                strategy.label(),
                series.len()
            );
            let run = run_simulation(&pair, &series, &strategy, &config)?;
            print_run(&series, &run, &config);

            if let Some(path) = output {
                write_json(path, &run.result)?;
            }
        }
        Commands::Sweep { dir, pool, output } => {
            let config = pool.to_config()?;
            let tokens = load_token_files(dir)?;
            println!(
                "📋 Loaded {} tokens, building {} pairs...",
                tokens.len(),
                tokens.len() * tokens.len().saturating_sub(1) / 2
            );

            let mut pairs = Vec::new();
            for i in 0..tokens.len() {
                for j in (i + 1)..tokens.len() {
                    let (token_a, series_a) = &tokens[i];
                    let (token_b, series_b) = &tokens[j];
                    let pair = TokenPair::new(token_a.clone(), token_b.clone());
                    match PairSeries::align(series_a, series_b) {
                        Ok(aligned) => pairs.push((pair, aligned)),
                        Err(error) => {
                            warn!(pair = %pair.label(), %error, "skipping pair");
                        }
                    }
                }
            }

            let outcome = run_sweep(&pairs, &calibration_set(), &config);
            report::print_results(&outcome.results);
            report::print_summary(&outcome.results);

            if !outcome.failures.is_empty() {
                println!("\n⚠️  {} runs failed:", outcome.failures.len());
                for failure in &outcome.failures {
                    println!(
                        "   {} {} — {}",
                        failure.pair, failure.strategy_id, failure.error
                    );
                }
            }

            if let Some(path) = output {
                write_json(path, &outcome.results)?;
            }
        }
        Commands::Synthetic {
            initial_price,
            drift,
            volatility,
            steps,
            pool,
        } => {
            let config = pool.to_config()?;
            let initial =
                Decimal::from_f64(*initial_price).context("initial price is not a valid amount")?;

            let mut generator =
                GeometricBrownianMotion::new(initial, *drift, *volatility, 1.0 / 365.0);
            // 2021-01-01 as the synthetic epoch.
            let series = synthetic_pair_series(&mut generator, *steps, 1_609_459_200, Decimal::ONE)?;
            let pair = TokenPair::new(Token::new("SYN", "Synthetic"), Token::new("USD", "Dollar"));

            println!(
                "🎲 Simulating {} over {} daily steps (drift {}, vol {})...",
                pair.label(),
                steps,
                drift,
                volatility
            );
            let outcome = run_sweep(
                &[(pair, series)],
                &calibration_set(),
                &config,
            );
            report::print_results(&outcome.results);
            report::print_summary(&outcome.results);
        }
    }

    Ok(())
}

fn strategy_from_percent(long_a: u32, long_b: u32) -> Result<PositioningStrategy> {
    if long_a > 100 || long_b > 100 {
        bail!("long percentages must be within 0-100");
    }
    Ok(PositioningStrategy::new(
        Percentage::from_bps(long_a * 100),
        Percentage::from_bps(long_b * 100),
    )?)
}

fn load_token_files(dir: &PathBuf) -> Result<Vec<(Token, PriceSeries)>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("reading directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    if paths.is_empty() {
        bail!("no price-history files found in {}", dir.display());
    }

    let mut tokens = Vec::with_capacity(paths.len());
    for path in &paths {
        tokens.push(load_price_history(path)?);
    }
    Ok(tokens)
}

fn print_run(series: &PairSeries, run: &SimulationRun, config: &SimulationConfig) {
    let first = chrono::DateTime::from_timestamp(series.timestamp(0) as i64, 0)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let last = chrono::DateTime::from_timestamp(series.timestamp(series.len() - 1) as i64, 0)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let result = &run.result;

    // Value of holding the deposited amounts instead of providing
    // liquidity, for context next to the pool outcomes.
    let end = series.len() - 1;
    let half = config.user_deposit_usd / Decimal::from(2);
    let hodl = damm_domain::metrics::hodl_value(
        half / series.price_a(0).value(),
        half / series.price_b(0).value(),
        series.price_a(end).value(),
        series.price_b(end).value(),
    );

    println!("\n📊 Backtest Results ({first} → {last})");
    println!("════════════════════════════════════");
    println!("Token A change:  {:>+10.1}%", result.token_a_price_change_percent);
    println!("Token B change:  {:>+10.1}%", result.token_b_price_change_percent);
    let final_price = series.relative_price(end).value();
    println!(
        "Final A/B price: {:>10.4}  (B/A: {:.4})",
        final_price,
        Decimal::ONE / final_price
    );
    println!("HODL value:      ${:>10.2}", hodl);
    println!("Uniswap value:   ${:>10.2}", result.uniswap_final_value);
    println!("Pennysia value:  ${:>10.2}", result.pennysia_final_value);
    println!("Advantage:       {:>+10.2}%", result.advantage_percent);
    if let Some(snapshot) = run.history.last() {
        println!("Fees collected:  ${:>10.2}", snapshot.cumulative_fees_usd);
    }
    println!("════════════════════════════════════");
}

fn write_json<T: serde::Serialize>(path: &PathBuf, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing results")?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    println!("💾 Results written to {}", path.display());
    Ok(())
}
