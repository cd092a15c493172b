//! vAMM quote previewer
//!
//! Reads a market snapshot (JSON) and prints what the pricing core says about
//! it: prices, simulated swaps, trade bounds, position value and repeg
//! checks. Nothing is sent anywhere; every command is a pure function of the
//! snapshot and the configured scales.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vamm::{
    convert_signed_to_decimal, convert_to_decimal, get_swap_direction, AssetType, Market,
    OraclePriceData, PositionDirection, PositionMath, Precision, PriceEngine, RepegCalculator,
    SwapDirection, SwapSimulator, TradeBoundsSolver,
};
use vamm_config::VammSettings;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Environment overlay under config/environments/
    #[arg(short, long)]
    environment: Option<String>,

    /// Market snapshot (JSON)
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mark price from current reserves
    Mark,

    /// Price after the net market position closes
    Terminal,

    /// Reserves after a hypothetical swap
    Swap {
        /// Side the amount is denominated in
        #[arg(long, value_enum)]
        asset: Asset,

        /// Quote precision for quote, reserve precision for base
        #[arg(long, allow_hyphen_values = true)]
        amount: i128,

        /// Position the trade opens
        #[arg(long, value_enum)]
        position: Side,
    },

    /// Largest base amount tradable before reaching a limit price
    MaxTrade {
        /// Limit price at mark price precision
        #[arg(long)]
        limit_price: u128,
    },

    /// AMM operation that opens a position
    Direction {
        #[arg(long, value_enum)]
        asset: Asset,

        #[arg(long, value_enum)]
        position: Side,
    },

    /// Value and PnL of the net market position
    Value {
        /// Entry notional at quote precision
        #[arg(long, default_value_t = 0)]
        entry: u128,
    },

    /// Repeg budget, candidate peg and oracle checks
    Repeg {
        /// Oracle reading (JSON)
        #[arg(long)]
        oracle: PathBuf,

        /// Target price at mark price precision; defaults to the oracle price
        #[arg(long)]
        target_price: Option<u128>,

        /// Treat the oracle as stale
        #[arg(long)]
        oracle_invalid: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Asset {
    Quote,
    Base,
}

impl From<Asset> for AssetType {
    fn from(asset: Asset) -> Self {
        match asset {
            Asset::Quote => AssetType::Quote,
            Asset::Base => AssetType::Base,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Side {
    Long,
    Short,
}

impl From<Side> for PositionDirection {
    fn from(side: Side) -> Self {
        match side {
            Side::Long => PositionDirection::Long,
            Side::Short => PositionDirection::Short,
        }
    }
}

/// Ordered label/value pairs printed by every command
type Report = Vec<(&'static str, String)>;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vamm=info,vamm_quote=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let settings = VammSettings::load(args.config.as_deref(), args.environment.as_deref())
        .context("loading settings")?;
    let market = load_json::<Market>(&args.snapshot)?;

    info!(snapshot = %args.snapshot.display(), "loaded market snapshot");

    let report = run(&settings, &market, &args.command)?;
    print_report(&report, args.json)
}

fn run(settings: &VammSettings, market: &Market, command: &Command) -> Result<Report> {
    let precision = Precision::try_from(&settings.precision)?;
    let engine = PriceEngine::new(precision);

    debug!(?command, "running");

    let report = match command {
        Command::Mark => {
            let mark = engine.calculate_mark_price(&market.amm)?;
            vec![("mark_price", price(mark, precision)?)]
        }
        Command::Terminal => {
            let mark = engine.calculate_mark_price(&market.amm)?;
            let terminal = engine.calculate_terminal_price(market)?;
            vec![
                ("mark_price", price(mark, precision)?),
                ("terminal_price", price(terminal, precision)?),
            ]
        }
        Command::Swap {
            asset,
            amount,
            position,
        } => {
            let input_asset_type = AssetType::from(*asset);
            let swap_direction = get_swap_direction(input_asset_type, (*position).into());
            let (new_quote, new_base) = SwapSimulator::new(precision)
                .calculate_amm_reserves_after_swap(
                    &market.amm,
                    input_asset_type,
                    *amount,
                    swap_direction,
                )?;
            let price_after =
                engine.calculate_price(&market.amm, new_base, new_quote, market.amm.peg_multiplier)?;

            vec![
                ("swap_direction", direction_label(swap_direction).to_string()),
                ("quote_asset_reserve", new_quote.to_string()),
                ("base_asset_reserve", new_base.to_string()),
                ("price_after", price(price_after, precision)?),
            ]
        }
        Command::MaxTrade { limit_price } => {
            let (size, direction) = TradeBoundsSolver::new(precision)
                .calculate_max_base_asset_amount_to_trade(&market.amm, *limit_price)?;
            vec![
                (
                    "base_asset_amount",
                    convert_to_decimal(size, precision.amm_reserve())?.to_string(),
                ),
                ("direction", format!("{direction:?}").to_lowercase()),
            ]
        }
        Command::Direction { asset, position } => {
            let swap_direction = get_swap_direction((*asset).into(), (*position).into());
            vec![("swap_direction", direction_label(swap_direction).to_string())]
        }
        Command::Value { entry } => {
            let (value, pnl) = PositionMath::new(precision).calculate_base_asset_value_and_pnl(
                market.base_asset_amount,
                *entry,
                &market.amm,
            )?;
            vec![
                (
                    "base_asset_amount",
                    convert_signed_to_decimal(market.base_asset_amount, precision.amm_reserve())?
                        .to_string(),
                ),
                ("base_asset_value", quote(value, precision)?),
                (
                    "pnl",
                    convert_signed_to_decimal(pnl, precision.quote())?.to_string(),
                ),
            ]
        }
        Command::Repeg {
            oracle,
            target_price,
            oracle_invalid,
        } => {
            let oracle_price_data = load_json::<OraclePriceData>(oracle)?;
            repeg_report(
                settings,
                precision,
                market,
                &oracle_price_data,
                *target_price,
                !oracle_invalid,
            )?
        }
    };

    Ok(report)
}

fn repeg_report(
    settings: &VammSettings,
    precision: Precision,
    market: &Market,
    oracle_price_data: &OraclePriceData,
    target_price: Option<u128>,
    oracle_is_valid: bool,
) -> Result<Report> {
    let engine = PriceEngine::new(precision);
    let calculator = RepegCalculator::new(precision, settings.repeg);

    let oracle_price = u128::try_from(oracle_price_data.price)
        .context("oracle price must be non-negative")?;
    let target_price = target_price.unwrap_or(oracle_price);

    let mark = engine.calculate_mark_price(&market.amm)?;
    let terminal_before = engine.calculate_terminal_price(market)?;

    let budget = calculator.calculate_pool_budget(market, mark, oracle_price_data)?;
    let (candidate_peg, cost, repegged) =
        calculator.calculate_budgeted_peg(market, budget, mark, target_price)?;
    let validity =
        calculator.calculate_repeg_validity(&repegged, oracle_price_data, oracle_is_valid, terminal_before)?;

    info!(
        candidate_peg = %candidate_peg,
        cost = %cost,
        direction_valid = validity.direction_valid,
        profitability_valid = validity.profitability_valid,
        price_impact_valid = validity.price_impact_valid,
        "repeg evaluated"
    );

    Ok(vec![
        ("mark_price", price(mark, precision)?),
        ("terminal_price_before", price(terminal_before, precision)?),
        ("fee_pool", quote(calculator.calculate_fee_pool(market)?, precision)?),
        ("budget", quote(budget, precision)?),
        (
            "peg_before",
            convert_to_decimal(market.amm.peg_multiplier, precision.peg())?.to_string(),
        ),
        (
            "candidate_peg",
            convert_to_decimal(candidate_peg, precision.peg())?.to_string(),
        ),
        ("cost", convert_signed_to_decimal(cost, precision.quote())?.to_string()),
        ("oracle_is_valid", validity.oracle_is_valid.to_string()),
        ("direction_valid", validity.direction_valid.to_string()),
        ("profitability_valid", validity.profitability_valid.to_string()),
        ("price_impact_valid", validity.price_impact_valid.to_string()),
        (
            "oracle_terminal_divergence",
            convert_signed_to_decimal(
                validity.oracle_terminal_divergence_pct_after,
                precision.price_spread(),
            )?
            .to_string(),
        ),
    ])
}

fn price(value: u128, precision: Precision) -> Result<String> {
    Ok(convert_to_decimal(value, precision.mark_price())?.to_string())
}

fn quote(value: u128, precision: Precision) -> Result<String> {
    Ok(convert_to_decimal(value, precision.quote())?.to_string())
}

fn direction_label(direction: SwapDirection) -> &'static str {
    match direction {
        SwapDirection::Add => "add",
        SwapDirection::Remove => "remove",
    }
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}

fn print_report(report: &Report, json: bool) -> Result<()> {
    if json {
        let object: serde_json::Map<String, serde_json::Value> = report
            .iter()
            .map(|(label, value)| (label.to_string(), serde_json::Value::String(value.clone())))
            .collect();
        println!("{}", serde_json::to_string_pretty(&object)?);
    } else {
        for (label, value) in report {
            println!("{label:<28} {value}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SNAPSHOT: &str = r#"{
        "amm": {
            "baseAssetReserve": 10000000000000000,
            "quoteAssetReserve": 10000000000000000,
            "sqrtK": 10000000000000000,
            "pegMultiplier": 10000
        },
        "baseAssetAmount": 0
    }"#;

    fn market() -> Market {
        serde_json::from_str(SNAPSHOT).unwrap()
    }

    fn value<'a>(report: &'a Report, label: &str) -> &'a str {
        report
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[test]
    fn test_mark_command() {
        let report = run(&VammSettings::default(), &market(), &Command::Mark).unwrap();
        assert_eq!(value(&report, "mark_price"), "10.0000000000");
    }

    #[test]
    fn test_swap_command_rejects_negative_amount() {
        let command = Command::Swap {
            asset: Asset::Base,
            amount: -5,
            position: Side::Long,
        };
        let err = run(&VammSettings::default(), &market(), &command).unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn test_swap_command_long_base_removes() {
        let command = Command::Swap {
            asset: Asset::Base,
            amount: 5_000_000_000_000_000,
            position: Side::Long,
        };
        let report = run(&VammSettings::default(), &market(), &command).unwrap();
        assert_eq!(value(&report, "swap_direction"), "remove");
        assert_eq!(value(&report, "base_asset_reserve"), "5000000000000000");
        assert_eq!(value(&report, "quote_asset_reserve"), "20000000000000000");
        assert_eq!(value(&report, "price_after"), "40.0000000000");
    }

    #[test]
    fn test_max_trade_at_mark_is_zero_long() {
        let command = Command::MaxTrade {
            limit_price: 100_000_000_000,
        };
        let report = run(&VammSettings::default(), &market(), &command).unwrap();
        assert_eq!(value(&report, "base_asset_amount"), "0.0000000000000");
        assert_eq!(value(&report, "direction"), "long");
    }

    #[test]
    fn test_repeg_command_reads_oracle_file() {
        let mut oracle = NamedTempFile::new().unwrap();
        write!(
            oracle,
            r#"{{"price": 105000000000, "confidence": 1000000000, "delay": 0, "hasSufficientNumberOfDataPoints": true}}"#
        )
        .unwrap();

        let command = Command::Repeg {
            oracle: oracle.path().to_path_buf(),
            target_price: None,
            oracle_invalid: true,
        };
        let report = run(&VammSettings::default(), &market(), &command).unwrap();
        assert_eq!(value(&report, "budget"), "0.000000");
        assert_eq!(value(&report, "oracle_is_valid"), "false");
        assert_eq!(value(&report, "direction_valid"), "false");
    }
}
