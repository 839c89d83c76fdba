//! pacing-engine CLI
//!
//! Run capital call pacing schedules and Monte Carlo forecasts from the
//! command line.
//!
//! # Usage
//!
//! ```bash
//! # Forecast account values with a 95% confidence band
//! pacing-engine forecast --calls-per-year 4 --years 5 --trials 1000
//!
//! # Deterministic pacing schedule and call amounts
//! pacing-engine schedule --calls-per-year 4 --years 9
//!
//! # Per-call risk distributions as JSON
//! pacing-engine risk --calls-per-year 4 --years 5 --seed 1 --format json
//! ```

use pacing_engine::core::fund::FundId;
use pacing_engine::core::params::SimulationParams;
use pacing_engine::pacing::curve::PacingCurve;
use pacing_engine::pacing::schedule::{build_series, call_schedule};
use pacing_engine::simulation::monte_carlo::ForecastEngine;
use pacing_engine::simulation::risk::risk_distribution;
use rust_decimal::Decimal;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"pacing-engine — capital call pacing and cash flow forecasting

USAGE:
    pacing-engine <COMMAND> [OPTIONS]

COMMANDS:
    forecast    Monte Carlo forecast of account values with a confidence band
    schedule    Deterministic pacing series and per-call amounts
    risk        Per-call account value risk distributions
    help        Show this message

OPTIONS (all commands):
    --calls-per-year <N>   Capital calls per year (default: 4)
    --years <N>            Horizon in years (default: 9)
    --trials <N>           Monte Carlo trials (default: 1000)
    --seed <S>             RNG seed for reproducible output
    --commitment <X>       Committed capital (default: 20000000)
    --confidence <C>       Confidence level in (0, 1) (default: 0.95)
    --fund <ID>            Fund identifier (default: FUND-001)
    --format <FORMAT>      Output format: text (default) or json
    --output <FILE>        Write to file instead of stdout

EXAMPLES:
    pacing-engine forecast --calls-per-year 4 --years 5 --trials 1000
    pacing-engine forecast --seed 42 --format json
    pacing-engine schedule --calls-per-year 12 --commitment 50000000
    pacing-engine risk --seed 1 --output risk.json --format json"#
    );
}

struct CliOptions {
    params: SimulationParams,
    fund: FundId,
    format: String,
    output: Option<String>,
}

fn require_value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    args.get(i).map(String::as_str).unwrap_or_else(|| {
        eprintln!("{} requires a value", flag);
        process::exit(1);
    })
}

fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> T {
    value.parse().unwrap_or_else(|_| {
        eprintln!("{} has invalid value '{}'", flag, value);
        process::exit(1);
    })
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut params = SimulationParams::default();
    let mut fund = FundId::new("FUND-001");
    let mut format = "text".to_string();
    let mut output = None;

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--calls-per-year" => {
                i += 1;
                params.calls_per_year = parse_number(require_value(args, i, flag), flag);
            }
            "--years" => {
                i += 1;
                params.horizon_years = parse_number(require_value(args, i, flag), flag);
            }
            "--trials" => {
                i += 1;
                params.trials = parse_number(require_value(args, i, flag), flag);
            }
            "--seed" => {
                i += 1;
                params.seed = Some(parse_number(require_value(args, i, flag), flag));
            }
            "--commitment" => {
                i += 1;
                params.commitment =
                    parse_number::<Decimal>(require_value(args, i, flag), flag);
            }
            "--confidence" => {
                i += 1;
                params.confidence_level = parse_number(require_value(args, i, flag), flag);
            }
            "--fund" => {
                i += 1;
                fund = FundId::new(require_value(args, i, flag));
            }
            "--format" => {
                i += 1;
                format = require_value(args, i, flag).to_string();
            }
            "--output" => {
                i += 1;
                output = Some(require_value(args, i, flag).to_string());
            }
            _ => {
                eprintln!("Unknown option: {}", flag);
                process::exit(1);
            }
        }
        i += 1;
    }

    if format != "text" && format != "json" {
        eprintln!("--format requires 'text' or 'json'");
        process::exit(1);
    }

    if let Err(e) = params.validate() {
        eprintln!("Invalid parameters: {}", e);
        process::exit(1);
    }

    CliOptions {
        params,
        fund,
        format,
        output,
    }
}

fn emit(opts: &CliOptions, rendered: String) {
    if let Some(path) = &opts.output {
        fs::write(path, &rendered).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!("Wrote output → {}", path);
    } else {
        println!("{}", rendered);
    }
}

fn cmd_forecast(args: &[String]) {
    let opts = parse_options(args);

    let distribution = ForecastEngine::run(&opts.params).unwrap_or_else(|e| {
        eprintln!("Forecast failed: {}", e);
        process::exit(1);
    });

    let rendered = if opts.format == "json" {
        serde_json::to_string_pretty(&distribution).unwrap()
    } else {
        format!("{}", distribution)
    };
    emit(&opts, rendered);
}

fn cmd_schedule(args: &[String]) {
    let opts = parse_options(args);
    let curve = PacingCurve::default();

    let series = build_series(&opts.params, &curve).unwrap_or_else(|e| {
        eprintln!("Schedule failed: {}", e);
        process::exit(1);
    });
    let calls = call_schedule(&opts.params, &curve, &opts.fund).unwrap_or_else(|e| {
        eprintln!("Schedule failed: {}", e);
        process::exit(1);
    });

    if opts.format == "json" {
        #[derive(serde::Serialize)]
        struct ScheduleOutput<'a> {
            series: &'a pacing_engine::pacing::schedule::PacingSeries,
            calls: &'a pacing_engine::core::call::CallSchedule,
            total_called: String,
        }
        let output = ScheduleOutput {
            series: &series,
            calls: &calls,
            total_called: calls.total_called().to_string(),
        };
        emit(&opts, serde_json::to_string_pretty(&output).unwrap());
    } else {
        let mut rendered = format!("{}", series);
        rendered.push_str("\n=== Call Amounts ===\n");
        for call in calls.calls() {
            rendered.push_str(&format!(
                "  #{:<3} {}  {:>15}  {}\n",
                call.sequence(),
                call.date().format("%Y-%m-%d"),
                call.amount(),
                call.reference().unwrap_or("-")
            ));
        }
        rendered.push_str(&format!("  Total called: {}\n", calls.total_called()));
        emit(&opts, rendered);
    }
}

fn cmd_risk(args: &[String]) {
    let opts = parse_options(args);

    let distributions = risk_distribution(&opts.params, 200).unwrap_or_else(|e| {
        eprintln!("Risk distribution failed: {}", e);
        process::exit(1);
    });

    if opts.format == "json" {
        emit(&opts, serde_json::to_string_pretty(&distributions).unwrap());
    } else {
        let mut rendered = String::from("=== Per-Call Risk Distributions ===\n");
        rendered.push_str(&format!(
            "{:>4}  {:>12}  {:>12}  {:>12}\n",
            "Call", "P5", "Mean", "P95"
        ));
        for d in &distributions {
            rendered.push_str(&format!(
                "{:>4}  {:>12.2}  {:>12.2}  {:>12.2}\n",
                d.sequence,
                d.percentile(5.0),
                d.mean(),
                d.percentile(95.0)
            ));
        }
        emit(&opts, rendered);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "forecast" => cmd_forecast(rest),
        "schedule" => cmd_schedule(rest),
        "risk" => cmd_risk(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
