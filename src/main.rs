use ifless::repl::REPL;
use ifless::tail;
use ifless::value::Number;
use std::env;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parameters of a batch run.
#[derive(Debug, Clone, PartialEq)]
struct RunConfig {
    index: i64,
    accumulator: Number,
    limit: i64,
}

#[derive(Debug, Clone, PartialEq)]
enum ArgCmd {
    REPL,
    Run(RunConfig),
    Help,
}

fn print_usage() {
    println!("ifless v{}\n\n", VERSION);
    println!("Usage:");
    println!("  ifless                              Start the REPL");
    println!("  ifless --repl                       Start the REPL");
    println!("  ifless --limit <n> [--index <n>] [--acc <n>]");
    println!("                                      Sum index..limit onto acc and print it");
    println!("  ifless -h                           Show this help message");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=ifless=debug) to enable logging on stderr.");
}

fn parse_int(flag: &str, raw: &str) -> Result<i64, String> {
    raw.parse::<i64>()
        .map_err(|_| format!("Error: {} expects an integer, got '{}'", flag, raw))
}

fn parse_number(flag: &str, raw: &str) -> Result<Number, String> {
    match raw.parse::<i64>() {
        Ok(int) => Ok(Number::Int(int)),
        Err(_) => raw
            .parse::<f64>()
            .map(Number::Float)
            .map_err(|_| format!("Error: {} expects a number, got '{}'", flag, raw)),
    }
}

fn parse_args(args: Vec<String>) -> Result<ArgCmd, String> {
    if args.len() == 1 {
        return Ok(ArgCmd::REPL);
    }

    let mut repl = false;
    let mut index: Option<i64> = None;
    let mut accumulator: Option<Number> = None;
    let mut limit: Option<i64> = None;
    let mut i = 1;

    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-h" | "--help" => {
                return Ok(ArgCmd::Help);
            }
            "--repl" => {
                repl = true;
            }
            "--index" | "--acc" | "--limit" => {
                let raw = args
                    .get(i + 1)
                    .ok_or_else(|| format!("Error: {} requires a value", flag))?;
                match flag {
                    "--index" => index = Some(parse_int(flag, raw)?),
                    "--acc" => accumulator = Some(parse_number(flag, raw)?),
                    _ => limit = Some(parse_int(flag, raw)?),
                }
                i += 1; // Skip the value
            }
            arg => {
                return Err(format!("Error: Unknown argument '{}'", arg));
            }
        }
        i += 1;
    }

    match (repl, limit) {
        (true, None) if index.is_none() && accumulator.is_none() => Ok(ArgCmd::REPL),
        (true, _) => Err("Error: --repl cannot be combined with run options".to_string()),
        (false, Some(limit)) => Ok(ArgCmd::Run(RunConfig {
            index: index.unwrap_or(0),
            accumulator: accumulator.unwrap_or(Number::Int(0)),
            limit,
        })),
        (false, None) => Err("Error: --limit is required".to_string()),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let command = match parse_args(args) {
        Ok(cmd) => cmd,
        Err(e) => {
            eprintln!("{}\n\n", e);
            print_usage();
            std::process::exit(1);
        }
    };

    match command {
        ArgCmd::Help => {
            print_usage();
        }
        ArgCmd::REPL => {
            if let Err(err) = REPL::new().run() {
                eprintln!("Error: {}", err);
                std::process::exit(1);
            }
        }
        ArgCmd::Run(RunConfig { index, accumulator, limit }) => {
            match tail::run(index, accumulator, limit) {
                Ok(sum) => println!("sum: {}", sum),
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
