use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use type_parse::{namespace::Module, parse, parse_expr, Expect};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExpectArg {
    Type,
    Any,
}

impl From<ExpectArg> for Expect {
    fn from(arg: ExpectArg) -> Self {
        match arg {
            ExpectArg::Type => Expect::Type,
            ExpectArg::Any => Expect::Any,
        }
    }
}

#[derive(Parser)]
#[command(name = "type-parse")]
struct Cli {
    #[arg(help = "Type expression, e.g. `Vector{<:Number}` or `T where T<:Int`")]
    expression: String,

    #[arg(long, value_enum, default_value = "any", help = "Require a type or accept any value")]
    expect: ExpectArg,

    #[arg(short, long, action = ArgAction::Count, help = "-v debug, -vv trace")]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run_single_expression(&cli.expression, cli.expect.into());
}

fn init_logging(verbose: u8) {
    let directive = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_single_expression(input: &str, expect: Expect) {
    let expr = match parse_expr(input) {
        Ok(expr) => expr,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            std::process::exit(1);
        }
    };

    println!("Parsed expression: {}", expr);
    println!();

    let prelude = Module::prelude();
    match parse(expect, input, &prelude) {
        Ok(value) => {
            println!("Value: {}", value);
            println!("typeof: {}", value.type_of());
        }
        Err(e) => {
            eprintln!("Evaluation error: {}", e);
            std::process::exit(1);
        }
    }
}
