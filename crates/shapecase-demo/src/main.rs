//! shapecase demo programs
//!
//! Runs one of the sample programs built on structural dispatch:
//!
//! ```bash
//! # Evaluate the built-in arithmetic sample
//! shapecase-demo calc
//!
//! # Compile a query given as JSON
//! shapecase-demo sql --input '{"table": "t", "columns": ["a", "b"]}'
//!
//! # Watch dispatch decisions
//! RUST_LOG=shapecase=trace shapecase-demo tree
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use shapecase::{Error, Methods, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod calc;
mod sql;
mod tree;

#[derive(Parser, Debug)]
#[command(name = "shapecase-demo")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    demo: Demo,

    /// Log level used when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Demo {
    /// Evaluate an arithmetic expression such as ["+", 2, ["*", 3, 4]]
    Calc {
        /// Expression as JSON; the built-in sample is used when omitted
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Compile a query record into SQL text
    Sql {
        /// Query as JSON; the built-in sample is used when omitted
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Flatten a binary tree such as [1, [2, 3]] into its leaves
    Tree {
        /// Tree as JSON; the built-in sample is used when omitted
        #[arg(short, long)]
        input: Option<String>,
    },
}

impl Demo {
    fn name(&self) -> &'static str {
        match self {
            Demo::Calc { .. } => "calc",
            Demo::Sql { .. }  => "sql",
            Demo::Tree { .. } => "tree",
        }
    }

    fn input(&self) -> Option<&str> {
        match self {
            Demo::Calc { input } | Demo::Sql { input } | Demo::Tree { input } => input.as_deref(),
        }
    }

    fn sample(&self) -> Value {
        match self {
            Demo::Calc { .. } => calc::sample(),
            Demo::Sql { .. }  => sql::sample(),
            Demo::Tree { .. } => tree::sample(),
        }
    }

    fn methods(&self) -> Result<Methods, Error> {
        match self {
            Demo::Calc { .. } => calc::methods(),
            Demo::Sql { .. }  => sql::methods(),
            Demo::Tree { .. } => tree::methods(),
        }
    }

    fn run(&self, methods: &Methods, value: &Value) -> Result<Value, Error> {
        match self {
            Demo::Calc { .. } => calc::run(methods, value),
            Demo::Sql { .. }  => sql::run(methods, value),
            Demo::Tree { .. } => tree::run(methods, value),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let demo = &args.demo;
    let value = match demo.input() {
        Some(text) => {
            let json: serde_json::Value = serde_json::from_str(text)
                .with_context(|| format!("--input is not valid JSON: {text}"))?;
            Value::from(json)
        }
        None => demo.sample(),
    };

    // Built once per process: the schemas are recursive, so the descriptor
    // graph holds itself alive until exit.
    let methods = demo.methods().context("failed to build method tables")?;
    info!(demo = demo.name(), methods = ?methods.names(), "registered");

    let out = demo.run(&methods, &value)
        .with_context(|| format!("{} failed on {value}", demo.name()))?;
    match out {
        Value::Str(s) => println!("{s}"),
        other         => println!("{other}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_subcommand_input() {
        let args = Args::try_parse_from(["shapecase-demo", "sql", "--input", "{}"]).unwrap();
        assert_eq!(args.demo.name(), "sql");
        assert_eq!(args.demo.input(), Some("{}"));
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn every_sample_runs() {
        for demo in [Demo::Calc { input: None }, Demo::Sql { input: None }, Demo::Tree { input: None }] {
            let methods = demo.methods().unwrap();
            assert!(demo.run(&methods, &demo.sample()).is_ok(), "{} sample failed", demo.name());
        }
    }
}
