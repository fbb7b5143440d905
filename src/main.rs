mod args;
mod tabular;

use clap::{CommandFactory, Parser};
use log::{debug, info, LevelFilter};

use crate::args::Args;

const EXAMPLE_USAGE: &str =
    "Example: topsis data.csv \"1,1,1,1,1\" \"+,+,-,+,+\" result.csv";

fn main() {
    let args = Args::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if args.verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
    debug!("main: args: {:?}", args);

    match tabular::run(&args) {
        Ok(summary) => {
            for alt in summary.alternatives.iter() {
                info!("{} -> score {} rank {}", alt.identifier, alt.score, alt.rank);
            }
            println!("Results have been saved to {}", summary.output);
            println!();
            println!(
                "Note: Your input file has {} criteria (columns excluding the first).",
                summary.num_criteria
            );
            println!(
                "Make sure to provide {} weights and {} impacts.",
                summary.num_criteria, summary.num_criteria
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            let message = e.to_string();
            let mut cause = std::error::Error::source(&e);
            while let Some(c) = cause {
                if c.to_string() != message {
                    eprintln!("  caused by: {}", c);
                }
                cause = std::error::Error::source(c);
            }
            if e.is_missing_parameter() {
                eprintln!("{}", Args::command().render_usage());
                eprintln!("{}", EXAMPLE_USAGE);
            }
            std::process::exit(1);
        }
    }
}
