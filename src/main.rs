use clap::Parser;
use hilite::cli::format;
use hilite::cli::toml_config;
use hilite::cli::{Cli, Commands, OutputFormat};
use hilite::runner;
use hilite::validate;
use std::fs;
use std::process;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Test {
            sample,
            sample_file,
            rules,
            format: output_format,
        } => {
            let rules = match toml_config::load_rules(&rules) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("\x1b[31merror\x1b[0m: {}", e);
                    process::exit(2);
                }
            };

            let sample_text = match (sample, sample_file) {
                (Some(text), _) => text,
                (None, Some(path)) => match fs::read_to_string(&path) {
                    Ok(text) => text,
                    Err(e) => {
                        eprintln!("\x1b[31merror\x1b[0m: failed to read sample file: {}", e);
                        process::exit(2);
                    }
                },
                (None, None) => String::new(),
            };

            let outcome = runner::evaluate(&rules, &sample_text);

            match output_format {
                OutputFormat::Pretty => format::print_test_pretty(&outcome),
                OutputFormat::Json => format::print_test_json(&outcome),
            }

            // compile errors do not block testing; exit clean
            process::exit(0);
        }
        Commands::Check {
            rules,
            format: output_format,
        } => {
            let rules = match toml_config::load_rules(&rules) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("\x1b[31merror\x1b[0m: {}", e);
                    process::exit(2);
                }
            };

            let first = validate::first_error(&rules);

            match output_format {
                OutputFormat::Pretty => format::print_check_pretty(rules.len(), first.as_ref()),
                OutputFormat::Json => format::print_check_json(rules.len(), first.as_ref()),
            }

            process::exit(if first.is_some() { 1 } else { 0 });
        }
    }
}
