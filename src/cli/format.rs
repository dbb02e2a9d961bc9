use crate::runner::Evaluation;
use crate::validate::ValidationError;
use serde_json::json;

/// Print a test evaluation: the report verbatim, with any compile errors
/// detailed after it.
pub fn print_test_pretty(outcome: &Evaluation) {
    println!("{}", outcome.report);

    if !outcome.errors.is_empty() {
        println!();
        for err in &outcome.errors {
            println!("\x1b[31merror\x1b[0m: {}", err.summary());
        }
    }
}

/// Print a test evaluation as structured JSON.
pub fn print_test_json(outcome: &Evaluation) {
    let output = json!({
        "report": outcome.report,
        "errors": errors_json(&outcome.errors),
        "summary": {
            "invalid_rules": outcome.errors.len(),
        },
    });
    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

/// Print the outcome of the commit gate: the first compile failure, or a
/// confirmation that every enabled regex rule compiles.
pub fn print_check_pretty(rules_loaded: usize, first: Option<&ValidationError>) {
    match first {
        None => println!(
            "\x1b[32m✓\x1b[0m All rules compile ({} rules loaded)",
            rules_loaded
        ),
        Some(err) => {
            println!("\x1b[31m✗\x1b[0m Invalid regex rule:");
            for line in err.detail().lines() {
                println!("  {}", line);
            }
        }
    }
}

pub fn print_check_json(rules_loaded: usize, first: Option<&ValidationError>) {
    let output = json!({
        "ok": first.is_none(),
        "rules_loaded": rules_loaded,
        "error": first.map(|err| json!({
            "row": err.row_index + 1,
            "label": err.label,
            "pattern": err.pattern,
            "message": err.message,
        })),
    });
    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

fn errors_json(errors: &[ValidationError]) -> Vec<serde_json::Value> {
    errors
        .iter()
        .map(|err| {
            json!({
                "row": err.row_index + 1,
                "label": err.label,
                "pattern": err.pattern,
                "message": err.message,
            })
        })
        .collect()
}
