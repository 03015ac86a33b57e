//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, ScreenrackArgs};
use crate::error::Result;
use crate::hybrid_search::HybridSearchResults;
use crate::ingest::IngestReport;

/// Result structure for the count command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CountResult {
    pub store_path: String,
    pub documents: usize,
}

/// Result structure for the index command.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexResult {
    pub directory: String,
    #[serde(flatten)]
    pub report: IngestReport,
    pub duration_ms: u64,
}

/// A command result that can print itself for humans.
///
/// The default prints the serialized fields as `key: value` lines.
pub trait CommandOutput: Serialize {
    fn print_human(&self) -> Result<()> {
        let value = serde_json::to_value(self)?;
        output_generic_human(&value);
        Ok(())
    }
}

impl CommandOutput for CountResult {}

impl CommandOutput for IndexResult {}

impl CommandOutput for HybridSearchResults {
    fn print_human(&self) -> Result<()> {
        if self.degraded {
            println!("Search backends unavailable; results may be incomplete.");
        }
        if self.results.is_empty() {
            println!("No results for {:?}", self.query_text);
            return Ok(());
        }

        println!("Search Results:");
        println!("═══════════════");
        for (i, result) in self.results.iter().enumerate() {
            println!();
            println!("Result {}: (Score: {:.3})", i + 1, result.score);
            println!("─────────────");
            println!("path: {}", result.path);
            if !result.text.is_empty() {
                println!("text: {}", snippet(&result.text, 120));
            }
        }
        println!();
        println!(
            "{} vector / {} keyword candidates, {}ms",
            self.vector_matches, self.keyword_matches, self.query_time_ms
        );
        Ok(())
    }
}

/// Output a result in the specified format.
pub fn output_result<T: CommandOutput>(
    message: &str,
    result: &T,
    args: &ScreenrackArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: CommandOutput>(message: &str, result: &T, args: &ScreenrackArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }
    result.print_human()
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &ScreenrackArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                println!("{key}: {}", format_value(val));
            }
        }
        _ => println!("{}", format_value(value)),
    }
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

/// First `max_chars` characters of `text` on one line.
fn snippet(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let cut: String = flat.chars().take(max_chars).collect();
        format!("{cut}…")
    }
}
