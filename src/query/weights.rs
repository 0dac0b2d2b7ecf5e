// SPDX-License-Identifier: MIT OR Apache-2.0

//! `rewind weights`: print the field weight table after config overrides.

use anyhow::Result;

use crate::cli::OutputFormat;
use rewind_search::config::Config;
use rewind_search::output::print_json;

pub fn run(format: OutputFormat, compact: bool) -> Result<()> {
    let settings = Config::load().search_settings();
    match format {
        OutputFormat::Json => print_json(&settings.weights, compact)?,
        OutputFormat::Text => {
            for entry in settings.weights.iter() {
                println!("{:<14} {:.2}", entry.field.as_str(), entry.weight);
            }
            println!(
                "{:<14} {:.2} (linear over {} days)",
                "recency",
                settings.recency.weight,
                settings.recency.window_days
            );
        }
    }
    Ok(())
}
