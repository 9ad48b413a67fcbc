use std::path::Path;

use colored::Colorize;
use cq_core::{Severity, validate_library};

pub fn run(file: &Path, strict: bool) -> Result<(), String> {
    let library = super::load_library(file)?;
    let issues = validate_library(&library);

    for issue in &issues {
        let label = match issue.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
        };
        eprintln!("  {label}: {}: {}", issue.subject, issue.message);
    }

    let errors = issues.iter().filter(|i| i.is_error()).count();
    let warnings = issues.len() - errors;

    if errors > 0 || (strict && warnings > 0) {
        return Err(format!(
            "{} error{}, {} warning{}",
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" },
        ));
    }

    let lines: usize = library.scripts.values().map(|s| s.line_count()).sum();
    println!("  All checks passed for '{}'.", file.display());
    println!(
        "  {} scripts, {} lines, {} placements",
        library.scripts.len(),
        lines,
        library.placements.len()
    );
    if warnings > 0 {
        println!(
            "  {} warning{}",
            warnings,
            if warnings == 1 { "" } else { "s" }
        );
    }

    Ok(())
}
