//! Script validation command implementation.

use super::CliError;
use skirmish::command::lookup;
use skirmish::script::Script;
use std::path::Path;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the script cannot be read, parsed or validated.
pub(crate) fn execute(script: &Path) -> Result<(), CliError> {
    println!("Validating: {}", script.display());
    println!();

    let loaded = Script::load(script);
    print_check("Parse and validate", loaded.is_ok());
    let loaded = loaded.map_err(|e| CliError::new(e.to_string()))?;

    println!();
    println!("Summary:");
    println!("  Top-level expressions: {}", loaded.exprs().len());
    println!("  Commands used:");
    for name in loaded.commands_used() {
        let kind = lookup(name).map_or_else(|| "?".to_string(), |spec| spec.kind.to_string());
        println!("    {name:<28} {kind}");
    }

    println!();
    println!("Validation successful!");

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
