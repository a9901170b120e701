use crate::config::MapperConfig;
use crate::core::{MapReport, QuantityMapper};
use crate::error::MapperResult;
use crate::excel::{ExcelExporter, ExcelImporter};
use colored::Colorize;
use tracing::info;

/// Load both sheets, map quantities and write the output workbook.
///
/// Nothing is written unless every sheet and column was found.
pub fn map_quantities(config: &MapperConfig) -> MapperResult<MapReport> {
    config.validate()?;

    let mut importer = ExcelImporter::open(&config.input)?;
    let primary = importer.read_sheet(&config.primary_sheet)?;
    let secondary = importer.read_sheet(&config.secondary_sheet)?;
    info!(
        primary_rows = primary.row_count(),
        secondary_rows = secondary.row_count(),
        "loaded sheets from {}",
        config.input.display()
    );

    let mapped = QuantityMapper::new(config).map(primary, secondary)?;

    ExcelExporter::new(vec![&mapped.primary, &mapped.secondary]).export(&config.output)?;

    Ok(mapped.report)
}

/// Execute the map command and print the confirmation line
pub fn run(config: MapperConfig, verbose: bool) -> MapperResult<()> {
    if verbose {
        println!("{}", "📖 Reading workbook...".cyan());
        println!("   Input:  {}", config.input.display());
        println!("   Output: {}\n", config.output.display());
    }

    let report = map_quantities(&config)?;

    if verbose {
        print_report(&config, &report);
    }

    println!(
        "{} {}",
        "Updated workbook written to:".bold().green(),
        config.output.display()
    );
    Ok(())
}

fn print_report(config: &MapperConfig, report: &MapReport) {
    println!("{}", "📊 Mapping Summary:".bold().cyan());
    println!(
        "   {}: {} rows",
        config.primary_sheet.bright_blue(),
        report.primary_rows
    );
    println!(
        "   {}: {} rows, {} lookup keys ({} duplicates overwritten)",
        config.secondary_sheet.bright_blue(),
        report.secondary_rows,
        report.lookup_entries,
        report.duplicate_keys
    );
    println!("   Matched:   {}", report.matched_rows.to_string().green());
    println!("   Unmatched: {}", report.unmatched_rows.to_string().yellow());
    if report.unrecognised_foil_rows > 0 {
        println!(
            "   {} {} rows have a '{}' value other than \"foil\"/\"normal\" and cannot match",
            "⚠️".yellow(),
            report.unrecognised_foil_rows,
            config.foil_col
        );
    }
    println!();
}
