use clap::Parser;
use quantity_mapper::cli;
use quantity_mapper::config::{MapperConfig, PartialConfig};
use quantity_mapper::error::MapperResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quantity-mapper")]
#[command(about = "Map quantities from inventory sheet to listings sheet.")]
#[command(long_about = "Map quantities from inventory sheet to listings sheet.

Reads a workbook with a primary (listings) sheet and a secondary (inventory
scan) sheet. Rows are matched on card number plus foil status:

  primary:   (trimmed Number, 'foil' if Condition contains the keyword else 'normal')
  secondary: (trimmed Collector number, Foil column value as-is)

The matched Quantity lands in a new 'Add to Quantity' column (0 when no
match). The output workbook holds the updated primary sheet and an
unchanged copy of the secondary sheet.

NOTE: the secondary Foil column must contain the literal text 'foil' or
'normal'. Other values (TRUE/FALSE, 'Foil', ...) never match.

CONFIG FILE:
  Any option can also be set in a YAML file passed with --config.
  Command-line flags take precedence over the file.

EXAMPLES:
  quantity-mapper -i listings.xlsx -o listings_updated.xlsx
  quantity-mapper -i in.xlsx -o out.xlsx --primary-sheet Listings --foil-keyword etched")]
#[command(version)]
struct Cli {
    /// Path to the input Excel file
    #[arg(short, long, required_unless_present = "config")]
    input: Option<PathBuf>,

    /// Path for the output Excel file
    #[arg(short, long, required_unless_present = "config")]
    output: Option<PathBuf>,

    /// YAML file with default values for any option
    #[arg(short, long, env = "QUANTITY_MAPPER_CONFIG")]
    config: Option<PathBuf>,

    /// Name of the primary sheet (listings) [default: Foundations 20250421_100121]
    #[arg(long)]
    primary_sheet: Option<String>,

    /// Name of the secondary sheet (inventory) [default: Manabox scanned]
    #[arg(long)]
    secondary_sheet: Option<String>,

    /// Column name in primary sheet for card number [default: Number]
    #[arg(long)]
    number_col: Option<String>,

    /// Column name in secondary sheet for collector number [default: Collector number]
    #[arg(long)]
    collector_col: Option<String>,

    /// Column name in primary sheet for condition [default: Condition]
    #[arg(long)]
    condition_col: Option<String>,

    /// Column name in secondary sheet for the foil indicator [default: Foil]
    #[arg(long)]
    foil_col: Option<String>,

    /// Keyword to detect foil in the condition field [default: foil]
    #[arg(long)]
    foil_keyword: Option<String>,

    /// Column name in secondary sheet for inventory quantity [default: Quantity]
    #[arg(long)]
    quantity_col: Option<String>,

    /// Name of the sheet to write the updated primary data [default: Foundations Updated]
    #[arg(long)]
    output_sheet: Option<String>,

    /// Show progress and a mapping summary
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_parts(self) -> (PartialConfig, Option<PathBuf>, bool) {
        let partial = PartialConfig {
            input: self.input,
            output: self.output,
            primary_sheet: self.primary_sheet,
            secondary_sheet: self.secondary_sheet,
            number_col: self.number_col,
            collector_col: self.collector_col,
            condition_col: self.condition_col,
            foil_col: self.foil_col,
            foil_keyword: self.foil_keyword,
            quantity_col: self.quantity_col,
            output_sheet: self.output_sheet,
        };
        (partial, self.config, self.verbose)
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "quantity_mapper=info"
    } else {
        "quantity_mapper=warn"
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

fn main() -> MapperResult<()> {
    let (cli_config, config_path, verbose) = Cli::parse().into_parts();
    init_tracing(verbose);

    let file_config = config_path
        .map(|path| PartialConfig::from_file(&path))
        .transpose()?;
    let config = MapperConfig::resolve(cli_config, file_config)?;

    cli::run(config, verbose)
}
