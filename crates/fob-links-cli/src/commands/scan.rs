//! `fob-links scan` - print the links of one or more style sheets.

use crate::cli::ScanArgs;
use crate::commands::{link_records, read_document};
use crate::config::LinksConfig;
use crate::error::Result;
use crate::ui;
use fob_links::{NativeRuntime, Runtime, StyleLinker};
use std::sync::Arc;

/// Execute the scan command.
///
/// Files are scanned in argument order and printed as they are named on the
/// command line. With `--json` a single array is printed at the end.
///
/// # Errors
///
/// Fails on the first file that cannot be read or is not UTF-8. Unresolvable
/// specifiers and broken `tsconfig.json` files are not errors; they only
/// mean fewer links.
pub async fn execute(args: ScanArgs, config: LinksConfig) -> Result<()> {
    if !config.enabled {
        tracing::debug!("fob-links is disabled by configuration");
        return Ok(());
    }

    let runtime: Arc<dyn Runtime> = Arc::new(NativeRuntime);
    let linker = StyleLinker::with_config(Arc::clone(&runtime), config.linker);

    let mut all_records = Vec::new();
    for file in &args.files {
        let path = std::path::absolute(file)?;
        let document = read_document(runtime.as_ref(), &path, file).await?;
        let records = link_records(&linker, &document, file).await;

        tracing::debug!(file = %file.display(), links = records.len(), "scanned");

        if args.json {
            all_records.extend(records);
        } else {
            ui::print_links(&records);
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&all_records)?);
    }

    if args.stats {
        eprintln!("{}", linker.stats());
    }

    Ok(())
}
