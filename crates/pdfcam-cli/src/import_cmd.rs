use std::path::Path;

use pdfcam::summarize;

use crate::cli::{ImportArgs, ImportFormat};
use crate::shared::run_import;

pub fn run(file: &Path, format: ImportFormat, args: &ImportArgs) -> Result<(), i32> {
    let dict = run_import(file, &args.to_options())?;

    match format {
        ImportFormat::Json => {
            let json = serde_json::to_string(&dict).map_err(|e| {
                eprintln!("Error: failed to serialize layers: {e}");
                1
            })?;
            println!("{json}");
        }
        ImportFormat::Summary => println!("{}", summarize(&dict)),
    }
    Ok(())
}
