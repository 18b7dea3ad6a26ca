use std::path::Path;

use pdfcam::drills;

use crate::cli::{DrillFormat, ImportArgs};
use crate::shared::run_import;

pub fn run(file: &Path, format: DrillFormat, args: &ImportArgs) -> Result<(), i32> {
    let dict = run_import(file, &args.to_options())?;
    let holes = drills(&dict);

    match format {
        DrillFormat::Text => {
            for drill in &holes {
                println!(
                    "{:.5}\t{:.5}\t{:.5}",
                    drill.center.x, drill.center.y, drill.diameter
                );
            }
        }
        DrillFormat::Json => {
            let json = serde_json::to_string(&holes).map_err(|e| {
                eprintln!("Error: failed to serialize drills: {e}");
                1
            })?;
            println!("{json}");
        }
    }
    Ok(())
}
