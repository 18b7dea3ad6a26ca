use std::io::{self, Read};
use std::path::Path;

use pdfcam::{ImportError, ImportOptions, ObjectDict, import_file, import_str};

/// Import from `file`, or from stdin when `file` is `-`.
///
/// Returns `Err(1)` with a message printed to stderr on failure.
pub fn run_import(file: &Path, options: &ImportOptions) -> Result<ObjectDict, i32> {
    let result = if file == Path::new("-") {
        read_stdin().and_then(|text| import_str(&text, options))
    } else {
        if !file.exists() {
            eprintln!("Error: file not found: {}", file.display());
            return Err(1);
        }
        import_file(file, options)
    };
    result.map_err(|e| {
        eprintln!("Error: {e}");
        1
    })
}

fn read_stdin() -> Result<String, ImportError> {
    let mut bytes = Vec::new();
    io::stdin().read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
