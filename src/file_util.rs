use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// checks if a file exists
pub fn file_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// write a single placeholder note into an artifact file, truncating
/// whatever was there
pub fn write_note(path: &Path, note: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "{note}")?;
    Ok(())
}

/// read a file as lossy lowercase text for marker searches. missing or
/// unreadable files come back as None
pub fn read_lowercase(path: &Path) -> Option<String> {
    let bytes = std::fs::read(path).ok()?;
    Some(String::from_utf8_lossy(&bytes).to_lowercase())
}
