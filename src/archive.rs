use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use colored::Colorize;
use zip::result::ZipResult;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::cmd_handlers as cmd;
use crate::file_util;

/// compress the run directory, zip first, external tar as fallback.
/// returns the archive path, or None when both methods fail (the raw
/// directory is left untouched either way)
pub fn archive_run(dir: &Path) -> Option<PathBuf> {
    let zip_path = sibling_with_suffix(dir, ".zip")?;
    match zip_dir(dir, &zip_path) {
        Ok(()) => return Some(zip_path),
        Err(e) => {
            let _ = fs::remove_file(&zip_path);
            warn!(format!("zip archive failed ({e}), falling back to tar"));
        }
    }

    let tar_path = sibling_with_suffix(dir, ".tar.gz")?;
    if tar_fallback(dir, &tar_path) {
        Some(tar_path)
    } else {
        let _ = fs::remove_file(&tar_path);
        None
    }
}

/// `<dir name>.zip` next to the run directory. the run directory name
/// contains dots (the target keeps its TLD), so the suffix is appended
/// to the full name rather than replacing an "extension"
pub(crate) fn sibling_with_suffix(dir: &Path, suffix: &str) -> Option<PathBuf> {
    let name = dir.file_name()?;
    Some(dir.with_file_name(format!("{}{suffix}", name.to_string_lossy())))
}

fn zip_dir(dir: &Path, zip_path: &Path) -> ZipResult<()> {
    let root = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "VAPT_run".to_string());

    let file = File::create(zip_path)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        writer.start_file(format!("{root}/{}", name.to_string_lossy()), options)?;
        let mut src = File::open(entry.path())?;
        io::copy(&mut src, &mut writer)?;
    }
    writer.finish()?;
    Ok(())
}

/// `tar -czf <dir>.tar.gz -C <parent> <dirname>` through the same
/// subprocess plumbing the steps use
fn tar_fallback(dir: &Path, tar_path: &Path) -> bool {
    let parent = match dir.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let Some(dirname) = dir.file_name() else {
        return false;
    };

    let tar_path = tar_path.to_string_lossy();
    let parent = parent.to_string_lossy();
    let dirname = dirname.to_string_lossy();
    let status = cmd::run(
        "tar",
        &["-czf", &tar_path, "-C", &parent, &dirname],
    );
    matches!(status, Ok(capture) if capture.status == Some(0))
        && file_util::file_exists(&*tar_path)
}
