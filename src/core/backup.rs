use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::confirm_overwrite;
use crate::utils::path::expand_tilde;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the record file to `dest_file`, optionally compressing it
    /// (zip on Windows, tar.gz elsewhere). Returns the final path, or
    /// `None` when the user declined to overwrite.
    pub fn backup(cfg: &Config, dest_file: &str, compress: bool, force: bool) -> AppResult<Option<PathBuf>> {
        let src = Path::new(&cfg.data_file);
        let dest_buf = expand_tilde(dest_file);
        let dest = dest_buf.as_path();

        if !dest.is_absolute() {
            return Err(AppError::Other(format!(
                "Backup path must be absolute: {dest_file}"
            )));
        }

        if !src.exists() {
            return Err(AppError::from(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Record file not found: {}", src.display()),
            )));
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        if dest.exists() && !force && !confirm_overwrite(dest)? {
            warning("Backup cancelled by user.");
            return Ok(None);
        }

        fs::copy(src, dest)?;
        success(format!("Backup created: {}", dest.display()));

        let final_path = if compress {
            let compressed = compress_backup(dest)?;
            if compressed.as_path() != dest {
                if let Err(e) = fs::remove_file(dest) {
                    warning(format!("Failed to remove uncompressed backup: {e}"));
                } else {
                    info(format!("Removed uncompressed backup: {}", dest.display()));
                }
            }
            compressed
        } else {
            dest.to_path_buf()
        };

        tracing::info!(src = %src.display(), dest = %final_path.display(), compress, "Backup written");
        Ok(Some(final_path))
    }
}

fn file_name(path: &Path) -> AppResult<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| AppError::Other(format!("not a file path: {}", path.display())))
}

/// Compress a backup using .zip
#[cfg(windows)]
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut f = fs::File::open(path)?;
    zip.start_file(file_name(path)?, options)
        .map_err(io::Error::other)?;

    io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(io::Error::other)?;

    info(format!("Compressed: {}", zip_path.display()));
    Ok(zip_path)
}

/// Compress a backup using .tar.gz
#[cfg(not(windows))]
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    use flate2::Compression;
    use flate2::write::GzEncoder;

    let mut gz_name = path.as_os_str().to_owned();
    gz_name.push(".tar.gz");
    let gz_path = PathBuf::from(gz_name);

    let file = fs::File::create(&gz_path)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut archive = tar::Builder::new(encoder);
    archive.append_path_with_name(path, file_name(path)?)?;
    archive.into_inner()?.finish()?;

    info(format!("Compressed: {}", gz_path.display()));
    Ok(gz_path)
}
