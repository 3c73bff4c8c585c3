use crate::error::{AppError, Result};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{error, info};

pub const DEFAULT_FILE_NAME: &str = "chapter.docx";

/// Result of a finished export task.
#[derive(Debug)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub result: Result<usize>,
}

/// Ask the user where to save via the native dialog. `None` if cancelled.
pub fn pick_export_path(start_dir: Option<&str>) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Export Chapter")
        .set_file_name(DEFAULT_FILE_NAME)
        .add_filter("DOCX Files", &["docx"]);
    if let Some(dir) = start_dir {
        dialog = dialog.set_directory(dir);
    }
    dialog.save_file()
}

/// Append `.docx` to names without an extension.
pub fn resolve_target(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension("docx")
    }
}

/// Write the translation on a background task; the outcome arrives on `tx`.
///
/// The file holds the translation as plain UTF-8 text under a `.docx` name.
pub fn spawn_export(
    text: String,
    path: PathBuf,
    tx: mpsc::UnboundedSender<ExportOutcome>,
) -> Result<()> {
    if text.is_empty() {
        return Err(AppError::Export("nothing to export".into()));
    }
    let path = resolve_target(path);
    info!(path = %path.display(), bytes = text.len(), "export started");

    tokio::spawn(async move {
        let result = write_export(&path, &text).await;
        match &result {
            Ok(bytes) => info!(path = %path.display(), bytes, "export finished"),
            Err(e) => error!(path = %path.display(), error = %e, "export failed"),
        }
        let _ = tx.send(ExportOutcome { path, result });
    });
    Ok(())
}

async fn write_export(path: &Path, text: &str) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            return Err(AppError::Export(format!(
                "directory not found: {}",
                parent.display()
            )));
        }
    }
    tokio::fs::write(path, text.as_bytes()).await?;
    Ok(text.len())
}
