//! Sequential multi-photo rendering into a zip archive.
//!
//! One bad photo never sinks the batch: decode and encode failures are
//! logged, counted, and skipped. The batch as a whole fails only when every
//! single item failed, or when the failure is environmental (no encoder
//! compiled in, archive write error) and would hit every item anyway.

use crate::export::{self, ExportError, OutputFormat};
use crate::render::RenderEngine;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// Every item in the batch failed; the archive would be empty.
    #[error("all {failed} items in the batch failed")]
    AllFailed { failed: usize },
    #[error("could not write archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A missing encoder aborts the batch: it would fail every item.
    #[error(transparent)]
    Export(ExportError),
}

/// One photo queued for rendering.
pub struct RenderJob {
    /// Uploaded filename, used to derive the archive entry name.
    pub original_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Outcome of a batch run. `archive` is a complete zip file.
#[derive(Debug)]
pub struct BatchResult {
    pub archive: Vec<u8>,
    pub succeeded: usize,
    pub failed: usize,
}

/// Render every job with the given template and pack the posters into a zip.
///
/// Jobs with empty bytes are skipped without counting as failures. Entries
/// are named `<stem>_poster.<ext>`, falling back to `poster_<n>.<ext>` when
/// the job carries no usable filename. Order of archive entries matches job
/// order.
pub fn run(
    engine: &RenderEngine,
    jobs: &[RenderJob],
    template_id: &str,
    format: OutputFormat,
    quality: f32,
) -> Result<BatchResult, BatchError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    let mut succeeded = 0usize;
    let mut failed = 0usize;

    for (index, job) in jobs.iter().enumerate() {
        if job.bytes.is_empty() {
            continue;
        }
        let display_name = job.original_name.as_deref().unwrap_or("<unnamed>");

        let poster = match engine.render(template_id, &job.bytes, display_name) {
            Ok((poster, _meta)) => poster,
            Err(err) => {
                tracing::warn!(file = display_name, error = %err, "skipping failed item");
                failed += 1;
                continue;
            }
        };

        let encoded = match export::export(&poster, format, quality) {
            Ok(bytes) => bytes,
            Err(err @ ExportError::EncoderUnavailable(_)) => {
                return Err(BatchError::Export(err));
            }
            Err(err) => {
                tracing::warn!(file = display_name, error = %err, "skipping failed item");
                failed += 1;
                continue;
            }
        };

        zip.start_file(entry_name(job, index, format), options)?;
        zip.write_all(&encoded)?;
        succeeded += 1;
    }

    if succeeded == 0 {
        return Err(BatchError::AllFailed { failed });
    }

    tracing::info!(succeeded, failed, "batch complete");
    let archive = zip.finish()?.into_inner();
    Ok(BatchResult {
        archive,
        succeeded,
        failed,
    })
}

fn entry_name(job: &RenderJob, index: usize, format: OutputFormat) -> String {
    let ext = format.extension();
    let stem = job
        .original_name
        .as_deref()
        .and_then(|name| Path::new(name).file_stem())
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty());
    match stem {
        Some(stem) => format!("{stem}_poster.{ext}"),
        None => format!("poster_{}.{ext}", index + 1),
    }
}
