//! # Document Commands
//!
//! "Printing" rendered text and exporting datasets, both into the
//! configured export directory.

use chrono::{Local, SubsecRound};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::error::ApiError;
use crate::export::{self, Dataset, ReportKind};
use crate::render;
use crate::state::{ConfigState, DbState};

/// Where a document or report landed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrittenFile {
    pub path: PathBuf,
}

/// Writes already-rendered text (receipt or purchase order) to
/// `receipt_<YYYYmmdd_HHMMSS>.txt`.
pub async fn print_document(config: &ConfigState, text: String) -> Result<WrittenFile, ApiError> {
    debug!(bytes = text.len(), "print_document command");

    let now = Local::now().naive_local().trunc_subsecs(0);
    let path = render::print_to_file(&config.export_dir, &text, now)?;
    Ok(WrittenFile { path })
}

/// Exports the `"sales"` or `"inventory"` dataset as CSV.
///
/// ## Errors
/// - `VALIDATION_ERROR` for any other report kind
/// - `EXPORT_ERROR` if the file cannot be written
pub async fn export_report(
    db: &DbState,
    config: &ConfigState,
    kind: String,
) -> Result<WrittenFile, ApiError> {
    debug!(kind = %kind, "export_report command");

    let kind: ReportKind = kind.parse()?;
    let path = match kind {
        ReportKind::Sales => {
            let records = db.inner().transactions().load().await;
            export::export_to_dir(&config.export_dir, Dataset::Sales(&records))?
        }
        ReportKind::Inventory => {
            let products = db.inner().inventory().load().await;
            export::export_to_dir(&config.export_dir, Dataset::Inventory(&products))?
        }
    };

    Ok(WrittenFile { path })
}
