// src/services/export_service.rs
//
// Export Pipeline
//
// One invocation = one ephemeral job: fetch the filtered dataset, derive
// the tabular layout, render CSV or a workbook with embedded thumbnails,
// write the artifact, report per-job image failure counts.

use std::path::PathBuf;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use rust_xlsxwriter::{Format, FormatAlign, Image, Workbook};
use serde_json::Value;

use crate::domain::export::{
    photo_cells, CancelFlag, ExportCriteria, ExportFormat, ExportRecord, PhotoCell, SheetLayout,
    DATA_ROW_HEIGHT, HEADER_ROW_HEIGHT, PHOTO_CATEGORIES, PHOTO_COLUMN_WIDTH,
};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, ExportCompleted};
use crate::infrastructure::ExportWorkspace;
use crate::integrations::PhotoFetcher;
use crate::repositories::DatasetRepository;

/// Concurrent photo fetches per export job. Bounded so large exports do
/// not overwhelm the image host.
pub const DEFAULT_FETCH_CONCURRENCY: usize = 6;

const SCALAR_COLUMN_WIDTH: f64 = 18.0;
const SHEET_NAME_MAX: usize = 31;

/// Result of one export job.
///
/// `images_failed` distinguishes "exported but N images missing" from
/// "fully exported"; per-image failures never abort the job.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub file_name: String,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
    pub rows: usize,
    pub images_embedded: usize,
    pub images_failed: usize,
}

pub struct ExportService {
    dataset_repo: Arc<dyn DatasetRepository>,
    photo_fetcher: Arc<dyn PhotoFetcher>,
    workspace: Arc<ExportWorkspace>,
    event_bus: Arc<EventBus>,
    fetch_concurrency: usize,
}

impl ExportService {
    pub fn new(
        dataset_repo: Arc<dyn DatasetRepository>,
        photo_fetcher: Arc<dyn PhotoFetcher>,
        workspace: Arc<ExportWorkspace>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            dataset_repo,
            photo_fetcher,
            workspace,
            event_bus,
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
        }
    }

    pub fn with_fetch_concurrency(mut self, fetch_concurrency: usize) -> Self {
        self.fetch_concurrency = fetch_concurrency.max(1);
        self
    }

    /// Run one export job to completion (or cancellation).
    ///
    /// Zero matching records aborts with [`AppError::EmptyDataset`]; an
    /// empty artifact is never produced.
    pub async fn export(
        &self,
        dataset_name: &str,
        criteria: &ExportCriteria,
        format: ExportFormat,
        cancel: &CancelFlag,
    ) -> AppResult<ExportOutcome> {
        let records = self.dataset_repo.export_dataset(criteria).await?;
        if records.is_empty() {
            return Err(AppError::EmptyDataset);
        }

        let (bytes, images_embedded, images_failed) = match format {
            ExportFormat::Csv => (write_csv(&records)?, 0, 0),
            ExportFormat::Workbook => {
                self.build_workbook(dataset_name, &records, cancel).await?
            }
        };

        let file_name = self
            .workspace
            .artifact_name(dataset_name, format.file_extension());
        let path = self.workspace.write_artifact(&file_name, &bytes)?;

        log::info!(
            "Exported {} rows to {} ({} images embedded, {} failed)",
            records.len(),
            path.display(),
            images_embedded,
            images_failed
        );
        self.event_bus.emit(ExportCompleted::new(
            format.to_string(),
            records.len(),
            images_embedded,
            images_failed,
        ));

        Ok(ExportOutcome {
            file_name,
            path,
            bytes,
            rows: records.len(),
            images_embedded,
            images_failed,
        })
    }

    /// Build the spreadsheet artifact: scalar grid, then thumbnails at
    /// their computed cells. Returns (bytes, embedded, failed).
    async fn build_workbook(
        &self,
        dataset_name: &str,
        records: &[ExportRecord],
        cancel: &CancelFlag,
    ) -> AppResult<(Vec<u8>, usize, usize)> {
        let layout = SheetLayout::from_records(records);

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name(dataset_name))?;

        let header_format = Format::new().set_bold().set_align(FormatAlign::Center);
        worksheet.set_row_height(0, HEADER_ROW_HEIGHT)?;
        for (col, label) in layout.header_labels().iter().enumerate() {
            worksheet.write_with_format(0, col as u16, label.as_str(), &header_format)?;
        }
        for col in 0..layout.scalar_count() {
            worksheet.set_column_width(col as u16, SCALAR_COLUMN_WIDTH)?;
        }
        for col in layout.scalar_count()..layout.total_columns() {
            worksheet.set_column_width(col as u16, PHOTO_COLUMN_WIDTH)?;
        }

        // Pure placement phase: scalar cells now, photo cells collected
        // for the fetch phase
        let mut cells: Vec<PhotoCell> = Vec::new();
        for (index, record) in records.iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(AppError::Cancelled);
            }

            let row = (index + 1) as u32;
            worksheet.set_row_height(row, DATA_ROW_HEIGHT)?;

            for (col, key) in layout.columns.iter().enumerate() {
                match record.get(key) {
                    None | Some(Value::Null) => {}
                    Some(Value::Number(n)) => {
                        if let Some(number) = n.as_f64() {
                            worksheet.write_number(row, col as u16, number)?;
                        } else {
                            worksheet.write_string(row, col as u16, n.to_string())?;
                        }
                    }
                    Some(value) => {
                        worksheet.write_string(
                            row,
                            col as u16,
                            crate::domain::export::scalar_display(value),
                        )?;
                    }
                }
            }

            cells.extend(photo_cells(record, row, &layout));
        }

        // Fetch phase: bounded concurrency across the whole job rather
        // than row-by-row serialization
        let fetched: Vec<(PhotoCell, AppResult<Vec<u8>>)> = stream::iter(cells)
            .map(|cell| {
                let fetcher = Arc::clone(&self.photo_fetcher);
                let cancel = cancel.clone();
                async move {
                    if cancel.is_cancelled() {
                        return (cell, Err(AppError::Cancelled));
                    }
                    let result = fetcher.fetch_thumbnail(&cell.uri).await;
                    (cell, result)
                }
            })
            .buffer_unordered(self.fetch_concurrency)
            .collect()
            .await;

        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }

        let mut images_embedded = 0;
        let mut images_failed = 0;
        for (cell, result) in fetched {
            let image = result
                .and_then(|bytes| Image::new_from_buffer(&bytes).map_err(AppError::from));
            match image {
                Ok(image) => {
                    worksheet.insert_image(cell.row, cell.col, &image)?;
                    images_embedded += 1;
                }
                Err(AppError::Cancelled) => return Err(AppError::Cancelled),
                Err(err) => {
                    images_failed += 1;
                    log::warn!("Skipping photo {}: {}", cell.uri, err);
                }
            }
        }

        let bytes = workbook.save_to_buffer()?;
        Ok((bytes, images_embedded, images_failed))
    }
}

/// Delimited-text artifact: raw scalar keys as the header, one row per
/// record, photo URI lists JSON-encoded into trailing columns.
fn write_csv(records: &[ExportRecord]) -> AppResult<Vec<u8>> {
    let layout = SheetLayout::from_records(records);
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = layout.columns.clone();
    for category in PHOTO_CATEGORIES {
        header.push(uris_column(category.header));
    }
    writer.write_record(&header)?;

    for record in records {
        let mut row: Vec<String> = layout
            .columns
            .iter()
            .map(|key| {
                record
                    .get(key)
                    .map(crate::domain::export::scalar_display)
                    .unwrap_or_default()
            })
            .collect();

        for category in PHOTO_CATEGORIES {
            let uris = record
                .get(category.field)
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            row.push(serde_json::to_string(&uris)?);
        }

        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|err| AppError::Other(format!("CSV buffer error: {}", err)))
}

/// "Overview Photo" → "overview_photo_uris"
fn uris_column(header_stem: &str) -> String {
    format!("{}_uris", header_stem.to_lowercase().replace(' ', "_"))
}

/// Worksheet names may not carry []:*?/\ and cap at 31 characters
fn sheet_name(dataset_name: &str) -> String {
    let cleaned: String = dataset_name
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => ' ',
            other => other,
        })
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return "Export".to_string();
    }
    cleaned.chars().take(SHEET_NAME_MAX).collect()
}
