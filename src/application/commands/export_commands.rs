// src/application/commands/export_commands.rs

use crate::application::dto::{ExportRequestDto, ExportResultDto};
use crate::application::error_handling::ErrorResponse;
use crate::application::state::AppState;
use crate::domain::export::{CancelFlag, ExportCriteria, ExportFormat, RangeFilter};

/// Run an export job to completion.
///
/// The caller keeps a clone of `cancel` and may trip it at any time;
/// a cancelled job produces no artifact.
pub async fn export_findings(
    state: &AppState,
    dto: ExportRequestDto,
    cancel: &CancelFlag,
) -> Result<ExportResultDto, ErrorResponse> {
    let format = parse_format(&dto.format)?;
    let criteria = to_criteria(&dto);

    let outcome = state
        .export_service
        .export(&dto.dataset_name, &criteria, format, cancel)
        .await?;

    Ok(outcome.into())
}

fn parse_format(format: &str) -> Result<ExportFormat, ErrorResponse> {
    match format {
        "csv" => Ok(ExportFormat::Csv),
        "workbook" | "xlsx" => Ok(ExportFormat::Workbook),
        other => Err(ErrorResponse::validation(format!(
            "Unknown export format: {}",
            other
        ))),
    }
}

fn to_criteria(dto: &ExportRequestDto) -> ExportCriteria {
    ExportCriteria {
        district: dto.district.clone(),
        structure_type: dto.structure_type.clone(),
        name_contains: dto.name_contains.clone(),
        length_range: range(dto.length_min, dto.length_max),
        age_range: range(dto.age_min, dto.age_max),
        category: dto.category.clone(),
    }
}

fn range(min: Option<f64>, max: Option<f64>) -> Option<RangeFilter> {
    if min.is_none() && max.is_none() {
        return None;
    }
    Some(RangeFilter { min, max })
}
