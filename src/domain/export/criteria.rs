use serde::{Deserialize, Serialize};

/// Inventory filter for an export job.
///
/// Every field is optional; an absent field is a wildcard. The criteria
/// serialize to store query parameters, so filtering happens server-side
/// and the dataset arrives in one page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportCriteria {
    pub district: Option<String>,
    pub structure_type: Option<String>,
    pub name_contains: Option<String>,
    pub length_range: Option<RangeFilter>,
    pub age_range: Option<RangeFilter>,
    pub category: Option<String>,
}

/// Inclusive numeric range; either bound may be open.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RangeFilter {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ExportCriteria {
    /// Store query parameters for the dataset endpoint
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(district) = &self.district {
            params.push(("district".to_string(), district.clone()));
        }
        if let Some(structure_type) = &self.structure_type {
            params.push(("structure_type".to_string(), structure_type.clone()));
        }
        if let Some(name) = &self.name_contains {
            params.push(("name".to_string(), name.clone()));
        }
        if let Some(range) = &self.length_range {
            push_range(&mut params, "length", range);
        }
        if let Some(range) = &self.age_range {
            push_range(&mut params, "age", range);
        }
        if let Some(category) = &self.category {
            params.push(("category".to_string(), category.clone()));
        }

        params
    }
}

fn push_range(params: &mut Vec<(String, String)>, name: &str, range: &RangeFilter) {
    if let Some(min) = range.min {
        params.push((format!("{}_min", name), min.to_string()));
    }
    if let Some(max) = range.max {
        params.push((format!("{}_max", name), max.to_string()));
    }
}

/// Target artifact format of an export job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Delimited text, no image embedding
    Csv,
    /// Spreadsheet with embedded photo thumbnails
    Workbook,
}

impl ExportFormat {
    pub fn file_extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Workbook => "xlsx",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Workbook => write!(f, "workbook"),
        }
    }
}
