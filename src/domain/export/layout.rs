use serde_json::Value;

/// One dynamic row of the export dataset, field order preserved as the
/// store returned it.
pub type ExportRecord = serde_json::Map<String, Value>;

/// Embedded thumbnail dimensions, pixels
pub const IMAGE_WIDTH_PX: u32 = 150;
pub const IMAGE_HEIGHT_PX: u32 = 90;

/// Row heights in points; data rows are sized so thumbnails render
/// without clipping (90 px at 0.75 pt/px)
pub const HEADER_ROW_HEIGHT: f64 = 24.0;
pub const DATA_ROW_HEIGHT: f64 = 68.0;

/// Photo slot column width in character units (~150 px)
pub const PHOTO_COLUMN_WIDTH: f64 = 21.5;

/// Rank/ordinal columns produced by the store's windowed queries.
/// Never tabulated.
const RANK_COLUMNS: &[&str] = &["rank", "row_rank", "ordinal"];

/// A fixed number of image slots per photo category, sized independently
/// of how many photos a given record actually has.
#[derive(Debug, Clone, Copy)]
pub struct PhotoCategory {
    /// Raw photo-array field on the export record
    pub field: &'static str,
    /// Column header stem for the slots
    pub header: &'static str,
    /// Slot count; photos beyond this are dropped
    pub slots: usize,
}

pub const PHOTO_CATEGORIES: [PhotoCategory; 2] = [
    PhotoCategory {
        field: "overview_photos",
        header: "Overview Photo",
        slots: 5,
    },
    PhotoCategory {
        field: "inspection_photos",
        header: "Inspection Photo",
        slots: 5,
    },
];

fn is_excluded_column(key: &str) -> bool {
    RANK_COLUMNS.contains(&key) || PHOTO_CATEGORIES.iter().any(|c| c.field == key)
}

/// Derive the scalar column set from the key set of the first record,
/// excluding rank/ordinal columns and the raw photo-array fields.
/// Record field order is preserved.
pub fn derive_columns(records: &[ExportRecord]) -> Vec<String> {
    let Some(first) = records.first() else {
        return Vec::new();
    };

    first
        .keys()
        .filter(|key| !is_excluded_column(key))
        .cloned()
        .collect()
}

/// Sheet geometry for one export job: scalar columns followed by the
/// fixed photo slots.
#[derive(Debug, Clone)]
pub struct SheetLayout {
    pub columns: Vec<String>,
}

impl SheetLayout {
    pub fn from_records(records: &[ExportRecord]) -> Self {
        Self {
            columns: derive_columns(records),
        }
    }

    pub fn scalar_count(&self) -> usize {
        self.columns.len()
    }

    pub fn photo_slot_count(&self) -> usize {
        PHOTO_CATEGORIES.iter().map(|c| c.slots).sum()
    }

    pub fn total_columns(&self) -> usize {
        self.scalar_count() + self.photo_slot_count()
    }

    /// Header labels: scalar keys, then numbered slot labels per category
    pub fn header_labels(&self) -> Vec<String> {
        let mut labels = self.columns.clone();
        for category in PHOTO_CATEGORIES {
            for slot in 1..=category.slots {
                labels.push(format!("{} {}", category.header, slot));
            }
        }
        labels
    }

    /// Grid column of a photo slot:
    /// scalar columns + category offset + photo index within category.
    pub fn photo_column(&self, category_index: usize, photo_index: usize) -> usize {
        let offset: usize = PHOTO_CATEGORIES[..category_index]
            .iter()
            .map(|c| c.slots)
            .sum();
        self.scalar_count() + offset + photo_index
    }
}

/// One image placement: which URI goes to which grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoCell {
    pub row: u32,
    pub col: u16,
    pub uri: String,
}

/// Compute the photo cells of one data row.
///
/// Bounded at each category's slot count; excess photos are silently
/// dropped, not queued. A record with no photos yields no cells while the
/// placeholder columns stay present in the layout.
pub fn photo_cells(record: &ExportRecord, row: u32, layout: &SheetLayout) -> Vec<PhotoCell> {
    let mut cells = Vec::new();

    for (category_index, category) in PHOTO_CATEGORIES.iter().enumerate() {
        let uris = record
            .get(category.field)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        for (photo_index, uri) in uris.iter().take(category.slots).enumerate() {
            let Some(uri) = uri.as_str() else {
                continue;
            };
            if uri.is_empty() {
                continue;
            }
            cells.push(PhotoCell {
                row,
                col: layout.photo_column(category_index, photo_index) as u16,
                uri: uri.to_string(),
            });
        }
    }

    cells
}

/// Render a scalar cell value for tabular output.
///
/// Strings pass through raw; lists and nested objects are JSON-encoded
/// (the canonical stringification rule for non-scalar values).
pub fn scalar_display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
