// src/domain/export/mod.rs
//
// Export Domain - criteria, formats, and pure sheet layout
//
// "Which images belong at which grid cell" is a pure computation and lives
// here; "fetch and convert this URI" is an I/O task and lives in the
// integrations and services layers.

pub mod cancel;
pub mod criteria;
pub mod layout;

pub use cancel::CancelFlag;
pub use criteria::{ExportCriteria, ExportFormat, RangeFilter};
pub use layout::{
    derive_columns, photo_cells, scalar_display, ExportRecord, PhotoCategory, PhotoCell,
    SheetLayout, DATA_ROW_HEIGHT, HEADER_ROW_HEIGHT, IMAGE_HEIGHT_PX, IMAGE_WIDTH_PX,
    PHOTO_CATEGORIES, PHOTO_COLUMN_WIDTH,
};
