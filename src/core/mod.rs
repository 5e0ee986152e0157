pub mod catalog;
pub mod chart_type;
pub mod color;
pub mod palette;
pub mod value;

pub use catalog::ColumnCatalog;
pub use chart_type::ChartType;
pub use color::RgbColor;
pub use palette::{ColorPalette, DEFAULT_PALETTE_NAME, builtin_palettes};
pub use value::{CellValue, Dataset, Row, row_from_pairs};
