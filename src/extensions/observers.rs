use serde::{Deserialize, Serialize};

use crate::core::ChartType;

/// Read-only session summary passed to observer hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub columns_len: usize,
    pub rows_len: usize,
    pub x_bound: bool,
    pub series_len: usize,
    pub chart_type: ChartType,
    pub specification_generation: u64,
    pub specification_current: bool,
}

/// Event stream exposed to observers, in the order changes happen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    DatasetLoaded { columns_len: usize, rows_len: usize },
    CatalogReplaced { dropped: Vec<String> },
    BindingChanged { x_bound: bool, series_len: usize },
    ChartTypeChanged { chart_type: ChartType },
    PaletteChanged { palette: String },
    AxisTitlesChanged,
    ExportConfigChanged,
    SpecificationRebuilt { generation: u64, series_len: usize },
}

/// Observer interface used to drive live preview and similar side channels.
///
/// Observers see events and context but never mutate session internals.
pub trait SessionObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &SessionEvent, context: SessionContext);
}
