mod axis_binding;
mod chart_spec;
mod chart_spec_builder;
mod json_contract;
mod session;
mod session_config;
mod session_state;

pub use axis_binding::{AxisBinding, AxisRole, SeriesBinding};
pub use chart_spec::{
    AxisTitleOverrides, AxisTitles, BAR_GROUP_WIDTH, BarGroupSlot, BarGroupingMode, ChartLayout,
    ChartSpecification, LINE_WIDTH, SCATTER_MARKER_OPACITY, SCATTER_MARKER_SIZE,
    SeriesRenderHint, SeriesSpec, SeriesStyle,
};
pub use chart_spec_builder::{bar_group_slot, build_chart_specification, render_hint};
pub use json_contract::{
    CHART_SPECIFICATION_JSON_SCHEMA_V1, ChartGenerationPayload, ChartSpecificationJsonContractV1,
    GenerationSeries,
};
pub use session::ChartSession;
pub use session_config::{RecomputePolicy, SessionConfig};
pub use session_state::{DatasetBindingPolicy, SessionAction, SessionState, reduce};
