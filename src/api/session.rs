use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::core::{ChartType, ColorPalette, Dataset, RgbColor};
use crate::error::{ChartError, ChartResult};
use crate::export::{ExportBackend, ExportConfig, ExportCoordinator, ExportRequest};
use crate::extensions::{SessionContext, SessionEvent, SessionObserver};

use super::{
    AxisBinding, AxisTitleOverrides, ChartGenerationPayload, ChartSpecification, RecomputePolicy,
    SessionAction, SessionConfig, SessionState, reduce,
};

/// Single-threaded session facade consumed by host applications.
///
/// Every mutation goes through [`reduce`] and is applied atomically. The
/// chart specification is re-derived from the resulting state either right
/// away or on the next read, depending on [`RecomputePolicy`]; a stale
/// specification is never handed out.
pub struct ChartSession {
    config: SessionConfig,
    state: SessionState,
    specification: Arc<ChartSpecification>,
    generation: u64,
    stale: bool,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl ChartSession {
    pub fn new(config: SessionConfig) -> ChartResult<Self> {
        let palette = config.resolve_palette()?;
        let state = SessionState::new(config.chart_type, palette, config.export.clone());
        let specification = Arc::new(state.specification());
        Ok(Self {
            config,
            state,
            specification,
            generation: 0,
            stale: false,
            observers: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn binding(&self) -> &AxisBinding {
        &self.state.binding
    }

    /// Applies one action. On error the session is left exactly as it was.
    pub fn dispatch(&mut self, action: SessionAction) -> ChartResult<()> {
        let rebuild = action.affects_specification();
        let kind = ChangeKind::of(&action);
        let next = reduce(&self.state, action).inspect_err(|err| {
            debug!(error = %err, ?kind, "rejected session action");
        })?;
        let event = describe_change(&self.state, &next, kind);
        self.state = next;
        trace!(?kind, "applied session action");

        if rebuild {
            self.stale = true;
        }
        self.emit_event(event);
        if self.stale && self.config.recompute_policy == RecomputePolicy::Eager {
            self.rebuild_specification();
        }
        Ok(())
    }

    /// Loads a new dataset using the configured binding policy.
    pub fn load_dataset(&mut self, dataset: Dataset) -> ChartResult<()> {
        info!(
            columns = dataset.columns().len(),
            rows = dataset.row_count(),
            "loading dataset"
        );
        self.dispatch(SessionAction::LoadDataset {
            dataset,
            policy: self.config.dataset_binding_policy,
        })
    }

    /// Narrows the column catalog to a subset of the loaded header and drops
    /// bindings to removed columns. Columns the dataset does not carry are
    /// rejected with [`ChartError::InvalidColumn`].
    pub fn replace_catalog(&mut self, columns: Vec<String>) -> ChartResult<()> {
        self.dispatch(SessionAction::ReplaceCatalog(columns))
    }

    pub fn set_x(&mut self, column: impl Into<String>) -> ChartResult<()> {
        self.dispatch(SessionAction::SetX(column.into()))
    }

    pub fn clear_x(&mut self) -> ChartResult<()> {
        self.dispatch(SessionAction::ClearX)
    }

    /// Adds a series and returns its index.
    pub fn add_series(
        &mut self,
        column: impl Into<String>,
        color: Option<RgbColor>,
    ) -> ChartResult<usize> {
        self.dispatch(SessionAction::AddSeries {
            column: column.into(),
            color,
        })?;
        Ok(self.state.binding.series_len() - 1)
    }

    /// Adds a series for the first unbound column, if any remains.
    pub fn add_next_series(&mut self) -> ChartResult<Option<usize>> {
        let before = self.state.binding.series_len();
        self.dispatch(SessionAction::AddNextSeries)?;
        Ok((self.state.binding.series_len() > before).then_some(before))
    }

    pub fn remove_series(&mut self, index: usize) -> ChartResult<()> {
        self.dispatch(SessionAction::RemoveSeries(index))
    }

    pub fn reassign_series(&mut self, index: usize, column: impl Into<String>) -> ChartResult<()> {
        self.dispatch(SessionAction::ReassignSeries {
            index,
            column: column.into(),
        })
    }

    pub fn relabel_series(&mut self, index: usize, label: impl Into<String>) -> ChartResult<()> {
        self.dispatch(SessionAction::RelabelSeries {
            index,
            label: label.into(),
        })
    }

    pub fn recolor_series(&mut self, index: usize, color: RgbColor) -> ChartResult<()> {
        self.dispatch(SessionAction::RecolorSeries { index, color })
    }

    pub fn set_chart_type(&mut self, chart_type: ChartType) -> ChartResult<()> {
        self.dispatch(SessionAction::SetChartType(chart_type))
    }

    /// Switches the active palette by built-in name.
    ///
    /// Existing series keep their colors; only later auto-colored series use it.
    pub fn set_palette(&mut self, name: &str) -> ChartResult<()> {
        let palette = ColorPalette::builtin(name)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown palette `{name}`")))?;
        self.dispatch(SessionAction::SetPalette(palette))
    }

    /// Switches to a palette outside the built-in set, such as one offered by
    /// export discovery. Same color rules as [`Self::set_palette`].
    pub fn set_custom_palette(&mut self, palette: ColorPalette) -> ChartResult<()> {
        self.dispatch(SessionAction::SetPalette(palette))
    }

    pub fn set_axis_titles(&mut self, titles: AxisTitleOverrides) -> ChartResult<()> {
        self.dispatch(SessionAction::SetAxisTitles(titles))
    }

    pub fn set_export_config(&mut self, config: ExportConfig) -> ChartResult<()> {
        self.dispatch(SessionAction::SetExportConfig(config))
    }

    /// Reassignment choices for the series at `index`, from live state.
    pub fn available_columns_for(&self, index: usize) -> ChartResult<Vec<String>> {
        self.state
            .binding
            .available_columns_for(&self.state.catalog, index)
    }

    #[must_use]
    pub fn available_columns_for_new_series(&self) -> Vec<String> {
        self.state
            .binding
            .available_columns_for_new_series(&self.state.catalog)
    }

    /// Current specification, rebuilding first if a mutation left it stale.
    pub fn specification(&mut self) -> Arc<ChartSpecification> {
        if self.stale {
            self.rebuild_specification();
        }
        Arc::clone(&self.specification)
    }

    /// Cached specification, only when it reflects the latest state.
    #[must_use]
    pub fn current_specification(&self) -> Option<&Arc<ChartSpecification>> {
        (!self.stale).then_some(&self.specification)
    }

    #[must_use]
    pub fn is_specification_current(&self) -> bool {
        !self.stale
    }

    /// Number of completed specification rebuilds.
    #[must_use]
    pub fn specification_generation(&self) -> u64 {
        self.generation
    }

    /// Payload for the chart-generation collaborator.
    #[must_use]
    pub fn generation_payload(&self) -> ChartGenerationPayload {
        ChartGenerationPayload::from_state(&self.state)
    }

    /// Validates the session's export config against a fresh specification.
    ///
    /// The returned request is an immutable snapshot; dispatch it (and retry
    /// it on failure) through the coordinator without touching the session.
    pub fn prepare_export<B: ExportBackend>(
        &mut self,
        coordinator: &ExportCoordinator<B>,
    ) -> ChartResult<ExportRequest> {
        let specification = self.specification();
        coordinator.prepare(specification, &self.state.export)
    }

    /// Registers an observer with a unique identifier.
    pub fn register_observer(&mut self, observer: Box<dyn SessionObserver>) -> ChartResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(ChartError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.has_observer(&observer_id) {
            return Err(ChartError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        if let Some(position) = self
            .observers
            .iter()
            .position(|entry| entry.id() == observer_id)
        {
            self.observers.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.observers
            .iter()
            .any(|observer| observer.id() == observer_id)
    }

    #[must_use]
    pub fn context(&self) -> SessionContext {
        SessionContext {
            columns_len: self.state.catalog.len(),
            rows_len: self.state.rows().len(),
            x_bound: self.state.binding.x_column().is_some(),
            series_len: self.state.binding.series_len(),
            chart_type: self.state.chart_type,
            specification_generation: self.generation,
            specification_current: !self.stale,
        }
    }

    fn rebuild_specification(&mut self) {
        let specification = self.state.specification();
        self.generation += 1;
        self.stale = false;
        debug!(
            generation = self.generation,
            series = specification.series_len(),
            "rebuilt chart specification"
        );
        let series_len = specification.series_len();
        self.specification = Arc::new(specification);
        self.emit_event(SessionEvent::SpecificationRebuilt {
            generation: self.generation,
            series_len,
        });
    }

    fn emit_event(&mut self, event: SessionEvent) {
        let context = self.context();
        for observer in &mut self.observers {
            observer.on_event(&event, context);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChangeKind {
    Dataset,
    Catalog,
    Binding,
    ChartType,
    Palette,
    AxisTitles,
    ExportConfig,
}

impl ChangeKind {
    fn of(action: &SessionAction) -> Self {
        match action {
            SessionAction::LoadDataset { .. } => Self::Dataset,
            SessionAction::ReplaceCatalog(_) => Self::Catalog,
            SessionAction::SetChartType(_) => Self::ChartType,
            SessionAction::SetPalette(_) => Self::Palette,
            SessionAction::SetAxisTitles(_) => Self::AxisTitles,
            SessionAction::SetExportConfig(_) => Self::ExportConfig,
            SessionAction::SetX(_)
            | SessionAction::ClearX
            | SessionAction::AddSeries { .. }
            | SessionAction::AddNextSeries
            | SessionAction::RemoveSeries(_)
            | SessionAction::ReassignSeries { .. }
            | SessionAction::RelabelSeries { .. }
            | SessionAction::RecolorSeries { .. } => Self::Binding,
        }
    }
}

fn describe_change(before: &SessionState, after: &SessionState, kind: ChangeKind) -> SessionEvent {
    match kind {
        ChangeKind::Dataset => SessionEvent::DatasetLoaded {
            columns_len: after.catalog.len(),
            rows_len: after.rows().len(),
        },
        ChangeKind::Catalog => {
            let dropped = dropped_columns(&before.binding, &after.binding);
            if !dropped.is_empty() {
                warn!(?dropped, "catalog replacement dropped bindings");
            }
            SessionEvent::CatalogReplaced { dropped }
        }
        ChangeKind::ChartType => SessionEvent::ChartTypeChanged {
            chart_type: after.chart_type,
        },
        ChangeKind::Palette => SessionEvent::PaletteChanged {
            palette: after.palette.name().to_owned(),
        },
        ChangeKind::AxisTitles => SessionEvent::AxisTitlesChanged,
        ChangeKind::ExportConfig => SessionEvent::ExportConfigChanged,
        ChangeKind::Binding => SessionEvent::BindingChanged {
            x_bound: after.binding.x_column().is_some(),
            series_len: after.binding.series_len(),
        },
    }
}

fn dropped_columns(before: &AxisBinding, after: &AxisBinding) -> Vec<String> {
    before
        .x_column()
        .into_iter()
        .chain(before.series().iter().map(|series| series.column.as_str()))
        .filter(|column| after.role_of(column).is_none())
        .map(str::to_owned)
        .collect()
}
