//! Chart Session
//!
//! A [`ChartSession`] owns at most one live rendering surface for the
//! current [`ChartConfig`]. Every configuration change tears the previous
//! surface down completely (resize observer, series, surface) before a new
//! one is allocated and rebuilt from scratch, so no series of a previous
//! configuration can survive into the next one.
//!
//! States: `Empty -> Live -> Disposed`, where `Live -> Live` goes through a
//! full teardown and `Disposed` is terminal.

use crate::catalog::{self, SeriesRecipe};
use crate::data_types::{
    CandlestickConfig, ChartConfig, ChartOptions, HistogramConfig, IndicatorKind, IndicatorSeries,
    Marker, ScaleId, SeriesStyle, ValueField,
};
use crate::errors::{ChartError, ChartResult};
use crate::markers::{self, MarkerStyle};
use crate::partition::{self, ScaleLayout};
use crate::resize::ResizeCoordinator;
use crate::series_data;
use crate::surface::{
    HostContainer, SeriesData, SeriesId, SeriesSpec, SharedSurface, SurfaceOptions,
};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Role of a series within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeriesKey {
    Primary,
    Volume,
    Indicator(IndicatorKind, ValueField),
}

/// One series the session intends to create.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedSeries {
    pub key: SeriesKey,
    pub spec: SeriesSpec,
    pub data: SeriesData,
}

/// Everything derived from a config before any surface call is made.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionPlan {
    pub layout: ScaleLayout,
    pub primary: PlannedSeries,
    /// Volume and indicator series, in creation order.
    pub secondary: Vec<PlannedSeries>,
    pub markers: Vec<Marker>,
}

impl SessionPlan {
    /// Resolves indicators through the catalog and partitioner. Kinds the
    /// catalog rejects are logged and left out; the rest still render.
    pub fn new(config: &ChartConfig, options: &ChartOptions) -> Self {
        let theme = &options.theme;
        let has_volume = config.has_volume();

        let mut requested: Vec<(SeriesRecipe, &IndicatorSeries)> = Vec::new();
        for (name, series) in config.indicators.requested() {
            match catalog::recipe_for(name) {
                Ok(recipe) => {
                    let overrides = options.style_override(recipe.kind);
                    requested.push((recipe.with_override(overrides), series));
                }
                Err(err) => warn!(kind = name, %err, "skipping indicator series"),
            }
        }
        requested.sort_by_key(|(recipe, _)| recipe.kind);

        let layout = partition::partition(
            requested.iter().map(|(recipe, _)| recipe.kind),
            has_volume,
            &options.layout,
        );

        let primary = PlannedSeries {
            key: SeriesKey::Primary,
            spec: SeriesSpec {
                title: "Price".to_string(),
                scale: ScaleId::PRICE,
                style: SeriesStyle::Candlestick(CandlestickConfig {
                    up_wick_color: theme.up,
                    down_wick_color: theme.down,
                    up_body_color: theme.up,
                    down_body_color: theme.down,
                    ..CandlestickConfig::default()
                }),
            },
            data: SeriesData::Ohlc(series_data::candles(&config.bars)),
        };

        let mut secondary = Vec::new();
        if has_volume {
            secondary.push(PlannedSeries {
                key: SeriesKey::Volume,
                spec: SeriesSpec {
                    title: "Volume".to_string(),
                    scale: ScaleId::VOLUME,
                    style: SeriesStyle::Histogram(HistogramConfig {
                        color: theme.volume_up,
                        ..HistogramConfig::default()
                    }),
                },
                data: SeriesData::Values(series_data::volume_points(&config.bars, theme)),
            });
        }

        for (recipe, series) in &requested {
            let scale = layout
                .scale_for(recipe.kind)
                .cloned()
                .unwrap_or_else(|| recipe.scale_id.clone());
            for field in recipe.fields {
                secondary.push(PlannedSeries {
                    key: SeriesKey::Indicator(recipe.kind, *field),
                    spec: SeriesSpec {
                        title: recipe.title(*field, series.period),
                        scale: scale.clone(),
                        style: recipe.style.clone(),
                    },
                    data: SeriesData::Values(series_data::indicator_points(
                        recipe.kind,
                        series,
                        *field,
                        theme,
                    )),
                });
            }
        }

        let markers = markers::project(&config.signals, &MarkerStyle::from_theme(theme));

        Self {
            layout,
            primary,
            secondary,
            markers,
        }
    }
}

/// One live surface with its series and resize observer.
///
/// Dropping a `LiveSession` disposes it; `dispose` itself is idempotent.
pub struct LiveSession {
    config: ChartConfig,
    surface: SharedSurface,
    series: BTreeMap<SeriesKey, SeriesId>,
    resize: ResizeCoordinator,
    disposed: bool,
}

impl LiveSession {
    /// Allocates a surface in `container` and builds every series of `config`.
    ///
    /// Any early return drops the half-built session, which releases
    /// whatever was already acquired.
    pub fn build<C>(container: &C, config: ChartConfig, options: &ChartOptions) -> ChartResult<Self>
    where
        C: HostContainer + ?Sized,
    {
        let plan = SessionPlan::new(&config, options);
        let surface = container.create_surface(SurfaceOptions {
            width: container.client_width(),
            height: config.height,
            background: options.theme.background,
            fit_padding_bars: options.layout.validated().fit_padding_bars,
        })?;

        let mut live = LiveSession {
            config,
            surface: Rc::new(RefCell::new(surface)),
            series: BTreeMap::new(),
            resize: ResizeCoordinator::new(),
            disposed: false,
        };
        live.resize.attach(container, &live.surface)?;
        live.populate(plan)?;

        info!(
            bars = live.config.bars.len(),
            series = live.series.len(),
            "chart session live"
        );
        Ok(live)
    }

    fn populate(&mut self, plan: SessionPlan) -> ChartResult<()> {
        {
            let mut surface = self.surface.borrow_mut();
            for (scale, margins) in plan.layout.margins() {
                surface.configure_scale(scale, *margins);
            }
        }

        let primary = self.add(plan.primary)?;

        for planned in plan.secondary {
            let key = planned.key;
            if let Err(err) = self.add(planned) {
                warn!(?key, %err, "series construction failed, continuing without it");
            }
        }

        let mut surface = self.surface.borrow_mut();
        if let Err(err) = surface.set_markers(primary, plan.markers) {
            warn!(%err, "markers could not be attached");
        }
        surface.fit_content();
        Ok(())
    }

    fn add(&mut self, planned: PlannedSeries) -> ChartResult<SeriesId> {
        let mut surface = self.surface.borrow_mut();
        let id = surface.add_series(planned.spec)?;
        if let Err(err) = surface.set_data(id, planned.data) {
            if let Err(rollback) = surface.remove_series(id) {
                warn!(key = ?planned.key, %rollback, "could not roll back half-built series");
            }
            return Err(err);
        }
        self.series.insert(planned.key, id);
        Ok(id)
    }

    /// Detaches the resize observer, removes every series, then the surface.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.resize.detach();

        let mut surface = self.surface.borrow_mut();
        for (key, id) in std::mem::take(&mut self.series) {
            if let Err(err) = surface.remove_series(id) {
                warn!(?key, %err, "series already gone during teardown");
            }
        }
        surface.remove();
        debug!("chart session disposed");
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn active_series(&self) -> BTreeSet<SeriesKey> {
        self.series.keys().copied().collect()
    }

    pub fn series_id(&self, key: SeriesKey) -> Option<SeriesId> {
        self.series.get(&key).copied()
    }

    pub fn resize(&self) -> &ResizeCoordinator {
        &self.resize
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Drop for LiveSession {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Empty,
    Live,
    Disposed,
}

enum SessionState {
    Empty,
    Live(LiveSession),
    Disposed,
}

impl SessionState {
    fn phase(&self) -> SessionPhase {
        match self {
            Self::Empty => SessionPhase::Empty,
            Self::Live(_) => SessionPhase::Live,
            Self::Disposed => SessionPhase::Disposed,
        }
    }
}

/// The chart component mounted in one host container.
pub struct ChartSession<C: HostContainer> {
    container: C,
    options: ChartOptions,
    state: SessionState,
    applied: Option<ChartConfig>,
}

impl<C: HostContainer> ChartSession<C> {
    pub fn new(container: C, options: ChartOptions) -> Self {
        Self {
            container,
            options,
            state: SessionState::Empty,
            applied: None,
        }
    }

    /// Applies a configuration, rebuilding the whole surface when it differs
    /// from the last applied one.
    ///
    /// Structural problems (bad height, missing container, no surface) are
    /// returned; problems with single series are only logged.
    pub fn configure(&mut self, config: ChartConfig) -> ChartResult<()> {
        if matches!(self.state, SessionState::Disposed) {
            debug!("ignoring config for an unmounted chart");
            return Ok(());
        }
        let config = config.normalized();
        if config.height == 0 {
            return Err(ChartError::InvalidHeight(config.height));
        }
        if !self.container.is_attached() {
            return Err(ChartError::MissingContainer);
        }
        if self.applied.as_ref() == Some(&config) {
            debug!("config unchanged, keeping current surface");
            return Ok(());
        }

        self.teardown();
        self.applied = None;

        if config.is_empty() {
            debug!("no bars, chart stays empty");
            self.applied = Some(config);
            return Ok(());
        }

        let live = LiveSession::build(&self.container, config.clone(), &self.options)?;
        self.state = SessionState::Live(live);
        self.applied = Some(config);
        Ok(())
    }

    /// Disposes any live surface and leaves the session `Empty`.
    fn teardown(&mut self) {
        if let SessionState::Live(mut live) = std::mem::replace(&mut self.state, SessionState::Disposed) {
            live.dispose();
        }
        self.state = SessionState::Empty;
    }

    /// Terminal teardown; safe to call any number of times.
    pub fn unmount(&mut self) {
        if let SessionState::Live(mut live) = std::mem::replace(&mut self.state, SessionState::Disposed) {
            live.dispose();
            debug!("chart unmounted");
        }
        self.applied = None;
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    pub fn is_live(&self) -> bool {
        self.phase() == SessionPhase::Live
    }

    pub fn live(&self) -> Option<&LiveSession> {
        match &self.state {
            SessionState::Live(live) => Some(live),
            _ => None,
        }
    }

    pub fn active_series(&self) -> BTreeSet<SeriesKey> {
        self.live().map(LiveSession::active_series).unwrap_or_default()
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// Replaces the options; a live chart is rebuilt with them.
    pub fn set_options(&mut self, options: ChartOptions) -> ChartResult<()> {
        self.options = options;
        match self.applied.take() {
            Some(config) => self.configure(config),
            None => Ok(()),
        }
    }
}

impl<C: HostContainer> Drop for ChartSession<C> {
    fn drop(&mut self) {
        self.unmount();
    }
}
