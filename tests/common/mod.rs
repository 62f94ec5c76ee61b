#![allow(dead_code)]

use gpui_price_chart::data_types::{
    Bar, IndicatorPoint, IndicatorSeries, IndicatorSet, Marker, ScaleId, ScaleMargins,
};
use gpui_price_chart::surface::{
    ChartSurface, HostContainer, ResizeRegistration, SeriesData, SeriesId, SeriesSpec,
    SurfaceOptions, WidthListener,
};
use gpui_price_chart::{ChartConfig, ChartError, ChartResult};
use std::cell::{Cell, Ref, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::{Rc, Weak};

/// Everything the fakes observed.
#[derive(Debug, Default)]
pub struct Recorder {
    pub surfaces_created: usize,
    pub surfaces_removed: usize,
    pub live_surfaces: usize,
    pub max_live_surfaces: usize,
    pub series_added: usize,
    pub series_removed: usize,
    /// Series still attached to a surface when it was removed.
    pub orphaned: usize,
    pub width_updates: Vec<f32>,
    pub fits: usize,
    pub observers_connected: usize,
    pub observers_disconnected: usize,
    pub active: BTreeMap<u64, (SeriesSpec, SeriesData)>,
    pub scales: BTreeMap<ScaleId, ScaleMargins>,
    pub markers: Vec<Marker>,
    /// Titles whose `set_data` fails.
    pub fail_titles: BTreeSet<String>,
    pub refuse_surfaces: bool,
    next_series: u64,
}

impl Recorder {
    pub fn active_titles(&self) -> Vec<String> {
        self.active.values().map(|(spec, _)| spec.title.clone()).collect()
    }

    pub fn series_titled(&self, title: &str) -> Option<&(SeriesSpec, SeriesData)> {
        self.active.values().find(|(spec, _)| spec.title == title)
    }
}

type Listeners = Rc<RefCell<BTreeMap<u64, WidthListener>>>;

/// Host container fake that records every call made through it.
#[derive(Clone)]
pub struct RecordingContainer {
    pub log: Rc<RefCell<Recorder>>,
    width: Rc<Cell<f32>>,
    attached: Rc<Cell<bool>>,
    listeners: Listeners,
    next_listener: Rc<Cell<u64>>,
}

impl RecordingContainer {
    pub fn new(width: f32) -> Self {
        Self {
            log: Rc::new(RefCell::new(Recorder::default())),
            width: Rc::new(Cell::new(width)),
            attached: Rc::new(Cell::new(true)),
            listeners: Rc::new(RefCell::new(BTreeMap::new())),
            next_listener: Rc::new(Cell::new(1)),
        }
    }

    pub fn log(&self) -> Ref<'_, Recorder> {
        self.log.borrow()
    }

    pub fn fail_series(&self, title: &str) {
        self.log.borrow_mut().fail_titles.insert(title.to_string());
    }

    pub fn refuse_surfaces(&self) {
        self.log.borrow_mut().refuse_surfaces = true;
    }

    pub fn set_attached(&self, attached: bool) {
        self.attached.set(attached);
    }

    /// Simulates the host element changing width.
    pub fn resize(&self, width: f32) {
        self.width.set(width);
        for listener in self.listeners.borrow_mut().values_mut() {
            listener(width);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl HostContainer for RecordingContainer {
    fn is_attached(&self) -> bool {
        self.attached.get()
    }

    fn client_width(&self) -> f32 {
        self.width.get()
    }

    fn create_surface(&self, _options: SurfaceOptions) -> ChartResult<Box<dyn ChartSurface>> {
        let mut log = self.log.borrow_mut();
        if log.refuse_surfaces {
            return Err(ChartError::SurfaceUnavailable("refused by test".into()));
        }
        log.surfaces_created += 1;
        log.live_surfaces += 1;
        log.max_live_surfaces = log.max_live_surfaces.max(log.live_surfaces);
        Ok(Box::new(RecordingSurface {
            log: self.log.clone(),
            own: BTreeSet::new(),
            removed: false,
        }))
    }

    fn observe_resize(&self, listener: WidthListener) -> ChartResult<Box<dyn ResizeRegistration>> {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().insert(id, listener);
        self.log.borrow_mut().observers_connected += 1;
        Ok(Box::new(RecordingRegistration {
            listeners: Rc::downgrade(&self.listeners),
            log: self.log.clone(),
            id,
        }))
    }
}

struct RecordingRegistration {
    listeners: Weak<RefCell<BTreeMap<u64, WidthListener>>>,
    log: Rc<RefCell<Recorder>>,
    id: u64,
}

impl ResizeRegistration for RecordingRegistration {
    fn disconnect(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            if listeners.borrow_mut().remove(&self.id).is_some() {
                self.log.borrow_mut().observers_disconnected += 1;
            }
        }
    }
}

pub struct RecordingSurface {
    log: Rc<RefCell<Recorder>>,
    own: BTreeSet<u64>,
    removed: bool,
}

impl ChartSurface for RecordingSurface {
    fn add_series(&mut self, spec: SeriesSpec) -> ChartResult<SeriesId> {
        let mut log = self.log.borrow_mut();
        log.next_series += 1;
        let id = log.next_series;
        log.series_added += 1;
        log.active.insert(id, (spec, SeriesData::Values(vec![])));
        self.own.insert(id);
        Ok(SeriesId(id))
    }

    fn set_data(&mut self, id: SeriesId, data: SeriesData) -> ChartResult<()> {
        let mut log = self.log.borrow_mut();
        let fail = match log.active.get(&id.0) {
            Some((spec, _)) => log.fail_titles.contains(&spec.title),
            None => return Err(ChartError::UnknownSeries(id.0)),
        };
        if fail {
            return Err(ChartError::SurfaceUnavailable("injected failure".into()));
        }
        if let Some(entry) = log.active.get_mut(&id.0) {
            entry.1 = data;
        }
        Ok(())
    }

    fn remove_series(&mut self, id: SeriesId) -> ChartResult<()> {
        let mut log = self.log.borrow_mut();
        if log.active.remove(&id.0).is_none() {
            return Err(ChartError::UnknownSeries(id.0));
        }
        log.series_removed += 1;
        self.own.remove(&id.0);
        Ok(())
    }

    fn configure_scale(&mut self, scale: &ScaleId, margins: ScaleMargins) {
        self.log.borrow_mut().scales.insert(scale.clone(), margins);
    }

    fn set_markers(&mut self, _id: SeriesId, markers: Vec<Marker>) -> ChartResult<()> {
        self.log.borrow_mut().markers = markers;
        Ok(())
    }

    fn fit_content(&mut self) {
        self.log.borrow_mut().fits += 1;
    }

    fn apply_width(&mut self, width: f32) {
        self.log.borrow_mut().width_updates.push(width);
    }

    fn remove(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;
        let mut log = self.log.borrow_mut();
        log.surfaces_removed += 1;
        log.live_surfaces -= 1;
        log.orphaned += self.own.len();
        for id in std::mem::take(&mut self.own) {
            log.active.remove(&id);
        }
        log.scales.clear();
    }
}

pub fn bars(count: usize) -> Vec<Bar> {
    (0..count)
        .map(|i| {
            let base = 100.0 + i as f64;
            Bar::new(1_700_000_000 + i as i64 * 60, base, base + 2.0, base - 2.0, base + 1.0)
                .with_volume(1_000.0 + i as f64)
        })
        .collect()
}

pub fn value_series(count: usize, value: f64) -> IndicatorSeries {
    IndicatorSeries::new(
        (0..count)
            .map(|i| IndicatorPoint::value(1_700_000_000 + i as i64 * 60, value + i as f64))
            .collect(),
    )
}

pub fn config_with(kinds: &[&str]) -> ChartConfig {
    let mut indicators = IndicatorSet::new();
    for kind in kinds {
        let series = match *kind {
            "bollinger" => IndicatorSeries::new(
                (0..5i64)
                    .map(|i| IndicatorPoint::band(1_700_000_000 + i * 60, 110.0, 90.0))
                    .collect(),
            ),
            "rsi" => value_series(5, 50.0),
            "macd" => value_series(5, -2.0),
            _ => value_series(5, 100.0).with_period(20),
        };
        indicators = indicators.with(*kind, series);
    }
    ChartConfig::new(bars(5), indicators, vec![], 400)
}
