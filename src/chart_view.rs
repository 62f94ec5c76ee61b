// PriceChartView implementation

use crate::data_types::{ChartConfig, ChartOptions};
use crate::errors::ChartResult;
use crate::rendering::{layout_panes, paint_scene, paint_value_labels};
use crate::scene::ChartContainer;
use crate::session::ChartSession;
use crate::theme::ChartTheme;
use crate::utils::PixelsExt;
use crate::view_controller::ViewController;
use gpui::prelude::*;
use gpui::*;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::warn;

const LINE_HEIGHT_PX: f32 = 20.0;
const ZOOM_SENSITIVITY: f32 = 200.0;

/// GPUI view hosting one chart session.
pub struct PriceChartView {
    container: ChartContainer,
    session: ChartSession<ChartContainer>,
    theme: ChartTheme,
    bounds: Rc<RefCell<Bounds<Pixels>>>,
}

impl PriceChartView {
    pub fn new(options: ChartOptions, _cx: &mut Context<Self>) -> Self {
        let container = ChartContainer::new(0.0);
        let theme = options.theme.clone();
        Self {
            session: ChartSession::new(container.clone(), options),
            container,
            theme,
            bounds: Rc::new(RefCell::new(Bounds::default())),
        }
    }

    /// Replaces the chart contents. Errors are logged and returned; the
    /// previous surface is already gone at that point.
    pub fn set_config(&mut self, config: ChartConfig, cx: &mut Context<Self>) -> ChartResult<()> {
        let result = self.session.configure(config);
        if let Err(err) = &result {
            warn!(%err, "chart configuration failed");
        }
        cx.notify();
        result
    }

    pub fn set_options(&mut self, options: ChartOptions, cx: &mut Context<Self>) -> ChartResult<()> {
        self.theme = options.theme.clone();
        let result = self.session.set_options(options);
        cx.notify();
        result
    }

    pub fn session(&self) -> &ChartSession<ChartContainer> {
        &self.session
    }

    pub fn container(&self) -> &ChartContainer {
        &self.container
    }

    /// Height of the live chart, taken from the applied config.
    pub fn chart_height(&self) -> Option<f32> {
        self.container.scene().map(|scene| scene.read().height)
    }

    /// Canvas bounds of the last paint.
    pub fn painted_bounds(&self) -> Bounds<Pixels> {
        *self.bounds.borrow()
    }

    pub fn fit_content(&mut self, cx: &mut Context<Self>) {
        if let Some(scene) = self.container.scene() {
            scene.write().fit_content();
            cx.notify();
        }
    }

    fn handle_scroll(
        &mut self,
        event: &ScrollWheelEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let bounds = *self.bounds.borrow();
        if bounds.is_empty() {
            return;
        }
        let Some(scene) = self.container.scene() else {
            return;
        };

        let (delta_x, delta_y) = match event.delta {
            ScrollDelta::Pixels(p) => (p.x.as_f32(), p.y.as_f32()),
            ScrollDelta::Lines(p) => (p.x * LINE_HEIGHT_PX, p.y * LINE_HEIGHT_PX),
        };
        let is_zoom = event.modifiers.control || event.modifiers.platform;

        let mut scene = scene.write();
        if is_zoom {
            let pivot = (event.position.x - bounds.origin.x).as_f32() as f64
                / bounds.size.width.as_f32() as f64;
            scene.zoom_at(pivot, ViewController::compute_zoom_factor(delta_y, ZOOM_SENSITIVITY));
        } else {
            let delta = if delta_x.abs() > delta_y.abs() {
                delta_x
            } else {
                delta_y
            };
            scene.pan_pixels(delta);
        }
        cx.notify();
    }
}

impl Render for PriceChartView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let scene = self.container.scene();
        let theme = self.theme.clone();
        let bounds_rc = self.bounds.clone();
        let current_bounds = *bounds_rc.borrow();

        let labels = scene
            .as_ref()
            .and_then(|scene| {
                let scene = scene.read();
                let range = scene.time_range.clone()?;
                let panes = layout_panes(&scene, current_bounds, &range);
                Some(paint_value_labels(&panes, current_bounds, theme.label))
            })
            .unwrap_or_default();

        let container = self.container.clone();
        let root = div().w_full();
        let root = match self.chart_height() {
            Some(height) => root.h(px(height)),
            None => root.h_full(),
        };

        root
            .relative()
            .bg(theme.background)
            .on_scroll_wheel(cx.listener(Self::handle_scroll))
            .child(
                canvas(
                    move |bounds, _, _| container.set_width(bounds.size.width.as_f32()),
                    move |bounds, (), window, cx| {
                        *bounds_rc.borrow_mut() = bounds;
                        if let Some(scene) = &scene {
                            let scene = scene.read();
                            paint_scene(window, bounds, &scene, &theme, cx);
                        }
                    },
                )
                .size_full()
                .absolute(),
            )
            .children(labels)
    }
}
