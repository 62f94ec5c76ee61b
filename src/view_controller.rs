use crate::data_types::AxisRange;

/// ViewController handles the maths of viewport interactions (zoom, pan,
/// fitting) independently of the GPUI infrastructure to facilitate testing.
pub struct ViewController;

impl ViewController {
    /// Calculates and applies a pan on an axis based on a pixel delta.
    pub fn pan_axis(range: &mut AxisRange, delta_pixels: f32, total_pixels: f32, is_y: bool) {
        if total_pixels <= 0.0 {
            return;
        }
        let ratio = range.span() / total_pixels as f64;

        // Dragging right pulls earlier data into view, so X values decrease.
        let delta_data = if is_y {
            delta_pixels as f64 * ratio
        } else {
            -delta_pixels as f64 * ratio
        };

        range.pan(delta_data);
        range.clamp();
    }

    /// Zooms on an axis at a pivot expressed as a fraction of the domain.
    pub fn zoom_axis_at(range: &mut AxisRange, pivot_pct: f64, factor: f64) {
        const MIN_SPAN: f64 = 1e-9;
        if range.span() <= 0.0 {
            return;
        }
        let factor = if range.span() * factor < MIN_SPAN {
            MIN_SPAN / range.span()
        } else {
            factor
        };

        let pivot_data = range.min + range.span() * pivot_pct;
        range.zoom_at(pivot_data, pivot_pct, factor);
        range.clamp();
    }

    /// New bounds for an auto-fit with a relative margin.
    pub fn compute_auto_fit(min: f64, max: f64, margin_pct: f64) -> (f64, f64) {
        if !min.is_finite() || !max.is_finite() {
            return (0.0, 100.0);
        }

        let span = if (max - min).abs() < f64::EPSILON {
            1.0
        } else {
            max - min
        };

        (min - span * margin_pct, max + span * margin_pct)
    }

    /// Zoom factor for a scroll delta; scrolling up zooms in.
    pub fn compute_zoom_factor(delta: f32, sensitivity: f32) -> f64 {
        let factor = 1.0 + (delta.abs() / sensitivity) as f64;
        if delta > 0.0 {
            1.0 / factor
        } else {
            factor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pan_axis_x() {
        let mut range = AxisRange::new(0.0, 100.0);
        ViewController::pan_axis(&mut range, 10.0, 100.0, false);
        assert_eq!(range.min, -10.0);
        assert_eq!(range.max, 90.0);
    }

    #[test]
    fn zoom_axis_at_center() {
        let mut range = AxisRange::new(0.0, 100.0);
        ViewController::zoom_axis_at(&mut range, 0.5, 0.5);
        assert_eq!(range.min, 25.0);
        assert_eq!(range.max, 75.0);
    }

    #[test]
    fn auto_fit_margin() {
        assert_eq!(ViewController::compute_auto_fit(10.0, 20.0, 0.1), (9.0, 21.0));
        assert_eq!(ViewController::compute_auto_fit(5.0, 5.0, 0.5), (4.5, 5.5));
    }

    #[test]
    fn zoom_factor_direction() {
        assert!(ViewController::compute_zoom_factor(10.0, 100.0) < 1.0);
        assert!(ViewController::compute_zoom_factor(-10.0, 100.0) > 1.0);
    }
}
