use d3rs::scale::{LinearScale, Scale as D3Scale};

/// Linear mapping from a data domain to a pixel range.
#[derive(Clone)]
pub struct ChartScale(LinearScale);

impl ChartScale {
    /// A zero-width domain is widened by half a unit on each side.
    pub fn new_linear(domain: (f64, f64), range: (f32, f32)) -> Self {
        let mut d_min = domain.0;
        let mut d_max = domain.1;
        if (d_max - d_min).abs() < f64::EPSILON {
            d_min -= 0.5;
            d_max += 0.5;
        }
        let scale = LinearScale::new()
            .domain(d_min, d_max)
            .range(range.0 as f64, range.1 as f64);
        Self(scale)
    }

    fn inner(&self) -> &LinearScale {
        &self.0
    }

    pub fn map(&self, value: f64) -> f32 {
        let res = self.inner().scale(value) as f32;
        if res.is_nan() || res.is_infinite() {
            0.0
        } else {
            res
        }
    }

    pub fn invert(&self, pixel: f32) -> f64 {
        self.inner().invert(pixel as f64).unwrap_or(0.0)
    }

    pub fn range(&self) -> (f32, f32) {
        let s = self.inner();
        (s.range().0 as f32, s.range().1 as f32)
    }

    pub fn domain(&self) -> (f64, f64) {
        let s = self.inner();
        (s.domain().0, s.domain().1)
    }

    /// Roughly `count` evenly spaced round values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        self.inner().ticks(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_and_inverts() {
        let scale = ChartScale::new_linear((0.0, 100.0), (0.0, 200.0));
        assert_eq!(scale.map(25.0), 50.0);
        assert_eq!(scale.invert(50.0), 25.0);
    }

    #[test]
    fn inverted_pixel_range() {
        let scale = ChartScale::new_linear((0.0, 10.0), (100.0, 0.0));
        assert_eq!(scale.map(10.0), 0.0);
        assert_eq!(scale.map(0.0), 100.0);
        assert_eq!(scale.range(), (100.0, 0.0));
    }

    #[test]
    fn flat_domain_is_widened() {
        let scale = ChartScale::new_linear((5.0, 5.0), (0.0, 10.0));
        assert_eq!(scale.domain(), (4.5, 5.5));
        assert_eq!(scale.map(5.0), 5.0);
    }

    #[test]
    fn ticks_are_round() {
        let scale = ChartScale::new_linear((0.0, 100.0), (0.0, 1.0));
        assert_eq!(scale.ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }
}
