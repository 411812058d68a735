use crate::color::{volume_color, OFF, PEAK_COLOR};
use crate::peak::PeakTracker;
use crate::strip::{LogicalStrip, PixelSink};

/// Stages one meter frame per cycle onto a logical strip.
///
/// Each frame clears the strip, paints the bar from the bottom up, and
/// then paints the peak marker on top. The bar sweep stops one short of
/// the strip's last logical pixel, so the very top pixel is reserved for
/// the marker and never carries a bar color.
///
/// The renderer only stages colors. Committing the frame is the
/// caller's job, which keeps one `show` per segment per cycle.
pub struct MeterRenderer {
    peak: PeakTracker,
}

impl MeterRenderer {
    /// Renderer for a strip of `strip_len` logical pixels.
    pub fn new(strip_len: usize) -> Self {
        Self {
            peak: PeakTracker::new(strip_len),
        }
    }

    /// Current peak marker position.
    pub fn peak(&self) -> usize {
        self.peak.level()
    }

    /// Stage the frame for one cycle's pixel count.
    pub fn render<A, B>(&mut self, strip: &mut LogicalStrip<A, B>, count: usize)
    where
        A: PixelSink,
        B: PixelSink<Error = A::Error>,
    {
        strip.fill(OFF);
        for logical in 0..strip.len() - 1 {
            if logical < count {
                let (position, segment_len) = strip.position(logical);
                strip.set(logical, volume_color(position, segment_len));
            }
        }
        let peak = self.peak.update(count);
        if peak > 0 {
            strip.set(peak, PEAK_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSink;

    fn small_strip() -> LogicalStrip<MockSink<2>, MockSink<3>> {
        LogicalStrip::new(MockSink::new(), MockSink::new())
    }

    #[test]
    fn silence_stages_a_dark_frame() {
        let mut strip = small_strip();
        let mut renderer = MeterRenderer::new(strip.len());
        renderer.render(&mut strip, 0);
        assert!(strip.front().staged().iter().all(|&c| c == OFF));
        assert!(strip.back().staged().iter().all(|&c| c == OFF));
    }

    #[test]
    fn full_count_paints_everything_but_the_top_pixel() {
        let mut strip = small_strip();
        let mut renderer = MeterRenderer::new(strip.len());
        renderer.render(&mut strip, 5);

        assert_eq!(strip.front().staged()[0], volume_color(0, 2));
        assert_eq!(strip.front().staged()[1], volume_color(1, 2));
        // Logical 2 and 3 sit at the far end of the reversed back segment.
        assert_eq!(strip.back().staged()[2], volume_color(2, 3));
        assert_eq!(strip.back().staged()[1], volume_color(1, 3));
        // The top pixel carries the peak marker, never a bar color.
        assert_eq!(strip.back().staged()[0], PEAK_COLOR);
    }

    #[test]
    fn the_bar_restarts_its_green_ramp_on_the_back_segment() {
        let mut strip = small_strip();
        let mut renderer = MeterRenderer::new(strip.len());
        renderer.render(&mut strip, 4);
        assert_eq!(strip.front().staged()[1].g, 127);
        assert_eq!(strip.back().staged()[2].g, 170);
    }

    #[test]
    fn peak_marker_lingers_after_the_bar_drops() {
        let mut strip = small_strip();
        let mut renderer = MeterRenderer::new(strip.len());
        renderer.render(&mut strip, 5);
        renderer.render(&mut strip, 0);

        assert_eq!(renderer.peak(), 3);
        assert_eq!(strip.back().staged()[1], PEAK_COLOR);
        assert!(strip.front().staged().iter().all(|&c| c == OFF));
        assert_eq!(strip.back().staged()[0], OFF);
        assert_eq!(strip.back().staged()[2], OFF);
    }

    #[test]
    fn a_peak_at_zero_is_not_drawn() {
        let mut strip = small_strip();
        let mut renderer = MeterRenderer::new(strip.len());
        renderer.render(&mut strip, 1);
        assert_eq!(renderer.peak(), 1);
        for _ in 0..3 {
            renderer.render(&mut strip, 0);
        }
        assert_eq!(renderer.peak(), 0);
        assert!(strip.front().staged().iter().all(|&c| c == OFF));
    }
}
