/// Peak-hold marker with a one-pixel-per-cycle fall.
///
/// The marker snaps up immediately whenever the live bar reaches or
/// passes it, then drifts back down one logical pixel per update while
/// the bar sits below it. Because it only ever snaps to the bar height
/// or decays from above, the marker never sits below the live bar.
///
/// The marker is confined to `0..=top`, where `top` is the last logical
/// pixel of the strip. A bar that covers the whole strip therefore
/// parks the marker on the top pixel.
pub struct PeakTracker {
    level: usize,
    top: usize,
}

impl PeakTracker {
    /// Tracker for a strip of `strip_len` logical pixels.
    pub fn new(strip_len: usize) -> Self {
        assert!(strip_len > 0, "peak tracker needs at least one pixel");
        Self {
            level: 0,
            top: strip_len - 1,
        }
    }

    /// Current marker position.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Advance one cycle against the live bar height and return the new
    /// marker position.
    pub fn update(&mut self, count: usize) -> usize {
        if count >= self.level {
            self.level = count.min(self.top);
        } else if self.level > 0 {
            self.level -= 1;
        }
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_the_bottom() {
        assert_eq!(PeakTracker::new(26).level(), 0);
    }

    #[test]
    fn snaps_up_immediately() {
        let mut peak = PeakTracker::new(26);
        assert_eq!(peak.update(14), 14);
        assert_eq!(peak.update(20), 20);
    }

    #[test]
    fn full_bar_parks_the_marker_on_the_top_pixel() {
        let mut peak = PeakTracker::new(26);
        assert_eq!(peak.update(26), 25);
    }

    #[test]
    fn holds_when_the_bar_matches() {
        let mut peak = PeakTracker::new(26);
        peak.update(12);
        assert_eq!(peak.update(12), 12, "equal bar height must not decay");
    }

    #[test]
    fn falls_one_pixel_per_quiet_cycle() {
        let mut peak = PeakTracker::new(26);
        peak.update(20);
        for expected in (14..20).rev() {
            assert_eq!(peak.update(0), expected);
        }
    }

    #[test]
    fn never_falls_below_zero() {
        let mut peak = PeakTracker::new(26);
        peak.update(1);
        assert_eq!(peak.update(0), 0);
        assert_eq!(peak.update(0), 0);
    }

    #[test]
    fn never_sits_below_the_live_bar() {
        let mut peak = PeakTracker::new(26);
        let counts = [0, 26, 0, 0, 5, 19, 3, 3, 26, 26, 1, 0];
        for &count in counts.iter() {
            let level = peak.update(count);
            assert!(
                level >= count.min(25),
                "marker {} below bar {}",
                level,
                count
            );
            assert!(level <= 25, "marker {} above the strip", level);
        }
    }

    #[test]
    #[should_panic(expected = "at least one pixel")]
    fn rejects_an_empty_strip() {
        PeakTracker::new(0);
    }
}
