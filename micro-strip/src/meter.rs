use core::convert::Infallible;

use micro_level::{block_rms, calibrate, scale_to_pixels, Calibration, SampleSource, ScaleCurve};

#[cfg(feature = "logging")]
use defmt::{info, trace};
#[cfg(feature = "logging")]
use defmt_rtt as _;

use crate::renderer::MeterRenderer;
use crate::strip::{LogicalStrip, PixelSink};

/// The complete meter pipeline: calibrated loudness in, committed LED
/// frames out.
///
/// One `step` handles one sample block. The block's loudness is mapped
/// through the stored calibration and curve onto `0..=len` lit pixels,
/// the frame is staged, and both segments are committed.
pub struct SoundMeter {
    calibration: Calibration,
    curve: ScaleCurve,
    renderer: MeterRenderer,
    out_max: usize,
}

impl SoundMeter {
    /// Meter over a strip of `strip_len` logical pixels.
    pub fn new(calibration: Calibration, strip_len: usize) -> Self {
        Self {
            calibration,
            curve: ScaleCurve::default(),
            renderer: MeterRenderer::new(strip_len),
            out_max: strip_len,
        }
    }

    /// Replace the default response curve.
    pub fn with_curve(mut self, curve: ScaleCurve) -> Self {
        self.curve = curve;
        self
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Current peak marker position.
    pub fn peak(&self) -> usize {
        self.renderer.peak()
    }

    /// Loudness and pixel count for one block, without touching the strip.
    pub fn measure(&self, samples: &[u16]) -> (f32, usize) {
        let loudness = block_rms(samples);
        let count = scale_to_pixels(loudness, &self.calibration, &self.curve, self.out_max);
        (loudness, count)
    }

    /// Process one block: measure, stage the frame, commit both segments.
    pub fn step<A, B>(
        &mut self,
        samples: &[u16],
        strip: &mut LogicalStrip<A, B>,
    ) -> Result<usize, A::Error>
    where
        A: PixelSink,
        B: PixelSink<Error = A::Error>,
    {
        let (loudness, count) = self.measure(samples);
        #[cfg(feature = "logging")]
        trace!("loudness {} -> {} px", loudness, count);
        #[cfg(feature = "std")]
        std::println!("loudness {:>7.1} -> {} px", loudness, count);
        self.renderer.render(strip, count);
        strip.show()?;
        Ok(count)
    }
}

/// Calibrate against one block of ambient sound, then meter forever.
///
/// The first recorded block sets the floor and ceiling for the whole
/// session, so the room should be quiet when this is called. The loop
/// only returns if a segment commit fails; with infallible sinks it
/// never returns.
pub fn run<S, A, B>(
    source: &mut S,
    strip: &mut LogicalStrip<A, B>,
    block: &mut [u16],
) -> Result<Infallible, A::Error>
where
    S: SampleSource,
    A: PixelSink,
    B: PixelSink<Error = A::Error>,
{
    let calibration = calibrate(source, block);
    #[cfg(feature = "logging")]
    info!(
        "calibrated: floor {} ceiling {}",
        calibration.floor, calibration.ceiling
    );
    #[cfg(feature = "std")]
    std::println!(
        "calibrated: floor {:.1} ceiling {:.1}",
        calibration.floor,
        calibration.ceiling
    );

    let mut meter = SoundMeter::new(calibration, strip.len());
    loop {
        source.record(block);
        meter.step(block, strip)?;
    }
}
