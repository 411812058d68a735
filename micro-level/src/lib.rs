#![no_std]

#[allow(unused_imports)]
use micromath::F32Ext;

/// Margin added above the ambient loudness when deriving the input floor.
pub const FLOOR_MARGIN: f32 = 10.0;

/// Distance between the derived input floor and ceiling.
pub const CEILING_SPAN: f32 = 500.0;

/// Default curvature for the loudness-to-pixel response.
pub const CURVE: f32 = 2.0;

/// Blocking producer of unsigned 16-bit sample blocks.
///
/// `record` must fill the whole buffer with freshly captured samples
/// before returning. Implementations decide where the samples come from:
/// a PDM microphone, an I2S DMA stream, or a test script.
pub trait SampleSource {
    fn record(&mut self, block: &mut [u16]);
}

/// DC-corrected RMS loudness of one sample block.
///
/// The block mean is truncated to an integer and subtracted from every
/// sample before squaring, so a microphone bias offset does not register
/// as loudness. A block of identical samples therefore measures exactly
/// zero.
pub fn block_rms(samples: &[u16]) -> f32 {
    assert!(!samples.is_empty(), "sample block must not be empty");
    let mut sum = 0.0f32;
    for &sample in samples {
        sum += sample as f32;
    }
    let dc = (sum / samples.len() as f32) as i32;
    let mut energy = 0.0f32;
    for &sample in samples {
        let diff = (sample as i32 - dc) as f32;
        energy += diff * diff;
    }
    (energy / samples.len() as f32).sqrt()
}

/// Input range of the meter, fixed for the life of the session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Calibration {
    /// Loudness mapped to an empty bar.
    pub floor: f32,
    /// Loudness mapped to a full bar.
    pub ceiling: f32,
}

impl Calibration {
    /// Range anchored to a measured ambient loudness.
    pub fn from_ambient_rms(rms: f32) -> Self {
        Self::new(rms + FLOOR_MARGIN, rms + FLOOR_MARGIN + CEILING_SPAN)
    }

    /// Range anchored to a hard-coded floor, for rooms where quiet
    /// startup cannot be assumed.
    pub fn fixed(floor: f32) -> Self {
        Self::new(floor, floor + CEILING_SPAN)
    }

    /// Explicit range. The ceiling must sit above the floor.
    pub fn new(floor: f32, ceiling: f32) -> Self {
        assert!(ceiling > floor, "calibration ceiling must exceed the floor");
        Self { floor, ceiling }
    }

    /// Width of the usable input range.
    pub fn span(&self) -> f32 {
        self.ceiling - self.floor
    }
}

/// Record one block of ambient sound and derive the session range from it.
pub fn calibrate<S: SampleSource>(source: &mut S, block: &mut [u16]) -> Calibration {
    source.record(block);
    Calibration::from_ambient_rms(block_rms(block))
}

/// Exponential response curve for the loudness-to-pixel mapping.
///
/// The curve value feeds the exponent `10^(curve * -0.1)` applied to the
/// normalized loudness. Positive values expand the low end so small
/// sounds already light pixels, zero is linear, negative values compress
/// the low end.
#[derive(Clone, Copy, Debug)]
pub struct ScaleCurve {
    exponent: f32,
}

impl ScaleCurve {
    pub fn new(curve: f32) -> Self {
        Self {
            exponent: 10.0f32.powf(curve * -0.1),
        }
    }

    /// The exponent actually applied to the normalized loudness.
    pub fn exponent(&self) -> f32 {
        self.exponent
    }

    fn apply(&self, t: f32) -> f32 {
        t.powf(self.exponent)
    }
}

impl Default for ScaleCurve {
    fn default() -> Self {
        Self::new(CURVE)
    }
}

/// Map a loudness value onto `0..=out_max` lit pixels.
///
/// The value is clamped into the calibrated range first, so anything at
/// or below the floor yields 0 and anything at or above the ceiling
/// yields exactly `out_max`. In between, the normalized loudness is bent
/// through `curve` and truncated to a whole pixel count.
pub fn scale_to_pixels(
    value: f32,
    calibration: &Calibration,
    curve: &ScaleCurve,
    out_max: usize,
) -> usize {
    let clamped = value.clamp(calibration.floor, calibration.ceiling);
    let t = (clamped - calibration.floor) / calibration.span();
    if t <= 0.0 {
        return 0;
    }
    if t >= 1.0 {
        return out_max;
    }
    ((curve.apply(t) * out_max as f32) as usize).min(out_max)
}
