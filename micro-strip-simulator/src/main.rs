use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Circle, PrimitiveStyle},
};
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use micro_level::{calibrate, SampleSource};
use micro_strip::{LogicalStrip, PixelSink, SoundMeter, RGB8};
use std::{thread, time::Duration};

// Constants for visualization parameters
pub const WIDTH: u32 = 340;
pub const HEIGHT: u32 = 240;
pub const FRAME_DELAY_MS: u64 = 16;

const NUM_PIXELS: usize = 10;
const NUM_PIXELS2: usize = 16;
const NUM_SAMPLES: usize = 160;
const SAMPLE_RATE_HZ: f32 = 16_000.0;

const TONE_HZ: f32 = 250.0;
const MIDPOINT: f32 = 32_768.0;
const SILENT_LEAD_SECS: f32 = 0.5;

const DOT_DIAMETER: u32 = 14;
const BLACK: Rgb888 = Rgb888::new(0, 0, 0);

/// One on-screen LED ring backed by a pixel buffer.
///
/// Staged colors only become visible on `show`, like the hardware rings
/// this stands in for. Pixel 0 sits at the top of the ring and the
/// indices run clockwise.
struct RingSink<const N: usize> {
    staged: [RGB8; N],
    visible: [RGB8; N],
    center: Point,
    radius: f32,
}

impl<const N: usize> RingSink<N> {
    fn new(center: Point, radius: f32) -> Self {
        let off = RGB8 { r: 0, g: 0, b: 0 };
        Self {
            staged: [off; N],
            visible: [off; N],
            center,
            radius,
        }
    }

    fn draw_to<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        for (i, &color) in self.visible.iter().enumerate() {
            let angle = (i as f32 / N as f32) * 2.0 * core::f32::consts::PI
                - core::f32::consts::FRAC_PI_2;
            let x = self.center.x as f32 + self.radius * angle.cos();
            let y = self.center.y as f32 + self.radius * angle.sin();
            Circle::with_center(Point::new(x as i32, y as i32), DOT_DIAMETER)
                .into_styled(PrimitiveStyle::with_fill(Rgb888::new(
                    color.r, color.g, color.b,
                )))
                .draw(display)?;
        }
        Ok(())
    }
}

impl<const N: usize> PixelSink for RingSink<N> {
    type Error = Infallible;

    fn len(&self) -> usize {
        N
    }

    fn set(&mut self, index: usize, color: RGB8) {
        self.staged[index] = color;
    }

    fn fill(&mut self, color: RGB8) {
        self.staged = [color; N];
    }

    fn show(&mut self) -> Result<(), Infallible> {
        self.visible = self.staged;
        Ok(())
    }
}

/// Synthetic microphone: half a second of silence for calibration, then
/// a tone whose amplitude slowly swells and fades forever.
struct SwellSource {
    clock: f32,
}

impl SwellSource {
    fn new() -> Self {
        Self { clock: 0.0 }
    }

    fn amplitude(&self) -> f32 {
        if self.clock < SILENT_LEAD_SECS {
            0.0
        } else {
            ((self.clock - SILENT_LEAD_SECS) * 0.6).sin().abs() * 800.0
        }
    }
}

impl SampleSource for SwellSource {
    fn record(&mut self, block: &mut [u16]) {
        let amplitude = self.amplitude();
        for (i, slot) in block.iter_mut().enumerate() {
            let t = self.clock + i as f32 / SAMPLE_RATE_HZ;
            let phase = TONE_HZ * t * 2.0 * core::f32::consts::PI;
            *slot = (MIDPOINT + amplitude * phase.sin()) as u16;
        }
        self.clock += block.len() as f32 / SAMPLE_RATE_HZ;
    }
}

fn main() -> Result<(), Infallible> {
    let mut display: SimulatorDisplay<Rgb888> = SimulatorDisplay::new(Size::new(WIDTH, HEIGHT));

    let mut window = Window::new(
        "MicroStrip Simulator",
        &OutputSettingsBuilder::new().scale(2).build(),
    );

    let mut strip = LogicalStrip::new(
        RingSink::<NUM_PIXELS>::new(Point::new(90, 120), 52.0),
        RingSink::<NUM_PIXELS2>::new(Point::new(250, 120), 72.0),
    );
    let mut source = SwellSource::new();
    let mut block = [0u16; NUM_SAMPLES];

    // The source starts silent, so this hears the quiet room it expects.
    let calibration = calibrate(&mut source, &mut block);
    println!(
        "calibrated: floor {:.1} ceiling {:.1}",
        calibration.floor, calibration.ceiling
    );

    let mut meter = SoundMeter::new(calibration, strip.len());

    loop {
        source.record(&mut block);
        let count = meter.step(&block, &mut strip)?;

        display.clear(BLACK)?;
        strip.front().draw_to(&mut display)?;
        strip.back().draw_to(&mut display)?;
        window.update(&display);

        if count == strip.len() {
            println!("meter pinned at full scale, peak at {}", meter.peak());
        }

        thread::sleep(Duration::from_millis(FRAME_DELAY_MS));

        if let Some(event) = window.events().next() {
            if let SimulatorEvent::Quit = event {
                break;
            }
        }
    }

    Ok(())
}
