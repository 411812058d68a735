#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod color;
pub mod meter;
pub mod mock;
pub mod peak;
pub mod renderer;
pub mod strip;

pub use color::{volume_color, OFF, PEAK_COLOR};
pub use meter::{run, SoundMeter};
pub use peak::PeakTracker;
pub use renderer::MeterRenderer;
pub use smart_leds::RGB8;
pub use strip::{LogicalStrip, PixelSink};
