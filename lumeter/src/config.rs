use embassy_time::Duration;

// --- Strip Geometry ---
pub const NUM_PIXELS: usize = 10; // Front ring pixel count
pub const NUM_PIXELS2: usize = 16; // Back ring pixel count
pub const TOT_PIXELS: usize = NUM_PIXELS + NUM_PIXELS2;

// --- Audio Config ---
pub const SAMPLE_RATE_HZ: u32 = 16_000; // I2S sample rate
pub const NUM_SAMPLES: usize = 160; // Samples per meter cycle (10 ms)
pub const MIC_DMA_BYTES: usize = 4096 * 3; // Circular DMA buffer size

// --- LED Config ---
pub const LED_CLOCK_KHZ: u32 = 3_000; // WS2812-over-SPI bit clock
pub const LED_BRIGHTNESS: u8 = 25; // Global cap out of 255

// --- Task Timing ---
pub const RATE_INTERVAL: Duration = Duration::from_secs(1); // Cycle counter window
