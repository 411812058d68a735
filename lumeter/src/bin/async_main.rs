#![no_std]
#![no_main]

use defmt::{info, trace};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_sync::signal::Signal;
use embassy_time::Instant;
use esp_backtrace as _;
use esp_hal::{
    dma_buffers,
    i2s::master::{DataFormat, I2s, Standard},
    spi::{
        master::{Config as SpiConfig, Spi},
        Mode,
    },
    time::Rate,
    timer::{timg::TimerGroup, AnyTimer},
    Blocking,
};
use micro_level::{block_rms, Calibration};
use micro_strip::{LogicalStrip, SoundMeter};
use static_cell::StaticCell;
use ws2812_spi::Ws2812;

use lumeter::config::*;
use lumeter::mic::{microphone_reader, SampleBlockSignal};
use lumeter::pixels::Ws2812Ring;

static SAMPLES_SIGNAL: StaticCell<SampleBlockSignal> = StaticCell::new();

// Type aliases for readability
type RingDriver = Ws2812<Spi<'static, Blocking>>;
type FrontRing = Ws2812Ring<RingDriver, NUM_PIXELS>;
type BackRing = Ws2812Ring<RingDriver, NUM_PIXELS2>;
type MeterStrip = LogicalStrip<FrontRing, BackRing>;

#[embassy_executor::task]
async fn meter_task(signal: &'static SampleBlockSignal, mut strip: MeterStrip) {
    info!("Starting meter_task");

    // The first block heard after boot anchors the session range, so the
    // room should be quiet while the firmware comes up.
    let block = signal.wait().await;
    let calibration = Calibration::from_ambient_rms(block_rms(&block));
    info!(
        "calibrated: floor {} ceiling {}",
        calibration.floor, calibration.ceiling
    );

    let mut meter = SoundMeter::new(calibration, strip.len());
    let mut cycles = 0u32;
    let mut start = Instant::now();

    loop {
        let block = signal.wait().await;
        let count = meter.step(&block, &mut strip).expect("strip commit failed");
        trace!("{} px, peak at {}", count, meter.peak());

        cycles += 1;
        if start.elapsed() > RATE_INTERVAL {
            info!("{} meter cycles in the last interval", cycles);
            cycles = 0;
            start = Instant::now();
        }
    }
}

#[esp_hal_embassy::main]
async fn main(spawner: Spawner) {
    info!("Init!");

    let peripherals = esp_hal::init(esp_hal::Config::default());

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let timer0: AnyTimer = timg0.timer0.into();

    let timg1 = TimerGroup::new(peripherals.TIMG1);
    let timer1: AnyTimer = timg1.timer0.into();

    esp_hal_embassy::init([timer0, timer1]);

    let (rx_buffer, rx_descriptors, _, tx_descriptors) = dma_buffers!(MIC_DMA_BYTES, 0);

    let bclk = peripherals.GPIO4;
    let ws = peripherals.GPIO5;
    let din = peripherals.GPIO6;

    let i2s = I2s::new(
        peripherals.I2S0,
        Standard::Philips,
        DataFormat::Data16Channel16,
        Rate::from_hz(SAMPLE_RATE_HZ),
        peripherals.DMA_CH0,
        rx_descriptors,
        tx_descriptors,
    )
    .into_async();

    let i2s_rx = i2s.i2s_rx.with_bclk(bclk).with_ws(ws).with_din(din).build();

    let front_spi = Spi::new(
        peripherals.SPI2,
        SpiConfig::default()
            .with_frequency(Rate::from_khz(LED_CLOCK_KHZ))
            .with_mode(Mode::_0),
    )
    .expect("front ring SPI init failed")
    .with_mosi(peripherals.GPIO7);

    let back_spi = Spi::new(
        peripherals.SPI3,
        SpiConfig::default()
            .with_frequency(Rate::from_khz(LED_CLOCK_KHZ))
            .with_mode(Mode::_0),
    )
    .expect("back ring SPI init failed")
    .with_mosi(peripherals.GPIO8);

    let strip = LogicalStrip::new(
        FrontRing::new(Ws2812::new(front_spi)),
        BackRing::new(Ws2812::new(back_spi)),
    );

    let samples_signal = &*SAMPLES_SIGNAL.init(Signal::new());

    spawner.must_spawn(microphone_reader(i2s_rx, rx_buffer, samples_signal));
    spawner.must_spawn(meter_task(samples_signal, strip));
}
