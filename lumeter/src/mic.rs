// src/mic.rs
use crate::config::*;
use defmt::{error, info, trace};
use embassy_executor::task;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use esp_hal::{i2s::master::I2sRx, Async};

const BYTES_PER_FRAME_STEREO: usize = 4; // 2 bytes/sample * 2 channels
const BLOCK_BYTES: usize = NUM_SAMPLES * BYTES_PER_FRAME_STEREO;

/// One unsigned sample block per meter cycle.
pub type SampleBlockSignal = Signal<CriticalSectionRawMutex, [u16; NUM_SAMPLES]>;

/// Pulls stereo I2S frames out of circular DMA and publishes mono blocks.
///
/// The microphone drives the left slot of each Philips frame. Samples
/// arrive as signed 16-bit values and are re-biased to unsigned before
/// publishing, which is the form the loudness math expects.
#[task]
pub async fn microphone_reader(
    i2s_rx: I2sRx<'static, Async>,
    buffer: &'static mut [u8], // DMA buffer provided by main
    signal: &'static SampleBlockSignal,
) {
    info!("Starting microphone_reader task");
    let mut read_buf = [0u8; BLOCK_BYTES * 4];

    match i2s_rx.read_dma_circular_async(buffer) {
        Ok(mut transaction) => loop {
            match transaction.pop(&mut read_buf).await {
                Ok(count) => {
                    if count > 0 {
                        trace!("I2S read {} bytes", count);
                        let mut offset = 0;
                        while offset + BLOCK_BYTES <= count {
                            let frame_data = &read_buf[offset..offset + BLOCK_BYTES];
                            let mut block = [0u16; NUM_SAMPLES];
                            for (slot, frame) in block
                                .iter_mut()
                                .zip(frame_data.chunks_exact(BYTES_PER_FRAME_STEREO))
                            {
                                // Left channel first under the Philips standard
                                let sample = i16::from_le_bytes([frame[0], frame[1]]);
                                *slot = (sample as i32 + 0x8000) as u16;
                            }
                            signal.signal(block);
                            offset += BLOCK_BYTES;
                        }
                        // Partial blocks at the end of read_buf are dropped.
                    }
                }
                Err(e) => {
                    error!("I2S DMA pop error: {:?}", e);
                    embassy_time::Timer::after_millis(100).await;
                }
            }
        },
        Err(e) => error!("I2S DMA read_dma_circular_async failed: {:?}", e),
    }
}
