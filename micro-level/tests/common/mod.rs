use wavegen::{dc_bias, sine, Waveform};

pub const BLOCK_LEN: usize = 160;
pub const SAMPLE_RATE: f64 = 16_000.0;

/// Unsigned midpoint the synthetic microphone idles at.
pub const MIDPOINT: f32 = 32_768.0;

/// One block of a sine tone centered on the unsigned midpoint.
pub fn sine_block(frequency: f64, amplitude: f64) -> [u16; BLOCK_LEN] {
    let waveform = Waveform::<f32, f64>::with_components(
        SAMPLE_RATE,
        vec![sine!(frequency: frequency, amplitude: amplitude)],
    );
    collect_block(waveform.iter())
}

/// Same tone with an extra DC offset stacked on top.
pub fn biased_sine_block(frequency: f64, amplitude: f64, bias: f64) -> [u16; BLOCK_LEN] {
    let waveform = Waveform::<f32, f64>::with_components(
        SAMPLE_RATE,
        vec![
            sine!(frequency: frequency, amplitude: amplitude),
            dc_bias!(bias),
        ],
    );
    collect_block(waveform.iter())
}

/// A block of digital silence at the given raw level.
pub fn silent_block(level: u16) -> [u16; BLOCK_LEN] {
    [level; BLOCK_LEN]
}

fn collect_block(samples: impl Iterator<Item = f32>) -> [u16; BLOCK_LEN] {
    let mut block = [0u16; BLOCK_LEN];
    for (slot, value) in block.iter_mut().zip(samples) {
        *slot = (MIDPOINT + value) as u16;
    }
    block
}
