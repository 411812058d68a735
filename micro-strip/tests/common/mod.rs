use micro_level::{Calibration, SampleSource};
use micro_strip::mock::MockSink;
use micro_strip::{LogicalStrip, SoundMeter};

pub const FRONT_LEN: usize = 10;
pub const BACK_LEN: usize = 16;
pub const TOT_PIXELS: usize = FRONT_LEN + BACK_LEN;
pub const BLOCK_LEN: usize = 160;

/// Raw level the synthetic microphone idles at.
const MIDPOINT: u16 = 5000;

/// A block of digital silence.
pub fn quiet_block() -> [u16; BLOCK_LEN] {
    [MIDPOINT; BLOCK_LEN]
}

/// A block swinging `deviation` raw counts around the midpoint, which
/// pins its RMS loudness at exactly that deviation.
pub fn swing_block(deviation: u16) -> [u16; BLOCK_LEN] {
    let mut block = [0u16; BLOCK_LEN];
    for (i, sample) in block.iter_mut().enumerate() {
        *sample = if i % 2 == 0 {
            MIDPOINT - deviation
        } else {
            MIDPOINT + deviation
        };
    }
    block
}

/// A block loud enough to overshoot the calibrated ceiling.
pub fn loud_block() -> [u16; BLOCK_LEN] {
    swing_block(600)
}

/// Meter preloaded with the quiet-room calibration.
pub fn new_calibrated_meter<const A: usize, const B: usize>(
    strip: &LogicalStrip<MockSink<A>, MockSink<B>>,
) -> SoundMeter {
    SoundMeter::new(Calibration::new(10.0, 510.0), strip.len())
}

/// Sample source that plays a fixed list of blocks, repeating the last
/// one once the list runs out.
pub struct Script {
    blocks: Vec<[u16; BLOCK_LEN]>,
    served: usize,
}

impl Script {
    pub fn new(blocks: Vec<[u16; BLOCK_LEN]>) -> Self {
        assert!(!blocks.is_empty(), "a script needs at least one block");
        Self { blocks, served: 0 }
    }

    pub fn blocks_served(&self) -> usize {
        self.served
    }
}

impl SampleSource for Script {
    fn record(&mut self, block: &mut [u16]) {
        let index = self.served.min(self.blocks.len() - 1);
        block.copy_from_slice(&self.blocks[index]);
        self.served += 1;
    }
}
