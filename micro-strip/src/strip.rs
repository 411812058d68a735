use smart_leds::RGB8;

/// Buffered output for one physical run of LEDs.
///
/// `set` and `fill` only stage colors; nothing reaches the LEDs until
/// `show` commits the staged frame. Indexing past the end of the segment
/// is a caller bug and panics.
pub trait PixelSink {
    type Error;

    /// Number of physical pixels in this segment.
    fn len(&self) -> usize;

    /// Stage a color for one pixel.
    fn set(&mut self, index: usize, color: RGB8);

    /// Stage a color for every pixel.
    fn fill(&mut self, color: RGB8);

    /// Push the staged frame out to the hardware.
    fn show(&mut self) -> Result<(), Self::Error>;
}

/// Two physical segments addressed as one continuous run.
///
/// Logical indices `0..front.len()` land on the front segment unchanged.
/// The rest land on the back segment with the direction reversed, so a
/// meter climbing the logical indices climbs both segments even though
/// the second one is wired the other way around.
pub struct LogicalStrip<A, B> {
    front: A,
    back: B,
}

impl<A, B> LogicalStrip<A, B>
where
    A: PixelSink,
    B: PixelSink<Error = A::Error>,
{
    pub fn new(front: A, back: B) -> Self {
        Self { front, back }
    }

    /// Total logical pixels across both segments.
    pub fn len(&self) -> usize {
        self.front.len() + self.back.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Segment-local pixel index and segment length for a logical index.
    pub fn position(&self, logical: usize) -> (usize, usize) {
        let front_len = self.front.len();
        if logical < front_len {
            (logical, front_len)
        } else {
            let back_len = self.back.len();
            assert!(
                logical < front_len + back_len,
                "logical index {} out of range",
                logical
            );
            ((back_len - 1) - (logical - front_len), back_len)
        }
    }

    /// Stage a color at a logical index.
    pub fn set(&mut self, logical: usize, color: RGB8) {
        let (index, _) = self.position(logical);
        if logical < self.front.len() {
            self.front.set(index, color);
        } else {
            self.back.set(index, color);
        }
    }

    /// Stage a color on every pixel of both segments.
    pub fn fill(&mut self, color: RGB8) {
        self.front.fill(color);
        self.back.fill(color);
    }

    /// Commit both segments, front first.
    pub fn show(&mut self) -> Result<(), A::Error> {
        self.front.show()?;
        self.back.show()
    }

    pub fn front(&self) -> &A {
        &self.front
    }

    pub fn back(&self) -> &B {
        &self.back
    }
}
