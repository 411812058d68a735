use smart_leds::RGB8;

/// Color of the peak-hold marker.
pub const PEAK_COLOR: RGB8 = RGB8 { r: 100, g: 0, b: 255 };

/// Unlit pixel.
pub const OFF: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

/// Bar color for one lit pixel.
///
/// `position` is the segment-local pixel index and `segment_len` the
/// length of that segment, so the green channel climbs from 0 at the
/// bottom of each segment toward 255 at its top while red stays fixed.
/// The climb restarts where the second segment begins.
pub fn volume_color(position: usize, segment_len: usize) -> RGB8 {
    let step = (255 / segment_len) as u32;
    let green = (position as u32 * step).min(255) as u8;
    RGB8 {
        r: 200,
        g: green,
        b: 0,
    }
}
