use crate::{DISPLAY_HEIGHT, DISPLAY_SIZE, DISPLAY_WIDTH};

/// Monochrome 64x32 screen, 8 pixels per byte. Pixel `pos = y * 64 + x`
/// lives in byte `pos / 8`, bit `7 - pos % 8`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    bit_buffer: [u8; DISPLAY_SIZE],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            bit_buffer: [0; DISPLAY_SIZE],
        }
    }

    pub fn clear_buffer(&mut self) {
        self.bit_buffer = [0; DISPLAY_SIZE];
    }

    pub fn bytes(&self) -> &[u8; DISPLAY_SIZE] {
        &self.bit_buffer
    }

    /// 0 or 1 for the pixel at linear index `pos` (0..2048).
    pub fn pixel(&self, pos: usize) -> u8 {
        let offset = 7 - (pos % 8);
        (self.bit_buffer[pos / 8] >> offset) & 1
    }

    /// XORs an 8-pixel-wide sprite onto the screen at (x, y). Coordinates
    /// wrap around both edges. Returns true if any lit pixel was turned off.
    pub fn paint(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (i, row) in sprite.iter().enumerate() {
            for j in 0..8 {
                let nx = (x as usize + j) % DISPLAY_WIDTH;
                let ny = (y as usize + i) % DISPLAY_HEIGHT;
                let bit = (row >> (7 - j)) & 1;
                if self.xor_pixel((ny * DISPLAY_WIDTH) + nx, bit) {
                    collision = true;
                }
            }
        }
        collision
    }

    // true when the pixel went from set to unset
    fn xor_pixel(&mut self, pos: usize, bit: u8) -> bool {
        let mask = 1 << (7 - (pos % 8));
        let byte = &mut self.bit_buffer[pos / 8];
        let previous = *byte & mask != 0;
        if bit == 1 {
            *byte ^= mask;
        }
        previous && *byte & mask == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_byte(fb: &FrameBuffer, x: usize, y: usize) -> u8 {
        fb.bytes()[(y * DISPLAY_WIDTH + x) / 8]
    }

    #[test]
    fn test_paint_packs_rows() {
        let mut fb = FrameBuffer::new();
        let vf = fb.paint(0x10, 0x10, &[0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert!(!vf);
        assert_eq!(row_byte(&fb, 0x10, 0x10), 0xF0);
        assert_eq!(row_byte(&fb, 0x10, 0x11), 0x90);
        assert_eq!(row_byte(&fb, 0x10, 0x14), 0xF0);
        assert_eq!(fb.pixel(0x10 * DISPLAY_WIDTH + 0x10), 1);
        assert_eq!(fb.pixel(0x11 * DISPLAY_WIDTH + 0x11), 0);
    }

    #[test]
    fn test_paint_collision_only_on_unset() {
        let mut fb = FrameBuffer::new();
        fb.paint(0, 0, &[0b1000_0000]);
        // lighting a different pixel is not a collision
        assert!(!fb.paint(0, 0, &[0b0100_0000]));
        // turning a lit pixel off is
        assert!(fb.paint(0, 0, &[0b1000_0000]));
        assert_eq!(fb.pixel(0), 0);
        assert_eq!(fb.pixel(1), 1);
    }

    #[test]
    fn test_paint_wraps_horizontally() {
        let mut fb = FrameBuffer::new();
        fb.paint(60, 0, &[0xFF]);
        for x in 60..64 {
            assert_eq!(fb.pixel(x), 1);
        }
        for x in 0..4 {
            assert_eq!(fb.pixel(x), 1);
        }
        assert_eq!(fb.pixel(4), 0);
    }

    #[test]
    fn test_paint_wraps_vertically() {
        let mut fb = FrameBuffer::new();
        fb.paint(0, 31, &[0x80, 0x80]);
        assert_eq!(fb.pixel(31 * DISPLAY_WIDTH), 1);
        assert_eq!(fb.pixel(0), 1);
    }

    #[test]
    fn test_coordinates_wrap_before_drawing() {
        let mut fb = FrameBuffer::new();
        fb.paint(64 + 2, 32 + 1, &[0x80]);
        assert_eq!(fb.pixel(DISPLAY_WIDTH + 2), 1);
    }

    #[test]
    fn test_clear_buffer() {
        let mut fb = FrameBuffer::new();
        fb.paint(5, 5, &[0xFF, 0xFF]);
        fb.clear_buffer();
        assert_eq!(fb.bytes(), &[0; DISPLAY_SIZE]);
    }
}
