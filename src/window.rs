use minifb::{Key, Scale, Window, WindowOptions};

use crate::{display::FrameBuffer, keyboard::KeyMask, DISPLAY_HEIGHT, DISPLAY_WIDTH};

// keypad digit -> host key
//
//  1 2 3 C        1 2 3 4
//  4 5 6 D   <-   Q W E R
//  7 8 9 E        A S D F
//  A 0 B F        Z X C V
const KEY_MAPPINGS: [Key; 16] = [
    Key::X,
    Key::Key1,
    Key::Key2,
    Key::Key3,
    Key::Q,
    Key::W,
    Key::E,
    Key::A,
    Key::S,
    Key::D,
    Key::Z,
    Key::C,
    Key::Key4,
    Key::R,
    Key::F,
    Key::V,
];

const PIXEL_ON: (u8, u8, u8) = (0, 127, 255);
const PIXEL_OFF: (u8, u8, u8) = (0, 0, 0);

pub fn scale_from_factor(factor: u32) -> Option<Scale> {
    match factor {
        1 => Some(Scale::X1),
        2 => Some(Scale::X2),
        4 => Some(Scale::X4),
        8 => Some(Scale::X8),
        16 => Some(Scale::X16),
        32 => Some(Scale::X32),
        _ => None,
    }
}

fn from_u8_rgb((r, g, b): (u8, u8, u8)) -> u32 {
    let (r, g, b) = (r as u32, g as u32, b as u32);
    (r << 16) | (g << 8) | b
}

pub struct Screen {
    window: Window,
    pixel_buffer: Vec<u32>,
}

impl Screen {
    pub fn new(title: &str, scale: Scale) -> Result<Self, minifb::Error> {
        let mut window = Window::new(
            &format!("{title} - ESC to exit"),
            DISPLAY_WIDTH,
            DISPLAY_HEIGHT,
            WindowOptions {
                scale,
                ..WindowOptions::default()
            },
        )?;
        // Limit to max ~60 fps update rate
        window.limit_update_rate(Some(std::time::Duration::from_micros(16600)));
        Ok(Self {
            window,
            pixel_buffer: vec![from_u8_rgb(PIXEL_OFF); DISPLAY_WIDTH * DISPLAY_HEIGHT],
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    /// Folds the host keys currently held into a keypad mask.
    pub fn pressed_keys(&self) -> u16 {
        let mut mask = KeyMask::default();
        for (digit, key) in KEY_MAPPINGS.iter().enumerate() {
            if self.window.is_key_down(*key) {
                mask.press(digit as u8);
            }
        }
        mask.0
    }

    pub fn update(&mut self, fb: &FrameBuffer) -> Result<(), minifb::Error> {
        for (pos, pixel) in self.pixel_buffer.iter_mut().enumerate() {
            *pixel = match fb.pixel(pos) {
                0 => from_u8_rgb(PIXEL_OFF),
                _ => from_u8_rgb(PIXEL_ON),
            };
        }
        self.window
            .update_with_buffer(&self.pixel_buffer, DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }
}
