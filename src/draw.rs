// Window + software drawing for the preview.
// Everything on screen is produced here:
// 1) The image scaled to the preview size, nearest-neighbor.
// 2) A checkerboard showing through wherever pixels are transparent.
// 3) A crosshair that follows the mouse, and a 5x7 bitmap HUD line.

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::coords;
use crate::error::Error;
use crate::gamma::GammaLut;
use crate::types::RasterImage;

const CHECKER_CELL: usize = 10;
const CHECKER_LIGHT: u8 = 0xC8;
const CHECKER_DARK: u8 = 0x96;
const CROSSHAIR_COLOR: u32 = 0x00_FF_CC_33;
const HUD_COLOR: u32 = 0x00_FF_FF_FF;

pub struct Preview {
    window: Window,
    width: usize,
    height: usize,
    buffer: Vec<u32>, // 0x00RRGGBB per pixel, what minifb presents
    lut: GammaLut,
    mouse_was_down: bool,
}

impl Preview {
    /// Open a window sized to the preview dimensions.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self {
            window,
            width,
            height,
            buffer: vec![0u32; width * height],
            lut: GammaLut::new(),
            mouse_was_down: false,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current mouse position in display pixel coordinates, clamped to the
    /// window. Mapping into image space is the caller's job via `coords`.
    pub fn mouse_pos(&self) -> Option<(usize, usize)> {
        self.window
            .get_mouse_pos(MouseMode::Clamp)
            .map(|(x, y)| (x.max(0.0) as usize, y.max(0.0) as usize))
    }

    /// True once per press of the left button. A pick is a discrete action,
    /// so the held state is edge-detected rather than reported every frame.
    pub fn left_clicked(&mut self) -> bool {
        let down = self.window.get_mouse_down(MouseButton::Left);
        let clicked = down && !self.mouse_was_down;
        self.mouse_was_down = down;
        clicked
    }

    /// +1 / -1 while Up / Down is held (with key repeat), 0 otherwise.
    pub fn tolerance_delta(&self) -> i32 {
        if self.window.is_key_pressed(Key::Up, KeyRepeat::Yes) {
            1
        } else if self.window.is_key_pressed(Key::Down, KeyRepeat::Yes) {
            -1
        } else {
            0
        }
    }

    pub fn reset_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::R, KeyRepeat::No)
    }

    pub fn save_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::S, KeyRepeat::No)
    }

    /// Composite `image` into the window buffer and present it.
    ///
    /// Each display pixel samples its nearest source pixel through the same
    /// mapping used for clicks, so what you point at is what you pick.
    pub fn render(&mut self, image: &RasterImage, hud: &str) -> Result<(), Error> {
        for dy in 0..self.height {
            for dx in 0..self.width {
                let (ix, iy) = coords::display_to_image(
                    dx,
                    dy,
                    (self.width, self.height),
                    (image.width, image.height),
                );
                let i = image.offset(ix, iy);
                let (r, g, b, a) = (
                    image.pixels[i],
                    image.pixels[i + 1],
                    image.pixels[i + 2],
                    image.pixels[i + 3],
                );

                let checker = if (dx / CHECKER_CELL + dy / CHECKER_CELL) % 2 == 0 {
                    CHECKER_LIGHT
                } else {
                    CHECKER_DARK
                };

                self.buffer[dy * self.width + dx] = match a {
                    255 => pack(r, g, b),
                    0 => pack(checker, checker, checker),
                    // Fractional alpha (sources with their own transparency):
                    // blend over the checker in linear light.
                    a => {
                        let t = a as f32 / 255.0;
                        let bg = self.lut.linear(checker);
                        let blend = |c: u8| {
                            self.lut
                                .encode(t * self.lut.linear(c) + (1.0 - t) * bg)
                        };
                        pack(blend(r), blend(g), blend(b))
                    }
                };
            }
        }

        if let Some((mx, my)) = self.mouse_pos() {
            draw_crosshair(
                &mut self.buffer,
                self.width,
                self.height,
                mx as i32,
                my as i32,
                12,
                CROSSHAIR_COLOR,
            );
        }
        draw_text_5x7(&mut self.buffer, self.width, self.height, 8, 8, hud, HUD_COLOR);

        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }
}

#[inline]
fn pack(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/* ---------- Software drawing: pixels, crosshair, tiny bitmap font ---------- */

/// Put a pixel if (x, y) is inside bounds.
#[inline]
fn put_pixel(buf: &mut [u32], w: usize, h: usize, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= w || y >= h {
        return;
    }
    buf[y * w + x] = color;
}

/// Thin line between (x0,y0) and (x1,y1) using Bresenham.
fn draw_line(buf: &mut [u32], w: usize, h: usize, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0, x1, y1) = (x0, y0, x1, y1);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(buf, w, h, x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Small crosshair centered at (cx, cy), with a gap at the center so the
/// pixel under the cursor stays visible while aiming.
pub fn draw_crosshair(buf: &mut [u32], w: usize, h: usize, cx: i32, cy: i32, size: i32, color: u32) {
    draw_line(buf, w, h, cx - size, cy, cx - 2, cy, color);
    draw_line(buf, w, h, cx + 2, cy, cx + size, cy, color);
    draw_line(buf, w, h, cx, cy - size, cx, cy - 2, color);
    draw_line(buf, w, h, cx, cy + 2, cx, cy + size, color);
    put_pixel(buf, w, h, cx, cy, color);
}

/* ---------- 5x7 bitmap font (ASCII subset the HUD needs) ---------- */

/// 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Uppercase letters the HUD strings use
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b01010,0b01010,0b00100),

        // Punctuation: space, vertical bar, colon, dot
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x, y) with a 1-pixel black shadow so the
/// HUD stays readable over any image.
fn draw_char_5x7(buf: &mut [u32], w: usize, h: usize, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(buf, w, h, x + rx as i32 + 1, y + ry as i32 + 1, 0x00000000);
                }
            }
        }
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(buf, w, h, x + rx as i32, y + ry as i32, color);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs, 1 pixel of spacing between them.
pub fn draw_text_5x7(buf: &mut [u32], w: usize, h: usize, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(buf, w, h, x, y, ch, color);
        x += 6;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hud_strings_only_use_available_glyphs() {
        let samples = [
            "CLICK A COLOR TO ERASE IT",
            "TOL: 020 | REF: 255 000 000 | R: RESET  S: SAVE",
            "SAVED",
        ];
        for s in samples {
            for ch in s.chars() {
                assert!(glyph5x7(ch).is_some(), "missing glyph for {ch:?}");
            }
        }
    }

    #[test]
    fn put_pixel_ignores_out_of_bounds_writes() {
        let mut buf = vec![0u32; 4 * 4];
        put_pixel(&mut buf, 4, 4, -1, 0, 0xFFFFFF);
        put_pixel(&mut buf, 4, 4, 0, -1, 0xFFFFFF);
        put_pixel(&mut buf, 4, 4, 4, 0, 0xFFFFFF);
        put_pixel(&mut buf, 4, 4, 0, 4, 0xFFFFFF);
        assert!(buf.iter().all(|&p| p == 0));

        put_pixel(&mut buf, 4, 4, 3, 3, 0xFFFFFF);
        assert_eq!(buf[15], 0xFFFFFF);
    }

    #[test]
    fn crosshair_leaves_a_gap_at_the_center() {
        let mut buf = vec![0u32; 32 * 32];
        draw_crosshair(&mut buf, 32, 32, 16, 16, 6, 0x00FF0000);
        // Center dot is drawn, the ring immediately next to it is not.
        assert_eq!(buf[16 * 32 + 16], 0x00FF0000);
        assert_eq!(buf[16 * 32 + 15], 0);
        assert_eq!(buf[15 * 32 + 16], 0);
        // Arm pixels are drawn.
        assert_eq!(buf[16 * 32 + 10], 0x00FF0000);
        assert_eq!(buf[10 * 32 + 16], 0x00FF0000);
    }
}
