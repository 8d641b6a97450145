//! Screen-space text overlay: the HUD is drawn entirely with a small
//! embedded bitmap font, no external assets.

use bytemuck::{Pod, Zeroable};

/// Vertex for screen-space HUD quads.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct OverlayVertex {
    /// NDC position (x, y) in -1..1
    pub position: [f32; 2],
    /// UV into font atlas (negative x = solid color quad)
    pub tex_coords: [f32; 2],
    pub color: [f32; 4],
}

impl OverlayVertex {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<OverlayVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Font atlas layout: 16 columns x 6 rows of 6x8 pixel glyphs, ASCII 32..127.
const FONT_COLS: f32 = 16.0;
const FONT_ROWS: f32 = 6.0;
/// Glyph advance in atlas pixels; multiply by scale for on-screen size.
pub const GLYPH_PX_W: f32 = 6.0;
pub const GLYPH_PX_H: f32 = 8.0;

/// Builds screen-space overlay geometry: solid rects and bitmap-font text.
pub struct OverlayBuilder {
    pub vertices: Vec<OverlayVertex>,
    pub indices: Vec<u32>,
    screen_w: f32,
    screen_h: f32,
}

impl OverlayBuilder {
    pub fn new(screen_w: f32, screen_h: f32) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            screen_w,
            screen_h,
        }
    }

    /// Convert pixel coords to NDC.
    fn px_to_ndc(&self, px: f32, py: f32) -> [f32; 2] {
        [
            (px / self.screen_w) * 2.0 - 1.0,
            1.0 - (py / self.screen_h) * 2.0,
        ]
    }

    /// Pixel width of `text` at `scale`.
    pub fn text_width(text: &str, scale: f32) -> f32 {
        text.chars().count() as f32 * GLYPH_PX_W * scale
    }

    /// Add a solid-color rectangle. Coordinates in pixels.
    pub fn add_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        let tl = self.px_to_ndc(x, y);
        let br = self.px_to_ndc(x + w, y + h);
        let base = self.vertices.len() as u32;
        let uv = [-1.0, -1.0]; // sentinel: solid color
        self.vertices.push(OverlayVertex { position: [tl[0], tl[1]], tex_coords: uv, color });
        self.vertices.push(OverlayVertex { position: [br[0], tl[1]], tex_coords: uv, color });
        self.vertices.push(OverlayVertex { position: [br[0], br[1]], tex_coords: uv, color });
        self.vertices.push(OverlayVertex { position: [tl[0], br[1]], tex_coords: uv, color });
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Add a line of text at pixel position (x, y). `scale` = 1.0 means each
    /// glyph is 6x8 screen pixels.
    pub fn add_text(&mut self, x: f32, y: f32, text: &str, scale: f32, color: [f32; 4]) {
        let gw = GLYPH_PX_W * scale;
        let gh = GLYPH_PX_H * scale;
        let mut cx = x;
        for ch in text.chars() {
            let code = ch as u32;
            if !(32..=127).contains(&code) {
                cx += gw;
                continue;
            }
            let idx = code - 32;
            let col = (idx % 16) as f32;
            let row = (idx / 16) as f32;
            let u0 = col / FONT_COLS;
            let v0 = row / FONT_ROWS;
            let u1 = (col + 1.0) / FONT_COLS;
            let v1 = (row + 1.0) / FONT_ROWS;

            let tl = self.px_to_ndc(cx, y);
            let br = self.px_to_ndc(cx + gw, y + gh);
            let base = self.vertices.len() as u32;
            self.vertices.push(OverlayVertex { position: [tl[0], tl[1]], tex_coords: [u0, v0], color });
            self.vertices.push(OverlayVertex { position: [br[0], tl[1]], tex_coords: [u1, v0], color });
            self.vertices.push(OverlayVertex { position: [br[0], br[1]], tex_coords: [u1, v1], color });
            self.vertices.push(OverlayVertex { position: [tl[0], br[1]], tex_coords: [u0, v1], color });
            self.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
            cx += gw;
        }
    }

    /// Add text with a dark background behind it. Returns the Y offset for
    /// the next line.
    pub fn add_text_with_bg(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        scale: f32,
        text_color: [f32; 4],
        bg_color: [f32; 4],
    ) -> f32 {
        let gh = GLYPH_PX_H * scale;
        let padding = 2.0 * scale;
        let text_w = Self::text_width(text, scale);
        self.add_rect(x, y, text_w + padding * 2.0, gh + padding * 2.0, bg_color);
        self.add_text(x + padding, y + padding, text, scale, text_color);
        gh + padding * 2.0
    }
}

/// Greedy word wrap to a column budget. Words longer than the budget are
/// split hard; chat replies routinely exceed the panel width.
pub fn wrap_text(text: &str, max_cols: usize) -> Vec<String> {
    let max_cols = max_cols.max(1);
    let mut lines = Vec::new();
    for raw_line in text.lines() {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed <= max_cols {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
            } else if word.chars().count() > max_cols {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut chunk = String::new();
                for ch in word.chars() {
                    if chunk.chars().count() == max_cols {
                        lines.push(std::mem::take(&mut chunk));
                    }
                    chunk.push(ch);
                }
                current = chunk;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

// ---- Bitmap font atlas generation (6x8 pixel glyphs, ASCII 32..127) ----

/// Classic 5x7 bitmap font rasterized into a 96x48 `R8Unorm` atlas.
pub fn generate_font_atlas() -> (Vec<u8>, u32, u32) {
    let atlas_w: u32 = (FONT_COLS as u32) * (GLYPH_PX_W as u32); // 96
    let atlas_h: u32 = (FONT_ROWS as u32) * (GLYPH_PX_H as u32); // 48
    let mut pixels = vec![0u8; (atlas_w * atlas_h) as usize];

    for code in 32u32..128 {
        let glyph = FONT_5X7[code as usize - 32];
        let idx = code - 32;
        let col = idx % 16;
        let row = idx / 16;
        let base_x = col * (GLYPH_PX_W as u32);
        let base_y = row * (GLYPH_PX_H as u32);

        for (gy, bits) in glyph.iter().enumerate() {
            for gx in 0..5u32 {
                if (bits >> (4 - gx)) & 1 != 0 {
                    let px = base_x + gx;
                    let py = base_y + gy as u32;
                    if px < atlas_w && py < atlas_h {
                        pixels[(py * atlas_w + px) as usize] = 255;
                    }
                }
            }
        }
    }

    (pixels, atlas_w, atlas_h)
}

/// 5x7 bitmap font data for ASCII 32..127 (96 characters).
/// Each entry is 7 bytes; each byte encodes one row (5 MSBs used, bit4=leftmost).
#[rustfmt::skip]
const FONT_5X7: [[u8; 7]; 96] = [
    [0x00,0x00,0x00,0x00,0x00,0x00,0x00], // 32 ' '
    [0x04,0x04,0x04,0x04,0x04,0x00,0x04], // 33 '!'
    [0x0A,0x0A,0x00,0x00,0x00,0x00,0x00], // 34 '"'
    [0x0A,0x1F,0x0A,0x0A,0x1F,0x0A,0x00], // 35 '#'
    [0x04,0x0F,0x14,0x0E,0x05,0x1E,0x04], // 36 '$'
    [0x18,0x19,0x02,0x04,0x08,0x13,0x03], // 37 '%'
    [0x08,0x14,0x14,0x08,0x15,0x12,0x0D], // 38 '&'
    [0x04,0x04,0x00,0x00,0x00,0x00,0x00], // 39 '''
    [0x02,0x04,0x08,0x08,0x08,0x04,0x02], // 40 '('
    [0x08,0x04,0x02,0x02,0x02,0x04,0x08], // 41 ')'
    [0x04,0x15,0x0E,0x1F,0x0E,0x15,0x04], // 42 '*'
    [0x00,0x04,0x04,0x1F,0x04,0x04,0x00], // 43 '+'
    [0x00,0x00,0x00,0x00,0x00,0x04,0x08], // 44 ','
    [0x00,0x00,0x00,0x1F,0x00,0x00,0x00], // 45 '-'
    [0x00,0x00,0x00,0x00,0x00,0x00,0x04], // 46 '.'
    [0x01,0x01,0x02,0x04,0x08,0x10,0x10], // 47 '/'
    [0x0E,0x11,0x13,0x15,0x19,0x11,0x0E], // 48 '0'
    [0x04,0x0C,0x04,0x04,0x04,0x04,0x0E], // 49 '1'
    [0x0E,0x11,0x01,0x06,0x08,0x10,0x1F], // 50 '2'
    [0x0E,0x11,0x01,0x06,0x01,0x11,0x0E], // 51 '3'
    [0x02,0x06,0x0A,0x12,0x1F,0x02,0x02], // 52 '4'
    [0x1F,0x10,0x1E,0x01,0x01,0x11,0x0E], // 53 '5'
    [0x06,0x08,0x10,0x1E,0x11,0x11,0x0E], // 54 '6'
    [0x1F,0x01,0x02,0x04,0x08,0x08,0x08], // 55 '7'
    [0x0E,0x11,0x11,0x0E,0x11,0x11,0x0E], // 56 '8'
    [0x0E,0x11,0x11,0x0F,0x01,0x02,0x0C], // 57 '9'
    [0x00,0x00,0x04,0x00,0x00,0x04,0x00], // 58 ':'
    [0x00,0x00,0x04,0x00,0x00,0x04,0x08], // 59 ';'
    [0x02,0x04,0x08,0x10,0x08,0x04,0x02], // 60 '<'
    [0x00,0x00,0x1F,0x00,0x1F,0x00,0x00], // 61 '='
    [0x08,0x04,0x02,0x01,0x02,0x04,0x08], // 62 '>'
    [0x0E,0x11,0x01,0x02,0x04,0x00,0x04], // 63 '?'
    [0x0E,0x11,0x17,0x15,0x17,0x10,0x0E], // 64 '@'
    [0x0E,0x11,0x11,0x1F,0x11,0x11,0x11], // 65 'A'
    [0x1E,0x11,0x11,0x1E,0x11,0x11,0x1E], // 66 'B'
    [0x0E,0x11,0x10,0x10,0x10,0x11,0x0E], // 67 'C'
    [0x1E,0x11,0x11,0x11,0x11,0x11,0x1E], // 68 'D'
    [0x1F,0x10,0x10,0x1E,0x10,0x10,0x1F], // 69 'E'
    [0x1F,0x10,0x10,0x1E,0x10,0x10,0x10], // 70 'F'
    [0x0E,0x11,0x10,0x17,0x11,0x11,0x0F], // 71 'G'
    [0x11,0x11,0x11,0x1F,0x11,0x11,0x11], // 72 'H'
    [0x0E,0x04,0x04,0x04,0x04,0x04,0x0E], // 73 'I'
    [0x07,0x02,0x02,0x02,0x02,0x12,0x0C], // 74 'J'
    [0x11,0x12,0x14,0x18,0x14,0x12,0x11], // 75 'K'
    [0x10,0x10,0x10,0x10,0x10,0x10,0x1F], // 76 'L'
    [0x11,0x1B,0x15,0x15,0x11,0x11,0x11], // 77 'M'
    [0x11,0x19,0x15,0x13,0x11,0x11,0x11], // 78 'N'
    [0x0E,0x11,0x11,0x11,0x11,0x11,0x0E], // 79 'O'
    [0x1E,0x11,0x11,0x1E,0x10,0x10,0x10], // 80 'P'
    [0x0E,0x11,0x11,0x11,0x15,0x12,0x0D], // 81 'Q'
    [0x1E,0x11,0x11,0x1E,0x14,0x12,0x11], // 82 'R'
    [0x0E,0x11,0x10,0x0E,0x01,0x11,0x0E], // 83 'S'
    [0x1F,0x04,0x04,0x04,0x04,0x04,0x04], // 84 'T'
    [0x11,0x11,0x11,0x11,0x11,0x11,0x0E], // 85 'U'
    [0x11,0x11,0x11,0x11,0x0A,0x0A,0x04], // 86 'V'
    [0x11,0x11,0x11,0x15,0x15,0x1B,0x11], // 87 'W'
    [0x11,0x11,0x0A,0x04,0x0A,0x11,0x11], // 88 'X'
    [0x11,0x11,0x0A,0x04,0x04,0x04,0x04], // 89 'Y'
    [0x1F,0x01,0x02,0x04,0x08,0x10,0x1F], // 90 'Z'
    [0x0E,0x08,0x08,0x08,0x08,0x08,0x0E], // 91 '['
    [0x10,0x10,0x08,0x04,0x02,0x01,0x01], // 92 '\'
    [0x0E,0x02,0x02,0x02,0x02,0x02,0x0E], // 93 ']'
    [0x04,0x0A,0x11,0x00,0x00,0x00,0x00], // 94 '^'
    [0x00,0x00,0x00,0x00,0x00,0x00,0x1F], // 95 '_'
    [0x08,0x04,0x00,0x00,0x00,0x00,0x00], // 96 '`'
    [0x00,0x00,0x0E,0x01,0x0F,0x11,0x0F], // 97 'a'
    [0x10,0x10,0x1E,0x11,0x11,0x11,0x1E], // 98 'b'
    [0x00,0x00,0x0E,0x11,0x10,0x11,0x0E], // 99 'c'
    [0x01,0x01,0x0F,0x11,0x11,0x11,0x0F], // 100 'd'
    [0x00,0x00,0x0E,0x11,0x1F,0x10,0x0E], // 101 'e'
    [0x06,0x08,0x1E,0x08,0x08,0x08,0x08], // 102 'f'
    [0x00,0x00,0x0F,0x11,0x0F,0x01,0x0E], // 103 'g'
    [0x10,0x10,0x1E,0x11,0x11,0x11,0x11], // 104 'h'
    [0x04,0x00,0x0C,0x04,0x04,0x04,0x0E], // 105 'i'
    [0x02,0x00,0x06,0x02,0x02,0x12,0x0C], // 106 'j'
    [0x10,0x10,0x12,0x14,0x18,0x14,0x12], // 107 'k'
    [0x0C,0x04,0x04,0x04,0x04,0x04,0x0E], // 108 'l'
    [0x00,0x00,0x1A,0x15,0x15,0x15,0x11], // 109 'm'
    [0x00,0x00,0x1E,0x11,0x11,0x11,0x11], // 110 'n'
    [0x00,0x00,0x0E,0x11,0x11,0x11,0x0E], // 111 'o'
    [0x00,0x00,0x1E,0x11,0x1E,0x10,0x10], // 112 'p'
    [0x00,0x00,0x0F,0x11,0x0F,0x01,0x01], // 113 'q'
    [0x00,0x00,0x16,0x19,0x10,0x10,0x10], // 114 'r'
    [0x00,0x00,0x0F,0x10,0x0E,0x01,0x1E], // 115 's'
    [0x08,0x08,0x1E,0x08,0x08,0x09,0x06], // 116 't'
    [0x00,0x00,0x11,0x11,0x11,0x13,0x0D], // 117 'u'
    [0x00,0x00,0x11,0x11,0x11,0x0A,0x04], // 118 'v'
    [0x00,0x00,0x11,0x15,0x15,0x15,0x0A], // 119 'w'
    [0x00,0x00,0x11,0x0A,0x04,0x0A,0x11], // 120 'x'
    [0x00,0x00,0x11,0x11,0x0F,0x01,0x0E], // 121 'y'
    [0x00,0x00,0x1F,0x02,0x04,0x08,0x1F], // 122 'z'
    [0x02,0x04,0x04,0x08,0x04,0x04,0x02], // 123 '{'
    [0x04,0x04,0x04,0x04,0x04,0x04,0x04], // 124 '|'
    [0x08,0x04,0x04,0x02,0x04,0x04,0x08], // 125 '}'
    [0x00,0x08,0x15,0x02,0x00,0x00,0x00], // 126 '~'
    [0x1F,0x1F,0x1F,0x1F,0x1F,0x1F,0x1F], // 127 DEL (solid block - useful for bg)
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atlas_dimensions() {
        let (pixels, w, h) = generate_font_atlas();
        assert_eq!((w, h), (96, 48));
        assert_eq!(pixels.len(), 96 * 48);
        // Space glyph is blank, 'A' is not.
        assert!(pixels.iter().any(|&p| p == 255));
    }

    #[test]
    fn text_quads_per_glyph() {
        let mut tb = OverlayBuilder::new(800.0, 600.0);
        tb.add_text(0.0, 0.0, "WARP 5.0", 2.0, [1.0; 4]);
        assert_eq!(tb.vertices.len(), 8 * 4);
        assert_eq!(tb.indices.len(), 8 * 6);
    }

    #[test]
    fn rect_uses_solid_sentinel_uv() {
        let mut tb = OverlayBuilder::new(800.0, 600.0);
        tb.add_rect(10.0, 10.0, 100.0, 20.0, [0.0, 0.0, 0.0, 0.55]);
        assert!(tb.vertices.iter().all(|v| v.tex_coords[0] < 0.0));
    }

    #[test]
    fn wrap_respects_column_budget() {
        let lines = wrap_text("all systems nominal and holding steady", 12);
        assert!(lines.iter().all(|l| l.chars().count() <= 12));
        assert_eq!(lines.join(" "), "all systems nominal and holding steady");
    }

    #[test]
    fn wrap_splits_oversized_words() {
        let lines = wrap_text("aaaaaaaaaaaaaaaaaaaa", 8);
        assert!(lines.iter().all(|l| l.chars().count() <= 8));
        assert_eq!(lines.concat(), "aaaaaaaaaaaaaaaaaaaa");
    }

    #[test]
    fn wrap_keeps_empty_input_as_one_line() {
        assert_eq!(wrap_text("", 40), vec![String::new()]);
    }
}
