//! Command console HUD: status readouts, the chat transcript panel,
//! and the input line. All drawn with the overlay bitmap font.

use renderer::{wrap_text, OverlayBuilder, GLYPH_PX_H, GLYPH_PX_W};

use crate::state::{MessageRole, SystemState, Transcript};

const CYAN: [f32; 4] = [0.02, 0.71, 0.83, 1.0];
const ORANGE: [f32; 4] = [0.98, 0.44, 0.09, 1.0];
const WHITE: [f32; 4] = [0.9, 0.92, 0.95, 1.0];
const DIM: [f32; 4] = [0.45, 0.5, 0.55, 1.0];
const PANEL_BG: [f32; 4] = [0.0, 0.02, 0.04, 0.55];

const TEXT_SCALE: f32 = 2.0;
/// Transcript panel width in glyph columns.
const PANEL_COLS: usize = 46;
const PANEL_MAX_LINES: usize = 12;

/// Console input line plus the request-in-flight flag.
#[derive(Debug, Default)]
pub struct Console {
    buffer: String,
    busy: bool,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn type_char(&mut self, ch: char) {
        self.buffer.push(ch);
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Take the input line for submission. Returns `None` (and leaves
    /// everything untouched) while a request is outstanding or when the
    /// line is empty or whitespace only.
    pub fn take_submission(&mut self) -> Option<String> {
        if self.busy || self.buffer.trim().is_empty() {
            return None;
        }
        self.busy = true;
        Some(std::mem::take(&mut self.buffer))
    }

    /// A reply arrived; re-enable submission.
    pub fn on_reply(&mut self) {
        self.busy = false;
    }
}

/// One transcript display line: color plus text.
pub fn transcript_lines(transcript: &Transcript, max_lines: usize) -> Vec<([f32; 4], String)> {
    let mut lines = Vec::new();
    for message in transcript.messages() {
        let color = match message.role {
            MessageRole::User => ORANGE,
            MessageRole::Model => CYAN,
        };
        let tagged = format!(
            "[T+{}] {}: {}",
            message.timestamp as u64,
            message.role.label(),
            message.text
        );
        for line in wrap_text(&tagged, PANEL_COLS) {
            lines.push((color, line));
        }
    }
    let overflow = lines.len().saturating_sub(max_lines);
    lines.split_off(overflow)
}

/// Build the whole HUD for one frame.
pub fn build_overlay(
    width: f32,
    height: f32,
    state: &SystemState,
    transcript: &Transcript,
    console: &Console,
) -> OverlayBuilder {
    let mut hud = OverlayBuilder::new(width, height);
    let line_h = GLYPH_PX_H * TEXT_SCALE + 4.0;

    // Status bar, fixed display values
    hud.add_text_with_bg(
        12.0,
        12.0,
        "HULL 100%   SHIELDS ONLINE   POS 42.11.90",
        TEXT_SCALE,
        WHITE,
        PANEL_BG,
    );
    let systems = format!(
        "PROP {}  LIFE {}  NAV {}  COMM {}",
        state.propulsion.label(),
        state.life_support.label(),
        state.navigation.label(),
        state.communications.label()
    );
    hud.add_text(16.0, 16.0 + line_h, &systems, TEXT_SCALE, DIM);

    // Velocity readout, top right
    let velocity = state.velocity_readout();
    let color = if state.warp_speed() > 0.0 { ORANGE } else { CYAN };
    let w = OverlayBuilder::text_width(&velocity, TEXT_SCALE * 1.5);
    hud.add_text_with_bg(
        width - w - 24.0,
        12.0,
        &velocity,
        TEXT_SCALE * 1.5,
        color,
        PANEL_BG,
    );

    // Transcript panel, bottom left
    let lines = transcript_lines(transcript, PANEL_MAX_LINES);
    let panel_w = PANEL_COLS as f32 * GLYPH_PX_W * TEXT_SCALE + 16.0;
    let panel_h = (PANEL_MAX_LINES + 2) as f32 * line_h + 16.0;
    let panel_x = 12.0;
    let panel_y = height - panel_h - 12.0;
    hud.add_rect(panel_x, panel_y, panel_w, panel_h, PANEL_BG);

    let mut y = panel_y + 8.0;
    for (color, line) in &lines {
        hud.add_text(panel_x + 8.0, y, line, TEXT_SCALE, *color);
        y += line_h;
    }

    // Input line
    let prompt_y = panel_y + panel_h - line_h - 8.0;
    let prompt = if console.is_busy() {
        "> AWAITING RESPONSE...".to_string()
    } else {
        format!("> {}_", console.buffer())
    };
    let prompt_color = if console.is_busy() { DIM } else { WHITE };
    hud.add_text(panel_x + 8.0, prompt_y, &prompt, TEXT_SCALE, prompt_color);

    // Key hints
    hud.add_text(
        panel_x,
        height - 12.0 - GLYPH_PX_H,
        "TAB warp   ENTER send   ESC quit",
        1.0,
        DIM,
    );

    hud
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Transcript;

    #[test]
    fn empty_input_does_not_submit() {
        let mut console = Console::new();
        assert_eq!(console.take_submission(), None);
        console.type_char(' ');
        console.type_char(' ');
        assert_eq!(console.take_submission(), None);
        assert_eq!(console.buffer(), "  ");
        assert!(!console.is_busy());
    }

    #[test]
    fn submission_clears_buffer_and_sets_busy() {
        let mut console = Console::new();
        for ch in "status report".chars() {
            console.type_char(ch);
        }
        assert_eq!(console.take_submission(), Some("status report".to_string()));
        assert_eq!(console.buffer(), "");
        assert!(console.is_busy());
    }

    #[test]
    fn second_submit_while_busy_is_ignored() {
        let mut console = Console::new();
        for ch in "first".chars() {
            console.type_char(ch);
        }
        assert!(console.take_submission().is_some());
        for ch in "second".chars() {
            console.type_char(ch);
        }
        assert_eq!(console.take_submission(), None);
        assert_eq!(console.buffer(), "second");
        console.on_reply();
        assert_eq!(console.take_submission(), Some("second".to_string()));
    }

    #[test]
    fn backspace_edits_the_line() {
        let mut console = Console::new();
        console.type_char('o');
        console.type_char('k');
        console.backspace();
        assert_eq!(console.buffer(), "o");
        console.backspace();
        console.backspace();
        assert_eq!(console.buffer(), "");
    }

    #[test]
    fn transcript_lines_tag_roles_and_clip() {
        let mut t = Transcript::new();
        t.push_user("report", 3.9);
        let lines = transcript_lines(&t, 16);
        assert!(lines[0].1.starts_with("[T+0] SHIP_AI:"));
        assert!(lines.iter().any(|(_, l)| l.starts_with("[T+3] CMD_OFFICER: report")));

        for i in 0..40 {
            t.push_model(format!("line {i}"), i as f64);
        }
        let clipped = transcript_lines(&t, 5);
        assert_eq!(clipped.len(), 5);
        assert!(clipped.last().unwrap().1.ends_with("line 39"));
    }

    #[test]
    fn overlay_builds_geometry() {
        let console = Console::new();
        let state = SystemState::new();
        let transcript = Transcript::new();
        let hud = build_overlay(1280.0, 720.0, &state, &transcript, &console);
        assert!(!hud.vertices.is_empty());
        assert_eq!(hud.indices.len() % 6, 0);
    }
}
