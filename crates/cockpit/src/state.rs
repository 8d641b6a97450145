//! Ship system state and the chat transcript.
//!
//! The warp scalar has exactly one writer (the toggle) and is read by
//! the starfield and the velocity readout. The transcript is append
//! only and never persisted.

/// Warp speed engaged by the toggle.
pub const WARP_ENGAGE_SPEED: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemStatus {
    Online,
    Offline,
    Warning,
    Critical,
}

impl SystemStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SystemStatus::Online => "ONLINE",
            SystemStatus::Offline => "OFFLINE",
            SystemStatus::Warning => "WARNING",
            SystemStatus::Critical => "CRITICAL",
        }
    }
}

/// Subsystem statuses plus the warp-speed scalar.
#[derive(Debug, Clone)]
pub struct SystemState {
    pub propulsion: SystemStatus,
    pub life_support: SystemStatus,
    pub navigation: SystemStatus,
    pub communications: SystemStatus,
    warp_speed: f32,
}

impl Default for SystemState {
    fn default() -> Self {
        Self {
            propulsion: SystemStatus::Online,
            life_support: SystemStatus::Online,
            navigation: SystemStatus::Online,
            communications: SystemStatus::Online,
            warp_speed: 0.0,
        }
    }
}

impl SystemState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warp_speed(&self) -> f32 {
        self.warp_speed
    }

    /// Two-state toggle: 0 engages to the fixed warp speed, any nonzero
    /// value disengages to exactly 0.
    pub fn toggle_warp(&mut self) {
        self.warp_speed = if self.warp_speed == 0.0 {
            WARP_ENGAGE_SPEED
        } else {
            0.0
        };
    }

    /// Update the communications status from a ship computer reply. The
    /// relay reports trouble through its fixed sentinel strings, so a
    /// sentinel downgrades the subsystem and anything else restores it.
    pub fn note_comms_reply(&mut self, reply: &str) {
        self.communications = if reply == relay::FAILURE_SENTINEL {
            SystemStatus::Critical
        } else if reply == relay::EMPTY_SENTINEL {
            SystemStatus::Warning
        } else {
            SystemStatus::Online
        };
    }

    /// Velocity readout text: `IMPULSE` at rest, `WARP {speed}` with one
    /// decimal when engaged.
    pub fn velocity_readout(&self) -> String {
        if self.warp_speed == 0.0 {
            "IMPULSE".to_string()
        } else {
            format!("WARP {:.1}", self.warp_speed)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Model,
}

impl MessageRole {
    pub fn label(&self) -> &'static str {
        match self {
            MessageRole::User => "CMD_OFFICER",
            MessageRole::Model => "SHIP_AI",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub text: String,
    /// Seconds since session start.
    pub timestamp: f64,
}

/// Append-only message log, seeded with the computer's boot message.
#[derive(Debug)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

pub const INIT_MESSAGE: &str =
    "System initialized. VinaSpace-1 Command Interface ready. Waiting for input...";

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                role: MessageRole::Model,
                text: INIT_MESSAGE.to_string(),
                timestamp: 0.0,
            }],
        }
    }

    pub fn push_user(&mut self, text: impl Into<String>, timestamp: f64) {
        self.messages.push(ChatMessage {
            role: MessageRole::User,
            text: text.into(),
            timestamp,
        });
    }

    pub fn push_model(&mut self, text: impl Into<String>, timestamp: f64) {
        self.messages.push(ChatMessage {
            role: MessageRole::Model,
            text: text.into(),
            timestamp,
        });
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warp_toggle_is_two_state() {
        let mut state = SystemState::new();
        assert_eq!(state.warp_speed(), 0.0);
        state.toggle_warp();
        assert_eq!(state.warp_speed(), 5.0);
        state.toggle_warp();
        assert_eq!(state.warp_speed(), 0.0);
    }

    #[test]
    fn toggle_from_any_nonzero_disengages() {
        let mut state = SystemState::new();
        state.warp_speed = 3.2;
        state.toggle_warp();
        assert_eq!(state.warp_speed(), 0.0);
    }

    #[test]
    fn velocity_readout_formats() {
        let mut state = SystemState::new();
        assert_eq!(state.velocity_readout(), "IMPULSE");
        state.toggle_warp();
        assert_eq!(state.velocity_readout(), "WARP 5.0");
        state.warp_speed = 7.5;
        assert_eq!(state.velocity_readout(), "WARP 7.5");
    }

    #[test]
    fn comms_status_tracks_relay_sentinels() {
        let mut state = SystemState::new();
        assert_eq!(state.communications, SystemStatus::Online);

        state.note_comms_reply(relay::FAILURE_SENTINEL);
        assert_eq!(state.communications, SystemStatus::Critical);

        state.note_comms_reply(relay::EMPTY_SENTINEL);
        assert_eq!(state.communications, SystemStatus::Warning);

        state.note_comms_reply("All systems nominal.");
        assert_eq!(state.communications, SystemStatus::Online);
    }

    #[test]
    fn transcript_is_seeded_and_ordered() {
        let mut t = Transcript::new();
        t.push_user("status report", 4.0);
        t.push_model("All systems nominal.", 5.5);

        let messages = t.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, MessageRole::Model);
        assert_eq!(messages[0].text, INIT_MESSAGE);
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[1].text, "status report");
        assert_eq!(messages[2].role, MessageRole::Model);
        assert_eq!(messages[2].text, "All systems nominal.");
    }
}
