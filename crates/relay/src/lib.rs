//! Conversation relay between the command console and the ship
//! computer backend.
//!
//! The relay absorbs every failure at its boundary: callers always get
//! text back, never an error. A genuinely empty reply and a plumbing
//! fault map to two distinct sentinel strings the console prints
//! verbatim.

pub mod gemini;
pub mod worker;

use serde::{Deserialize, Serialize};

/// Reply when the backend answered successfully but with no text.
pub const EMPTY_SENTINEL: &str = "SYSTEM ERROR: Empty response from core processor.";
/// Reply when anything at all went wrong in the relay or below it.
pub const FAILURE_SENTINEL: &str =
    "CRITICAL ALERT: Communication sub-routine failure. Unable to process request.";

/// Relay errors. These never escape [`ConversationRelay::send`]; they
/// exist so the layers below the sentinel boundary stay diagnosable.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("session initialization failed: {0}")]
    SessionInit(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::Transport(err.to_string())
    }
}

/// Backend relay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.7,
            max_output_tokens: 300,
            timeout_secs: 30,
        }
    }
}

/// A live conversation with the ship computer backend. Implementations
/// keep their own turn history; callers send the new message only.
pub trait ShipComputer {
    fn send(&mut self, text: &str) -> Result<String, RelayError>;
}

/// Wraps a [`ShipComputer`] behind the sentinel boundary. The session
/// is created lazily on the first send and retried on the next send if
/// creation failed.
pub struct ConversationRelay<C, F>
where
    F: FnMut() -> Result<C, RelayError>,
{
    factory: F,
    session: Option<C>,
}

impl<C: ShipComputer, F: FnMut() -> Result<C, RelayError>> ConversationRelay<C, F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            session: None,
        }
    }

    /// Send user text, returning reply text unconditionally. Failures
    /// are logged and collapsed to [`FAILURE_SENTINEL`]; a successful
    /// but empty reply becomes [`EMPTY_SENTINEL`].
    pub fn send(&mut self, text: &str) -> String {
        if self.session.is_none() {
            match (self.factory)() {
                Ok(session) => self.session = Some(session),
                Err(err) => {
                    log::error!("ship computer session init failed: {err}");
                    return FAILURE_SENTINEL.to_string();
                }
            }
        }
        let Some(session) = self.session.as_mut() else {
            return FAILURE_SENTINEL.to_string();
        };
        match session.send(text) {
            Ok(reply) if reply.is_empty() => EMPTY_SENTINEL.to_string(),
            Ok(reply) => reply,
            Err(err) => {
                log::error!("ship computer relay error: {err}");
                FAILURE_SENTINEL.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct FakeComputer {
        replies: VecDeque<Result<String, RelayError>>,
    }

    impl ShipComputer for FakeComputer {
        fn send(&mut self, _text: &str) -> Result<String, RelayError> {
            self.replies
                .pop_front()
                .unwrap_or_else(|| Err(RelayError::Transport("exhausted".into())))
        }
    }

    fn relay_with(
        replies: Vec<Result<String, RelayError>>,
    ) -> ConversationRelay<FakeComputer, impl FnMut() -> Result<FakeComputer, RelayError>> {
        let mut replies = Some(VecDeque::from(replies));
        ConversationRelay::new(move || {
            Ok(FakeComputer {
                replies: replies.take().expect("single session"),
            })
        })
    }

    #[test]
    fn successful_reply_passes_through() {
        let mut relay = relay_with(vec![Ok("All systems nominal.".to_string())]);
        assert_eq!(relay.send("status report"), "All systems nominal.");
    }

    #[test]
    fn empty_reply_becomes_empty_sentinel() {
        let mut relay = relay_with(vec![Ok(String::new())]);
        assert_eq!(relay.send("hello"), EMPTY_SENTINEL);
    }

    #[test]
    fn transport_error_becomes_failure_sentinel() {
        let mut relay = relay_with(vec![Err(RelayError::Transport("connection reset".into()))]);
        assert_eq!(relay.send("hello"), FAILURE_SENTINEL);
    }

    #[test]
    fn api_error_becomes_failure_sentinel() {
        let mut relay = relay_with(vec![Err(RelayError::Api {
            status: 503,
            body: "overloaded".into(),
        })]);
        assert_eq!(relay.send("hello"), FAILURE_SENTINEL);
    }

    #[test]
    fn session_init_failure_is_retried_next_send() {
        let mut attempts = 0;
        let mut relay = ConversationRelay::new(move || {
            attempts += 1;
            if attempts == 1 {
                Err(RelayError::SessionInit("no api key".into()))
            } else {
                Ok(FakeComputer {
                    replies: VecDeque::from(vec![Ok("online".to_string())]),
                })
            }
        });
        assert_eq!(relay.send("wake up"), FAILURE_SENTINEL);
        assert_eq!(relay.send("wake up"), "online");
    }

    #[test]
    fn session_is_created_once() {
        let mut created = 0;
        let mut relay = ConversationRelay::new(move || {
            created += 1;
            assert_eq!(created, 1, "session must be reused across sends");
            Ok(FakeComputer {
                replies: VecDeque::from(vec![Ok("a".to_string()), Ok("b".to_string())]),
            })
        });
        assert_eq!(relay.send("one"), "a");
        assert_eq!(relay.send("two"), "b");
    }
}
