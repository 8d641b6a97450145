//! Worker thread that runs blocking relay calls off the render loop.
//!
//! The console submits at most one outstanding request at a time (the
//! busy flag lives there), so unbounded channels never hold more than
//! one message in practice.

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};

use crate::{ConversationRelay, RelayError, ShipComputer};

/// Handle to the relay worker thread. Dropping it closes the request
/// channel and lets the thread exit.
pub struct RelayWorker {
    requests: Sender<String>,
    replies: Receiver<String>,
}

impl RelayWorker {
    /// Spawn the worker around a relay. The relay (and its session)
    /// lives on the worker thread for the rest of the process.
    pub fn spawn<C, F>(mut relay: ConversationRelay<C, F>) -> Self
    where
        C: ShipComputer + Send + 'static,
        F: FnMut() -> Result<C, RelayError> + Send + 'static,
    {
        let (request_tx, request_rx) = unbounded::<String>();
        let (reply_tx, reply_rx) = unbounded::<String>();

        std::thread::Builder::new()
            .name("relay-worker".to_string())
            .spawn(move || {
                for text in request_rx {
                    let reply = relay.send(&text);
                    if reply_tx.send(reply).is_err() {
                        break;
                    }
                }
                log::debug!("relay worker shutting down");
            })
            .expect("failed to spawn relay worker thread");

        Self {
            requests: request_tx,
            replies: reply_rx,
        }
    }

    /// Queue a message for the ship computer.
    pub fn submit(&self, text: String) {
        if self.requests.send(text).is_err() {
            log::error!("relay worker is gone, dropping message");
        }
    }

    /// Non-blocking poll for a finished reply.
    pub fn poll(&self) -> Option<String> {
        match self.replies.try_recv() {
            Ok(reply) => Some(reply),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                log::error!("relay worker reply channel disconnected");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct Echo;

    impl ShipComputer for Echo {
        fn send(&mut self, text: &str) -> Result<String, RelayError> {
            Ok(format!("ack: {text}"))
        }
    }

    #[test]
    fn round_trips_through_the_worker_thread() {
        let relay = ConversationRelay::new(|| Ok(Echo));
        let worker = RelayWorker::spawn(relay);
        worker.submit("engines".to_string());

        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(reply) = worker.poll() {
                assert_eq!(reply, "ack: engines");
                break;
            }
            assert!(std::time::Instant::now() < deadline, "no reply from worker");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn poll_is_non_blocking_when_idle() {
        let relay = ConversationRelay::new(|| Ok(Echo));
        let worker = RelayWorker::spawn(relay);
        assert!(worker.poll().is_none());
    }
}
