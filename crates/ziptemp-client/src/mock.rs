//! # Scripted HTTP Exchange
//!
//! An [`HttpExchange`] that replays queued results in order and records
//! every request it receives. Used by unit and integration tests to drive
//! the lookup clients and the HTTP surfaces without a network.
//!
//! When the script runs dry, `execute` fails with a transport error so an
//! unexpected extra call surfaces as a failure instead of hanging.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::TransportError;
use crate::exchange::{ExchangeRequest, ExchangeResponse, HttpExchange};

/// Replays scripted responses and records requests.
#[derive(Debug, Default)]
pub struct ScriptedExchange {
    script: Mutex<VecDeque<Result<ExchangeResponse, TransportError>>>,
    recorded: Mutex<Vec<ExchangeRequest>>,
}

impl ScriptedExchange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next call.
    pub fn push_response(&self, response: ExchangeResponse) {
        self.script.lock().push_back(Ok(response));
    }

    /// Queue a transport failure for the next call.
    pub fn push_error(&self, error: TransportError) {
        self.script.lock().push_back(Err(error));
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<ExchangeRequest> {
        self.recorded.lock().clone()
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.recorded.lock().len()
    }

    /// Number of scripted results not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

#[async_trait]
impl HttpExchange for ScriptedExchange {
    async fn execute(&self, request: ExchangeRequest) -> Result<ExchangeResponse, TransportError> {
        let target = request.url.to_string();
        self.recorded.lock().push(request);
        self.script
            .lock()
            .pop_front()
            .unwrap_or(Err(TransportError::Failed {
                target,
                reason: "no scripted response left".into(),
            }))
    }
}
