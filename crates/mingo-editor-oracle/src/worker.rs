//! Background-thread dispatcher for diagnostics requests.
//!
//! Requests are sent to a worker thread over a channel; the worker runs the oracle and posts
//! tagged responses back. When several requests queue up while the oracle is busy, only the
//! newest one is run: the older ones would be discarded by the scheduler anyway.

use crate::error::OracleError;
use crate::oracle::DiagnosticsOracle;
use crate::scheduler::{DiagnosticsDispatcher, DiagnosticsRequest, DiagnosticsResponse};
use std::io;
use std::sync::mpsc;
use std::thread;
use tracing::trace;

/// A [`DiagnosticsDispatcher`] that runs the oracle on a dedicated thread.
#[derive(Debug)]
pub struct ThreadedDispatcher {
    tx: mpsc::Sender<DiagnosticsRequest>,
    rx: mpsc::Receiver<DiagnosticsResponse>,
}

impl ThreadedDispatcher {
    /// Spawn the worker thread. It exits when the dispatcher is dropped.
    pub fn spawn<O>(oracle: O) -> io::Result<Self>
    where
        O: DiagnosticsOracle + Send + 'static,
    {
        let (tx_req, rx_req) = mpsc::channel::<DiagnosticsRequest>();
        let (tx_resp, rx_resp) = mpsc::channel::<DiagnosticsResponse>();

        thread::Builder::new()
            .name("mingo-diagnostics".to_string())
            .spawn(move || diagnostics_loop(oracle, rx_req, tx_resp))?;

        Ok(Self {
            tx: tx_req,
            rx: rx_resp,
        })
    }

    /// Block until the next response arrives or the worker stops.
    pub fn recv(&self) -> Option<DiagnosticsResponse> {
        self.rx.recv().ok()
    }
}

impl DiagnosticsDispatcher for ThreadedDispatcher {
    fn dispatch(&mut self, request: DiagnosticsRequest) -> Result<(), OracleError> {
        self.tx
            .send(request)
            .map_err(|_| OracleError::Disconnected)
    }

    fn try_recv(&mut self) -> Option<DiagnosticsResponse> {
        self.rx.try_recv().ok()
    }
}

fn diagnostics_loop<O: DiagnosticsOracle>(
    oracle: O,
    rx: mpsc::Receiver<DiagnosticsRequest>,
    tx: mpsc::Sender<DiagnosticsResponse>,
) {
    while let Ok(mut request) = rx.recv() {
        while let Ok(newer) = rx.try_recv() {
            trace!(skipped = %request.generation, "superseded before dispatch");
            request = newer;
        }

        let outcome = oracle.diagnose(&request.source);
        let response = DiagnosticsResponse {
            generation: request.generation,
            outcome,
        };
        if tx.send(response).is_err() {
            break;
        }
    }
}
