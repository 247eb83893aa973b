use std::sync::Arc;

use cfl_ledger::SharedLedger;

/// State handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<SharedLedger>,
    pub threshold: i64,
}

impl AppState {
    pub fn new(ledger: Arc<SharedLedger>, threshold: i64) -> Self {
        Self { ledger, threshold }
    }
}
