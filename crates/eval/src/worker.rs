// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Background equity calculations.
use log::warn;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::{
    Error, Result,
    calc::{CancelToken, Config, Request, equity_with_cancel},
    equity::MultiEquity,
};

/// Runs equity calculations on the tokio blocking pool.
///
/// Only the latest request is of interest to an interactive caller, starting
/// a request cancels the one still running.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    config: Config,
    running: Arc<Mutex<Option<CancelToken>>>,
}

impl Calculator {
    /// Creates a calculator with the given settings.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            running: Arc::default(),
        }
    }

    /// The calculator settings.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Computes the request equity in a blocking task.
    ///
    /// Fails with [Error::Cancelled] if another request starts before this
    /// one completes.
    pub async fn equity(&self, req: Request) -> Result<Vec<MultiEquity>> {
        let cancel = CancelToken::default();
        if let Some(prev) = self.running.lock().replace(cancel.clone()) {
            warn!("Cancelling superseded {} equity calculation", req.game);
            prev.cancel();
        }

        let config = self.config.clone();
        let token = cancel.clone();
        let res = tokio::task::spawn_blocking(move || equity_with_cancel(&req, &config, &token))
            .await
            .map_err(|e| Error::Worker(e.to_string()));

        let mut running = self.running.lock();
        if running.as_ref().is_some_and(|t| t.same(&cancel)) {
            *running = None;
        }

        res?
    }

    /// Cancels the running calculation if any.
    pub fn cancel(&self) {
        if let Some(token) = self.running.lock().take() {
            token.cancel();
        }
    }
}
