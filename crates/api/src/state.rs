use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use interaction_check_domain::{TelemetryGuard, WalletAddress};
use interaction_check_explorer::InteractionChecker;

#[derive(Clone)]
pub struct AppState {
    checker: InteractionChecker,
    telemetry: TelemetryGuard,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl AppState {
    pub fn new(checker: InteractionChecker, telemetry: TelemetryGuard) -> Self {
        Self {
            checker,
            telemetry,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn checker(&self) -> &InteractionChecker {
        &self.checker
    }

    pub fn telemetry(&self) -> &TelemetryGuard {
        &self.telemetry
    }

    /// Marks a check for `address` as running. Returns `None` while another
    /// check for the same address holds its permit.
    pub fn try_begin_check(&self, address: &WalletAddress) -> Option<CheckPermit> {
        let mut guard = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !guard.insert(address.as_str().to_owned()) {
            return None;
        }
        Some(CheckPermit {
            address: address.as_str().to_owned(),
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    pub fn is_checking(&self, address: &WalletAddress) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(address.as_str())
    }
}

/// Releases the in-flight slot on drop, whichever way the handler exits.
pub struct CheckPermit {
    address: String,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl Drop for CheckPermit {
    fn drop(&mut self) {
        let mut guard = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.remove(&self.address);
    }
}
