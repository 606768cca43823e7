//! Device state store.
//!
//! A single mutex-guarded record holding the ON/OFF status of the
//! controlled device. The store is the sole source of truth; broadcasting
//! a change to connected clients is the caller's responsibility.

use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// The two valid device statuses. Anything else is rejected at the parse
/// boundary and never reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceStatus {
    #[serde(rename = "ON")]
    On,
    #[serde(rename = "OFF")]
    Off,
}

impl DeviceStatus {
    /// The other status, for toggling.
    pub fn opposite(self) -> Self {
        match self {
            DeviceStatus::On => DeviceStatus::Off,
            DeviceStatus::Off => DeviceStatus::On,
        }
    }
}

impl FromStr for DeviceStatus {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ON" => Ok(DeviceStatus::On),
            "OFF" => Ok(DeviceStatus::Off),
            _ => Err(ApiError::InvalidStatus),
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeviceStatus::On => "ON",
            DeviceStatus::Off => "OFF",
        })
    }
}

/// Current device state. Serialized as `{"status":"ON"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceState {
    pub status: DeviceStatus,
}

/// Mutex-guarded owner of the device state.
///
/// Created at process start with status OFF; not persisted. `set` and
/// `toggle` are the only mutators, each a single atomic read-modify-write.
#[derive(Debug)]
pub struct DeviceStore {
    state: Mutex<DeviceState>,
}

impl DeviceStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(DeviceState {
                status: DeviceStatus::Off,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DeviceState> {
        // A poisoned lock still holds a valid copyable record.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns the current state.
    pub fn get(&self) -> DeviceState {
        *self.lock()
    }

    /// Sets the status and returns the new canonical state.
    pub fn set(&self, status: DeviceStatus) -> DeviceState {
        let mut state = self.lock();
        state.status = status;
        *state
    }

    /// Flips the status under one lock acquisition, so racing togglers
    /// serialize and no transition is dropped.
    pub fn toggle(&self) -> DeviceState {
        let mut state = self.lock();
        state.status = state.status.opposite();
        *state
    }
}

impl Default for DeviceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn store_starts_off() {
        let store = DeviceStore::new();
        assert_eq!(store.get().status, DeviceStatus::Off);
    }

    #[test]
    fn read_after_set_returns_set_value() {
        let store = DeviceStore::new();
        assert_eq!(store.set(DeviceStatus::On).status, DeviceStatus::On);
        assert_eq!(store.get().status, DeviceStatus::On);
        assert_eq!(store.set(DeviceStatus::Off).status, DeviceStatus::Off);
        assert_eq!(store.get().status, DeviceStatus::Off);
    }

    #[test]
    fn toggle_pairs_return_to_origin() {
        let store = DeviceStore::new();
        for _ in 0..2 {
            let start = store.get().status;
            assert_eq!(store.toggle().status, start.opposite());
            assert_eq!(store.toggle().status, start);
            store.set(DeviceStatus::On);
        }
    }

    #[test]
    fn concurrent_toggles_never_drop_transitions() {
        let store = Arc::new(DeviceStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        store.toggle();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        // 200 flips in total; an even count must land back on OFF.
        assert_eq!(store.get().status, DeviceStatus::Off);
    }

    #[test]
    fn invalid_status_is_rejected_at_parse() {
        assert!("ON".parse::<DeviceStatus>().is_ok());
        assert!("OFF".parse::<DeviceStatus>().is_ok());
        assert!("on".parse::<DeviceStatus>().is_err());
        assert!("banana".parse::<DeviceStatus>().is_err());
        assert!("".parse::<DeviceStatus>().is_err());
    }

    #[test]
    fn status_serializes_to_wire_form() {
        let state = DeviceState {
            status: DeviceStatus::On,
        };
        assert_eq!(
            serde_json::to_string(&state).unwrap(),
            r#"{"status":"ON"}"#
        );
    }
}
