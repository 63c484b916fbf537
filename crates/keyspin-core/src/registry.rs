use std::sync::Arc;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::adapter::RestProvider;

#[derive(Debug)]
struct RegistryState {
    /// Indexes into `configured`, in rotation order.
    active: Vec<usize>,
    /// Always a valid index into `active` while `active` is non-empty.
    cursor: usize,
    /// Demotion timestamps, only tracked when re-admission is enabled.
    demoted: Vec<(usize, Instant)>,
}

/// Ordered, rotatable, health-tracked collection of lookup providers.
///
/// Rotation continues from the current cursor across calls, so successive
/// lookups spread load over the active providers instead of hammering the
/// first one. A provider that fails is removed from rotation for the rest of
/// the process unless a re-admission window is configured.
pub struct ProviderRegistry {
    configured: Vec<Arc<RestProvider>>,
    state: Mutex<RegistryState>,
    readmit_after: Option<Duration>,
}

impl ProviderRegistry {
    pub fn new(providers: Vec<Arc<RestProvider>>) -> Self {
        let active = (0..providers.len()).collect();
        Self {
            configured: providers,
            state: Mutex::new(RegistryState {
                active,
                cursor: 0,
                demoted: Vec::new(),
            }),
            readmit_after: None,
        }
    }

    /// Opt-in deviation from the observed behavior: restore a demoted
    /// provider to the end of the rotation once `window` has elapsed.
    pub fn with_readmit_after(mut self, window: Duration) -> Self {
        self.readmit_after = Some(window);
        self
    }

    /// Next provider in rotation. Read-cursor and advance are one atomic
    /// step under the registry lock.
    pub fn next(&self) -> Option<Arc<RestProvider>> {
        let mut state = self.state.lock().expect("registry lock is not poisoned");

        if let Some(window) = self.readmit_after {
            let mut index = 0;
            while index < state.demoted.len() {
                if state.demoted[index].1.elapsed() >= window {
                    let (slot, _) = state.demoted.remove(index);
                    tracing::debug!(
                        provider = self.configured[slot].id(),
                        "re-admitting provider after cool-off"
                    );
                    state.active.push(slot);
                } else {
                    index += 1;
                }
            }
        }

        if state.active.is_empty() {
            return None;
        }

        let slot = state.active[state.cursor];
        state.cursor = (state.cursor + 1) % state.active.len();
        Some(Arc::clone(&self.configured[slot]))
    }

    /// Remove a provider from rotation. Idempotent; the cursor is clamped so
    /// it stays valid for the shrunken set.
    pub fn mark_failed(&self, id: &str) {
        let mut state = self.state.lock().expect("registry lock is not poisoned");

        let Some(position) = state
            .active
            .iter()
            .position(|&slot| self.configured[slot].id() == id)
        else {
            return;
        };

        let slot = state.active.remove(position);
        if self.readmit_after.is_some() {
            state.demoted.push((slot, Instant::now()));
        }

        if state.active.is_empty() {
            state.cursor = 0;
        } else {
            if position < state.cursor {
                state.cursor -= 1;
            }
            if state.cursor >= state.active.len() {
                state.cursor = 0;
            }
        }

        tracing::warn!(
            provider = id,
            remaining = state.active.len(),
            "provider removed from rotation"
        );
    }

    /// Restore the full configured provider list and rewind the cursor.
    pub fn reset(&self) {
        let mut state = self.state.lock().expect("registry lock is not poisoned");
        state.active = (0..self.configured.len()).collect();
        state.cursor = 0;
        state.demoted.clear();
    }

    pub fn configured_len(&self) -> usize {
        self.configured.len()
    }

    pub fn configured(&self) -> &[Arc<RestProvider>] {
        &self.configured
    }

    pub fn active_len(&self) -> usize {
        let state = self.state.lock().expect("registry lock is not poisoned");
        state.active.len()
    }

    pub fn active_ids(&self) -> Vec<String> {
        let state = self.state.lock().expect("registry lock is not poisoned");
        state
            .active
            .iter()
            .map(|&slot| self.configured[slot].id().to_owned())
            .collect()
    }
}
