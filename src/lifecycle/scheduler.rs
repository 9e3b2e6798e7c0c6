//! One-shot transition timers
//!
//! The registry is keyed by organizer, then by (event, phase). Re-arming
//! an organizer always clears their whole slice of the registry first, so
//! repeated scheduling passes can never leave duplicate timers behind.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;
use uuid::Uuid;

/// Which boundary instant a timer fires at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionPhase {
    Start,
    End,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::Start => "start",
            TransitionPhase::End => "end",
        }
    }
}

type TimerKey = (Uuid, TransitionPhase);

#[derive(Debug)]
pub struct TransitionScheduler {
    timers: Mutex<HashMap<Uuid, HashMap<TimerKey, JoinHandle<()>>>>,
    max_delay: Duration,
}

impl TransitionScheduler {
    pub fn new(max_delay: Duration) -> Self {
        Self {
            timers: Mutex::new(HashMap::new()),
            max_delay,
        }
    }

    /// Arm a one-shot timer. Returns false when the delay exceeds the
    /// maximum representable delay; such transitions are left to the
    /// periodic fallback pass.
    pub fn schedule<F>(
        &self,
        organizer_id: Uuid,
        event_id: Uuid,
        phase: TransitionPhase,
        delay: Duration,
        task: F,
    ) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if delay > self.max_delay {
            return false;
        }

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });

        let mut timers = self.timers.lock().expect("timer registry lock poisoned");
        if let Some(previous) = timers
            .entry(organizer_id)
            .or_default()
            .insert((event_id, phase), handle)
        {
            previous.abort();
        }
        true
    }

    /// Disarm every timer belonging to one organizer.
    pub fn cancel_all(&self, organizer_id: Uuid) {
        let removed = {
            let mut timers = self.timers.lock().expect("timer registry lock poisoned");
            timers.remove(&organizer_id)
        };
        if let Some(handles) = removed {
            for handle in handles.into_values() {
                handle.abort();
            }
        }
    }

    /// Number of timers currently armed for an organizer.
    pub fn armed(&self, organizer_id: Uuid) -> usize {
        let timers = self.timers.lock().expect("timer registry lock poisoned");
        timers.get(&organizer_id).map_or(0, HashMap::len)
    }

    /// Disarm everything, across all organizers.
    pub fn shutdown(&self) {
        let drained = {
            let mut timers = self.timers.lock().expect("timer registry lock poisoned");
            std::mem::take(&mut *timers)
        };
        for handles in drained.into_values() {
            for handle in handles.into_values() {
                handle.abort();
            }
        }
    }
}

impl Drop for TransitionScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
