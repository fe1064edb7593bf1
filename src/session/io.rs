use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Notify;

/// Single-slot holder for the newest state frame of one connection. A slow
/// reader only ever has one state pending; older frames are replaced.
#[derive(Debug)]
pub struct LatestFrame {
    frame: StdMutex<Option<String>>,
    notify: Notify,
}

impl LatestFrame {
    pub(crate) fn new() -> Self {
        Self {
            frame: StdMutex::new(None),
            notify: Notify::new(),
        }
    }

    pub(crate) fn store(&self, payload: String) {
        *self.frame.lock().unwrap() = Some(payload);
        self.notify.notify_one();
    }

    pub fn take_latest(&self) -> Option<String> {
        self.frame.lock().unwrap().take()
    }

    pub fn has_pending(&self) -> bool {
        self.frame.lock().unwrap().is_some()
    }

    pub async fn wait_for_update(&self) {
        self.notify.notified().await;
    }
}

/// Outbound side of one connection as seen by its writer task: targeted
/// events in order, plus the latest state frame.
pub struct SessionIo {
    events_rx: UnboundedReceiver<String>,
    state: Arc<LatestFrame>,
    pending_events: VecDeque<String>,
}

impl SessionIo {
    pub(crate) fn new(events_rx: UnboundedReceiver<String>, state: Arc<LatestFrame>) -> Self {
        Self {
            events_rx,
            state,
            pending_events: VecDeque::new(),
        }
    }

    /// Resolves once an event or a new state frame is available.
    pub async fn wait_for_update(&mut self) {
        tokio::select! {
            Some(payload) = self.events_rx.recv() => {
                self.pending_events.push_back(payload);
            }
            _ = self.state.wait_for_update() => {}
        }
    }

    /// Everything ready to write right now: queued events first, then the
    /// newest state if one is pending.
    pub fn drain_ready(&mut self) -> Vec<String> {
        self.collect_events();
        let mut ready: Vec<String> = self.pending_events.drain(..).collect();
        if let Some(payload) = self.state.take_latest() {
            ready.push(payload);
        }
        ready
    }

    fn collect_events(&mut self) {
        while let Ok(payload) = self.events_rx.try_recv() {
            self.pending_events.push_back(payload);
        }
    }

    #[cfg(test)]
    pub fn pending_event_count(&mut self) -> usize {
        self.collect_events();
        self.pending_events.len()
    }

    #[cfg(test)]
    pub fn state(&self) -> &LatestFrame {
        &self.state
    }
}
