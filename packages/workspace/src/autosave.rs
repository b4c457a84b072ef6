//! Debounced persistence of the live tree.
//!
//! Every payload change re-arms a single timer; when it fires the tree is
//! saved, unless the campaign is no longer a draft — non-draft campaigns
//! must never be overwritten by background saves. Failures are logged and
//! swallowed; the next edit re-arms the timer. Saves carry a local sequence
//! number so a slow response can't clobber the timestamp of a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use mailcraft_blocks::{AutoSavePayload, CampaignStatus};

use crate::api::SaveBackend;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(2000);

#[derive(Debug)]
struct SaveState {
    status: CampaignStatus,
    is_saving: bool,
    last_saved: Option<DateTime<Utc>>,
    last_acked_seq: u64,
}

pub struct AutoSaveCoordinator {
    campaign_id: String,
    delay: Duration,
    backend: Arc<dyn SaveBackend>,
    state: Arc<Mutex<SaveState>>,
    seq: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
    last_payload: Option<AutoSavePayload>,
}

impl AutoSaveCoordinator {
    pub fn new(campaign_id: impl Into<String>, backend: Arc<dyn SaveBackend>) -> Self {
        Self::with_delay(campaign_id, backend, DEFAULT_DEBOUNCE)
    }

    pub fn with_delay(
        campaign_id: impl Into<String>,
        backend: Arc<dyn SaveBackend>,
        delay: Duration,
    ) -> Self {
        Self {
            campaign_id: campaign_id.into(),
            delay,
            backend,
            state: Arc::new(Mutex::new(SaveState {
                status: CampaignStatus::Draft,
                is_saving: false,
                last_saved: None,
                last_acked_seq: 0,
            })),
            seq: Arc::new(AtomicU64::new(0)),
            pending: None,
            last_payload: None,
        }
    }

    /// Track the campaign's current status; the draft gate reads it at
    /// timer-fire time, not at notify time.
    pub fn set_status(&self, status: CampaignStatus) {
        self.state.lock().unwrap().status = status;
    }

    /// Observe the (possibly) changed payload. Re-arms the debounce timer
    /// when the payload actually differs from the last observed one.
    pub fn notify(&mut self, payload: AutoSavePayload) {
        if self.last_payload.as_ref() == Some(&payload) {
            return;
        }
        self.last_payload = Some(payload.clone());
        self.cancel_pending();

        let backend = Arc::clone(&self.backend);
        let state = Arc::clone(&self.state);
        let seq = Arc::clone(&self.seq);
        let campaign_id = self.campaign_id.clone();
        let delay = self.delay;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The save itself runs detached so a re-arm (which aborts the
            // timer task) can no longer cancel an in-flight request.
            tokio::spawn(perform_save(backend, campaign_id, payload, state, seq));
        }));
    }

    /// Save immediately, preempting any pending timer. Subject to the same
    /// draft-only gate; a no-op when nothing was ever observed.
    pub async fn save_now(&mut self) {
        self.cancel_pending();
        let Some(payload) = self.last_payload.clone() else {
            return;
        };
        perform_save(
            Arc::clone(&self.backend),
            self.campaign_id.clone(),
            payload,
            Arc::clone(&self.state),
            Arc::clone(&self.seq),
        )
        .await;
    }

    pub fn is_saving(&self) -> bool {
        self.state.lock().unwrap().is_saving
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.state.lock().unwrap().last_saved
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for AutoSaveCoordinator {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

async fn perform_save(
    backend: Arc<dyn SaveBackend>,
    campaign_id: String,
    payload: AutoSavePayload,
    state: Arc<Mutex<SaveState>>,
    seq: Arc<AtomicU64>,
) {
    {
        let state = state.lock().unwrap();
        if !state.status.is_draft() {
            debug!(campaign = %campaign_id, status = %state.status, "skipping auto-save for non-draft campaign");
            return;
        }
    }

    let my_seq = seq.fetch_add(1, Ordering::SeqCst) + 1;
    state.lock().unwrap().is_saving = true;

    match backend.auto_save(&campaign_id, payload).await {
        Ok(response) => {
            let mut state = state.lock().unwrap();
            if my_seq > state.last_acked_seq {
                state.last_acked_seq = my_seq;
                state.last_saved = Some(response.last_saved);
            } else {
                debug!(campaign = %campaign_id, seq = my_seq, "stale auto-save response discarded");
            }
        }
        Err(error) => {
            // Swallowed on purpose; the next edit re-arms the timer.
            warn!(campaign = %campaign_id, error = %error, "auto-save failed");
        }
    }

    state.lock().unwrap().is_saving = false;
}

/// Render the "last saved" caption for the editor chrome.
pub fn format_last_saved(last_saved: Option<DateTime<Utc>>) -> String {
    let Some(at) = last_saved else {
        return "Never".to_string();
    };

    let elapsed = Utc::now().signed_duration_since(at);
    if elapsed.num_seconds() < 60 {
        return "Just now".to_string();
    }

    let minutes = elapsed.num_minutes();
    if minutes < 60 {
        let unit = if minutes == 1 { "minute" } else { "minutes" };
        return format!("{} {} ago", minutes, unit);
    }

    at.with_timezone(&Local).format("%H:%M").to_string()
}
