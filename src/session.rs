use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use crate::intake::{self, FileMeta, RejectedFile};
use crate::records::{AnalysisHandle, UploadRecord, UploadStatus};
use crate::transport::{TransportEvent, UploadTransport};

/// Outcome of one intake call: what entered the session and what the
/// allow-list screened out.
#[derive(Clone, Debug, serde::Serialize)]
pub struct IntakeReport {
    pub accepted: Vec<UploadRecord>,
    pub rejected: Vec<RejectedFile>,
}

/// Owns every upload record for the lifetime of the page view. All
/// mutation happens here; consumers get cloned snapshots and a small
/// command surface, nothing else. Every state change is also published
/// on the broadcast channel for the SSE feed.
#[derive(Clone)]
pub struct UploadSession {
    records: Arc<Mutex<Vec<UploadRecord>>>,
    transfers: Arc<Mutex<HashMap<String, CancellationToken>>>,
    transport: Arc<dyn UploadTransport>,
    max_file_size: u64,
    tx: broadcast::Sender<String>,
}

impl UploadSession {
    pub fn new(
        transport: Arc<dyn UploadTransport>,
        max_file_size: u64,
        tx: broadcast::Sender<String>,
    ) -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            transfers: Arc::new(Mutex::new(HashMap::new())),
            transport,
            max_file_size,
            tx,
        }
    }

    /// Register a batch of file handles. Files passing the allow-list get
    /// a record at 0% and a running transfer; the rest come back in the
    /// report. Never fails.
    pub fn intake(&self, files: Vec<FileMeta>) -> IntakeReport {
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();

        for meta in files {
            if let Err(reason) = intake::screen(&meta, self.max_file_size) {
                info!("Rejected intake of {:?}: {:?}", meta.name, reason);
                rejected.push(RejectedFile {
                    name: meta.name,
                    reason,
                });
                continue;
            }

            let record = UploadRecord {
                id: Uuid::new_v4().to_string(),
                name: meta.name,
                size: meta.size,
                mime_type: meta.mime_type,
                progress: 0,
                status: UploadStatus::Uploading,
            };
            info!("Intake: {} (ID: {})", record.name, record.id);

            self.records.lock().unwrap().push(record.clone());
            self.start_transfer(record.id.clone());
            accepted.push(record);
        }

        if !accepted.is_empty() {
            self.publish();
        }

        IntakeReport { accepted, rejected }
    }

    /// Drop the record with this id and cancel its transfer. Unknown ids
    /// are a no-op, so calling twice is the same as calling once.
    pub fn remove(&self, id: &str) {
        if let Some(cancel) = self.transfers.lock().unwrap().remove(id) {
            cancel.cancel();
        }

        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        let removed = records.len() != before;
        drop(records);

        if removed {
            info!("Removed upload {}", id);
            self.publish();
        }
    }

    /// Hand-off for the analysis view. Pure read; works for any known
    /// record regardless of status.
    pub fn request_analysis(&self, id: &str) -> Option<AnalysisHandle> {
        let records = self.records.lock().unwrap();
        records.iter().find(|r| r.id == id).map(|r| AnalysisHandle {
            document_id: r.id.clone(),
            path: format!("/analysis/{}", r.id),
        })
    }

    pub fn get(&self, id: &str) -> Option<UploadRecord> {
        self.records.lock().unwrap().iter().find(|r| r.id == id).cloned()
    }

    /// Point-in-time copy of the collection, in intake order.
    pub fn snapshot(&self) -> Vec<UploadRecord> {
        self.records.lock().unwrap().clone()
    }

    fn start_transfer(&self, id: String) {
        let cancel = CancellationToken::new();
        self.transfers
            .lock()
            .unwrap()
            .insert(id.clone(), cancel.clone());

        let mut events = self.transport.start(cancel);
        let session = self.clone();
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                if !session.apply(&id, event) {
                    break;
                }
            }
            session.transfers.lock().unwrap().remove(&id);
        });
    }

    /// Apply one transport event to the record. Returns false once the
    /// record is gone or terminal; the driver stops for good then.
    fn apply(&self, id: &str, event: TransportEvent) -> bool {
        let mut records = self.records.lock().unwrap();
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            // Removed mid-flight; a late event must not resurrect it.
            return false;
        };
        if record.is_terminal() {
            return false;
        }

        match event {
            TransportEvent::Progress { percent } => {
                // Progress only ever moves up, and 100 is reserved for
                // completion.
                record.progress = record.progress.max(percent.min(99));
            }
            TransportEvent::Complete => {
                record.progress = 100;
                record.status = UploadStatus::Completed;
                info!("Upload complete: {} (ID: {})", record.name, id);
            }
            TransportEvent::Error { reason } => {
                record.status = UploadStatus::Error;
                debug!("Upload {} errored: {}", id, reason);
            }
        }

        let keep_going = !record.is_terminal();
        drop(records);
        self.publish();
        keep_going
    }

    fn publish(&self) {
        let _ = self.tx.send(
            serde_json::json!({
                "type": "uploads",
                "data": self.snapshot(),
            })
            .to_string(),
        );
    }
}
