use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Uploading,
    Completed,
    Error,
}

/// One tracked upload. `progress` is a percentage in 0..=100 and only
/// ever moves up; it reads 100 exactly when `status` is `completed`.
#[derive(Clone, Debug, Serialize)]
pub struct UploadRecord {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub progress: u8,
    pub status: UploadStatus,
}

impl UploadRecord {
    /// Completed and errored records are frozen: nothing mutates them again.
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, UploadStatus::Completed | UploadStatus::Error)
    }
}

/// Opaque hand-off returned by an analyze command. The frontend uses
/// `path` to navigate; the record itself is untouched.
#[derive(Clone, Debug, Serialize)]
pub struct AnalysisHandle {
    pub document_id: String,
    pub path: String,
}
