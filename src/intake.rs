use serde::{Deserialize, Serialize};
use std::path::Path;

/// What the intake boundary knows about a file handle. Browsers only
/// hand over picker metadata, never content.
#[derive(Clone, Debug, Deserialize)]
pub struct FileMeta {
    pub name: String,
    pub size: u64,
    #[serde(alias = "type")]
    pub mime_type: String,
}

/// Extensions advertised next to the drop zone.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["pdf", "docx", "doc", "txt"];

const ACCEPTED_MIME_TYPES: [&str; 4] = [
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/msword",
    "text/plain",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    UnsupportedType,
    TooLarge,
}

#[derive(Clone, Debug, Serialize)]
pub struct RejectedFile {
    pub name: String,
    pub reason: RejectReason,
}

/// Screen a file handle against the advertised allow-list. Names with an
/// extension are judged by it; extension-less names fall back to the
/// declared MIME type.
pub fn screen(meta: &FileMeta, max_size: u64) -> Result<(), RejectReason> {
    if meta.size > max_size {
        return Err(RejectReason::TooLarge);
    }

    if let Some(ext) = Path::new(&meta.name).extension().and_then(|e| e.to_str()) {
        if ACCEPTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()) {
            return Ok(());
        }
    } else if ACCEPTED_MIME_TYPES.contains(&meta.mime_type.as_str()) {
        return Ok(());
    }

    Err(RejectReason::UnsupportedType)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(name: &str, size: u64, mime_type: &str) -> FileMeta {
        FileMeta {
            name: name.to_string(),
            size,
            mime_type: mime_type.to_string(),
        }
    }

    #[test]
    fn accepts_advertised_extensions() {
        for name in ["a.pdf", "b.docx", "c.doc", "d.txt", "SHOUTY.PDF"] {
            assert!(screen(&meta(name, 1000, ""), 1 << 20).is_ok(), "{name}");
        }
    }

    #[test]
    fn rejects_unadvertised_extensions() {
        assert_eq!(
            screen(&meta("evil.exe", 1000, "application/pdf"), 1 << 20),
            Err(RejectReason::UnsupportedType)
        );
        assert_eq!(
            screen(&meta("notes.md", 1000, "text/plain"), 1 << 20),
            Err(RejectReason::UnsupportedType)
        );
    }

    #[test]
    fn extensionless_names_fall_back_to_mime() {
        assert!(screen(&meta("contract", 1000, "application/pdf"), 1 << 20).is_ok());
        assert_eq!(
            screen(&meta("contract", 1000, "image/png"), 1 << 20),
            Err(RejectReason::UnsupportedType)
        );
    }

    #[test]
    fn rejects_oversized_files() {
        assert_eq!(
            screen(&meta("big.pdf", 1001, ""), 1000),
            Err(RejectReason::TooLarge)
        );
        assert!(screen(&meta("fits.pdf", 1000, ""), 1000).is_ok());
    }

    #[test]
    fn deserializes_browser_field_names() {
        let parsed: FileMeta =
            serde_json::from_str(r#"{"name":"a.pdf","size":9,"type":"application/pdf"}"#).unwrap();
        assert_eq!(parsed.mime_type, "application/pdf");
    }
}
