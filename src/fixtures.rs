use serde_json::{Value, json};

use crate::records::UploadRecord;

/// Canned analysis content backing the demo's analysis view. There is no
/// real parser or model behind it; every document gets the same report,
/// keyed to its record.
pub fn analysis_report(record: &UploadRecord) -> Value {
    json!({
        "document_id": record.id,
        "document": record.name,
        "verification": [
            {
                "category": "Document Authenticity",
                "status": "passed",
                "message": "Digital signature verified",
                "details": "Document contains valid digital signatures from all parties",
            },
            {
                "category": "Legal Compliance",
                "status": "passed",
                "message": "Compliant with state regulations",
                "details": "Document meets all requirements for legal service agreements in this jurisdiction",
            },
            {
                "category": "Risk Assessment",
                "status": "warning",
                "message": "Potential liability clause concern",
                "details": "Liability limitation clause may not be enforceable in all jurisdictions",
            },
            {
                "category": "Completeness Check",
                "status": "failed",
                "message": "Missing required disclosure",
                "details": "Document lacks mandatory fee disclosure statement required by state bar",
            },
        ],
        "summary": {
            "title": record.name,
            "pages": "12 pages",
            "preset": "Technology preset",
            "key_definitions": [
                {
                    "term": "Services",
                    "definition": "The software services provided by Acme Corp as described in Exhibit A.",
                },
                {
                    "term": "Confidential Information",
                    "definition": "Any non-public information disclosed by either party during the term of this agreement.",
                },
            ],
            "points": [
                {
                    "category": "key_clause",
                    "title": "Retainer Fee",
                    "content": "Client must pay $5,000 retainer fee upon agreement execution",
                    "importance": "high",
                },
                {
                    "category": "obligation",
                    "title": "Confidentiality Requirement",
                    "content": "Attorney must maintain strict confidentiality of all client information",
                    "importance": "high",
                },
                {
                    "category": "term",
                    "title": "Termination Notice",
                    "content": "Either party may terminate with 30 days written notice",
                    "importance": "medium",
                },
                {
                    "category": "risk",
                    "title": "Liability Limitation",
                    "content": "Attorney liability limited to fees paid - may not be enforceable",
                    "importance": "medium",
                },
            ],
        },
        "assistant_replies": [
            "Based on the Service Agreement analysis, the key obligations include a $5,000 retainer fee upon execution and strict confidentiality requirements. The termination clause allows either party to end the agreement with 30 days written notice.",
            "The document shows medium risk in the liability limitation clause, which may not be enforceable in all jurisdictions. I recommend reviewing this with legal counsel.",
        ],
        "suggested_questions": [
            "What are the main obligations for each party?",
            "What are the termination conditions?",
            "Are there any high-risk clauses I should be aware of?",
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::UploadStatus;

    #[test]
    fn report_is_keyed_to_the_record() {
        let record = UploadRecord {
            id: "abc".to_string(),
            name: "Service Agreement.pdf".to_string(),
            size: 1024,
            mime_type: "application/pdf".to_string(),
            progress: 100,
            status: UploadStatus::Completed,
        };

        let report = analysis_report(&record);
        assert_eq!(report["document_id"], "abc");
        assert_eq!(report["document"], "Service Agreement.pdf");
        assert_eq!(report["verification"].as_array().unwrap().len(), 4);
        assert_eq!(report["summary"]["points"].as_array().unwrap().len(), 4);
        assert!(!report["assistant_replies"].as_array().unwrap().is_empty());
    }
}
