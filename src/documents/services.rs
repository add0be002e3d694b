use bytes::Bytes;
use serde::Serialize;
use tracing::warn;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Outcome for one uploaded file. Exactly one of `text` / `error` is set.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FileText {
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileText {
    fn failed(filename: String, error: impl Into<String>) -> Self {
        Self {
            filename,
            text: None,
            error: Some(error.into()),
        }
    }
}

/// Extracts the text of all pages. Parser errors and parser panics are
/// reported on the returned entry instead of failing the request.
pub async fn extract_text(filename: String, content_type: Option<&str>, body: Bytes) -> FileText {
    if content_type != Some(PDF_CONTENT_TYPE) {
        return FileText::failed(filename, "Only PDF files are supported");
    }

    let parsed =
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&body)).await;

    match parsed {
        Ok(Ok(text)) => FileText {
            filename,
            text: Some(text.trim().to_string()),
            error: None,
        },
        Ok(Err(e)) => {
            warn!(error = %e, %filename, "pdf extraction failed");
            FileText::failed(filename, format!("Failed to extract text: {}", e))
        }
        Err(e) => {
            warn!(error = %e, %filename, "pdf extraction task aborted");
            FileText::failed(filename, "Failed to extract text")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn non_pdf_content_type_is_rejected_per_file() {
        let out = extract_text(
            "photo.png".into(),
            Some("image/png"),
            Bytes::from_static(b"\x89PNG"),
        )
        .await;
        assert_eq!(out.filename, "photo.png");
        assert!(out.text.is_none());
        assert_eq!(out.error.as_deref(), Some("Only PDF files are supported"));
    }

    #[tokio::test]
    async fn missing_content_type_is_rejected() {
        let out = extract_text("blob".into(), None, Bytes::new()).await;
        assert!(out.error.is_some());
    }

    #[tokio::test]
    async fn corrupt_pdf_is_captured_not_propagated() {
        let out = extract_text(
            "broken.pdf".into(),
            Some(PDF_CONTENT_TYPE),
            Bytes::from_static(b"this is not a pdf at all"),
        )
        .await;
        assert!(out.text.is_none());
        assert!(out.error.unwrap().starts_with("Failed to extract text"));
    }
}
