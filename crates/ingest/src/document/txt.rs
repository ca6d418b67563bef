use ragchunk_core::IngestError;

use super::ExtractedText;

pub fn extract_txt(bytes: &[u8]) -> Result<ExtractedText, IngestError> {
    // Try UTF-8 first, fall back to lossy conversion
    let text = String::from_utf8(bytes.to_vec())
        .unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned());

    Ok(ExtractedText {
        text: text.trim().to_string(),
        ..ExtractedText::default()
    })
}
