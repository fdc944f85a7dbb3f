//! JSON interchange for show data.
//!
//! Exports a timeline as a pretty-printed JSON array of flat firework
//! records (the download format the planner offers), and imports the same
//! format back. Import goes through the timeline's validating record path,
//! so uploaded files with tampered derived fields, unknown references, or
//! cycles are rejected or repaired rather than trusted.

use skyshow_timeline::ShowTimeline;
use skyshow_types::Firework;

use crate::error::StoreError;

/// Serialize a timeline to the pretty-printed JSON interchange format.
///
/// # Errors
///
/// Returns [`StoreError::Serialization`] if JSON encoding fails.
pub fn export_show(show: &ShowTimeline) -> Result<String, StoreError> {
    let records = show.to_records();
    let json = serde_json::to_string_pretty(&records)?;
    tracing::debug!(count = records.len(), "Exported show to JSON");
    Ok(json)
}

/// Rebuild a timeline from the JSON interchange format.
///
/// The input is untrusted: after decoding, the records pass through the
/// timeline's full validation and a fresh resolve, so derived start and
/// end times are recomputed rather than taken from the file.
///
/// # Errors
///
/// Returns [`StoreError::Serialization`] for malformed JSON or
/// [`StoreError::Timeline`] when the decoded records fail validation.
pub fn import_show(json: &str) -> Result<ShowTimeline, StoreError> {
    let records: Vec<Firework> = serde_json::from_str(json)?;
    let show = ShowTimeline::from_records(records)?;
    tracing::debug!(count = show.len(), "Imported show from JSON");
    Ok(show)
}
