// Domain rules - Naming and selection policies shared by extraction and URL lookup

use crate::domain::errors::*;
use crate::domain::model::*;

/// Phase name used for the whole-video GIF
pub const FULL_CLIP_NAME: &str = "full_swing";

/// Phase-name fragments that switch on the motion-highlight overlay
const MOTION_KEYWORDS: &[&str] = &["impact", "follow"];

/// Whether a phase gets the motion-highlight overlay (case-insensitive match)
pub fn tracks_motion(phase_name: &str) -> bool {
    let lowered = phase_name.to_lowercase();
    MOTION_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}

/// Filesystem-safe base name: lowercase, every char outside `[a-z0-9]` becomes `_`.
///
/// Both extraction and [`public_url`] go through this function so the file
/// written and the URL handed to clients cannot drift apart.
pub fn sanitize_phase_name(phase_name: &str) -> String {
    phase_name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '_' })
        .collect()
}

/// Output filename for a phase
pub fn output_file_name(phase_name: &str, kind: OutputKind) -> String {
    format!("{}.{}", sanitize_phase_name(phase_name), kind.extension())
}

/// Public retrieval path for a phase output
pub fn public_url(url_prefix: &str, analysis_id: &str, phase_name: &str, kind: OutputKind) -> String {
    format!(
        "{}/{}/{}",
        url_prefix.trim_end_matches('/'),
        analysis_id,
        output_file_name(phase_name, kind)
    )
}

/// Reject analysis ids that could escape the per-analysis directory
pub fn validate_analysis_id(analysis_id: &str) -> Result<(), DomainError> {
    if analysis_id.trim().is_empty() {
        return Err(DomainError::BadArgs("Analysis id cannot be empty".to_string()));
    }

    if analysis_id.contains(|c| c == '/' || c == '\\') || analysis_id.contains("..") {
        return Err(DomainError::BadArgs(format!(
            "Analysis id must not contain path components: {}",
            analysis_id
        )));
    }

    Ok(())
}
