//! Document-provider URL rewriting (bounded, deterministic).
//!
//! Providers hand humans a "share" link and embedders a different "preview"
//! link. We only rewrite when the share shape is unambiguous; everything
//! else passes through unchanged so non-Drive providers keep working
//! without special-casing.

use url::Url;

// The normalizer is pure: the preview host is part of the output contract,
// not configuration.
const DRIVE_PREVIEW_BASE: &str = "https://drive.google.com";

fn file_id_prefix(segment: &str) -> &str {
    let end = segment
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(segment.len());
    &segment[..end]
}

/// If `url` carries a `file/d/<id>` path (Google Drive's share shape),
/// return the embeddable preview URL, discarding any trailing segments
/// (`/view`, `/edit`) and query parameters.
///
/// The id is the maximal `[A-Za-z0-9_-]+` run after `file/d/`; the host is
/// not inspected, matching how share links get pasted around with vanity
/// or regional hosts. This does not perform network IO.
pub fn drive_preview_candidate(url: &str) -> Option<String> {
    let u = Url::parse(url.trim()).ok()?;
    let segs: Vec<&str> = u.path_segments()?.collect();
    for i in 0..segs.len().saturating_sub(2) {
        if segs[i] != "file" || segs[i + 1] != "d" {
            continue;
        }
        let id = file_id_prefix(segs[i + 2]);
        if id.is_empty() {
            continue;
        }
        return Some(format!("{DRIVE_PREVIEW_BASE}/file/d/{id}/preview"));
    }
    None
}

/// Share URL in, embeddable URL out; non-matching input passes through
/// unchanged. Idempotent: a preview URL re-matches and re-produces itself.
pub fn normalize_document_url(url: &str) -> String {
    drive_preview_candidate(url).unwrap_or_else(|| url.to_string())
}
