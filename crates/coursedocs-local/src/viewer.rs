//! The embedding surface and the selection → document pipeline.
//!
//! A selection resolves to a mapping (or a "not yet available" state), the
//! mapping's share URL normalizes to a preview URL, and the preview URL is
//! rendered in a sandboxed frame whose load outcome drives
//! [`EmbedSession`].

use coursedocs_core::{EmbedSession, Resolver, TopicMapping, SANDBOX_POLICY};
use serde::Serialize;

use crate::drive::normalize_document_url;

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Sandboxed frame markup for a preview URL.
///
/// The sandbox carries exactly [`SANDBOX_POLICY`]: the minimum common
/// document-preview widgets need (same-origin storage, scripts, popups,
/// form submission) and nothing broader.
pub fn iframe_html(preview_url: &str) -> String {
    format!(
        r#"<iframe src="{}" sandbox="{}" title="Document preview" style="width:100%;height:100%;border:0"></iframe>"#,
        escape_attr(preview_url),
        SANDBOX_POLICY.join(" "),
    )
}

/// Ephemeral selection: set by user interaction, cleared on close.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewRequest {
    pub topic: Option<String>,
    pub category: Option<String>,
}

impl ViewRequest {
    pub fn new(topic: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            topic: Some(topic.into()),
            category: Some(category.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewOutcome {
    /// Mapping found; the embed session starts in `Loading` for the
    /// normalized preview URL.
    Found {
        mapping: TopicMapping,
        preview_url: String,
        embed_html: String,
        session: EmbedSession,
    },
    /// No mapping for this selection. Not an error; the surface renders the
    /// fallback message and the frame is never created.
    NotAvailable { message: String },
}

/// Resolve a selection and, on a hit, hand the normalized URL to the
/// embedding surface. On a miss the surface is never invoked.
pub fn view(resolver: &Resolver, req: &ViewRequest) -> ViewOutcome {
    let mapping = match resolver.lookup(req.topic.as_deref(), req.category.as_deref()) {
        Some(m) => m.clone(),
        None => {
            let message = match req.topic.as_deref().filter(|t| !t.trim().is_empty()) {
                Some(topic) => format!("Study material for {topic} will be available soon"),
                None => "Study material will be available soon".to_string(),
            };
            return ViewOutcome::NotAvailable { message };
        }
    };
    let preview_url = normalize_document_url(&mapping.source_url);
    let embed_html = iframe_html(&preview_url);
    let session = EmbedSession::new(mapping.source_url.clone(), preview_url.clone());
    ViewOutcome::Found {
        mapping,
        preview_url,
        embed_html,
        session,
    }
}
