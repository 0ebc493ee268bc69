//! Backend-agnostic types for the coursedocs pipeline.
//!
//! This crate owns the `(topic, category)` → document-URL mapping model, the
//! resolver over a mapping collection, the provider trait a real backend can
//! implement later, and the embed-session state machine the viewer surface
//! drives. No IO lives here.

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid mapping: {0}")]
    InvalidMapping(String),
    #[error("duplicate mapping: {0}")]
    DuplicateMapping(String),
    #[error("source failed: {0}")]
    Source(String),
    #[error("not configured: {0}")]
    NotConfigured(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// One association from a `(topic, category)` pair to an externally hosted
/// document.
///
/// `category` is an open string tag (`"theory"`, `"practical"`, ...); the
/// composite `(topic, category)` key is unique within a collection.
/// Deserialization also accepts the legacy wire shape
/// `{topic, type, pdfUrl}` used by the anticipated backend API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicMapping {
    pub topic: String,
    #[serde(alias = "type")]
    pub category: String,
    /// Share-style URL as hosted (not the embeddable form).
    #[serde(alias = "pdfUrl")]
    pub source_url: String,
}

impl TopicMapping {
    pub fn new(
        topic: impl Into<String>,
        category: impl Into<String>,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            category: category.into(),
            source_url: source_url.into(),
        }
    }
}

/// Point-lookup over a mapping collection.
///
/// Absence is a normal outcome: `lookup` returns `None` and callers render a
/// "not yet available" state rather than treating it as an error.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    mappings: Vec<TopicMapping>,
}

impl Resolver {
    /// Builds a resolver, enforcing the collection invariants up front:
    /// no blank topic/category keys, no duplicate `(topic, category)` pairs.
    ///
    /// Failing loudly here beats last-writer-wins shadowing a mapping later.
    pub fn new(mappings: Vec<TopicMapping>) -> Result<Self> {
        for (i, m) in mappings.iter().enumerate() {
            if m.topic.trim().is_empty() || m.category.trim().is_empty() {
                return Err(Error::InvalidMapping(format!(
                    "entry {i} has a blank topic or category"
                )));
            }
            if mappings[..i]
                .iter()
                .any(|p| p.topic == m.topic && p.category == m.category)
            {
                return Err(Error::DuplicateMapping(format!(
                    "({}, {})",
                    m.topic, m.category
                )));
            }
        }
        Ok(Self { mappings })
    }

    /// Exact, case-sensitive match on both fields.
    ///
    /// An absent or blank topic/category short-circuits to `None` without
    /// scanning the collection (a blank key can never match a real mapping).
    pub fn lookup(&self, topic: Option<&str>, category: Option<&str>) -> Option<&TopicMapping> {
        let topic = topic?;
        let category = category?;
        if topic.trim().is_empty() || category.trim().is_empty() {
            return None;
        }
        self.mappings
            .iter()
            .find(|m| m.topic == topic && m.category == category)
    }

    pub fn mappings(&self) -> &[TopicMapping] {
        &self.mappings
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// Where mapping collections come from (compiled-in seed today, remote API
/// later). Swapping the backend must not change the resolver's shape.
#[async_trait::async_trait]
pub trait MappingSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn list_mappings(&self) -> Result<Vec<TopicMapping>>;
}

/// Sandbox tokens the embedding frame runs under: the minimum common
/// document-preview widgets need, and nothing broader.
pub const SANDBOX_POLICY: &[&str] = &[
    "allow-same-origin",
    "allow-scripts",
    "allow-popups",
    "allow-forms",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbedState {
    /// No document URL was supplied. Distinct from a load failure.
    NoDocument,
    Loading,
    Loaded,
    Failed,
}

/// One embed attempt for one normalized URL.
///
/// `Loading → Loaded` and `Loading → Failed` are mutually exclusive and
/// terminal for that URL; callbacks arriving after a terminal state are
/// ignored (the stale-frame case). A new URL restarts the session at
/// `Loading` via [`EmbedSession::restart`].
#[derive(Debug, Clone, Serialize)]
pub struct EmbedSession {
    original_url: String,
    preview_url: String,
    state: EmbedState,
}

impl EmbedSession {
    pub fn new(original_url: impl Into<String>, preview_url: impl Into<String>) -> Self {
        let original_url = original_url.into();
        let preview_url = preview_url.into();
        let state = if preview_url.trim().is_empty() {
            EmbedState::NoDocument
        } else {
            EmbedState::Loading
        };
        Self {
            original_url,
            preview_url,
            state,
        }
    }

    pub fn state(&self) -> EmbedState {
        self.state
    }

    /// URL the frame renders; `None` when there is no document.
    pub fn preview_url(&self) -> Option<&str> {
        match self.state {
            EmbedState::NoDocument => None,
            _ => Some(&self.preview_url),
        }
    }

    /// Frame load event. Returns whether the transition applied.
    pub fn on_load(&mut self) -> bool {
        if self.state == EmbedState::Loading {
            self.state = EmbedState::Loaded;
            true
        } else {
            false
        }
    }

    /// Frame error event. Returns whether the transition applied.
    pub fn on_error(&mut self) -> bool {
        if self.state == EmbedState::Loading {
            self.state = EmbedState::Failed;
            true
        } else {
            false
        }
    }

    /// Escape hatch: the *original* share URL, for opening in a top-level
    /// context when sandboxed embedding fails (provider restrictions,
    /// popups). `None` when there is no document.
    pub fn open_externally(&self) -> Option<&str> {
        match self.state {
            EmbedState::NoDocument => None,
            _ => Some(&self.original_url),
        }
    }

    /// Point the session at a new URL, restarting at `Loading` (or
    /// `NoDocument` for a blank URL). Any outcome of the previous URL is
    /// discarded.
    pub fn restart(&mut self, original_url: impl Into<String>, preview_url: impl Into<String>) {
        *self = Self::new(original_url, preview_url);
    }
}
