//! Compiled-in mapping source.
//!
//! The department ships a fixed syllabus today; a backend API with the same
//! wire shape is anticipated (see `remote`). Keeping the seed behind
//! [`MappingSource`] means the swap touches only the source construction.

use coursedocs_core::{MappingSource, Result, TopicMapping};
use serde::Serialize;

const THEORY: &str = "theory";
const PRACTICAL: &str = "practical";

fn seed_mappings() -> Vec<TopicMapping> {
    let theory = [
        ("Mechanics", "12atHLqxiyCqhhr_QTyOmSDVUpo1nTBaj"),
        ("Thermodynamics", "12atHLqxiyCqhhr_QTyOmSDVUpo1nTBaj"),
        ("Waves & Oscillations", "1example3"),
        ("Electricity & Magnetism", "1example4"),
        ("Optics", "1example5"),
        ("Modern Physics", "1example6"),
    ];
    let practical = [
        ("Young's Modulus", "1practical1"),
        ("Rigidity Modulus (Static Method)", "1practical2"),
        ("Solar Cell Experiment", "1practical3"),
        ("Band Gap (Four Probe)", "1practical4"),
        ("Frank Hertz Experiment", "1practical5"),
        ("Cymatics Experiment", "1practical6"),
        ("Newton's Ring Experiment", "1practical7"),
    ];
    let share = |id: &str| format!("https://drive.google.com/file/d/{id}/view?usp=sharing");
    theory
        .iter()
        .map(|(t, id)| TopicMapping::new(*t, THEORY, share(id)))
        .chain(
            practical
                .iter()
                .map(|(t, id)| TopicMapping::new(*t, PRACTICAL, share(id))),
        )
        .collect()
}

/// The static seed collection. `list_mappings` never fails and never blocks.
#[derive(Debug, Clone, Default)]
pub struct StaticSource;

#[async_trait::async_trait]
impl MappingSource for StaticSource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn list_mappings(&self) -> Result<Vec<TopicMapping>> {
        Ok(seed_mappings())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTopics {
    pub category: String,
    pub topics: Vec<String>,
}

/// Topic names grouped by category. Categories appear in first-seen order
/// (the seed lists theory before practical) and each category preserves its
/// listing order. This is the syllabus-overview view of a mapping
/// collection.
pub fn topics_by_category(mappings: &[TopicMapping]) -> Vec<CategoryTopics> {
    let mut out: Vec<CategoryTopics> = Vec::new();
    for m in mappings {
        match out.iter_mut().find(|g| g.category == m.category) {
            Some(g) => g.topics.push(m.topic.clone()),
            None => out.push(CategoryTopics {
                category: m.category.clone(),
                topics: vec![m.topic.clone()],
            }),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursedocs_core::Resolver;

    #[tokio::test]
    async fn seed_builds_a_valid_resolver() {
        let mappings = StaticSource.list_mappings().await.unwrap();
        let r = Resolver::new(mappings).unwrap();
        assert_eq!(r.len(), 13);
        let m = r.lookup(Some("Mechanics"), Some(THEORY)).unwrap();
        assert!(m.source_url.contains("/file/d/"));
        // The practical roster uses distinct keys even where topics repeat
        // across categories elsewhere.
        assert!(r.lookup(Some("Newton's Ring Experiment"), Some(PRACTICAL)).is_some());
        assert!(r.lookup(Some("Newton's Ring Experiment"), Some(THEORY)).is_none());
    }

    #[tokio::test]
    async fn grouping_preserves_listing_order() {
        let mappings = StaticSource.list_mappings().await.unwrap();
        let grouped = topics_by_category(&mappings);
        // Theory first, as the syllabus presents it.
        let categories: Vec<&str> = grouped.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(categories, vec![THEORY, PRACTICAL]);
        assert_eq!(grouped[0].topics.len(), 6);
        assert_eq!(grouped[1].topics.len(), 7);
        assert_eq!(grouped[0].topics[0], "Mechanics");
        assert_eq!(grouped[1].topics[0], "Young's Modulus");
    }
}
