use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::Topic;

/// The precomputed feed document produced by the upstream pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedDocument {
    #[serde(default)]
    pub generated_at: Option<String>,
    pub stats: StatsSummary,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

/// Reads a counter that the pipeline may write as `null`, treating it as 0.
pub(crate) fn count_or_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsSummary {
    #[serde(deserialize_with = "count_or_zero")]
    pub screened_items: u64,
    #[serde(deserialize_with = "count_or_zero")]
    pub total_topics: u64,
    #[serde(deserialize_with = "count_or_zero")]
    pub trending_topics: u64,
    #[serde(deserialize_with = "count_or_zero")]
    pub new_policies: u64,
    pub by_type: CategoryCounts,
}

/// Topic counts per policy category, in document order.
///
/// A plain map would lose the order the categories appear in the feed,
/// which is the tie-breaker when two categories share a count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts(Vec<(String, u64)>);

impl CategoryCounts {
    pub fn new(entries: Vec<(String, u64)>) -> Self {
        Self(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn get(&self, category: &str) -> Option<u64> {
        self.iter()
            .find(|(name, _)| *name == category)
            .map(|(_, count)| count)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for CategoryCounts {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CountsVisitor;

        impl<'de> Visitor<'de> for CountsVisitor {
            type Value = CategoryCounts;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category name to topic count")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, count)) = map.next_entry::<String, Option<u64>>()? {
                    let count = count.unwrap_or_default();
                    // Later duplicates win, keeping the first position.
                    match entries.iter_mut().find(|entry: &&mut (String, u64)| entry.0 == name) {
                        Some(existing) => existing.1 = count,
                        None => entries.push((name, count)),
                    }
                }
                Ok(CategoryCounts(entries))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(CategoryCounts::default())
            }
        }

        deserializer.deserialize_any(CountsVisitor)
    }
}
