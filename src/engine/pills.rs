use crate::domain::{CategoryCounts, FilterCategory};

/// Category whose pill always sorts last.
pub const OTHER_CATEGORY: &str = "Other";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPill {
    pub label: String,
    /// `None` for the synthetic `All` pill.
    pub count: Option<u64>,
    pub filter: FilterCategory,
}

impl FilterPill {
    fn all() -> Self {
        Self {
            label: "All".to_string(),
            count: None,
            filter: FilterCategory::All,
        }
    }
}

/// `All` first, then categories by descending count (document order on
/// ties), with `Other` forced to the end.
pub fn derive_pills(by_type: &CategoryCounts) -> Vec<FilterPill> {
    let mut categories: Vec<(&str, u64)> = by_type.iter().collect();
    categories.sort_by_key(|&(name, count)| (name == OTHER_CATEGORY, std::cmp::Reverse(count)));

    std::iter::once(FilterPill::all())
        .chain(categories.into_iter().map(|(name, count)| FilterPill {
            label: name.to_string(),
            count: Some(count),
            filter: FilterCategory::from_key(name),
        }))
        .collect()
}
