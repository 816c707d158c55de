use crate::{Category, CategoryCount, ItemStatus, ReviewItem, Severity, Stats};
use std::cmp::Reverse;
use std::collections::HashSet;
use thiserror::Error;

/// Errors that can occur when building a store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate review item id: {0}")]
    DuplicateId(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// In-memory review state for one analysed document.
///
/// Holds the canonical ordered list of findings. Every write replaces the
/// whole collection and bumps [`ReviewStore::version`], so a consumer can
/// cache derived views and recompute only when the version moves.
#[derive(Debug, Clone)]
pub struct ReviewStore {
    seed: Vec<ReviewItem>,
    items: Vec<ReviewItem>,
    version: u64,
}

impl ReviewStore {
    /// Build a store from a seed collection.
    ///
    /// The seed is kept so [`ReviewStore::reset_all`] can restore it later.
    /// Fails if two findings share an id.
    pub fn new(seed: Vec<ReviewItem>) -> Result<Self> {
        let mut seen = HashSet::new();
        for item in &seed {
            if !seen.insert(item.id()) {
                return Err(StoreError::DuplicateId(item.id().to_owned()));
            }
        }
        Ok(Self::from_seed(seed))
    }

    /// Store seeded with the built-in sample report findings.
    pub fn with_sample() -> Self {
        Self::from_seed(crate::seed::sample_findings())
    }

    fn from_seed(seed: Vec<ReviewItem>) -> Self {
        let items = seed.clone();
        Self {
            seed,
            items,
            version: 0,
        }
    }

    /// Current snapshot in collection order.
    pub fn items(&self) -> &[ReviewItem] {
        &self.items
    }

    /// Look up a finding by id.
    pub fn get(&self, id: &str) -> Option<&ReviewItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Snapshot counter, incremented on every write.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Flip a finding between open and resolved.
    ///
    /// Returns the new status. An unknown id leaves the collection (and the
    /// version) untouched and returns `None`; this is not an error.
    pub fn toggle_status(&mut self, id: &str) -> Option<ItemStatus> {
        let Some(pos) = self.items.iter().position(|item| item.id() == id) else {
            tracing::debug!(id, "toggle ignored: no such review item");
            return None;
        };

        let next: Vec<ReviewItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                if idx == pos {
                    item.with_status(item.status().toggled())
                } else {
                    item.clone()
                }
            })
            .collect();

        let status = next[pos].status();
        self.replace(next);
        tracing::debug!(id, %status, version = self.version, "review item toggled");
        Some(status)
    }

    /// Replace the collection with a fresh copy of the seed, every finding open.
    pub fn reset_all(&mut self) {
        let fresh = self
            .seed
            .iter()
            .map(|item| item.with_status(ItemStatus::Open))
            .collect();
        self.replace(fresh);
        tracing::debug!(version = self.version, "review state reset");
    }

    fn replace(&mut self, items: Vec<ReviewItem>) {
        self.items = items;
        self.version += 1;
    }

    /// Summary counts over the current collection.
    ///
    /// Per-severity counts include open findings only and skip `Info`.
    pub fn stats(&self) -> Stats {
        let open_with = |severity: Severity| {
            self.items
                .iter()
                .filter(|item| item.severity() == severity && item.is_open())
                .count()
        };

        Stats {
            critical_count: open_with(Severity::Critical),
            major_count: open_with(Severity::Major),
            minor_count: open_with(Severity::Minor),
            total_issues: self.items.len(),
            resolved_count: self
                .items
                .iter()
                .filter(|item| item.status() == ItemStatus::Resolved)
                .count(),
        }
    }

    /// Open-finding counts per category.
    ///
    /// Categories without open findings are omitted. Entries appear in the
    /// order their category is first seen among open findings.
    pub fn category_breakdown(&self) -> Vec<CategoryCount> {
        let mut counts: Vec<CategoryCount> = Vec::new();
        for item in self.items.iter().filter(|item| item.is_open()) {
            match counts.iter_mut().find(|c| c.category == item.category()) {
                Some(entry) => entry.count += 1,
                None => counts.push(CategoryCount {
                    category: item.category(),
                    count: 1,
                }),
            }
        }
        counts
    }

    /// Open findings in a single category (0 if none).
    pub fn open_count_for(&self, category: Category) -> usize {
        self.items
            .iter()
            .filter(|item| item.category() == category && item.is_open())
            .count()
    }

    /// `(resolved, total)` for a single category.
    pub fn category_progress(&self, category: Category) -> (usize, usize) {
        self.items
            .iter()
            .filter(|item| item.category() == category)
            .fold((0, 0), |(resolved, total), item| {
                let resolved = if item.is_open() { resolved } else { resolved + 1 };
                (resolved, total + 1)
            })
    }

    /// All findings in a category in display order.
    ///
    /// Open before resolved, then by descending severity weight. The sort is
    /// stable, so ties keep collection order.
    pub fn items_by_category(&self, category: Category) -> Vec<&ReviewItem> {
        let mut items: Vec<&ReviewItem> = self
            .items
            .iter()
            .filter(|item| item.category() == category)
            .collect();
        items.sort_by_key(|item| (!item.is_open(), Reverse(item.severity().weight())));
        items
    }
}

impl Default for ReviewStore {
    fn default() -> Self {
        Self::with_sample()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PageRef;

    fn item(id: &str, severity: Severity, category: Category) -> ReviewItem {
        ReviewItem::new(id, PageRef::Number(1), "loc", "issue", "fix", severity, category)
    }

    #[test]
    fn new_rejects_duplicate_ids() {
        let seed = vec![
            item("a", Severity::Minor, Category::Format),
            item("a", Severity::Major, Category::Logic),
        ];
        let err = ReviewStore::new(seed).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn toggle_flips_and_bumps_version() {
        let mut store = ReviewStore::with_sample();
        assert_eq!(store.version(), 0);

        assert_eq!(store.toggle_status("c1"), Some(ItemStatus::Resolved));
        assert_eq!(store.get("c1").unwrap().status(), ItemStatus::Resolved);
        assert_eq!(store.version(), 1);

        // Toggle back
        assert_eq!(store.toggle_status("c1"), Some(ItemStatus::Open));
        assert_eq!(store.get("c1").unwrap().status(), ItemStatus::Open);
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let mut store = ReviewStore::with_sample();
        let before = store.items().to_vec();

        assert_eq!(store.toggle_status("does-not-exist"), None);
        assert_eq!(store.items(), before.as_slice());
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn toggle_only_touches_target() {
        let mut store = ReviewStore::with_sample();
        store.toggle_status("ref2");

        let resolved: Vec<&str> = store
            .items()
            .iter()
            .filter(|i| !i.is_open())
            .map(|i| i.id())
            .collect();
        assert_eq!(resolved, vec!["ref2"]);
    }

    #[test]
    fn reset_reopens_everything() {
        let mut store = ReviewStore::with_sample();
        store.toggle_status("c1");
        store.toggle_status("m2");

        store.reset_all();

        assert!(store.items().iter().all(|i| i.is_open()));
        assert_eq!(store.stats().resolved_count, 0);
    }

    #[test]
    fn reset_forces_open_even_for_resolved_seed() {
        let seed = vec![
            item("a", Severity::Minor, Category::Format).with_status(ItemStatus::Resolved),
            item("b", Severity::Major, Category::Format),
        ];
        let mut store = ReviewStore::new(seed).unwrap();
        assert_eq!(store.stats().resolved_count, 1);

        store.reset_all();
        assert_eq!(store.stats().resolved_count, 0);
    }

    #[test]
    fn stats_on_sample() {
        let store = ReviewStore::with_sample();
        let stats = store.stats();
        assert_eq!(stats.critical_count, 3);
        assert_eq!(stats.major_count, 7);
        assert_eq!(stats.minor_count, 3);
        assert_eq!(stats.total_issues, 13);
        assert_eq!(stats.resolved_count, 0);
    }

    #[test]
    fn breakdown_omits_empty_categories() {
        let mut store = ReviewStore::with_sample();
        store.toggle_status("m1");
        store.toggle_status("m2");

        let breakdown = store.category_breakdown();
        assert!(breakdown.iter().all(|c| c.category != Category::Logic));
        assert!(breakdown.iter().all(|c| c.count > 0));
    }

    #[test]
    fn breakdown_uses_first_seen_order() {
        let store = ReviewStore::with_sample();
        let order: Vec<Category> = store
            .category_breakdown()
            .iter()
            .map(|c| c.category)
            .collect();
        assert_eq!(
            order,
            vec![
                Category::Format,
                Category::Language,
                Category::Image,
                Category::Citation,
                Category::Logic,
            ]
        );
    }

    #[test]
    fn category_progress_counts_resolved() {
        let mut store = ReviewStore::with_sample();
        assert_eq!(store.category_progress(Category::Citation), (0, 4));

        store.toggle_status("ref1");
        assert_eq!(store.category_progress(Category::Citation), (1, 4));
        assert_eq!(store.open_count_for(Category::Citation), 3);
    }

    #[test]
    fn items_by_category_orders_open_then_weight() {
        let mut store = ReviewStore::with_sample();
        // Resolve the Major so the Minor should jump ahead of it
        store.toggle_status("l1");

        let ids: Vec<&str> = store
            .items_by_category(Category::Language)
            .iter()
            .map(|i| i.id())
            .collect();
        assert_eq!(ids, vec!["c2", "l2", "l1"]);
    }
}
