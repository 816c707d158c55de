use crate::state::ReviewStore;
use crate::{Category, ItemStatus, ReviewItem};

/// What the main panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Aggregate statistics; never an item category.
    Overview,
    Category(Category),
}

impl View {
    /// Sidebar entries, top to bottom.
    pub const ALL: [View; 6] = [
        View::Overview,
        View::Category(Category::Format),
        View::Category(Category::Language),
        View::Category(Category::Citation),
        View::Category(Category::Image),
        View::Category(Category::Logic),
    ];

    pub fn label(self) -> &'static str {
        match self {
            View::Overview => "Review Overview",
            View::Category(category) => category.label(),
        }
    }
}

/// A single row in the sidebar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub view: View,
    pub label: &'static str,
    /// Open findings in the category; always 0 for the overview.
    pub badge: usize,
}

/// Navigation state for the dashboard screen — owns the selection but NOT the ReviewStore
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub selected: usize,
    pub cursor: usize,
    pub document: String,
}

impl Dashboard {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            selected: 0,
            cursor: 0,
            document: document.into(),
        }
    }

    /// Currently selected view.
    pub fn view(&self) -> View {
        View::ALL[self.selected.min(View::ALL.len() - 1)]
    }

    /// Move sidebar selection down (clamp to end).
    pub fn select_next(&mut self) {
        if self.selected < View::ALL.len() - 1 {
            self.selected += 1;
            self.cursor = 0;
        }
    }

    /// Move sidebar selection up (clamp to start).
    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.cursor = 0;
        }
    }

    /// Jump straight to a view.
    pub fn select_view(&mut self, view: View) {
        if let Some(idx) = View::ALL.iter().position(|v| *v == view) {
            self.selected = idx;
            self.cursor = 0;
        }
    }

    /// Back to the overview, as after a fresh analysis.
    pub fn reset(&mut self, document: impl Into<String>) {
        self.selected = 0;
        self.cursor = 0;
        self.document = document.into();
    }

    /// Findings listed in the current view, in display order.
    pub fn visible_items<'a>(&self, store: &'a ReviewStore) -> Vec<&'a ReviewItem> {
        match self.view() {
            View::Overview => Vec::new(),
            View::Category(category) => store.items_by_category(category),
        }
    }

    /// Move the item cursor down (clamp to end).
    pub fn cursor_next(&mut self, store: &ReviewStore) {
        let len = self.visible_items(store).len();
        if len > 0 && self.cursor < len - 1 {
            self.cursor += 1;
        }
    }

    /// Move the item cursor up (clamp to start).
    pub fn cursor_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Id of the finding under the cursor.
    pub fn selected_item_id(&self, store: &ReviewStore) -> Option<String> {
        self.visible_items(store)
            .get(self.cursor)
            .map(|item| item.id().to_owned())
    }

    /// Toggle the finding under the cursor and keep the cursor on it.
    ///
    /// The list re-sorts after a toggle, so the item usually moves.
    pub fn toggle_selected(&mut self, store: &mut ReviewStore) -> Option<ItemStatus> {
        let id = self.selected_item_id(store)?;
        let status = store.toggle_status(&id)?;
        if let Some(pos) = self
            .visible_items(store)
            .iter()
            .position(|item| item.id() == id)
        {
            self.cursor = pos;
        }
        Some(status)
    }

    /// Sidebar rows with open-count badges.
    pub fn sidebar(&self, store: &ReviewStore) -> Vec<SidebarEntry> {
        View::ALL
            .iter()
            .map(|&view| SidebarEntry {
                view,
                label: view.label(),
                badge: match view {
                    View::Overview => 0,
                    View::Category(category) => store.open_count_for(category),
                },
            })
            .collect()
    }

    pub fn title(&self) -> String {
        match self.view() {
            View::Overview => "Report Analysis".to_string(),
            View::Category(category) => format!("{} Review", category),
        }
    }

    pub fn subtitle(&self) -> String {
        match self.view() {
            View::Overview => format!("Analysis Results for {}", self.document),
            View::Category(category) => format!(
                "Detailed breakdown of {} issues",
                category.as_str().to_lowercase()
            ),
        }
    }

    /// "N / M Fixed" for category views.
    pub fn progress_line(&self, store: &ReviewStore) -> Option<String> {
        match self.view() {
            View::Overview => None,
            View::Category(category) => {
                let (resolved, total) = store.category_progress(category);
                Some(format!("{} / {} Fixed", resolved, total))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_next_prev() {
        let mut dashboard = Dashboard::new("doc.pdf");
        assert_eq!(dashboard.view(), View::Overview);

        // Move down
        dashboard.select_next();
        assert_eq!(dashboard.view(), View::Category(Category::Format));

        for _ in 0..10 {
            dashboard.select_next();
        }
        // Should clamp at the last entry
        assert_eq!(dashboard.view(), View::Category(Category::Logic));

        for _ in 0..10 {
            dashboard.select_prev();
        }
        assert_eq!(dashboard.view(), View::Overview);
    }

    #[test]
    fn test_overview_lists_nothing() {
        let store = ReviewStore::with_sample();
        let dashboard = Dashboard::new("doc.pdf");
        assert!(dashboard.visible_items(&store).is_empty());
        assert_eq!(dashboard.selected_item_id(&store), None);
        assert_eq!(dashboard.progress_line(&store), None);
    }

    #[test]
    fn test_cursor_clamps() {
        let store = ReviewStore::with_sample();
        let mut dashboard = Dashboard::new("doc.pdf");
        dashboard.select_view(View::Category(Category::Format));

        dashboard.cursor_prev();
        assert_eq!(dashboard.cursor, 0);
        for _ in 0..5 {
            dashboard.cursor_next(&store);
        }
        // Format has two findings
        assert_eq!(dashboard.cursor, 1);
        assert_eq!(dashboard.selected_item_id(&store).as_deref(), Some("c3"));
    }

    #[test]
    fn test_toggle_selected_follows_item() {
        let mut store = ReviewStore::with_sample();
        let mut dashboard = Dashboard::new("doc.pdf");
        dashboard.select_view(View::Category(Category::Language));
        assert_eq!(dashboard.selected_item_id(&store).as_deref(), Some("c2"));

        let status = dashboard.toggle_selected(&mut store);
        assert_eq!(status, Some(ItemStatus::Resolved));
        // c2 is now resolved and sorted last
        assert_eq!(dashboard.cursor, 2);
        assert_eq!(dashboard.selected_item_id(&store).as_deref(), Some("c2"));
        assert_eq!(dashboard.progress_line(&store).as_deref(), Some("1 / 3 Fixed"));
    }

    #[test]
    fn test_sidebar_badges() {
        let mut store = ReviewStore::with_sample();
        store.toggle_status("m1");
        store.toggle_status("m2");
        let dashboard = Dashboard::new("doc.pdf");

        let sidebar = dashboard.sidebar(&store);
        assert_eq!(sidebar.len(), 6);
        assert_eq!(sidebar[0].badge, 0);
        assert_eq!(sidebar[0].label, "Review Overview");
        assert_eq!(sidebar[3].label, "References");
        assert_eq!(sidebar[3].badge, 4);
        assert_eq!(sidebar[5].badge, 0);
    }

    #[test]
    fn test_titles() {
        let mut dashboard = Dashboard::new("thesis.docx");
        assert_eq!(dashboard.title(), "Report Analysis");
        assert_eq!(dashboard.subtitle(), "Analysis Results for thesis.docx");

        dashboard.select_view(View::Category(Category::Citation));
        assert_eq!(dashboard.title(), "Citation Review");
        assert_eq!(dashboard.subtitle(), "Detailed breakdown of citation issues");
    }
}
