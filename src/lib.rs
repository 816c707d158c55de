pub mod cli;
pub mod dashboard;
pub mod intake;
pub mod seed;
pub mod state;
pub mod tui;

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when parsing model names from user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown category: {0} (expected Format, Language, Citation, Image or Logic)")]
    UnknownCategory(String),
    #[error("unknown severity: {0}")]
    UnknownSeverity(String),
    #[error("unknown status: {0}")]
    UnknownStatus(String),
}

/// Priority tier of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Critical,
    Major,
    Minor,
    Info,
}

impl Severity {
    /// Sort weight used by the category list (higher sorts first).
    pub fn weight(self) -> u8 {
        match self {
            Severity::Critical => 3,
            Severity::Major => 2,
            Severity::Minor => 1,
            Severity::Info => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Major => "Major",
            Severity::Minor => "Minor",
            Severity::Info => "Info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "major" => Ok(Severity::Major),
            "minor" => Ok(Severity::Minor),
            "info" => Ok(Severity::Info),
            _ => Err(ParseError::UnknownSeverity(s.to_owned())),
        }
    }
}

/// Classification axis of a finding.
///
/// "Overview" is deliberately absent: it names the aggregate view, never an
/// item category (see [`dashboard::View`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Format,
    Language,
    Citation,
    Image,
    Logic,
}

impl Category {
    /// All categories in sidebar order.
    pub const ALL: [Category; 5] = [
        Category::Format,
        Category::Language,
        Category::Citation,
        Category::Image,
        Category::Logic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Format => "Format",
            Category::Language => "Language",
            Category::Citation => "Citation",
            Category::Image => "Image",
            Category::Logic => "Logic",
        }
    }

    /// Human-facing sidebar label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Format => "Formatting & Layout",
            Category::Language => "Language & Grammar",
            Category::Citation => "References",
            Category::Image => "Figures & Captions",
            Category::Logic => "Math & Logic",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownCategory(s.to_owned()))
    }
}

/// Remediation status of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ItemStatus {
    #[default]
    Open,
    Resolved,
}

impl ItemStatus {
    /// The other status.
    pub fn toggled(self) -> Self {
        match self {
            ItemStatus::Open => ItemStatus::Resolved,
            ItemStatus::Resolved => ItemStatus::Open,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Open => "open",
            ItemStatus::Resolved => "resolved",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Ok(ItemStatus::Open),
            "resolved" => Ok(ItemStatus::Resolved),
            _ => Err(ParseError::UnknownStatus(s.to_owned())),
        }
    }
}

/// Page reference: a single page number or free-form text such as "15-17".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRef {
    Number(u32),
    Text(String),
}

impl fmt::Display for PageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageRef::Number(n) => write!(f, "{}", n),
            PageRef::Text(s) => f.write_str(s),
        }
    }
}

impl From<u32> for PageRef {
    fn from(n: u32) -> Self {
        PageRef::Number(n)
    }
}

impl From<&str> for PageRef {
    fn from(s: &str) -> Self {
        PageRef::Text(s.to_owned())
    }
}

/// A single reported defect in the reviewed document.
///
/// Everything except `status` is fixed at construction; fields are private so
/// severity and category cannot drift after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    id: String,
    page: PageRef,
    location: String,
    issue: String,
    suggestion: String,
    severity: Severity,
    category: Category,
    status: ItemStatus,
}

impl ReviewItem {
    /// Create a new open finding.
    pub fn new(
        id: impl Into<String>,
        page: impl Into<PageRef>,
        location: impl Into<String>,
        issue: impl Into<String>,
        suggestion: impl Into<String>,
        severity: Severity,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            page: page.into(),
            location: location.into(),
            issue: issue.into(),
            suggestion: suggestion.into(),
            severity,
            category,
            status: ItemStatus::Open,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn page(&self) -> &PageRef {
        &self.page
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn issue(&self) -> &str {
        &self.issue
    }

    pub fn suggestion(&self) -> &str {
        &self.suggestion
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }

    pub fn is_open(&self) -> bool {
        self.status == ItemStatus::Open
    }

    /// Copy of this item with a different status.
    pub fn with_status(&self, status: ItemStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

/// Summary counts shown on the overview.
///
/// Severity counts cover open items only and leave out `Info`, so they do not
/// necessarily add up to the number of open items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub critical_count: usize,
    pub major_count: usize,
    pub minor_count: usize,
    pub total_issues: usize,
    pub resolved_count: usize,
}

/// Open-item count for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!("format".parse::<Category>().unwrap(), Category::Format);
        assert_eq!("CITATION".parse::<Category>().unwrap(), Category::Citation);
    }

    #[test]
    fn overview_is_not_a_category() {
        assert_eq!(
            "Overview".parse::<Category>(),
            Err(ParseError::UnknownCategory("Overview".to_string()))
        );
    }

    #[test]
    fn severity_weights_descend() {
        assert!(Severity::Critical.weight() > Severity::Major.weight());
        assert!(Severity::Major.weight() > Severity::Minor.weight());
        assert!(Severity::Minor.weight() > Severity::Info.weight());
        assert_eq!(Severity::Info.weight(), 0);
    }

    #[test]
    fn status_toggle_is_involution() {
        assert_eq!(ItemStatus::Open.toggled(), ItemStatus::Resolved);
        assert_eq!(ItemStatus::Open.toggled().toggled(), ItemStatus::Open);
        assert_eq!("Resolved".parse::<ItemStatus>().unwrap(), ItemStatus::Resolved);
    }

    #[test]
    fn page_ref_display() {
        assert_eq!(PageRef::Number(8).to_string(), "8");
        assert_eq!(PageRef::from("15-17").to_string(), "15-17");
    }

    #[test]
    fn new_item_starts_open() {
        let item = ReviewItem::new(
            "x",
            PageRef::Number(1),
            "loc",
            "issue",
            "fix",
            Severity::Minor,
            Category::Logic,
        );
        assert!(item.is_open());
        let resolved = item.with_status(ItemStatus::Resolved);
        assert_eq!(resolved.severity(), Severity::Minor);
        assert_eq!(resolved.category(), Category::Logic);
        assert!(!resolved.is_open());
    }
}
