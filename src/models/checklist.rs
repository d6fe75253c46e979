use regex::Regex;

/// One expected log event.
///
/// Items are built once by [`ChecklistLoader`](crate::services::ChecklistLoader)
/// and never mutated afterwards. The `parent` link is an index into the owning
/// [`Checklist`] and always points at an earlier main item.
#[derive(Debug, Clone)]
pub struct ChecklistItem {
    pub label: String,
    pub ok_text: String,
    pub fail_text: String,

    /// Evaluated in declaration order; the first hit is reported as the match cause
    pub patterns: Vec<Regex>,

    /// Any hit here turns a pattern match into an "unexpected match" failure
    pub not_patterns: Vec<Regex>,

    pub is_sub: bool,
    pub parent: Option<usize>,
}

impl ChecklistItem {
    /// Create a main item with no exclusions.
    pub fn new(label: impl Into<String>, patterns: Vec<Regex>) -> Self {
        Self {
            label: label.into(),
            ok_text: String::new(),
            fail_text: String::new(),
            patterns,
            not_patterns: Vec::new(),
            is_sub: false,
            parent: None,
        }
    }

    /// First pattern (declaration order) found anywhere in `line`.
    pub fn matched_pattern(&self, line: &str) -> Option<&Regex> {
        first_hit(&self.patterns, line)
    }

    /// First exclusion pattern found anywhere in `line`.
    pub fn excluded_by(&self, line: &str) -> Option<&Regex> {
        first_hit(&self.not_patterns, line)
    }

    /// Pattern hit with no exclusion hit: the line would confirm this item.
    pub fn accepts(&self, line: &str) -> Option<&Regex> {
        let pattern = self.matched_pattern(line)?;
        if self.excluded_by(line).is_some() {
            return None;
        }
        Some(pattern)
    }

    /// Pattern sources, used for report text.
    pub fn pattern_sources(&self) -> Vec<&str> {
        self.patterns.iter().map(Regex::as_str).collect()
    }

    pub fn not_pattern_sources(&self) -> Vec<&str> {
        self.not_patterns.iter().map(Regex::as_str).collect()
    }
}

fn first_hit<'a>(patterns: &'a [Regex], line: &str) -> Option<&'a Regex> {
    patterns.iter().find(|p| p.is_match(line))
}

/// Ordered, index-addressable sequence of checklist items.
///
/// Read-only after load, so a single checklist can back any number of
/// independent [`CycleEngine`](crate::services::CycleEngine) instances.
#[derive(Debug, Clone, Default)]
pub struct Checklist {
    items: Vec<ChecklistItem>,
}

impl Checklist {
    /// Build a checklist from already-linked items.
    ///
    /// Parent links that do not point at an earlier main item are dropped,
    /// which leaves the affected sub item permanently ineligible.
    pub fn from_items(mut items: Vec<ChecklistItem>) -> Self {
        let is_main: Vec<bool> = items.iter().map(|item| !item.is_sub).collect();
        for (index, item) in items.iter_mut().enumerate() {
            if !item.is_sub {
                item.parent = None;
                continue;
            }
            if let Some(parent) = item.parent {
                if parent >= index || !is_main[parent] {
                    tracing::warn!(
                        "Dropping invalid parent link {} -> {} for '{}'",
                        index,
                        parent,
                        item.label
                    );
                    item.parent = None;
                }
            }
        }
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ChecklistItem> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.items.iter()
    }
}

impl std::ops::Index<usize> for Checklist {
    type Output = ChecklistItem;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}
