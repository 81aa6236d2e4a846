//! Local view state of a mounted report: the active comparison tab and the
//! expanded/collapsed flag of each report section.
//!
//! Both slots are independent. Nothing here triggers I/O or re-validates the
//! loaded review; every operation is a plain state replacement.

/// Which rendition of the code the comparison panel shows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonTab {
    /// Code as originally submitted.
    #[default]
    Original,
    /// Full corrected source.
    Corrected,
    /// Itemised list of changes.
    Changes,
}

impl ComparisonTab {
    pub const ALL: [ComparisonTab; 3] =
        [ComparisonTab::Original, ComparisonTab::Corrected, ComparisonTab::Changes];

    pub fn title(self) -> &'static str {
        match self {
            ComparisonTab::Original => "Original",
            ComparisonTab::Corrected => "Corrected",
            ComparisonTab::Changes => "Changes",
        }
    }

    /// Position in [`ComparisonTab::ALL`].
    pub fn index(self) -> usize {
        match self {
            ComparisonTab::Original => 0,
            ComparisonTab::Corrected => 1,
            ComparisonTab::Changes => 2,
        }
    }

    /// Cycle order: `Original` → `Corrected` → `Changes` → `Original`.
    pub fn next(self) -> Self {
        match self {
            ComparisonTab::Original => ComparisonTab::Corrected,
            ComparisonTab::Corrected => ComparisonTab::Changes,
            ComparisonTab::Changes => ComparisonTab::Original,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ComparisonTab::Original => ComparisonTab::Changes,
            ComparisonTab::Corrected => ComparisonTab::Original,
            ComparisonTab::Changes => ComparisonTab::Corrected,
        }
    }
}

/// A collapsible report section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Structure,
    Implementation,
    BestPractices,
    Recommendations,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Structure,
        Section::Implementation,
        Section::BestPractices,
        Section::Recommendations,
    ];

    fn index(self) -> usize {
        match self {
            Section::Structure => 0,
            Section::Implementation => 1,
            Section::BestPractices => 2,
            Section::Recommendations => 3,
        }
    }
}

impl From<crate::model::Category> for Section {
    fn from(category: crate::model::Category) -> Self {
        use crate::model::Category;
        match category {
            Category::Structure => Section::Structure,
            Category::Implementation => Section::Implementation,
            Category::BestPractices => Section::BestPractices,
        }
    }
}

/// Expansion flag per [`Section`]. Every section starts expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandedSections([bool; 4]);

impl Default for ExpandedSections {
    fn default() -> Self {
        Self([true; 4])
    }
}

impl ExpandedSections {
    pub fn is_expanded(&self, section: Section) -> bool {
        self.0[section.index()]
    }

    /// Flips exactly one entry.
    pub fn toggle(&mut self, section: Section) {
        let slot = &mut self.0[section.index()];
        *slot = !*slot;
    }
}

/// The two pieces of interactive state owned by one mounted report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub active_tab: ComparisonTab,
    pub expanded: ExpandedSections,
}

impl ViewState {
    /// Makes `tab` the active comparison tab. Selecting the active tab is a no-op.
    pub fn select_tab(&mut self, tab: ComparisonTab) {
        self.active_tab = tab;
    }

    pub fn next_tab(&mut self) {
        self.active_tab = self.active_tab.next();
    }

    pub fn prev_tab(&mut self) {
        self.active_tab = self.active_tab.prev();
    }

    /// Collapses an expanded section or expands a collapsed one.
    pub fn toggle_section(&mut self, section: Section) {
        self.expanded.toggle(section);
    }

    pub fn is_expanded(&self, section: Section) -> bool {
        self.expanded.is_expanded(section)
    }
}
