//! Navigation-related state types.
//!
//! The emblem doubles as primary navigation between the three presentation
//! sections. The cycle order is fixed by product design.

/// Specifying the three presentation sections.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Section {
    Identity,
    Works,
    Contact,
}

impl Section {
    /// Next section in the fixed advance cycle.
    ///
    pub fn next(&self) -> Section {
        match self {
            Section::Identity => Section::Works,
            Section::Works => Section::Contact,
            Section::Contact => Section::Identity,
        }
    }

    /// Label shown in the navigation bar.
    ///
    pub fn label(&self) -> &'static str {
        match self {
            Section::Identity => "YINGXUN",
            Section::Works => "PROJEKTE",
            Section::Contact => "KONTAKT",
        }
    }
}
