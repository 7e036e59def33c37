use serde::Serialize;

/// Category headings recognised in patch notes. Anything else is content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Section {
    #[serde(rename = "Bug Fixes")]
    BugFixes,
    #[serde(rename = "Game Updates")]
    GameUpdates,
    #[serde(rename = "Balance Update")]
    BalanceUpdate,
    #[serde(rename = "Base Game")]
    BaseGame,
    Expansion,
    Accessibility,
    Skills,
    Passives,
    Items,
    #[serde(rename = "Legendary Aspects")]
    LegendaryAspects,
    Paragon,
    Tempering,
    Miscellaneous,
}

impl Section {
    pub const ALL: [Section; 13] = [
        Section::BugFixes,
        Section::GameUpdates,
        Section::BalanceUpdate,
        Section::BaseGame,
        Section::Expansion,
        Section::Accessibility,
        Section::Skills,
        Section::Passives,
        Section::Items,
        Section::LegendaryAspects,
        Section::Paragon,
        Section::Tempering,
        Section::Miscellaneous,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::BugFixes => "Bug Fixes",
            Section::GameUpdates => "Game Updates",
            Section::BalanceUpdate => "Balance Update",
            Section::BaseGame => "Base Game",
            Section::Expansion => "Expansion",
            Section::Accessibility => "Accessibility",
            Section::Skills => "Skills",
            Section::Passives => "Passives",
            Section::Items => "Items",
            Section::LegendaryAspects => "Legendary Aspects",
            Section::Paragon => "Paragon",
            Section::Tempering => "Tempering",
            Section::Miscellaneous => "Miscellaneous",
        }
    }

    /// Exact, case-sensitive match of a whole line against the vocabulary.
    pub fn from_label(line: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.label() == line)
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
