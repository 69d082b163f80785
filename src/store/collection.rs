use std::fmt;

/// One of the independently persisted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Inventory,
    Removals,
    Activity,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Inventory,
        Collection::Removals,
        Collection::Activity,
    ];

    /// Path segment under `/api`.
    pub fn slug(self) -> &'static str {
        match self {
            Collection::Inventory => "inventory",
            Collection::Removals => "removals",
            Collection::Activity => "activity",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Collection::Inventory => "inventory.json",
            Collection::Removals => "removal_history.json",
            Collection::Activity => "activity_log.json",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
