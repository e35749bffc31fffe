use crate::Pokemon;

use std::fmt;

/// Narrows down a loaded page by name and type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filter {
    pub search: String,
    pub kind: Kind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Kind {
    #[default]
    All,
    Only(String),
}

impl Filter {
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.kind == Kind::All
    }

    pub fn matches(&self, pokemon: &Pokemon) -> bool {
        let search = self.search.trim().to_lowercase();

        let matches_search = pokemon.name.to_lowercase().contains(&search);
        let matches_kind = match &self.kind {
            Kind::All => true,
            Kind::Only(type_) => pokemon.has_type(type_),
        };

        matches_search && matches_kind
    }

    pub fn apply<'a>(&'a self, pokemon: &'a [Pokemon]) -> impl Iterator<Item = &'a Pokemon> {
        pokemon.iter().filter(|pokemon| self.matches(pokemon))
    }
}

impl Kind {
    /// The filter choices for the given type names, starting with [`Kind::All`].
    pub fn choices(types: &[String]) -> Vec<Self> {
        std::iter::once(Kind::All)
            .chain(types.iter().cloned().map(Kind::Only))
            .collect()
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::All => f.write_str("All types"),
            Kind::Only(type_) => f.write_str(type_),
        }
    }
}
