use crate::pokemon;
use crate::store::Collection;

use std::sync::Arc;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Network(Arc<reqwest::Error>),
    #[error("no pokémon found matching \"{0}\"")]
    NotFound(String),
    #[error("failed to load team: {0}")]
    TeamLoad(Box<Error>),
    #[error("team is full (max {} pokémon)", crate::team::MAX_SIZE)]
    TeamFull,
    #[error("{name} is already in the team")]
    DuplicateMember { id: pokemon::Id, name: String },
    #[error("failed to remove pokémon from team: {0}")]
    Remove(Box<Error>),
    #[error("persistence store is unavailable: {0}")]
    PersistenceUnavailable(Arc<str>),
    #[error("{collection} has no item with id {id}")]
    MissingItem { collection: Collection, id: u32 },
    #[error("{collection} already has an item with id {id}")]
    DuplicateItem { collection: Collection, id: u32 },
    #[error("malformed item in {collection}: {reason}")]
    MalformedItem {
        collection: Collection,
        reason: Arc<str>,
    },
    #[error("still waiting for the store, try again in a moment")]
    Busy,
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(Arc::new(error))
    }
}
