use crate::pokemon;
use crate::store::{Collection, Resource, Store};
use crate::{Error, Pokemon, Result};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_SIZE: usize = 6;

/// A Pokémon that was added to the team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(flatten)]
    pub pokemon: Pokemon,
    pub added_at: DateTime<Utc>,
}

impl Resource for Member {
    const COLLECTION: Collection = Collection::Team;
}

/// A snapshot of the team, kept in sync with the store by every operation.
#[derive(Debug, Clone, Default)]
pub struct Team {
    members: Vec<Member>,
}

impl Team {
    pub async fn load(store: &Store) -> Result<Self> {
        let members: Vec<Member> = store
            .list()
            .await
            .map_err(|error| Error::TeamLoad(Box::new(error)))?;

        if members.len() > MAX_SIZE {
            log::warn!(
                "Stored team has {} members (max {MAX_SIZE})",
                members.len()
            );
        }

        Ok(Self { members })
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= MAX_SIZE
    }

    pub fn open_slots(&self) -> usize {
        MAX_SIZE.saturating_sub(self.members.len())
    }

    pub fn contains(&self, id: pokemon::Id) -> bool {
        self.members.iter().any(|member| member.pokemon.id == id)
    }

    /// Checks whether the Pokémon could join the team.
    pub fn admit(&self, pokemon: &Pokemon) -> Result<()> {
        if self.is_full() {
            return Err(Error::TeamFull);
        }

        if self.contains(pokemon.id) {
            return Err(Error::DuplicateMember {
                id: pokemon.id,
                name: pokemon.name.clone(),
            });
        }

        Ok(())
    }

    /// Persists a new member and appends it to the snapshot.
    ///
    /// The snapshot is left untouched if the Pokémon is not admitted or the
    /// store rejects it.
    pub async fn add(&mut self, pokemon: Pokemon, store: &Store) -> Result<()> {
        self.admit(&pokemon)?;

        let member = store
            .create(&Member {
                pokemon,
                added_at: Utc::now(),
            })
            .await?;

        log::info!("{} joined the team", member.pokemon.name);
        self.members.push(member);

        Ok(())
    }

    /// Deletes a member from the store and, once confirmed, from the snapshot.
    pub async fn remove(&mut self, id: pokemon::Id, store: &Store) -> Result<()> {
        store
            .delete::<Member>(id.number())
            .await
            .map_err(|error| Error::Remove(Box::new(error)))?;

        self.members.retain(|member| member.pokemon.id != id);
        log::info!("Pokémon {id} left the team");

        Ok(())
    }
}
