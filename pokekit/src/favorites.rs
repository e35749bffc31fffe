use crate::pokemon;
use crate::store::{Collection, Resource, Store};
use crate::{Pokemon, Result};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorite(pub Pokemon);

impl Resource for Favorite {
    const COLLECTION: Collection = Collection::Favorites;
}

/// The set of favorite Pokémon. Independent of the team.
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    pokemon: Vec<Pokemon>,
}

impl Favorites {
    pub async fn load(store: &Store) -> Result<Self> {
        let favorites: Vec<Favorite> = store.list().await?;

        let mut pokemon: Vec<Pokemon> = Vec::with_capacity(favorites.len());

        for Favorite(favorite) in favorites {
            if !pokemon.iter().any(|candidate| candidate.id == favorite.id) {
                pokemon.push(favorite);
            }
        }

        Ok(Self { pokemon })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pokemon> {
        self.pokemon.iter()
    }

    pub fn len(&self) -> usize {
        self.pokemon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pokemon.is_empty()
    }

    pub fn contains(&self, id: pokemon::Id) -> bool {
        self.pokemon.iter().any(|pokemon| pokemon.id == id)
    }

    /// Marks a Pokémon as favorite. Does nothing if it already is one.
    pub async fn add(&mut self, pokemon: Pokemon, store: &Store) -> Result<()> {
        if self.contains(pokemon.id) {
            return Ok(());
        }

        let Favorite(pokemon) = store.create(&Favorite(pokemon)).await?;
        self.pokemon.push(pokemon);

        Ok(())
    }

    pub async fn remove(&mut self, id: pokemon::Id, store: &Store) -> Result<()> {
        store.delete::<Favorite>(id.number()).await?;
        self.pokemon.retain(|pokemon| pokemon.id != id);

        Ok(())
    }

    /// Flips the favorite status of a Pokémon and returns the new one.
    pub async fn toggle(&mut self, pokemon: Pokemon, store: &Store) -> Result<bool> {
        if self.contains(pokemon.id) {
            self.remove(pokemon.id, store).await?;

            Ok(false)
        } else {
            self.add(pokemon, store).await?;

            Ok(true)
        }
    }
}
