use serde::{Deserialize, Serialize};

use std::fmt;

/// A Pokémon as described by PokeAPI.
///
/// Only the fields the application needs are kept. The JSON shape matches
/// the upstream one, so a record fetched from PokeAPI can be written to the
/// store and read back without conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub types: Vec<Type>,
    #[serde(default)]
    pub abilities: Vec<Ability>,
}

impl Pokemon {
    /// The base value of the given stat, or 0 if the Pokémon does not list it.
    pub fn stat(&self, name: &str) -> u32 {
        self.stats
            .iter()
            .find(|stat| stat.stat.name == name)
            .map(|stat| stat.base_stat)
            .unwrap_or_default()
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|type_| type_.kind.name.as_str())
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.type_names().any(|type_| type_ == name)
    }

    pub fn ability_names(&self) -> impl Iterator<Item = &str> {
        self.abilities
            .iter()
            .map(|ability| ability.ability.name.as_str())
    }

    /// The official artwork, falling back to the front sprite.
    pub fn artwork(&self) -> Option<&str> {
        self.sprites
            .other
            .as_ref()
            .and_then(|other| other.official_artwork.as_ref())
            .and_then(|artwork| artwork.front_default.as_deref())
            .or(self.sprites.front_default.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(pub(crate) u32);

impl Id {
    pub fn number(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:03}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OtherSprites {
    #[serde(
        rename = "official-artwork",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub official_artwork: Option<Artwork>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Artwork {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub base_stat: u32,
    pub stat: Named,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Type {
    #[serde(default)]
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: Named,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub ability: Named,
    #[serde(default)]
    pub is_hidden: bool,
}

/// A named reference to another PokeAPI resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Named {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
