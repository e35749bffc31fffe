use crate::pokekit::{PokeApi, Pokemon, pokemon};

use bytes::Bytes;
use iced::widget::image;
use std::collections::HashMap;
use std::fmt;
use std::io;
use tokio::task;

/// The artwork of every Pokémon shown so far, by id.
pub type Sprites = HashMap<pokemon::Id, Sprite>;

pub enum Sprite {
    Loading,
    Loaded(image::Handle),
    Missing,
}

#[derive(Clone)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub rgba: Bytes,
}

impl Image {
    /// Downloads the given artwork and decodes it as RGBA.
    pub async fn fetch(url: String, pokeapi: PokeApi) -> Result<Image, anywho::Error> {
        let bytes = pokeapi.download_sprite(&url).await?;

        // Decode image as RGBA in a background blocking thread
        task::spawn_blocking(move || {
            let image = ::image::ImageReader::new(io::Cursor::new(bytes))
                .with_guessed_format()?
                .decode()?
                .to_rgba8();

            Ok(Image {
                width: image.width(),
                height: image.height(),
                rgba: Bytes::from(image.into_raw()),
            })
        })
        .await?
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("rgba", &self.rgba.len())
            .finish()
    }
}

/// The Pokémon whose artwork still needs to be fetched, marking them as loading.
pub fn missing<'a>(
    sprites: &mut Sprites,
    pokemon: impl IntoIterator<Item = &'a Pokemon>,
) -> Vec<(pokemon::Id, String)> {
    let mut missing = Vec::new();

    for pokemon in pokemon {
        if sprites.contains_key(&pokemon.id) {
            continue;
        }

        match pokemon.artwork() {
            Some(url) => {
                let _ = sprites.insert(pokemon.id, Sprite::Loading);
                missing.push((pokemon.id, url.to_owned()));
            }
            None => {
                let _ = sprites.insert(pokemon.id, Sprite::Missing);
            }
        }
    }

    missing
}
