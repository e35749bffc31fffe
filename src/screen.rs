pub mod battle;
pub mod pokedex;
pub mod team;

pub use battle::Battle;
pub use pokedex::Pokedex;
pub use team::Team;

use crate::Roster;
use crate::pokekit::{Favorites, Pokemon, Snapshot, pokemon};

use iced::Element;
use iced::widget::{button, row, text};

pub enum Screen {
    Pokedex(Pokedex),
    Team(Team),
    Battle(Battle),
}

impl Screen {
    pub fn tab(&self) -> Tab {
        match self {
            Screen::Pokedex(_) => Tab::Pokedex,
            Screen::Team(_) => Tab::Team,
            Screen::Battle(_) => Tab::Battle,
        }
    }

    /// The Pokémon currently on display.
    pub fn pokemon(&self) -> Vec<&Pokemon> {
        match self {
            Screen::Pokedex(pokedex) => pokedex.pokemon(),
            Screen::Team(_) => Vec::new(),
            Screen::Battle(battle) => battle.pokemon(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Pokedex,
    Team,
    Battle,
}

/// A change to the team or the favorites requested by a screen.
#[derive(Debug, Clone)]
pub enum Change {
    Recruit(Pokemon),
    Release(pokemon::Id),
    Favorite(Pokemon),
}

/// The team and favorite buttons of a Pokémon card.
///
/// Buttons stay disabled until their snapshot is loaded and while it saves.
pub fn actions<'a>(
    pokemon: &'a Pokemon,
    roster: &Roster,
    favorites: &Snapshot<Favorites>,
) -> Element<'a, Change> {
    let team_ready = roster.is_ready();

    let membership = match roster.get() {
        Some(team) if team.contains(pokemon.id) => button(text("Remove").size(12))
            .style(button::danger)
            .on_press_maybe(team_ready.then_some(Change::Release(pokemon.id))),
        Some(team) => button(text("Add to team").size(12)).on_press_maybe(
            (team_ready && team.admit(pokemon).is_ok()).then(|| Change::Recruit(pokemon.clone())),
        ),
        None => button(text("Add to team").size(12)),
    };

    let is_favorite = favorites
        .get()
        .is_some_and(|favorites| favorites.contains(pokemon.id));

    let favorite = button(text(if is_favorite { "Unfavorite" } else { "Favorite" }).size(12))
        .style(button::secondary)
        .on_press_maybe(
            favorites
                .is_ready()
                .then(|| Change::Favorite(pokemon.clone())),
        );

    row![membership, favorite].spacing(10).into()
}
