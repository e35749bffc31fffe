use crate::Roster;
use crate::pokekit::team::{self, Member};
use crate::pokekit::{Error, Favorites, Pokemon, Snapshot, pokemon};
use crate::screen::{self, Change};
use crate::sprite::Sprites;
use crate::widget;

use iced::widget::{button, center, column, container, row, scrollable, text};
use iced::{Center, Element, Fill};

pub struct Team {
    confirming: Option<pokemon::Id>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Remove(pokemon::Id),
    Confirm,
    Cancel,
    Retry,
    Change(Change),
}

pub enum Action {
    None,
    Retry,
    Change(Change),
}

impl Team {
    pub fn new() -> Self {
        Self { confirming: None }
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::Remove(id) => {
                self.confirming = Some(id);

                Action::None
            }
            Message::Confirm => match self.confirming.take() {
                Some(id) => Action::Change(Change::Release(id)),
                None => Action::None,
            },
            Message::Cancel => {
                self.confirming = None;

                Action::None
            }
            Message::Retry => Action::Retry,
            Message::Change(change) => Action::Change(change),
        }
    }

    pub fn view<'a>(
        &'a self,
        roster: &'a Roster,
        favorites: &'a Snapshot<Favorites>,
        sprites: &'a Sprites,
    ) -> Element<'a, Message> {
        let members: Element<'_, Message> = match roster {
            Snapshot::Loading => center(text("Loading team...")).height(360).into(),
            Snapshot::Failed(error) => failed(error, 360.0),
            Snapshot::Loaded(team) | Snapshot::Saving(team) => {
                let members = team
                    .members()
                    .iter()
                    .map(|member| self.member(member, roster, favorites, sprites));

                let slots = (0..team.open_slots()).map(|slot| {
                    widget::slot(format!(
                        "Empty Slot ({slot}/{max})",
                        slot = team.len() + slot + 1,
                        max = team::MAX_SIZE
                    ))
                });

                row(members.chain(slots)).spacing(10).wrap().into()
            }
        };

        let favorites_section: Element<'_, Message> = match favorites {
            Snapshot::Loading => text("Loading favorites...").size(14).into(),
            Snapshot::Failed(error) => failed(error, 120.0),
            Snapshot::Loaded(list) | Snapshot::Saving(list) if list.is_empty() => {
                text("Mark a Pokémon as favorite to keep it around.")
                    .size(14)
                    .into()
            }
            Snapshot::Loaded(list) | Snapshot::Saving(list) => row(list
                .iter()
                .map(|pokemon| favorite(pokemon, roster, favorites, sprites)))
            .spacing(10)
            .wrap()
            .into(),
        };

        let size = match roster.get() {
            Some(team) => format!("{} / {}", team.len(), team::MAX_SIZE),
            None => format!("? / {}", team::MAX_SIZE),
        };

        let favorites_count = match favorites.get() {
            Some(list) => format!("Favorites ({})", list.len()),
            None => "Favorites".to_owned(),
        };

        scrollable(
            column![
                row![text("My Team").size(24).width(Fill), text(size).size(14)].align_y(Center),
                members,
                text(favorites_count).size(24),
                favorites_section,
            ]
            .spacing(20)
            .padding(10),
        )
        .height(Fill)
        .into()
    }

    fn member<'a>(
        &'a self,
        member: &'a Member,
        roster: &'a Roster,
        favorites: &'a Snapshot<Favorites>,
        sprites: &'a Sprites,
    ) -> Element<'a, Message> {
        let pokemon = &member.pokemon;

        let controls: Element<'_, Message> = if self.confirming == Some(pokemon.id) {
            row![
                button(text("Confirm").size(12))
                    .style(button::danger)
                    .on_press(Message::Confirm),
                button(text("Cancel").size(12))
                    .style(button::secondary)
                    .on_press(Message::Cancel),
            ]
            .spacing(10)
            .into()
        } else {
            actions(pokemon, roster, favorites)
        };

        column![
            widget::pokemon(pokemon, sprites.get(&pokemon.id), controls),
            container(
                text!("Joined {}", member.added_at.format("%Y-%m-%d %H:%M")).size(10)
            )
            .center_x(240),
        ]
        .spacing(5)
        .into()
    }
}

fn failed<'a>(error: &Error, height: f32) -> Element<'a, Message> {
    center(
        column![
            text(error.to_string()).style(text::danger),
            button(text("Retry").size(14)).on_press(Message::Retry),
        ]
        .spacing(10)
        .align_x(Center),
    )
    .height(height)
    .into()
}

fn favorite<'a>(
    pokemon: &'a Pokemon,
    roster: &'a Roster,
    favorites: &'a Snapshot<Favorites>,
    sprites: &'a Sprites,
) -> Element<'a, Message> {
    widget::pokemon(
        pokemon,
        sprites.get(&pokemon.id),
        actions(pokemon, roster, favorites),
    )
}

/// Releasing a member always goes through confirmation.
fn actions<'a>(
    pokemon: &'a Pokemon,
    roster: &'a Roster,
    favorites: &'a Snapshot<Favorites>,
) -> Element<'a, Message> {
    screen::actions(pokemon, roster, favorites).map(|change| match change {
        Change::Release(id) => Message::Remove(id),
        change => Message::Change(change),
    })
}
