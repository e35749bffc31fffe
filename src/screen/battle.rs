use crate::Roster;
use crate::pokekit::battle::{self, Fight, Side};
use crate::pokekit::{PokeApi, Pokemon, Result, Store};
use crate::sprite::Sprites;
use crate::widget;

use iced::task;
use iced::widget::operation;
use iced::widget::{
    button, center, center_x, column, container, opaque, row, scrollable, space,
    stack, text, text_input,
};
use iced::{Center, Color, Element, Fill, Task};

use function::Binary;

pub struct Battle {
    first: Option<Pokemon>,
    second: Option<Pokemon>,
    selection: Option<Selection>,
    fight: State,
    history: History,
}

struct Selection {
    side: Side,
    search: String,
    lookup: Lookup,
}

enum Lookup {
    None,
    Searching { _task: task::Handle },
    Found(Pokemon),
    Missing(String),
}

enum State {
    Idle,
    Fighting,
    Finished(Fight),
}

enum History {
    Loading,
    Loaded(Vec<battle::Battle>),
    Errored(String),
}

#[derive(Debug, Clone)]
pub enum Message {
    Select(Side),
    SearchChanged(String),
    SearchSubmitted,
    SearchFinished(String, Result<Pokemon>),
    Pick(Pokemon),
    Close,
    Start,
    Fought(Fight),
    Reset,
    HistoryLoaded(Result<Vec<battle::Battle>>),
}

pub enum Action {
    None,
    Run(Task<Message>),
}

impl Battle {
    pub fn new(store: &Store) -> (Self, Task<Message>) {
        (
            Self {
                first: None,
                second: None,
                selection: None,
                fight: State::Idle,
                history: History::Loading,
            },
            load_history(store),
        )
    }

    pub fn update(&mut self, message: Message, pokeapi: &PokeApi, store: &Store) -> Action {
        match message {
            Message::Select(side) => {
                self.selection = Some(Selection {
                    side,
                    search: String::new(),
                    lookup: Lookup::None,
                });

                Action::Run(operation::focus("contestant"))
            }
            Message::SearchChanged(new_search) => {
                let Some(Selection { search, lookup, .. }) = &mut self.selection else {
                    return Action::None;
                };

                if new_search.is_empty() {
                    *lookup = Lookup::None;
                }

                *search = new_search;

                Action::None
            }
            Message::SearchSubmitted => {
                let Some(Selection { search, lookup, .. }) = &mut self.selection else {
                    return Action::None;
                };

                let key = search.trim().to_lowercase();

                if key.is_empty() {
                    return Action::None;
                }

                let (search, handle) = {
                    let pokeapi = pokeapi.clone();
                    let on_finish = Message::SearchFinished.with(key.clone());

                    Task::perform(
                        async move { pokeapi.get_by_name_or_id(&key).await },
                        on_finish,
                    )
                    .abortable()
                };

                *lookup = Lookup::Searching {
                    _task: handle.abort_on_drop(),
                };

                Action::Run(search)
            }
            Message::SearchFinished(key, result) => {
                let Some(Selection { search, lookup, .. }) = &mut self.selection else {
                    return Action::None;
                };

                if search.trim().to_lowercase() != key {
                    return Action::None;
                }

                *lookup = match result {
                    Ok(pokemon) => Lookup::Found(pokemon),
                    Err(error) => {
                        log::warn!("{error}");
                        Lookup::Missing(error.to_string())
                    }
                };

                Action::None
            }
            Message::Pick(pokemon) => {
                let Some(selection) = self.selection.take() else {
                    return Action::None;
                };

                match selection.side {
                    Side::First => self.first = Some(pokemon),
                    Side::Second => self.second = Some(pokemon),
                }

                self.fight = State::Idle;

                Action::None
            }
            Message::Close => {
                self.selection = None;

                Action::None
            }
            Message::Start => {
                let (Some(first), Some(second)) = (&self.first, &self.second) else {
                    return Action::None;
                };

                if let State::Fighting = self.fight {
                    return Action::None;
                }

                self.fight = State::Fighting;

                let first = first.clone();
                let second = second.clone();
                let store = store.clone();

                Action::Run(Task::perform(
                    async move { battle::fight(first, second, &store).await },
                    Message::Fought,
                ))
            }
            Message::Fought(fight) => {
                let saved = fight.saved.is_ok();
                self.fight = State::Finished(fight);

                if saved {
                    Action::Run(load_history(store))
                } else {
                    Action::None
                }
            }
            Message::Reset => {
                self.first = None;
                self.second = None;
                self.fight = State::Idle;

                Action::None
            }
            Message::HistoryLoaded(Ok(battles)) => {
                self.history = History::Loaded(battles);

                Action::None
            }
            Message::HistoryLoaded(Err(error)) => {
                log::error!("{error}");
                self.history = History::Errored(error.to_string());

                Action::None
            }
        }
    }

    pub fn pokemon(&self) -> Vec<&Pokemon> {
        let found = self
            .selection
            .as_ref()
            .and_then(|selection| match &selection.lookup {
                Lookup::Found(pokemon) => Some(pokemon),
                _ => None,
            });

        self.first
            .iter()
            .chain(self.second.iter())
            .chain(found)
            .collect()
    }

    pub fn view<'a>(&'a self, roster: &'a Roster, sprites: &'a Sprites) -> Element<'a, Message> {
        let contestant = |side: Side, pokemon: &'a Option<Pokemon>| -> Element<'a, Message> {
            let label = match side {
                Side::First => "Pokémon 1",
                Side::Second => "Pokémon 2",
            };

            let choose = button(text(if pokemon.is_some() { "Change" } else { "Choose" }).size(12))
                .style(button::secondary)
                .on_press(Message::Select(side));

            let card = match pokemon {
                Some(pokemon) => widget::pokemon(pokemon, sprites.get(&pokemon.id), choose),
                None => column![widget::slot(label.to_owned()), center_x(choose)]
                    .spacing(10)
                    .into(),
            };

            column![text(label).size(18), card]
                .spacing(10)
                .align_x(Center)
                .into()
        };

        let start = button(text("Start battle").size(16))
            .padding([10, 20])
            .on_press_maybe(
                (self.first.is_some()
                    && self.second.is_some()
                    && !matches!(self.fight, State::Fighting))
                .then_some(Message::Start),
            );

        let arena = row![
            contestant(Side::First, &self.first),
            column![text("VS").size(32), start]
                .spacing(20)
                .align_x(Center),
            contestant(Side::Second, &self.second),
        ]
        .spacing(40)
        .align_y(Center);

        let result: Element<'_, Message> = match &self.fight {
            State::Idle => space::horizontal().into(),
            State::Fighting => text("Fighting...").into(),
            State::Finished(fight) => outcome(fight),
        };

        let content = scrollable(
            column![
                center_x(arena),
                center_x(result),
                text("History").size(24),
                history(&self.history),
            ]
            .spacing(20)
            .padding(10),
        )
        .height(Fill);

        let overlay = self
            .selection
            .as_ref()
            .map(|selection| self.selecting(selection, roster, sprites));

        stack![content]
            .push(overlay.map(|overlay| {
                opaque(container(overlay).width(Fill).height(Fill).style(|_theme| {
                    container::Style::default().background(Color::BLACK.scale_alpha(0.8))
                }))
            }))
            .into()
    }

    fn selecting<'a>(
        &'a self,
        selection: &'a Selection,
        roster: &'a Roster,
        sprites: &'a Sprites,
    ) -> Element<'a, Message> {
        let title = match selection.side {
            Side::First => "Select Pokémon 1",
            Side::Second => "Select Pokémon 2",
        };

        let input = text_input(
            "Enter a Pokémon name or id and press Enter...",
            &selection.search,
        )
        .on_input(Message::SearchChanged)
        .on_submit(Message::SearchSubmitted)
        .padding(10)
        .id("contestant");

        let pick = |pokemon: &'a Pokemon| -> Element<'a, Message> {
            widget::pokemon(
                pokemon,
                sprites.get(&pokemon.id),
                button(text("Select").size(12)).on_press(Message::Pick(pokemon.clone())),
            )
        };

        let lookup: Element<'_, Message> = match &selection.lookup {
            Lookup::None => space::horizontal().into(),
            Lookup::Searching { .. } => text("Searching...").into(),
            Lookup::Found(pokemon) => pick(pokemon),
            Lookup::Missing(error) => text(error).style(text::danger).into(),
        };

        let team: Element<'_, Message> = match roster.get() {
            Some(team) if !team.is_empty() => column![
                text("From your team").size(14),
                row(team.members().iter().map(|member| {
                    button(text(widget::title(&member.pokemon.name)).size(12))
                        .style(button::secondary)
                        .on_press(Message::Pick(member.pokemon.clone()))
                        .into()
                }))
                .spacing(10)
                .wrap(),
            ]
            .spacing(10)
            .into(),
            _ => space::horizontal().into(),
        };

        center(
            container(
                column![
                    row![
                        text(title).size(20).width(Fill),
                        button(text("Close").size(12))
                            .style(button::text)
                            .on_press(Message::Close),
                    ]
                    .align_y(Center),
                    input,
                    team,
                    center_x(lookup),
                ]
                .spacing(20),
            )
            .max_width(600)
            .padding(20)
            .style(container::bordered_box),
        )
        .padding(10)
        .into()
    }
}

fn outcome(fight: &Fight) -> Element<'_, Message> {
    let outcome = &fight.outcome;

    let rounds = column(outcome.rounds.iter().map(|round| {
        row![
            text(widget::title(round.stat)).width(100),
            text(round.first).width(60),
            text(round.second).width(60),
            text(widget::title(&round.winner_name)),
        ]
        .spacing(10)
        .into()
    }))
    .spacing(5);

    let notice: Element<'_, Message> = match &fight.saved {
        Ok(_) => space::horizontal().into(),
        Err(error) => text!("This battle was not saved to history: {error}")
            .size(12)
            .style(text::danger)
            .into(),
    };

    container(
        column![
            text!("{} wins!", widget::title(&outcome.winner.name)).size(24),
            text!(
                "{} rounds to {}",
                outcome.wins(outcome.side),
                outcome.rounds.len() - outcome.wins(outcome.side)
            )
            .size(14),
            rounds,
            notice,
            button(text("New battle").size(12))
                .style(button::secondary)
                .on_press(Message::Reset),
        ]
        .spacing(10)
        .align_x(Center),
    )
    .padding(20)
    .style(container::bordered_box)
    .into()
}

fn history(history: &History) -> Element<'_, Message> {
    match history {
        History::Loading => text("Loading history...").into(),
        History::Errored(error) => text(error).style(text::danger).into(),
        History::Loaded(battles) if battles.is_empty() => text("No battles yet.").into(),
        History::Loaded(battles) => column(battles.iter().map(|battle| {
            row![
                text(battle.date.format("%Y-%m-%d %H:%M").to_string())
                    .size(12)
                    .width(140),
                text!(
                    "{} vs {}",
                    widget::title(&battle.pokemon1.name),
                    widget::title(&battle.pokemon2.name)
                )
                .size(12)
                .width(Fill),
                text!("Winner: {}", widget::title(&battle.winner.name)).size(12),
            ]
            .spacing(10)
            .into()
        }))
        .spacing(5)
        .into(),
    }
}

fn load_history(store: &Store) -> Task<Message> {
    let store = store.clone();

    Task::perform(
        async move { battle::history(&store).await },
        Message::HistoryLoaded,
    )
}
