use crate::Roster;
use crate::pokekit::filter::{self, Filter};
use crate::pokekit::pokeapi::Contents;
use crate::pokekit::{Favorites, Page, PokeApi, Pokemon, Result, Snapshot};
use crate::screen::{self, Change};
use crate::sprite::Sprites;
use crate::widget;

use iced::keyboard;
use iced::task;
use iced::widget::operation;
use iced::widget::{
    button, center, column, container, pick_list, row, scrollable, space, text,
    text_input,
};
use iced::{Center, Element, Fill, Subscription, Task};

use function::Binary;

pub struct Pokedex {
    page: Page,
    per_page: usize,
    total_pages: usize,
    listing: Listing,
    lookup: Lookup,
    filter: Filter,
    kinds: Vec<filter::Kind>,
}

enum Listing {
    Loading,
    Loaded(Vec<Pokemon>),
    Errored(String),
}

enum Lookup {
    None,
    Searching {
        key: String,
        _task: task::Handle,
    },
    Found(Pokemon),
    Missing(String),
}

#[derive(Debug, Clone)]
pub enum Message {
    PageLoaded(Page, Result<Contents>),
    TypesListed(Result<Vec<String>>),
    SearchChanged(String),
    SearchSubmitted,
    SearchFinished(String, Result<Pokemon>),
    ClearSearch,
    KindSelected(filter::Kind),
    PreviousPage,
    NextPage,
    Change(Change),
}

pub enum Action {
    None,
    Run(Task<Message>),
    Change(Change),
}

impl Pokedex {
    pub fn new(pokeapi: &PokeApi, per_page: usize) -> (Self, Task<Message>) {
        let mut pokedex = Self {
            page: Page::FIRST,
            per_page,
            total_pages: 0,
            listing: Listing::Loading,
            lookup: Lookup::None,
            filter: Filter::default(),
            kinds: vec![filter::Kind::All],
        };

        let list_types = {
            let pokeapi = pokeapi.clone();

            Task::perform(
                async move { pokeapi.list_types().await },
                Message::TypesListed,
            )
        };

        let fetch_page = pokedex.fetch(Page::FIRST, pokeapi);

        (pokedex, Task::batch([fetch_page, list_types]))
    }

    pub fn update(&mut self, message: Message, pokeapi: &PokeApi) -> Action {
        match message {
            Message::PageLoaded(page, result) => {
                if page != self.page {
                    log::debug!("Discarding stale page {page}");
                    return Action::None;
                }

                match result {
                    Ok(contents) => {
                        self.total_pages = contents.total_pages;
                        self.listing = Listing::Loaded(contents.pokemon);
                    }
                    Err(error) => {
                        log::error!("{error}");
                        self.listing =
                            Listing::Errored(format!("Failed to load page {page}: {error}"));
                    }
                }

                Action::None
            }
            Message::TypesListed(Ok(types)) => {
                self.kinds = filter::Kind::choices(&types);

                Action::None
            }
            Message::SearchChanged(search) => {
                if search.trim().is_empty() {
                    self.lookup = Lookup::None;
                }

                self.filter.search = search;

                Action::None
            }
            Message::SearchSubmitted => {
                let key = self.filter.search.trim().to_lowercase();

                if key.is_empty() {
                    self.lookup = Lookup::None;
                    return Action::None;
                }

                let (search, handle) = {
                    let pokeapi = pokeapi.clone();
                    let on_finish = Message::SearchFinished.with(key.clone());
                    let key = key.clone();

                    Task::perform(
                        async move { pokeapi.get_by_name_or_id(&key).await },
                        on_finish,
                    )
                    .abortable()
                };

                self.lookup = Lookup::Searching {
                    key,
                    _task: handle.abort_on_drop(),
                };

                Action::Run(search)
            }
            Message::SearchFinished(key, result) => {
                let Lookup::Searching { key: pending, .. } = &self.lookup else {
                    return Action::None;
                };

                if *pending != key {
                    return Action::None;
                }

                self.lookup = match result {
                    Ok(pokemon) => Lookup::Found(pokemon),
                    Err(error) => {
                        log::warn!("{error}");
                        Lookup::Missing(error.to_string())
                    }
                };

                Action::None
            }
            Message::ClearSearch => {
                self.filter.search.clear();
                self.lookup = Lookup::None;

                Action::Run(operation::focus("search"))
            }
            Message::KindSelected(kind) => {
                self.filter.kind = kind;

                Action::None
            }
            Message::PreviousPage => {
                let Some(page) = self.page.decrement() else {
                    return Action::None;
                };

                Action::Run(self.fetch(page, pokeapi))
            }
            Message::NextPage => {
                let Some(page) = self.page.increment(self.total_pages) else {
                    return Action::None;
                };

                Action::Run(self.fetch(page, pokeapi))
            }
            Message::Change(change) => Action::Change(change),
            Message::TypesListed(Err(error)) => {
                log::error!("{error}");

                Action::None
            }
        }
    }

    fn fetch(&mut self, page: Page, pokeapi: &PokeApi) -> Task<Message> {
        self.page = page;
        self.listing = Listing::Loading;

        let pokeapi = pokeapi.clone();
        let per_page = self.per_page;

        Task::perform(
            async move { pokeapi.fetch_page(page, per_page).await },
            Message::PageLoaded.with(page),
        )
    }

    pub fn pokemon(&self) -> Vec<&Pokemon> {
        match (&self.lookup, &self.listing) {
            (Lookup::Found(pokemon), _) => vec![pokemon],
            (_, Listing::Loaded(pokemon)) => self.filter.apply(pokemon).collect(),
            _ => Vec::new(),
        }
    }

    pub fn view<'a>(
        &'a self,
        roster: &'a Roster,
        favorites: &'a Snapshot<Favorites>,
        sprites: &'a Sprites,
    ) -> Element<'a, Message> {
        let header = {
            let search = text_input(
                "Filter by name, or press Enter to look up a name or id...",
                &self.filter.search,
            )
            .on_input(Message::SearchChanged)
            .on_submit(Message::SearchSubmitted)
            .padding(10)
            .id("search");

            let clear = button(text("Clear").size(14))
                .style(button::text)
                .padding([10, 15])
                .on_press_maybe(
                    (!self.filter.search.is_empty()).then_some(Message::ClearSearch),
                );

            let kind = pick_list(
                self.kinds.as_slice(),
                Some(&self.filter.kind),
                Message::KindSelected,
            )
            .padding(10)
            .text_size(14);

            row![search, clear, kind].spacing(10).align_y(Center)
        };

        let card = |pokemon: &'a Pokemon| {
            widget::pokemon(
                pokemon,
                sprites.get(&pokemon.id),
                screen::actions(pokemon, roster, favorites).map(Message::Change),
            )
        };

        let content: Element<'_, Message> = match &self.lookup {
            Lookup::Searching { key, .. } => center(text!("Looking up \"{key}\"...")).into(),
            Lookup::Found(pokemon) => center(card(pokemon)).into(),
            Lookup::Missing(error) => center(
                container(text(error))
                    .padding(10)
                    .style(container::bordered_box),
            )
            .into(),
            Lookup::None => match &self.listing {
                Listing::Loading => center(text("Loading...")).into(),
                Listing::Errored(error) => center(
                    container(text(error).style(text::danger))
                        .padding(10)
                        .style(container::bordered_box),
                )
                .into(),
                Listing::Loaded(pokemon) => {
                    if !self.filter.is_empty() && self.filter.apply(pokemon).next().is_none() {
                        center(text("No Pokémon on this page match the filter.")).into()
                    } else {
                        scrollable(
                            row(self.filter.apply(pokemon).map(card))
                                .spacing(10)
                                .wrap(),
                        )
                        .width(Fill)
                        .height(Fill)
                        .spacing(10)
                        .into()
                    }
                }
            },
        };

        let pagination = {
            let previous = button(text("Previous").size(14))
                .style(button::text)
                .on_press_maybe(self.page.decrement().map(|_| Message::PreviousPage));

            let next = button(text("Next").size(14))
                .style(button::text)
                .on_press_maybe(
                    self.page
                        .increment(self.total_pages)
                        .map(|_| Message::NextPage),
                );

            row![
                space::horizontal(),
                previous,
                text!("{page} / {total}", page = self.page, total = self.total_pages.max(1))
                    .size(14),
                next,
                space::horizontal(),
            ]
            .spacing(20)
            .align_y(Center)
        };

        let mut layout = column![header, container(content).height(Fill)]
            .spacing(10)
            .padding(10);

        if let Lookup::None = self.lookup {
            layout = layout.push(pagination);
        }

        layout.into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        keyboard::listen().filter_map(|event| {
            use keyboard::key::{Key, Named};

            let keyboard::Event::KeyPressed { key, modifiers, .. } = event else {
                return None;
            };

            Some(match key.as_ref() {
                Key::Named(Named::ArrowLeft) if modifiers.is_empty() => Message::PreviousPage,
                Key::Named(Named::ArrowRight) if modifiers.is_empty() => Message::NextPage,
                _ => None?,
            })
        })
    }
}
