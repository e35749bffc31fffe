use pokekit;

mod config;
mod screen;
mod sprite;
mod widget;

use crate::config::Config;
use crate::pokekit::team::Member;
use crate::pokekit::{Favorites, PokeApi, Pokemon, Snapshot, Store, Team, pokemon};
use crate::screen::{Change, Screen, Tab};
use crate::screen::{battle, pokedex, team};
use crate::sprite::{Sprite, Sprites};
use crate::widget::logo;

use iced::widget::{button, center, column, container, image, row, space, text};
use iced::{Center, Element, Fill, Subscription, Task, Theme};

use function::Binary;

pub fn main() -> iced::Result {
    tracing_subscriber::fmt::init();

    iced::application(PokeJac::new, PokeJac::update, PokeJac::view)
        .subscription(PokeJac::subscription)
        .theme(PokeJac::theme)
        .window_size((1280.0, 900.0))
        .run()
}

struct PokeJac {
    state: State,
}

enum State {
    Loading,
    Ready {
        config: Config,
        pokeapi: PokeApi,
        store: Store,
        roster: Roster,
        favorites: Snapshot<Favorites>,
        sprites: Sprites,
        notice: Option<String>,
        screen: Screen,
    },
}

/// The team, as last seen in the store.
pub type Roster = Snapshot<Team>;

#[derive(Debug, Clone)]
enum Message {
    Loaded(Result<Config, anywho::Error>),
    TeamLoaded(pokekit::Result<Team>),
    FavoritesLoaded(pokekit::Result<Favorites>),
    TeamChanged(pokekit::Result<Team>),
    FavoritesChanged(pokekit::Result<Favorites>),
    SpriteFetched(pokemon::Id, Result<sprite::Image, anywho::Error>),
    Pokedex(pokedex::Message),
    Team(team::Message),
    Battle(battle::Message),
    Open(Tab),
    DismissNotice,
}

impl PokeJac {
    fn new() -> (Self, Task<Message>) {
        (
            Self {
                state: State::Loading,
            },
            Task::perform(Config::load(), Message::Loaded),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let task = self.react(message);

        Task::batch([task, self.fetch_sprites()])
    }

    fn react(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Loaded(result) => {
                let config = result.unwrap_or_else(|error| {
                    log::error!("Invalid configuration: {error}");
                    Config::default()
                });

                let pokeapi = PokeApi::new(&config.pokeapi, config.timeout());
                let store = Store::json_server(&config.store, config.timeout());

                let (pokedex, task) = screen::Pokedex::new(&pokeapi, config.per_page);

                let load = Task::batch([
                    load_team(&store),
                    load_favorites(&store),
                    task.map(Message::Pokedex),
                ]);

                self.state = State::Ready {
                    config,
                    pokeapi,
                    store,
                    roster: Roster::Loading,
                    favorites: Snapshot::Loading,
                    sprites: Sprites::new(),
                    notice: None,
                    screen: Screen::Pokedex(pokedex),
                };

                load
            }
            Message::TeamLoaded(result) => {
                let State::Ready { roster, .. } = &mut self.state else {
                    return Task::none();
                };

                if let Err(error) = &result {
                    log::error!("{error}");
                }

                roster.load(result);

                Task::none()
            }
            Message::FavoritesLoaded(result) => {
                let State::Ready { favorites, .. } = &mut self.state else {
                    return Task::none();
                };

                if let Err(error) = &result {
                    log::error!("{error}");
                }

                favorites.load(result);

                Task::none()
            }
            Message::TeamChanged(result) => {
                let State::Ready { roster, notice, .. } = &mut self.state else {
                    return Task::none();
                };

                if let Err(error) = roster.commit(result) {
                    log::error!("{error}");
                    *notice = Some(error.to_string());
                }

                Task::none()
            }
            Message::FavoritesChanged(result) => {
                let State::Ready {
                    favorites, notice, ..
                } = &mut self.state
                else {
                    return Task::none();
                };

                if let Err(error) = favorites.commit(result) {
                    log::error!("{error}");
                    *notice = Some(error.to_string());
                }

                Task::none()
            }
            Message::SpriteFetched(id, Ok(image)) => {
                let State::Ready { sprites, .. } = &mut self.state else {
                    return Task::none();
                };

                let _ = sprites.insert(
                    id,
                    Sprite::Loaded(image::Handle::from_rgba(
                        image.width,
                        image.height,
                        image.rgba,
                    )),
                );

                Task::none()
            }
            Message::Pokedex(message) => {
                let State::Ready {
                    pokeapi,
                    screen: Screen::Pokedex(pokedex),
                    ..
                } = &mut self.state
                else {
                    return Task::none();
                };

                match pokedex.update(message, pokeapi) {
                    pokedex::Action::None => Task::none(),
                    pokedex::Action::Run(task) => task.map(Message::Pokedex),
                    pokedex::Action::Change(change) => self.apply(change),
                }
            }
            Message::Team(message) => {
                let State::Ready {
                    store,
                    roster,
                    favorites,
                    screen: Screen::Team(team),
                    ..
                } = &mut self.state
                else {
                    return Task::none();
                };

                match team.update(message) {
                    team::Action::None => Task::none(),
                    team::Action::Retry => {
                        let mut tasks = Vec::new();

                        if let Snapshot::Failed(_) = roster {
                            *roster = Snapshot::Loading;
                            tasks.push(load_team(store));
                        }

                        if let Snapshot::Failed(_) = favorites {
                            *favorites = Snapshot::Loading;
                            tasks.push(load_favorites(store));
                        }

                        Task::batch(tasks)
                    }
                    team::Action::Change(change) => self.apply(change),
                }
            }
            Message::Battle(message) => {
                let State::Ready {
                    pokeapi,
                    store,
                    screen: Screen::Battle(battle),
                    ..
                } = &mut self.state
                else {
                    return Task::none();
                };

                match battle.update(message, pokeapi, store) {
                    battle::Action::None => Task::none(),
                    battle::Action::Run(task) => task.map(Message::Battle),
                }
            }
            Message::Open(tab) => {
                let State::Ready {
                    config,
                    pokeapi,
                    store,
                    screen,
                    ..
                } = &mut self.state
                else {
                    return Task::none();
                };

                if screen.tab() == tab {
                    return Task::none();
                }

                match tab {
                    Tab::Pokedex => {
                        let (pokedex, task) = screen::Pokedex::new(pokeapi, config.per_page);
                        *screen = Screen::Pokedex(pokedex);

                        task.map(Message::Pokedex)
                    }
                    Tab::Team => {
                        *screen = Screen::Team(screen::Team::new());

                        Task::none()
                    }
                    Tab::Battle => {
                        let (battle, task) = screen::Battle::new(store);
                        *screen = Screen::Battle(battle);

                        task.map(Message::Battle)
                    }
                }
            }
            Message::DismissNotice => {
                if let State::Ready { notice, .. } = &mut self.state {
                    *notice = None;
                }

                Task::none()
            }
            Message::SpriteFetched(id, Err(error)) => {
                log::warn!("{error}");

                if let State::Ready { sprites, .. } = &mut self.state {
                    let _ = sprites.insert(id, Sprite::Missing);
                }

                Task::none()
            }
        }
    }

    /// Applies a change to a copy of the team or favorites, replacing the
    /// current ones once the store agrees.
    ///
    /// Each of them takes one change at a time. Anything requested while
    /// they are loading or saving is refused with a notice.
    fn apply(&mut self, change: Change) -> Task<Message> {
        let State::Ready {
            store,
            roster,
            favorites,
            notice,
            ..
        } = &mut self.state
        else {
            return Task::none();
        };

        let store = store.clone();

        let task = match change {
            Change::Recruit(pokemon) => {
                if let Some(Err(error)) = roster.get().map(|team| team.admit(&pokemon)) {
                    *notice = Some(error.to_string());
                    return Task::none();
                }

                roster.checkout().map(|mut team| {
                    Task::perform(
                        async move { team.add(pokemon, &store).await.map(|()| team) },
                        Message::TeamChanged,
                    )
                })
            }
            Change::Release(id) => roster.checkout().map(|mut team| {
                Task::perform(
                    async move { team.remove(id, &store).await.map(|()| team) },
                    Message::TeamChanged,
                )
            }),
            Change::Favorite(pokemon) => favorites.checkout().map(|mut favorites| {
                Task::perform(
                    async move {
                        favorites
                            .toggle(pokemon, &store)
                            .await
                            .map(|_| favorites)
                    },
                    Message::FavoritesChanged,
                )
            }),
        };

        match task {
            Ok(task) => {
                *notice = None;
                task
            }
            Err(error) => {
                log::warn!("Refusing change: {error}");
                *notice = Some(error.to_string());

                Task::none()
            }
        }
    }

    fn fetch_sprites(&mut self) -> Task<Message> {
        let State::Ready {
            pokeapi,
            roster,
            favorites,
            sprites,
            screen,
            ..
        } = &mut self.state
        else {
            return Task::none();
        };

        let members: &[Member] = roster.get().map(Team::members).unwrap_or_default();

        let shown: Vec<&Pokemon> = screen
            .pokemon()
            .into_iter()
            .chain(members.iter().map(|member| &member.pokemon))
            .chain(favorites.get().into_iter().flat_map(|favorites| favorites.iter()))
            .collect();

        Task::batch(
            sprite::missing(sprites, shown)
                .into_iter()
                .map(|(id, url)| {
                    Task::perform(
                        sprite::Image::fetch(url, pokeapi.clone()),
                        Message::SpriteFetched.with(id),
                    )
                }),
        )
    }

    fn view(&self) -> Element<'_, Message> {
        let State::Ready {
            roster,
            favorites,
            sprites,
            notice,
            screen,
            ..
        } = &self.state
        else {
            return center(text("Loading...")).into();
        };

        let active = screen.tab();

        let team_size = match roster.get() {
            Some(team) => format!("Team ({}/{})", team.len(), pokekit::team::MAX_SIZE),
            None => "Team".to_owned(),
        };

        let tabs = [
            ("Pokédex".to_owned(), Tab::Pokedex),
            (team_size, Tab::Team),
            ("Battle".to_owned(), Tab::Battle),
        ]
        .into_iter()
        .map(|(label, tab)| {
            let is_active = tab == active;

            button(text(label).size(14))
                .style(move |theme: &Theme, status| {
                    if is_active {
                        let palette = theme.extended_palette();

                        button::Style {
                            background: Some(palette.background.base.color.into()),
                            text_color: palette.background.base.text,
                            ..button::text(theme, status)
                        }
                    } else {
                        button::text(theme, status)
                    }
                })
                .padding([8, 15])
                .on_press(Message::Open(tab))
                .into()
        });

        let navbar = container(
            row![logo(14), row(tabs)]
                .spacing(10)
                .width(Fill)
                .align_y(Center),
        )
        .padding([0, 10])
        .style(container::dark);

        let content = match screen {
            Screen::Pokedex(pokedex) => pokedex
                .view(roster, favorites, sprites)
                .map(Message::Pokedex),
            Screen::Team(team) => team.view(roster, favorites, sprites).map(Message::Team),
            Screen::Battle(battle) => battle.view(roster, sprites).map(Message::Battle),
        };

        let banner = notice.as_deref().map(|notice| {
            container(
                row![
                    text(notice).size(14),
                    space::horizontal(),
                    button(text("Dismiss").size(12))
                        .style(button::text)
                        .on_press(Message::DismissNotice),
                ]
                .align_y(Center),
            )
            .padding([5, 10])
            .style(|theme: &Theme| {
                let palette = theme.extended_palette();

                container::Style {
                    text_color: Some(palette.danger.weak.text),
                    ..container::Style::default().background(palette.danger.weak.color)
                }
            })
        });

        column![]
            .push(banner)
            .push(container(content).height(Fill))
            .push(navbar)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let State::Ready { screen, .. } = &self.state else {
            return Subscription::none();
        };

        match screen {
            Screen::Pokedex(pokedex) => pokedex.subscription().map(Message::Pokedex),
            Screen::Team(_) | Screen::Battle(_) => Subscription::none(),
        }
    }

    fn theme(&self) -> Theme {
        Theme::CatppuccinMocha
    }
}

fn load_team(store: &Store) -> Task<Message> {
    let store = store.clone();

    Task::perform(
        async move { Team::load(&store).await },
        Message::TeamLoaded,
    )
}

fn load_favorites(store: &Store) -> Task<Message> {
    let store = store.clone();

    Task::perform(
        async move { Favorites::load(&store).await },
        Message::FavoritesLoaded,
    )
}
