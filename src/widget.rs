use crate::pokekit::Pokemon;
use crate::sprite::Sprite;

use iced::border;
use iced::widget::{canvas, center, column, container, image, row, text};
use iced::{Center, Color, Element, Fill, Pixels};

pub fn logo<'a, Message>(size: impl Into<Pixels>) -> Element<'a, Message> {
    text("PokéJac").size(size).into()
}

/// A Pokémon card: artwork, name, types and stats, followed by the given actions.
pub fn pokemon<'a, Message: 'a>(
    pokemon: &'a Pokemon,
    sprite: Option<&'a Sprite>,
    actions: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    let artwork: Element<'_, Message> = match sprite {
        Some(Sprite::Loaded(handle)) => image(handle).width(120).height(120).into(),
        _ => center(pokeball(48)).width(120).height(120).into(),
    };

    let types = row(pokemon.type_names().map(|type_| {
        container(text(title(type_)).size(10).color(Color::WHITE))
            .padding([2, 8])
            .style(move |_theme| {
                container::Style::default()
                    .background(type_color(type_))
                    .border(border::rounded(8))
            })
            .into()
    }))
    .spacing(5);

    let stats = column(pokemon.stats.iter().map(|stat| {
        row![
            text(title(&stat.stat.name)).size(12).width(Fill),
            text(stat.base_stat).size(12),
        ]
        .into()
    }))
    .spacing(2);

    let abilities = text(
        pokemon
            .ability_names()
            .map(title)
            .collect::<Vec<_>>()
            .join(", "),
    )
    .size(10);

    container(
        column![
            center(artwork).height(130),
            row![
                text(title(&pokemon.name)).size(18).width(Fill),
                text(pokemon.id.to_string()).size(12),
            ]
            .align_y(Center),
            types,
            stats,
            abilities,
            actions.into(),
        ]
        .spacing(10)
        .align_x(Center),
    )
    .width(240)
    .padding(15)
    .style(container::bordered_box)
    .into()
}

/// An empty team slot, marked with a pokéball.
pub fn slot<'a, Message: 'a>(label: String) -> Element<'a, Message> {
    container(
        column![pokeball(48), text(label).size(12)]
            .spacing(10)
            .align_x(Center),
    )
    .center(240)
    .height(360)
    .style(|theme| container::dark(theme).border(border::rounded(8)))
    .into()
}

pub fn pokeball<'a, Message: 'a>(size: impl Into<Pixels>) -> Element<'a, Message> {
    use iced::mouse;
    use iced::{Point, Radians, Rectangle, Renderer, Size, Theme};
    use std::f32::consts::PI;

    struct Pokeball;

    impl<Message> canvas::Program<Message> for Pokeball {
        type State = canvas::Cache;

        fn draw(
            &self,
            cache: &Self::State,
            renderer: &Renderer,
            theme: &Theme,
            bounds: Rectangle,
            _cursor: mouse::Cursor,
        ) -> Vec<canvas::Geometry> {
            let pokeball = cache.draw(renderer, bounds.size(), |frame| {
                const RADIUS: f32 = 100.0;
                const BAND: f32 = 16.0;

                let palette = theme.palette();

                let center = Point::new(RADIUS, RADIUS);
                let shell = canvas::Path::circle(center, RADIUS);
                let button = canvas::Path::circle(center, RADIUS / 3.0);
                let core = canvas::Path::circle(center, RADIUS / 5.0);

                let top = canvas::Path::new(|path| {
                    path.arc(canvas::path::Arc {
                        center,
                        radius: RADIUS,
                        start_angle: Radians(PI),
                        end_angle: Radians(2.0 * PI),
                    });
                    path.close();
                });

                let band = Rectangle::new(
                    Point::new(0.0, RADIUS - BAND / 2.0),
                    Size::new(2.0 * RADIUS, BAND),
                );

                let scale = (bounds.width - 0.5) / (2.0 * RADIUS);

                frame.scale(scale);

                frame.fill(&shell, palette.text);
                frame.fill(&top, palette.danger);
                frame.fill_rectangle(band.position(), band.size(), palette.background);
                frame.fill(&button, palette.background);
                frame.fill(&core, palette.text);
            });

            vec![pokeball]
        }
    }

    let size = size.into();

    canvas(Pokeball).width(size).height(size).into()
}

pub fn title(name: &str) -> String {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn type_color(type_: &str) -> Color {
    match type_ {
        "normal" => Color::from_rgb8(0xA8, 0xA8, 0x78),
        "fire" => Color::from_rgb8(0xF0, 0x80, 0x30),
        "water" => Color::from_rgb8(0x68, 0x90, 0xF0),
        "electric" => Color::from_rgb8(0xF8, 0xD0, 0x30),
        "grass" => Color::from_rgb8(0x78, 0xC8, 0x50),
        "ice" => Color::from_rgb8(0x98, 0xD8, 0xD8),
        "fighting" => Color::from_rgb8(0xC0, 0x30, 0x28),
        "poison" => Color::from_rgb8(0xA0, 0x40, 0xA0),
        "ground" => Color::from_rgb8(0xE0, 0xC0, 0x68),
        "flying" => Color::from_rgb8(0xA8, 0x90, 0xF0),
        "psychic" => Color::from_rgb8(0xF8, 0x58, 0x88),
        "bug" => Color::from_rgb8(0xA8, 0xB8, 0x20),
        "rock" => Color::from_rgb8(0xB8, 0xA0, 0x38),
        "ghost" => Color::from_rgb8(0x70, 0x58, 0x98),
        "dragon" => Color::from_rgb8(0x70, 0x38, 0xF8),
        "dark" => Color::from_rgb8(0x70, 0x58, 0x48),
        "steel" => Color::from_rgb8(0xB8, 0xB8, 0xD0),
        "fairy" => Color::from_rgb8(0xEE, 0x99, 0xAC),
        _ => Color::from_rgb8(0x77, 0x77, 0x77),
    }
}
