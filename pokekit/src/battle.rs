//! Three-round stat battles between two Pokémon.
//!
//! A battle compares the base `hp`, `attack` and `speed` of both contestants,
//! one round per stat. The first Pokémon takes a round only with a strictly
//! greater value; the second one takes it otherwise, ties included. Every
//! round therefore has a winner and the side with most rounds wins.
use crate::store::{Collection, Resource, Store};
use crate::{Pokemon, Result};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const STATS: [&str; 3] = ["hp", "attack", "speed"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn pick<'a>(self, first: &'a Pokemon, second: &'a Pokemon) -> &'a Pokemon {
        match self {
            Side::First => first,
            Side::Second => second,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub stat: &'static str,
    pub first: u32,
    pub second: u32,
    pub winner: Side,
    pub winner_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub winner: Pokemon,
    pub side: Side,
    pub rounds: [Round; 3],
}

impl Outcome {
    pub fn wins(&self, side: Side) -> usize {
        self.rounds
            .iter()
            .filter(|round| round.winner == side)
            .count()
    }
}

pub fn simulate(first: &Pokemon, second: &Pokemon) -> Outcome {
    let rounds = STATS.map(|stat| {
        let (a, b) = (first.stat(stat), second.stat(stat));
        let winner = if a > b { Side::First } else { Side::Second };

        Round {
            stat,
            first: a,
            second: b,
            winner,
            winner_name: winner.pick(first, second).name.clone(),
        }
    });

    let first_wins = rounds
        .iter()
        .filter(|round| round.winner == Side::First)
        .count();

    let side = if first_wins > STATS.len() - first_wins {
        Side::First
    } else {
        Side::Second
    };

    Outcome {
        winner: side.pick(first, second).clone(),
        side,
        rounds,
    }
}

/// A battle as recorded in the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub pokemon1: Pokemon,
    pub pokemon2: Pokemon,
    pub winner: Pokemon,
    pub date: DateTime<Utc>,
}

impl Resource for Battle {
    const COLLECTION: Collection = Collection::Battles;
}

/// A simulated battle and the result of recording it.
#[derive(Debug, Clone)]
pub struct Fight {
    pub outcome: Outcome,
    pub saved: Result<Battle>,
}

/// Simulates a battle and records it in the history.
///
/// Recording is best-effort: the outcome is returned even if the store
/// cannot be reached.
pub async fn fight(first: Pokemon, second: Pokemon, store: &Store) -> Fight {
    let outcome = simulate(&first, &second);

    log::info!(
        "{} vs {}: {} wins",
        first.name,
        second.name,
        outcome.winner.name
    );

    let saved = store
        .create(&Battle {
            id: None,
            winner: outcome.winner.clone(),
            pokemon1: first,
            pokemon2: second,
            date: Utc::now(),
        })
        .await;

    if let Err(error) = &saved {
        log::warn!("Battle was not recorded: {error}");
    }

    Fight { outcome, saved }
}

/// Every recorded battle, most recent first.
pub async fn history(store: &Store) -> Result<Vec<Battle>> {
    let mut battles: Vec<Battle> = store.list().await?;
    battles.reverse();
    battles.sort_by(|a, b| b.date.cmp(&a.date));

    Ok(battles)
}
