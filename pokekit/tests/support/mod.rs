#![allow(dead_code)]

pub mod stub;

use pokekit::Pokemon;

pub fn pokemon(id: u32, name: &str) -> Pokemon {
    pokemon_with_stats(id, name, [50, 50, 50])
}

pub fn pokemon_with_stats(id: u32, name: &str, [hp, attack, speed]: [u32; 3]) -> Pokemon {
    serde_json::from_value(record(id, name, [hp, attack, speed])).unwrap()
}

/// A PokeAPI-shaped record.
pub fn record(id: u32, name: &str, [hp, attack, speed]: [u32; 3]) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "base_experience": 64,
        "sprites": {
            "front_default": format!("https://sprites/{id}.png"),
            "other": { "official-artwork": { "front_default": format!("https://artwork/{id}.png") } }
        },
        "stats": [
            { "base_stat": hp, "effort": 0, "stat": { "name": "hp" } },
            { "base_stat": attack, "effort": 0, "stat": { "name": "attack" } },
            { "base_stat": speed, "effort": 0, "stat": { "name": "speed" } }
        ],
        "types": [{ "slot": 1, "type": { "name": "normal" } }],
        "abilities": [{ "ability": { "name": "run-away" }, "is_hidden": false }]
    })
}
