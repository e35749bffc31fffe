mod support;

use pokekit::{Error, Page, PokeApi};

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use std::time::Duration;
use support::stub::{self, Stub, route};

fn pokeapi(stub: &Stub) -> PokeApi {
    PokeApi::new(stub.url(), Duration::from_secs(5))
}

fn listing(count: usize, names: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "count": count,
        "next": null,
        "previous": null,
        "results": names
            .iter()
            .map(|name| serde_json::json!({ "name": name, "url": format!("https://pokeapi.co/api/v2/pokemon/{name}/") }))
            .collect::<Vec<_>>(),
    })
}

#[tokio::test]
async fn lists_summaries_with_offset_and_limit() {
    let stub = Stub::serve([route(
        "GET",
        "/pokemon?offset=40&limit=20",
        200,
        listing(1302, &["pidgeot", "rattata"]),
    )])
    .await;

    let listing = pokeapi(&stub).list_summaries(40, 20).await.unwrap();

    assert_eq!(listing.count, 1302);
    assert_eq!(listing.results[0].name, "pidgeot");
    assert_eq!(listing.total_pages(20), 66);
}

#[tokio::test]
async fn keys_are_matched_case_insensitively() {
    let stub = Stub::serve([route(
        "GET",
        "/pokemon/pikachu",
        200,
        support::record(25, "pikachu", [35, 55, 90]),
    )])
    .await;

    let pikachu = pokeapi(&stub).get_by_name_or_id("  PikaChu ").await.unwrap();

    assert_eq!(pikachu.name, "pikachu");
    assert_eq!(pikachu.stat("speed"), 90);
    assert_eq!(stub.requests()[0].path, "/pokemon/pikachu");
}

#[tokio::test]
async fn numeric_keys_address_ids() {
    let stub = Stub::serve([route(
        "GET",
        "/pokemon/25",
        200,
        support::record(25, "pikachu", [35, 55, 90]),
    )])
    .await;

    let pikachu = pokeapi(&stub).get_by_name_or_id("25").await.unwrap();

    assert_eq!(pikachu.id.number(), 25);
}

#[tokio::test]
async fn unknown_pokemon_is_not_found() {
    let stub = Stub::serve([]).await;

    assert_matches!(
        pokeapi(&stub).get_by_name_or_id("nonexistent-xyz").await,
        Err(Error::NotFound(key)) if key == "nonexistent-xyz"
    );
}

#[tokio::test]
async fn unreachable_source_is_a_network_error() {
    let pokeapi = PokeApi::new(stub::unreachable_url().await, Duration::from_secs(5));

    assert_matches!(
        pokeapi.get_by_name_or_id("pikachu").await,
        Err(Error::Network(_))
    );
    assert_matches!(pokeapi.list_types().await, Err(Error::Network(_)));
}

#[tokio::test]
async fn lists_every_type_across_pages() {
    let stub = Stub::serve([
        route(
            "GET",
            "/type",
            200,
            serde_json::json!({
                "count": 3,
                "next": "{base}/type?offset=2&limit=2",
                "results": [
                    { "name": "normal", "url": "https://pokeapi.co/api/v2/type/1/" },
                    { "name": "fighting", "url": "https://pokeapi.co/api/v2/type/2/" }
                ]
            }),
        ),
        route(
            "GET",
            "/type?offset=2&limit=2",
            200,
            serde_json::json!({
                "count": 3,
                "next": null,
                "results": [{ "name": "flying", "url": "https://pokeapi.co/api/v2/type/3/" }]
            }),
        ),
    ])
    .await;

    let types = pokeapi(&stub).list_types().await.unwrap();

    assert_eq!(types, ["normal", "fighting", "flying"]);
}

#[tokio::test]
async fn fetches_full_records_of_a_page_in_order() {
    let stub = Stub::serve([
        route(
            "GET",
            "/pokemon?offset=2&limit=2",
            200,
            listing(5, &["venusaur", "charmander"]),
        ),
        route(
            "GET",
            "/pokemon/venusaur",
            200,
            support::record(3, "venusaur", [80, 82, 80]),
        ),
        route(
            "GET",
            "/pokemon/charmander",
            200,
            support::record(4, "charmander", [39, 52, 65]),
        ),
    ])
    .await;

    let page = Page::FIRST.increment(3).unwrap();
    let contents = pokeapi(&stub).fetch_page(page, 2).await.unwrap();

    let names: Vec<_> = contents
        .pokemon
        .iter()
        .map(|pokemon| pokemon.name.as_str())
        .collect();

    assert_eq!(contents.page, page);
    assert_eq!(contents.total_pages, 3);
    assert_eq!(names, ["venusaur", "charmander"]);
}

#[tokio::test]
async fn a_missing_entry_fails_the_whole_page() {
    let stub = Stub::serve([
        route(
            "GET",
            "/pokemon?offset=0&limit=2",
            200,
            listing(2, &["bulbasaur", "ivysaur"]),
        ),
        route(
            "GET",
            "/pokemon/bulbasaur",
            200,
            support::record(1, "bulbasaur", [45, 49, 45]),
        ),
    ])
    .await;

    assert_matches!(
        pokeapi(&stub).fetch_page(Page::FIRST, 2).await,
        Err(Error::NotFound(key)) if key == "ivysaur"
    );
}

#[tokio::test]
async fn downloads_sprites() {
    let stub = Stub::serve([route("GET", "/sprites/25.png", 200, "PNG")]).await;

    let bytes = pokeapi(&stub)
        .download_sprite(&format!("{}/sprites/25.png", stub.url()))
        .await
        .unwrap();

    assert_eq!(bytes.as_ref(), b"PNG");
}
