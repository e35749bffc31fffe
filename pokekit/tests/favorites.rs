mod support;

use pokekit::store::{Collection, Memory};
use pokekit::{Error, Favorites, Snapshot, Store, Team};

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use support::pokemon;

#[tokio::test]
async fn favorites_are_a_set() {
    let memory = Memory::new();
    let store = Store::new(memory.clone());
    let mut favorites = Favorites::load(&store).await.unwrap();

    favorites.add(pokemon(25, "pikachu"), &store).await.unwrap();
    favorites.add(pokemon(25, "pikachu"), &store).await.unwrap();

    assert_eq!(favorites.len(), 1);
    assert_eq!(memory.len(Collection::Favorites), 1);
}

#[tokio::test]
async fn toggle_flips_membership() {
    let store = Store::new(Memory::new());
    let mut favorites = Favorites::load(&store).await.unwrap();

    assert!(favorites.toggle(pokemon(7, "squirtle"), &store).await.unwrap());
    assert!(favorites.contains(pokemon(7, "squirtle").id));

    assert!(!favorites.toggle(pokemon(7, "squirtle"), &store).await.unwrap());
    assert!(favorites.is_empty());
    assert!(Favorites::load(&store).await.unwrap().is_empty());
}

#[tokio::test]
async fn favorites_are_independent_from_the_team() {
    let store = Store::new(Memory::new());
    let mut favorites = Favorites::load(&store).await.unwrap();
    let mut team = Team::load(&store).await.unwrap();

    team.add(pokemon(1, "bulbasaur"), &store).await.unwrap();
    favorites.add(pokemon(1, "bulbasaur"), &store).await.unwrap();

    favorites.remove(pokemon(1, "bulbasaur").id, &store).await.unwrap();

    assert!(Team::load(&store).await.unwrap().contains(pokemon(1, "bulbasaur").id));
}

#[tokio::test]
async fn removing_an_unknown_favorite_fails() {
    let store = Store::new(Memory::new());
    let mut favorites = Favorites::load(&store).await.unwrap();
    favorites.add(pokemon(1, "bulbasaur"), &store).await.unwrap();

    assert_matches!(
        favorites.remove(pokemon(2, "ivysaur").id, &store).await,
        Err(Error::MissingItem { id: 2, .. })
    );
    assert_eq!(favorites.len(), 1);
}

#[tokio::test]
async fn toggling_waits_for_stored_favorites() {
    let memory = Memory::new();
    let store = Store::new(memory.clone());

    let mut stored = Favorites::load(&store).await.unwrap();
    stored.add(pokemon(1, "bulbasaur"), &store).await.unwrap();
    stored.add(pokemon(4, "charmander"), &store).await.unwrap();

    let mut snapshot = Snapshot::<Favorites>::Loading;
    assert_matches!(snapshot.checkout(), Err(Error::Busy));

    snapshot.load(Favorites::load(&store).await);

    let mut favorites = snapshot.checkout().unwrap();
    assert_matches!(snapshot.checkout(), Err(Error::Busy));

    let toggled = favorites.toggle(pokemon(25, "pikachu"), &store).await;
    assert_matches!(toggled, Ok(true));

    snapshot.commit(Ok(favorites)).unwrap();

    assert_eq!(snapshot.get().map(Favorites::len), Some(3));
    assert_eq!(memory.len(Collection::Favorites), 3);
}

#[tokio::test]
async fn failed_toggles_keep_the_previous_favorites() {
    let memory = Memory::new();
    let store = Store::new(memory.clone());

    let mut snapshot = Snapshot::<Favorites>::Loading;
    snapshot.load(Favorites::load(&store).await);

    let mut favorites = snapshot.checkout().unwrap();
    memory.set_offline(true);

    let result = favorites
        .toggle(pokemon(25, "pikachu"), &store)
        .await
        .map(|_| favorites);

    assert_matches!(
        snapshot.commit(result),
        Err(Error::PersistenceUnavailable(_))
    );
    assert_eq!(snapshot.get().map(Favorites::len), Some(0));
    assert!(snapshot.is_ready());
}
