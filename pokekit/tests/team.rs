mod support;

use pokekit::store::{Collection, Memory};
use pokekit::team::{self, Member};
use pokekit::{Error, Store, Team};

use assert_matches::assert_matches;
use chrono::Utc;
use pretty_assertions::assert_eq;
use support::pokemon;

fn store() -> (Memory, Store) {
    let memory = Memory::new();
    let store = Store::new(memory.clone());

    (memory, store)
}

#[tokio::test]
async fn loads_an_empty_team() {
    let (_memory, store) = store();

    let team = Team::load(&store).await.unwrap();

    assert!(team.is_empty());
    assert_eq!(team.open_slots(), team::MAX_SIZE);
}

#[tokio::test]
async fn load_fails_when_the_store_is_unreachable() {
    let (memory, store) = store();
    memory.set_offline(true);

    assert_matches!(Team::load(&store).await, Err(Error::TeamLoad(cause)) => {
        assert_matches!(*cause, Error::PersistenceUnavailable(_));
    });

    // Retrying once the store is back succeeds
    memory.set_offline(false);
    assert_matches!(Team::load(&store).await, Ok(_));
}

#[tokio::test]
async fn added_members_are_stamped_and_persisted() {
    let (memory, store) = store();
    let mut team = Team::load(&store).await.unwrap();

    let before = Utc::now();
    team.add(pokemon(25, "pikachu"), &store).await.unwrap();

    assert_eq!(team.len(), 1);
    assert!(team.contains(pokemon(25, "pikachu").id));
    assert!(team.members()[0].added_at >= before);
    assert_eq!(memory.len(Collection::Team), 1);

    let reloaded = Team::load(&store).await.unwrap();
    assert_eq!(reloaded.members(), team.members());
}

#[tokio::test]
async fn rejects_a_seventh_member() {
    let (memory, store) = store();
    let mut team = Team::load(&store).await.unwrap();

    for id in 1..=6 {
        team.add(pokemon(id, &format!("pokemon-{id}")), &store)
            .await
            .unwrap();
    }

    assert!(team.is_full());

    let members = team.members().to_vec();

    assert_matches!(
        team.add(pokemon(7, "pokemon-7"), &store).await,
        Err(Error::TeamFull)
    );
    assert_eq!(team.len(), 6);
    assert_eq!(team.members(), members.as_slice());
    assert_eq!(memory.len(Collection::Team), 6);
}

#[tokio::test]
async fn rejects_duplicate_members() {
    let (memory, store) = store();
    let mut team = Team::load(&store).await.unwrap();

    team.add(pokemon(1, "bulbasaur"), &store).await.unwrap();

    assert_matches!(
        team.add(pokemon(1, "bulbasaur"), &store).await,
        Err(Error::DuplicateMember { name, .. }) if name == "bulbasaur"
    );
    assert_eq!(team.len(), 1);
    assert_eq!(memory.len(Collection::Team), 1);
}

#[tokio::test]
async fn failed_add_leaves_the_snapshot_untouched() {
    let (memory, store) = store();
    let mut team = Team::load(&store).await.unwrap();
    team.add(pokemon(1, "bulbasaur"), &store).await.unwrap();

    memory.set_offline(true);

    assert_matches!(
        team.add(pokemon(4, "charmander"), &store).await,
        Err(Error::PersistenceUnavailable(_))
    );
    assert_eq!(team.len(), 1);
}

#[tokio::test]
async fn removes_members() {
    let (memory, store) = store();
    let mut team = Team::load(&store).await.unwrap();

    team.add(pokemon(1, "bulbasaur"), &store).await.unwrap();
    team.add(pokemon(4, "charmander"), &store).await.unwrap();

    team.remove(pokemon(1, "bulbasaur").id, &store).await.unwrap();

    let names: Vec<_> = team
        .members()
        .iter()
        .map(|member| member.pokemon.name.as_str())
        .collect();

    assert_eq!(names, ["charmander"]);
    assert_eq!(memory.len(Collection::Team), 1);
}

#[tokio::test]
async fn removing_an_absent_member_keeps_the_snapshot() {
    let (_memory, store) = store();
    let mut team = Team::load(&store).await.unwrap();
    team.add(pokemon(1, "bulbasaur"), &store).await.unwrap();

    assert_matches!(
        team.remove(pokemon(150, "mewtwo").id, &store).await,
        Err(Error::Remove(cause)) => {
            assert_matches!(*cause, Error::MissingItem { collection: Collection::Team, id: 150 });
        }
    );
    assert_eq!(team.len(), 1);
}

#[tokio::test]
async fn failed_remove_keeps_the_member() {
    let (memory, store) = store();
    let mut team = Team::load(&store).await.unwrap();
    team.add(pokemon(1, "bulbasaur"), &store).await.unwrap();

    memory.set_offline(true);

    assert_matches!(
        team.remove(pokemon(1, "bulbasaur").id, &store).await,
        Err(Error::Remove(_))
    );
    assert!(team.contains(pokemon(1, "bulbasaur").id));
}

#[test]
fn members_are_stored_flat_with_a_timestamp() {
    let member = Member {
        pokemon: pokemon(25, "pikachu"),
        added_at: "2024-05-01T12:00:00Z".parse().unwrap(),
    };

    let stored = serde_json::to_value(&member).unwrap();

    assert_eq!(stored["id"], 25);
    assert_eq!(stored["name"], "pikachu");
    assert!(
        stored["addedAt"]
            .as_str()
            .unwrap()
            .starts_with("2024-05-01T12:00:00")
    );

    // Items written by other clients use millisecond timestamps
    let mut written = stored.clone();
    written["addedAt"] = "2024-05-01T12:00:00.000Z".into();
    let member: Member = serde_json::from_value(written).unwrap();
    assert_eq!(member.pokemon.name, "pikachu");
}
