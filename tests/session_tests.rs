//! Session services against an in-memory catalog: list loading, detail
//! caching and the type breakdown's stale-run handling.

mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;

use common::{detail, entity, numbered_entities, FakeCatalog};
use pokefav::breakdown::{type_percent, TypeBreakdown, TypeCount};
use pokefav::favorites::Favorites;
use pokefav::session::Session;

fn session_with(catalog: FakeCatalog) -> (Session, Arc<FakeCatalog>) {
    let catalog = Arc::new(catalog);
    (Session::new(catalog.clone()), catalog)
}

fn favorites_of(names: &[&str]) -> Favorites {
    let mut favorites = Favorites::default();
    for name in names {
        favorites.toggle(entity(name));
    }
    favorites
}

#[tokio::test]
async fn list_is_requested_once_with_limit_and_offset() {
    let (session, catalog) = session_with(FakeCatalog::new().with_entries(numbered_entities(200)));

    let entries = session.load_list(150, 0).await.unwrap();

    assert_eq!(entries.len(), 150);
    assert_eq!(entries[0].name, "mon-001");
    assert_eq!(entries[149].name, "mon-150");
    assert_eq!(catalog.calls(), vec!["list:150:0".to_string()]);
}

#[tokio::test]
async fn list_failure_is_reported() {
    let (session, _) = session_with(FakeCatalog::new().failing_list());

    let error = session.load_list(150, 0).await.unwrap_err();

    assert!(error.to_string().contains("503"), "unexpected error: {error}");
}

#[tokio::test]
async fn cached_detail_is_fetched_once() {
    let pikachu = detail("pikachu", &["electric"]);
    let (session, catalog) = session_with(FakeCatalog::new().with_detail(pikachu.clone()));

    let first = session.detail("pikachu", false).await;
    let second = session.detail("pikachu", false).await;

    assert_eq!(first, Some(pikachu.clone()));
    assert_eq!(second, Some(pikachu));
    assert_eq!(catalog.detail_calls("pikachu"), 1);
}

#[tokio::test]
async fn forced_lookup_refetches_and_replaces() {
    let (session, catalog) =
        session_with(FakeCatalog::new().with_detail(detail("pikachu", &["electric"])));
    session.detail("pikachu", false).await;

    let mut updated = detail("pikachu", &["electric"]);
    updated.weight = 61;
    catalog.set_detail(updated.clone());

    let refreshed = session.detail("pikachu", true).await;

    assert_eq!(refreshed, Some(updated.clone()));
    assert_eq!(session.cache().peek("pikachu").await, Some(updated));
    assert_eq!(catalog.detail_calls("pikachu"), 2);
}

#[tokio::test]
async fn failed_lookup_is_absent_and_not_cached() {
    let (session, catalog) = session_with(FakeCatalog::new());

    assert_eq!(session.detail("bulbasaur", false).await, None);
    assert!(!session.cache().contains("bulbasaur").await);

    assert_eq!(session.detail("bulbasaur", false).await, None);
    assert_eq!(catalog.detail_calls("bulbasaur"), 2);
}

#[tokio::test]
async fn type_counts_for_two_favorites() {
    let (session, _) = session_with(
        FakeCatalog::new()
            .with_detail(detail("pikachu", &["electric"]))
            .with_detail(detail("charmander", &["fire"])),
    );

    let favorites = favorites_of(&["pikachu", "charmander"]);
    let counts = session.type_counts(favorites.entries()).await;

    assert_eq!(
        counts,
        vec![
            TypeCount {
                name: "electric".into(),
                value: 1
            },
            TypeCount {
                name: "fire".into(),
                value: 1
            },
        ]
    );
    assert_eq!(type_percent("electric", &counts), "50.00%");
    assert_eq!(type_percent("fire", &counts), "50.00%");
}

#[tokio::test]
async fn type_counts_reuse_cached_details() {
    let (session, catalog) = session_with(
        FakeCatalog::new()
            .with_detail(detail("bulbasaur", &["grass", "poison"]))
            .with_detail(detail("oddish", &["grass", "poison"])),
    );
    session.detail("bulbasaur", false).await;

    let favorites = favorites_of(&["bulbasaur", "oddish"]);
    let counts = session.type_counts(favorites.entries()).await;

    assert_eq!(counts.iter().map(|c| c.value).sum::<u32>(), 4);
    assert_eq!(catalog.detail_calls("bulbasaur"), 1);
    assert_eq!(catalog.detail_calls("oddish"), 1);
}

#[tokio::test]
async fn failed_favorite_contributes_no_types() {
    let (session, _) =
        session_with(FakeCatalog::new().with_detail(detail("pikachu", &["electric"])));

    let favorites = favorites_of(&["pikachu", "missingno"]);
    let counts = session.type_counts(favorites.entries()).await;

    assert_eq!(
        counts,
        vec![TypeCount {
            name: "electric".into(),
            value: 1
        }]
    );
}

#[tokio::test]
async fn slow_older_run_never_overwrites_newer_counts() {
    let catalog = FakeCatalog::new()
        .with_detail(detail("slowpoke", &["water", "psychic"]))
        .with_detail(detail("charmander", &["fire"]));
    let gate = catalog.gate("slowpoke");
    let (session, _) = session_with(catalog);
    let mut breakdown = TypeBreakdown::default();

    let first = favorites_of(&["slowpoke"]);
    let first_generation = breakdown.trigger(&first).unwrap();
    let slow_session = session.clone();
    let slow_entries = first.entries().to_vec();
    let slow_run = tokio::spawn(async move { slow_session.type_counts(&slow_entries).await });

    let second = favorites_of(&["charmander"]);
    let second_generation = breakdown.trigger(&second).unwrap();
    let fast_counts = session.type_counts(second.entries()).await;
    assert!(breakdown.publish(second_generation, fast_counts));

    gate.notify_one();
    let slow_counts = slow_run.await.unwrap();
    assert_eq!(slow_counts.len(), 2);
    assert!(!breakdown.publish(first_generation, slow_counts));

    assert!(!breakdown.is_computing());
    assert_eq!(
        breakdown.counts(),
        &[TypeCount {
            name: "fire".into(),
            value: 1
        }]
    );
}

#[tokio::test]
async fn aggregation_and_selection_fill_the_same_miss() {
    let catalog = FakeCatalog::new().with_detail(detail("pikachu", &["electric"]));
    let gate = catalog.gate("pikachu");
    let (session, catalog) = session_with(catalog);

    let counting = session.clone();
    let favorites = favorites_of(&["pikachu"]).entries().to_vec();
    let aggregation = tokio::spawn(async move { counting.type_counts(&favorites).await });
    let selecting = session.clone();
    let selection = tokio::spawn(async move { selecting.detail("pikachu", false).await });

    for _ in 0..100 {
        if catalog.detail_calls("pikachu") == 2 {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_eq!(catalog.detail_calls("pikachu"), 2);
    gate.notify_waiters();

    let counts = aggregation.await.unwrap();
    let shown = selection.await.unwrap();

    assert_eq!(
        counts,
        vec![TypeCount {
            name: "electric".into(),
            value: 1
        }]
    );
    assert_eq!(shown, Some(detail("pikachu", &["electric"])));
    assert_eq!(session.cache().len().await, 1);
    assert_eq!(
        session.cache().peek("pikachu").await,
        Some(detail("pikachu", &["electric"]))
    );
}
