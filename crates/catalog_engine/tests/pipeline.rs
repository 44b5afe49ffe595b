mod common;

use std::sync::Arc;

use catalog_core::{parse_query_str, update, Effect, ListState, Msg, QuerySnapshot};
use catalog_engine::{PageRequest, ResolveError, ResultPipeline};
use common::{
    client_for, creature, ids, init_logging, mount_catalog, mount_category, numbered, starters,
    FixedFavorites,
};
use pretty_assertions::assert_eq;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn first_page() -> PageRequest {
    PageRequest {
        page: 1,
        append: false,
    }
}

async fn pipeline_for(server: &MockServer, favorites: Vec<u64>) -> ResultPipeline {
    ResultPipeline::new(client_for(server), Arc::new(FixedFavorites(favorites)))
}

#[tokio::test]
async fn default_mode_returns_one_window_at_offset() {
    init_logging();
    let server = MockServer::start().await;
    mount_catalog(&server, &numbered(45), &[]).await;
    let pipeline = pipeline_for(&server, Vec::new()).await;

    let page = pipeline
        .resolve(
            &QuerySnapshot::default(),
            PageRequest {
                page: 2,
                append: true,
            },
            &CancellationToken::new(),
        )
        .await
        .expect("page");

    assert_eq!(ids(&page.items), (21..=40).collect::<Vec<_>>());
    assert!(page.has_more);
    assert_eq!(page.page, 2);

    let requested: Vec<String> = server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == "/pokemon")
        .map(|r| r.url.query().unwrap_or_default().to_string())
        .collect();
    assert_eq!(requested, vec!["offset=20&limit=20"]);
}

#[tokio::test]
async fn default_mode_drops_failed_hydrations_and_sorts() {
    let server = MockServer::start().await;
    mount_catalog(&server, &starters(), &[3]).await;
    let pipeline = pipeline_for(&server, Vec::new()).await;

    let page = pipeline
        .resolve(
            &parse_query_str("sort=weight&order=desc"),
            first_page(),
            &CancellationToken::new(),
        )
        .await
        .expect("page");

    assert_eq!(ids(&page.items), vec![5, 2, 7, 4, 1]);
    assert!(!page.has_more);
}

#[tokio::test]
async fn search_mode_matches_name_substrings() {
    let server = MockServer::start().await;
    mount_catalog(&server, &starters(), &[]).await;
    let pipeline = pipeline_for(&server, Vec::new()).await;
    let cancel = CancellationToken::new();

    let saur = pipeline
        .resolve(&parse_query_str("q=saur"), first_page(), &cancel)
        .await
        .expect("saur");
    assert_eq!(ids(&saur.items), vec![1, 2, 3]);
    assert!(!saur.has_more);

    let bulba = pipeline
        .resolve(&parse_query_str("q=BULBA"), first_page(), &cancel)
        .await
        .expect("bulba");
    assert_eq!(ids(&bulba.items), vec![1]);
}

#[tokio::test]
async fn search_mode_over_fetches_from_offset_zero() {
    let server = MockServer::start().await;
    mount_catalog(&server, &numbered(30), &[]).await;
    let pipeline = pipeline_for(&server, Vec::new()).await;

    let page = pipeline
        .resolve(
            &parse_query_str("q=mon-1"),
            PageRequest {
                page: 6,
                append: true,
            },
            &CancellationToken::new(),
        )
        .await
        .expect("page");
    assert!(page.items.is_empty());

    let queries: Vec<String> = server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == "/pokemon")
        .map(|r| r.url.query().unwrap_or_default().to_string())
        .collect();
    assert_eq!(queries, vec!["offset=0&limit=240"]);
}

#[tokio::test]
async fn search_mode_windows_matches() {
    let server = MockServer::start().await;
    mount_catalog(&server, &numbered(45), &[]).await;
    let pipeline = pipeline_for(&server, Vec::new()).await;

    let page = pipeline
        .resolve(
            &parse_query_str("q=mon&sort=id&order=desc"),
            PageRequest {
                page: 2,
                append: true,
            },
            &CancellationToken::new(),
        )
        .await
        .expect("page");
    assert_eq!(ids(&page.items), (6..=25).rev().collect::<Vec<_>>());
    assert!(page.has_more);
}

#[tokio::test]
async fn category_mode_windows_the_sorted_members() {
    let server = MockServer::start().await;
    let members: Vec<_> = (1..=25)
        .map(|id| creature(id, &format!("fire-{id}"), &["fire"], 1, (id % 5) as u32))
        .collect();
    mount_catalog(&server, &members, &[]).await;
    mount_category(&server, "fire", &members).await;
    let pipeline = pipeline_for(&server, Vec::new()).await;
    let snapshot = parse_query_str("type=fire&sort=weight");

    let first = pipeline
        .resolve(&snapshot, first_page(), &CancellationToken::new())
        .await
        .expect("first");
    assert_eq!(first.items.len(), 20);
    assert!(first.has_more);
    // Weight 0 first, ties in member order.
    assert_eq!(ids(&first.items[..5]), vec![5, 10, 15, 20, 25]);

    let second = pipeline
        .resolve(
            &snapshot,
            PageRequest {
                page: 2,
                append: true,
            },
            &CancellationToken::new(),
        )
        .await
        .expect("second");
    assert_eq!(ids(&second.items), vec![4, 9, 14, 19, 24]);
    assert!(!second.has_more);
}

#[tokio::test]
async fn category_mode_applies_search_within_members() {
    let server = MockServer::start().await;
    let catalog = starters();
    let fire: Vec<_> = catalog.iter().filter(|c| c.types[0] == "fire").cloned().collect();
    mount_catalog(&server, &catalog, &[]).await;
    mount_category(&server, "fire", &fire).await;
    let pipeline = pipeline_for(&server, Vec::new()).await;

    let page = pipeline
        .resolve(
            &parse_query_str("type=fire&q=meleon"),
            first_page(),
            &CancellationToken::new(),
        )
        .await
        .expect("page");
    assert_eq!(ids(&page.items), vec![5]);
}

#[tokio::test]
async fn favorites_mode_hydrates_filters_and_ignores_pagination() {
    let server = MockServer::start().await;
    mount_catalog(&server, &starters(), &[]).await;
    let pipeline = pipeline_for(&server, vec![7, 999, 4, 1, 5]).await;

    let all = pipeline
        .resolve(
            &parse_query_str("favorites=true&page=3"),
            PageRequest {
                page: 3,
                append: false,
            },
            &CancellationToken::new(),
        )
        .await
        .expect("favorites");
    assert_eq!(ids(&all.items), vec![7, 4, 1, 5]);
    assert!(!all.has_more);

    let fire = pipeline
        .resolve(
            &parse_query_str("favorites=true&type=fire&q=char&sort=name&order=desc"),
            first_page(),
            &CancellationToken::new(),
        )
        .await
        .expect("fire favorites");
    assert_eq!(ids(&fire.items), vec![5, 4]);
}

#[tokio::test]
async fn remote_failure_is_propagated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/type/ghost"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let pipeline = pipeline_for(&server, Vec::new()).await;

    let err = pipeline
        .resolve(&parse_query_str("type=ghost"), first_page(), &CancellationToken::new())
        .await
        .unwrap_err();
    match err {
        ResolveError::Remote(fetch) => assert!(fetch.to_string().contains("500")),
        other => panic!("unexpected {other:?}"),
    }
}

/// Run the controller against the pipeline until no resolution is pending.
async fn drive(pipeline: &ResultPipeline, state: ListState, msg: Msg) -> ListState {
    let (mut state, mut effects) = update(state, msg);
    while let Some(effect) = effects.pop() {
        if let Effect::Resolve {
            request_id,
            snapshot,
            page,
            append,
        } = effect
        {
            let result = pipeline
                .resolve(&snapshot, PageRequest { page, append }, &CancellationToken::new())
                .await;
            let msg = match result {
                Ok(page) => Msg::PageResolved { request_id, page },
                Err(ResolveError::Cancelled) => Msg::ResolveCancelled { request_id },
                Err(err) => Msg::ResolveFailed {
                    request_id,
                    message: err.to_string(),
                },
            };
            let (next, more) = update(state, msg);
            state = next;
            effects.extend(more);
        }
    }
    state
}

#[tokio::test]
async fn load_more_accumulates_default_pages() {
    init_logging();
    let server = MockServer::start().await;
    mount_catalog(&server, &numbered(45), &[]).await;
    let pipeline = pipeline_for(&server, Vec::new()).await;

    let state = drive(&pipeline, ListState::new(), Msg::QueryChanged(QuerySnapshot::default())).await;
    assert_eq!(state.items().len(), 20);
    assert!(state.has_more());

    let state = drive(&pipeline, state, Msg::LoadMoreClicked).await;
    assert_eq!(state.items().len(), 40);
    assert!(state.has_more());
    assert_eq!(state.current_page(), 2);

    let state = drive(&pipeline, state, Msg::LoadMoreClicked).await;
    assert_eq!(state.items().len(), 45);
    assert!(!state.has_more());
    assert_eq!(ids(state.items()), (1..=45).collect::<Vec<_>>());
}

#[tokio::test]
async fn retry_after_failure_recovers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_catalog(&server, &numbered(5), &[]).await;
    let pipeline = pipeline_for(&server, Vec::new()).await;

    let state = drive(&pipeline, ListState::new(), Msg::QueryChanged(QuerySnapshot::default())).await;
    assert!(state.error().is_some_and(|e| e.contains("500")));
    assert!(state.items().is_empty());

    let state = drive(&pipeline, state, Msg::RetryClicked).await;
    assert_eq!(state.error(), None);
    assert_eq!(ids(state.items()), vec![1, 2, 3, 4, 5]);
}
