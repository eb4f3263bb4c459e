mod common;

use common::{listing, Behavior, FakeFetcher};
use hotel_compare::compare::SimilarityGrouper;
use hotel_compare::scrapers::{SearchRequest, StaticLoader};
use hotel_compare::search;
use hotel_compare::service::FetcherFactory;
use hotel_compare::{HotelSearchService, SearchError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn dhaka() -> SearchRequest {
    SearchRequest::for_city("Dhaka")
}

#[tokio::test(start_paused = true)]
async fn test_slow_source_fails_whole_run() {
    let slow = FakeFetcher::new(
        "slow",
        Behavior::Emit(Duration::from_secs(5), vec![listing("slow", "Late Inn", 10.0)]),
    );
    let released = Arc::clone(&slow.released);
    let fast = FakeFetcher::new(
        "fast",
        Behavior::Emit(Duration::ZERO, vec![listing("fast", "Quick Stay", 20.0)]),
    );

    let result = search::run(
        &dhaka(),
        vec![slow.boxed(), fast.boxed()],
        Duration::from_secs(1),
    )
    .await;

    match result {
        Err(SearchError::FetchTimeout { after }) => assert_eq!(after, Duration::from_secs(1)),
        other => panic!("expected timeout, got {other:?}"),
    }

    // The aborted fetcher still releases what it held
    for _ in 0..10 {
        if released.load(Ordering::SeqCst) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(released.load(Ordering::SeqCst));
}

#[tokio::test(start_paused = true)]
async fn test_fetchers_run_concurrently() {
    // Run one after the other these would need 1.4s against a 1s deadline
    let booking = FakeFetcher::new(
        "booking.com",
        Behavior::Emit(
            Duration::from_millis(700),
            vec![listing("booking.com", "Sea Pearl", 100.0)],
        ),
    );
    let agoda = FakeFetcher::new(
        "agoda",
        Behavior::Emit(
            Duration::from_millis(700),
            vec![listing("agoda", "Radisson Blu", 120.0)],
        ),
    );

    let listings = search::run(
        &dhaka(),
        vec![booking.boxed(), agoda.boxed()],
        Duration::from_secs(1),
    )
    .await
    .unwrap();

    assert_eq!(listings.len(), 2);
    assert!(listings.iter().any(|l| l.source == "booking.com"));
    assert!(listings.iter().any(|l| l.source == "agoda"));
}

#[tokio::test]
async fn test_failing_source_does_not_abort_siblings() {
    let good = FakeFetcher::new(
        "agoda",
        Behavior::Emit(
            Duration::ZERO,
            vec![
                listing("agoda", "Sea Pearl", 100.0),
                listing("agoda", "Radisson Blu", 120.0),
                listing("agoda", "Le Meridien", 150.0),
            ],
        ),
    );
    let bad = FakeFetcher::new("booking.com", Behavior::Fail);

    let listings = search::run(&dhaka(), vec![bad.boxed(), good.boxed()], Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(listings.len(), 3);
    assert!(listings.iter().all(|l| l.source == "agoda"));
}

#[tokio::test]
async fn test_failed_source_contributes_nothing() {
    let partial = FakeFetcher::new(
        "booking.com",
        Behavior::EmitThenFail(vec![listing("booking.com", "Half Done", 50.0)]),
    );
    let good = FakeFetcher::new(
        "agoda",
        Behavior::Emit(Duration::ZERO, vec![listing("agoda", "Sea Pearl", 100.0)]),
    );

    let listings = search::run(&dhaka(), vec![partial.boxed(), good.boxed()], Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].hotel_name, "Sea Pearl");
}

#[tokio::test]
async fn test_panicking_source_is_contained() {
    let boom = FakeFetcher::new("booking.com", Behavior::Panic);
    let good = FakeFetcher::new(
        "agoda",
        Behavior::Emit(Duration::ZERO, vec![listing("agoda", "Sea Pearl", 100.0)]),
    );

    let listings = search::run(&dhaka(), vec![boom.boxed(), good.boxed()], Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(listings.len(), 1);
}

#[tokio::test]
async fn test_unknown_city_fails_before_fetching() {
    let fetcher = FakeFetcher::new(
        "agoda",
        Behavior::Emit(Duration::ZERO, vec![listing("agoda", "Sea Pearl", 100.0)]),
    );
    let started = Arc::clone(&fetcher.released);

    let err = search::run(
        &SearchRequest::for_city("Atlantis"),
        vec![fetcher.boxed()],
        Duration::from_secs(5),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, SearchError::NoCityMapping { .. }));
    assert!(!started.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_no_sources_yields_empty_run() {
    let listings = search::run(&dhaka(), Vec::new(), Duration::from_secs(1))
        .await
        .unwrap();
    assert!(listings.is_empty());
}

#[tokio::test]
async fn test_service_groups_and_ranks() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let factory: FetcherFactory = Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        vec![
            FakeFetcher::new(
                "booking.com",
                Behavior::Emit(
                    Duration::ZERO,
                    vec![
                        listing("booking.com", "Grand Hotel Dhaka", 100.0),
                        listing("booking.com", "Ocean View Resort", 200.0),
                    ],
                ),
            )
            .boxed(),
            FakeFetcher::new(
                "agoda",
                Behavior::Emit(
                    Duration::from_millis(5),
                    vec![listing("agoda", "grand hotel", 90.0)],
                ),
            )
            .boxed(),
        ]
    });

    let service = HotelSearchService::new(
        factory,
        Duration::from_secs(5),
        Box::new(SimilarityGrouper::default()),
    );

    let entries = service.search(&dhaka()).await.unwrap();
    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0].hotel_name, "Grand Hotel Dhaka");
    assert_eq!(entries[0].best_price, 90.0);
    assert_eq!(entries[0].sources.len(), 2);
    let best: Vec<&str> = entries[0]
        .sources
        .iter()
        .filter(|s| s.is_best_deal)
        .map(|s| s.source.as_str())
        .collect();
    assert_eq!(best, vec!["agoda"]);
    assert!(entries[0].sources.iter().all(|s| s.image.starts_with("https://")));

    assert_eq!(entries[1].hotel_name, "Ocean View Resort");
    assert_eq!(entries[1].best_price, 200.0);

    // Every search builds its own fetchers
    service.search(&dhaka()).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_real_fetchers_over_static_pages() {
    let loader = Arc::new(
        StaticLoader::new()
            .with_page(
                "www.booking.com",
                r#"<div data-testid="property-card">
                     <div data-testid="title">Grand Hotel Dhaka</div>
                     <span data-testid="price-and-discounted-price">BDT 10,000</span>
                   </div>"#,
            )
            .with_page(
                "www.agoda.com",
                r#"<div id="sort-bar"></div>
                   <div><div data-selenium="hotel-item">
                     <span data-selenium="hotel-name">Grand Hotel</span>
                     <span data-selenium="display-price">BDT 9,500</span>
                   </div></div>"#,
            ),
    );
    let factory: FetcherFactory =
        Arc::new(move || hotel_compare::scrapers::default_fetchers(loader.clone()));
    let service = HotelSearchService::new(
        factory,
        Duration::from_secs(5),
        Box::new(SimilarityGrouper::default()),
    );

    let entries = service.search(&dhaka()).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].best_price, 9500.0);
    assert_eq!(entries[0].sources.len(), 2);
}
