//! End-to-end tests for the seeking pipeline over mock capabilities.
//!
//! These exercise the full stage sequence in both execution modes:
//! batch (one call, full response) and streaming (places first, then
//! summary fragments).

use futures::StreamExt;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use spotseek::testing::{sample_place, GeneratorCall, MockGenerator, MockPlaceDirectory, MockWebSearcher};
use spotseek::{news_query, SearchHit, SeekError, SpotSeeker, StreamEvent};

const KANDA_REQUEST: &str = "神田でラーメン食べたい";

fn kanda_generator() -> MockGenerator {
    MockGenerator::new()
        .with_structured(
            KANDA_REQUEST,
            json!({"textQuery": "神田 ラーメン", "languageCode": "ja", "pageSize": 5}),
        )
        .with_completion("レビューと話題性から、一番のラーメン店がおすすめです。")
}

fn kanda_directory() -> MockPlaceDirectory {
    MockPlaceDirectory::new()
        .with_candidates("神田 ラーメン", ["id-a", "id-b", "id-c"])
        .with_place(sample_place("id-a", "神田ラーメン 一番"))
        .with_place(sample_place("id-b", "麺屋 二葉"))
        .with_place(sample_place("id-c", "中華そば 三丁目"))
}

fn kanda_news() -> MockWebSearcher {
    MockWebSearcher::new().with_hits(
        news_query("神田ラーメン 一番"),
        vec![SearchHit::new().with_metatags(json!({
            "og:title": "神田の一番が行列の訳",
            "og:site_name": "グルメ通信",
            "og:description": "老舗の一杯が再び話題に。"
        }))],
    )
}

#[tokio::test]
async fn test_run_to_completion_returns_ranked_places_and_summary() {
    let seeker = SpotSeeker::new(kanda_generator(), kanda_directory(), kanda_news());

    let response = seeker.run_to_completion(KANDA_REQUEST).await.unwrap();

    assert_eq!(response.places.len(), 3);
    let names: Vec<_> = response.places.iter().map(|p| p.place.name.as_str()).collect();
    assert_eq!(names, vec!["神田ラーメン 一番", "麺屋 二葉", "中華そば 三丁目"]);

    let scores: Vec<_> = response
        .places
        .iter()
        .map(|p| p.relevance_score.unwrap())
        .collect();
    assert_eq!(scores, vec![10.0, 9.0, 8.0]);

    assert_eq!(response.places[0].news_articles.len(), 1);
    assert!(response.places[1].news_articles.is_empty());
    assert!(!response.summary.is_empty());
}

#[tokio::test]
async fn test_failed_detail_lookups_skip_but_preserve_order() {
    let directory = MockPlaceDirectory::new()
        .with_candidates("神田 ラーメン", ["id-a", "id-b", "id-c"])
        .with_place(sample_place("id-a", "神田ラーメン 一番"))
        .with_place(sample_place("id-c", "中華そば 三丁目"));

    let seeker = SpotSeeker::new(kanda_generator(), directory, MockWebSearcher::new());
    let response = seeker.run_to_completion(KANDA_REQUEST).await.unwrap();

    // id-b has no detail record: it is skipped, not fatal
    let names: Vec<_> = response.places.iter().map(|p| p.place.name.as_str()).collect();
    assert_eq!(names, vec!["神田ラーメン 一番", "中華そば 三丁目"]);

    let scores: Vec<_> = response
        .places
        .iter()
        .map(|p| p.relevance_score.unwrap())
        .collect();
    assert_eq!(scores, vec![10.0, 9.0]);
}

#[tokio::test]
async fn test_text_search_failure_aborts_the_request() {
    let directory = kanda_directory().failing_search();
    let seeker = SpotSeeker::new(kanda_generator(), directory, kanda_news());

    let err = seeker.run_to_completion(KANDA_REQUEST).await.unwrap_err();
    assert!(matches!(err, SeekError::Upstream { .. }));
}

#[tokio::test]
async fn test_query_synthesis_failure_aborts_the_request() {
    // No structured reply scripted for this request
    let generator = MockGenerator::new().with_completion("まとめ");
    let seeker = SpotSeeker::new(generator, kanda_directory(), kanda_news());

    let err = seeker.run_to_completion(KANDA_REQUEST).await.unwrap_err();
    assert!(matches!(err, SeekError::Generation(_)));
}

#[tokio::test]
async fn test_batch_summary_failure_aborts_the_request() {
    let generator = MockGenerator::new().with_structured(
        KANDA_REQUEST,
        json!({"textQuery": "神田 ラーメン", "languageCode": "ja", "pageSize": 5}),
    );
    let seeker = SpotSeeker::new(generator, kanda_directory(), kanda_news());

    let err = seeker.run_to_completion(KANDA_REQUEST).await.unwrap_err();
    assert!(matches!(err, SeekError::Generation(_)));
}

#[tokio::test]
async fn test_news_search_failure_still_enriches_one_to_one() {
    let news = MockWebSearcher::new()
        .with_failure(news_query("神田ラーメン 一番"))
        .with_failure(news_query("麺屋 二葉"));

    let seeker = SpotSeeker::new(kanda_generator(), kanda_directory(), news);
    let response = seeker.run_to_completion(KANDA_REQUEST).await.unwrap();

    assert_eq!(response.places.len(), 3);
    assert!(response.places.iter().all(|p| p.news_articles.is_empty()));
}

#[tokio::test]
async fn test_two_phase_run_leaves_summary_for_the_stream() {
    let seeker = SpotSeeker::new(kanda_generator(), kanda_directory(), kanda_news());

    let state = seeker.run_to_ranked(KANDA_REQUEST).await.unwrap();

    assert!(state.summary.is_empty());
    assert_eq!(state.enriched_places.len(), 3);
    assert!(state
        .enriched_places
        .iter()
        .all(|p| p.relevance_score.is_some()));
}

#[tokio::test]
async fn test_streaming_emits_places_first_then_fragments() {
    let generator = kanda_generator().with_fragments(["神田なら", "一番が", "おすすめです。"]);
    let seeker = SpotSeeker::new(generator, kanda_directory(), kanda_news());

    let state = seeker.run_to_ranked(KANDA_REQUEST).await.unwrap();
    let mut events = seeker.stream_summary(state, CancellationToken::new());

    let mut collected = Vec::new();
    while let Some(event) = events.next().await {
        collected.push(event);
    }

    assert_eq!(collected.len(), 4);
    match &collected[0] {
        StreamEvent::Places { places } => assert_eq!(places.len(), 3),
        other => panic!("expected a places event first, got {other:?}"),
    }

    let fragments: Vec<_> = collected[1..]
        .iter()
        .map(|event| match event {
            StreamEvent::Summary(text) => text.as_str(),
            other => panic!("expected summary fragments, got {other:?}"),
        })
        .collect();
    assert_eq!(fragments, vec!["神田なら", "一番が", "おすすめです。"]);
}

#[tokio::test]
async fn test_streaming_stops_quietly_when_receiver_disconnects() {
    let generator = kanda_generator().with_fragments(["届かない", "フラグメント"]);
    let seeker = SpotSeeker::new(generator, kanda_directory(), kanda_news());

    let state = seeker.run_to_ranked(KANDA_REQUEST).await.unwrap();

    let cancel = CancellationToken::new();
    cancel.cancel();

    let events: Vec<_> = seeker.stream_summary(state, cancel).collect().await;

    // The opening places event is already on the wire; nothing follows it.
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], StreamEvent::Places { .. }));
}

#[tokio::test]
async fn test_streaming_converts_midstream_failure_into_error_event() {
    let generator = kanda_generator()
        .with_fragments(["ここまでは"])
        .with_stream_error("connection reset");
    let seeker = SpotSeeker::new(generator, kanda_directory(), kanda_news());

    let state = seeker.run_to_ranked(KANDA_REQUEST).await.unwrap();
    let events: Vec<_> = seeker
        .stream_summary(state, CancellationToken::new())
        .collect()
        .await;

    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], StreamEvent::Places { .. }));
    assert!(matches!(&events[1], StreamEvent::Summary(text) if text == "ここまでは"));
    match &events[2] {
        StreamEvent::Error(message) => assert!(message.contains("connection reset")),
        other => panic!("expected a terminal error event, got {other:?}"),
    }
}

#[tokio::test]
async fn test_summary_prompt_carries_the_collected_data() {
    let generator = kanda_generator();
    let probe = generator.clone();
    let seeker = SpotSeeker::new(generator, kanda_directory(), kanda_news());

    seeker.run_to_completion(KANDA_REQUEST).await.unwrap();

    let prompt = probe
        .calls()
        .into_iter()
        .find_map(|call| match call {
            GeneratorCall::Generate { prompt } => Some(prompt),
            _ => None,
        })
        .expect("the batch summarizer should have been called");

    assert!(prompt.contains(KANDA_REQUEST));
    assert!(prompt.contains("3件のスポットが見つかっています"));
    assert!(prompt.contains("神田ラーメン 一番"));
    assert!(prompt.contains("グルメ通信"));
}

#[tokio::test]
async fn test_identical_requests_yield_identical_responses() {
    let seeker = SpotSeeker::new(kanda_generator(), kanda_directory(), kanda_news());

    let first = seeker.run_to_completion(KANDA_REQUEST).await.unwrap();
    let second = seeker.run_to_completion(KANDA_REQUEST).await.unwrap();

    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}
