//! HTTP-level tests for the catalog client against a mock service.

use catalog_client::{
    CatalogGateway, ClientConfig, GatewayError, HttpCatalogClient, RecommendationRequest, Strategy,
};
use serde_json::json;
use session::RatingStore;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpCatalogClient {
    HttpCatalogClient::new(&ClientConfig {
        api_base: server.uri(),
        request_timeout: Duration::from_secs(2),
    })
    .expect("Failed to build client")
}

#[tokio::test]
async fn test_stats_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_movies": 9742,
            "total_ratings": 100836,
            "unique_users": 610,
            "avg_rating": 3.5015
        })))
        .mount(&server)
        .await;

    let stats = client_for(&server).stats().await.unwrap();

    assert_eq!(stats.total_movies, 9742);
    assert_eq!(stats.unique_users, 610);
    assert!((stats.avg_rating - 3.5015).abs() < 1e-9);
}

#[tokio::test]
async fn test_popular_preserves_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/movies/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"movieId": 356, "title": "Forrest Gump (1994)", "rating_count": 329},
            {"movieId": 318, "title": "Shawshank Redemption, The (1994)", "rating_count": 317}
        ])))
        .mount(&server)
        .await;

    let popular = client_for(&server).popular_movies().await.unwrap();

    let ids: Vec<_> = popular.iter().map(|m| m.movie_id).collect();
    assert_eq!(ids, vec![356, 318]);
    assert_eq!(popular[0].rating_count, 329);
}

#[tokio::test]
async fn test_search_encodes_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/movies/search/star%20wars"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"movieId": 260, "title": "Star Wars: Episode IV - A New Hope (1977)", "genres": "Action|Adventure|Sci-Fi"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let hits = client_for(&server).search("star wars").await.unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].movie_id, 260);
}

#[tokio::test]
async fn test_details_and_similar() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/movies/1/details"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "movieId": 1,
            "title": "Toy Story (1995)",
            "genres": "Adventure|Animation|Children|Comedy|Fantasy",
            "avg_rating": 3.92,
            "rating_count": 215
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/movies/1/similar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"movieId": 2355, "title": "Bug's Life, A (1998)", "avg_rating": 3.66, "common_genres": 4}
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let details = client.movie_details(1).await.unwrap();
    let similar = client.similar_movies(1).await.unwrap();

    assert_eq!(details.genre_list().len(), 5);
    assert_eq!(details.rating_count, 215);
    assert_eq!(similar[0].common_genres, 4);
}

#[tokio::test]
async fn test_recommendations_post_body_and_strategy_path() {
    let server = MockServer::start().await;
    let expected_body = json!({
        "ratings": {
            "1": {"title": "Toy Story (1995)", "rating": 5},
            "2": {"title": "Jumanji (1995)", "rating": 3}
        }
    });
    Mock::given(method("POST"))
        .and(path("/api/recommendations/hybrid"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"movieId": 3114, "title": "Toy Story 2 (1999)", "genres": "Animation|Children", "score": 0.93},
            {"movieId": 2355, "title": "Bug's Life, A (1998)", "genres": "Animation|Children", "score": 0.88}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = RatingStore::new();
    store.rate(1, "Toy Story (1995)", 5).unwrap();
    store.rate(2, "Jumanji (1995)", 3).unwrap();
    let request = RecommendationRequest::from(&store.snapshot());

    let recs = client_for(&server)
        .recommendations(Strategy::Hybrid, &request)
        .await
        .unwrap();

    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].movie_id, 3114);
    assert_eq!(recs[1].movie_id, 2355);
}

#[tokio::test]
async fn test_missing_field_is_decoding_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_movies": 9742,
            "total_ratings": 100836
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).stats().await.unwrap_err();
    assert!(err.is_decoding(), "unexpected error: {:?}", err);
}

#[tokio::test]
async fn test_invalid_json_is_decoding_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/movies/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).popular_movies().await.unwrap_err();
    assert!(err.is_decoding());
}

#[tokio::test]
async fn test_server_error_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/recommendations"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .recommendations(Strategy::Standard, &RecommendationRequest::default())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        GatewayError::Rejected {
            endpoint: "/api/recommendations".to_string(),
            status: 500
        }
    );
    assert!(err.is_network());
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = HttpCatalogClient::new(&ClientConfig {
        api_base: server.uri(),
        request_timeout: Duration::from_millis(50),
    })
    .unwrap();

    let err = client.stats().await.unwrap_err();
    assert!(
        matches!(err, GatewayError::Network { ref reason, .. } if reason == "timed out"),
        "unexpected error: {:?}",
        err
    );
}

#[tokio::test]
async fn test_unreachable_service_is_network_error() {
    // Nothing listens on port 9 on loopback in the test environment
    let client = HttpCatalogClient::new(&ClientConfig {
        api_base: "http://127.0.0.1:9".to_string(),
        request_timeout: Duration::from_secs(2),
    })
    .unwrap();

    let err = client.stats().await.unwrap_err();
    assert!(err.is_network());
}
