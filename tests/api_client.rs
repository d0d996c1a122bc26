//! Integration tests for `BreweryApi` using wiremock HTTP mocks.

use serde_json::json;
use taproom::{
    BreweryApi, BreweryType, Config, DashboardSession, DirectoryService, FetchStatus,
    FilterCriteria, PageLoad, RequestDescriptor, TaproomError,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> BreweryApi {
    let config = Config::default()
        .with_api_base(format!("{}/v1", server.uri()))
        .expect("mock server URI should be valid");
    BreweryApi::new(&config).expect("client construction should not fail")
}

fn brewery_json(id: &str, name: &str, kind: &str, state: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "brewery_type": kind,
        "address_1": "1 Main St",
        "address_2": null,
        "address_3": null,
        "city": "Denver",
        "state_province": state,
        "postal_code": "80202",
        "country": "United States",
        "longitude": "-104.98",
        "latitude": "39.75",
        "phone": "3035550100",
        "website_url": "https://example.com",
        "state": state,
        "street": "1 Main St"
    })
}

#[tokio::test]
async fn browse_sends_facets_and_parses_records() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/breweries"))
        .and(query_param("by_type", "micro"))
        .and(query_param("by_city", "San Diego"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            brewery_json("b1", "Ale Works", "micro", "California"),
            brewery_json("b2", "Hop Yard", "taproom", "California"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_client(&server);
    let criteria = FilterCriteria::default().with_type("micro").with_city("San Diego");
    let records = api
        .fetch_page(&RequestDescriptor::page(&criteria, 1, 50))
        .await
        .expect("should parse page");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "Ale Works");
    assert_eq!(records[0].brewery_type, Some(BreweryType::Micro));
    assert_eq!(records[0].coordinates(), Some((39.75, -104.98)));
    assert_eq!(records[1].brewery_type, Some(BreweryType::Other("taproom".into())));
}

#[tokio::test]
async fn search_uses_search_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/breweries/search"))
        .and(query_param("query", "dog & duck"))
        .and(query_param("by_state", "Ohio"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            brewery_json("d1", "Dog & Duck", "brewpub", "Ohio")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_client(&server);
    let criteria = FilterCriteria::default()
        .with_search("dog & duck")
        .with_state("Ohio")
        .with_city("Columbus");
    let records = api
        .fetch_page(&RequestDescriptor::page(&criteria, 1, 50))
        .await
        .expect("should parse search results");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "d1");
}

#[tokio::test]
async fn metadata_reads_string_total() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/breweries/meta"))
        .and(query_param("by_state", "Oregon"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "total": "312", "page": "1", "per_page": "50" })),
        )
        .mount(&server)
        .await;

    let api = test_client(&server);
    let meta = api
        .fetch_metadata(&RequestDescriptor::metadata(
            &FilterCriteria::default().with_state("Oregon"),
        ))
        .await
        .expect("should parse metadata");

    assert_eq!(meta.total, 312);
}

#[tokio::test]
async fn random_takes_first_element() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/breweries/random"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            brewery_json("r1", "Lucky Pick", "nano", "Maine")
        ])))
        .mount(&server)
        .await;

    let brewery = test_client(&server)
        .fetch_random()
        .await
        .expect("should parse random brewery");
    assert_eq!(brewery.id, "r1");
}

#[tokio::test]
async fn detail_404_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/breweries/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Couldn't find Brewery" })))
        .mount(&server)
        .await;

    let err = test_client(&server).fetch_detail("nope").await.unwrap_err();
    assert!(matches!(err, TaproomError::NotFound(id) if id == "nope"));
}

#[tokio::test]
async fn server_error_is_fetch_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/breweries"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_page(&RequestDescriptor::page(&FilterCriteria::default(), 1, 50))
        .await
        .unwrap_err();

    assert!(err.is_fetch_failure());
    assert!(matches!(err, TaproomError::HttpStatus { status, .. } if status.as_u16() == 500));
}

#[tokio::test]
async fn unexpected_shape_is_malformed_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/breweries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "rate limited" })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_page(&RequestDescriptor::page(&FilterCriteria::default(), 1, 50))
        .await
        .unwrap_err();

    assert!(matches!(err, TaproomError::MalformedResponse(_)));
}

#[tokio::test]
async fn session_over_http_survives_a_failed_load_more() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/breweries"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            brewery_json("a", "A", "micro", "Texas"),
            brewery_json("b", "B", "large", "Texas"),
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/breweries"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/breweries/meta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": 2 })))
        .mount(&server)
        .await;

    let config = Config::default()
        .with_api_base(format!("{}/v1", server.uri()))
        .and_then(|c| c.with_per_page(2))
        .expect("valid config");
    let api = BreweryApi::new(&config).expect("client");
    let mut session = DashboardSession::new(api, config.per_page);

    session.apply(FilterCriteria::default()).await.unwrap();
    assert_eq!(session.total(), 2);

    assert_eq!(session.load_next_page().await.unwrap(), PageLoad::Failed);
    assert!(matches!(session.status(), FetchStatus::Failed(_)));
    assert_eq!(session.records().len(), 2);
    assert_eq!(session.report().distinct_state_count(), 1);
}
