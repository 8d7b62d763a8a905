//! Integration tests for the aggregation core using wiremock.
//!
//! These exercise the full path: request encoding per provider,
//! guarded transport call, response normalization and averaging.

use avgtemp_core::{AverageService, Config, Coordinate, Error, ProviderRegistry, ServiceId};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn noaa_body() -> serde_json::Value {
    serde_json::json!({"today": {"current": {"fahrenheit": "55"}}})
}

fn accuweather_body() -> serde_json::Value {
    serde_json::json!({"simpleforecast": {"forecastday": [{"current": {"fahrenheit": "55"}}]}})
}

fn weatherdotcom_body(temp: &str, unit: &str) -> serde_json::Value {
    serde_json::json!({
        "query": {"results": {"channel": {
            "condition": {"temp": temp},
            "units": {"temperature": unit},
        }}}
    })
}

/// Registry whose three endpoints all point at the given mock server.
fn service_for(server: &MockServer) -> AverageService {
    let mut cfg = Config::default();
    cfg.set_service_url(ServiceId::Noaa, format!("{}/noaa", server.uri()));
    cfg.set_service_url(ServiceId::WeatherDotCom, format!("{}/weatherdotcom", server.uri()));
    cfg.set_service_url(ServiceId::AccuWeather, format!("{}/accuweather", server.uri()));

    AverageService::new(ProviderRegistry::from_config(&cfg))
}

fn all_names() -> Vec<String> {
    vec![
        "ACCUWEATHER".to_string(),
        "NOAA".to_string(),
        "WEATHER_DOT_COM".to_string(),
    ]
}

#[tokio::test]
async fn averages_across_all_three_providers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/noaa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(noaa_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accuweather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(accuweather_body()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/weatherdotcom"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weatherdotcom_body("37", "F")))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let avg = service.average_temp(&all_names(), Coordinate::new(33.0, 44.0)).await.unwrap();

    // (55 + 55 + 37) / 3, truncating.
    assert_eq!(avg, 49);
}

#[tokio::test]
async fn noaa_request_uses_a_combined_latlon_parameter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/noaa"))
        .and(query_param("latlon", "33.3,44.4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(noaa_body()))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let avg = service
        .average_temp(&["NOAA".to_string()], Coordinate::new(33.3, 44.4))
        .await
        .unwrap();

    assert_eq!(avg, 55);
}

#[tokio::test]
async fn accuweather_request_truncates_coordinates_to_integers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accuweather"))
        .and(query_param("latitude", "33"))
        .and(query_param("longitude", "44"))
        .respond_with(ResponseTemplate::new(200).set_body_json(accuweather_body()))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let avg = service
        .average_temp(&["ACCUWEATHER".to_string()], Coordinate::new(33.7, 44.9))
        .await
        .unwrap();

    assert_eq!(avg, 55);
}

#[tokio::test]
async fn weatherdotcom_posts_the_coordinate_as_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/weatherdotcom"))
        .and(body_json(serde_json::json!({"lat": 33.3, "lon": 44.4})))
        .respond_with(ResponseTemplate::new(200).set_body_json(weatherdotcom_body("5", "C")))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let avg = service
        .average_temp(&["WEATHER_DOT_COM".to_string()], Coordinate::new(33.3, 44.4))
        .await
        .unwrap();

    assert_eq!(avg, 41);
}

#[tokio::test]
async fn non_success_status_aborts_the_whole_aggregation() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/noaa"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accuweather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(accuweather_body()))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let err = service
        .average_temp(
            &["ACCUWEATHER".to_string(), "NOAA".to_string()],
            Coordinate::new(33.0, 44.0),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ExternalService { service: ServiceId::Noaa, .. }));
}

#[tokio::test]
async fn unknown_service_issues_no_network_calls() {
    let server = MockServer::start().await;

    // Any request at all would be a failure here.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(noaa_body()))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weatherdotcom_body("37", "F")))
        .expect(0)
        .mount(&server)
        .await;

    let service = service_for(&server);

    let err = service
        .average_temp(&["BOGUS".to_string()], Coordinate::new(33.0, 44.0))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnknownService { ref name } if name == "BOGUS"));

    // Valid names before the bad one must not be queried either.
    let err = service
        .average_temp(
            &["NOAA".to_string(), "BOGUS".to_string()],
            Coordinate::new(33.0, 44.0),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnknownService { ref name } if name == "BOGUS"));
}

#[tokio::test]
async fn malformed_payload_fails_with_the_offending_service() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/noaa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let err = service
        .average_temp(&["NOAA".to_string()], Coordinate::new(33.0, 44.0))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MalformedResponse { service: ServiceId::Noaa, .. }));
}

#[tokio::test]
async fn identical_requests_yield_identical_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/noaa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(noaa_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accuweather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(accuweather_body()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/weatherdotcom"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weatherdotcom_body("37", "F")))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let coordinate = Coordinate::new(33.0, 44.0);

    let first = service.average_temp(&all_names(), coordinate).await.unwrap();
    let second = service.average_temp(&all_names(), coordinate).await.unwrap();

    assert_eq!(first, second);
}
