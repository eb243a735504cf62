//! End-to-end search flows against a mock OpenWeather server.

use std::sync::Arc;

use cityweather_core::{
    Config, DisplayConfig, ErrorKind, FileStore, Key, KeyOutcome, KeyValueStore, MemoryStore,
    SearchError, SearchState, WeatherApp, format::FREEZING_ADVICE, storage::LAST_SEARCHED_CITY_KEY,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn weather_body(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "main": {"temp": -3.4, "feels_like": -8.0, "humidity": 70, "pressure": 1020,
                 "temp_min": -5.0, "temp_max": -1.0},
        "weather": [{"main": "Snow", "description": "light snow", "icon": "13d"}],
        "wind": {"speed": 11.5, "deg": 90},
        "visibility": 2500,
        "sys": {"country": "CA", "sunrise": 1704112200, "sunset": 1704143400},
        "timezone": -18000
    })
}

fn weather_response(name: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(weather_body(name))
}

fn config_for(server: &MockServer, api_key: Option<&str>) -> Config {
    let mut cfg = Config::default();
    cfg.api.base_url = server.uri();
    cfg.api.api_key = api_key.map(str::to_owned);
    cfg
}

fn build_app(server: &MockServer, store: Arc<dyn KeyValueStore>) -> WeatherApp {
    WeatherApp::from_config(&config_for(server, Some("TEST_KEY")), store).expect("app builds")
}

#[tokio::test]
async fn selected_suggestion_is_searched_and_remembered() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Toronto"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(weather_response("Toronto"))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    let mut app = build_app(&server, Arc::new(store.clone()));

    app.focus();
    app.type_text("tor");
    assert_eq!(app.press_key(Key::Down).await, KeyOutcome::Handled);
    let outcome = app.press_key(Key::Enter).await;

    assert_eq!(outcome, KeyOutcome::Selected("Toronto".to_string()));
    assert_eq!(app.search_bar().text(), "Toronto");
    assert!(!app.search_bar().is_open());

    let card = app.card().expect("card is shown");
    assert_eq!(card.title, "Toronto");
    assert_eq!(card.temperature, "-3°C");
    assert_eq!(card.wind_compass, Some("E"));
    assert_eq!(card.details.visibility.as_deref(), Some("2.5 km"));
    assert!(card.advice.contains(&FREEZING_ADVICE));
    assert!(card.advice.contains(&cityweather_core::format::SNOW_ADVICE));
    assert!(card.advice.contains(&cityweather_core::format::WIND_ADVICE));

    assert_eq!(
        store.get(LAST_SEARCHED_CITY_KEY).unwrap().as_deref(),
        Some("Toronto")
    );
    assert_eq!(app.status_message(), None);
}

#[tokio::test]
async fn free_text_submission_persists_the_submitted_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "montreal"))
        .respond_with(weather_response("Montréal"))
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    let mut app = build_app(&server, Arc::new(store.clone()));

    app.type_text("  montreal ");
    // Nothing highlighted, so Enter falls through to form submission.
    assert_eq!(app.press_key(Key::Enter).await, KeyOutcome::Ignored);

    assert_eq!(app.card().map(|c| c.title), Some("Montréal".to_string()));
    assert_eq!(
        store.get(LAST_SEARCHED_CITY_KEY).unwrap().as_deref(),
        Some("montreal")
    );
    assert_eq!(app.last_city(), Some("montreal"));
}

#[tokio::test]
async fn not_found_shows_message_and_no_card() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Paris"))
        .respond_with(weather_response("Paris"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Pariss"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"cod": "404", "message": "city not found"})),
        )
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    let mut app = build_app(&server, Arc::new(store.clone()));

    app.type_text("Paris");
    assert!(app.submit().await);
    app.type_text("Pariss");
    assert!(app.submit().await);

    assert_eq!(app.state(), SearchState::Failed(&SearchError::CityNotFound));
    assert!(app.card().is_none());
    assert_eq!(
        app.status_message().as_deref(),
        Some("City not found. Please check the spelling and try again.")
    );
    assert_eq!(
        store.get(LAST_SEARCHED_CITY_KEY).unwrap().as_deref(),
        Some("Paris")
    );
}

#[tokio::test]
async fn server_error_is_a_service_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut app = build_app(&server, Arc::new(MemoryStore::new()));
    app.type_text("Lima");
    app.submit().await;

    match app.state() {
        SearchState::Failed(err) => {
            assert_eq!(err.kind(), ErrorKind::Service);
            assert_eq!(
                err.to_string(),
                "Failed to fetch weather data. Please try again later."
            );
        }
        other => panic!("unexpected state {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_surfaces_parser_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let mut app = build_app(&server, Arc::new(MemoryStore::new()));
    app.type_text("Lima");
    app.submit().await;

    let message = app.status_message().expect("error shown");
    assert!(
        message.contains("expected value"),
        "unexpected message: {message}"
    );
}

#[tokio::test]
async fn transport_failure_is_a_service_failure() {
    let mut cfg = Config::default();
    cfg.api.base_url = "http://127.0.0.1:1".to_string();
    cfg.api.api_key = Some("SECRET_KEY_123".to_string());

    let mut app = WeatherApp::from_config(&cfg, Arc::new(MemoryStore::new())).unwrap();
    app.type_text("Lima");
    app.submit().await;

    match app.state() {
        SearchState::Failed(err) => assert_eq!(err.kind(), ErrorKind::Service),
        other => panic!("unexpected state {other:?}"),
    }
    let message = app.status_message().expect("error shown");
    assert!(!message.is_empty());
    assert!(!message.contains("SECRET_KEY_123"), "key leaked: {message}");
    assert!(!message.contains("appid="), "query leaked: {message}");
}

#[tokio::test]
async fn missing_key_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(weather_response("Paris"))
        .expect(0)
        .mount(&server)
        .await;

    let cfg = config_for(&server, None);
    let mut app = WeatherApp::from_config(&cfg, Arc::new(MemoryStore::new())).unwrap();
    app.type_text("Paris");
    app.submit().await;

    assert_eq!(
        app.state(),
        SearchState::Failed(&SearchError::Configuration)
    );
}

#[tokio::test]
async fn identical_searches_hit_the_network_each_time() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(weather_response("Paris"))
        .expect(2)
        .mount(&server)
        .await;

    let mut app = build_app(&server, Arc::new(MemoryStore::new()));
    app.type_text("Paris");
    app.submit().await;
    app.submit().await;
}

#[tokio::test]
async fn blank_text_cannot_be_submitted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(weather_response("Paris"))
        .expect(0)
        .mount(&server)
        .await;

    let mut app = build_app(&server, Arc::new(MemoryStore::new()));
    app.type_text("   ");

    assert!(!app.can_submit());
    assert!(!app.submit().await);
    assert_eq!(
        app.status_message().as_deref(),
        Some("Search for a city to get started")
    );
}

#[tokio::test]
async fn pointer_choice_searches_canonical_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Buenos Aires"))
        .respond_with(weather_response("Buenos Aires"))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = build_app(&server, Arc::new(MemoryStore::new()));
    app.focus();
    app.type_text("argentina");
    app.pointer_enter();
    app.blur();
    assert!(app.search_bar().is_open());

    assert!(app.choose(0).await);
    assert_eq!(app.search_bar().text(), "Buenos Aires");
}

#[tokio::test]
async fn last_city_survives_restart_and_prefills_search_bar() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(weather_response("Seoul"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");

    {
        let mut app = build_app(&server, Arc::new(FileStore::new(&state)));
        app.type_text("Seoul");
        app.submit().await;
    }

    let mut restarted = build_app(&server, Arc::new(FileStore::new(&state)));
    assert_eq!(restarted.last_city(), Some("Seoul"));
    assert_eq!(restarted.search_bar().text(), "Seoul");
    assert!(restarted.search_bar().suggestions().is_empty());
    assert_eq!(restarted.state(), SearchState::Idle);

    restarted.forget_last_city();
    let again = build_app(&server, Arc::new(FileStore::new(&state)));
    assert_eq!(again.last_city(), None);
}

#[tokio::test]
async fn dismissing_the_card_returns_to_empty_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(weather_response("Rome"))
        .mount(&server)
        .await;

    let mut app = build_app(&server, Arc::new(MemoryStore::new()));
    app.type_text("Rome");
    app.submit().await;
    assert!(app.card().is_some());

    app.dismiss_card();

    assert!(app.card().is_none());
    assert_eq!(
        app.status_message().as_deref(),
        Some("Search for a city to get started")
    );
}

#[tokio::test]
async fn display_settings_flow_into_the_card() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(weather_response("Toronto"))
        .mount(&server)
        .await;

    let mut cfg = config_for(&server, Some("TEST_KEY"));
    cfg.display = DisplayConfig {
        clock: cityweather_core::format::ClockFormat::TwentyFourHour,
        temperature_unit: cityweather_core::TemperatureUnit::Fahrenheit,
    };
    let mut app = WeatherApp::from_config(&cfg, Arc::new(MemoryStore::new())).unwrap();
    app.type_text("Toronto");
    app.submit().await;

    let card = app.card().unwrap();
    assert_eq!(card.temperature, "26°F");
    // 12:30 UTC at UTC-5
    assert_eq!(card.details.sunrise.as_deref(), Some("07:30"));
}
