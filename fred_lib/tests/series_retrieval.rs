use chrono::NaiveDate;
use fred_lib::{revisions, Fred, FredConfig, FredError, ReleaseWindow};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../fred_api/tests/fixtures");
    std::fs::read_to_string(format!("{}/{}", dir, name)).unwrap()
}

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

fn fred(server: &MockServer) -> Fred {
    let config = FredConfig {
        api_key: Some("test-key".to_string()),
        base_url: Some(server.uri()),
        ..FredConfig::default()
    };
    Fred::new(&config).unwrap()
}

async fn mount_fixture(server: &MockServer, endpoint: &str, fixture: &str) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture(fixture)))
        .mount(server)
        .await;
}

/// Fails the test on drop if any request reaches the server.
async fn forbid_requests(server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn latest_series_with_date_bounds() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/series/observations"))
        .and(query_param("series_id", "SP500"))
        .and(query_param("observation_start", "2014-09-02"))
        .and(query_param("observation_end", "2014-09-05"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("sp500_obs.xml")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let series = fred(&mock_server)
        .get_series("SP500", Some("09/02/2014"), Some("2014-09-05"), &[])
        .await
        .unwrap();
    assert_eq!(series.len(), 4);
    assert_eq!(series[&date("2014-09-02")], Some(2002.28));
    assert_eq!(series[&date("2014-09-05")], Some(2007.71));
}

#[tokio::test]
async fn extra_params_pass_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/series/observations"))
        .and(query_param("units", "pch"))
        .and(query_param("frequency", "m"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("sp500_obs.xml")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let params = vec![
        ("units".to_string(), "pch".to_string()),
        ("frequency".to_string(), "m".to_string()),
    ];
    let series = fred(&mock_server)
        .get_series("SP500", None, None, &params)
        .await
        .unwrap();
    assert_eq!(series.len(), 4);
}

#[tokio::test]
async fn missing_values_are_not_zero() {
    let mock_server = MockServer::start().await;
    let body = r#"<?xml version="1.0" encoding="utf-8" ?>
<observations count="2" offset="0" limit="100000">
  <observation realtime_start="2015-06-28" realtime_end="2015-06-28" date="2014-09-01" value="."/>
  <observation realtime_start="2015-06-28" realtime_end="2015-06-28" date="2014-09-02" value="0"/>
</observations>"#;

    Mock::given(method("GET"))
        .and(path("/series/observations"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&mock_server)
        .await;

    let series = fred(&mock_server)
        .get_series_latest_release("SP500")
        .await
        .unwrap();
    assert_eq!(series[&date("2014-09-01")], None);
    assert_eq!(series[&date("2014-09-02")], Some(0.0));
}

#[tokio::test]
async fn non_numeric_value_is_malformed() {
    let mock_server = MockServer::start().await;
    let body = r#"<observations count="1">
  <observation realtime_start="2015-06-28" realtime_end="2015-06-28" date="2014-09-01" value="n/a"/>
</observations>"#;

    Mock::given(method("GET"))
        .and(path("/series/observations"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&mock_server)
        .await;

    let err = fred(&mock_server)
        .get_series_latest_release("SP500")
        .await
        .unwrap_err();
    assert!(matches!(err, FredError::MalformedResponse(_)));
}

#[tokio::test]
async fn no_observations_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/series/observations"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"<observations count="0"/>"#))
        .mount(&mock_server)
        .await;

    let err = fred(&mock_server)
        .get_series_latest_release("SP500")
        .await
        .unwrap_err();
    match err {
        FredError::NotFound(msg) => assert_eq!(msg, "No data exists for series id: SP500"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn first_release_reduces_full_history() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/series/observations"))
        .and(query_param("series_id", "GDP"))
        .and(query_param("realtime_start", "1776-07-04"))
        .and(query_param("realtime_end", "9999-12-31"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("gdp_releases.xml")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let series = fred(&mock_server)
        .get_series_first_release("GDP")
        .await
        .unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series[&date("2014-07-01")], Some(17535.4));
    assert_eq!(series[&date("2014-10-01")], Some(17710.7));
    assert_eq!(series[&date("2015-01-01")], Some(17710.0));
}

#[tokio::test]
async fn all_releases_keep_server_order() {
    let mock_server = MockServer::start().await;
    mount_fixture(&mock_server, "/series/observations", "gdp_releases.xml").await;

    let rows = fred(&mock_server)
        .get_series_all_releases("GDP")
        .await
        .unwrap();
    assert_eq!(rows.len(), 9);
    assert_eq!(rows[0].date, date("2014-07-01"));
    assert_eq!(rows[0].realtime_end, Some(date("2014-11-24")));
    assert_eq!(rows[2].realtime_end, None);
    assert_eq!(rows[8].value, Some(17693.3));
    assert_eq!(rows.iter().filter(|o| o.is_current()).count(), 3);
}

#[tokio::test]
async fn latest_matches_newest_revision_per_date() {
    let mock_server = MockServer::start().await;

    let current = r#"<observations count="3">
  <observation realtime_start="2015-07-20" realtime_end="2015-07-20" date="2014-07-01" value="17599.8"/>
  <observation realtime_start="2015-07-20" realtime_end="2015-07-20" date="2014-10-01" value="17703.7"/>
  <observation realtime_start="2015-07-20" realtime_end="2015-07-20" date="2015-01-01" value="17693.3"/>
</observations>"#;
    Mock::given(method("GET"))
        .and(path("/series/observations"))
        .and(query_param_is_missing("realtime_start"))
        .respond_with(ResponseTemplate::new(200).set_body_string(current))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/series/observations"))
        .and(query_param("realtime_start", "1776-07-04"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("gdp_releases.xml")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = fred(&mock_server);
    let latest = client.get_series_latest_release("GDP").await.unwrap();
    let history = client.get_series_all_releases("GDP").await.unwrap();
    assert_eq!(latest, revisions::latest_release(&history));
    assert_eq!(latest.len(), 3);
}

#[tokio::test]
async fn release_window_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/series/observations"))
        .and(query_param("observation_start", "2014-10-01"))
        .and(query_param("realtime_start", "2015-01-01"))
        .and(query_param("realtime_end", "9999-12-31"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("gdp_releases.xml")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let window = ReleaseWindow::from_strs(Some("2014-10-01"), None, Some("2015-01-01"), None)
        .unwrap();
    let rows = fred(&mock_server)
        .get_series_releases("GDP", &window)
        .await
        .unwrap();
    assert_eq!(rows.len(), 9);
}

#[tokio::test]
async fn as_of_date_filters_by_release() {
    let mock_server = MockServer::start().await;
    mount_fixture(&mock_server, "/series/observations", "gdp_releases.xml").await;

    let client = fred(&mock_server);
    let cutoff = date("2015-02-27");
    let rows = client
        .get_series_as_of_date("GDP", "2/27/2015")
        .await
        .unwrap();
    let all = client.get_series_all_releases("GDP").await.unwrap();

    assert!(rows.iter().all(|o| o.realtime_start <= cutoff));
    let expected: Vec<_> = all
        .into_iter()
        .filter(|o| o.realtime_start <= cutoff)
        .collect();
    assert_eq!(rows, expected);
    assert_eq!(rows.len(), 5);
}

#[tokio::test]
async fn series_info_decodes_metadata() {
    let mock_server = MockServer::start().await;
    mount_fixture(&mock_server, "/series", "sp500_info.xml").await;

    let info = fred(&mock_server).get_series_info("SP500").await.unwrap();
    assert_eq!(info.id, "SP500");
    assert_eq!(info.title, "S&P 500");
    assert_eq!(info.frequency_short, "D");
    assert_eq!(info.observation_start, date("2005-07-18"));
    assert_eq!(info.popularity, 82);
}

#[tokio::test]
async fn series_info_without_children_is_not_found() {
    let mock_server = MockServer::start().await;
    mount_fixture(&mock_server, "/series", "empty_seriess.xml").await;

    let err = fred(&mock_server)
        .get_series_info("invalid-id")
        .await
        .unwrap_err();
    match err {
        FredError::NotFound(msg) => assert!(msg.contains("invalid-id")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn upstream_message_is_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/series/observations"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string(load_fixture("series_not_found.xml")),
        )
        .mount(&mock_server)
        .await;

    let err = fred(&mock_server)
        .get_series("invalid", None, None, &[])
        .await
        .unwrap_err();
    match err {
        FredError::Upstream { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Bad Request. The series does not exist.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let config = FredConfig {
        api_key: Some("test-key".to_string()),
        base_url: Some("http://127.0.0.1:1".to_string()),
        ..FredConfig::default()
    };
    let err = Fred::new(&config)
        .unwrap()
        .get_series_latest_release("SP500")
        .await
        .unwrap_err();
    assert!(matches!(err, FredError::Transport(_)));
    assert!(!err.to_string().contains("test-key"));
}

#[test]
fn missing_credentials_fail_construction() {
    let config = FredConfig {
        api_key_env: Some("FRED_LIB_IT_UNSET_API_KEY".to_string()),
        ..FredConfig::default()
    };
    assert!(matches!(
        Fred::new(&config),
        Err(FredError::Configuration(_))
    ));
}

#[tokio::test]
async fn invalid_dates_send_nothing() {
    let mock_server = MockServer::start().await;
    forbid_requests(&mock_server).await;
    let client = fred(&mock_server);

    let err = client
        .get_series("SP500", Some("not-a-date"), None, &[])
        .await
        .unwrap_err();
    assert!(matches!(err, FredError::Validation(_)));

    let err = client
        .get_series("SP500", None, Some("2014-02-30"), &[])
        .await
        .unwrap_err();
    assert!(matches!(err, FredError::Validation(_)));

    let err = client
        .get_series_as_of_date("GDP", "sometime")
        .await
        .unwrap_err();
    assert!(matches!(err, FredError::Validation(_)));

    let err = client
        .get_series_table(&["SP500", ""], None, None, &[])
        .await
        .unwrap_err();
    assert!(matches!(err, FredError::Validation(_)));
}

#[tokio::test]
async fn vintage_dates_are_parsed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/series/vintagedates"))
        .and(query_param("series_id", "GNPCA"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("vintage_dates.xml")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dates = fred(&mock_server)
        .get_series_vintage_dates("GNPCA")
        .await
        .unwrap();
    assert_eq!(
        dates,
        vec![
            date("1958-12-21"),
            date("1959-02-19"),
            date("1959-07-19"),
            date("1960-02-16"),
        ]
    );
}

#[tokio::test]
async fn repeated_calls_agree() {
    let mock_server = MockServer::start().await;
    mount_fixture(&mock_server, "/series/observations", "gdp_releases.xml").await;
    let client = fred(&mock_server);

    assert_eq!(
        client.get_series_first_release("GDP").await.unwrap(),
        client.get_series_first_release("GDP").await.unwrap()
    );
    assert_eq!(
        client.get_series_as_of_date("GDP", "2015-05-01").await.unwrap(),
        client.get_series_as_of_date("GDP", "2015-05-01").await.unwrap()
    );
}

#[tokio::test]
async fn table_joins_series_on_date() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/series/observations"))
        .and(query_param("series_id", "SP500"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("sp500_obs.xml")))
        .expect(1)
        .mount(&mock_server)
        .await;
    let djia = r#"<observations count="2">
  <observation realtime_start="2015-06-28" realtime_end="2015-06-28" date="2014-09-05" value="17137.36"/>
  <observation realtime_start="2015-06-28" realtime_end="2015-06-28" date="2014-09-08" value="17111.42"/>
</observations>"#;
    Mock::given(method("GET"))
        .and(path("/series/observations"))
        .and(query_param("series_id", "DJIA"))
        .respond_with(ResponseTemplate::new(200).set_body_string(djia))
        .expect(1)
        .mount(&mock_server)
        .await;

    let table = fred(&mock_server)
        .get_series_table(&["SP500", "DJIA"], None, None, &[])
        .await
        .unwrap();
    assert_eq!(table.columns, vec!["SP500", "DJIA"]);
    assert_eq!(table.len(), 5);
    assert_eq!(table.get(date("2014-09-02"), "SP500"), Some(2002.28));
    assert_eq!(table.get(date("2014-09-02"), "DJIA"), None);
    assert_eq!(
        table.rows[&date("2014-09-05")],
        vec![Some(2007.71), Some(17137.36)]
    );
    assert_eq!(table.get(date("2014-09-08"), "SP500"), None);
}
