//! Resource methods: URLs, page sizes, ordering and post-processing

mod common;

use std::pin::pin;

use combocurve_api::{ApiError, EconModelType};
use futures::TryStreamExt;
use serde_json::json;
use wiremock::matchers::{body_string, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::client_for;

#[tokio::test]
async fn test_projects_are_sorted_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("take", "200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "3", "name": "Charlie", "createdAt": "2021-01-01", "updatedAt": "2021-01-02"},
            {"id": "1", "name": "Alpha", "createdAt": "2021-01-01", "updatedAt": "2021-03-01"},
            {"id": "2", "name": "Alpha", "createdAt": "2021-01-01", "updatedAt": "2021-02-01"}
        ])))
        .mount(&server)
        .await;
    let (client, _) = client_for(&server);

    let projects = client.get_projects(None).await.unwrap();

    let ids: Vec<&str> = projects.iter().map(|p| p["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["2", "1", "3"]);
}

#[tokio::test]
async fn test_listing_without_sort_field_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/p1/scenarios"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "s1", "name": "Base", "createdAt": "2021-01-01"}
        ])))
        .mount(&server)
        .await;
    let (client, _) = client_for(&server);

    let err = client.get_scenarios("p1", None).await.unwrap_err();
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::MissingSortKey { field, available }) => {
            assert_eq!(field, "updatedAt");
            assert!(available.contains(&"name".to_string()));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_wells_use_well_page_size_and_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wells"))
        .and(query_param("take", "1000"))
        .and(query_param("county", "Reeves"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "w2", "wellName": "B 1H", "createdAt": "x", "updatedAt": "x"},
            {"id": "w1", "wellName": "A 1H", "createdAt": "x", "updatedAt": "x"}
        ])))
        .mount(&server)
        .await;
    let (client, _) = client_for(&server);

    let filters = combocurve_api::Filters::new().with("county", "Reeves");
    let wells = client.get_company_wells(Some(&filters)).await.unwrap();

    assert_eq!(wells[0]["id"], json!("w1"));
    assert_eq!(wells[1]["id"], json!("w2"));
}

#[tokio::test]
async fn test_econ_models_by_type_route() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/p1/econ-models/date-settings/m1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "m1", "econModelType": "dates"})))
        .mount(&server)
        .await;
    let (client, _) = client_for(&server);

    let model_type: EconModelType = "dates".parse().unwrap();
    let model = client.get_econ_model_by_id("p1", model_type, "m1").await.unwrap();

    assert_eq!(model["id"], json!("m1"));
}

#[tokio::test]
async fn test_econ_runs_get_combo_names_and_newest_first() {
    let server = MockServer::start().await;
    let runs_path = "/projects/p1/scenarios/s1/econ-runs";

    Mock::given(method("GET"))
        .and(path(runs_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "r1", "status": "complete", "runDate": "2023-05-01"},
            {"id": "r2", "status": "complete", "runDate": "2024-05-01"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/r1/combo-names", runs_path)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["zeta", "alpha", "zeta"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/r2/combo-names", runs_path)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let (client, _) = client_for(&server);

    let runs = client.get_econ_runs("p1", "s1", true).await.unwrap();

    assert_eq!(runs[0]["id"], json!("r2"));
    assert_eq!(runs[0]["comboNames"], json!([]));
    assert_eq!(runs[1]["comboNames"], json!(["alpha", "zeta"]));
}

#[tokio::test]
async fn test_one_liners_are_flattened() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/p1/scenarios/s1/econ-runs/r1/one-liners"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"well": "w1", "output": {"npv": 100.5}},
            {"well": "w2", "output": null},
            {"well": "w3"}
        ])))
        .mount(&server)
        .await;
    let (client, _) = client_for(&server);

    let rows = client.get_econ_run_one_liners("p1", "s1", "r1").await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["npv"], json!(100.5));
    assert_eq!(rows[1], common::record(json!({"well": "w2"})));
}

#[tokio::test]
async fn test_monthly_export_trigger_and_stream() {
    let server = MockServer::start().await;
    let exports_path = "/projects/p1/scenarios/s1/econ-runs/r1/monthly-exports";

    Mock::given(method("POST"))
        .and(path(exports_path))
        .and(body_string(""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "e1"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/e1", exports_path)))
        .and(query_param("take", "100"))
        .and(query_param("concurrency", "10"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "link",
                    common::next_link(&format!("{}{}/e1?skip=100", server.uri(), exports_path)).as_str(),
                )
                .set_body_json(json!({"results": [{"well": "w1", "output": {"oil": 1}}]})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/e1", exports_path)))
        .and(query_param("skip", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [{"well": "w2", "output": {"oil": 2}}]})))
        .mount(&server)
        .await;
    let (client, _) = client_for(&server);

    let export_id = client.post_econ_run_monthly_export("p1", "s1", "r1").await.unwrap();
    assert_eq!(export_id, "e1");

    // the stream only borrows the client, so the id may be a temporary
    let batches = client.stream_econ_run_monthly_export("p1", "s1", "r1", &export_id.to_string());
    let batches: Vec<_> = pin!(batches).try_collect().await.unwrap();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[1][0]["oil"], json!(2));

    let rows = client
        .get_econ_run_monthly_export("p1", "s1", "r1", &export_id)
        .await
        .unwrap();
    let wells: Vec<&str> = rows.iter().map(|r| r["well"].as_str().unwrap()).collect();
    assert_eq!(wells, vec!["w1", "w2"]);

    let requests = server.received_requests().await.unwrap();
    let first_pages: Vec<_> = requests
        .iter()
        .filter(|r| r.method.as_str() == "GET" && r.url.query_pairs().all(|(k, _)| k != "skip"))
        .collect();
    assert_eq!(first_pages.len(), 2);
    for request in first_pages {
        assert_eq!(request.url.query(), Some("take=100&concurrency=10"));
    }
}

#[tokio::test]
async fn test_forecast_wells_are_posted_as_id_batches() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/projects/p1/forecasts/f1/wells"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"successCount": 1})))
        .mount(&server)
        .await;
    let (client, _) = client_for(&server);

    let ids: Vec<String> = (0..5).map(|i| format!("w{}", i)).collect();
    let acks = client.post_forecast_wells("p1", "f1", &ids, 2).await.unwrap();

    assert_eq!(acks.len(), 3);
    let requests = server.received_requests().await.unwrap();
    let last: serde_json::Value = serde_json::from_slice(&requests[2].body).unwrap();
    assert_eq!(last, json!({"wellIds": ["w4"]}));
}
