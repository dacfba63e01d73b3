//! HTTP surface: status codes, envelopes and the admin key guard.

mod common;

use axum::http::{Method, StatusCode};
use common::{TestApp, ADMIN_KEY};
use serde_json::{json, Value};

async fn create(app: &TestApp, uri: &str, body: Value) -> Value {
    let (status, json) = app.request(Method::POST, uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "POST {} -> {}", uri, json);
    assert_eq!(json["success"], true);
    json["data"].clone()
}

/// AcmeCo manufacturer with module X1; returns `(manufacturer_id, module_id)`.
async fn acme_x1(app: &TestApp) -> (i64, i64) {
    let company = create(app, "/api/v1/admin/companies", json!({"short_name": "AcmeCo"})).await;
    let id = company["id"].as_i64().unwrap();

    let manufacturer = create(
        app,
        &format!("/api/v1/admin/companies/{}/manufacturer", id),
        json!({"mfg_capacity_yr": "5", "mfg_country": ["cn"]}),
    )
    .await;
    assert_eq!(manufacturer["mfg_capacity_yr"], "5.000");
    assert_eq!(manufacturer["mfg_country"], json!(["CN"]));

    let module = create(
        app,
        "/api/v1/admin/pv-modules",
        json!({"manufacturer_id": id, "model_name": "X1", "p_max": "310", "cell_type": "Mono_Si"}),
    )
    .await;
    assert_eq!(module["label"], "AcmeCo X1");
    assert_eq!(module["p_max"], "310.00");

    (id, module["id"].as_i64().unwrap())
}

#[tokio::test]
async fn status_and_health_report_ok() {
    let app = TestApp::new().await;

    let (status, body) = app.request(Method::GET, "/api/v1/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
    assert!(body["meta"]["request_id"].is_string());

    let (status, body) = app.request(Method::GET, "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["checks"]["database"], "healthy");
}

#[tokio::test]
async fn module_detail_lists_datasheets_by_power() {
    let app = TestApp::new().await;
    let (_, module_id) = acme_x1(&app).await;

    for (year, p) in [(2019, "300.00"), (2021, "305")] {
        let sheet = create(
            &app,
            "/api/v1/admin/datasheets",
            json!({"pv_module_id": module_id, "year_published": year, "p_max_stc": p, "length": "1.7"}),
        )
        .await;
        assert_eq!(sheet["length"], "1.700");
    }

    let (status, body) = app
        .request(Method::GET, &format!("/api/v1/modules/{}", module_id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let sheets = body["data"]["datasheets"].as_array().unwrap();
    let listed: Vec<(&str, i64)> = sheets
        .iter()
        .map(|s| {
            (
                s["p_max_stc"].as_str().unwrap(),
                s["year_published"].as_i64().unwrap(),
            )
        })
        .collect();
    assert_eq!(listed, vec![("305.00", 2021), ("300.00", 2019)]);

    let sheet_id = sheets[0]["id"].as_i64().unwrap();
    let (status, body) = app
        .request(
            Method::GET,
            &format!("/api/v1/modules/{}/datasheets/{}", module_id, sheet_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["p_max_stc"], "305.00");

    let (status, body) = app
        .request(
            Method::GET,
            &format!("/api/v1/modules/{}/datasheets/{}", module_id + 1, sheet_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn module_index_and_manufacturer_detail() {
    let app = TestApp::new().await;
    let (manufacturer_id, _) = acme_x1(&app).await;
    create(
        &app,
        "/api/v1/admin/pv-modules",
        json!({"manufacturer_id": manufacturer_id, "model_name": "A0"}),
    )
    .await;

    let (status, body) = app.request(Method::GET, "/api/v1/modules", None).await;
    assert_eq!(status, StatusCode::OK);
    let labels: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["AcmeCo A0", "AcmeCo X1"]);

    let (_, body) = app.request(Method::GET, "/api/v1/modules?limit=1", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = app
        .request(
            Method::GET,
            &format!("/api/v1/manufacturers/{}", manufacturer_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["manufacturer"]["short_name"], "AcmeCo");
    assert_eq!(body["data"]["devices"].as_array().unwrap().len(), 2);

    let (status, _) = app.request(Method::GET, "/api/v1/manufacturers/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_short_name_is_bad_request() {
    let app = TestApp::new().await;
    create(&app, "/api/v1/admin/companies", json!({"short_name": "AcmeCo"})).await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/admin/companies",
            Some(json!({"short_name": "AcmeCo"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
    assert!(body["message"].as_str().unwrap().contains("short_name"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn invalid_cell_type_is_bad_request() {
    let app = TestApp::new().await;
    let (manufacturer_id, _) = acme_x1(&app).await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/admin/pv-modules",
            Some(json!({"manufacturer_id": manufacturer_id, "model_name": "Q", "cell_type": "Quantum"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("cell_type"));

    let (status, body) = app
        .request(
            Method::GET,
            "/api/v1/admin/pv-modules?cell_type=Mono_Si",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);
}

#[tokio::test]
async fn protected_delete_is_conflict() {
    let app = TestApp::new().await;
    let (manufacturer_id, module_id) = acme_x1(&app).await;

    let (status, body) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/admin/manufacturers/{}", manufacturer_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["message"],
        format!(
            "Cannot delete manufacturer {}: referenced by 1 pv module(s)",
            manufacturer_id
        )
    );

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/admin/pv-modules/{}", module_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/admin/manufacturers/{}", manufacturer_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .request(
            Method::GET,
            &format!("/api/v1/admin/companies/{}", manufacturer_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_lists_are_paginated() {
    let app = TestApp::new().await;
    for name in ["Gamma", "Alpha", "Beta"] {
        create(&app, "/api/v1/admin/companies", json!({"short_name": name})).await;
    }

    let (status, body) = app
        .request(Method::GET, "/api/v1/admin/companies?page=2&limit=2", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["total"], 3);
    assert_eq!(data["total_pages"], 2);
    assert_eq!(data["items"][0]["short_name"], "Gamma");
}

#[tokio::test]
async fn page_beyond_any_offset_is_bad_request() {
    let app = TestApp::new().await;
    create(&app, "/api/v1/admin/companies", json!({"short_name": "AcmeCo"})).await;

    for uri in [
        "/api/v1/admin/companies?page=18446744073709551615",
        "/api/v1/admin/pv-modules?page=18446744073709551615&limit=100",
    ] {
        let (status, body) = app.request(Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "GET {}", uri);
        assert_eq!(body["error"], "Bad Request");
        assert!(body["message"].as_str().unwrap().contains("out of range"));
    }

    let (status, body) = app
        .request(Method::GET, "/api/v1/admin/companies?page=9", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn admin_key_guards_admin_routes_only() {
    let app = TestApp::with_admin_key().await;

    let (status, body) = app
        .request(Method::GET, "/api/v1/admin/companies", None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, _) = app
        .request_with_headers(
            Method::GET,
            "/api/v1/admin/companies",
            None,
            &[("X-API-Key", "not-the-right-key-at-all")],
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .request_with_headers(
            Method::GET,
            "/api/v1/admin/companies",
            None,
            &[("X-API-Key", ADMIN_KEY)],
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.request(Method::GET, "/api/v1/modules", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn reference_choices_and_layouts() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request(Method::GET, "/api/v1/reference/choices", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let codes: Vec<&str> = body["data"]["cell_tech"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["code"].as_str().unwrap())
        .collect();
    assert!(codes.contains(&"TOPCon"));
    assert!(codes.contains(&"Unknown"));

    let (status, body) = app
        .request(Method::GET, "/api/v1/admin/layouts/datasheet", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["panels"][1]["title"],
        "Standard Testing Conditions (25C, 1kW/m^2)"
    );

    let (status, _) = app
        .request(Method::GET, "/api/v1/admin/layouts/widget", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn errors_echo_the_request_id() {
    let app = TestApp::new().await;
    let (status, body) = app
        .request_with_headers(
            Method::GET,
            "/api/v1/modules/12345",
            None,
            &[("x-request-id", "trace-me-42")],
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["request_id"], "trace-me-42");
    assert_eq!(body["message"], "Not found: PV module 12345 not found");
}
