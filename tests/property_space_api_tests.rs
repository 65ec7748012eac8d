use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use property_registry::{
    Server,
    database::{DatabaseManager as _, entities::UnitType},
    test_utils::{
        TEST_AUTH_TOKEN, TestServerBuilder, create_test_meter, create_test_property_space,
        create_test_unit, utc_date,
    },
};
use serde_json::{Value, json};
use tower::ServiceExt;

// Test setup helpers
struct TestSetup {
    server: Server,
}

impl TestSetup {
    async fn new() -> Self {
        let server = TestServerBuilder::new().build().await;
        Self { server }
    }

    fn app(&self) -> Router {
        self.server.create_app()
    }

    async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .uri(uri)
            .method(method)
            .header("Authorization", format!("Bearer {}", TEST_AUTH_TOKEN));

        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None).await
    }

    /// Three property spaces mirroring the demo dataset: totals 6000,
    /// 7000 and 8000 kWh spread over 2021-2024.
    async fn seed_fixture(&self) {
        let db = &self.server.database;

        let space_1 = create_test_property_space(db, "property space 1", "123 Main St").await;
        let unit_1a = create_test_unit(db, space_1, "Unit 1A", UnitType::Leased, 500.0).await;
        let unit_1b = create_test_unit(db, space_1, "Unit 1B", UnitType::Vacant, 300.0).await;
        create_test_meter(
            db,
            "MTR-1001",
            1000.0,
            utc_date(2021, 2, 1),
            utc_date(2021, 12, 20),
            &[unit_1a, unit_1b],
        )
        .await;
        create_test_meter(
            db,
            "MTR-1002",
            5000.0,
            utc_date(2022, 1, 10),
            utc_date(2022, 12, 31),
            &[unit_1a],
        )
        .await;

        let space_2 = create_test_property_space(db, "property space 2", "456 Main St").await;
        let unit_2a = create_test_unit(db, space_2, "Unit 2A", UnitType::Leased, 450.0).await;
        let unit_2b = create_test_unit(db, space_2, "Unit 2B", UnitType::CommonArea, 150.0).await;
        create_test_meter(
            db,
            "MTR-2001",
            3000.0,
            utc_date(2022, 3, 1),
            utc_date(2022, 11, 30),
            &[unit_2a],
        )
        .await;
        create_test_meter(
            db,
            "MTR-2002",
            4000.0,
            utc_date(2023, 1, 5),
            utc_date(2023, 12, 28),
            &[unit_2a, unit_2b],
        )
        .await;

        let space_3 = create_test_property_space(db, "property space 3", "789 Main St").await;
        let unit_3a = create_test_unit(db, space_3, "Unit 3A", UnitType::Leased, 900.0).await;
        create_test_meter(
            db,
            "MTR-3001",
            3000.0,
            utc_date(2022, 5, 1),
            utc_date(2022, 9, 30),
            &[unit_3a],
        )
        .await;
        create_test_meter(
            db,
            "MTR-3002",
            5000.0,
            utc_date(2024, 1, 15),
            utc_date(2024, 6, 30),
            &[unit_3a],
        )
        .await;
    }
}

#[tokio::test]
async fn test_get_property_space_detail() {
    let setup = TestSetup::new().await;
    setup.seed_fixture().await;

    let (status, body) = setup.get("/api/v1/property-spaces/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "property space 1");
    assert_eq!(body["address"]["street"], "123 Main St");
    assert_eq!(body["number_of_units"], 2);
    assert_eq!(body["total_area"].as_f64().unwrap(), 800.0);
    assert_eq!(body["total_consumption"].as_f64().unwrap(), 6000.0);
    assert_eq!(body["consumption_unit"], "kWh");
}

#[tokio::test]
async fn test_get_property_space_detail_with_year_2020() {
    let setup = TestSetup::new().await;
    setup.seed_fixture().await;

    let (status, body) = setup.get("/api/v1/property-spaces/1?year=2020").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_consumption"].as_f64().unwrap(), 0.0);
}

#[tokio::test]
async fn test_get_property_space_detail_with_year_2021() {
    let setup = TestSetup::new().await;
    setup.seed_fixture().await;

    let (status, body) = setup.get("/api/v1/property-spaces/1?year=2021").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_consumption"].as_f64().unwrap(), 1000.0);
}

#[tokio::test]
async fn test_get_property_space_detail_with_year_2022() {
    let setup = TestSetup::new().await;
    setup.seed_fixture().await;

    let (status, body) = setup.get("/api/v1/property-spaces/1?year=2022").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_consumption"].as_f64().unwrap(), 5000.0);
}

#[tokio::test]
async fn test_get_all_property_spaces() {
    let setup = TestSetup::new().await;
    setup.seed_fixture().await;

    let (status, body) = setup.get("/api/v1/property-spaces").await;
    assert_eq!(status, StatusCode::OK);

    let spaces = body.as_array().unwrap();
    assert_eq!(spaces.len(), 3);
    assert_eq!(spaces[0]["name"], "property space 1");
    assert_eq!(spaces[0]["address"]["street"], "123 Main St");
    assert_eq!(spaces[0]["total_consumption"].as_f64().unwrap(), 6000.0);
    assert_eq!(spaces[1]["name"], "property space 2");
    assert_eq!(spaces[1]["address"]["street"], "456 Main St");
    assert_eq!(spaces[1]["total_consumption"].as_f64().unwrap(), 7000.0);
    assert_eq!(spaces[2]["name"], "property space 3");
    assert_eq!(spaces[2]["address"]["street"], "789 Main St");
    assert_eq!(spaces[2]["total_consumption"].as_f64().unwrap(), 8000.0);
}

#[tokio::test]
async fn test_get_all_property_spaces_year_matrix() {
    let setup = TestSetup::new().await;
    setup.seed_fixture().await;

    let expectations: [(i32, [f64; 3]); 5] = [
        (2020, [0.0, 0.0, 0.0]),
        (2021, [1000.0, 0.0, 0.0]),
        (2022, [5000.0, 3000.0, 3000.0]),
        (2023, [0.0, 4000.0, 0.0]),
        (2024, [0.0, 0.0, 5000.0]),
    ];

    for (year, expected) in expectations {
        let (status, body) = setup
            .get(&format!("/api/v1/property-spaces?year={}", year))
            .await;
        assert_eq!(status, StatusCode::OK);

        let spaces = body.as_array().unwrap();
        assert_eq!(spaces.len(), 3);
        for (space, expected_total) in spaces.iter().zip(expected) {
            assert_eq!(
                space["total_consumption"].as_f64().unwrap(),
                expected_total,
                "year {} mismatch",
                year
            );
        }
    }
}

#[tokio::test]
async fn test_total_area_unaffected_by_year_filter() {
    let setup = TestSetup::new().await;
    setup.seed_fixture().await;

    let (_, unfiltered) = setup.get("/api/v1/property-spaces/1").await;
    let (_, filtered) = setup.get("/api/v1/property-spaces/1?year=2020").await;

    assert_eq!(unfiltered["total_area"], filtered["total_area"]);
    assert_eq!(unfiltered["number_of_units"], filtered["number_of_units"]);
}

#[tokio::test]
async fn test_post_property_space() {
    let setup = TestSetup::new().await;

    let (status, body) = setup
        .request(
            "POST",
            "/api/v1/property-spaces",
            Some(json!({
                "name": "New Space",
                "address": {
                    "street": "246 Main St",
                    "city": "San Francisco",
                    "state": "CA",
                    "country": "USA",
                    "postal_code": "94105"
                }
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let id = body["property_space_id"].as_i64().unwrap() as i32;
    assert!(id > 0);

    let space = setup
        .server
        .database
        .property_spaces()
        .find_by_id(id)
        .await
        .unwrap();
    assert_eq!(space.unwrap().name, "New Space");
}

#[tokio::test]
async fn test_post_property_space_rejects_short_name() {
    let setup = TestSetup::new().await;

    let (status, body) = setup
        .request(
            "POST",
            "/api/v1/property-spaces",
            Some(json!({
                "name": "X",
                "address": {
                    "street": "246 Main St",
                    "city": "San Francisco",
                    "state": "CA",
                    "country": "USA",
                    "postal_code": "94105"
                }
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn test_post_property_space_rejects_long_address_field() {
    let setup = TestSetup::new().await;

    let (status, _) = setup
        .request(
            "POST",
            "/api/v1/property-spaces",
            Some(json!({
                "name": "New Space",
                "address": {
                    "street": "s".repeat(65),
                    "city": "San Francisco",
                    "state": "CA",
                    "country": "USA",
                    "postal_code": "94105"
                }
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_property_space_name_only_leaves_address() {
    let setup = TestSetup::new().await;
    setup.seed_fixture().await;

    let (status, body) = setup
        .request(
            "PUT",
            "/api/v1/property-spaces/1",
            Some(json!({"name": "Updated Space"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, space) = setup.get("/api/v1/property-spaces/1").await;
    assert_eq!(space["name"], "Updated Space");
    assert_eq!(space["address"]["street"], "123 Main St");
    assert_eq!(space["address"]["city"], "San Francisco");
}

#[tokio::test]
async fn test_put_property_space_partial_address() {
    let setup = TestSetup::new().await;
    setup.seed_fixture().await;

    let (status, _) = setup
        .request(
            "PUT",
            "/api/v1/property-spaces/1",
            Some(json!({"address": {"city": "Oakland"}})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, space) = setup.get("/api/v1/property-spaces/1").await;
    assert_eq!(space["name"], "property space 1");
    assert_eq!(space["address"]["city"], "Oakland");
    assert_eq!(space["address"]["street"], "123 Main St");
}

#[tokio::test]
async fn test_put_property_space_rejects_invalid_field() {
    let setup = TestSetup::new().await;
    setup.seed_fixture().await;

    let (status, _) = setup
        .request(
            "PUT",
            "/api/v1/property-spaces/1",
            Some(json!({"address": {"city": "O"}})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing changed
    let (_, space) = setup.get("/api/v1/property-spaces/1").await;
    assert_eq!(space["address"]["city"], "San Francisco");
}

#[tokio::test]
async fn test_put_missing_property_space_returns_404() {
    let setup = TestSetup::new().await;

    let (status, _) = setup
        .request(
            "PUT",
            "/api/v1/property-spaces/999",
            Some(json!({"name": "Updated Space"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_property_space_cascades() {
    let setup = TestSetup::new().await;
    setup.seed_fixture().await;

    let (status, body) = setup.request("DELETE", "/api/v1/property-spaces/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = setup.get("/api/v1/property-spaces/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Units went away with the property space
    let units = setup
        .server
        .database
        .unit_spaces()
        .find_by_property_space(1)
        .await
        .unwrap();
    assert!(units.is_empty());

    // The other spaces are untouched
    let (status, body) = setup.get("/api/v1/property-spaces").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_missing_property_space_returns_404() {
    let setup = TestSetup::new().await;

    let (status, _) = setup
        .request("DELETE", "/api/v1/property-spaces/999", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_missing_property_space_returns_404() {
    let setup = TestSetup::new().await;

    let (status, body) = setup.get("/api/v1/property-spaces/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn test_invalid_year_rejected() {
    let setup = TestSetup::new().await;
    setup.seed_fixture().await;

    let (status, _) = setup.get("/api/v1/property-spaces?year=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = setup.get("/api/v1/property-spaces/1?year=10000").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_requests_without_token_rejected() {
    let setup = TestSetup::new().await;

    let request = Request::builder()
        .uri("/api/v1/property-spaces")
        .body(Body::empty())
        .unwrap();
    let response = setup.app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_requests_with_wrong_token_rejected() {
    let setup = TestSetup::new().await;

    let request = Request::builder()
        .uri("/api/v1/property-spaces")
        .header("Authorization", "Bearer wrong-token")
        .body(Body::empty())
        .unwrap();
    let response = setup.app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_service_unavailable_simulation() {
    let setup = TestSetup::new().await;

    let (status, body) = setup.get("/api/v1/service-unavailable-exception").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body["message"],
        "We are simulating a service unavailable exception. Please retry later"
    );
}
