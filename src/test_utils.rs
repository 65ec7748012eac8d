use crate::{
    config::Config,
    database::{
        DatabaseManager, NewAddress, NewMeterReading,
        entities::{MeasurementUnit, UnitType},
    },
    server::Server,
};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

/// Bearer token the test server accepts by default
pub const TEST_AUTH_TOKEN: &str = "test-token";

/// Test server builder for creating test instances on an in-memory
/// database
pub struct TestServerBuilder {
    config: Config,
}

impl TestServerBuilder {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.database.url = "sqlite::memory:".to_string();
        // A pooled in-memory SQLite gives every connection its own
        // database; a single connection keeps the schema visible.
        config.database.max_connections = 1;
        config.auth.token = TEST_AUTH_TOKEN.to_string();
        config.logging.log_request = false;

        Self { config }
    }

    /// Set a custom bearer token for testing
    pub fn with_auth_token(mut self, token: &str) -> Self {
        self.config.auth.token = token.to_string();
        self
    }

    /// Set a custom configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Build the test server with migrations applied
    pub async fn build(self) -> Server {
        let server = Server::new(self.config).await.unwrap();
        server.database.migrate().await.unwrap();
        server
    }
}

impl Default for TestServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Midnight UTC helper for fixture dates
pub fn utc_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// Create a property space with a fixture address
pub async fn create_test_property_space(
    database: &Arc<dyn DatabaseManager>,
    name: &str,
    street: &str,
) -> i32 {
    database
        .property_spaces()
        .create(
            name,
            NewAddress {
                street: street.to_string(),
                city: "San Francisco".to_string(),
                state: "CA".to_string(),
                country: "USA".to_string(),
                postal_code: "94105".to_string(),
            },
        )
        .await
        .unwrap()
}

/// Create a unit space under a property space
pub async fn create_test_unit(
    database: &Arc<dyn DatabaseManager>,
    property_space_id: i32,
    name: &str,
    unit_type: UnitType,
    area: f64,
) -> i32 {
    database
        .unit_spaces()
        .create(property_space_id, name, unit_type, area)
        .await
        .unwrap()
}

/// Record a kWh meter reading and attach it to the given units
pub async fn create_test_meter(
    database: &Arc<dyn DatabaseManager>,
    meter_number: &str,
    reading: f64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    unit_ids: &[i32],
) -> i32 {
    let meter_id = database
        .meter_data()
        .create(NewMeterReading {
            meter_number: meter_number.to_string(),
            meter_provider_name: "Acme Utilities".to_string(),
            meter_source: "electric".to_string(),
            measurement_reading: reading,
            measurement_unit: MeasurementUnit::KilowattHours,
            measurement_start_date: start,
            measurement_end_date: end,
        })
        .await
        .unwrap();

    database
        .meter_data()
        .attach_unit_spaces(meter_id, unit_ids)
        .await
        .unwrap();

    meter_id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_builder_default() {
        let server = TestServerBuilder::new().build().await;

        assert_eq!(server.config.database.url, "sqlite::memory:");
        assert_eq!(server.config.auth.token, TEST_AUTH_TOKEN);
        assert!(!server.config.logging.log_request);
    }

    #[tokio::test]
    async fn test_create_test_property_space() {
        let server = TestServerBuilder::new().build().await;
        let id = create_test_property_space(&server.database, "Test Space", "1 Test St").await;

        assert!(id > 0);

        let space = server
            .database
            .property_spaces()
            .find_by_id(id)
            .await
            .unwrap();
        assert_eq!(space.unwrap().name, "Test Space");
    }

    #[tokio::test]
    async fn test_fixture_helpers_round_trip() {
        let server = TestServerBuilder::new().build().await;
        let space_id =
            create_test_property_space(&server.database, "Test Space", "1 Test St").await;
        let unit_id =
            create_test_unit(&server.database, space_id, "Unit A", UnitType::Leased, 50.0).await;
        let meter_id = create_test_meter(
            &server.database,
            "MTR-1",
            120.0,
            utc_date(2022, 1, 1),
            utc_date(2022, 12, 31),
            &[unit_id],
        )
        .await;

        let meter = server
            .database
            .meter_data()
            .find_by_id(meter_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(meter.measurement_reading, 120.0);
    }
}
