//! One conformance-checked operation per server endpoint.

use crate::error::CheckError;
use parkcheck_model::{ApiErrorKind, Dinosaur, ResourceAdjustment, ResourceSnapshot, TurnResponse};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

const HEARTBEAT_ENDPOINT: &str = "/heartbeat";
const TURN_ENDPOINT: &str = "/turn";
const RESET_ENDPOINT: &str = "/reset";
const RESOURCES_ENDPOINT: &str = "/resources";
const DINOSAURS_ENDPOINT: &str = "/dinosaurs";

/// Issues one checked request per call against a single server instance,
/// reusing one connection pool for the whole run.
///
/// Every operation verifies the status code first and the payload second.
/// Calls are made strictly one at a time; the stories own the ordering.
pub struct ParkClient {
    http: Client,
    base_url: String,
}

impl ParkClient {
    /// Creates a client for the server at `endpoint`. No timeout is
    /// configured beyond the transport defaults; a hung server blocks
    /// the run.
    pub fn new(endpoint: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// GET `/heartbeat`: 200 with exactly one field, a string `time`.
    pub async fn heartbeat(&self) -> Result<(), CheckError> {
        const OPERATION: &str = "GET /heartbeat";
        let response = self.get(HEARTBEAT_ENDPOINT).await?;
        Self::check_status(OPERATION, StatusCode::OK, response.status())?;
        let received: Value = response.json().await?;

        let fields = received
            .as_object()
            .ok_or_else(|| CheckError::shape(OPERATION, "payload is not an object"))?;
        if fields.len() != 1 || !fields.contains_key("time") {
            return Err(CheckError::shape(
                OPERATION,
                "payload should carry exactly one field, 'time'",
            ));
        }
        if !fields["time"].is_string() {
            return Err(CheckError::shape(OPERATION, "'time' should be a string"));
        }
        Ok(())
    }

    /// POST `/turn`: 200 with exactly `{"turnNumber": expected_turn}`.
    pub async fn advance_turn(&self, expected_turn: u32) -> Result<(), CheckError> {
        const OPERATION: &str = "POST /turn";
        let expected = TurnResponse::new(expected_turn)?;
        let response = self.post(TURN_ENDPOINT).await?;
        Self::check_status(OPERATION, StatusCode::OK, response.status())?;
        let received: Value = response.json().await?;
        Self::check_payload(OPERATION, &expected, &received)
    }

    /// POST `/reset`: 200, no payload check.
    pub async fn reset(&self) -> Result<(), CheckError> {
        let response = self.post(RESET_ENDPOINT).await?;
        Self::check_status("POST /reset", StatusCode::OK, response.status())
    }

    /// POST `/resources`. With no expected rejection: 200 and the body
    /// goes unchecked. With one: 400 and the exact error body.
    pub async fn adjust_resources(
        &self,
        delivery: &ResourceAdjustment,
        expected_rejection: Option<ApiErrorKind>,
    ) -> Result<(), CheckError> {
        const OPERATION: &str = "POST /resources";
        let response = self.post_json(RESOURCES_ENDPOINT, delivery).await?;
        match expected_rejection {
            None => Self::check_status(OPERATION, StatusCode::OK, response.status()),
            Some(kind) => {
                Self::check_status(OPERATION, StatusCode::BAD_REQUEST, response.status())?;
                let received: Value = response.json().await?;
                Self::check_payload(OPERATION, &kind, &received)
            }
        }
    }

    /// GET `/resources`: 200 with exactly the expected snapshot.
    pub async fn read_resources(&self, expected: &ResourceSnapshot) -> Result<(), CheckError> {
        const OPERATION: &str = "GET /resources";
        let response = self.get(RESOURCES_ENDPOINT).await?;
        Self::check_status(OPERATION, StatusCode::OK, response.status())?;
        let received: Value = response.json().await?;
        Self::check_payload(OPERATION, expected, &received)
    }

    /// POST `/dinosaurs`. With no expected rejection: 200 and the body
    /// goes unchecked. With one: 400 and the exact error body.
    pub async fn create_dinosaur(
        &self,
        dinosaur: &Dinosaur,
        expected_rejection: Option<ApiErrorKind>,
    ) -> Result<(), CheckError> {
        const OPERATION: &str = "POST /dinosaurs";
        let response = self.post_json(DINOSAURS_ENDPOINT, dinosaur).await?;
        match expected_rejection {
            None => Self::check_status(OPERATION, StatusCode::OK, response.status()),
            Some(kind) => {
                Self::check_status(OPERATION, StatusCode::BAD_REQUEST, response.status())?;
                let received: Value = response.json().await?;
                Self::check_payload(OPERATION, &kind, &received)
            }
        }
    }

    /// GET `/dinosaurs/{name}`: 200 with exactly the expected dinosaur.
    pub async fn read_dinosaur(&self, expected: &Dinosaur) -> Result<(), CheckError> {
        let path = format!("{}/{}", DINOSAURS_ENDPOINT, expected.name);
        let operation = format!("GET {}", path);
        let response = self.get(&path).await?;
        Self::check_status(&operation, StatusCode::OK, response.status())?;
        let received: Value = response.json().await?;
        Self::check_payload(&operation, expected, &received)
    }

    /// GET `/dinosaurs/{name}` for a name that was never created: 404
    /// with the NON_EXISTENT_NAME body.
    pub async fn read_missing_dinosaur(&self, name: &str) -> Result<(), CheckError> {
        let path = format!("{}/{}", DINOSAURS_ENDPOINT, name);
        let operation = format!("GET {}", path);
        let response = self.get(&path).await?;
        Self::check_status(&operation, StatusCode::NOT_FOUND, response.status())?;
        let received: Value = response.json().await?;
        Self::check_payload(&operation, &ApiErrorKind::NonExistentName, &received)
    }

    /// GET `/dinosaurs`: 200 with exactly the expected dinosaurs, order
    /// not asserted. Cardinality is checked before content so a superset
    /// that covers every expected encoding is still rejected, and the
    /// unordered comparison counts duplicates rather than collapsing to
    /// a set.
    pub async fn read_dinosaurs(&self, expected: &[Dinosaur]) -> Result<(), CheckError> {
        const OPERATION: &str = "GET /dinosaurs";
        let response = self.get(DINOSAURS_ENDPOINT).await?;
        Self::check_status(OPERATION, StatusCode::OK, response.status())?;
        let received: Value = response.json().await?;

        let received_items = received
            .as_array()
            .ok_or_else(|| CheckError::shape(OPERATION, "payload is not an array"))?;
        let expected_items: Vec<Value> = expected
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<_, _>>()?;

        let matches = received_items.len() == expected_items.len()
            && canonical_multiset(&expected_items) == canonical_multiset(received_items);
        if !matches {
            return Err(CheckError::payload(
                OPERATION,
                &Value::Array(expected_items),
                &received,
            ));
        }
        Ok(())
    }

    // ========== Internal HTTP helpers ==========

    async fn get(&self, path: &str) -> Result<Response, CheckError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);
        Ok(self.http.get(&url).send().await?)
    }

    async fn post(&self, path: &str) -> Result<Response, CheckError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);
        Ok(self.http.post(&url).send().await?)
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, CheckError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);
        Ok(self.http.post(&url).json(body).send().await?)
    }

    fn check_status(
        operation: &str,
        expected: StatusCode,
        received: StatusCode,
    ) -> Result<(), CheckError> {
        if expected != received {
            return Err(CheckError::status(operation, expected, received));
        }
        Ok(())
    }

    fn check_payload<T: Serialize>(
        operation: &str,
        expected: &T,
        received: &Value,
    ) -> Result<(), CheckError> {
        let expected = serde_json::to_value(expected)?;
        if expected != *received {
            return Err(CheckError::payload(operation, &expected, received));
        }
        Ok(())
    }
}

/// Canonical unordered form of a JSON array: the sorted list of each
/// item's compact encoding. Object keys already serialize in sorted
/// order, so identical items always produce identical strings.
fn canonical_multiset(items: &[Value]) -> Vec<String> {
    let mut encodings: Vec<String> = items.iter().map(Value::to_string).collect();
    encodings.sort();
    encodings
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkcheck_model::{Gender, ResourceBundle, Species};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn alpha() -> Dinosaur {
        Dinosaur::new("Alpha", 1000, Gender::Male, Species::Allosaurus)
    }

    fn bravo() -> Dinosaur {
        Dinosaur::new("Bravo", 2000, Gender::Female, Species::TyrannosaurusRex)
    }

    fn charlie() -> Dinosaur {
        Dinosaur::new("Charlie", 3000, Gender::Male, Species::Triceratops)
    }

    async fn dinosaur_list_server(body: Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dinosaurs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_heartbeat_accepts_a_single_time_string() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/heartbeat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"time": "2024-05-01T10:00:00-04:00"})),
            )
            .mount(&server)
            .await;

        let client = ParkClient::new(&server.uri());
        assert!(client.heartbeat().await.is_ok());
    }

    #[tokio::test]
    async fn test_heartbeat_rejects_extra_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/heartbeat"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"time": "now", "uptime": 3})),
            )
            .mount(&server)
            .await;

        let client = ParkClient::new(&server.uri());
        let err = client.heartbeat().await.unwrap_err();
        assert!(matches!(err, CheckError::Shape { .. }));
        assert!(err.is_assertion());
    }

    #[tokio::test]
    async fn test_heartbeat_rejects_a_non_string_time() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/heartbeat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"time": 12})))
            .mount(&server)
            .await;

        let client = ParkClient::new(&server.uri());
        let err = client.heartbeat().await.unwrap_err();
        assert!(matches!(err, CheckError::Shape { .. }));
    }

    #[tokio::test]
    async fn test_advance_turn_passes_on_the_exact_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/turn"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"turnNumber": 1})))
            .mount(&server)
            .await;

        let client = ParkClient::new(&server.uri());
        assert!(client.advance_turn(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_advance_turn_reports_a_payload_mismatch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/turn"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"turnNumber": 2})))
            .mount(&server)
            .await;

        let client = ParkClient::new(&server.uri());
        let err = client.advance_turn(1).await.unwrap_err();
        assert!(err.is_assertion());
        let message = err.to_string();
        assert!(message.contains("POST /turn"));
        assert!(message.contains("\"turnNumber\": 1"));
        assert!(message.contains("\"turnNumber\": 2"));
    }

    #[tokio::test]
    async fn test_a_zero_turn_expectation_is_a_harness_fault() {
        // The request is never issued, so no server is needed.
        let client = ParkClient::new("http://127.0.0.1:1");
        let err = client.advance_turn(0).await.unwrap_err();
        assert!(matches!(err, CheckError::Model(_)));
        assert!(!err.is_assertion());
    }

    #[tokio::test]
    async fn test_status_mismatch_is_an_assertion_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/reset"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = ParkClient::new(&server.uri());
        let err = client.reset().await.unwrap_err();
        assert!(matches!(
            err,
            CheckError::Status {
                expected: 200,
                received: 500,
                ..
            }
        ));
        assert!(err.is_assertion());
    }

    #[tokio::test]
    async fn test_adjust_resources_sends_only_the_present_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/resources"))
            .and(body_json(json!({"qtyBurger": 2})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = ParkClient::new(&server.uri());
        let delivery = ResourceAdjustment::new(Some(2), None, None).unwrap();
        assert!(client.adjust_resources(&delivery, None).await.is_ok());
    }

    #[tokio::test]
    async fn test_adjust_resources_rejection_checks_the_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/resources"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "INVALID_RESOURCE_QUANTITY",
                "description": "Resource quantities must be positive.",
            })))
            .mount(&server)
            .await;

        let client = ParkClient::new(&server.uri());
        let delivery = ResourceAdjustment::new(Some(1), None, None).unwrap();
        assert!(client
            .adjust_resources(&delivery, Some(ApiErrorKind::InvalidResourceQuantity))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_rejection_with_the_wrong_description_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/dinosaurs"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "INVALID_GENDER",
                "description": "wrong words",
            })))
            .mount(&server)
            .await;

        let client = ParkClient::new(&server.uri());
        let err = client
            .create_dinosaur(&alpha(), Some(ApiErrorKind::InvalidGender))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::Payload { .. }));
    }

    #[tokio::test]
    async fn test_create_dinosaur_sends_the_wire_encoding() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/dinosaurs"))
            .and(body_json(json!({
                "name": "Bravo",
                "weight": 2000,
                "gender": "f",
                "species": "Tyrannosaurus Rex",
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = ParkClient::new(&server.uri());
        assert!(client.create_dinosaur(&bravo(), None).await.is_ok());
    }

    #[tokio::test]
    async fn test_read_dinosaur_hits_the_named_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dinosaurs/Alpha"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Alpha",
                "weight": 1000,
                "gender": "m",
                "species": "Allosaurus",
            })))
            .mount(&server)
            .await;

        let client = ParkClient::new(&server.uri());
        assert!(client.read_dinosaur(&alpha()).await.is_ok());
    }

    #[tokio::test]
    async fn test_read_missing_dinosaur_wants_the_404_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dinosaurs/Ghost"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": "NON_EXISTENT_NAME",
                "description": "The specified name does not exist.",
            })))
            .mount(&server)
            .await;

        let client = ParkClient::new(&server.uri());
        assert!(client.read_missing_dinosaur("Ghost").await.is_ok());
    }

    #[tokio::test]
    async fn test_read_dinosaurs_ignores_order() {
        let server = dinosaur_list_server(json!([
            {"name": "Charlie", "weight": 3000, "gender": "m", "species": "Triceratops"},
            {"name": "Alpha", "weight": 1000, "gender": "m", "species": "Allosaurus"},
            {"name": "Bravo", "weight": 2000, "gender": "f", "species": "Tyrannosaurus Rex"},
        ]))
        .await;

        let client = ParkClient::new(&server.uri());
        let expected = vec![alpha(), bravo(), charlie()];
        assert!(client.read_dinosaurs(&expected).await.is_ok());
    }

    #[tokio::test]
    async fn test_read_dinosaurs_rejects_a_superset() {
        let server = dinosaur_list_server(json!([
            {"name": "Alpha", "weight": 1000, "gender": "m", "species": "Allosaurus"},
            {"name": "Bravo", "weight": 2000, "gender": "f", "species": "Tyrannosaurus Rex"},
            {"name": "Bravo", "weight": 2000, "gender": "f", "species": "Tyrannosaurus Rex"},
        ]))
        .await;

        let client = ParkClient::new(&server.uri());
        let err = client
            .read_dinosaurs(&[alpha(), bravo()])
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::Payload { .. }));
    }

    #[tokio::test]
    async fn test_read_dinosaurs_counts_duplicates() {
        // Same cardinality and the same element *set*; only the
        // multiplicities differ.
        let server = dinosaur_list_server(json!([
            {"name": "Alpha", "weight": 1000, "gender": "m", "species": "Allosaurus"},
            {"name": "Bravo", "weight": 2000, "gender": "f", "species": "Tyrannosaurus Rex"},
            {"name": "Bravo", "weight": 2000, "gender": "f", "species": "Tyrannosaurus Rex"},
        ]))
        .await;

        let client = ParkClient::new(&server.uri());
        let err = client
            .read_dinosaurs(&[alpha(), alpha(), bravo()])
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::Payload { .. }));
    }

    #[tokio::test]
    async fn test_read_empty_dinosaur_list() {
        let server = dinosaur_list_server(json!([])).await;
        let client = ParkClient::new(&server.uri());
        assert!(client.read_dinosaurs(&[]).await.is_ok());
    }

    #[tokio::test]
    async fn test_read_resources_compares_the_full_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/resources"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "fresh": {"qtyBurger": 101, "qtySalad": 250, "qtyWater": 10000},
                "expired": {"qtyBurger": 0, "qtySalad": 0, "qtyWater": 0},
                "consumed": {"qtyBurger": 0, "qtySalad": 0, "qtyWater": 0},
            })))
            .mount(&server)
            .await;

        let client = ParkClient::new(&server.uri());
        let expected = ResourceSnapshot::new(
            ResourceBundle::new(101, 250, 10_000),
            ResourceBundle::zero(),
            ResourceBundle::zero(),
        );
        assert!(client.read_resources(&expected).await.is_ok());

        let off_by_one = ResourceSnapshot::new(
            ResourceBundle::new(100, 250, 10_000),
            ResourceBundle::zero(),
            ResourceBundle::zero(),
        );
        let err = client.read_resources(&off_by_one).await.unwrap_err();
        assert!(matches!(err, CheckError::Payload { .. }));
    }

    #[tokio::test]
    async fn test_transport_failures_are_not_assertions() {
        // Port 1 has no listener.
        let client = ParkClient::new("http://127.0.0.1:1");
        let err = client.reset().await.unwrap_err();
        assert!(matches!(err, CheckError::Transport(_)));
        assert!(!err.is_assertion());
    }

    #[test]
    fn test_endpoint_normalization_trims_the_trailing_slash() {
        let client = ParkClient::new("http://localhost:8181/");
        assert_eq!(client.base_url, "http://localhost:8181");
    }
}
