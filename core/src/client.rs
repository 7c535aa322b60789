//! Generic CRUD client for REST-shaped resource endpoints.
//!
//! # Design
//! `ResourceClient` holds a base URL and an injected transport and carries no
//! mutable state, so one instance is safely shared across any number of
//! stores. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`; the
//! executing methods compose the two around a transport round-trip. The
//! build/parse halves stay deterministic and are unit-tested without any
//! network.
//!
//! Status interpretation is uniform across all verbs: any 2xx is success,
//! anything else becomes `ApiError::Request` carrying the status code and
//! the endpoint.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::resource::Resource;

/// Stateless client for one REST-shaped API, generic over resource type per
/// call.
///
/// `base_url` is the fixed prefix every endpoint path is appended to, e.g.
/// `http://localhost:3000/api`. Endpoints are logical paths like `/exams`.
#[derive(Clone)]
pub struct ResourceClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
}

impl ResourceClient {
    pub fn new(base_url: &str, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // --- build half -------------------------------------------------------

    pub fn build_create(
        &self,
        endpoint: &str,
        body: &impl Serialize,
    ) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.collection_url(endpoint),
            headers: json_headers(),
            body: Some(encode(body)?),
        })
    }

    pub fn build_read_all(&self, endpoint: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.collection_url(endpoint),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_read_one(&self, endpoint: &str, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.item_url(endpoint, id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_update(
        &self,
        endpoint: &str,
        id: &str,
        body: &impl Serialize,
    ) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: self.item_url(endpoint, id),
            headers: json_headers(),
            body: Some(encode(body)?),
        })
    }

    pub fn build_delete(&self, endpoint: &str, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: self.item_url(endpoint, id),
            headers: Vec::new(),
            body: None,
        }
    }

    // --- parse half -------------------------------------------------------

    pub fn parse_one<T: Resource>(
        &self,
        endpoint: &str,
        response: HttpResponse,
    ) -> Result<T, ApiError> {
        check_status(endpoint, &response)?;
        decode(endpoint, &response.body)
    }

    pub fn parse_many<T: Resource>(
        &self,
        endpoint: &str,
        response: HttpResponse,
    ) -> Result<Vec<T>, ApiError> {
        check_status(endpoint, &response)?;
        decode(endpoint, &response.body)
    }

    /// No body is parsed for deletions; only the status matters.
    pub fn parse_delete(&self, endpoint: &str, response: HttpResponse) -> Result<(), ApiError> {
        check_status(endpoint, &response)
    }

    // --- executing operations --------------------------------------------

    /// POST the creation payload and return the server's full representation
    /// of the new resource, including its generated id.
    pub fn create<T: Resource>(&self, endpoint: &str, input: &T::Create) -> Result<T, ApiError> {
        let request = self.build_create(endpoint, input)?;
        let response = self.execute(endpoint, &request)?;
        self.parse_one(endpoint, response)
    }

    /// GET the full collection at an endpoint, in server order.
    pub fn read_all<T: Resource>(&self, endpoint: &str) -> Result<Vec<T>, ApiError> {
        let request = self.build_read_all(endpoint);
        let response = self.execute(endpoint, &request)?;
        self.parse_many(endpoint, response)
    }

    /// GET a single resource by id.
    pub fn read_one<T: Resource>(&self, endpoint: &str, id: &str) -> Result<T, ApiError> {
        let request = self.build_read_one(endpoint, id);
        let response = self.execute(endpoint, &request)?;
        self.parse_one(endpoint, response)
    }

    /// PUT the update payload and return the updated representation.
    pub fn update<T: Resource>(
        &self,
        endpoint: &str,
        id: &str,
        input: &T::Update,
    ) -> Result<T, ApiError> {
        let request = self.build_update(endpoint, id, input)?;
        let response = self.execute(endpoint, &request)?;
        self.parse_one(endpoint, response)
    }

    /// DELETE a resource by id.
    pub fn delete(&self, endpoint: &str, id: &str) -> Result<(), ApiError> {
        let request = self.build_delete(endpoint, id);
        let response = self.execute(endpoint, &request)?;
        self.parse_delete(endpoint, response)
    }

    fn execute(&self, endpoint: &str, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = ?request.method, url = %request.url, "issuing request");
        self.transport
            .execute(request)
            .map_err(|source| ApiError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })
    }

    fn collection_url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    fn item_url(&self, endpoint: &str, id: &str) -> String {
        format!("{}{endpoint}/{id}", self.base_url)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn encode(body: &impl Serialize) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Serialize(e.to_string()))
}

fn decode<T: serde::de::DeserializeOwned>(endpoint: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialize {
        endpoint: endpoint.to_string(),
        detail: e.to_string(),
    })
}

/// Any 2xx is success; everything else maps to `ApiError::Request` with the
/// status code and endpoint attached.
fn check_status(endpoint: &str, response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    warn!(endpoint, status = response.status, "request rejected");
    Err(ApiError::Request {
        status: response.status,
        endpoint: endpoint.to_string(),
    })
}
