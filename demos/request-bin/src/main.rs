//! Request bin demo
//!
//! Registers a named client and posts a person to it.
//!
//! ```text
//! RUST_LOG=restwire=debug cargo run -p request-bin-demo -- https://localtest.me:8080
//! ```

// Demo-specific lint allowances
#![allow(missing_docs)]

use restwire::prelude::*;
use tracing_subscriber::EnvFilter;

const CLIENT_NAME: &str = "RequestBin";
const DEFAULT_BASE_URL: &str = "https://localtest.me:8080";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
}

/// Registry with the request bin client bound to `base_url`.
fn registry(base_url: &str) -> Result<RestClientRegistry<Endpoint<HyperClient>>> {
    let request_bin = Endpoint::new(HyperClient::new(), base_url)?;
    let fallback = request_bin.clone();

    let mut registry = RestClientRegistry::new(move || fallback.clone());
    registry.add_client(CLIENT_NAME, move || request_bin.clone(), |options| options);
    Ok(registry)
}

async fn post_person(base_url: &str, person: &Person) -> Result<()> {
    let client = registry(base_url)?
        .client(CLIENT_NAME)
        .ok_or_else(|| Error::invalid_argument(format!("no client named {CLIENT_NAME}")))?;

    client
        .send_json(Method::Post, "/v1/person", person, None)
        .await
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .compact()
        .init();

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let person = Person {
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
    };

    match post_person(&base_url, &person).await {
        Ok(()) => tracing::info!(%base_url, "person posted"),
        Err(err) => {
            tracing::error!(%base_url, error = %err, "could not post person");
            return Err(err);
        }
    }

    Ok(())
}

// ============================================================================
// Tests using wiremock
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, method, path},
    };

    fn john() -> Person {
        Person {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
        }
    }

    #[tokio::test]
    async fn test_post_person() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/person"))
            .and(body_json(john()))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        post_person(&mock_server.uri(), &john())
            .await
            .expect("posted");
    }

    #[tokio::test]
    async fn test_post_person_rejected() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/person"))
            .respond_with(ResponseTemplate::new(400).set_body_string("LastName is required"))
            .mount(&mock_server)
            .await;

        let err = post_person(&mock_server.uri(), &john())
            .await
            .expect_err("rejected");

        assert_eq!(err.status(), Some(400));
        assert_eq!(err.payload(), Some("LastName is required"));
    }

    #[test]
    fn test_registry_has_request_bin() {
        let registry = registry(DEFAULT_BASE_URL).expect("registry");
        let client = registry.client(CLIENT_NAME).expect("client");

        assert_eq!(client.options().transport_name.as_deref(), Some(CLIENT_NAME));
        assert!(registry.transports().contains(CLIENT_NAME));
    }
}
