//! HTTP client for the events REST resource.

use std::time::Duration;

use eventlist_core::config::ClientConfig;
use eventlist_core::{Event, EventId, EventListError, EventListResult, EventPatch, NewEvent};
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

/// Operations the store needs from the remote collection.
#[allow(async_fn_in_trait)]
pub trait EventApi {
    /// GET the whole collection, in server order.
    async fn get_events(&self) -> EventListResult<Vec<Event>>;

    /// POST a new record; the returned record carries the assigned id.
    async fn post_event(&self, event: &NewEvent) -> EventListResult<Event>;

    /// PUT the given fields onto an existing record.
    async fn update_event(&self, id: EventId, patch: &EventPatch) -> EventListResult<Event>;

    /// DELETE a record.
    async fn delete_event(&self, id: EventId) -> EventListResult<DeleteAck>;
}

/// What the server said about a deletion.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteAck {
    /// The record existed and was removed. Carries the server's body.
    Deleted(serde_json::Value),
    /// The server had no such record (404).
    AlreadyAbsent,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// reqwest-backed [`EventApi`].
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    resource_url: Url,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> EventListResult<Self> {
        let resource_url = resource_url(&config.base_url, &config.resource)?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| EventListError::Config(format!("Could not build HTTP client: {e}")))?;

        Ok(ApiClient { http, resource_url })
    }

    /// URL of the collection, e.g. `http://localhost:3000/events`.
    pub fn resource_url(&self) -> &Url {
        &self.resource_url
    }

    fn member_url(&self, id: EventId) -> EventListResult<Url> {
        let mut url = self.resource_url.clone();
        url.path_segments_mut()
            .map_err(|_| EventListError::Config(format!("Not a base URL: {}", self.resource_url)))?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }
}

impl EventApi for ApiClient {
    async fn get_events(&self) -> EventListResult<Vec<Event>> {
        tracing::debug!(url = %self.resource_url, "GET events");
        let resp = self
            .http
            .get(self.resource_url.clone())
            .send()
            .await
            .map_err(transport)?;

        read_json(resp).await
    }

    async fn post_event(&self, event: &NewEvent) -> EventListResult<Event> {
        tracing::debug!(url = %self.resource_url, name = %event.event_name, "POST event");
        let resp = self
            .http
            .post(self.resource_url.clone())
            .json(event)
            .send()
            .await
            .map_err(transport)?;

        read_json(resp).await
    }

    async fn update_event(&self, id: EventId, patch: &EventPatch) -> EventListResult<Event> {
        let url = self.member_url(id)?;
        tracing::debug!(%url, "PUT event");
        let resp = self
            .http
            .put(url)
            .json(patch)
            .send()
            .await
            .map_err(transport)?;

        read_json(resp).await
    }

    async fn delete_event(&self, id: EventId) -> EventListResult<DeleteAck> {
        let url = self.member_url(id)?;
        tracing::debug!(%url, "DELETE event");
        let resp = match self.http.delete(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(%id, error = %e, "delete request failed");
                return Err(transport(e));
            }
        };

        if resp.status() == StatusCode::NOT_FOUND {
            tracing::debug!(%id, "event already absent");
            return Ok(DeleteAck::AlreadyAbsent);
        }

        read_json(resp).await.map(DeleteAck::Deleted)
    }
}

/// Join `base_url` and `resource` so that a base path is kept
/// (`http://host/api` + `events` -> `http://host/api/events`).
fn resource_url(base_url: &str, resource: &str) -> EventListResult<Url> {
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }

    let base = Url::parse(&base)
        .map_err(|e| EventListError::Config(format!("Invalid base_url {base_url:?}: {e}")))?;
    if base.cannot_be_a_base() {
        return Err(EventListError::Config(format!("Invalid base_url {base_url:?}")));
    }

    base.join(resource.trim_matches('/'))
        .map_err(|e| EventListError::Config(format!("Invalid resource {resource:?}: {e}")))
}

fn transport(err: reqwest::Error) -> EventListError {
    EventListError::Transport(err.to_string())
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> EventListResult<T> {
    let status = resp.status();
    let body = resp.text().await.map_err(transport)?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or_else(|_| {
                if body.is_empty() {
                    status.canonical_reason().unwrap_or("unknown status").to_string()
                } else {
                    body
                }
            });
        return Err(EventListError::Status {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::{DELETE, GET, POST, PUT};
    use httpmock::MockServer;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&ClientConfig {
            base_url: server.base_url(),
            ..ClientConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_resource_url_keeps_base_path() {
        assert_eq!(
            resource_url("http://localhost:3000", "events").unwrap().as_str(),
            "http://localhost:3000/events"
        );
        assert_eq!(
            resource_url("http://host/api", "/events/").unwrap().as_str(),
            "http://host/api/events"
        );
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        assert!(matches!(
            resource_url("not a url", "events"),
            Err(EventListError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_get_events_parses_array_in_order() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/events");
            then.status(200).json_body(json!([
                { "id": 2, "eventName": "B", "startDate": "2024-01-02", "endDate": "2024-01-02" },
                { "id": 1, "eventName": "A", "startDate": "2024-01-01", "endDate": "2024-01-01" }
            ]));
        });

        let events = client_for(&server).get_events().await.unwrap();

        mock.assert();
        let names: Vec<_> = events.iter().map(|e| e.event_name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[tokio::test]
    async fn test_post_event_sends_record_without_id() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/events")
                .header("content-type", "application/json")
                .json_body(json!({ "eventName": "Demo", "startDate": "2024-02-01", "endDate": "2024-02-02" }));
            then.status(201).json_body(json!({
                "id": 7, "eventName": "Demo", "startDate": "2024-02-01", "endDate": "2024-02-02"
            }));
        });

        let created = client_for(&server)
            .post_event(&NewEvent::new("Demo", "2024-02-01", "2024-02-02"))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(created.id, "7".parse::<EventId>().unwrap());
    }

    #[tokio::test]
    async fn test_update_event_puts_only_given_fields() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT).path("/events/3").json_body(json!({ "eventName": "X" }));
            then.status(200).json_body(json!({
                "id": 3, "eventName": "X", "startDate": "2024-01-01", "endDate": "2024-01-02"
            }));
        });

        let patch = EventPatch {
            event_name: Some("X".into()),
            ..Default::default()
        };
        let updated = client_for(&server)
            .update_event("3".parse().unwrap(), &patch)
            .await
            .unwrap();

        mock.assert();
        assert_eq!(updated.event_name, "X");
        assert_eq!(updated.start_date, "2024-01-01");
    }

    #[tokio::test]
    async fn test_delete_event_acknowledges() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(DELETE).path("/events/3");
            then.status(200).json_body(json!({}));
        });

        let ack = client_for(&server).delete_event("3".parse().unwrap()).await.unwrap();

        mock.assert();
        assert_eq!(ack, DeleteAck::Deleted(json!({})));
    }

    #[tokio::test]
    async fn test_delete_missing_event_is_already_absent() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(DELETE).path("/events/3");
            then.status(404).json_body(json!({ "error": "Event not found: 3" }));
        });

        let ack = client_for(&server).delete_event("3".parse().unwrap()).await.unwrap();
        assert_eq!(ack, DeleteAck::AlreadyAbsent);
    }

    #[tokio::test]
    async fn test_error_status_uses_server_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PUT).path("/events/9");
            then.status(404).json_body(json!({ "error": "Event not found: 9" }));
        });

        let err = client_for(&server)
            .update_event("9".parse().unwrap(), &EventPatch::default())
            .await
            .unwrap_err();

        match err {
            EventListError::Status { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Event not found: 9");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/events");
            then.status(200).body("<html>oops</html>");
        });

        let err = client_for(&server).get_events().await.unwrap_err();
        assert!(matches!(err, EventListError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let client = ApiClient::new(&ClientConfig {
            base_url: "http://127.0.0.1:1".into(),
            ..ClientConfig::default()
        })
        .unwrap();

        let err = client.delete_event("1".parse().unwrap()).await.unwrap_err();
        assert!(matches!(err, EventListError::Transport(_)));
    }
}
