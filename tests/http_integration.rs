// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for transactions over HTTP using wiremock.

#![cfg(feature = "http")]

use huesync::protocol::{HttpClient, HttpConfig, Transport};
use huesync::state::Snapshot;
use huesync::transaction::StateTransaction;
use huesync::types::TransitionTime;
use huesync::{Error, Group, Light, ProtocolError, TransportError};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER: &str = "test-user";

fn client_for(server: &MockServer) -> HttpClient {
    let address = server.address();
    HttpConfig::new(address.ip().to_string(), USER)
        .with_port(address.port())
        .into_client()
        .unwrap()
}

fn api_path(resource: &str) -> String {
    format!("/api/{USER}{resource}")
}

// ============================================================================
// HttpClient Tests
// ============================================================================

mod http_client {
    use super::*;

    #[tokio::test]
    async fn put_sends_json_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path(api_path("/lights/1/state")))
            .and(body_json(json!({"on": true})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"success": {"/lights/1/state/on": true}}])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let reply = client
            .put("/lights/1/state", &json!({"on": true}))
            .await
            .unwrap();

        assert!(reply.body().contains("success"));
    }

    #[tokio::test]
    async fn get_reads_resource() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(api_path("/lights/2")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Hall"})))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let reply = client.get("/lights/2").await.unwrap();

        assert_eq!(reply.json().unwrap()["name"], "Hall");
    }

    #[tokio::test]
    async fn unauthorized_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.get("/lights").await.unwrap_err();

        assert!(matches!(err, TransportError::Unauthorized));
    }

    #[tokio::test]
    async fn server_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.put("/lights/1/state", &json!({})).await.unwrap_err();

        assert!(matches!(err, TransportError::ConnectionFailed(msg) if msg.starts_with("HTTP 503")));
    }
}

// ============================================================================
// Transaction Tests
// ============================================================================

mod transaction {
    use super::*;

    #[tokio::test]
    async fn sends_only_changed_fields() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path(api_path("/lights/1/state")))
            .and(body_json(json!({"bri": 150})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"success": {"/lights/1/state/bri": 150}}])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let state = json!({"on": true, "bri": 100});

        StateTransaction::new(&client, "/lights/1/state", Snapshot::new(&state))
            .set_on(true)
            .set_brightness(150)
            .unwrap()
            .commit()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn no_change_makes_no_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let state = json!({"on": false});

        StateTransaction::new(&client, "/lights/1/state", Snapshot::new(&state))
            .set_on(false)
            .commit()
            .await
            .unwrap();

        StateTransaction::new(&client, "/lights/1/state", Snapshot::new(&state))
            .set_transition(TransitionTime::new(20))
            .commit()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn increments_and_transition_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path(api_path("/lights/5/state")))
            .and(body_json(json!({
                "bri_inc": -20,
                "ct_inc": 0,
                "transitiontime": 2
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"success": {"/lights/5/state/bri_inc": -20}},
                {"success": {"/lights/5/state/ct_inc": 0}}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let state = json!({"on": true, "bri": 200, "ct": 300});

        StateTransaction::new(&client, "/lights/5/state", Snapshot::new(&state))
            .increment_brightness(-20)
            .unwrap()
            .increment_color_temperature(0)
            .unwrap()
            .set_transition(2u16)
            .commit()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn bridge_error_is_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "error": {"description": "parameter not available"}
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        let err = StateTransaction::new(&client, "/lights/1/state", Snapshot::empty())
            .set_color_loop(true)
            .commit()
            .await
            .unwrap_err();

        match err {
            Error::Api(api) => assert_eq!(api.description, "parameter not available"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn bridge_error_array_carries_address() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "error": {
                    "type": 201,
                    "address": "/lights/1/state/hue",
                    "description": "parameter, hue, is not modifiable. Device is set to off."
                }
            }])))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        let err = StateTransaction::new(&client, "/lights/1/state", Snapshot::empty())
            .set_color_hue(12_000)
            .unwrap()
            .commit()
            .await
            .unwrap_err();

        match err {
            Error::Api(api) => {
                assert_eq!(api.kind, Some(201));
                assert_eq!(api.address, "/lights/1/state/hue");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_reply_is_protocol_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        let err = StateTransaction::new(&client, "/lights/1/state", Snapshot::empty())
            .alert()
            .commit()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Protocol(ProtocolError::MissingBody)));
    }

    #[tokio::test]
    async fn malformed_reply_is_protocol_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        let err = StateTransaction::new(&client, "/lights/1/state", Snapshot::empty())
            .set_on(true)
            .commit()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Protocol(ProtocolError::Json(_))));
    }

    #[tokio::test]
    async fn unreachable_bridge_is_transport_error() {
        let client = HttpConfig::new("127.0.0.1", USER)
            .with_port(1)
            .into_client()
            .unwrap();

        let err = StateTransaction::new(&client, "/lights/1/state", Snapshot::empty())
            .set_on(true)
            .commit()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(_)));
    }
}

// ============================================================================
// Light and Group Tests
// ============================================================================

mod handles {
    use super::*;

    #[tokio::test]
    async fn light_fetch_then_diffed_transaction() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(api_path("/lights/3")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Kitchen",
                "type": "Color temperature light",
                "state": {"on": true, "bri": 254, "ct": 366, "alert": "none", "reachable": true}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path(api_path("/lights/3/state")))
            .and(body_json(json!({"ct": 153})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"success": {"/lights/3/state/ct": 153}}])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let light = Light::fetch(3, client_for(&mock_server)).await.unwrap();
        assert_eq!(light.name(), Some("Kitchen"));
        assert!(light.is_on());

        light
            .transaction()
            .set_on(true)
            .set_brightness(254)
            .unwrap()
            .set_color_temperature(153)
            .unwrap()
            .commit()
            .await
            .unwrap();

        // Already on, so nothing is sent
        light.turn_on(TransitionTime::DEFAULT).await.unwrap();
    }

    #[tokio::test]
    async fn light_rename() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path(api_path("/lights/3")))
            .and(body_json(json!({"name": "Pantry"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"success": {"/lights/3/name": "Pantry"}}])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut light = Light::new(3, client_for(&mock_server));
        assert!(light.set_name("Pantry").await.unwrap());
    }

    #[tokio::test]
    async fn group_action_sends_everything() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path(api_path("/groups/0/action")))
            .and(body_json(json!({"on": false, "transitiontime": 0})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"success": {"/groups/0/action/on": false}}])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let group = Group::all(client_for(&mock_server));
        group.turn_off(TransitionTime::INSTANT).await.unwrap();
    }
}
