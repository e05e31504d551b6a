#![allow(clippy::unwrap_used)]
// Integration tests for `BackendClient` using wiremock.

use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tunnelctl_api::types::{CreateTunnelBody, EndpointBody, ProducerBody};
use tunnelctl_api::{BackendClient, Error, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, BackendClient) {
    let server = MockServer::start().await;
    let client = BackendClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn vxlan_body() -> CreateTunnelBody {
    let mut annotations = IndexMap::new();
    annotations.insert("bandwidth".to_owned(), "0".to_owned());
    CreateTunnelBody {
        src: EndpointBody::Ip {
            address: "10.0.0.1".into(),
        },
        dst: EndpointBody::Ip {
            address: "10.0.0.2".into(),
        },
        tunnel_type: "VXLAN".into(),
        group_id: 3,
        producer: ProducerBody {
            scheme: "default".into(),
            id: "tunnelctl.provider.tunnel.default".into(),
        },
        name: None,
        annotations,
    }
}

// ── Tunnel creation ─────────────────────────────────────────────────

#[tokio::test]
async fn test_create_tunnel_posts_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/tunnels"))
        .and(body_json(json!({
            "src": { "kind": "ip", "address": "10.0.0.1" },
            "dst": { "kind": "ip", "address": "10.0.0.2" },
            "type": "VXLAN",
            "group_id": 3,
            "producer": { "scheme": "default", "id": "tunnelctl.provider.tunnel.default" },
            "annotations": { "bandwidth": "0" }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "42" })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_tunnel(&vxlan_body()).await.unwrap();
    assert_eq!(created.id, "42");
}

#[tokio::test]
async fn test_create_tunnel_structured_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/tunnels"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "tunnel already exists",
            "code": "duplicate"
        })))
        .mount(&server)
        .await;

    let err = client.create_tunnel(&vxlan_body()).await.unwrap_err();
    assert!(err.is_conflict(), "expected conflict, got: {err:?}");
    assert_eq!(err.api_error_code(), Some("duplicate"));
    assert!(err.to_string().contains("tunnel already exists"));
}

#[tokio::test]
async fn test_create_tunnel_plain_text_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/tunnels"))
        .respond_with(ResponseTemplate::new(503).set_body_string("backend down"))
        .mount(&server)
        .await;

    let result = client.create_tunnel(&vxlan_body()).await;
    assert!(
        matches!(
            result,
            Err(Error::Api { status: 503, ref message, code: None }) if message == "backend down"
        ),
        "unexpected result: {result:?}"
    );
}

#[tokio::test]
async fn test_unauthorized_maps_to_invalid_api_key() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/tunnels"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.create_tunnel(&vxlan_body()).await;
    assert!(matches!(result, Err(Error::InvalidApiKey)), "got: {result:?}");
}

#[tokio::test]
async fn test_malformed_success_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/tunnels"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.create_tunnel(&vxlan_body()).await;
    assert!(
        matches!(result, Err(Error::Deserialization { ref body, .. }) if body == "not json"),
        "got: {result:?}"
    );
}

// ── Instance ports ──────────────────────────────────────────────────

#[tokio::test]
async fn test_list_instance_ports() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/instance-ports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "port_id": "p1", "ip_address": "10.10.0.5", "state": "ACTIVE" },
            { "port_id": "p2" }
        ])))
        .mount(&server)
        .await;

    let ports = client.list_instance_ports().await.unwrap();
    assert_eq!(ports.len(), 2);
    assert_eq!(ports[0].port_id, "p1");
    assert_eq!(ports[0].ip_address.as_deref(), Some("10.10.0.5"));
    assert_eq!(ports[1].port_id, "p2");
    assert!(ports[1].state.is_none());
}

#[tokio::test]
async fn test_base_path_prefix_is_kept() {
    let server = MockServer::start().await;
    let client = BackendClient::from_reqwest(
        &format!("{}/onos/tunnels-api", server.uri()),
        reqwest::Client::new(),
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/onos/tunnels-api/v1/instance-ports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let ports = client.list_instance_ports().await.unwrap();
    assert!(ports.is_empty());
}

#[tokio::test]
async fn test_api_key_header_is_sent() {
    let server = MockServer::start().await;
    let key: secrecy::SecretString = "s3cret".to_string().into();
    let client =
        BackendClient::new(&server.uri(), Some(&key), &TransportConfig::default()).unwrap();

    Mock::given(method("GET"))
        .and(path("/v1/instance-ports"))
        .and(header("X-API-KEY", "s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "port_id": "p9" }])))
        .expect(1)
        .mount(&server)
        .await;

    let ports = client.list_instance_ports().await.unwrap();
    assert_eq!(ports[0].port_id, "p9");
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let server = MockServer::start().await;
    let transport =
        TransportConfig::default().with_timeout(std::time::Duration::from_millis(100));
    let client = BackendClient::new(&server.uri(), None, &transport).unwrap();

    Mock::given(method("GET"))
        .and(path("/v1/instance-ports"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(std::time::Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let result = client.list_instance_ports().await;
    assert!(matches!(result, Err(Error::Timeout { .. })), "got: {result:?}");
}

#[test]
fn test_invalid_base_url() {
    let result = BackendClient::from_reqwest("not a url", reqwest::Client::new());
    assert!(matches!(result, Err(Error::InvalidUrl(_))));
}

#[tokio::test]
async fn test_stalled_body_times_out() {
    use std::io::{Read, Write};

    // Headers arrive promptly, the body never completes.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = [0_u8; 4096];
        let _ = stream.read(&mut buf);
        let _ = stream.write_all(
            b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 64\r\n\r\n[",
        );
        let _ = stream.flush();
        std::thread::sleep(std::time::Duration::from_secs(5));
    });

    let transport = TransportConfig::default().with_timeout(std::time::Duration::from_secs(1));
    let client = BackendClient::new(&format!("http://{addr}"), None, &transport).unwrap();

    let result = client.list_instance_ports().await;
    assert!(
        matches!(result, Err(Error::Timeout { timeout_secs: 1 })),
        "got: {result:?}"
    );
}
