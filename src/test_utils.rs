//! Fake API server plumbing shared by the unit tests.

use http::{Request, Response, StatusCode};
use kube::client::Body;
use serde_json::{json, Value};
use tower_test::mock::{self, Handle, SendResponse};

use crate::client::Client;

pub type ApiServerHandle = Handle<Request<Body>, Response<Body>>;

/// A [`Client`] whose requests are answered through the returned handle.
pub fn mock_client(namespace: Option<&str>) -> (Client, ApiServerHandle) {
    let (service, handle) = mock::pair::<Request<Body>, Response<Body>>();
    let inner = kube::Client::new(service, "default");
    (Client::new(inner, namespace.map(String::from)), handle)
}

pub fn secret_list(count: usize) -> Value {
    let items: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "apiVersion": "v1",
                "kind": "Secret",
                "metadata": { "name": format!("secret-{i}"), "namespace": "default" },
            })
        })
        .collect();
    json!({
        "apiVersion": "v1",
        "kind": "SecretList",
        "metadata": { "resourceVersion": "1" },
        "items": items,
    })
}

/// Waits for the next GET, checks its path and hands back the responder.
pub async fn expect_get(
    handle: &mut ApiServerHandle,
    path: &str,
) -> SendResponse<Response<Body>> {
    let (request, send) = handle.next_request().await.expect("service not called");
    assert_eq!(request.method(), http::Method::GET);
    assert_eq!(request.uri().path(), path);
    send
}

pub fn reply(send: SendResponse<Response<Body>>, status: StatusCode, body: Value) {
    send.send_response(
        Response::builder()
            .status(status)
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
    );
}

pub async fn respond(handle: &mut ApiServerHandle, path: &str, status: StatusCode, body: Value) {
    let send = expect_get(handle, path).await;
    reply(send, status, body);
}
