//! End-to-end tests against real HTTP servers.
//!
//! These run the reqwest transport against `wiremock` servers standing in for the presign
//! backend and the storage endpoint.


use crate::{OssClient, PresignConfig};
use url::Url;
use wiremock::MockServer;

/// Client whose presign endpoint is `/get-presign` on `backend`.
pub(crate) fn client_for(backend: &MockServer) -> OssClient {
    let endpoint = Url::parse(&format!("{}/get-presign", backend.uri())).expect("mock server URI is valid");
    OssClient::from_config(PresignConfig::with_endpoint(endpoint))
}
