//! tonic client for the `auth.Permissions` service
//!
//! Messages are declared by hand with prost derives, so the build needs no
//! protoc step.

use async_trait::async_trait;
use tonic::client::Grpc;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::metadata::{Ascii, MetadataValue};
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Status};
use tracing::info;

use super::{FaultKind, PermissionAuthority, RemoteFault};
use crate::errors::{Result, ShortgateError};

#[derive(Clone, PartialEq, prost::Message)]
pub struct IsAdminRequest {
    #[prost(uint64, tag = "1")]
    pub user_id: u64,
    #[prost(int32, tag = "2")]
    pub app_id: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct IsAdminResponse {
    #[prost(bool, tag = "1")]
    pub is_admin: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SetAdminRequest {
    #[prost(string, tag = "1")]
    pub email: String,
    #[prost(int32, tag = "2")]
    pub app_id: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SetAdminResponse {
    #[prost(bool, tag = "1")]
    pub set_admin: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DelAdminRequest {
    #[prost(string, tag = "1")]
    pub email: String,
    #[prost(int32, tag = "2")]
    pub app_id: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DelAdminResponse {
    #[prost(bool, tag = "1")]
    pub del_admin: bool,
}

const IS_ADMIN_PATH: &str = "/auth.Permissions/IsAdmin";
const SET_ADMIN_PATH: &str = "/auth.Permissions/SetAdmin";
const DEL_ADMIN_PATH: &str = "/auth.Permissions/DelAdmin";

impl From<Code> for FaultKind {
    fn from(code: Code) -> Self {
        match code {
            Code::NotFound => FaultKind::NotFound,
            Code::Aborted => FaultKind::Aborted,
            Code::DeadlineExceeded => FaultKind::DeadlineExceeded,
            Code::Unavailable => FaultKind::Unavailable,
            Code::InvalidArgument => FaultKind::InvalidArgument,
            Code::Unauthenticated => FaultKind::Unauthenticated,
            Code::PermissionDenied => FaultKind::PermissionDenied,
            Code::Internal => FaultKind::Internal,
            _ => FaultKind::Other,
        }
    }
}

impl From<Status> for RemoteFault {
    fn from(status: Status) -> Self {
        RemoteFault::new(status.code().into(), status.message())
    }
}

/// Production [`PermissionAuthority`] over a lazily connected channel
#[derive(Clone)]
pub struct GrpcPermissionAuthority {
    inner: Grpc<Channel>,
}

impl GrpcPermissionAuthority {
    /// Build the channel without dialing; the first call connects.
    ///
    /// `address` may omit the scheme (`localhost:44044`), in which case
    /// plain `http://` is assumed.
    pub fn connect_lazy(address: &str) -> Result<Self> {
        let uri = if address.contains("://") {
            address.to_string()
        } else {
            format!("http://{}", address)
        };

        let endpoint = Endpoint::from_shared(uri.clone()).map_err(|e| {
            ShortgateError::config(format!("invalid permission.address '{}': {}", address, e))
        })?;

        info!("Permission authority endpoint: {}", uri);
        Ok(Self {
            inner: Grpc::new(endpoint.connect_lazy()),
        })
    }

    async fn unary<Req, Resp>(
        &self,
        path: &'static str,
        message: Req,
        credential: &str,
    ) -> std::result::Result<Resp, RemoteFault>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let mut grpc = self.inner.clone();
        grpc.ready().await.map_err(|e| {
            RemoteFault::new(FaultKind::Unavailable, format!("service not ready: {}", e))
        })?;

        let mut request = tonic::Request::new(message);
        let bearer: MetadataValue<Ascii> = format!("Bearer {}", credential)
            .parse()
            .map_err(|_| RemoteFault::new(FaultKind::InvalidArgument, "credential is not valid metadata"))?;
        request.metadata_mut().insert("authorization", bearer);

        let codec = tonic_prost::ProstCodec::<Req, Resp>::default();
        let response = grpc
            .unary(request, PathAndQuery::from_static(path), codec)
            .await?;

        Ok(response.into_inner())
    }
}

#[async_trait]
impl PermissionAuthority for GrpcPermissionAuthority {
    async fn is_admin(
        &self,
        user_id: u64,
        app_id: i32,
        credential: &str,
    ) -> std::result::Result<bool, RemoteFault> {
        let response: IsAdminResponse = self
            .unary(IS_ADMIN_PATH, IsAdminRequest { user_id, app_id }, credential)
            .await?;
        Ok(response.is_admin)
    }

    async fn set_admin(
        &self,
        email: &str,
        app_id: i32,
        credential: &str,
    ) -> std::result::Result<bool, RemoteFault> {
        let request = SetAdminRequest {
            email: email.to_string(),
            app_id,
        };
        let response: SetAdminResponse = self.unary(SET_ADMIN_PATH, request, credential).await?;
        Ok(response.set_admin)
    }

    async fn del_admin(
        &self,
        email: &str,
        app_id: i32,
        credential: &str,
    ) -> std::result::Result<bool, RemoteFault> {
        let request = DelAdminRequest {
            email: email.to_string(),
            app_id,
        };
        let response: DelAdminResponse = self.unary(DEL_ADMIN_PATH, request, credential).await?;
        Ok(response.del_admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(FaultKind::from(Code::NotFound), FaultKind::NotFound);
        assert_eq!(FaultKind::from(Code::Aborted), FaultKind::Aborted);
        assert_eq!(
            FaultKind::from(Code::DeadlineExceeded),
            FaultKind::DeadlineExceeded
        );
        assert_eq!(
            FaultKind::from(Code::InvalidArgument),
            FaultKind::InvalidArgument
        );
        assert_eq!(FaultKind::from(Code::ResourceExhausted), FaultKind::Other);
    }

    #[test]
    fn test_status_keeps_message() {
        let fault = RemoteFault::from(Status::invalid_argument("invalid credentials"));
        assert_eq!(fault.kind, FaultKind::InvalidArgument);
        assert_eq!(fault.message, "invalid credentials");
    }

    #[test]
    fn test_wire_tags() {
        // field 1 varint (0x08) = 5, field 2 varint (0x10) = 3
        let bytes = IsAdminRequest {
            user_id: 5,
            app_id: 3,
        }
        .encode_to_vec();
        assert_eq!(bytes, vec![0x08, 5, 0x10, 3]);

        let decoded = SetAdminResponse::decode(&[0x08, 1][..]).unwrap();
        assert!(decoded.set_admin);
    }

    #[tokio::test]
    async fn test_connect_lazy_accepts_bare_host_port() {
        assert!(GrpcPermissionAuthority::connect_lazy("localhost:44044").is_ok());
        assert!(GrpcPermissionAuthority::connect_lazy("http://127.0.0.1:50051").is_ok());
        assert!(GrpcPermissionAuthority::connect_lazy("not a uri").is_err());
    }
}
