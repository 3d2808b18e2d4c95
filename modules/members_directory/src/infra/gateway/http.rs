use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{field, instrument, Instrument, Level};
use url::Url;

use crate::contract::{
    client::DirectoryGateway,
    error::GatewayError,
    model::{Member, MemberId, MemberPatch, NewMember},
};
use crate::infra::gateway::dto::{members_from_records, CreateMemberReq, MemberDto, UpdateMemberReq};

/// REST adapter for the members backend:
///  - `GET  {base}/members`
///  - `POST {base}/members`
///  - `PUT  {base}/members/{id}`
pub struct HttpDirectoryGateway {
    client: reqwest::Client,
    base: Url,
}

impl HttpDirectoryGateway {
    /// Build with a dedicated client enforcing `timeout` on every request.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::transport(e.to_string()))?;
        Ok(Self::with_client(client, base))
    }

    pub fn with_client(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }

    fn members_url(&self, id: Option<&MemberId>) -> Result<Url, GatewayError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| GatewayError::transport("invalid members base URL"))?;
            segments.pop_if_empty().push("members");
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }

    /// Send a request inside an `outgoing_http` span recording its status.
    async fn execute(
        &self,
        method: Method,
        url: Url,
        req: RequestBuilder,
    ) -> Result<Response, GatewayError> {
        let span = tracing::span!(
            Level::INFO, "outgoing_http",
            http.method = %method,
            http.url = %url,
            http.status_code = field::Empty,
            otel.kind = "client",
        );

        async {
            let response = req
                .send()
                .await
                .map_err(|e| GatewayError::transport(e.to_string()))?;
            let span = tracing::Span::current();
            span.record("http.status_code", response.status().as_u16());
            Ok(response)
        }
        .instrument(span)
        .await
    }

    async fn decode<T: DeserializeOwned>(
        response: Response,
        id: Option<&MemberId>,
    ) -> Result<T, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, response, id).await);
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| GatewayError::transport(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| GatewayError::decode(e.to_string()))
    }

    async fn status_error(
        status: StatusCode,
        response: Response,
        id: Option<&MemberId>,
    ) -> GatewayError {
        match (status, id) {
            (StatusCode::NOT_FOUND, Some(id)) => GatewayError::not_found(id.clone()),
            (StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY, _) => {
                let text = response.text().await.unwrap_or_default();
                let message = if text.trim().is_empty() {
                    format!("HTTP {}", status.as_u16())
                } else {
                    text.trim().to_string()
                };
                GatewayError::validation(message)
            }
            (other, _) => GatewayError::server(other.as_u16()),
        }
    }
}

#[async_trait]
impl DirectoryGateway for HttpDirectoryGateway {
    #[instrument(name = "members_directory.http.list", skip_all, fields(base = %self.base))]
    async fn list(&self) -> Result<Vec<Member>, GatewayError> {
        let url = self.members_url(None)?;
        let req = self.client.get(url.clone());
        let response = self.execute(Method::GET, url, req).await?;
        let records: Vec<serde_json::Value> = Self::decode(response, None).await?;
        Ok(members_from_records(records))
    }

    #[instrument(name = "members_directory.http.create", skip_all, fields(base = %self.base))]
    async fn create(&self, draft: NewMember) -> Result<Member, GatewayError> {
        let url = self.members_url(None)?;
        let req = self
            .client
            .post(url.clone())
            .json(&CreateMemberReq::from(draft));
        let response = self.execute(Method::POST, url, req).await?;
        let dto: MemberDto = Self::decode(response, None).await?;
        Member::try_from(dto)
    }

    #[instrument(name = "members_directory.http.update", skip_all, fields(base = %self.base, member_id = %id))]
    async fn update(&self, id: &MemberId, patch: MemberPatch) -> Result<Member, GatewayError> {
        let url = self.members_url(Some(id))?;
        let req = self
            .client
            .put(url.clone())
            .json(&UpdateMemberReq::from(patch));
        let response = self.execute(Method::PUT, url, req).await?;
        let dto: MemberDto = Self::decode(response, Some(id)).await?;
        Member::try_from(dto)
    }
}
