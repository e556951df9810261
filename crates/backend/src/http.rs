use std::time::Duration;

use async_trait::async_trait;
use csr_core::model::program::{
    Certificate, Checkpoint, CheckpointNotes, Partner, Program, ProgramInput, ProgramMetrics,
    ProgramSchool, Report, ReportFormat, ReportPreview, School, SchoolStatus,
};
use csr_core::model::{CertificateId, ProgramId, ReportId, SchoolId};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::api::{
    AssignSchoolRequest, BulkAssignRequest, BulkCertificateRequest, BulkUpdate, CertificateMark,
    CertificateQuery, ProgramAdminApi, ProgramQuery, SchoolStatusRequest,
};
use crate::envelope::{Envelope, ErrorBody, Page};
use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct HttpConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// `ProgramAdminApi` over HTTP/JSON.
#[derive(Clone)]
pub struct HttpProgramApi {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl HttpProgramApi {
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` for a malformed base URL, or
    /// `ApiError::Http` if the client cannot be built.
    pub fn new(config: HttpConfig) -> Result<Self, ApiError> {
        let base = Url::parse(config.base_url.trim())?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base,
            token: config.token.filter(|t| !t.trim().is_empty()),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `base` + `admin/` + segments, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push("admin")
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "admin api request");
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn checked(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.bytes().await.unwrap_or_default();
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or_default();
        let message = if message.is_empty() {
            status.canonical_reason().unwrap_or_default().to_string()
        } else {
            message
        };
        warn!(status = status.as_u16(), %message, "admin api error response");
        Err(ApiError::from_status(status.as_u16(), message))
    }

    async fn envelope<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Envelope<T>, ApiError> {
        let response = Self::checked(builder.send().await?).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn data<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        Ok(self.envelope(builder).await?.data)
    }

    async fn page<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<Page<T>, ApiError> {
        Ok(Page::from_envelope(self.envelope(builder).await?))
    }

    async fn empty(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        Self::checked(builder.send().await?).await?;
        Ok(())
    }
}

#[async_trait]
impl ProgramAdminApi for HttpProgramApi {
    async fn list_partners(&self) -> Result<Vec<Partner>, ApiError> {
        let url = self.endpoint(&["partners"])?;
        self.data(self.request(Method::GET, url)).await
    }

    async fn list_programs(&self, query: &ProgramQuery) -> Result<Page<Program>, ApiError> {
        let url = self.endpoint(&["programs"])?;
        self.page(self.request(Method::GET, url).query(&query.to_pairs()))
            .await
    }

    async fn create_program(&self, input: &ProgramInput) -> Result<Program, ApiError> {
        let url = self.endpoint(&["programs"])?;
        self.data(self.request(Method::POST, url).json(input)).await
    }

    async fn get_program(&self, id: &ProgramId) -> Result<Program, ApiError> {
        let url = self.endpoint(&["programs", id.as_str()])?;
        self.data(self.request(Method::GET, url)).await
    }

    async fn update_program(
        &self,
        id: &ProgramId,
        input: &ProgramInput,
    ) -> Result<Program, ApiError> {
        let url = self.endpoint(&["programs", id.as_str()])?;
        self.data(self.request(Method::PUT, url).json(input)).await
    }

    async fn archive_program(&self, id: &ProgramId) -> Result<Program, ApiError> {
        let url = self.endpoint(&["programs", id.as_str(), "archive"])?;
        self.data(self.request(Method::PATCH, url)).await
    }

    async fn delete_program(&self, id: &ProgramId) -> Result<(), ApiError> {
        let url = self.endpoint(&["programs", id.as_str(), "permanent"])?;
        self.empty(self.request(Method::DELETE, url)).await
    }

    async fn list_program_schools(&self, id: &ProgramId) -> Result<Vec<ProgramSchool>, ApiError> {
        let url = self.endpoint(&["programs", id.as_str(), "schools"])?;
        self.data(self.request(Method::GET, url)).await
    }

    async fn list_available_schools(&self, search: Option<&str>) -> Result<Vec<School>, ApiError> {
        let url = self.endpoint(&["schools"])?;
        let mut builder = self.request(Method::GET, url);
        if let Some(search) = search.map(str::trim).filter(|s| !s.is_empty()) {
            builder = builder.query(&[("search", search)]);
        }
        self.data(builder).await
    }

    async fn assign_school(
        &self,
        id: &ProgramId,
        school: &SchoolId,
    ) -> Result<ProgramSchool, ApiError> {
        let url = self.endpoint(&["programs", id.as_str(), "schools"])?;
        let body = AssignSchoolRequest {
            school_id: school.clone(),
        };
        self.data(self.request(Method::POST, url).json(&body)).await
    }

    async fn assign_schools(
        &self,
        id: &ProgramId,
        schools: &[SchoolId],
    ) -> Result<Vec<ProgramSchool>, ApiError> {
        let url = self.endpoint(&["programs", id.as_str(), "schools", "bulk"])?;
        let body = BulkAssignRequest {
            school_ids: schools.to_vec(),
        };
        self.data(self.request(Method::POST, url).json(&body)).await
    }

    async fn remove_school(&self, id: &ProgramId, school: &SchoolId) -> Result<(), ApiError> {
        let url = self.endpoint(&["programs", id.as_str(), "schools", school.as_str()])?;
        self.empty(self.request(Method::DELETE, url)).await
    }

    async fn update_school_status(
        &self,
        id: &ProgramId,
        school: &SchoolId,
        status: SchoolStatus,
    ) -> Result<ProgramSchool, ApiError> {
        let url = self.endpoint(&[
            "programs",
            id.as_str(),
            "schools",
            school.as_str(),
            "status",
        ])?;
        let body = SchoolStatusRequest { status };
        self.data(self.request(Method::PATCH, url).json(&body)).await
    }

    async fn list_checkpoints(&self, id: &ProgramId) -> Result<Vec<Checkpoint>, ApiError> {
        let url = self.endpoint(&["programs", id.as_str(), "checkpoints"])?;
        self.data(self.request(Method::GET, url)).await
    }

    async fn trigger_checkpoint(
        &self,
        id: &ProgramId,
        number: u8,
    ) -> Result<Checkpoint, ApiError> {
        let number = number.to_string();
        let url = self.endpoint(&["programs", id.as_str(), "checkpoints", &number, "trigger"])?;
        self.data(self.request(Method::POST, url)).await
    }

    async fn update_checkpoint_notes(
        &self,
        id: &ProgramId,
        number: u8,
        notes: &CheckpointNotes,
    ) -> Result<Checkpoint, ApiError> {
        let number = number.to_string();
        let url = self.endpoint(&["programs", id.as_str(), "checkpoints", &number, "notes"])?;
        self.data(self.request(Method::PATCH, url).json(notes)).await
    }

    async fn get_metrics(&self, id: &ProgramId) -> Result<ProgramMetrics, ApiError> {
        let url = self.endpoint(&["programs", id.as_str(), "metrics"])?;
        self.data(self.request(Method::GET, url)).await
    }

    async fn refresh_metrics(&self, id: &ProgramId) -> Result<ProgramMetrics, ApiError> {
        let url = self.endpoint(&["programs", id.as_str(), "metrics", "refresh"])?;
        self.data(self.request(Method::POST, url)).await
    }

    async fn list_certificates(
        &self,
        id: &ProgramId,
        query: &CertificateQuery,
    ) -> Result<Page<Certificate>, ApiError> {
        let url = self.endpoint(&["programs", id.as_str(), "certificates"])?;
        self.page(self.request(Method::GET, url).query(&query.to_pairs()))
            .await
    }

    async fn mark_certificate(
        &self,
        id: &ProgramId,
        certificate: &CertificateId,
        mark: CertificateMark,
    ) -> Result<Certificate, ApiError> {
        let url = self.endpoint(&[
            "programs",
            id.as_str(),
            "certificates",
            certificate.as_str(),
            mark.path_segment(),
        ])?;
        self.data(self.request(Method::PATCH, url)).await
    }

    async fn mark_certificates(
        &self,
        id: &ProgramId,
        certificates: &[CertificateId],
        mark: CertificateMark,
    ) -> Result<BulkUpdate, ApiError> {
        let url = self.endpoint(&[
            "programs",
            id.as_str(),
            "certificates",
            "bulk",
            mark.path_segment(),
        ])?;
        let body = BulkCertificateRequest {
            certificate_ids: certificates.to_vec(),
        };
        self.data(self.request(Method::POST, url).json(&body)).await
    }

    async fn list_reports(&self, id: &ProgramId) -> Result<Vec<Report>, ApiError> {
        let url = self.endpoint(&["programs", id.as_str(), "reports"])?;
        self.data(self.request(Method::GET, url)).await
    }

    async fn preview_report(
        &self,
        id: &ProgramId,
        report: &ReportId,
    ) -> Result<ReportPreview, ApiError> {
        let url = self.endpoint(&["programs", id.as_str(), "reports", report.as_str(), "preview"])?;
        self.data(self.request(Method::GET, url)).await
    }

    async fn publish_report(&self, id: &ProgramId, report: &ReportId) -> Result<Report, ApiError> {
        let url = self.endpoint(&["programs", id.as_str(), "reports", report.as_str(), "publish"])?;
        self.data(self.request(Method::POST, url)).await
    }

    async fn download_report(
        &self,
        id: &ProgramId,
        report: &ReportId,
        format: ReportFormat,
    ) -> Result<Vec<u8>, ApiError> {
        let url = self.endpoint(&[
            "programs",
            id.as_str(),
            "reports",
            report.as_str(),
            "download",
        ])?;
        let builder = self
            .request(Method::GET, url)
            .query(&[("format", format.as_str())]);
        let response = Self::checked(builder.send().await?).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpProgramApi {
        HttpProgramApi::new(HttpConfig {
            base_url: base.into(),
            ..HttpConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn endpoint_appends_admin_segments() {
        let url = api("http://localhost:5000/api")
            .endpoint(&["programs", "p 1", "schools"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/admin/programs/p%201/schools");
    }

    #[test]
    fn trailing_slash_in_base_is_tolerated() {
        let url = api("http://example.test/api/").endpoint(&["partners"]).unwrap();
        assert_eq!(url.as_str(), "http://example.test/api/admin/partners");
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        let result = HttpProgramApi::new(HttpConfig {
            base_url: "not a url".into(),
            ..HttpConfig::default()
        });
        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn blank_token_is_ignored() {
        let api = HttpProgramApi::new(HttpConfig {
            token: Some("  ".into()),
            ..HttpConfig::default()
        })
        .unwrap();
        assert!(api.token.is_none());
    }
}
