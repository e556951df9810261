//! Gateway to the admin HTTP API.
//!
//! `ProgramAdminApi` is the seam: `HttpProgramApi` talks to the real backend,
//! `InMemoryProgramApi` stands in for it in tests and offline mode.

mod api;
mod envelope;
mod error;
mod http;
mod memory;

pub use api::{
    AssignSchoolRequest, BulkAssignRequest, BulkCertificateRequest, BulkUpdate, CertificateMark,
    CertificateQuery, DEFAULT_CERTIFICATE_PAGE_SIZE, DEFAULT_PROGRAM_PAGE_SIZE, ProgramAdminApi,
    ProgramQuery, SchoolStatusRequest,
};
pub use envelope::{Envelope, ErrorBody, Page, Pagination};
pub use error::ApiError;
pub use http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HttpConfig, HttpProgramApi};
pub use memory::InMemoryProgramApi;
