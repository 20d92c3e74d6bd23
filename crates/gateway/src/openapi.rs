//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use auth_service_lib::LoginResponse;
use domain::{
    CandidateApplicationResponse, CandidateResponse, CompanyResponse, Education, Experience,
    JobResponse, PrincipalResponse, SubmittedApplicationResponse,
};

use crate::handlers::auth_handler::{
    EmailRequest, LoginRequest, RegisterRequest, ResetPasswordRequest, VerifyEmailRequest,
};
use crate::handlers::envelope::{
    ApplicantsPage, ApplicationsPage, CandidatesPage, CompaniesPage, JobsPage,
};
use crate::handlers::health_handler::{HealthResponse, StoreHealth};
use crate::handlers::job_handler::{ApplicationReceipt, CreateJobRequest};
use crate::handlers::MessageResponse;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health_handler::health_check,
        crate::handlers::auth_handler::register,
        crate::handlers::auth_handler::verify_email,
        crate::handlers::auth_handler::resend_code,
        crate::handlers::auth_handler::forgot_password,
        crate::handlers::auth_handler::reset_password,
        crate::handlers::auth_handler::login,
        crate::handlers::auth_handler::login_company,
        crate::handlers::auth_handler::me,
        crate::handlers::job_handler::search_jobs,
        crate::handlers::job_handler::list_jobs,
        crate::handlers::job_handler::create_job,
        crate::handlers::job_handler::toggle_job_status,
        crate::handlers::job_handler::apply_to_job,
        crate::handlers::job_handler::job_candidates,
        crate::handlers::company_handler::list_companies,
        crate::handlers::company_handler::company_candidates,
        crate::handlers::user_handler::list_candidates,
        crate::handlers::user_handler::my_applications,
    ),
    components(
        schemas(
            RegisterRequest,
            VerifyEmailRequest,
            EmailRequest,
            ResetPasswordRequest,
            LoginRequest,
            LoginResponse,
            MessageResponse,
            PrincipalResponse,
            CreateJobRequest,
            ApplicationReceipt,
            JobResponse,
            CompanyResponse,
            CandidateResponse,
            Experience,
            Education,
            CandidateApplicationResponse,
            SubmittedApplicationResponse,
            JobsPage,
            CompaniesPage,
            CandidatesPage,
            ApplicantsPage,
            ApplicationsPage,
            HealthResponse,
            StoreHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and store connectivity"),
        (name = "Authentication", description = "Logins, sign-up and account codes"),
        (name = "Jobs", description = "Job search, management and applications"),
        (name = "Companies", description = "Company listings and applicants"),
        (name = "Candidates", description = "Candidate listings and applications"),
    )
)]
pub struct ApiDoc;

/// Bearer JWT scheme referenced by the protected paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
