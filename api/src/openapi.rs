use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hackathon Registration API",
        version = "0.1.0",
        description = "Team registration, payment verification and gate check-in",
        license(name = "MIT"),
    ),
    paths(
        crate::routers::root::health_get,
        crate::routers::auth::register_post,
        crate::routers::auth::send_verification_otp_post,
        crate::routers::auth::verify_email_otp_post,
        crate::routers::auth::login_post,
        crate::routers::auth::request_password_reset_post,
        crate::routers::auth::verify_reset_otp_post,
        crate::routers::auth::change_password_post,
        crate::routers::team::team_get,
        crate::routers::team::team_update_post,
        crate::routers::payment::payment_upload_post,
        crate::routers::admin::admin_login_post,
        crate::routers::admin::admin_data_get,
        crate::routers::admin::admin_update_team_post,
        crate::routers::admin::verify_payment_post,
        crate::routers::admin::attendance_get,
        crate::routers::admin::attendance_mark_post,
    ),
    components(
        schemas(
            models::schemas::team::TeamSchema,
            models::schemas::team::MemberSchema,
            models::schemas::team::DashboardSchema,
            models::schemas::team::TeamWithMembersSchema,
            models::schemas::team::RegisteredTeamSchema,
            models::schemas::team::TeamSummarySchema,
            models::schemas::team::LoginSchema,
            models::schemas::team::AdminLoginSchema,
            models::schemas::attendance::AttendanceSchema,
            models::schemas::attendance::MarkAttendanceSchema,
            models::schemas::attendance::QrPayload,
            models::schemas::attendance::PaymentVerifiedSchema,
            models::params::team::MemberParams,
            models::params::team::RegisterTeamParams,
            models::params::team::LoginParams,
            models::params::team::UpdateMembersParams,
            models::params::team::ChangePasswordParams,
            models::params::otp::SendVerificationOtpParams,
            models::params::otp::VerifyEmailOtpParams,
            models::params::otp::RequestPasswordResetParams,
            models::params::otp::VerifyResetOtpParams,
            models::params::admin::AdminLoginParams,
            models::params::admin::AdminUpdateTeamParams,
            models::params::admin::VerifyPaymentParams,
            models::params::admin::MarkAttendanceParams,
            models::domains::sea_orm_active_enums::MemberRole,
            models::domains::sea_orm_active_enums::TeamStatus,
            models::domains::sea_orm_active_enums::AttendanceStatus,
            crate::routers::payment::PaymentUploadForm,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Liveness"),
        (name = "auth", description = "Registration, login and OTP flows"),
        (name = "team", description = "Team dashboard"),
        (name = "payment", description = "Payment proof upload"),
        (name = "admin", description = "Administration and gate check-in"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Team or admin token from the login endpoints"))
                        .build(),
                ),
            );
        }
    }
}
