// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Admin ---
        handlers::admin::create_company,
        handlers::admin::list_companies,
        handlers::admin::get_company,
        handlers::admin::update_company,
        handlers::admin::create_psychologist,
        handlers::admin::list_psychologists,
        handlers::admin::get_psychologist,
        handlers::admin::update_psychologist,
        handlers::admin::list_prompts,
        handlers::admin::create_prompt,
        handlers::admin::update_prompt,
        handlers::admin::activate_prompt,

        // --- Company ---
        handlers::company::create_department,
        handlers::company::list_departments,
        handlers::company::update_department,
        handlers::company::delete_department,
        handlers::company::list_employees,
        handlers::company::link_employee,
        handlers::company::unlink_employee,
        handlers::company::set_employee_license_status,
        handlers::company::create_license,
        handlers::company::list_licenses,
        handlers::company::activate_license,
        handlers::company::create_activity,
        handlers::company::list_activities,
        handlers::company::update_activity,
        handlers::company::transition_activity,
        handlers::company::register_participant,
        handlers::company::mark_attendance,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::get_departments,

        // --- Reports ---
        handlers::reports::validate_draft,
        handlers::reports::generate_report,
        handlers::reports::list_reports,
        handlers::reports::get_report,
        handlers::reports::download_report_pdf,

        // --- Notifications ---
        handlers::notifications::list_notifications,
        handlers::notifications::invite_psychologist,
        handlers::notifications::invite_patient,
        handlers::notifications::respond_company_invite,
        handlers::notifications::respond_patient_invite,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Company ---
            models::company::Company,
            models::company::Department,
            models::company::UserProfile,
            models::company::LicenseStatus,
            models::company::License,
            models::company::Psychologist,

            // --- Activities ---
            models::activity::ActivityType,
            models::activity::ActivityStatus,
            models::activity::CompanyActivity,
            models::activity::ActivityParticipant,

            // --- Reports ---
            models::report::ReportType,
            models::report::WizardStep,
            models::report::AppUsageEstimates,
            models::report::ActivityTypeCount,
            models::report::ReportMetrics,
            models::report::DepartmentEngagement,
            models::report::ComplianceReport,
            models::report::ReportDraft,

            // --- Dashboard ---
            models::dashboard::CompanyDashboardSummary,
            models::dashboard::DepartmentDashboard,

            // --- Prompts ---
            models::prompt::AiPrompt,
            models::prompt::CreatePromptPayload,
            models::prompt::UpdatePromptPayload,

            // --- Notifications ---
            models::notification::InviteStatus,
            models::notification::NotificationKind,
            models::notification::Notification,
            models::notification::CompanyPsychologistLink,
            models::notification::PsychologistPatientLink,

            // --- Payloads ---
            handlers::admin::CreateCompanyPayload,
            handlers::admin::UpdateCompanyPayload,
            handlers::admin::CreatePsychologistPayload,
            handlers::admin::UpdatePsychologistPayload,
            handlers::company::CreateDepartmentPayload,
            handlers::company::UpdateDepartmentPayload,
            handlers::company::LinkEmployeePayload,
            handlers::company::LicenseStatusPayload,
            handlers::company::CreateLicensePayload,
            handlers::company::CreateActivityPayload,
            handlers::company::UpdateActivityPayload,
            handlers::company::TransitionActivityPayload,
            handlers::company::ParticipantPayload,
            handlers::company::AttendancePayload,
            handlers::notifications::InvitePsychologistPayload,
            handlers::notifications::InvitePatientPayload,
            handlers::notifications::RespondInvitePayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário"),
        (name = "Admin", description = "Gestão da Plataforma (Empresas, Psicólogos e Prompts)"),
        (name = "Company", description = "Gestão da Empresa (Departamentos, Colaboradores, Licenças e Atividades)"),
        (name = "Dashboard", description = "Indicadores da Empresa"),
        (name = "Reports", description = "Relatórios de Conformidade (Lei 14.831 / NR-1)"),
        (name = "Notifications", description = "Convites e Notificações")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
