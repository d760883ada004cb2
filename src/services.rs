pub mod auth;
pub use auth::AuthService;
pub mod company_service;
pub use company_service::CompanyService;
pub mod psychologist_service;
pub use psychologist_service::PsychologistService;
pub mod scoring;
pub mod metrics_service;
pub use metrics_service::MetricsService;
pub mod insights;
pub use insights::InsightService;
pub mod document_service;
pub use document_service::DocumentService;
pub mod report_service;
pub use report_service::ReportService;
pub mod prompt_service;
pub use prompt_service::PromptService;
pub mod notification_service;
pub use notification_service::NotificationService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
