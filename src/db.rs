pub mod user_repo;
pub use user_repo::UserRepository;
pub mod company_repo;
pub use company_repo::CompanyRepository;
pub mod psychologist_repo;
pub use psychologist_repo::PsychologistRepository;
pub mod activity_repo;
pub use activity_repo::ActivityRepository;
pub mod report_repo;
pub use report_repo::ReportRepository;
pub mod prompt_repo;
pub use prompt_repo::PromptRepository;
pub mod notification_repo;
pub use notification_repo::NotificationRepository;
