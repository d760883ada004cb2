// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        ActivityRepository, CompanyRepository, NotificationRepository, PromptRepository,
        PsychologistRepository, ReportRepository, UserRepository,
    },
    services::{
        AuthService, CompanyService, DashboardService, DocumentService, InsightService,
        MetricsService, NotificationService, PromptService, PsychologistService, ReportService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub bind_addr: String,
    pub auth_service: AuthService,
    pub company_service: CompanyService,
    pub psychologist_service: PsychologistService,
    pub report_service: ReportService,
    pub prompt_service: PromptService,
    pub notification_service: NotificationService,
    pub dashboard_service: DashboardService,
    // O middleware de empresa consulta company_admins direto no repo
    pub company_repo: CompanyRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        let storage_dir = env::var("STORAGE_DIR").unwrap_or_else(|_| "./storage".to_string());
        let fonts_dir = env::var("FONTS_DIR").unwrap_or_else(|_| "./fonts".to_string());
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let company_repo = CompanyRepository::new(db_pool.clone());
        let psychologist_repo = PsychologistRepository::new(db_pool.clone());
        let activity_repo = ActivityRepository::new(db_pool.clone());
        let report_repo = ReportRepository::new(db_pool.clone());
        let prompt_repo = PromptRepository::new(db_pool.clone());
        let notification_repo = NotificationRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            company_repo.clone(),
            jwt_secret,
            db_pool.clone(),
        );
        let company_service = CompanyService::new(
            company_repo.clone(),
            activity_repo.clone(),
            db_pool.clone(),
        );
        let psychologist_service =
            PsychologistService::new(psychologist_repo.clone(), db_pool.clone());

        let metrics_service = MetricsService::new(report_repo.clone(), db_pool.clone());
        let insight_service = InsightService::new(prompt_repo.clone());
        let document_service = DocumentService::new(fonts_dir);
        let report_service = ReportService::new(
            report_repo.clone(),
            company_repo.clone(),
            metrics_service,
            insight_service,
            document_service,
            storage_dir,
        );

        let prompt_service = PromptService::new(prompt_repo, db_pool.clone());
        let notification_service = NotificationService::new(
            notification_repo,
            company_repo.clone(),
            psychologist_repo,
            db_pool.clone(),
        );
        let dashboard_service = DashboardService::new(report_repo, db_pool.clone());

        Ok(Self {
            db_pool,
            bind_addr,
            auth_service,
            company_service,
            psychologist_service,
            report_service,
            prompt_service,
            notification_service,
            dashboard_service,
            company_repo,
        })
    }
}
