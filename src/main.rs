//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::{admin_middleware, auth_middleware};
use crate::middleware::company::company_middleware;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas do usuário autenticado
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    // Rotas do admin da plataforma
    let admin_routes = Router::new()
        .route(
            "/companies",
            post(handlers::admin::create_company).get(handlers::admin::list_companies),
        )
        .route(
            "/companies/{company_id}",
            get(handlers::admin::get_company).put(handlers::admin::update_company),
        )
        .route(
            "/psychologists",
            post(handlers::admin::create_psychologist).get(handlers::admin::list_psychologists),
        )
        .route(
            "/psychologists/{psychologist_id}",
            get(handlers::admin::get_psychologist).put(handlers::admin::update_psychologist),
        )
        .route(
            "/prompts",
            post(handlers::admin::create_prompt).get(handlers::admin::list_prompts),
        )
        .route("/prompts/{prompt_id}", put(handlers::admin::update_prompt))
        .route(
            "/prompts/{prompt_id}/activate",
            post(handlers::admin::activate_prompt),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            admin_middleware,
        ));

    // Rotas da empresa (exigem x-company-id + vínculo em company_admins)
    let company_routes = Router::new()
        .route(
            "/departments",
            post(handlers::company::create_department).get(handlers::company::list_departments),
        )
        .route(
            "/departments/{department_id}",
            put(handlers::company::update_department).delete(handlers::company::delete_department),
        )
        .route("/employees", get(handlers::company::list_employees))
        .route("/employees/link", post(handlers::company::link_employee))
        .route(
            "/employees/{profile_id}/unlink",
            post(handlers::company::unlink_employee),
        )
        .route(
            "/employees/{profile_id}/license-status",
            put(handlers::company::set_employee_license_status),
        )
        .route(
            "/licenses",
            post(handlers::company::create_license).get(handlers::company::list_licenses),
        )
        .route(
            "/licenses/{license_id}/activate",
            post(handlers::company::activate_license),
        )
        .route(
            "/activities",
            post(handlers::company::create_activity).get(handlers::company::list_activities),
        )
        .route(
            "/activities/{activity_id}",
            put(handlers::company::update_activity),
        )
        .route(
            "/activities/{activity_id}/transition",
            post(handlers::company::transition_activity),
        )
        .route(
            "/activities/{activity_id}/participants",
            post(handlers::company::register_participant),
        )
        .route(
            "/activities/{activity_id}/attendance",
            put(handlers::company::mark_attendance),
        )
        .route("/dashboard/summary", get(handlers::dashboard::get_summary))
        .route(
            "/dashboard/departments",
            get(handlers::dashboard::get_departments),
        )
        .route(
            "/reports",
            post(handlers::reports::generate_report).get(handlers::reports::list_reports),
        )
        .route(
            "/reports/validate",
            post(handlers::reports::validate_draft),
        )
        .route("/reports/{report_id}", get(handlers::reports::get_report))
        .route(
            "/reports/{report_id}/pdf",
            get(handlers::reports::download_report_pdf),
        )
        .route(
            "/invites/psychologists",
            post(handlers::notifications::invite_psychologist),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            company_middleware,
        ));

    // Convites e notificações do usuário (psicólogo ou colaborador)
    let invite_routes = Router::new()
        .route(
            "/patients",
            post(handlers::notifications::invite_patient),
        )
        .route(
            "/company/{invite_id}/respond",
            post(handlers::notifications::respond_company_invite),
        )
        .route(
            "/patient/{invite_id}/respond",
            post(handlers::notifications::respond_patient_invite),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let notification_routes = Router::new()
        .route("/", get(handlers::notifications::list_notifications))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/company", company_routes)
        .nest("/api/invites", invite_routes)
        .nest("/api/notifications", notification_routes)
        .with_state(app_state.clone());

    // Inicia o servidor
    let listener = TcpListener::bind(&app_state.bind_addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
