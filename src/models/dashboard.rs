// src/models/dashboard.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::report::DepartmentEngagement;

// Resumo do painel da empresa: agregados medidos, sem valores simulados.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDashboardSummary {
    pub total_employees: i64,
    pub licensed_employees: i64,
    pub active_departments: i64,
    pub planned_activities: i64,
    pub in_progress_activities: i64,
    pub completed_activities: i64,
    // Participantes distintos / colaboradores, em %
    pub engagement_rate: i64,
    pub average_satisfaction: f64,
}

// Painel por departamento (mesma agregação usada no relatório)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDashboard {
    pub departments: Vec<DepartmentEngagement>,
}
