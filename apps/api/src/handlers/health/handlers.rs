use super::checks::check_postgres;
use super::*;

pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = if state.postgres_pool.is_some() {
        "postgres"
    } else {
        "in_memory"
    };
    let postgres = check_postgres(state.postgres_pool.clone()).await;

    let ready = postgres.status != "error";
    let status = if ready { "ok" } else { "degraded" };
    let http_status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        http_status,
        Json(HealthResponse {
            status,
            ready,
            storage,
            postgres,
        }),
    )
}
