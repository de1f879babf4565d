use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, trace};

use crate::api::services::{ApiResponse, ErrorCode};
use crate::storage::{IndexState, SeaOrmStorage};

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthStorageCheck {
    pub status: String,
    pub backend: String,
    pub range_count: Option<u64>,
    pub index_state: String,
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: u32,
    pub storage: HealthStorageCheck,
    pub response_time_ms: u32,
}

/// Health Service
///
/// 直接调用 storage 方法：健康检查是基础设施，
/// k8s probes 要求快速响应，不应依赖业务逻辑。
pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        storage: web::Data<Arc<SeaOrmStorage>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        let start_time = Instant::now();
        trace!("Received health check request");

        let index_state = match storage.state() {
            IndexState::Ready => "ready",
            IndexState::Empty => "empty",
        };

        // 只查 count，不加载数据
        let storage_status = match tokio::time::timeout(Duration::from_secs(5), storage.count())
            .await
        {
            Ok(Ok(count)) => {
                trace!("Storage health check passed, {} ranges found", count);
                HealthStorageCheck {
                    status: "healthy".to_string(),
                    backend: storage.backend_name().to_string(),
                    range_count: Some(count),
                    index_state: index_state.to_string(),
                    error: None,
                }
            }
            Ok(Err(e)) => {
                error!("Storage health check failed: {}", e);
                HealthStorageCheck {
                    status: "unhealthy".to_string(),
                    backend: storage.backend_name().to_string(),
                    range_count: None,
                    index_state: index_state.to_string(),
                    error: Some(format!("database error: {}", e)),
                }
            }
            Err(_) => {
                error!("Storage health check timeout");
                HealthStorageCheck {
                    status: "unhealthy".to_string(),
                    backend: storage.backend_name().to_string(),
                    range_count: None,
                    index_state: index_state.to_string(),
                    error: Some("timeout".to_string()),
                }
            }
        };

        let now = chrono::Utc::now();
        let uptime_seconds = (now - app_start_time.start_datetime).num_seconds().max(0) as u32;
        let is_healthy = storage_status.status == "healthy";

        let health_data = HealthResponse {
            status: if is_healthy {
                "healthy".to_string()
            } else {
                "unhealthy".to_string()
            },
            timestamp: now.to_rfc3339(),
            uptime: uptime_seconds,
            storage: storage_status,
            response_time_ms: start_time.elapsed().as_millis() as u32,
        };

        let (code, message, status) = if is_healthy {
            (ErrorCode::Success, "OK", actix_web::http::StatusCode::OK)
        } else {
            (
                ErrorCode::ServiceUnavailable,
                "Service Unavailable",
                actix_web::http::StatusCode::SERVICE_UNAVAILABLE,
            )
        };

        info!(
            "Health check completed in {:?}, status: {}, uptime: {}s",
            start_time.elapsed(),
            if is_healthy { "healthy" } else { "unhealthy" },
            uptime_seconds
        );

        HttpResponse::build(status)
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(ApiResponse {
                code: code as i32,
                message: message.to_string(),
                data: Some(health_data),
            })
    }

    // 就绪检查：索引 Ready 才算就绪，装载期间返回 503
    pub async fn readiness_check(storage: web::Data<Arc<SeaOrmStorage>>) -> impl Responder {
        trace!("Received readiness check request");

        match storage.state() {
            IndexState::Ready => HttpResponse::Ok()
                .append_header(("Content-Type", "text/plain"))
                .body("OK"),
            IndexState::Empty => HttpResponse::ServiceUnavailable()
                .append_header(("Content-Type", "text/plain"))
                .body("range index not loaded"),
        }
    }

    // 活跃性检查，检查基本服务可用性
    pub async fn liveness_check() -> impl Responder {
        trace!("Received liveness check request");

        HttpResponse::NoContent().finish()
    }
}

/// Health 路由配置
pub fn health_routes() -> actix_web::Scope {
    web::scope("")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
        .route("/ready", web::get().to(HealthService::readiness_check))
        .route("/ready", web::head().to(HealthService::readiness_check))
        .route("/live", web::get().to(HealthService::liveness_check))
        .route("/live", web::head().to(HealthService::liveness_check))
}
