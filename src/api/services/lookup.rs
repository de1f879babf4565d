use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use tracing::{debug, error, trace};

use crate::api::services::{ApiResponse, ErrorCode};
use crate::config::get_config;
use crate::storage::{IpRange, SeaOrmStorage};
use crate::utils::to_precision_string;

pub struct LookupService;

impl LookupService {
    /// GET /locate/{ip}
    ///
    /// 三种互不混淆的结果：
    /// - 400 InvalidAddress：字面量无法解析（客户端错误）；
    /// - 404 NotFound：地址合法但没有覆盖它的区间（正常结果）；
    /// - 200：命中的区间记录。
    pub async fn locate(
        path: web::Path<String>,
        storage: web::Data<Arc<SeaOrmStorage>>,
    ) -> impl Responder {
        let literal = path.into_inner();
        trace!("Received locate request for '{}'", literal);

        // 查询路径与装载路径共用同一个规范化函数
        let addr_int = match to_precision_string(&literal) {
            Ok(addr_int) => addr_int,
            Err(e) => {
                debug!("Rejecting unparsable address '{}': {}", literal, e);
                return Self::invalid_address_response(&literal);
            }
        };

        let timeout = Duration::from_millis(get_config().storage.query_timeout_ms);
        match tokio::time::timeout(timeout, storage.locate(&addr_int)).await {
            Ok(Ok(Some(range))) => Self::found_response(range),
            Ok(Ok(None)) => {
                debug!("No covering range for '{}'", literal);
                Self::not_found_response(&literal)
            }
            Ok(Err(e)) => {
                error!("Database error during range lookup: {}", e);
                Self::error_response()
            }
            Err(_) => {
                error!("Range lookup for '{}' timed out after {:?}", literal, timeout);
                Self::timeout_response()
            }
        }
    }

    #[inline]
    fn found_response(range: IpRange) -> HttpResponse {
        HttpResponse::Ok().json(ApiResponse::ok(range))
    }

    #[inline]
    fn invalid_address_response(literal: &str) -> HttpResponse {
        HttpResponse::build(StatusCode::BAD_REQUEST).json(ApiResponse::<IpRange>::error(
            ErrorCode::InvalidAddress,
            format!("'{}' is not a valid IPv4/IPv6 address", literal),
        ))
    }

    #[inline]
    fn not_found_response(literal: &str) -> HttpResponse {
        HttpResponse::build(StatusCode::NOT_FOUND).json(ApiResponse::<IpRange>::error(
            ErrorCode::NotFound,
            format!("no range covers '{}'", literal),
        ))
    }

    #[inline]
    fn error_response() -> HttpResponse {
        HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR).json(
            ApiResponse::<IpRange>::error(ErrorCode::InternalServerError, "Internal Server Error"),
        )
    }

    #[inline]
    fn timeout_response() -> HttpResponse {
        HttpResponse::build(StatusCode::SERVICE_UNAVAILABLE).json(ApiResponse::<IpRange>::error(
            ErrorCode::ServiceUnavailable,
            "lookup timed out",
        ))
    }
}

/// Lookup 路由配置
pub fn lookup_routes() -> actix_web::Scope {
    web::scope("")
        .route("/locate/{ip}", web::get().to(LookupService::locate))
        .route("/locate/{ip}", web::head().to(LookupService::locate))
}
