use naviswork_shared::protocol::ApiEnvelope;
use naviswork_shared::route::GateDecision;
use naviswork_shared::{ACCESS_TOKEN_KEY, API_PREFIX};
use worker::*;

// =========================================================
// 跨平台日志宏
// =========================================================

#[cfg(target_arch = "wasm32")]
macro_rules! log_info {
    ($($t:tt)*) => (worker::console_log!($($t)*))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_info {
    ($($t:tt)*) => (println!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_error {
    ($($t:tt)*) => (worker::console_error!($($t)*))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_error {
    ($($t:tt)*) => (eprintln!($($t)*))
}

pub mod error;
pub mod gate;
pub mod proxy;
pub mod request;

use error::{GateError, GateResult};
use gate::NavigationGate;
use proxy::BackendProxy;
use request::{HttpMethod, HttpRequest, HttpResponse, WorkerHttpClient};

// =========================================================
// 动态运行时配置 (Runtime Configuration)
// =========================================================

/// 如果 wrangler.toml 的 [vars] 中没有定义，则使用这些值
const DEFAULT_ASSETS_BINDING: &str = "ASSETS";

/// 运行时配置结构体
/// 负责从 Env 中读取 [vars]
struct RuntimeConfig {
    auth_cookie_name: String,
    /// 未配置时 `/api` 返回 502
    backend_origin: Option<String>,
    assets_binding: String,
}

impl RuntimeConfig {
    fn new(env: &Env) -> Self {
        Self {
            auth_cookie_name: env
                .var("AUTH_COOKIE_NAME")
                .map(|v| v.to_string())
                .unwrap_or_else(|_| ACCESS_TOKEN_KEY.to_string()),

            backend_origin: env
                .var("BACKEND_ORIGIN")
                .map(|v| v.to_string())
                .ok()
                .filter(|v| !v.trim().is_empty()),

            assets_binding: env
                .var("ASSETS_BINDING")
                .map(|v| v.to_string())
                .unwrap_or_else(|_| DEFAULT_ASSETS_BINDING.to_string()),
        }
    }
}

// =========================================================
// 响应映射
// =========================================================

/// 错误响应与后端信封同形，前端按 `message` 展示
fn map_error_to_response(e: GateError) -> Result<Response> {
    let status = e.status_code();
    if status >= 500 {
        log_error!("[Gate] {} {}", e.error_code(), e);
    }
    let body = ApiEnvelope::<()> {
        success: false,
        result: None,
        message: Some(e.to_string()),
    };
    Ok(Response::from_json(&body)?.with_status(status))
}

fn into_worker_response(resp: HttpResponse) -> Result<Response> {
    let headers = Headers::new();
    for (name, value) in &resp.headers {
        headers.append(name, value)?;
    }
    Ok(Response::from_bytes(resp.body)?
        .with_status(resp.status)
        .with_headers(headers))
}

/// 浏览器请求 → 转发用请求（url 只保留 path + query）
async fn incoming_request(req: &mut Request, url: &Url) -> GateResult<HttpRequest> {
    let method = HttpMethod::try_from(req.method())
        .map_err(|m| GateError::UnsupportedMethod(format!("{:?}", m)))?;

    let mut target = url.path().to_string();
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }

    let mut forwarded = HttpRequest::new(&target, method);
    for (name, value) in req.headers().entries() {
        forwarded = forwarded.with_header(&name, &value);
    }
    if method.allows_body() {
        let body = req.bytes().await?;
        if !body.is_empty() {
            forwarded = forwarded.with_body(body);
        }
    }
    Ok(forwarded)
}

// =========================================================
// 控制器层 (Entry Points)
// =========================================================

async fn forward_api(mut req: Request, url: Url, cfg: &RuntimeConfig) -> Result<Response> {
    let Some(origin) = cfg.backend_origin.as_deref() else {
        return map_error_to_response(GateError::BackendNotConfigured);
    };

    let client = WorkerHttpClient;
    let proxy = match BackendProxy::new(&client, origin) {
        Ok(proxy) => proxy,
        Err(e) => return map_error_to_response(e),
    };

    let forwarded = match incoming_request(&mut req, &url).await {
        Ok(forwarded) => forwarded,
        Err(e) => return map_error_to_response(e),
    };

    match proxy.forward(forwarded, url.host_str()).await {
        Ok(resp) => into_worker_response(resp),
        Err(e) => map_error_to_response(e),
    }
}

async fn serve_page(req: Request, mut url: Url, env: &Env, cfg: &RuntimeConfig) -> Result<Response> {
    let gate = NavigationGate::new(cfg.auth_cookie_name.as_str());
    let cookie = req.headers().get("Cookie")?;

    match gate.decide(url.path(), cookie.as_deref()) {
        GateDecision::Redirect(target) => {
            log_info!("[Gate] {} -> {}", url.path(), target);
            url.set_path(target);
            url.set_query(None);
            url.set_fragment(None);
            Response::redirect(url)
        }
        GateDecision::Pass => match env.assets(&cfg.assets_binding) {
            Ok(assets) => assets.fetch_request(req).await,
            Err(e) => map_error_to_response(GateError::Runtime(e.to_string())),
        },
    }
}

#[event(fetch)]
pub async fn main(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    console_error_panic_hook::set_once();

    let cfg = RuntimeConfig::new(&env);
    let url = req.url()?;

    if url.path() == API_PREFIX || url.path().starts_with(&format!("{}/", API_PREFIX)) {
        forward_api(req, url, &cfg).await
    } else {
        serve_page(req, url, &env, &cfg).await
    }
}
