//! `/api/*` 同源转发
//!
//! 浏览器只与 Worker 同源通信，Worker 把 API 请求原样（方法、查询串、头、
//! 请求体字节）转发到 BACKEND_ORIGIN，并把后端响应原样返回。

use crate::error::{GateError, GateResult};
use crate::request::{HttpClient, HttpRequest, HttpResponse};

pub const REQUEST_ID_HEADER: &str = "x-request-id";
const FORWARDED_HOST_HEADER: &str = "x-forwarded-host";

/// 不转发给后端的请求头
const DROPPED_REQUEST_HEADERS: [&str; 4] = ["host", "connection", "content-length", "cf-connecting-ip"];
/// 不回传给浏览器的响应头（Worker fetch 已解压，长度与编码不再成立）
const DROPPED_RESPONSE_HEADERS: [&str; 4] = [
    "content-encoding",
    "content-length",
    "transfer-encoding",
    "connection",
];

fn is_dropped(list: &[&str], name: &str) -> bool {
    list.iter().any(|h| h.eq_ignore_ascii_case(name))
}

/// 校验并规范化后端地址（去掉末尾的 `/`）
pub fn normalize_origin(origin: &str) -> GateResult<String> {
    let origin = origin.trim().trim_end_matches('/');
    if origin.is_empty() {
        return Err(GateError::BackendNotConfigured);
    }
    if !(origin.starts_with("https://") || origin.starts_with("http://")) {
        return Err(GateError::InvalidBackendOrigin(origin.to_string()));
    }
    Ok(origin.to_string())
}

pub struct BackendProxy<'a, C: HttpClient> {
    client: &'a C,
    origin: String,
}

impl<'a, C: HttpClient> BackendProxy<'a, C> {
    pub fn new(client: &'a C, origin: &str) -> GateResult<Self> {
        Ok(Self {
            client,
            origin: normalize_origin(origin)?,
        })
    }

    /// `path_and_query` 形如 `/api/v1/ProjectArea/search?id=p-1`
    pub fn upstream_url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.origin, path_and_query)
    }

    /// 转发请求；`req.url` 为浏览器请求的 path + query
    pub async fn forward(&self, req: HttpRequest, host: Option<&str>) -> GateResult<HttpResponse> {
        let request_id = req
            .header(REQUEST_ID_HEADER)
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let mut upstream = HttpRequest::new(&self.upstream_url(&req.url), req.method);
        for (name, value) in &req.headers {
            if !is_dropped(&DROPPED_REQUEST_HEADERS, name) {
                upstream = upstream.with_header(name, value);
            }
        }
        upstream = upstream.with_header(REQUEST_ID_HEADER, &request_id);
        if let Some(host) = host {
            upstream = upstream.with_header(FORWARDED_HOST_HEADER, host);
        }
        if req.method.allows_body() {
            if let Some(body) = req.body {
                upstream = upstream.with_body(body);
            }
        }

        let response = self.client.send(upstream).await.map_err(|e| {
            log_error!("[Proxy] {} {} failed: {}", request_id, req.url, e);
            GateError::Upstream(e.to_string())
        })?;

        if response.status >= 500 {
            log_error!(
                "[Proxy] {} {} answered {}",
                request_id,
                req.url,
                response.status
            );
        }

        let mut headers: Vec<(String, String)> = response
            .headers
            .into_iter()
            .filter(|(name, _)| !is_dropped(&DROPPED_RESPONSE_HEADERS, name))
            .collect();
        headers.push((REQUEST_ID_HEADER.to_string(), request_id));

        Ok(HttpResponse {
            status: response.status,
            headers,
            body: response.body,
        })
    }
}

#[cfg(test)]
mod tests;
