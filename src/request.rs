use std::collections::HashMap;
use worker::{Error, Fetch, Headers, Request, RequestInit, Result, js_sys};

#[cfg(test)]
use std::cell::RefCell;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 方法枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl HttpMethod {
    /// GET / HEAD 不携带请求体
    pub fn allows_body(self) -> bool {
        !matches!(self, HttpMethod::Get | HttpMethod::Head)
    }
}

impl From<HttpMethod> for worker::Method {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => worker::Method::Get,
            HttpMethod::Head => worker::Method::Head,
            HttpMethod::Post => worker::Method::Post,
            HttpMethod::Put => worker::Method::Put,
            HttpMethod::Patch => worker::Method::Patch,
            HttpMethod::Delete => worker::Method::Delete,
            HttpMethod::Options => worker::Method::Options,
        }
    }
}

impl TryFrom<worker::Method> for HttpMethod {
    type Error = worker::Method;

    fn try_from(m: worker::Method) -> std::result::Result<Self, Self::Error> {
        match m {
            worker::Method::Get => Ok(HttpMethod::Get),
            worker::Method::Head => Ok(HttpMethod::Head),
            worker::Method::Post => Ok(HttpMethod::Post),
            worker::Method::Put => Ok(HttpMethod::Put),
            worker::Method::Patch => Ok(HttpMethod::Patch),
            worker::Method::Delete => Ok(HttpMethod::Delete),
            worker::Method::Options => Ok(HttpMethod::Options),
            other => Err(other),
        }
    }
}

/// 通用 HTTP 请求结构
///
/// 请求体按原始字节保存，multipart 与 JSON 都原样转发。
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// 头名称统一为小写
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers
            .insert(key.to_ascii_lowercase(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP 客户端特性 (Trait)
/// (?Send) 是因为 Worker 环境下某些类型不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse>;
}

// =========================================================
// 实现层: Worker 客户端 (Production)
// =========================================================

#[derive(Clone)]
pub struct WorkerHttpClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for WorkerHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse> {
        let headers = Headers::new();
        for (k, v) in &req.headers {
            headers.set(k, v)?;
        }

        let mut init = RequestInit {
            method: req.method.into(),
            headers,
            ..Default::default()
        };

        if let Some(bytes) = &req.body {
            init.body = Some(js_sys::Uint8Array::from(bytes.as_slice()).into());
        }

        let worker_req = Request::new_with_init(&req.url, &init)?;
        let mut response = Fetch::Request(worker_req).send().await?;

        Ok(HttpResponse {
            status: response.status_code(),
            headers: response.headers().entries().collect(),
            body: response.bytes().await?,
        })
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub struct MockHttpClient {
    // (URL, (Status, Headers, Response Body))
    responses: RefCell<HashMap<String, (u16, Vec<(String, String)>, String)>>,
    // 记录发出的请求
    pub requests: RefCell<Vec<HttpRequest>>,
    // 为 true 时模拟网络故障
    pub fail: RefCell<bool>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
            fail: RefCell::new(false),
        }
    }

    pub fn mock_response(&self, url: &str, status: u16, body: serde_json::Value) {
        self.mock_raw(url, status, Vec::new(), &body.to_string());
    }

    pub fn mock_raw(&self, url: &str, status: u16, headers: Vec<(&str, &str)>, body: &str) {
        let headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.responses
            .borrow_mut()
            .insert(url.to_string(), (status, headers, body.to_string()));
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse> {
        let url = req.url.clone();
        self.requests.borrow_mut().push(req);

        if *self.fail.borrow() {
            return Err(Error::from("connection refused"));
        }

        let responses = self.responses.borrow();
        match responses.get(&url) {
            Some((status, headers, body)) => Ok(HttpResponse {
                status: *status,
                headers: headers.clone(),
                body: body.as_bytes().to_vec(),
            }),
            None => Ok(HttpResponse {
                status: 404,
                headers: Vec::new(),
                body: b"Not Found".to_vec(),
            }),
        }
    }
}

// =========================================================
// 测试工具: ReqwestHttpClient (真实后端冒烟测试)
// =========================================================

#[cfg(test)]
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

#[cfg(test)]
impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse> {
        let method = match req.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Options => reqwest::Method::OPTIONS,
        };

        let mut builder = self.client.request(method, &req.url);

        for (k, v) in req.headers {
            builder = builder.header(k, v);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| Error::from(format!("Reqwest Error: {}", e)))?;

        let status = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = resp
            .bytes()
            .await
            .map_err(|e| Error::from(format!("Reqwest Body Error: {}", e)))?;

        Ok(HttpResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}
