//! 浏览器存储封装
//!
//! - `LocalStorage`: `window.localStorage`
//! - `Cookies`: `document.cookie`（导航网关在服务端读取访问令牌 Cookie）
//!
//! 所有操作失败时静默返回 None / false，由调用方决定是否记录日志。

use naviswork_shared::session::cookie_value;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    pub fn get(key: &str) -> Option<String> {
        Self::storage()?
            .get_item(key)
            .ok()?
            .filter(|v| !v.is_empty())
    }

    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

pub struct Cookies;

impl Cookies {
    fn document() -> Option<HtmlDocument> {
        web_sys::window()?.document()?.dyn_into::<HtmlDocument>().ok()
    }

    pub fn get(name: &str) -> Option<String> {
        let all = Self::document()?.cookie().ok()?;
        cookie_value(&all, name)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// `raw` 为完整的 `name=value; Path=/; ...` 串
    pub fn set(raw: &str) -> bool {
        Self::document()
            .and_then(|d| d.set_cookie(raw).ok())
            .is_some()
    }
}
