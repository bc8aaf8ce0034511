//! 会话模块
//!
//! 管理访问令牌的生命周期：启动时载入、登录后写入、登出或 401 时清除。
//! 路由服务只读取注入的会话状态信号，不直接依赖本模块。
//!
//! 访问令牌同时写入 Cookie（导航网关需要）；读取时先看 Cookie，
//! 再回退到旧版本留在 LocalStorage 中的令牌并迁移到 Cookie。

use crate::web::{Cookies, LocalStorage};
use leptos::logging::log;
use leptos::prelude::*;
use naviswork_shared::session::{SessionStatus, expired_cookie, token_cookie};
use naviswork_shared::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, TOKEN_MAX_AGE_SECS, TokenPair};

// =========================================================
// 令牌持久化
// =========================================================

struct TokenStore;

impl TokenStore {
    fn load() -> Option<String> {
        if let Some(token) = Cookies::get(ACCESS_TOKEN_KEY) {
            return Some(token);
        }
        let legacy = LocalStorage::get(ACCESS_TOKEN_KEY)?;
        log!("[Session] migrating stored access token to cookie");
        Cookies::set(&token_cookie(ACCESS_TOKEN_KEY, &legacy, TOKEN_MAX_AGE_SECS));
        LocalStorage::delete(ACCESS_TOKEN_KEY);
        Some(legacy)
    }

    fn save(pair: &TokenPair) {
        Cookies::set(&token_cookie(
            ACCESS_TOKEN_KEY,
            &pair.access_token,
            TOKEN_MAX_AGE_SECS,
        ));
        LocalStorage::delete(ACCESS_TOKEN_KEY);
        match &pair.refresh_token {
            Some(refresh) => LocalStorage::set(REFRESH_TOKEN_KEY, refresh),
            None => LocalStorage::delete(REFRESH_TOKEN_KEY),
        };
    }

    fn clear() {
        Cookies::set(&expired_cookie(ACCESS_TOKEN_KEY));
        LocalStorage::delete(ACCESS_TOKEN_KEY);
        LocalStorage::delete(REFRESH_TOKEN_KEY);
    }
}

// =========================================================
// 会话上下文
// =========================================================

/// 会话上下文
///
/// 包含状态与令牌两个信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct SessionContext {
    status: RwSignal<SessionStatus>,
    token: RwSignal<Option<String>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            status: RwSignal::new(SessionStatus::Unknown),
            token: RwSignal::new(None),
        }
    }

    /// 会话状态信号（用于路由服务注入）
    pub fn status_signal(&self) -> Signal<SessionStatus> {
        self.status.into()
    }

    /// 当前令牌（不建立响应式依赖）
    pub fn token(&self) -> Option<String> {
        self.token.get_untracked()
    }

    /// 登录成功后建立会话
    pub fn establish(&self, pair: &TokenPair) {
        TokenStore::save(pair);
        self.token.set(Some(pair.access_token.clone()));
        self.status.set(SessionStatus::Authorized);
        log!("[Session] signed in");
    }

    /// 主动登出
    pub fn end(&self) {
        TokenStore::clear();
        self.token.set(None);
        self.status.set(SessionStatus::Unauthorized);
        log!("[Session] signed out");
    }

    /// 后端返回 401：令牌已失效
    pub fn expire(&self) {
        if self.status.get_untracked() == SessionStatus::Authorized {
            log!("[Session] access token rejected, clearing session");
        }
        TokenStore::clear();
        self.token.set(None);
        self.status.set(SessionStatus::Unauthorized);
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

/// 启动时从浏览器存储载入令牌，Unknown → Authorized / Unauthorized
pub fn init_session(ctx: &SessionContext) {
    let token = TokenStore::load();
    let status = SessionStatus::from_token(token.as_deref());
    ctx.token.set(token);
    ctx.status.set(status);
    log!("[Session] restored as {:?}", status);
}
