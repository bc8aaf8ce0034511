//! 定时器封装模块
//!
//! 基于 `gloo-timers` 的防抖：每次调用都会使之前尚未触发的回调失效。

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// 输入防抖器
///
/// 用代数计数代替持有 `Timeout` 句柄，因此可以 `Copy` 进任意事件闭包。
#[derive(Clone, Copy)]
pub struct Debounce {
    generation: StoredValue<u64>,
    millis: u32,
}

impl Debounce {
    pub fn new(millis: u32) -> Self {
        Self {
            generation: StoredValue::new(0),
            millis,
        }
    }

    /// 延迟执行 `callback`，期间再次调用则取消本次
    pub fn call<F>(&self, callback: F)
    where
        F: FnOnce() + 'static,
    {
        let generation = self.generation;
        generation.update_value(|g| *g += 1);
        let scheduled = generation.get_value();

        Timeout::new(self.millis, move || {
            if generation.try_get_value() == Some(scheduled) {
                callback();
            }
        })
        .forget();
    }

    /// 取消尚未触发的回调
    pub fn cancel(&self) {
        self.generation.update_value(|g| *g += 1);
    }
}
