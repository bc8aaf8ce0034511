//! 浏览器 API 封装模块

pub mod router;
mod storage;
mod timer;

pub use storage::{Cookies, LocalStorage};
pub use timer::Debounce;
