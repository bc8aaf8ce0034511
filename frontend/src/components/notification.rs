//! 全局通知
//!
//! 页面与弹窗通过 `use_notifier()` 发出短暂提示，`Toast` 在 App 根部统一渲染。
//! 新通知会替换旧通知，并在 `NOTICE_DURATION` 后自动消失。

use leptos::prelude::*;

use crate::config::NOTICE_DURATION;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    fn alert_class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "alert alert-success shadow-lg",
            NoticeKind::Error => "alert alert-error shadow-lg",
        }
    }
}

#[derive(Clone, Copy)]
pub struct Notifier {
    current: RwSignal<Option<Notice>>,
    /// 每条通知的序号，过期的定时器不会清掉更新的通知
    generation: StoredValue<u64>,
}

impl Notifier {
    fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            generation: StoredValue::new(0),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(Notice {
            message: message.into(),
            kind: NoticeKind::Success,
        });
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(Notice {
            message: message.into(),
            kind: NoticeKind::Error,
        });
    }

    fn show(&self, notice: Notice) {
        self.generation.update_value(|g| *g += 1);
        let shown = self.generation.get_value();
        self.current.set(Some(notice));

        let notifier = *self;
        set_timeout(
            move || {
                if notifier.generation.try_get_value() == Some(shown) {
                    notifier.current.try_set(None);
                }
            },
            NOTICE_DURATION,
        );
    }
}

pub fn provide_notifier() -> Notifier {
    let notifier = Notifier::new();
    provide_context(notifier);
    notifier
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().expect("Notifier should be provided")
}

/// 通知提示框
#[component]
pub fn Toast() -> impl IntoView {
    let notifier = use_notifier();

    move || {
        notifier.current.get().map(|notice| {
            view! {
                <div class="toast toast-top toast-end z-50">
                    <div class=notice.alert_class()>
                        <span>{notice.message.clone()}</span>
                    </div>
                </div>
            }
        })
    }
}
