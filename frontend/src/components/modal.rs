//! `<dialog>` 模态框辅助
//!
//! 用一个 `open` 信号驱动原生 `show_modal()` / `close()`，
//! 按 Esc 或点击背景关闭时同步回信号。

use leptos::html::Dialog;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct ModalHandle {
    pub node: NodeRef<Dialog>,
    open: RwSignal<bool>,
}

impl ModalHandle {
    pub fn open(&self) {
        self.open.set(true);
    }

    pub fn close(&self) {
        self.open.set(false);
    }

    /// 绑定到 `<dialog on:close=...>`
    pub fn on_native_close(&self) {
        self.open.set(false);
    }
}

pub fn use_modal() -> ModalHandle {
    let node = NodeRef::<Dialog>::new();
    let open = RwSignal::new(false);

    Effect::new(move |_| {
        let Some(dialog) = node.get() else { return };
        if open.get() {
            if !dialog.open() {
                let _ = dialog.show_modal();
            }
        } else if dialog.open() {
            dialog.close();
        }
    });

    ModalHandle { node, open }
}
