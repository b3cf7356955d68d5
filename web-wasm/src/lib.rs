//! CSV Upload Form Guard (WASM)
//!
//! サーバ側でレンダリングされたアップロードフォームに送信ガードを取り付ける。
//! ページ構造の解析後にロードされる前提（deferredスクリプト契約）。

mod guard;

pub use guard::FormGuard;

use gloo::console;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    // フォームが無いページではガード無しで何もしない（fails closed）
    match guard::FormGuard::bind(&document) {
        Ok(g) => g.install(),
        Err(e) => console::warn!(format!("form guard disabled: {e}")),
    }
}
