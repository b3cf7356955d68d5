//! 送信フォームガード（DOMアダプタ）
//!
//! ページ内の最初のform / input[type='file'] / buttonを束ね、submitイベントを
//! 横取りする。判定そのものは[`form_guard_common::evaluate`]に委譲し、
//! 返ってきた副作用をDOMに適用するだけの薄い層。

use form_guard_common::{evaluate, FileSelection, GuardError, GuardStyle, Result};
use gloo::console;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlFormElement, HtmlInputElement};

/// アップロードフォームの送信ガード
pub struct FormGuard {
    form: HtmlFormElement,
    file_input: Option<HtmlInputElement>,
    submit_button: Option<HtmlButtonElement>,
    style: GuardStyle,
}

impl FormGuard {
    /// 構造クエリで対象要素を取得してバインドする
    ///
    /// formが無ければエラー（取り付け先が無い）。ファイル入力とボタンの欠落は
    /// バインド時点ではエラーにせず、送信時に検証失敗側へ倒す。
    pub fn bind(document: &Document) -> Result<Self> {
        let form = query_first::<HtmlFormElement>(document, "form")?
            .ok_or(GuardError::FormNotFound)?;
        let file_input = query_first::<HtmlInputElement>(document, "input[type='file']")?;
        let submit_button = query_first::<HtmlButtonElement>(document, "button")?;

        Ok(Self {
            form,
            file_input,
            submit_button,
            style: GuardStyle::default(),
        })
    }

    /// submitリスナーを登録する
    ///
    /// Closureはページ存続期間中有効なのでforgetする。
    pub fn install(self) {
        let form = self.form.clone();
        let closure = Closure::wrap(Box::new(move |event: Event| {
            self.on_submit(&event);
        }) as Box<dyn FnMut(_)>);

        let _ = form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
        closure.forget();

        console::debug!("form guard attached");
    }

    /// 送信試行を1回処理する
    ///
    /// 同期・非ブロッキング。毎回リセット状態から評価し直すので、
    /// 前回のエラー表示が持ち越されることはない。
    fn on_submit(&self, event: &Event) {
        // 前回のエラー表示をリセットしてから評価する
        self.set_input_border(self.style.neutral_border);

        let decision = evaluate(self.current_selection(), &self.style);

        self.set_input_border(decision.effects.input_border);

        if let Some(message) = decision.effects.alert {
            gloo::dialogs::alert(message);
        }

        if let Some(button) = &self.submit_button {
            if decision.effects.disable_submit {
                button.set_disabled(true);
            }
            if let Some(label) = decision.effects.submit_label {
                button.set_text_content(Some(label));
            }
        }

        if !decision.proceed() {
            event.prevent_default();
        }
    }

    /// 現在のファイル選択状態を読み取る
    fn current_selection(&self) -> FileSelection {
        match &self.file_input {
            Some(input) => match input.files() {
                Some(files) => FileSelection::Selected(files.length()),
                None => FileSelection::Selected(0),
            },
            None => FileSelection::Missing,
        }
    }

    fn set_input_border(&self, border: &str) {
        if let Some(input) = &self.file_input {
            let _ = input.style().set_property("border", border);
        }
    }
}

/// documentから最初にマッチする要素を型付きで取得する
fn query_first<T: JsCast>(document: &Document, selector: &str) -> Result<Option<T>> {
    let found = document
        .query_selector(selector)
        .map_err(|e| GuardError::Dom(format!("{e:?}")))?;

    match found {
        Some(element) => element
            .dyn_into::<T>()
            .map(Some)
            .map_err(|element: Element| {
                GuardError::Dom(format!("unexpected element type: {}", element.tag_name()))
            }),
        None => Ok(None),
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use form_guard_common::Verdict;
    use wasm_bindgen_test::*;
    use web_sys::{DataTransfer, EventInit, File, FileList};

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    /// form + input[type=file] + button のフィクスチャをbodyに構築する
    fn build_fixture(with_input: bool) -> (HtmlFormElement, Option<HtmlInputElement>, HtmlButtonElement) {
        let document = document();
        let body = document.body().unwrap();
        // 前のテストのフィクスチャを消す（bindは最初のマッチを拾うため）
        body.set_inner_html("");

        let form: HtmlFormElement = document.create_element("form").unwrap().dyn_into().unwrap();

        let input = if with_input {
            let input: HtmlInputElement =
                document.create_element("input").unwrap().dyn_into().unwrap();
            input.set_type("file");
            form.append_child(&input).unwrap();
            Some(input)
        } else {
            None
        };

        let button: HtmlButtonElement =
            document.create_element("button").unwrap().dyn_into().unwrap();
        button.set_text_content(Some("Predict"));
        form.append_child(&button).unwrap();

        body.append_child(&form).unwrap();
        (form, input, button)
    }

    /// DataTransfer経由でinputに1ファイル選択させる
    fn select_one_file(input: &HtmlInputElement) {
        let parts = js_sys::Array::of1(&JsValue::from_str("a,b\n1,2\n"));
        let file = File::new_with_str_sequence(&parts, "solar_wind.csv").unwrap();

        let dt = DataTransfer::new().unwrap();
        dt.items().add_with_file(&file).unwrap();
        let files: FileList = dt.files().unwrap();
        input.set_files(Some(&files));
    }

    /// キャンセル可能なsubmitイベントをdispatchし、default_preventedを返す
    ///
    /// スクリプト発行のイベントなのでブラウザのネイティブ送信は走らない。
    fn dispatch_submit(form: &HtmlFormElement) -> bool {
        let init = EventInit::new();
        init.set_cancelable(true);
        let event = Event::new_with_event_init_dict("submit", &init).unwrap();
        form.dispatch_event(&event).unwrap();
        event.default_prevented()
    }

    fn border_of(input: &HtmlInputElement) -> String {
        input.style().get_property_value("border").unwrap()
    }

    #[wasm_bindgen_test]
    fn wasm_blocks_when_no_file_selected() {
        let (form, input, button) = build_fixture(true);
        let input = input.unwrap();

        FormGuard::bind(&document()).unwrap().install();

        let prevented = dispatch_submit(&form);

        assert!(prevented);
        assert_eq!(border_of(&input), "2px solid red");
        assert!(!button.disabled());
        assert_eq!(button.text_content().as_deref(), Some("Predict"));
    }

    #[wasm_bindgen_test]
    fn wasm_proceeds_and_shows_busy_state_with_file() {
        let (form, input, button) = build_fixture(true);
        let input = input.unwrap();
        select_one_file(&input);

        FormGuard::bind(&document()).unwrap().install();

        let prevented = dispatch_submit(&form);

        assert!(!prevented);
        assert_eq!(border_of(&input), "1px solid #ccc");
        assert!(button.disabled());
        assert_eq!(button.text_content().as_deref(), Some("Predicting..."));
    }

    #[wasm_bindgen_test]
    fn wasm_invalid_then_valid_attempt_clears_error_border() {
        let (form, input, button) = build_fixture(true);
        let input = input.unwrap();

        FormGuard::bind(&document()).unwrap().install();

        // 1回目：未選択でブロックされ、エラー表示になる
        assert!(dispatch_submit(&form));
        assert_eq!(border_of(&input), "2px solid red");

        // 2回目：ファイル選択後はリセット状態から評価され、成功側のみ残る
        select_one_file(&input);
        assert!(!dispatch_submit(&form));
        assert_eq!(border_of(&input), "1px solid #ccc");
        assert!(button.disabled());
    }

    #[wasm_bindgen_test]
    fn wasm_missing_file_input_fails_closed() {
        let (form, _, _) = build_fixture(false);

        let guard = FormGuard::bind(&document()).unwrap();
        assert_eq!(guard.current_selection(), FileSelection::Missing);
        guard.install();

        // 入力要素が無い場合は空選択と同様にブロックする
        assert!(dispatch_submit(&form));
    }

    #[wasm_bindgen_test]
    fn wasm_bind_fails_without_form() {
        document().body().unwrap().set_inner_html("");

        let result = FormGuard::bind(&document());
        assert!(matches!(result, Err(GuardError::FormNotFound)));
    }

    #[wasm_bindgen_test]
    fn wasm_evaluate_matches_dom_outcome() {
        // 純粋コアの判定とDOM側の結果が一致すること
        let style = GuardStyle::default();
        let decision = evaluate(FileSelection::Selected(0), &style);
        assert_eq!(decision.verdict, Verdict::Block);

        let (form, input, _) = build_fixture(true);
        FormGuard::bind(&document()).unwrap().install();
        dispatch_submit(&form);

        assert_eq!(border_of(&input.unwrap()), decision.effects.input_border);
    }
}
