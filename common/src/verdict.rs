//! 送信可否の純粋判定ロジック
//!
//! DOMへの参照を持たない。アダプタ側が現在のファイル選択状態を
//! [`FileSelection`]に写し取り、[`evaluate`]の返す[`SideEffects`]を
//! そのままDOMに適用する。

/// ファイル入力の現在の選択状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSelection {
    /// ファイル入力要素がページ内に見つからない
    Missing,
    /// 選択されているファイル数
    Selected(u32),
}

impl FileSelection {
    /// 要素欠落は空選択と同一視する（fails closed）
    pub fn is_valid(&self) -> bool {
        matches!(self, FileSelection::Selected(n) if *n > 0)
    }
}

/// 1回の送信試行の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// ネイティブ送信を通す
    Proceed,
    /// preventDefaultで送信を止める
    Block,
}

/// 見た目とメッセージの設定
#[derive(Debug, Clone)]
pub struct GuardStyle {
    pub neutral_border: &'static str,
    pub error_border: &'static str,
    pub alert_message: &'static str,
    pub busy_label: &'static str,
}

impl Default for GuardStyle {
    fn default() -> Self {
        Self {
            neutral_border: "1px solid #ccc",
            error_border: "2px solid red",
            alert_message: "⚠️ Please upload a valid CSV file before submitting.",
            busy_label: "Predicting...",
        }
    }
}

/// アダプタが適用すべきDOM副作用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideEffects {
    /// ファイル入力のborderに設定する値
    pub input_border: &'static str,
    /// 表示する警告メッセージ（Blockの場合のみSome）
    pub alert: Option<&'static str>,
    /// 送信ボタンを無効化するか
    pub disable_submit: bool,
    /// 送信ボタンの表示ラベル（Proceedの場合のみSome）
    pub submit_label: Option<&'static str>,
}

/// 判定結果と副作用のセット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub verdict: Verdict,
    pub effects: SideEffects,
}

impl Decision {
    pub fn proceed(&self) -> bool {
        self.verdict == Verdict::Proceed
    }
}

/// 送信試行を1回判定する
///
/// 試行ごとにリセット状態から評価する。前回の結果は持ち越さない。
pub fn evaluate(selection: FileSelection, style: &GuardStyle) -> Decision {
    if selection.is_valid() {
        Decision {
            verdict: Verdict::Proceed,
            effects: SideEffects {
                input_border: style.neutral_border,
                alert: None,
                disable_submit: true,
                submit_label: Some(style.busy_label),
            },
        }
    } else {
        Decision {
            verdict: Verdict::Block,
            effects: SideEffects {
                input_border: style.error_border,
                alert: Some(style.alert_message),
                disable_submit: false,
                submit_label: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> GuardStyle {
        GuardStyle::default()
    }

    #[test]
    fn test_empty_selection_blocks() {
        let decision = evaluate(FileSelection::Selected(0), &style());

        assert_eq!(decision.verdict, Verdict::Block);
        assert!(!decision.proceed());
        assert_eq!(decision.effects.input_border, "2px solid red");
        assert_eq!(
            decision.effects.alert,
            Some("⚠️ Please upload a valid CSV file before submitting.")
        );
        assert!(!decision.effects.disable_submit);
        assert_eq!(decision.effects.submit_label, None);
    }

    #[test]
    fn test_missing_input_blocks() {
        // 要素が見つからない場合も空選択と同じ扱い
        let decision = evaluate(FileSelection::Missing, &style());

        assert_eq!(decision.verdict, Verdict::Block);
        assert_eq!(
            decision.effects,
            evaluate(FileSelection::Selected(0), &style()).effects
        );
    }

    #[test]
    fn test_single_file_proceeds() {
        let decision = evaluate(FileSelection::Selected(1), &style());

        assert_eq!(decision.verdict, Verdict::Proceed);
        assert!(decision.proceed());
        assert_eq!(decision.effects.input_border, "1px solid #ccc");
        assert_eq!(decision.effects.alert, None);
        assert!(decision.effects.disable_submit);
        assert_eq!(decision.effects.submit_label, Some("Predicting..."));
    }

    #[test]
    fn test_multiple_files_proceed() {
        let decision = evaluate(FileSelection::Selected(3), &style());
        assert_eq!(decision.verdict, Verdict::Proceed);
    }

    #[test]
    fn test_invalid_then_valid_attempt_has_no_residue() {
        // 無効な試行の後に有効な試行をしても、結果は有効側の効果のみ
        let first = evaluate(FileSelection::Selected(0), &style());
        assert_eq!(first.verdict, Verdict::Block);

        let second = evaluate(FileSelection::Selected(1), &style());
        assert_eq!(second.verdict, Verdict::Proceed);
        assert_eq!(second.effects.input_border, "1px solid #ccc");
        assert_eq!(second.effects.alert, None);
    }

    #[test]
    fn test_evaluate_is_stateless() {
        let a = evaluate(FileSelection::Selected(2), &style());
        let b = evaluate(FileSelection::Selected(2), &style());
        assert_eq!(a, b);
    }

    #[test]
    fn test_default_style_values() {
        let s = GuardStyle::default();
        assert_eq!(s.neutral_border, "1px solid #ccc");
        assert_eq!(s.error_border, "2px solid red");
        assert_eq!(s.busy_label, "Predicting...");
        assert!(s.alert_message.contains("CSV"));
    }

    #[test]
    fn test_file_selection_is_valid() {
        assert!(!FileSelection::Missing.is_valid());
        assert!(!FileSelection::Selected(0).is_valid());
        assert!(FileSelection::Selected(1).is_valid());
        assert!(FileSelection::Selected(10).is_valid());
    }
}
