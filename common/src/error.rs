//! エラー型定義

use thiserror::Error;

/// バインド時のエラー型
///
/// 送信時の検証失敗はエラーではなく[`crate::Verdict::Block`]として扱う。
/// ここに載るのはガードを取り付けられなかった場合のみ。
#[derive(Error, Debug)]
pub enum GuardError {
    #[error("form element not found")]
    FormNotFound,

    #[error("DOM error: {0}")]
    Dom(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, GuardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_form_not_found() {
        let error = GuardError::FormNotFound;
        let display = format!("{}", error);
        assert_eq!(display, "form element not found");
    }

    #[test]
    fn test_error_display_dom() {
        let error = GuardError::Dom("query_selector failed".to_string());
        let display = format!("{}", error);
        assert!(display.contains("DOM error"));
        assert!(display.contains("query_selector failed"));
    }

    #[test]
    fn test_error_debug() {
        let error = GuardError::Dom("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Dom"));
        assert!(debug.contains("テスト"));
    }
}
