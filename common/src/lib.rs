//! Form Guard Common Library
//!
//! ブラウザ側アダプタと共有される判定ロジックと型

pub mod error;
pub mod verdict;

pub use error::{GuardError, Result};
pub use verdict::{evaluate, Decision, FileSelection, GuardStyle, SideEffects, Verdict};
