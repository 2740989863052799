//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// json2xlsxクレート全体で使用するエラー型
///
/// JSONファイルの読み込み、プロファイルの変換、ワークブックの書き込み中に発生する
/// すべてのエラーを統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（ファイル読み込み失敗など）
/// - `Json`: JSON構文の解析に失敗したエラー（serde_json由来）
/// - `Xlsx`: ワークブックの書き込みに失敗したエラー（rust_xlsxwriter由来）
/// - `MissingRequiredField`: 既定値を適用できない必須フィールドの欠落
/// - `UnexpectedError`: その他の変換処理中の異常
/// - `Config`: 設定の検証に失敗したエラー
///
/// 効果値（`function_value`）の数値変換失敗はこのエラー型では表現しません。
/// それは警告として記録され、変換処理は継続します。
///
/// # 使用例
///
/// ```rust,no_run
/// use json2xlsx::JsonToXlsxError;
///
/// fn read_profile(path: &str) -> Result<serde_json::Value, JsonToXlsxError> {
///     let text = std::fs::read_to_string(path)?;  // Ioエラーが自動的に変換される
///     let value = serde_json::from_str(&text)?;   // Jsonエラーが自動的に変換される
///     Ok(value)
/// }
/// ```
#[derive(Error, Debug)]
pub enum JsonToXlsxError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON構文の解析エラー
    ///
    /// 入力ファイルが有効なJSONとして解析できなかった場合に発生します。
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// ワークブックの書き込みエラー
    ///
    /// シート名の設定、セルの書き込み、ファイルの保存に失敗した場合に発生します。
    #[error("Failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// 必須フィールドの欠落
    ///
    /// マッピングやシーケンスが必要な位置に`null`が置かれているなど、
    /// 既定値で補えない形でフィールドが欠けている場合に発生します。
    /// 値はフィールドのパス（例: `elements.Fire.CharA`）です。
    #[error("Missing required field '{0}'")]
    MissingRequiredField(String),

    /// その他の変換処理中の異常
    ///
    /// 型の不一致など、想定外の構造を検出した場合に発生します。
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),

    /// 設定の検証に失敗したエラー
    ///
    /// `BatchBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。例えば、基準ディレクトリが存在しない場合などです。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use json2xlsx::{BatchBuilder, JsonToXlsxError};
    ///
    /// let result = BatchBuilder::new()
    ///     .with_base_dir("/path/that/does/not/exist")
    ///     .build();
    ///
    /// match result {
    ///     Err(JsonToXlsxError::Config(msg)) => {
    ///         println!("設定エラー: {}", msg);
    ///     }
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),
}
