//! Builder Module
//!
//! Fluent Builder APIを提供し、バッチ変換を行う`BatchConverter`を段階的に構築する。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::JsonToXlsxError;
use crate::output::write_report;
use crate::transform::transform_str;

/// 入力ディレクトリ名
pub const INPUT_DIR_NAME: &str = "input";

/// 出力ディレクトリ名
pub const OUTPUT_DIR_NAME: &str = "output";

/// バッチ処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct BatchConfig {
    /// 入力・出力ディレクトリを置く基準ディレクトリ
    pub base_dir: PathBuf,
}

impl BatchConfig {
    fn input_dir(&self) -> PathBuf {
        self.base_dir.join(INPUT_DIR_NAME)
    }

    fn output_dir(&self) -> PathBuf {
        self.base_dir.join(OUTPUT_DIR_NAME)
    }
}

/// Fluent Builder APIを提供する構造体
///
/// 基準ディレクトリを指定しない場合、実行ファイルのあるディレクトリを使用します。
///
/// # 使用例
///
/// ```rust,no_run
/// use json2xlsx::BatchBuilder;
///
/// # fn main() -> Result<(), json2xlsx::JsonToXlsxError> {
/// let converter = BatchBuilder::new()
///     .with_base_dir("/data/profiles")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct BatchBuilder {
    /// 基準ディレクトリ（`None`の場合は実行ファイルのディレクトリ）
    base_dir: Option<PathBuf>,
}

impl BatchBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    pub fn new() -> Self {
        Self::default()
    }

    /// 基準ディレクトリを指定する
    ///
    /// `input`・`output`ディレクトリはこの直下に置かれます。
    pub fn with_base_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// 設定を検証し、`BatchConverter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `JsonToXlsxError::Config(String)`: 基準ディレクトリが存在しない、
    ///   またはディレクトリではない場合
    /// * `JsonToXlsxError::Io`: 実行ファイルのパスを取得できない場合
    pub fn build(self) -> Result<BatchConverter, JsonToXlsxError> {
        let base_dir = match self.base_dir {
            Some(dir) => dir,
            None => executable_dir()?,
        };

        if !base_dir.is_dir() {
            return Err(JsonToXlsxError::Config(format!(
                "Base directory does not exist or is not a directory: {}",
                base_dir.display()
            )));
        }

        Ok(BatchConverter {
            config: BatchConfig { base_dir },
        })
    }
}

/// 実行ファイルのあるディレクトリ
fn executable_dir() -> Result<PathBuf, JsonToXlsxError> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        JsonToXlsxError::Config(format!(
            "Executable path has no parent directory: {}",
            exe.display()
        ))
    })
}

/// ファイル1件の処理結果
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// 変換に成功した
    Converted {
        /// 出力ファイルのパス
        output: PathBuf,
        /// 集計から除外した効果の数
        warnings: usize,
    },

    /// JSON構文が不正
    InvalidJson(String),

    /// 一覧取得後に読み込もうとした時点でファイルがなかった
    NotFound,

    /// その他の読み込みエラー
    ReadFailed(String),

    /// 既定値を適用できない必須フィールドの欠落
    MissingField {
        /// 出力予定だったファイルのパス
        output: PathBuf,
        /// 欠落したフィールドのパス
        key: String,
    },

    /// その他の変換・書き込みエラー
    ConvertFailed {
        /// 出力予定だったファイルのパス
        output: PathBuf,
        /// エラーの詳細
        detail: String,
    },
}

impl FileOutcome {
    /// 変換に成功したかどうか
    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Converted { .. })
    }
}

/// バッチ処理中のイベント
#[derive(Debug)]
pub enum BatchEvent<'a> {
    /// 出力ディレクトリを作成した
    OutputDirCreated(&'a Path),

    /// ファイルの処理を開始する
    Processing(&'a Path),

    /// ファイルの処理が終わった
    Finished(&'a Path, &'a FileOutcome),
}

/// 変換したファイルの集計
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    /// 入力ファイルごとの結果（処理順）
    pub files: Vec<(PathBuf, FileOutcome)>,
}

impl BatchSummary {
    /// 対象ファイル数
    pub fn total(&self) -> usize {
        self.files.len()
    }

    /// 変換に成功したファイル数
    pub fn succeeded(&self) -> usize {
        self.files.iter().filter(|(_, o)| o.is_success()).count()
    }
}

/// ディレクトリ準備の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prepared {
    /// 入力ディレクトリを新規作成した（今回は処理しない）
    InputCreated,

    /// 変換を開始できる
    Ready {
        /// 出力ディレクトリを新規作成したかどうか
        output_created: bool,
    },
}

/// バッチ処理全体の結果
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    /// 入力ディレクトリを新規作成した（今回は処理しない）
    InputCreated(PathBuf),

    /// 入力ディレクトリにJSONファイルがなかった
    NoInputFiles(PathBuf),

    /// 処理を完了した
    Completed(BatchSummary),
}

/// バッチ変換のファサード
///
/// `input`ディレクトリ内のJSONファイルを1件ずつ変換し、`output`ディレクトリに
/// 同名の`.xlsx`ファイルとして書き出します。1件の失敗は他のファイルの処理に
/// 影響しません。
///
/// # 使用例
///
/// ```rust,no_run
/// use json2xlsx::{BatchBuilder, BatchOutcome};
///
/// # fn main() -> Result<(), json2xlsx::JsonToXlsxError> {
/// let converter = BatchBuilder::new().build()?;
/// match converter.run(|_| {})? {
///     BatchOutcome::Completed(summary) => {
///         println!("{} / {}", summary.succeeded(), summary.total());
///     }
///     _ => {}
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct BatchConverter {
    /// バッチ設定
    config: BatchConfig,
}

impl BatchConverter {
    /// 基準ディレクトリ
    pub fn base_dir(&self) -> &Path {
        &self.config.base_dir
    }

    /// 入力ディレクトリ
    pub fn input_dir(&self) -> PathBuf {
        self.config.input_dir()
    }

    /// 出力ディレクトリ
    pub fn output_dir(&self) -> PathBuf {
        self.config.output_dir()
    }

    /// 入力ファイルに対応する出力ファイルのパス（`output/<拡張子なしの名前>.xlsx`）
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.output_dir().join(format!("{}.xlsx", stem))
    }

    /// 入力ディレクトリ内の`.json`ファイル（大文字小文字を区別しない）を列挙する
    ///
    /// 順序はディレクトリの列挙順で、プラットフォーム間で安定しているとは限りません。
    pub fn list_inputs(&self) -> Result<Vec<PathBuf>, JsonToXlsxError> {
        let mut inputs = Vec::new();
        for entry in fs::read_dir(self.input_dir())? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_lowercase();
            if name.ends_with(".json") {
                inputs.push(entry.path());
            }
        }
        Ok(inputs)
    }

    /// JSONファイル1件を変換する
    ///
    /// エラーは返さず、結果を`FileOutcome`として報告します。
    pub fn convert_file(&self, input: &Path) -> FileOutcome {
        let text = match fs::read_to_string(input) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return FileOutcome::NotFound,
            Err(e) => return FileOutcome::ReadFailed(e.to_string()),
        };

        let output = self.output_path_for(input);
        let report = match transform_str(&text) {
            Ok(report) => report,
            Err(JsonToXlsxError::Json(e)) => return FileOutcome::InvalidJson(e.to_string()),
            Err(JsonToXlsxError::MissingRequiredField(key)) => {
                return FileOutcome::MissingField { output, key };
            }
            Err(e) => {
                return FileOutcome::ConvertFailed {
                    output,
                    detail: e.to_string(),
                };
            }
        };

        match write_report(&report, &output) {
            Ok(()) => {
                debug!(
                    input = %input.display(),
                    output = %output.display(),
                    rows = report.characters.len(),
                    "converted profile"
                );
                FileOutcome::Converted {
                    output,
                    warnings: report.warnings.len(),
                }
            }
            Err(e) => FileOutcome::ConvertFailed {
                output,
                detail: e.to_string(),
            },
        }
    }

    /// 入力・出力ディレクトリを準備する
    ///
    /// `input`がなければ作成して`Prepared::InputCreated`を返し、`output`には
    /// 触れません。`input`があれば、`output`を必要に応じて作成します。
    pub fn prepare(&self) -> Result<Prepared, JsonToXlsxError> {
        if create_dir_if_missing(&self.input_dir())? {
            return Ok(Prepared::InputCreated);
        }
        let output_created = create_dir_if_missing(&self.output_dir())?;
        Ok(Prepared::Ready { output_created })
    }

    /// バッチ処理を実行する
    ///
    /// # 処理フロー
    ///
    /// 1. `prepare`：`input`ディレクトリがなければ作成し、処理せずに終了。
    ///    `output`ディレクトリがなければ作成
    /// 2. `.json`ファイルを列挙（なければ終了）
    /// 3. 各ファイルを順に変換
    ///
    /// 進捗は`on_event`に通知されます。ファイル単位のエラーは`FileOutcome`として
    /// 記録され、ディレクトリの作成や列挙に失敗した場合のみエラーを返します。
    pub fn run<F>(&self, mut on_event: F) -> Result<BatchOutcome, JsonToXlsxError>
    where
        F: FnMut(BatchEvent<'_>),
    {
        let input_dir = self.input_dir();
        match self.prepare()? {
            Prepared::InputCreated => return Ok(BatchOutcome::InputCreated(input_dir)),
            Prepared::Ready {
                output_created: true,
            } => on_event(BatchEvent::OutputDirCreated(&self.output_dir())),
            Prepared::Ready {
                output_created: false,
            } => {}
        }

        let inputs = self.list_inputs()?;
        if inputs.is_empty() {
            return Ok(BatchOutcome::NoInputFiles(input_dir));
        }

        let mut files = Vec::with_capacity(inputs.len());
        for input in inputs {
            on_event(BatchEvent::Processing(&input));
            let outcome = self.convert_file(&input);
            on_event(BatchEvent::Finished(&input, &outcome));
            files.push((input, outcome));
        }

        Ok(BatchOutcome::Completed(BatchSummary { files }))
    }
}

/// ディレクトリがなければ作成する（作成した場合は`true`）
fn create_dir_if_missing(dir: &Path) -> Result<bool, JsonToXlsxError> {
    if dir.exists() {
        return Ok(false);
    }
    fs::create_dir_all(dir)?;
    info!(dir = %dir.display(), "created directory");
    Ok(true)
}
