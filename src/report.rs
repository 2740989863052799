//! Report Module
//!
//! 変換結果（基本信息・角色信息の2表）を保持し、
//! ワークブック出力用の見出し付きテーブルに平坦化するモジュール。

use std::fmt;

use crate::api::{StatCategory, TrackedCube};
use crate::types::CellValue;

/// 基本信息シート名
pub const SUMMARY_SHEET: &str = "基本信息";

/// 角色信息シート名
pub const CHARACTER_SHEET: &str = "角色信息";

/// キャラクターが1人もいない場合の元素類型の値
pub const NO_DATA_MARKER: &str = "无数据";

/// キャラクターレコードのスカラー項目の見出し（入力キーと同じ順序）
pub const CHARACTER_FIELD_HEADERS: [&str; 9] = [
    "Name Code",
    "ID",
    "Priority",
    "技能1等级",
    "技能2等级",
    "爆裂技能等级",
    "收藏品稀有度",
    "收藏品等级",
    "突破次数",
];

const PLAYER_HEADER: &str = "玩家";
const SYNCHRO_LEVEL_HEADER: &str = "同步等级";
const ELEMENT_HEADER: &str = "元素类型";
const CHARACTER_HEADER: &str = "角色";

/// 小数点以下2桁に丸める
///
/// ちょうど中間の値は偶数側に丸めます（`0.125` → `0.12`）。
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// 9カテゴリの集計値
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatTotals {
    values: [f64; 9],
}

impl StatTotals {
    /// カテゴリに値を加算
    pub fn add(&mut self, category: StatCategory, value: f64) {
        self.values[category.index()] += value;
    }

    /// カテゴリの集計値
    pub fn get(&self, category: StatCategory) -> f64 {
        self.values[category.index()]
    }

    /// 各値を小数点以下2桁に丸めた集計値
    pub fn rounded(&self) -> Self {
        Self {
            values: self.values.map(round2),
        }
    }

    /// `StatCategory::ALL`順のイテレータ
    pub fn iter(&self) -> impl Iterator<Item = (StatCategory, f64)> + '_ {
        StatCategory::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// 基本信息シートの1行
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    /// プレイヤー名
    pub player: CellValue,

    /// 同期レベル
    pub synchro_level: CellValue,

    /// 対象魔方のレベル（`TrackedCube::ALL`順）
    pub cube_levels: [CellValue; 2],
}

impl SummaryRow {
    /// 魔方レベル
    pub fn cube_level(&self, cube: TrackedCube) -> &CellValue {
        &self.cube_levels[cube.index()]
    }
}

/// 角色信息シートの1行
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterRow {
    /// プレイヤー名（同じファイルの全行で同じ値）
    pub player: CellValue,

    /// 元素類型
    pub element: String,

    /// キャラクター名
    pub character: CellValue,

    /// スカラー項目（`CHARACTER_FIELD_HEADERS`順）
    pub fields: [CellValue; 9],

    /// 丸め済みの集計値
    pub stats: StatTotals,
}

impl CharacterRow {
    /// キャラクターがいない場合のプレースホルダー行
    pub fn placeholder(player: CellValue) -> Self {
        Self {
            player,
            element: NO_DATA_MARKER.to_string(),
            character: CellValue::Empty,
            fields: std::array::from_fn(|_| CellValue::Empty),
            stats: StatTotals::default(),
        }
    }

    /// プレースホルダー行かどうか
    pub fn is_placeholder(&self) -> bool {
        self.element == NO_DATA_MARKER && self.character.is_empty()
    }

    /// テーブルの1行に平坦化
    fn to_cells(&self) -> Vec<CellValue> {
        let mut cells = Vec::with_capacity(character_headers().len());
        cells.push(self.player.clone());
        cells.push(CellValue::Text(self.element.clone()));
        cells.push(self.character.clone());
        cells.extend(self.fields.iter().cloned());
        cells.extend(self.stats.iter().map(|(_, v)| CellValue::Number(v)));
        cells
    }
}

/// 効果値の数値変換に失敗した理由
#[derive(Debug, Clone, PartialEq)]
pub enum ParseIssue {
    /// `function_value`キーなし
    Missing,
    /// `null`
    Null,
    /// 空文字列
    Empty,
    /// 数値として解釈できない文字列
    NotNumeric(String),
    /// NaN・無限大
    NotFinite,
    /// 配列・オブジェクト
    Unsupported(&'static str),
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseIssue::Missing => write!(f, "value is missing"),
            ParseIssue::Null => write!(f, "value is null"),
            ParseIssue::Empty => write!(f, "value is empty"),
            ParseIssue::NotNumeric(s) => write!(f, "'{}' is not a number", s),
            ParseIssue::NotFinite => write!(f, "value is not a finite number"),
            ParseIssue::Unsupported(kind) => write!(f, "{} is not a number", kind),
        }
    }
}

/// 集計から除外した効果の警告
#[derive(Debug, Clone, PartialEq)]
pub struct EffectWarning {
    /// 元素類型
    pub element: String,
    /// キャラクター名
    pub character: String,
    /// 入力の効果種別（旧名称）
    pub function_type: String,
    /// 対応する集計カテゴリ
    pub category: StatCategory,
    /// 問題の値（表示用）
    pub value: String,
    /// 失敗理由
    pub issue: ParseIssue,
}

impl fmt::Display for EffectWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Non-numeric or missing function_value '{}' for '{}' (mapped to '{}') in character '{}', element '{}'. Skipping this effect value.",
            self.value,
            self.function_type,
            self.category.label(),
            self.character,
            self.element
        )
    }
}

/// 出力用の見出し付きテーブル
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// シート名
    pub name: &'static str,
    /// 見出し行
    pub headers: Vec<&'static str>,
    /// データ行
    pub rows: Vec<Vec<CellValue>>,
}

/// 基本信息シートの見出し
pub fn summary_headers() -> Vec<&'static str> {
    let mut headers = vec![PLAYER_HEADER, SYNCHRO_LEVEL_HEADER];
    headers.extend(TrackedCube::ALL.iter().map(|c| c.label()));
    headers
}

/// 角色信息シートの見出し
pub fn character_headers() -> Vec<&'static str> {
    let mut headers = vec![PLAYER_HEADER, ELEMENT_HEADER, CHARACTER_HEADER];
    headers.extend(CHARACTER_FIELD_HEADERS);
    headers.extend(StatCategory::ALL.iter().map(|c| c.label()));
    headers
}

/// 入力ファイル1件分の変換結果
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileReport {
    /// 基本信息
    pub summary: SummaryRow,

    /// 角色信息（1行以上。キャラクターがいない場合はプレースホルダー1行）
    pub characters: Vec<CharacterRow>,

    /// 集計から除外した効果
    pub warnings: Vec<EffectWarning>,
}

impl ProfileReport {
    /// 基本信息テーブル
    pub fn summary_table(&self) -> Table {
        let mut row = vec![self.summary.player.clone(), self.summary.synchro_level.clone()];
        row.extend(self.summary.cube_levels.iter().cloned());
        Table {
            name: SUMMARY_SHEET,
            headers: summary_headers(),
            rows: vec![row],
        }
    }

    /// 角色信息テーブル
    pub fn character_table(&self) -> Table {
        Table {
            name: CHARACTER_SHEET,
            headers: character_headers(),
            rows: self.characters.iter().map(CharacterRow::to_cells).collect(),
        }
    }

    /// 出力順（基本信息、角色信息）のテーブル
    pub fn tables(&self) -> [Table; 2] {
        [self.summary_table(), self.character_table()]
    }
}
