//! Types Module
//!
//! クレート全体で使用する共通データ型と、入力JSONのスキーマを定義するモジュール。
//!
//! 入力は形の揺れるJSONなので、各フィールドは`Field<T>`で「キーなし」「`null`」
//! 「値あり」を区別して受け取り、既定値の規則は変換側で明示的に適用します。

use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde_json::Value;

use crate::api::StatCategory;
use crate::error::JsonToXlsxError;

/// 欠損値の表示文字列
pub const NOT_AVAILABLE: &str = "N/A";

/// セルの値を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 数値（f64）
    Number(f64),

    /// 文字列
    Text(String),

    /// 論理値
    Bool(bool),

    /// 空セル
    Empty,
}

impl CellValue {
    /// 欠損を表す`"N/A"`セル
    pub fn not_available() -> Self {
        CellValue::Text(NOT_AVAILABLE.to_string())
    }

    /// 値が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(CellValue::Empty),
            Value::Bool(b) => Ok(CellValue::Bool(b)),
            Value::Number(n) => n
                .as_f64()
                .map(CellValue::Number)
                .ok_or_else(|| de::Error::custom(format!("number {} is out of range", n))),
            Value::String(s) => Ok(CellValue::Text(s)),
            Value::Array(_) => Err(de::Error::custom(
                "invalid type: array, expected a scalar value",
            )),
            Value::Object(_) => Err(de::Error::custom(
                "invalid type: map, expected a scalar value",
            )),
        }
    }
}

/// 入力JSONのフィールド
///
/// キーが存在しない（`Absent`）、`null`が置かれている（`Null`）、
/// 値がある（`Present`）の3状態を区別します。構造体のフィールドでは
/// `#[serde(default)]`と組み合わせて使用します。
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    /// キーなし
    Absent,
    /// `null`
    Null,
    /// 値あり
    Present(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<T> Field<T> {
    /// 省略可能なコンテナとして取り出す
    ///
    /// キーなしは`Ok(None)`、`null`は`MissingRequiredField(path)`です。
    pub fn optional<F>(self, path: F) -> Result<Option<T>, JsonToXlsxError>
    where
        F: FnOnce() -> String,
    {
        match self {
            Field::Absent => Ok(None),
            Field::Null => Err(JsonToXlsxError::MissingRequiredField(path())),
            Field::Present(v) => Ok(Some(v)),
        }
    }

    /// 必須のコンテナとして取り出す（マップの値、配列の要素）
    pub fn required<F>(self, path: F) -> Result<T, JsonToXlsxError>
    where
        F: FnOnce() -> String,
    {
        match self {
            Field::Present(v) => Ok(v),
            Field::Absent | Field::Null => Err(JsonToXlsxError::MissingRequiredField(path())),
        }
    }
}

impl Field<CellValue> {
    /// スカラー値をセルに変換する（キーなしは`"N/A"`、`null`は空セル）
    pub fn into_cell(self) -> CellValue {
        match self {
            Field::Absent => CellValue::not_available(),
            Field::Null => CellValue::Empty,
            Field::Present(v) => v,
        }
    }
}

impl<'de, T> Deserialize<'de> for Field<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Field::Present(v),
            None => Field::Null,
        })
    }
}

/// 入力順を保持するJSONオブジェクト
///
/// 重複キーは後の値で上書きし、位置は最初の出現位置を保ちます。
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for OrderedMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> OrderedMap<T> {
    fn insert(&mut self, key: String, value: T) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }
}

impl<T> IntoIterator for OrderedMap<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<(String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

struct OrderedMapVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for OrderedMapVisitor<T>
where
    T: Deserialize<'de>,
{
    type Value = OrderedMap<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = OrderedMap {
            entries: Vec::with_capacity(access.size_hint().unwrap_or(0)),
        };
        while let Some((key, value)) = access.next_entry::<String, T>()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, T> Deserialize<'de> for OrderedMap<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// `Object<T>`として読み込むレコード
pub trait Record: Default {
    /// キーに対応するフィールドへ次の値を読み込む
    ///
    /// 未知のキーでは値を読まずに`false`を返します。
    fn assign<'de, A>(&mut self, key: &str, access: &mut A) -> Result<bool, A::Error>
    where
        A: MapAccess<'de>;
}

/// JSONオブジェクトとしてのみ受け付けるレコード
///
/// 配列や文字列はエラーにします。未知のキーは読み飛ばし、
/// 重複キーは後の値で上書きします。
#[derive(Debug, Clone, PartialEq)]
pub struct Object<T>(pub T);

impl<T> Object<T> {
    /// 中身を取り出す
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Object<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

struct ObjectVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for ObjectVisitor<T>
where
    T: Record,
{
    type Value = Object<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut record = T::default();
        while let Some(key) = access.next_key::<String>()? {
            if !record.assign(&key, &mut access)? {
                access.next_value::<IgnoredAny>()?;
            }
        }
        Ok(Object(record))
    }
}

impl<'de, T> Deserialize<'de> for Object<T>
where
    T: Record,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ObjectVisitor(PhantomData))
    }
}

/// 入力ファイル1件分のプレイヤープロファイル
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerProfile {
    /// プレイヤー名
    pub name: Field<CellValue>,

    /// 同期レベル（キーは`synchroLevel`）
    pub synchro_level: Field<CellValue>,

    /// 魔方名 → 魔方の詳細
    ///
    /// 対象外の魔方は形を問わず無視するため、詳細は未解釈のまま保持し、
    /// 対象の魔方だけを`CubeRecord`として読み込みます。
    pub cubes: Field<OrderedMap<Field<Value>>>,

    /// 元素カテゴリ → キャラクター名 → キャラクターレコード
    pub elements: Field<OrderedMap<Field<OrderedMap<Field<Object<CharacterRecord>>>>>>,
}

impl Record for PlayerProfile {
    fn assign<'de, A>(&mut self, key: &str, access: &mut A) -> Result<bool, A::Error>
    where
        A: MapAccess<'de>,
    {
        match key {
            "name" => self.name = access.next_value()?,
            "synchroLevel" => self.synchro_level = access.next_value()?,
            "cubes" => self.cubes = access.next_value()?,
            "elements" => self.elements = access.next_value()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// 魔方の詳細
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CubeRecord {
    /// 魔方レベル
    pub cube_level: Field<CellValue>,
}

impl Record for CubeRecord {
    fn assign<'de, A>(&mut self, key: &str, access: &mut A) -> Result<bool, A::Error>
    where
        A: MapAccess<'de>,
    {
        match key {
            "cube_level" => self.cube_level = access.next_value()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// キャラクターレコード
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterRecord {
    pub name_code: Field<CellValue>,
    pub id: Field<CellValue>,
    pub priority: Field<CellValue>,
    pub skill1_level: Field<CellValue>,
    pub skill2_level: Field<CellValue>,
    pub skill_burst_level: Field<CellValue>,
    pub item_rare: Field<CellValue>,
    pub item_level: Field<CellValue>,
    pub limit_break: Field<CellValue>,

    /// スロットキー（"0".."3"）→ 効果の列
    pub equipments: Field<OrderedMap<Field<Vec<Field<Object<EffectRecord>>>>>>,
}

impl Record for CharacterRecord {
    fn assign<'de, A>(&mut self, key: &str, access: &mut A) -> Result<bool, A::Error>
    where
        A: MapAccess<'de>,
    {
        let field = match key {
            "name_code" => &mut self.name_code,
            "id" => &mut self.id,
            "priority" => &mut self.priority,
            "skill1_level" => &mut self.skill1_level,
            "skill2_level" => &mut self.skill2_level,
            "skill_burst_level" => &mut self.skill_burst_level,
            "item_rare" => &mut self.item_rare,
            "item_level" => &mut self.item_level,
            "limit_break" => &mut self.limit_break,
            "equipments" => {
                self.equipments = access.next_value()?;
                return Ok(true);
            }
            _ => return Ok(false),
        };
        *field = access.next_value()?;
        Ok(true)
    }
}

/// 装備効果レコード
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectRecord {
    /// 旧名称の効果種別
    pub function_type: Field<Value>,

    /// 効果値（数値、数値文字列、またはそれ以外）
    pub function_value: Field<Value>,
}

impl Record for EffectRecord {
    fn assign<'de, A>(&mut self, key: &str, access: &mut A) -> Result<bool, A::Error>
    where
        A: MapAccess<'de>,
    {
        match key {
            "function_type" => self.function_type = access.next_value()?,
            "function_value" => self.function_value = access.next_value()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl EffectRecord {
    /// 効果種別を集計カテゴリに対応付ける（未知・欠損・文字列以外は`None`）
    pub fn category(&self) -> Option<StatCategory> {
        match &self.function_type {
            Field::Present(Value::String(name)) => StatCategory::from_legacy(name),
            _ => None,
        }
    }

    /// 警告表示用の効果種別
    pub fn raw_type(&self) -> String {
        match &self.function_type {
            Field::Present(Value::String(name)) => name.clone(),
            Field::Present(other) => other.to_string(),
            Field::Absent | Field::Null => "Unknown Type".to_string(),
        }
    }
}
