//! Transform Module
//!
//! プレイヤープロファイル1件を基本信息・角色信息の2表に変換するモジュール。
//!
//! 装備効果は旧名称の効果種別ごとに9カテゴリへ集計します。数値に変換できない
//! 効果値は警告として記録し、その効果だけを集計から除外して処理を続けます。

use serde::Deserialize;
use serde_json::error::Category;
use serde_json::Value;
use tracing::warn;

use crate::api::TrackedCube;
use crate::error::JsonToXlsxError;
use crate::report::{
    CharacterRow, EffectWarning, ParseIssue, ProfileReport, StatTotals, SummaryRow,
};
use crate::types::{
    CellValue, CharacterRecord, CubeRecord, EffectRecord, Field, Object, PlayerProfile,
};

/// JSON文字列をプロファイルとして解析する
///
/// # 戻り値
///
/// * `Ok(PlayerProfile)` - 解析に成功した場合
/// * `Err(JsonToXlsxError::Json)` - JSON構文が不正な場合
/// * `Err(JsonToXlsxError::UnexpectedError)` - 構文は正しいが、型が想定と異なる場合
pub fn decode_profile(text: &str) -> Result<PlayerProfile, JsonToXlsxError> {
    serde_json::from_str::<Object<PlayerProfile>>(text)
        .map(Object::into_inner)
        .map_err(|e| match e.classify() {
            Category::Data => JsonToXlsxError::UnexpectedError(e.to_string()),
            Category::Io | Category::Syntax | Category::Eof => JsonToXlsxError::Json(e),
        })
}

/// 対象の魔方の詳細を読み込む
fn decode_cube(cube_name: &str, details: Value) -> Result<CubeRecord, JsonToXlsxError> {
    Object::<CubeRecord>::deserialize(details)
        .map(Object::into_inner)
        .map_err(|e| JsonToXlsxError::UnexpectedError(format!("cubes.{}: {}", cube_name, e)))
}

/// JSON文字列を解析して変換する
pub fn transform_str(text: &str) -> Result<ProfileReport, JsonToXlsxError> {
    transform(decode_profile(text)?)
}

/// プロファイル1件を変換する
///
/// # 戻り値
///
/// * `Ok(ProfileReport)` - 変換結果と、集計から除外した効果の警告
/// * `Err(JsonToXlsxError::MissingRequiredField)` - マッピングや配列が必要な位置が`null`の場合
///
/// # 使用例
///
/// ```rust
/// use json2xlsx::{decode_profile, transform, StatCategory};
///
/// # fn main() -> Result<(), json2xlsx::JsonToXlsxError> {
/// let profile = decode_profile(r#"{
///     "name": "P1",
///     "elements": {"Fire": {"CharA": {"equipments": {
///         "0": [{"function_type": "StatAtk", "function_value": "10.5"}]
///     }}}}
/// }"#)?;
/// let report = transform(profile)?;
/// assert_eq!(report.characters[0].stats.get(StatCategory::Attack), 10.5);
/// # Ok(())
/// # }
/// ```
pub fn transform(profile: PlayerProfile) -> Result<ProfileReport, JsonToXlsxError> {
    let PlayerProfile {
        name,
        synchro_level,
        cubes,
        elements,
    } = profile;

    let player = name.into_cell();

    let mut cube_levels = [CellValue::not_available(), CellValue::not_available()];
    if let Some(cubes) = cubes.optional(|| "cubes".to_string())? {
        for (cube_name, details) in cubes {
            let Some(cube) = TrackedCube::from_label(&cube_name) else {
                continue;
            };
            let details = details.required(|| format!("cubes.{}", cube_name))?;
            cube_levels[cube.index()] = decode_cube(&cube_name, details)?.cube_level.into_cell();
        }
    }

    let summary = SummaryRow {
        player: player.clone(),
        synchro_level: synchro_level.into_cell(),
        cube_levels,
    };

    let mut characters = Vec::new();
    let mut warnings = Vec::new();

    if let Some(elements) = elements.optional(|| "elements".to_string())? {
        for (element, group) in elements {
            let group = group.required(|| format!("elements.{}", element))?;
            for (character, record) in group {
                let record = record
                    .required(|| format!("elements.{}.{}", element, character))?
                    .into_inner();
                characters.push(character_row(
                    &player,
                    &element,
                    character,
                    record,
                    &mut warnings,
                )?);
            }
        }
    }

    if characters.is_empty() {
        characters.push(CharacterRow::placeholder(player));
    }

    Ok(ProfileReport {
        summary,
        characters,
        warnings,
    })
}

fn character_row(
    player: &CellValue,
    element: &str,
    character: String,
    record: CharacterRecord,
    warnings: &mut Vec<EffectWarning>,
) -> Result<CharacterRow, JsonToXlsxError> {
    let CharacterRecord {
        name_code,
        id,
        priority,
        skill1_level,
        skill2_level,
        skill_burst_level,
        item_rare,
        item_level,
        limit_break,
        equipments,
    } = record;

    let fields = [
        name_code,
        id,
        priority,
        skill1_level,
        skill2_level,
        skill_burst_level,
        item_rare,
        item_level,
        limit_break,
    ]
    .map(Field::into_cell);

    let path = format!("elements.{}.{}.equipments", element, character);
    let mut totals = StatTotals::default();

    if let Some(slots) = equipments.optional(|| path.clone())? {
        for (slot, effects) in slots {
            let effects = effects.required(|| format!("{}.{}", path, slot))?;
            for (i, effect) in effects.into_iter().enumerate() {
                let effect = effect
                    .required(|| format!("{}.{}[{}]", path, slot, i))?
                    .into_inner();
                accumulate(&effect, &mut totals, element, &character, warnings);
            }
        }
    }

    Ok(CharacterRow {
        player: player.clone(),
        element: element.to_string(),
        character: CellValue::Text(character),
        fields,
        stats: totals.rounded(),
    })
}

fn accumulate(
    effect: &EffectRecord,
    totals: &mut StatTotals,
    element: &str,
    character: &str,
    warnings: &mut Vec<EffectWarning>,
) {
    // 未知の効果種別は黙って無視する
    let Some(category) = effect.category() else {
        return;
    };

    match parse_effect_value(&effect.function_value) {
        Ok(value) => totals.add(category, value),
        Err(issue) => {
            let warning = EffectWarning {
                element: element.to_string(),
                character: character.to_string(),
                function_type: effect.raw_type(),
                category,
                value: display_raw(&effect.function_value),
                issue,
            };
            warn!("{} ({})", warning, warning.issue);
            warnings.push(warning);
        }
    }
}

/// 効果値を数値に変換する
///
/// 数値はそのまま、文字列は前後の空白を除いて`f64`として解釈します。
/// 論理値は`1.0` / `0.0`として扱います。NaNと無限大はワークブックに
/// 書き込めないため、数値として扱いません。
pub fn parse_effect_value(raw: &Field<Value>) -> Result<f64, ParseIssue> {
    let value = match raw {
        Field::Absent => return Err(ParseIssue::Missing),
        Field::Null => return Err(ParseIssue::Null),
        Field::Present(Value::Null) => return Err(ParseIssue::Null),
        Field::Present(Value::Bool(b)) => return Ok(if *b { 1.0 } else { 0.0 }),
        Field::Present(Value::Number(n)) => n.as_f64().ok_or(ParseIssue::NotFinite)?,
        Field::Present(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(ParseIssue::Empty);
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| ParseIssue::NotNumeric(s.clone()))?
        }
        Field::Present(Value::Array(_)) => return Err(ParseIssue::Unsupported("array")),
        Field::Present(Value::Object(_)) => return Err(ParseIssue::Unsupported("object")),
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseIssue::NotFinite)
    }
}

fn display_raw(raw: &Field<Value>) -> String {
    match raw {
        Field::Absent => "None".to_string(),
        Field::Null => "null".to_string(),
        Field::Present(Value::String(s)) => s.clone(),
        Field::Present(other) => other.to_string(),
    }
}
