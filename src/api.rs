//! Public API Types
//!
//! 公開APIで使用する列挙型と固定の対応表を定義するモジュール。

/// 集計対象の能力カテゴリ
///
/// 装備効果を集計する9つの固定カテゴリです。各カテゴリは入力JSONの
/// 旧名称（`function_type`）1つと対応し、出力列は常に`ALL`の順で並びます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatCategory {
    /// 優越（`IncElementDmg`）
    ElementAdvantage,
    /// 攻撃（`StatAtk`）
    Attack,
    /// 蓄力速度（`StatChargeTime`）
    ChargeSpeed,
    /// 弾夹（`StatAmmoLoad`）
    AmmoCapacity,
    /// 蓄力伤害（`StatChargeDamage`）
    ChargeDamage,
    /// 防御（`StatDef`）
    Defense,
    /// 暴击率（`StatCritical`）
    CriticalRate,
    /// 命中率（`StatAccuracyCircle`）
    HitRate,
    /// 暴击伤害（`StatCriticalDamage`）
    CriticalDamage,
}

impl StatCategory {
    /// 出力列の順序
    pub const ALL: [StatCategory; 9] = [
        StatCategory::ElementAdvantage,
        StatCategory::Attack,
        StatCategory::ChargeSpeed,
        StatCategory::AmmoCapacity,
        StatCategory::ChargeDamage,
        StatCategory::Defense,
        StatCategory::CriticalRate,
        StatCategory::HitRate,
        StatCategory::CriticalDamage,
    ];

    /// 出力列の見出し
    pub fn label(self) -> &'static str {
        match self {
            StatCategory::ElementAdvantage => "优越",
            StatCategory::Attack => "攻击",
            StatCategory::ChargeSpeed => "蓄力速度",
            StatCategory::AmmoCapacity => "弹夹",
            StatCategory::ChargeDamage => "蓄力伤害",
            StatCategory::Defense => "防御",
            StatCategory::CriticalRate => "暴击率",
            StatCategory::HitRate => "命中率",
            StatCategory::CriticalDamage => "暴击伤害",
        }
    }

    /// 入力JSONでの旧名称
    pub fn legacy_name(self) -> &'static str {
        match self {
            StatCategory::ElementAdvantage => "IncElementDmg",
            StatCategory::Attack => "StatAtk",
            StatCategory::ChargeSpeed => "StatChargeTime",
            StatCategory::AmmoCapacity => "StatAmmoLoad",
            StatCategory::ChargeDamage => "StatChargeDamage",
            StatCategory::Defense => "StatDef",
            StatCategory::CriticalRate => "StatCritical",
            StatCategory::HitRate => "StatAccuracyCircle",
            StatCategory::CriticalDamage => "StatCriticalDamage",
        }
    }

    /// 旧名称からカテゴリを引く（未知の名称は`None`）
    pub fn from_legacy(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.legacy_name() == name)
    }

    /// `ALL`内での位置
    pub fn index(self) -> usize {
        self as usize
    }
}

/// 基本信息シートに出力する魔方
///
/// 入力の`cubes`に含まれるそれ以外の魔方は無視されます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedCube {
    /// 遗迹巨熊魔方
    RelicBastion,
    /// 战术巨熊魔方
    TacticalBastion,
}

impl TrackedCube {
    /// 出力列の順序
    pub const ALL: [TrackedCube; 2] = [TrackedCube::RelicBastion, TrackedCube::TacticalBastion];

    /// 入力JSONでの魔方名（出力列の見出しも兼ねる）
    pub fn label(self) -> &'static str {
        match self {
            TrackedCube::RelicBastion => "遗迹巨熊魔方",
            TrackedCube::TacticalBastion => "战术巨熊魔方",
        }
    }

    /// 魔方名から対象の魔方を引く
    pub fn from_label(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == name)
    }

    /// `ALL`内での位置
    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_category_order() {
        let labels: Vec<&str> = StatCategory::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec!["优越", "攻击", "蓄力速度", "弹夹", "蓄力伤害", "防御", "暴击率", "命中率", "暴击伤害"]
        );
    }

    #[test]
    fn test_stat_category_index_matches_position() {
        for (i, category) in StatCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_from_legacy_known_names() {
        assert_eq!(StatCategory::from_legacy("StatAtk"), Some(StatCategory::Attack));
        assert_eq!(
            StatCategory::from_legacy("StatCriticalDamage"),
            Some(StatCategory::CriticalDamage)
        );
        for category in StatCategory::ALL {
            assert_eq!(StatCategory::from_legacy(category.legacy_name()), Some(category));
        }
    }

    #[test]
    fn test_from_legacy_unknown_names() {
        assert_eq!(StatCategory::from_legacy("StatHp"), None);
        assert_eq!(StatCategory::from_legacy("statatk"), None);
        assert_eq!(StatCategory::from_legacy(""), None);
    }

    #[test]
    fn test_tracked_cube_lookup() {
        assert_eq!(TrackedCube::from_label("遗迹巨熊魔方"), Some(TrackedCube::RelicBastion));
        assert_eq!(TrackedCube::from_label("战术巨熊魔方"), Some(TrackedCube::TacticalBastion));
        assert_eq!(TrackedCube::from_label("其他魔方"), None);
        assert_eq!(TrackedCube::TacticalBastion.index(), 1);
    }
}
