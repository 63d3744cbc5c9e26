// crates/sd_physics/src/object.rs

//! 漂浮物类型与风压差系数
//!
//! 风压差（leeway）是漂浮物相对风矢量的偏移漂移，系数随物体
//! 形状与吃水差异很大。系数表按物体类型查询：顺风系数为风速的
//! 比例因子，偏角为相对风向的侧偏度数。

use serde::{Deserialize, Serialize};

/// 漂浮物类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    /// 落水人员
    #[serde(rename = "person-in-water")]
    PersonInWater,
    /// 穿救生衣人员
    #[serde(rename = "person-with-pfd")]
    PersonWithPfd,
    /// 穿干式救生服人员
    #[serde(rename = "person-in-drysuit")]
    PersonInDrysuit,
    /// 4 人救生筏
    #[serde(rename = "life-raft-4")]
    LifeRaft4,
    /// 6 人救生筏
    #[serde(rename = "life-raft-6")]
    LifeRaft6,
    /// 10 人及以上救生筏
    #[serde(rename = "life-raft-10-plus")]
    LifeRaft10Plus,
    /// 小型船只
    #[serde(rename = "small-vessel")]
    SmallVessel,
    /// 中型船只
    #[serde(rename = "medium-vessel")]
    MediumVessel,
    /// 帆船
    #[serde(rename = "sailboat")]
    Sailboat,
    /// 皮划艇
    #[serde(rename = "kayak")]
    Kayak,
    /// 独木舟
    #[serde(rename = "canoe")]
    Canoe,
    /// 冲浪板
    #[serde(rename = "surfboard")]
    Surfboard,
    /// 桨板
    #[serde(rename = "paddleboard")]
    Paddleboard,
    /// 木质漂浮物
    #[serde(rename = "wood-debris")]
    WoodDebris,
    /// 塑料漂浮物
    #[serde(rename = "plastic-debris")]
    PlasticDebris,
    /// 保温箱
    #[serde(rename = "cooler")]
    Cooler,
}

impl Default for ObjectType {
    fn default() -> Self {
        Self::PersonInWater
    }
}

/// 风压差系数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeewayCoefficients {
    /// 顺风系数（相对风速）
    pub downwind_factor: f64,
    /// 侧偏角 [度]
    pub crosswind_deg: f64,
}

impl ObjectType {
    /// 全部类型
    pub const ALL: [Self; 16] = [
        Self::PersonInWater,
        Self::PersonWithPfd,
        Self::PersonInDrysuit,
        Self::LifeRaft4,
        Self::LifeRaft6,
        Self::LifeRaft10Plus,
        Self::SmallVessel,
        Self::MediumVessel,
        Self::Sailboat,
        Self::Kayak,
        Self::Canoe,
        Self::Surfboard,
        Self::Paddleboard,
        Self::WoodDebris,
        Self::PlasticDebris,
        Self::Cooler,
    ];

    /// 查询风压差系数
    #[must_use]
    pub const fn leeway(&self) -> LeewayCoefficients {
        let (downwind_factor, crosswind_deg) = match self {
            Self::PersonInWater => (0.03, 15.0),
            Self::PersonWithPfd => (0.04, 20.0),
            Self::PersonInDrysuit => (0.05, 25.0),
            Self::LifeRaft4 => (0.06, 10.0),
            Self::LifeRaft6 => (0.065, 12.0),
            Self::LifeRaft10Plus => (0.07, 15.0),
            Self::SmallVessel => (0.05, 5.0),
            Self::MediumVessel => (0.04, 3.0),
            Self::Sailboat => (0.08, 20.0),
            Self::Kayak => (0.045, 18.0),
            Self::Canoe => (0.05, 20.0),
            Self::Surfboard => (0.035, 25.0),
            Self::Paddleboard => (0.04, 22.0),
            Self::WoodDebris => (0.02, 30.0),
            Self::PlasticDebris => (0.045, 25.0),
            Self::Cooler => (0.055, 15.0),
        };
        LeewayCoefficients {
            downwind_factor,
            crosswind_deg,
        }
    }

    /// 对外标识符
    #[must_use]
    pub const fn identifier(&self) -> &'static str {
        match self {
            Self::PersonInWater => "person-in-water",
            Self::PersonWithPfd => "person-with-pfd",
            Self::PersonInDrysuit => "person-in-drysuit",
            Self::LifeRaft4 => "life-raft-4",
            Self::LifeRaft6 => "life-raft-6",
            Self::LifeRaft10Plus => "life-raft-10-plus",
            Self::SmallVessel => "small-vessel",
            Self::MediumVessel => "medium-vessel",
            Self::Sailboat => "sailboat",
            Self::Kayak => "kayak",
            Self::Canoe => "canoe",
            Self::Surfboard => "surfboard",
            Self::Paddleboard => "paddleboard",
            Self::WoodDebris => "wood-debris",
            Self::PlasticDebris => "plastic-debris",
            Self::Cooler => "cooler",
        }
    }

    /// 由标识符解析，未知标识符按落水人员处理
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.identifier() == s)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.identifier())
    }
}
