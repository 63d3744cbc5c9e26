// crates/sd_environment/src/snapshot.rs

//! 环境快照类型
//!
//! 一次 `conditions_at` 查询返回的全部环境量。对外接口单位约定：
//! 速度用节，温度用华氏度，波高用米，周期用秒，方向用真北度。

use serde::{Deserialize, Serialize};

/// 风况
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindConditions {
    /// 风速 [kn]
    pub speed_kn: f64,
    /// 风向 [度]，漂移方向约定为"吹向"方位
    pub direction_deg: f64,
    /// 阵风 [kn]
    pub gusts_kn: Option<f64>,
}

impl WindConditions {
    /// 创建新风况
    #[must_use]
    pub const fn new(speed_kn: f64, direction_deg: f64) -> Self {
        Self {
            speed_kn,
            direction_deg,
            gusts_kn: None,
        }
    }

    /// 静风
    #[must_use]
    pub const fn calm() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// 流况
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// 流速 [kn]
    pub speed_kn: f64,
    /// 流向 [度]
    pub direction_deg: f64,
    /// 流速波动幅度 [kn]
    pub variation: f64,
}

impl CurrentConditions {
    /// 创建新流况
    #[must_use]
    pub const fn new(speed_kn: f64, direction_deg: f64) -> Self {
        Self {
            speed_kn,
            direction_deg,
            variation: 0.0,
        }
    }

    /// 静水
    #[must_use]
    pub const fn slack() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// 波况
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveConditions {
    /// 有效波高 [m]
    pub height_m: f64,
    /// 谱峰周期 [s]
    pub period_s: f64,
    /// 波向 [度]
    pub direction_deg: f64,
    /// 岸线法向 [度]，指向海侧
    pub shore_normal_deg: Option<f64>,
}

impl WaveConditions {
    /// 创建新波况
    #[must_use]
    pub const fn new(height_m: f64, period_s: f64, direction_deg: f64) -> Self {
        Self {
            height_m,
            period_s,
            direction_deg,
            shore_normal_deg: None,
        }
    }

    /// 无浪
    #[must_use]
    pub const fn flat() -> Self {
        Self::new(0.0, 8.0, 0.0)
    }
}

/// Douglas 海况等级 0-8
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeaState(u8);

impl SeaState {
    /// 创建海况等级，超出范围时截断到 [0, 8]
    #[must_use]
    pub fn new(level: u8) -> Self {
        Self(level.min(8))
    }

    /// 由有效波高推算 Douglas 等级
    #[must_use]
    pub fn from_wave_height(height_m: f64) -> Self {
        let level = match height_m {
            h if h <= 0.0 => 0,
            h if h < 0.1 => 1,
            h if h < 0.5 => 2,
            h if h < 1.25 => 3,
            h if h < 2.5 => 4,
            h if h < 4.0 => 5,
            h if h < 6.0 => 6,
            h if h < 9.0 => 7,
            _ => 8,
        };
        Self(level)
    }

    /// 等级数值
    #[inline]
    #[must_use]
    pub fn level(&self) -> u8 {
        self.0
    }
}

/// 潮汐信息
///
/// 相位约定：0 = 低潮憩流；[0, 0.5) 涨潮（向岸），[0.5, 1.0) 落潮（离岸）。
/// 浅水物理与潮流计算共用该约定。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TidalInfo {
    /// 潮汐相位 [0, 1)
    pub phase: f64,
    /// 向岸方向 [度]
    pub shore_direction_deg: f64,
    /// 岸线法向 [度]，指向海侧
    pub shore_normal_deg: f64,
}

impl TidalInfo {
    /// 是否处于涨潮段
    #[inline]
    #[must_use]
    pub fn is_flood(&self) -> bool {
        self.phase < 0.5
    }
}

/// 水深梯度
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BathymetryGradient {
    /// ∂z/∂x（东向）[m/度]
    pub dz_dx: f64,
    /// ∂z/∂y（北向）[m/度]
    pub dz_dy: f64,
    /// 梯度模
    pub magnitude: f64,
    /// 梯度方向 [度]
    pub direction_deg: f64,
}

impl BathymetryGradient {
    /// 由分量构造，自动计算模与方向
    #[must_use]
    pub fn from_components(dz_dx: f64, dz_dy: f64) -> Self {
        let magnitude = (dz_dx * dz_dx + dz_dy * dz_dy).sqrt();
        let direction_deg = dz_dx.atan2(dz_dy).to_degrees();
        Self {
            dz_dx,
            dz_dy,
            magnitude,
            direction_deg,
        }
    }

    /// 零梯度（平坦海底）
    #[must_use]
    pub const fn flat() -> Self {
        Self {
            dz_dx: 0.0,
            dz_dy: 0.0,
            magnitude: 0.0,
            direction_deg: 0.0,
        }
    }
}

/// 离岸流信息
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RipCurrentInfo {
    /// 风险 [0, 1]
    pub risk: f64,
    /// 流速 [m/s]
    pub strength: f64,
    /// 流向 [度]
    pub direction_deg: f64,
}

/// 环境快照
///
/// `conditions_at(lat, lng, t)` 的返回值，漂移引擎一步内只读。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvSnapshot {
    /// 风况
    pub wind: WindConditions,
    /// 流况
    pub current: CurrentConditions,
    /// 波况
    pub waves: WaveConditions,
    /// 水温 [°F]
    pub water_temp_f: f64,
    /// 气温 [°F]
    pub air_temp_f: f64,
    /// 能见度 [nm]
    pub visibility_nm: f64,
    /// Douglas 海况
    pub sea_state: SeaState,
    /// 潮汐信息
    pub tide: Option<TidalInfo>,
    /// 水深梯度
    pub bathymetry_gradient: Option<BathymetryGradient>,
    /// 离岸流
    pub rip_current: Option<RipCurrentInfo>,
}

impl EnvSnapshot {
    /// 全静环境（无风无流无浪）
    #[must_use]
    pub fn calm() -> Self {
        Self {
            wind: WindConditions::calm(),
            current: CurrentConditions::slack(),
            waves: WaveConditions::flat(),
            water_temp_f: 68.0,
            air_temp_f: 70.0,
            visibility_nm: 10.0,
            sea_state: SeaState::new(0),
            tide: None,
            bathymetry_gradient: None,
            rip_current: None,
        }
    }
}

impl Default for EnvSnapshot {
    fn default() -> Self {
        Self::calm()
    }
}
