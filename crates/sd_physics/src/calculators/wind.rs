// crates/sd_physics/src/calculators/wind.rs

//! 风致漂移
//!
//! 表面漂移取风速的固定比例（默认 3%），方向沿风矢量。

use crate::types::DriftVector;
use sd_environment::snapshot::WindConditions;
use sd_geo::displacement::LongitudeScale;
use sd_geo::units::knots_to_kmh;

/// 风致漂移计算器
#[derive(Debug, Clone, Copy)]
pub struct WindDriftCalculator {
    /// 风漂移因子（相对风速）
    pub factor: f64,
    /// 经度刻度
    pub scale: LongitudeScale,
}

impl Default for WindDriftCalculator {
    fn default() -> Self {
        Self {
            factor: 0.03,
            scale: LongitudeScale::Uniform,
        }
    }
}

impl WindDriftCalculator {
    /// 创建自定义因子的计算器
    #[must_use]
    pub fn with_factor(factor: f64) -> Self {
        Self {
            factor,
            ..Default::default()
        }
    }

    /// 计算单步位移
    ///
    /// # 参数
    /// - `dt_hours`: 步长 [小时]
    /// - `lat_deg`: 粒子纬度，仅纬度修正刻度使用
    #[must_use]
    pub fn calculate(&self, wind: &WindConditions, dt_hours: f64, lat_deg: f64) -> DriftVector {
        if wind.speed_kn <= 0.0 {
            return DriftVector::ZERO;
        }
        let distance_km = self.factor * knots_to_kmh(wind.speed_kn) * dt_hours;
        DriftVector::from_course(distance_km, wind.direction_deg, lat_deg, self.scale)
    }
}
