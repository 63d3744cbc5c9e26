// crates/sd_physics/src/calculators/current.rs

//! 海流漂移
//!
//! 粒子随表层流整体平移，默认因子 1.0。`depth_averaged` 提供
//! 按深度衰减与偏转的简化 Ekman 修正，供需要深度平均流的调用方使用。

use crate::types::DriftVector;
use sd_environment::snapshot::CurrentConditions;
use sd_geo::displacement::LongitudeScale;
use sd_geo::units::knots_to_kmh;

/// 海流漂移计算器
#[derive(Debug, Clone, Copy)]
pub struct CurrentDriftCalculator {
    /// 流漂移因子
    pub factor: f64,
    /// 经度刻度
    pub scale: LongitudeScale,
}

impl Default for CurrentDriftCalculator {
    fn default() -> Self {
        Self {
            factor: 1.0,
            scale: LongitudeScale::Uniform,
        }
    }
}

impl CurrentDriftCalculator {
    /// 计算单步位移
    #[must_use]
    pub fn calculate(
        &self,
        current: &CurrentConditions,
        dt_hours: f64,
        lat_deg: f64,
    ) -> DriftVector {
        if current.speed_kn <= 0.0 {
            return DriftVector::ZERO;
        }
        let distance_km = self.factor * knots_to_kmh(current.speed_kn) * dt_hours;
        DriftVector::from_course(distance_km, current.direction_deg, lat_deg, self.scale)
    }

    /// 深度平均修正
    ///
    /// 流速按 exp(−d/50) 衰减，流向按 0.5°/m 偏转（Ekman 螺旋的
    /// 粗略代理）。
    #[must_use]
    pub fn depth_averaged(current: &CurrentConditions, depth_m: f64) -> CurrentConditions {
        CurrentConditions {
            speed_kn: current.speed_kn * (-depth_m / 50.0).exp(),
            direction_deg: (current.direction_deg + 0.5 * depth_m).rem_euclid(360.0),
            variation: current.variation,
        }
    }
}
