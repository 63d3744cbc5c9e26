// crates/sd_physics/src/calculators/diffusion.rs

//! 湍流扩散
//!
//! 各向同性随机游走：步长 √(D·Δt)·U[0,1]，方向在 [0, 2π) 均匀。
//! 未分辨的次网格过程统一归入扩散系数 D。

use crate::types::DriftVector;
use rand::Rng;
use sd_geo::displacement::LongitudeScale;

/// 扩散计算器
#[derive(Debug, Clone, Copy)]
pub struct DiffusionCalculator {
    /// 扩散系数 D [km²/h]
    pub coefficient: f64,
    /// 经度刻度
    pub scale: LongitudeScale,
}

impl Default for DiffusionCalculator {
    fn default() -> Self {
        Self {
            coefficient: 0.001,
            scale: LongitudeScale::Uniform,
        }
    }
}

impl DiffusionCalculator {
    /// 创建自定义系数的计算器
    #[must_use]
    pub fn with_coefficient(coefficient: f64) -> Self {
        Self {
            coefficient,
            ..Default::default()
        }
    }

    /// 计算单步随机位移
    #[must_use]
    pub fn calculate(&self, dt_hours: f64, lat_deg: f64, rng: &mut impl Rng) -> DriftVector {
        if self.coefficient <= 0.0 {
            return DriftVector::ZERO;
        }

        let magnitude_km = (self.coefficient * dt_hours).sqrt() * rng.gen::<f64>();
        let direction_deg = rng.gen_range(0.0..360.0);

        DriftVector::from_course(magnitude_km, direction_deg, lat_deg, self.scale)
    }
}
