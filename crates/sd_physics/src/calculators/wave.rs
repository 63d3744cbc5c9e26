// crates/sd_physics/src/calculators/wave.rs

//! 波浪 Stokes 漂移（深水基线）
//!
//! 基线速度取 H²/T 乘以经验系数，方向为波向叠加 ±15° 均匀
//! 抖动以代表方向谱展宽。浅水增强见 [`crate::shallow`]。

use crate::types::DriftVector;
use rand::Rng;
use sd_environment::snapshot::WaveConditions;
use sd_geo::displacement::LongitudeScale;

/// 波浪漂移计算器
#[derive(Debug, Clone, Copy)]
pub struct WaveDriftCalculator {
    /// Stokes 系数 k_s
    pub stokes_coefficient: f64,
    /// 方向展宽半宽 [度]
    pub spreading_deg: f64,
    /// 经度刻度
    pub scale: LongitudeScale,
}

impl Default for WaveDriftCalculator {
    fn default() -> Self {
        Self {
            stokes_coefficient: 0.01,
            spreading_deg: 15.0,
            scale: LongitudeScale::Uniform,
        }
    }
}

impl WaveDriftCalculator {
    /// 计算单步位移
    #[must_use]
    pub fn calculate(
        &self,
        waves: &WaveConditions,
        dt_hours: f64,
        lat_deg: f64,
        rng: &mut impl Rng,
    ) -> DriftVector {
        if waves.height_m <= 0.0 || waves.period_s <= 0.0 {
            return DriftVector::ZERO;
        }

        let speed_kmh =
            waves.height_m * waves.height_m / waves.period_s * self.stokes_coefficient;
        let jitter = rng.gen_range(-self.spreading_deg..=self.spreading_deg);
        let direction = waves.direction_deg + jitter;

        DriftVector::from_course(speed_kmh * dt_hours, direction, lat_deg, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_flat_sea_no_drift() {
        let calc = WaveDriftCalculator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let d = calc.calculate(&WaveConditions::flat(), 1.0, 29.3, &mut rng);
        assert_eq!(d, DriftVector::ZERO);
    }

    #[test]
    fn test_magnitude_follows_height_squared() {
        let calc = WaveDriftCalculator {
            spreading_deg: 0.0,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let w1 = WaveConditions::new(1.0, 8.0, 0.0);
        let w2 = WaveConditions::new(2.0, 8.0, 0.0);

        let d1 = calc.calculate(&w1, 1.0, 0.0, &mut rng);
        let d2 = calc.calculate(&w2, 1.0, 0.0, &mut rng);

        // H 翻倍 → 位移 4 倍
        assert!((d2.dlat_deg / d1.dlat_deg - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_direction_jitter_bounded() {
        let calc = WaveDriftCalculator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let waves = WaveConditions::new(2.0, 8.0, 90.0);

        for _ in 0..200 {
            let d = calc.calculate(&waves, 1.0, 0.0, &mut rng);
            // 东向 ±15°，纬度分量不会超过 sin(15°) 份额
            let angle = d.dlng_deg.atan2(d.dlat_deg).to_degrees();
            assert!((angle - 90.0).abs() <= 15.0 + 1e-9);
        }
    }
}
