// crates/sd_physics/src/calculators/leeway.rs

//! 风压差漂移
//!
//! 按物体类型查系数表：位移速度为顺风系数乘以风速，方向在
//! 风向基础上加侧偏角。

use crate::object::ObjectType;
use crate::types::DriftVector;
use sd_environment::snapshot::WindConditions;
use sd_geo::displacement::LongitudeScale;
use sd_geo::units::knots_to_kmh;

/// 风压差计算器
#[derive(Debug, Clone, Copy, Default)]
pub struct LeewayCalculator {
    /// 经度刻度
    pub scale: LongitudeScale,
}

impl LeewayCalculator {
    /// 计算单步位移
    #[must_use]
    pub fn calculate(
        &self,
        object: ObjectType,
        wind: &WindConditions,
        dt_hours: f64,
        lat_deg: f64,
    ) -> DriftVector {
        if wind.speed_kn <= 0.0 {
            return DriftVector::ZERO;
        }

        let coeffs = object.leeway();
        let distance_km = coeffs.downwind_factor * knots_to_kmh(wind.speed_kn) * dt_hours;
        let direction = wind.direction_deg + coeffs.crosswind_deg;

        DriftVector::from_course(distance_km, direction, lat_deg, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calm_no_leeway() {
        let calc = LeewayCalculator::default();
        let d = calc.calculate(ObjectType::Sailboat, &WindConditions::calm(), 1.0, 29.3);
        assert_eq!(d, DriftVector::ZERO);
    }

    #[test]
    fn test_person_in_water_magnitude() {
        let calc = LeewayCalculator::default();
        let wind = WindConditions::new(20.0, 0.0);
        let d = calc.calculate(ObjectType::PersonInWater, &wind, 1.0, 29.3);

        // 0.03 × 20 kn × 1.852 km/h × 1 h，方向 0 + 15°
        let dist = 0.03 * 20.0 * 1.852;
        let expected_lat = dist * 15.0_f64.to_radians().cos() / 111.32;
        let expected_lng = dist * 15.0_f64.to_radians().sin() / 111.32;
        assert!((d.dlat_deg - expected_lat).abs() < 1e-12);
        assert!((d.dlng_deg - expected_lng).abs() < 1e-12);
    }

    #[test]
    fn test_raft_drifts_faster_than_person() {
        let calc = LeewayCalculator::default();
        let wind = WindConditions::new(15.0, 45.0);

        let person = calc.calculate(ObjectType::PersonInWater, &wind, 1.0, 0.0);
        let raft = calc.calculate(ObjectType::LifeRaft10Plus, &wind, 1.0, 0.0);
        assert!(raft.magnitude_deg() > person.magnitude_deg());
    }
}
