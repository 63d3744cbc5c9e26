// crates/sd_physics/src/types.rs

//! 位移向量类型
//!
//! 单步漂移的统一输出：经纬度增量 [度]。

use sd_geo::displacement::{course_offset_km, offset_to_degrees, LongitudeScale};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// 单步位移 [度]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DriftVector {
    /// 纬度增量
    pub dlat_deg: f64,
    /// 经度增量
    pub dlng_deg: f64,
}

impl DriftVector {
    /// 零位移
    pub const ZERO: Self = Self {
        dlat_deg: 0.0,
        dlng_deg: 0.0,
    };

    /// 创建位移向量
    #[inline]
    #[must_use]
    pub const fn new(dlat_deg: f64, dlng_deg: f64) -> Self {
        Self { dlat_deg, dlng_deg }
    }

    /// 由航向距离构造位移
    ///
    /// 北分量 = cos(dir)·d，东分量 = sin(dir)·d；负距离表示反向。
    ///
    /// # 参数
    /// - `distance_km`: 距离 [km]
    /// - `direction_deg`: 漂向 [度]
    /// - `lat_deg`: 参考纬度，仅 [`LongitudeScale::CosLatitude`] 使用
    #[inline]
    #[must_use]
    pub fn from_course(
        distance_km: f64,
        direction_deg: f64,
        lat_deg: f64,
        scale: LongitudeScale,
    ) -> Self {
        let (north_km, east_km) = course_offset_km(distance_km, direction_deg);
        let (dlat, dlng) = offset_to_degrees(east_km, north_km, lat_deg, scale);
        Self::new(dlat, dlng)
    }

    /// 分量是否均为有限数
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.dlat_deg.is_finite() && self.dlng_deg.is_finite()
    }

    /// 位移模长 [度]
    #[inline]
    #[must_use]
    pub fn magnitude_deg(&self) -> f64 {
        (self.dlat_deg * self.dlat_deg + self.dlng_deg * self.dlng_deg).sqrt()
    }
}

impl Add for DriftVector {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            dlat_deg: self.dlat_deg + other.dlat_deg,
            dlng_deg: self.dlng_deg + other.dlng_deg,
        }
    }
}

impl AddAssign for DriftVector {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.dlat_deg += other.dlat_deg;
        self.dlng_deg += other.dlng_deg;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_course_north() {
        let d = DriftVector::from_course(111.32, 0.0, 29.3, LongitudeScale::Uniform);
        assert!((d.dlat_deg - 1.0).abs() < 1e-12);
        assert!(d.dlng_deg.abs() < 1e-12);
    }

    #[test]
    fn test_from_course_east_uniform_scale() {
        // 统一刻度下东向 111.32 km 恰为 1 度，与纬度无关
        let d = DriftVector::from_course(111.32, 90.0, 60.0, LongitudeScale::Uniform);
        assert!((d.dlng_deg - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_distance_reverses() {
        let fwd = DriftVector::from_course(1.0, 45.0, 0.0, LongitudeScale::Uniform);
        let back = DriftVector::from_course(-1.0, 45.0, 0.0, LongitudeScale::Uniform);
        assert!((fwd.dlat_deg + back.dlat_deg).abs() < 1e-15);
        assert!((fwd.dlng_deg + back.dlng_deg).abs() < 1e-15);
    }

    #[test]
    fn test_add_assign() {
        let mut total = DriftVector::ZERO;
        total += DriftVector::new(0.1, 0.2);
        total += DriftVector::new(0.3, -0.1);
        assert!((total.dlat_deg - 0.4).abs() < 1e-15);
        assert!((total.dlng_deg - 0.1).abs() < 1e-15);
    }
}
