// crates/sd_geo/src/point.rs

//! 地理坐标点与球面公式
//!
//! 提供项目统一的地理坐标类型 [`GeoPoint`]，以及基于球体近似
//! （半径 6371 km）的大圆距离、方位角、目标点与中点计算。
//!
//! # 示例
//!
//! ```
//! use sd_geo::point::GeoPoint;
//!
//! let galveston = GeoPoint::new(29.30, -94.80);
//! let offshore = GeoPoint::new(29.20, -94.70);
//!
//! let dist_km = galveston.haversine_km(&offshore);
//! let brg = galveston.bearing_to(&offshore);
//! let dest = galveston.destination(dist_km, brg);
//! assert!(dest.haversine_km(&offshore) < 1e-6);
//! ```

use crate::units::EARTH_RADIUS_KM;
use serde::{Deserialize, Serialize};

/// 地理坐标点 - 十进制度
///
/// 纬度北为正，经度东为正。
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// 纬度 [度]
    pub lat: f64,
    /// 经度 [度]
    pub lng: f64,
}

impl GeoPoint {
    /// 创建新的坐标点
    #[inline]
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// 判断是否为合法的地理坐标
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat.abs() <= 90.0
            && self.lng.abs() <= 180.0
    }

    /// 判断坐标分量是否为有限数
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// 大圆距离（haversine 公式）[km]
    #[must_use]
    pub fn haversine_km(&self, other: &Self) -> f64 {
        let phi1 = self.lat.to_radians();
        let phi2 = other.lat.to_radians();
        let d_phi = (other.lat - self.lat).to_radians();
        let d_lambda = (other.lng - self.lng).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }

    /// 初始方位角 [度]，正北为 0，顺时针，范围 [0, 360)
    #[must_use]
    pub fn bearing_to(&self, other: &Self) -> f64 {
        let phi1 = self.lat.to_radians();
        let phi2 = other.lat.to_radians();
        let d_lambda = (other.lng - self.lng).to_radians();

        let y = d_lambda.sin() * phi2.cos();
        let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();

        let deg = y.atan2(x).to_degrees();
        if deg < 0.0 {
            deg + 360.0
        } else {
            deg
        }
    }

    /// 沿给定方位角移动指定距离后的目标点
    ///
    /// # 参数
    /// - `distance_km`: 距离 [km]
    /// - `bearing_deg`: 方位角 [度]，正北为 0，顺时针
    #[must_use]
    pub fn destination(&self, distance_km: f64, bearing_deg: f64) -> Self {
        let delta = distance_km / EARTH_RADIUS_KM;
        let theta = bearing_deg.to_radians();
        let phi1 = self.lat.to_radians();
        let lambda1 = self.lng.to_radians();

        let phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos()).asin();
        let lambda2 = lambda1
            + (theta.sin() * delta.sin() * phi1.cos())
                .atan2(delta.cos() - phi1.sin() * phi2.sin());

        Self {
            lat: phi2.to_degrees(),
            lng: normalize_lng(lambda2.to_degrees()),
        }
    }

    /// 两点的大圆中点
    #[must_use]
    pub fn midpoint(&self, other: &Self) -> Self {
        let phi1 = self.lat.to_radians();
        let phi2 = other.lat.to_radians();
        let lambda1 = self.lng.to_radians();
        let d_lambda = (other.lng - self.lng).to_radians();

        let bx = phi2.cos() * d_lambda.cos();
        let by = phi2.cos() * d_lambda.sin();

        let phi_m = (phi1.sin() + phi2.sin())
            .atan2(((phi1.cos() + bx).powi(2) + by * by).sqrt());
        let lambda_m = lambda1 + by.atan2(phi1.cos() + bx);

        Self {
            lat: phi_m.to_degrees(),
            lng: normalize_lng(lambda_m.to_degrees()),
        }
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl From<GeoPoint> for (f64, f64) {
    fn from(p: GeoPoint) -> Self {
        (p.lat, p.lng)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// 经度归一化到 [-180, 180]
#[inline]
fn normalize_lng(lng: f64) -> f64 {
    if lng > 180.0 {
        lng - 360.0
    } else if lng < -180.0 {
        lng + 360.0
    } else {
        lng
    }
}

// ============================================================================
// 测试
// ============================================================================
