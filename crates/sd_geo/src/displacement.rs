// crates/sd_geo/src/displacement.rs

//! 小位移平面近似
//!
//! 漂移步长通常只有数十米到几百米，引擎用平面近似把千米位移
//! 转换为经纬度增量：
//!
//! ```text
//! Δlat = Δy_km / 111.32
//! Δlng = Δx_km / (111.32 · cos φ)
//! ```
//!
//! 漂移路径在经度方向历史上省略了 cos φ 项，两个方向都用
//! 111.32 km/deg。为保持漂移方向与既有结果一致，默认刻度
//! [`LongitudeScale::Uniform`] 保留该行为，[`LongitudeScale::CosLatitude`]
//! 是未来修正的开关。

use crate::point::GeoPoint;
use crate::units::KM_PER_DEG_LAT;
use serde::{Deserialize, Serialize};

/// 经度方向的度-千米刻度选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LongitudeScale {
    /// 两个方向统一使用 111.32 km/deg（历史兼容行为）
    #[default]
    Uniform,
    /// 经度方向按 cos(纬度) 修正
    CosLatitude,
}

impl LongitudeScale {
    /// 给定纬度处每度经度对应的千米数
    #[inline]
    #[must_use]
    pub fn km_per_deg_lng(&self, lat_deg: f64) -> f64 {
        match self {
            Self::Uniform => KM_PER_DEG_LAT,
            Self::CosLatitude => {
                // 高纬处 cos 趋零，下限防止除零
                KM_PER_DEG_LAT * lat_deg.to_radians().cos().max(1e-6)
            }
        }
    }
}

/// 千米偏移转换为经纬度增量
///
/// # 参数
/// - `east_km`: 东向偏移 [km]
/// - `north_km`: 北向偏移 [km]
/// - `lat_deg`: 参考纬度 [度]
///
/// 返回 (Δlat, Δlng) [度]。
#[inline]
#[must_use]
pub fn offset_to_degrees(
    east_km: f64,
    north_km: f64,
    lat_deg: f64,
    scale: LongitudeScale,
) -> (f64, f64) {
    (
        north_km / KM_PER_DEG_LAT,
        east_km / scale.km_per_deg_lng(lat_deg),
    )
}

/// 航向位移分解
///
/// 漂移计算统一采用 北分量 = cos(dir)·d、东分量 = sin(dir)·d 的约定，
/// 各分量计算器必须保持一致，否则合成方向漂移。
///
/// 返回 (north_km, east_km)。
#[inline]
#[must_use]
pub fn course_offset_km(distance_km: f64, direction_deg: f64) -> (f64, f64) {
    let rad = direction_deg.to_radians();
    (rad.cos() * distance_km, rad.sin() * distance_km)
}

/// 按平面近似移动坐标点
#[inline]
#[must_use]
pub fn displace(p: &GeoPoint, east_km: f64, north_km: f64, scale: LongitudeScale) -> GeoPoint {
    let (dlat, dlng) = offset_to_degrees(east_km, north_km, p.lat, scale);
    GeoPoint::new(p.lat + dlat, p.lng + dlng)
}
