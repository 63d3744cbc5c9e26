// crates/sd_geo/src/bounds.rs

//! 经纬度包围盒
//!
//! 用于粒子云范围统计与搜索区域度量。

use crate::point::GeoPoint;
use crate::units::KM_PER_DEG_LAT;
use serde::{Deserialize, Serialize};

/// 经纬度包围盒
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    /// 最小纬度
    pub min_lat: f64,
    /// 最小经度
    pub min_lng: f64,
    /// 最大纬度
    pub max_lat: f64,
    /// 最大经度
    pub max_lng: f64,
}

impl GeoBounds {
    /// 创建新的包围盒，自动修正角点顺序
    #[must_use]
    pub fn new(min_lat: f64, min_lng: f64, max_lat: f64, max_lng: f64) -> Self {
        Self {
            min_lat: min_lat.min(max_lat),
            min_lng: min_lng.min(max_lng),
            max_lat: min_lat.max(max_lat),
            max_lng: min_lng.max(max_lng),
        }
    }

    /// 从点集构造包围盒
    ///
    /// 空集返回 None。
    #[must_use]
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self {
            min_lat: first.lat,
            min_lng: first.lng,
            max_lat: first.lat,
            max_lng: first.lng,
        };
        for p in &points[1..] {
            bounds.min_lat = bounds.min_lat.min(p.lat);
            bounds.min_lng = bounds.min_lng.min(p.lng);
            bounds.max_lat = bounds.max_lat.max(p.lat);
            bounds.max_lng = bounds.max_lng.max(p.lng);
        }
        Some(bounds)
    }

    /// 检查点是否在包围盒内
    #[must_use]
    pub fn contains(&self, p: &GeoPoint) -> bool {
        p.lat >= self.min_lat
            && p.lat <= self.max_lat
            && p.lng >= self.min_lng
            && p.lng <= self.max_lng
    }

    /// 中心点
    #[must_use]
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// 纬度跨度 [度]
    #[must_use]
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// 经度跨度 [度]
    #[must_use]
    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    /// 合并两个包围盒
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_lat: self.min_lat.min(other.min_lat),
            min_lng: self.min_lng.min(other.min_lng),
            max_lat: self.max_lat.max(other.max_lat),
            max_lng: self.max_lng.max(other.max_lng),
        }
    }

    /// 向四周扩展指定度数
    #[must_use]
    pub fn expand(&self, deg: f64) -> Self {
        Self {
            min_lat: self.min_lat - deg,
            min_lng: self.min_lng - deg,
            max_lat: self.max_lat + deg,
            max_lng: self.max_lng + deg,
        }
    }

    /// 近似面积 [km²]
    ///
    /// 经度方向按中心纬度做 cos 修正。
    #[must_use]
    pub fn area_km2(&self) -> f64 {
        let mean_lat = (self.min_lat + self.max_lat) / 2.0;
        let dy = self.lat_span() * KM_PER_DEG_LAT;
        let dx = self.lng_span() * KM_PER_DEG_LAT * mean_lat.to_radians().cos();
        dy * dx
    }
}
