// crates/sd_geodata/src/provider.rs

//! 地理数据提供者接口
//!
//! 抽象水深、岸线与离岸流数据的获取。所有方法都允许返回 None，
//! 表示该位置没有数据；降级到保守默认值由适配器负责。

use crate::shore::ShoreKind;
use sd_environment::snapshot::{BathymetryGradient, RipCurrentInfo};
use serde::{Deserialize, Serialize};

/// 最近岸线信息
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShoreInfo {
    /// 到岸线的距离 [km]
    pub distance_km: f64,
    /// 指向岸线的方向 [度]
    pub direction_deg: f64,
    /// 岸线法向 [度]，指向海侧
    pub shore_normal_deg: f64,
}

/// 地理数据提供者 trait
pub trait GeoProvider: Send + Sync {
    /// 水深 [m]，向下为正；<= 0 表示陆地
    fn depth(&self, lat: f64, lng: f64) -> Option<f64>;

    /// 水深梯度
    fn bathymetry_gradient(&self, lat: f64, lng: f64) -> Option<BathymetryGradient>;

    /// 最近岸线信息
    fn shore_info(&self, lat: f64, lng: f64) -> Option<ShoreInfo>;

    /// 岸线类型
    fn shore_type(&self, lat: f64, lng: f64) -> Option<ShoreKind>;

    /// 离岸流风险
    fn rip_current(&self, lat: f64, lng: f64, time_s: f64) -> Option<RipCurrentInfo>;
}

/// 空提供者：所有查询返回 None
///
/// 适配器配合它运行时完全依赖保守默认值。
#[derive(Debug, Clone, Copy, Default)]
pub struct NullGeoProvider;

impl GeoProvider for NullGeoProvider {
    fn depth(&self, _lat: f64, _lng: f64) -> Option<f64> {
        None
    }

    fn bathymetry_gradient(&self, _lat: f64, _lng: f64) -> Option<BathymetryGradient> {
        None
    }

    fn shore_info(&self, _lat: f64, _lng: f64) -> Option<ShoreInfo> {
        None
    }

    fn shore_type(&self, _lat: f64, _lng: f64) -> Option<ShoreKind> {
        None
    }

    fn rip_current(&self, _lat: f64, _lng: f64, _time_s: f64) -> Option<RipCurrentInfo> {
        None
    }
}
