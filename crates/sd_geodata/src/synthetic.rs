// crates/sd_geodata/src/synthetic.rs

//! 合成地理数据提供者
//!
//! 平面海底加一条东西走向直线岸线的理想化地形，用于测试与演示：
//! 岸线以北为陆地，以南为水域。岸线以采样点形式存入 R 树，
//! 最近岸线查询走空间索引，与真实岸线数据源的查询路径一致。

use crate::provider::{GeoProvider, ShoreInfo};
use crate::shore::ShoreKind;
use rstar::RTree;
use sd_environment::snapshot::{BathymetryGradient, RipCurrentInfo};
use sd_geo::point::GeoPoint;

/// 岸线采样间隔 [度]
const COASTLINE_SAMPLE_DEG: f64 = 0.005;

/// 离岸流区域
#[derive(Debug, Clone, Copy)]
struct RipZone {
    center: GeoPoint,
    radius_km: f64,
    info: RipCurrentInfo,
}

/// 合成地理数据提供者
pub struct SyntheticGeoProvider {
    /// 水域水深 [m]
    depth_m: f64,
    /// 岸线纬度，北侧为陆地
    shoreline_lat: Option<f64>,
    /// 岸线类型
    shore_kind: ShoreKind,
    /// 线性变浅带宽度 [度]；None 表示水深均匀直抵岸线
    shoaling_band_deg: Option<f64>,
    /// 岸线采样点索引 (lng, lat)
    coastline: Option<RTree<[f64; 2]>>,
    /// 离岸流区域
    rip: Option<RipZone>,
}

impl SyntheticGeoProvider {
    /// 均匀水深、无岸线的开阔海域
    #[must_use]
    pub fn flat(depth_m: f64) -> Self {
        Self {
            depth_m,
            shoreline_lat: None,
            shore_kind: ShoreKind::Sandy,
            shoaling_band_deg: None,
            coastline: None,
            rip: None,
        }
    }

    /// 在指定纬度放置一条东西走向岸线，北侧为陆地
    ///
    /// # 参数
    /// - `shoreline_lat`: 岸线纬度 [度]
    /// - `lng_center`: 采样中心经度 [度]
    /// - `lng_half_span`: 采样半宽 [度]
    #[must_use]
    pub fn with_shoreline_north(
        mut self,
        shoreline_lat: f64,
        lng_center: f64,
        lng_half_span: f64,
        kind: ShoreKind,
    ) -> Self {
        let mut points = Vec::new();
        let mut lng = lng_center - lng_half_span;
        while lng <= lng_center + lng_half_span {
            points.push([lng, shoreline_lat]);
            lng += COASTLINE_SAMPLE_DEG;
        }

        self.shoreline_lat = Some(shoreline_lat);
        self.shore_kind = kind;
        self.coastline = Some(RTree::bulk_load(points));
        self
    }

    /// 启用岸前线性变浅带，水深从 `depth_m` 线性减小到岸线处为零
    #[must_use]
    pub fn with_shoaling_band(mut self, band_deg: f64) -> Self {
        self.shoaling_band_deg = Some(band_deg);
        self
    }

    /// 放置一处圆形离岸流区域
    #[must_use]
    pub fn with_rip_zone(
        mut self,
        center: GeoPoint,
        radius_km: f64,
        risk: f64,
        strength: f64,
        direction_deg: f64,
    ) -> Self {
        self.rip = Some(RipZone {
            center,
            radius_km,
            info: RipCurrentInfo {
                risk,
                strength,
                direction_deg,
            },
        });
        self
    }
}

impl GeoProvider for SyntheticGeoProvider {
    fn depth(&self, lat: f64, _lng: f64) -> Option<f64> {
        match self.shoreline_lat {
            None => Some(self.depth_m),
            Some(sl) => {
                if lat >= sl {
                    // 陆地
                    return Some(-0.5);
                }
                match self.shoaling_band_deg {
                    Some(band) if band > 0.0 => {
                        let frac = ((sl - lat) / band).clamp(0.0, 1.0);
                        Some(self.depth_m * frac)
                    }
                    _ => Some(self.depth_m),
                }
            }
        }
    }

    fn bathymetry_gradient(&self, lat: f64, _lng: f64) -> Option<BathymetryGradient> {
        let sl = self.shoreline_lat?;
        let band = self.shoaling_band_deg?;
        if lat >= sl || band <= 0.0 {
            return None;
        }
        // 变浅带内水深向北线性减小
        if (sl - lat) < band {
            Some(BathymetryGradient::from_components(0.0, -self.depth_m / band))
        } else {
            None
        }
    }

    fn shore_info(&self, lat: f64, lng: f64) -> Option<ShoreInfo> {
        let tree = self.coastline.as_ref()?;
        let nearest = tree.nearest_neighbor(&[lng, lat])?;

        let here = GeoPoint::new(lat, lng);
        let coast = GeoPoint::new(nearest[1], nearest[0]);

        Some(ShoreInfo {
            distance_km: here.haversine_km(&coast),
            direction_deg: here.bearing_to(&coast),
            // 法向指向海侧
            shore_normal_deg: coast.bearing_to(&here),
        })
    }

    fn shore_type(&self, _lat: f64, _lng: f64) -> Option<ShoreKind> {
        self.shoreline_lat.map(|_| self.shore_kind)
    }

    fn rip_current(&self, lat: f64, lng: f64, _time_s: f64) -> Option<RipCurrentInfo> {
        let zone = self.rip.as_ref()?;
        let here = GeoPoint::new(lat, lng);
        if here.haversine_km(&zone.center) <= zone.radius_km {
            Some(zone.info)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn galveston_provider() -> SyntheticGeoProvider {
        SyntheticGeoProvider::flat(3.0).with_shoreline_north(29.40, -94.80, 0.5, ShoreKind::Sandy)
    }

    #[test]
    fn test_flat_depth_everywhere() {
        let p = SyntheticGeoProvider::flat(35.0);
        assert_eq!(p.depth(29.3, -94.8), Some(35.0));
        assert_eq!(p.depth(0.0, 0.0), Some(35.0));
        assert!(p.shore_type(29.3, -94.8).is_none());
    }

    #[test]
    fn test_land_north_of_shoreline() {
        let p = galveston_provider();
        assert!(p.depth(29.45, -94.8).unwrap() <= 0.0);
        assert_eq!(p.depth(29.30, -94.8), Some(3.0));
    }

    #[test]
    fn test_shore_info_points_north() {
        let p = galveston_provider();
        let info = p.shore_info(29.30, -94.80).unwrap();

        // 岸线在正北 0.1°，距离约 11.1 km
        assert!((info.distance_km - 11.12).abs() < 0.2);
        assert!(info.direction_deg < 1.0 || info.direction_deg > 359.0);
        // 法向指向海侧（南）
        assert!((info.shore_normal_deg - 180.0).abs() < 1.0);
    }

    #[test]
    fn test_shoaling_band_gradient() {
        let p = SyntheticGeoProvider::flat(10.0)
            .with_shoreline_north(29.40, -94.80, 0.5, ShoreKind::Sandy)
            .with_shoaling_band(0.1);

        // 带内水深线性变浅
        let d_mid = p.depth(29.35, -94.8).unwrap();
        assert!((d_mid - 5.0).abs() < 1e-9);

        let g = p.bathymetry_gradient(29.35, -94.8).unwrap();
        assert!(g.magnitude > 0.0);
        // 带外无梯度
        assert!(p.bathymetry_gradient(29.0, -94.8).is_none());
    }

    #[test]
    fn test_rip_zone_radius() {
        let center = GeoPoint::new(29.35, -94.80);
        let p = galveston_provider().with_rip_zone(center, 1.0, 0.8, 0.9, 180.0);

        assert!(p.rip_current(29.35, -94.80, 0.0).is_some());
        assert!(p.rip_current(29.35, -94.70, 0.0).is_none());
    }
}
