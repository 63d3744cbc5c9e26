// crates/sd_analysis/src/containment.rs

//! 包含概率多边形
//!
//! 活跃粒子不少于 3 个时：按到质心的球面距离排序，取 50%/90%/95%
//! 百分位前缀，对经纬度坐标做 Andrew 单调链凸包。置信度取距离
//! 分布的 1 − σ/(μ+1)，截断到 [0, 1]。
//!
//! 凸包把 (lat, lng) 当平面坐标处理——在几千米的空间尺度上
//! 是可接受的近似，与密度网格、岸向约定保持一致，勿单独"修正"。

use sd_geo::point::GeoPoint;
use serde::{Deserialize, Serialize};

/// 默认百分位
pub const DEFAULT_PERCENTILES: [f64; 3] = [50.0, 90.0, 95.0];

/// 单个包含区
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainmentZone {
    /// 百分位
    pub percentile: f64,
    /// 凸包顶点，逆时针，无共线三连点；不足 3 个粒子时为空
    pub polygon: Vec<GeoPoint>,
}

/// 包含分析结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainmentResult {
    /// 活跃粒子质心（无粒子时为 None）
    pub centroid: Option<GeoPoint>,
    /// 各百分位包含区
    pub zones: Vec<ContainmentZone>,
    /// 置信度 [0, 1]
    pub confidence: f64,
}

/// 计算包含概率多边形
#[must_use]
pub fn compute_containment(points: &[GeoPoint]) -> ContainmentResult {
    let centroid = centroid_of(points);

    if points.len() < 3 {
        return ContainmentResult {
            centroid,
            zones: DEFAULT_PERCENTILES
                .iter()
                .map(|&p| ContainmentZone {
                    percentile: p,
                    polygon: Vec::new(),
                })
                .collect(),
            confidence: 0.0,
        };
    }

    let center = centroid.expect("len >= 3");

    // 按到质心的距离排序
    let mut by_distance: Vec<(f64, GeoPoint)> = points
        .iter()
        .map(|p| (center.haversine_km(p), *p))
        .collect();
    by_distance.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let zones = DEFAULT_PERCENTILES
        .iter()
        .map(|&percentile| {
            let take = ((percentile / 100.0) * points.len() as f64).ceil() as usize;
            let prefix: Vec<GeoPoint> = by_distance
                .iter()
                .take(take.min(points.len()))
                .map(|(_, p)| *p)
                .collect();
            ContainmentZone {
                percentile,
                polygon: convex_hull(&prefix),
            }
        })
        .collect();

    let distances: Vec<f64> = by_distance.iter().map(|(d, _)| *d).collect();
    let confidence = distance_confidence(&distances);

    ContainmentResult {
        centroid,
        zones,
        confidence,
    }
}

/// 点集质心（经纬度算术平均）
#[must_use]
pub fn centroid_of(points: &[GeoPoint]) -> Option<GeoPoint> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (lat_sum, lng_sum) = points
        .iter()
        .fold((0.0, 0.0), |(la, ln), p| (la + p.lat, ln + p.lng));
    Some(GeoPoint::new(lat_sum / n, lng_sum / n))
}

/// 距离分布置信度 = clamp(0, 1, 1 − σ/(μ+1))
fn distance_confidence(distances: &[f64]) -> f64 {
    if distances.is_empty() {
        return 0.0;
    }
    let n = distances.len() as f64;
    let mean = distances.iter().sum::<f64>() / n;
    let var = distances.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;
    (1.0 - var.sqrt() / (mean + 1.0)).clamp(0.0, 1.0)
}

/// Andrew 单调链凸包
///
/// 输入 (lat, lng) 按平面坐标处理（x = lat, y = lng）。输出逆时针、
/// 首顶点不重复、无共线三连点。少于 3 个互异点时原样返回去重结果。
#[must_use]
pub fn convex_hull(points: &[GeoPoint]) -> Vec<GeoPoint> {
    let mut sorted: Vec<GeoPoint> = points.to_vec();
    sorted.sort_by(|a, b| {
        (a.lat, a.lng)
            .partial_cmp(&(b.lat, b.lng))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.dedup_by(|a, b| a.lat == b.lat && a.lng == b.lng);

    let n = sorted.len();
    if n < 3 {
        return sorted;
    }

    // 叉积 (o→a) × (o→b)，正值为左转
    let cross = |o: &GeoPoint, a: &GeoPoint, b: &GeoPoint| -> f64 {
        (a.lat - o.lat) * (b.lng - o.lng) - (a.lng - o.lng) * (b.lat - o.lat)
    };

    let mut hull: Vec<GeoPoint> = Vec::with_capacity(2 * n);

    // 下链
    for p in &sorted {
        while hull.len() >= 2
            && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(*p);
    }

    // 上链
    let lower_len = hull.len() + 1;
    for p in sorted.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(*p);
    }

    hull.pop(); // 末尾与首顶点重复
    hull
}

/// 射线法点在多边形内判定
///
/// 多边形顶点按 (lat, lng) 平面坐标处理；边界点的归属不保证。
#[must_use]
pub fn point_in_polygon(p: &GeoPoint, polygon: &[GeoPoint]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (&polygon[i], &polygon[j]);
        if (pi.lat > p.lat) != (pj.lat > p.lat) {
            let x_cross = (pj.lng - pi.lng) * (p.lat - pi.lat) / (pj.lat - pi.lat) + pi.lng;
            if p.lng < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square_with_center() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(0.5, 0.5),
        ]
    }

    /// 判断 actual 是否为 expected 的循环旋转
    fn is_rotation_of(actual: &[GeoPoint], expected: &[GeoPoint]) -> bool {
        if actual.len() != expected.len() {
            return false;
        }
        let n = expected.len();
        (0..n).any(|offset| {
            (0..n).all(|i| {
                let a = &actual[(i + offset) % n];
                let e = &expected[i];
                (a.lat - e.lat).abs() < 1e-12 && (a.lng - e.lng).abs() < 1e-12
            })
        })
    }

    #[test]
    fn test_hull_of_square_drops_interior() {
        let hull = convex_hull(&unit_square_with_center());
        assert_eq!(hull.len(), 4);

        // (lat, lng) 平面上的逆时针单位正方形
        let expected = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(0.0, 1.0),
        ];
        assert!(is_rotation_of(&hull, &expected), "hull = {:?}", hull);
    }

    #[test]
    fn test_hull_ccw_orientation() {
        let hull = convex_hull(&unit_square_with_center());
        // 鞋带公式（x = lat, y = lng）：逆时针面积为正
        let mut area2 = 0.0;
        for i in 0..hull.len() {
            let a = &hull[i];
            let b = &hull[(i + 1) % hull.len()];
            area2 += a.lat * b.lng - b.lat * a.lng;
        }
        assert!(area2 > 0.0);
    }

    #[test]
    fn test_hull_idempotent() {
        let hull1 = convex_hull(&unit_square_with_center());
        let hull2 = convex_hull(&hull1);
        assert!(is_rotation_of(&hull2, &hull1));
    }

    #[test]
    fn test_hull_no_collinear_triples() {
        // 一条边上加中点，凸包应剔除
        let points = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 0.5),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(1.0, 1.0),
        ];
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4);
    }

    #[test]
    fn test_containment_under_three_particles() {
        let points = vec![GeoPoint::new(29.3, -94.8), GeoPoint::new(29.31, -94.81)];
        let r = compute_containment(&points);
        assert_eq!(r.confidence, 0.0);
        assert_eq!(r.zones.len(), 3);
        for z in &r.zones {
            assert!(z.polygon.is_empty());
        }
        // 质心仍然给出
        assert!(r.centroid.is_some());
    }

    #[test]
    fn test_containment_empty() {
        let r = compute_containment(&[]);
        assert!(r.centroid.is_none());
        assert_eq!(r.confidence, 0.0);
    }

    #[test]
    fn test_ninety_percent_hull_of_square_scenario() {
        // 五点布局的 90% 前缀覆盖全部点，凸包为单位正方形
        let r = compute_containment(&unit_square_with_center());
        let zone90 = r.zones.iter().find(|z| z.percentile == 90.0).unwrap();
        assert_eq!(zone90.polygon.len(), 4);

        let expected = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(0.0, 1.0),
        ];
        assert!(is_rotation_of(&zone90.polygon, &expected));
    }

    #[test]
    fn test_confidence_tight_cluster_high() {
        // 距离方差小 → 置信度高
        let tight: Vec<GeoPoint> = (0..20)
            .map(|i| GeoPoint::new(29.3 + (i as f64) * 1e-5, -94.8))
            .collect();
        let r = compute_containment(&tight);
        assert!(r.confidence > 0.9);
        assert!(r.confidence <= 1.0);
    }

    #[test]
    fn test_point_in_polygon() {
        let square = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(1.0, 0.0),
        ];
        assert!(point_in_polygon(&GeoPoint::new(0.5, 0.5), &square));
        assert!(!point_in_polygon(&GeoPoint::new(1.5, 0.5), &square));
        assert!(!point_in_polygon(&GeoPoint::new(-0.1, 0.5), &square));
    }

    #[test]
    fn test_centroid_mean() {
        let points = vec![
            GeoPoint::new(29.0, -95.0),
            GeoPoint::new(30.0, -94.0),
        ];
        let c = centroid_of(&points).unwrap();
        assert!((c.lat - 29.5).abs() < 1e-12);
        assert!((c.lng - (-94.5)).abs() < 1e-12);
    }
}
