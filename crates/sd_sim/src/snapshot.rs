// crates/sd_sim/src/snapshot.rs

//! 系综快照
//!
//! 每跨过一个小时边界记录一帧：时间、分区计数、活跃质心与
//! 全部粒子的位置状态。快照只在对应步完成后可见。

use crate::particle::{ParticleSet, ParticleStatus};
use sd_geo::point::GeoPoint;
use serde::{Deserialize, Serialize};

/// 单粒子快照记录
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleRecord {
    /// 粒子编号
    pub id: usize,
    /// 纬度
    pub lat: f64,
    /// 经度
    pub lng: f64,
    /// 状态
    pub status: ParticleStatus,
    /// 最近水深 [m]
    pub depth_m: Option<f64>,
}

/// 系综快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// 模拟时刻 [s]
    pub time_seconds: f64,
    /// 小时序号
    pub hour: u32,
    /// 活跃粒子数
    pub active_count: usize,
    /// 搁浅粒子数
    pub beached_count: usize,
    /// 已寻获粒子数
    pub recovered_count: usize,
    /// 粒子总数
    pub total_count: usize,
    /// 活跃粒子质心；无活跃粒子时为 None
    pub centroid: Option<GeoPoint>,
    /// 全部粒子记录
    pub particles: Vec<ParticleRecord>,
    /// 截至本帧的地理数据降级查询累计数
    pub synthetic_geo_warnings: u64,
}

impl Snapshot {
    /// 从系综采集快照
    #[must_use]
    pub fn capture(
        particles: &ParticleSet,
        time_seconds: f64,
        hour: u32,
        synthetic_geo_warnings: u64,
    ) -> Self {
        let records: Vec<ParticleRecord> = particles
            .iter()
            .map(|p| ParticleRecord {
                id: p.id,
                lat: p.position.lat,
                lng: p.position.lng,
                status: p.status,
                depth_m: p.depth_at_last_step_m,
            })
            .collect();

        Self {
            time_seconds,
            hour,
            active_count: particles.active_count(),
            beached_count: particles.beached_count(),
            recovered_count: particles.recovered_count(),
            total_count: particles.len(),
            centroid: particles.active_centroid(),
            particles: records,
            synthetic_geo_warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sd_geodata::shore::ShoreKind;

    #[test]
    fn test_capture_counts() {
        let positions: Vec<GeoPoint> =
            (0..4).map(|i| GeoPoint::new(29.3 + i as f64 * 0.001, -94.8)).collect();
        let mut set = ParticleSet::from_positions(positions);
        set.as_mut_slice()[0].beach(
            GeoPoint::new(29.4, -94.8),
            1800.0,
            ShoreKind::Sandy,
            Vec::new(),
        );

        let snap = Snapshot::capture(&set, 3600.0, 1, 2);
        assert_eq!(snap.hour, 1);
        assert_eq!(snap.total_count, 4);
        assert_eq!(snap.active_count, 3);
        assert_eq!(snap.beached_count, 1);
        assert_eq!(snap.recovered_count, 0);
        assert_eq!(snap.particles.len(), 4);
        assert_eq!(snap.synthetic_geo_warnings, 2);
        assert!(snap.centroid.is_some());
    }

    #[test]
    fn test_capture_counts_recovered() {
        let positions: Vec<GeoPoint> =
            (0..3).map(|i| GeoPoint::new(29.3 + i as f64 * 0.001, -94.8)).collect();
        let mut set = ParticleSet::from_positions(positions);
        set.recover(2);

        let snap = Snapshot::capture(&set, 0.0, 0, 0);
        assert_eq!(snap.active_count, 2);
        assert_eq!(snap.recovered_count, 1);
        assert_eq!(
            snap.active_count + snap.beached_count + snap.recovered_count,
            snap.total_count
        );
    }

    #[test]
    fn test_centroid_none_when_all_beached() {
        let mut set = ParticleSet::from_positions(vec![GeoPoint::new(29.3, -94.8)]);
        set.as_mut_slice()[0].beach(GeoPoint::new(29.4, -94.8), 0.0, ShoreKind::Muddy, Vec::new());

        let snap = Snapshot::capture(&set, 0.0, 0, 0);
        assert!(snap.centroid.is_none());
        assert_eq!(snap.active_count, 0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let set = ParticleSet::from_positions(vec![GeoPoint::new(29.3, -94.8)]);
        let snap = Snapshot::capture(&set, 0.0, 0, 0);
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"hour\":0"));
    }
}
