// crates/sd_sim/src/results.rs

//! 结果聚合
//!
//! 模拟完成后从最终粒子云计算密度热图、包含概率多边形与
//! 生存评估，连同逐小时快照与全局统计打包返回。

use crate::driver::DriftDriver;
use crate::snapshot::Snapshot;
use crate::stats::DriftStatistics;
use sd_analysis::containment::{compute_containment, ContainmentResult};
use sd_analysis::density::{DensityCell, DensityGrid};
use sd_analysis::survival::{SurvivalAssessment, SurvivalEstimator, Urgency};
use sd_geo::point::GeoPoint;
use serde::{Deserialize, Serialize};

/// 逐小时生存评估
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySurvival {
    /// 小时序号
    pub hour: u32,
    /// 生存概率
    pub probability: f64,
    /// 紧迫度
    pub urgency: Urgency,
}

/// 模拟聚合结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResults {
    /// 模拟时长 [小时]
    pub duration_hours: f64,
    /// 总步数
    pub total_steps: u64,
    /// 结束时活跃粒子数
    pub active_count: usize,
    /// 结束时搁浅粒子数
    pub beached_count: usize,
    /// 结束时已寻获粒子数
    pub recovered_count: usize,
    /// 粒子总数
    pub total_count: usize,
    /// 活跃粒子质心
    pub centroid: Option<GeoPoint>,
    /// 密度热图（按计数降序）
    pub density_cells: Vec<DensityCell>,
    /// 搜索区域面积 [km²]
    pub search_area_km2: f64,
    /// 包含概率多边形
    pub containment: ContainmentResult,
    /// 结束时刻的生存评估
    pub survival: SurvivalAssessment,
    /// 逐小时生存曲线
    pub survival_timeline: Vec<HourlySurvival>,
    /// 全局漂移统计
    pub statistics: DriftStatistics,
    /// 逐小时快照
    pub snapshots: Vec<Snapshot>,
}

/// 从完成的驱动器聚合结果
#[must_use]
pub fn compute_results(driver: &DriftDriver) -> SimulationResults {
    let particles = driver.particles();
    let config = driver.config();

    let active = particles.active_positions();
    let positions: Vec<GeoPoint> = active.iter().map(|(_, p)| *p).collect();

    let grid = DensityGrid::default();
    let density_cells = grid.analyze(&active);
    let search_area_km2 = DensityGrid::search_area_km2(&positions);
    let containment = compute_containment(&positions);

    // 水温取结束时刻质心（或 LKP）处的环境采样
    let reference = containment.centroid.unwrap_or(config.lkp);
    let water_temp_f = driver
        .environment()
        .conditions_at(reference.lat, reference.lng, driver.current_time_s())
        .water_temp_f;

    let estimator = SurvivalEstimator;
    let survival = estimator.estimate(&config.victim_profile, water_temp_f, config.duration_hours);

    let survival_timeline: Vec<HourlySurvival> = driver
        .snapshots()
        .iter()
        .map(|s| {
            let a = estimator.estimate(&config.victim_profile, water_temp_f, f64::from(s.hour));
            HourlySurvival {
                hour: s.hour,
                probability: a.probability,
                urgency: a.urgency,
            }
        })
        .collect();

    SimulationResults {
        duration_hours: config.duration_hours,
        total_steps: driver.completed_steps(),
        active_count: particles.active_count(),
        beached_count: particles.beached_count(),
        recovered_count: particles.recovered_count(),
        total_count: particles.len(),
        centroid: particles.active_centroid(),
        density_cells,
        search_area_km2,
        containment,
        survival,
        survival_timeline,
        statistics: driver.stats().clone(),
        snapshots: driver.snapshots().to_vec(),
    }
}
