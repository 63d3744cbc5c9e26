// crates/sd_sim/src/stats.rs

//! 漂移统计
//!
//! 跨步累积的全局计数与逐粒子搁浅记录。

use sd_geodata::shore::ShoreKind;
use sd_physics::shallow::ShallowEffect;
use serde::{Deserialize, Serialize};

/// 单次搁浅记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeachingRecord {
    /// 粒子编号
    pub particle_id: usize,
    /// 搁浅纬度
    pub lat: f64,
    /// 搁浅经度
    pub lng: f64,
    /// 搁浅时刻 [s]
    pub time_seconds: f64,
    /// 小时序号
    pub hour: u32,
    /// 搁浅处水深 [m]
    pub depth_m: f64,
    /// 岸线类型
    pub shore_kind: ShoreKind,
    /// 生效的浅水效应
    pub effects: Vec<ShallowEffect>,
}

/// 全局漂移统计
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriftStatistics {
    /// 累计搁浅数
    pub total_beached: usize,
    /// 搁浅记录
    pub beaching_records: Vec<BeachingRecord>,
    /// 浅水（d < 20 m）粒子步数
    pub shallow_water_encounters: u64,
    /// 碎波带（d <= 5 m）粒子步数
    pub surf_zone_encounters: u64,
    /// 陆地排除次数
    pub land_exclusions: u64,
    /// 岸线反射次数
    pub reflections: u64,
    /// 位移出现 NaN 被跳过的粒子步数
    pub nan_incidents: u64,
    /// 色散求解回退深水近似的次数
    pub dispersion_fallbacks: u64,
}

impl DriftStatistics {
    /// 记录一次搁浅
    pub fn record_beaching(&mut self, record: BeachingRecord) {
        self.total_beached += 1;
        self.beaching_records.push(record);
    }
}
