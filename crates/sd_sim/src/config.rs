// crates/sd_sim/src/config.rs

//! 模拟配置
//!
//! 定义一次漂移模拟的全部可调参数并提供校验。

use sd_analysis::survival::VictimProfile;
use sd_geo::displacement::LongitudeScale;
use sd_geo::point::GeoPoint;
use sd_physics::object::ObjectType;
use serde::{Deserialize, Serialize};

/// 粒子数上限
pub const MAX_PARTICLE_COUNT: usize = 200_000;

/// 漂移模拟配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftConfig {
    /// 最后已知位置
    pub lkp: GeoPoint,
    /// 漂浮物类型
    pub object_type: ObjectType,
    /// 粒子数
    pub particle_count: usize,
    /// 模拟时长 [小时]
    pub duration_hours: f64,
    /// 时间步长 [s]
    pub time_step_seconds: f64,
    /// 初始散布半径 [km]
    pub initial_radius_km: f64,
    /// 扩散系数 [km²/h]
    pub diffusion_coefficient: f64,
    /// 遇险者档案
    pub victim_profile: VictimProfile,
    /// 随机种子（同种子结果可复现）
    pub seed: u64,
    /// 经度刻度（默认两方向统一 111.32 km/deg，保持历史结果可比）
    pub longitude_scale: LongitudeScale,
}

impl DriftConfig {
    /// 以默认参数创建配置
    #[must_use]
    pub fn new(lkp: GeoPoint) -> Self {
        Self {
            lkp,
            object_type: ObjectType::default(),
            particle_count: 10_000,
            duration_hours: 72.0,
            time_step_seconds: 600.0,
            initial_radius_km: 0.1,
            diffusion_coefficient: 0.001,
            victim_profile: VictimProfile::default(),
            seed: 0,
            longitude_scale: LongitudeScale::Uniform,
        }
    }

    /// 设置漂浮物类型
    #[must_use]
    pub fn with_object_type(mut self, object_type: ObjectType) -> Self {
        self.object_type = object_type;
        self
    }

    /// 设置粒子数
    #[must_use]
    pub fn with_particles(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// 设置时长与步长
    #[must_use]
    pub fn with_duration(mut self, duration_hours: f64, time_step_seconds: f64) -> Self {
        self.duration_hours = duration_hours;
        self.time_step_seconds = time_step_seconds;
        self
    }

    /// 设置遇险者档案
    #[must_use]
    pub fn with_victim(mut self, profile: VictimProfile) -> Self {
        self.victim_profile = profile;
        self
    }

    /// 设置随机种子
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// 设置扩散系数
    #[must_use]
    pub fn with_diffusion(mut self, coefficient: f64) -> Self {
        self.diffusion_coefficient = coefficient;
        self
    }

    /// 总步数
    #[must_use]
    pub fn total_steps(&self) -> u64 {
        (self.duration_hours * 3600.0 / self.time_step_seconds).ceil() as u64
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), String> {
        if !self.lkp.is_valid() {
            return Err(format!("LKP out of range: {}", self.lkp));
        }
        if self.particle_count == 0 {
            return Err("Particle count must be positive".into());
        }
        if self.particle_count > MAX_PARTICLE_COUNT {
            return Err(format!(
                "Particle count {} exceeds cap {}",
                self.particle_count, MAX_PARTICLE_COUNT
            ));
        }
        if self.duration_hours <= 0.0 {
            return Err("Duration must be positive".into());
        }
        if self.time_step_seconds <= 0.0 {
            return Err("Time step must be positive".into());
        }
        if self.initial_radius_km < 0.0 {
            return Err("Initial radius must be non-negative".into());
        }
        if self.diffusion_coefficient < 0.0 {
            return Err("Diffusion coefficient must be non-negative".into());
        }
        Ok(())
    }
}
