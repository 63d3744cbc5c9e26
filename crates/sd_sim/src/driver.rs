// crates/sd_sim/src/driver.rs

//! 时间步进驱动
//!
//! 每步对每个活跃粒子依次执行：采样环境场 → 查询并缓存水深 →
//! 叠加风/流/浪/风压差位移 → 浅水修正与搁浅抽签 → 扩散 →
//! 陆地排除（触岸判定）→ 推进位置与年龄。跨过小时边界时记录
//! 系综快照。
//!
//! 一步之内粒子间互不访问，借 rayon 并行推进；每个粒子的随机
//! 流由 (种子, 步号, 粒子号) 确定性派生，并行与串行结果一致。
//! 物理内的异常按粒子隔离：NaN 位移跳过该步并计数，地理数据
//! 缺失走保守降级，模拟永不因此失败。

use crate::config::DriftConfig;
use crate::error::SimulationError;
use crate::particle::{Particle, ParticleSet};
use crate::snapshot::Snapshot;
use crate::stats::{BeachingRecord, DriftStatistics};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use sd_environment::provider::EnvironmentalProvider;
use sd_geo::displacement::{offset_to_degrees, LongitudeScale};
use sd_geo::point::GeoPoint;
use sd_geodata::adapter::GeodataAdapter;
use sd_physics::calculators::{
    CurrentDriftCalculator, DiffusionCalculator, LeewayCalculator, WaveDriftCalculator,
    WindDriftCalculator,
};
use sd_physics::shallow::{
    ShallowEffect, ShallowWaterPhysics, SHALLOW_DEPTH_M, SURF_DEPTH_M,
};
use sd_physics::shore_interaction::{resolve_shore_interaction, ShoreOutcome};
use std::f64::consts::TAU;

/// 步号混合常数（splitmix64 增量）
const STEP_HASH: u64 = 0x9E37_79B9_7F4A_7C15;
/// 粒子号混合常数
const PARTICLE_HASH: u64 = 0xD1B5_4A32_D192_ED03;

/// 单粒子单步的聚合结果
#[derive(Debug, Default)]
struct StepOutcome {
    beaching: Option<BeachingRecord>,
    shallow_encounter: bool,
    surf_encounter: bool,
    land_exclusion: bool,
    reflected: bool,
    nan_incident: bool,
    dispersion_fallback: bool,
}

/// 单步共享上下文
struct StepContext<'a> {
    env: &'a dyn EnvironmentalProvider,
    geodata: &'a GeodataAdapter,
    config: &'a DriftConfig,
    wind: WindDriftCalculator,
    current: CurrentDriftCalculator,
    wave: WaveDriftCalculator,
    leeway: LeewayCalculator,
    diffusion: DiffusionCalculator,
    shallow: ShallowWaterPhysics,
    time_s: f64,
    dt_hours: f64,
    step_seed: u64,
}

/// 漂移驱动器
pub struct DriftDriver {
    config: DriftConfig,
    particles: ParticleSet,
    env: Box<dyn EnvironmentalProvider>,
    geodata: GeodataAdapter,
    wind_calc: WindDriftCalculator,
    current_calc: CurrentDriftCalculator,
    wave_calc: WaveDriftCalculator,
    leeway_calc: LeewayCalculator,
    diffusion_calc: DiffusionCalculator,
    shallow: ShallowWaterPhysics,
    current_time_s: f64,
    completed_steps: u64,
    snapshots: Vec<Snapshot>,
    stats: DriftStatistics,
    last_snapshot_hour: i64,
}

impl DriftDriver {
    /// 创建驱动器并在 LKP 周围初始化系综
    ///
    /// 初始分布为半径 R 的圆盘内均匀散布：θ ~ U[0, 2π)，
    /// ρ = √U·R，经度转换带纬度修正。
    pub fn new(
        config: DriftConfig,
        env: Box<dyn EnvironmentalProvider>,
        geodata: GeodataAdapter,
    ) -> Result<Self, SimulationError> {
        config.validate().map_err(SimulationError::InvalidConfig)?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let lkp = config.lkp;
        let positions: Vec<GeoPoint> = (0..config.particle_count)
            .map(|_| {
                let theta = rng.gen_range(0.0..TAU);
                let rho = rng.gen::<f64>().sqrt() * config.initial_radius_km;
                let north_km = rho * theta.cos();
                let east_km = rho * theta.sin();
                let (dlat, dlng) =
                    offset_to_degrees(east_km, north_km, lkp.lat, LongitudeScale::CosLatitude);
                GeoPoint::new(lkp.lat + dlat, lkp.lng + dlng)
            })
            .collect();

        let diffusion_calc = DiffusionCalculator::with_coefficient(config.diffusion_coefficient);

        let mut driver = Self {
            particles: ParticleSet::from_positions(positions),
            env,
            geodata,
            wind_calc: WindDriftCalculator::default(),
            current_calc: CurrentDriftCalculator::default(),
            wave_calc: WaveDriftCalculator::default(),
            leeway_calc: LeewayCalculator::default(),
            diffusion_calc,
            shallow: ShallowWaterPhysics::default(),
            current_time_s: 0.0,
            completed_steps: 0,
            snapshots: Vec::new(),
            stats: DriftStatistics::default(),
            last_snapshot_hour: -1,
            config,
        };

        driver.record_snapshot(0);
        Ok(driver)
    }

    /// 推进一个时间步
    pub fn step(&mut self) {
        let dt_s = self.config.time_step_seconds;

        self.env.advance(self.current_time_s);

        let ctx = StepContext {
            env: self.env.as_ref(),
            geodata: &self.geodata,
            config: &self.config,
            wind: self.wind_calc,
            current: self.current_calc,
            wave: self.wave_calc,
            leeway: self.leeway_calc,
            diffusion: self.diffusion_calc,
            shallow: self.shallow,
            time_s: self.current_time_s,
            dt_hours: dt_s / 3600.0,
            step_seed: self.config.seed ^ self.completed_steps.wrapping_mul(STEP_HASH),
        };

        let outcomes: Vec<StepOutcome> = self
            .particles
            .as_mut_slice()
            .par_iter_mut()
            .map(|p| advance_particle(&ctx, p))
            .collect();

        for outcome in outcomes {
            if let Some(record) = outcome.beaching {
                self.stats.record_beaching(record);
            }
            self.stats.shallow_water_encounters += outcome.shallow_encounter as u64;
            self.stats.surf_zone_encounters += outcome.surf_encounter as u64;
            self.stats.land_exclusions += outcome.land_exclusion as u64;
            self.stats.reflections += outcome.reflected as u64;
            self.stats.nan_incidents += outcome.nan_incident as u64;
            self.stats.dispersion_fallbacks += outcome.dispersion_fallback as u64;
        }

        self.current_time_s += dt_s;
        self.completed_steps += 1;

        let hour = (self.current_time_s / 3600.0).floor() as i64;
        if hour > self.last_snapshot_hour {
            self.record_snapshot(hour as u32);
        }
    }

    /// 记录快照
    fn record_snapshot(&mut self, hour: u32) {
        let snapshot = Snapshot::capture(
            &self.particles,
            self.current_time_s,
            hour,
            self.geodata.synthetic_lookups(),
        );
        tracing::debug!(
            "Snapshot recorded: hour {} ({} active / {} beached)",
            hour,
            snapshot.active_count,
            snapshot.beached_count
        );
        self.snapshots.push(snapshot);
        self.last_snapshot_hour = hour as i64;
    }

    /// 进度 [0, 1]
    #[must_use]
    pub fn progress(&self) -> f64 {
        (self.completed_steps as f64 / self.config.total_steps() as f64).clamp(0.0, 1.0)
    }

    /// 是否已跑满配置时长
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.completed_steps >= self.config.total_steps()
    }

    /// 当前模拟时刻 [s]
    #[must_use]
    pub fn current_time_s(&self) -> f64 {
        self.current_time_s
    }

    /// 已完成步数
    #[must_use]
    pub fn completed_steps(&self) -> u64 {
        self.completed_steps
    }

    /// 配置
    #[must_use]
    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    /// 粒子系综
    #[must_use]
    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    /// 标记粒子已寻获（外部搜救动作）
    ///
    /// 只有活跃粒子可以转为寻获；返回是否发生了转移。
    pub fn recover_particle(&mut self, particle_id: usize) -> bool {
        self.particles.recover(particle_id)
    }

    /// 全部快照
    #[must_use]
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// 按小时查找快照
    #[must_use]
    pub fn snapshot_at_hour(&self, hour: u32) -> Option<&Snapshot> {
        self.snapshots.iter().find(|s| s.hour == hour)
    }

    /// 统计
    #[must_use]
    pub fn stats(&self) -> &DriftStatistics {
        &self.stats
    }

    /// 环境场（结果聚合时采样用）
    #[must_use]
    pub fn environment(&self) -> &dyn EnvironmentalProvider {
        self.env.as_ref()
    }
}

/// 推进单个粒子一步
fn advance_particle(ctx: &StepContext<'_>, p: &mut Particle) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    if !p.is_active() {
        return outcome;
    }

    let mut rng = ChaCha8Rng::seed_from_u64(
        ctx.step_seed ^ (p.id as u64).wrapping_mul(PARTICLE_HASH),
    );
    let dt_s = ctx.dt_hours * 3600.0;
    let end_time_s = ctx.time_s + dt_s;
    let pos = p.position;

    // 1. 采样环境场
    let mut sample = ctx.env.conditions_at(pos.lat, pos.lng, ctx.time_s);

    // 2. 查询水深（适配器内缓存）
    let depth = ctx.geodata.depth_at(pos.lat, pos.lng);
    p.depth_at_last_step_m = Some(depth);

    // 地理数据补全：梯度、离岸流、岸线法向
    if sample.bathymetry_gradient.is_none() {
        sample.bathymetry_gradient = ctx.geodata.gradient_at(pos.lat, pos.lng);
    }
    if sample.rip_current.is_none() {
        sample.rip_current = ctx.geodata.rip_current_at(pos.lat, pos.lng, ctx.time_s);
    }
    if sample.waves.shore_normal_deg.is_none() {
        if let Some(info) = ctx.geodata.shore_info_at(pos.lat, pos.lng) {
            sample.waves.shore_normal_deg = Some(info.shore_normal_deg);
        }
    }

    // 3. 基础强迫叠加
    let mut drift = ctx.wind.calculate(&sample.wind, ctx.dt_hours, pos.lat);
    drift += ctx.current.calculate(&sample.current, ctx.dt_hours, pos.lat);
    drift += ctx.wave.calculate(&sample.waves, ctx.dt_hours, pos.lat, &mut rng);
    drift += ctx
        .leeway
        .calculate(ctx.config.object_type, &sample.wind, ctx.dt_hours, pos.lat);

    // 4. 浅水修正与搁浅抽签（20 m 整不触发）
    let mut step_effects: Vec<ShallowEffect> = Vec::new();
    if depth > 0.0 && depth < SHALLOW_DEPTH_M {
        outcome.shallow_encounter = true;
        if depth <= SURF_DEPTH_M {
            outcome.surf_encounter = true;
        }

        let shallow = ctx.shallow.compute(&sample, depth, ctx.dt_hours, pos.lat);
        drift += shallow.drift;
        outcome.dispersion_fallback = shallow.dispersion_fallback;
        step_effects = shallow.effects.to_vec();

        if shallow.beaching_probability > 0.0 && rng.gen::<f64>() < shallow.beaching_probability {
            let kind = ctx.geodata.shore_type_at(pos.lat, pos.lng);
            p.beach(pos, end_time_s, kind, step_effects.clone());
            outcome.beaching = Some(BeachingRecord {
                particle_id: p.id,
                lat: pos.lat,
                lng: pos.lng,
                time_seconds: end_time_s,
                hour: (end_time_s / 3600.0).floor() as u32,
                depth_m: depth,
                shore_kind: kind,
                effects: step_effects,
            });
            return outcome;
        }
    }

    // 5. 扩散
    drift += ctx.diffusion.calculate(ctx.dt_hours, pos.lat, &mut rng);

    // NaN 防护：本步跳过并计数
    if !drift.is_finite() {
        outcome.nan_incident = true;
        p.age_seconds += dt_s;
        return outcome;
    }

    // 6. 尝试位置与陆地排除
    let attempted = GeoPoint::new(pos.lat + drift.dlat_deg, pos.lng + drift.dlng_deg);
    let attempted_depth = ctx.geodata.depth_at(attempted.lat, attempted.lng);

    if attempted_depth <= 0.0 {
        outcome.land_exclusion = true;
        let kind = ctx.geodata.shore_type_at(attempted.lat, attempted.lng);
        // 法向缺失时退化为由陆指海的方位
        let fallback_normal = attempted.bearing_to(&pos);
        let normal = ctx
            .geodata
            .shore_normal_at(attempted.lat, attempted.lng, fallback_normal);

        match resolve_shore_interaction(kind, &pos, normal, &mut rng) {
            ShoreOutcome::Beached => {
                p.beach(attempted, end_time_s, kind, step_effects.clone());
                outcome.beaching = Some(BeachingRecord {
                    particle_id: p.id,
                    lat: attempted.lat,
                    lng: attempted.lng,
                    time_seconds: end_time_s,
                    hour: (end_time_s / 3600.0).floor() as u32,
                    depth_m: attempted_depth,
                    shore_kind: kind,
                    effects: step_effects,
                });
                return outcome;
            }
            ShoreOutcome::Reflected { position } => {
                p.position = position;
                p.reflection_count += 1;
                outcome.reflected = true;
            }
            ShoreOutcome::Stayed => {
                // 放弃本步移动
            }
        }
    } else {
        p.position = attempted;
    }

    // 7. 推进年龄（仅活跃粒子）
    p.age_seconds += dt_s;
    outcome
}
