// crates/sd_physics/src/shallow/mod.rs

//! 浅水修正
//!
//! 水深小于 20 m 时叠加在基础漂移上的修正项：
//!
//! 1. 底摩擦（Manning 糙率）
//! 2. 浅水 Stokes 漂移（色散关系增强）
//! 3. 地形导流（沿等深线偏转）
//! 4. 潮汐不对称（涨潮向岸、落潮离岸）
//! 5. 碎波带过程（碎波输运、沿岸流、离岸流、底流回流，d ≤ 5）
//! 6. 极浅水衰减与搁浅概率（d ≤ 2）
//!
//! 各项在千米坐标系内累加，最后一次性转换为经纬度增量。
//! 同时累计本步搁浅概率与实际生效的效应标签。

pub mod surf;

use crate::dispersion::solve_dispersion;
use crate::types::DriftVector;
use crate::G;
use glam::DVec2;
use sd_environment::snapshot::EnvSnapshot;
use sd_geo::displacement::{offset_to_degrees, LongitudeScale};
use sd_geo::units::knots_to_kmh;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::f64::consts::PI;

/// 浅水效应生效上界 [m]（严格小于）
pub const SHALLOW_DEPTH_M: f64 = 20.0;

/// 碎波带上界 [m]
pub const SURF_DEPTH_M: f64 = 5.0;

/// 极浅水上界 [m]
pub const VERY_SHALLOW_DEPTH_M: f64 = 2.0;

/// 碎波判据 H/d 阈值（严格大于）
pub const BREAKING_RATIO: f64 = 0.78;

/// 浅水效应标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShallowEffect {
    /// 底摩擦
    BottomFriction,
    /// 浅水 Stokes 漂移
    ShallowStokes,
    /// 地形导流
    TopographicSteering,
    /// 潮汐不对称
    TidalAsymmetry,
    /// 碎波输运
    WaveBreaking,
    /// 沿岸流
    LongshoreCurrent,
    /// 离岸流
    RipCurrent,
    /// 底流回流
    Undertow,
    /// 极浅水
    VeryShallow,
}

impl std::fmt::Display for ShallowEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::BottomFriction => "bottom-friction",
            Self::ShallowStokes => "shallow-stokes",
            Self::TopographicSteering => "topographic-steering",
            Self::TidalAsymmetry => "tidal-asymmetry",
            Self::WaveBreaking => "wave-breaking",
            Self::LongshoreCurrent => "longshore-current",
            Self::RipCurrent => "rip-current",
            Self::Undertow => "undertow",
            Self::VeryShallow => "very-shallow",
        };
        write!(f, "{}", s)
    }
}

/// 效应标签集合
pub type EffectSet = SmallVec<[ShallowEffect; 4]>;

/// 浅水修正结果
#[derive(Debug, Clone, Default)]
pub struct ShallowDrift {
    /// 附加位移 [度]
    pub drift: DriftVector,
    /// 本步搁浅概率增量
    pub beaching_probability: f64,
    /// 生效的效应
    pub effects: EffectSet,
    /// 色散求解是否收敛（false 表示用了深水回退）
    pub dispersion_fallback: bool,
}

/// 浅水物理
#[derive(Debug, Clone, Copy)]
pub struct ShallowWaterPhysics {
    /// Manning 糙率系数 [s/m^(1/3)]
    pub manning_n: f64,
    /// 经度刻度
    pub scale: LongitudeScale,
}

impl Default for ShallowWaterPhysics {
    fn default() -> Self {
        Self {
            manning_n: 0.025,
            scale: LongitudeScale::Uniform,
        }
    }
}

/// 航向位移 [km]，x = 东，y = 北
#[inline]
pub(crate) fn course_vec(distance_km: f64, direction_deg: f64) -> DVec2 {
    let rad = direction_deg.to_radians();
    DVec2::new(rad.sin() * distance_km, rad.cos() * distance_km)
}

impl ShallowWaterPhysics {
    /// 计算浅水修正
    ///
    /// 深度不在 (0, 20) m 区间时返回零修正；20 m 整深度不触发。
    ///
    /// # 参数
    /// - `env`: 已由驱动器注入梯度/潮汐/离岸流的环境快照
    /// - `depth_m`: 粒子处水深 [m]
    /// - `dt_hours`: 步长 [小时]
    /// - `lat_deg`: 粒子纬度
    #[must_use]
    pub fn compute(
        &self,
        env: &EnvSnapshot,
        depth_m: f64,
        dt_hours: f64,
        lat_deg: f64,
    ) -> ShallowDrift {
        let mut result = ShallowDrift::default();
        if depth_m <= 0.0 || depth_m >= SHALLOW_DEPTH_M {
            return result;
        }

        let mut offset = DVec2::ZERO;
        let current_kmh = knots_to_kmh(env.current.speed_kn);

        // 1. 底摩擦：Manning 摩擦因子随水深减小而增大
        if current_kmh > 0.0 {
            let friction = G * self.manning_n * self.manning_n / depth_m.cbrt();
            let reduction = (friction * current_kmh).min(0.8);
            let dist = reduction * current_kmh * 1e-3 * dt_hours;
            offset -= course_vec(dist, env.current.direction_deg);
            result.effects.push(ShallowEffect::BottomFriction);
        }

        // 2. 浅水 Stokes 漂移：色散关系给出局地波长与相速
        let waves = &env.waves;
        if waves.height_m > 0.0 && waves.period_s > 0.0 {
            let omega = 2.0 * PI / waves.period_s;
            let sol = solve_dispersion(omega, depth_m);
            result.dispersion_fallback = !sol.converged;

            let wavelength = sol.wavelength();
            let celerity = wavelength / waves.period_s; // [m/s]
            let sinh_2kd = (2.0 * sol.k * depth_m).sinh();
            let enhancement = if sinh_2kd > 1e-10 {
                1.0 + 1.0 / (2.0 * sinh_2kd)
            } else {
                1.0
            };

            let stokes_ms = PI * waves.height_m * waves.height_m * celerity
                / (waves.period_s * wavelength)
                * enhancement;
            let dist = stokes_ms * 3.6 * dt_hours;
            offset += course_vec(dist, waves.direction_deg);
            result.effects.push(ShallowEffect::ShallowStokes);
        }

        // 3. 地形导流：流向沿等深线方向偏转
        if let Some(gradient) = &env.bathymetry_gradient {
            if gradient.magnitude > 1e-3 && current_kmh > 0.0 {
                let iso_rad = (-gradient.dz_dx).atan2(gradient.dz_dy);
                let cur_rad = env.current.direction_deg.to_radians();
                let strength =
                    0.1 * current_kmh * gradient.magnitude * (iso_rad - cur_rad).sin();
                offset += course_vec(strength * dt_hours, iso_rad.to_degrees());
                result.effects.push(ShallowEffect::TopographicSteering);
            }
        }

        // 4. 潮汐不对称：涨潮向岸推、落潮弱一些地离岸拉
        if let Some(tide) = &env.tide {
            let amplitude = 0.1 * (SHALLOW_DEPTH_M / depth_m);
            let dist = if tide.phase < 0.5 {
                amplitude * (PI * tide.phase).sin() * dt_hours
            } else {
                -0.7 * amplitude * (PI * (tide.phase - 0.5)).sin() * dt_hours
            };
            if dist.abs() > 0.0 {
                offset += course_vec(dist, tide.shore_direction_deg);
                result.effects.push(ShallowEffect::TidalAsymmetry);
            }
        }

        // 5. 碎波带过程
        if depth_m <= SURF_DEPTH_M {
            let surf = surf::compute(env, depth_m, dt_hours);
            offset += surf.offset_km;
            result.beaching_probability += surf.beaching_probability;
            result.effects.extend(surf.effects);
        }

        // 6. 极浅水：额外摩擦衰减与搁浅概率
        if depth_m <= VERY_SHALLOW_DEPTH_M {
            let shallowness = 1.0 - depth_m / VERY_SHALLOW_DEPTH_M;
            if current_kmh > 0.0 {
                let dist = 0.5 * shallowness * current_kmh * dt_hours;
                offset -= course_vec(dist, env.current.direction_deg);
            }
            result.beaching_probability += 0.3 * shallowness * dt_hours;
            result.effects.push(ShallowEffect::VeryShallow);
        }

        let (dlat, dlng) = offset_to_degrees(offset.x, offset.y, lat_deg, self.scale);
        result.drift = DriftVector::new(dlat, dlng);
        result
    }
}
