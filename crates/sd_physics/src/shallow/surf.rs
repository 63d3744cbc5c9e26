// crates/sd_physics/src/shallow/surf.rs

//! 碎波带过程
//!
//! 水深 5 m 以内的四个输运项：
//! - 碎波输运：H/d 超过 0.78 时沿波向的向岸推送
//! - 沿岸流：Longuet-Higgins 斜向碎波生流
//! - 离岸流：提供者报告高风险时的集中离岸射流
//! - 底流回流：逆波向的近底回流
//!
//! 位移在千米坐标系内返回，由上层统一转换。

use super::{course_vec, EffectSet, ShallowEffect, BREAKING_RATIO};
use crate::G;
use glam::DVec2;
use sd_environment::snapshot::EnvSnapshot;

/// 碎波带计算结果
#[derive(Debug, Clone, Default)]
pub struct SurfZoneResult {
    /// 位移 [km]，x = 东，y = 北
    pub offset_km: DVec2,
    /// 搁浅概率增量
    pub beaching_probability: f64,
    /// 生效效应
    pub effects: EffectSet,
}

/// 计算碎波带输运
///
/// 调用方保证 `0 < depth_m <= 5`。
#[must_use]
pub fn compute(env: &EnvSnapshot, depth_m: f64, dt_hours: f64) -> SurfZoneResult {
    let mut result = SurfZoneResult::default();
    let waves = &env.waves;

    // 碎波输运：严格大于阈值才触发
    let ratio = waves.height_m / depth_m;
    if ratio > BREAKING_RATIO {
        let speed_ms = 0.015 * (G * depth_m).sqrt() * ratio;
        result.offset_km += course_vec(speed_ms * 3.6 * dt_hours, waves.direction_deg);
        result.beaching_probability += 0.15 * dt_hours;
        result.effects.push(ShallowEffect::WaveBreaking);
    }

    // 沿岸流：需要岸线法向；波向与法向的夹角驱动沿岸输运
    let shore_normal = waves
        .shore_normal_deg
        .or_else(|| env.tide.map(|t| t.shore_normal_deg));
    if let Some(normal_deg) = shore_normal {
        if waves.height_m > 0.0 {
            let breaker_height = waves.height_m.min(BREAKING_RATIO * depth_m);
            let angle = 2.0 * (waves.direction_deg - normal_deg).to_radians();
            let longshore_ms = 0.2 * (G * breaker_height).sqrt() * angle.sin();

            if longshore_ms.abs() > 1e-9 {
                // 正负号决定沿岸方向，位移垂直于岸线法向
                result.offset_km +=
                    course_vec(longshore_ms * 3.6 * dt_hours, normal_deg + 90.0);
                result.effects.push(ShallowEffect::LongshoreCurrent);
            }
        }
    }

    // 离岸流：风险过半才计入
    if let Some(rip) = &env.rip_current {
        if rip.risk > 0.5 {
            let speed_ms = 1.5 * rip.strength;
            result.offset_km += course_vec(speed_ms * 3.6 * dt_hours, rip.direction_deg);
            result.effects.push(ShallowEffect::RipCurrent);
        }
    }

    // 底流回流：逆波向
    if waves.height_m > 0.0 {
        let undertow_ms = 0.2 * (waves.height_m / depth_m) * (3.0 / depth_m).min(1.0);
        result.offset_km +=
            course_vec(undertow_ms * 3.6 * dt_hours, waves.direction_deg + 180.0);
        result.effects.push(ShallowEffect::Undertow);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use sd_environment::snapshot::{EnvSnapshot, WaveConditions};

    fn env_with_waves(height_m: f64, direction_deg: f64) -> EnvSnapshot {
        let mut env = EnvSnapshot::calm();
        env.waves = WaveConditions::new(height_m, 8.0, direction_deg);
        env
    }

    #[test]
    fn test_no_waves_no_surf_transport() {
        let env = EnvSnapshot::calm();
        let r = compute(&env, 3.0, 0.1);
        assert_eq!(r.offset_km, DVec2::ZERO);
        assert!(r.effects.is_empty());
    }

    #[test]
    fn test_undertow_opposes_waves() {
        // 波向北，回流向南
        let env = env_with_waves(1.0, 0.0);
        let r = compute(&env, 4.0, 0.1);
        assert!(r.effects.contains(&ShallowEffect::Undertow));
        assert!(r.offset_km.y < 0.0);
    }

    #[test]
    fn test_breaking_adds_probability_and_transport() {
        let dt = 0.1;
        let env = env_with_waves(3.0, 0.0);
        let r = compute(&env, 3.0, dt);
        assert!(r.effects.contains(&ShallowEffect::WaveBreaking));
        assert!((r.beaching_probability - 0.15 * dt).abs() < 1e-12);

        // 碎波输运分量 = 0.015·√(gd)·(H/d)
        let breaking_km = 0.015 * (G * 3.0_f64).sqrt() * 1.0 * 3.6 * dt;
        let undertow_km = 0.2 * 1.0 * 1.0 * 3.6 * dt;
        let expected_y = breaking_km - undertow_km;
        assert!((r.offset_km.y - expected_y).abs() < 1e-12);
    }

    #[test]
    fn test_longshore_needs_oblique_waves() {
        // 波向正对岸线法向：sin(2·0) = 0，无沿岸流
        let mut env = env_with_waves(1.0, 180.0);
        env.waves.shore_normal_deg = Some(180.0);
        let head_on = compute(&env, 4.0, 0.1);
        assert!(!head_on.effects.contains(&ShallowEffect::LongshoreCurrent));

        // 斜向 45°：沿岸流最大
        env.waves.direction_deg = 225.0;
        let oblique = compute(&env, 4.0, 0.1);
        assert!(oblique.effects.contains(&ShallowEffect::LongshoreCurrent));
        // 位移应有沿岸（东西）分量
        assert!(oblique.offset_km.x.abs() > 1e-9);
    }

    #[test]
    fn test_breaker_height_capped() {
        // H 远超 0.78·d 时沿岸流用截断后的碎波高
        let mut env = env_with_waves(10.0, 225.0);
        env.waves.shore_normal_deg = Some(180.0);
        let r = compute(&env, 2.0, 0.1);

        let expected_ms = 0.2 * (G * (BREAKING_RATIO * 2.0)).sqrt()
            * (2.0 * (225.0_f64 - 180.0).to_radians()).sin();
        let expected_km = (expected_ms * 3.6 * 0.1).abs();

        // 沿岸分量（East 向投影在 normal+90 = 270 方向上为负）
        assert!((r.offset_km.x.abs() - expected_km).abs() < expected_km * 0.5 + 1e-12);
    }
}
