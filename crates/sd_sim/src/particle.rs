// crates/sd_sim/src/particle.rs

//! 粒子与粒子系综
//!
//! 粒子在初始化时一次性创建，此后只由驱动器变异、永不删除。
//! 不变量：
//! - 状态一旦离开 `Active` 即冻结，位置与状态不再变化
//! - `age_seconds` 单调不减，只在活跃时推进
//! - `Beached` 粒子必有 `beached_time_s`

use sd_geo::point::GeoPoint;
use sd_geodata::shore::ShoreKind;
use sd_physics::shallow::ShallowEffect;
use serde::{Deserialize, Serialize};

/// 粒子状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleStatus {
    /// 漂移中
    Active,
    /// 已搁浅
    Beached,
    /// 已寻获
    Recovered,
}

/// 漂移粒子
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    /// 稳定编号 0..N-1
    pub id: usize,
    /// 当前位置
    pub position: GeoPoint,
    /// 状态
    pub status: ParticleStatus,
    /// 活跃时长 [s]
    pub age_seconds: f64,
    /// 搁浅时刻 [s]
    pub beached_time_s: Option<f64>,
    /// 搁浅处岸线类型
    pub beach_kind: Option<ShoreKind>,
    /// 搁浅时生效的浅水效应
    pub beaching_effects: Vec<ShallowEffect>,
    /// 最近一步的水深 [m]，<= 0 表示陆地
    pub depth_at_last_step_m: Option<f64>,
    /// 被岸线反射的次数
    pub reflection_count: u32,
}

impl Particle {
    /// 在指定位置创建活跃粒子
    #[must_use]
    pub fn new(id: usize, position: GeoPoint) -> Self {
        Self {
            id,
            position,
            status: ParticleStatus::Active,
            age_seconds: 0.0,
            beached_time_s: None,
            beach_kind: None,
            beaching_effects: Vec::new(),
            depth_at_last_step_m: None,
            reflection_count: 0,
        }
    }

    /// 是否仍在漂移
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ParticleStatus::Active
    }

    /// 搁浅并冻结
    pub fn beach(
        &mut self,
        position: GeoPoint,
        time_s: f64,
        kind: ShoreKind,
        effects: Vec<ShallowEffect>,
    ) {
        self.position = position;
        self.status = ParticleStatus::Beached;
        self.beached_time_s = Some(time_s);
        self.beach_kind = Some(kind);
        self.beaching_effects = effects;
    }

    /// 标记寻获并冻结
    ///
    /// 只有活跃粒子可以被寻获（离开 `Active` 后状态冻结）；
    /// 返回是否发生了转移。
    pub fn recover(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.status = ParticleStatus::Recovered;
        true
    }
}

/// 粒子系综
///
/// 创建后粒子数恒定；只暴露按编号的变异与活跃/搁浅/寻获分区视图。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleSet {
    particles: Vec<Particle>,
}

impl ParticleSet {
    /// 从初始位置创建系综
    #[must_use]
    pub fn from_positions(positions: Vec<GeoPoint>) -> Self {
        Self {
            particles: positions
                .into_iter()
                .enumerate()
                .map(|(id, p)| Particle::new(id, p))
                .collect(),
        }
    }

    /// 粒子总数
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// 是否为空
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// 活跃粒子数
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_active()).count()
    }

    /// 搁浅粒子数
    #[must_use]
    pub fn beached_count(&self) -> usize {
        self.particles
            .iter()
            .filter(|p| p.status == ParticleStatus::Beached)
            .count()
    }

    /// 已寻获粒子数
    #[must_use]
    pub fn recovered_count(&self) -> usize {
        self.particles
            .iter()
            .filter(|p| p.status == ParticleStatus::Recovered)
            .count()
    }

    /// 按编号标记寻获；编号无效或粒子已非活跃时返回 false
    pub fn recover(&mut self, id: usize) -> bool {
        self.particles.get_mut(id).is_some_and(Particle::recover)
    }

    /// 只读遍历
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// 可变切片（仅驱动器使用）
    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// 按编号取粒子
    #[must_use]
    pub fn get(&self, id: usize) -> Option<&Particle> {
        self.particles.get(id)
    }

    /// 活跃粒子的 (编号, 位置) 列表
    #[must_use]
    pub fn active_positions(&self) -> Vec<(usize, GeoPoint)> {
        self.particles
            .iter()
            .filter(|p| p.is_active())
            .map(|p| (p.id, p.position))
            .collect()
    }

    /// 活跃粒子质心
    #[must_use]
    pub fn active_centroid(&self) -> Option<GeoPoint> {
        let positions: Vec<GeoPoint> = self
            .particles
            .iter()
            .filter(|p| p.is_active())
            .map(|p| p.position)
            .collect();
        sd_analysis::containment::centroid_of(&positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_particle_active() {
        let p = Particle::new(3, GeoPoint::new(29.3, -94.8));
        assert_eq!(p.id, 3);
        assert!(p.is_active());
        assert_eq!(p.age_seconds, 0.0);
        assert!(p.beached_time_s.is_none());
    }

    #[test]
    fn test_beach_freezes_and_records() {
        let mut p = Particle::new(0, GeoPoint::new(29.3, -94.8));
        let shore = GeoPoint::new(29.40, -94.8);
        p.beach(shore, 3600.0, ShoreKind::Sandy, vec![ShallowEffect::WaveBreaking]);

        assert_eq!(p.status, ParticleStatus::Beached);
        assert_eq!(p.position, shore);
        assert_eq!(p.beached_time_s, Some(3600.0));
        assert_eq!(p.beach_kind, Some(ShoreKind::Sandy));
    }

    #[test]
    fn test_recover_only_from_active() {
        let mut p = Particle::new(0, GeoPoint::new(29.3, -94.8));
        assert!(p.recover());
        assert_eq!(p.status, ParticleStatus::Recovered);

        // 寻获后状态冻结，重复寻获无效
        assert!(!p.recover());

        // 搁浅粒子不可再被标记寻获
        let mut b = Particle::new(1, GeoPoint::new(29.3, -94.8));
        b.beach(GeoPoint::new(29.4, -94.8), 600.0, ShoreKind::Sandy, Vec::new());
        assert!(!b.recover());
        assert_eq!(b.status, ParticleStatus::Beached);
    }

    #[test]
    fn test_set_recover_by_id() {
        let positions: Vec<GeoPoint> =
            (0..3).map(|i| GeoPoint::new(29.3 + i as f64 * 0.01, -94.8)).collect();
        let mut set = ParticleSet::from_positions(positions);

        assert!(set.recover(1));
        assert_eq!(set.recovered_count(), 1);
        assert_eq!(set.active_count(), 2);

        // 重复寻获与越界编号均为 false
        assert!(!set.recover(1));
        assert!(!set.recover(99));
        assert_eq!(set.recovered_count(), 1);
    }

    #[test]
    fn test_set_counts_partition() {
        let positions: Vec<GeoPoint> =
            (0..5).map(|i| GeoPoint::new(29.3 + i as f64 * 0.01, -94.8)).collect();
        let mut set = ParticleSet::from_positions(positions);

        assert_eq!(set.len(), 5);
        assert_eq!(set.active_count(), 5);

        set.as_mut_slice()[1].beach(
            GeoPoint::new(29.4, -94.8),
            600.0,
            ShoreKind::Rocky,
            Vec::new(),
        );

        assert_eq!(set.len(), 5);
        assert_eq!(set.active_count(), 4);
        assert_eq!(set.beached_count(), 1);
        assert_eq!(set.active_positions().len(), 4);
    }

    #[test]
    fn test_active_centroid_excludes_beached() {
        let positions = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(2.0, 2.0)];
        let mut set = ParticleSet::from_positions(positions);
        set.as_mut_slice()[1].beach(GeoPoint::new(2.0, 2.0), 0.0, ShoreKind::Sandy, Vec::new());

        let c = set.active_centroid().unwrap();
        assert!((c.lat - 0.0).abs() < 1e-12);
    }
}
