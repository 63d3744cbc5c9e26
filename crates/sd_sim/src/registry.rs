// crates/sd_sim/src/registry.rs

//! 模拟注册表与协作式执行
//!
//! 注册表是跨模拟唯一的共享可变结构：id → 模拟实例的查找与
//! 插入由读写锁保护，实例之间完全独立。
//!
//! 执行模型是协作式的：`run` 在调用方线程内按步推进，
//! 每步之前检查停止标志，每 10 步让出调度并发布进度事件，
//! 单个模拟不会独占调度器。进度单调不减；快照在对应步完成后
//! 才可见。

use crate::config::DriftConfig;
use crate::driver::DriftDriver;
use crate::error::SimulationError;
use crate::events::{EventDispatcher, SimulationEvent};
use crate::results::{compute_results, SimulationResults};
use crate::snapshot::Snapshot;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use sd_environment::provider::EnvironmentalProvider;
use sd_geodata::adapter::GeodataAdapter;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// 每多少步让出一次调度
const YIELD_INTERVAL_STEPS: u64 = 10;

/// 模拟ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimulationId(Uuid);

impl SimulationId {
    /// 创建新ID
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// 内部UUID
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SimulationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SimulationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SimulationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// 模拟状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationStatus {
    /// 运行中
    Running,
    /// 已完成
    Completed,
    /// 已停止
    Stopped,
    /// 失败
    Failed,
}

impl SimulationStatus {
    /// 是否为终止状态
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Stopped | Self::Failed)
    }
}

/// 状态报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    /// 模拟ID
    pub id: SimulationId,
    /// 状态
    pub status: SimulationStatus,
    /// 进度 [0, 100]
    pub progress: f64,
    /// 当前模拟时刻 [s]
    pub current_time_s: f64,
    /// 已完成步数
    pub completed_steps: u64,
    /// 启动时间
    pub start_time: DateTime<Utc>,
    /// 结束时间
    pub end_time: Option<DateTime<Utc>>,
    /// 估计剩余墙钟时间 [s]
    pub estimated_remaining_secs: Option<f64>,
    /// 错误信息
    pub error: Option<String>,
}

/// 可变模拟状态
struct SimState {
    status: SimulationStatus,
    progress: f64,
    current_time_s: f64,
    completed_steps: u64,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    error: Option<String>,
    results: Option<SimulationResults>,
}

/// 注册表中的单个模拟
struct Simulation {
    id: SimulationId,
    state: RwLock<SimState>,
    stop_flag: AtomicBool,
    driver: Mutex<DriftDriver>,
}

impl Simulation {
    fn report(&self) -> StatusReport {
        let state = self.state.read();
        let estimated_remaining_secs = if state.status == SimulationStatus::Running
            && state.progress > 0.0
            && state.progress < 100.0
        {
            let elapsed = (Utc::now() - state.started_at).num_milliseconds() as f64 / 1000.0;
            Some(elapsed / state.progress * (100.0 - state.progress))
        } else {
            None
        };

        StatusReport {
            id: self.id,
            status: state.status,
            progress: state.progress,
            current_time_s: state.current_time_s,
            completed_steps: state.completed_steps,
            start_time: state.started_at,
            end_time: state.ended_at,
            estimated_remaining_secs,
            error: state.error.clone(),
        }
    }
}

/// 模拟注册表
#[derive(Default)]
pub struct SimulationRegistry {
    sims: RwLock<HashMap<SimulationId, Arc<Simulation>>>,
    events: EventDispatcher,
}

impl SimulationRegistry {
    /// 创建空注册表
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 事件分发器
    #[must_use]
    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    /// 启动模拟：校验配置、构建驱动器并登记
    pub fn start(
        &self,
        config: DriftConfig,
        env: Box<dyn EnvironmentalProvider>,
        geodata: GeodataAdapter,
    ) -> Result<SimulationId, SimulationError> {
        let particle_count = config.particle_count;
        let driver = DriftDriver::new(config, env, geodata)?;

        let id = SimulationId::new();
        let sim = Arc::new(Simulation {
            id,
            state: RwLock::new(SimState {
                status: SimulationStatus::Running,
                progress: 0.0,
                current_time_s: 0.0,
                completed_steps: 0,
                started_at: Utc::now(),
                ended_at: None,
                error: None,
                results: None,
            }),
            stop_flag: AtomicBool::new(false),
            driver: Mutex::new(driver),
        });

        self.sims.write().insert(id, sim);
        self.events.emit(SimulationEvent::Started { id, particle_count });
        tracing::info!("Simulation started: {} ({} particles)", id, particle_count);

        Ok(id)
    }

    /// 协作式运行到完成或停止
    ///
    /// 每步之前检查停止标志；每 10 步让出调度并更新进度。
    pub fn run(&self, id: SimulationId) -> Result<(), SimulationError> {
        let sim = self.get(id)?;

        loop {
            // 取消检查先于步进
            if sim.stop_flag.load(Ordering::SeqCst) {
                self.mark_stopped(&sim);
                return Ok(());
            }

            let (finished, steps) = {
                let mut driver = sim.driver.lock();
                if driver.is_finished() {
                    (true, driver.completed_steps())
                } else {
                    driver.step();

                    let mut state = sim.state.write();
                    state.current_time_s = driver.current_time_s();
                    state.completed_steps = driver.completed_steps();
                    // 进度单调不减
                    state.progress = state.progress.max(driver.progress() * 100.0);
                    (driver.is_finished(), driver.completed_steps())
                }
            };

            if steps % YIELD_INTERVAL_STEPS == 0 || finished {
                let state = sim.state.read();
                self.events.emit(SimulationEvent::Progress {
                    id,
                    progress: state.progress,
                    current_time_s: state.current_time_s,
                    completed_steps: state.completed_steps,
                });
                drop(state);
                std::thread::yield_now();
            }

            if finished {
                break;
            }
        }

        // 聚合结果并标记完成
        let results = {
            let driver = sim.driver.lock();
            compute_results(&driver)
        };
        let total_steps = results.total_steps;

        let mut state = sim.state.write();
        state.results = Some(results);
        state.status = SimulationStatus::Completed;
        state.progress = 100.0;
        state.ended_at = Some(Utc::now());
        let duration_secs =
            (Utc::now() - state.started_at).num_milliseconds() as f64 / 1000.0;
        drop(state);

        self.events.emit(SimulationEvent::Completed {
            id,
            duration_secs,
            total_steps,
        });
        tracing::info!(
            "Simulation completed: {} ({} steps, {:.2}s)",
            id,
            total_steps,
            duration_secs
        );

        Ok(())
    }

    /// 查询状态
    pub fn status(&self, id: SimulationId) -> Result<StatusReport, SimulationError> {
        Ok(self.get(id)?.report())
    }

    /// 取聚合结果
    ///
    /// 被停止的模拟返回 Stopped，其余未完成状态返回 NotReady。
    pub fn results(&self, id: SimulationId) -> Result<SimulationResults, SimulationError> {
        let sim = self.get(id)?;
        let state = sim.state.read();
        match state.status {
            SimulationStatus::Completed => {}
            SimulationStatus::Stopped => return Err(SimulationError::Stopped(id)),
            _ => return Err(SimulationError::NotReady(id)),
        }
        state
            .results
            .clone()
            .ok_or(SimulationError::NotReady(id))
    }

    /// 取指定小时的快照
    pub fn snapshot(&self, id: SimulationId, hour: u32) -> Result<Snapshot, SimulationError> {
        let sim = self.get(id)?;
        let driver = sim.driver.lock();
        driver
            .snapshot_at_hour(hour)
            .cloned()
            .ok_or(SimulationError::SnapshotNotFound { id, hour })
    }

    /// 标记粒子已寻获（外部搜救动作）
    ///
    /// 返回是否发生了转移；编号无效或粒子已非活跃时为 false。
    pub fn recover_particle(
        &self,
        id: SimulationId,
        particle_id: usize,
    ) -> Result<bool, SimulationError> {
        let sim = self.get(id)?;
        let recovered = sim.driver.lock().recover_particle(particle_id);
        if recovered {
            tracing::info!("Particle {} recovered in simulation {}", particle_id, id);
        }
        Ok(recovered)
    }

    /// 列出全部模拟的状态报告
    #[must_use]
    pub fn list(&self) -> Vec<StatusReport> {
        self.sims.read().values().map(|s| s.report()).collect()
    }

    /// 停止模拟（幂等）
    ///
    /// 已终止的模拟不受影响；快照与统计保留。
    pub fn stop(&self, id: SimulationId) -> Result<(), SimulationError> {
        let sim = self.get(id)?;
        sim.stop_flag.store(true, Ordering::SeqCst);

        if !sim.state.read().status.is_terminal() {
            self.mark_stopped(&sim);
        }
        Ok(())
    }

    /// 标记失败
    pub fn fail(&self, id: SimulationId, error: impl Into<String>) -> Result<(), SimulationError> {
        let sim = self.get(id)?;
        let error = error.into();

        let mut state = sim.state.write();
        state.status = SimulationStatus::Failed;
        state.ended_at = Some(Utc::now());
        state.error = Some(error.clone());
        drop(state);

        self.events.emit(SimulationEvent::Failed { id, error: error.clone() });
        tracing::error!("Simulation failed: {} - {}", id, error);
        Ok(())
    }

    /// 删除模拟
    pub fn remove(&self, id: SimulationId) -> Result<(), SimulationError> {
        self.sims
            .write()
            .remove(&id)
            .map(|_| {
                tracing::info!("Simulation removed: {}", id);
            })
            .ok_or(SimulationError::NotFound(id))
    }

    /// 注册的模拟数量
    #[must_use]
    pub fn len(&self) -> usize {
        self.sims.read().len()
    }

    /// 是否为空
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sims.read().is_empty()
    }

    fn get(&self, id: SimulationId) -> Result<Arc<Simulation>, SimulationError> {
        self.sims
            .read()
            .get(&id)
            .cloned()
            .ok_or(SimulationError::NotFound(id))
    }

    fn mark_stopped(&self, sim: &Simulation) {
        let mut state = sim.state.write();
        if state.status.is_terminal() {
            return;
        }
        state.status = SimulationStatus::Stopped;
        state.ended_at = Some(Utc::now());
        drop(state);

        self.events.emit(SimulationEvent::Stopped { id: sim.id });
        tracing::info!("Simulation stopped: {}", sim.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sd_environment::synthetic::SyntheticEnvironment;
    use sd_geo::point::GeoPoint;
    use sd_geodata::synthetic::SyntheticGeoProvider;

    fn small_config() -> DriftConfig {
        DriftConfig::new(GeoPoint::new(29.30, -94.80))
            .with_particles(50)
            .with_duration(2.0, 600.0)
            .with_seed(3)
    }

    fn open_water() -> GeodataAdapter {
        GeodataAdapter::new(Arc::new(SyntheticGeoProvider::flat(80.0)))
    }

    fn start_small(registry: &SimulationRegistry) -> SimulationId {
        registry
            .start(
                small_config(),
                Box::new(SyntheticEnvironment::new(3)),
                open_water(),
            )
            .unwrap()
    }

    #[test]
    fn test_start_and_status() {
        let registry = SimulationRegistry::new();
        let id = start_small(&registry);

        let report = registry.status(id).unwrap();
        assert_eq!(report.status, SimulationStatus::Running);
        assert_eq!(report.progress, 0.0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_invalid_config_refused() {
        let registry = SimulationRegistry::new();
        let bad = DriftConfig::new(GeoPoint::new(99.0, 0.0));
        let result = registry.start(
            bad,
            Box::new(SyntheticEnvironment::calm()),
            open_water(),
        );
        assert!(matches!(result, Err(SimulationError::InvalidConfig(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_run_to_completion_and_results() {
        let registry = SimulationRegistry::new();
        let id = start_small(&registry);

        // 完成前结果未就绪
        assert!(matches!(
            registry.results(id),
            Err(SimulationError::NotReady(_))
        ));

        registry.run(id).unwrap();

        let report = registry.status(id).unwrap();
        assert_eq!(report.status, SimulationStatus::Completed);
        assert_eq!(report.progress, 100.0);
        assert!(report.end_time.is_some());

        let results = registry.results(id).unwrap();
        assert_eq!(results.total_count, 50);
        assert_eq!(results.total_steps, 12);
    }

    #[test]
    fn test_snapshot_lookup() {
        let registry = SimulationRegistry::new();
        let id = start_small(&registry);
        registry.run(id).unwrap();

        let snap = registry.snapshot(id, 1).unwrap();
        assert_eq!(snap.hour, 1);

        assert!(matches!(
            registry.snapshot(id, 99),
            Err(SimulationError::SnapshotNotFound { hour: 99, .. })
        ));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let registry = SimulationRegistry::new();
        let id = start_small(&registry);

        registry.stop(id).unwrap();
        let report = registry.status(id).unwrap();
        assert_eq!(report.status, SimulationStatus::Stopped);

        // 重复停止与对已完成模拟停止都是无操作
        registry.stop(id).unwrap();
        assert_eq!(registry.status(id).unwrap().status, SimulationStatus::Stopped);

        // 停止后快照仍可读，但聚合结果以 Stopped 拒绝
        assert!(registry.snapshot(id, 0).is_ok());
        assert!(matches!(
            registry.results(id),
            Err(SimulationError::Stopped(_))
        ));
    }

    #[test]
    fn test_recover_particle() {
        let registry = SimulationRegistry::new();
        let id = start_small(&registry);

        assert!(registry.recover_particle(id, 0).unwrap());
        // 重复寻获与越界编号均为 false
        assert!(!registry.recover_particle(id, 0).unwrap());
        assert!(!registry.recover_particle(id, 9999).unwrap());

        registry.run(id).unwrap();
        let results = registry.results(id).unwrap();
        assert_eq!(results.recovered_count, 1);
        assert_eq!(
            results.active_count + results.beached_count + results.recovered_count,
            50
        );

        // 寻获粒子冻结在快照中
        let snap = registry.snapshot(id, 2).unwrap();
        assert_eq!(snap.recovered_count, 1);

        let ghost = SimulationId::new();
        assert!(matches!(
            registry.recover_particle(ghost, 0),
            Err(SimulationError::NotFound(_))
        ));
    }

    #[test]
    fn test_stopped_simulation_does_not_advance() {
        let registry = SimulationRegistry::new();
        let id = start_small(&registry);

        registry.stop(id).unwrap();
        registry.run(id).unwrap();

        let report = registry.status(id).unwrap();
        assert_eq!(report.status, SimulationStatus::Stopped);
        assert_eq!(report.completed_steps, 0);
    }

    #[test]
    fn test_remove() {
        let registry = SimulationRegistry::new();
        let id = start_small(&registry);

        registry.remove(id).unwrap();
        assert!(matches!(
            registry.status(id),
            Err(SimulationError::NotFound(_))
        ));
        assert!(matches!(
            registry.remove(id),
            Err(SimulationError::NotFound(_))
        ));
    }

    #[test]
    fn test_unknown_id_not_found() {
        let registry = SimulationRegistry::new();
        let ghost = SimulationId::new();
        assert!(matches!(
            registry.status(ghost),
            Err(SimulationError::NotFound(_))
        ));
    }
}
