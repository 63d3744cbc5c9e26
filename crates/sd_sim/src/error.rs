// crates/sd_sim/src/error.rs

//! 模拟错误
//!
//! 配置与注册表访问的错误直接返给调用方；每步物理内部的异常
//! （地理数据缺失、色散不收敛、NaN 位移）按粒子隔离处理，
//! 永不中止模拟，因此不在此枚举中出现。

use crate::registry::SimulationId;
use thiserror::Error;

/// 模拟错误
#[derive(Debug, Error)]
pub enum SimulationError {
    /// 配置无效
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// 模拟不存在
    #[error("Simulation not found: {0}")]
    NotFound(SimulationId),

    /// 指定小时没有快照
    #[error("Snapshot for hour {hour} not found in simulation {id}")]
    SnapshotNotFound {
        /// 模拟ID
        id: SimulationId,
        /// 请求的小时
        hour: u32,
    },

    /// 结果尚未就绪（模拟未完成）
    #[error("Results not ready: simulation {0} has not completed")]
    NotReady(SimulationId),

    /// 模拟在完成前被停止，聚合结果不可用
    #[error("Simulation {0} was stopped before completion")]
    Stopped(SimulationId),

    /// 模拟失败
    #[error("Simulation failed: {0}")]
    Failed(String),
}
