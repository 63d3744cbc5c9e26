// crates/sd_environment/src/lib.rs

//! SeaDrift 环境场
//!
//! 提供漂移引擎消费的环境数据抽象，包括：
//! - [`snapshot`]: 风、流、浪、温度、海况的时空快照类型
//! - [`provider`]: 可插拔的环境数据提供者接口
//! - [`synthetic`]: 带随机游走演化的合成环境（测试与演示）
//! - [`cache`]: 按数据种类 TTL 缓存提供者返回值
//!
//! 外部数据源（潮汐站、浮标、气象服务）实现 [`provider::EnvironmentalProvider`]
//! 即可接入；热循环内不发生 IO，提供者在步进之间被 `advance` 推进。

#![warn(clippy::all)]

pub mod cache;
pub mod provider;
pub mod snapshot;
pub mod synthetic;

pub use cache::{FieldCache, FieldTtl};
pub use provider::EnvironmentalProvider;
pub use snapshot::{
    BathymetryGradient, CurrentConditions, EnvSnapshot, RipCurrentInfo, SeaState, TidalInfo,
    WaveConditions, WindConditions,
};
pub use synthetic::SyntheticEnvironment;
