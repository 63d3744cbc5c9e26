// crates/sd_geodata/src/lib.rs

//! SeaDrift 地理数据适配层
//!
//! 统一水深、岸线类型、岸线法向、水深梯度与离岸流的查询入口，包括：
//! - [`provider`]: 可插拔的地理数据提供者接口（所有查询可失败）
//! - [`shore`]: 岸线类型及其交互参数表
//! - [`adapter`]: 带有界缓存与保守降级的查询适配器
//! - [`synthetic`]: 平面海底 + 直线岸线的合成提供者
//!
//! # 降级策略
//!
//! 提供者任何查询返回 None 时，适配器回退到保守默认值
//! （20-50 m 水深带、沙质岸线、零梯度），只计数、不报错，
//! 模拟永不因地理数据缺失而失败。

#![warn(clippy::all)]

pub mod adapter;
pub mod provider;
pub mod shore;
pub mod synthetic;

pub use adapter::GeodataAdapter;
pub use provider::{GeoProvider, ShoreInfo};
pub use shore::{ShoreInteractionParams, ShoreKind};
pub use synthetic::SyntheticGeoProvider;
