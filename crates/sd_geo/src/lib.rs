// crates/sd_geo/src/lib.rs

//! SeaDrift 大地坐标内核
//!
//! 提供漂移模拟所需的球面几何计算，包括：
//! - [`point`]: 地理坐标点与球面公式（haversine、方位角、目标点）
//! - [`bounds`]: 经纬度包围盒
//! - [`units`]: 海里/千米、节/千米每小时等单位换算
//! - [`displacement`]: 小位移平面近似（千米 ↔ 度）
//!
//! # 设计原则
//!
//! 1. **纯函数**: 所有计算无内部状态，可安全共享
//! 2. **十进制度**: 对外接口一律使用十进制度坐标
//! 3. **兼容性**: 平面近似默认两个方向统一使用 111.32 km/deg，
//!    保持历史漂移结果可比，[`displacement::LongitudeScale`] 提供纬度修正开关

#![warn(clippy::all)]

pub mod bounds;
pub mod displacement;
pub mod point;
pub mod units;

pub use bounds::GeoBounds;
pub use displacement::{course_offset_km, offset_to_degrees, LongitudeScale};
pub use point::GeoPoint;
pub use units::{km_to_nm, kmh_to_knots, knots_to_kmh, nm_to_km, EARTH_RADIUS_KM, KM_PER_DEG_LAT};
