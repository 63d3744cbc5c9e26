// crates/sd_analysis/src/lib.rs

//! SeaDrift 结果分析
//!
//! 从粒子云计算下游统计量，包括：
//! - [`density`]: 网格化密度热图与搜索区域度量
//! - [`containment`]: 质心、百分位凸包与包含概率
//! - [`survival`]: 分段因子生存模型
//!
//! 所有计算都是纯函数，输入为粒子位置切片，不依赖模拟内部状态。

#![warn(clippy::all)]

pub mod containment;
pub mod density;
pub mod survival;

pub use containment::{
    compute_containment, convex_hull, point_in_polygon, ContainmentResult, ContainmentZone,
};
pub use density::{DensityCell, DensityGrid};
pub use survival::{
    Clothing, HypothermiaStage, SurvivalAssessment, SurvivalEstimator, Urgency, VictimProfile,
};
