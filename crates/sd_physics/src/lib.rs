// crates/sd_physics/src/lib.rs

//! SeaDrift 漂移物理
//!
//! 把环境场样本映射为单粒子单步位移，包括：
//! - [`types`]: 位移向量与方向约定
//! - [`object`]: 漂浮物类型与风压差系数表
//! - [`calculators`]: 风、流、浪、风压差、扩散五个纯计算器
//! - [`dispersion`]: 波浪色散关系 Newton 求解
//! - [`shallow`]: 浅水修正与碎波带过程
//! - [`shore_interaction`]: 触岸结局判定
//!
//! # 方向约定
//!
//! 所有计算器使用同一套位移分解：北分量 = cos(dir)·d，
//! 东分量 = sin(dir)·d，方向为"漂向"真北方位度。经度刻度默认
//! 两个方向统一 111.32 km/deg，见 [`sd_geo::displacement`]。

#![warn(clippy::all)]

pub mod calculators;
pub mod dispersion;
pub mod object;
pub mod shallow;
pub mod shore_interaction;
pub mod types;

pub use calculators::{
    CurrentDriftCalculator, DiffusionCalculator, LeewayCalculator, WaveDriftCalculator,
    WindDriftCalculator,
};
pub use dispersion::{solve_dispersion, DispersionSolution};
pub use object::{LeewayCoefficients, ObjectType};
pub use shallow::{ShallowDrift, ShallowEffect, ShallowWaterPhysics};
pub use shore_interaction::{resolve_shore_interaction, ShoreOutcome};
pub use types::DriftVector;

/// 重力加速度 [m/s²]
pub const G: f64 = 9.81;
