// crates/sd_physics/src/calculators/mod.rs

//! 漂移计算器
//!
//! 五个纯计算器，各自把一类环境强迫映射为单步位移：
//! - [`wind`]: 风致表面漂移
//! - [`current`]: 海流平移
//! - [`wave`]: 波浪 Stokes 漂移（深水基线）
//! - [`leeway`]: 按物体类型的风压差
//! - [`diffusion`]: 各向同性随机游走
//!
//! 计算器无内部状态，只持有可调参数，可安全共享。

pub mod current;
pub mod diffusion;
pub mod leeway;
pub mod wave;
pub mod wind;

pub use current::CurrentDriftCalculator;
pub use diffusion::DiffusionCalculator;
pub use leeway::LeewayCalculator;
pub use wave::WaveDriftCalculator;
pub use wind::WindDriftCalculator;
