// crates/sd_environment/src/provider.rs

//! 环境数据提供者接口
//!
//! 抽象环境场的获取与时间演化。实现方可以是合成场、再分析数据
//! 或实时服务的客户端；热循环内只调用 `conditions_at`，外部 IO
//! 必须在 `advance` 之外完成。

use crate::snapshot::EnvSnapshot;

/// 环境数据提供者 trait
pub trait EnvironmentalProvider: Send + Sync {
    /// 查询指定位置与模拟时刻的环境快照
    ///
    /// # 参数
    /// - `lat`, `lng`: 十进制度
    /// - `time_s`: 模拟起始以来的秒数
    fn conditions_at(&self, lat: f64, lng: f64, time_s: f64) -> EnvSnapshot;

    /// 推进内部状态到指定模拟时刻
    ///
    /// 每个时间步调用一次。合成实现在此做随机游走演化；
    /// 数据驱动实现在此切换插值窗口。
    fn advance(&mut self, time_s: f64);
}
