// crates/sd_sim/src/events.rs

//! 模拟事件
//!
//! 注册表在生命周期节点发出事件，订阅方通过通道接收。
//! 发送失败（接收端已关闭）的订阅者在下次分发时被清理。

use crate::registry::SimulationId;
use parking_lot::RwLock;
use std::sync::mpsc::{channel, Receiver, Sender};

/// 模拟事件
#[derive(Debug, Clone)]
pub enum SimulationEvent {
    /// 模拟已启动
    Started {
        /// 模拟ID
        id: SimulationId,
        /// 粒子数
        particle_count: usize,
    },
    /// 进度更新
    Progress {
        /// 模拟ID
        id: SimulationId,
        /// 进度 [0, 100]
        progress: f64,
        /// 当前模拟时刻 [s]
        current_time_s: f64,
        /// 已完成步数
        completed_steps: u64,
    },
    /// 快照已记录
    SnapshotRecorded {
        /// 模拟ID
        id: SimulationId,
        /// 小时序号
        hour: u32,
    },
    /// 模拟完成
    Completed {
        /// 模拟ID
        id: SimulationId,
        /// 墙钟耗时 [s]
        duration_secs: f64,
        /// 总步数
        total_steps: u64,
    },
    /// 模拟被停止
    Stopped {
        /// 模拟ID
        id: SimulationId,
    },
    /// 模拟失败
    Failed {
        /// 模拟ID
        id: SimulationId,
        /// 错误信息
        error: String,
    },
}

/// 事件分发器
#[derive(Default)]
pub struct EventDispatcher {
    subscribers: RwLock<Vec<Sender<SimulationEvent>>>,
}

impl EventDispatcher {
    /// 创建分发器
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 订阅事件流
    pub fn subscribe(&self) -> Receiver<SimulationEvent> {
        let (tx, rx) = channel();
        self.subscribers.write().push(tx);
        rx
    }

    /// 分发事件，顺带清理失效订阅者
    pub fn emit(&self, event: SimulationEvent) {
        let mut subs = self.subscribers.write();
        subs.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// 当前订阅者数量
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_and_emit() {
        let dispatcher = EventDispatcher::new();
        let rx = dispatcher.subscribe();

        let id = SimulationId::new();
        dispatcher.emit(SimulationEvent::Started {
            id,
            particle_count: 100,
        });

        match rx.try_recv().unwrap() {
            SimulationEvent::Started { particle_count, .. } => assert_eq!(particle_count, 100),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_dropped_subscriber_pruned() {
        let dispatcher = EventDispatcher::new();
        {
            let _rx = dispatcher.subscribe();
        }
        assert_eq!(dispatcher.subscriber_count(), 1);

        dispatcher.emit(SimulationEvent::Stopped {
            id: SimulationId::new(),
        });
        assert_eq!(dispatcher.subscriber_count(), 0);
    }
}
