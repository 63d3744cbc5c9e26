// crates/sd_environment/src/cache.rs

//! 环境数据 TTL 缓存
//!
//! 外部提供者（潮汐站、浮标、气象服务）的返回值按数据种类的
//! 刷新周期缓存，避免热循环反复查询。时间基准是模拟时钟秒数，
//! 与墙钟无关。

use serde::{Deserialize, Serialize};

/// 各数据种类的缓存有效期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldTtl {
    /// 潮汐预报，15 分钟
    Tides,
    /// 水位观测，3 分钟
    WaterLevel,
    /// 海流，15 分钟
    Currents,
    /// 浮标观测，5 分钟
    Buoys,
    /// 气象，10 分钟
    Weather,
}

impl FieldTtl {
    /// 有效期 [s]
    #[inline]
    #[must_use]
    pub const fn seconds(&self) -> f64 {
        match self {
            Self::Tides => 900.0,
            Self::WaterLevel => 180.0,
            Self::Currents => 900.0,
            Self::Buoys => 300.0,
            Self::Weather => 600.0,
        }
    }
}

/// 单值 TTL 缓存
#[derive(Debug, Clone)]
pub struct FieldCache<T> {
    value: Option<T>,
    fetched_at: f64,
    ttl_s: f64,
}

impl<T: Clone> FieldCache<T> {
    /// 创建空缓存
    #[must_use]
    pub fn new(ttl: FieldTtl) -> Self {
        Self {
            value: None,
            fetched_at: 0.0,
            ttl_s: ttl.seconds(),
        }
    }

    /// 创建自定义有效期的缓存
    #[must_use]
    pub fn with_ttl_seconds(ttl_s: f64) -> Self {
        Self {
            value: None,
            fetched_at: 0.0,
            ttl_s,
        }
    }

    /// 当前值是否仍然有效
    #[must_use]
    pub fn is_fresh(&self, now_s: f64) -> bool {
        self.value.is_some() && (now_s - self.fetched_at) < self.ttl_s
    }

    /// 取缓存值，过期则用 `fetch` 重新获取
    pub fn get_or_fetch(&mut self, now_s: f64, fetch: impl FnOnce() -> T) -> T {
        if !self.is_fresh(now_s) {
            self.value = Some(fetch());
            self.fetched_at = now_s;
        }
        self.value.clone().expect("value set above")
    }

    /// 清空缓存
    pub fn invalidate(&mut self) {
        self.value = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_values() {
        assert_eq!(FieldTtl::Tides.seconds(), 900.0);
        assert_eq!(FieldTtl::WaterLevel.seconds(), 180.0);
        assert_eq!(FieldTtl::Buoys.seconds(), 300.0);
        assert_eq!(FieldTtl::Weather.seconds(), 600.0);
    }

    #[test]
    fn test_cache_fetch_once_within_ttl() {
        let mut cache = FieldCache::new(FieldTtl::Buoys);
        let mut calls = 0;

        let v1 = cache.get_or_fetch(0.0, || {
            calls += 1;
            42
        });
        let v2 = cache.get_or_fetch(299.0, || {
            calls += 1;
            99
        });

        // 有效期内不重新获取
        assert_eq!(v1, 42);
        assert_eq!(v2, 42);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_cache_refetch_after_expiry() {
        let mut cache = FieldCache::new(FieldTtl::WaterLevel);
        cache.get_or_fetch(0.0, || 1);
        let v = cache.get_or_fetch(181.0, || 2);
        assert_eq!(v, 2);
    }

    #[test]
    fn test_invalidate() {
        let mut cache = FieldCache::with_ttl_seconds(1000.0);
        cache.get_or_fetch(0.0, || 7);
        cache.invalidate();
        let v = cache.get_or_fetch(1.0, || 8);
        assert_eq!(v, 8);
    }
}
