// crates/sd_geodata/src/adapter.rs

//! 地理数据查询适配器
//!
//! 在提供者之上叠加两层行为：
//!
//! 1. **有界缓存**：水深与岸线类型按 1e-4° 取整键缓存，
//!    容量上限 10 000 条，写满后按插入顺序淘汰。
//! 2. **保守降级**：提供者返回 None 时回退到 20-50 m 水深带、
//!    沙质岸线、零梯度，并计入 `synthetic_lookups` 供快照告警。
//!
//! 缓存读多写少，用 `parking_lot::RwLock` 保护，允许驱动器在
//! 一步内并行推进粒子；重复计算被容忍，写入以后到为准。

use crate::provider::{GeoProvider, ShoreInfo};
use crate::shore::ShoreKind;
use parking_lot::RwLock;
use sd_environment::snapshot::{BathymetryGradient, RipCurrentInfo};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// 缓存容量上限
const CACHE_CAPACITY: usize = 10_000;

/// 降级水深带下限 [m]
const FALLBACK_DEPTH_MIN: f64 = 20.0;
/// 降级水深带宽度 [m]
const FALLBACK_DEPTH_SPAN: f64 = 30.0;

/// 位置取整键，分辨率 1e-4°（约 11 m）
type CacheKey = (i64, i64);

#[inline]
fn cache_key(lat: f64, lng: f64) -> CacheKey {
    ((lat * 1e4).round() as i64, (lng * 1e4).round() as i64)
}

/// 插入顺序淘汰的有界缓存
#[derive(Debug)]
struct BoundedCache<V> {
    map: HashMap<CacheKey, V>,
    order: VecDeque<CacheKey>,
    capacity: usize,
}

impl<V: Copy> BoundedCache<V> {
    fn new(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn get(&self, key: &CacheKey) -> Option<V> {
        self.map.get(key).copied()
    }

    fn insert(&mut self, key: CacheKey, value: V) {
        if self.map.contains_key(&key) {
            self.map.insert(key, value);
            return;
        }
        if self.map.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.map.remove(&oldest);
            }
        }
        self.map.insert(key, value);
        self.order.push_back(key);
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

/// 地理数据适配器
///
/// 漂移驱动器的唯一地理数据入口。克隆共享同一份缓存与计数。
#[derive(Clone)]
pub struct GeodataAdapter {
    provider: Arc<dyn GeoProvider>,
    depth_cache: Arc<RwLock<BoundedCache<f64>>>,
    shore_cache: Arc<RwLock<BoundedCache<ShoreKind>>>,
    synthetic_lookups: Arc<AtomicU64>,
}

impl GeodataAdapter {
    /// 创建新的适配器
    pub fn new(provider: Arc<dyn GeoProvider>) -> Self {
        Self {
            provider,
            depth_cache: Arc::new(RwLock::new(BoundedCache::new(CACHE_CAPACITY))),
            shore_cache: Arc::new(RwLock::new(BoundedCache::new(CACHE_CAPACITY))),
            synthetic_lookups: Arc::new(AtomicU64::new(0)),
        }
    }

    /// 查询水深 [m]
    ///
    /// 提供者未命中时返回确定性的 20-50 m 带内降级值并计数；
    /// 降级值按位置取整键散列，同一位置反复查询结果一致。
    pub fn depth_at(&self, lat: f64, lng: f64) -> f64 {
        let key = cache_key(lat, lng);

        if let Some(d) = self.depth_cache.read().get(&key) {
            return d;
        }

        let depth = match self.provider.depth(lat, lng) {
            Some(d) if d.is_finite() => d,
            _ => {
                if self.synthetic_lookups.fetch_add(1, Ordering::Relaxed) == 0 {
                    tracing::warn!(
                        "Geo provider returned no depth near ({:.4}, {:.4}), \
                         falling back to conservative 20-50 m band",
                        lat,
                        lng
                    );
                }
                fallback_depth(key)
            }
        };

        self.depth_cache.write().insert(key, depth);
        depth
    }

    /// 查询水深梯度
    ///
    /// 缺失即视为平坦海底，不做降级计数（零梯度与无数据等价）。
    pub fn gradient_at(&self, lat: f64, lng: f64) -> Option<BathymetryGradient> {
        self.provider.bathymetry_gradient(lat, lng)
    }

    /// 查询最近岸线信息
    pub fn shore_info_at(&self, lat: f64, lng: f64) -> Option<ShoreInfo> {
        self.provider.shore_info(lat, lng)
    }

    /// 查询岸线类型
    ///
    /// 未命中时降级为沙滩并计数。
    pub fn shore_type_at(&self, lat: f64, lng: f64) -> ShoreKind {
        let key = cache_key(lat, lng);

        if let Some(kind) = self.shore_cache.read().get(&key) {
            return kind;
        }

        let kind = match self.provider.shore_type(lat, lng) {
            Some(k) => k,
            None => {
                self.synthetic_lookups.fetch_add(1, Ordering::Relaxed);
                ShoreKind::Sandy
            }
        };

        self.shore_cache.write().insert(key, kind);
        kind
    }

    /// 查询岸线法向 [度]
    ///
    /// 优先用提供者的岸线信息；缺失时退回给定默认值并计数。
    pub fn shore_normal_at(&self, lat: f64, lng: f64, default_deg: f64) -> f64 {
        match self.provider.shore_info(lat, lng) {
            Some(info) => info.shore_normal_deg,
            None => {
                self.synthetic_lookups.fetch_add(1, Ordering::Relaxed);
                default_deg
            }
        }
    }

    /// 查询离岸流
    pub fn rip_current_at(&self, lat: f64, lng: f64, time_s: f64) -> Option<RipCurrentInfo> {
        self.provider.rip_current(lat, lng, time_s)
    }

    /// 降级查询累计次数
    pub fn synthetic_lookups(&self) -> u64 {
        self.synthetic_lookups.load(Ordering::Relaxed)
    }

    /// 当前水深缓存条数
    pub fn depth_cache_len(&self) -> usize {
        self.depth_cache.read().len()
    }
}

/// 位置键确定性散列到 [20, 50) m 水深带
fn fallback_depth(key: CacheKey) -> f64 {
    let h = (key.0.wrapping_mul(73_856_093) ^ key.1.wrapping_mul(19_349_663)).unsigned_abs();
    FALLBACK_DEPTH_MIN + FALLBACK_DEPTH_SPAN * ((h % 1000) as f64 / 1000.0)
}
