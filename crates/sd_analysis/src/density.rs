// crates/sd_analysis/src/density.rs

//! 密度热图
//!
//! 把活跃粒子装入 0.01°（约 1.1 km）方格，输出按计数降序的
//! 占用格列表，权重归一化到最大格计数。

use sd_geo::bounds::GeoBounds;
use sd_geo::point::GeoPoint;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 默认格子边长 [度]
pub const DEFAULT_CELL_SIZE_DEG: f64 = 0.01;

/// 高密度格阈值（相对最大格计数）
const HIGH_DENSITY_FRACTION: f64 = 0.1;

/// 密度格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityCell {
    /// 格中心
    pub center: GeoPoint,
    /// 粒子数
    pub count: usize,
    /// 归一化权重 = count / maxCount，范围 (0, 1]
    pub weight: f64,
    /// 格内粒子编号
    pub particle_ids: Vec<usize>,
}

/// 密度分析器
#[derive(Debug, Clone, Copy)]
pub struct DensityGrid {
    /// 格子边长 [度]
    pub cell_size_deg: f64,
}

impl Default for DensityGrid {
    fn default() -> Self {
        Self {
            cell_size_deg: DEFAULT_CELL_SIZE_DEG,
        }
    }
}

impl DensityGrid {
    /// 创建自定义格距的分析器
    #[must_use]
    pub fn new(cell_size_deg: f64) -> Self {
        Self { cell_size_deg }
    }

    /// 网格化并按计数降序输出占用格
    ///
    /// 输入为 (粒子编号, 位置)；空输入返回空列表。
    #[must_use]
    pub fn analyze(&self, particles: &[(usize, GeoPoint)]) -> Vec<DensityCell> {
        let mut bins: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        for (id, p) in particles {
            let key = (
                (p.lat / self.cell_size_deg).floor() as i64,
                (p.lng / self.cell_size_deg).floor() as i64,
            );
            bins.entry(key).or_default().push(*id);
        }

        let max_count = bins.values().map(Vec::len).max().unwrap_or(0);
        if max_count == 0 {
            return Vec::new();
        }

        let mut cells: Vec<DensityCell> = bins
            .into_iter()
            .map(|((i, j), ids)| DensityCell {
                center: GeoPoint::new(
                    (i as f64 + 0.5) * self.cell_size_deg,
                    (j as f64 + 0.5) * self.cell_size_deg,
                ),
                count: ids.len(),
                weight: ids.len() as f64 / max_count as f64,
                particle_ids: ids,
            })
            .collect();

        cells.sort_by(|a, b| b.count.cmp(&a.count));
        cells
    }

    /// 高密度格：计数不低于最大格计数的 10%
    #[must_use]
    pub fn high_density(cells: &[DensityCell]) -> Vec<&DensityCell> {
        let Some(max_count) = cells.first().map(|c| c.count) else {
            return Vec::new();
        };
        let threshold = HIGH_DENSITY_FRACTION * max_count as f64;
        cells
            .iter()
            .filter(|c| c.count as f64 >= threshold)
            .collect()
    }

    /// 粒子云包围盒面积 [km²]
    #[must_use]
    pub fn search_area_km2(points: &[GeoPoint]) -> f64 {
        GeoBounds::from_points(points)
            .map(|b| b.area_km2())
            .unwrap_or(0.0)
    }
}
