// crates/sd_physics/src/shore_interaction.rs

//! 触岸结局判定
//!
//! 粒子的尝试位置落在陆地（深度 ≤ 0）时，按岸线类型的参数抽签：
//!
//! - u < stickiness：就地搁浅
//! - u < stickiness + reflection：反射，从当前水中位置沿
//!   `shoreNormal + 180° ± 30°` 弹开 0.01-0.03 km
//! - 否则：放弃本步移动，留在原位

use crate::types::DriftVector;
use rand::Rng;
use sd_geo::displacement::LongitudeScale;
use sd_geo::point::GeoPoint;
use sd_geodata::shore::ShoreKind;

/// 反射距离下限 [km]
const REFLECT_MIN_KM: f64 = 0.01;
/// 反射距离上限 [km]
const REFLECT_MAX_KM: f64 = 0.03;
/// 反射方向抖动半宽 [度]
const REFLECT_JITTER_DEG: f64 = 30.0;

/// 触岸结局
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShoreOutcome {
    /// 搁浅在尝试位置
    Beached,
    /// 反射到新位置
    Reflected {
        /// 反射后的位置
        position: GeoPoint,
    },
    /// 留在原位
    Stayed,
}

/// 判定触岸结局
///
/// # 参数
/// - `kind`: 岸线类型
/// - `position`: 粒子当前（仍在水中的）位置
/// - `shore_normal_deg`: 岸线法向 [度]
#[must_use]
pub fn resolve_shore_interaction(
    kind: ShoreKind,
    position: &GeoPoint,
    shore_normal_deg: f64,
    rng: &mut impl Rng,
) -> ShoreOutcome {
    let params = kind.interaction_params();
    let u: f64 = rng.gen();

    if u < params.stickiness {
        return ShoreOutcome::Beached;
    }

    if u < params.stickiness + params.reflection {
        let distance_km = rng.gen_range(REFLECT_MIN_KM..=REFLECT_MAX_KM);
        let jitter = rng.gen_range(-REFLECT_JITTER_DEG..=REFLECT_JITTER_DEG);
        let direction = shore_normal_deg + 180.0 + jitter;

        let offset =
            DriftVector::from_course(distance_km, direction, position.lat, LongitudeScale::Uniform);
        return ShoreOutcome::Reflected {
            position: GeoPoint::new(position.lat + offset.dlat_deg, position.lng + offset.dlng_deg),
        };
    }

    ShoreOutcome::Stayed
}
