// crates/sd_geo/src/units.rs

//! 单位换算
//!
//! 漂移模拟的对外接口以节、海里为单位，内部计算使用千米与小时。

/// 地球平均半径 [km]
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// 每度纬度对应的距离 [km]
pub const KM_PER_DEG_LAT: f64 = 111.32;

/// 1 海里 = 1.852 千米
pub const KM_PER_NM: f64 = 1.852;

/// 1 节 = 1.852 千米/小时
pub const KMH_PER_KNOT: f64 = 1.852;

/// 海里转千米
#[inline]
#[must_use]
pub fn nm_to_km(nm: f64) -> f64 {
    nm * KM_PER_NM
}

/// 千米转海里
#[inline]
#[must_use]
pub fn km_to_nm(km: f64) -> f64 {
    km / KM_PER_NM
}

/// 节转千米每小时
#[inline]
#[must_use]
pub fn knots_to_kmh(knots: f64) -> f64 {
    knots * KMH_PER_KNOT
}

/// 千米每小时转节
#[inline]
#[must_use]
pub fn kmh_to_knots(kmh: f64) -> f64 {
    kmh / KMH_PER_KNOT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nm_km_roundtrip() {
        let nm = 12.5;
        assert!((km_to_nm(nm_to_km(nm)) - nm).abs() < 1e-12);
    }

    #[test]
    fn test_knots_to_kmh() {
        // 10 节 = 18.52 km/h
        assert!((knots_to_kmh(10.0) - 18.52).abs() < 1e-10);
    }
}
