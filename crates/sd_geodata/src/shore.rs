// crates/sd_geodata/src/shore.rs

//! 岸线类型与交互参数
//!
//! 粒子触岸时的结局（搁浅、反射、滞留）由岸线类型的参数决定。

use serde::{Deserialize, Serialize};

/// 岸线类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShoreKind {
    /// 岩岸
    Rocky,
    /// 沙滩
    Sandy,
    /// 泥滩
    Muddy,
    /// 盐沼
    Marsh,
    /// 红树林
    Mangrove,
    /// 海堤
    Seawall,
    /// 抛石护岸
    Riprap,
    /// 珊瑚礁
    Coral,
}

/// 岸线交互参数
///
/// 约束：`stickiness + reflection <= 1`，余量为原地滞留概率。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShoreInteractionParams {
    /// 搁浅概率
    pub stickiness: f64,
    /// 反射概率
    pub reflection: f64,
    /// 粗糙度 [0, 1]
    pub roughness: f64,
    /// 透水性 [0, 1]
    pub permeability: f64,
}

impl ShoreKind {
    /// 全部岸线类型
    pub const ALL: [Self; 8] = [
        Self::Rocky,
        Self::Sandy,
        Self::Muddy,
        Self::Marsh,
        Self::Mangrove,
        Self::Seawall,
        Self::Riprap,
        Self::Coral,
    ];

    /// 该类型的交互参数
    #[must_use]
    pub const fn interaction_params(&self) -> ShoreInteractionParams {
        match self {
            Self::Rocky => ShoreInteractionParams {
                stickiness: 0.85,
                reflection: 0.15,
                roughness: 0.8,
                permeability: 0.1,
            },
            Self::Sandy => ShoreInteractionParams {
                stickiness: 0.60,
                reflection: 0.30,
                roughness: 0.3,
                permeability: 0.7,
            },
            Self::Muddy => ShoreInteractionParams {
                stickiness: 0.95,
                reflection: 0.05,
                roughness: 0.2,
                permeability: 0.4,
            },
            Self::Marsh => ShoreInteractionParams {
                stickiness: 1.0,
                reflection: 0.0,
                roughness: 0.4,
                permeability: 0.9,
            },
            Self::Mangrove => ShoreInteractionParams {
                stickiness: 1.0,
                reflection: 0.0,
                roughness: 0.9,
                permeability: 0.8,
            },
            Self::Seawall => ShoreInteractionParams {
                stickiness: 0.10,
                reflection: 0.90,
                roughness: 0.1,
                permeability: 0.0,
            },
            Self::Riprap => ShoreInteractionParams {
                stickiness: 0.40,
                reflection: 0.50,
                roughness: 0.7,
                permeability: 0.3,
            },
            Self::Coral => ShoreInteractionParams {
                stickiness: 0.70,
                reflection: 0.20,
                roughness: 0.9,
                permeability: 0.2,
            },
        }
    }
}

impl std::fmt::Display for ShoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Rocky => "rocky",
            Self::Sandy => "sandy",
            Self::Muddy => "muddy",
            Self::Marsh => "marsh",
            Self::Mangrove => "mangrove",
            Self::Seawall => "seawall",
            Self::Riprap => "riprap",
            Self::Coral => "coral",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probabilities_sum_within_unit() {
        for kind in ShoreKind::ALL {
            let p = kind.interaction_params();
            assert!(
                p.stickiness + p.reflection <= 1.0 + 1e-12,
                "{} 的概率和超过 1",
                kind
            );
            assert!(p.stickiness >= 0.0 && p.reflection >= 0.0);
        }
    }

    #[test]
    fn test_marsh_always_traps() {
        let p = ShoreKind::Marsh.interaction_params();
        assert_eq!(p.stickiness, 1.0);
        assert_eq!(p.reflection, 0.0);
    }

    #[test]
    fn test_seawall_mostly_reflects() {
        let p = ShoreKind::Seawall.interaction_params();
        assert!(p.reflection > p.stickiness);
    }

    #[test]
    fn test_serde_kebab_names() {
        let json = serde_json::to_string(&ShoreKind::Sandy).unwrap();
        assert_eq!(json, "\"sandy\"");
        let back: ShoreKind = serde_json::from_str("\"riprap\"").unwrap();
        assert_eq!(back, ShoreKind::Riprap);
    }
}
