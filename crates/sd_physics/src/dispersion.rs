// crates/sd_physics/src/dispersion.rs

//! 波浪色散关系求解
//!
//! 求解线性波色散关系 ω² = g·k·tanh(k·d)，用于浅水 Stokes 漂移。
//!
//! # 算法
//!
//! Newton-Raphson 迭代，初值取深水近似 k₀ = ω²/g，最多 20 次，
//! 收敛容差 1e-10。不收敛时回退到深水波数并置失败标志，
//! 由调用方计数，模拟继续。

use crate::G;

/// 最大迭代次数
const MAX_ITERATIONS: usize = 20;

/// 收敛容差
const TOLERANCE: f64 = 1e-10;

/// 色散关系解
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispersionSolution {
    /// 波数 k [1/m]
    pub k: f64,
    /// 是否在容差内收敛；false 表示使用了深水回退值
    pub converged: bool,
}

impl DispersionSolution {
    /// 波长 λ = 2π/k [m]
    #[inline]
    #[must_use]
    pub fn wavelength(&self) -> f64 {
        2.0 * std::f64::consts::PI / self.k
    }
}

/// 求解色散关系
///
/// # 参数
/// - `omega`: 角频率 [rad/s]
/// - `depth`: 水深 [m]，内部下限 0.01 防止退化
#[must_use]
pub fn solve_dispersion(omega: f64, depth: f64) -> DispersionSolution {
    let d = depth.max(0.01);
    let k0 = omega * omega / G;

    let mut k = k0;
    for _ in 0..MAX_ITERATIONS {
        let kd = k * d;
        let tanh_kd = kd.tanh();
        let f = omega * omega - G * k * tanh_kd;
        let df = -G * (tanh_kd + kd * (1.0 - tanh_kd * tanh_kd));

        let dk = -f / df;
        k += dk;

        if dk.abs() < TOLERANCE * k.abs().max(TOLERANCE) {
            return DispersionSolution { k, converged: true };
        }
    }

    // 未收敛，回退深水波数
    DispersionSolution {
        k: k0,
        converged: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_water_limit() {
        // 深水 (kd >> 1)：k → ω²/g
        let omega = 2.0 * std::f64::consts::PI / 6.0; // T = 6 s
        let sol = solve_dispersion(omega, 4000.0);
        assert!(sol.converged);
        assert!((sol.k - omega * omega / G).abs() / sol.k < 1e-6);
    }

    #[test]
    fn test_shallow_water_limit() {
        // 浅水 (kd << 1)：c = √(gd)，即 k ≈ ω/√(gd)
        let omega = 2.0 * std::f64::consts::PI / 60.0; // 长周期
        let depth = 2.0;
        let sol = solve_dispersion(omega, depth);
        assert!(sol.converged);

        let expected_k = omega / (G * depth).sqrt();
        assert!((sol.k - expected_k).abs() / expected_k < 0.01);
    }

    #[test]
    fn test_solution_satisfies_relation() {
        let omega = 2.0 * std::f64::consts::PI / 8.0;
        for &d in &[1.0, 5.0, 20.0, 100.0] {
            let sol = solve_dispersion(omega, d);
            assert!(sol.converged);
            let lhs = omega * omega;
            let rhs = G * sol.k * (sol.k * d).tanh();
            assert!((lhs - rhs).abs() / lhs < 1e-8, "d = {}", d);
        }
    }

    #[test]
    fn test_wavelength_shortens_in_shallow_water() {
        let omega = 2.0 * std::f64::consts::PI / 6.0;
        let deep = solve_dispersion(omega, 1000.0);
        let shallow = solve_dispersion(omega, 2.0);
        assert!(shallow.wavelength() < deep.wavelength());
    }
}
