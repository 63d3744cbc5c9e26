// crates/sd_environment/src/synthetic.rs

//! 合成环境提供者
//!
//! 空间均匀、时间上随机游走演化的环境场，用于测试、演示和
//! 外部数据不可用时的降级运行。
//!
//! # 演化规则
//!
//! 每次 `advance`：
//! - 风向漂移 ±5°
//! - 风速漂移 ±1 kn，截断到 [0, 40]
//! - 流向漂移 ±2.5°
//! - 潮汐相位按 M2 分潮周期推进

use crate::provider::EnvironmentalProvider;
use crate::snapshot::{
    BathymetryGradient, CurrentConditions, EnvSnapshot, RipCurrentInfo, SeaState, TidalInfo,
    WaveConditions, WindConditions,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// M2 主太阴半日分潮周期 [小时]
const M2_PERIOD_HOURS: f64 = 12.4206012;

/// 合成环境提供者
#[derive(Debug, Clone)]
pub struct SyntheticEnvironment {
    /// 当前状态
    state: EnvSnapshot,
    /// 随机数发生器（按模拟种子初始化，保证可复现）
    rng: ChaCha8Rng,
    /// 是否随时间演化
    evolve: bool,
    /// 潮汐周期 [s]
    tidal_period_s: f64,
}

impl SyntheticEnvironment {
    /// 创建带种子的合成环境，初始为温和海况
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let state = EnvSnapshot {
            wind: WindConditions::new(10.0, 225.0),
            current: CurrentConditions::new(0.8, 180.0),
            waves: WaveConditions::new(1.0, 8.0, 200.0),
            water_temp_f: 68.0,
            air_temp_f: 72.0,
            visibility_nm: 10.0,
            sea_state: SeaState::from_wave_height(1.0),
            tide: None,
            bathymetry_gradient: None,
            rip_current: None,
        };
        Self {
            state,
            rng: ChaCha8Rng::seed_from_u64(seed),
            evolve: true,
            tidal_period_s: M2_PERIOD_HOURS * 3600.0,
        }
    }

    /// 创建固定不演化的环境
    #[must_use]
    pub fn constant(state: EnvSnapshot) -> Self {
        Self {
            state,
            rng: ChaCha8Rng::seed_from_u64(0),
            evolve: false,
            tidal_period_s: M2_PERIOD_HOURS * 3600.0,
        }
    }

    /// 全静环境（零强迫，用于无漂移基准测试）
    #[must_use]
    pub fn calm() -> Self {
        Self::constant(EnvSnapshot::calm())
    }

    /// 设置风况
    #[must_use]
    pub fn with_wind(mut self, speed_kn: f64, direction_deg: f64) -> Self {
        self.state.wind = WindConditions::new(speed_kn, direction_deg);
        self
    }

    /// 设置流况
    #[must_use]
    pub fn with_current(mut self, speed_kn: f64, direction_deg: f64) -> Self {
        self.state.current = CurrentConditions::new(speed_kn, direction_deg);
        self
    }

    /// 设置波况，同时更新海况等级
    #[must_use]
    pub fn with_waves(mut self, height_m: f64, period_s: f64, direction_deg: f64) -> Self {
        self.state.waves = WaveConditions::new(height_m, period_s, direction_deg);
        self.state.sea_state = SeaState::from_wave_height(height_m);
        self
    }

    /// 设置水温 [°F]
    #[must_use]
    pub fn with_water_temp(mut self, temp_f: f64) -> Self {
        self.state.water_temp_f = temp_f;
        self
    }

    /// 启用潮汐，相位从低潮起算
    #[must_use]
    pub fn with_tide(mut self, shore_direction_deg: f64, shore_normal_deg: f64) -> Self {
        self.state.tide = Some(TidalInfo {
            phase: 0.0,
            shore_direction_deg,
            shore_normal_deg,
        });
        self
    }

    /// 设置水深梯度
    #[must_use]
    pub fn with_gradient(mut self, gradient: BathymetryGradient) -> Self {
        self.state.bathymetry_gradient = Some(gradient);
        self
    }

    /// 设置离岸流
    #[must_use]
    pub fn with_rip(mut self, risk: f64, strength: f64, direction_deg: f64) -> Self {
        self.state.rip_current = Some(RipCurrentInfo {
            risk,
            strength,
            direction_deg,
        });
        self
    }

    /// 当前内部状态
    #[must_use]
    pub fn state(&self) -> &EnvSnapshot {
        &self.state
    }
}

impl EnvironmentalProvider for SyntheticEnvironment {
    fn conditions_at(&self, _lat: f64, _lng: f64, time_s: f64) -> EnvSnapshot {
        let mut snap = self.state;
        // 潮汐相位由模拟时刻直接确定，与随机游走无关
        if let Some(tide) = &mut snap.tide {
            tide.phase = (time_s / self.tidal_period_s).rem_euclid(1.0);
        }
        snap
    }

    fn advance(&mut self, time_s: f64) {
        if !self.evolve {
            return;
        }

        let wind = &mut self.state.wind;
        wind.direction_deg =
            (wind.direction_deg + self.rng.gen_range(-5.0..=5.0)).rem_euclid(360.0);
        wind.speed_kn = (wind.speed_kn + self.rng.gen_range(-1.0..=1.0)).clamp(0.0, 40.0);

        let current = &mut self.state.current;
        current.direction_deg =
            (current.direction_deg + self.rng.gen_range(-2.5..=2.5)).rem_euclid(360.0);

        if let Some(tide) = &mut self.state.tide {
            tide.phase = (time_s / self.tidal_period_s).rem_euclid(1.0);
        }
    }
}
