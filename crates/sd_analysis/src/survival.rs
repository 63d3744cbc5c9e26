// crates/sd_analysis/src/survival.rs

//! 生存评估
//!
//! 分段因子模型：`p = clamp(0, 1, baseRate·tempFactor·timeFactor
//! + pfdBonus + clothingBonus)`。各因子为经验阶梯表，输入为
//! 遇险者档案、水温与落水时长。

use serde::{Deserialize, Serialize};

/// 着装类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Clothing {
    /// 无衣物
    None,
    /// 轻薄
    Light,
    /// 普通
    Normal,
    /// 厚重
    Heavy,
    /// 湿式潜水服
    Wetsuit,
    /// 干式潜水服
    Drysuit,
}

impl Clothing {
    /// 着装修正
    #[must_use]
    pub const fn bonus(&self) -> f64 {
        match self {
            Self::None => -0.1,
            Self::Light => 0.0,
            Self::Normal => 0.05,
            Self::Heavy => 0.10,
            Self::Wetsuit => 0.20,
            Self::Drysuit => 0.30,
        }
    }
}

/// 遇险者档案
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VictimProfile {
    /// 年龄，缺省按 40 岁处理
    pub age: Option<u32>,
    /// 性别（仅记录，不参与计算）
    pub gender: Option<String>,
    /// 是否穿救生衣
    pub has_pfd: bool,
    /// 着装，未知不加成
    pub clothing: Option<Clothing>,
}

/// 搜救紧迫度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// 危急
    Critical,
    /// 紧急
    Urgent,
    /// 高
    High,
    /// 中等
    Moderate,
}

/// 低温症阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HypothermiaStage {
    /// 冷休克（入水 3 分钟内）
    ColdShock,
    /// 游泳失能
    SwimFailure,
    /// 轻度低温症
    MildHypothermia,
    /// 重度低温症
    SevereHypothermia,
}

/// 生存评估结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurvivalAssessment {
    /// 生存概率 [0, 1]
    pub probability: f64,
    /// 估计剩余时间 [小时]
    pub time_remaining_hours: f64,
    /// 紧迫度
    pub urgency: Urgency,
    /// 低温症阶段
    pub hypothermia_stage: HypothermiaStage,
}

/// 生存估计器
#[derive(Debug, Clone, Copy, Default)]
pub struct SurvivalEstimator;

impl SurvivalEstimator {
    /// 计算生存评估
    ///
    /// # 参数
    /// - `water_temp_f`: 水温 [°F]
    /// - `elapsed_hours`: 落水时长 [小时]
    #[must_use]
    pub fn estimate(
        &self,
        profile: &VictimProfile,
        water_temp_f: f64,
        elapsed_hours: f64,
    ) -> SurvivalAssessment {
        let base = base_rate(profile.age.unwrap_or(40));
        let temp = temp_factor(water_temp_f);
        let time = time_factor(elapsed_hours);
        let pfd_bonus = if profile.has_pfd { 0.2 } else { 0.0 };
        let clothing_bonus = profile.clothing.map_or(0.0, |c| c.bonus());

        let probability = (base * temp * time + pfd_bonus + clothing_bonus).clamp(0.0, 1.0);
        let time_remaining_hours = base_time_hours(water_temp_f) * probability;

        SurvivalAssessment {
            probability,
            time_remaining_hours,
            urgency: urgency_of(probability),
            hypothermia_stage: hypothermia_stage(water_temp_f, elapsed_hours),
        }
    }
}

/// 年龄基础生存率
fn base_rate(age: u32) -> f64 {
    match age {
        a if a < 18 => 0.85,
        a if a < 30 => 0.90,
        a if a < 50 => 0.88,
        a if a < 65 => 0.80,
        _ => 0.70,
    }
}

/// 水温因子
fn temp_factor(water_temp_f: f64) -> f64 {
    match water_temp_f {
        t if t > 80.0 => 1.0,
        t if t > 70.0 => 0.95,
        t if t > 60.0 => 0.85,
        t if t > 50.0 => 0.65,
        t if t > 40.0 => 0.40,
        _ => 0.20,
    }
}

/// 时长因子
fn time_factor(hours: f64) -> f64 {
    match hours {
        h if h < 1.0 => 1.0,
        h if h < 3.0 => 0.95,
        h if h < 6.0 => 0.85,
        h if h < 12.0 => 0.70,
        h if h < 24.0 => 0.50,
        _ => 0.30,
    }
}

/// 水温对应的基准生存时间 [小时]
fn base_time_hours(water_temp_f: f64) -> f64 {
    match water_temp_f {
        t if t > 80.0 => 48.0,
        t if t > 70.0 => 24.0,
        t if t > 60.0 => 12.0,
        t if t > 50.0 => 6.0,
        t if t > 40.0 => 3.0,
        _ => 1.5,
    }
}

/// 生存概率到紧迫度的单调阶梯映射
fn urgency_of(probability: f64) -> Urgency {
    if probability < 0.3 {
        Urgency::Critical
    } else if probability < 0.5 {
        Urgency::Urgent
    } else if probability < 0.75 {
        Urgency::High
    } else {
        Urgency::Moderate
    }
}

/// 低温症阶段判定
///
/// 冷水（< 50 °F）中游泳失能窗口缩短到 30 分钟。
fn hypothermia_stage(water_temp_f: f64, elapsed_hours: f64) -> HypothermiaStage {
    if elapsed_hours < 0.05 {
        return HypothermiaStage::ColdShock;
    }

    let swim_failure_window = if water_temp_f < 50.0 { 0.5 } else { 1.0 };
    if elapsed_hours < swim_failure_window {
        return HypothermiaStage::SwimFailure;
    }

    // 轻度窗口取基准生存时间的一半
    if elapsed_hours < base_time_hours(water_temp_f) * 0.5 {
        HypothermiaStage::MildHypothermia
    } else {
        HypothermiaStage::SevereHypothermia
    }
}
