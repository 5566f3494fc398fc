use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 레시피 입력값이 불변 조건을 어길 때의 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecipeError {
    /// 투수 번호가 1부터 연속되지 않음
    #[error("step {expected} expected, found step {found}")]
    StepNumberGap { expected: u32, found: u32 },
    /// 초가 0..=59 범위를 벗어남
    #[error("step {step}: second {second} is outside 0..=59")]
    SecondOutOfRange { step: u32, second: u32 },
    /// 누적 물량이 음수이거나 유한하지 않음
    #[error("step {step}: cumulative water {value} must be a finite non-negative number")]
    InvalidCumulative { step: u32, value: f64 },
    /// 누적 물량이 이전 투보다 줄어듦
    #[error("step {step}: cumulative water decreased from {previous} to {value}")]
    DecreasingCumulative { step: u32, previous: f64, value: f64 },
    /// 원두량이 음수이거나 유한하지 않음
    #[error("bean amount {0} must be a finite non-negative number")]
    InvalidBean(f64),
    /// 얼음량이 음수이거나 유한하지 않음
    #[error("ice amount {0} must be a finite non-negative number")]
    InvalidIce(f64),
    /// 선언된 투수와 실제 스텝 수가 다름
    #[error("len_steps is {declared} but {actual} steps were given")]
    StepCountMismatch { declared: usize, actual: usize },
}

/// 추출 시작부터의 경과 시간.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElapsedTime {
    pub minute: u32,
    pub second: u32,
}

impl ElapsedTime {
    pub const fn new(minute: u32, second: u32) -> Self {
        Self { minute, second }
    }
}

/// 화면 표시용 `MM:SS` 형식(각 두 자리 0 채움).
impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minute, self.second)
    }
}

/// 한 번의 주수(注水).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrewStep {
    /// 1부터 시작하는 투수 번호
    pub step_number: u32,
    pub elapsed: ElapsedTime,
    /// 이 투까지의 누적 물량(ml). 투별 주수량은 저장하지 않고 항상 차분으로 구한다.
    pub cumulative_water_ml: f64,
}

impl BrewStep {
    pub fn new(step_number: u32, minute: u32, second: u32, cumulative_water_ml: f64) -> Self {
        Self {
            step_number,
            elapsed: ElapsedTime::new(minute, second),
            cumulative_water_ml,
        }
    }
}

/// 변환의 기준이 되는 원 레시피.
///
/// 생성 시 스텝 불변 조건을 검사한다. 총 물량은 마지막 스텝의 누적 물량에서 파생되므로
/// 따로 보관하지 않는다. 스텝이 하나도 없는 레시피도 허용하며, 이 경우 입력 검사 단계에서
/// 투수 누락으로 걸러진다.
#[derive(Debug, Clone, PartialEq)]
pub struct OriginRecipe {
    name: Option<String>,
    bean_g: f64,
    is_ice: bool,
    ice_g: f64,
    steps: Vec<BrewStep>,
    memo: Option<String>,
}

impl OriginRecipe {
    pub fn new(
        bean_g: f64,
        is_ice: bool,
        ice_g: f64,
        steps: Vec<BrewStep>,
    ) -> Result<Self, RecipeError> {
        if !bean_g.is_finite() || bean_g < 0.0 {
            return Err(RecipeError::InvalidBean(bean_g));
        }
        if !ice_g.is_finite() || ice_g < 0.0 {
            return Err(RecipeError::InvalidIce(ice_g));
        }
        check_steps(&steps)?;
        Ok(Self {
            name: None,
            bean_g,
            is_ice,
            ice_g,
            steps,
            memo: None,
        })
    }

    /// 얼음 없는 레시피를 만든다.
    pub fn hot(bean_g: f64, steps: Vec<BrewStep>) -> Result<Self, RecipeError> {
        Self::new(bean_g, false, 0.0, steps)
    }

    /// 아이스 모드 레시피를 만든다.
    pub fn iced(bean_g: f64, ice_g: f64, steps: Vec<BrewStep>) -> Result<Self, RecipeError> {
        Self::new(bean_g, true, ice_g, steps)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        let memo = memo.into();
        self.memo = if memo.trim().is_empty() { None } else { Some(memo) };
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
    }

    pub fn bean_g(&self) -> f64 {
        self.bean_g
    }

    pub fn is_ice(&self) -> bool {
        self.is_ice
    }

    /// 입력된 얼음량. 아이스 모드가 아니어도 값은 보존된다.
    pub fn ice_g(&self) -> f64 {
        self.ice_g
    }

    /// 비율 계산에 들어가는 얼음량. 아이스 모드가 아니면 0.
    pub fn effective_ice_g(&self) -> f64 {
        if self.is_ice {
            self.ice_g
        } else {
            0.0
        }
    }

    pub fn steps(&self) -> &[BrewStep] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// 마지막 스텝의 누적 물량. 얼음은 포함하지 않는다.
    pub fn total_water_ml(&self) -> f64 {
        self.steps
            .last()
            .map(|s| s.cumulative_water_ml)
            .unwrap_or(0.0)
    }

    /// 총 추출량 = 총 물량 + (아이스 모드일 때) 얼음량
    pub fn total_output(&self) -> f64 {
        self.total_water_ml() + self.effective_ice_g()
    }
}

fn check_steps(steps: &[BrewStep]) -> Result<(), RecipeError> {
    let mut previous = 0.0_f64;
    for (idx, step) in steps.iter().enumerate() {
        let expected = idx as u32 + 1;
        if step.step_number != expected {
            return Err(RecipeError::StepNumberGap {
                expected,
                found: step.step_number,
            });
        }
        if step.elapsed.second > 59 {
            return Err(RecipeError::SecondOutOfRange {
                step: step.step_number,
                second: step.elapsed.second,
            });
        }
        let value = step.cumulative_water_ml;
        if !value.is_finite() || value < 0.0 {
            return Err(RecipeError::InvalidCumulative {
                step: step.step_number,
                value,
            });
        }
        if value < previous {
            return Err(RecipeError::DecreasingCumulative {
                step: step.step_number,
                previous,
                value,
            });
        }
        previous = value;
    }
    Ok(())
}

/// 변환 목표.
///
/// 배율(`magnification`)이 입력되어 있으면 그것이 우선한다. 그렇지 않으면 원두량/물량/비율 중
/// 두 값으로 목표를 지정한다.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConversionRequest {
    pub magnification: Option<f64>,
    pub bean_g: Option<f64>,
    pub water_ml: Option<f64>,
    pub ratio: Option<f64>,
}

impl ConversionRequest {
    pub fn by_magnification(magnification: f64) -> Self {
        Self {
            magnification: Some(magnification),
            ..Self::default()
        }
    }

    pub fn by_target(bean_g: f64, water_ml: f64) -> Self {
        Self {
            bean_g: Some(bean_g),
            water_ml: Some(water_ml),
            ..Self::default()
        }
    }
}

/// 변환 결과의 한 행.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScaledStep {
    pub step_number: u32,
    pub elapsed: ElapsedTime,
    /// 이 투의 주수량(ml, 절사)
    pub step_pour_ml: i64,
    /// 누적 물량(ml, 절사)
    pub cumulative_water_ml: i64,
    /// 총 물량 대비 누적 비율(%, 절사). 표시를 요청한 경우에만 채워진다.
    pub percent_of_total: Option<i64>,
}

/// 스텝 표와 변환 후 원두/물/얼음 양.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledRecipe {
    pub steps: Vec<ScaledStep>,
    /// 소수 첫째 자리까지 절사
    pub scaled_bean_g: f64,
    /// 소수 첫째 자리까지 절사
    pub scaled_water_ml: f64,
    /// 아이스 모드일 때만 존재(정수 절사)
    pub scaled_ice_g: Option<f64>,
}

impl ScaledRecipe {
    /// 변환 후 총 추출량(물 + 얼음).
    pub fn total_output(&self) -> f64 {
        self.scaled_water_ml + self.scaled_ice_g.unwrap_or(0.0)
    }

    pub fn final_cumulative_ml(&self) -> i64 {
        self.steps.last().map(|s| s.cumulative_water_ml).unwrap_or(0)
    }
}
