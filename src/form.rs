use thiserror::Error;

use crate::recipe::BrewStep;

/// 문자열 입력을 숫자/스텝으로 바꿀 때의 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// 숫자로 해석할 수 없는 값
    #[error("not a number: {0}")]
    NotANumber(String),
    /// `M:SS ML` 형식이 아닌 스텝 입력
    #[error("step {step}: expected `M:SS ML`, got `{input}`")]
    MalformedStep { step: u32, input: String },
    /// 0..=max 범위의 정수가 아닌 투수
    #[error("expected a whole number from 0 to {max}, got `{input}`")]
    InvalidCount { input: String, max: u32 },
}

/// 한 레시피에서 입력받는 최대 투수.
pub const MAX_POUR_COUNT: u32 = 20;

/// 입력 칸 하나를 숫자로 바꾼다. 빈 칸은 `None`이다.
///
/// 문자열 그대로 계산에 넘기지 않도록 여기서 반드시 `f64`로 변환한다.
pub fn parse_field(s: &str) -> Result<Option<f64>, FormError> {
    let t = s.trim();
    if t.is_empty() {
        return Ok(None);
    }
    t.parse::<f64>()
        .map(Some)
        .map_err(|_| FormError::NotANumber(t.to_string()))
}

/// 투수 입력을 정수로 바꾼다. 빈 칸은 `None`이다.
///
/// `2.7`이나 범위를 넘는 값은 잘라내지 않고 거절한다.
pub fn parse_pour_count(s: &str) -> Result<Option<u32>, FormError> {
    let t = s.trim();
    if t.is_empty() {
        return Ok(None);
    }
    let invalid = || FormError::InvalidCount {
        input: t.to_string(),
        max: MAX_POUR_COUNT,
    };
    let n = t.parse::<u32>().map_err(|_| invalid())?;
    if n > MAX_POUR_COUNT {
        return Err(invalid());
    }
    Ok(Some(n))
}

/// `1:30 180`처럼 경과 시간과 누적 물량을 적은 한 줄을 스텝으로 바꾼다.
///
/// 초가 59를 넘는 등의 범위 검사는 레시피 생성 시에 한다.
pub fn parse_step_line(s: &str, step_number: u32) -> Result<BrewStep, FormError> {
    let malformed = || FormError::MalformedStep {
        step: step_number,
        input: s.trim().to_string(),
    };
    let mut parts = s.split_whitespace();
    let (time, water) = match (parts.next(), parts.next(), parts.next()) {
        (Some(t), Some(w), None) => (t, w),
        _ => return Err(malformed()),
    };
    let (minute, second) = time.split_once(':').ok_or_else(malformed)?;
    let minute = minute.parse::<u32>().map_err(|_| malformed())?;
    let second = second.parse::<u32>().map_err(|_| malformed())?;
    let water = water
        .trim_end_matches("ml")
        .parse::<f64>()
        .map_err(|_| malformed())?;
    Ok(BrewStep::new(step_number, minute, second, water))
}
