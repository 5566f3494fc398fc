/// 추출 비율 계산에 참여하는 세 가지 값의 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrewParameter {
    /// 원두량(g)
    Bean,
    /// 총 물량(ml). 아이스 모드에서는 얼음량을 포함한 총 추출량일 수 있다.
    Water,
    /// 물/원두 비율
    Ratio,
}

impl BrewParameter {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrewParameter::Bean => "bean_g",
            BrewParameter::Water => "water_ml",
            BrewParameter::Ratio => "ratio",
        }
    }
}

/// 값이 "입력됨"으로 취급되는지 판정한다.
///
/// 0과 NaN은 비어 있는 것과 동일하게 본다. 기존 입력 폼의 판정 방식을 그대로 따르며,
/// 0g/0ml를 정상 값으로 인정하지 않는다.
pub fn is_present(value: Option<f64>) -> bool {
    matches!(value, Some(v) if v != 0.0 && !v.is_nan())
}

/// `is_present`를 통과한 값만 돌려준다.
pub fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

/// 저장된 `f64` 값의 정확한 십진 전개를 소수 첫째 자리로 반올림한다.
///
/// `value * 10.0`을 먼저 구하면 그 곱셈에서 한 번 더 반올림되어 `16.15`(실제로는
/// `16.149999…`)가 `16.2`가 된다. 그래서 십진 포맷으로 자리를 자르고, 정확히 한가운데인
/// 값(`x.25`, `x.75`처럼 이진으로 정확히 표현되는 경우)만 0에서 멀어지는 방향으로 올린다.
pub fn round1(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && (quarters % 2.0).abs() == 1.0 {
        return (value * 10.0).round() / 10.0;
    }
    format!("{value:.1}").parse().unwrap_or(value)
}

/// 소수점 첫째 자리 아래를 버린다.
pub fn trunc1(value: f64) -> f64 {
    (value * 10.0).trunc() / 10.0
}
