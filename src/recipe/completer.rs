//! 원두량·물량·비율 중 두 값으로 나머지 하나를 구한다.

use thiserror::Error;
use tracing::debug;

use crate::quantity::{present, round1, BrewParameter};

/// 보완 계산을 할 수 없는 입력.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// 유효한 값이 두 개 미만. 호출 측은 대상 칸을 비워 둔다.
    #[error("two of bean, water and ratio are required ({present} given)")]
    MissingParameters { present: usize },
    /// 세 값이 모두 입력됨. 어느 값을 다시 계산할지 정할 수 없으므로 아무것도 하지 않는다.
    #[error("bean, water and ratio are all given; nothing to complete")]
    OverSupplied,
}

/// 보완된 값과 그 종류.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Completion {
    pub parameter: BrewParameter,
    pub value: f64,
}

/// 두 값이 주어지면 나머지 하나를 소수 첫째 자리로 반올림해 반환한다.
///
/// 0과 NaN은 비어 있는 값으로 취급한다. 예를 들어 `complete(Some(0.0), Some(100.0), Some(15.0))`는
/// 원두량을 빈 칸으로 보고 물량/비율로 원두량을 구한다.
pub fn complete(
    bean_g: Option<f64>,
    water_ml: Option<f64>,
    ratio: Option<f64>,
) -> Result<Completion, CompletionError> {
    let (bean, water, ratio) = (present(bean_g), present(water_ml), present(ratio));
    let given = [bean, water, ratio].iter().filter(|v| v.is_some()).count();
    if given == 3 {
        debug!("all three brew parameters given; completion skipped");
        return Err(CompletionError::OverSupplied);
    }

    let completion = match (bean, water, ratio) {
        (Some(b), Some(w), _) => Completion {
            parameter: BrewParameter::Ratio,
            value: round1(w / b),
        },
        (Some(b), _, Some(r)) => Completion {
            parameter: BrewParameter::Water,
            value: round1(b * r),
        },
        (_, Some(w), Some(r)) => Completion {
            parameter: BrewParameter::Bean,
            value: round1(w / r),
        },
        _ => return Err(CompletionError::MissingParameters { present: given }),
    };
    debug!(
        parameter = completion.parameter.as_str(),
        value = completion.value,
        "brew parameter completed"
    );
    Ok(completion)
}

/// 원두량과 물량으로 비율을 구한다.
pub fn ratio_of(bean_g: f64, water_ml: f64) -> Option<f64> {
    complete(Some(bean_g), Some(water_ml), None)
        .ok()
        .map(|c| c.value)
}
