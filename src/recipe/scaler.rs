//! 스텝 표 배율 변환.

use crate::quantity::trunc1;
use crate::recipe::model::{OriginRecipe, ScaledRecipe, ScaledStep};
use crate::recipe::scale_factor::DivisionByZero;

/// 원 레시피의 누적 물량에 배율을 곱해 스텝 표를 다시 만든다.
///
/// - 누적 물량은 배율을 곱한 뒤 0 방향으로 절사한다.
/// - 투별 주수량은 절사된 누적 물량끼리의 차이다(정확한 차이를 절사한 값이 아님).
///   그래서 주수량의 합은 항상 마지막 누적 물량과 같다.
/// - 비율(%)은 `누적 / 마지막 누적 * 100`을 절사한다.
///
/// 원두/물/얼음 총량은 배율로부터 채운다. 목표 원두량을 따로 지정한 경우에는
/// 변환 파이프라인이 원두량을 덮어쓴다.
pub fn scale_steps(
    origin: &OriginRecipe,
    factor: f64,
    show_percentage: bool,
) -> Result<ScaledRecipe, DivisionByZero> {
    let cumulative = origin
        .steps()
        .iter()
        .map(|s| to_ml(s.cumulative_water_ml * factor))
        .collect::<Result<Vec<i64>, _>>()?;

    let final_cumulative = cumulative.last().copied().unwrap_or(0);
    if show_percentage && !cumulative.is_empty() && final_cumulative == 0 {
        return Err(DivisionByZero::ScaledFinalCumulative);
    }

    let mut previous = 0_i64;
    let steps = origin
        .steps()
        .iter()
        .zip(&cumulative)
        .map(|(step, &cum)| {
            let pour = cum - previous;
            previous = cum;
            let percent_of_total = show_percentage
                .then(|| ((cum as f64 / final_cumulative as f64) * 100.0).trunc() as i64);
            ScaledStep {
                step_number: step.step_number,
                elapsed: step.elapsed,
                step_pour_ml: pour,
                cumulative_water_ml: cum,
                percent_of_total,
            }
        })
        .collect();

    let scaled_bean_g = finite(trunc1(origin.bean_g() * factor))?;
    let scaled_water_ml = finite(trunc1(origin.total_water_ml() * factor))?;
    let scaled_ice_g = if origin.is_ice() {
        Some(finite((origin.ice_g() * factor).trunc())?)
    } else {
        None
    };

    Ok(ScaledRecipe {
        steps,
        scaled_bean_g,
        scaled_water_ml,
        scaled_ice_g,
    })
}

/// 절사한 ml 값. `i64`로 표현되지 않는 값은 포화시키지 않고 거절한다.
fn to_ml(scaled: f64) -> Result<i64, DivisionByZero> {
    let truncated = scaled.trunc();
    if !truncated.is_finite() || truncated.abs() >= i64::MAX as f64 {
        return Err(DivisionByZero::Overflow);
    }
    Ok(truncated as i64)
}

fn finite(value: f64) -> Result<f64, DivisionByZero> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DivisionByZero::Overflow)
    }
}
