//! 변환 배율 결정.

use thiserror::Error;
use tracing::debug;

use crate::quantity::present;
use crate::recipe::model::{ConversionRequest, OriginRecipe};

/// 0으로 나누게 되는 입력. NaN/Infinity를 결과로 내보내지 않기 위해 쓰인다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DivisionByZero {
    /// 목표 물량이 비어 있음
    #[error("target water is missing; the scale factor is undefined")]
    MissingTargetWater,
    /// 원 레시피의 총 물량(+얼음)이 0
    #[error("origin total water (plus ice) is zero")]
    OriginTotalOutput,
    /// 변환 후 마지막 누적 물량이 0이라 비율(%)을 낼 수 없음
    #[error("scaled final cumulative water is zero; percentages are undefined")]
    ScaledFinalCumulative,
    /// 배율이나 배율을 곱한 양이 유한한 값으로 표현되지 않음
    #[error("scale factor or scaled amount is not a finite number")]
    Overflow,
}

/// 배율을 어디서 얻었는지.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorSource {
    Magnification,
    TargetWater,
}

/// 결정된 배율과 그에 따른 목표 원두량/물량.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactor {
    pub factor: f64,
    pub source: FactorSource,
    pub target_bean_g: Option<f64>,
    pub target_water_ml: Option<f64>,
}

/// 배율을 결정한다.
///
/// 배율이 입력되어 있으면 그대로 쓰고 목표 원두량/물량은 원 레시피에 배율을 곱해 구한다.
/// 그렇지 않으면 `목표 물량 / (원 총 물량 + 얼음량)`이다. 얼음량은 아이스 모드에서만 더한다.
/// 배율이나 목표량이 무한대가 되는 입력은 `Overflow`로 거절한다.
pub fn resolve_scale_factor(
    request: &ConversionRequest,
    origin: &OriginRecipe,
) -> Result<ScaleFactor, DivisionByZero> {
    if let Some(m) = present(request.magnification) {
        let target_bean = origin.bean_g() * m;
        let target_water = origin.total_water_ml() * m;
        if !m.is_finite() || !target_bean.is_finite() || !target_water.is_finite() {
            return Err(DivisionByZero::Overflow);
        }
        debug!(factor = m, "scale factor taken from magnification");
        return Ok(ScaleFactor {
            factor: m,
            source: FactorSource::Magnification,
            target_bean_g: Some(target_bean),
            target_water_ml: Some(target_water),
        });
    }

    let target_water = present(request.water_ml).ok_or(DivisionByZero::MissingTargetWater)?;
    let denominator = origin.total_water_ml() + origin.effective_ice_g();
    if denominator == 0.0 {
        return Err(DivisionByZero::OriginTotalOutput);
    }
    let target_bean = present(request.bean_g);
    let factor = target_water / denominator;
    if !factor.is_finite() || target_bean.is_some_and(|b| !b.is_finite()) {
        return Err(DivisionByZero::Overflow);
    }
    debug!(
        factor,
        target_water, denominator, "scale factor derived from target water"
    );
    Ok(ScaleFactor {
        factor,
        source: FactorSource::TargetWater,
        target_bean_g: target_bean,
        target_water_ml: Some(target_water),
    })
}
