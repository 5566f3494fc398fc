//! 입력 보완 → 검사 → 배율 결정 → 스텝 변환으로 이어지는 전체 변환 흐름.

use thiserror::Error;
use tracing::{debug, warn};

use crate::quantity::{present, trunc1, BrewParameter};
use crate::recipe::completer::{complete, ratio_of, CompletionError};
use crate::recipe::model::{ConversionRequest, OriginRecipe, ScaledRecipe};
use crate::recipe::scale_factor::{resolve_scale_factor, DivisionByZero, ScaleFactor};
use crate::recipe::scaler::scale_steps;
use crate::recipe::validator::{validate, MissingFields};

/// 변환 중 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// 필수 입력 누락
    #[error(transparent)]
    MissingFields(#[from] MissingFields),
    /// 0으로 나누는 입력
    #[error(transparent)]
    DivisionByZero(#[from] DivisionByZero),
}

/// 변환 결과. 원 레시피의 이름과 메모를 그대로 가져간다.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedRecipe {
    pub name: Option<String>,
    pub memo: Option<String>,
    pub scale: ScaleFactor,
    pub recipe: ScaledRecipe,
}

impl ConvertedRecipe {
    pub fn is_ice(&self) -> bool {
        self.recipe.scaled_ice_g.is_some()
    }
}

impl ConversionRequest {
    /// 목표 원두량 또는 물량이 비어 있고 비율이 있으면 보완한 요청을 돌려준다.
    ///
    /// 배율이 지정되어 있거나 보완할 수 없으면 그대로 돌려준다.
    pub fn completed(self) -> Self {
        if present(self.magnification).is_some() {
            return self;
        }
        match complete(self.bean_g, self.water_ml, self.ratio) {
            Ok(c) => match c.parameter {
                BrewParameter::Bean => Self {
                    bean_g: Some(c.value),
                    ..self
                },
                BrewParameter::Water => Self {
                    water_ml: Some(c.value),
                    ..self
                },
                BrewParameter::Ratio => Self {
                    ratio: Some(c.value),
                    ..self
                },
            },
            Err(_) => self,
        }
    }

    /// 목표 비율이 비어 있으면 원 레시피의 비율로 채운다.
    ///
    /// 대화형 입력과 명령행 변환이 같은 기본값을 쓰도록 변환 직전에 적용한다.
    pub fn or_origin_ratio(self, origin: &OriginRecipe) -> Self {
        if present(self.ratio).is_some() {
            return self;
        }
        Self {
            ratio: origin_ratio(origin),
            ..self
        }
    }
}

/// 원 레시피를 목표에 맞게 변환한다.
///
/// 검사에 실패하면 어떤 부분 결과도 만들지 않는다.
pub fn convert(
    origin: &OriginRecipe,
    request: &ConversionRequest,
    show_percentage: bool,
) -> Result<ConvertedRecipe, ConversionError> {
    let request = request.completed();

    let (target_bean, target_water) = match present(request.magnification) {
        Some(m) => (
            Some(origin.bean_g() * m),
            Some(origin.total_water_ml() * m),
        ),
        None => (request.bean_g, request.water_ml),
    };

    if let Err(missing) = validate(
        origin.step_count(),
        Some(origin.total_water_ml()),
        target_bean,
        target_water,
    )
    .into_result()
    {
        warn!(%missing, "conversion rejected");
        return Err(missing.into());
    }

    let scale = resolve_scale_factor(&request, origin)?;
    let mut recipe = scale_steps(origin, scale.factor, show_percentage)?;
    if let Some(bean) = target_bean {
        recipe.scaled_bean_g = trunc1(bean);
    }
    debug!(
        factor = scale.factor,
        steps = recipe.steps.len(),
        "recipe converted"
    );

    Ok(ConvertedRecipe {
        name: origin.name().map(str::to_string),
        memo: origin.memo().map(str::to_string),
        scale,
        recipe,
    })
}

/// 원 레시피의 비율. 아이스 모드에서는 얼음을 포함한 총 추출량으로 계산한다.
pub fn origin_ratio(origin: &OriginRecipe) -> Option<f64> {
    ratio_of(origin.bean_g(), origin.total_output())
}

/// 목표 입력 폼의 세 칸.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TargetForm {
    pub bean_g: Option<f64>,
    pub water_ml: Option<f64>,
    pub ratio: Option<f64>,
}

/// 한 칸만 비어 있으면 나머지 두 칸으로 채운다.
///
/// 세 칸이 모두 차 있거나 두 칸 이상 비어 있으면 폼을 바꾸지 않는다.
pub fn fill_target_form(form: TargetForm) -> TargetForm {
    match complete(form.bean_g, form.water_ml, form.ratio) {
        Ok(c) => match c.parameter {
            BrewParameter::Bean => TargetForm {
                bean_g: Some(c.value),
                ..form
            },
            BrewParameter::Water => TargetForm {
                water_ml: Some(c.value),
                ..form
            },
            BrewParameter::Ratio => TargetForm {
                ratio: Some(c.value),
                ..form
            },
        },
        Err(CompletionError::OverSupplied) | Err(CompletionError::MissingParameters { .. }) => {
            form
        }
    }
}
