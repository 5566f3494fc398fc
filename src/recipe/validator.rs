//! 변환 전 입력 누락 검사.

use std::fmt;

use crate::quantity::is_present;

/// 검사 대상 네 항목. 순서는 메시지에 나열되는 순서와 같다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    /// 투수
    PourTimes,
    /// 원 레시피의 총 물량(마지막 투의 누적 물량)
    OriginRecipeTotal,
    /// 목표 원두량
    OriginBean,
    /// 목표 총 물량
    OriginWaterTarget,
}

impl MissingField {
    pub const ALL: [MissingField; 4] = [
        MissingField::PourTimes,
        MissingField::OriginRecipeTotal,
        MissingField::OriginBean,
        MissingField::OriginWaterTarget,
    ];

    /// 번역 키. 라벨 문자열 자체는 표시 계층이 정한다.
    pub fn i18n_key(&self) -> &'static str {
        use crate::i18n::keys;
        match self {
            MissingField::PourTimes => keys::MISSING_POUR_TIMES,
            MissingField::OriginRecipeTotal => keys::MISSING_ORIGIN_RECIPE_TOTAL,
            MissingField::OriginBean => keys::MISSING_ORIGIN_BEAN,
            MissingField::OriginWaterTarget => keys::MISSING_ORIGIN_WATER_TARGET,
        }
    }

    /// 로그 등에 쓰는 기본 라벨.
    pub fn label(&self) -> &'static str {
        match self {
            MissingField::PourTimes => "pour times",
            MissingField::OriginRecipeTotal => "origin recipe total",
            MissingField::OriginBean => "bean amount",
            MissingField::OriginWaterTarget => "water target",
        }
    }
}

/// 누락된 항목 목록(하나 이상).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields {
    fields: Vec<MissingField>,
}

impl MissingFields {
    pub fn fields(&self) -> &[MissingField] {
        &self.fields
    }

    pub fn contains(&self, field: MissingField) -> bool {
        self.fields.contains(&field)
    }

    /// 항목별 사유 문자열.
    pub fn reasons<F, S>(&self, label: F) -> Vec<String>
    where
        F: Fn(MissingField) -> S,
        S: AsRef<str>,
    {
        self.fields
            .iter()
            .map(|f| label(*f).as_ref().to_string())
            .collect()
    }

    /// 머리글 한 줄과 항목별 글머리표 한 줄씩으로 이루어진 메시지를 만든다.
    pub fn message_with<F, S>(&self, header: &str, label: F) -> String
    where
        F: Fn(MissingField) -> S,
        S: AsRef<str>,
    {
        let mut message = format!("{header}\n");
        for reason in self.reasons(label) {
            message.push_str(&format!("･{reason}\n"));
        }
        message
    }
}

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.fields.iter().map(|m| m.label()).collect();
        write!(f, "missing input: {}", labels.join(", "))
    }
}

impl std::error::Error for MissingFields {}

/// 입력 검사 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Ok,
    MissingFields(MissingFields),
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, ValidationResult::Ok)
    }

    pub fn into_result(self) -> Result<(), MissingFields> {
        match self {
            ValidationResult::Ok => Ok(()),
            ValidationResult::MissingFields(m) => Err(m),
        }
    }
}

/// 네 입력값이 모두 채워져 있는지 검사한다.
///
/// 0은 누락으로 본다(기존 폼 동작과 동일). 누락된 항목은 하나도 빠짐없이 모두 보고한다.
pub fn validate(
    step_count: usize,
    origin_total_water_ml: Option<f64>,
    target_bean_g: Option<f64>,
    target_water_ml: Option<f64>,
) -> ValidationResult {
    let checks = [
        step_count > 0,
        is_present(origin_total_water_ml),
        is_present(target_bean_g),
        is_present(target_water_ml),
    ];
    let fields: Vec<MissingField> = MissingField::ALL
        .iter()
        .zip(checks)
        .filter(|(_, ok)| !ok)
        .map(|(field, _)| *field)
        .collect();

    if fields.is_empty() {
        ValidationResult::Ok
    } else {
        ValidationResult::MissingFields(MissingFields { fields })
    }
}
