//! 프리셋/공유 레시피 레코드와 파일 입출력.
//!
//! 레코드 필드 이름은 레시피 서버가 주고받는 JSON과 같다. 그래서 `seconds`,
//! `total_water_ml_this_step`처럼 엔진 타입과 이름이 다른 필드가 있다.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::recipe::converter::ConvertedRecipe;
use crate::recipe::model::{BrewStep, OriginRecipe, RecipeError};

/// 레코드 로드/변환 오류.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to read recipe file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse recipe TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to process recipe JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported recipe file extension: {0}")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Recipe(#[from] RecipeError),
}

/// 레코드의 스텝 한 줄.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step_number: u32,
    pub minute: u32,
    pub seconds: u32,
    /// 누적 물량(ml)
    pub total_water_ml_this_step: f64,
}

impl From<&BrewStep> for StepRecord {
    fn from(step: &BrewStep) -> Self {
        Self {
            step_number: step.step_number,
            minute: step.elapsed.minute,
            seconds: step.elapsed.second,
            total_water_ml_this_step: step.cumulative_water_ml,
        }
    }
}

impl From<&StepRecord> for BrewStep {
    fn from(rec: &StepRecord) -> Self {
        BrewStep::new(
            rec.step_number,
            rec.minute,
            rec.seconds,
            rec.total_water_ml_this_step,
        )
    }
}

/// 프리셋 레시피 레코드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_ice: bool,
    #[serde(default)]
    pub ice_g: Option<f64>,
    pub len_steps: usize,
    pub bean_g: f64,
    /// 저장된 총 물량. 로드 시에는 마지막 스텝의 누적 물량을 우선한다.
    #[serde(default)]
    pub water_ml: f64,
    #[serde(default)]
    pub memo: Option<String>,
    pub steps: Vec<StepRecord>,
}

impl RecipeRecord {
    /// 검증을 거쳐 원 레시피로 변환한다.
    pub fn into_origin(self) -> Result<OriginRecipe, RecordError> {
        if self.len_steps != self.steps.len() {
            return Err(RecipeError::StepCountMismatch {
                declared: self.len_steps,
                actual: self.steps.len(),
            }
            .into());
        }
        let mut steps: Vec<BrewStep> = self.steps.iter().map(BrewStep::from).collect();
        steps.sort_by_key(|s| s.step_number);
        // 아이스 모드가 아닌 레코드의 얼음량은 무시한다.
        let ice_g = if self.is_ice {
            self.ice_g.unwrap_or(0.0)
        } else {
            0.0
        };
        let mut origin = OriginRecipe::new(self.bean_g, self.is_ice, ice_g, steps)?;
        if !self.name.trim().is_empty() {
            origin = origin.with_name(self.name);
        }
        if let Some(memo) = self.memo {
            origin = origin.with_memo(memo);
        }
        Ok(origin)
    }

    /// 원 레시피를 레코드로 되돌린다.
    pub fn from_origin(origin: &OriginRecipe) -> Self {
        Self {
            name: origin.name().unwrap_or_default().to_string(),
            is_ice: origin.is_ice(),
            ice_g: origin.is_ice().then(|| origin.ice_g()),
            len_steps: origin.step_count(),
            bean_g: origin.bean_g(),
            water_ml: origin.total_water_ml(),
            memo: origin.memo().map(str::to_string),
            steps: origin.steps().iter().map(StepRecord::from).collect(),
        }
    }
}

/// 확장자(.toml / .json)에 따라 레시피 파일을 읽는다.
pub fn load_recipe_file(path: &Path) -> Result<OriginRecipe, RecordError> {
    let content = fs::read_to_string(path)?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();
    let record: RecipeRecord = match ext.as_str() {
        "toml" => toml::from_str(&content)?,
        "json" => serde_json::from_str(&content)?,
        other => return Err(RecordError::UnsupportedFormat(other.to_string())),
    };
    record.into_origin()
}

/// 변환된 레시피를 공유할 때 보내는 페이로드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedRecipeRecord {
    pub name: String,
    pub bean_g: f64,
    pub water_ml: f64,
    pub is_ice: bool,
    pub ice_g: f64,
    pub len_steps: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    pub steps: Vec<StepRecord>,
}

impl SharedRecipeRecord {
    /// 변환 결과 표에서 공유 페이로드를 만든다. 스텝에는 누적 물량을 담는다.
    pub fn from_converted(name: &str, converted: &ConvertedRecipe) -> Self {
        let recipe = &converted.recipe;
        Self {
            name: name.to_string(),
            bean_g: recipe.scaled_bean_g,
            water_ml: recipe.scaled_water_ml,
            is_ice: converted.is_ice(),
            ice_g: recipe.scaled_ice_g.unwrap_or(0.0),
            len_steps: recipe.steps.len(),
            memo: converted.memo.clone(),
            steps: recipe
                .steps
                .iter()
                .map(|s| StepRecord {
                    step_number: s.step_number,
                    minute: s.elapsed.minute,
                    seconds: s.elapsed.second,
                    total_water_ml_this_step: s.cumulative_water_ml as f64,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
