use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::config::{Config, ConfigError};
use crate::form::FormError;
use crate::i18n::{self, Translator};
use crate::recipe::record::{self, RecordError, SharedRecipeRecord};
use crate::recipe::{self, ConversionError, ConversionRequest};
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// 레시피 파일 오류
    #[error("recipe file error: {0}")]
    Record(#[from] RecordError),
    /// 변환 오류
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),
    /// 입력값 해석 오류
    #[error("input error: {0}")]
    Form(#[from] FormError),
}

/// 명령행 `convert`의 옵션.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub request: ConversionRequest,
    pub show_percentage: bool,
    /// 공유 페이로드(JSON)를 쓸 경로
    pub export: Option<std::path::PathBuf>,
    /// 공유 페이로드의 레시피 이름. 없으면 원 레시피 이름을 쓴다.
    pub share_name: Option<String>,
}

/// 레시피 파일을 읽어 한 번 변환하고 결과를 출력한다.
pub fn run_convert(recipe_path: &Path, opts: &ConvertOptions, tr: &Translator) -> Result<(), AppError> {
    let origin = record::load_recipe_file(recipe_path)?;
    println!("{}", ui_cli::render_origin(tr, &origin));

    let request = opts.request.or_origin_ratio(&origin);
    let converted = recipe::convert(&origin, &request, opts.show_percentage)?;
    println!("{}", ui_cli::render_converted(tr, &converted));

    if let Some(path) = &opts.export {
        let name = opts
            .share_name
            .as_deref()
            .or(origin.name())
            .unwrap_or_default();
        let payload = SharedRecipeRecord::from_converted(name, &converted).to_json()?;
        fs::write(path, payload)?;
        info!(path = %path.display(), "shared recipe exported");
        println!("{} {}", tr.t(i18n::keys::RESULT_EXPORTED), path.display());
    }
    Ok(())
}

/// 원두량/물량/비율 보완 결과를 출력한다. 보완할 수 없는 입력은 오류가 아니다.
pub fn run_complete(
    bean_g: Option<f64>,
    water_ml: Option<f64>,
    ratio: Option<f64>,
    tr: &Translator,
) -> Result<(), AppError> {
    println!(
        "{}",
        ui_cli::render_completion(tr, &recipe::complete(bean_g, water_ml, ratio))
    );
    Ok(())
}

/// 레시피 파일의 요약과 스텝을 출력한다.
pub fn run_show(recipe_path: &Path, tr: &Translator) -> Result<(), AppError> {
    let origin = record::load_recipe_file(recipe_path)?;
    println!("{}", ui_cli::render_origin(tr, &origin));
    Ok(())
}

/// 대화형 메인 루프를 실행한다.
pub fn run(config: &mut Config, config_path: &Path, tr: &mut Translator) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::Convert => ui_cli::handle_convert(tr, config)?,
            MenuChoice::Complete => ui_cli::handle_complete(tr)?,
            MenuChoice::Settings => {
                if ui_cli::handle_settings(tr, config)? {
                    let lang = i18n::resolve_language("", config.language.as_deref());
                    let pack = config.locales_path();
                    *tr = Translator::new_with_pack(&lang, pack.as_deref());
                }
                config.save(config_path)?;
                println!("{}", tr.t(i18n::keys::SETTINGS_SAVED));
            }
            MenuChoice::Exit => {
                config.save(config_path)?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
