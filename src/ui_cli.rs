use std::io::{self, Write};
use std::path::Path;

use crate::app::AppError;
use crate::config::Config;
use crate::form;
use crate::i18n::{keys, Translator};
use crate::quantity::BrewParameter;
use crate::recipe::record::{self, SharedRecipeRecord};
use crate::recipe::{
    self, fill_target_form, origin_ratio, Completion, CompletionError, ConversionError,
    ConversionRequest, ConvertedRecipe, MissingFields, OriginRecipe, ScaledRecipe, TargetForm,
};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Convert,
    Complete,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_CONVERT));
    println!("{}", tr.t(keys::MAIN_MENU_COMPLETE));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Convert),
            "2" => return Ok(MenuChoice::Complete),
            "3" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 레시피 변환 메뉴를 처리한다.
///
/// 입력 누락이나 0 나눗셈은 메시지만 보여주고 메뉴로 돌아간다.
pub fn handle_convert(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::CONVERT_HEADING));
    println!("{}", tr.t(keys::CONVERT_SOURCE_OPTIONS));
    let origin = match read_line(tr.t(keys::PROMPT_SELECT))?.trim() {
        "2" => {
            let path = read_line(tr.t(keys::PROMPT_RECIPE_PATH))?;
            match record::load_recipe_file(Path::new(path.trim())) {
                Ok(origin) => origin,
                Err(err) => {
                    println!("{}: {err}", tr.t(keys::ERROR_PREFIX));
                    return Ok(());
                }
            }
        }
        _ => match read_origin(tr)? {
            Some(origin) => origin,
            None => return Ok(()),
        },
    };
    println!("{}", render_origin(tr, &origin));

    let request = read_request(tr, &origin)?;
    match recipe::convert(&origin, &request, cfg.show_percentage) {
        Ok(converted) => {
            println!("{}", render_converted(tr, &converted));
            let name = read_line(tr.t(keys::PROMPT_SHARE_NAME))?;
            if !name.trim().is_empty() {
                let payload = SharedRecipeRecord::from_converted(name.trim(), &converted);
                println!("{}", payload.to_json()?);
            }
        }
        Err(err) => println!("{}", describe_conversion_error(tr, &err)),
    }
    Ok(())
}

fn read_origin(tr: &Translator) -> Result<Option<OriginRecipe>, AppError> {
    let bean = read_f64(tr, tr.t(keys::PROMPT_BEAN))?;
    let is_ice = read_yes_no(tr.t(keys::PROMPT_ICE_MODE))?;
    let ice = if is_ice {
        read_optional_f64(tr, tr.t(keys::PROMPT_ICE))?.unwrap_or(0.0)
    } else {
        0.0
    };
    let pour_times = loop {
        let line = read_line(tr.t(keys::PROMPT_POUR_TIMES))?;
        match form::parse_pour_count(&line) {
            Ok(n) => break n.unwrap_or(0),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    };

    let mut steps = Vec::with_capacity(pour_times as usize);
    for n in 1..=pour_times {
        let prompt = tr.t(keys::PROMPT_STEP).replace("{n}", &n.to_string());
        loop {
            let line = read_line(&prompt)?;
            match form::parse_step_line(&line, n) {
                Ok(step) => {
                    steps.push(step);
                    break;
                }
                Err(err) => println!("{}: {err}", tr.t(keys::ERROR_PREFIX)),
            }
        }
    }

    match OriginRecipe::new(bean, is_ice, ice, steps) {
        Ok(origin) => Ok(Some(origin)),
        Err(err) => {
            println!("{}: {err}", tr.t(keys::ERROR_PREFIX));
            Ok(None)
        }
    }
}

/// 배율 또는 목표 원두량/물량/비율을 입력받는다.
///
/// 목표 비율을 비워 두면 원 레시피의 비율을 그대로 쓴다.
fn read_request(tr: &Translator, origin: &OriginRecipe) -> Result<ConversionRequest, AppError> {
    if let Some(m) = read_optional_f64(tr, tr.t(keys::PROMPT_MAGNIFICATION))? {
        return Ok(ConversionRequest::by_magnification(m));
    }
    let bean_g = read_optional_f64(tr, tr.t(keys::PROMPT_TARGET_BEAN))?;
    let water_ml = read_optional_f64(tr, tr.t(keys::PROMPT_TARGET_WATER))?;
    let ratio_prompt = match origin_ratio(origin) {
        Some(r) => format!("{}[{r}] ", tr.t(keys::PROMPT_TARGET_RATIO)),
        None => tr.t(keys::PROMPT_TARGET_RATIO).to_string(),
    };
    let ratio = read_optional_f64(tr, &ratio_prompt)?;
    let request = ConversionRequest {
        magnification: None,
        bean_g,
        water_ml,
        ratio,
    }
    .or_origin_ratio(origin);

    let form = fill_target_form(TargetForm {
        bean_g: request.bean_g,
        water_ml: request.water_ml,
        ratio: request.ratio,
    });
    Ok(ConversionRequest {
        magnification: None,
        bean_g: form.bean_g,
        water_ml: form.water_ml,
        ratio: form.ratio,
    })
}

/// 보완 메뉴를 처리한다.
pub fn handle_complete(tr: &Translator) -> Result<(), AppError> {
    println!("{}", tr.t(keys::COMPLETE_HEADING));
    println!("{}", tr.t(keys::COMPLETE_NOTE));
    let bean = read_optional_f64(tr, tr.t(keys::PROMPT_TARGET_BEAN))?;
    let water = read_optional_f64(tr, tr.t(keys::PROMPT_TARGET_WATER))?;
    let ratio = read_optional_f64(tr, tr.t(keys::PROMPT_TARGET_RATIO))?;
    println!(
        "{}",
        render_completion(tr, &recipe::complete(bean, water, ratio))
    );
    Ok(())
}

/// 설정 메뉴를 처리한다. 언어가 바뀌었으면 true를 반환한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {}",
        tr.t(keys::SETTINGS_CURRENT_LANGUAGE),
        tr.language_code()
    );
    println!(
        "{} {}",
        tr.t(keys::SETTINGS_CURRENT_PERCENTAGE),
        cfg.show_percentage
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::PROMPT_SELECT))?;
    match sel.trim() {
        "1" => {
            let code = read_line(tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
            let code = code.trim().to_lowercase();
            if matches!(code.as_str(), "ja" | "ko" | "en") {
                cfg.language = Some(code);
                Ok(true)
            } else {
                println!("{}", tr.t(keys::SETTINGS_INVALID));
                Ok(false)
            }
        }
        "2" => {
            cfg.show_percentage = !cfg.show_percentage;
            Ok(false)
        }
        "" => Ok(false),
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            Ok(false)
        }
    }
}

/// 원 레시피 요약(비율, 추출량, 스텝)을 문자열로 만든다.
pub fn render_origin(tr: &Translator, origin: &OriginRecipe) -> String {
    let mut out = String::new();
    if let Some(name) = origin.name() {
        out.push_str(&format!("# {name}\n"));
    }
    out.push_str(&format!("{} {} g\n", tr.t(keys::RESULT_BEAN), origin.bean_g()));
    if origin.is_ice() {
        out.push_str(&format!("{} {} g\n", tr.t(keys::RESULT_ICE), origin.ice_g()));
    }
    out.push_str(&format!(
        "{} {}\n",
        tr.t(keys::ORIGIN_TOTAL_OUTPUT),
        origin.total_output()
    ));
    if let Some(ratio) = origin_ratio(origin) {
        out.push_str(&format!("{} {ratio}\n", tr.t(keys::ORIGIN_RATIO)));
    }
    out.push_str(&format!(
        "{:<10}{:>12}\n",
        tr.t(keys::TABLE_ELAPSED),
        tr.t(keys::TABLE_CUMULATIVE)
    ));
    for step in origin.steps() {
        out.push_str(&format!(
            "{:<10}{:>9} ml\n",
            step.elapsed.to_string(),
            step.cumulative_water_ml
        ));
    }
    out
}

/// 변환 결과 요약과 스텝 표를 문자열로 만든다.
pub fn render_converted(tr: &Translator, converted: &ConvertedRecipe) -> String {
    let recipe = &converted.recipe;
    let mut out = String::new();
    out.push_str(&format!(
        "{} {:.4}\n",
        tr.t(keys::RESULT_MAGNIFICATION),
        converted.scale.factor
    ));
    out.push_str(&format!(
        "{} {} g\n",
        tr.t(keys::RESULT_BEAN),
        recipe.scaled_bean_g
    ));
    out.push_str(&format!(
        "{} {} ml\n",
        tr.t(keys::RESULT_WATER),
        recipe.scaled_water_ml
    ));
    if let Some(ice) = recipe.scaled_ice_g {
        out.push_str(&format!("{} {ice} g\n", tr.t(keys::RESULT_ICE)));
    }
    out.push_str(&format!(
        "{} {}\n",
        tr.t(keys::RESULT_TOTAL_OUTPUT),
        recipe.total_output()
    ));
    out.push_str(&render_table(tr, recipe));
    if let Some(memo) = &converted.memo {
        out.push_str(&format!("{} {memo}\n", tr.t(keys::RESULT_MEMO)));
    }
    out
}

/// 변환 후 스텝 표. 경과 시간은 `MM:SS`로 표시한다.
pub fn render_table(tr: &Translator, recipe: &ScaledRecipe) -> String {
    let show_percentage = recipe
        .steps
        .iter()
        .any(|s| s.percent_of_total.is_some());
    let mut out = format!(
        "{:<10}{:>10}{:>12}",
        tr.t(keys::TABLE_ELAPSED),
        tr.t(keys::TABLE_POUR),
        tr.t(keys::TABLE_CUMULATIVE)
    );
    if show_percentage {
        out.push_str(&format!("{:>7}", tr.t(keys::TABLE_PERCENT)));
    }
    out.push('\n');
    for step in &recipe.steps {
        out.push_str(&format!(
            "{:<10}{:>7} ml{:>9} ml",
            step.elapsed.to_string(),
            step.step_pour_ml,
            step.cumulative_water_ml
        ));
        if let Some(p) = step.percent_of_total {
            out.push_str(&format!("{p:>5} %"));
        }
        out.push('\n');
    }
    out
}

/// 입력 누락 메시지(머리글 + 항목별 글머리표).
pub fn render_validation(tr: &Translator, missing: &MissingFields) -> String {
    missing.message_with(tr.t(keys::VALIDATION_HEADER), |f| tr.t(f.i18n_key()))
}

pub fn render_completion(
    tr: &Translator,
    result: &Result<Completion, CompletionError>,
) -> String {
    match result {
        Ok(c) => format!(
            "{} {} = {}",
            tr.t(keys::COMPLETE_RESULT),
            tr.t(parameter_key(c.parameter)),
            c.value
        ),
        Err(CompletionError::MissingParameters { .. }) => {
            tr.t(keys::COMPLETE_MISSING).to_string()
        }
        Err(CompletionError::OverSupplied) => tr.t(keys::COMPLETE_OVERSUPPLIED).to_string(),
    }
}

fn parameter_key(parameter: BrewParameter) -> &'static str {
    match parameter {
        BrewParameter::Bean => keys::PARAM_BEAN,
        BrewParameter::Water => keys::PARAM_WATER,
        BrewParameter::Ratio => keys::PARAM_RATIO,
    }
}

pub fn describe_conversion_error(tr: &Translator, err: &ConversionError) -> String {
    match err {
        ConversionError::MissingFields(missing) => render_validation(tr, missing),
        other => format!("{}: {other}", tr.t(keys::ERROR_PREFIX)),
    }
}

/// 최상위에서 출력할 오류 문자열.
pub fn describe_error(tr: &Translator, err: &AppError) -> String {
    match err {
        AppError::Conversion(conv) => describe_conversion_error(tr, conv),
        other => format!("{}: {other}", tr.t(keys::ERROR_PREFIX)),
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        if let Some(v) = read_optional_f64(tr, prompt)? {
            return Ok(v);
        }
        println!("{}", tr.t(keys::ERROR_INVALID_NUMBER));
    }
}

fn read_optional_f64(tr: &Translator, prompt: &str) -> Result<Option<f64>, AppError> {
    loop {
        let s = read_line(prompt)?;
        match form::parse_field(&s) {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_yes_no(prompt: &str) -> Result<bool, AppError> {
    let s = read_line(prompt)?;
    Ok(matches!(s.trim().to_lowercase().as_str(), "y" | "yes"))
}
