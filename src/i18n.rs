use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_CONVERT: &str = "main_menu.convert";
    pub const MAIN_MENU_COMPLETE: &str = "main_menu.complete";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const CONVERT_HEADING: &str = "convert.heading";
    pub const CONVERT_SOURCE_OPTIONS: &str = "convert.source_options";
    pub const PROMPT_RECIPE_PATH: &str = "prompt.recipe_path";
    pub const PROMPT_BEAN: &str = "prompt.bean";
    pub const PROMPT_ICE_MODE: &str = "prompt.ice_mode";
    pub const PROMPT_ICE: &str = "prompt.ice";
    pub const PROMPT_POUR_TIMES: &str = "prompt.pour_times";
    pub const PROMPT_STEP: &str = "prompt.step";
    pub const PROMPT_MAGNIFICATION: &str = "prompt.magnification";
    pub const PROMPT_TARGET_BEAN: &str = "prompt.target_bean";
    pub const PROMPT_TARGET_WATER: &str = "prompt.target_water";
    pub const PROMPT_TARGET_RATIO: &str = "prompt.target_ratio";
    pub const PROMPT_SHARE_NAME: &str = "prompt.share_name";

    pub const ORIGIN_RATIO: &str = "origin.ratio";
    pub const ORIGIN_TOTAL_OUTPUT: &str = "origin.total_output";

    pub const TABLE_ELAPSED: &str = "table.elapsed";
    pub const TABLE_POUR: &str = "table.pour";
    pub const TABLE_CUMULATIVE: &str = "table.cumulative";
    pub const TABLE_PERCENT: &str = "table.percent";

    pub const RESULT_MAGNIFICATION: &str = "result.magnification";
    pub const RESULT_BEAN: &str = "result.bean";
    pub const RESULT_WATER: &str = "result.water";
    pub const RESULT_ICE: &str = "result.ice";
    pub const RESULT_TOTAL_OUTPUT: &str = "result.total_output";
    pub const RESULT_MEMO: &str = "result.memo";
    pub const RESULT_EXPORTED: &str = "result.exported";

    pub const VALIDATION_HEADER: &str = "validation.header";
    pub const MISSING_POUR_TIMES: &str = "validation.pour_times";
    pub const MISSING_ORIGIN_RECIPE_TOTAL: &str = "validation.origin_recipe_total";
    pub const MISSING_ORIGIN_BEAN: &str = "validation.origin_bean";
    pub const MISSING_ORIGIN_WATER_TARGET: &str = "validation.origin_water_target";

    pub const COMPLETE_HEADING: &str = "complete.heading";
    pub const COMPLETE_NOTE: &str = "complete.note";
    pub const COMPLETE_RESULT: &str = "complete.result";
    pub const COMPLETE_MISSING: &str = "complete.missing";
    pub const COMPLETE_OVERSUPPLIED: &str = "complete.oversupplied";
    pub const PARAM_BEAN: &str = "param.bean";
    pub const PARAM_WATER: &str = "param.water";
    pub const PARAM_RATIO: &str = "param.ratio";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_CURRENT_PERCENTAGE: &str = "settings.current_percentage";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ja,
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::Ja
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ja => "ja",
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ja/ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ja로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&Path>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides(Path::new("locales"), lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 내장 번역 → 영어 순으로 찾는다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.as_str();
        }
        let built_in = match self.lang {
            Language::Ja => ja(key),
            Language::Ko => ko(key),
            Language::En => None,
        };
        match built_in {
            Some(s) => s,
            None => en(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ja") || other.starts_with("jp") => Some("ja".into()),
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ja" => Some("ja".into()),
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    get_locale().and_then(|loc| normalize_locale_string(&loc))
}

fn load_overrides(dir: &Path, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = dir.join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) 전체 코드 (예: ja-jp)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) 기본 코드 (예: ja)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

/// 중첩 테이블을 `a.b.c` 형태의 평평한 키로 펼친다.
pub fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ja(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "エラー",
        APP_EXIT => "終了します。",
        MAIN_MENU_TITLE => "\n=== Co-fitting ===",
        MAIN_MENU_CONVERT => "1) レシピ変換",
        MAIN_MENU_COMPLETE => "2) 抽出パラメータ補完",
        MAIN_MENU_SETTINGS => "3) 設定",
        MAIN_MENU_EXIT => "0) 終了",
        PROMPT_MENU_SELECT => "メニュー選択: ",
        PROMPT_SELECT => "選択: ",
        INVALID_SELECTION_RETRY => "入力が正しくありません。もう一度選択してください。",
        ERROR_INVALID_NUMBER => "数値を入力してください。",
        CONVERT_HEADING => "\n-- レシピ変換 --",
        CONVERT_SOURCE_OPTIONS => "1) 手入力  2) レシピファイル読込",
        PROMPT_RECIPE_PATH => "レシピファイルのパス: ",
        PROMPT_BEAN => "豆量(g): ",
        PROMPT_ICE_MODE => "アイスモード? (y/N): ",
        PROMPT_ICE => "レシピの氷量(g): ",
        PROMPT_POUR_TIMES => "投数: ",
        PROMPT_STEP => "{n}投目 (分:秒 総注湯量ml): ",
        PROMPT_MAGNIFICATION => "変換率 (空欄なら目標値で変換): ",
        PROMPT_TARGET_BEAN => "目標豆量(g): ",
        PROMPT_TARGET_WATER => "目標総湯量(ml): ",
        PROMPT_TARGET_RATIO => "目標比率: ",
        PROMPT_SHARE_NAME => "共有用レシピ名 (空欄でスキップ): ",
        ORIGIN_RATIO => "元レシピ比率:",
        ORIGIN_TOTAL_OUTPUT => "元レシピ出来上がり量:",
        TABLE_ELAPSED => "経過時間",
        TABLE_POUR => "注湯量",
        TABLE_CUMULATIVE => "総注湯量",
        TABLE_PERCENT => "%",
        RESULT_MAGNIFICATION => "変換率:",
        RESULT_BEAN => "豆量:",
        RESULT_WATER => "総湯量:",
        RESULT_ICE => "氷量:",
        RESULT_TOTAL_OUTPUT => "出来上がり量:",
        RESULT_MEMO => "メモ:",
        RESULT_EXPORTED => "共有用データを書き出しました:",
        VALIDATION_HEADER => "【入力不備】",
        MISSING_POUR_TIMES => "変換前投数",
        MISSING_ORIGIN_RECIPE_TOTAL => "変換前レシピ",
        MISSING_ORIGIN_BEAN => "変換前豆量",
        MISSING_ORIGIN_WATER_TARGET => "変換前総湯量",
        COMPLETE_HEADING => "\n-- 抽出パラメータ補完 --",
        COMPLETE_NOTE => "豆量・総湯量・比率のうち2つを入力すると残り1つを計算します(空欄でスキップ)。",
        COMPLETE_RESULT => "補完結果:",
        COMPLETE_MISSING => "値が2つ以上必要です。",
        COMPLETE_OVERSUPPLIED => "3つすべて入力されているため何もしません。",
        PARAM_BEAN => "豆量",
        PARAM_WATER => "総湯量",
        PARAM_RATIO => "比率",
        SETTINGS_HEADING => "\n-- 設定 --",
        SETTINGS_CURRENT_LANGUAGE => "現在の言語:",
        SETTINGS_CURRENT_PERCENTAGE => "%表示:",
        SETTINGS_OPTIONS => "1) 言語変更  2) %表示の切替",
        SETTINGS_PROMPT_LANGUAGE => "言語コード (ja/ko/en): ",
        SETTINGS_INVALID => "入力が正しくないため変更しません。",
        SETTINGS_SAVED => "設定を保存しました。",
        _ => return None,
    })
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Co-fitting ===",
        MAIN_MENU_CONVERT => "1) 레시피 변환",
        MAIN_MENU_COMPLETE => "2) 추출 파라미터 보완",
        MAIN_MENU_SETTINGS => "3) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        CONVERT_HEADING => "\n-- 레시피 변환 --",
        CONVERT_SOURCE_OPTIONS => "1) 직접 입력  2) 레시피 파일 불러오기",
        PROMPT_RECIPE_PATH => "레시피 파일 경로: ",
        PROMPT_BEAN => "원두량(g): ",
        PROMPT_ICE_MODE => "아이스 모드? (y/N): ",
        PROMPT_ICE => "레시피 얼음량(g): ",
        PROMPT_POUR_TIMES => "투수: ",
        PROMPT_STEP => "{n}투 (분:초 누적물량ml): ",
        PROMPT_MAGNIFICATION => "배율 (비우면 목표값으로 변환): ",
        PROMPT_TARGET_BEAN => "목표 원두량(g): ",
        PROMPT_TARGET_WATER => "목표 총 물량(ml): ",
        PROMPT_TARGET_RATIO => "목표 비율: ",
        PROMPT_SHARE_NAME => "공유용 레시피 이름 (비우면 건너뜀): ",
        ORIGIN_RATIO => "원 레시피 비율:",
        ORIGIN_TOTAL_OUTPUT => "원 레시피 추출량:",
        TABLE_ELAPSED => "경과 시간",
        TABLE_POUR => "주수량",
        TABLE_CUMULATIVE => "누적 물량",
        TABLE_PERCENT => "%",
        RESULT_MAGNIFICATION => "배율:",
        RESULT_BEAN => "원두량:",
        RESULT_WATER => "총 물량:",
        RESULT_ICE => "얼음량:",
        RESULT_TOTAL_OUTPUT => "추출량:",
        RESULT_MEMO => "메모:",
        RESULT_EXPORTED => "공유용 데이터를 저장했습니다:",
        VALIDATION_HEADER => "【입력 누락】",
        MISSING_POUR_TIMES => "변환 전 투수",
        MISSING_ORIGIN_RECIPE_TOTAL => "변환 전 레시피",
        MISSING_ORIGIN_BEAN => "변환 전 원두량",
        MISSING_ORIGIN_WATER_TARGET => "변환 전 총 물량",
        COMPLETE_HEADING => "\n-- 추출 파라미터 보완 --",
        COMPLETE_NOTE => "원두량·총 물량·비율 중 두 값을 넣으면 나머지를 계산합니다(비우면 건너뜀).",
        COMPLETE_RESULT => "보완 결과:",
        COMPLETE_MISSING => "값이 두 개 이상 필요합니다.",
        COMPLETE_OVERSUPPLIED => "세 값이 모두 입력되어 있어 아무것도 하지 않습니다.",
        PARAM_BEAN => "원두량",
        PARAM_WATER => "총 물량",
        PARAM_RATIO => "비율",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_CURRENT_PERCENTAGE => "% 표시:",
        SETTINGS_OPTIONS => "1) 언어 변경  2) % 표시 전환",
        SETTINGS_PROMPT_LANGUAGE => "언어 코드 (ja/ko/en): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        _ => return None,
    })
}

fn en(key: &str) -> &str {
    use keys::*;
    match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Co-fitting ===",
        MAIN_MENU_CONVERT => "1) Convert recipe",
        MAIN_MENU_COMPLETE => "2) Complete brew parameters",
        MAIN_MENU_SETTINGS => "3) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please choose again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        CONVERT_HEADING => "\n-- Recipe conversion --",
        CONVERT_SOURCE_OPTIONS => "1) Enter manually  2) Load recipe file",
        PROMPT_RECIPE_PATH => "Recipe file path: ",
        PROMPT_BEAN => "Beans (g): ",
        PROMPT_ICE_MODE => "Ice mode? (y/N): ",
        PROMPT_ICE => "Recipe ice (g): ",
        PROMPT_POUR_TIMES => "Pour count: ",
        PROMPT_STEP => "Pour {n} (M:SS cumulative ml): ",
        PROMPT_MAGNIFICATION => "Magnification (blank to use targets): ",
        PROMPT_TARGET_BEAN => "Target beans (g): ",
        PROMPT_TARGET_WATER => "Target water (ml): ",
        PROMPT_TARGET_RATIO => "Target ratio: ",
        PROMPT_SHARE_NAME => "Recipe name for sharing (blank to skip): ",
        ORIGIN_RATIO => "Origin ratio:",
        ORIGIN_TOTAL_OUTPUT => "Origin total output:",
        TABLE_ELAPSED => "Time",
        TABLE_POUR => "Pour",
        TABLE_CUMULATIVE => "Total",
        TABLE_PERCENT => "%",
        RESULT_MAGNIFICATION => "Magnification:",
        RESULT_BEAN => "Beans:",
        RESULT_WATER => "Water:",
        RESULT_ICE => "Ice:",
        RESULT_TOTAL_OUTPUT => "Total output:",
        RESULT_MEMO => "Memo:",
        RESULT_EXPORTED => "Shared recipe written to:",
        VALIDATION_HEADER => "[Missing input]",
        MISSING_POUR_TIMES => "Origin pour count",
        MISSING_ORIGIN_RECIPE_TOTAL => "Origin recipe",
        MISSING_ORIGIN_BEAN => "Bean amount",
        MISSING_ORIGIN_WATER_TARGET => "Total water",
        COMPLETE_HEADING => "\n-- Brew parameter completion --",
        COMPLETE_NOTE => "Enter two of beans, water and ratio to compute the third (blank to skip).",
        COMPLETE_RESULT => "Completed:",
        COMPLETE_MISSING => "At least two values are required.",
        COMPLETE_OVERSUPPLIED => "All three values are given; nothing to do.",
        PARAM_BEAN => "Beans",
        PARAM_WATER => "Water",
        PARAM_RATIO => "Ratio",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_CURRENT_PERCENTAGE => "Show %:",
        SETTINGS_OPTIONS => "1) Change language  2) Toggle % column",
        SETTINGS_PROMPT_LANGUAGE => "Language code (ja/ko/en): ",
        SETTINGS_INVALID => "Invalid input; nothing changed.",
        SETTINGS_SAVED => "Settings saved.",
        other => other,
    }
}
