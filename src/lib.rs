//! 커피 레시피 변환 엔진을 라이브러리로 분리해 CLI 외의 화면에서도 그대로 쓸 수 있게 한다.

pub mod app;
pub mod config;
pub mod form;
pub mod i18n;
pub mod quantity;
pub mod recipe;
pub mod ui_cli;
