//! 레시피 변환 엔진 모듈 모음.

pub mod completer;
pub mod converter;
pub mod model;
pub mod record;
pub mod scale_factor;
pub mod scaler;
pub mod validator;

pub use completer::*;
pub use converter::*;
pub use model::*;
pub use scale_factor::*;
pub use scaler::*;
pub use validator::*;
