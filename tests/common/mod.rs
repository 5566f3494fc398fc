//! 테스트용 레시피 픽스처.
#![allow(dead_code)]

use co_fitting::recipe::{BrewStep, OriginRecipe};

/// 20g / 300ml, 5투 레시피.
pub fn five_pour_recipe() -> OriginRecipe {
    OriginRecipe::hot(
        20.0,
        vec![
            BrewStep::new(1, 0, 0, 60.0),
            BrewStep::new(2, 0, 45, 120.0),
            BrewStep::new(3, 1, 30, 180.0),
            BrewStep::new(4, 2, 10, 240.0),
            BrewStep::new(5, 2, 45, 300.0),
        ],
    )
    .expect("valid recipe")
}

/// 20g 원두, 물 150ml + 얼음 80g 아이스 레시피.
pub fn iced_recipe() -> OriginRecipe {
    OriginRecipe::iced(
        20.0,
        80.0,
        vec![
            BrewStep::new(1, 0, 0, 50.0),
            BrewStep::new(2, 0, 40, 100.0),
            BrewStep::new(3, 1, 20, 150.0),
        ],
    )
    .expect("valid iced recipe")
}

/// 테스트마다 겹치지 않는 임시 경로.
pub fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("co_fitting_{}_{name}", std::process::id()))
}
