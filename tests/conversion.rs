//! 보완 → 검사 → 배율 → 스텝 변환 전체 흐름 테스트.
mod common;

use approx::assert_relative_eq;
use co_fitting::recipe::{
    convert, fill_target_form, origin_ratio, resolve_scale_factor, BrewStep, ConversionError,
    ConversionRequest, DivisionByZero, FactorSource, MissingField, OriginRecipe, RecipeError,
    TargetForm,
};

fn cumulative(converted: &co_fitting::recipe::ConvertedRecipe) -> Vec<i64> {
    converted
        .recipe
        .steps
        .iter()
        .map(|s| s.cumulative_water_ml)
        .collect()
}

#[test]
fn magnification_one_reproduces_origin() {
    let origin = common::five_pour_recipe();
    let request = ConversionRequest {
        magnification: Some(1.0),
        bean_g: Some(20.0),
        ..ConversionRequest::default()
    };
    let converted = convert(&origin, &request, false).expect("convert");
    assert_eq!(cumulative(&converted), vec![60, 120, 180, 240, 300]);
    assert!(converted
        .recipe
        .steps
        .iter()
        .all(|s| s.step_pour_ml == 60));
    assert_eq!(converted.scale.source, FactorSource::Magnification);
}

#[test]
fn half_magnification_halves_recipe() {
    let origin = common::five_pour_recipe();
    let converted =
        convert(&origin, &ConversionRequest::by_magnification(0.5), false).expect("convert");
    assert_eq!(cumulative(&converted), vec![30, 60, 90, 120, 150]);
    assert_eq!(converted.recipe.scaled_bean_g, 10.0);
    assert_eq!(converted.recipe.scaled_water_ml, 150.0);
    assert_eq!(converted.scale.target_bean_g, Some(10.0));
    assert_eq!(converted.scale.target_water_ml, Some(150.0));
}

#[test]
fn magnification_wins_over_targets() {
    let origin = common::five_pour_recipe();
    let request = ConversionRequest {
        magnification: Some(2.0),
        bean_g: Some(15.0),
        water_ml: Some(150.0),
        ratio: None,
    };
    let converted = convert(&origin, &request, false).expect("convert");
    assert_eq!(converted.scale.factor, 2.0);
    assert_eq!(converted.recipe.final_cumulative_ml(), 600);
    assert_eq!(converted.recipe.scaled_bean_g, 40.0);
}

#[test]
fn zero_magnification_falls_back_to_targets() {
    let origin = common::five_pour_recipe();
    let request = ConversionRequest {
        magnification: Some(0.0),
        bean_g: Some(10.0),
        water_ml: Some(150.0),
        ratio: None,
    };
    let converted = convert(&origin, &request, false).expect("convert");
    assert_eq!(converted.scale.source, FactorSource::TargetWater);
    assert_eq!(converted.scale.factor, 0.5);
    assert_eq!(cumulative(&converted), vec![30, 60, 90, 120, 150]);
}

#[test]
fn iced_target_water_divides_by_water_plus_ice() {
    let origin = common::iced_recipe();
    let converted =
        convert(&origin, &ConversionRequest::by_target(26.0, 300.0), false).expect("convert");
    assert_relative_eq!(converted.scale.factor, 300.0 / 230.0, epsilon = 1e-12);
    assert_relative_eq!(converted.scale.factor, 1.3043, epsilon = 1e-4);
    assert_eq!(cumulative(&converted), vec![65, 130, 195]);
    assert_eq!(converted.recipe.scaled_ice_g, Some(104.0));
    assert_eq!(converted.recipe.scaled_bean_g, 26.0);
    assert!(converted.is_ice());
    assert_eq!(origin_ratio(&origin), Some(11.5));
}

#[test]
fn target_bean_overrides_scaled_bean() {
    // 물 150ml를 목표로 하면 배율은 0.5지만 원두량은 사용자가 입력한 값을 쓴다.
    let origin = common::five_pour_recipe();
    let converted =
        convert(&origin, &ConversionRequest::by_target(12.34, 150.0), false).expect("convert");
    assert_eq!(converted.scale.factor, 0.5);
    assert_eq!(converted.recipe.scaled_bean_g, 12.3);
}

#[test]
fn missing_target_bean_is_completed_from_ratio() {
    let origin = common::five_pour_recipe();
    let request = ConversionRequest {
        water_ml: Some(300.0),
        ratio: Some(15.0),
        ..ConversionRequest::default()
    };
    assert_eq!(request.completed().bean_g, Some(20.0));
    let converted = convert(&origin, &request, true).expect("convert");
    assert_eq!(converted.scale.factor, 1.0);
    assert_eq!(converted.recipe.scaled_bean_g, 20.0);
    assert_eq!(
        converted.recipe.steps[4].percent_of_total,
        Some(100),
        "percentages requested"
    );
}

#[test]
fn missing_target_water_is_completed_from_ratio() {
    let origin = common::five_pour_recipe();
    let request = ConversionRequest {
        bean_g: Some(10.0),
        ratio: Some(15.0),
        ..ConversionRequest::default()
    };
    let converted = convert(&origin, &request, false).expect("convert");
    assert_eq!(converted.scale.target_water_ml, Some(150.0));
    assert_eq!(cumulative(&converted), vec![30, 60, 90, 120, 150]);
}

#[test]
fn missing_targets_are_all_reported() {
    let origin = common::five_pour_recipe();
    let err = convert(&origin, &ConversionRequest::default(), false).unwrap_err();
    let ConversionError::MissingFields(missing) = &err else {
        panic!("expected missing fields, got {err:?}");
    };
    assert_eq!(
        missing.fields(),
        &[MissingField::OriginBean, MissingField::OriginWaterTarget]
    );
}

#[test]
fn empty_origin_reports_pours_and_total() {
    let origin = OriginRecipe::hot(20.0, Vec::new()).expect("recipe");
    let err = convert(&origin, &ConversionRequest::by_magnification(2.0), false).unwrap_err();
    let ConversionError::MissingFields(missing) = &err else {
        panic!("expected missing fields, got {err:?}");
    };
    // 배율 경로의 목표 물량은 0 * 2 = 0 이므로 함께 누락된다.
    assert_eq!(
        missing.fields(),
        &[
            MissingField::PourTimes,
            MissingField::OriginRecipeTotal,
            MissingField::OriginWaterTarget
        ]
    );
}

#[test]
fn resolve_scale_factor_reports_division_by_zero() {
    let origin = common::five_pour_recipe();
    let only_bean = ConversionRequest {
        bean_g: Some(20.0),
        ..ConversionRequest::default()
    };
    assert_eq!(
        resolve_scale_factor(&only_bean, &origin).unwrap_err(),
        DivisionByZero::MissingTargetWater
    );

    let dry = OriginRecipe::hot(20.0, vec![BrewStep::new(1, 0, 0, 0.0)]).expect("recipe");
    assert_eq!(
        resolve_scale_factor(&ConversionRequest::by_target(20.0, 300.0), &dry).unwrap_err(),
        DivisionByZero::OriginTotalOutput
    );
}

#[test]
fn resolve_scale_factor_from_magnification() {
    let origin = common::iced_recipe();
    let scale =
        resolve_scale_factor(&ConversionRequest::by_magnification(0.5), &origin).expect("scale");
    assert_eq!(scale.factor, 0.5);
    assert_eq!(scale.source, FactorSource::Magnification);
    assert_eq!(scale.target_bean_g, Some(10.0));
    assert_eq!(scale.target_water_ml, Some(75.0));
}

#[test]
fn hot_recipe_ignores_stored_ice() {
    let origin = OriginRecipe::new(
        20.0,
        false,
        80.0,
        vec![BrewStep::new(1, 0, 0, 150.0)],
    )
    .expect("recipe");
    assert_eq!(origin.ice_g(), 80.0);
    assert_eq!(origin.effective_ice_g(), 0.0);
    let scale = resolve_scale_factor(&ConversionRequest::by_target(20.0, 300.0), &origin)
        .expect("scale");
    assert_eq!(scale.factor, 2.0);
}

#[test]
fn name_and_memo_are_carried_over() {
    let origin = common::five_pour_recipe()
        .with_name("4:6 method")
        .with_memo("coarse grind");
    let converted =
        convert(&origin, &ConversionRequest::by_magnification(1.5), false).expect("convert");
    assert_eq!(converted.name.as_deref(), Some("4:6 method"));
    assert_eq!(converted.memo.as_deref(), Some("coarse grind"));

    let blank = common::five_pour_recipe().with_memo("   ");
    assert_eq!(blank.memo(), None);
}

#[test]
fn fill_target_form_completes_single_blank() {
    let filled = fill_target_form(TargetForm {
        bean_g: Some(20.0),
        water_ml: None,
        ratio: Some(15.0),
    });
    assert_eq!(filled.water_ml, Some(300.0));

    let full = TargetForm {
        bean_g: Some(20.0),
        water_ml: Some(280.0),
        ratio: Some(15.0),
    };
    assert_eq!(fill_target_form(full), full);

    let sparse = TargetForm {
        bean_g: Some(20.0),
        ..TargetForm::default()
    };
    assert_eq!(fill_target_form(sparse), sparse);
}

#[test]
fn origin_recipe_rejects_broken_tables() {
    assert_eq!(
        OriginRecipe::hot(20.0, vec![BrewStep::new(2, 0, 0, 60.0)]).unwrap_err(),
        RecipeError::StepNumberGap {
            expected: 1,
            found: 2
        }
    );
    assert_eq!(
        OriginRecipe::hot(20.0, vec![BrewStep::new(1, 0, 60, 60.0)]).unwrap_err(),
        RecipeError::SecondOutOfRange {
            step: 1,
            second: 60
        }
    );
    assert!(matches!(
        OriginRecipe::hot(20.0, vec![BrewStep::new(1, 0, 0, -1.0)]).unwrap_err(),
        RecipeError::InvalidCumulative { step: 1, .. }
    ));
    assert!(matches!(
        OriginRecipe::hot(
            20.0,
            vec![BrewStep::new(1, 0, 0, 100.0), BrewStep::new(2, 0, 30, 90.0)]
        )
        .unwrap_err(),
        RecipeError::DecreasingCumulative { step: 2, .. }
    ));
    assert!(matches!(
        OriginRecipe::hot(f64::NAN, Vec::new()).unwrap_err(),
        RecipeError::InvalidBean(_)
    ));
    assert_eq!(
        OriginRecipe::iced(20.0, -1.0, Vec::new()).unwrap_err(),
        RecipeError::InvalidIce(-1.0)
    );
}

#[test]
fn huge_or_infinite_magnification_is_rejected() {
    let origin = common::five_pour_recipe();
    for m in [1e308, f64::INFINITY, f64::NEG_INFINITY] {
        assert_eq!(
            convert(&origin, &ConversionRequest::by_magnification(m), true).unwrap_err(),
            ConversionError::DivisionByZero(DivisionByZero::Overflow),
            "magnification {m}"
        );
    }
    assert_eq!(
        resolve_scale_factor(&ConversionRequest::by_magnification(f64::INFINITY), &origin)
            .unwrap_err(),
        DivisionByZero::Overflow
    );
}

#[test]
fn infinite_targets_are_rejected() {
    let origin = common::five_pour_recipe();
    assert_eq!(
        resolve_scale_factor(&ConversionRequest::by_target(20.0, f64::INFINITY), &origin)
            .unwrap_err(),
        DivisionByZero::Overflow
    );
    assert_eq!(
        convert(&origin, &ConversionRequest::by_target(f64::INFINITY, 300.0), false).unwrap_err(),
        ConversionError::DivisionByZero(DivisionByZero::Overflow)
    );
}

#[test]
fn blank_target_ratio_defaults_to_origin_ratio() {
    let origin = common::five_pour_recipe();
    let water_only = ConversionRequest {
        water_ml: Some(150.0),
        ..ConversionRequest::default()
    };
    assert!(matches!(
        convert(&origin, &water_only, false).unwrap_err(),
        ConversionError::MissingFields(_)
    ));

    let request = water_only.or_origin_ratio(&origin);
    assert_eq!(request.ratio, Some(15.0));
    let converted = convert(&origin, &request, false).expect("convert");
    assert_eq!(converted.recipe.scaled_bean_g, 10.0);
    assert_eq!(cumulative(&converted), vec![30, 60, 90, 120, 150]);

    let explicit = ConversionRequest {
        ratio: Some(16.0),
        ..water_only
    };
    assert_eq!(explicit.or_origin_ratio(&origin).ratio, Some(16.0));
}
