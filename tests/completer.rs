//! 원두량/물량/비율 보완 계산 테스트.
use co_fitting::quantity::{is_present, round1, trunc1, BrewParameter};
use co_fitting::recipe::{complete, CompletionError};

#[test]
fn bean_and_water_give_ratio() {
    let c = complete(Some(20.0), Some(300.0), None).expect("ratio");
    assert_eq!(c.parameter, BrewParameter::Ratio);
    assert_eq!(c.value, 15.0);
}

#[test]
fn bean_and_ratio_give_water() {
    let c = complete(Some(20.0), None, Some(15.0)).expect("water");
    assert_eq!(c.parameter, BrewParameter::Water);
    assert_eq!(c.value, 300.0);
}

#[test]
fn water_and_ratio_give_bean() {
    let c = complete(None, Some(300.0), Some(15.0)).expect("bean");
    assert_eq!(c.parameter, BrewParameter::Bean);
    assert_eq!(c.value, 20.0);
}

#[test]
fn iced_total_output_ratio() {
    // 물 150ml + 얼음 80g = 230 → 11.5
    let c = complete(Some(20.0), Some(230.0), None).expect("ratio");
    assert_eq!(c.value, 11.5);
}

#[test]
fn ratio_is_rounded_to_one_decimal() {
    // 250 / 16 = 15.625
    let c = complete(Some(16.0), Some(250.0), None).expect("ratio");
    assert_eq!(c.value, 15.6);
    // 100 / 16 = 6.25 → 반올림 6.3
    let c = complete(None, Some(100.0), Some(16.0)).expect("bean");
    assert_eq!(c.value, 6.3);
}

#[test]
fn rounding_uses_the_stored_value_not_the_scaled_product() {
    // 323/20 = 16.15 은 이진으로 16.1499… 이므로 16.1
    assert_eq!(complete(Some(20.0), Some(323.0), None).expect("ratio").value, 16.1);
    // 7/20 = 0.35 → 0.3499…
    assert_eq!(complete(Some(20.0), Some(7.0), None).expect("ratio").value, 0.3);
    // 1.45 → 1.4499…
    assert_eq!(complete(Some(1.0), Some(1.45), None).expect("ratio").value, 1.4);
    assert_eq!(round1(-0.35), -0.3);
    assert_eq!(round1(f64::INFINITY), f64::INFINITY);
}

#[test]
fn zero_bean_is_treated_as_missing() {
    // 원두 0은 빈 칸 취급이므로 물량/비율 분기로 넘어간다.
    let c = complete(Some(0.0), Some(100.0), Some(16.0)).expect("bean from water and ratio");
    assert_eq!(c.parameter, BrewParameter::Bean);
    assert_eq!(c.value, 6.3);

    let err = complete(Some(0.0), Some(100.0), None).unwrap_err();
    assert_eq!(err, CompletionError::MissingParameters { present: 1 });
}

#[test]
fn nan_is_treated_as_missing() {
    let c = complete(Some(f64::NAN), Some(100.0), Some(10.0)).expect("bean");
    assert_eq!(c.parameter, BrewParameter::Bean);
    assert_eq!(c.value, 10.0);
}

#[test]
fn nothing_given_is_missing() {
    assert_eq!(
        complete(None, None, None).unwrap_err(),
        CompletionError::MissingParameters { present: 0 }
    );
}

#[test]
fn all_three_given_is_a_no_op() {
    assert_eq!(
        complete(Some(20.0), Some(300.0), Some(15.0)).unwrap_err(),
        CompletionError::OverSupplied
    );
}

#[test]
fn ratio_round_trip_recovers_water() {
    for bean in [7.5, 12.0, 15.0, 18.0, 20.0, 22.5] {
        for water in [100.0, 180.0, 237.5, 300.0, 480.0] {
            let ratio = complete(Some(bean), Some(water), None).expect("ratio").value;
            let back = complete(Some(bean), None, Some(ratio)).expect("water").value;
            // 비율 반올림 오차(±0.05)가 원두량만큼 커진 뒤 다시 한 번 반올림된다.
            let tolerance = 0.05 * bean + 0.05;
            assert!(
                (back - water).abs() <= tolerance,
                "bean={bean} water={water} ratio={ratio} back={back}"
            );
        }
    }
}

#[test]
fn presence_and_rounding_helpers() {
    assert!(is_present(Some(0.1)));
    assert!(is_present(Some(-1.0)));
    assert!(!is_present(Some(0.0)));
    assert!(!is_present(Some(-0.0)));
    assert!(!is_present(Some(f64::NAN)));
    assert!(!is_present(None));

    assert_eq!(round1(1.25), 1.3);
    assert_eq!(round1(-1.25), -1.3);
    assert_eq!(trunc1(12.39), 12.3);
    assert_eq!(trunc1(-12.39), -12.3);
}
