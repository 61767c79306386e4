use chrono::NaiveDate;
use stage_planner::{
    calculate_stage_dates, calculate_stage_dates_from_str, calculate_stage_durations,
    format_date_range, format_iso_date, plan_schedule, AllocationMethod, LotId, LotInput,
    PlannerError, StageDuration, MIN_STAGE_DAYS,
};

fn dqe_lots() -> Vec<LotInput> {
    vec![
        LotInput::new(1, 850_000.0),
        LotInput::new(2, 15_000_000.0),
        LotInput::new("ELEC", 1_200_000.0),
        LotInput::new("PLOMB", 640_000.0),
        LotInput::new(5, 0.0),
        LotInput::new(6, 3_400_000.0),
    ]
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_floor_and_order_for_both_methods() {
    let lots = dqe_lots();
    for method in [AllocationMethod::Proportional, AllocationMethod::Equal] {
        for total in [1, 12, 30, 120, 400] {
            let durations = calculate_stage_durations(&lots, total, method).unwrap();
            assert_eq!(durations.len(), lots.len());
            for (duration, lot) in durations.iter().zip(&lots) {
                assert_eq!(duration.lot_id, lot.id);
                assert!(duration.duration_days >= MIN_STAGE_DAYS);
            }
        }
    }
}

#[test]
fn test_proportional_conserves_total_when_reconcilable() {
    let lots = dqe_lots();
    for total in [60, 120, 250, 400] {
        let durations = calculate_stage_durations(&lots, total, AllocationMethod::Proportional).unwrap();
        let sum: i64 = durations.iter().map(|d| d.duration_days).sum();
        assert_eq!(sum, total, "total {}", total);
    }
}

#[test]
fn test_equal_method_keeps_rounding_drift() {
    let lots: Vec<LotInput> = (1..=3).map(|i| LotInput::new(i, 1000.0 * i as f64)).collect();
    let durations = calculate_stage_durations(&lots, 100, AllocationMethod::Equal).unwrap();

    assert!(durations.iter().all(|d| d.duration_days == 33));
    let sum: i64 = durations.iter().map(|d| d.duration_days).sum();
    assert_eq!(sum, 99);
}

#[test]
fn test_zero_budget_matches_equal_method() {
    let lots: Vec<LotInput> = ["A", "B", "C", "D"].iter().map(|id| LotInput::new(*id, 0.0)).collect();
    assert_eq!(
        calculate_stage_durations(&lots, 90, AllocationMethod::Proportional).unwrap(),
        calculate_stage_durations(&lots, 90, AllocationMethod::Equal).unwrap()
    );
}

#[test]
fn test_dates_are_contiguous_and_sized() {
    let durations = calculate_stage_durations(&dqe_lots(), 365, AllocationMethod::Proportional).unwrap();
    let ranges = calculate_stage_dates(&durations, ymd(2023, 12, 20)).unwrap();

    for (range, duration) in ranges.iter().zip(&durations) {
        assert_eq!(range.lot_id, duration.lot_id);
        assert!(range.end_date >= range.start_date);
        assert_eq!((range.end_date - range.start_date).num_days() + 1, duration.duration_days);
    }
    for pair in ranges.windows(2) {
        assert_eq!(pair[0].end_date.succ_opt().unwrap(), pair[1].start_date);
    }
    assert_eq!(ranges[0].start_date, ymd(2023, 12, 20));
    assert_eq!(ranges.last().unwrap().end_date, ymd(2024, 12, 18));
}

#[test]
fn test_published_two_lot_schedule() {
    let durations = vec![
        StageDuration { lot_id: LotId::Int(1), duration_days: 5 },
        StageDuration { lot_id: LotId::Int(2), duration_days: 115 },
    ];
    let ranges = calculate_stage_dates_from_str(&durations, "2024-11-15").unwrap();

    let json = serde_json::to_value(&ranges).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"lotId": 1, "startDate": "2024-11-15", "endDate": "2024-11-19"},
            {"lotId": 2, "startDate": "2024-11-20", "endDate": "2025-03-14"}
        ])
    );

    assert_eq!(
        format_date_range(
            &format_iso_date(ranges[0].start_date),
            &format_iso_date(ranges[0].end_date)
        )
        .unwrap(),
        "15/11/2024 - 19/11/2024"
    );
}

#[test]
fn test_empty_everywhere() {
    for method in [AllocationMethod::Proportional, AllocationMethod::Equal] {
        let durations = calculate_stage_durations(&[], 120, method).unwrap();
        assert!(durations.is_empty());
        assert!(calculate_stage_dates(&durations, ymd(2024, 1, 1)).unwrap().is_empty());
    }
}

#[test]
fn test_schedule_json_shape() {
    let lots = vec![LotInput::new(1, 850_000.0), LotInput::new(2, 15_000_000.0)];
    let schedule = plan_schedule(&lots, 120, AllocationMethod::Proportional, ymd(2024, 11, 15)).unwrap();
    let json = serde_json::to_value(&schedule).unwrap();

    assert_eq!(json["method"], "proportional");
    assert_eq!(json["requestedDurationDays"], 120);
    assert_eq!(json["allocatedDurationDays"], 120);
    assert_eq!(json["projectStartDate"], "2024-11-15");
    assert_eq!(json["projectEndDate"], "2025-03-14");
    assert_eq!(json["stages"][0]["durationDays"], 6);
}

#[test]
fn test_caller_contract_violations() {
    let lots = vec![LotInput::new(1, 10.0)];
    assert!(matches!(
        calculate_stage_durations(&lots, 0, AllocationMethod::Proportional),
        Err(PlannerError::InvalidArgument { .. })
    ));
    assert!(matches!(
        calculate_stage_durations(&[LotInput::new(1, -5.0)], 10, AllocationMethod::Equal),
        Err(PlannerError::InvalidArgument { .. })
    ));
    assert!(matches!(
        calculate_stage_dates_from_str(&[], "2024-13-01"),
        Err(PlannerError::InvalidArgument { .. })
    ));
}
