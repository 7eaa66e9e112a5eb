use products_hr::{
    Department, DepartmentFilter, EvaluationDesk, HrError, Rating, Roster, RosterFilter,
    rating::filled_stars,
};

fn r(value: i64) -> Rating {
    Rating::new(value).unwrap()
}

fn evaluate(desk: &mut EvaluationDesk, id: &str, scores: &[(&str, i64)], notes: &str) {
    desk.open(id).unwrap();
    for (criterion, value) in scores {
        desk.rate(criterion, r(*value)).unwrap();
    }
    desk.set_notes(notes).unwrap();
    desk.save().unwrap();
}

const FIELD_SCORES: &[(&str, i64)] = &[
    ("Work Quality", 5),
    ("Safety Compliance", 4),
    ("Equipment Handling", 5),
    ("Teamwork", 4),
    ("Punctuality", 5),
];

#[test]
fn field_worker_scenario() {
    let mut desk = EvaluationDesk::default();
    evaluate(&mut desk, "EMP001", FIELD_SCORES, "Consistent and safe.");

    let juan = desk.roster().get("EMP001").unwrap();
    assert_eq!(juan.rating(), 4.6);
    assert_eq!(filled_stars(juan.rating()), 5);
    assert_eq!(juan.action_label(), "Edit Rating");

    let aggregates = desk.aggregates();
    assert_eq!(aggregates.top_performers.len(), 1);
    assert_eq!(aggregates.top_performers[0].stars(), 5);
    let labels: Vec<String> = aggregates
        .department_averages
        .iter()
        .map(|tile| tile.label())
        .collect();
    assert_eq!(labels, vec!["4.6", "-"]);
}

#[test]
fn ranking_after_several_saves() {
    let mut desk = EvaluationDesk::default();
    let all_five: Vec<(&str, i64)> = FIELD_SCORES.iter().map(|(c, _)| (*c, 5)).collect();
    let all_three: Vec<(&str, i64)> = FIELD_SCORES.iter().map(|(c, _)| (*c, 3)).collect();
    let packing_five: Vec<(&str, i64)> = Department::Packing
        .criteria()
        .iter()
        .map(|c| (*c, 5))
        .collect();

    evaluate(&mut desk, "EMP001", &all_three, "");
    evaluate(&mut desk, "EMP002", &packing_five, "");
    evaluate(&mut desk, "EMP003", &all_five, "");

    let ids: Vec<String> = desk
        .aggregates()
        .top_performers
        .into_iter()
        .map(|ranked| ranked.employee.id)
        .collect();
    assert_eq!(ids, vec!["EMP002", "EMP003", "EMP001"]);
}

#[test]
fn incomplete_evaluation_cannot_be_saved() {
    let mut desk = EvaluationDesk::default();
    desk.open("EMP005").unwrap();
    for (criterion, value) in &FIELD_SCORES[..4] {
        desk.rate(criterion, r(*value)).unwrap();
    }
    match desk.save() {
        Err(HrError::IncompleteEvaluation { employee_id, missing }) => {
            assert_eq!(employee_id, "EMP005");
            assert_eq!(missing, vec!["Punctuality".to_string()]);
        }
        other => panic!("expected incomplete evaluation, got {other:?}"),
    }
    assert!(!desk.roster().get("EMP005").unwrap().is_rated());
}

#[test]
fn filtered_roster_reflects_saved_ratings() {
    let mut desk = EvaluationDesk::new(Roster::seeded());
    evaluate(&mut desk, "EMP003", FIELD_SCORES, "");

    let filter = RosterFilter {
        search: Some("pedro".into()),
        department: DepartmentFilter::Only(Department::Field),
    };
    let hits: Vec<_> = desk.filter(&filter).collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].rating(), 4.6);
}

#[test]
fn roster_serializes_for_export() {
    let mut desk = EvaluationDesk::default();
    evaluate(&mut desk, "EMP001", FIELD_SCORES, "ok");
    let json = serde_json::to_value(desk.roster()).unwrap();
    assert_eq!(json[0]["id"], "EMP001");
    assert_eq!(json[0]["department"], "Field");
    assert_eq!(json[0]["criteria_ratings"]["Teamwork"], 4);
    assert_eq!(json[1]["rating"], 0.0);
}
