//! End-to-end tests exercising the public binding surface the way a query
//! execution layer would: build a parameter set up front, then resolve
//! placeholders by name repeatedly while scanning documents.

use bson::{Bson, doc};
use chrono::{TimeZone, Utc};
use querybind::prelude::*;
use serde_json::json;

#[test]
fn binds_and_resolves_every_value_type() {
    let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let params = Parameters::build(|p| {
        p.set_string("name", Some("Alice"))
            .set_number("score", Some(Number::Double(0.75)))
            .set_int("age", 30)
            .set_long("visits", 5_000_000_000)
            .set_float("ratio", 0.5)
            .set_double("balance", 1234.56)
            .set_bool("active", true)
            .set_date("created", Some(created))
            .set_value("address", doc! { "city": "Oslo", "zip": "0150" });
    });

    assert_eq!(params.value("name").as_str(), Some("Alice"));
    assert_eq!(params.value("score").as_f64(), Some(0.75));
    assert_eq!(params.value("age").as_i32(), Some(30));
    assert_eq!(params.value("visits").as_i64(), Some(5_000_000_000));
    assert_eq!(params.value("ratio").as_f32(), Some(0.5));
    assert_eq!(params.value("balance").as_f64(), Some(1234.56));
    assert_eq!(params.value("active").as_bool(), Some(true));
    assert_eq!(
        params.value("created").as_date().map(|d| d.to_chrono()),
        Some(created)
    );
    assert_eq!(
        params.value("address").as_composite(),
        Some(&Bson::Document(doc! { "city": "Oslo", "zip": "0150" }))
    );
}

#[test]
fn repeated_per_row_lookups_see_one_snapshot() {
    let params = Parameters::build(|p| {
        p.set_string("status", Some("active"));
    });

    let rows = vec![
        doc! { "name": "Alice", "status": "active" },
        doc! { "name": "Bob", "status": "inactive" },
        doc! { "name": "Carol", "status": "active" },
    ];

    // Resolve the placeholder once per row, the way an evaluator binds a
    // parameterized comparison while scanning.
    let matching: Vec<&str> = rows
        .iter()
        .filter(|row| {
            row.get("status").and_then(Bson::as_str) == params.value("status").as_str()
        })
        .filter_map(|row| row.get("name").and_then(Bson::as_str))
        .collect();

    assert_eq!(matching, vec!["Alice", "Carol"]);
}

#[test]
fn rebuild_overrides_without_touching_the_source() {
    let base = Parameters::build(|p| {
        p.set_int("count", 5);
        p.set_string("status", Some("active"));
    });
    let overridden = base.rebuild(|p| {
        p.set_int("count", 10);
    });

    assert_eq!(base.value("count").as_i32(), Some(5));
    assert_eq!(overridden.value("count").as_i32(), Some(10));
    // Entries not touched by the rebuild closure carry over.
    assert_eq!(overridden.value("status").as_str(), Some("active"));
}

#[test]
fn chained_rebuilds_stack_overrides() {
    let first = Parameters::build(|p| {
        p.set_int("a", 1);
    });
    let second = first.rebuild(|p| {
        p.set_int("b", 2);
    });
    let third = second.rebuild(|p| {
        p.set_int("a", 3);
    });

    assert_eq!(third.value("a").as_i32(), Some(3));
    assert_eq!(third.value("b").as_i32(), Some(2));
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 2);
}

#[test]
fn json_bindings_flow_through_to_lookups() {
    let bindings = match json!({ "city": "Oslo", "min_age": 21, "vip": false }) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    };
    let params = Parameters::from_json(bindings).unwrap();

    assert_eq!(params.value("city").as_str(), Some("Oslo"));
    assert_eq!(params.value("min_age").as_i64(), Some(21));
    assert_eq!(params.value("vip").as_bool(), Some(false));
}

#[test]
fn finalized_sets_are_readable_across_threads() {
    let params = Parameters::build(|p| {
        p.set_string("status", Some("active"));
        p.set_long("limit", 100);
    });

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..1000 {
                    assert_eq!(params.value("status").as_str(), Some("active"));
                    assert_eq!(params.value("limit").as_i64(), Some(100));
                    assert!(params.value("missing").is_null());
                }
            });
        }
    });
}

#[test]
fn registered_models_resolve_for_prediction_calls() {
    struct ThresholdModel;

    impl PredictiveModel for ThresholdModel {
        fn predict(&self, input: &bson::Document) -> Option<bson::Document> {
            let score = input.get("score").and_then(Bson::as_f64)?;
            Some(doc! { "pass": score >= 0.5 })
        }
    }

    let registry = PredictionRegistry::new();
    registry.register("threshold", ThresholdModel);

    let model = registry.model("threshold").expect("model registered");
    assert_eq!(
        model.predict(&doc! { "score": 0.75 }),
        Some(doc! { "pass": true })
    );
    assert_eq!(model.predict(&doc! { "note": "no score" }), None);

    registry.unregister("threshold");
    assert!(registry.model("threshold").is_none());
}
