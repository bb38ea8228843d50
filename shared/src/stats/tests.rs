use super::*;
use serde_json::json;

#[test]
fn hero_reads_numbers_and_numeric_strings() {
    let stats = HeroStats::from_value(&json!({
        "villages": "120",
        "problems": 45,
        "funds": "2.5",
        "volunteers": "many",
    }));
    assert_eq!(stats.villages, 120.0);
    assert_eq!(stats.problems, 45.0);
    assert_eq!(stats.funds, 2.5);
    assert_eq!(stats.volunteers, 0.0);
}

#[test]
fn missing_fields_fall_back_to_zero_object() {
    assert_eq!(HeroStats::from_value(&json!({})), HeroStats::default());
    assert_eq!(JoinStats::from_value(&json!(null)), JoinStats::default());
    assert_eq!(
        TransparencyStats::from_value(&json!({})),
        TransparencyStats::default()
    );
}

#[test]
fn about_accepts_legacy_keys() {
    let stats = AboutStats::from_value(&json!({
        "activeVolunteers": 300,
        "impactGenerated": 500000000,
        "districts": 13,
    }));
    assert_eq!(stats.volunteers, 300.0);
    assert_eq!(stats.yearly_fund, 500000000.0);
    assert_eq!(stats.districts, 13.0);

    let body = stats.to_body();
    assert_eq!(body["volunteers"], json!(300.0));
    assert_eq!(body["activeVolunteers"], json!(300.0));
    assert_eq!(body["impactGenerated"], json!(500000000.0));
}

#[test]
fn hero_update_response_unwraps_envelope() {
    let updated = HeroStats::from_update_response(&json!({
        "success": true,
        "stats": {"villages": 10, "problems": 2, "funds": 1, "volunteers": 7}
    }))
    .unwrap();
    assert_eq!(updated.villages, 10.0);
    assert_eq!(updated.volunteers, 7.0);

    assert!(HeroStats::from_update_response(&json!({"success": false})).is_none());
}

#[test]
fn join_update_response_is_flat() {
    let updated = JoinStats::from_update_response(&json!({
        "activeVolunteers": 50,
        "fundsUtilized": "3.25"
    }))
    .unwrap();
    assert_eq!(updated.active_volunteers, 50.0);
    assert_eq!(updated.funds_utilized, 3.25);
}

#[test]
fn numeric_edits_are_clamped() {
    let mut stats = HeroStats::default();
    stats.set_field("villages", "-5");
    assert_eq!(stats.villages, 0.0);
    stats.set_field("problems", "abc");
    assert_eq!(stats.problems, 0.0);
    stats.set_field("funds", "12.75");
    assert_eq!(stats.funds, 12.75);
    assert_eq!(stats.field_value("funds"), "12.75");
    stats.set_field("volunteers", "");
    assert_eq!(stats.field_value("volunteers"), "0");
}

#[test]
fn currency_edits_never_double_the_symbol() {
    assert_eq!(normalize_crore("₹₹5 Cr"), "₹5 Cr");
    assert_eq!(normalize_crore("12.5"), "₹12.5 Cr");
    assert_eq!(normalize_crore(" ₹ 3 Cr Cr"), "₹3 Cr");
    assert_eq!(normalize_ratio("85.5 %"), "85.5%");
    assert_eq!(normalize_ratio("abc"), "%");

    let mut stats = TransparencyStats::default();
    stats.set_field("totalIncome", "₹4 Cr");
    stats.set_field("efficiencyRatio", "92");
    assert_eq!(stats.financial.total_income, "₹4 Cr");
    assert_eq!(stats.financial.efficiency_ratio, "92%");
}

#[test]
fn transparency_reads_nested_and_flat_shapes() {
    let nested = TransparencyStats::from_value(&json!({
        "stats": {"transparencyScore": "98%", "auditFrequency": "Quarterly"},
        "financialStats": {"totalIncome": "₹2 Cr"},
        "highlightNote": {"title": "Audited"}
    }));
    assert_eq!(nested.transparency_score, "98%");
    assert_eq!(nested.utilization_rate, "0%");
    assert_eq!(nested.audit_frequency, "Quarterly");
    assert_eq!(nested.financial.total_income, "₹2 Cr");
    assert_eq!(nested.financial.reserves, "0");
    assert_eq!(nested.highlight.title, "Audited");
    assert_eq!(
        nested.highlight.description,
        HighlightNote::default().description
    );

    let flat = TransparencyStats::from_value(&json!({
        "trackingRate": "100%",
        "financialStats": {"efficiencyRatio": ""}
    }));
    assert_eq!(flat.tracking_rate, "100%");
    assert_eq!(flat.financial.efficiency_ratio, "0%");
}

#[test]
fn transparency_body_matches_read_shape() {
    let mut stats = TransparencyStats::default();
    stats.set_field("reserves", "1.5");
    let body = stats.to_body();
    assert_eq!(body["financialStats"]["reserves"], json!("₹1.5 Cr"));
    assert_eq!(TransparencyStats::from_value(&body), stats);
}

#[test]
fn update_paths_and_sections() {
    assert_eq!(HeroStats::update_path(), "/stats/update");
    assert_eq!(TransparencyStats::update_path(), "/stats-transparency/update");
    assert_eq!(StatSection::parse("join"), Some(StatSection::Join));
    assert_eq!(StatSection::parse("bogus"), None);
    assert_eq!(AboutStats::fields().len(), 9);
    assert!(AboutStats::fields().iter().all(|f| f.kind.is_numeric()));
}
