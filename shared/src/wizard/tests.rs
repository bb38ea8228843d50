use super::*;

fn filled() -> ReportWizard<&'static str> {
    let mut wizard = ReportWizard::new();
    wizard.select_category(ProblemCategory::Water);
    wizard.location.village = "Kothapalli".into();
    wizard.location.district = "Guntur".into();
    wizard.location.state = "Andhra Pradesh".into();
    wizard.details.title = "Broken hand pump".into();
    wizard.details.description = "The only pump has been dry for a month".into();
    wizard.details.name = "Ravi".into();
    wizard.details.contact = "9000000000".into();
    wizard
}

#[test]
fn next_is_blocked_until_category_selected() {
    let mut wizard: ReportWizard<()> = ReportWizard::new();
    assert_eq!(wizard.step(), WizardStep::Category);
    assert!(!wizard.can_advance());
    assert_eq!(wizard.next(), WizardStep::Category);

    wizard.select_category(ProblemCategory::Electricity);
    assert!(wizard.can_advance());
    assert_eq!(wizard.next(), WizardStep::Location);
}

#[test]
fn steps_never_exceed_bounds() {
    let mut wizard: ReportWizard<()> = ReportWizard::new();
    wizard.select_category(ProblemCategory::Other);
    for _ in 0..10 {
        wizard.next();
    }
    assert_eq!(wizard.step_number(), LAST_STEP);
    assert!(wizard.is_last_step());
    assert!(!wizard.can_advance());

    for _ in 0..10 {
        wizard.back();
    }
    assert_eq!(wizard.step_number(), FIRST_STEP);
}

#[test]
fn sixth_photo_is_rejected() {
    let mut wizard = ReportWizard::new();
    assert_eq!(wizard.add_photos(vec!["a", "b", "c"]), Ok(3));
    assert_eq!(wizard.add_photos(vec!["d", "e"]), Ok(5));

    let err = wizard.add_photos(vec!["f"]).unwrap_err();
    assert_eq!(err, WizardError::TooManyPhotos);
    assert_eq!(err.to_string(), "Maximum 5 photos allowed");
    assert_eq!(wizard.photos(), &["a", "b", "c", "d", "e"]);
}

#[test]
fn oversized_batch_leaves_existing_photos() {
    let mut wizard = ReportWizard::new();
    wizard.add_photos(vec![1, 2]).unwrap();
    assert!(wizard.add_photos(vec![3, 4, 5, 6]).is_err());
    assert_eq!(wizard.photos(), &[1, 2]);

    assert_eq!(wizard.remove_photo(0), Some(1));
    assert_eq!(wizard.remove_photo(7), None);
    assert_eq!(wizard.photos(), &[2]);
}

#[test]
fn geolocation_errors_map_to_messages() {
    assert_eq!(
        GeoError::from_code(1).message(),
        "Please allow location access to use this feature"
    );
    assert_eq!(GeoError::from_code(2), GeoError::Unavailable);
    assert_eq!(GeoError::from_code(3).to_string(), "Location request timed out");
    assert_eq!(GeoError::from_code(9), GeoError::Unknown);

    let mut wizard: ReportWizard<()> = ReportWizard::new();
    wizard.set_gps_error(GeoError::Timeout);
    wizard.set_gps(16.3067, 80.4365);
    assert_eq!(wizard.location.gps_location, "16.3067,80.4365");
    assert_eq!(wizard.gps_error, None);
}

#[test]
fn missing_required_lists_blank_fields() {
    let wizard: ReportWizard<()> = ReportWizard::new();
    assert_eq!(
        wizard.missing_required(),
        vec!["Village", "District", "State", "Title", "Description", "Name", "Contact"]
    );

    let mut almost = filled();
    almost.details.contact = "  ".into();
    assert_eq!(almost.missing_required(), vec!["Contact"]);
    assert!(matches!(
        almost.to_submission(Vec::new()),
        Err(WizardError::MissingFields(_))
    ));
}

#[test]
fn submission_carries_category_twice() {
    let wizard = filled();
    let request = wizard
        .to_submission(vec!["https://img/1.jpg".to_string()])
        .unwrap();
    assert_eq!(request.category, "water");
    assert_eq!(request.problem_type, "water");
    assert_eq!(request.images.len(), 1);

    let body = serde_json::to_value(&request).unwrap();
    assert_eq!(body["problemType"], "water");
    assert_eq!(body["location"]["pinCode"], "");
    assert_eq!(body["details"]["urgencyLevel"], "Medium");
}

#[test]
fn reset_returns_to_first_step() {
    let mut wizard = filled();
    wizard.next();
    wizard.add_photos(vec!["x"]).unwrap();
    wizard.submitted = true;
    wizard.reset();
    assert_eq!(wizard, ReportWizard::default());
    assert_eq!(wizard.step(), WizardStep::Category);
    assert!(wizard.category.is_none());
}

#[test]
fn photos_are_refused_without_upload_target() {
    let mut wizard: ReportWizard<&'static str> = ReportWizard::without_photos();
    assert!(!wizard.photos_enabled());
    assert_eq!(
        wizard.add_photos(vec!["a"]),
        Err(WizardError::PhotosUnavailable)
    );
    assert!(wizard.photos().is_empty());

    wizard.submitted = true;
    wizard.reset();
    assert!(!wizard.photos_enabled());
    assert!(!wizard.submitted);
}

#[test]
fn last_step_is_details() {
    let mut wizard = filled();
    assert!(!wizard.is_last_step());
    for _ in 0..3 {
        wizard.next();
    }
    assert!(wizard.is_last_step());
    assert_eq!(wizard.step(), WizardStep::Details);
}
