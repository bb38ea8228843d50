use super::*;

fn project(id: &str, mandal: &str, constituency: &str, status: ProjectStatus) -> Project {
    Project {
        id: id.to_string(),
        title: format!("Project {}", id),
        description: String::new(),
        village: "Village".to_string(),
        mandal: mandal.to_string(),
        constituency: constituency.to_string(),
        sponsor: None,
        status,
        images: Vec::new(),
        created_at: None,
    }
}

fn sample(n: usize) -> Vec<Project> {
    (0..n)
        .map(|i| {
            let mandal = if i % 2 == 0 { "Tenali" } else { "Ponnur" };
            let status = match i % 3 {
                0 => ProjectStatus::Pending,
                1 => ProjectStatus::InProgress,
                _ => ProjectStatus::Solved,
            };
            project(&format!("p{}", i), mandal, "Guntur West", status)
        })
        .collect()
}

#[test]
fn page_count_follows_filtered_length() {
    let mut board = ProjectBoard::new(sample(25));
    assert_eq!(board.page().page_count, 3);

    board.set_mandal_filter("tenali");
    assert_eq!(board.filtered().len(), 13);
    assert_eq!(board.page().page_count, 2);
}

#[test]
fn changing_filter_resets_to_first_page() {
    let mut board = ProjectBoard::new(sample(25));
    board.set_page(3);
    assert_eq!(board.page().current, 3);

    board.set_mandal_filter("Pon");
    assert_eq!(board.page().current, 1);

    board.set_page(2);
    board.set_constituency_filter("guntur");
    assert_eq!(board.page().current, 1);
}

#[test]
fn filter_is_case_insensitive_substring() {
    let board_projects = vec![
        project("a", "Tenali", "Tenali", ProjectStatus::Pending),
        project("b", "Ponnur", "Ponnur", ProjectStatus::Solved),
    ];
    let mut board = ProjectBoard::new(board_projects);
    board.set_mandal_filter("  NAL ");
    let ids: Vec<_> = board.filtered().iter().map(|p| p.id.clone()).collect();
    assert_eq!(ids, vec!["a"]);

    board.clear_filters();
    assert_eq!(board.filtered().len(), 2);
}

#[test]
fn counts_follow_filter() {
    let mut board = ProjectBoard::new(sample(9));
    let all = board.counts();
    assert_eq!(all.total, 9);
    assert_eq!(all.pending, 3);
    assert_eq!(all.in_progress, 3);
    assert_eq!(all.solved, 3);

    board.set_mandal_filter("Tenali");
    let tenali = board.counts();
    assert_eq!(tenali.total, 5);
    assert_eq!(tenali.pending + tenali.in_progress + tenali.solved, 5);
}

#[test]
fn apply_status_touches_only_the_matching_project() {
    let mut board = ProjectBoard::new(sample(5));
    let before = board.all().to_vec();

    assert!(board.apply_status("p2", ProjectStatus::Pending));
    for (old, new) in before.iter().zip(board.all()) {
        if old.id == "p2" {
            assert_eq!(new.status, ProjectStatus::Pending);
        } else {
            assert_eq!(old, new);
        }
    }

    assert!(!board.apply_status("missing", ProjectStatus::Solved));
    assert_eq!(board.counts().total, 5);
}

#[test]
fn second_status_update_waits_for_the_first() {
    let mut board = ProjectBoard::new(sample(3));
    assert!(board.begin_status_update("p0"));
    assert!(board.is_updating());
    assert!(!board.begin_status_update("p1"));
    assert_eq!(board.status_of("p1"), Some(ProjectStatus::InProgress));

    board.finish_status_update("p0", Some(ProjectStatus::Solved));
    assert!(!board.is_updating());
    assert_eq!(board.status_of("p0"), Some(ProjectStatus::Solved));
    assert!(board.begin_status_update("p1"));
}

#[test]
fn failed_status_update_keeps_previous_status() {
    let mut board = ProjectBoard::new(sample(3));
    assert!(board.begin_status_update("p0"));
    board.finish_status_update("p0", None);

    assert!(!board.is_updating());
    assert_eq!(board.status_of("p0"), Some(ProjectStatus::Pending));
    assert_eq!(board.status_of("missing"), None);
}

#[test]
fn remove_drops_exactly_one_entry_and_clamps_page() {
    let mut board = ProjectBoard::new(sample(11));
    board.set_page(2);
    assert_eq!(board.visible().len(), 1);

    let removed = board.remove("p10").unwrap();
    assert_eq!(removed.id, "p10");
    assert_eq!(board.all().len(), 10);
    assert!(board.all().iter().all(|p| p.id != "p10"));
    assert_eq!(board.page().current, 1);

    assert!(board.remove("p10").is_none());
    assert_eq!(board.all().len(), 10);
}

#[test]
fn visible_slice_is_current_page() {
    let mut board = ProjectBoard::new(sample(25));
    board.set_page(2);
    let ids: Vec<_> = board.visible().into_iter().map(|p| p.id).collect();
    assert_eq!(ids.first().map(String::as_str), Some("p10"));
    assert_eq!(ids.len(), 10);
    assert_eq!(board.page().label(), "Showing 11-20 of 25");
}

#[test]
fn option_lists_are_distinct_and_sorted() {
    let board = ProjectBoard::new(vec![
        project("a", "Tenali", "Tenali", ProjectStatus::Pending),
        project("b", "Ponnur", "Tenali", ProjectStatus::Pending),
        project("c", "Tenali", " ", ProjectStatus::Pending),
    ]);
    assert_eq!(board.mandal_options(), vec!["Ponnur", "Tenali"]);
    assert_eq!(board.constituency_options(), vec!["Tenali"]);
}

#[test]
fn replace_keeps_filter_and_clamps_page() {
    let mut board = ProjectBoard::new(sample(25));
    board.set_mandal_filter("Tenali");
    board.set_page(2);
    board.replace(sample(4));
    assert_eq!(board.filter().mandal, "Tenali");
    assert_eq!(board.page().current, 1);
}
