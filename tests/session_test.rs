//! Integration tests for the session: selected path and execute path
//! expansion across the container tree.

use nmcore::{CoreError, ExecuteTarget, Session};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// project0 / folder0 with two flat records (no data series).
fn flat_session() -> Session {
    init_tracing();
    let mut session = Session::new();
    session.projects_mut().create(None).unwrap();
    let project = session.projects_mut().selected_mut().unwrap();
    project.folders_mut().create(None).unwrap();
    let folder = project.folders_mut().selected_mut().unwrap();
    folder.data_mut().create(None).unwrap();
    folder.data_mut().create(None).unwrap();
    session
}

/// project0 / folder0 with records plus series0 holding channels A, B and
/// epochs E0, E1.
fn grid_session() -> Session {
    let mut session = flat_session();
    let project = session.projects_mut().selected_mut().unwrap();
    let folder = project.folders_mut().selected_mut().unwrap();
    folder.dataseries_mut().create(None).unwrap();
    let series = folder.dataseries_mut().selected_mut().unwrap();
    series.channels_mut().create(None).unwrap();
    series.channels_mut().create(None).unwrap();
    series.epochs_mut().create(None).unwrap();
    series.epochs_mut().create(None).unwrap();
    session
}

// ============================================================
// selected path
// ============================================================

#[test]
fn given_new_session_when_reading_path_then_empty() {
    let session = Session::new();
    assert!(session.selected_path().is_empty());
}

#[test]
fn given_only_project_selected_when_reading_path_then_single_pair() {
    let mut session = Session::new();
    session.projects_mut().create(None).unwrap();
    assert_eq!(
        session.selected_path(),
        [("project", "project0".to_string())]
    );
}

#[test]
fn given_flat_tree_when_reading_path_then_stops_at_missing_series_selection() {
    // Arrange
    let session = flat_session();

    // Act
    let path = session.selected_path();

    // Assert: records are reached via the execute axis, not the path
    assert_eq!(
        path,
        [
            ("project", "project0".to_string()),
            ("folder", "folder0".to_string()),
        ]
    );
}

#[test]
fn given_grid_tree_when_reading_path_then_walks_all_levels() {
    let session = grid_session();
    assert_eq!(
        session.selected_path(),
        [
            ("project", "project0".to_string()),
            ("folder", "folder0".to_string()),
            ("dataseries", "series0".to_string()),
            ("channel", "A".to_string()),
            ("epoch", "E0".to_string()),
        ]
    );
}

#[test]
fn given_cleared_channel_selection_when_reading_path_then_truncated_there() {
    let mut session = grid_session();
    let project = session.projects_mut().selected_mut().unwrap();
    let folder = project.folders_mut().selected_mut().unwrap();
    let series = folder.dataseries_mut().selected_mut().unwrap();
    series.channels_mut().clear_selection();
    assert_eq!(session.selected_path().len(), 3);
}

// ============================================================
// select_path
// ============================================================

#[test]
fn given_level_keys_when_selecting_path_then_selections_updated() {
    // Arrange
    let mut session = grid_session();

    // Act
    session
        .select_path(&[("channel", "B"), ("epoch", "E1")])
        .unwrap();

    // Assert
    let path = session.selected_path();
    assert_eq!(path[3], ("channel", "B".to_string()));
    assert_eq!(path[4], ("epoch", "E1".to_string()));
}

#[test]
fn given_unknown_level_when_selecting_path_then_rejected() {
    let mut session = grid_session();
    let err = session.select_path(&[("waveform", "w0")]).unwrap_err();
    assert_eq!(
        err,
        CoreError::UnknownLevel {
            level: "waveform".to_string()
        }
    );
}

#[test]
fn given_no_project_selected_when_selecting_folder_then_rejected() {
    let mut session = Session::new();
    let err = session.select_path(&[("folder", "folder0")]).unwrap_err();
    assert_eq!(
        err,
        CoreError::NoSelection {
            level: "project".to_string()
        }
    );
}

#[test]
fn given_unknown_key_when_selecting_path_then_rejected() {
    let mut session = grid_session();
    assert!(matches!(
        session.select_path(&[("channel", "Z")]),
        Err(CoreError::KeyNotFound { .. })
    ));
}

// ============================================================
// execute paths
// ============================================================

#[test]
fn given_flat_tree_with_default_targets_when_expanding_then_selected_record() {
    // Arrange
    let session = flat_session();

    // Act
    let paths = session.execute_paths().unwrap();

    // Assert
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].project, "project0");
    assert_eq!(paths[0].folder, "folder0");
    assert_eq!(paths[0].data.as_deref(), Some("record0"));
    assert_eq!(paths[0].dataseries, None);
}

#[test]
fn given_series_present_when_expanding_then_series_takes_priority_over_records() {
    let session = grid_session();
    let paths = session.execute_paths().unwrap();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].dataseries.as_deref(), Some("series0"));
    assert_eq!(paths[0].channel.as_deref(), Some("A"));
    assert_eq!(paths[0].epoch.as_deref(), Some("E0"));
    assert_eq!(paths[0].data, None);
}

#[test]
fn given_all_targets_on_grid_axes_when_expanding_then_cartesian_product() {
    // Arrange
    let mut session = grid_session();
    {
        let project = session.projects_mut().selected_mut().unwrap();
        let folder = project.folders_mut().selected_mut().unwrap();
        let series = folder.dataseries_mut().selected_mut().unwrap();
        series
            .channels_mut()
            .set_execute(ExecuteTarget::Set("all".to_string()))
            .unwrap();
        series
            .epochs_mut()
            .set_execute(ExecuteTarget::Set("all".to_string()))
            .unwrap();
    }

    // Act
    let paths = session.execute_paths().unwrap();

    // Assert: channels outermost, epochs innermost
    let grid: Vec<(Option<&str>, Option<&str>)> = paths
        .iter()
        .map(|p| (p.channel.as_deref(), p.epoch.as_deref()))
        .collect();
    assert_eq!(
        grid,
        [
            (Some("A"), Some("E0")),
            (Some("A"), Some("E1")),
            (Some("B"), Some("E0")),
            (Some("B"), Some("E1")),
        ]
    );
}

#[test]
fn given_series_target_resolving_empty_when_expanding_then_falls_back_to_records() {
    // Arrange: point the series level at an empty set
    let mut session = grid_session();
    {
        let project = session.projects_mut().selected_mut().unwrap();
        let folder = project.folders_mut().selected_mut().unwrap();
        folder.dataseries_mut().create_set("unused").unwrap();
        folder
            .dataseries_mut()
            .set_execute(ExecuteTarget::Set("unused".to_string()))
            .unwrap();
        folder
            .data_mut()
            .set_execute(ExecuteTarget::Set("all".to_string()))
            .unwrap();
    }

    // Act
    let paths = session.execute_paths().unwrap();

    // Assert
    let records: Vec<Option<&str>> = paths.iter().map(|p| p.data.as_deref()).collect();
    assert_eq!(records, [Some("record0"), Some("record1")]);
}

#[test]
fn given_no_selection_anywhere_when_expanding_then_no_paths() {
    let mut session = flat_session();
    session.projects_mut().clear_selection();
    assert!(session.execute_paths().unwrap().is_empty());
}

#[test]
fn given_execute_path_when_displayed_then_slash_joined() {
    let grid = grid_session().execute_paths().unwrap();
    assert_eq!(grid[0].to_string(), "project0/folder0/series0/A/E0");
    let flat = flat_session().execute_paths().unwrap();
    assert_eq!(flat[0].to_string(), "project0/folder0/record0");
}
