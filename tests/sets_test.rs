//! Integration tests for named sets and the `&`/`|`/`!` expression algebra,
//! exercised through the container API.

use nmcore::{CoreError, Data, ObjectContainer};

/// rec0, rec1, rec2 with two literal sets: s1 = {rec0, rec1},
/// s2 = {rec1, rec2}.
fn records_with_sets() -> ObjectContainer<Data> {
    let mut container = ObjectContainer::new("rec");
    for _ in 0..3 {
        container.create(None).unwrap();
    }
    container.create_set("s1").unwrap();
    container.set_add("s1", "rec0").unwrap();
    container.set_add("s1", "rec1").unwrap();
    container.create_set("s2").unwrap();
    container.set_add("s2", "rec1").unwrap();
    container.set_add("s2", "rec2").unwrap();
    container
}

// ============================================================
// literal sets
// ============================================================

#[test]
fn given_members_added_out_of_order_when_evaluating_then_creation_order() {
    // Arrange
    let mut container = ObjectContainer::<Data>::new("rec");
    for _ in 0..3 {
        container.create(None).unwrap();
    }
    container.create_set("picked").unwrap();

    // Act
    container.set_add("picked", "rec2").unwrap();
    container.set_add("picked", "rec0").unwrap();

    // Assert
    assert_eq!(container.evaluate("picked").unwrap(), ["rec0", "rec2"]);
}

#[test]
fn given_unknown_key_when_adding_then_rejected() {
    let mut container = records_with_sets();
    let err = container.set_add("s1", "ghost").unwrap_err();
    assert_eq!(
        err,
        CoreError::KeyNotFound {
            key: "ghost".to_string()
        }
    );
}

#[test]
fn given_mixed_case_key_when_adding_then_canonical_spelling_stored() {
    let mut container = records_with_sets();
    container.create_set("picked").unwrap();
    container.set_add("picked", "REC0").unwrap();
    assert_eq!(container.evaluate("picked").unwrap(), ["rec0"]);
}

#[test]
fn given_member_when_removed_then_reports_membership_change() {
    let mut container = records_with_sets();
    assert!(container.set_remove("s1", "rec0").unwrap());
    assert!(!container.set_remove("s1", "rec0").unwrap());
    assert_eq!(container.evaluate("s1").unwrap(), ["rec1"]);
}

#[test]
fn given_entry_deleted_then_dropped_from_literal_sets() {
    let mut container = records_with_sets();
    container.delete("rec1").unwrap();
    assert_eq!(container.evaluate("s1").unwrap(), ["rec0"]);
    assert_eq!(container.evaluate("s2").unwrap(), ["rec2"]);
}

// ============================================================
// the reserved `all` set
// ============================================================

#[test]
fn given_all_when_evaluating_then_full_key_space_recomputed() {
    // Arrange
    let mut container = records_with_sets();
    assert_eq!(
        container.evaluate("all").unwrap(),
        ["rec0", "rec1", "rec2"]
    );

    // Act
    container.create(None).unwrap();
    container.delete("rec0").unwrap();

    // Assert
    assert_eq!(container.evaluate("ALL").unwrap(), ["rec1", "rec2", "rec3"]);
}

#[test]
fn given_all_when_mutating_then_reserved() {
    let mut container = records_with_sets();
    assert!(matches!(
        container.create_set("all"),
        Err(CoreError::ReservedName { .. })
    ));
    assert!(matches!(
        container.delete_set("All"),
        Err(CoreError::ReservedName { .. })
    ));
    assert!(matches!(
        container.set_add("all", "rec0"),
        Err(CoreError::ReservedName { .. })
    ));
    assert!(matches!(
        container.rename_set("all", "everything"),
        Err(CoreError::ReservedName { .. })
    ));
}

// ============================================================
// expression sets
// ============================================================

#[test]
fn given_intersection_expression_when_evaluating_then_common_members() {
    let mut container = records_with_sets();
    container.create_set_expression("s3", "s1 & s2").unwrap();
    assert_eq!(container.evaluate("s3").unwrap(), ["rec1"]);
}

#[test]
fn given_union_expression_when_evaluating_then_creation_order() {
    let mut container = records_with_sets();
    container.create_set_expression("s3", "s2 | s1").unwrap();
    assert_eq!(container.evaluate("s3").unwrap(), ["rec0", "rec1", "rec2"]);
}

#[test]
fn given_subtraction_from_all_when_evaluating_then_complement() {
    let mut container = records_with_sets();
    container.create_set_expression("rest", "all ! s2").unwrap();
    assert_eq!(container.evaluate("rest").unwrap(), ["rec0"]);
}

#[test]
fn given_mixed_operators_when_evaluating_then_left_to_right_no_precedence() {
    // Arrange
    let mut container = records_with_sets();
    container.create_set("s3").unwrap();
    container.set_add("s3", "rec1").unwrap();

    // Act: (s1 | s2) & s3, not s1 | (s2 & s3)
    container.create_set_expression("folded", "s1 | s2 & s3").unwrap();

    // Assert
    assert_eq!(container.evaluate("folded").unwrap(), ["rec1"]);
}

#[test]
fn given_entry_key_operand_when_evaluating_then_singleton_contribution() {
    let mut container = records_with_sets();
    container.create_set_expression("s3", "rec2 | s1").unwrap();
    assert_eq!(container.evaluate("s3").unwrap(), ["rec0", "rec1", "rec2"]);
}

#[test]
fn given_unresolved_operand_when_evaluating_then_contributes_nothing() {
    let mut container = records_with_sets();
    container.create_set_expression("s3", "ghost | rec0").unwrap();
    assert_eq!(container.evaluate("s3").unwrap(), ["rec0"]);
}

#[test]
fn given_operand_matching_set_and_key_when_evaluating_then_set_wins() {
    // Arrange: a set named like an entry key shadows the key
    let mut container = records_with_sets();
    container.create_set("rec0").unwrap();
    container.set_add("rec0", "rec2").unwrap();

    // Act
    container.create_set_expression("s3", "rec0").unwrap();

    // Assert
    assert_eq!(container.evaluate("s3").unwrap(), ["rec2"]);
}

#[test]
fn given_expression_when_entries_change_then_reevaluates_against_current_keys() {
    let mut container = records_with_sets();
    container.create_set_expression("s3", "s1 | s2").unwrap();
    container.delete("rec0").unwrap();
    assert_eq!(container.evaluate("s3").unwrap(), ["rec1", "rec2"]);
}

#[test]
fn given_common_member_deleted_then_intersection_empties() {
    let mut container = records_with_sets();
    container.create_set_expression("s3", "s1 & s2").unwrap();
    container.delete("rec1").unwrap();
    assert_eq!(container.evaluate("s1").unwrap(), ["rec0"]);
    assert!(container.evaluate("s3").unwrap().is_empty());
}

#[test]
fn given_expression_set_when_adding_members_then_rejected() {
    let mut container = records_with_sets();
    container.create_set_expression("s3", "s1 & s2").unwrap();
    assert!(matches!(
        container.set_add("s3", "rec0"),
        Err(CoreError::ExpressionSet { .. })
    ));
    assert!(matches!(
        container.set_remove("s3", "rec0"),
        Err(CoreError::ExpressionSet { .. })
    ));
}

#[test]
fn given_malformed_expression_when_creating_then_rejected_and_not_created() {
    let mut container = records_with_sets();
    let err = container.create_set_expression("bad", "s1 &").unwrap_err();
    assert!(matches!(err, CoreError::InvalidName { .. }));
    assert!(matches!(
        container.evaluate("bad"),
        Err(CoreError::SetNotFound { .. })
    ));
}

#[test]
fn given_mutually_recursive_expressions_when_evaluating_then_cycle_detected() {
    // Arrange: operands may reference sets defined later, so the cycle only
    // surfaces at evaluation
    let mut container = records_with_sets();
    container.create_set_expression("sa", "sb | rec0").unwrap();
    container.create_set_expression("sb", "sa").unwrap();

    // Act
    let err = container.evaluate("sa").unwrap_err();

    // Assert
    assert!(matches!(err, CoreError::CyclicSetReference { .. }));
}

#[test]
fn given_self_referencing_expression_when_evaluating_then_cycle_detected() {
    let mut container = records_with_sets();
    container.create_set_expression("sc", "sc | rec0").unwrap();
    assert!(matches!(
        container.evaluate("sc"),
        Err(CoreError::CyclicSetReference { .. })
    ));
}

// ============================================================
// set lifecycle
// ============================================================

#[test]
fn given_duplicate_set_name_when_creating_then_rejected() {
    let mut container = records_with_sets();
    assert!(matches!(
        container.create_set("S1"),
        Err(CoreError::DuplicateName { .. })
    ));
}

#[test]
fn given_deleted_set_when_evaluating_then_not_found() {
    let mut container = records_with_sets();
    container.delete_set("s1").unwrap();
    assert!(matches!(
        container.evaluate("s1"),
        Err(CoreError::SetNotFound { .. })
    ));
    let names: Vec<&str> = container.set_names().collect();
    assert_eq!(names, ["s2"]);
}

#[test]
fn given_renamed_set_then_expression_operands_rewritten() {
    // Arrange
    let mut container = records_with_sets();
    container.create_set_expression("s3", "s1 & s2").unwrap();

    // Act
    container.rename_set("s1", "first").unwrap();

    // Assert
    assert_eq!(container.evaluate("first").unwrap(), ["rec0", "rec1"]);
    assert_eq!(container.evaluate("s3").unwrap(), ["rec1"]);
}
