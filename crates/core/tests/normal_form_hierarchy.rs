//! Tests enforcing the strict normal-form hierarchy:
//!   1NF < 2NF < 3NF < BCNF < 4NF < 5NF
//!
//! Each test constructs a relation that passes the weaker level but fails
//! the stronger one, documenting the exact boundary.

mod common;

use common::relation;
use normform_core::normal_form::{is_superkey, Violation};
use normform_core::{highest_normal_form, NormalForm, Relation, Value};

// -- helpers ------------------------------------------------------------------

fn assert_boundary(relation: &Relation, passes: NormalForm, fails: NormalForm) {
    assert!(
        passes.check(relation).is_ok(),
        "{} should pass {passes}: {:?}",
        relation.name(),
        passes.check(relation),
    );
    let violation = fails
        .check(relation)
        .expect_err("stronger level should fail");
    assert_eq!(
        violation.level(),
        fails,
        "{} should fail exactly at {fails}: {violation}",
        relation.name(),
    );
    assert_eq!(highest_normal_form(relation), Some(passes));
}

/// Every level implies every lower level.
fn assert_monotonic(relation: &Relation) {
    for level in NormalForm::ALL {
        if level.satisfied_by(relation) {
            let mut lower = level.previous();
            while let Some(below) = lower {
                assert!(
                    below.satisfied_by(relation),
                    "{} passes {level} but not {below}",
                    relation.name(),
                );
                lower = below.previous();
            }
        }
    }
}

// -- Boundary 0: not even 1NF -------------------------------------------------

/// A null in a key column fails 1NF whatever the other columns hold.
#[test]
fn null_in_key_is_not_1nf() {
    let r = relation(
        "R",
        table! {
            [SID, Name];
            [1, "Ann"],
            [Value::Null, "Bob"],
        },
        &["SID"],
        &["SID -> Name"],
        &[],
    );
    assert!(matches!(
        NormalForm::First.check(&r),
        Err(Violation::NullInKey { .. })
    ));
    assert_eq!(highest_normal_form(&r), None);
    assert_monotonic(&r);
}

// -- Boundary 1: 1NF pass, 2NF fail -------------------------------------------

/// `CourseID` is a proper subset of the key `{SID, CourseID}` and determines
/// `CourseName`.
#[test]
fn boundary_first_to_second() {
    let r = relation(
        "Student",
        table! {
            [SID, Name, CourseID, CourseName];
            [1, "Ann", "C1", "Math"],
            [1, "Ann", "C2", "Physics"],
            [2, "Bob", "C1", "Math"],
            [3, "Cid", "C2", "Physics"],
        },
        &["SID", "CourseID"],
        &["CourseID -> CourseName"],
        &[],
    );
    assert_boundary(&r, NormalForm::First, NormalForm::Second);
    assert_monotonic(&r);
}

// -- Boundary 2: 2NF pass, 3NF fail -------------------------------------------

/// `A -> B -> C`: `B` is not a superkey and `C` is not part of the key.
#[test]
fn boundary_second_to_third() {
    let r = relation(
        "R",
        table! {
            [A, B, C];
            [1, "x", 10],
            [2, "x", 10],
            [3, "y", 20],
        },
        &["A"],
        &["A -> B", "B -> C"],
        &[],
    );
    assert_boundary(&r, NormalForm::Second, NormalForm::Third);
    assert_monotonic(&r);
}

// -- Boundary 3: 3NF pass, BCNF fail ------------------------------------------

/// `Teacher -> Course` only determines a key attribute, which 3NF allows,
/// but `Teacher` is not a superkey.
#[test]
fn boundary_third_to_boyce_codd() {
    let r = relation(
        "Teaching",
        table! {
            [Student, Course, Teacher];
            ["s1", "Math", "T1"],
            ["s1", "Phys", "T3"],
            ["s2", "Math", "T1"],
            ["s2", "Phys", "T4"],
            ["s3", "Math", "T2"],
        },
        &["Student", "Course"],
        &["Student, Course -> Teacher", "Teacher -> Course"],
        &[],
    );
    assert_boundary(&r, NormalForm::Third, NormalForm::BoyceCodd);
    assert_monotonic(&r);
}

// -- Boundary 4: BCNF pass, 4NF fail ------------------------------------------

/// Skills and languages vary independently per person.
#[test]
fn boundary_boyce_codd_to_fourth() {
    let r = relation(
        "Person",
        table! {
            [Person, Skill, Language];
            ["p1", "cook", "en"],
            ["p1", "cook", "fr"],
            ["p1", "type", "en"],
            ["p1", "type", "fr"],
            ["p2", "drive", "en"],
        },
        &["Person", "Skill", "Language"],
        &[],
        &["Person ->> Skill", "Person ->> Language"],
    );
    assert_boundary(&r, NormalForm::BoyceCodd, NormalForm::Fourth);
    assert_monotonic(&r);
}

/// An MVD whose determinant is a superkey never violates 4NF.
#[test]
fn superkey_mvd_passes_fourth() {
    let r = relation(
        "R",
        table! {
            [A, B, C];
            [1, "x", 10],
            [2, "x", 20],
        },
        &["A"],
        &["A -> B, C", "B, C -> A"],
        &["A ->> B"],
    );
    assert!(NormalForm::Fourth.satisfied_by(&r));
    assert_monotonic(&r);
}

// -- Boundary 5: 4NF pass, 5NF fail -------------------------------------------

/// `B` does not determine `A`, so dropping `A` loses it.
#[test]
fn boundary_fourth_to_fifth() {
    let r = relation(
        "R",
        table! {
            [A, B];
            [1, "x"],
            [2, "x"],
        },
        &["A"],
        &["A -> B"],
        &[],
    );
    assert_boundary(&r, NormalForm::Fourth, NormalForm::Fifth);
    assert_monotonic(&r);
}

#[test]
fn mutual_determination_is_fifth() {
    let r = relation(
        "R",
        table! {
            [A, B];
            [1, "x"],
            [2, "y"],
        },
        &["A"],
        &["A -> B", "B -> A"],
        &[],
    );
    assert_eq!(highest_normal_form(&r), Some(NormalForm::Fifth));
    assert_monotonic(&r);
}

// -- Superkeys ----------------------------------------------------------------

#[test]
fn key_of_first_normal_form_relation_is_superkey() {
    let r = relation(
        "Student",
        table! {
            [SID, CourseID, Grade];
            [1, "C1", 3.5],
            [1, "C2", 2.0],
            [2, "C1", 3.5],
        },
        &["SID", "CourseID"],
        &[],
        &[],
    );
    assert!(NormalForm::First.satisfied_by(&r));
    assert!(is_superkey(&r, r.key()));
    assert!(!is_superkey(&r, &common::attrs(&["SID"])));
    assert!(!is_superkey(&r, &common::attrs(&["CourseID", "Grade"])));
}
