use std::fs;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;
use tsvtable::{tsv_enum, tsv_record, ErrorKind, Table, TsvError};

tsv_record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Person {
        pub name: String as "Name",
        pub age: i32 as "Age",
    }
}

tsv_enum! {
    #[derive(Debug, Default, Clone, Copy, PartialEq)]
    pub enum Priority {
        #[default]
        Low,
        Medium,
        High,
    }
}

tsv_record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Task {
        pub id: u64,
        pub title: String,
        pub done: bool,
        pub estimate: f64,
        pub grade: char,
        pub due: NaiveDate,
        pub created: NaiveDateTime,
        pub priority: Priority,
        pub delta: i16,
    }
}

tsv_record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Note {
        pub text: String,
    }
}

fn person(name: &str, age: i32) -> Person {
    Person {
        name: name.into(),
        age,
    }
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_and_saves_people_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let contents = "Name\tAge\nAlice\t30\nBob\t25\n";
    let path = write_file(&dir, "people.tsv", contents);

    let table = Table::<Person>::from_file(&path).unwrap();
    assert_eq!(table.count(), 2);
    assert_eq!(table.columns(), ["Name", "Age"]);
    assert_eq!(table.get(0), Some(&person("Alice", 30)));
    assert_eq!(table.get(1), Some(&person("Bob", 25)));

    let saved = dir.path().join("saved.tsv");
    table.save_to_file(&saved).unwrap();
    assert_eq!(fs::read_to_string(&saved).unwrap(), contents);
}

#[test]
fn extra_column_fails_with_line_number() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "extra.tsv", "Name\tAge\nAlice\t30\tExtra\n");

    let err = Table::<Person>::from_file(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
    assert_eq!(err.line(), Some(2));
    assert!(err.to_string().contains("extra.tsv:2"));
}

#[test]
fn missing_column_fails_with_line_number() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "short.tsv", "Name\tAge\nAlice\t30\nBob\n");

    let err = Table::<Person>::from_file(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
    assert_eq!(err.line(), Some(3));
}

#[test]
fn bad_value_aborts_whole_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "bad.tsv", "Name\tAge\nAlice\t30\nBob\tyoung\n");

    let err = Table::<Person>::from_file(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeConversionError);
    assert_eq!(err.line(), Some(3));
}

#[test]
fn empty_and_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let empty = write_file(&dir, "empty.tsv", "");

    let err = Table::<Person>::from_file(&empty).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyFile);

    let err = Table::<Person>::from_file(dir.path().join("absent.tsv")).unwrap_err();
    assert!(matches!(err, TsvError::FileNotFound { .. }));

    let err = Table::<Person>::from_file(dir.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileNotFound);
}

#[test]
fn accepts_crlf_line_endings() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "crlf.tsv", "Name\tAge\r\nAlice\t30\r\nBob\t25\r\n");

    let table = Table::<Person>::from_file(&path).unwrap();
    assert_eq!(table.rows(), [person("Alice", 30), person("Bob", 25)]);
}

#[test]
fn round_trips_every_field_type() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.tsv");

    let created = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_milli_opt(9, 15, 30, 250)
        .unwrap();
    let mut table = Table::<Task>::new();
    table.add_row(Task {
        id: 1,
        title: "Write docs".into(),
        done: false,
        estimate: 0.1,
        grade: 'A',
        due: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        created,
        priority: Priority::High,
        delta: -3,
    });
    table.add_row(Task {
        id: u64::MAX,
        title: String::new(),
        done: true,
        estimate: -2.5e-8,
        grade: 'é',
        due: NaiveDate::from_ymd_opt(1999, 12, 31).unwrap(),
        created,
        priority: Priority::Low,
        delta: i16::MIN,
    });
    table.save_to_file(&path).unwrap();

    let loaded = Table::<Task>::from_file(&path).unwrap();
    assert_eq!(loaded.columns(), table.columns());
    assert_eq!(loaded.rows(), table.rows());

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("id\ttitle\tdone\testimate\tgrade\tdue\tcreated\tpriority\tdelta")
    );
    assert_eq!(
        lines.next(),
        Some("1\tWrite docs\tfalse\t0.1\tA\t2024-03-15\t2024-03-01 09:15:30.250\tHigh\t-3")
    );
}

#[test]
fn blank_data_line_is_a_short_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "gap.tsv", "Name\tAge\nAlice\t30\n\nBob\t25\n");

    let err = Table::<Person>::from_file(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
    assert_eq!(err.line(), Some(3));

    let trailing = write_file(&dir, "trailing.tsv", "Name\tAge\nAlice\t30\n\n");
    let err = Table::<Person>::from_file(&trailing).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
    assert_eq!(err.line(), Some(3));
}

#[test]
fn whitespace_only_line_is_a_short_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "spaces.tsv", "Name\tAge\n   \nBob\t25\n");

    let err = Table::<Person>::from_file(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
    assert_eq!(err.line(), Some(2));
}

#[test]
fn round_trips_single_column_with_empty_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.tsv");

    let mut table = Table::<Note>::new();
    for text in ["a", "", "b", " ", ""] {
        table.add_row(Note { text: text.into() });
    }
    table.save_to_file(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "text\na\n\nb\n \n\n");

    let loaded = Table::<Note>::from_file(&path).unwrap();
    assert_eq!(loaded.columns(), ["text"]);
    assert_eq!(loaded.rows(), table.rows());
}

#[test]
fn enum_values_ignore_case() {
    let dir = tempfile::tempdir().unwrap();
    let header = "id\ttitle\tdone\testimate\tgrade\tdue\tcreated\tpriority\tdelta\n";
    let rows = [
        "1\ta\tTrue\t1\tx\t2024-01-01\t2024-01-01T00:00:00\thigh\t0\n",
        "2\tb\tFALSE\t2.5\ty\t2024-01-02\t2024-01-02 00:00:00\tMEDIUM\t0\n",
        "3\tc\tfalse\t3\tz\t2024-01-03\t2024-01-03 00:00:00\tlOw\t0\n",
    ];
    let path = write_file(&dir, "tasks.tsv", &format!("{}{}", header, rows.concat()));

    let table = Table::<Task>::from_file(&path).unwrap();
    let priorities: Vec<Priority> = table.iter().map(|t| t.priority).collect();
    assert_eq!(priorities, [Priority::High, Priority::Medium, Priority::Low]);
    assert!(table.get(0).unwrap().done);

    let bad = write_file(
        &dir,
        "bad.tsv",
        &format!(
            "{}{}",
            header, "4\td\tfalse\t1\tw\t2024-01-04\t2024-01-04 00:00:00\turgent\t0\n"
        ),
    );
    let err = Table::<Task>::from_file(&bad).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidEnumValue);
    assert_eq!(err.line(), Some(2));
}

#[test]
fn append_requires_identical_columns() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_file(&dir, "a.tsv", "Name\tAge\nAlice\t30\n");
    let second = write_file(&dir, "b.tsv", "Name\tAge\nBob\t25\nCarol\t41\n");
    let reordered = write_file(&dir, "c.tsv", "Age\tName\n50\tDave\n");
    let renamed = write_file(&dir, "d.tsv", "Name\tYears\nEve\t22\n");

    let mut table = Table::<Person>::from_file(&first).unwrap();
    assert_eq!(table.append_file(&second).unwrap(), 2);
    assert_eq!(table.count(), 3);
    assert_eq!(table.get(2), Some(&person("Carol", 41)));

    let err = table.append_file(&reordered).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
    assert_eq!(table.count(), 3);

    // Years resolves to no field, so the load itself fails first
    let err = table.append_file(&renamed).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownColumn);
    assert_eq!(table.count(), 3);
}

#[test]
fn append_to_derived_table() {
    let dir = tempfile::tempdir().unwrap();
    let lower = write_file(&dir, "lower.tsv", "name\tage\n");
    let upper = write_file(&dir, "upper.tsv", "Name\tAge\nAlice\t30\n");

    let mut table = Table::<Person>::new();
    let err = table.append_file(&lower).unwrap_err();
    assert!(matches!(err, TsvError::ColumnsMismatch { .. }));

    assert_eq!(table.append_file(&upper).unwrap(), 1);
    assert_eq!(table.rows(), [person("Alice", 30)]);
}

#[test]
fn failed_append_leaves_rows_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_file(&dir, "a.tsv", "Name\tAge\nAlice\t30\n");
    let broken = write_file(&dir, "b.tsv", "Name\tAge\nBob\t25\nCarol\tforty\n");

    let mut table = Table::<Person>::from_file(&first).unwrap();
    let err = table.append_file(&broken).unwrap_err();
    assert_eq!(err.line(), Some(3));
    assert_eq!(table.rows(), [person("Alice", 30)]);
}

#[test]
fn header_columns_are_checked_lazily() {
    let dir = tempfile::tempdir().unwrap();
    let header_only = write_file(&dir, "header.tsv", "Name\tNickname\n");
    let with_row = write_file(&dir, "row.tsv", "Name\tNickname\nAlice\tAl\n");

    let mut table = Table::<Person>::from_file(&header_only).unwrap();
    assert_eq!(table.count(), 0);
    assert_eq!(table.columns(), ["Name", "Nickname"]);

    let err = Table::<Person>::from_file(&with_row).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownColumn);
    assert_eq!(err.line(), Some(2));

    // Saving rows through an unknown column fails before the file is touched
    table.add_row(person("Alice", 30));
    let target = dir.path().join("out.tsv");
    let err = table.save_to_file(&target).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownColumn);
    assert!(!target.exists());
}

#[test]
fn save_replaces_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "people.tsv", "Name\tAge\nAlice\t30\nBob\t25\nCarol\t41\n");

    let mut table = Table::<Person>::from_file(&path).unwrap();
    table.delete_row(0).unwrap();
    table.delete_row(1).unwrap();
    table.save_to_file(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "Name\tAge\nBob\t25\n");

    table.clear();
    table.save_to_file(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "Name\tAge\n");
    assert_eq!(Table::<Person>::from_file(&path).unwrap().count(), 0);
}
