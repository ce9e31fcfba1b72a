use contacts_core::{AddressBook, Field, JsonFileStore, Record, StoreError};
use std::path::Path;

fn john() -> Record {
    let mut record = Record::with_birthday("John", "1990-05-15").unwrap();
    record.add_phone("1234567890").unwrap();
    record.add_phone("5555555555").unwrap();
    record
}

fn jane() -> Record {
    let mut record = Record::with_birthday("Jane", "1985-08-21").unwrap();
    record.add_phone("9876543210").unwrap();
    record
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn open_missing_file_starts_empty_without_creating_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("address_book.json");

    let book = AddressBook::open(&path).unwrap();
    assert!(book.is_empty());
    assert!(!path.exists());
}

#[test]
fn add_record_then_find_returns_equal_record() {
    let dir = tempfile::tempdir().unwrap();
    let mut book = AddressBook::open(dir.path().join("book.json")).unwrap();

    book.add_record(john()).unwrap();
    assert_eq!(book.find("John"), Some(&john()));
    assert!(book.find("john").is_none());
}

#[test]
fn file_matches_memory_after_each_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    let mut book = AddressBook::open(&path).unwrap();

    book.add_record(john()).unwrap();
    book.add_record(jane()).unwrap();
    let json = read_json(&path);
    assert_eq!(json["records"].as_object().unwrap().len(), 2);
    assert_eq!(json["records"]["John"]["phones"][1], "5555555555");

    book.delete("Jane").unwrap();
    let json = read_json(&path);
    assert!(json["records"].get("Jane").is_none());
    assert!(book.find("Jane").is_none());
}

#[test]
fn save_then_load_round_trips_all_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    {
        let mut book = AddressBook::open(&path).unwrap();
        book.add_record(john()).unwrap();
        book.add_record(jane()).unwrap();
        book.add_record(Record::new("NoBirthday")).unwrap();
    }

    let reopened = AddressBook::open(&path).unwrap();
    assert_eq!(reopened.len(), 3);
    assert_eq!(reopened.find("John"), Some(&john()));
    assert_eq!(reopened.find("Jane"), Some(&jane()));
    assert_eq!(reopened.find("NoBirthday"), Some(&Record::new("NoBirthday")));
}

#[test]
fn find_mut_edits_persist_after_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    let mut book = AddressBook::open(&path).unwrap();
    book.add_record(john()).unwrap();

    book.find_mut("John")
        .unwrap()
        .edit_phone("1234567890", "1112223333")
        .unwrap();
    book.save().unwrap();

    let reopened = AddressBook::open(&path).unwrap();
    let john = reopened.find("John").unwrap();
    assert!(john.find_phone("1112223333").is_some());
    assert!(john.find_phone("1234567890").is_none());
}

#[test]
fn search_is_case_insensitive_over_names() {
    let dir = tempfile::tempdir().unwrap();
    let mut book = AddressBook::open(dir.path().join("book.json")).unwrap();
    book.add_record(john()).unwrap();
    book.add_record(jane()).unwrap();

    let found = book.search("john");
    assert_eq!(found, vec![&john()]);

    let found: Vec<_> = book.search("55555").into_iter().map(|r| r.name().value()).collect();
    assert_eq!(found, ["John"]);
}

#[test]
fn iterating_walks_records_in_insertion_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut book = AddressBook::open(dir.path().join("book.json")).unwrap();
    book.add_record(john()).unwrap();
    book.add_record(jane()).unwrap();

    let mut rendered = Vec::new();
    for record in &book {
        rendered.push(record.to_string());
    }
    assert_eq!(
        rendered,
        [
            "Contact name: John, phones: 1234567890; 5555555555, Birthday: 1990-05-15",
            "Contact name: Jane, phones: 9876543210, Birthday: 1985-08-21",
        ]
    );
    assert_eq!(book.iter().count(), 2);
}

#[test]
fn reopened_book_keeps_insertion_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    {
        let mut book = AddressBook::open(&path).unwrap();
        book.add_record(john()).unwrap();
        book.add_record(jane()).unwrap();
        book.add_record(Record::new("Adam")).unwrap();
    }

    let reopened = AddressBook::open(&path).unwrap();
    assert_eq!(reopened.names().collect::<Vec<_>>(), ["John", "Jane", "Adam"]);
}

#[test]
fn mismatched_record_key_is_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    std::fs::write(
        &path,
        r#"{"format_version":1,"records":{"Alias":{"name":"John","phones":[],"birthday":null}}}"#,
    )
    .unwrap();

    let err = AddressBook::open(&path).unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(_)));
}

#[test]
fn tampered_birthday_is_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    std::fs::write(
        &path,
        r#"{"format_version":1,"records":{"John":{"name":"John","phones":[],"birthday":"1990-02-31"}}}"#,
    )
    .unwrap();

    let err = AddressBook::with_store(JsonFileStore::new(&path)).unwrap_err();
    assert!(matches!(err, StoreError::Decode { .. }));
}
