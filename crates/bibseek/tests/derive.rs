//! Searching structs that derive `Record`.

use bibseek::{search, Record, SearchFlag, SearchFlags};
use bibseek_macros::Record;

#[derive(Debug, Record)]
struct Paper {
    #[record(citation_key)]
    key: String,
    author: String,
    title: String,
    #[record(rename = "journaltitle")]
    journal: Option<String>,
    #[record(skip)]
    #[allow(dead_code)]
    pages: u32,
}

#[derive(Debug, Record)]
struct Note<'a> {
    body: &'a str,
}

#[derive(Debug, Record)]
struct Item {
    r#type: String,
}

fn papers() -> Vec<Paper> {
    vec![
        Paper {
            key: "Knuth1984".into(),
            author: "Donald Knuth".into(),
            title: "Literate Programming".into(),
            journal: Some("The Computer Journal".into()),
            pages: 15,
        },
        Paper {
            key: "Dijkstra1968".into(),
            author: "Edsger Dijkstra".into(),
            title: "Go To Statement Considered Harmful".into(),
            journal: None,
            pages: 2,
        },
    ]
}

#[test]
fn generated_constants() {
    assert_eq!(Paper::AUTHOR, "author");
    assert_eq!(Paper::TITLE, "title");
    assert_eq!(Paper::JOURNALTITLE, "journaltitle");
}

#[test]
fn field_lookup_is_case_insensitive() {
    let paper = &papers()[0];
    assert_eq!(paper.field_value("Author"), Some("Donald Knuth"));
    assert_eq!(paper.field_value("JOURNALTITLE"), Some("The Computer Journal"));
    assert_eq!(paper.field_value("journal"), None);
    assert_eq!(paper.field_value("pages"), None);
    assert_eq!(paper.field_value("key"), None);
}

#[test]
fn values_skip_absent_fields_and_key() {
    let all = papers();
    let values: Vec<&str> = all[1].all_values().collect();
    assert_eq!(
        values,
        vec!["Edsger Dijkstra", "Go To Statement Considered Harmful"]
    );
    assert_eq!(all[1].citation_key(), Some("Dijkstra1968"));
}

#[test]
fn search_derived_records() {
    let library = papers();

    let hits = search("journaltitle=computer", SearchFlags::empty(), &library);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].key, "Knuth1984");

    let hits = search("harmful and author=dijkstra", SearchFlags::empty(), &library);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].key, "Dijkstra1968");

    assert!(search("Knuth1984", SearchFlags::empty(), &library).is_empty());
    assert!(search("knuth", SearchFlag::CaseSensitive.into(), &library).is_empty());
}

#[test]
fn borrowed_fields() {
    let notes = [Note { body: "read later" }, Note { body: "cite this" }];
    let hits = search("body=cite", SearchFlags::empty(), &notes);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].citation_key(), None);
}

#[test]
fn raw_identifier_fields() {
    assert_eq!(Item::TYPE, "type");

    let items = [
        Item { r#type: "article".into() },
        Item { r#type: "book".into() },
    ];
    let hits = search("type=book", SearchFlags::empty(), &items);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].field_value("type"), Some("book"));
}
