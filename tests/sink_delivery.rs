// Integration tests for record delivery ordering through the sink port.

use arealift::area::Area;
use arealift::sink::{MemorySink, SinkRecord};

mod common;
use common::{mud_school, to_lines};

fn kind_rank(record: &SinkRecord) -> usize {
    match record {
        SinkRecord::Area(_) => 0,
        SinkRecord::Room(_) => 1,
        SinkRecord::Mobile(_) => 2,
        SinkRecord::Item(_) => 3,
        SinkRecord::Shop(_) => 4,
        SinkRecord::Reset(_) => 5,
        SinkRecord::Special(_) => 6,
    }
}

#[tokio::test]
async fn records_arrive_in_dependency_order() {
    let area = Area::from_lines(&to_lines(&mud_school()));
    let sink = MemorySink::new();

    let failures = area.deliver(&sink).await;
    assert_eq!(failures, 0);

    let records = sink.records().await;
    assert_eq!(records.len(), 1 + 2 + 1 + 1 + 1 + 2 + 1);

    // The area record leads, and no kind starts before the previous kind
    // has fully drained.
    assert!(matches!(records[0], SinkRecord::Area(_)));
    let ranks: Vec<usize> = records.iter().map(kind_rank).collect();
    assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn children_reference_the_delivered_area() {
    let area = Area::from_lines(&to_lines(&mud_school()));
    let sink = MemorySink::new();
    area.deliver(&sink).await;

    let records = sink.records().await;
    let area_id = match &records[0] {
        SinkRecord::Area(a) => a.id,
        other => panic!("expected the area first, got {:?}", other),
    };
    for record in &records[1..] {
        let child_area_id = match record {
            SinkRecord::Room(r) => r.area_id,
            SinkRecord::Mobile(m) => m.area_id,
            SinkRecord::Item(i) => i.area_id,
            SinkRecord::Shop(s) => s.area_id,
            SinkRecord::Reset(r) => r.area_id,
            SinkRecord::Special(s) => s.area_id,
            SinkRecord::Area(a) => panic!("second area record {}", a.id),
        };
        assert_eq!(child_area_id, area_id);
    }
}

#[tokio::test]
async fn load_reads_a_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("school.are");
    std::fs::write(&path, mud_school()).unwrap();

    let area = Area::load(&path).await.unwrap();
    assert_eq!(area.area.name.as_deref(), Some("The Mud School"));
    assert_eq!(area.area.author.as_deref(), Some("Merc"));
    assert_eq!(area.area.suggested_level_range.as_deref(), Some("5 35"));
    assert_eq!(area.rooms.len(), 2);
    assert_eq!(area.shops.len(), 1);
}

#[tokio::test]
async fn load_fails_only_for_unreadable_files() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.are");
    assert!(Area::load(&missing).await.is_err());
}
