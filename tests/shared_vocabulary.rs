//! 并发评级与词表热替换.

use std::sync::Arc;
use std::thread;

use rayon::prelude::*;

use dpres::core::Grade;
use dpres::format::{ContainerTable, FormatTable, FormatVersionEntry, SharedVocabulary, Vocabulary};
use dpres::grading::{Grader, StreamDescriptor, StreamMap, Verdict};

fn pdf_only(grade: Grade) -> Vocabulary {
    let formats = FormatTable::new(vec![FormatVersionEntry::new(
        "application/pdf",
        "A-1a",
        grade,
    )]);
    Vocabulary::new(formats, ContainerTable::default())
}

#[test]
fn test_并行评级结果一致() {
    let _ = env_logger::builder().is_test(true).try_init();

    let grader = dpres::default_grader().unwrap();
    let streams = StreamMap::from([
        (0, StreamDescriptor::new("video/mp4", "(:unap)")),
        (1, StreamDescriptor::new("audio/mpeg", "2")),
        (2, StreamDescriptor::new("video/h264", "(:unap)")),
    ]);
    let verdicts: Vec<Verdict> = (0..256)
        .into_par_iter()
        .map(|_| {
            grader
                .grade(Some("video/mp4"), "(:unap)", &streams)
                .unwrap()
        })
        .collect();
    assert!(
        verdicts
            .iter()
            .all(|v| *v == Verdict::Graded(Grade::Acceptable))
    );
}

#[test]
fn test_替换词表不影响已取得的快照() {
    let shared = Arc::new(SharedVocabulary::new(pdf_only(Grade::Acceptable)));
    let before = Grader::new(shared.snapshot());

    let old = shared.replace(pdf_only(Grade::Recommended));
    assert_eq!(
        old.formats
            .find("application/pdf", "A-1a")
            .map(|entry| entry.grade),
        Some(Grade::Acceptable)
    );

    let after = Grader::new(shared.snapshot());
    let streams = StreamMap::new();
    assert_eq!(
        before
            .grade(Some("application/pdf"), "A-1a", &streams)
            .unwrap(),
        Verdict::Graded(Grade::Acceptable)
    );
    assert_eq!(
        after
            .grade(Some("application/pdf"), "A-1a", &streams)
            .unwrap(),
        Verdict::Graded(Grade::Recommended)
    );
}

#[test]
fn test_并发读取与替换() {
    let shared = Arc::new(SharedVocabulary::new(pdf_only(Grade::Acceptable)));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for _ in 0..200 {
                    let grader = Grader::new(shared.snapshot());
                    let verdict = grader
                        .grade(Some("application/pdf"), "A-1a", &StreamMap::new())
                        .unwrap();
                    // 每次评级只看到某一个完整的快照
                    assert!(matches!(
                        verdict,
                        Verdict::Graded(Grade::Acceptable | Grade::Recommended)
                    ));
                }
            })
        })
        .collect();

    for i in 0..50 {
        let grade = if i % 2 == 0 {
            Grade::Recommended
        } else {
            Grade::Acceptable
        };
        shared.replace(pdf_only(grade));
    }

    for reader in readers {
        reader.join().unwrap();
    }
}
