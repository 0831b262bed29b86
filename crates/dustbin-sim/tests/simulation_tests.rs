use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Result, bail};
use dustbin_core::{BinKind, UploadEncoding};
use dustbin_sim::upload::encode_body;
use dustbin_sim::{CategoryResult, Dataset, Reply, Simulation, SimulationConfig, Summary, Uploader};
use rand::SeedableRng;
use rand::rngs::StdRng;

const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x01, 0xFF, 0xD9];

#[derive(Default)]
struct ScriptedUploader {
    replies: RefCell<VecDeque<Result<Reply>>>,
    uploads: RefCell<Vec<Vec<u8>>>,
}

impl ScriptedUploader {
    fn reply(self, status: u16, body: &str) -> Self {
        self.replies.borrow_mut().push_back(Ok(Reply {
            status,
            body: body.as_bytes().to_vec(),
        }));
        self
    }

    fn fail(self) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Err(anyhow::anyhow!("connection refused")));
        self
    }
}

impl Uploader for &ScriptedUploader {
    fn upload(&self, jpeg: &[u8]) -> Result<Reply> {
        self.uploads.borrow_mut().push(jpeg.to_vec());
        match self.replies.borrow_mut().pop_front() {
            Some(reply) => reply,
            None => bail!("no scripted reply"),
        }
    }
}

fn write_image(dir: &Path, category: &str, name: &str) {
    let category = dir.join(category);
    fs::create_dir_all(&category).unwrap();
    fs::write(category.join(name), JPEG).unwrap();
}

fn quick() -> SimulationConfig {
    SimulationConfig {
        pause: Duration::ZERO,
    }
}

fn run(dataset: &Path, uploader: &ScriptedUploader) -> Summary {
    let dataset = Dataset::open(dataset).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    Simulation::new(dataset, uploader, quick()).run(&mut rng).unwrap()
}

#[test]
fn dataset_lists_categories_sorted() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "plastic", "b.jpg");
    write_image(dir.path(), "plastic", "a.jpg");
    write_image(dir.path(), "battery", "x.jpg");
    fs::create_dir(dir.path().join("empty")).unwrap();
    fs::write(dir.path().join("README"), "not a category").unwrap();

    let categories = Dataset::open(dir.path()).unwrap().categories().unwrap();
    let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["battery", "empty", "plastic"]);
    assert!(categories[1].files.is_empty());
    assert!(categories[2].files[0].ends_with("a.jpg"));
    assert!(categories[2].files[1].ends_with("b.jpg"));
}

#[test]
fn dataset_rejects_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Dataset::open(dir.path().join("nope")).is_err());
}

#[test]
fn one_upload_per_category() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "battery", "1.jpg");
    write_image(dir.path(), "plastic", "1.jpg");
    write_image(dir.path(), "plastic", "2.jpg");

    let uploader = ScriptedUploader::default()
        .reply(200, r#"{"status":"success","class":"battery","command":"Trash"}"#)
        .reply(200, r#"{"status":"success","class":"plastic","command":"Recycle"}"#);
    let summary = run(dir.path(), &uploader);

    assert_eq!(uploader.uploads.borrow().len(), 2);
    assert!(uploader.uploads.borrow().iter().all(|u| u == JPEG));
    assert_eq!(
        summary,
        Summary {
            uploads: 2,
            correct: 2,
            recycle: 1,
            general: 1,
            ..Summary::default()
        }
    );
    assert_eq!(summary.accuracy(), Some(100.0));
}

#[test]
fn wrong_class_counts_as_incorrect() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "glass", "1.jpg");

    let uploader = ScriptedUploader::default()
        .reply(200, r#"{"status":"success","class":"paper","command":"Recycle"}"#);
    let summary = run(dir.path(), &uploader);

    assert_eq!(summary.correct, 0);
    assert_eq!(summary.incorrect, 1);
    assert_eq!(summary.recycle, 1);
    assert_eq!(summary.accuracy(), Some(0.0));
}

#[test]
fn errors_do_not_stop_the_run() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "cardboard", "1.jpg");
    fs::create_dir(dir.path().join("clothes")).unwrap();
    write_image(dir.path(), "metal", "1.jpg");
    write_image(dir.path(), "paper", "1.jpg");

    let uploader = ScriptedUploader::default()
        .fail()
        .reply(500, r#"{"error":"model not loaded"}"#)
        .reply(200, r#"{"status":"success","class":"paper","command":"Recycle"}"#);
    let summary = run(dir.path(), &uploader);

    assert_eq!(
        summary,
        Summary {
            uploads: 2,
            correct: 1,
            recycle: 1,
            rejected: 1,
            failed: 1,
            skipped: 1,
            ..Summary::default()
        }
    );
}

#[test]
fn unparseable_success_reply_still_sorts() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "plastic", "1.jpg");

    let uploader = ScriptedUploader::default().reply(200, "Recycle, probably");
    let summary = run(dir.path(), &uploader);

    assert_eq!(summary.recycle, 1);
    assert_eq!(summary.incorrect, 1);
    assert_eq!(summary.accuracy(), Some(0.0));
}

#[test]
fn empty_dataset_has_no_accuracy() {
    let dir = tempfile::tempdir().unwrap();
    let uploader = ScriptedUploader::default();
    let summary = run(dir.path(), &uploader);

    assert_eq!(summary, Summary::default());
    assert_eq!(summary.accuracy(), None);
}

#[test]
fn classified_result_fields() {
    let result = CategoryResult::Classified {
        file: "plastic/1.jpg".into(),
        class: Some("plastic".into()),
        command: Some("Recycle".into()),
        bin: BinKind::from_reply(200, br#"{"command":"Recycle"}"#),
        correct: true,
    };
    assert!(matches!(
        result,
        CategoryResult::Classified {
            bin: BinKind::Recycle,
            ..
        }
    ));
}

#[test]
fn encode_body_matches_firmware_framing() {
    assert_eq!(encode_body(UploadEncoding::RawJpeg, JPEG), JPEG);

    let multipart = encode_body(UploadEncoding::Multipart, JPEG);
    assert_eq!(multipart.len(), UploadEncoding::Multipart.body_len(JPEG.len()));
    assert!(multipart.starts_with(UploadEncoding::Multipart.prefix()));
    assert!(multipart.ends_with(UploadEncoding::Multipart.suffix()));
}
