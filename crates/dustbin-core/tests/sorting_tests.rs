//! Tests for the capture, send, inspect, actuate cycle.

use embassy_futures::block_on;
use embedded_hal_async::delay::DelayNs;

use dustbin_core::{
    BinActuator, BinKind, Classifier, ClassifierReply, Delivery, Frame, FrameSource, Material,
    ServoAngle, SortingError, SortingUsecases,
};

const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0xFF, 0xD9];

struct FakeCamera {
    fail: bool,
    captures: usize,
}

impl FrameSource for FakeCamera {
    type Error = &'static str;

    async fn capture(&mut self) -> Result<Frame<'_>, Self::Error> {
        self.captures += 1;
        if self.fail {
            return Err("no frame");
        }
        Frame::new(JPEG).map_err(|_| "bad frame")
    }
}

struct FakeClassifier {
    reply: Option<(u16, Vec<u8>)>,
    uploads: Vec<usize>,
}

impl FakeClassifier {
    fn replying(status: u16, body: &[u8]) -> Self {
        Self {
            reply: Some((status, body.to_vec())),
            uploads: Vec::new(),
        }
    }

    fn unreachable() -> Self {
        Self {
            reply: None,
            uploads: Vec::new(),
        }
    }
}

impl Classifier for FakeClassifier {
    type Error = &'static str;

    async fn classify(&mut self, frame: Frame<'_>) -> Result<ClassifierReply<'_>, Self::Error> {
        self.uploads.push(frame.len());
        match &self.reply {
            Some((status, body)) => Ok(ClassifierReply {
                status: *status,
                body,
            }),
            None => Err("connection refused"),
        }
    }
}

#[derive(Default)]
struct FakeServo {
    moves: Vec<ServoAngle>,
    fail: bool,
}

impl BinActuator for FakeServo {
    type Error = &'static str;

    async fn move_to(&mut self, angle: ServoAngle) -> Result<(), Self::Error> {
        if self.fail {
            return Err("pwm error");
        }
        self.moves.push(angle);
        Ok(())
    }
}

#[derive(Default)]
struct RecordingDelay {
    total_ns: u64,
}

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

fn camera() -> FakeCamera {
    FakeCamera {
        fail: false,
        captures: 0,
    }
}

#[test]
fn recycle_reply_moves_servo_to_ninety() {
    let body = br#"{"status":"success","class":"cardboard","bin":"Recycle","command":"OPEN_RECYCLE"}"#;
    let mut usecases = SortingUsecases::new(
        camera(),
        FakeClassifier::replying(200, body),
        FakeServo::default(),
    );

    let outcome = block_on(usecases.sort_once()).unwrap();

    assert_eq!(outcome.bin, BinKind::Recycle);
    assert_eq!(outcome.angle, ServoAngle::new(90));
    assert_eq!(outcome.delivery, Delivery::Delivered(200));
    assert_eq!(outcome.material, Some(Material::Cardboard));
    assert!(outcome.actuated);
    assert_eq!(usecases.stats().recycle, 1);

    let (_, classifier, servo) = usecases.into_parts();
    assert_eq!(classifier.uploads, vec![JPEG.len()]);
    assert_eq!(servo.moves, vec![ServoAngle::new(90)]);
}

#[test]
fn other_reply_moves_servo_to_zero() {
    let mut usecases = SortingUsecases::new(
        camera(),
        FakeClassifier::replying(200, b"General"),
        FakeServo::default(),
    );

    let outcome = block_on(usecases.sort_once()).unwrap();

    assert_eq!(outcome.bin, BinKind::General);
    assert_eq!(outcome.angle, ServoAngle::new(0));
    assert_eq!(outcome.material, None);
    assert_eq!(usecases.stats().general, 1);
}

#[test]
fn error_page_moves_servo_to_zero() {
    let mut usecases = SortingUsecases::new(
        camera(),
        FakeClassifier::replying(500, br#"{"error":"Recycle quota exceeded"}"#),
        FakeServo::default(),
    );

    let outcome = block_on(usecases.sort_once()).unwrap();

    assert_eq!(outcome.bin, BinKind::General);
    assert_eq!(outcome.delivery, Delivery::Delivered(500));
}

#[test]
fn failed_upload_does_not_crash_and_selects_general() {
    let mut usecases = SortingUsecases::new(
        camera(),
        FakeClassifier::unreachable(),
        FakeServo::default(),
    );

    let outcome = block_on(usecases.sort_once()).unwrap();

    assert_eq!(outcome.bin, BinKind::General);
    assert_eq!(outcome.angle, ServoAngle::new(0));
    assert_eq!(outcome.delivery, Delivery::Failed);
    assert_eq!(usecases.stats().delivery_failures, 1);
    assert_eq!(usecases.stats().general, 1);

    let (_, _, servo) = usecases.into_parts();
    assert_eq!(servo.moves, vec![ServoAngle::new(0)]);
}

#[test]
fn failed_capture_skips_upload_and_servo() {
    let mut usecases = SortingUsecases::new(
        FakeCamera {
            fail: true,
            captures: 0,
        },
        FakeClassifier::replying(200, b"Recycle"),
        FakeServo::default(),
    );

    let result = block_on(usecases.sort_once());

    assert!(matches!(result, Err(SortingError::Capture("no frame"))));
    let stats = *usecases.stats();
    assert_eq!(stats.cycles, 1);
    assert_eq!(stats.capture_failures, 1);
    assert_eq!(stats.sorted(), 0);

    let (camera, classifier, servo) = usecases.into_parts();
    assert_eq!(camera.captures, 1);
    assert!(classifier.uploads.is_empty());
    assert!(servo.moves.is_empty());
}

#[test]
fn servo_failure_is_reported_not_fatal() {
    let mut usecases = SortingUsecases::new(
        camera(),
        FakeClassifier::replying(200, b"Recycle"),
        FakeServo {
            moves: Vec::new(),
            fail: true,
        },
    );

    let outcome = block_on(usecases.sort_once()).unwrap();

    assert!(!outcome.actuated);
    assert_eq!(outcome.bin, BinKind::Recycle);
    assert_eq!(usecases.stats().actuation_failures, 1);
}

#[test]
fn each_cycle_waits_at_least_five_seconds() {
    let mut usecases = SortingUsecases::new(
        camera(),
        FakeClassifier::unreachable(),
        FakeServo::default(),
    );
    let mut delay = RecordingDelay::default();

    for cycle in 1..=3u64 {
        let _ = block_on(usecases.sort_and_wait(&mut delay));
        assert!(delay.total_ns >= cycle * 5_000_000_000);
    }
    assert_eq!(usecases.stats().cycles, 3);
}

#[test]
fn failed_capture_still_waits() {
    let mut usecases = SortingUsecases::new(
        FakeCamera {
            fail: true,
            captures: 0,
        },
        FakeClassifier::unreachable(),
        FakeServo::default(),
    )
    .with_interval_ms(7_000);
    let mut delay = RecordingDelay::default();

    let result = block_on(usecases.sort_and_wait(&mut delay));

    assert!(result.is_err());
    assert_eq!(delay.total_ns, 7_000_000_000);
}

#[test]
fn alternating_replies_track_counts() {
    let mut usecases = SortingUsecases::new(
        camera(),
        FakeClassifier::replying(200, b"Recycle"),
        FakeServo::default(),
    );
    for _ in 0..2 {
        block_on(usecases.sort_once()).unwrap();
    }

    let stats = *usecases.stats();
    assert_eq!(stats.recycle, 2);
    assert_eq!(stats.sorted(), 2);
    assert_eq!(stats.cycles, 2);
}
