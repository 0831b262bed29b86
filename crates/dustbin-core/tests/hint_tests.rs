//! Tests for the bin decision taken from a classifier reply.

use dustbin_core::{BinKind, BinPositions, ClassificationReport, Material, ServoAngle};

#[test]
fn recycle_anywhere_in_body_selects_recycle_bin() {
    let bodies: [&[u8]; 4] = [
        b"Recycle",
        br#"{"status":"success","class":"paper","bin":"Recycle","command":"OPEN_RECYCLE"}"#,
        b"prefix garbage Recycle",
        b"Recycle\0\xff trailing binary",
    ];
    for body in bodies {
        assert_eq!(BinKind::from_reply(200, body), BinKind::Recycle);
    }
}

#[test]
fn other_bodies_select_general_bin() {
    let bodies: [&[u8]; 6] = [
        b"",
        b"General",
        br#"{"status":"success","class":"trash","bin":"General","command":"OPEN_GENERAL"}"#,
        b"{not json",
        b"recycle",
        b"<html><body>502 Bad Gateway</body></html>",
    ];
    for body in bodies {
        assert_eq!(BinKind::from_reply(200, body), BinKind::General);
    }
}

#[test]
fn error_status_selects_general_even_with_token() {
    assert_eq!(BinKind::from_reply(500, b"Recycle"), BinKind::General);
    assert_eq!(BinKind::from_reply(400, br#"{"error":"No file uploaded"}"#), BinKind::General);
    assert_eq!(BinKind::from_reply(302, b"Recycle"), BinKind::General);
}

#[test]
fn any_success_status_is_inspected() {
    assert_eq!(BinKind::from_reply(201, b"Recycle"), BinKind::Recycle);
    assert_eq!(BinKind::from_reply(299, b"Recycle"), BinKind::Recycle);
}

#[test]
fn bins_map_to_fixed_servo_positions() {
    let positions = BinPositions::default();
    assert_eq!(BinKind::Recycle.target_angle(&positions), ServoAngle::new(90));
    assert_eq!(BinKind::General.target_angle(&positions), ServoAngle::new(0));
}

// -----------------------------------------------------------------------------
// Report parsing
// -----------------------------------------------------------------------------

#[test]
fn report_parses_backend_reply() {
    let body = br#"{"status":"success","class":"brown-glass","bin":"Recycle","command":"OPEN_RECYCLE"}"#;
    let report = ClassificationReport::parse(body).unwrap();

    assert_eq!(report.status, Some("success"));
    assert_eq!(report.class, Some("brown-glass"));
    assert_eq!(report.bin, Some("Recycle"));
    assert_eq!(report.command, Some("OPEN_RECYCLE"));
    assert_eq!(report.material(), Some(Material::BrownGlass));
}

#[test]
fn report_parses_error_reply() {
    let report = ClassificationReport::parse(br#"{"error":"No file uploaded"}"#).unwrap();

    assert_eq!(report.error, Some("No file uploaded"));
    assert_eq!(report.class, None);
    assert_eq!(report.material(), None);
}

#[test]
fn report_rejects_non_json() {
    assert!(ClassificationReport::parse(b"Recycle").is_none());
    assert!(ClassificationReport::parse(b"").is_none());
}

#[test]
fn unknown_class_has_no_material() {
    let report = ClassificationReport::parse(br#"{"class":"a banana"}"#).unwrap();
    assert_eq!(report.material(), None);
}
