// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! GET /api/export/:session_id

use super::support::*;
use axum::http::{header, StatusCode};
use hardware_scanner::{
    api::http_server::{create_app, AppState},
    export::{HEADERS, XLSX_CONTENT_TYPE},
    session::HardwareInfo,
};
use serde_json::json;
use std::io::{Cursor, Read};

fn read_part(xlsx: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(xlsx)).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut content = String::new();
    part.read_to_string(&mut content).unwrap();
    content
}

#[tokio::test]
async fn test_export_has_header_plus_one_row_per_scan() {
    let app = create_app(state_with(StubExtractor::returning(ddr4_stick())).await);

    for _ in 0..3 {
        send_json(
            app.clone(),
            json_request(
                "POST",
                "/api/process-image",
                json!({"session_id": "rack-9", "image_base64": png_base64()}),
            ),
        )
        .await;
    }

    let (status, headers, body) = send(app, empty_request("GET", "/api/export/rack-9")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], XLSX_CONTENT_TYPE);
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=hardware_inventory_rack-9.xlsx"
    );

    let sheet = read_part(&body, "xl/worksheets/sheet1.xml");
    assert_eq!(sheet.matches("<row ").count(), 4);

    let strings = read_part(&body, "xl/sharedStrings.xml");
    for header in HEADERS {
        assert!(
            strings.contains(&format!("<t>{}</t>", header)),
            "missing header {}",
            header
        );
    }
    assert!(strings.contains("Kingston"));

    let workbook = read_part(&body, "xl/workbook.xml");
    assert!(workbook.contains("Hardware Inventory"));
}

/// XML of one cell, e.g. `cell_xml(sheet, "A2")`
fn cell_xml<'a>(sheet: &'a str, cell_ref: &str) -> &'a str {
    let start = sheet
        .find(&format!("<c r=\"{}\"", cell_ref))
        .unwrap_or_else(|| panic!("cell {} missing", cell_ref));
    let end = start + sheet[start..].find("</c>").unwrap();
    &sheet[start..end]
}

#[tokio::test]
async fn test_export_layout() {
    let stick = HardwareInfo {
        brand: "Kingston FURY Beast RGB 32G".to_string(),
        ..ddr4_stick()
    };
    let app = create_app(state_with(StubExtractor::returning(stick)).await);

    for _ in 0..2 {
        send_json(
            app.clone(),
            json_request(
                "POST",
                "/api/process-image",
                json!({"session_id": "layout", "image_base64": png_base64()}),
            ),
        )
        .await;
    }

    let (status, _, body) = send(app, empty_request("GET", "/api/export/layout")).await;
    assert_eq!(status, StatusCode::OK);

    let sheet = read_part(&body, "xl/worksheets/sheet1.xml");

    // Brand column: 27 characters plus 2
    assert!(sheet.contains(r#"<col min="2" max="2" width="29.71"#), "{}", sheet);

    // Rows are numbered from 1 as numbers
    assert!(cell_xml(&sheet, "A2").contains("<v>1</v>"));
    assert!(cell_xml(&sheet, "A3").contains("<v>2</v>"));
    assert!(!cell_xml(&sheet, "A2").contains(r#"t="s""#));

    // Header cells carry the bold format
    assert!(cell_xml(&sheet, "A1").contains(" s=\""));
    assert!(cell_xml(&sheet, "F1").contains(" s=\""));
    let styles = read_part(&body, "xl/styles.xml");
    assert!(styles.contains("<b/>"));
}

#[tokio::test]
async fn test_export_unknown_session() {
    let app = create_app(AppState::new_for_test());
    let (status, body) = send_json(app, empty_request("GET", "/api/export/ghost")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Session not found");
}

#[tokio::test]
async fn test_export_empty_session() {
    let app = create_app(AppState::new_for_test());
    send_json(
        app.clone(),
        json_request("POST", "/api/start-session", json!({"session_id": "blank"})),
    )
    .await;

    let (status, body) = send_json(app, empty_request("GET", "/api/export/blank")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No items to export");
}
