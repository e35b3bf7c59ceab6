mod common;

use std::io::{Cursor, Read};

use axum::http::{header, StatusCode};

use common::*;

fn read_zip_entry(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).expect("zip");
    let mut entry = archive.by_name(name).expect(name);
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    content
}

#[tokio::test]
async fn docx_export_contains_all_slide_titles_in_order() {
    let app = app_with_slides(4);
    let token = register_user(&app, "alice@example.com").await;
    let id = generate_deck(&app, &token, "Climate Change", 4).await;

    let (status, headers, bytes) = send_raw(
        &app,
        request(
            "GET",
            &format!("/api/presentations/{id}/export?format=docx"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.contains("attachment"));
    assert!(disposition.contains("Climate Change.docx"));

    let xml = read_zip_entry(&bytes, "word/document.xml");
    let mut last = 0;
    for i in 1..=4 {
        let pos = xml
            .find(&format!("{i}. Slide {i}"))
            .unwrap_or_else(|| panic!("slide {i} title missing"));
        assert!(pos > last, "slide {i} out of order");
        last = pos;
        assert!(xml.contains(&format!("Body {i}")));
    }
}

#[tokio::test]
async fn pptx_export_has_one_part_per_slide_with_matching_text() {
    let app = app_with_slides(3);
    let token = register_user(&app, "alice@example.com").await;
    let id = generate_deck(&app, &token, "Deck", 3).await;

    let (status, headers, bytes) = send_raw(
        &app,
        request(
            "GET",
            &format!("/api/presentations/{id}/export?format=pptx"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.presentationml.presentation"
    );

    for i in 1..=3 {
        let xml = read_zip_entry(&bytes, &format!("ppt/slides/slide{i}.xml"));
        assert!(xml.contains(&format!("<a:t>Slide {i}</a:t>")), "slide {i}");
        assert!(xml.contains(&format!("Body {i}")), "slide {i} body");
    }

    // default format is pptx
    let (status, headers, _) = send_raw(
        &app,
        request(
            "GET",
            &format!("/api/presentations/{id}/export"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .contains("presentationml"));
}

#[tokio::test]
async fn pdf_export_streams_a_pdf_or_fails_loudly_without_fonts() {
    let app = app_with_slides(3);
    let token = register_user(&app, "alice@example.com").await;
    let id = generate_deck(&app, &token, "Deck", 3).await;

    let (status, headers, bytes) = send_raw(
        &app,
        request(
            "GET",
            &format!("/api/presentations/{id}/export?format=pdf"),
            Some(&token),
            None,
        ),
    )
    .await;
    match status {
        StatusCode::OK => {
            assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
            assert!(bytes.starts_with(b"%PDF-"));
        }
        // Hosts without the Liberation fonts get a structured error,
        // never a truncated file
        StatusCode::INTERNAL_SERVER_ERROR => {
            let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["success"], false);
        }
        other => panic!("unexpected status {other}"),
    }
}

#[tokio::test]
async fn unknown_format_is_rejected() {
    let app = app_with_slides(3);
    let token = register_user(&app, "alice@example.com").await;
    let id = generate_deck(&app, &token, "Deck", 3).await;

    let (status, body) = send(
        &app,
        request(
            "GET",
            &format!("/api/presentations/{id}/export?format=odp"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn export_of_missing_presentation_is_404() {
    let app = app_with_slides(3);
    let token = register_user(&app, "alice@example.com").await;

    let (status, _) = send(
        &app,
        request(
            "GET",
            "/api/presentations/no-such-id/export?format=docx",
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn edited_slides_flow_through_to_export() {
    let app = app_with_slides(3);
    let token = register_user(&app, "alice@example.com").await;
    let id = generate_deck(&app, &token, "Deck", 3).await;

    let (status, _) = send(
        &app,
        request(
            "PUT",
            &format!("/api/presentations/{id}"),
            Some(&token),
            Some(serde_json::json!({
                "slides": [
                    { "title": "Rewritten opener", "content": "Fresh words." },
                    { "title": "Rewritten closer", "content": "Final words." },
                ],
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, bytes) = send_raw(
        &app,
        request(
            "GET",
            &format!("/api/presentations/{id}/export?format=docx"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let xml = read_zip_entry(&bytes, "word/document.xml");
    assert!(xml.contains("Rewritten opener"));
    assert!(xml.contains("Final words."));
    assert!(!xml.contains("Slide 3"), "stale slide rows survived the edit");
}
