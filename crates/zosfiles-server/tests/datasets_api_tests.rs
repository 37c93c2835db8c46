//! Data set API integration tests
//!
//! These tests drive the full router through a real `HttpConnector` against
//! a `wiremock` z/OSMF and verify:
//! - Outbound paths, query strings, headers and bodies
//! - Credentials and the z/OSMF CSRF header on every call
//! - Response DTOs, `ETag` and `Location` headers
//! - Failure classification (404, 409, 412, 403)

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use wiremock::matchers::{
    basic_auth, body_json, body_partial_json, body_string, header as header_is, header_exists,
    method, path, query_param,
};
use wiremock::{Mock, ResponseTemplate};

mod common;
use common::{restfiles, TestZosmf, TEST_PASSWORD, TEST_USER};

// ============================================================================
// Queries
// ============================================================================

#[tokio::test]
async fn test_list_attributes_sends_credentials_and_csrf_header() {
    let zosmf = TestZosmf::start().await;

    Mock::given(method("GET"))
        .and(path(restfiles("ds")))
        .and(query_param("dslevel", "STEVENH.*"))
        .and(header_is("x-ibm-attributes", "base"))
        .and(header_exists("x-csrf-zosmf-header"))
        .and(basic_auth(TEST_USER, TEST_PASSWORD))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "dsname": "STEVENH.TEST.JCL",
                    "blksz": "27920",
                    "dsorg": "PO-E",
                    "lrecl": "80",
                    "recfm": "FB",
                    "vol": "USR001",
                    "migr": "NO"
                },
                { "dsname": "STEVENH.ARCHIVE", "migr": "YES", "vol": "MIGRAT" }
            ],
            "returnedRows": 2
        })))
        .expect(1)
        .mount(&zosmf.server)
        .await;

    let (status, _, body) = zosmf.get("/api/v2/datasets/STEVENH.*").await;

    assert_eq!(status, StatusCode::OK);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "STEVENH.TEST.JCL");
    assert_eq!(items[0]["dataSetOrganization"], "PO-E");
    assert_eq!(items[0]["recordLength"], 80);
    assert_eq!(items[1]["migrated"], true);
}

#[tokio::test]
async fn test_list_names_uses_dsname_attributes() {
    let zosmf = TestZosmf::start().await;

    Mock::given(method("GET"))
        .and(path(restfiles("ds")))
        .and(query_param("dslevel", "SYS1.PROC*"))
        .and(header_is("x-ibm-attributes", "dsname"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "dsname": "SYS1.PROCLIB" }]
        })))
        .expect(1)
        .mount(&zosmf.server)
        .await;

    let (status, _, body) = zosmf.get("/api/v2/datasets/SYS1.PROC*/list").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "items": [{ "name": "SYS1.PROCLIB" }] }));
}

#[tokio::test]
async fn test_list_members_forwards_ibm_headers() {
    let zosmf = TestZosmf::start().await;

    Mock::given(method("GET"))
        .and(path(restfiles("ds/STEVENH.TEST.JCL/member")))
        .and(header_is("x-ibm-max-items", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "member": "IEFBR14" }, { "member": "SORT" }],
            "returnedRows": 2
        })))
        .expect(1)
        .mount(&zosmf.server)
        .await;

    let (status, _, body) = zosmf
        .send(
            Request::builder()
                .uri("/api/v2/datasets/STEVENH.TEST.JCL/members")
                .header("X-IBM-Max-Items", "0")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "items": ["IEFBR14", "SORT"] }));
}

#[tokio::test]
async fn test_list_members_of_uncataloged_data_set() {
    let zosmf = TestZosmf::start().await;

    Mock::given(method("GET"))
        .and(path(restfiles("ds/NO.SUCH.PDS/member")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "category": 4,
            "rc": 8,
            "reason": 0,
            "message": "Request failed",
            "details": ["ISRZ002 Data set not cataloged - 'NO.SUCH.PDS'."]
        })))
        .mount(&zosmf.server)
        .await;

    let (status, _, body) = zosmf.get("/api/v2/datasets/NO.SUCH.PDS/members").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "status": 404, "message": "Data set 'NO.SUCH.PDS' not found" })
    );
}

#[tokio::test]
async fn test_get_member_content_returns_records_and_etag() {
    let zosmf = TestZosmf::start().await;

    Mock::given(method("GET"))
        .and(path(restfiles("ds/STEVENH.TEST.JCL(IEFBR14)")))
        .and(header_is("x-ibm-return-etag", "true"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/plain")
                .insert_header("etag", "\"6E4A7D0F1C8B2A93\"")
                .set_body_string("//IEFBR14 JOB\n//STEP1 EXEC PGM=IEFBR14\n"),
        )
        .expect(1)
        .mount(&zosmf.server)
        .await;

    let (status, headers, body) = zosmf
        .get("/api/v2/datasets/STEVENH.TEST.JCL(IEFBR14)/content")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::ETAG], "\"6E4A7D0F1C8B2A93\"");
    assert_eq!(
        body,
        json!({ "records": "//IEFBR14 JOB\n//STEP1 EXEC PGM=IEFBR14\n" })
    );
}

#[tokio::test]
async fn test_get_content_of_locked_data_set() {
    let zosmf = TestZosmf::start().await;

    Mock::given(method("GET"))
        .and(path(restfiles("ds/STEVENH.BUSY.DATA")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "category": 6,
            "rc": 4,
            "message": "Data set STEVENH.BUSY.DATA in use, locked by job TSOJOB1 on system SYSA with ASID 0x0042"
        })))
        .mount(&zosmf.server)
        .await;

    let (status, _, body) = zosmf.get("/api/v2/datasets/STEVENH.BUSY.DATA/content").await;

    assert_eq!(status, StatusCode::CONFLICT);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("TSOJOB1"));
    assert!(message.contains("SYSA"));
}

// ============================================================================
// Commands
// ============================================================================

#[tokio::test]
async fn test_put_content_sends_text_and_if_match() {
    let zosmf = TestZosmf::start().await;

    Mock::given(method("PUT"))
        .and(path(restfiles("ds/STEVENH.TEST.JCL(IEFBR14)")))
        .and(header_is("if-match", "6E4A7D0F1C8B2A93"))
        .and(header_exists("x-csrf-zosmf-header"))
        .and(body_string("//NEW JOB\n"))
        .respond_with(ResponseTemplate::new(204).insert_header("etag", "\"0D1E2F\""))
        .expect(1)
        .mount(&zosmf.server)
        .await;

    let (status, headers, body) = zosmf
        .send(
            Request::builder()
                .method("PUT")
                .uri("/api/v2/datasets/STEVENH.TEST.JCL(IEFBR14)/content")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::IF_MATCH, "\"6E4A7D0F1C8B2A93\"")
                .body(Body::from(json!({ "records": "//NEW JOB\n" }).to_string()))
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(headers[header::ETAG], "\"0D1E2F\"");
    assert!(body.is_null());
}

#[tokio::test]
async fn test_put_content_with_stale_etag() {
    let zosmf = TestZosmf::start().await;

    Mock::given(method("PUT"))
        .and(path(restfiles("ds/STEVENH.TEST.JCL(IEFBR14)")))
        .respond_with(ResponseTemplate::new(412))
        .mount(&zosmf.server)
        .await;

    let (status, _, body) = zosmf
        .send(
            Request::builder()
                .method("PUT")
                .uri("/api/v2/datasets/STEVENH.TEST.JCL(IEFBR14)/content")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::IF_MATCH, "\"OLD\"")
                .body(Body::from(json!({ "records": "x" }).to_string()))
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(body["status"], 412);
}

#[tokio::test]
async fn test_create_partitioned_data_set() {
    let zosmf = TestZosmf::start().await;

    Mock::given(method("POST"))
        .and(path(restfiles("ds/STEVENH.NEW.JCL")))
        .and(header_exists("x-csrf-zosmf-header"))
        .and(body_partial_json(json!({
            "dsorg": "PO",
            "primary": 10,
            "dirblk": 20,
            "lrecl": 80
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&zosmf.server)
        .await;

    let (status, headers, _) = zosmf
        .send_json(
            "POST",
            "/api/v2/datasets",
            json!({
                "name": "STEVENH.NEW.JCL",
                "dataSetOrganization": "PO",
                "primary": 10,
                "directoryBlocks": 20,
                "recordLength": 80
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(headers[header::LOCATION], "/api/v2/datasets/STEVENH.NEW.JCL");
}

#[tokio::test]
async fn test_create_existing_data_set() {
    let zosmf = TestZosmf::start().await;

    Mock::given(method("POST"))
        .and(path(restfiles("ds/STEVENH.TEST.JCL")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "category": 4,
            "rc": 8,
            "message": "Dynamic allocation Error"
        })))
        .mount(&zosmf.server)
        .await;

    let (status, _, body) = zosmf
        .send_json(
            "POST",
            "/api/v2/datasets",
            json!({ "name": "STEVENH.TEST.JCL", "dataSetOrganization": "PS" }),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Data set 'STEVENH.TEST.JCL' already exists");
}

#[tokio::test]
async fn test_rename_member() {
    let zosmf = TestZosmf::start().await;

    Mock::given(method("PUT"))
        .and(path(restfiles("ds/STEVENH.TEST.JCL(NEWNAME)")))
        .and(body_json(json!({
            "request": "rename",
            "from-dataset": { "dsn": "STEVENH.TEST.JCL", "member": "OLDNAME" }
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&zosmf.server)
        .await;

    let (status, _, body) = zosmf
        .send_json(
            "PUT",
            "/api/v2/datasets/STEVENH.TEST.JCL(OLDNAME)/rename",
            json!({ "newName": "STEVENH.TEST.JCL(NEWNAME)" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "message": "Renamed 'STEVENH.TEST.JCL(OLDNAME)' to 'STEVENH.TEST.JCL(NEWNAME)'" })
    );
}

#[tokio::test]
async fn test_rename_of_missing_source_is_a_bad_request() {
    let zosmf = TestZosmf::start().await;

    Mock::given(method("PUT"))
        .and(path(restfiles("ds/STEVENH.NEW")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "category": 4,
            "rc": 8,
            "message": "Rename failed",
            "details": ["IDC3012I ENTRY STEVENH.OLD NOT FOUND"]
        })))
        .expect(1)
        .mount(&zosmf.server)
        .await;

    let (status, _, body) = zosmf
        .send_json(
            "PUT",
            "/api/v2/datasets/STEVENH.OLD/rename",
            json!({ "newName": "STEVENH.NEW" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "status": 400, "message": "Data set 'STEVENH.OLD' not found" })
    );
}

#[tokio::test]
async fn test_delete_without_authority() {
    let zosmf = TestZosmf::start().await;

    Mock::given(method("DELETE"))
        .and(path(restfiles("ds/SYS1.PARMLIB")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "category": 4,
            "rc": 8,
            "details": ["ISRZ002 Authorization failed - 'SYS1.PARMLIB'."]
        })))
        .mount(&zosmf.server)
        .await;

    let (status, _, body) = zosmf
        .send(
            Request::builder()
                .method("DELETE")
                .uri("/api/v2/datasets/SYS1.PARMLIB")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["status"], 403);
}

#[tokio::test]
async fn test_delete_data_set() {
    let zosmf = TestZosmf::start().await;

    Mock::given(method("DELETE"))
        .and(path(restfiles("ds/STEVENH.OLD.DATA")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&zosmf.server)
        .await;

    let (status, _, _) = zosmf
        .send(
            Request::builder()
                .method("DELETE")
                .uri("/api/v2/datasets/STEVENH.OLD.DATA")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_unreachable_zosmf_is_a_server_error() {
    let app = common::app_for(&zosfiles_server::config::ZosmfConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        timeout_secs: 2,
        ..Default::default()
    });

    let (status, _, body) = common::send(
        &app,
        Request::builder()
            .uri("/api/v2/datasets/STEVENH.*")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);
}
