mod common;

use axum::http::{header, StatusCode};
use common::{body_json, login_cookie, request, submit, test_app, valid_payload, ADMIN_PASSWORD};
use serde_json::json;

#[tokio::test]
async fn admin_routes_reject_requests_without_a_session() {
    let (app, _pool) = test_app().await;

    let resp = request(&app, "GET", "/api/admin", None, None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["ok"], json!(false));
    assert_eq!(body["reason"], json!("auth"));

    let resp = request(
        &app,
        "GET",
        "/api/admin",
        None,
        Some("admin_session=123.deadbeef"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_rejects_wrong_password_and_accepts_the_right_one() {
    let (app, _pool) = test_app().await;

    let resp = request(
        &app,
        "POST",
        "/api/admin/login",
        Some(json!({ "password": "wrong" })),
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = request(
        &app,
        "POST",
        "/api/admin/login",
        Some(json!({ "password": ADMIN_PASSWORD })),
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .expect("set-cookie")
        .to_str()
        .expect("str");
    assert!(set_cookie.starts_with("admin_session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Path=/api/admin"));
    assert!(set_cookie.contains("SameSite=Lax"));
}

#[tokio::test]
async fn session_cookie_grants_access_and_logout_expires_it() {
    let (app, _pool) = test_app().await;
    let cookie = login_cookie(&app).await;

    let resp = request(&app, "GET", "/api/admin", None, Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["total"], json!(0));

    let resp = request(&app, "POST", "/api/admin/logout", None, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cleared = resp
        .headers()
        .get(header::SET_COOKIE)
        .expect("set-cookie")
        .to_str()
        .expect("str");
    assert!(cleared.contains("Max-Age=0"));
}

#[tokio::test]
async fn list_filters_match_and_total_counts_the_full_set() {
    let (app, _pool) = test_app().await;
    let cookie = login_cookie(&app).await;

    for name in ["Ayşe Yılmaz", "Fatma Kaya", "Zeynep Demir"] {
        let mut payload = valid_payload();
        payload["fullName"] = json!(name);
        submit(&app, payload).await;
    }
    submit(
        &app,
        json!({
            "fullName": "Mehmet Demir",
            "message": "Başvurmak istiyorum",
            "consent": true,
            "gender": "male",
            "employmentType": "sabit"
        }),
    )
    .await;

    let resp = request(
        &app,
        "GET",
        "/api/admin?gender=female&workType=parttime&page=1&pageSize=2",
        None,
        Some(&cookie),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let items = body["items"].as_array().expect("items");
    assert_eq!(items.len(), 2);
    assert_eq!(body["total"], json!(3));
    for item in items {
        assert_eq!(item["gender"], json!("female"));
        assert_eq!(item["employmentType"], json!("parttime"));
    }

    // "yılmaz", percent-encoded for the query string
    let resp = request(
        &app,
        "GET",
        "/api/admin?q=y%C4%B1lmaz",
        None,
        Some(&cookie),
    )
    .await;
    let body = body_json(resp).await;
    assert_eq!(body["total"], json!(1));
    assert_eq!(body["items"][0]["fullName"], json!("Ayşe Yılmaz"));

    let resp = request(
        &app,
        "GET",
        "/api/admin?status=PENDING&archived=false",
        None,
        Some(&cookie),
    )
    .await;
    let body = body_json(resp).await;
    assert_eq!(body["total"], json!(4));
}

#[tokio::test]
async fn list_order_follows_creation_time() {
    let (app, _pool) = test_app().await;
    let cookie = login_cookie(&app).await;

    let first = submit(&app, valid_payload()).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = submit(&app, valid_payload()).await;

    let resp = request(&app, "GET", "/api/admin?order=asc", None, Some(&cookie)).await;
    let body = body_json(resp).await;
    assert_eq!(body["items"][0]["id"], json!(first));

    let resp = request(&app, "GET", "/api/admin?order=desc", None, Some(&cookie)).await;
    let body = body_json(resp).await;
    assert_eq!(body["items"][0]["id"], json!(second));
}

#[tokio::test]
async fn date_range_filter_is_inclusive() {
    let (app, _pool) = test_app().await;
    let cookie = login_cookie(&app).await;
    submit(&app, valid_payload()).await;

    let today = chrono::Utc::now().date_naive();
    let uri = format!("/api/admin?from={}&to={}", today, today);
    let resp = request(&app, "GET", &uri, None, Some(&cookie)).await;
    let body = body_json(resp).await;
    assert_eq!(body["total"], json!(1));

    let tomorrow = today.succ_opt().expect("date");
    let uri = format!("/api/admin?from={}", tomorrow);
    let resp = request(&app, "GET", &uri, None, Some(&cookie)).await;
    let body = body_json(resp).await;
    assert_eq!(body["total"], json!(0));
}

#[tokio::test]
async fn status_update_appends_exactly_one_status_change_event() {
    let (app, _pool) = test_app().await;
    let cookie = login_cookie(&app).await;
    let id = submit(&app, valid_payload()).await;

    let resp = request(
        &app,
        "PATCH",
        &format!("/api/admin/{}", id),
        Some(json!({ "status": "ACCEPTED" })),
        Some(&cookie),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["item"]["status"], json!("ACCEPTED"));

    let resp = request(
        &app,
        "GET",
        &format!("/api/admin/{}", id),
        None,
        Some(&cookie),
    )
    .await;
    let body = body_json(resp).await;
    assert_eq!(body["item"]["status"], json!("ACCEPTED"));
    let events = body["events"].as_array().expect("events");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["type"], json!("STATUS_CHANGE"));
    assert_eq!(events[0]["oldValue"], json!("PENDING"));
    assert_eq!(events[0]["newValue"], json!("ACCEPTED"));

    // A no-op patch must not add another event.
    request(
        &app,
        "PATCH",
        &format!("/api/admin/{}", id),
        Some(json!({ "status": "ACCEPTED" })),
        Some(&cookie),
    )
    .await;
    let resp = request(
        &app,
        "GET",
        &format!("/api/admin/{}", id),
        None,
        Some(&cookie),
    )
    .await;
    let body = body_json(resp).await;
    assert_eq!(body["events"].as_array().expect("events").len(), 1);
}

#[tokio::test]
async fn archive_toggle_appends_an_archive_change_event() {
    let (app, _pool) = test_app().await;
    let cookie = login_cookie(&app).await;
    let id = submit(&app, valid_payload()).await;

    let resp = request(
        &app,
        "PATCH",
        &format!("/api/admin/{}", id),
        Some(json!({ "archived": true })),
        Some(&cookie),
    )
    .await;
    let body = body_json(resp).await;
    assert_eq!(body["item"]["archived"], json!(true));

    let resp = request(
        &app,
        "GET",
        &format!("/api/admin/{}", id),
        None,
        Some(&cookie),
    )
    .await;
    let body = body_json(resp).await;
    let events = body["events"].as_array().expect("events");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["type"], json!("ARCHIVE_CHANGE"));
    assert_eq!(events[0]["oldValue"], json!("false"));
    assert_eq!(events[0]["newValue"], json!("true"));
}

#[tokio::test]
async fn notes_append_to_the_timeline_in_order() {
    let (app, _pool) = test_app().await;
    let cookie = login_cookie(&app).await;
    let id = submit(&app, valid_payload()).await;

    let resp = request(
        &app,
        "POST",
        &format!("/api/admin/{}/note", id),
        Some(json!({ "note": "x" })),
        Some(&cookie),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    request(
        &app,
        "PATCH",
        &format!("/api/admin/{}", id),
        Some(json!({ "status": "REVIEWING" })),
        Some(&cookie),
    )
    .await;
    let resp = request(
        &app,
        "POST",
        &format!("/api/admin/{}/note", id),
        Some(json!({ "note": "Görüşme planlandı" })),
        Some(&cookie),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["event"]["type"], json!("NOTE"));

    let resp = request(
        &app,
        "GET",
        &format!("/api/admin/{}", id),
        None,
        Some(&cookie),
    )
    .await;
    let body = body_json(resp).await;
    let events = body["events"].as_array().expect("events");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["type"], json!("STATUS_CHANGE"));
    assert_eq!(events[1]["type"], json!("NOTE"));
    assert_eq!(events[1]["note"], json!("Görüşme planlandı"));
}

#[tokio::test]
async fn delete_removes_the_submission_and_its_events() {
    let (app, pool) = test_app().await;
    let cookie = login_cookie(&app).await;
    let id = submit(&app, valid_payload()).await;

    request(
        &app,
        "PATCH",
        &format!("/api/admin/{}", id),
        Some(json!({ "status": "REJECTED" })),
        Some(&cookie),
    )
    .await;

    let resp = request(
        &app,
        "DELETE",
        &format!("/api/admin/{}", id),
        None,
        Some(&cookie),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = request(
        &app,
        "GET",
        &format!("/api/admin/{}", id),
        None,
        Some(&cookie),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let events: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM submission_events WHERE submission_id = ?")
            .bind(&id)
            .fetch_one(&pool)
            .await
            .expect("count");
    assert_eq!(events, 0);

    let resp = request(
        &app,
        "DELETE",
        &format!("/api/admin/{}", id),
        None,
        Some(&cookie),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_ids_return_not_found() {
    let (app, _pool) = test_app().await;
    let cookie = login_cookie(&app).await;

    for (method, body) in [
        ("GET", None),
        ("PATCH", Some(json!({ "status": "ACCEPTED" }))),
        ("DELETE", None),
    ] {
        let resp = request(&app, method, "/api/admin/missing-id", body, Some(&cookie)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{} should 404", method);
    }

    let resp = request(
        &app,
        "POST",
        "/api/admin/missing-id/note",
        Some(json!({ "note": "Görüşme planlandı" })),
        Some(&cookie),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn page_size_zero_is_clamped_to_one() {
    let (app, _pool) = test_app().await;
    let cookie = login_cookie(&app).await;
    submit(&app, valid_payload()).await;
    submit(&app, valid_payload()).await;

    let resp = request(&app, "GET", "/api/admin?pageSize=0", None, Some(&cookie)).await;
    let body = body_json(resp).await;
    assert_eq!(body["items"].as_array().expect("items").len(), 1);
    assert_eq!(body["total"], json!(2));
}
