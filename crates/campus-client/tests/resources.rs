// Request shape of each resource call: method, path, query, bearer and body.
use campus_client::api::fees::FeePostFilter;
use campus_client::api::students::StudentFilter;
use campus_client::{ApiClient, PageRequest};
use campus_shared::models::{
    Attachment, ClassroomInput, DiaryEntryInput, EventInput, FeePostUpdate, FeeStatus,
    StudentInput, TeacherInput,
};
use chrono::NaiveDate;
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Value};

const TOKEN: Option<&str> = Some("abc123");

fn client(server: &ServerGuard) -> ApiClient {
    ApiClient::with_base_url(&server.url()).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// The path alone, with or without a query string.
fn path(p: &str) -> Matcher {
    Matcher::Regex(format!(r"^{p}(\?|$)"))
}

fn paging(page: u32, limit: u32) -> Vec<Matcher> {
    vec![
        Matcher::UrlEncoded("page".into(), page.to_string()),
        Matcher::UrlEncoded("limit".into(), limit.to_string()),
    ]
}

async fn respond(mock: Mock, status: usize, body: &str) -> Mock {
    mock.match_header("authorization", "Bearer abc123")
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_students_sends_paging_and_filter() {
    let mut server = mockito::Server::new_async().await;
    let mut query = paging(2, 25);
    query.push(Matcher::UrlEncoded("classroom_id".into(), "c5".into()));
    query.push(Matcher::UrlEncoded("search".into(), "asha".into()));
    let mock = respond(
        server
            .mock("GET", path("/students"))
            .match_query(Matcher::AllOf(query)),
        200,
        r#"{"items": [{"id": 1, "name": "Asha"}], "total": 26, "page": 2}"#,
    )
    .await;

    let filter = StudentFilter {
        classroom_id: Some("c5".into()),
        search: Some("  asha ".into()),
    };
    let page = client(&server)
        .list_students(TOKEN, PageRequest::new(2, 25), &filter)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(page.items[0].id, "1");
    assert_eq!(page.total, Some(26));
}

#[tokio::test]
async fn test_blank_student_search_is_not_sent() {
    let mut server = mockito::Server::new_async().await;
    let mock = respond(
        server
            .mock("GET", path("/students"))
            .match_query(Matcher::Regex("^page=1&limit=100$".into())),
        200,
        "[]",
    )
    .await;

    let filter = StudentFilter {
        classroom_id: None,
        search: Some("   ".into()),
    };
    let page = client(&server)
        .list_students(TOKEN, PageRequest::default(), &filter)
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_create_student_posts_json() {
    let mut server = mockito::Server::new_async().await;
    let mock = respond(
        server.mock("POST", "/students").match_body(Matcher::Json(json!({
            "name": "Asha",
            "classroom_id": "c5",
            "date_of_birth": "2012-04-09"
        }))),
        201,
        r#"{"id": 42, "full_name": "Asha", "classroom_id": 5}"#,
    )
    .await;

    let input = StudentInput {
        name: "Asha".into(),
        classroom_id: Some("c5".into()),
        date_of_birth: Some(date(2012, 4, 9)),
        ..StudentInput::default()
    };
    let student = client(&server).create_student(TOKEN, &input).await.unwrap();

    mock.assert_async().await;
    assert_eq!(student.id, "42");
    assert_eq!(student.classroom_id.as_deref(), Some("5"));
}

#[tokio::test]
async fn test_update_student_puts_to_its_path() {
    let mut server = mockito::Server::new_async().await;
    let mock = respond(
        server
            .mock("PUT", "/students/42")
            .match_body(Matcher::Json(json!({"name": "Asha K", "phone": "555-0101"}))),
        200,
        r#"{"id": "42", "name": "Asha K", "phone": "555-0101"}"#,
    )
    .await;

    let input = StudentInput {
        name: "Asha K".into(),
        phone: Some("555-0101".into()),
        ..StudentInput::default()
    };
    let student = client(&server)
        .update_student(TOKEN, "42", &input)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(student.name, "Asha K");
}

#[tokio::test]
async fn test_delete_student_returns_echo() {
    let mut server = mockito::Server::new_async().await;
    let mock = respond(
        server.mock("DELETE", "/students/42"),
        200,
        r#"{"message": "Student deleted"}"#,
    )
    .await;

    let echo = client(&server).delete_student(TOKEN, "42").await.unwrap();

    mock.assert_async().await;
    assert_eq!(echo, json!({"message": "Student deleted"}));
}

// ---------------------------------------------------------------------------
// Teachers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_teachers_sends_paging() {
    let mut server = mockito::Server::new_async().await;
    let mock = respond(
        server
            .mock("GET", path("/teachers"))
            .match_query(Matcher::AllOf(paging(1, 50))),
        200,
        r#"{"data": [{"id": 3, "full_name": "R. Iyer", "classroom_ids": ["c5"]}]}"#,
    )
    .await;

    let page = client(&server)
        .list_teachers(TOKEN, PageRequest::new(1, 50))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(page.items[0].name, "R. Iyer");
    assert_eq!(page.items[0].classroom_ids, vec!["c5".to_string()]);
}

#[tokio::test]
async fn test_create_teacher_omits_empty_classrooms() {
    let mut server = mockito::Server::new_async().await;
    let mock = respond(
        server.mock("POST", "/teachers").match_body(Matcher::Json(json!({
            "name": "R. Iyer",
            "subject": "Mathematics"
        }))),
        201,
        r#"{"id": 3, "name": "R. Iyer", "subject": "Mathematics"}"#,
    )
    .await;

    let input = TeacherInput {
        name: "R. Iyer".into(),
        subject: Some("Mathematics".into()),
        ..TeacherInput::default()
    };
    let teacher = client(&server).create_teacher(TOKEN, &input).await.unwrap();

    mock.assert_async().await;
    assert_eq!(teacher.id, "3");
}

#[tokio::test]
async fn test_update_teacher_sends_classrooms() {
    let mut server = mockito::Server::new_async().await;
    let mock = respond(
        server.mock("PUT", "/teachers/3").match_body(Matcher::Json(json!({
            "name": "R. Iyer",
            "classroom_ids": ["c5", "c6"]
        }))),
        200,
        r#"{"id": 3, "name": "R. Iyer", "classroom_ids": ["c5", "c6"]}"#,
    )
    .await;

    let input = TeacherInput {
        name: "R. Iyer".into(),
        classroom_ids: vec!["c5".into(), "c6".into()],
        ..TeacherInput::default()
    };
    let teacher = client(&server)
        .update_teacher(TOKEN, "3", &input)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(teacher.classroom_ids.len(), 2);
}

#[tokio::test]
async fn test_delete_teacher() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/teachers/3")
        .match_header("authorization", "Bearer abc123")
        .with_status(204)
        .create_async()
        .await;

    let echo = client(&server).delete_teacher(TOKEN, "3").await.unwrap();

    mock.assert_async().await;
    assert_eq!(echo, Value::Null);
}

// ---------------------------------------------------------------------------
// Classrooms
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_classrooms_sends_paging() {
    let mut server = mockito::Server::new_async().await;
    let mock = respond(
        server
            .mock("GET", path("/classrooms"))
            .match_query(Matcher::AllOf(paging(1, 100))),
        200,
        r#"[{"id": 5, "name": "Grade 5", "section": "B", "student_count": 31}]"#,
    )
    .await;

    let page = client(&server)
        .list_classrooms(TOKEN, PageRequest::default())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(page.items[0].display_name(), "Grade 5 - B");
    assert_eq!(page.items[0].student_count, Some(31));
}

#[tokio::test]
async fn test_create_classroom_posts_json() {
    let mut server = mockito::Server::new_async().await;
    let mock = respond(
        server
            .mock("POST", "/classrooms")
            .match_body(Matcher::Json(json!({"name": "Grade 6", "section": "A"}))),
        201,
        r#"{"id": 6, "name": "Grade 6", "section": "A"}"#,
    )
    .await;

    let input = ClassroomInput {
        name: "Grade 6".into(),
        section: Some("A".into()),
        ..ClassroomInput::default()
    };
    let classroom = client(&server).create_classroom(TOKEN, &input).await.unwrap();

    mock.assert_async().await;
    assert_eq!(classroom.id, "6");
}

#[tokio::test]
async fn test_update_classroom_assigns_teacher() {
    let mut server = mockito::Server::new_async().await;
    let mock = respond(
        server
            .mock("PUT", "/classrooms/6")
            .match_body(Matcher::Json(json!({"name": "Grade 6", "teacher_id": "3"}))),
        200,
        r#"{"id": 6, "name": "Grade 6", "teacher_id": 3}"#,
    )
    .await;

    let input = ClassroomInput {
        name: "Grade 6".into(),
        teacher_id: Some("3".into()),
        ..ClassroomInput::default()
    };
    let classroom = client(&server)
        .update_classroom(TOKEN, "6", &input)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(classroom.teacher_id.as_deref(), Some("3"));
}

#[tokio::test]
async fn test_delete_classroom() {
    let mut server = mockito::Server::new_async().await;
    let mock = respond(server.mock("DELETE", "/classrooms/6"), 200, "{}").await;

    let echo = client(&server).delete_classroom(TOKEN, "6").await.unwrap();

    mock.assert_async().await;
    assert_eq!(echo, json!({}));
}

// ---------------------------------------------------------------------------
// Fee posts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_fee_posts_sends_filter() {
    let mut server = mockito::Server::new_async().await;
    let mock = respond(
        server
            .mock("GET", path("/fees/posts"))
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("classroom_id".into(), "c5".into()),
                Matcher::UrlEncoded("student_id".into(), "s1".into()),
            ])),
        200,
        r#"[{"id": 9, "title": "Term 2 tuition", "amount": "12500.00",
             "due_date": "2024-07-01", "status": "overdue"}]"#,
    )
    .await;

    let filter = FeePostFilter {
        classroom_id: Some("c5".into()),
        student_id: Some("s1".into()),
    };
    let page = client(&server).list_fee_posts(TOKEN, &filter).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.items[0].amount, 12500.0);
    assert_eq!(page.items[0].status, FeeStatus::Overdue);
}

#[tokio::test]
async fn test_update_fee_post_sends_only_set_fields() {
    let mut server = mockito::Server::new_async().await;
    let mock = respond(
        server
            .mock("PUT", "/fees/posts/9")
            .match_body(Matcher::Json(json!({"amount": 13000.0, "status": "paid"}))),
        200,
        r#"{"id": 9, "title": "Term 2 tuition", "amount": 13000, "status": "paid"}"#,
    )
    .await;

    let update = FeePostUpdate {
        amount: Some(13000.0),
        status: Some(FeeStatus::Paid),
        ..FeePostUpdate::default()
    };
    let post = client(&server)
        .update_fee_post(TOKEN, "9", &update)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(post.status, FeeStatus::Paid);
}

// ---------------------------------------------------------------------------
// Diary
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_diary_entries_sends_classroom_and_date() {
    let mut server = mockito::Server::new_async().await;
    let mock = respond(
        server
            .mock("GET", path("/diary"))
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("classroom_id".into(), "c5".into()),
                Matcher::UrlEncoded("date".into(), "2024-06-10".into()),
            ])),
        200,
        r#"[{"id": 1, "title": "Fractions", "description": "Exercise 4.2"}]"#,
    )
    .await;

    let page = client(&server)
        .list_diary_entries(TOKEN, "c5", Some(date(2024, 6, 10)))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(page.items[0].content, "Exercise 4.2");
}

#[tokio::test]
async fn test_create_diary_entry_is_multipart_with_attachment() {
    let mut server = mockito::Server::new_async().await;
    let mock = respond(
        server
            .mock("POST", "/diary")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=".into()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="classroom_id"\r\n\r\nc5\r\n"#.into()),
                Matcher::Regex(r#"name="title"\r\n\r\nFractions\r\n"#.into()),
                Matcher::Regex(r#"name="content"\r\n\r\nExercise 4.2\r\n"#.into()),
                Matcher::Regex(r#"name="date"\r\n\r\n2024-06-10\r\n"#.into()),
                Matcher::Regex(r#"name="subject"\r\n\r\nMathematics\r\n"#.into()),
                Matcher::Regex(r#"name="attachment"; filename="hw.pdf""#.into()),
                Matcher::Regex("HOMEWORK-STUB".into()),
            ])),
        201,
        r#"{"id": 7, "title": "Fractions", "content": "Exercise 4.2",
            "file_url": "https://cdn.school.test/diary/hw.pdf"}"#,
    )
    .await;

    let input = DiaryEntryInput {
        classroom_id: "c5".into(),
        title: "Fractions".into(),
        content: "Exercise 4.2".into(),
        subject: Some("Mathematics".into()),
        date: date(2024, 6, 10),
        attachment: Some(
            Attachment::new("hw.pdf", b"HOMEWORK-STUB".to_vec()).with_mime_type("application/pdf"),
        ),
    };
    let entry = client(&server)
        .create_diary_entry(TOKEN, &input)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(
        entry.attachment_url.as_deref(),
        Some("https://cdn.school.test/diary/hw.pdf")
    );
}

#[tokio::test]
async fn test_diary_entry_without_attachment_has_no_file_part() {
    let mut server = mockito::Server::new_async().await;
    let with_file = server
        .mock("POST", "/diary")
        .match_body(Matcher::Regex(r#"name="(attachment|subject)""#.into()))
        .expect(0)
        .create_async()
        .await;
    let plain = respond(
        server
            .mock("POST", "/diary")
            .match_body(Matcher::Regex(r#"name="title"\r\n\r\nReading\r\n"#.into())),
        201,
        r#"{"id": 8, "title": "Reading"}"#,
    )
    .await;

    let input = DiaryEntryInput {
        classroom_id: "c5".into(),
        title: "Reading".into(),
        content: "Chapter 3".into(),
        subject: None,
        date: date(2024, 6, 11),
        attachment: None,
    };
    client(&server)
        .create_diary_entry(TOKEN, &input)
        .await
        .unwrap();

    with_file.assert_async().await;
    plain.assert_async().await;
}

// ---------------------------------------------------------------------------
// Notifications, events, attendance sessions, gallery
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_notifications_by_type_uses_type_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = respond(
        server
            .mock("GET", path("/notifications"))
            .match_query(Matcher::UrlEncoded("type".into(), "fee".into())),
        200,
        r#"[{"id": 1, "title": "Fee due", "message": "Pay by Friday", "type": "fee"}]"#,
    )
    .await;

    let page = client(&server)
        .list_notifications_by_type(TOKEN, "fee")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(page.items[0].kind.as_deref(), Some("fee"));
    assert_eq!(page.items[0].body, "Pay by Friday");
}

#[tokio::test]
async fn test_notifications_for_recipient_uses_path() {
    let mut server = mockito::Server::new_async().await;
    let mock = respond(
        server.mock("GET", "/notifications/recipient/u9"),
        200,
        r#"[{"id": 2, "title": "PTM", "recipient_id": "u9", "is_read": true}]"#,
    )
    .await;

    let page = client(&server)
        .list_notifications_for_recipient(TOKEN, "u9")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(page.items[0].recipient_id.as_deref(), Some("u9"));
    assert!(page.items[0].read);
}

#[tokio::test]
async fn test_list_events() {
    let mut server = mockito::Server::new_async().await;
    let mock = respond(
        server.mock("GET", "/events"),
        200,
        r#"[{"id": 4, "title": "Sports day", "event_date": "2024-12-05"}]"#,
    )
    .await;

    let page = client(&server).list_events(TOKEN).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.items[0].date, Some(date(2024, 12, 5)));
}

#[tokio::test]
async fn test_create_event_posts_json() {
    let mut server = mockito::Server::new_async().await;
    let mock = respond(
        server.mock("POST", "/events").match_body(Matcher::Json(json!({
            "title": "Sports day",
            "date": "2024-12-05",
            "location": "Main ground"
        }))),
        201,
        r#"{"id": 4, "title": "Sports day", "date": "2024-12-05", "location": "Main ground"}"#,
    )
    .await;

    let input = EventInput {
        title: "Sports day".into(),
        description: None,
        date: date(2024, 12, 5),
        time: None,
        location: Some("Main ground".into()),
    };
    let event = client(&server).create_event(TOKEN, &input).await.unwrap();

    mock.assert_async().await;
    assert_eq!(event.location.as_deref(), Some("Main ground"));
}

#[tokio::test]
async fn test_list_attendance_sessions_sends_classroom_and_date() {
    let mut server = mockito::Server::new_async().await;
    let mock = respond(
        server
            .mock("GET", path("/attendance/sessions"))
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("classroom_id".into(), "c5".into()),
                Matcher::UrlEncoded("date".into(), "2024-06-10".into()),
            ])),
        200,
        r#"[{"id": 11, "classroom_id": 5, "date": "2024-06-10"}]"#,
    )
    .await;

    let page = client(&server)
        .list_attendance_sessions(TOKEN, "c5", Some(date(2024, 6, 10)))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(page.items[0].classroom_id, "5");
    assert!(page.items[0].records.is_empty());
}

#[tokio::test]
async fn test_list_gallery_items_filters_by_classroom() {
    let mut server = mockito::Server::new_async().await;
    let mock = respond(
        server
            .mock("GET", path("/gallery"))
            .match_query(Matcher::UrlEncoded("classroom_id".into(), "c5".into())),
        200,
        r#"[{"id": 1, "url": "https://cdn.school.test/g/1.jpg", "caption": "Annual day"}]"#,
    )
    .await;

    let page = client(&server)
        .list_gallery_items(TOKEN, Some("c5"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(page.items[0].image_url, "https://cdn.school.test/g/1.jpg");
}

#[tokio::test]
async fn test_unfiltered_gallery_sends_no_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = respond(server.mock("GET", "/gallery"), 200, "[]").await;

    let page = client(&server).list_gallery_items(TOKEN, None).await.unwrap();

    mock.assert_async().await;
    assert!(page.is_empty());
}
