// absenta-client/tests/client_integration.rs
// End-to-end tests against the in-memory mock backend.

use absenta_api_mock::MockState;
use absenta_client::{
    AppealReviewer, AttendanceCoordinator, ClientConfig, ClientError, Credential,
    CredentialStorage, HttpClient, NoticeKind, UpdateOutcome,
};
use absenta_client::appeal::DecisionOutcome;
use chrono::{Days, Local};
use shared::models::{
    AppealStatus, AppealSubmit, AttendanceStatus, AttendanceUpdate, ClassAttendanceBatch,
    DraftKey, LetterheadScope, RosterEntry, Role,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;

async fn start() -> (SocketAddr, Arc<MockState>) {
    let state = Arc::new(MockState::seeded());
    let (addr, _handle) = absenta_api_mock::spawn(state.clone()).await.unwrap();
    (addr, state)
}

fn base_config(addr: SocketAddr) -> ClientConfig {
    ClientConfig::new(format!("http://{}", addr)).with_refresh_delay(0)
}

async fn login_client(addr: SocketAddr, username: &str) -> HttpClient {
    let client = base_config(addr).build_http_client();
    let login = client.login(username, "rahasia").await.unwrap();
    client.with_token(login.token)
}

#[tokio::test]
async fn login_and_me_roundtrip() {
    let (addr, _state) = start().await;
    let client = login_client(addr, "sari").await;

    let me = client.me().await.unwrap();
    assert_eq!(me.username, "sari");
    assert_eq!(me.role, Role::StudentRep);
}

#[tokio::test]
async fn invalid_credentials_are_rejected() {
    let (addr, _state) = start().await;
    let client = base_config(addr).build_http_client();

    let err = client.login("sari", "salah").await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
async fn requests_without_token_are_unauthorized() {
    let (addr, _state) = start().await;
    let client = base_config(addr).build_http_client();

    let err = client.today_schedule().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
async fn schedule_rows_normalize_into_canonical_entries() {
    let (addr, _state) = start().await;
    let client = login_client(addr, "sari").await;

    let entries = client.today_schedule().await.unwrap();

    let ceremony = entries.iter().find(|e| e.id == 900).unwrap();
    assert!(!ceremony.is_attendable);

    let single = entries.iter().find(|e| e.id == 501).unwrap();
    let teacher = single.single_teacher().unwrap();
    assert_eq!(teacher.guru_id, 14);
    assert_eq!(teacher.status, AttendanceStatus::Unset);

    // The joint entry arrives as a delimited guru_list column and comes
    // out as structured assignments.
    let joint = entries.iter().find(|e| e.id == 77).unwrap();
    assert!(joint.is_multi_teacher());
    assert_eq!(joint.teachers.len(), 2);
    assert!(joint.teachers[0].is_primary);
}

#[tokio::test]
async fn optimistic_update_commits_over_http() {
    let (addr, state) = start().await;
    let client = login_client(addr, "sari").await;
    let today = Local::now().date_naive();

    let mut coordinator = AttendanceCoordinator::new(client, Role::StudentRep, today)
        .with_refresh_delay(std::time::Duration::ZERO);
    coordinator.load().await.unwrap();

    let key = DraftKey::Schedule(501);
    assert_eq!(
        coordinator.draft(&key).unwrap().status,
        AttendanceStatus::Present
    );

    let outcome = coordinator
        .update_status(key.clone(), AttendanceStatus::Absent)
        .await;
    assert_eq!(outcome, UpdateOutcome::Committed);

    let draft = coordinator.draft(&key).unwrap();
    assert_eq!(draft.status, AttendanceStatus::Absent);
    assert!(draft.note.is_empty());

    // The mark reached the store.
    assert!(state.attendance.contains_key(&(501, 14, today)));
}

#[tokio::test]
async fn multi_teacher_update_leaves_sibling_untouched() {
    let (addr, state) = start().await;
    let client = login_client(addr, "sari").await;
    let today = Local::now().date_naive();

    let mut coordinator = AttendanceCoordinator::new(client, Role::StudentRep, today)
        .with_refresh_delay(std::time::Duration::ZERO);
    coordinator.load().await.unwrap();

    let key_a = DraftKey::ScheduleTeacher { jadwal_id: 77, guru_id: 3 };
    let key_b = DraftKey::ScheduleTeacher { jadwal_id: 77, guru_id: 9 };

    let outcome = coordinator
        .update_status(key_a.clone(), AttendanceStatus::Sick)
        .await;
    assert_eq!(outcome, UpdateOutcome::Committed);

    assert_eq!(
        coordinator.draft(&key_a).unwrap().status,
        AttendanceStatus::Sick
    );
    assert_eq!(
        coordinator.draft(&key_b).unwrap().status,
        AttendanceStatus::Present
    );
    assert!(state.attendance.contains_key(&(77, 3, today)));
    assert!(!state.attendance.contains_key(&(77, 9, today)));
}

#[tokio::test]
async fn server_rejected_update_rolls_back() {
    let (addr, _state) = start().await;
    let client = login_client(addr, "bu.ratna").await;
    // A "today" far outside the server's 30-day window makes every
    // submission rejected while loads still succeed.
    let stale_today = Local::now()
        .date_naive()
        .checked_sub_days(Days::new(60))
        .unwrap();

    let mut coordinator = AttendanceCoordinator::new(client, Role::Teacher, stale_today)
        .with_refresh_delay(std::time::Duration::ZERO);
    coordinator.load().await.unwrap();

    let key = DraftKey::Schedule(501);
    let before = coordinator.draft(&key).unwrap().clone();

    let outcome = coordinator
        .update_status(key.clone(), AttendanceStatus::Sick)
        .await;
    assert_eq!(outcome, UpdateOutcome::RolledBack);
    assert_eq!(coordinator.draft(&key).unwrap(), &before);

    let notices = coordinator.drain_notices();
    assert!(
        notices
            .iter()
            .any(|n| n.kind == NoticeKind::Error
                && n.message.contains("outside the editable window"))
    );
}

#[tokio::test]
async fn unassigned_teacher_is_rejected_by_the_server() {
    let (addr, _state) = start().await;
    let client = login_client(addr, "sari").await;

    let err = client
        .submit_attendance(&AttendanceUpdate {
            jadwal_id: 501,
            guru_id: 999,
            status: AttendanceStatus::Present,
            note: String::new(),
            tanggal: Local::now().date_naive(),
        })
        .await
        .unwrap_err();

    match err {
        ClientError::Validation(message) => {
            assert!(message.contains("not assigned"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn roster_batch_is_teacher_only() {
    let (addr, state) = start().await;
    let today = Local::now().date_naive();
    let batch = ClassAttendanceBatch {
        kelas_id: 11,
        jadwal_id: 501,
        tanggal: today,
        entries: vec![
            RosterEntry {
                siswa_id: 230,
                name: "Agus Hermawan".into(),
                status: AttendanceStatus::Present,
                note: String::new(),
            },
            RosterEntry {
                siswa_id: 231,
                name: "Dewi Lestari".into(),
                status: AttendanceStatus::Sick,
                note: "demam".into(),
            },
        ],
    };

    let teacher = login_client(addr, "bu.ratna").await;
    teacher.submit_class_attendance(&batch).await.unwrap();
    assert!(state.roster.contains_key(&(501, 231, today)));

    let student = login_client(addr, "sari").await;
    let err = student.submit_class_attendance(&batch).await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));
}

#[tokio::test]
async fn appeal_review_flow() {
    let (addr, _state) = start().await;
    let client = login_client(addr, "bu.ratna").await;

    let mut reviewer = AppealReviewer::new(client.clone());
    reviewer.refresh().await.unwrap();
    let appeal = reviewer
        .appeals()
        .iter()
        .find(|a| a.id == 42)
        .cloned()
        .unwrap();
    assert_eq!(appeal.status, AppealStatus::Pending);

    // Empty justification is blocked client-side.
    let outcome = reviewer.decide(42, false, "").await;
    assert_eq!(outcome, DecisionOutcome::Rejected);

    let outcome = reviewer.decide(42, false, "bukti tidak cukup").await;
    assert_eq!(outcome, DecisionOutcome::Committed);
    let decided = reviewer
        .appeals()
        .iter()
        .find(|a| a.id == 42)
        .cloned()
        .unwrap();
    assert_eq!(decided.status, AppealStatus::Rejected);
    assert_eq!(decided.reviewer_note.as_deref(), Some("bukti tidak cukup"));

    // Terminal: refused client-side, and by the server when forced.
    assert!(!reviewer.can_decide(42));
    let outcome = reviewer.decide(42, true, "berubah pikiran").await;
    assert_eq!(outcome, DecisionOutcome::Rejected);

    let err = client
        .decide_appeal(
            42,
            &shared::models::AppealDecision {
                approve: true,
                note: "berubah pikiran".into(),
            },
        )
        .await
        .unwrap_err();
    match err {
        ClientError::Server { code, .. } => assert_eq!(code, "E5002"),
        other => panic!("expected conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn appeal_submission_validates_justification() {
    let (addr, _state) = start().await;
    let client = login_client(addr, "sari").await;

    let submit = AppealSubmit {
        siswa_id: 230,
        jadwal_id: 501,
        tanggal: Local::now().date_naive(),
        proposed_status: AttendanceStatus::Excused,
        justification: String::new(),
    };
    let err = client.submit_appeal(&submit).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    let submitted = client
        .submit_appeal(&AppealSubmit {
            justification: "Mengikuti lomba resmi sekolah".into(),
            ..submit
        })
        .await
        .unwrap();
    assert_eq!(submitted.status, AppealStatus::Pending);
    assert_eq!(submitted.jadwal_id, 501);
}

fn sample_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([30, 60, 120, 255]));
    let mut buf = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[tokio::test]
async fn letterhead_image_and_config_roundtrip() {
    let (addr, _state) = start().await;
    let admin = login_client(addr, "admin").await;

    let uploaded = admin
        .upload_letterhead("logo-sekolah.png", sample_png())
        .await
        .unwrap();
    assert_eq!(uploaded.width, 4);
    assert_eq!(uploaded.height, 4);
    assert_eq!(uploaded.format, "png");

    let bytes = admin.fetch_letterhead_image(uploaded.id).await.unwrap();
    assert_eq!(bytes, sample_png());

    let mut config = admin
        .letterhead_config(&LetterheadScope::Global)
        .await
        .unwrap();
    config.scope = LetterheadScope::Report("rekap_bulanan".into());
    config.lines = vec![
        "SMA NEGERI 3 YOGYAKARTA".into(),
        "Jl. Laksda Yos Sudarso 7".into(),
    ];
    config.logo_left = Some(uploaded.id);
    let stored = admin.update_letterhead_config(&config).await.unwrap();
    assert_eq!(stored.logo_left, Some(uploaded.id));

    let fetched = admin
        .letterhead_config(&LetterheadScope::Report("rekap_bulanan".into()))
        .await
        .unwrap();
    assert_eq!(fetched.lines.len(), 2);

    // Unknown report scopes fall back to the global config.
    let fallback = admin
        .letterhead_config(&LetterheadScope::Report("rekap_harian".into()))
        .await
        .unwrap();
    assert_eq!(fallback.scope, LetterheadScope::Global);

    // Deleting the image clears the dangling reference.
    admin.delete_letterhead_image(uploaded.id).await.unwrap();
    let fetched = admin
        .letterhead_config(&LetterheadScope::Report("rekap_bulanan".into()))
        .await
        .unwrap();
    assert_eq!(fetched.logo_left, None);

    let err = admin
        .fetch_letterhead_image(uploaded.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn letterhead_management_is_admin_only() {
    let (addr, _state) = start().await;
    let student = login_client(addr, "sari").await;

    let err = student
        .upload_letterhead("logo.png", sample_png())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));
}

#[tokio::test]
async fn invalid_letterhead_upload_is_rejected() {
    let (addr, _state) = start().await;
    let admin = login_client(addr, "admin").await;

    let err = admin
        .upload_letterhead("logo.png", b"definitely not an image".to_vec())
        .await
        .unwrap_err();
    match err {
        ClientError::Validation(message) => assert!(message.contains("not a valid image")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn credential_storage_lifecycle() {
    let temp_dir = TempDir::new().unwrap();
    let storage = CredentialStorage::new(temp_dir.path(), "credential.json");

    assert!(matches!(
        storage.require().unwrap_err(),
        ClientError::MissingCredential
    ));

    let credential = Credential::new(
        "sari".to_string(),
        "token-abc".to_string(),
        Role::StudentRep,
        None,
    );
    storage.save(&credential).unwrap();
    assert!(storage.exists());

    let loaded = storage.require().unwrap();
    assert_eq!(loaded.username, "sari");
    assert_eq!(loaded.token, "token-abc");
    assert_eq!(loaded.role, Role::StudentRep);

    // An expired credential routes back to login.
    let past = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs()
        - 3600;
    let expired = Credential::new("sari".into(), "token-old".into(), Role::StudentRep, Some(past));
    storage.save(&expired).unwrap();
    assert!(matches!(
        storage.require().unwrap_err(),
        ClientError::MissingCredential
    ));

    storage.delete().unwrap();
    assert!(!storage.exists());
    assert!(storage.load().is_none());
}
