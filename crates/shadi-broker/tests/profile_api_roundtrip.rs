//! The reqwest gateway and both engines against an in-process stand-in for the Profile API.
//!
//! The stand-in mirrors the upstream service: timestamp ids, naive ISO `created_at`, and
//! records that do not echo `data_verification` back.

mod fake_api {
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::{get, put};
    use axum::{Json, Router};
    use serde_json::{json, Map, Value};

    #[derive(Default)]
    pub(super) struct Store {
        pub(super) profiles: Vec<Value>,
        pub(super) puts: Vec<Value>,
        pub(super) deletes: Vec<String>,
        pub(super) sequence: u32,
    }

    pub(super) type Shared = Arc<Mutex<Store>>;

    pub(super) fn seed_record(id: &str, name: &str, father: &str, taluk: &str) -> Value {
        json!({
            "id": id,
            "full_name": name,
            "gender": "male",
            "date_of_birth": "1993-05-17",
            "permanent_address": "2nd Main, Vinoba Nagar",
            "pin_code": "577204",
            "taluk": taluk,
            "father_name": father,
            "mother_name": "Shantha",
            "education": "B.Com",
            "occupation": "Accountant",
            "caste": "Any",
            "complexion": "Fair",
            "height": "5'8",
            "weight": "68",
            "siblings_count": "1",
            "asset_details": "Two acres",
            "payment_status": false,
            "payment_utr": null,
            "created_at": "2025-09-01T08:00:00.000001",
            "updated_at": "2025-09-01T08:00:00.000001"
        })
    }

    pub(super) async fn spawn(store: Shared) -> SocketAddr {
        let app = Router::new()
            .route("/profiles", get(list).post(create))
            .route("/profiles/:id", put(update).delete(remove))
            .with_state(store);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake api");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake api serves");
        });
        addr
    }

    async fn list(State(store): State<Shared>) -> Json<Vec<Value>> {
        Json(store.lock().expect("store poisoned").profiles.clone())
    }

    async fn create(
        State(store): State<Shared>,
        Json(body): Json<Map<String, Value>>,
    ) -> Response {
        let mut guard = store.lock().expect("store poisoned");
        guard.sequence += 1;
        let mut record = body;
        record.remove("data_verification");
        record.insert(
            "id".to_string(),
            Value::String(format!("1727170000.{}", guard.sequence)),
        );
        record.insert(
            "created_at".to_string(),
            Value::String("2025-10-01T09:00:00.123456".to_string()),
        );
        record.insert(
            "updated_at".to_string(),
            Value::String("2025-10-01T09:00:00.123456".to_string()),
        );
        let record = Value::Object(record);
        guard.profiles.push(record.clone());
        (StatusCode::OK, Json(record)).into_response()
    }

    async fn update(
        State(store): State<Shared>,
        Path(id): Path<String>,
        Json(body): Json<Value>,
    ) -> Response {
        let mut guard = store.lock().expect("store poisoned");
        guard.puts.push(body.clone());
        match guard.profiles.iter_mut().find(|record| record["id"] == id.as_str()) {
            Some(record) => {
                *record = body.clone();
                (StatusCode::OK, Json(body)).into_response()
            }
            None => (StatusCode::NOT_FOUND, Json(json!({"detail": "Profile not found"})))
                .into_response(),
        }
    }

    async fn remove(State(store): State<Shared>, Path(id): Path<String>) -> Response {
        let mut guard = store.lock().expect("store poisoned");
        let before = guard.profiles.len();
        guard.profiles.retain(|record| record["id"] != id.as_str());
        if guard.profiles.len() == before {
            return (StatusCode::NOT_FOUND, Json(json!({"detail": "Profile not found"})))
                .into_response();
        }
        guard.deletes.push(id);
        (StatusCode::OK, Json(json!({"message": "Profile deleted"}))).into_response()
    }
}

use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use shadi_broker::config::ProfileApiConfig;
use shadi_broker::profiles::{
    GatewayError, HttpProfileGateway, ProfileField, ProfileGateway, ProfileId,
};
use shadi_broker::workflows::intake::{IntakeService, IntakeSession, Locale};
use shadi_broker::workflows::roster::{RosterFilters, RosterService};

fn seeded_store() -> fake_api::Shared {
    let records = vec![
        fake_api::seed_record("1727000000.1", "Ravi", "Suresh Kumar", "Shimoga"),
        fake_api::seed_record("1727000000.2", "Manoj", "Prakash", "Sagar"),
        fake_api::seed_record("1727000000.3", "Kiran", "Anil Kumar", "Sagar"),
        fake_api::seed_record("1727000000.4", "Sagar", "Girish", "Sorab"),
    ];
    Arc::new(Mutex::new(fake_api::Store {
        profiles: records,
        ..fake_api::Store::default()
    }))
}

async fn gateway_for(store: fake_api::Shared) -> HttpProfileGateway {
    let addr = fake_api::spawn(store).await;
    HttpProfileGateway::new(&ProfileApiConfig {
        base_url: format!("http://{addr}/"),
        timeout_secs: 5,
    })
    .expect("client builds")
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 3, 12, 0, 0)
        .single()
        .expect("valid instant")
}

#[tokio::test]
async fn list_decodes_upstream_records_with_defaults() {
    let gateway = gateway_for(seeded_store()).await;

    let profiles = gateway.list().await.expect("list succeeds");

    assert_eq!(profiles.len(), 4);
    assert_eq!(profiles[0].id.as_str(), "1727000000.1");
    assert!(!profiles[0].data_verification);
    assert_eq!(profiles[0].payment_utr, None);
    assert!(profiles[0].created_at.parse().is_some());
}

#[tokio::test]
async fn intake_submission_creates_an_unpaid_profile() {
    let store = seeded_store();
    let gateway = Arc::new(gateway_for(store.clone()).await);
    let service = IntakeService::new(gateway);

    let answers = [
        (ProfileField::FullName, "Asha Rao"),
        (ProfileField::Gender, "female"),
        (ProfileField::DateOfBirth, "1997-01-21"),
        (ProfileField::PermanentAddress, "Temple Road"),
        (ProfileField::PinCode, "577401"),
        (ProfileField::Taluk, "Sagar"),
        (ProfileField::FatherName, "Naveen Rao"),
        (ProfileField::MotherName, "Sudha"),
        (ProfileField::Education, "M.Sc"),
        (ProfileField::Occupation, "Lecturer"),
        (ProfileField::Caste, "Any"),
        (ProfileField::Complexion, "Fair"),
        (ProfileField::Height, "5'3"),
        (ProfileField::Weight, "52"),
        (ProfileField::SiblingsCount, "2"),
        (ProfileField::AssetDetails, "None"),
    ];
    let session = answers
        .iter()
        .try_fold(IntakeSession::new(Locale::En), |session, (field, value)| {
            session.answer(*field, value)
        })
        .expect("answers accepted")
        .acknowledge(true);

    let (session, outcome) = service.submit(session).await;
    let profile = outcome.expect("submission succeeds");

    assert_eq!(profile.id.as_str(), "1727170000.1");
    assert!(!profile.payment_status);
    assert_eq!(profile.fields.taluk, "Sagar");
    assert_eq!(session.progress().answered, 0);
    assert_eq!(store.lock().expect("store").profiles.len(), 5);
}

#[tokio::test]
async fn roster_edit_puts_the_whole_record_and_reloads() {
    let store = seeded_store();
    let gateway = Arc::new(gateway_for(store.clone()).await);
    let service = RosterService::new(gateway);

    let view = service
        .load(RosterFilters::search("kumar"), now())
        .await
        .expect("load succeeds");
    assert_eq!(view.visible().len(), 2);

    let id = ProfileId::from("1727000000.3");
    let edit = service
        .begin_edit(&view, &id)
        .and_then(|edit| edit.set(ProfileField::PaymentStatus, "paid"))
        .expect("edit applies");
    let reloaded = service
        .save(&view, edit, now())
        .await
        .expect("save succeeds")
        .reload
        .expect("reload succeeds");

    let puts = store.lock().expect("store").puts.clone();
    assert_eq!(puts.len(), 1);
    let body = puts[0].as_object().expect("object body");
    for field in ProfileField::all() {
        assert!(body.contains_key(field.key()), "missing {field}");
    }
    assert_eq!(body["father_name"], "Anil Kumar");
    assert_eq!(body["payment_status"], true);
    assert_eq!(body["created_at"], "2025-09-01T08:00:00.000001");

    assert_eq!(reloaded.visible().len(), 2);
    assert_eq!(
        reloaded.find(&id).map(|profile| profile.payment_status),
        Some(true)
    );
}

#[tokio::test]
async fn roster_delete_removes_one_profile() {
    let store = seeded_store();
    let gateway = Arc::new(gateway_for(store.clone()).await);
    let service = RosterService::new(gateway);

    let view = service
        .load(RosterFilters::default().with_taluk("Sagar"), now())
        .await
        .expect("load succeeds");
    let reloaded = service
        .delete(&view, &ProfileId::from("1727000000.2"), true, now())
        .await
        .expect("delete succeeds")
        .reload
        .expect("reload succeeds");

    assert_eq!(reloaded.profiles().len(), 3);
    assert_eq!(reloaded.visible().len(), 1);
    assert_eq!(store.lock().expect("store").deletes, vec!["1727000000.2"]);
}

#[tokio::test]
async fn ids_with_reserved_characters_reach_their_own_record() {
    let store = seeded_store();
    store
        .lock()
        .expect("store")
        .profiles
        .push(fake_api::seed_record("1727000000.5/b?c", "Arjun", "Ganesh", "Hosanagara"));
    let gateway = gateway_for(store.clone()).await;

    gateway
        .delete(&ProfileId::from("1727000000.5/b?c"))
        .await
        .expect("delete succeeds");

    let guard = store.lock().expect("store");
    assert_eq!(guard.deletes, vec!["1727000000.5/b?c"]);
    assert_eq!(guard.profiles.len(), 4);
}

#[tokio::test]
async fn upstream_errors_become_status_errors() {
    let gateway = gateway_for(seeded_store()).await;

    let err = gateway
        .delete(&ProfileId::from("does-not-exist"))
        .await
        .expect_err("delete fails");

    assert!(err.is_not_found());
    assert!(matches!(err, GatewayError::Status { status: 404, .. }));
}

#[tokio::test]
async fn unreachable_api_is_a_transport_error() {
    let gateway = HttpProfileGateway::new(&ProfileApiConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
    })
    .expect("client builds");

    let err = gateway.list().await.expect_err("nothing listens on port 9");
    assert!(matches!(err, GatewayError::Transport(_)));
}
