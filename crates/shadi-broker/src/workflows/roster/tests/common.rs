use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::auth::{JwtVerifier, Role, TokenVerifier};
use crate::config::ExportConfig;
use crate::profiles::{
    GatewayError, Gender, NewProfile, Profile, ProfileFields, ProfileGateway, ProfileId, Timestamp,
};
use crate::workflows::roster::{roster_router, RosterService};

pub(super) const SECRET: &str = "roster-test-secret";

#[derive(Debug, Clone, PartialEq)]
pub(super) enum GatewayCall {
    List,
    Create,
    Update(Profile),
    Delete(ProfileId),
}

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 9, 30, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn profile(index: usize, father: &str, gender: Gender, taluk: &str) -> Profile {
    Profile {
        id: ProfileId(format!("17000000{index:02}")),
        fields: ProfileFields {
            full_name: format!("Candidate {index}"),
            gender,
            date_of_birth: format!("{}-04-12", 1990 + index),
            permanent_address: "Main Road".to_string(),
            pin_code: "577201".to_string(),
            taluk: taluk.to_string(),
            father_name: father.to_string(),
            mother_name: "Savitha".to_string(),
            education: "B.Sc".to_string(),
            occupation: "Teacher".to_string(),
            caste: "Any".to_string(),
            complexion: "Wheatish".to_string(),
            height: "5'6".to_string(),
            weight: "60".to_string(),
            siblings_count: "2".to_string(),
            asset_details: "House".to_string(),
        },
        data_verification: true,
        payment_status: false,
        payment_utr: None,
        created_at: Timestamp::from(now() - Duration::days(20 + index as i64)),
        updated_at: Timestamp::from(now() - Duration::days(20 + index as i64)),
    }
}

/// Ten profiles, three of which have a father named "... Kumar".
pub(super) fn roster() -> Vec<Profile> {
    vec![
        profile(1, "Suresh Kumar", Gender::Male, "Shimoga"),
        profile(2, "Naveen", Gender::Female, "Sagar"),
        profile(3, "Anil Kumar", Gender::Male, "Sagar"),
        profile(4, "Mohan", Gender::Female, "Shimoga"),
        profile(5, "Prakash", Gender::Male, "Sorab"),
        profile(6, "Ramesh", Gender::Female, "Shimoga"),
        profile(7, "Vinay Kumar", Gender::Male, "Bhadravati"),
        profile(8, "Girish", Gender::Female, "Sagar"),
        profile(9, "Harish", Gender::Male, "Shimoga"),
        profile(10, "Manjunath", Gender::Male, "Sorab"),
    ]
}

#[derive(Default, Clone)]
pub(super) struct MemoryGateway {
    profiles: Arc<Mutex<Vec<Profile>>>,
    calls: Arc<Mutex<Vec<GatewayCall>>>,
}

impl MemoryGateway {
    pub(super) fn seeded(profiles: Vec<Profile>) -> Self {
        Self {
            profiles: Arc::new(Mutex::new(profiles)),
            calls: Arc::default(),
        }
    }

    pub(super) fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().expect("call log poisoned").clone()
    }

    pub(super) fn stored(&self) -> Vec<Profile> {
        self.profiles.lock().expect("profile store poisoned").clone()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().expect("call log poisoned").push(call);
    }
}

#[async_trait]
impl ProfileGateway for MemoryGateway {
    async fn list(&self) -> Result<Vec<Profile>, GatewayError> {
        self.record(GatewayCall::List);
        Ok(self.stored())
    }

    async fn create(&self, _request: &NewProfile) -> Result<Profile, GatewayError> {
        self.record(GatewayCall::Create);
        Err(GatewayError::Status {
            status: 405,
            body: "roster tests never create".to_string(),
        })
    }

    async fn update(&self, profile: &Profile) -> Result<Profile, GatewayError> {
        self.record(GatewayCall::Update(profile.clone()));
        let mut guard = self.profiles.lock().expect("profile store poisoned");
        match guard.iter_mut().find(|stored| stored.id == profile.id) {
            Some(stored) => {
                *stored = profile.clone();
                Ok(profile.clone())
            }
            None => Err(GatewayError::Status {
                status: 404,
                body: "not found".to_string(),
            }),
        }
    }

    async fn delete(&self, id: &ProfileId) -> Result<(), GatewayError> {
        self.record(GatewayCall::Delete(id.clone()));
        let mut guard = self.profiles.lock().expect("profile store poisoned");
        let before = guard.len();
        guard.retain(|stored| &stored.id != id);
        if guard.len() == before {
            return Err(GatewayError::Status {
                status: 404,
                body: "not found".to_string(),
            });
        }
        Ok(())
    }
}

/// Lists fine, rejects every mutation.
#[derive(Default, Clone)]
pub(super) struct ReadOnlyGateway {
    inner: MemoryGateway,
}

impl ReadOnlyGateway {
    pub(super) fn seeded(profiles: Vec<Profile>) -> Self {
        Self {
            inner: MemoryGateway::seeded(profiles),
        }
    }

    pub(super) fn stored(&self) -> Vec<Profile> {
        self.inner.stored()
    }
}

#[async_trait]
impl ProfileGateway for ReadOnlyGateway {
    async fn list(&self) -> Result<Vec<Profile>, GatewayError> {
        self.inner.list().await
    }

    async fn create(&self, _request: &NewProfile) -> Result<Profile, GatewayError> {
        Err(GatewayError::Transport("connection refused".to_string()))
    }

    async fn update(&self, _profile: &Profile) -> Result<Profile, GatewayError> {
        Err(GatewayError::Status {
            status: 500,
            body: "internal".to_string(),
        })
    }

    async fn delete(&self, _id: &ProfileId) -> Result<(), GatewayError> {
        Err(GatewayError::Transport("connection reset".to_string()))
    }
}

/// Serves the first listing, then fails every later one. Mutations succeed.
#[derive(Default)]
pub(super) struct FailingReloadGateway {
    inner: MemoryGateway,
    listed: AtomicBool,
}

impl FailingReloadGateway {
    pub(super) fn seeded(profiles: Vec<Profile>) -> Self {
        Self {
            inner: MemoryGateway::seeded(profiles),
            listed: AtomicBool::new(false),
        }
    }

    pub(super) fn stored(&self) -> Vec<Profile> {
        self.inner.stored()
    }
}

#[async_trait]
impl ProfileGateway for FailingReloadGateway {
    async fn list(&self) -> Result<Vec<Profile>, GatewayError> {
        if self.listed.swap(true, Ordering::SeqCst) {
            return Err(GatewayError::Transport("connection reset".to_string()));
        }
        self.inner.list().await
    }

    async fn create(&self, request: &NewProfile) -> Result<Profile, GatewayError> {
        self.inner.create(request).await
    }

    async fn update(&self, profile: &Profile) -> Result<Profile, GatewayError> {
        self.inner.update(profile).await
    }

    async fn delete(&self, id: &ProfileId) -> Result<(), GatewayError> {
        self.inner.delete(id).await
    }
}

pub(super) struct UnreachableGateway;

#[async_trait]
impl ProfileGateway for UnreachableGateway {
    async fn list(&self) -> Result<Vec<Profile>, GatewayError> {
        Err(GatewayError::Transport("connection refused".to_string()))
    }

    async fn create(&self, _request: &NewProfile) -> Result<Profile, GatewayError> {
        Err(GatewayError::Transport("connection refused".to_string()))
    }

    async fn update(&self, _profile: &Profile) -> Result<Profile, GatewayError> {
        Err(GatewayError::Transport("connection refused".to_string()))
    }

    async fn delete(&self, _id: &ProfileId) -> Result<(), GatewayError> {
        Err(GatewayError::Transport("connection refused".to_string()))
    }
}

pub(super) fn admin_token() -> String {
    JwtVerifier::new(SECRET)
        .issue("ops@shadi", Role::Admin, Duration::minutes(10))
        .expect("token issues")
}

pub(super) fn router_for<G>(gateway: Arc<G>) -> axum::Router
where
    G: ProfileGateway + 'static,
{
    let verifier: Arc<dyn TokenVerifier> = Arc::new(JwtVerifier::new(SECRET));
    roster_router(
        Arc::new(RosterService::new(gateway)),
        verifier,
        ExportConfig::default(),
    )
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    serde_json::from_slice(&read_body(response).await).expect("json payload")
}
