//! In-memory driven adapters and app wiring shared by HTTP flow tests.

use std::sync::{Arc, Mutex};

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::json;

use symptom_checker::Trace;
use symptom_checker::domain::password::{PasswordHasher, Pbkdf2Params};
use symptom_checker::domain::ports::{
    HistoryPersistenceError, HospitalLocator, HospitalLocatorError, ImageStoreError, NewUser,
    QueryHistoryRepository, SymptomAnalyzer, SymptomAnalyzerError, SymptomImageStore,
    UserPersistenceError, UserRepository,
};
use symptom_checker::domain::{
    AccessTokenSigner, AccountService, Coordinates, Email, HistoryEntry, Hospital,
    NewHistoryEntry, StoredUser, SymptomAnalysis, SymptomCheckPorts, SymptomCheckService,
    SymptomImage, SymptomText, User, UserId, UserName,
};
use symptom_checker::inbound::http::analyze::{analyze_image, analyze_text};
use symptom_checker::inbound::http::health::root;
use symptom_checker::inbound::http::history::list_history;
use symptom_checker::inbound::http::state::HttpState;
use symptom_checker::inbound::http::users::{login, signup};
use symptom_checker::inbound::http::validation::{form_config, json_config};

pub const SIGNING_SECRET: &str = "integration-secret";

/// Fast parameters so flow tests do not pay for production iteration counts.
pub fn test_hasher() -> PasswordHasher {
    PasswordHasher::new(
        Pbkdf2Params::default()
            .with_iterations(10)
            .expect("iterations in range"),
    )
}

/// User table matching emails without regard to case.
#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<StoredUser>>,
}

impl InMemoryUsers {
    pub fn seed(&self, name: &str, email: &str, password_hash: String) -> User {
        let mut rows = self.rows.lock().expect("users lock");
        let user = User {
            id: UserId::new(next_id(rows.len())).expect("id"),
            name: UserName::new(name).expect("name"),
            email: Email::from_stored(email),
        };
        rows.push(StoredUser {
            user: user.clone(),
            password_hash,
        });
        user
    }

    pub fn password_hash(&self, email: &str) -> Option<String> {
        self.rows
            .lock()
            .expect("users lock")
            .iter()
            .find(|row| row.user.email.as_ref().eq_ignore_ascii_case(email))
            .map(|row| row.password_hash.clone())
    }
}

fn next_id(len: usize) -> i64 {
    i64::try_from(len).expect("row count fits") + 1
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut rows = self.rows.lock().expect("users lock");
        if rows.iter().any(|row| row.user.email.matches(&user.email)) {
            return Err(UserPersistenceError::duplicate(user.email.as_ref()));
        }
        let created = User {
            id: UserId::new(next_id(rows.len())).expect("id"),
            name: user.name.clone(),
            email: user.email.clone(),
        };
        rows.push(StoredUser {
            user: created.clone(),
            password_hash: user.password_hash.clone(),
        });
        Ok(created)
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredUser>, UserPersistenceError> {
        Ok(self
            .rows
            .lock()
            .expect("users lock")
            .iter()
            .find(|row| email.matches(&row.user.email))
            .cloned())
    }

    async fn update_password_hash(
        &self,
        id: UserId,
        password_hash: &str,
    ) -> Result<(), UserPersistenceError> {
        let mut rows = self.rows.lock().expect("users lock");
        let row = rows
            .iter_mut()
            .find(|row| row.user.id == id)
            .ok_or_else(UserPersistenceError::missing_row)?;
        password_hash.clone_into(&mut row.password_hash);
        Ok(())
    }
}

/// History table returning newest rows first.
#[derive(Default)]
pub struct InMemoryHistory {
    rows: Mutex<Vec<HistoryEntry>>,
}

#[async_trait]
impl QueryHistoryRepository for InMemoryHistory {
    async fn record(&self, entry: &NewHistoryEntry) -> Result<(), HistoryPersistenceError> {
        let mut rows = self.rows.lock().expect("history lock");
        let id = next_id(rows.len());
        rows.push(HistoryEntry {
            id,
            user_id: entry.user_id,
            symptom_text: entry.symptom_text.as_str().to_owned(),
            response_data: entry.response_data.clone(),
            image_url: entry.image_url.clone(),
            created_at: Some(Utc::now() + Duration::seconds(id)),
        });
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<HistoryEntry>, HistoryPersistenceError> {
        let mut rows: Vec<HistoryEntry> = self
            .rows
            .lock()
            .expect("history lock")
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

/// Photo bucket recording uploaded object paths.
#[derive(Default)]
pub struct InMemoryImages {
    uploads: Mutex<Vec<String>>,
}

impl InMemoryImages {
    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().expect("uploads lock").clone()
    }
}

#[async_trait]
impl SymptomImageStore for InMemoryImages {
    async fn upload(
        &self,
        user_id: UserId,
        image: &SymptomImage,
    ) -> Result<String, ImageStoreError> {
        let mut uploads = self.uploads.lock().expect("uploads lock");
        let path = format!("{user_id}/{}.{}", uploads.len(), image.extension());
        uploads.push(path.clone());
        Ok(format!("https://store.test/public/symptom_images/{path}"))
    }
}

/// Analyser echoing the submitted symptoms as the single condition.
pub struct EchoAnalyzer;

fn echo(symptoms: &SymptomText) -> SymptomAnalysis {
    serde_json::from_value(json!({
        "possible_conditions": [
            {"condition": format!("Matches: {}", symptoms.as_str()), "confidence_score": "Medium"}
        ],
        "recommended_next_steps": "Rest and monitor.",
        "disclaimer": "This is not medical advice."
    }))
    .expect("analysis")
}

#[async_trait]
impl SymptomAnalyzer for EchoAnalyzer {
    async fn analyze_text(
        &self,
        symptoms: &SymptomText,
    ) -> Result<SymptomAnalysis, SymptomAnalyzerError> {
        Ok(echo(symptoms))
    }

    async fn analyze_image(
        &self,
        symptoms: &SymptomText,
        _image: &SymptomImage,
    ) -> Result<SymptomAnalysis, SymptomAnalyzerError> {
        Ok(echo(symptoms))
    }
}

/// Locator returning one hospital, or a rejection when `failing`.
pub struct OneHospital {
    pub failing: bool,
}

#[async_trait]
impl HospitalLocator for OneHospital {
    async fn nearby(&self, _near: Coordinates) -> Result<Vec<Hospital>, HospitalLocatorError> {
        if self.failing {
            return Err(HospitalLocatorError::rejected(401_u16, "Invalid apiKey"));
        }
        Ok(vec![Hospital {
            name: "St Thomas' Hospital".to_owned(),
            address: "Westminster Bridge Road, London".to_owned(),
            distance_meters: 850,
        }])
    }
}

/// Adapters behind one app instance.
pub struct World {
    pub users: Arc<InMemoryUsers>,
    pub history: Arc<dyn QueryHistoryRepository>,
    pub images: Arc<InMemoryImages>,
    pub hospitals: Arc<dyn HospitalLocator>,
}

impl Default for World {
    fn default() -> Self {
        Self {
            users: Arc::default(),
            history: Arc::new(InMemoryHistory::default()),
            images: Arc::default(),
            hospitals: Arc::new(OneHospital { failing: false }),
        }
    }
}

impl World {
    pub fn http_state(&self) -> HttpState {
        let signer = AccessTokenSigner::new(
            SIGNING_SECRET,
            Duration::minutes(30),
            Arc::new(mockable::DefaultClock),
        )
        .expect("signer");
        let accounts = Arc::new(AccountService::new(self.users.clone(), test_hasher(), signer));
        let checks = Arc::new(SymptomCheckService::new(SymptomCheckPorts {
            analyzer: Arc::new(EchoAnalyzer),
            hospitals: self.hospitals.clone(),
            images: self.images.clone(),
            history: self.history.clone(),
        }));
        HttpState {
            login: accounts.clone(),
            signup: accounts.clone(),
            current_user: accounts,
            symptom_checks: checks.clone(),
            history: checks,
        }
    }

    pub async fn app(
        &self,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
        test::init_service(
            App::new()
                .app_data(web::Data::new(self.http_state()))
                .app_data(json_config())
                .app_data(form_config())
                .wrap(Trace)
                .service(root)
                .service(signup)
                .service(login)
                .service(analyze_text)
                .service(analyze_image)
                .service(list_history),
        )
        .await
    }
}
