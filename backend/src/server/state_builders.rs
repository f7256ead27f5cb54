//! Builders wiring outbound adapters into the HTTP state.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::info;

use symptom_checker::config::{OutboundTimeouts, VendorSettings};
use symptom_checker::domain::password::PasswordHasher;
use symptom_checker::domain::{
    AccessTokenSigner, AccountService, SymptomCheckPorts, SymptomCheckService,
};
use symptom_checker::inbound::http::state::HttpState;
use symptom_checker::outbound::AdapterBuildError;
use symptom_checker::outbound::gemini::GeminiSymptomAnalyzer;
use symptom_checker::outbound::geoapify::{GeoapifyHospitalLocator, GeoapifySearch};
use symptom_checker::outbound::supabase::{
    SupabaseClient, SupabaseHistoryRepository, SupabaseImageStore, SupabaseUserRepository,
};

fn adapter_error(adapter: &str, err: AdapterBuildError) -> std::io::Error {
    std::io::Error::other(format!("failed to build {adapter} adapter: {err}"))
}

fn build_account_service(
    vendors: &VendorSettings,
    store: SupabaseClient,
) -> std::io::Result<AccountService<SupabaseUserRepository>> {
    let signer = AccessTokenSigner::new(
        vendors.secret_key.as_bytes(),
        vendors.token_ttl,
        Arc::new(DefaultClock),
    )
    .map_err(|err| std::io::Error::other(format!("invalid token signing key: {err}")))?;
    Ok(AccountService::new(
        Arc::new(SupabaseUserRepository::new(store)),
        PasswordHasher::default(),
        signer,
    ))
}

fn build_symptom_check_service(
    vendors: &VendorSettings,
    timeouts: OutboundTimeouts,
    store: SupabaseClient,
) -> std::io::Result<SymptomCheckService> {
    let analyzer = GeminiSymptomAnalyzer::new(
        &vendors.gemini_base_url,
        &vendors.gemini_model,
        vendors.google_api_key.as_str(),
        timeouts.model,
    )
    .map_err(|err| adapter_error("Gemini", err))?;
    let hospitals = GeoapifyHospitalLocator::new(
        &vendors.geoapify_base_url,
        vendors.geoapify_api_key.as_str(),
        timeouts.places,
        GeoapifySearch::default(),
    )
    .map_err(|err| adapter_error("Geoapify", err))?;

    Ok(SymptomCheckService::new(SymptomCheckPorts {
        analyzer: Arc::new(analyzer),
        hospitals: Arc::new(hospitals),
        images: Arc::new(SupabaseImageStore::new(
            store.clone(),
            vendors.image_bucket.as_str(),
        )),
        history: Arc::new(SupabaseHistoryRepository::new(store)),
    }))
}

/// Build the HTTP state backed by the hosted collaborators.
///
/// # Errors
/// Returns [`std::io::Error`] when an HTTP client or the token signer cannot
/// be constructed.
pub(super) fn build_http_state(
    vendors: &VendorSettings,
    timeouts: OutboundTimeouts,
) -> std::io::Result<HttpState> {
    let store = SupabaseClient::new(
        vendors.supabase_url.clone(),
        vendors.supabase_key.as_str(),
        timeouts.store,
    )
    .map_err(|err| adapter_error("Supabase", err))?;

    let accounts = Arc::new(build_account_service(vendors, store.clone())?);
    let checks = Arc::new(build_symptom_check_service(vendors, timeouts, store)?);
    info!(
        model = %vendors.gemini_model,
        bucket = %vendors.image_bucket,
        "outbound adapters ready"
    );

    Ok(HttpState {
        login: accounts.clone(),
        signup: accounts.clone(),
        current_user: accounts,
        symptom_checks: checks.clone(),
        history: checks,
    })
}
