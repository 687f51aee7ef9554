use crate::auth::AuthProvider;
use crate::client::ClientInfo;
use crate::document::QuotationData;
use crate::quotation::{self, ChargeConfig, QuotationBreakdown};
use crate::settings::{PricingSettings, SettingsStore};
use crate::uploads::{self, UploadedFile};
use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<SettingsStore>,
    pub auth: Arc<dyn AuthProvider>,
    pub default_charges: ChargeConfig,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct QuotationRequest {
    pub files: Vec<UploadedFile>,
    #[serde(default)]
    pub client_info: ClientInfo,
    /// Falls back to the configured default rates when absent
    pub charges: Option<ChargeConfig>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct QuotationResponse {
    pub breakdown: QuotationBreakdown,
    pub document: QuotationData,
}

pub struct HttpServer;

impl HttpServer {
    pub async fn start(port: u16, state: AppState) -> Result<(), Box<dyn std::error::Error>> {
        let app = router(state);
        let listener = TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
        tracing::info!("HTTP server running on port {}", port);
        axum::serve(listener, app).await?;
        Ok(())
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/quotation", post(create_quotation))
        .route("/settings", get(get_settings).put(update_settings))
        .route("/me", get(current_user))
        .route("/signout", post(sign_out))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// Recomputes the breakdown from scratch against a fresh settings snapshot.
/// The additional-charges flag lives in the persisted settings, not in the
/// per-request rates.
async fn create_quotation(
    State(state): State<AppState>,
    Json(request): Json<QuotationRequest>,
) -> Json<QuotationResponse> {
    let settings = state.settings.snapshot();
    let mut charges = request.charges.unwrap_or(state.default_charges);
    charges.additional_charges_enabled = settings.additional_charges_enabled;

    let line_items = uploads::line_items(&request.files);
    let breakdown = quotation::compute(
        &line_items,
        &settings.discount,
        &settings.volume_tiers,
        &charges,
    );
    tracing::debug!(
        "Computed quotation: subtotal={} grand_total={}",
        breakdown.subtotal,
        breakdown.grand_total
    );
    let document = QuotationData::assemble(
        request.files,
        &request.client_info,
        charges,
        breakdown.clone(),
    );
    Json(QuotationResponse {
        breakdown,
        document,
    })
}

async fn get_settings(State(state): State<AppState>) -> Json<PricingSettings> {
    Json(state.settings.snapshot())
}

async fn update_settings(
    State(state): State<AppState>,
    Json(settings): Json<PricingSettings>,
) -> Result<Json<PricingSettings>, (StatusCode, String)> {
    state
        .settings
        .update(settings)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Json(state.settings.snapshot()))
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct CurrentUserResponse {
    /// Absent for the anonymous/guest view
    pub full_name: Option<String>,
}

async fn current_user(State(state): State<AppState>) -> Json<CurrentUserResponse> {
    let full_name = state.auth.current_user().await.map(|user| user.full_name);
    Json(CurrentUserResponse { full_name })
}

/// Auth failures are recoverable notifications, never fatal to the quotation flow.
async fn sign_out(State(state): State<AppState>) -> Result<StatusCode, (StatusCode, String)> {
    state
        .auth
        .sign_out()
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, e.to_string()))?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod http_tests {
    use super::*;
    use crate::quotation::{DiscountSettings, VolumeTier};
    use crate::uploads::VolumeMethod;
    use uuid::Uuid;

    fn test_state(dir: &tempfile::TempDir) -> AppState {
        AppState {
            settings: Arc::new(SettingsStore::open(dir.path().join("settings.json"))),
            auth: Arc::new(crate::auth::GuestAuth),
            default_charges: ChargeConfig::default(),
        }
    }

    fn test_file(estimated_cost: f64, volume: f64) -> UploadedFile {
        UploadedFile {
            id: Uuid::new_v4(),
            file_name: "bracket.stl".to_string(),
            print_type: "FDM".to_string(),
            material: "PLA".to_string(),
            finish: "Standard".to_string(),
            quantity: 1,
            volume,
            weight: volume * 1.24,
            volume_method: VolumeMethod::Calculated,
            estimated_cost,
            is_calculating_volume: false,
        }
    }

    #[tokio::test]
    async fn quotation_uses_default_charges_when_none_given() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let request = QuotationRequest {
            files: vec![test_file(1000.0, 10.0)],
            client_info: ClientInfo::default(),
            charges: None,
        };
        let Json(response) = create_quotation(State(state), Json(request)).await;
        assert_eq!(response.breakdown.grand_total, 1330.0);
        assert_eq!(response.document.breakdown, response.breakdown);
    }

    #[tokio::test]
    async fn settings_update_feeds_next_quotation() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let settings = PricingSettings {
            discount: DiscountSettings {
                enabled: true,
                percentage: 10.0,
            },
            volume_tiers: vec![VolumeTier {
                min_volume: 5.0,
                discount_percent: 5.0,
                label: "Bulk".to_string(),
            }],
            additional_charges_enabled: false,
        };
        update_settings(State(state.clone()), Json(settings))
            .await
            .unwrap();

        let request = QuotationRequest {
            files: vec![test_file(1000.0, 10.0)],
            client_info: ClientInfo::default(),
            charges: None,
        };
        let Json(response) = create_quotation(State(state), Json(request)).await;
        // 1000 - 100 regular - 50 volume = 850, taxed at 18%, charges disabled
        assert_eq!(response.breakdown.amount_after_discount, 850.0);
        assert_eq!(response.breakdown.grand_total, 1003.0);
        // face values still reported
        assert_eq!(response.breakdown.packaging_charge, 50.0);
    }

    #[tokio::test]
    async fn guest_view_has_no_user() {
        let dir = tempfile::tempdir().unwrap();
        let Json(me) = current_user(State(test_state(&dir))).await;
        assert!(me.full_name.is_none());
    }

    #[tokio::test]
    async fn get_settings_returns_defaults_for_fresh_store() {
        let dir = tempfile::tempdir().unwrap();
        let Json(settings) = get_settings(State(test_state(&dir))).await;
        assert!(!settings.discount.enabled);
        assert!(settings.additional_charges_enabled);
    }
}
