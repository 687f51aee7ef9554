use crate::client::ClientInfo;
use crate::quotation::types::{ChargeConfig, QuotationBreakdown};
use crate::uploads::UploadedFile;
use async_trait::async_trait;
use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Document generation failed:{0}")]
    GenerationError(String),
}

/// Client identity as it appears on the document, shipping already resolved.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ClientIdentity {
    pub name: String,
    pub gst_number: String,
    pub billing_address: String,
    pub shipping_address: String,
}

/// Flattened payload handed to the document generator. Its rendering format
/// is the generator's business.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct QuotationData {
    pub quotation_number: String,
    pub date: String,
    pub files: Vec<UploadedFile>,
    pub client: ClientIdentity,
    pub charges: ChargeConfig,
    pub breakdown: QuotationBreakdown,
}

impl QuotationData {
    pub fn assemble(
        files: Vec<UploadedFile>,
        client_info: &ClientInfo,
        charges: ChargeConfig,
        breakdown: QuotationBreakdown,
    ) -> Self {
        Self {
            quotation_number: next_quotation_number(),
            date: Utc::now().format("%d/%m/%Y").to_string(),
            files,
            client: ClientIdentity {
                name: client_info.name.clone(),
                gst_number: client_info.gst_number.clone(),
                billing_address: client_info.billing_address.clone(),
                shipping_address: client_info.effective_shipping_address().to_string(),
            },
            charges,
            breakdown,
        }
    }
}

fn next_quotation_number() -> String {
    let fragment = Uuid::new_v4().simple().to_string();
    format!("PQ-{}-{}", Utc::now().format("%Y%m%d"), &fragment[..8])
}

/// Seam for the external document/PDF generator.
#[async_trait]
pub trait DocumentGenerator {
    async fn generate(&self, data: &QuotationData) -> Result<Vec<u8>, DocumentError>;
}
