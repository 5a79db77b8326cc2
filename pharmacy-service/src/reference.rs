//! Reference data loader
//!
//! Read-only `(id, label)` lists used to populate selection UIs: patients,
//! doctors, pharmacists, drugs, suppliers and insurance policies. One snapshot
//! is cached in-process and refreshed after a short TTL, since this data
//! changes rarely but is requested on every form render.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use utoipa::ToSchema;

use crate::error::PharmacyResult;
use crate::models::ReferenceEntry;
use crate::service::PharmacyService;

const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// One snapshot of all reference lists
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReferenceData {
    pub patients: Vec<ReferenceEntry>,
    pub doctors: Vec<ReferenceEntry>,
    pub pharmacists: Vec<ReferenceEntry>,
    pub drugs: Vec<ReferenceEntry>,
    pub suppliers: Vec<ReferenceEntry>,
    pub policies: Vec<ReferenceEntry>,
}

/// TTL cache around one [`ReferenceData`] snapshot
#[derive(Clone)]
pub struct ReferenceCache {
    ttl: Duration,
    slot: Arc<RwLock<Option<(Instant, Arc<ReferenceData>)>>>,
}

impl ReferenceCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Arc::new(RwLock::new(None)),
        }
    }

    pub fn with_default_ttl() -> Self {
        Self::new(DEFAULT_TTL)
    }

    /// Get the cached snapshot if it has not expired
    pub async fn get(&self) -> Option<Arc<ReferenceData>> {
        let slot = self.slot.read().await;
        match slot.as_ref() {
            Some((loaded_at, data)) if loaded_at.elapsed() < self.ttl => Some(Arc::clone(data)),
            _ => None,
        }
    }

    /// Store a fresh snapshot
    pub async fn put(&self, data: Arc<ReferenceData>) {
        let mut slot = self.slot.write().await;
        *slot = Some((Instant::now(), data));
    }
}

impl PharmacyService {
    /// All reference lists, served from the cache when fresh
    pub async fn reference_data(&self) -> PharmacyResult<Arc<ReferenceData>> {
        if let Some(data) = self.reference.get().await {
            return Ok(data);
        }
        let data = Arc::new(self.load_reference_data().await?);
        self.reference.put(Arc::clone(&data)).await;
        Ok(data)
    }

    async fn load_reference_data(&self) -> PharmacyResult<ReferenceData> {
        let patients = self
            .reference_list("SELECT patient_id AS id, name AS label FROM patient ORDER BY patient_id")
            .await?;
        let doctors = self
            .reference_list("SELECT doctor_id AS id, name AS label FROM doctor ORDER BY doctor_id")
            .await?;
        let pharmacists = self
            .reference_list(
                "SELECT pharmacist_id AS id, name AS label FROM pharmacist ORDER BY pharmacist_id",
            )
            .await?;
        let drugs = self
            .reference_list(
                "SELECT drug_id AS id, drug_name AS label FROM drug_catalogue ORDER BY drug_id",
            )
            .await?;
        let suppliers = self
            .reference_list(
                "SELECT supplier_id AS id, company_name AS label FROM supplier ORDER BY supplier_id",
            )
            .await?;
        let policies = self
            .reference_list("SELECT policy_id AS id, company AS label FROM insurance ORDER BY policy_id")
            .await?;

        Ok(ReferenceData {
            patients,
            doctors,
            pharmacists,
            drugs,
            suppliers,
            policies,
        })
    }

    async fn reference_list(&self, query: &str) -> PharmacyResult<Vec<ReferenceEntry>> {
        let entries = sqlx::query_as::<_, ReferenceEntry>(query)
            .fetch_all(self.pool())
            .await?;
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Arc<ReferenceData> {
        Arc::new(ReferenceData {
            patients: vec![ReferenceEntry {
                id: 601,
                label: "Maria Keane".to_string(),
            }],
            doctors: vec![],
            pharmacists: vec![],
            drugs: vec![ReferenceEntry {
                id: 2001,
                label: "Amoxicillin".to_string(),
            }],
            suppliers: vec![],
            policies: vec![],
        })
    }

    #[tokio::test]
    async fn empty_cache_misses() {
        let cache = ReferenceCache::with_default_ttl();
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn fresh_snapshot_is_served() {
        let cache = ReferenceCache::with_default_ttl();
        cache.put(snapshot()).await;
        let data = cache.get().await.expect("snapshot should still be fresh");
        assert_eq!(data.patients.len(), 1);
        assert_eq!(data.drugs[0].id, 2001);
    }

    #[tokio::test]
    async fn expired_snapshot_misses() {
        let cache = ReferenceCache::new(Duration::ZERO);
        cache.put(snapshot()).await;
        assert!(cache.get().await.is_none());
    }
}
