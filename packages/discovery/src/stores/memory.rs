//! In-memory result storage for testing and development.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::error::Result;
use crate::traits::store::ResultStore;
use crate::types::result::DiscoveryResult;

/// In-memory storage for discovery results.
///
/// Useful for testing and development. Not suitable for production
/// as data is lost on restart.
pub struct MemoryResultStore {
    results: RwLock<HashMap<Uuid, DiscoveryResult>>,
}

impl Default for MemoryResultStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryResultStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            results: RwLock::new(HashMap::new()),
        }
    }

    /// Clear all stored results.
    pub fn clear(&self) {
        self.results.write().unwrap().clear();
    }

    /// Total number of stored results across all jobs.
    pub fn result_count(&self) -> usize {
        self.results.read().unwrap().len()
    }

    fn update_flag(
        &self,
        result_id: Uuid,
        set: impl FnOnce(&mut DiscoveryResult),
    ) -> Option<DiscoveryResult> {
        let mut results = self.results.write().unwrap();
        let result = results.get_mut(&result_id)?;
        set(result);
        result.updated_at = Utc::now();
        Some(result.clone())
    }
}

#[async_trait]
impl ResultStore for MemoryResultStore {
    async fn insert(&self, result: DiscoveryResult) -> Result<()> {
        self.results.write().unwrap().insert(result.id, result);
        Ok(())
    }

    async fn get(&self, result_id: Uuid) -> Result<Option<DiscoveryResult>> {
        Ok(self.results.read().unwrap().get(&result_id).cloned())
    }

    async fn for_job(
        &self,
        job_id: Uuid,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<DiscoveryResult>> {
        let results = self.results.read().unwrap();

        let mut matching: Vec<_> = results
            .values()
            .filter(|r| r.job_id == job_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.overall_score
                .partial_cmp(&a.overall_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(matching.into_iter().skip(skip).take(limit).collect())
    }

    async fn count_for_job(&self, job_id: Uuid) -> Result<usize> {
        Ok(self
            .results
            .read()
            .unwrap()
            .values()
            .filter(|r| r.job_id == job_id)
            .count())
    }

    async fn exists_for_job(&self, job_id: Uuid, dedup_key: &str) -> Result<bool> {
        Ok(self
            .results
            .read()
            .unwrap()
            .values()
            .any(|r| r.job_id == job_id && r.dedup_key == dedup_key))
    }

    async fn mark_saved(&self, result_id: Uuid) -> Result<Option<DiscoveryResult>> {
        Ok(self.update_flag(result_id, |r| r.is_saved = true))
    }

    async fn mark_passed(&self, result_id: Uuid) -> Result<Option<DiscoveryResult>> {
        Ok(self.update_flag(result_id, |r| r.is_passed = true))
    }

    async fn saved(&self) -> Result<Vec<DiscoveryResult>> {
        let results = self.results.read().unwrap();
        let mut saved: Vec<_> = results.values().filter(|r| r.is_saved).cloned().collect();
        saved.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(saved)
    }

    async fn passed(&self) -> Result<Vec<DiscoveryResult>> {
        let results = self.results.read().unwrap();
        let mut passed: Vec<_> = results.values().filter(|r| r.is_passed).cloned().collect();
        passed.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Score;
    use crate::traits::connector::SourceId;
    use crate::types::candidate::Candidate;

    fn result_for(job_id: Uuid, name: &str, overall: f64) -> DiscoveryResult {
        let candidate = Candidate::new(name, "FinTech", "Seed", SourceId::Yc);
        let score = Score {
            overall,
            ..Score::default()
        };
        DiscoveryResult::from_candidate(job_id, &candidate, score)
    }

    #[tokio::test]
    async fn results_for_job_are_sorted_and_paginated() {
        let store = MemoryResultStore::new();
        let job_id = Uuid::new_v4();

        store.insert(result_for(job_id, "low", 40.0)).await.unwrap();
        store.insert(result_for(job_id, "high", 90.0)).await.unwrap();
        store.insert(result_for(job_id, "mid", 70.0)).await.unwrap();
        store
            .insert(result_for(Uuid::new_v4(), "other job", 99.0))
            .await
            .unwrap();

        let page = store.for_job(job_id, 0, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name, "high");
        assert_eq!(page[1].name, "mid");

        let rest = store.for_job(job_id, 2, 10).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].name, "low");

        assert_eq!(store.count_for_job(job_id).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn dedup_lookup_is_scoped_to_the_job() {
        let store = MemoryResultStore::new();
        let job_a = Uuid::new_v4();
        let job_b = Uuid::new_v4();

        let result = result_for(job_a, "Acme", 50.0);
        let key = result.dedup_key.clone();
        store.insert(result).await.unwrap();

        assert!(store.exists_for_job(job_a, &key).await.unwrap());
        assert!(!store.exists_for_job(job_b, &key).await.unwrap());
    }

    #[tokio::test]
    async fn mark_saved_is_idempotent() {
        let store = MemoryResultStore::new();
        let result = result_for(Uuid::new_v4(), "Acme", 50.0);
        let id = result.id;
        store.insert(result).await.unwrap();

        let first = store.mark_saved(id).await.unwrap().unwrap();
        assert!(first.is_saved);

        let second = store.mark_saved(id).await.unwrap().unwrap();
        assert!(second.is_saved);
        assert!(second.updated_at >= first.updated_at);

        assert_eq!(store.saved().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn mark_on_unknown_id_returns_none() {
        let store = MemoryResultStore::new();
        assert!(store.mark_saved(Uuid::new_v4()).await.unwrap().is_none());
        assert!(store.mark_passed(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn saved_and_passed_are_independent_flags() {
        let store = MemoryResultStore::new();
        let result = result_for(Uuid::new_v4(), "Acme", 50.0);
        let id = result.id;
        store.insert(result).await.unwrap();

        store.mark_saved(id).await.unwrap();
        store.mark_passed(id).await.unwrap();

        let stored = store.get(id).await.unwrap().unwrap();
        assert!(stored.is_saved);
        assert!(stored.is_passed);
    }
}
