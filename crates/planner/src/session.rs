//! The saved planning session: the form snapshot plus the wizard position.

use river_poultry_core::{BudgetForm, STORAGE_KEY, Wizard, WizardStep};

use crate::store::{FileStore, StoreError, WIZARD_STEP_KEY};

/// A form and wizard rehydrated from the local store.
///
/// Nothing is written back until [`Session::save`] is called.
#[derive(Debug, Clone)]
pub struct Session {
    store: FileStore,
    pub form: BudgetForm,
    pub wizard: Wizard,
}

impl Session {
    /// Load the last saved session, or start a fresh one.
    ///
    /// A snapshot that is not a JSON object at all is discarded with a
    /// warning; individual bad fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` only when the store itself cannot be read.
    pub fn open(store: FileStore) -> Result<Self, StoreError> {
        let form = match store.get_raw(STORAGE_KEY)? {
            None => BudgetForm::new(),
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Saved form is unreadable, starting fresh");
                BudgetForm::new()
            }),
        };
        let step = store
            .get::<WizardStep>(WIZARD_STEP_KEY)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Saved wizard step is unreadable");
                None
            })
            .unwrap_or_default();

        Ok(Self {
            store,
            form,
            wizard: Wizard::at(step),
        })
    }

    /// Write the form and wizard step back.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if either write fails.
    pub fn save(&self) -> Result<(), StoreError> {
        self.store.set(STORAGE_KEY, &self.form)?;
        self.store.set(WIZARD_STEP_KEY, &self.wizard.step())
    }

    /// Back to the first step with a fresh form.
    pub fn reset(&mut self) {
        self.wizard.reset(&mut self.form);
    }

    #[must_use]
    pub const fn store(&self) -> &FileStore {
        &self.store
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use river_poultry_core::{BirdType, HealthKind};
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_fresh_session_is_seeded() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::open(FileStore::new(dir.path())).unwrap();
        assert!(!session.form.feed_items.is_empty());
        assert!(session.form.num_birds.is_empty());
        assert_eq!(session.wizard.step(), WizardStep::BasicInformation);
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::open(FileStore::new(dir.path())).unwrap();
        session.form.set_bird_type(BirdType::Broiler);
        session.form.num_birds = "500".to_string();
        session.form.production_period = "42".to_string();
        session.form.doc_cost_per_chick = "2500".to_string();
        session.form.broiler_price = "18000".to_string();
        session.form.add_health_entry(
            HealthKind::Vaccination,
            "Gumboro",
            Decimal::from(14),
            Decimal::from(30_000),
            "",
        );
        assert!(session.wizard.next(&session.form));
        session.save().unwrap();

        let reopened = Session::open(FileStore::new(dir.path())).unwrap();
        assert_eq!(reopened.form, session.form);
        assert_eq!(reopened.wizard.step(), WizardStep::Feed);
    }

    #[test]
    fn test_corrupt_snapshot_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(format!("{STORAGE_KEY}.json")), "[1, 2").unwrap();
        std::fs::write(dir.path().join(format!("{WIZARD_STEP_KEY}.json")), "42").unwrap();

        let session = Session::open(FileStore::new(dir.path())).unwrap();
        assert!(session.form.num_birds.is_empty());
        assert_eq!(session.wizard.step(), WizardStep::BasicInformation);
    }

    #[test]
    fn test_reset() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::open(FileStore::new(dir.path())).unwrap();
        session.form.num_birds = "100".to_string();
        session.reset();
        assert!(session.form.num_birds.is_empty());
        assert_eq!(session.wizard.step(), WizardStep::BasicInformation);
    }
}
