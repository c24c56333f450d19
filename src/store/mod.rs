use chrono::Utc;
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::core::UserProfile;

const DEFAULT_DIR_NAME: &str = ".nestegg";
const PROFILE_FILE: &str = "profile.json";
const TMP_SUFFIX: &str = "tmp";

/// Storage failures. Missing files are not errors; they surface as
/// `Ok(None)` / `Ok(false)` from the accessors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed profile document: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Application data directory, defaulting to `~/.nestegg`.
pub fn default_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("NESTEGG_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// File-backed store for the single user profile. One logical record,
/// last write wins, no locking.
#[derive(Clone, Debug)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            path: data_dir.join(PROFILE_FILE),
        }
    }

    pub fn open_default() -> Self {
        Self::new(default_data_dir())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the profile. A missing file is an ordinary not-found outcome;
    /// unreadable or malformed content is an error.
    pub fn load(&self) -> Result<Option<UserProfile>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        let profile = serde_json::from_str(&data)?;
        Ok(Some(profile))
    }

    /// Persists the profile, stamping `saved_at` with the write time. Any
    /// caller-supplied timestamp is discarded. Returns the record as written.
    pub fn save(&self, profile: &UserProfile) -> Result<UserProfile> {
        let mut stamped = profile.clone();
        stamped.saved_at = Some(Utc::now());
        let json = serde_json::to_string_pretty(&stamped)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "profile saved");
        Ok(stamped)
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Removes the profile; `Ok(false)` when there was nothing to delete.
    pub fn delete(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)?;
        tracing::debug!(path = %self.path.display(), "profile deleted");
        Ok(true)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{IncomeFlow, IncomeFlowKind, MaritalStatus, RiskTolerance};
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (ProfileStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = ProfileStore::new(temp.path().to_path_buf());
        (store, temp)
    }

    fn sample_profile() -> UserProfile {
        UserProfile {
            age: 42,
            target_retirement_age: 60,
            marital_status: MaritalStatus::Married,
            current_savings: 280_000.0,
            monthly_contribution: 1_500.0,
            risk_tolerance: RiskTolerance::Moderate,
            asset_allocation: None,
            expected_monthly_expenses: Some(4_000.0),
            income_flows: vec![IncomeFlow {
                id: "test-flow".to_string(),
                name: "Social Security".to_string(),
                kind: IncomeFlowKind::SocialSecurity,
                monthly_amount: 2_200.0,
                start_age: 67,
                end_age: None,
                inflation_adjusted: true,
            }],
            saved_at: None,
        }
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (store, _guard) = store_with_temp_dir();
        let profile = sample_profile();

        let saved = store.save(&profile).expect("save profile");
        assert!(saved.saved_at.is_some(), "save must stamp the timestamp");
        assert!(store.exists());
        assert!(store.path().ends_with("profile.json"));

        let loaded = store.load().expect("load profile").expect("profile found");
        assert_eq!(loaded.age, 42);
        assert_eq!(loaded.income_flows.len(), 1);
        assert_eq!(loaded.saved_at, saved.saved_at);
    }

    #[test]
    fn missing_profile_is_not_an_error() {
        let (store, _guard) = store_with_temp_dir();
        assert!(!store.exists());
        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn delete_reports_whether_anything_existed() {
        let (store, _guard) = store_with_temp_dir();
        assert!(!store.delete().expect("delete on empty store"));

        store.save(&sample_profile()).expect("save profile");
        assert!(store.delete().expect("delete existing profile"));
        assert!(!store.exists());
    }

    #[test]
    fn malformed_document_surfaces_as_an_error() {
        let (store, _guard) = store_with_temp_dir();
        fs::create_dir_all(store.path().parent().expect("parent dir")).expect("mkdir");
        fs::write(store.path(), "{ not json").expect("write junk");

        let err = store.load().expect_err("malformed content must error");
        assert!(matches!(err, StoreError::Malformed(_)));
    }

    #[test]
    fn save_overwrites_the_previous_record() {
        let (store, _guard) = store_with_temp_dir();
        let mut profile = sample_profile();
        store.save(&profile).expect("first save");

        profile.current_savings = 300_000.0;
        store.save(&profile).expect("second save");

        let loaded = store.load().expect("load").expect("found");
        assert_eq!(loaded.current_savings, 300_000.0);
    }
}
