use crate::model::PlannerState;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge l'état depuis un support.
    fn load(&self) -> anyhow::Result<PlannerState>;
    /// Sauvegarde de manière atomique.
    fn save(&self, state: &PlannerState) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self { path: path.as_ref().to_path_buf() })
    }

    /// Fichier absent : état vide. Fichier illisible : erreur.
    pub fn load_or_default(&self) -> anyhow::Result<PlannerState> {
        if !self.path.exists() {
            return Ok(PlannerState::default());
        }
        self.load()
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<PlannerState> {
        let data = fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let state: PlannerState = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        #[cfg(feature = "logging")]
        tracing::debug!(
            path = %self.path.display(),
            employees = state.employees.len(),
            days = state.schedule.days.len(),
            "state loaded"
        );
        Ok(state)
    }

    fn save(&self, state: &PlannerState) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(state)?;
        let mut tmp = NamedTempFile::new_in(
            self.path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new(".")))
            .with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        #[cfg(feature = "logging")]
        tracing::debug!(path = %self.path.display(), "state saved");
        Ok(())
    }
}
