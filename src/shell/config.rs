use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, anyhow};

use crate::modules::cohort_hours::core::week::WeekPolicy;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_DATA_DIR: &str = "./public";
const DB_FILE: &str = "cohort_hours.db";
const REPORT_FILE: &str = "cohort.csv";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub week_policy: WeekPolicy,
}

impl Config {
    /// Reads configuration from the environment. Unset variables fall back
    /// to defaults; set-but-invalid values fail startup, so a typo cannot
    /// silently flip the week policy.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(
            std::env::var("COHORT_HOURS_ADDR").ok(),
            std::env::var("COHORT_HOURS_DATA_DIR").ok(),
            std::env::var("COHORT_HOURS_WEEK_POLICY").ok(),
        )
    }

    fn from_vars(
        addr: Option<String>,
        data_dir: Option<String>,
        week_policy: Option<String>,
    ) -> anyhow::Result<Self> {
        let bind_addr = addr
            .as_deref()
            .unwrap_or(DEFAULT_ADDR)
            .parse()
            .with_context(|| format!("invalid COHORT_HOURS_ADDR {addr:?}"))?;

        let data_dir = PathBuf::from(data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR));

        let week_policy = match week_policy {
            Some(name) => WeekPolicy::parse(&name).ok_or_else(|| {
                anyhow!("invalid COHORT_HOURS_WEEK_POLICY {name:?} (expected range-column or file-name)")
            })?,
            None => WeekPolicy::RangeColumn,
        };

        Ok(Self {
            bind_addr,
            data_dir,
            week_policy,
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }

    pub fn report_path(&self) -> PathBuf {
        self.data_dir.join(REPORT_FILE)
    }
}
