use crate::statics;
use crate::store::prefs_path;
use anyhow::Context;
use clap::Parser;
use std::{path::PathBuf, time::Duration};

/// Command line for the PlayerPrefs editor.
#[derive(Debug, Clone, Parser)]
#[command(name = "ppe", version, about = statics::EN_APP_TITLE)]
pub struct Args {
    /// Company name as set in the game's player settings.
    #[arg(long, env = "PPE_COMPANY", default_value = statics::PP_DEFAULT_COMPANY)]
    pub company: String,

    /// Product name as set in the game's player settings.
    #[arg(long, env = "PPE_PRODUCT", required_unless_present = "plist")]
    pub product: Option<String>,

    /// Edit this property list file instead of the one derived from company/product.
    #[arg(long, env = "PPE_PLIST")]
    pub plist: Option<PathBuf>,

    /// Minimum seconds between reloads from disk.
    #[arg(long, env = "PPE_RELOAD_INTERVAL", default_value_t = statics::PP_DEFAULT_RELOAD_INTERVAL.as_secs_f64())]
    pub reload_interval: f64,

    /// Log every write and delete at info level.
    #[arg(long)]
    pub debug: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub plist_path: PathBuf,
    pub reload_interval: Duration,
    pub debug: bool,
}

impl Args {
    pub fn resolve(self) -> anyhow::Result<Config> {
        let reload_interval = Duration::try_from_secs_f64(self.reload_interval)
            .with_context(|| format!("invalid reload interval {}", self.reload_interval))?;

        let plist_path = match (self.plist, self.product) {
            (Some(path), _) => path,
            (None, Some(product)) => {
                let home = dirs::home_dir().context("could not determine home directory")?;
                prefs_path(&home, &self.company, &product)
            }
            (None, None) => anyhow::bail!("either --product or --plist is required"),
        };

        Ok(Config {
            plist_path,
            reload_interval,
            debug: self.debug,
        })
    }
}
