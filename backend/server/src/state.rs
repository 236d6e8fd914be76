use std::{fs, sync::Arc};

use anyhow::{Context, Error};
use bank::{Bill, Dish, RecordStore};
use tracing::info;

use super::config::Config;

pub struct State {
    pub config: Config,
    pub dishes: RecordStore<Dish>,
    pub bills: RecordStore<Bill>,
}

impl State {
    pub fn new(config: Config) -> Result<Arc<Self>, Error> {
        let data_dir = config.data_dir();

        if !data_dir.exists() {
            info!("Creating data directory {}", data_dir.display());
            fs::create_dir_all(&data_dir)
                .with_context(|| format!("create data directory {}", data_dir.display()))?;
        }

        Ok(Arc::new(Self {
            dishes: RecordStore::new(&data_dir),
            bills: RecordStore::new(&data_dir),
            config,
        }))
    }
}
