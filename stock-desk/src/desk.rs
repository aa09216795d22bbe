//! Desk context shared by every command of a run

use crate::cli::Cli;
use crate::utils::prompt::Console;
use stock_client::{ClientConfig, HttpClient, TableDesk};
use tracing::debug;

pub struct Desk {
    config: ClientConfig,
    tables: TableDesk<HttpClient>,
    console: Console,
}

impl Desk {
    /// Environment defaults, overridden by command-line flags
    pub fn config_from(cli: &Cli) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(url) = &cli.api_url {
            config.base_url = url.clone();
        }
        if let Some(path) = &cli.session_file {
            config = config.with_session_file(path.clone());
        }
        if let Some(join_key) = cli.join_key {
            config = config.with_join_key(join_key);
        }
        config
    }

    pub fn connect(config: ClientConfig) -> anyhow::Result<Self> {
        let session = config.open_session();
        let http = config.build_http_client(session)?;
        debug!(base_url = %config.base_url, join_key = %config.join_key, "Desk connected");

        Ok(Self {
            tables: TableDesk::new(http).with_join_key(config.join_key),
            config,
            console: Console::new(),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api(&self) -> &HttpClient {
        self.tables.api()
    }

    pub fn tables(&mut self) -> &mut TableDesk<HttpClient> {
        &mut self.tables
    }

    pub fn console(&mut self) -> &mut Console {
        &mut self.console
    }
}
