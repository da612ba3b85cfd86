mod run;

use crate::{check::Settings, tls::TlsConfig};

/// Action enum representing each possible command
#[derive(Debug)]
pub enum Action {
    Check {
        settings: Settings,
        tls: TlsConfig,
        json: bool,
    },
}

impl Action {
    /// Execute the action
    ///
    /// # Errors
    ///
    /// Returns an error if the action fails to execute
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
