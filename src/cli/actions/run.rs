use super::Action;
use crate::{check::Check, notify::SnsNotifier, tls::TlsProbe};

/// Execute the action's business logic by delegating to the appropriate module
pub async fn execute(action: Action) -> anyhow::Result<()> {
    match action {
        Action::Check {
            settings,
            tls,
            json,
        } => {
            let notifier = SnsNotifier::from_env().await;
            let check = Check::new(settings, TlsProbe::new(tls), notifier);
            let report = check.run().await?;

            if json {
                println!("{}", serde_json::to_string(&report)?);
            }

            Ok(())
        }
    }
}
