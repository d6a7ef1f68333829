//! Verify command - check the gate fan-out invariant on a network file

use super::read_network;
use crate::cache::fan_out_violations;
use crate::cli::args::VerifyArgs;
use crate::config::Config;
use crate::error::{PropnetError, PropnetResult};
use crate::network::ComponentId;
use crate::ui::{self, Mark, OutputMode};

/// Execute the verify command
pub async fn execute(args: VerifyArgs, config: &Config) -> PropnetResult<()> {
    let mode = OutputMode::detect();
    let policy = args
        .policy
        .map(Into::into)
        .unwrap_or(config.normalize.buffer_policy);

    let network = read_network(&args.network).await?;
    let violations = fan_out_violations(&network, policy);

    if violations.is_empty() {
        ui::status(
            mode,
            Mark::Ok,
            &format!("No unbuffered gate edges in {} components", network.len()),
            Some(&policy.to_string()),
        );
        return Ok(());
    }

    for (source, target) in &violations {
        let describe = |id: ComponentId| {
            network
                .component(id)
                .map(|c| format!("#{} {}", id.index(), c))
                .unwrap_or_default()
        };
        let edge = format!("{} -> {}", describe(*source), describe(*target));
        ui::status(mode, Mark::Fail, &edge, None);
    }

    Err(PropnetError::User(format!(
        "{} edges violate the {} buffering rule",
        violations.len(),
        policy
    )))
}
