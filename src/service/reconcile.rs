//! Startup reconciliation of temporary channels left by a previous run.
//!
//! The registry always starts empty, while the temporary set in the channel document may
//! still list channels created before an unclean shutdown. What happens to them is decided
//! by the configured `OrphanPolicy`.

use crate::{
    config::OrphanPolicy, data::channel_config::ChannelConfigRepository, error::AppError,
    platform::Platform, state::BotState,
};

/// What a reconciliation pass did with the persisted temporary channels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Ids dropped because their channel no longer exists.
    pub pruned: Vec<u64>,
    /// Empty leftover channels deleted.
    pub deleted: Vec<u64>,
    /// Ids kept in the temporary set.
    pub kept: Vec<u64>,
}

pub struct ReconcileService<'a, P: Platform> {
    state: &'a BotState,
    platform: &'a P,
}

impl<'a, P: Platform> ReconcileService<'a, P> {
    pub fn new(state: &'a BotState, platform: &'a P) -> Self {
        Self { state, platform }
    }

    /// Applies `policy` to every persisted temporary channel.
    ///
    /// Runs under the teardown lock so a member leaving a leftover channel during the pass
    /// cannot race the sweep.
    pub async fn reconcile(&self, policy: OrphanPolicy) -> Result<ReconcileReport, AppError> {
        let repo = ChannelConfigRepository::new(&self.state.channels);
        let mut report = ReconcileReport::default();

        if policy == OrphanPolicy::Ignore {
            report.kept = repo.temporary_channels().await?;
            return Ok(report);
        }

        let _guard = self.state.rooms.lock_teardown().await;

        for channel_id in repo.temporary_channels().await? {
            let panel_channel_id = repo.temporary_panel(channel_id).await?;

            match self.platform.channel(channel_id).await {
                None => {
                    if let Some(panel_channel_id) = panel_channel_id {
                        self.delete_quietly(panel_channel_id).await;
                    }
                    repo.release_temporary(channel_id).await?;
                    report.pruned.push(channel_id);
                }
                Some(channel) if policy == OrphanPolicy::Sweep && channel.occupants == 0 => {
                    self.delete_quietly(channel_id).await;
                    if let Some(panel_channel_id) = panel_channel_id {
                        self.delete_quietly(panel_channel_id).await;
                    }
                    repo.release_temporary(channel_id).await?;
                    report.deleted.push(channel_id);
                }
                Some(_) => report.kept.push(channel_id),
            }
        }

        tracing::info!(
            "Reconciled temporary channels ({:?}): {} pruned, {} deleted, {} kept",
            policy,
            report.pruned.len(),
            report.deleted.len(),
            report.kept.len()
        );

        Ok(report)
    }

    async fn delete_quietly(&self, channel_id: u64) {
        if let Err(e) = self.platform.delete_channel(channel_id).await {
            tracing::debug!("Leftover channel {} not deleted: {}", channel_id, e);
        }
    }
}
